//! Sitepack - resource classification, inline policy, markup rendering and
//! MIME tables for document-to-static-site exports.

pub mod asset;
pub mod cli;
pub mod config;
pub mod logger;
pub mod utils;

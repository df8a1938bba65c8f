//! Utility modules shared by the engine.

pub mod mime;
pub mod path;

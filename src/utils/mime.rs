//! MIME type detection utilities.
//!
//! Two independent lookup tables translate between file extensions and MIME
//! types. They are not exact inverses: several extensions share a MIME type
//! and some MIME types prefer a different canonical extension.
//!
//! Both directions are total:
//! - unknown extension → [`types::OCTET_STREAM`]
//! - unknown MIME type → its subtype (`image/x-foo` → `x-foo`), or `txt`

use std::borrow::Cow;
use std::path::Path;
use std::sync::LazyLock;

use rustc_hash::FxHashMap;

/// Common MIME type constants.
pub mod types {
    pub const HTML: &str = "text/html";
    pub const PLAIN: &str = "text/plain";
    pub const CSS: &str = "text/css";
    pub const JAVASCRIPT: &str = "application/javascript";
    pub const JSON: &str = "application/json";
    pub const XML: &str = "application/xml";
    pub const OCTET_STREAM: &str = "application/octet-stream";
    pub const PNG: &str = "image/png";
    pub const JPEG: &str = "image/jpeg";
    pub const SVG: &str = "image/svg+xml";
    pub const MP4: &str = "video/mp4";
    pub const WOFF2: &str = "application/font-woff2";
}

/// Extension used when a MIME type has neither a table entry nor a subtype.
pub const FALLBACK_EXTENSION: &str = "txt";

/// Extension → MIME type.
#[rustfmt::skip]
const EXTENSION_TO_MIME: &[(&str, &str)] = &[
    ("mpega", "audio/x-mpeg"),
    ("ps", "application/postscript"),
    ("aiff", "audio/x-aiff"),
    ("aim", "application/x-aim"),
    ("art", "image/x-jg"),
    ("asx", "video/x-ms-asf"),
    ("ulw", "audio/basic"),
    ("avi", "video/x-msvideo"),
    ("avx", "video/x-rad-screenplay"),
    ("bcpio", "application/x-bcpio"),
    ("exe", "application/octet-stream"),
    ("dib", "image/bmp"),
    ("html", "text/html"),
    ("cdf", "application/x-cdf"),
    ("cer", "application/pkix-cert"),
    ("class", "application/java"),
    ("cpio", "application/x-cpio"),
    ("csh", "application/x-csh"),
    ("css", "text/css"),
    ("doc", "application/msword"),
    ("dtd", "application/xml-dtd"),
    ("dv", "video/x-dv"),
    ("dvi", "application/x-dvi"),
    ("eot", "application/vnd.ms-fontobject"),
    ("etx", "text/x-setext"),
    ("gif", "image/gif"),
    ("gtar", "application/x-gtar"),
    ("gz", "application/x-gzip"),
    ("hdf", "application/x-hdf"),
    ("hqx", "application/mac-binhex40"),
    ("htc", "text/x-component"),
    ("ief", "image/ief"),
    ("jad", "text/vnd.sun.j2me.app-descriptor"),
    ("jar", "application/java-archive"),
    ("java", "text/x-java-source"),
    ("jnlp", "application/x-java-jnlp-file"),
    ("jpg", "image/jpeg"),
    ("js", "application/javascript"),
    ("txt", "text/plain"),
    ("json", "application/json"),
    ("midi", "audio/midi"),
    ("latex", "application/x-latex"),
    ("m3u", "audio/x-mpegurl"),
    ("pnt", "image/x-macpaint"),
    ("tr", "text/troff"),
    ("mathml", "application/mathml+xml"),
    ("mif", "application/x-mif"),
    ("qt", "video/quicktime"),
    ("movie", "video/x-sgi-movie"),
    ("mpa", "audio/mpeg"),
    ("mp4", "video/mp4"),
    ("mpg", "video/mpeg"),
    ("mpv2", "video/mpeg2"),
    ("src", "application/x-wais-source"),
    ("nc", "application/x-netcdf"),
    ("oda", "application/oda"),
    ("odb", "application/vnd.oasis.opendocument.database"),
    ("odc", "application/vnd.oasis.opendocument.chart"),
    ("odf", "application/vnd.oasis.opendocument.formula"),
    ("odg", "application/vnd.oasis.opendocument.graphics"),
    ("odi", "application/vnd.oasis.opendocument.image"),
    ("odm", "application/vnd.oasis.opendocument.text-master"),
    ("odp", "application/vnd.oasis.opendocument.presentation"),
    ("ods", "application/vnd.oasis.opendocument.spreadsheet"),
    ("odt", "application/vnd.oasis.opendocument.text"),
    ("otg", "application/vnd.oasis.opendocument.graphics-template"),
    ("oth", "application/vnd.oasis.opendocument.text-web"),
    ("otp", "application/vnd.oasis.opendocument.presentation-template"),
    ("ots", "application/vnd.oasis.opendocument.spreadsheet-template"),
    ("ott", "application/vnd.oasis.opendocument.text-template"),
    ("ogx", "application/ogg"),
    ("ogv", "video/ogg"),
    ("spx", "audio/ogg"),
    ("otf", "application/x-font-opentype"),
    ("flac", "audio/flac"),
    ("anx", "application/annodex"),
    ("axa", "audio/annodex"),
    ("axv", "video/annodex"),
    ("xspf", "application/xspf+xml"),
    ("pbm", "image/x-portable-bitmap"),
    ("pict", "image/pict"),
    ("pdf", "application/pdf"),
    ("pgm", "image/x-portable-graymap"),
    ("pls", "audio/x-scpls"),
    ("png", "image/png"),
    ("pnm", "image/x-portable-anymap"),
    ("ppm", "image/x-portable-pixmap"),
    ("pps", "application/vnd.ms-powerpoint"),
    ("psd", "image/vnd.adobe.photoshop"),
    ("qtif", "image/x-quicktime"),
    ("ras", "image/x-cmu-raster"),
    ("rdf", "application/rdf+xml"),
    ("rgb", "image/x-rgb"),
    ("rm", "application/vnd.rn-realmedia"),
    ("rtf", "application/rtf"),
    ("rtx", "text/richtext"),
    ("sfnt", "application/font-sfnt"),
    ("sh", "application/x-sh"),
    ("shar", "application/x-shar"),
    ("sit", "application/x-stuffit"),
    ("sv4cpio", "application/x-sv4cpio"),
    ("sv4crc", "application/x-sv4crc"),
    ("svg", "image/svg+xml"),
    ("swf", "application/x-shockwave-flash"),
    ("tar", "application/x-tar"),
    ("tcl", "application/x-tcl"),
    ("tex", "application/x-tex"),
    ("texinfo", "application/x-texinfo"),
    ("tiff", "image/tiff"),
    ("tsv", "text/tab-separated-values"),
    ("ttf", "application/x-font-ttf"),
    ("ustar", "application/x-ustar"),
    ("vxml", "application/voicexml+xml"),
    ("xbm", "image/x-xbitmap"),
    ("xhtml", "application/xhtml+xml"),
    ("xls", "application/vnd.ms-excel"),
    ("xsl", "application/xml"),
    ("xpm", "image/x-xpixmap"),
    ("xslt", "application/xslt+xml"),
    ("xul", "application/vnd.mozilla.xul+xml"),
    ("xwd", "image/x-xwindowdump"),
    ("vsd", "application/vnd.visio"),
    ("wav", "audio/x-wav"),
    ("wbmp", "image/vnd.wap.wbmp"),
    ("wml", "text/vnd.wap.wml"),
    ("wmlc", "application/vnd.wap.wmlc"),
    ("wmls", "text/vnd.wap.wmlsc"),
    ("wmlscriptc", "application/vnd.wap.wmlscriptc"),
    ("wmv", "video/x-ms-wmv"),
    ("woff", "application/font-woff"),
    ("woff2", "application/font-woff2"),
    ("wrl", "model/vrml"),
    ("wspolicy", "application/wspolicy+xml"),
    ("z", "application/x-compress"),
    ("zip", "application/zip"),
    // Modern web formats
    ("htm", "text/html"),
    ("xml", "application/xml"),
    ("mjs", "application/javascript"),
    ("cjs", "application/javascript"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("yaml", "text/yaml"),
    ("yml", "text/yaml"),
    ("toml", "application/toml"),
    ("ics", "text/calendar"),
    ("rss", "application/rss+xml"),
    ("atom", "application/atom+xml"),
    ("webmanifest", "application/manifest+json"),
    ("wasm", "application/wasm"),
    ("map", "application/json"),
    ("scss", "text/x-scss"),
    ("sass", "text/x-sass"),
    ("less", "text/less"),
    ("jpeg", "image/jpeg"),
    ("jpe", "image/jpeg"),
    ("webp", "image/webp"),
    ("avif", "image/avif"),
    ("apng", "image/apng"),
    ("heic", "image/heic"),
    ("jxl", "image/jxl"),
    ("ico", "image/x-icon"),
    ("bmp", "image/bmp"),
    ("tif", "image/tiff"),
    ("mp3", "audio/mpeg"),
    ("m4a", "audio/mp4"),
    ("aac", "audio/aac"),
    ("opus", "audio/opus"),
    ("oga", "audio/ogg"),
    ("weba", "audio/webm"),
    ("mid", "audio/midi"),
    ("ogg", "video/ogg"),
    ("webm", "video/webm"),
    ("mov", "video/quicktime"),
    ("m4v", "video/mp4"),
    ("mpeg", "video/mpeg"),
    ("3gp", "video/3gpp"),
    ("mkv", "video/x-matroska"),
    ("epub", "application/epub+zip"),
    ("7z", "application/x-7z-compressed"),
    ("rar", "application/vnd.rar"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    ("pptx", "application/vnd.openxmlformats-officedocument.presentationml.presentation"),
];

/// MIME type → canonical extension.
#[rustfmt::skip]
const MIME_TO_EXTENSION: &[(&str, &str)] = &[
    ("audio/x-mpeg", "mpega"),
    ("application/postscript", "ps"),
    ("audio/x-aiff", "aiff"),
    ("application/x-aim", "aim"),
    ("image/x-jg", "art"),
    ("video/x-ms-asf", "asx"),
    ("audio/basic", "ulw"),
    ("video/x-msvideo", "avi"),
    ("video/x-rad-screenplay", "avx"),
    ("application/x-bcpio", "bcpio"),
    ("application/octet-stream", "exe"),
    ("image/bmp", "dib"),
    ("text/html", "html"),
    ("application/x-cdf", "cdf"),
    ("application/pkix-cert", "cer"),
    ("application/java", "class"),
    ("application/x-cpio", "cpio"),
    ("application/x-csh", "csh"),
    ("text/css", "css"),
    ("application/msword", "doc"),
    ("application/xml-dtd", "dtd"),
    ("video/x-dv", "dv"),
    ("application/x-dvi", "dvi"),
    ("application/vnd.ms-fontobject", "eot"),
    ("text/x-setext", "etx"),
    ("image/gif", "gif"),
    ("application/x-gtar", "gtar"),
    ("application/x-gzip", "gz"),
    ("application/x-hdf", "hdf"),
    ("application/mac-binhex40", "hqx"),
    ("text/x-component", "htc"),
    ("image/ief", "ief"),
    ("text/vnd.sun.j2me.app-descriptor", "jad"),
    ("application/java-archive", "jar"),
    ("text/x-java-source", "java"),
    ("application/x-java-jnlp-file", "jnlp"),
    ("image/jpeg", "jpg"),
    ("application/javascript", "js"),
    ("text/plain", "txt"),
    ("application/json", "json"),
    ("audio/midi", "midi"),
    ("application/x-latex", "latex"),
    ("audio/x-mpegurl", "m3u"),
    ("image/x-macpaint", "pnt"),
    ("text/troff", "tr"),
    ("application/mathml+xml", "mathml"),
    ("application/x-mif", "mif"),
    ("video/quicktime", "qt"),
    ("video/x-sgi-movie", "movie"),
    ("audio/mpeg", "mpa"),
    ("video/mp4", "mp4"),
    ("video/mpeg", "mpg"),
    ("video/mpeg2", "mpv2"),
    ("application/x-wais-source", "src"),
    ("application/x-netcdf", "nc"),
    ("application/oda", "oda"),
    ("application/vnd.oasis.opendocument.database", "odb"),
    ("application/vnd.oasis.opendocument.chart", "odc"),
    ("application/vnd.oasis.opendocument.formula", "odf"),
    ("application/vnd.oasis.opendocument.graphics", "odg"),
    ("application/vnd.oasis.opendocument.image", "odi"),
    ("application/vnd.oasis.opendocument.text-master", "odm"),
    ("application/vnd.oasis.opendocument.presentation", "odp"),
    ("application/vnd.oasis.opendocument.spreadsheet", "ods"),
    ("application/vnd.oasis.opendocument.text", "odt"),
    ("application/vnd.oasis.opendocument.graphics-template", "otg"),
    ("application/vnd.oasis.opendocument.text-web", "oth"),
    ("application/vnd.oasis.opendocument.presentation-template", "otp"),
    ("application/vnd.oasis.opendocument.spreadsheet-template", "ots"),
    ("application/vnd.oasis.opendocument.text-template", "ott"),
    ("application/ogg", "ogx"),
    ("video/ogg", "ogv"),
    ("audio/ogg", "spx"),
    ("application/x-font-opentype", "otf"),
    ("audio/flac", "flac"),
    ("application/annodex", "anx"),
    ("audio/annodex", "axa"),
    ("video/annodex", "axv"),
    ("application/xspf+xml", "xspf"),
    ("image/x-portable-bitmap", "pbm"),
    ("image/pict", "pict"),
    ("application/pdf", "pdf"),
    ("image/x-portable-graymap", "pgm"),
    ("audio/x-scpls", "pls"),
    ("image/png", "png"),
    ("image/x-portable-anymap", "pnm"),
    ("image/x-portable-pixmap", "ppm"),
    ("application/vnd.ms-powerpoint", "pps"),
    ("image/vnd.adobe.photoshop", "psd"),
    ("image/x-quicktime", "qtif"),
    ("image/x-cmu-raster", "ras"),
    ("application/rdf+xml", "rdf"),
    ("image/x-rgb", "rgb"),
    ("application/vnd.rn-realmedia", "rm"),
    ("application/rtf", "rtf"),
    ("text/richtext", "rtx"),
    ("application/font-sfnt", "sfnt"),
    ("application/x-sh", "sh"),
    ("application/x-shar", "shar"),
    ("application/x-stuffit", "sit"),
    ("application/x-sv4cpio", "sv4cpio"),
    ("application/x-sv4crc", "sv4crc"),
    ("image/svg+xml", "svg"),
    ("application/x-shockwave-flash", "swf"),
    ("application/x-tar", "tar"),
    ("application/x-tcl", "tcl"),
    ("application/x-tex", "tex"),
    ("application/x-texinfo", "texinfo"),
    ("image/tiff", "tiff"),
    ("text/tab-separated-values", "tsv"),
    ("application/x-font-ttf", "ttf"),
    ("application/x-ustar", "ustar"),
    ("application/voicexml+xml", "vxml"),
    ("image/x-xbitmap", "xbm"),
    ("application/xhtml+xml", "xhtml"),
    ("application/vnd.ms-excel", "xls"),
    ("application/xml", "xsl"),
    ("image/x-xpixmap", "xpm"),
    ("application/xslt+xml", "xslt"),
    ("application/vnd.mozilla.xul+xml", "xul"),
    ("image/x-xwindowdump", "xwd"),
    ("application/vnd.visio", "vsd"),
    ("audio/x-wav", "wav"),
    ("image/vnd.wap.wbmp", "wbmp"),
    ("text/vnd.wap.wml", "wml"),
    ("application/vnd.wap.wmlc", "wmlc"),
    ("text/vnd.wap.wmlsc", "wmls"),
    ("application/vnd.wap.wmlscriptc", "wmlscriptc"),
    ("video/x-ms-wmv", "wmv"),
    ("application/font-woff", "woff"),
    ("application/font-woff2", "woff2"),
    ("model/vrml", "wrl"),
    ("application/wspolicy+xml", "wspolicy"),
    ("application/x-compress", "z"),
    ("application/zip", "zip"),
    // Modern web formats
    ("text/javascript", "js"),
    ("text/markdown", "md"),
    ("text/csv", "csv"),
    ("text/yaml", "yaml"),
    ("application/x-yaml", "yaml"),
    ("application/toml", "toml"),
    ("text/calendar", "ics"),
    ("application/rss+xml", "rss"),
    ("application/atom+xml", "atom"),
    ("application/manifest+json", "webmanifest"),
    ("application/wasm", "wasm"),
    ("application/gzip", "gz"),
    ("application/x-7z-compressed", "7z"),
    ("application/vnd.rar", "rar"),
    ("application/epub+zip", "epub"),
    ("image/webp", "webp"),
    ("image/avif", "avif"),
    ("image/apng", "apng"),
    ("image/heic", "heic"),
    ("image/jxl", "jxl"),
    ("image/x-icon", "ico"),
    ("image/vnd.microsoft.icon", "ico"),
    ("audio/wav", "wav"),
    ("audio/aac", "aac"),
    ("audio/mp4", "m4a"),
    ("audio/opus", "opus"),
    ("audio/webm", "weba"),
    ("video/webm", "webm"),
    ("video/3gpp", "3gp"),
    ("video/x-matroska", "mkv"),
    ("font/woff", "woff"),
    ("font/woff2", "woff2"),
    ("font/ttf", "ttf"),
    ("font/otf", "otf"),
];

/// Media extension → HTML element used to embed it.
const MEDIA_TAGS: &[(&str, &str)] = &[
    ("png", "img"),
    ("jpg", "img"),
    ("jpeg", "img"),
    ("tiff", "img"),
    ("bmp", "img"),
    ("avif", "img"),
    ("apng", "img"),
    ("gif", "img"),
    ("svg", "img"),
    ("webp", "img"),
    ("ico", "img"),
    ("mp4", "video"),
    ("webm", "video"),
    ("ogg", "video"),
    ("3gp", "video"),
    ("mov", "video"),
    ("mpeg", "video"),
    ("mp3", "audio"),
    ("wav", "audio"),
    ("flac", "audio"),
    ("aac", "audio"),
    ("m4a", "audio"),
    ("opus", "audio"),
];

static BY_EXTENSION: LazyLock<FxHashMap<&'static str, &'static str>> =
    LazyLock::new(|| EXTENSION_TO_MIME.iter().copied().collect());

static BY_MIME: LazyLock<FxHashMap<&'static str, &'static str>> =
    LazyLock::new(|| MIME_TO_EXTENSION.iter().copied().collect());

/// Lowercase an extension and strip a single leading dot.
pub fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_ascii_lowercase()
}

/// Guess MIME type from file path.
pub fn from_path(path: &Path) -> &'static str {
    from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or_default())
}

/// Guess MIME type from file extension (case-insensitive, leading dot optional).
pub fn from_extension(ext: &str) -> &'static str {
    BY_EXTENSION
        .get(normalize_extension(ext).as_str())
        .copied()
        .unwrap_or(types::OCTET_STREAM)
}

/// Best-guess file extension for a MIME type.
///
/// Parameters (`; charset=utf-8`) are ignored.
pub fn to_extension(mime: &str) -> Cow<'static, str> {
    let essence = mime
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if let Some(ext) = BY_MIME.get(essence.as_str()) {
        return Cow::Borrowed(ext);
    }

    match essence.split_once('/') {
        Some((_, subtype)) if !subtype.is_empty() => Cow::Owned(subtype.to_string()),
        _ => Cow::Borrowed(FALLBACK_EXTENSION),
    }
}

/// HTML element for a media extension: `img`, `video` or `audio`.
///
/// Extensions outside the tag table are classified by MIME type; anything
/// that is neither video nor audio is treated as an image.
pub fn media_tag(ext: &str) -> &'static str {
    let ext = normalize_extension(ext);
    if let Some((_, tag)) = MEDIA_TAGS.iter().find(|(known, _)| *known == ext) {
        return tag;
    }
    let mime = from_extension(&ext);
    if is_video(mime) {
        "video"
    } else if is_audio(mime) {
        "audio"
    } else {
        "img"
    }
}

/// Check if the MIME type represents text content.
pub fn is_text(mime: &str) -> bool {
    mime.starts_with("text/") || mime == types::JSON || mime == types::XML
}

/// Check if the MIME type represents an image.
pub fn is_image(mime: &str) -> bool {
    mime.starts_with("image/")
}

/// Check if the MIME type represents audio.
pub fn is_audio(mime: &str) -> bool {
    mime.starts_with("audio/")
}

/// Check if the MIME type represents video.
pub fn is_video(mime: &str) -> bool {
    mime.starts_with("video/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_from_path() {
        assert_eq!(from_path(&PathBuf::from("index.html")), types::HTML);
        assert_eq!(from_path(&PathBuf::from("style.css")), types::CSS);
        assert_eq!(from_path(&PathBuf::from("app.js")), types::JAVASCRIPT);
        assert_eq!(from_path(&PathBuf::from("logo.png")), types::PNG);
        assert_eq!(from_path(&PathBuf::from("photo.jpeg")), types::JPEG);
        assert_eq!(from_path(&PathBuf::from("icon.svg")), types::SVG);
        assert_eq!(from_path(&PathBuf::from("video.mp4")), types::MP4);
        assert_eq!(from_path(&PathBuf::from("unknown.xyz")), types::OCTET_STREAM);
        assert_eq!(from_path(&PathBuf::from("Makefile")), types::OCTET_STREAM);
    }

    #[test]
    fn test_from_extension_normalizes() {
        assert_eq!(from_extension(".CSS"), types::CSS);
        assert_eq!(from_extension("Woff2"), types::WOFF2);
        assert_eq!(from_extension(""), types::OCTET_STREAM);
    }

    #[test]
    fn test_to_extension_known() {
        assert_eq!(to_extension("text/css"), "css");
        assert_eq!(to_extension("image/jpeg"), "jpg");
        assert_eq!(to_extension("text/html; charset=utf-8"), "html");
        assert_eq!(to_extension("IMAGE/PNG"), "png");
    }

    #[test]
    fn test_to_extension_fallbacks() {
        assert_eq!(to_extension("image/x-unknown"), "x-unknown");
        assert_eq!(to_extension("nonsense"), FALLBACK_EXTENSION);
        assert_eq!(to_extension("text/"), FALLBACK_EXTENSION);
        assert_eq!(to_extension(""), FALLBACK_EXTENSION);
    }

    #[test]
    fn test_css_round_trip() {
        let ext = to_extension(from_extension("css"));
        assert_eq!(from_extension(&ext), types::CSS);
    }

    #[test]
    fn test_table_extensions_resolve_back() {
        // every canonical extension of a specific type is known to the forward table
        for (mime, ext) in MIME_TO_EXTENSION {
            if *mime == types::OCTET_STREAM {
                continue;
            }
            assert_ne!(
                from_extension(ext),
                types::OCTET_STREAM,
                "{mime} → {ext} has no forward entry"
            );
        }
    }

    #[test]
    fn test_generic_binary_round_trip() {
        assert_eq!(to_extension(types::OCTET_STREAM), "exe");
        assert_eq!(from_extension("exe"), types::OCTET_STREAM);
    }

    #[test]
    fn test_media_tag() {
        assert_eq!(media_tag("png"), "img");
        assert_eq!(media_tag("MP4"), "video");
        assert_eq!(media_tag(".ogg"), "video");
        assert_eq!(media_tag("opus"), "audio");
        assert_eq!(media_tag("unknown"), "img");
        // outside the tag table, classified through the MIME type
        assert_eq!(media_tag("avi"), "video");
        assert_eq!(media_tag("OGA"), "audio");
        assert_eq!(media_tag("pdf"), "img");
    }

    #[test]
    fn test_is_media() {
        assert!(is_image(types::PNG));
        assert!(is_image(types::SVG));
        assert!(is_audio(from_extension("mp3")));
        assert!(is_video(types::MP4));
        assert!(!is_image(types::HTML));
        assert!(is_text(types::CSS));
        assert!(!is_text(types::PNG));
    }
}

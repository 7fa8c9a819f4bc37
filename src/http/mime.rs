use std::path::Path;

/// Content type used when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Guesses a `Content-Type` from a file's extension (case-insensitive).
///
/// # Example
///
/// ```
/// # use lantern::http::mime::content_type_for;
/// # use std::path::Path;
/// assert_eq!(content_type_for(Path::new("index.HTML")), "text/html");
/// assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
/// ```
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return DEFAULT_CONTENT_TYPE;
    };

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "txt" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "pdf" => "application/pdf",
        "wasm" => "application/wasm",
        _ => DEFAULT_CONTENT_TYPE,
    }
}

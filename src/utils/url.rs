//! Backend URL handling.
//!
//! Base URLs come from the config file or `--url` and are often typed by
//! hand, so they are normalized once before any endpoint is joined onto them.

/// Normalize a backend base URL.
///
/// Surrounding whitespace and trailing slashes are removed, and a bare
/// `host:port` gets an `http://` scheme.
///
/// # Examples
///
/// ```
/// use chatbox::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("http://127.0.0.1:5000/"), "http://127.0.0.1:5000");
/// assert_eq!(normalize_base_url("localhost:5000"), "http://localhost:5000");
/// assert_eq!(normalize_base_url(" https://chat.example.com/api// "), "https://chat.example.com/api");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return String::new();
    }
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    }
}

/// Join an endpoint path onto a base URL without doubling slashes.
///
/// # Examples
///
/// ```
/// use chatbox::utils::url::endpoint_url;
///
/// assert_eq!(
///     endpoint_url("http://127.0.0.1:5000/", "/get_history"),
///     "http://127.0.0.1:5000/get_history"
/// );
/// ```
pub fn endpoint_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

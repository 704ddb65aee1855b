//! Central configuration constants for runtime limits and defaults.

use std::time::Duration;

/// Base URL of the project store when `CODEPAD_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Environment variable overriding [`DEFAULT_API_URL`].
pub const API_URL_ENV: &str = "CODEPAD_API_URL";

/// Quiet period after the last edit before the preview re-renders.
///
/// Zero means "on the next scheduler tick".
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::ZERO;

/// Request timeout for calls to the project store.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default file name for an exported document.
pub const EXPORT_FILE_NAME: &str = "code.html";

/// Markup a freshly created project starts with.
pub const STARTER_MARKUP: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Document</title>
</head>
<body>
    <h1>Hello!</h1>
</body>
</html>"#;

/// Stylesheet a freshly created project starts with.
pub const STARTER_STYLE: &str = "* { padding: 0px; margin: 0px; background-color: rgb(244,244,244); font-family: Arial, Helvetica, sans-serif;}";

/// Script a freshly created project starts with.
pub const STARTER_SCRIPT: &str = "// some comment";

/// Resolve the project store base URL from the environment.
pub fn api_url() -> String {
    std::env::var(API_URL_ENV)
        .ok()
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

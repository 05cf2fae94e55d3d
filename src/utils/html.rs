// src/utils/html.rs

/// Sanitizes free text that the dashboard renders as HTML
/// (notification messages, course descriptions).
///
/// Whitelist-based: safe tags such as <b> or <p> survive, <script> and
/// <iframe> are removed together with their content, and event-handler
/// attributes are stripped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

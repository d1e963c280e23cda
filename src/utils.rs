//! Small string helpers used by the scraper and for log output.

/// Truncate a string for logging purposes.
///
/// Long strings are cut at `max` bytes (backed off to a char boundary) with an
/// ellipsis and byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Join text nodes and collapse whitespace runs into single spaces.
pub fn normalize_text<'a>(nodes: impl Iterator<Item = &'a str>) -> String {
    let joined: String = nodes.collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

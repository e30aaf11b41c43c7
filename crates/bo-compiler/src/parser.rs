//! Domain-list preprocessing
//!
//! Input is UTF-8 text, one domain per line. Blank lines and lines
//! whose first non-whitespace character is `#` are comments. Order of
//! the surviving lines is preserved; rule IDs are derived from it.

/// Parse a raw domain list into its surviving entries, in input order.
pub fn parse_domain_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment_line(line))
        .map(str::to_string)
        .collect()
}

fn is_comment_line(line: &str) -> bool {
    line.starts_with('#')
}

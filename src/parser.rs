/// Classification of one physical line of INI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only.
    Blank,
    /// Starts with `#` or `;` after leading whitespace.
    Comment,
    /// `[name]`, with anything after the closing bracket ignored.
    Header(&'a str),
    /// `key = value`, or a bare key with an empty value.
    Assignment { key: &'a str, value: &'a str },
}

/// Classify a line that has already had its line terminator removed.
#[must_use]
pub fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return Line::Blank;
    }

    if is_comment(trimmed) {
        return Line::Comment;
    }

    if let Some(name) = header_name(trimmed) {
        return Line::Header(name);
    }

    match parse_line(line) {
        Some((key, value)) => Line::Assignment { key, value },
        None => Line::Blank,
    }
}

/// Split a line into a key and a value on its first `=`.
///
/// Both sides are trimmed, and one pair of surrounding double quotes is removed from the value
/// so that values with significant leading or trailing whitespace can be written. A line with
/// no `=` is a key with an empty value. Returns `None` for blank lines, comments and lines
/// with an empty key.
#[must_use]
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let trimmed = line.trim();

    if trimmed.is_empty() || is_comment(trimmed) {
        return None;
    }

    let (key, value) = match trimmed.split_once('=') {
        Some((key, value)) => (key.trim_end(), unquote(value.trim_start())),
        None => (trimmed, ""),
    };

    if key.is_empty() { None } else { Some((key, value)) }
}

/// A line is a comment when its first non-whitespace character is `#` or `;`.
#[must_use]
pub fn is_comment(line: &str) -> bool {
    matches!(line.trim_start().chars().next(), Some('#' | ';'))
}

/// Patch and code lists (`$Name`, `+Enabled`, `*Flag`) are kept as raw lines.
pub(crate) fn is_code_line(line: &str) -> bool {
    matches!(line.chars().next(), Some('$' | '+' | '*'))
}

/// Format a value so that [`parse_line`] reads it back unchanged.
pub(crate) fn quote_if_needed(value: &str) -> std::borrow::Cow<'_, str> {
    if value.trim() != value || is_quoted(value) {
        format!("\"{value}\"").into()
    } else {
        value.into()
    }
}

fn header_name(trimmed: &str) -> Option<&str> {
    let rest = trimmed.strip_prefix('[')?;
    let end = rest.find(']')?;

    Some(rest[..end].trim())
}

fn is_quoted(value: &str) -> bool {
    value.len() >= 2 && value.starts_with('"') && value.ends_with('"')
}

fn unquote(value: &str) -> &str {
    if is_quoted(value) {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_and_value_are_trimmed() {
        assert_eq!(parse_line("  vSync   =  True  "), Some(("vSync", "True")));
    }

    #[test]
    fn split_on_first_equal() {
        assert_eq!(
            parse_line("PostProcessingShader = a=b=c"),
            Some(("PostProcessingShader", "a=b=c"))
        );
    }

    #[test]
    fn quoted_value_keeps_inner_whitespace() {
        assert_eq!(parse_line(r#"Prefix = "  padded  ""#), Some(("Prefix", "  padded  ")));
    }

    #[test]
    fn unbalanced_quote_is_kept() {
        assert_eq!(parse_line(r#"Title = "half"#), Some(("Title", "\"half")));
        assert_eq!(parse_line(r#"Title = ""#), Some(("Title", "\"")));
    }

    #[test]
    fn only_one_pair_of_quotes_is_removed() {
        assert_eq!(parse_line(r#"Title = ""x"""#), Some(("Title", "\"x\"")));
    }

    #[test]
    fn bare_key_has_empty_value() {
        assert_eq!(parse_line("  EnableCheats  "), Some(("EnableCheats", "")));
        assert_eq!(parse_line("Empty ="), Some(("Empty", "")));
    }

    #[test]
    fn nothing_to_extract() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   \t"), None);
        assert_eq!(parse_line("# comment = not a key"), None);
        assert_eq!(parse_line("   ; note"), None);
        assert_eq!(parse_line(" = orphan"), None);
    }

    #[test]
    fn headers() {
        assert_eq!(classify("[Graphics]"), Line::Header("Graphics"));
        assert_eq!(classify("  [ Core Settings ]  ; trailing"), Line::Header("Core Settings"));
        assert_eq!(classify("[]"), Line::Header(""));
    }

    #[test]
    fn stray_bracket_is_a_bare_key() {
        assert_eq!(
            classify("[Unterminated"),
            Line::Assignment {
                key: "[Unterminated",
                value: ""
            }
        );
    }

    #[test]
    fn comments_and_blanks() {
        assert_eq!(classify("; note"), Line::Comment);
        assert_eq!(classify("\t# note"), Line::Comment);
        assert_eq!(classify(""), Line::Blank);
        assert_eq!(classify("    "), Line::Blank);
    }

    #[test]
    fn quoting_matches_parsing() {
        for value in ["plain", " lead", "trail ", "\"wrapped\"", "\"", "", "mid \" quote"] {
            let line = format!("key = {}", quote_if_needed(value));
            assert_eq!(parse_line(&line), Some(("key", value)), "line: {line:?}");
        }
    }

    #[test]
    fn code_lines() {
        assert!(is_code_line("$Infinite Health"));
        assert!(is_code_line("+$Infinite Health"));
        assert!(is_code_line("*Flag"));
        assert!(!is_code_line(" $indented"));
        assert!(!is_code_line("key = $value"));
    }
}

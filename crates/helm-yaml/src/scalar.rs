use core::fmt::Write;

/// Format a string as scalar text, double-quoting it when the plain form
/// would be read back as another type or would break the block structure.
pub fn format_string(s: &str) -> String {
    if needs_quoting(s) {
        format!("\"{}\"", escape_double_quoted(s))
    } else {
        s.to_string()
    }
}

fn needs_quoting(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };

    // Values that look like other YAML types
    let lower = s.to_lowercase();
    if matches!(
        lower.as_str(),
        "true" | "false" | "yes" | "no" | "on" | "off" | "y" | "n" | "null" | "~"
    ) {
        return true;
    }

    if matches!(
        first,
        '{' | '}'
            | '['
            | ']'
            | ','
            | '#'
            | '&'
            | '*'
            | '!'
            | '|'
            | '>'
            | '\''
            | '"'
            | '%'
            | '@'
            | '`'
            | '-'
            | '?'
            | ':'
    ) {
        return true;
    }

    if s.starts_with(char::is_whitespace) || s.ends_with(char::is_whitespace) {
        return true;
    }

    if s.contains(": ") || s.ends_with(':') || s.contains(" #") || s.contains("{{") {
        return true;
    }

    if s.chars().any(char::is_control) {
        return true;
    }

    // Looks like a number
    s.parse::<f64>().is_ok() || s.starts_with("0x") || s.starts_with("0o") || s.starts_with("0b")
}

fn escape_double_quoted(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '"' => result.push_str("\\\""),
            '\\' => result.push_str("\\\\"),
            '\n' => result.push_str("\\n"),
            '\r' => result.push_str("\\r"),
            '\t' => result.push_str("\\t"),
            '\u{08}' => result.push_str("\\b"),
            '\u{07}' => result.push_str("\\a"),
            '\u{0B}' => result.push_str("\\v"),
            '\u{0C}' => result.push_str("\\f"),
            '\u{1B}' => result.push_str("\\e"),
            c if c.is_control() => {
                let _ = write!(result, "\\x{:02x}", c as u32);
            }
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_strings_stay_plain() {
        assert_eq!(format_string("nginx"), "nginx");
        assert_eq!(format_string("hello world"), "hello world");
        assert_eq!(format_string("a-b:c"), "a-b:c");
    }

    #[test]
    fn ambiguous_strings_are_quoted() {
        for s in ["", "true", "No", "null", "~", "42", "1.5", "0x1f", "- x", "a: b", "key:"] {
            assert_eq!(format_string(s), format!("\"{s}\""), "{s:?}");
        }
    }

    #[test]
    fn template_braces_are_quoted() {
        assert_eq!(format_string("{{ .Values.x }}"), "\"{{ .Values.x }}\"");
        assert_eq!(format_string("a {{ b }}"), "\"a {{ b }}\"");
    }

    #[test]
    fn escapes_control_characters() {
        assert_eq!(format_string("a\nb\t\"c\""), r#""a\nb\t\"c\"""#);
        assert_eq!(format_string("bell\u{7}"), r#""bell\a""#);
        assert_eq!(format_string("x\u{1}"), r#""x\x01""#);
    }

    #[test]
    fn surrounding_whitespace_is_quoted() {
        assert_eq!(format_string(" padded"), "\" padded\"");
        assert_eq!(format_string("padded "), "\"padded \"");
    }
}

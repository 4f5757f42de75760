use super::escape_into;

/// Serialize text as a JSON string value.
///
/// # Examples
///
/// ```
/// use modelbind_util::strings::quote;
///
/// assert_eq!(quote("hello"), "\"hello\"");
/// assert_eq!(quote("say \"hi\""), "\"say \\\"hi\\\"\"");
/// ```
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    escape_into(&mut out, s);
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_empty() {
        assert_eq!(quote(""), "\"\"");
    }

    #[test]
    fn test_quote_with_newline() {
        assert_eq!(quote("line1\nline2"), "\"line1\\nline2\"");
    }

    #[test]
    fn test_quote_with_backslash() {
        assert_eq!(quote("back\\slash"), "\"back\\\\slash\"");
    }
}

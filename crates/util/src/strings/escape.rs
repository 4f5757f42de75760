const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// The letter of the two-character form (RFC 8259 §7), if `ch` has one.
fn short_escape(ch: char) -> Option<char> {
    match ch {
        '"' => Some('"'),
        '\\' => Some('\\'),
        '\u{0008}' => Some('b'),
        '\t' => Some('t'),
        '\n' => Some('n'),
        '\u{000C}' => Some('f'),
        '\r' => Some('r'),
        _ => None,
    }
}

/// Appends `s` to `out`, escaped for use inside a JSON string literal.
///
/// Only control characters, `"` and `\` are rewritten; controls without a
/// short form become `\u00xx` with lowercase hex digits. Structural
/// characters such as `{`, `[` or `,` and all non-ASCII text pass through
/// untouched.
pub fn escape_into(out: &mut String, s: &str) {
    let mut last = 0;
    for (i, ch) in s.char_indices() {
        if ch >= '\u{0020}' && ch != '"' && ch != '\\' {
            continue;
        }
        out.push_str(&s[last..i]);
        out.push('\\');
        match short_escape(ch) {
            Some(letter) => out.push(letter),
            None => {
                let byte = ch as u8;
                out.push_str("u00");
                out.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
                out.push(char::from(HEX_DIGITS[usize::from(byte & 0x0f)]));
            }
        }
        // Every escaped character is a single byte.
        last = i + 1;
    }
    out.push_str(&s[last..]);
}

/// Escape special characters in a string for JSON serialization.
///
/// # Examples
///
/// ```
/// use modelbind_util::strings::escape;
///
/// assert_eq!(escape("hello"), "hello");
/// assert_eq!(escape("say \"hi\""), "say \\\"hi\\\"");
/// assert_eq!(escape("line1\nline2"), "line1\\nline2");
/// ```
pub fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    escape_into(&mut result, s);
    result
}

//! MySQL string-literal escaping

use crate::traits::Escape;

/// Escapes text the way `mysql_real_escape_string` does.
///
/// With `no_backslash_escapes` (the server's `NO_BACKSLASH_ESCAPES` SQL
/// mode) backslashes are literal, so only single quotes are doubled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MySqlEscaper {
    no_backslash_escapes: bool,
}

impl MySqlEscaper {
    pub fn new(no_backslash_escapes: bool) -> Self {
        Self {
            no_backslash_escapes,
        }
    }

    pub fn no_backslash_escapes(&self) -> bool {
        self.no_backslash_escapes
    }
}

impl Escape for MySqlEscaper {
    fn escape(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len() + 8);
        if self.no_backslash_escapes {
            for c in text.chars() {
                if c == '\'' {
                    out.push('\'');
                }
                out.push(c);
            }
            return out;
        }

        for c in text.chars() {
            match c {
                '\0' => out.push_str("\\0"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '"' => out.push_str("\\\""),
                '\x1a' => out.push_str("\\Z"),
                c => out.push(c),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslash_escapes() {
        let e = MySqlEscaper::default();
        assert_eq!(e.escape("plain"), "plain");
        assert_eq!(e.escape("O'Brien"), r"O\'Brien");
        assert_eq!(e.escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(e.escape("a\\b"), r"a\\b");
        assert_eq!(e.escape("l1\nl2\r\0\x1a"), r"l1\nl2\r\0\Z");
    }

    #[test]
    fn test_no_backslash_escapes() {
        let e = MySqlEscaper::new(true);
        assert_eq!(e.escape("O'Brien"), "O''Brien");
        assert_eq!(e.escape("a\\b\n"), "a\\b\n");
    }
}

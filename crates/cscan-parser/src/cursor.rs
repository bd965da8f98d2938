//! Byte cursor shared by the statement scanners.
//!
//! All structural characters in C (`{}();:`) are ASCII, so scanning works on
//! bytes and every position the cursor stops at is a valid `str` boundary.

/// Keywords that open a compound statement.
pub(crate) const COMPOUND_KEYWORDS: &[&str] = &["if", "while", "for", "switch", "do"];

/// Attribute wrappers whose parenthesized argument is never a parameter list.
pub(crate) const ATTRIBUTE_WRAPPERS: &[&str] = &["__attribute__", "__attribute", "__declspec"];

pub(crate) struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn at(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    pub(crate) const fn pos(&self) -> usize {
        self.pos
    }

    pub(crate) const fn set_pos(&mut self, pos: usize) {
        self.pos = pos;
    }

    pub(crate) fn peek(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    pub(crate) fn bump(&mut self) {
        if self.pos < self.text.len() {
            self.pos += 1;
        }
    }

    /// Slice of the underlying text between two positions.
    pub(crate) fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[start..end]
    }

    pub(crate) fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Skip a string or character literal starting at the cursor.
    ///
    /// Literals do not span lines, so an unterminated one ends at the newline.
    pub(crate) fn skip_literal(&mut self) {
        let Some(quote) = self.peek() else { return };
        self.pos += 1;
        while let Some(b) = self.peek() {
            match b {
                b'\\' => self.pos = (self.pos + 2).min(self.text.len()),
                b'\n' => return,
                _ if b == quote => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    /// Skip a balanced `open ... close` group starting at the cursor.
    ///
    /// Returns `false` (cursor at end of text) when the group never closes.
    pub(crate) fn skip_balanced(&mut self, open: u8, close: u8) -> bool {
        let mut depth = 0usize;
        while let Some(b) = self.peek() {
            match b {
                b'"' | b'\'' => {
                    self.skip_literal();
                    continue;
                }
                _ if b == open => depth += 1,
                _ if b == close => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.pos += 1;
                        return true;
                    }
                }
                _ => {}
            }
            self.pos += 1;
        }
        false
    }

    /// The identifier starting at the cursor, if any.
    pub(crate) fn word(&self) -> Option<&'a str> {
        let bytes = self.text.as_bytes();
        let first = *bytes.get(self.pos)?;
        if !(first.is_ascii_alphabetic() || first == b'_') {
            return None;
        }
        let end = bytes[self.pos..]
            .iter()
            .position(|&b| !is_ident_byte(b))
            .map_or(self.text.len(), |n| self.pos + n);
        Some(&self.text[self.pos..end])
    }

    /// Whether the identifier at the cursor is exactly `keyword`.
    pub(crate) fn at_keyword(&self, keyword: &str) -> bool {
        self.word() == Some(keyword)
    }

    /// Consume `keyword` if it is the identifier at the cursor.
    pub(crate) fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }
}

pub(crate) const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `text` with every `__attribute__((...))`-style wrapper and its argument
/// removed. An unclosed argument drops the rest of the text.
pub(crate) fn without_attributes(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cur = Cursor::at(text, 0);
    let mut kept = 0;
    while let Some(b) = cur.peek() {
        let Some(word) = cur.word() else {
            if b == b'"' || b == b'\'' {
                cur.skip_literal();
            } else {
                cur.bump();
            }
            continue;
        };
        let start = cur.pos();
        cur.set_pos(start + word.len());
        if !ATTRIBUTE_WRAPPERS.contains(&word) {
            continue;
        }
        cur.skip_whitespace();
        if cur.peek() == Some(b'(') {
            out.push_str(cur.slice(kept, start));
            cur.skip_balanced(b'(', b')');
            kept = cur.pos();
        }
    }
    out.push_str(cur.slice(kept, text.len()));
    out
}

/// Collapse every run of whitespace (newlines included) to one space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split block text into trimmed lines, dropping blank ones.
pub(crate) fn block_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skip_balanced_ignores_braces_in_literals() {
        let text = r#"{ puts("}"); c = '{'; }tail"#;
        let mut cur = Cursor::at(text, 0);
        assert!(cur.skip_balanced(b'{', b'}'));
        assert_eq!(&text[cur.pos()..], "tail");
    }

    #[test]
    fn skip_balanced_reports_unclosed_group() {
        let mut cur = Cursor::at("{ { }", 0);
        assert!(!cur.skip_balanced(b'{', b'}'));
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn keyword_requires_word_boundary() {
        assert!(Cursor::at("if (x)", 0).at_keyword("if"));
        assert!(Cursor::at("if(x)", 0).at_keyword("if"));
        assert!(!Cursor::at("iffy = 1;", 0).at_keyword("if"));
        assert!(!Cursor::at("do_work();", 0).at_keyword("do"));
    }

    #[test]
    fn attributes_are_cut_out() {
        assert_eq!(
            without_attributes("struct __attribute__((packed)) hdr "),
            "struct  hdr "
        );
        assert_eq!(
            without_attributes("static int __attribute__ ((unused)) f(int x) "),
            "static int  f(int x) "
        );
        assert_eq!(without_attributes("int __attribute__;"), "int __attribute__;");
        let quoted = "char *s = \"__declspec(x)\"";
        assert_eq!(without_attributes(quoted), quoted);
    }

    #[test]
    fn collapse_joins_lines() {
        assert_eq!(
            collapse_whitespace("static int\n  stop(char *reason)\n{"),
            "static int stop(char *reason) {"
        );
    }
}

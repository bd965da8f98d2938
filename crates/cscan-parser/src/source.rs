//! Source line ingestion and comment stripping.
//!
//! Every function here preserves line boundaries 1:1, so a line index in the
//! output still names the same line of the original file. Lines that held
//! only comments, whitespace or a preprocessor directive come out empty.

use std::path::Path;

/// Read a file into lines.
///
/// The file handle is held only for the duration of the read. Bytes that are
/// not valid UTF-8 are replaced rather than rejected, since C sources in the
/// wild carry Latin-1 comments and string literals.
///
/// # Errors
/// Returns the underlying I/O error if the file cannot be read.
pub fn read_source_lines(path: &Path) -> std::io::Result<Vec<String>> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes)
        .lines()
        .map(str::to_string)
        .collect())
}

/// Remove `//` and `/* ... */` comments from a sequence of lines.
///
/// Block comments may span lines; an unterminated `/*` swallows the rest of
/// the input. Comment markers inside string or character literals, and
/// markers of one kind inside a comment of the other kind, are ignored.
#[must_use]
pub fn strip_comments<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut in_block = false;
    lines
        .iter()
        .map(|line| {
            let (code, still_open) = strip_line(line.as_ref(), in_block);
            in_block = still_open;
            if code.trim().is_empty() {
                String::new()
            } else {
                code
            }
        })
        .collect()
}

/// [`strip_comments`] followed by blanking of preprocessor directives.
///
/// Directive lines continued with a trailing backslash are blanked along
/// with their continuation lines.
#[must_use]
pub fn clean_lines<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let mut continued = false;
    strip_comments(lines)
        .into_iter()
        .map(|line| {
            if continued || line.trim_start().starts_with('#') {
                continued = line.trim_end().ends_with('\\');
                String::new()
            } else {
                line
            }
        })
        .collect()
}

/// Strip the comments from one line, given whether a block comment is
/// already open. Returns the remaining code and whether a block comment is
/// still open at the end of the line.
fn strip_line(line: &str, mut in_block: bool) -> (String, bool) {
    let mut code = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if in_block {
            if c == '*' && chars.peek() == Some(&'/') {
                chars.next();
                in_block = false;
                // `a/**/b` is two tokens, not one.
                code.push(' ');
            }
            continue;
        }

        if let Some(q) = quote {
            code.push(c);
            if c == '\\' {
                if let Some(escaped) = chars.next() {
                    code.push(escaped);
                }
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => {
                quote = Some(c);
                code.push(c);
            }
            '/' if chars.peek() == Some(&'/') => break,
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                in_block = true;
            }
            _ => code.push(c),
        }
    }

    (code, in_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::line_comment("// msg")]
    #[case::commented_statement("// int stmt;")]
    #[case::indented("    // ...    ")]
    #[case::block_opener_in_line_comment("// /*")]
    #[case::block_comment("/* int stmt; */")]
    fn comment_only_line_becomes_empty(#[case] line: &str) {
        assert_eq!(strip_comments(&[line]), vec![String::new()]);
    }

    #[test]
    fn multi_line_block_comment_is_removed() {
        let lines = ["/**", " * ...", " * int stmt;", " */", "int spam;"];
        assert_eq!(
            strip_comments(&lines),
            vec!["", "", "", "", "int spam;"]
        );
    }

    #[rstest]
    #[case("int stmt; // ...", "int stmt; ")]
    #[case("int stmt; /* ...  */", "int stmt;  ")]
    #[case("/* ...  */ int stmt;", "  int stmt;")]
    fn trailing_and_leading_comments_keep_code(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(strip_comments(&[line]), vec![expected.to_string()]);
    }

    #[test]
    fn block_comment_spanning_lines_keeps_code_on_both_ends() {
        let lines = ["int a; /* start", "middle", "end */ int b;"];
        assert_eq!(strip_comments(&lines), vec!["int a; ", "", "  int b;"]);
    }

    #[test]
    fn unterminated_block_comment_swallows_rest() {
        let lines = ["int a;", "/* never closed", "int b;", "int c;"];
        assert_eq!(strip_comments(&lines), vec!["int a;", "", "", ""]);
    }

    #[test]
    fn line_comment_inside_block_comment_is_inert() {
        let lines = ["/* // */ int a;"];
        assert_eq!(strip_comments(&lines), vec!["  int a;"]);
    }

    #[test]
    fn comment_markers_inside_literals_are_kept() {
        let lines = [
            r#"const char *url = "http://example.com/*x*/";"#,
            r"char slash = '/';",
            r#"const char *q = "say \"//\"";"#,
        ];
        assert_eq!(
            strip_comments(&lines),
            lines.iter().map(ToString::to_string).collect::<Vec<_>>()
        );
    }

    #[test]
    fn line_count_is_preserved() {
        let lines = ["", "  ", "/*", "*/", "int x;"];
        assert_eq!(strip_comments(&lines).len(), lines.len());
    }

    #[test]
    fn directives_are_blanked_with_continuations() {
        let lines = [
            "#include <stdio.h>",
            "#define TWICE(x) \\",
            "    ((x) * 2)",
            "  #  ifdef Py_DEBUG",
            "int spam;",
            "#endif",
        ];
        assert_eq!(clean_lines(&lines), vec!["", "", "", "", "int spam;", ""]);
    }

    #[test]
    fn read_source_lines_splits_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("spam.c");
        std::fs::write(&path, "int spam;\n\nchar *eggs;\n").expect("write source");

        let lines = read_source_lines(&path).expect("read source");
        assert_eq!(lines, vec!["int spam;", "", "char *eggs;"]);
    }

    #[test]
    fn read_source_lines_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = read_source_lines(&dir.path().join("missing.c")).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}

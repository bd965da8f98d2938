//! Local statement iterator.
//!
//! Scans one nesting level of a function or block body. Simple statements
//! come out as-is; `if`/`while`/`for`/`switch`/`do` statements and bare
//! `{ ... }` blocks come out as one compound statement whose clauses carry
//! the block lines. The iterator never descends into those blocks itself;
//! the driver queues them and scans them again.

use crate::cursor::{COMPOUND_KEYWORDS, Cursor, block_lines, collapse_whitespace};
use crate::source::clean_lines;
use crate::types::{Clause, LocalStatement};

/// Iterate over the statements at the top level of a body.
///
/// Depth counting restarts at 0 for `lines`, which are expected to be the
/// lines strictly inside the body's braces.
#[must_use]
pub fn iter_local_statements<S: AsRef<str>>(lines: &[S]) -> LocalStatements {
    LocalStatements {
        text: clean_lines(lines).join("\n"),
        pos: 0,
        done: false,
    }
}

/// Lazy sequence of [`LocalStatement`] values, see [`iter_local_statements`].
#[derive(Debug, Clone)]
pub struct LocalStatements {
    text: String,
    pos: usize,
    done: bool,
}

impl LocalStatements {
    /// Scan one statement; `None` at end of input or on broken structure.
    fn scan(&mut self) -> Option<LocalStatement> {
        let mut cur = Cursor::at(&self.text, self.pos);
        skip_labels(&mut cur);
        cur.peek()?;
        let start = cur.pos();

        let statement = if starts_compound(&cur) {
            let clauses = read_compound(&mut cur)?;
            LocalStatement::compound(collapse_whitespace(cur.slice(start, cur.pos())), clauses)
        } else {
            skip_simple(&mut cur)?;
            LocalStatement::simple(collapse_whitespace(cur.slice(start, cur.pos())))
        };
        self.pos = cur.pos();
        Some(statement)
    }
}

impl Iterator for LocalStatements {
    type Item = LocalStatement;

    fn next(&mut self) -> Option<LocalStatement> {
        while !self.done {
            match self.scan() {
                Some(statement) if statement.statement == ";" => {}
                Some(statement) => return Some(statement),
                None => self.done = true,
            }
        }
        None
    }
}

impl std::iter::FusedIterator for LocalStatements {}

fn starts_compound(cur: &Cursor<'_>) -> bool {
    cur.peek() == Some(b'{') || COMPOUND_KEYWORDS.iter().any(|kw| cur.at_keyword(kw))
}

/// Skip `case ...:`, `default:` and goto labels in front of a statement.
fn skip_labels(cur: &mut Cursor<'_>) {
    loop {
        cur.skip_whitespace();
        let save = cur.pos();
        if cur.eat_keyword("case") {
            if skip_case_expression(cur) {
                continue;
            }
        } else if let Some(word) = cur.word() {
            cur.set_pos(save + word.len());
            cur.skip_whitespace();
            if cur.peek() == Some(b':') {
                cur.bump();
                if cur.peek() != Some(b':') {
                    continue;
                }
            }
        }
        cur.set_pos(save);
        return;
    }
}

/// Advance past the `:` ending a `case` label.
fn skip_case_expression(cur: &mut Cursor<'_>) -> bool {
    while let Some(byte) = cur.peek() {
        match byte {
            b'"' | b'\'' => cur.skip_literal(),
            b'(' => {
                if !cur.skip_balanced(b'(', b')') {
                    return false;
                }
            }
            b':' => {
                cur.bump();
                return true;
            }
            b';' | b'{' | b'}' => return false,
            _ => cur.bump(),
        }
    }
    false
}

/// Advance past a simple statement's terminating `;`.
fn skip_simple(cur: &mut Cursor<'_>) -> Option<()> {
    loop {
        match cur.peek()? {
            b'"' | b'\'' => cur.skip_literal(),
            b'(' => cur.skip_balanced(b'(', b')').then_some(())?,
            // Brace initializers and local struct definitions.
            b'{' => cur.skip_balanced(b'{', b'}').then_some(())?,
            b';' => {
                cur.bump();
                return Some(());
            }
            b'}' => return None,
            _ => cur.bump(),
        }
    }
}

/// Read a compound statement at the cursor into its clauses.
fn read_compound(cur: &mut Cursor<'_>) -> Option<Vec<Clause>> {
    let start = cur.pos();

    if cur.peek() == Some(b'{') {
        return Some(vec![Clause::new("", read_braced(cur)?)]);
    }

    if cur.eat_keyword("do") {
        let block = read_body(cur)?;
        cur.skip_whitespace();
        let tail = cur.pos();
        if !cur.eat_keyword("while") {
            return None;
        }
        read_condition(cur)?;
        let header = collapse_whitespace(cur.slice(tail, cur.pos()));
        cur.skip_whitespace();
        if cur.peek() != Some(b';') {
            return None;
        }
        cur.bump();
        return Some(vec![Clause::new("do", block), Clause::new(header, Vec::new())]);
    }

    if cur.eat_keyword("if") {
        return read_if_chain(cur, start);
    }

    // while, for, switch
    let keyword = cur.word()?;
    cur.set_pos(start + keyword.len());
    read_condition(cur)?;
    let header = collapse_whitespace(cur.slice(start, cur.pos()));
    let block = read_body(cur)?;
    Some(vec![Clause::new(header, block)])
}

/// Read `if (...) ... [else if (...) ...]* [else ...]`, cursor after `if`.
fn read_if_chain(cur: &mut Cursor<'_>, start: usize) -> Option<Vec<Clause>> {
    let mut clauses = Vec::new();
    let mut header_start = start;
    loop {
        read_condition(cur)?;
        let header = collapse_whitespace(cur.slice(header_start, cur.pos()));
        clauses.push(Clause::new(header, read_body(cur)?));

        let save = cur.pos();
        cur.skip_whitespace();
        let else_start = cur.pos();
        if !cur.eat_keyword("else") {
            cur.set_pos(save);
            return Some(clauses);
        }
        cur.skip_whitespace();
        if cur.eat_keyword("if") {
            header_start = else_start;
            continue;
        }
        clauses.push(Clause::new("else", read_body(cur)?));
        return Some(clauses);
    }
}

/// Skip the parenthesized condition following a keyword.
fn read_condition(cur: &mut Cursor<'_>) -> Option<()> {
    cur.skip_whitespace();
    if cur.peek() != Some(b'(') {
        return None;
    }
    cur.skip_balanced(b'(', b')').then_some(())
}

/// Read a clause body: a braced block or a single (possibly compound)
/// statement.
fn read_body(cur: &mut Cursor<'_>) -> Option<Vec<String>> {
    cur.skip_whitespace();
    if cur.peek()? == b'{' {
        return read_braced(cur);
    }
    let start = cur.pos();
    if starts_compound(cur) {
        read_compound(cur)?;
    } else {
        skip_simple(cur)?;
    }
    Some(block_lines(cur.slice(start, cur.pos())))
}

fn read_braced(cur: &mut Cursor<'_>) -> Option<Vec<String>> {
    let open = cur.pos();
    if !cur.skip_balanced(b'{', b'}') {
        return None;
    }
    Some(block_lines(cur.slice(open + 1, cur.pos() - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn scan(text: &str) -> Vec<LocalStatement> {
        let lines: Vec<&str> = text.lines().collect();
        iter_local_statements(&lines).collect()
    }

    fn strings(lines: &[&str]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn no_statements() {
        assert!(scan("\n\n").is_empty());
    }

    #[test]
    fn simple_statements_in_order() {
        assert_eq!(
            scan("ham = reason;\nreturn _stop();"),
            vec![
                LocalStatement::simple("ham = reason;"),
                LocalStatement::simple("return _stop();"),
            ]
        );
    }

    #[test]
    fn statement_spanning_lines_is_collapsed() {
        assert_eq!(
            scan("PyObject *result =\n    _do_something(arg1,\n                  arg2);"),
            vec![LocalStatement::simple(
                "PyObject *result = _do_something(arg1, arg2);"
            )]
        );
    }

    #[test]
    fn if_block_is_one_compound_statement() {
        let body = "static int initialized = 0;
if (initialized) {
initialized = 1;
init();
}
return _start();";
        assert_eq!(
            scan(body),
            vec![
                LocalStatement::simple("static int initialized = 0;"),
                LocalStatement::compound(
                    "if (initialized) { initialized = 1; init(); }",
                    vec![Clause::new(
                        "if (initialized)",
                        strings(&["initialized = 1;", "init();"]),
                    )],
                ),
                LocalStatement::simple("return _start();"),
            ]
        );
    }

    #[test]
    fn if_else_chain_is_absorbed() {
        let body = "if (a > 0) {
    int x = 1;
} else if (a < 0) {
    int y = 2;
}
else {
    int z = 3;
}
done();";
        let statements = scan(body);
        assert_eq!(statements.len(), 2);
        assert_eq!(
            statements[0].clauses,
            Some(vec![
                Clause::new("if (a > 0)", strings(&["int x = 1;"])),
                Clause::new("else if (a < 0)", strings(&["int y = 2;"])),
                Clause::new("else", strings(&["int z = 3;"])),
            ])
        );
        assert_eq!(statements[1], LocalStatement::simple("done();"));
    }

    #[test]
    fn for_header_keeps_its_semicolons() {
        let statements = scan("for (int i = 0; i < n; i++) {\n    total += i;\n}");
        assert_eq!(
            statements,
            vec![LocalStatement::compound(
                "for (int i = 0; i < n; i++) { total += i; }",
                vec![Clause::new("for (int i = 0; i < n; i++)", strings(&["total += i;"]))],
            )]
        );
    }

    #[test]
    fn do_while_takes_trailing_condition() {
        let statements = scan("do {\n    n--;\n} while (n > 0);\nreturn n;");
        assert_eq!(
            statements,
            vec![
                LocalStatement::compound(
                    "do { n--; } while (n > 0);",
                    vec![
                        Clause::new("do", strings(&["n--;"])),
                        Clause::new("while (n > 0)", Vec::new()),
                    ],
                ),
                LocalStatement::simple("return n;"),
            ]
        );
    }

    #[test]
    fn braceless_bodies() {
        let statements = scan("if (!ptr) return -1;\nelse ptr->count++;\nwhile (x)\n    x = next(x);");
        assert_eq!(
            statements,
            vec![
                LocalStatement::compound(
                    "if (!ptr) return -1; else ptr->count++;",
                    vec![
                        Clause::new("if (!ptr)", strings(&["return -1;"])),
                        Clause::new("else", strings(&["ptr->count++;"])),
                    ],
                ),
                LocalStatement::compound(
                    "while (x) x = next(x);",
                    vec![Clause::new("while (x)", strings(&["x = next(x);"]))],
                ),
            ]
        );
    }

    #[test]
    fn braceless_nested_compound_is_kept_whole() {
        let statements = scan("if (a)\n    for (;;) {\n        int t;\n    }");
        assert_eq!(
            statements[0].clauses,
            Some(vec![Clause::new(
                "if (a)",
                strings(&["for (;;) {", "int t;", "}"]),
            )])
        );
    }

    #[test]
    fn bare_block_has_empty_header() {
        assert_eq!(
            scan("{\n    int scoped;\n}"),
            vec![LocalStatement::compound(
                "{ int scoped; }",
                vec![Clause::new("", strings(&["int scoped;"]))],
            )]
        );
    }

    #[test]
    fn switch_labels_are_skipped_inside_block() {
        let statements = scan("switch (op) {\ncase ADD:\n    r = a + b;\n    break;\ncase '-':\ndefault:\n    r = 0;\n}");
        let block = statements[0].clauses.as_ref().expect("compound")[0].block.clone();
        assert_eq!(
            scan(&block.join("\n")),
            vec![
                LocalStatement::simple("r = a + b;"),
                LocalStatement::simple("break;"),
                LocalStatement::simple("r = 0;"),
            ]
        );
    }

    #[test]
    fn goto_labels_are_skipped_but_ternaries_are_not() {
        assert_eq!(
            scan("error:\n    return -1;\nx = y ? a : b;"),
            vec![
                LocalStatement::simple("return -1;"),
                LocalStatement::simple("x = y ? a : b;"),
            ]
        );
    }

    #[test]
    fn brace_initializer_stays_in_simple_statement() {
        assert_eq!(
            scan("int pair[2] = {\n    1, 2\n};"),
            vec![LocalStatement::simple("int pair[2] = { 1, 2 };")]
        );
    }

    #[rstest]
    #[case::line_comment("// msg", None)]
    #[case::commented_statement("// int stmt;", None)]
    #[case::block_comment("/* int stmt; */", None)]
    #[case::trailing_line_comment("int stmt; // ...", Some("int stmt;"))]
    #[case::trailing_block_comment("int stmt; /* ...  */", Some("int stmt;"))]
    #[case::leading_block_comment("/* ...  */ int stmt;", Some("int stmt;"))]
    fn comments_are_ignored(#[case] body: &str, #[case] expected: Option<&str>) {
        let expected: Vec<_> = expected.into_iter().map(LocalStatement::simple).collect();
        assert_eq!(scan(body), expected);
    }

    #[test]
    fn unbalanced_block_stops_iteration() {
        assert_eq!(
            scan("int a;\nif (a) {\n    int b;\nint c;"),
            vec![LocalStatement::simple("int a;")]
        );
    }

    #[test]
    fn stray_closing_brace_stops_iteration() {
        assert_eq!(
            scan("int a;\n}\nint b;"),
            vec![LocalStatement::simple("int a;")]
        );
    }
}

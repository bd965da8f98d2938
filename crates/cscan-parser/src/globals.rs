//! Global declaration iterator.
//!
//! Walks the top level of a file and yields one [`Declaration`] per
//! file-scope statement or function definition. Classification of plain
//! statements (variable, typedef, prototype) is left to the sub-parsers.

use crate::cursor::{Cursor, block_lines, collapse_whitespace, without_attributes};
use crate::source::clean_lines;
use crate::types::Declaration;

/// Iterate over the global declarations in `lines`.
///
/// The iterator owns a cleaned copy of the text, so it can be created again
/// from the same lines to restart the scan.
#[must_use]
pub fn iter_global_declarations<S: AsRef<str>>(lines: &[S]) -> GlobalDeclarations {
    GlobalDeclarations::new(lines)
}

/// Lazy sequence of [`Declaration`] values, see [`iter_global_declarations`].
#[derive(Debug, Clone)]
pub struct GlobalDeclarations {
    text: String,
    pos: usize,
    /// Open `extern "C" {` blocks whose closing brace is still pending.
    linkage_depth: usize,
    done: bool,
}

/// Outcome of scanning one top-level construct.
enum Step {
    Emit(Declaration),
    /// Consumed input that yields nothing (empty statement, linkage brace).
    Skip,
    /// End of input or broken structure.
    Stop,
}

impl GlobalDeclarations {
    fn new<S: AsRef<str>>(lines: &[S]) -> Self {
        Self {
            text: clean_lines(lines).join("\n"),
            pos: 0,
            linkage_depth: 0,
            done: false,
        }
    }

    /// Scan one declaration starting at `self.pos`.
    fn scan(&mut self) -> Step {
        let mut cur = Cursor::at(&self.text, self.pos);
        cur.skip_whitespace();
        let start = cur.pos();
        let mut aggregate = false;

        loop {
            let Some(byte) = cur.peek() else {
                return Step::Stop;
            };
            match byte {
                b'"' | b'\'' => cur.skip_literal(),
                b'(' => {
                    if !cur.skip_balanced(b'(', b')') {
                        return Step::Stop;
                    }
                }
                b';' => {
                    cur.bump();
                    let statement = collapse_whitespace(cur.slice(start, cur.pos()));
                    self.pos = cur.pos();
                    if statement == ";" {
                        return Step::Skip;
                    }
                    return Step::Emit(Declaration::statement(statement));
                }
                b'{' => {
                    let head = cur.slice(start, cur.pos());
                    if !aggregate && is_linkage_block(head) {
                        cur.bump();
                        self.pos = cur.pos();
                        self.linkage_depth += 1;
                        return Step::Skip;
                    }
                    if !aggregate && starts_function(head) {
                        let open = cur.pos();
                        if !cur.skip_balanced(b'{', b'}') {
                            return Step::Stop;
                        }
                        let statement = collapse_whitespace(cur.slice(start, open + 1));
                        let body = block_lines(cur.slice(open + 1, cur.pos() - 1));
                        self.pos = cur.pos();
                        return Step::Emit(Declaration::function(statement, body));
                    }
                    // struct/enum/union definitions and brace initializers:
                    // the braces belong to a statement that ends at `;`.
                    aggregate = true;
                    if !cur.skip_balanced(b'{', b'}') {
                        return Step::Stop;
                    }
                }
                b'}' if cur.pos() == start && self.linkage_depth > 0 => {
                    cur.bump();
                    self.pos = cur.pos();
                    self.linkage_depth -= 1;
                    return Step::Skip;
                }
                b'}' => return Step::Stop,
                _ => cur.bump(),
            }
        }
    }
}

impl Iterator for GlobalDeclarations {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        while !self.done {
            match self.scan() {
                Step::Emit(declaration) => return Some(declaration),
                Step::Skip => {}
                Step::Stop => self.done = true,
            }
        }
        None
    }
}

impl std::iter::FusedIterator for GlobalDeclarations {}

/// A parameter list before the brace and no initializer: a function body.
/// Attribute arguments do not count as a parameter list.
fn starts_function(head: &str) -> bool {
    let head = without_attributes(head);
    head.contains('(') && !head.contains('=')
}

fn is_linkage_block(head: &str) -> bool {
    collapse_whitespace(head) == "extern \"C\""
}

//! Variable extraction driver.
//!
//! Turns one source file into an ordered sequence of [`VariableRecord`]s.
//! Global statements go straight to the variable parser. Function bodies
//! are scanned level by level through a FIFO worklist: every statement of a
//! level is visited before any block nested in it, and the worklist drains
//! completely before the next global declaration is looked at.

use std::collections::VecDeque;
use std::path::Path;

use crate::error::ParserError;
use crate::parsers::{CParsers, Parsers};
use crate::types::{Declaration, LocalStatement, VariableRecord};

/// Iterate over the variables declared in the C file at `path`.
///
/// # Errors
/// Returns [`ParserError::InvalidArgument`] for an empty path and
/// [`ParserError::Io`] when the file cannot be read.
pub fn iter_variables(path: impl AsRef<Path>) -> Result<Variables<CParsers>, ParserError> {
    iter_variables_with(path, CParsers)
}

/// [`iter_variables`] with caller-supplied parsers.
///
/// The file is read eagerly; everything after that is lazy.
///
/// # Errors
/// Returns [`ParserError::InvalidArgument`] for an empty path and whatever
/// [`Parsers::read_source`] returns.
pub fn iter_variables_with<P: Parsers>(
    path: impl AsRef<Path>,
    parsers: P,
) -> Result<Variables<P>, ParserError> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(ParserError::InvalidArgument(
            "source path must not be empty".to_string(),
        ));
    }
    tracing::debug!(path = %path.display(), "scanning variables");

    let lines = parsers.read_source(path)?;
    let globals = parsers.iter_global(&lines);
    Ok(Variables {
        parsers,
        globals,
        worklist: VecDeque::new(),
        function: String::new(),
        locals: None,
        ready: VecDeque::new(),
    })
}

/// Collect every variable declared in the C file at `path`.
///
/// # Errors
/// Same as [`iter_variables`].
pub fn scan_file(path: impl AsRef<Path>) -> Result<Vec<VariableRecord>, ParserError> {
    Ok(iter_variables(path)?.collect())
}

/// Lazy sequence of [`VariableRecord`]s, see [`iter_variables`].
pub struct Variables<P: Parsers> {
    parsers: P,
    globals: P::Globals,
    /// Blocks still to scan, labelled with their enclosing function.
    worklist: VecDeque<(String, Vec<String>)>,
    /// Function owning the block `locals` is scanning.
    function: String,
    locals: Option<P::Locals>,
    /// Records produced by one step but not yet handed out.
    ready: VecDeque<VariableRecord>,
}

impl<P: Parsers> Variables<P> {
    fn visit_global(&mut self, declaration: Declaration) {
        match declaration.body {
            None => {
                if let Some(variable) = self.parsers.parse_variable(&declaration.statement) {
                    self.ready.push_back(VariableRecord::global(variable));
                }
            }
            Some(body) => match self.parsers.parse_function(&declaration.statement, body) {
                Ok(function) => self.worklist.push_back((function.name, function.body)),
                Err(error) => tracing::warn!(
                    statement = %declaration.statement,
                    %error,
                    "skipping function body"
                ),
            },
        }
    }

    fn visit_local(&mut self, statement: LocalStatement) {
        let Some(clauses) = statement.clauses else {
            self.record_local(&statement.statement);
            return;
        };
        let compound = self.parsers.parse_compound(&statement.statement, &clauses);
        for fragment in compound.headers.iter().flatten() {
            self.record_local(fragment);
        }
        for block in compound.blocks {
            self.worklist.push_back((self.function.clone(), block));
        }
    }

    fn record_local(&mut self, statement: &str) {
        if let Some(variable) = self.parsers.parse_variable(statement) {
            self.ready
                .push_back(VariableRecord::local(&self.function, variable));
        }
    }
}

impl<P: Parsers> Iterator for Variables<P> {
    type Item = VariableRecord;

    fn next(&mut self) -> Option<VariableRecord> {
        loop {
            if let Some(record) = self.ready.pop_front() {
                return Some(record);
            }
            if let Some(locals) = self.locals.as_mut() {
                if let Some(statement) = locals.next() {
                    self.visit_local(statement);
                    continue;
                }
                self.locals = None;
            }
            if let Some((function, block)) = self.worklist.pop_front() {
                self.locals = Some(self.parsers.iter_local(&block));
                self.function = function;
                continue;
            }
            let declaration = self.globals.next()?;
            self.visit_global(declaration);
        }
    }
}

impl<P: Parsers> std::fmt::Debug for Variables<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Variables")
            .field("function", &self.function)
            .field("pending_blocks", &self.worklist.len())
            .field("ready", &self.ready)
            .finish_non_exhaustive()
    }
}

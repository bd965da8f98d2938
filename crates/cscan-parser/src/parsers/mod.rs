//! Sub-parsers and the capability interface the driver depends on.
//!
//! The variable extraction driver never calls the lexical scanners
//! directly. It goes through [`Parsers`], so tests can replace any step
//! with scripted results and observe the exact sequence of calls.

mod compound;
mod func;
mod var;

use std::path::Path;

pub use compound::parse_compound;
pub use func::parse_func;
pub use var::parse_var;

use crate::error::ParserError;
use crate::globals::{GlobalDeclarations, iter_global_declarations};
use crate::locals::{LocalStatements, iter_local_statements};
use crate::source::read_source_lines;
use crate::types::{Clause, Compound, Declaration, FunctionInfo, LocalStatement, Variable};

/// The scanning steps the variable extraction driver is built from.
pub trait Parsers {
    type Globals: Iterator<Item = Declaration>;
    type Locals: Iterator<Item = LocalStatement>;

    /// Read the lines of a source file.
    ///
    /// # Errors
    /// Returns [`ParserError::Io`] when the file cannot be read.
    fn read_source(&self, path: &Path) -> Result<Vec<String>, ParserError> {
        Ok(read_source_lines(path)?)
    }

    fn iter_global(&self, lines: &[String]) -> Self::Globals;

    fn iter_local(&self, lines: &[String]) -> Self::Locals;

    /// # Errors
    /// Returns an error when the statement is not a usable function
    /// definition.
    fn parse_function(&self, statement: &str, body: Vec<String>)
    -> Result<FunctionInfo, ParserError>;

    fn parse_variable(&self, statement: &str) -> Option<Variable>;

    fn parse_compound(&self, statement: &str, clauses: &[Clause]) -> Compound;
}

impl<P: Parsers + ?Sized> Parsers for &P {
    type Globals = P::Globals;
    type Locals = P::Locals;

    fn read_source(&self, path: &Path) -> Result<Vec<String>, ParserError> {
        (**self).read_source(path)
    }

    fn iter_global(&self, lines: &[String]) -> Self::Globals {
        (**self).iter_global(lines)
    }

    fn iter_local(&self, lines: &[String]) -> Self::Locals {
        (**self).iter_local(lines)
    }

    fn parse_function(
        &self,
        statement: &str,
        body: Vec<String>,
    ) -> Result<FunctionInfo, ParserError> {
        (**self).parse_function(statement, body)
    }

    fn parse_variable(&self, statement: &str) -> Option<Variable> {
        (**self).parse_variable(statement)
    }

    fn parse_compound(&self, statement: &str, clauses: &[Clause]) -> Compound {
        (**self).parse_compound(statement, clauses)
    }
}

/// The production lexical implementation of [`Parsers`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CParsers;

impl Parsers for CParsers {
    type Globals = GlobalDeclarations;
    type Locals = LocalStatements;

    fn iter_global(&self, lines: &[String]) -> GlobalDeclarations {
        iter_global_declarations(lines)
    }

    fn iter_local(&self, lines: &[String]) -> LocalStatements {
        iter_local_statements(lines)
    }

    fn parse_function(
        &self,
        statement: &str,
        body: Vec<String>,
    ) -> Result<FunctionInfo, ParserError> {
        parse_func(statement, body)
    }

    fn parse_variable(&self, statement: &str) -> Option<Variable> {
        parse_var(statement)
    }

    fn parse_compound(&self, statement: &str, clauses: &[Clause]) -> Compound {
        parse_compound(statement, clauses)
    }
}

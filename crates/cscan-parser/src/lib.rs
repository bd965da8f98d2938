//! # cscan-parser
//!
//! Lexical structure scanning of C source files and variable extraction.
//!
//! There is no grammar and no preprocessor. The scanners only track
//! comments, string and character literals, and bracket nesting:
//! - [`strip_comments`] / [`clean_lines`]: line-preserving comment removal
//! - [`iter_global_declarations`]: file-scope statements and function definitions
//! - [`iter_local_statements`]: simple and compound statements of one block level
//! - [`parse_func`], [`parse_var`], [`parse_compound`]: per-statement sub-parsers
//! - [`iter_variables`]: the driver combining all of the above
//!
//! Malformed input (unbalanced braces, unterminated comments) is never an
//! error; scanning stops early and keeps what was already produced.
//!
//! # Usage
//!
//! ```no_run
//! use cscan_parser::iter_variables;
//!
//! for record in iter_variables("Modules/_io/bufferedio.c").expect("read source") {
//!     println!("{record}");
//! }
//! ```

mod cursor;
pub mod error;
pub mod globals;
pub mod locals;
pub mod parsers;
pub mod source;
pub mod types;
pub mod variables;

pub use error::ParserError;
pub use globals::{GlobalDeclarations, iter_global_declarations};
pub use locals::{LocalStatements, iter_local_statements};
pub use parsers::{CParsers, Parsers, parse_compound, parse_func, parse_var};
pub use source::{clean_lines, read_source_lines, strip_comments};
pub use types::{
    Clause, Compound, Declaration, FunctionInfo, LocalStatement, Variable, VariableRecord,
};
pub use variables::{Variables, iter_variables, iter_variables_with, scan_file};

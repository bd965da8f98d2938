//! Core data types passed between the scanners, sub-parsers and driver.

mod statement;
mod symbol;

pub use statement::{Clause, Compound, Declaration, LocalStatement};
pub use symbol::{FunctionInfo, Variable, VariableRecord};

use serde::{Deserialize, Serialize};

/// A function definition split into name, signature and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub signature: String,
    pub body: Vec<String>,
}

/// A single declared variable with its declared type string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub vartype: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, vartype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vartype: vartype.into(),
        }
    }
}

/// A variable found in a file, attributed to its enclosing function.
///
/// `function` is `None` for file-scope variables. Variables in nested
/// blocks carry the name of the function that contains the block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableRecord {
    pub function: Option<String>,
    pub name: String,
    pub vartype: String,
}

impl VariableRecord {
    #[must_use]
    pub fn global(variable: Variable) -> Self {
        Self {
            function: None,
            name: variable.name,
            vartype: variable.vartype,
        }
    }

    #[must_use]
    pub fn local(function: &str, variable: Variable) -> Self {
        Self {
            function: Some(function.to_string()),
            name: variable.name,
            vartype: variable.vartype,
        }
    }

    #[must_use]
    pub const fn is_global(&self) -> bool {
        self.function.is_none()
    }
}

impl std::fmt::Display for VariableRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.function {
            Some(function) => write!(f, "{function}(): {} {}", self.vartype, self.name),
            None => write!(f, "{} {}", self.vartype, self.name),
        }
    }
}

/// A top-level statement or function definition.
///
/// `body` is `None` for a plain statement (variable, typedef, prototype...)
/// and holds the trimmed lines between the function's braces otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub statement: String,
    pub body: Option<Vec<String>>,
}

impl Declaration {
    pub fn statement(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            body: None,
        }
    }

    pub fn function(statement: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            statement: statement.into(),
            body: Some(body),
        }
    }
}

/// One header of a compound statement together with its block lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub header: String,
    pub block: Vec<String>,
}

impl Clause {
    pub fn new(header: impl Into<String>, block: Vec<String>) -> Self {
        Self {
            header: header.into(),
            block,
        }
    }
}

/// A statement found at one nesting level of a function or block body.
///
/// `clauses` is `None` for a simple statement. An `if`/`else if`/`else`
/// chain is a single statement with one clause per header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalStatement {
    pub statement: String,
    pub clauses: Option<Vec<Clause>>,
}

impl LocalStatement {
    pub fn simple(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            clauses: None,
        }
    }

    pub fn compound(statement: impl Into<String>, clauses: Vec<Clause>) -> Self {
        Self {
            statement: statement.into(),
            clauses: Some(clauses),
        }
    }
}

/// A compound statement split into header fragments and raw blocks.
///
/// `headers` holds one fragment list per clause; `blocks` holds the block
/// lines in clause order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub headers: Vec<Vec<String>>,
    pub blocks: Vec<Vec<String>>,
}

//! Compound statement decomposition.

use crate::types::{Clause, Compound};

/// Split a compound statement into per-clause header fragments and blocks.
///
/// Each header is broken into the keyword with its opening parenthesis,
/// the condition parts, and the closing parenthesis, e.g. `if (x)` becomes
/// `["if (", "x", ")"]` and a `for` header contributes one fragment per
/// non-empty `;`-separated part. Headers without a condition (`else`,
/// `do`) are a single fragment; a bare block has none.
///
/// The fragments are what the driver hands to the variable parser, which is
/// how `for (int i = 0; ...)` declarations are found.
#[must_use]
pub fn parse_compound(statement: &str, clauses: &[Clause]) -> Compound {
    tracing::trace!(statement, clauses = clauses.len(), "decomposing compound statement");
    Compound {
        headers: clauses.iter().map(|c| header_fragments(&c.header)).collect(),
        blocks: clauses.iter().map(|c| c.block.clone()).collect(),
    }
}

fn header_fragments(header: &str) -> Vec<String> {
    let header = header.trim();
    if header.is_empty() {
        return Vec::new();
    }
    let Some(open) = header.find('(') else {
        return vec![header.to_string()];
    };
    let keyword = header[..open].trim_end();
    let condition = header[open + 1..]
        .trim_end()
        .strip_suffix(')')
        .unwrap_or(&header[open + 1..]);

    let mut fragments = vec![format!("{keyword} (")];
    let parts: Vec<&str> = if keyword == "for" {
        split_top_level(condition, ';')
    } else {
        vec![condition]
    };
    fragments.extend(
        parts
            .into_iter()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string),
    );
    fragments.push(")".to_string());
    fragments
}

fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            _ if c == separator && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

//! Variable declaration parsing.
//!
//! Classifies a single statement as a variable declaration or not. Anything
//! that is not clearly `type name` (optionally with pointers, array
//! dimensions, an initializer, or a function-pointer declarator) is
//! rejected. Multi-variable declarations (`int a = 1, b;`) and inline
//! `struct {...}` declarations are rejected as well.

use crate::cursor::collapse_whitespace;
use crate::types::Variable;

/// Leading words that make a statement something other than a declaration.
const NON_DECLARATION_KEYWORDS: &[&str] = &[
    "return", "goto", "break", "continue", "if", "else", "while", "for", "do", "switch", "case",
    "default", "typedef", "sizeof",
];

/// Words that can appear in a type but never name a variable.
const TYPE_WORDS: &[&str] = &[
    "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned", "_Bool",
    "const", "volatile", "restrict", "static", "extern", "register", "auto", "inline", "struct",
    "union", "enum",
];

/// Parse `statement` as a variable declaration.
///
/// Returns `None` when the statement does not declare a variable.
#[must_use]
pub fn parse_var(statement: &str) -> Option<Variable> {
    let text = statement.trim().trim_end_matches(';').trim_end();
    let first_word = text.split(|c: char| !is_ident_char(c)).next()?;
    if first_word.is_empty() || NON_DECLARATION_KEYWORDS.contains(&first_word) {
        return None;
    }

    if has_top_level_comma(text) {
        return None;
    }
    let declarator = strip_initializer(text)?.trim_end();
    if declarator.contains('{') {
        return None;
    }
    if declarator.contains('(') {
        parse_function_pointer(declarator)
    } else {
        parse_plain(declarator)
    }
}

/// `type name[dims]`, where the type is words and `*`s.
fn parse_plain(declarator: &str) -> Option<Variable> {
    let (head, dims) = split_array_dims(declarator)?;
    if !head
        .chars()
        .all(|c| is_ident_char(c) || c == '*' || c.is_whitespace())
    {
        return None;
    }

    let name_start = head
        .char_indices()
        .rev()
        .find(|&(_, c)| !is_ident_char(c))
        .map_or(0, |(i, c)| i + c.len_utf8());
    let name = &head[name_start..];
    let vartype = head[..name_start].trim_end();

    if !is_identifier(name) || TYPE_WORDS.contains(&name) || !has_type_word(vartype) {
        return None;
    }
    Some(Variable::new(name, format!("{vartype}{dims}")))
}

/// `type (*name[dims])(params)`; the name is cut out of the type.
///
/// The group must open on its own (`int (*cb)`, not `free(*p)`) and be
/// followed by a parameter list, otherwise it is a call.
fn parse_function_pointer(declarator: &str) -> Option<Variable> {
    let open = declarator.find('(')?;
    let prefix = &declarator[..open];
    if !has_type_word(prefix) || prefix.ends_with(is_ident_char) {
        return None;
    }

    let after_open = &declarator[open + 1..];
    let stars = after_open.trim_start();
    if !stars.starts_with('*') {
        return None;
    }
    let after_stars = stars.trim_start_matches(|c: char| c == '*' || c.is_whitespace());
    let name_len = after_stars
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(after_stars.len());
    let name = &after_stars[..name_len];
    if !is_identifier(name) {
        return None;
    }

    let name_start = declarator.len() - after_stars.len();
    let name_end = name_start + name_len;
    let params = skip_array_dims(&declarator[name_end..])
        .strip_prefix(')')?
        .trim_start();
    if !params.starts_with('(') {
        return None;
    }
    let vartype = collapse_whitespace(&format!(
        "{}{}",
        &declarator[..name_start],
        &declarator[name_end..]
    ));
    Some(Variable::new(name, vartype))
}

/// The declarator part before a top-level `=`.
fn strip_initializer(text: &str) -> Option<&str> {
    let mut depth = 0i32;
    for (i, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            '=' if depth == 0 => {
                // `==` can't start an initializer; treat it as an expression.
                if text[i + 1..].starts_with('=') {
                    return None;
                }
                return Some(&text[..i]);
            }
            _ => {}
        }
    }
    Some(text)
}

/// A `,` outside brackets, braces and literals: more than one declarator.
fn has_top_level_comma(text: &str) -> bool {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth -= 1,
            ',' if depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// `text` past any leading `[...]` groups.
fn skip_array_dims(text: &str) -> &str {
    let mut rest = text.trim_start();
    while rest.starts_with('[') {
        let Some(close) = rest.find(']') else {
            return rest;
        };
        rest = rest[close + 1..].trim_start();
    }
    rest
}

/// Split trailing `[...]` groups off a declarator, whitespace removed.
fn split_array_dims(declarator: &str) -> Option<(&str, String)> {
    let mut head = declarator.trim_end();
    while head.ends_with(']') {
        let open = head.rfind('[')?;
        head = head[..open].trim_end();
    }
    let dims = declarator[head.len()..].split_whitespace().collect();
    Some((head, dims))
}

fn has_type_word(text: &str) -> bool {
    text.split(|c: char| !is_ident_char(c))
        .any(|word| is_identifier(word))
}

fn is_identifier(word: &str) -> bool {
    word.chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && word.chars().all(is_ident_char)
}

const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

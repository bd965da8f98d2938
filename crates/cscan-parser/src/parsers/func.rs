//! Function definition parsing.

use crate::cursor::{ATTRIBUTE_WRAPPERS, collapse_whitespace, is_ident_byte};
use crate::error::ParserError;
use crate::types::FunctionInfo;

/// Split a function definition into name, signature and body.
///
/// `statement` is the signature text as produced by the global iterator,
/// ending in `{`. The name is the identifier right before the parameter
/// list.
///
/// # Errors
/// Returns [`ParserError::NoFunctionName`] when no identifier precedes any
/// parameter list.
pub fn parse_func(statement: &str, body: Vec<String>) -> Result<FunctionInfo, ParserError> {
    let trimmed = statement.trim_end();
    let signature = collapse_whitespace(trimmed.strip_suffix('{').unwrap_or(trimmed));
    let name = function_name(&signature)
        .ok_or_else(|| ParserError::NoFunctionName(signature.clone()))?
        .to_string();
    Ok(FunctionInfo {
        name,
        signature,
        body,
    })
}

/// Find the identifier immediately preceding the parameter list.
///
/// Parentheses that open a declarator group (`int (*getter(void))(int)`)
/// and attribute arguments are looked through. Among the remaining
/// candidates the outermost, last one wins, so a macro wrapping the return
/// type (`Py_LOCAL_INLINE(int) fast(int x)`) is not mistaken for the name
/// and neither is a function-typed parameter.
fn function_name(signature: &str) -> Option<&str> {
    let bytes = signature.as_bytes();
    let mut best: Option<(usize, &str)> = None;
    let mut depth = 0usize;
    let mut pos = 0;

    while pos < bytes.len() {
        match bytes[pos] {
            b'(' => {
                let opens_declarator = signature[pos + 1..].trim_start().starts_with('*');
                let ident = ident_before(signature, pos);
                if !opens_declarator && ATTRIBUTE_WRAPPERS.contains(&ident) {
                    pos = skip_group(signature, pos)?;
                    continue;
                }
                if !opens_declarator && !ident.is_empty() && best.is_none_or(|(d, _)| depth <= d) {
                    best = Some((depth, ident));
                }
                depth += 1;
            }
            b')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        pos += 1;
    }
    best.map(|(_, ident)| ident)
}

/// The identifier ending right before `pos`, ignoring whitespace.
fn ident_before(text: &str, pos: usize) -> &str {
    let end = text[..pos].trim_end().len();
    let start = text.as_bytes()[..end]
        .iter()
        .rposition(|&b| !is_ident_byte(b))
        .map_or(0, |i| i + 1);
    let ident = &text[start..end];
    if ident.as_bytes().first().is_some_and(u8::is_ascii_digit) {
        ""
    } else {
        ident
    }
}

/// Position just past the group opened at `open`.
fn skip_group(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("void func1() {", "func1", "void func1()")]
    #[case("static int stop(char *reason) {", "stop", "static int stop(char *reason)")]
    #[case(
        "static PyObject * _func1(const char *arg1, PyObject *arg2) {",
        "_func1",
        "static PyObject * _func1(const char *arg1, PyObject *arg2)"
    )]
    #[case("int (*getter(int which))(void) {", "getter", "int (*getter(int which))(void)")]
    #[case(
        "static int __attribute__((unused)) helper(void) {",
        "helper",
        "static int __attribute__((unused)) helper(void)"
    )]
    #[case("Py_LOCAL_INLINE(int) fast(int x) {", "fast", "Py_LOCAL_INLINE(int) fast(int x)")]
    #[case("void each(void (*visit)(int), int visit_all(int)) {", "each", "void each(void (*visit)(int), int visit_all(int))")]
    fn name_and_signature(#[case] statement: &str, #[case] name: &str, #[case] signature: &str) {
        let info = parse_func(statement, vec!["return;".to_string()]).expect("parse function");
        assert_eq!(info.name, name);
        assert_eq!(info.signature, signature);
        assert_eq!(info.body, vec!["return;"]);
    }

    #[test]
    fn multi_line_statement_is_collapsed() {
        let info = parse_func("static PyObject *\n_func1(void)\n{", Vec::new()).expect("parse");
        assert_eq!(info.signature, "static PyObject * _func1(void)");
        assert_eq!(info.name, "_func1");
    }

    #[test]
    fn missing_name_is_an_error() {
        let err = parse_func("(void) {", Vec::new()).unwrap_err();
        assert!(matches!(err, ParserError::NoFunctionName(sig) if sig == "(void)"));
    }
}

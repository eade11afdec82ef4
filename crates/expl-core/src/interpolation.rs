use regex::Regex;

const EXPRESSION_PATTERN: &str = r"\{\{(.*?)\}\}";
const IDENTIFIER_PATTERN: &str = r"[A-Za-z_][A-Za-z0-9_]*";
const RESERVED_WORDS: &[&str] = &["and", "or", "not", "true", "false", "null", "if", "else"];

/// Returns the parameter names referenced by `{{ ... }}` expressions in
/// `input`, in first-occurrence order and without duplicates.
///
/// Quoted string literals, attribute accesses (`x.attr`), function names
/// (`f(...)`) and reserved words are not parameter references.
pub fn params_from_string(input: &str) -> Vec<String> {
    let expression_pattern = Regex::new(EXPRESSION_PATTERN).expect("valid regex");
    let identifier_pattern = Regex::new(IDENTIFIER_PATTERN).expect("valid regex");

    let mut out = Vec::<String>::new();
    for captures in expression_pattern.captures_iter(input) {
        let Some(expression) = captures.get(1) else {
            continue;
        };
        let expression = strip_string_literals(expression.as_str());
        for found in identifier_pattern.find_iter(expression.as_str()) {
            let name = found.as_str();
            let preceding = expression[..found.start()].chars().next_back();
            if matches!(preceding, Some('.') | Some('0'..='9')) {
                continue;
            }
            let following = expression[found.end()..].trim_start().chars().next();
            if following == Some('(') {
                continue;
            }
            if RESERVED_WORDS.contains(&name) {
                continue;
            }
            if !out.iter().any(|existing| existing == name) {
                out.push(name.to_string());
            }
        }
    }
    out
}

fn strip_string_literals(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len());
    let mut quote: Option<char> = None;
    for ch in expression.chars() {
        match quote {
            Some(open) if ch == open => {
                quote = None;
                out.push(' ');
            }
            Some(_) => out.push(' '),
            None if ch == '"' || ch == '\'' => {
                quote = Some(ch);
                out.push(' ');
            }
            None => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "interpolation_test.rs"]
mod tests;

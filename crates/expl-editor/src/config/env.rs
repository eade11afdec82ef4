use regex::Regex;

const PLACEHOLDER_PATTERN: &str = r"\$\{([^}]*)\}";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvPlaceholderError {
    #[error("empty env placeholder `${{}}`")]
    EmptyName,
    #[error("unterminated env placeholder at byte {0}")]
    Unterminated(usize),
    #[error("env var `{0}` is not set and the placeholder has no fallback")]
    Unset(String),
}

/// Substitutes `${NAME}` with `lookup(NAME)`. `${NAME:-fallback}` yields
/// `fallback` when the lookup comes back empty-handed.
pub(crate) fn expand_env_placeholders(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<String, EnvPlaceholderError> {
    let pattern = Regex::new(PLACEHOLDER_PATTERN).expect("valid regex");
    let mut expanded = String::with_capacity(input.len());
    let mut copied_up_to = 0;

    for placeholder in pattern.captures_iter(input) {
        let (Some(whole), Some(body)) = (placeholder.get(0), placeholder.get(1)) else {
            continue;
        };
        let (name, fallback) = match body.as_str().split_once(":-") {
            Some((name, fallback)) => (name, Some(fallback)),
            None => (body.as_str(), None),
        };
        if name.is_empty() {
            return Err(EnvPlaceholderError::EmptyName);
        }
        let value = lookup(name)
            .or_else(|| fallback.map(str::to_string))
            .ok_or_else(|| EnvPlaceholderError::Unset(name.to_string()))?;

        expanded.push_str(&input[copied_up_to..whole.start()]);
        expanded.push_str(&value);
        copied_up_to = whole.end();
    }

    let tail = &input[copied_up_to..];
    if let Some(offset) = tail.find("${") {
        return Err(EnvPlaceholderError::Unterminated(copied_up_to + offset));
    }
    expanded.push_str(tail);
    Ok(expanded)
}

pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

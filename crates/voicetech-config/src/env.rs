use std::sync::OnceLock;

use regex::{Captures, Regex};

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // `{{ env.NAME }}` or `{{ env.NAME | default("value") }}`
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([A-Za-z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw TOML text
///
/// A placeholder may carry a fallback, `{{ env.VAR | default("x") }}`, used
/// when the variable is unset. Comment lines are copied through untouched so
/// that commented-out settings never require their variables.
pub fn expand_env(input: &str) -> Result<String, String> {
    let lines = input
        .split('\n')
        .map(|line| {
            if line.trim_start().starts_with('#') {
                Ok(line.to_string())
            } else {
                expand_line(line)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(lines.join("\n"))
}

fn expand_line(line: &str) -> Result<String, String> {
    let mut failure = None;

    let expanded = placeholder().replace_all(line, |captures: &Captures<'_>| {
        match resolve(&captures[1], captures.get(2).map(|m| m.as_str())) {
            Ok(value) => value,
            Err(e) => {
                failure.get_or_insert(e);
                String::new()
            }
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(expanded.into_owned()),
    }
}

fn resolve(key: &str, default: Option<&str>) -> Result<String, String> {
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(format!("only variables scoped with 'env.' are supported: `{key}`"));
    };

    match (std::env::var(name), default) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(default)) => Ok(default.to_string()),
        (Err(_), None) => Err(format!("environment variable not found: `{name}`")),
    }
}

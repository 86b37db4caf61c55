// src/resource/subst.rs

//! `$NAME` / `${NAME}` expansion for descriptor values.

use std::sync::LazyLock;

use regex::{Captures, Regex};

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*)|(\$))")
        .expect("variable pattern is valid")
});

/// Expand variables using the process environment.
pub fn expand_env(value: &str) -> String {
    expand_with(value, |name| std::env::var(name).ok())
}

/// Expand variables using `lookup`.
///
/// Unset variables expand to the empty string and `$$` yields a literal `$`.
/// Anything else following `$` is left untouched.
pub fn expand_with<F>(value: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if !value.contains('$') {
        return value.to_string();
    }

    VAR_RE
        .replace_all(value, |caps: &Captures<'_>| {
            if caps.get(3).is_some() {
                return "$".to_string();
            }
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            lookup(name).unwrap_or_default()
        })
        .into_owned()
}

use std::fmt::Display;
use std::str::FromStr;

/// Reads one variable; tests pass a map-backed closure instead of the process env.
pub type Lookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Parses `key` when set, otherwise returns `default`.
/// A value that does not parse is a startup error, never a silent default.
pub fn parse_or<T>(lookup: Lookup<'_>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{} has an invalid value '{}': {}", key, raw, e)),
        None => Ok(default),
    }
}

pub fn required(lookup: Lookup<'_>, key: &str) -> anyhow::Result<String> {
    lookup(key).ok_or_else(|| anyhow::anyhow!("{} must be set", key))
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let values: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| values.get(key).cloned()
}

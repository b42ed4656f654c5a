use std::time::Duration;

use serde::Deserialize;

/// Longest preflight cache lifetime accepted in configuration
pub const MAX_CORS_MAX_AGE_SECS: u64 = 86_400;

/// CORS configuration
///
/// Browser front-ends call the synthesis API directly, so the shipped
/// configuration allows any origin.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins (wildcard "*" or explicit list)
    #[serde(default)]
    pub origins: AnyOrArray,
    /// Allowed HTTP methods (wildcard "*" or explicit list)
    #[serde(default)]
    pub methods: AnyOrArray,
    /// Allowed request headers (wildcard "*" or explicit list)
    #[serde(default)]
    pub headers: AnyOrArray,
    /// Allow credentials
    #[serde(default)]
    pub credentials: bool,
    /// Max age for preflight cache in seconds
    #[serde(default)]
    pub max_age: Option<u64>,
}

impl CorsConfig {
    /// Permissive configuration matching `origins = "*"`, `methods = "*"`, `headers = "*"`
    pub const fn permissive() -> Self {
        Self {
            origins: AnyOrArray::Any,
            methods: AnyOrArray::Any,
            headers: AnyOrArray::Any,
            credentials: false,
            max_age: None,
        }
    }

    /// Get max age as Duration
    pub fn max_age_duration(&self) -> Option<Duration> {
        self.max_age.map(Duration::from_secs)
    }
}

/// Either a wildcard "*" or explicit list of values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AnyOrArray {
    /// Match any value
    #[default]
    Any,
    /// Explicit list
    List(Vec<String>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAnyOrArray {
    One(String),
    Many(Vec<String>),
}

impl<'de> Deserialize<'de> for AnyOrArray {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = match RawAnyOrArray::deserialize(deserializer)? {
            RawAnyOrArray::One(value) => vec![value],
            RawAnyOrArray::Many(values) => values,
        };

        if values.iter().any(|value| value == "*") {
            Ok(Self::Any)
        } else {
            Ok(Self::List(values))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        cors: CorsConfig,
    }

    fn parse(toml: &str) -> CorsConfig {
        toml::from_str::<Wrapper>(toml).unwrap().cors
    }

    #[test]
    fn wildcard_string() {
        let config = parse("[cors]\norigins = \"*\"\n");
        assert_eq!(config.origins, AnyOrArray::Any);
        assert_eq!(config.methods, AnyOrArray::Any);
    }

    #[test]
    fn single_origin_string() {
        let config = parse("[cors]\norigins = \"https://a.example\"\n");
        assert_eq!(config.origins, AnyOrArray::List(vec!["https://a.example".to_string()]));
    }

    #[test]
    fn wildcard_inside_list_wins() {
        let config = parse("[cors]\norigins = [\"https://a.example\", \"*\"]\n");
        assert_eq!(config.origins, AnyOrArray::Any);
    }

    #[test]
    fn max_age_as_duration() {
        let config = parse("[cors]\nmax_age = 120\n");
        assert_eq!(config.max_age_duration(), Some(Duration::from_secs(120)));
        assert!(!config.credentials);
    }
}

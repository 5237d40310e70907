use anyhow::Result;
use regex::Regex;
use std::env;
use tracing::{debug, warn};

const PLACEHOLDER: &str = r"\$\{(\w+)\}";

/// Substitute `${VAR_NAME}` placeholders from the environment.
///
/// Unset variables keep their placeholder; the validator reports them.
pub fn substitute_env_vars(content: &str) -> Result<String> {
    substitute_with(content, |name| env::var(name).ok())
}

/// Substitute placeholders using `lookup` instead of the process environment
pub fn substitute_with<F>(content: &str, lookup: F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let re = Regex::new(PLACEHOLDER)?;
    let mut missing_vars = Vec::new();

    let result = re.replace_all(content, |caps: &regex::Captures<'_>| {
        let var_name = &caps[1];
        match lookup(var_name) {
            Some(value) => {
                debug!("Substituting environment variable: {}", var_name);
                value
            }
            None => {
                warn!("Environment variable '{}' not set", var_name);
                missing_vars.push(var_name.to_string());
                caps[0].to_string()
            }
        }
    });

    if !missing_vars.is_empty() {
        debug!(
            "Environment variables not set (may use defaults or fail validation): {:?}",
            missing_vars
        );
    }

    Ok(result.into_owned())
}

/// Check if a string still contains `${VAR}` placeholders
pub fn has_unresolved_env_vars(content: &str) -> bool {
    Regex::new(PLACEHOLDER)
        .map(|re| re.is_match(content))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_known_and_unknown() {
        let lookup = |name: &str| (name == "KEY").then(|| "secret".to_string());

        let out = substitute_with("api_key: ${KEY}\nother: ${NOPE}", lookup).unwrap();
        assert_eq!(out, "api_key: secret\nother: ${NOPE}");
        assert!(has_unresolved_env_vars(&out));
    }

    #[test]
    fn test_plain_dollar_is_untouched() {
        let out = substitute_with("price: $5", |_| Some("x".into())).unwrap();
        assert_eq!(out, "price: $5");
        assert!(!has_unresolved_env_vars(&out));
    }
}

use anyhow::{bail, Context, Result};
use dotenv::dotenv;

use crate::convert::{GrammarToAutomatonConverter, DEFAULT_SINK};
use crate::grammar::classifier::{EpsilonCheck, RightLinearClassifier};
use crate::symbol::EPSILON;

/// Environment variable selecting the epsilon placement check.
pub const EPSILON_CHECK_VAR: &str = "REGFA_EPSILON_CHECK";
/// Environment variable naming the preferred sink state.
pub const SINK_VAR: &str = "REGFA_SINK";

/// Runtime settings for classification and conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub epsilon_check: EpsilonCheck,
    pub sink_hint: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            epsilon_check: EpsilonCheck::default(),
            sink_hint: DEFAULT_SINK.to_string(),
        }
    }
}

impl Config {
    /// Loads settings from the process environment, after reading `.env` if present.
    ///
    /// A command-line value replaces the matching variable, which is then never parsed.
    pub fn from_env(
        epsilon_check: Option<EpsilonCheck>,
        sink_hint: Option<String>,
    ) -> Result<Self> {
        dotenv().ok(); // Load .env file if present
        Self::resolve(|key| std::env::var(key).ok(), epsilon_check, sink_hint)
    }

    /// Loads settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Self::resolve(lookup, None, None)
    }

    /// Combines command-line values with `lookup`, command line first, then validates.
    pub fn resolve(
        lookup: impl Fn(&str) -> Option<String>,
        epsilon_check: Option<EpsilonCheck>,
        sink_hint: Option<String>,
    ) -> Result<Self> {
        let epsilon_check = match epsilon_check {
            Some(check) => check,
            None => match lookup(EPSILON_CHECK_VAR) {
                Some(value) => value
                    .parse()
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Invalid value for {}", EPSILON_CHECK_VAR))?,
                None => EpsilonCheck::default(),
            },
        };
        let sink_hint = sink_hint
            .or_else(|| lookup(SINK_VAR))
            .unwrap_or_else(|| DEFAULT_SINK.to_string());

        let config = Config { epsilon_check, sink_hint };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sink_hint.is_empty() || self.sink_hint.chars().any(char::is_whitespace) {
            bail!(
                "Sink state name must be a non-empty token without whitespace: {:?}",
                self.sink_hint
            );
        }
        if self.sink_hint == EPSILON {
            bail!("Sink state name cannot be the epsilon marker '{}'", EPSILON);
        }
        Ok(())
    }

    pub fn classifier(&self) -> RightLinearClassifier {
        RightLinearClassifier::new(self.epsilon_check)
    }

    pub fn grammar_converter(&self) -> GrammarToAutomatonConverter {
        GrammarToAutomatonConverter::new(self.classifier(), self.sink_hint.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.sink_hint, "K");
        assert_eq!(config.epsilon_check, EpsilonCheck::Sequential);
    }

    #[test]
    fn test_reads_variables() {
        let vars = lookup(&[(EPSILON_CHECK_VAR, "strict"), (SINK_VAR, "F")]);
        let config = Config::from_lookup(vars).unwrap();
        assert_eq!(config.epsilon_check, EpsilonCheck::Strict);
        assert_eq!(config.sink_hint, "F");
        assert_eq!(config.classifier().epsilon_check(), EpsilonCheck::Strict);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(Config::from_lookup(lookup(&[(EPSILON_CHECK_VAR, "sometimes")])).is_err());
        assert!(Config::from_lookup(lookup(&[(SINK_VAR, "")])).is_err());
        assert!(Config::from_lookup(lookup(&[(SINK_VAR, "eps")])).is_err());
    }

    #[test]
    fn test_command_line_wins() {
        let vars = lookup(&[(EPSILON_CHECK_VAR, "sequential"), (SINK_VAR, "F")]);
        let config =
            Config::resolve(vars, Some(EpsilonCheck::Strict), Some("Q".to_string())).unwrap();
        assert_eq!(config.epsilon_check, EpsilonCheck::Strict);
        assert_eq!(config.sink_hint, "Q");

        let unchanged = Config::resolve(lookup(&[]), None, None).unwrap();
        assert_eq!(unchanged, Config::default());
    }

    #[test]
    fn test_bad_variable_ignored_when_flag_given() {
        let vars = lookup(&[(EPSILON_CHECK_VAR, "bogus"), (SINK_VAR, "")]);
        let config =
            Config::resolve(vars, Some(EpsilonCheck::Strict), Some("F".to_string())).unwrap();
        assert_eq!(config.epsilon_check, EpsilonCheck::Strict);
        assert_eq!(config.sink_hint, "F");
    }

    #[test]
    fn test_bad_flag_still_validated() {
        let result = Config::resolve(lookup(&[]), None, Some("eps".to_string()));
        assert!(result.is_err());
    }
}

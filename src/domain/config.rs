//! Run configuration.
//!
//! Defaults reproduce the canonical Canadian windows. Overrides come from the
//! environment (optionally via a `.env` file):
//!
//! - `TFP_SUBPERIODS`: comma list of `start-end` or `start-end@base`
//! - `TFP_MODE`: `two-term` or `reallocation`
//! - `TFP_PARALLEL`: `true` / `false`
//!
//! Identity tolerances are constants in `decompose`, not run settings.

use crate::domain::{DecompositionMode, Subperiod};
use crate::error::{DecompError, Result};

pub const ENV_SUBPERIODS: &str = "TFP_SUBPERIODS";
pub const ENV_MODE: &str = "TFP_MODE";
pub const ENV_PARALLEL: &str = "TFP_PARALLEL";

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub subperiods: Vec<Subperiod>,
    pub mode: DecompositionMode,
    /// Map per-year matrix builds and solves over a rayon pool.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            subperiods: vec![
                Subperiod::with_base_year(1961, 2019, 1962),
                Subperiod::with_base_year(1961, 1980, 1962),
                Subperiod::new(1980, 2000),
                Subperiod::new(2000, 2019),
            ],
            mode: DecompositionMode::Reallocation,
            parallel: true,
        }
    }
}

impl RunConfig {
    /// Load overrides from the process environment (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_SUBPERIODS) {
            config.subperiods = parse_subperiods(&raw)?;
        }
        if let Some(raw) = lookup(ENV_MODE) {
            config.mode = parse_mode(&raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL) {
            config.parallel = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => {
                    return Err(DecompError::Config(format!(
                        "{ENV_PARALLEL} must be true/false, got '{other}'."
                    )));
                }
            };
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.subperiods.is_empty() {
            return Err(DecompError::Config("At least one subperiod is required.".into()));
        }
        for p in &self.subperiods {
            if p.is_empty() {
                return Err(DecompError::Config(format!(
                    "Subperiod {} must end after it starts.",
                    p.label()
                )));
            }
            if p.base_year < p.start || p.base_year > p.end {
                return Err(DecompError::Config(format!(
                    "Base year {} lies outside subperiod {}.",
                    p.base_year,
                    p.label()
                )));
            }
        }
        Ok(())
    }
}

fn parse_mode(raw: &str) -> Result<DecompositionMode> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "two-term" | "twoterm" => Ok(DecompositionMode::TwoTerm),
        "reallocation" => Ok(DecompositionMode::Reallocation),
        other => Err(DecompError::Config(format!(
            "{ENV_MODE} must be 'two-term' or 'reallocation', got '{other}'."
        ))),
    }
}

fn parse_subperiods(raw: &str) -> Result<Vec<Subperiod>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_subperiod)
        .collect()
}

fn parse_subperiod(item: &str) -> Result<Subperiod> {
    let bad = || DecompError::Config(format!("Cannot parse subperiod '{item}' (want start-end[@base])."));

    let (range, base) = match item.split_once('@') {
        Some((range, base)) => (range, Some(base)),
        None => (item, None),
    };
    let (start, end) = range.split_once('-').ok_or_else(bad)?;
    let start: i32 = start.trim().parse().map_err(|_| bad())?;
    let end: i32 = end.trim().parse().map_err(|_| bad())?;
    let base_year = match base {
        Some(b) => b.trim().parse().map_err(|_| bad())?,
        None => start,
    };
    Ok(Subperiod::with_base_year(start, end, base_year))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = RunConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, RunConfig::default());
        assert_eq!(config.subperiods[0].base_year, 1962);
    }

    #[test]
    fn parses_subperiods_with_and_without_base() {
        let config = RunConfig::from_lookup(lookup_from(&[
            (ENV_SUBPERIODS, "1961-1980@1962, 1980-2000"),
            (ENV_MODE, "two-term"),
            (ENV_PARALLEL, "false"),
        ]))
        .unwrap();
        assert_eq!(
            config.subperiods,
            vec![
                Subperiod::with_base_year(1961, 1980, 1962),
                Subperiod::new(1980, 2000)
            ]
        );
        assert_eq!(config.mode, DecompositionMode::TwoTerm);
        assert!(!config.parallel);
    }

    #[test]
    fn rejects_malformed_values() {
        let err = RunConfig::from_lookup(lookup_from(&[(ENV_SUBPERIODS, "1961:1980")])).unwrap_err();
        assert!(matches!(err, DecompError::Config(_)));

        let err = RunConfig::from_lookup(lookup_from(&[(ENV_SUBPERIODS, "1980-1970")])).unwrap_err();
        assert!(matches!(err, DecompError::Config(_)));

        let err = RunConfig::from_lookup(lookup_from(&[(ENV_MODE, "three-term")])).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}

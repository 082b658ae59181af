use anyhow::Context;
use chrono::NaiveDate;

use crate::clock::{Clock, FixedClock, SystemClock, DATE_FORMAT};

pub const ENV_TODAY: &str = "ROSTERD_TODAY";
pub const ENV_LOG: &str = "ROSTERD_LOG";

#[derive(Debug, Clone)]
pub struct Config {
    /// Pins "today" instead of reading the system clock.
    pub today: Option<NaiveDate>,
    /// `tracing` filter directive.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let today = match lookup(ENV_TODAY) {
            Some(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
                    .with_context(|| format!("{ENV_TODAY} must be YYYY-MM-DD, got {raw:?}"))?,
            ),
            _ => None,
        };
        let log_filter = lookup(ENV_LOG)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "info".to_string());
        Ok(Self { today, log_filter })
    }

    pub fn today(&self) -> NaiveDate {
        self.clock().today()
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(d) => Box::new(FixedClock(d)),
            None => Box::new(SystemClock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| env.get(k).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let cfg = config(&[]).expect("config");
        assert!(cfg.today.is_none());
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn today_override_pins_clock() {
        let cfg = config(&[(ENV_TODAY, "2024-03-15"), (ENV_LOG, "rosterd=debug")]).expect("config");
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).expect("date");
        assert_eq!(cfg.clock().today(), expected);
        assert_eq!(cfg.log_filter, "rosterd=debug");
    }

    #[test]
    fn log_filter_is_trimmed_and_passed_through() {
        let cfg = config(&[(ENV_LOG, "  rosterd=debug, warn ")]).expect("config");
        assert_eq!(cfg.log_filter, "rosterd=debug, warn");
        let blank = config(&[(ENV_LOG, "   ")]).expect("config");
        assert_eq!(blank.log_filter, "info");
    }

    #[test]
    fn bad_today_is_an_error() {
        let e = config(&[(ENV_TODAY, "15/03/2024")]).expect_err("should fail");
        assert!(e.to_string().contains(ENV_TODAY));
    }
}

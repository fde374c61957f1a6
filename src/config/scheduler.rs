//! Scheduler configuration.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::core::{ClassMap, CreditLimit, RemainingAccounting, TrafficClass};

/// Environment variable naming a JSON configuration file.
pub const ENV_CONFIG_PATH: &str = "CREDIT_TXQ_CONFIG";
/// Environment variable overriding `buffer_unit_size`.
pub const ENV_BUFFER_UNIT: &str = "CREDIT_TXQ_BUFFER_UNIT";
/// Environment variable overriding `accounting` (`allocated` or `consumed`).
pub const ENV_ACCOUNTING: &str = "CREDIT_TXQ_ACCOUNTING";

/// Credit limits per access category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCredits {
    /// AC_VO.
    pub voice: CreditLimit,
    /// AC_VI.
    pub video: CreditLimit,
    /// AC_BE.
    pub best_effort: CreditLimit,
    /// AC_BK.
    pub background: CreditLimit,
}

impl ClassCredits {
    /// Limit configured for `class`.
    #[must_use]
    pub const fn get(&self, class: TrafficClass) -> CreditLimit {
        match class {
            TrafficClass::Voice => self.voice,
            TrafficClass::Video => self.video,
            TrafficClass::BestEffort => self.best_effort,
            TrafficClass::Background => self.background,
        }
    }

    /// Limits as a class map.
    #[must_use]
    pub fn to_map(&self) -> ClassMap<CreditLimit> {
        ClassMap::from_fn(|class| self.get(class))
    }
}

impl Default for ClassCredits {
    fn default() -> Self {
        Self {
            voice: CreditLimit::full(8),
            video: CreditLimit::full(8),
            best_effort: CreditLimit::full(35),
            background: CreditLimit::full(4),
        }
    }
}

/// Root scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Bytes covered by one credit (firmware buffer size).
    pub buffer_unit_size: u32,
    /// Per-class credit limits.
    #[serde(default)]
    pub credits: ClassCredits,
    /// How class turns charge the pass budget.
    #[serde(default)]
    pub accounting: RemainingAccounting,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            buffer_unit_size: 1024,
            credits: ClassCredits::default(),
            accounting: RemainingAccounting::default(),
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.buffer_unit_size == 0 {
            return Err("buffer_unit_size must be greater than 0".into());
        }
        for class in TrafficClass::PRIORITY_ORDER {
            let limit = self.credits.get(class);
            if limit.ceiling == 0 {
                return Err(format!("{} credit ceiling must be greater than 0", class.label()));
            }
            if limit.initial > limit.ceiling {
                return Err(format!(
                    "{} initial credit {} exceeds ceiling {}",
                    class.label(),
                    limit.initial,
                    limit.ceiling
                ));
            }
        }
        Ok(())
    }

    /// Buffer unit as a non-zero value; `None` only if validation would fail.
    #[must_use]
    pub const fn buffer_unit(&self) -> Option<NonZeroU32> {
        NonZeroU32::new(self.buffer_unit_size)
    }

    /// Parse scheduler configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the process environment.
    ///
    /// A `.env` file is read first if present. The base comes from the JSON
    /// file named by `CREDIT_TXQ_CONFIG`, or the defaults; individual fields
    /// are then overridden by `CREDIT_TXQ_BUFFER_UNIT` and
    /// `CREDIT_TXQ_ACCOUNTING`.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`SchedulerConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let mut cfg = match lookup(ENV_CONFIG_PATH) {
            Some(path) => {
                let raw = std::fs::read_to_string(&path)
                    .map_err(|e| format!("cannot read `{path}`: {e}"))?;
                serde_json::from_str(&raw).map_err(|e| format!("parse error in `{path}`: {e}"))?
            }
            None => Self::default(),
        };

        if let Some(raw) = lookup(ENV_BUFFER_UNIT) {
            cfg.buffer_unit_size = raw
                .trim()
                .parse()
                .map_err(|e| format!("{ENV_BUFFER_UNIT}: {e}"))?;
        }
        if let Some(raw) = lookup(ENV_ACCOUNTING) {
            cfg.accounting = match raw.trim() {
                "allocated" => RemainingAccounting::Allocated,
                "consumed" => RemainingAccounting::Consumed,
                other => return Err(format!("{ENV_ACCOUNTING}: unknown mode `{other}`")),
            };
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

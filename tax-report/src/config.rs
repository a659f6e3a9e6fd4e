//! Report configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! command-line or query-string overrides.
//!
//! ```toml
//! jurisdiction = "British Columbia"
//! incomes = [50000, 75000, 100000]
//! carryover = "shared"
//! format = "text"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tax_core::calculations::rates::{BRITISH_COLUMBIA, DEFAULT_INCOMES};
use tax_core::calculations::{BracketTable, ComparisonAssembler};
use tax_core::{ComparisonRecord, IncomeCarryover, TaxCalculationError};
use thiserror::Error;
use tracing::debug;

use crate::render::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("at least one income is required")]
    NoIncomes,

    #[error(transparent)]
    Calculation(#[from] TaxCalculationError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub jurisdiction: String,
    pub incomes: Vec<Decimal>,
    pub carryover: IncomeCarryover,
    pub format: OutputFormat,
    pub server: ServerConfig,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            jurisdiction: BRITISH_COLUMBIA.to_string(),
            incomes: DEFAULT_INCOMES.to_vec(),
            carryover: IncomeCarryover::default(),
            format: OutputFormat::default(),
            server: ServerConfig::default(),
        }
    }
}

/// Values that replace the corresponding config fields when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub jurisdiction: Option<String>,
    /// Replaces the configured list when non-empty.
    pub incomes: Vec<Decimal>,
    pub carryover: Option<IncomeCarryover>,
    pub format: Option<OutputFormat>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ReportConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads a TOML config file; missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&contents)
    }

    /// Defaults, or the file at `path` when one is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_overrides(
        mut self,
        overrides: ConfigOverrides,
    ) -> Self {
        if let Some(jurisdiction) = overrides.jurisdiction {
            self.jurisdiction = jurisdiction;
        }
        if !overrides.incomes.is_empty() {
            self.incomes = overrides.incomes;
        }
        if let Some(carryover) = overrides.carryover {
            self.carryover = carryover;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        self
    }

    /// Checks the config can produce a report: a supported jurisdiction and
    /// at least one positive income.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.incomes.is_empty() {
            return Err(ConfigError::NoIncomes);
        }
        if let Some(&bad) = self.incomes.iter().find(|income| **income <= Decimal::ZERO) {
            return Err(TaxCalculationError::InvalidIncome(bad).into());
        }
        BracketTable::standard()?.jurisdiction(&self.jurisdiction)?;
        Ok(())
    }

    /// Runs the comparison described by this config.
    pub fn comparisons(&self) -> Result<Vec<ComparisonRecord>, ConfigError> {
        self.validate()?;
        let assembler = ComparisonAssembler::new(BracketTable::standard()?, &self.jurisdiction)?
            .with_carryover(self.carryover);
        Ok(assembler.assemble(&self.incomes)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn defaults_match_built_in_rates() {
        let config = ReportConfig::default();

        assert_eq!(config.jurisdiction, "British Columbia");
        assert_eq!(config.incomes, vec![dec!(50000), dec!(75000)]);
        assert_eq!(config.carryover, IncomeCarryover::Shared);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        assert_eq!(ReportConfig::from_toml_str("").unwrap(), ReportConfig::default());
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = ReportConfig::from_toml_str(
            r#"
            incomes = [100000, 125000.50]
            carryover = "independent"
            format = "html"

            [server]
            port = 9090
            "#,
        )
        .unwrap();

        assert_eq!(config.jurisdiction, "British Columbia");
        assert_eq!(config.incomes, vec![dec!(100000), dec!(125000.50)]);
        assert_eq!(config.carryover, IncomeCarryover::Independent);
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let result = ReportConfig::from_toml_str("province = \"Ontario\"");

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let result = ReportConfig::load(Path::new("/definitely/not/here.toml"));

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let config = ReportConfig::default().with_overrides(ConfigOverrides {
            incomes: vec![dec!(60000)],
            port: Some(3000),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.incomes, vec![dec!(60000)]);
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.jurisdiction, "British Columbia");
        assert_eq!(config.carryover, IncomeCarryover::Shared);
    }

    #[test]
    fn validate_rejects_unsupported_jurisdiction() {
        let config = ReportConfig {
            jurisdiction: "Ontario".to_string(),
            ..ReportConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Calculation(TaxCalculationError::UnsupportedJurisdiction(_)))
        ));
    }

    #[test]
    fn validate_rejects_empty_and_non_positive_incomes() {
        let empty = ReportConfig {
            incomes: vec![],
            ..ReportConfig::default()
        };
        let negative = ReportConfig {
            incomes: vec![dec!(50000), dec!(-1)],
            ..ReportConfig::default()
        };

        assert!(matches!(empty.validate(), Err(ConfigError::NoIncomes)));
        assert!(matches!(
            negative.validate(),
            Err(ConfigError::Calculation(TaxCalculationError::InvalidIncome(_)))
        ));
    }

    #[test]
    fn comparisons_follow_configured_carryover() {
        let shared = ReportConfig {
            incomes: vec![dec!(75000)],
            ..ReportConfig::default()
        };
        let independent = ReportConfig {
            carryover: IncomeCarryover::Independent,
            ..shared.clone()
        };

        let shared = shared.comparisons().unwrap();
        let independent = independent.comparisons().unwrap();

        assert_eq!(shared[0].wages.provincial_tax, dec!(841.5286));
        assert!(independent[0].wages.provincial_tax > shared[0].wages.provincial_tax);
    }
}

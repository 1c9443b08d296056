//! Market configuration: trading calendar and per-product session schedules.
//!
//! Stored as TOML:
//!
//! ```toml
//! [calendar]
//! holidays = ["2024-10-01", "2024-10-02"]
//!
//! [products.rb]
//! sessions = [[32400, 36900], [37800, 41400], [48600, 54000], [75600, 82800]]
//!
//! [products.IF]
//! sessions = [[34200, 41400], [46800, 54000]]
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::calendar::HolidayCalendar;
use crate::domain::{product_id_from_symbol, ProductCategory, Session, SessionSchedule};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("product '{product}': {reason}")]
    InvalidSession { product: String, reason: String },

    #[error("unknown product '{0}'")]
    UnknownProduct(String),
}

/// Sessions and optional category override for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// `[open, close]` second offsets from local midnight.
    pub sessions: Vec<[u32; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
}

impl ProductConfig {
    pub fn schedule(&self) -> SessionSchedule {
        SessionSchedule::new(self.sessions.iter().map(|&[open, close]| Session::new(open, close)).collect())
    }
}

/// A product resolved from config: what the exchange engine needs per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedProduct {
    pub product_id: String,
    pub category: ProductCategory,
    pub schedule: SessionSchedule,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub calendar: HolidayCalendar,
    #[serde(default)]
    pub products: BTreeMap<String, ProductConfig>,
}

impl MarketConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (product, cfg) in &self.products {
            let schedule = cfg.schedule();
            if schedule.is_empty() {
                return Err(ConfigError::InvalidSession {
                    product: product.clone(),
                    reason: "no sessions".into(),
                });
            }
            if let Some(session) = schedule.sessions().iter().find(|s| s.open == s.close) {
                return Err(ConfigError::InvalidSession {
                    product: product.clone(),
                    reason: format!("session opening at {} has zero length", session.open),
                });
            }
        }
        Ok(())
    }

    /// The configured trading calendar.
    pub fn calendar(&self) -> HolidayCalendar {
        self.calendar.clone()
    }

    /// Look up a product by id or full contract symbol (`IF2406` finds `IF`).
    ///
    /// Category comes from the config override, else the static
    /// classification table.
    pub fn product(&self, id_or_symbol: &str) -> Result<ResolvedProduct, ConfigError> {
        let (product_id, cfg) = self
            .products
            .get_key_value(id_or_symbol)
            .or_else(|| self.products.get_key_value(product_id_from_symbol(id_or_symbol)))
            .ok_or_else(|| ConfigError::UnknownProduct(id_or_symbol.to_string()))?;
        Ok(ResolvedProduct {
            product_id: product_id.clone(),
            category: cfg.category.unwrap_or_else(|| ProductCategory::classify(product_id)),
            schedule: cfg.schedule(),
        })
    }
}

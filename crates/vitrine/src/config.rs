#![forbid(unsafe_code)]

//! Configuration loading.
//!
//! Every field has a default, so an empty file is a valid configuration.
//!
//! ```toml
//! [slider]
//! keyboard_step = 5.0
//! before_label = "Packaging"
//! after_label = "Inside"
//!
//! [slider.snap]
//! to_start_below = 10.0
//! center_low = 40.0
//! center_high = 60.0
//! to_end_above = 90.0
//!
//! [catalog]
//! recently_viewed_capacity = 12
//! recently_viewed_display = 4
//! recommendation_limit = 4
//!
//! [motion]
//! reduced = true
//! ```
//!
//! Files ending in `.json` are read as JSON, anything else as TOML.
//! [`VitrineConfig::from_env`] loads the file named by `VITRINE_CONFIG`.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vitrine_catalog::recently_viewed::{DEFAULT_CAPACITY, DEFAULT_DISPLAY_COUNT};
use vitrine_catalog::{DEFAULT_RECOMMENDATION_LIMIT, KeyValueStore, Product, RecentlyViewed};
use vitrine_runtime::MotionPreference;
use vitrine_widgets::SliderConfig;

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "VITRINE_CONFIG";

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read.
    Io { path: PathBuf, source: io::Error },
    /// TOML syntax or shape error.
    Toml(toml::de::Error),
    /// JSON syntax or shape error.
    Json(serde_json::Error),
    /// A value parsed but is out of range.
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config '{}': {source}", path.display())
            }
            Self::Toml(err) => write!(f, "invalid TOML config: {err}"),
            Self::Json(err) => write!(f, "invalid JSON config: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid config value '{field}': {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Toml(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

/// `[catalog]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogSection {
    pub recently_viewed_capacity: usize,
    pub recently_viewed_display: usize,
    pub recommendation_limit: usize,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            recently_viewed_capacity: DEFAULT_CAPACITY,
            recently_viewed_display: DEFAULT_DISPLAY_COUNT,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
        }
    }
}

/// `[motion]` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionSection {
    /// Force reduced motion on or off. Unset defers to the system.
    pub reduced: Option<bool>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VitrineConfig {
    pub slider: SliderConfig,
    pub catalog: CatalogSection,
    pub motion: MotionSection,
}

impl VitrineConfig {
    /// Parse and validate TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate JSON.
    pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(source).map_err(ConfigError::Json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a file, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_str(&source)?
        } else {
            Self::from_toml_str(&source)?
        };
        tracing::info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load the file named by `VITRINE_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Self::load(PathBuf::from(path)),
            _ => Ok(Self::default()),
        }
    }

    /// Check ranges that the type system does not.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let step = self.slider.keyboard_step;
        if !step.is_finite() || step <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "slider.keyboard_step",
                reason: format!("must be a positive number, got {step}"),
            });
        }
        if !self.slider.snap.is_valid() {
            return Err(ConfigError::Invalid {
                field: "slider.snap",
                reason: "thresholds must be ordered within [0, 100]".to_owned(),
            });
        }
        if self.catalog.recently_viewed_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "catalog.recently_viewed_capacity",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Motion preference honoring the `[motion]` override.
    #[must_use]
    pub fn motion_preference(&self) -> MotionPreference {
        match self.motion.reduced {
            Some(reduced) => MotionPreference::new(reduced),
            None => MotionPreference::system(),
        }
    }

    /// Cards per recommendation strip.
    #[must_use]
    pub fn recommendation_limit(&self) -> usize {
        self.catalog.recommendation_limit
    }

    /// "You may also like" for `current`, capped at the configured limit.
    #[must_use]
    pub fn similar_products<'a>(&self, current: &Product, all: &'a [Product]) -> Vec<&'a Product> {
        vitrine_catalog::similar_products(current, all, self.recommendation_limit())
    }

    /// "People also viewed" for `current`, capped at the configured limit.
    #[must_use]
    pub fn people_also_viewed<'a>(&self, current: &Product, all: &'a [Product]) -> Vec<&'a Product> {
        vitrine_catalog::people_also_viewed(current, all, self.recommendation_limit())
    }

    /// Recently-viewed history over `store` with the configured limits.
    pub fn recently_viewed<S: KeyValueStore>(&self, store: S) -> RecentlyViewed<S> {
        RecentlyViewed::new(store).with_limits(
            self.catalog.recently_viewed_capacity,
            self.catalog.recently_viewed_display,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vitrine_widgets::SnapBands;

    #[test]
    fn empty_source_is_default() {
        assert_eq!(VitrineConfig::from_toml_str("").unwrap(), VitrineConfig::default());
        assert_eq!(VitrineConfig::from_json_str("{}").unwrap(), VitrineConfig::default());
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = VitrineConfig::from_toml_str(
            r#"
            [slider]
            before_label = "Packaging"

            [slider.snap]
            to_end_above = 90.0

            [motion]
            reduced = true
            "#,
        )
        .unwrap();
        assert_eq!(config.slider.before_label, "Packaging");
        assert_eq!(config.slider.after_label, "After");
        assert_eq!(config.slider.keyboard_step, 10.0);
        assert_eq!(
            config.slider.snap,
            SnapBands {
                to_end_above: 90.0,
                ..SnapBands::DEFAULT
            }
        );
        assert_eq!(config.catalog, CatalogSection::default());
        assert!(config.motion_preference().is_reduced());
    }

    #[test]
    fn json_config() {
        let config = VitrineConfig::from_json_str(
            r#"{ "catalog": { "recently_viewed_capacity": 6, "recommendation_limit": 8 } }"#,
        )
        .unwrap();
        assert_eq!(config.catalog.recently_viewed_capacity, 6);
        assert_eq!(config.catalog.recently_viewed_display, 4);
        assert_eq!(config.catalog.recommendation_limit, 8);
    }

    #[test]
    fn recommendation_limit_caps_both_strips() {
        let all: Vec<Product> = (0..6)
            .map(|i| Product::new(format!("p{i}"), format!("p{i}"), "Truffle", "Chocolates", 500.0))
            .collect();
        let current = &all[0];

        let default = VitrineConfig::default();
        assert_eq!(default.recommendation_limit(), DEFAULT_RECOMMENDATION_LIMIT);
        assert_eq!(default.similar_products(current, &all).len(), 4);
        assert_eq!(default.people_also_viewed(current, &all).len(), 4);

        let narrow = VitrineConfig::from_toml_str("[catalog]\nrecommendation_limit = 2\n").unwrap();
        assert_eq!(narrow.similar_products(current, &all).len(), 2);
        assert_eq!(narrow.people_also_viewed(current, &all).len(), 2);

        let wide = VitrineConfig::from_toml_str("[catalog]\nrecommendation_limit = 10\n").unwrap();
        assert_eq!(wide.similar_products(current, &all).len(), 5);
    }

    #[test]
    fn rejects_bad_step() {
        let err = VitrineConfig::from_toml_str("[slider]\nkeyboard_step = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "slider.keyboard_step", .. }));
    }

    #[test]
    fn rejects_unordered_snap() {
        let err = VitrineConfig::from_toml_str("[slider.snap]\ncenter_low = 70.0\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid config value 'slider.snap': thresholds must be ordered within [0, 100]"
        );
    }

    #[test]
    fn rejects_zero_capacity() {
        let err =
            VitrineConfig::from_toml_str("[catalog]\nrecently_viewed_capacity = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_unknown_tables() {
        let err = VitrineConfig::from_toml_str("[checkout]\nenabled = true\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = VitrineConfig::load("/nonexistent/vitrine.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}

//! TOML-based dial configuration.
//!
//! Stores rendering preferences:
//! - Dial size, radius and label placement
//! - Slice, background and now-hand colors
//! - Overnight event policy
//! - Clock refresh cadence
//!
//! Configuration is stored at `~/.config/daypie/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::slice::{OvernightPolicy, SliceBuilder, EMPTY_SLICE_COLOR};

/// Returns `~/.config/daypie[-dev]/` based on DAYPIE_ENV.
///
/// Set DAYPIE_ENV=dev to use development data directory.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYPIE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("daypie-dev")
    } else {
        base_dir.join("daypie")
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}

/// Dial geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialSection {
    /// Width and height of the rendered canvas in pixels.
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Slice labels sit at `label_ratio * radius`.
    #[serde(default = "default_label_ratio")]
    pub label_ratio: f64,
    #[serde(default = "default_hour_label_ratio")]
    pub hour_label_ratio: f64,
    /// Slices narrower than this (degrees) get no label.
    #[serde(default = "default_min_label_span")]
    pub min_label_span: f64,
    #[serde(default = "default_true")]
    pub show_hour_labels: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsSection {
    #[serde(default = "default_empty_slice")]
    pub empty_slice: String,
    #[serde(default = "default_background")]
    pub background: String,
    #[serde(default = "default_now_hand")]
    pub now_hand: String,
    #[serde(default = "default_background")]
    pub slice_stroke: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlicesSection {
    #[serde(default)]
    pub overnight: OvernightPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockSection {
    /// How often a live dial re-samples the wall clock.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/daypie/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialConfig {
    #[serde(default)]
    pub dial: DialSection,
    #[serde(default)]
    pub colors: ColorsSection,
    #[serde(default)]
    pub slices: SlicesSection,
    #[serde(default)]
    pub clock: ClockSection,
}

// Default functions
fn default_size() -> u32 {
    400
}
fn default_radius() -> f64 {
    160.0
}
fn default_label_ratio() -> f64 {
    0.65
}
fn default_hour_label_ratio() -> f64 {
    1.12
}
fn default_min_label_span() -> f64 {
    10.0
}
fn default_true() -> bool {
    true
}
fn default_empty_slice() -> String {
    EMPTY_SLICE_COLOR.into()
}
fn default_background() -> String {
    "#FFFFFF".into()
}
fn default_now_hand() -> String {
    "#EF4444".into()
}
fn default_refresh_secs() -> u64 {
    60
}

impl Default for DialSection {
    fn default() -> Self {
        Self {
            size: default_size(),
            radius: default_radius(),
            label_ratio: default_label_ratio(),
            hour_label_ratio: default_hour_label_ratio(),
            min_label_span: default_min_label_span(),
            show_hour_labels: true,
        }
    }
}

impl Default for ColorsSection {
    fn default() -> Self {
        Self {
            empty_slice: default_empty_slice(),
            background: default_background(),
            now_hand: default_now_hand(),
            slice_stroke: default_background(),
        }
    }
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

impl DialConfig {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<u64>() {
                            serde_json::Value::Number(n.into())
                        } else if let Ok(n) = value.parse::<f64>() {
                            serde_json::Number::from_f64(n)
                                .map(serde_json::Value::Number)
                                .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as number")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if no file exists.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if no file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the default config cannot be written. An existing file is never
    /// overwritten.
    pub fn load_from(path: &Path) -> Result<Self> {
        let load_failed = |message: String| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message,
        };
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content).map_err(|e| load_failed(e.to_string()))?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(load_failed(e.to_string()).into()),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default dial config");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a value by dot-separated key without persisting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field's type.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Set a value by dot-separated key and save.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Slice builder configured with this config's empty color and overnight policy.
    pub fn slice_builder(&self) -> SliceBuilder {
        SliceBuilder::new()
            .with_empty_color(self.colors.empty_slice.as_str())
            .with_overnight_policy(self.slices.overnight)
    }
}

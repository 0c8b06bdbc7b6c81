//! Shell layout configuration, deserialized from JSON with per-field defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::window_manager::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};

pub const DEFAULT_Z_FLOOR: u64 = 100;

#[derive(Debug, Error)]
/// Errors raised while loading a [`ShellConfig`].
pub enum ConfigError {
    /// The document is not valid JSON for the config shape.
    #[error("shell config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid shell config field `{field}`: {reason}")]
    Invalid {
        /// Offending field name.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Tunables for window placement, stacking, and sidebar policy.
pub struct ShellConfig {
    /// Viewport widths below this value use the narrow (mobile) layout.
    pub narrow_breakpoint_px: i32,
    /// Stacking value the z-order allocator counts up from.
    pub z_floor: u64,
    /// Added to the active window's z-index so focus always wins stacking.
    pub active_z_offset: u64,
    /// Number of cascade positions before new windows wrap back to the origin.
    pub cascade_slots: u64,
    /// Pixel step between cascade positions.
    pub cascade_step_px: i32,
    pub cascade_origin_x: i32,
    pub cascade_origin_y: i32,
    pub default_window_width: i32,
    pub default_window_height: i32,
    /// Height reserved below maximized windows for the taskbar.
    pub taskbar_height_px: i32,
    /// Window id whose focus never hides the sidebar.
    pub sidebar_exempt_window: String,
    /// Icon used when no catalog knows the launched id.
    pub generic_icon: String,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            narrow_breakpoint_px: 768,
            z_floor: DEFAULT_Z_FLOOR,
            active_z_offset: 5000,
            cascade_slots: 15,
            cascade_step_px: 20,
            cascade_origin_x: 100,
            cascade_origin_y: 60,
            default_window_width: 800,
            default_window_height: 550,
            taskbar_height_px: 56,
            sidebar_exempt_window: "dashboard".to_string(),
            generic_icon: "cube".to_string(),
        }
    }
}

impl ShellConfig {
    /// Parses and validates a JSON config document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and [`ConfigError::Invalid`] when a value
    /// fails [`Self::validate`].
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config = serde_json::from_str::<Self>(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses `raw`, logging and falling back to defaults when it is unusable.
    pub fn from_json_or_default(raw: &str) -> Self {
        match Self::from_json_str(raw) {
            Ok(config) => config,
            Err(err) => {
                leptos::logging::warn!("shell config rejected, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Returns `self` when it validates, otherwise logs the problem and returns the defaults.
    pub fn validated_or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                leptos::logging::warn!("shell config rejected, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Checks cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first field that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cascade_slots == 0 {
            return Err(ConfigError::Invalid {
                field: "cascade_slots",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.active_z_offset == 0 {
            return Err(ConfigError::Invalid {
                field: "active_z_offset",
                reason: "must be positive".to_string(),
            });
        }
        if self.default_window_width < MIN_WINDOW_WIDTH {
            return Err(ConfigError::Invalid {
                field: "default_window_width",
                reason: format!("must be at least {MIN_WINDOW_WIDTH}"),
            });
        }
        if self.default_window_height < MIN_WINDOW_HEIGHT {
            return Err(ConfigError::Invalid {
                field: "default_window_height",
                reason: format!("must be at least {MIN_WINDOW_HEIGHT}"),
            });
        }
        Ok(())
    }

    pub fn is_narrow(&self, viewport_width: i32) -> bool {
        viewport_width < self.narrow_breakpoint_px
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config = ShellConfig::from_json_str(r#"{ "z_floor": 500 }"#).expect("config");
        assert_eq!(config.z_floor, 500);
        assert_eq!(config.narrow_breakpoint_px, 768);
        assert_eq!(config.sidebar_exempt_window, "dashboard");
    }

    #[test]
    fn zero_cascade_slots_is_rejected() {
        let err = ShellConfig::from_json_str(r#"{ "cascade_slots": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "cascade_slots",
                ..
            }
        ));
    }

    #[test]
    fn undersized_default_window_is_rejected() {
        let err = ShellConfig::from_json_str(r#"{ "default_window_width": 200 }"#).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid shell config field `default_window_width`: must be at least 320"
        );
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        assert_eq!(ShellConfig::from_json_or_default("{"), ShellConfig::default());
    }

    #[test]
    fn invalid_struct_config_falls_back_to_defaults() {
        let zero_offset = ShellConfig {
            active_z_offset: 0,
            ..ShellConfig::default()
        };
        assert_eq!(zero_offset.validated_or_default(), ShellConfig::default());

        let tuned = ShellConfig {
            z_floor: 900,
            ..ShellConfig::default()
        };
        assert_eq!(tuned.clone().validated_or_default(), tuned);
    }

    #[test]
    fn narrow_layout_is_strictly_below_breakpoint() {
        let config = ShellConfig::default();
        assert!(config.is_narrow(767));
        assert!(!config.is_narrow(768));
    }
}

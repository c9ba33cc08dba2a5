// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapper configuration.
//!
//! A `MapperConfig` is held by every [`Mapper`](crate::Mapper) behind an
//! `ArcSwap` and loaded once per mapping call, so replacing it never tears
//! an in-flight mapping.
//!
//! # Environment
//!
//! [`MapperConfig::from_env`] reads:
//!
//! - `DTOMAP_MAP_UNEXPORTED_FIELDS` (`1`, `true`, `yes`, `on`)
//! - `DTOMAP_MAX_DEPTH` (recursion limit, default 64)

/// Default recursion limit for nested values.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Process-wide mapping options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MapperConfig {
    /// Read and write private struct fields directly instead of going
    /// through declared getters.
    pub map_unexported_fields: bool,

    /// Nesting depth after which transfer stops descending.
    pub max_depth: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            map_unexported_fields: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl MapperConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable private field access.
    pub fn map_unexported_fields(mut self, enabled: bool) -> Self {
        self.map_unexported_fields = enabled;
        self
    }

    /// Set the recursion limit.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Build a config from `DTOMAP_*` environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            map_unexported_fields: std::env::var("DTOMAP_MAP_UNEXPORTED_FIELDS")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.map_unexported_fields),
            max_depth: std::env::var("DTOMAP_MAX_DEPTH")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.max_depth),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = MapperConfig::default();
        assert!(!cfg.map_unexported_fields);
        assert_eq!(cfg.max_depth, 64);
    }

    #[test]
    fn test_builder_setters() {
        let cfg = MapperConfig::new().map_unexported_fields(true).max_depth(8);
        assert!(cfg.map_unexported_fields);
        assert_eq!(cfg.max_depth, 8);
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_partial_config() {
        let cfg: MapperConfig =
            serde_json::from_str(r#"{"map_unexported_fields": true}"#).expect("parse");
        assert!(cfg.map_unexported_fields);
        assert_eq!(cfg.max_depth, DEFAULT_MAX_DEPTH);
    }
}

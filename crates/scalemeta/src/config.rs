// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Resolver configuration.
//!
//! # Sources
//!
//! - **Defaults**: [`ResolverConfig::default`]
//! - **Environment**: [`ResolverConfig::from_env`] overlays
//!   `SCALEMETA_MAX_DEPTH`, `SCALEMETA_MAX_NAME_LEN` and
//!   `SCALEMETA_RANGE_FIELD_NAMES`
//! - **JSON**: [`ResolverConfig::from_json`], missing keys keep their default
//!
//! ```ignore
//! use scalemeta::config::ResolverConfig;
//!
//! let config = ResolverConfig::from_env();
//! let registry = PortableRegistry::new(table, codecs).with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Default maximum nesting of in-progress resolutions.
///
/// Real chain metadata nests a few dozen levels at most.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Default upper bound on a rendered type name, in bytes.
///
/// Anonymous composites render their structure inline, so a diamond-shaped
/// graph doubles the name at every layer.
pub const DEFAULT_MAX_NAME_LEN: usize = 64 * 1024;

/// Environment variable overriding [`ResolverConfig::max_depth`].
pub const ENV_MAX_DEPTH: &str = "SCALEMETA_MAX_DEPTH";

/// Environment variable overriding [`ResolverConfig::max_name_len`].
pub const ENV_MAX_NAME_LEN: &str = "SCALEMETA_MAX_NAME_LEN";

/// Environment variable overriding [`ResolverConfig::range_field_names`].
pub const ENV_RANGE_FIELD_NAMES: &str = "SCALEMETA_RANGE_FIELD_NAMES";

/// Tunables for [`PortableRegistry`](crate::portable::PortableRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Maximum nesting of in-progress resolutions for a single lookup.
    pub max_depth: usize,
    /// Longest canonical name (bytes) a single type may render to.
    pub max_name_len: usize,
    /// Require Range-shaped composites to name their fields `start` / `end`.
    pub range_field_names: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_name_len: DEFAULT_MAX_NAME_LEN,
            range_field_names: true,
        }
    }
}

impl ResolverConfig {
    /// Defaults overlaid with environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a JSON config object.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the maximum resolution depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the longest canonical name a type may render to.
    #[must_use]
    pub fn with_max_name_len(mut self, max_name_len: usize) -> Self {
        self.max_name_len = max_name_len;
        self
    }

    /// Toggle the `start`/`end` field-name requirement of the Range matchers.
    #[must_use]
    pub fn with_range_field_names(mut self, required: bool) -> Self {
        self.range_field_names = required;
        self
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(raw) = lookup(ENV_MAX_DEPTH) {
            match raw.trim().parse::<usize>() {
                Ok(depth) if depth > 0 => self.max_depth = depth,
                _ => log::warn!(
                    "[CONFIG] ignoring {}={:?} (expected positive integer)",
                    ENV_MAX_DEPTH,
                    raw
                ),
            }
        }

        if let Some(raw) = lookup(ENV_MAX_NAME_LEN) {
            match raw.trim().parse::<usize>() {
                Ok(len) if len > 0 => self.max_name_len = len,
                _ => log::warn!(
                    "[CONFIG] ignoring {}={:?} (expected positive integer)",
                    ENV_MAX_NAME_LEN,
                    raw
                ),
            }
        }

        if let Some(raw) = lookup(ENV_RANGE_FIELD_NAMES) {
            match parse_flag(&raw) {
                Some(flag) => self.range_field_names = flag,
                None => log::warn!(
                    "[CONFIG] ignoring {}={:?} (expected 1/0/true/false)",
                    ENV_RANGE_FIELD_NAMES,
                    raw
                ),
            }
        }

        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

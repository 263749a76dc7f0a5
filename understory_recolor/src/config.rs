// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interceptor configuration.

use crate::dispatch::OverrideIds;
use crate::tint::Capabilities;

/// Implicit namespace prefixes tried, in order, for unqualified element names.
pub const DEFAULT_PREFIXES: &[&str] = &["android.widget.", "android.webkit.", "android.app."];

/// Settings shared by an interceptor and everything rebound from it.
///
/// # Example
///
/// ```rust
/// use understory_recolor::{Capabilities, OverrideIds, RecolorConfig};
///
/// let config = RecolorConfig::default()
///     .with_capabilities(Capabilities::from_api_level(19))
///     .with_overrides(OverrideIds::FRAMEWORK.with_compat_title_text_color(0x7f04_01a3));
///
/// assert!(!config.capabilities.supports_tint_list());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecolorConfig {
    /// Tint APIs the platform offers.
    pub capabilities: Capabilities,
    /// Which attribute ids are overridden and how.
    pub overrides: OverrideIds,
    /// Prefixes tried for unqualified element names before the pipeline's own
    /// default resolution.
    pub prefixes: &'static [&'static str],
}

impl RecolorConfig {
    /// Sets the platform capabilities.
    #[must_use]
    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Sets the overridden attribute ids.
    #[must_use]
    pub fn with_overrides(mut self, overrides: OverrideIds) -> Self {
        self.overrides = overrides;
        self
    }

    /// Sets the implicit prefixes.
    #[must_use]
    pub fn with_prefixes(mut self, prefixes: &'static [&'static str]) -> Self {
        self.prefixes = prefixes;
        self
    }
}

impl Default for RecolorConfig {
    fn default() -> Self {
        Self {
            capabilities: Capabilities::FULL,
            overrides: OverrideIds::FRAMEWORK,
            prefixes: DEFAULT_PREFIXES,
        }
    }
}

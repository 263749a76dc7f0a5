// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction errors.

use alloc::string::String;
use core::fmt;

/// Error returned when a pipeline cannot build an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InflateError {
    /// No element kind exists under the requested (prefixed) name.
    ///
    /// The interceptor recovers from this by trying the next implicit prefix.
    UnknownElement {
        /// The fully prefixed name that was looked up.
        name: String,
    },
    /// The element kind exists but failed to build.
    Construction {
        /// The fully prefixed name of the element kind.
        name: String,
        /// Host-provided description of the failure.
        reason: String,
    },
}

impl InflateError {
    /// Creates an [`InflateError::UnknownElement`].
    #[must_use]
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownElement { name: name.into() }
    }

    /// Creates an [`InflateError::Construction`].
    #[must_use]
    pub fn construction(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Construction {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` for [`InflateError::UnknownElement`].
    #[must_use]
    #[inline]
    pub fn is_unknown_element(&self) -> bool {
        matches!(self, Self::UnknownElement { .. })
    }

    /// The element name the error refers to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::UnknownElement { name } | Self::Construction { name, .. } => name,
        }
    }
}

impl fmt::Display for InflateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement { name } => write!(f, "no element kind named `{name}`"),
            Self::Construction { name, reason } => {
                write!(f, "failed to construct `{name}`: {reason}")
            }
        }
    }
}

impl core::error::Error for InflateError {}

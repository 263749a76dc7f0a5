// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability tiers and the tint application paths they select.
//!
//! Older platforms lack tint lists on some elements. Instead of checking a
//! platform version at every call site, the dispatcher is handed a
//! [`Capabilities`] value once and routes through [`TintAdapter`], which owns
//! both application paths. Either path produces the same visible tint.

use peniko::Compose;

use crate::color::{Argb, ColorStateList};
use crate::element::{Drawable, Element, ProgressElement, TextElement};

/// Which tint APIs the platform provides.
///
/// # Example
///
/// ```rust
/// use understory_recolor::Capabilities;
///
/// assert_eq!(Capabilities::from_api_level(19), Capabilities::LEGACY);
/// assert_eq!(Capabilities::from_api_level(30), Capabilities::FULL);
///
/// let lollipop = Capabilities::from_api_level(21);
/// assert!(lollipop.supports_tint_list());
/// assert!(!lollipop.supports_compound_drawable_tint_list());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Capabilities {
    /// Elements accept background and indeterminate tint lists.
    pub tint_list: bool,
    /// Text elements accept a tint list for their compound icons.
    pub compound_drawable_tint_list: bool,
}

impl Capabilities {
    /// Every tint API is available.
    pub const FULL: Self = Self {
        tint_list: true,
        compound_drawable_tint_list: true,
    };

    /// No tint list APIs; everything is tinted drawable by drawable.
    pub const LEGACY: Self = Self {
        tint_list: false,
        compound_drawable_tint_list: false,
    };

    /// First API level with element tint lists.
    pub const TINT_LIST_API_LEVEL: u32 = 21;

    /// First API level with compound icon tint lists.
    pub const COMPOUND_DRAWABLE_TINT_LIST_API_LEVEL: u32 = 24;

    /// Capabilities of a platform at `level`.
    #[must_use]
    pub const fn from_api_level(level: u32) -> Self {
        Self {
            tint_list: level >= Self::TINT_LIST_API_LEVEL,
            compound_drawable_tint_list: level >= Self::COMPOUND_DRAWABLE_TINT_LIST_API_LEVEL,
        }
    }

    /// Returns `true` if element tint lists are available.
    #[must_use]
    #[inline]
    pub const fn supports_tint_list(self) -> bool {
        self.tint_list
    }

    /// Returns `true` if compound icon tint lists are available.
    #[must_use]
    #[inline]
    pub const fn supports_compound_drawable_tint_list(self) -> bool {
        self.compound_drawable_tint_list
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::FULL
    }
}

/// Applies tints through whichever API the [`Capabilities`] allow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TintAdapter {
    capabilities: Capabilities,
}

impl TintAdapter {
    /// Creates an adapter for the given tier.
    #[must_use]
    pub const fn new(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }

    /// The tier this adapter targets.
    #[must_use]
    #[inline]
    pub const fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Tints every compound icon of `text` with `color`.
    pub fn tint_compound_drawables(&self, text: &mut dyn TextElement, color: Argb) {
        if self.capabilities.supports_compound_drawable_tint_list() {
            text.set_compound_drawable_tint_list(ColorStateList::solid(color));
        } else {
            text.for_each_compound_drawable(&mut |drawable: &mut dyn Drawable| {
                drawable.set_tint(color);
            });
        }
    }

    /// Tints the indeterminate visual of `progress`.
    pub fn tint_indeterminate(&self, progress: &mut dyn ProgressElement, color: Argb) {
        if self.capabilities.supports_tint_list() {
            progress.set_indeterminate_tint_list(ColorStateList::solid(color));
        } else if let Some(drawable) = progress.indeterminate_drawable_mut() {
            drawable.set_tint(color);
        }
    }

    /// Tints the existing background of `element`.
    ///
    /// Without tint list support the background is color-filtered with
    /// [`Compose::SrcIn`]; an element without a background is left alone.
    pub fn tint_background(&self, element: &mut dyn Element, color: Argb) {
        if self.capabilities.supports_tint_list() {
            element.set_background_tint_list(ColorStateList::solid(color));
        } else if let Some(background) = element.background_mut() {
            background.set_color_filter(color, Compose::SrcIn);
        }
    }

    /// Sets a background tint list through the compatibility layer.
    ///
    /// Uses the native tint list when available and the element's
    /// [`TintableBackground`](crate::TintableBackground) support otherwise.
    pub fn tint_background_compat(&self, element: &mut dyn Element, tint: ColorStateList) {
        if self.capabilities.supports_tint_list() {
            element.set_background_tint_list(tint);
        } else if let Some(tintable) = element.as_tintable_background_mut() {
            tintable.set_support_background_tint_list(tint);
        }
    }
}

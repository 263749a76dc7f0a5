// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Packed colors and state-dependent color lists.
//!
//! Resolvers hand back either a single [`Argb`] or a [`ColorStateList`], which
//! maps interactive [`ElementState`]s to colors with a default.

use core::fmt;

use bitflags::bitflags;
use peniko::Color;
use smallvec::SmallVec;

/// A color packed as `0xAARRGGBB`.
///
/// This is the representation layout resources and theme lookups use for
/// color values. Convert to [`peniko::Color`] for rendering.
///
/// # Example
///
/// ```rust
/// use understory_recolor::Argb;
///
/// let rgba = Argb(0xFF11_2233).to_color().to_rgba8();
/// assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0x11, 0x22, 0x33, 0xFF));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Converts to a Peniko color.
    #[must_use]
    pub fn to_color(self) -> Color {
        let [a, r, g, b] = self.0.to_be_bytes();
        Color::from_rgba8(r, g, b, a)
    }
}

impl From<Argb> for Color {
    #[inline]
    fn from(value: Argb) -> Self {
        value.to_color()
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb({:#010X})", self.0)
    }
}

bitflags! {
    /// Interactive states an element can be in.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ElementState: u8 {
        /// The element accepts input.
        const ENABLED = 1 << 0;
        /// The element has keyboard focus.
        const FOCUSED = 1 << 1;
        /// A pointer is pressing the element.
        const PRESSED = 1 << 2;
        /// A toggle is on.
        const CHECKED = 1 << 3;
    }
}

/// An ordered mapping from element states to colors, with a default.
///
/// An entry matches when the element is in every state it names. Lookups
/// return the first match, so more specific entries go first.
///
/// # Example
///
/// ```rust
/// use understory_recolor::{Argb, ColorStateList, ElementState};
///
/// let list = ColorStateList::new(Argb(0xFF00_00FF))
///     .with(ElementState::PRESSED, Argb(0xFFFF_0000));
///
/// assert_eq!(list.color_for_state(ElementState::PRESSED), Argb(0xFFFF_0000));
/// assert_eq!(list.color_for_state(ElementState::ENABLED), Argb(0xFF00_00FF));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorStateList {
    entries: SmallVec<[(ElementState, Argb); 4]>,
    default: Argb,
}

impl ColorStateList {
    /// Creates a list with no state entries that always yields `default`.
    #[must_use]
    pub fn new(default: Argb) -> Self {
        Self {
            entries: SmallVec::new(),
            default,
        }
    }

    /// A single color for every state.
    #[must_use]
    #[inline]
    pub fn solid(color: Argb) -> Self {
        Self::new(color)
    }

    /// Appends an entry.
    #[must_use]
    pub fn with(mut self, states: ElementState, color: Argb) -> Self {
        self.entries.push((states, color));
        self
    }

    /// The color used when no entry matches.
    #[must_use]
    #[inline]
    pub fn default_color(&self) -> Argb {
        self.default
    }

    /// Returns the color for `state`.
    #[must_use]
    pub fn color_for_state(&self, state: ElementState) -> Argb {
        self.entries
            .iter()
            .find(|(required, _)| state.contains(*required))
            .map_or(self.default, |(_, c)| *c)
    }
}

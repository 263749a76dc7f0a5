// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits for host elements.
//!
//! Widgets stay host-owned. The dispatcher only needs to know which color
//! setters a given element exposes, so each family of setters is its own
//! trait and [`Element`] offers `as_*_mut` accessors that return `None` when
//! the element lacks the capability. A checkbox, for example, is both a
//! [`ToggleElement`] and a [`TextElement`].

use peniko::Compose;

use crate::color::{Argb, ColorStateList};

/// A paintable visual attached to an element: a background, an icon, or a
/// progress indicator.
pub trait Drawable {
    /// Tints the drawable with a single color.
    fn set_tint(&mut self, color: Argb);

    /// Applies a color filter using the given Porter-Duff mode.
    fn set_color_filter(&mut self, color: Argb, mode: Compose);
}

/// A constructed UI element.
pub trait Element {
    /// Replaces the background with a flat fill of `color`.
    fn set_background_color(&mut self, color: Argb);

    /// Sets the background tint list. Only honored on platforms with tint list
    /// support; see [`Capabilities`](crate::Capabilities).
    fn set_background_tint_list(&mut self, tint: ColorStateList);

    /// The current background, if any.
    fn background_mut(&mut self) -> Option<&mut dyn Drawable>;

    /// Background tinting provided by a compatibility layer.
    fn as_tintable_background_mut(&mut self) -> Option<&mut dyn TintableBackground> {
        None
    }

    /// Two-state button capabilities.
    fn as_toggle_mut(&mut self) -> Option<&mut dyn ToggleElement> {
        None
    }

    /// Text capabilities.
    fn as_text_mut(&mut self) -> Option<&mut dyn TextElement> {
        None
    }

    /// Progress indicator capabilities.
    fn as_progress_mut(&mut self) -> Option<&mut dyn ProgressElement> {
        None
    }

    /// Image capabilities.
    fn as_image_mut(&mut self) -> Option<&mut dyn ImageElement> {
        None
    }

    /// Title bar capabilities.
    fn as_bar_mut(&mut self) -> Option<&mut dyn BarElement> {
        None
    }
}

/// Compatibility-layer background tinting for platforms without native tint
/// lists.
pub trait TintableBackground {
    /// Sets the background tint list through the compatibility layer.
    fn set_support_background_tint_list(&mut self, tint: ColorStateList);
}

/// A checkbox, switch, radio button or similar.
pub trait ToggleElement {
    /// Sets the tint of the button glyph.
    fn set_button_tint_list(&mut self, tint: ColorStateList);
}

/// An element that renders text and optional compound icons.
pub trait TextElement {
    /// Sets the foreground text color.
    fn set_text_color(&mut self, color: Argb);

    /// Sets the selection highlight color.
    fn set_highlight_color(&mut self, color: Argb);

    /// Sets one tint list for all compound icons.
    fn set_compound_drawable_tint_list(&mut self, tint: ColorStateList);

    /// Calls `f` for each compound icon slot that holds a drawable.
    fn for_each_compound_drawable(&mut self, f: &mut dyn FnMut(&mut dyn Drawable));
}

/// A progress bar or spinner.
pub trait ProgressElement {
    /// Sets the tint list of the indeterminate visual.
    fn set_indeterminate_tint_list(&mut self, tint: ColorStateList);

    /// The indeterminate visual, if any.
    fn indeterminate_drawable_mut(&mut self) -> Option<&mut dyn Drawable>;
}

/// An element displaying an image.
pub trait ImageElement {
    /// Sets the image tint list.
    fn set_image_tint_list(&mut self, tint: ColorStateList);
}

/// A toolbar or other container with a title.
pub trait BarElement {
    /// Sets the title text color.
    fn set_title_text_color(&mut self, color: Argb);
}

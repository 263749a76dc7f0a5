// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-attribute override dispatch.
//!
//! [`AttributeDispatcher`] looks at the attributes declared on a freshly built
//! element, picks out the ones listed in its [`OverrideTable`], resolves their
//! raw values through the [`ColorResolver`], and applies the result with the
//! strategy of the attribute's [`OverrideKind`].
//!
//! | Kind | Element guard | Resolved as | Applied with |
//! |------|---------------|-------------|--------------|
//! | `ButtonTint` | toggle | state list | button tint list |
//! | `DrawableTint` | text | color, theme fallback | compound icon tint |
//! | `TextColor` | text | color | text color |
//! | `Background` | any | color | flat background fill |
//! | `IndeterminateTint` | progress | color | indeterminate tint |
//! | `BackgroundTint` | any | color | background tint |
//! | `CompatBackgroundTint` | any | color | compatibility background tint |
//! | `TextColorHighlight` | text | color | highlight color |
//! | `Tint` | image | color | image tint list |
//! | `TitleTextColor` | bar | color | title text color |
//!
//! Unknown ids, non-reference values, guard mismatches and resolver declines
//! all leave the element untouched.

use alloc::rc::Rc;
use core::fmt;

use hashbrown::HashMap;

use crate::attrs::AttributeSet;
use crate::catalog::{AttrId, parse_attribute_reference};
use crate::color::{Argb, ColorStateList};
use crate::config::RecolorConfig;
use crate::element::Element;
use crate::pipeline::{Context, ElementBox};
use crate::resolver::ColorResolver;
use crate::tint::TintAdapter;

/// The element capability an override requires.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementGuard {
    /// Every element qualifies.
    Any,
    /// [`ToggleElement`](crate::ToggleElement).
    Toggle,
    /// [`TextElement`](crate::TextElement).
    Text,
    /// [`ProgressElement`](crate::ProgressElement).
    Progress,
    /// [`ImageElement`](crate::ImageElement).
    Image,
    /// [`BarElement`](crate::BarElement).
    Bar,
}

impl ElementGuard {
    /// Returns `true` if `element` has the required capability.
    pub fn admits(self, element: &mut dyn Element) -> bool {
        match self {
            Self::Any => true,
            Self::Toggle => element.as_toggle_mut().is_some(),
            Self::Text => element.as_text_mut().is_some(),
            Self::Progress => element.as_progress_mut().is_some(),
            Self::Image => element.as_image_mut().is_some(),
            Self::Bar => element.as_bar_mut().is_some(),
        }
    }
}

/// The supported overrides.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OverrideKind {
    /// Toggle glyph tint, resolved as a state list.
    ButtonTint,
    /// Tint of a text element's compound icons.
    ///
    /// When the resolver declines, the referenced id is looked up as a theme
    /// attribute instead. This is a fallback for platforms that ignore the
    /// declared attribute, not a resolver contract.
    DrawableTint,
    /// Foreground text color.
    TextColor,
    /// Flat background fill, replacing any previous background.
    Background,
    /// Tint of a progress element's indeterminate visual.
    IndeterminateTint,
    /// Background tint declared through the platform registry.
    BackgroundTint,
    /// Background tint declared through the compatibility registry.
    CompatBackgroundTint,
    /// Text selection highlight color.
    TextColorHighlight,
    /// Image tint.
    Tint,
    /// Title text color of a bar.
    TitleTextColor,
}

impl OverrideKind {
    /// Every kind, in table order.
    pub const ALL: [Self; 10] = [
        Self::ButtonTint,
        Self::DrawableTint,
        Self::TextColor,
        Self::Background,
        Self::IndeterminateTint,
        Self::BackgroundTint,
        Self::CompatBackgroundTint,
        Self::TextColorHighlight,
        Self::Tint,
        Self::TitleTextColor,
    ];

    /// The capability an element needs for this override to apply.
    #[must_use]
    pub const fn guard(self) -> ElementGuard {
        match self {
            Self::ButtonTint => ElementGuard::Toggle,
            Self::DrawableTint | Self::TextColor | Self::TextColorHighlight => ElementGuard::Text,
            Self::Background | Self::BackgroundTint | Self::CompatBackgroundTint => {
                ElementGuard::Any
            }
            Self::IndeterminateTint => ElementGuard::Progress,
            Self::Tint => ElementGuard::Image,
            Self::TitleTextColor => ElementGuard::Bar,
        }
    }

    /// The attribute name as declared in layouts.
    #[must_use]
    pub const fn attribute_name(self) -> &'static str {
        match self {
            Self::ButtonTint => "buttonTint",
            Self::DrawableTint => "drawableTint",
            Self::TextColor => "textColor",
            Self::Background => "background",
            Self::IndeterminateTint => "indeterminateTint",
            Self::BackgroundTint | Self::CompatBackgroundTint => "backgroundTint",
            Self::TextColorHighlight => "textColorHighlight",
            Self::Tint => "tint",
            Self::TitleTextColor => "titleTextColor",
        }
    }
}

/// The attribute ids that trigger each override.
///
/// Platform ids come from the framework registry. Compatibility ids come from
/// a support library's own registry, which assigns them per application, so
/// they are optional.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OverrideIds {
    /// `buttonTint`.
    pub button_tint: AttrId,
    /// `drawableTint`.
    pub drawable_tint: AttrId,
    /// `textColor`.
    pub text_color: AttrId,
    /// `background`.
    pub background: AttrId,
    /// `indeterminateTint`.
    pub indeterminate_tint: AttrId,
    /// `backgroundTint`.
    pub background_tint: AttrId,
    /// `textColorHighlight`.
    pub text_color_highlight: AttrId,
    /// `tint`.
    pub tint: AttrId,
    /// Compatibility `buttonTint`; same override as [`button_tint`](Self::button_tint).
    pub compat_button_tint: Option<AttrId>,
    /// Compatibility `backgroundTint`.
    pub compat_background_tint: Option<AttrId>,
    /// Compatibility `titleTextColor`.
    pub compat_title_text_color: Option<AttrId>,
}

impl OverrideIds {
    /// Framework attribute ids, without compatibility ids.
    pub const FRAMEWORK: Self = Self {
        button_tint: AttrId::new(0x0101_046f),
        drawable_tint: AttrId::new(0x0101_04d6),
        text_color: AttrId::new(0x0101_0098),
        background: AttrId::new(0x0101_00d4),
        indeterminate_tint: AttrId::new(0x0101_0469),
        background_tint: AttrId::new(0x0101_046b),
        text_color_highlight: AttrId::new(0x0101_0099),
        tint: AttrId::new(0x0101_0121),
        compat_button_tint: None,
        compat_background_tint: None,
        compat_title_text_color: None,
    };

    /// Sets the compatibility `buttonTint` id.
    #[must_use]
    pub const fn with_compat_button_tint(mut self, id: i32) -> Self {
        self.compat_button_tint = Some(AttrId::new(id));
        self
    }

    /// Sets the compatibility `backgroundTint` id.
    #[must_use]
    pub const fn with_compat_background_tint(mut self, id: i32) -> Self {
        self.compat_background_tint = Some(AttrId::new(id));
        self
    }

    /// Sets the compatibility `titleTextColor` id.
    #[must_use]
    pub const fn with_compat_title_text_color(mut self, id: i32) -> Self {
        self.compat_title_text_color = Some(AttrId::new(id));
        self
    }
}

impl Default for OverrideIds {
    fn default() -> Self {
        Self::FRAMEWORK
    }
}

/// Constant-time lookup from attribute id to [`OverrideKind`].
///
/// Built once from [`OverrideIds`] and never modified.
///
/// # Example
///
/// ```rust
/// use understory_recolor::{AttrId, OverrideIds, OverrideKind, OverrideTable};
///
/// let table = OverrideTable::new(&OverrideIds::FRAMEWORK.with_compat_background_tint(0x7f04_0030));
///
/// assert_eq!(table.get(AttrId::new(0x0101_0098)), Some(OverrideKind::TextColor));
/// assert_eq!(table.get(AttrId::new(0x7f04_0030)), Some(OverrideKind::CompatBackgroundTint));
/// assert_eq!(table.get(AttrId::new(1)), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OverrideTable {
    by_id: HashMap<AttrId, OverrideKind>,
}

impl OverrideTable {
    /// Builds the table.
    ///
    /// If two kinds share an id, the later entry of [`OverrideKind::ALL`] order
    /// wins.
    #[must_use]
    pub fn new(ids: &OverrideIds) -> Self {
        let rows = [
            (Some(ids.button_tint), OverrideKind::ButtonTint),
            (ids.compat_button_tint, OverrideKind::ButtonTint),
            (Some(ids.drawable_tint), OverrideKind::DrawableTint),
            (Some(ids.text_color), OverrideKind::TextColor),
            (Some(ids.background), OverrideKind::Background),
            (Some(ids.indeterminate_tint), OverrideKind::IndeterminateTint),
            (Some(ids.background_tint), OverrideKind::BackgroundTint),
            (ids.compat_background_tint, OverrideKind::CompatBackgroundTint),
            (Some(ids.text_color_highlight), OverrideKind::TextColorHighlight),
            (Some(ids.tint), OverrideKind::Tint),
            (ids.compat_title_text_color, OverrideKind::TitleTextColor),
        ];
        let by_id = rows
            .into_iter()
            .filter_map(|(id, kind)| Some((id?, kind)))
            .collect();
        Self { by_id }
    }

    /// The override for `id`, if any.
    #[must_use]
    #[inline]
    pub fn get(&self, id: AttrId) -> Option<OverrideKind> {
        self.by_id.get(&id).copied()
    }

    /// Number of ids in the table.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Returns `true` if the table has no ids.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Applies resolver colors to freshly constructed elements.
pub struct AttributeDispatcher {
    resolver: Rc<dyn ColorResolver>,
    table: OverrideTable,
    tint: TintAdapter,
}

impl AttributeDispatcher {
    /// Creates a dispatcher for `resolver` with the table and tier from `config`.
    #[must_use]
    pub fn new(resolver: Rc<dyn ColorResolver>, config: &RecolorConfig) -> Self {
        Self {
            resolver,
            table: OverrideTable::new(&config.overrides),
            tint: TintAdapter::new(config.capabilities),
        }
    }

    /// The resolver colors come from.
    #[must_use]
    #[inline]
    pub fn resolver(&self) -> &Rc<dyn ColorResolver> {
        &self.resolver
    }

    /// The dispatch table.
    #[must_use]
    #[inline]
    pub fn table(&self) -> &OverrideTable {
        &self.table
    }

    /// The tint adapter.
    #[must_use]
    #[inline]
    pub fn tint(&self) -> TintAdapter {
        self.tint
    }

    /// Applies overrides to a construction result.
    ///
    /// Does nothing if construction produced no element.
    pub fn on_element_constructed(
        &self,
        element: Option<&mut ElementBox>,
        attrs: &dyn AttributeSet,
        cx: &dyn Context,
    ) {
        if let Some(element) = element {
            self.apply_overrides(&mut **element, attrs, cx);
        }
    }

    /// Applies overrides for every attribute declared on `element`.
    ///
    /// Each declared attribute is visited once, in declaration order.
    pub fn apply_overrides(
        &self,
        element: &mut dyn Element,
        attrs: &dyn AttributeSet,
        cx: &dyn Context,
    ) {
        for index in 0..attrs.len() {
            let Some(id) = attrs.name_id(index) else {
                continue;
            };
            let Some(kind) = self.table.get(id) else {
                continue;
            };
            if !kind.guard().admits(element) {
                tracing::trace!(%id, ?kind, "element lacks capability, skipping");
                continue;
            }
            let Some(raw) = attrs.value(index) else {
                continue;
            };
            self.apply(kind, element, raw, cx);
        }
    }

    fn apply(&self, kind: OverrideKind, element: &mut dyn Element, raw: &str, cx: &dyn Context) {
        let resolver = &*self.resolver;
        match kind {
            OverrideKind::ButtonTint => {
                if let Some(toggle) = element.as_toggle_mut()
                    && let Some(states) = declined(kind, raw, resolver.color_states_for_value(cx, raw))
                {
                    toggle.set_button_tint_list(states);
                }
            }
            OverrideKind::DrawableTint => {
                if let Some(text) = element.as_text_mut()
                    && let Some(color) = resolver
                        .color_for_value(cx, raw)
                        .or_else(|| theme_fallback(cx, raw))
                {
                    self.tint.tint_compound_drawables(text, color);
                }
            }
            OverrideKind::TextColor => {
                if let Some(text) = element.as_text_mut()
                    && let Some(color) = self.color(kind, raw, cx)
                {
                    text.set_text_color(color);
                }
            }
            OverrideKind::Background => {
                if let Some(color) = self.color(kind, raw, cx) {
                    element.set_background_color(color);
                }
            }
            OverrideKind::IndeterminateTint => {
                if let Some(progress) = element.as_progress_mut()
                    && let Some(color) = self.color(kind, raw, cx)
                {
                    self.tint.tint_indeterminate(progress, color);
                }
            }
            OverrideKind::BackgroundTint => {
                if let Some(color) = self.color(kind, raw, cx) {
                    self.tint.tint_background(element, color);
                }
            }
            OverrideKind::CompatBackgroundTint => {
                if let Some(color) = self.color(kind, raw, cx) {
                    self.tint
                        .tint_background_compat(element, ColorStateList::solid(color));
                }
            }
            OverrideKind::TextColorHighlight => {
                if let Some(text) = element.as_text_mut()
                    && let Some(color) = self.color(kind, raw, cx)
                {
                    text.set_highlight_color(color);
                }
            }
            OverrideKind::Tint => {
                if let Some(image) = element.as_image_mut()
                    && let Some(color) = self.color(kind, raw, cx)
                {
                    image.set_image_tint_list(ColorStateList::solid(color));
                }
            }
            OverrideKind::TitleTextColor => {
                if let Some(bar) = element.as_bar_mut()
                    && let Some(color) = self.color(kind, raw, cx)
                {
                    bar.set_title_text_color(color);
                }
            }
        }
    }

    fn color(&self, kind: OverrideKind, raw: &str, cx: &dyn Context) -> Option<Argb> {
        declined(kind, raw, self.resolver.color_for_value(cx, raw))
    }
}

impl fmt::Debug for AttributeDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeDispatcher")
            .field("table", &self.table)
            .field("tint", &self.tint)
            .finish_non_exhaustive()
    }
}

fn declined<T>(kind: OverrideKind, raw: &str, resolved: Option<T>) -> Option<T> {
    if resolved.is_none() {
        tracing::trace!(?kind, raw, "no override");
    }
    resolved
}

/// Looks the referenced id up as a theme attribute.
fn theme_fallback(cx: &dyn Context, raw: &str) -> Option<Argb> {
    let attr = parse_attribute_reference(raw)?;
    let color = cx.theme_color(attr);
    if color.is_none() {
        tracing::warn!(%attr, "theme attribute could not be resolved");
    }
    color
}

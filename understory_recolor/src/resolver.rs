// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-supplied color source.
//!
//! A [`ColorResolver`] decides, at construction time, which color a symbolic
//! attribute name stands for. Skins and user-selectable themes are built by
//! swapping resolvers. [`Palette`] is a ready-made table-backed resolver.

use hashbrown::HashMap;

use crate::catalog::AttributeCatalog;
use crate::color::{Argb, ColorStateList};
use crate::pipeline::Context;

/// Maps symbolic color attribute names to colors.
///
/// Implementations must not touch the element tree and must return `None` for
/// names they do not recognize. Panics are not caught and propagate out of the
/// construction that triggered them.
pub trait ColorResolver {
    /// The id → name catalog used to interpret raw attribute values.
    fn catalog(&self) -> &AttributeCatalog;

    /// Resolves `name` to a single color.
    fn resolve_color(&self, cx: &dyn Context, name: &str) -> Option<Argb>;

    /// Resolves `name` to a state-dependent color list.
    fn resolve_color_states(&self, cx: &dyn Context, name: &str) -> Option<ColorStateList>;

    /// Resolves a raw declared value such as `"@2130903040"` to a single color.
    fn color_for_value(&self, cx: &dyn Context, raw: &str) -> Option<Argb> {
        let name = self.catalog().name_for_value(raw)?;
        self.resolve_color(cx, name)
    }

    /// Resolves a raw declared value to a state-dependent color list.
    fn color_states_for_value(&self, cx: &dyn Context, raw: &str) -> Option<ColorStateList> {
        let name = self.catalog().name_for_value(raw)?;
        self.resolve_color_states(cx, name)
    }
}

/// A [`ColorResolver`] backed by fixed tables.
///
/// State lists fall back to a solid list of the plain color registered under
/// the same name.
///
/// # Example
///
/// ```rust
/// use understory_recolor::{Argb, AttributeCatalog, ColorResolver, Palette};
/// # use std::rc::Rc;
/// # use understory_recolor::{AttrId, Context, Pipeline};
/// # struct Scope;
/// # impl Context for Scope {
/// #     fn theme_color(&self, _: AttrId) -> Option<Argb> { None }
/// #     fn pipeline(&self) -> Option<Rc<dyn Pipeline>> { None }
/// # }
///
/// let catalog = AttributeCatalog::from_registry(&[("colorAccent", 1), ("colorSurface", 2)]);
/// let dark = Palette::new(catalog).with_color("colorAccent", Argb(0xFF4C_C2FF));
///
/// assert_eq!(dark.color_for_value(&Scope, "@1"), Some(Argb(0xFF4C_C2FF)));
/// assert_eq!(dark.color_for_value(&Scope, "@2"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Palette {
    catalog: AttributeCatalog,
    colors: HashMap<&'static str, Argb>,
    states: HashMap<&'static str, ColorStateList>,
}

impl Palette {
    /// Creates an empty palette over `catalog`.
    #[must_use]
    pub fn new(catalog: AttributeCatalog) -> Self {
        Self {
            catalog,
            colors: HashMap::new(),
            states: HashMap::new(),
        }
    }

    /// Registers a single color for `name`.
    #[must_use]
    pub fn with_color(mut self, name: &'static str, color: Argb) -> Self {
        self.colors.insert(name, color);
        self
    }

    /// Registers a state list for `name`.
    #[must_use]
    pub fn with_states(mut self, name: &'static str, states: ColorStateList) -> Self {
        self.states.insert(name, states);
        self
    }
}

impl ColorResolver for Palette {
    fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    fn resolve_color(&self, _cx: &dyn Context, name: &str) -> Option<Argb> {
        self.colors.get(name).copied()
    }

    fn resolve_color_states(&self, _cx: &dyn Context, name: &str) -> Option<ColorStateList> {
        self.states
            .get(name)
            .cloned()
            .or_else(|| self.colors.get(name).copied().map(ColorStateList::solid))
    }
}

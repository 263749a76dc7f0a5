// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Installation entry point.
//!
//! [`RecolorContext`] wraps a host [`Context`] so that everything built in it
//! goes through an [`Interceptor`]. Theme lookups are delegated unchanged.

use alloc::rc::{Rc, Weak};
use core::cell::OnceCell;
use core::fmt;

use crate::catalog::AttrId;
use crate::color::Argb;
use crate::config::RecolorConfig;
use crate::intercept::Interceptor;
use crate::pipeline::{Context, Pipeline};
use crate::resolver::ColorResolver;

/// A [`Context`] whose pipeline recolors elements.
///
/// The interceptor is created on the first pipeline request and the same one
/// is returned afterwards. It builds for this context: hooks and resolvers are
/// handed the wrapper, so a nested build started from the scope they receive
/// is recolored too. The interceptor holds the wrapper weakly.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use understory_recolor::{Argb, AttrId, AttributeCatalog, Context, Palette, Pipeline, RecolorContext};
/// # struct Activity;
/// # impl Context for Activity {
/// #     fn theme_color(&self, attr: AttrId) -> Option<Argb> {
/// #         (attr == AttrId::new(0x0101_0036)).then_some(Argb(0xFF44_5566))
/// #     }
/// #     fn pipeline(&self) -> Option<Rc<dyn Pipeline>> { None }
/// # }
///
/// let catalog = AttributeCatalog::from_registry(&[("colorAccent", 0x7f04_0001)]);
/// let resolver = Rc::new(Palette::new(catalog).with_color("colorAccent", Argb(0xFF00_00FF)));
/// let cx = RecolorContext::wrap(Rc::new(Activity), resolver);
///
/// assert_eq!(cx.theme_color(AttrId::new(0x0101_0036)), Some(Argb(0xFF44_5566)));
/// // The host offers no pipeline, so there is nothing to intercept.
/// assert!(cx.pipeline().is_none());
/// ```
pub struct RecolorContext {
    this: Weak<Self>,
    base: Rc<dyn Context>,
    resolver: Rc<dyn ColorResolver>,
    config: RecolorConfig,
    interceptor: OnceCell<Rc<Interceptor>>,
}

impl RecolorContext {
    /// Wraps `base` with the default configuration.
    #[must_use]
    pub fn wrap(base: Rc<dyn Context>, resolver: Rc<dyn ColorResolver>) -> Rc<Self> {
        Self::wrap_with_config(base, resolver, RecolorConfig::default())
    }

    /// Wraps `base` with an explicit configuration.
    #[must_use]
    pub fn wrap_with_config(
        base: Rc<dyn Context>,
        resolver: Rc<dyn ColorResolver>,
        config: RecolorConfig,
    ) -> Rc<Self> {
        Rc::new_cyclic(|this| Self {
            this: this.clone(),
            base,
            resolver,
            config,
            interceptor: OnceCell::new(),
        })
    }

    /// The wrapped context.
    #[must_use]
    pub fn base(&self) -> &Rc<dyn Context> {
        &self.base
    }

    /// The resolver handed to the interceptor.
    #[must_use]
    pub fn resolver(&self) -> &Rc<dyn ColorResolver> {
        &self.resolver
    }

    /// The configuration handed to the interceptor.
    #[must_use]
    pub fn config(&self) -> &RecolorConfig {
        &self.config
    }

    /// The interceptor for this scope, created on first use.
    ///
    /// Returns `None` if the base context has no pipeline to intercept.
    pub fn interceptor(&self) -> Option<Rc<Interceptor>> {
        if let Some(interceptor) = self.interceptor.get() {
            return Some(interceptor.clone());
        }
        let base = self.base.pipeline()?;
        let scope: Weak<dyn Context> = self.this.clone();
        let interceptor = self.interceptor.get_or_init(|| {
            Rc::new(Interceptor::new(base, self.resolver.clone(), &self.config).in_scope(scope))
        });
        Some(interceptor.clone())
    }
}

impl Context for RecolorContext {
    fn theme_color(&self, attr: AttrId) -> Option<Argb> {
        self.base.theme_color(attr)
    }

    fn pipeline(&self) -> Option<Rc<dyn Pipeline>> {
        self.interceptor()
            .map(|interceptor| interceptor as Rc<dyn Pipeline>)
    }
}

impl fmt::Debug for RecolorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecolorContext")
            .field("config", &self.config)
            .field("interceptor", &self.interceptor.get())
            .finish_non_exhaustive()
    }
}

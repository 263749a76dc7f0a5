// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The construction interceptor.
//!
//! [`Interceptor`] is a [`Pipeline`] that forwards construction to a host
//! pipeline and runs every element it gets back through an
//! [`AttributeDispatcher`] before returning it. Host hooks installed on it are
//! wrapped in a [`DispatchingHook`] so elements built by hooks are recolored
//! too.
//!
//! ## Lookup order
//!
//! For one `inflate` call:
//!
//! 1. The parent-aware hook, if installed, otherwise the name-only hook.
//! 2. Names containing a `.` are built directly.
//! 3. Other names are tried under each implicit prefix in turn. A prefix that
//!    has no such element kind is skipped; any other failure is returned.
//! 4. When every prefix misses, the host pipeline's default resolution.
//!
//! Whichever step produces the element, it is dispatched exactly once.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use crate::attrs::AttributeSet;
use crate::config::RecolorConfig;
use crate::dispatch::AttributeDispatcher;
use crate::element::Element;
use crate::error::InflateError;
use crate::pipeline::{Context, CreateHook, ElementBox, ParentedCreateHook, Pipeline};
use crate::resolver::ColorResolver;

/// A construction hook as installed on a [`Pipeline`].
///
/// The two variants make wrapping explicit: installing a
/// [`Hook::Dispatching`] on an interceptor stores it unchanged, so a hook
/// read back from one interceptor and installed again never dispatches twice.
pub enum Hook<H: ?Sized> {
    /// A hook supplied by the host, not yet recoloring its output.
    Host(Rc<H>),
    /// A host hook whose output is dispatched.
    Dispatching(DispatchingHook<H>),
}

impl<H: ?Sized> Hook<H> {
    /// Wraps a host hook.
    #[must_use]
    pub fn host(hook: Rc<H>) -> Self {
        Self::Host(hook)
    }

    /// Returns `true` if the hook already dispatches its output.
    #[must_use]
    #[inline]
    pub fn is_dispatching(&self) -> bool {
        matches!(self, Self::Dispatching(_))
    }

    /// Makes the hook dispatch through `dispatcher`. Already dispatching hooks
    /// are returned unchanged.
    #[must_use]
    pub fn dispatching(self, dispatcher: &Rc<AttributeDispatcher>) -> Self {
        match self {
            Self::Host(inner) => {
                tracing::debug!("wrapping host hook");
                Self::Dispatching(DispatchingHook::new(inner, dispatcher.clone()))
            }
            wrapped @ Self::Dispatching(_) => {
                tracing::trace!("hook already dispatching");
                wrapped
            }
        }
    }
}

impl<H: ?Sized> Clone for Hook<H> {
    fn clone(&self) -> Self {
        match self {
            Self::Host(hook) => Self::Host(hook.clone()),
            Self::Dispatching(wrapped) => Self::Dispatching(wrapped.clone()),
        }
    }
}

impl<H: ?Sized> fmt::Debug for Hook<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(_) => f.debug_tuple("Host").finish_non_exhaustive(),
            Self::Dispatching(wrapped) => f.debug_tuple("Dispatching").field(wrapped).finish(),
        }
    }
}

impl Hook<dyn CreateHook> {
    /// Runs the hook.
    pub fn create(
        &self,
        name: &str,
        scope: &dyn Context,
        attrs: &dyn AttributeSet,
    ) -> Option<ElementBox> {
        match self {
            Self::Host(hook) => hook.create(name, scope, attrs),
            Self::Dispatching(wrapped) => wrapped.create(name, scope, attrs),
        }
    }
}

impl Hook<dyn ParentedCreateHook> {
    /// Runs the hook.
    pub fn create_with_parent(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        scope: &dyn Context,
        attrs: &dyn AttributeSet,
    ) -> Option<ElementBox> {
        match self {
            Self::Host(hook) => hook.create_with_parent(parent, name, scope, attrs),
            Self::Dispatching(wrapped) => wrapped.create_with_parent(parent, name, scope, attrs),
        }
    }
}

/// A host hook paired with the dispatcher its output goes through.
pub struct DispatchingHook<H: ?Sized> {
    inner: Rc<H>,
    dispatcher: Rc<AttributeDispatcher>,
}

impl<H: ?Sized> DispatchingHook<H> {
    /// Pairs `inner` with `dispatcher`.
    #[must_use]
    pub fn new(inner: Rc<H>, dispatcher: Rc<AttributeDispatcher>) -> Self {
        Self { inner, dispatcher }
    }
}

impl<H: ?Sized> Clone for DispatchingHook<H> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            dispatcher: self.dispatcher.clone(),
        }
    }
}

impl<H: ?Sized> fmt::Debug for DispatchingHook<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchingHook")
            .field("dispatcher", &self.dispatcher)
            .finish_non_exhaustive()
    }
}

impl DispatchingHook<dyn CreateHook> {
    /// Runs the host hook and dispatches whatever it built.
    pub fn create(
        &self,
        name: &str,
        scope: &dyn Context,
        attrs: &dyn AttributeSet,
    ) -> Option<ElementBox> {
        let mut element = self.inner.create(name, scope, attrs);
        self.dispatcher
            .on_element_constructed(element.as_mut(), attrs, scope);
        element
    }
}

impl DispatchingHook<dyn ParentedCreateHook> {
    /// Runs the host hook and dispatches whatever it built.
    pub fn create_with_parent(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        scope: &dyn Context,
        attrs: &dyn AttributeSet,
    ) -> Option<ElementBox> {
        let mut element = self.inner.create_with_parent(parent, name, scope, attrs);
        self.dispatcher
            .on_element_constructed(element.as_mut(), attrs, scope);
        element
    }
}

/// A [`Pipeline`] that recolors every element built through it.
///
/// # Example
///
/// ```rust
/// use std::rc::Rc;
/// use understory_recolor::{
///     Argb, AttrId, AttributeCatalog, AttributeSet, Context, CreateHook, DeclaredAttributes,
///     Element, ElementBox, Hook, InflateError, Interceptor, Palette, ParentedCreateHook,
///     Pipeline, RecolorConfig,
/// };
/// # use std::cell::RefCell;
/// # use understory_recolor::{ColorStateList, Drawable};
/// # struct Host { scope: Rc<dyn Context>, seen: Rc<RefCell<Vec<Argb>>> }
/// # impl Pipeline for Host {
/// #     fn scope(&self) -> Rc<dyn Context> { self.scope.clone() }
/// #     fn create_element(&self, name: &str, prefix: Option<&str>, _: &dyn AttributeSet)
/// #         -> Result<ElementBox, InflateError> {
/// #         match (prefix, name) {
/// #             (Some("android.widget."), "TextView") => Ok(Box::new(Probe(self.seen.clone()))),
/// #             _ => Err(InflateError::unknown(name)),
/// #         }
/// #     }
/// #     fn hook(&self) -> Option<Hook<dyn CreateHook>> { None }
/// #     fn set_hook(&self, _: Hook<dyn CreateHook>) {}
/// #     fn parented_hook(&self) -> Option<Hook<dyn ParentedCreateHook>> { None }
/// #     fn set_parented_hook(&self, _: Hook<dyn ParentedCreateHook>) {}
/// #     fn rebind(&self, scope: Rc<dyn Context>) -> Rc<dyn Pipeline> {
/// #         Rc::new(Host { scope, seen: self.seen.clone() })
/// #     }
/// # }
/// # struct Probe(Rc<RefCell<Vec<Argb>>>);
/// # impl Element for Probe {
/// #     fn set_background_color(&mut self, c: Argb) { self.0.borrow_mut().push(c); }
/// #     fn set_background_tint_list(&mut self, _: ColorStateList) {}
/// #     fn background_mut(&mut self) -> Option<&mut dyn Drawable> { None }
/// # }
/// # struct Scope;
/// # impl Context for Scope {
/// #     fn theme_color(&self, _: AttrId) -> Option<Argb> { None }
/// #     fn pipeline(&self) -> Option<Rc<dyn Pipeline>> { None }
/// # }
/// # let seen = Rc::new(RefCell::new(Vec::new()));
/// # let host: Rc<dyn Pipeline> = Rc::new(Host { scope: Rc::new(Scope), seen: seen.clone() });
///
/// let catalog = AttributeCatalog::from_registry(&[("colorSurface", 0x7f04_0001)]);
/// let palette = Palette::new(catalog).with_color("colorSurface", Argb::BLACK);
/// let interceptor = Interceptor::new(host, Rc::new(palette), &RecolorConfig::default());
///
/// let attrs = DeclaredAttributes::new().with(0x0101_00d4, "@2130968577");
/// interceptor.inflate(None, "TextView", &attrs)?;
///
/// assert_eq!(*seen.borrow(), [Argb::BLACK]);
/// # Ok::<(), InflateError>(())
/// ```
pub struct Interceptor {
    base: Rc<dyn Pipeline>,
    scope: Option<Weak<dyn Context>>,
    dispatcher: Rc<AttributeDispatcher>,
    prefixes: &'static [&'static str],
    hook: RefCell<Option<Hook<dyn CreateHook>>>,
    parented_hook: RefCell<Option<Hook<dyn ParentedCreateHook>>>,
}

impl Interceptor {
    /// Creates an interceptor in front of `base`.
    ///
    /// Hooks already installed on `base` are wrapped and carried over.
    #[must_use]
    pub fn new(
        base: Rc<dyn Pipeline>,
        resolver: Rc<dyn ColorResolver>,
        config: &RecolorConfig,
    ) -> Self {
        let dispatcher = Rc::new(AttributeDispatcher::new(resolver, config));
        Self::with_dispatcher(base, dispatcher, config.prefixes)
    }

    /// Creates an interceptor around an existing dispatcher.
    #[must_use]
    pub fn with_dispatcher(
        base: Rc<dyn Pipeline>,
        dispatcher: Rc<AttributeDispatcher>,
        prefixes: &'static [&'static str],
    ) -> Self {
        let hook = base.hook().map(|hook| hook.dispatching(&dispatcher));
        let parented_hook = base
            .parented_hook()
            .map(|hook| hook.dispatching(&dispatcher));
        tracing::debug!(
            overrides = dispatcher.table().len(),
            prefixes = prefixes.len(),
            "interceptor installed"
        );
        Self {
            base,
            scope: None,
            dispatcher,
            prefixes,
            hook: RefCell::new(hook),
            parented_hook: RefCell::new(parented_hook),
        }
    }

    /// Builds for `scope` instead of the host pipeline's scope, without
    /// keeping it alive.
    ///
    /// Hooks and overrides see `scope`, and construction started from it comes
    /// back here. Once `scope` is dropped the host pipeline's scope is used.
    #[must_use]
    pub fn in_scope(mut self, scope: Weak<dyn Context>) -> Self {
        self.scope = Some(scope);
        self
    }

    /// A new interceptor for `scope` sharing this one's resolver, dispatcher
    /// and installed hooks.
    ///
    /// `self` is left unchanged.
    #[must_use]
    pub fn rebound(&self, scope: Rc<dyn Context>) -> Self {
        tracing::debug!("interceptor rebound");
        Self {
            base: self.base.rebind(scope),
            scope: None,
            dispatcher: self.dispatcher.clone(),
            prefixes: self.prefixes,
            hook: RefCell::new(self.hook()),
            parented_hook: RefCell::new(self.parented_hook()),
        }
    }

    /// The resolver colors come from.
    #[must_use]
    pub fn resolver(&self) -> &Rc<dyn ColorResolver> {
        self.dispatcher.resolver()
    }

    /// The dispatcher applied to every built element.
    #[must_use]
    pub fn dispatcher(&self) -> &Rc<AttributeDispatcher> {
        &self.dispatcher
    }

    /// The host pipeline construction is forwarded to.
    #[must_use]
    pub fn base(&self) -> &Rc<dyn Pipeline> {
        &self.base
    }

    /// The implicit prefixes tried for unqualified names.
    #[must_use]
    pub fn prefixes(&self) -> &'static [&'static str] {
        self.prefixes
    }

    fn dispatch(&self, mut element: ElementBox, attrs: &dyn AttributeSet) -> ElementBox {
        self.dispatcher
            .apply_overrides(&mut *element, attrs, &*self.scope());
        element
    }
}

impl Pipeline for Interceptor {
    fn scope(&self) -> Rc<dyn Context> {
        self.scope
            .as_ref()
            .and_then(Weak::upgrade)
            .unwrap_or_else(|| self.base.scope())
    }

    fn create_element(
        &self,
        name: &str,
        prefix: Option<&str>,
        attrs: &dyn AttributeSet,
    ) -> Result<ElementBox, InflateError> {
        let element = self.base.create_element(name, prefix, attrs)?;
        Ok(self.dispatch(element, attrs))
    }

    fn create_default(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        attrs: &dyn AttributeSet,
    ) -> Result<ElementBox, InflateError> {
        for &prefix in self.prefixes {
            match self.base.create_element(name, Some(prefix), attrs) {
                Ok(element) => return Ok(self.dispatch(element, attrs)),
                Err(err) if err.is_unknown_element() => {
                    tracing::trace!(prefix, name, "no element kind under prefix");
                }
                Err(err) => return Err(err),
            }
        }
        let element = self.base.create_default(parent, name, attrs)?;
        Ok(self.dispatch(element, attrs))
    }

    fn hook(&self) -> Option<Hook<dyn CreateHook>> {
        self.hook.borrow().clone()
    }

    fn set_hook(&self, hook: Hook<dyn CreateHook>) {
        *self.hook.borrow_mut() = Some(hook.dispatching(&self.dispatcher));
    }

    fn parented_hook(&self) -> Option<Hook<dyn ParentedCreateHook>> {
        self.parented_hook.borrow().clone()
    }

    fn set_parented_hook(&self, hook: Hook<dyn ParentedCreateHook>) {
        *self.parented_hook.borrow_mut() = Some(hook.dispatching(&self.dispatcher));
    }

    fn rebind(&self, scope: Rc<dyn Context>) -> Rc<dyn Pipeline> {
        Rc::new(self.rebound(scope))
    }
}

impl fmt::Debug for Interceptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interceptor")
            .field("dispatcher", &self.dispatcher)
            .field("prefixes", &self.prefixes)
            .field("hook", &self.hook.borrow())
            .field("parented_hook", &self.parented_hook.borrow())
            .finish_non_exhaustive()
    }
}

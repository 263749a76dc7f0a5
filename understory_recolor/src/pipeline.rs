// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host contracts for context scopes and element construction.
//!
//! A [`Context`] is the ambient scope elements are built in: it resolves theme
//! attributes and hands out the [`Pipeline`] that builds elements for it. The
//! host owns both; [`Interceptor`](crate::Interceptor) is a [`Pipeline`] that
//! sits in front of the host's one.

use alloc::boxed::Box;
use alloc::rc::Rc;

use crate::attrs::AttributeSet;
use crate::catalog::AttrId;
use crate::color::Argb;
use crate::element::Element;
use crate::error::InflateError;
use crate::intercept::Hook;

/// A boxed, host-owned element.
pub type ElementBox = Box<dyn Element>;

/// Fallback prefix used by [`Pipeline::create_default`] when a pipeline does
/// not override it.
pub const BASE_PREFIX: &str = "android.view.";

/// An ambient scope that elements are constructed in.
pub trait Context {
    /// Resolves a theme attribute to a color.
    fn theme_color(&self, attr: AttrId) -> Option<Argb>;

    /// The construction pipeline for this scope.
    fn pipeline(&self) -> Option<Rc<dyn Pipeline>>;
}

/// A host hook consulted before default construction, given only the element
/// name and its attributes.
pub trait CreateHook {
    /// Builds the element, or returns `None` to defer to the next step.
    fn create(&self, name: &str, scope: &dyn Context, attrs: &dyn AttributeSet)
    -> Option<ElementBox>;
}

/// A host hook consulted before default construction that is also told the
/// parent element.
pub trait ParentedCreateHook {
    /// Builds the element, or returns `None` to defer to the next step.
    fn create_with_parent(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        scope: &dyn Context,
        attrs: &dyn AttributeSet,
    ) -> Option<ElementBox>;
}

/// Builds elements from names and declared attributes for one [`Context`].
///
/// Methods take `&self`; implementations keep installed hooks behind interior
/// mutability since pipelines are shared through [`Rc`].
pub trait Pipeline {
    /// The scope this pipeline builds for.
    ///
    /// Hooks and element overrides are handed this scope.
    fn scope(&self) -> Rc<dyn Context>;

    /// Builds the element kind `prefix + name`.
    ///
    /// Returns [`InflateError::UnknownElement`] if no such kind exists.
    fn create_element(
        &self,
        name: &str,
        prefix: Option<&str>,
        attrs: &dyn AttributeSet,
    ) -> Result<ElementBox, InflateError>;

    /// Default resolution for an unqualified name.
    fn create_default(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        attrs: &dyn AttributeSet,
    ) -> Result<ElementBox, InflateError> {
        let _ = parent;
        self.create_element(name, Some(BASE_PREFIX), attrs)
    }

    /// The installed name-only hook.
    fn hook(&self) -> Option<Hook<dyn CreateHook>>;

    /// Installs a name-only hook, replacing any previous one.
    fn set_hook(&self, hook: Hook<dyn CreateHook>);

    /// The installed parent-aware hook.
    fn parented_hook(&self) -> Option<Hook<dyn ParentedCreateHook>>;

    /// Installs a parent-aware hook, replacing any previous one.
    fn set_parented_hook(&self, hook: Hook<dyn ParentedCreateHook>);

    /// A pipeline of the same kind bound to `scope`, keeping installed hooks.
    fn rebind(&self, scope: Rc<dyn Context>) -> Rc<dyn Pipeline>;

    /// Builds one element the way a layout pass does.
    ///
    /// The parent-aware hook is asked first if installed, otherwise the
    /// name-only hook. If no hook produced an element, names containing a `.`
    /// are built directly and other names go through
    /// [`create_default`](Self::create_default).
    fn inflate(
        &self,
        parent: Option<&dyn Element>,
        name: &str,
        attrs: &dyn AttributeSet,
    ) -> Result<ElementBox, InflateError> {
        let scope = self.scope();
        let hooked = if let Some(hook) = self.parented_hook() {
            hook.create_with_parent(parent, name, &*scope, attrs)
        } else if let Some(hook) = self.hook() {
            hook.create(name, &*scope, attrs)
        } else {
            None
        };
        if let Some(element) = hooked {
            return Ok(element);
        }
        if name.contains('.') {
            self.create_element(name, None, attrs)
        } else {
            self.create_default(parent, name, attrs)
        }
    }
}

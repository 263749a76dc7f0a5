// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Recolor: construction-time color overrides for declaratively
//! built UI elements.
//!
//! Layout descriptions name their colors indirectly, as references to
//! symbolic attributes (`textColor="@2130903040"`). This crate sits in front of
//! the host's element construction pipeline and, as each element is built,
//! replaces those references with colors supplied by a host [`ColorResolver`].
//! Swapping the resolver reskins the UI without touching layouts or widgets.
//!
//! The pieces:
//!
//! - **Catalog** ([`AttributeCatalog`]): numeric attribute id to symbolic name,
//!   built once from a registry table.
//! - **Resolver** ([`ColorResolver`], [`Palette`]): symbolic name to
//!   [`Argb`] or [`ColorStateList`].
//! - **Dispatcher** ([`AttributeDispatcher`]): walks the attributes declared on
//!   a new element and applies each supported override with the strategy of
//!   its [`OverrideKind`].
//! - **Interceptor** ([`Interceptor`]): a [`Pipeline`] that forwards to the
//!   host's and dispatches everything it builds, including elements built by
//!   host [`Hook`]s.
//! - **Bridge** ([`RecolorContext`]): wraps a host [`Context`] so its pipeline
//!   is intercepted.
//!
//! Widgets stay host-owned. The crate reaches them only through the
//! [`Element`] capability traits, and picks tint paths for older platforms
//! through [`Capabilities`].
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//! use understory_recolor::{Argb, AttributeCatalog, Context, Palette, RecolorContext};
//! # use understory_recolor::{AttrId, Pipeline};
//! # struct Activity;
//! # impl Context for Activity {
//! #     fn theme_color(&self, _: AttrId) -> Option<Argb> { None }
//! #     fn pipeline(&self) -> Option<Rc<dyn Pipeline>> { None }
//! # }
//! # let activity: Rc<dyn Context> = Rc::new(Activity);
//!
//! // Generated by the build from the app's attribute registry.
//! const ATTRS: &[(&str, i32)] = &[
//!     ("colorPrimary", 0x7f04_00f2),
//!     ("colorOnPrimary", 0x7f04_00f5),
//! ];
//!
//! let night = Palette::new(AttributeCatalog::from_registry(ATTRS))
//!     .with_color("colorPrimary", Argb(0xFF1E_1E2E))
//!     .with_color("colorOnPrimary", Argb(0xFFCD_D6F4));
//!
//! // Everything inflated through `cx` is now recolored by `night`.
//! let cx = RecolorContext::wrap(activity, Rc::new(night));
//! # let _ = cx.pipeline();
//! ```
//!
//! ## Supported overrides
//!
//! See [`OverrideKind`] for the attributes handled and the element capability
//! each one requires. Attribute ids are configured through [`OverrideIds`] in
//! a [`RecolorConfig`].
//!
//! ## Threading
//!
//! Everything here is single-threaded: shared state lives in [`Rc`] and
//! [`core::cell`] types, so none of it is `Send` or `Sync`.
//!
//! ## Features
//!
//! - `std` (default): forwarded to `peniko`.
//! - `libm`: forwarded to `peniko` for `no_std` targets.
//!
//! This crate is `no_std` and uses `alloc`.
//!
//! [`Rc`]: alloc::rc::Rc

#![no_std]

extern crate alloc;

mod attrs;
mod bridge;
mod catalog;
mod color;
mod config;
mod dispatch;
mod element;
mod error;
mod intercept;
mod pipeline;
mod resolver;
mod tint;

#[cfg(test)]
mod test_support;

pub use attrs::{AttributeSet, DeclaredAttributes};
pub use bridge::RecolorContext;
pub use catalog::{AttrId, AttributeCatalog, REFERENCE_SIGILS, parse_attribute_reference};
pub use color::{Argb, ColorStateList, ElementState};
pub use config::{DEFAULT_PREFIXES, RecolorConfig};
pub use dispatch::{AttributeDispatcher, ElementGuard, OverrideIds, OverrideKind, OverrideTable};
pub use element::{
    BarElement, Drawable, Element, ImageElement, ProgressElement, TextElement, TintableBackground,
    ToggleElement,
};
pub use error::InflateError;
pub use intercept::{DispatchingHook, Hook, Interceptor};
pub use pipeline::{
    BASE_PREFIX, Context, CreateHook, ElementBox, ParentedCreateHook, Pipeline,
};
pub use resolver::{ColorResolver, Palette};
pub use tint::{Capabilities, TintAdapter};

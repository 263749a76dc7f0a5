// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declared attribute sets.

use alloc::boxed::Box;

use smallvec::SmallVec;

use crate::catalog::AttrId;

/// The attributes declared on one element in its layout description.
///
/// Implemented by the host's layout parser. Entries are read by index in
/// declaration order; the set is never modified here.
pub trait AttributeSet {
    /// Number of declared attributes.
    fn len(&self) -> usize;

    /// Returns `true` if no attributes were declared.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The attribute id at `index`.
    fn name_id(&self, index: usize) -> Option<AttrId>;

    /// The raw declared value at `index`.
    fn value(&self, index: usize) -> Option<&str>;
}

/// A small owned [`AttributeSet`].
///
/// # Example
///
/// ```rust
/// use understory_recolor::{AttrId, AttributeSet, DeclaredAttributes};
///
/// let attrs = DeclaredAttributes::new()
///     .with(0x0101_0098, "@2130903040")
///     .with(0x0101_00d4, "#FFFFFF");
///
/// assert_eq!(attrs.len(), 2);
/// assert_eq!(attrs.name_id(1), Some(AttrId::new(0x0101_00d4)));
/// assert_eq!(attrs.value(0), Some("@2130903040"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclaredAttributes {
    entries: SmallVec<[(AttrId, Box<str>); 8]>,
}

impl DeclaredAttributes {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a declaration and returns the set.
    #[must_use]
    pub fn with(mut self, id: impl Into<AttrId>, value: &str) -> Self {
        self.push(id, value);
        self
    }

    /// Appends a declaration.
    pub fn push(&mut self, id: impl Into<AttrId>, value: &str) {
        self.entries.push((id.into(), value.into()));
    }

    /// Iterates over `(id, raw value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrId, &str)> + '_ {
        self.entries.iter().map(|(id, value)| (*id, &**value))
    }
}

impl AttributeSet for DeclaredAttributes {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn name_id(&self, index: usize) -> Option<AttrId> {
        self.entries.get(index).map(|(id, _)| *id)
    }

    fn value(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(_, value)| &**value)
    }
}

impl<'a, I: Into<AttrId>> FromIterator<(I, &'a str)> for DeclaredAttributes {
    fn from_iter<T: IntoIterator<Item = (I, &'a str)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (id, value) in iter {
            attrs.push(id, value);
        }
        attrs
    }
}

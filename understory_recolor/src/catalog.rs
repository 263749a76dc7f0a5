// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute identifiers and the id → name catalog.
//!
//! Layout resources refer to color attributes by number. [`AttributeCatalog`]
//! maps those numbers back to the symbolic names a
//! [`ColorResolver`](crate::ColorResolver) understands. The catalog is built
//! once from a table literal, typically generated alongside the resource
//! registry, and is read-only afterwards.

use core::fmt;

use hashbrown::HashMap;

/// A numeric attribute identifier, as assigned by a resource registry.
///
/// # Example
///
/// ```rust
/// use understory_recolor::AttrId;
///
/// let id = AttrId::new(0x0101_0098);
/// assert_eq!(id.get(), 0x0101_0098);
/// assert_eq!(AttrId::from(7), AttrId::new(7));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttrId(i32);

impl AttrId {
    /// Creates an identifier from its raw value.
    #[must_use]
    #[inline]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for AttrId {
    #[inline]
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AttrId").field(&self.0).finish()
    }
}

impl fmt::Display for AttrId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Leading characters that mark a raw attribute value as a reference.
///
/// `@` is a resource reference and `?` a theme attribute reference.
pub const REFERENCE_SIGILS: [char; 2] = ['@', '?'];

/// Extracts the referenced id from a raw declared value such as `"@2130903040"`.
///
/// Returns `None` unless `raw` starts with one of [`REFERENCE_SIGILS`] and the
/// remainder parses as a base-10 `i32`. Literal values (`"#FF0000"`, `"12sp"`)
/// are not references.
///
/// ```rust
/// use understory_recolor::{AttrId, parse_attribute_reference};
///
/// assert_eq!(parse_attribute_reference("@101"), Some(AttrId::new(101)));
/// assert_eq!(parse_attribute_reference("?-5"), Some(AttrId::new(-5)));
/// assert_eq!(parse_attribute_reference("#FF0000"), None);
/// assert_eq!(parse_attribute_reference("@"), None);
/// assert_eq!(parse_attribute_reference("@abc"), None);
/// ```
#[must_use]
pub fn parse_attribute_reference(raw: &str) -> Option<AttrId> {
    let mut chars = raw.chars();
    let sigil = chars.next()?;
    if !REFERENCE_SIGILS.contains(&sigil) {
        return None;
    }
    let rest = chars.as_str();
    if rest.is_empty() {
        return None;
    }
    rest.parse::<i32>().ok().map(AttrId)
}

/// Immutable mapping from attribute id to attribute name.
///
/// # Example
///
/// ```rust
/// use understory_recolor::{AttrId, AttributeCatalog};
///
/// let catalog = AttributeCatalog::from_registry(&[
///     ("buttonTint", 101),
///     ("textColor", 102),
/// ]);
///
/// assert_eq!(catalog.id_to_name(AttrId::new(101)), Some("buttonTint"));
/// assert_eq!(catalog.id_to_name(AttrId::new(999)), None);
/// assert_eq!(catalog.name_for_value("@102"), Some("textColor"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AttributeCatalog {
    names: HashMap<AttrId, &'static str>,
}

impl AttributeCatalog {
    /// Builds a catalog from `(name, id)` pairs.
    #[must_use]
    pub fn from_registry(registry: &[(&'static str, i32)]) -> Self {
        Self::from_entries(registry.iter().map(|&(name, id)| (name, Some(id))))
    }

    /// Builds a catalog from registry entries whose value may be unreadable.
    ///
    /// Entries with a `None` value are skipped. If two names share an id, the
    /// later one wins; that is a defect of the registry and is logged.
    #[must_use]
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Option<i32>)>,
    {
        let mut names = HashMap::new();
        for (name, id) in entries {
            let Some(id) = id else {
                tracing::trace!(name, "skipping unreadable registry entry");
                continue;
            };
            if let Some(previous) = names.insert(AttrId(id), name)
                && previous != name
            {
                tracing::warn!(id, previous, name, "duplicate attribute id in registry");
            }
        }
        Self { names }
    }

    /// Returns the name registered for `id`.
    #[must_use]
    #[inline]
    pub fn id_to_name(&self, id: AttrId) -> Option<&'static str> {
        self.names.get(&id).copied()
    }

    /// Resolves a raw declared value to the name of the attribute it references.
    ///
    /// Combines [`parse_attribute_reference`] and [`id_to_name`](Self::id_to_name).
    #[must_use]
    pub fn name_for_value(&self, raw: &str) -> Option<&'static str> {
        self.id_to_name(parse_attribute_reference(raw)?)
    }

    /// Number of registered ids.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

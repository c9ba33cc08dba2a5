// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping registry: (source, destination) pairs to generated profiles or
//! custom transforms.
//!
//! # Concurrency
//!
//! The table is a copy-on-write snapshot behind `ArcSwap`. Lookups load the
//! current snapshot without locking; registrations are serialized by a
//! mutex, build a new table and publish it atomically. A failed
//! registration publishes nothing.

use crate::dynamic::DynamicValue;
use crate::error::{MappingError, Result};
use crate::profile::Profile;
use arc_swap::ArcSwap;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Type-erased transform over the dynamic value graph.
///
/// Returns `None` when the source value cannot be handled; the destination
/// then keeps its zero value.
pub type DynamicTransform = Arc<dyn Fn(&DynamicValue) -> Option<DynamicValue> + Send + Sync>;

/// Typed transform as registered by `Mapper::create_custom_map`.
pub(crate) type TypedTransform<S, D> = Arc<dyn Fn(&S) -> D + Send + Sync>;

/// Registry key: qualified source and destination type names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MappingKey {
    pub source: String,
    pub destination: String,
}

impl MappingKey {
    /// Create a key from qualified names.
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }

    /// The `(&S, &D)` form of a bare key, or the bare form of a reference key.
    pub fn reference_variant(&self) -> Self {
        Self::new(toggle_reference(&self.source), toggle_reference(&self.destination))
    }
}

fn toggle_reference(name: &str) -> String {
    match name.strip_prefix('&') {
        Some(bare) => bare.to_string(),
        None => format!("&{}", name),
    }
}

impl fmt::Display for MappingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.destination)
    }
}

/// User-supplied transform, kept typed for exact scalar calls and erased
/// for element-wise and nested use.
#[derive(Clone)]
pub struct CustomTransform {
    typed: Option<Arc<dyn Any + Send + Sync>>,
    erased: DynamicTransform,
}

impl CustomTransform {
    pub(crate) fn erased(erased: DynamicTransform) -> Self {
        Self {
            typed: None,
            erased,
        }
    }

    pub(crate) fn typed<S: 'static, D: 'static>(
        typed: TypedTransform<S, D>,
        erased: DynamicTransform,
    ) -> Self {
        Self {
            typed: Some(Arc::new(typed)),
            erased,
        }
    }

    /// Typed closure, if registered for exactly `S -> D`.
    pub(crate) fn typed_for<S: 'static, D: 'static>(&self) -> Option<&TypedTransform<S, D>> {
        self.typed.as_ref()?.downcast_ref::<TypedTransform<S, D>>()
    }

    /// Apply to a dynamic value.
    pub fn apply(&self, value: &DynamicValue) -> Option<DynamicValue> {
        (self.erased)(value)
    }
}

impl fmt::Debug for CustomTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTransform")
            .field("typed", &self.typed.is_some())
            .finish_non_exhaustive()
    }
}

/// A registration. Absence from the registry means unset.
#[derive(Debug, Clone)]
pub enum MappingEntry {
    /// Cached profile, possibly empty.
    Generated(Arc<Profile>),
    /// User transform.
    Custom(CustomTransform),
}

impl MappingEntry {
    /// Check if this is a custom transform.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Profile of a generated entry.
    pub fn profile(&self) -> Option<&Arc<Profile>> {
        match self {
            Self::Generated(profile) => Some(profile),
            Self::Custom(_) => None,
        }
    }
}

/// Immutable view of the registry at one point in time.
pub type RegistrySnapshot = Arc<HashMap<MappingKey, MappingEntry>>;

/// Copy-on-write mapping table.
pub struct MappingRegistry {
    entries: ArcSwap<HashMap<MappingKey, MappingEntry>>,
    write_lock: Mutex<()>,
}

impl Default for MappingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            entries: ArcSwap::from_pointee(HashMap::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> RegistrySnapshot {
        self.entries.load_full()
    }

    /// Look up a single key.
    pub fn get(&self, key: &MappingKey) -> Option<MappingEntry> {
        self.entries.load().get(key).cloned()
    }

    /// Check if a key (or its reference variant) is registered.
    pub fn contains(&self, key: &MappingKey) -> bool {
        let entries = self.entries.load();
        entries.contains_key(key) || entries.contains_key(&key.reference_variant())
    }

    /// Number of keys, reference variants included.
    pub fn len(&self) -> usize {
        self.entries.load().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.load().is_empty()
    }

    /// Register `key` and its reference variant with the same entry.
    ///
    /// `build` runs under the write lock, after the duplicate check, so a
    /// profile is only computed for a pair that will actually be inserted.
    pub fn insert_with<F>(&self, key: MappingKey, build: F) -> Result<()>
    where
        F: FnOnce() -> Result<MappingEntry>,
    {
        let _guard = self.write_lock.lock();
        let current = self.entries.load_full();

        let variant = key.reference_variant();
        if current.contains_key(&key) || current.contains_key(&variant) {
            return Err(MappingError::already_exists(&key.source, &key.destination));
        }

        let entry = build()?;
        let mut next = HashMap::clone(&current);
        next.insert(variant, entry.clone());
        next.insert(key, entry);
        self.entries.store(Arc::new(next));
        Ok(())
    }
}

impl fmt::Debug for MappingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingRegistry")
            .field("entries", &self.len())
            .finish()
    }
}

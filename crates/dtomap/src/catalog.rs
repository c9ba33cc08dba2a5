// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type catalog: name-indexed registry of known struct types.
//!
//! Types register themselves explicitly (usually once at startup) and can
//! then be looked up and instantiated from a name string. Two indices are
//! kept: qualified name, and namespace + short name. Registering `T` also
//! registers its reference variant `&T`.
//!
//! # Example
//!
//! ```rust
//! use dtomap::{Mappable, TypeCatalog};
//!
//! #[derive(Mappable, Default)]
//! #[mapper(namespace = "shop")]
//! pub struct Order { pub id: u64 }
//!
//! let catalog = TypeCatalog::new();
//! catalog.register::<Order>();
//!
//! assert!(catalog.type_by_name("shop::Order").is_some());
//! assert!(catalog.type_by_namespace("shop", "&Order").is_some());
//! let zero = catalog.instance_by_name("shop::Order").unwrap();
//! assert_eq!(zero.get::<u64>("id").unwrap(), 0);
//! ```

use crate::dynamic::{DynamicData, DynamicValue, TypeDescriptor};
use crate::Mappable;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

static GLOBAL_CATALOG: OnceLock<TypeCatalog> = OnceLock::new();

#[derive(Default)]
struct CatalogIndex {
    by_name: HashMap<String, Arc<TypeDescriptor>>,
    by_namespace: HashMap<String, HashMap<String, Arc<TypeDescriptor>>>,
}

impl CatalogIndex {
    fn insert(&mut self, namespace: &str, short_name: String, desc: Arc<TypeDescriptor>) {
        self.by_name.insert(desc.qualified_name(), desc.clone());
        self.by_namespace
            .entry(namespace.to_string())
            .or_default()
            .insert(short_name, desc);
    }
}

/// Registry of struct types indexed by name.
#[derive(Default)]
pub struct TypeCatalog {
    index: RwLock<CatalogIndex>,
}

impl TypeCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide catalog.
    pub fn global() -> &'static TypeCatalog {
        GLOBAL_CATALOG.get_or_init(TypeCatalog::new)
    }

    /// Register `T` and `&T`.
    pub fn register<T: Mappable>(&self) {
        self.register_descriptor(T::type_descriptor());
    }

    /// Register a runtime-built descriptor and its reference variant.
    ///
    /// Re-registering a name replaces the previous descriptor.
    pub fn register_descriptor(&self, desc: Arc<TypeDescriptor>) {
        let reference = Arc::new(TypeDescriptor::reference(desc.clone()));
        let namespace = desc.name.namespace.clone();
        let short = desc.name.name.clone();

        let mut index = self.index.write();
        index.insert(&namespace, format!("&{}", short), reference);
        index.insert(&namespace, short, desc.clone());
        drop(index);

        log::debug!("[catalog] registered {}", desc.name);
    }

    /// Look up a type by qualified name (`namespace::Name` or `&namespace::Name`).
    pub fn type_by_name(&self, qualified_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.index.read().by_name.get(qualified_name).cloned()
    }

    /// Look up a type by namespace and short name (`Name` or `&Name`).
    pub fn type_by_namespace(&self, namespace: &str, name: &str) -> Option<Arc<TypeDescriptor>> {
        self.index
            .read()
            .by_namespace
            .get(namespace)
            .and_then(|types| types.get(name))
            .cloned()
    }

    /// Zero-initialized instance of a type by qualified name.
    pub fn instance_by_name(&self, qualified_name: &str) -> Option<DynamicData> {
        self.type_by_name(qualified_name).map(|desc| instantiate(&desc))
    }

    /// Zero-initialized instance of a type by namespace and short name.
    pub fn instance_by_namespace(&self, namespace: &str, name: &str) -> Option<DynamicData> {
        self.type_by_namespace(namespace, name)
            .map(|desc| instantiate(&desc))
    }

    /// Zero instance converted to `T`.
    ///
    /// Falls back to `T::default()` when the name is unknown or resolves to
    /// a type other than `T`.
    pub fn typed_instance_by_name<T: Mappable + Default>(&self, qualified_name: &str) -> T {
        self.instance_by_name(qualified_name)
            .filter(|data| data.descriptor().name == T::type_name())
            .and_then(|data| data.to_typed::<T>().ok())
            .unwrap_or_default()
    }

    /// Check if a qualified name is registered.
    pub fn contains(&self, qualified_name: &str) -> bool {
        self.index.read().by_name.contains_key(qualified_name)
    }

    /// Number of registered names, reference variants included.
    pub fn len(&self) -> usize {
        self.index.read().by_name.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.index.read().by_name.is_empty()
    }

    /// Registered qualified names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.index.read().by_name.keys().cloned().collect();
        names.sort();
        names
    }
}

/// Reference types yield a populated reference to a zero target.
fn instantiate(desc: &Arc<TypeDescriptor>) -> DynamicData {
    let value = match desc.target_type() {
        Some(target) => DynamicValue::Ref(Box::new(DynamicValue::zero(&target))),
        None => DynamicValue::zero(desc),
    };
    DynamicData::from_value(desc, value)
}

impl std::fmt::Debug for TypeCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCatalog")
            .field("types", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::{PrimitiveKind, TypeDescriptorBuilder};

    fn user_type() -> Arc<TypeDescriptor> {
        Arc::new(
            TypeDescriptorBuilder::new("app::model", "User")
                .string_field("name")
                .field("age", PrimitiveKind::U32)
                .build(),
        )
    }

    #[test]
    fn test_register_indexes_both_variants() {
        let catalog = TypeCatalog::new();
        assert!(catalog.is_empty());
        catalog.register_descriptor(user_type());

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("app::model::User"));
        assert!(catalog.contains("&app::model::User"));
        assert_eq!(
            catalog.names(),
            vec!["&app::model::User".to_string(), "app::model::User".to_string()]
        );
        assert!(catalog.type_by_namespace("app::model", "User").is_some());
        assert!(catalog.type_by_namespace("app::model", "&User").is_some());
        assert!(catalog.type_by_namespace("app", "User").is_none());
    }

    #[test]
    fn test_unknown_name() {
        let catalog = TypeCatalog::new();
        assert!(catalog.type_by_name("nope::Missing").is_none());
        assert!(catalog.instance_by_name("nope::Missing").is_none());
        assert_eq!(catalog.typed_instance_by_name::<u32>("nope::Missing"), 0);
    }

    #[test]
    fn test_instance_zero_value() {
        let catalog = TypeCatalog::new();
        catalog.register_descriptor(user_type());

        let data = catalog.instance_by_name("app::model::User").expect("instance");
        assert_eq!(data.get::<String>("name"), Ok(String::new()));
        assert_eq!(data.get::<u32>("age"), Ok(0));
    }

    #[test]
    fn test_reference_instance_is_populated() {
        let catalog = TypeCatalog::new();
        catalog.register_descriptor(user_type());

        let data = catalog
            .instance_by_namespace("app::model", "&User")
            .expect("instance");
        let target = data.value().as_ref_target().expect("populated reference");
        assert_eq!(target.get_field("age"), Some(&DynamicValue::U32(0)));
    }
}

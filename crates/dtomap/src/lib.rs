// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # dtomap - Object-to-object mapping
//!
//! Copies data between structurally similar types (persistence models,
//! domain models, transport DTOs) by matching fields by name, case
//! convention or alias, or through a registered transform.
//!
//! ## Quick Start
//!
//! ```rust
//! use dtomap::{Mappable, Mapper, Result};
//!
//! #[derive(Mappable, Default)]
//! pub struct Account {
//!     pub id: u64,
//!     pub owner: String,
//!     secret: String,
//! }
//!
//! #[derive(Mappable, Default, Debug, PartialEq)]
//! pub struct AccountDto {
//!     #[mapper(alias = "id")]
//!     pub identifier: u64,
//!     pub owner: String,
//! }
//!
//! fn main() -> Result<()> {
//!     let mapper = Mapper::new();
//!     mapper.create_map::<Account, AccountDto>()?;
//!
//!     let account = Account { id: 7, owner: "ada".into(), secret: "x".into() };
//!     let dto: AccountDto = mapper.map(&account)?;
//!     assert_eq!(dto, AccountDto { identifier: 7, owner: "ada".into() });
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +----------------------------------------------------------+
//! |  Mapper: create_map / create_custom_map / map / configure |
//! +----------------------------------------------------------+
//! |  MappingRegistry (ArcSwap snapshot)  |  Profile builder   |
//! +----------------------------------------------------------+
//! |  TransferEngine  ->  access shim  ->  DynamicValue graph  |
//! +----------------------------------------------------------+
//! |  Mappable / TypeDescriptor / TypeCatalog                  |
//! +----------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`dynamic`] - Type descriptors and the dynamic value graph
//! - [`catalog`] - Name-indexed type catalog
//! - [`pagination`] - Paginated results mapped through a `Mapper`
//!
//! ## Global facade
//!
//! The free functions ([`create_map`], [`map`], [`configure`],
//! [`register_type`], ...) operate on a process-wide [`Mapper`] and
//! [`TypeCatalog`]. Use explicit instances where isolation matters.

// Allow the derive macro to work inside this crate's tests
extern crate self as dtomap;

mod access;
/// Name-indexed type catalog.
pub mod catalog;
/// Mapper configuration.
pub mod config;
/// Runtime type descriptors and dynamic values.
pub mod dynamic;
mod engine;
mod error;
mod mapper;
/// Paginated result sets.
pub mod pagination;
/// Profile building.
pub mod profile;
mod reflect;
/// Mapping registry.
pub mod registry;

pub use catalog::TypeCatalog;
pub use config::MapperConfig;
pub use dtomap_codegen::Mappable;
pub use error::{MappingError, Result};
pub use mapper::Mapper;
pub use profile::{Correspondence, MemberSource, Profile};
pub use reflect::{type_name_of, Mappable};
pub use registry::{DynamicTransform, MappingKey};

#[doc(hidden)]
pub mod __private {
    pub use crate::reflect::method_return_type;
}

use dynamic::{DynamicData, TypeDescriptor};
use std::sync::Arc;

/// Register a generated mapping on the global mapper.
pub fn create_map<S: Mappable, D: Mappable>() -> Result<()> {
    Mapper::global().create_map::<S, D>()
}

/// Register a custom transform on the global mapper.
pub fn create_custom_map<S, D, F>(transform: F) -> Result<()>
where
    S: Mappable + 'static,
    D: Mappable + 'static,
    F: Fn(&S) -> D + Send + Sync + 'static,
{
    Mapper::global().create_custom_map(transform)
}

/// Map with the global mapper.
pub fn map<S, D>(src: &S) -> Result<D>
where
    S: Mappable + 'static,
    D: Mappable + 'static,
{
    Mapper::global().map(src)
}

/// Replace the global mapper's config.
pub fn configure(config: MapperConfig) {
    Mapper::global().configure(config);
}

/// Register `T` in the global catalog.
pub fn register_type<T: Mappable>() {
    TypeCatalog::global().register::<T>();
}

/// Look up a type in the global catalog.
pub fn type_by_name(qualified_name: &str) -> Option<Arc<TypeDescriptor>> {
    TypeCatalog::global().type_by_name(qualified_name)
}

/// Look up a type in the global catalog by namespace and short name.
pub fn type_by_namespace(namespace: &str, name: &str) -> Option<Arc<TypeDescriptor>> {
    TypeCatalog::global().type_by_namespace(namespace, name)
}

/// Zero instance of a globally registered type.
pub fn instance_by_name(qualified_name: &str) -> Option<DynamicData> {
    TypeCatalog::global().instance_by_name(qualified_name)
}

/// Zero instance of a globally registered type, by namespace and short name.
pub fn instance_by_namespace(namespace: &str, name: &str) -> Option<DynamicData> {
    TypeCatalog::global().instance_by_namespace(namespace, name)
}

/// Zero instance of a globally registered type as `T`, or `T::default()`.
pub fn typed_instance_by_name<T: Mappable + Default>(qualified_name: &str) -> T {
    TypeCatalog::global().typed_instance_by_name(qualified_name)
}

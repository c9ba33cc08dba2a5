// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapper: registration front-end and mapping entry point.
//!
//! # Example
//!
//! ```rust
//! use dtomap::{Mappable, Mapper};
//!
//! #[derive(Mappable, Default)]
//! pub struct UserRow {
//!     pub name: String,
//!     pub age: u32,
//!     pub password_hash: String,
//! }
//!
//! #[derive(Mappable, Default, Debug, PartialEq)]
//! pub struct UserDto {
//!     pub name: String,
//!     pub age: u32,
//! }
//!
//! let mapper = Mapper::new();
//! mapper.create_map::<UserRow, UserDto>().unwrap();
//!
//! let row = UserRow { name: "ada".into(), age: 36, password_hash: "x".into() };
//! let dto: UserDto = mapper.map(&row).unwrap();
//! assert_eq!(dto, UserDto { name: "ada".into(), age: 36 });
//!
//! let dtos: Vec<UserDto> = mapper.map(&vec![row]).unwrap();
//! assert_eq!(dtos.len(), 1);
//! ```

use crate::config::MapperConfig;
use crate::dynamic::{DynamicData, DynamicValue, TypeDescriptor};
use crate::engine::TransferEngine;
use crate::error::{MappingError, Result};
use crate::profile::build_profile;
use crate::registry::{
    CustomTransform, DynamicTransform, MappingEntry, MappingKey, MappingRegistry,
    RegistrySnapshot, TypedTransform,
};
use crate::Mappable;
use arc_swap::ArcSwap;
use std::sync::{Arc, OnceLock};

static GLOBAL_MAPPER: OnceLock<Mapper> = OnceLock::new();

/// Object-to-object mapper.
///
/// Registration (`create_map`, `create_custom_map`) is serialized
/// internally and may run concurrently with `map`; every `map` call sees
/// one consistent registry snapshot and one config.
pub struct Mapper {
    registry: MappingRegistry,
    config: ArcSwap<MapperConfig>,
}

impl Default for Mapper {
    fn default() -> Self {
        Self::new()
    }
}

impl Mapper {
    /// Create a mapper with default config.
    pub fn new() -> Self {
        Self::with_config(MapperConfig::default())
    }

    /// Create a mapper with the given config.
    pub fn with_config(config: MapperConfig) -> Self {
        Self {
            registry: MappingRegistry::new(),
            config: ArcSwap::from_pointee(config),
        }
    }

    /// Process-wide mapper, configured from the environment on first use.
    pub fn global() -> &'static Mapper {
        GLOBAL_MAPPER.get_or_init(|| Mapper::with_config(MapperConfig::from_env()))
    }

    /// Replace the config. In-flight mappings finish with the config they loaded.
    pub fn configure(&self, config: MapperConfig) {
        log::debug!(
            "[mapper] configure: map_unexported_fields={} max_depth={}",
            config.map_unexported_fields,
            config.max_depth
        );
        self.config.store(Arc::new(config));
    }

    /// Current config.
    pub fn config(&self) -> MapperConfig {
        **self.config.load()
    }

    /// Underlying registry.
    pub fn registry(&self) -> &MappingRegistry {
        &self.registry
    }

    /// Register a generated mapping from `S` to `D`.
    ///
    /// Both types must be structs, or references to structs. The pair and
    /// its reference variant are registered together.
    pub fn create_map<S: Mappable, D: Mappable>(&self) -> Result<()> {
        self.create_map_dynamic(&S::type_descriptor(), &D::type_descriptor())
    }

    /// Register a generated mapping between two descriptors.
    pub fn create_map_dynamic(
        &self,
        source: &Arc<TypeDescriptor>,
        destination: &Arc<TypeDescriptor>,
    ) -> Result<()> {
        let (src, dst) = struct_pair(source, destination)?;
        let key = MappingKey::new(src.qualified_name(), dst.qualified_name());

        self.registry.insert_with(key, || {
            build_profile(&src, &dst).map(|profile| MappingEntry::Generated(Arc::new(profile)))
        })?;

        log::debug!("[mapper] registered generated map {} -> {}", src.name, dst.name);
        Ok(())
    }

    /// Register a custom transform from `S` to `D`.
    ///
    /// `map::<S, D>` returns exactly `transform(src)`; sequences of `S` are
    /// mapped element-wise, and nested `S` fields inside other mapped structs
    /// go through the transform too.
    pub fn create_custom_map<S, D, F>(&self, transform: F) -> Result<()>
    where
        S: Mappable + 'static,
        D: Mappable + 'static,
        F: Fn(&S) -> D + Send + Sync + 'static,
    {
        let typed: TypedTransform<S, D> = Arc::new(transform);
        let erased = erase::<S, D>(typed.clone());
        self.register_custom(
            &S::type_descriptor(),
            &D::type_descriptor(),
            CustomTransform::typed(typed, erased),
        )
    }

    /// Register a custom transform between two descriptors.
    ///
    /// Fails with `NilTransform` when `transform` is `None`.
    pub fn create_custom_map_dynamic(
        &self,
        source: &Arc<TypeDescriptor>,
        destination: &Arc<TypeDescriptor>,
        transform: Option<DynamicTransform>,
    ) -> Result<()> {
        let Some(transform) = transform else {
            return Err(MappingError::nil_transform(
                &source.qualified_name(),
                &destination.qualified_name(),
            ));
        };
        self.register_custom(source, destination, CustomTransform::erased(transform))
    }

    fn register_custom(
        &self,
        source: &Arc<TypeDescriptor>,
        destination: &Arc<TypeDescriptor>,
        custom: CustomTransform,
    ) -> Result<()> {
        let (src, dst) = struct_pair(source, destination)?;
        let key = MappingKey::new(src.qualified_name(), dst.qualified_name());

        self.registry
            .insert_with(key, || Ok(MappingEntry::Custom(custom)))?;

        log::debug!("[mapper] registered custom map {} -> {}", src.name, dst.name);
        Ok(())
    }

    /// Map `src` into a new `D`.
    ///
    /// Sequences are mapped through the registration of their element
    /// types. Fails with `MappingNotFound` if the pair is not registered.
    pub fn map<S, D>(&self, src: &S) -> Result<D>
    where
        S: Mappable + 'static,
        D: Mappable + 'static,
    {
        let src_ty = S::type_descriptor();
        let dst_ty = D::type_descriptor();
        let snapshot = self.registry.snapshot();

        let (key, elementwise) = resolve_key(&src_ty, &dst_ty)?;
        let entry = snapshot
            .get(&key)
            .ok_or_else(|| MappingError::not_found(&key.source, &key.destination))?;

        if let MappingEntry::Custom(custom) = entry {
            if !elementwise {
                if let Some(transform) = custom.typed_for::<S, D>() {
                    return Ok(transform(src));
                }
            }
        }

        let value = self.run(snapshot.clone(), &src.to_dynamic(), &src_ty, &dst_ty);
        D::from_dynamic(&value).map_err(|cause| MappingError::ValueConversion {
            destination_type: dst_ty.qualified_name(),
            cause,
        })
    }

    /// Map a self-describing value into a new value of `destination`.
    pub fn map_dynamic(
        &self,
        src: &DynamicData,
        destination: &Arc<TypeDescriptor>,
    ) -> Result<DynamicData> {
        let snapshot = self.registry.snapshot();
        let (key, _) = resolve_key(src.descriptor(), destination)?;
        if !snapshot.contains_key(&key) {
            return Err(MappingError::not_found(&key.source, &key.destination));
        }

        let value = self.run(snapshot, src.value(), src.descriptor(), destination);
        Ok(DynamicData::from_value(destination, value))
    }

    fn run(
        &self,
        snapshot: RegistrySnapshot,
        src: &DynamicValue,
        src_ty: &Arc<TypeDescriptor>,
        dst_ty: &Arc<TypeDescriptor>,
    ) -> DynamicValue {
        let engine = TransferEngine::new(snapshot, self.config());
        let mut dst = DynamicValue::zero(dst_ty);
        engine.transfer(src, src_ty, &mut dst, dst_ty, 0);
        dst
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mapper")
            .field("registry", &self.registry)
            .field("config", &self.config())
            .finish()
    }
}

/// Unwrap one reference level on each side and require structs.
fn struct_pair(
    source: &Arc<TypeDescriptor>,
    destination: &Arc<TypeDescriptor>,
) -> Result<(Arc<TypeDescriptor>, Arc<TypeDescriptor>)> {
    let src = source.target_type().unwrap_or_else(|| source.clone());
    let dst = destination.target_type().unwrap_or_else(|| destination.clone());
    if !src.is_struct() || !dst.is_struct() {
        return Err(MappingError::unsupported(
            &source.qualified_name(),
            &destination.qualified_name(),
        ));
    }
    Ok((src, dst))
}

/// Registry key for a top-level mapping, and whether it is element-wise.
fn resolve_key(
    source: &Arc<TypeDescriptor>,
    destination: &Arc<TypeDescriptor>,
) -> Result<(MappingKey, bool)> {
    match (source.element_type(), destination.element_type()) {
        (Some(src), Some(dst)) => Ok((
            MappingKey::new(src.qualified_name(), dst.qualified_name()),
            true,
        )),
        (None, None) => Ok((
            MappingKey::new(source.qualified_name(), destination.qualified_name()),
            false,
        )),
        _ => Err(MappingError::unsupported(
            &source.qualified_name(),
            &destination.qualified_name(),
        )),
    }
}

/// Erased form of a typed transform.
///
/// The engine applies it to bare struct values, so a reference-shaped `D`
/// is unwrapped and a `None` result leaves the destination at zero.
fn erase<S, D>(typed: TypedTransform<S, D>) -> DynamicTransform
where
    S: Mappable + 'static,
    D: Mappable + 'static,
{
    let unwrap_reference = D::type_descriptor().is_reference();
    Arc::new(move |value: &DynamicValue| {
        let src = S::from_dynamic(value).ok()?;
        match typed(&src).to_dynamic() {
            DynamicValue::Ref(inner) if unwrap_reference => Some(*inner),
            DynamicValue::Null if unwrap_reference => None,
            out => Some(out),
        }
    })
}

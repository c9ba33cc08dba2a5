// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Profile builder: field correspondence between two struct types.
//!
//! For each source field (name `S`, alias tag `T`), in declaration order,
//! the first destination field matching one of these rules wins:
//!
//! 1. named UpperCamel(`S`)
//! 2. named `S`
//! 3. aliased `S`
//! 4. named `T`
//! 5. aliased `T`
//!
//! Unmatched source fields are dropped. Declared source getters whose name
//! equals a destination field name are appended afterwards. Correspondences
//! are applied in order, so a getter overrides a field targeting the same
//! destination.

use crate::dynamic::{FieldDescriptor, StructDescriptor, TypeDescriptor, TypeName};
use crate::error::{MappingError, Result};
use convert_case::{Case, Casing};

/// Where the source value of a correspondence comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSource {
    /// Read a field.
    Field,
    /// Invoke a zero-argument getter.
    Method,
}

/// One source member feeding one destination field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    pub source: String,
    pub destination: String,
    pub via: MemberSource,
}

impl Correspondence {
    /// Field-to-field correspondence.
    pub fn field(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
            via: MemberSource::Field,
        }
    }

    /// Getter-to-field correspondence.
    pub fn method(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            destination: name,
            via: MemberSource::Method,
        }
    }
}

/// Cached correspondence list for a (source, destination) struct pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub source: TypeName,
    pub destination: TypeName,
    pub correspondences: Vec<Correspondence>,
}

impl Profile {
    /// Check if no member corresponds.
    pub fn is_empty(&self) -> bool {
        self.correspondences.is_empty()
    }

    /// Number of correspondences.
    pub fn len(&self) -> usize {
        self.correspondences.len()
    }

    /// Correspondence targeting a destination field.
    pub fn for_destination(&self, destination: &str) -> Option<&Correspondence> {
        self.correspondences
            .iter()
            .find(|c| c.destination == destination)
    }
}

/// Build the profile for two struct descriptors.
///
/// Callers validate that both sides are structs; a non-struct here is a
/// programming error.
pub fn build_profile(source: &TypeDescriptor, destination: &TypeDescriptor) -> Result<Profile> {
    let src = struct_layout(source)?;
    let dst = struct_layout(destination)?;

    let mut correspondences: Vec<Correspondence> = src
        .fields
        .iter()
        .filter_map(|field| {
            match_destination(field, dst)
                .map(|target| Correspondence::field(&field.name, &target.name))
        })
        .collect();

    correspondences.extend(
        src.methods
            .iter()
            .filter(|method| dst.field(&method.name).is_some())
            .map(|method| Correspondence::method(&method.name)),
    );

    log::debug!(
        "[profile] {} -> {}: {} correspondence(s)",
        source.name,
        destination.name,
        correspondences.len()
    );

    Ok(Profile {
        source: source.name.clone(),
        destination: destination.name.clone(),
        correspondences,
    })
}

fn struct_layout(desc: &TypeDescriptor) -> Result<&StructDescriptor> {
    let layout = desc.as_struct();
    debug_assert!(
        layout.is_some(),
        "profile requested for non-struct type {}",
        desc.name
    );
    layout.ok_or_else(|| MappingError::InvalidStructuralType(desc.qualified_name()))
}

fn match_destination<'a>(
    field: &FieldDescriptor,
    dst: &'a StructDescriptor,
) -> Option<&'a FieldDescriptor> {
    let name = field.name.as_str();
    dst.field(&name.to_case(Case::Pascal))
        .or_else(|| dst.field(name))
        .or_else(|| dst.field_by_alias(name))
        .or_else(|| {
            let alias = field.alias.as_deref()?;
            dst.field(alias).or_else(|| dst.field_by_alias(alias))
        })
}

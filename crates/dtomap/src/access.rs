// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Member access shim.
//!
//! Reads source members and opens destination slots while honoring field
//! visibility. With `map_unexported_fields` set, private fields are read and
//! written directly. Otherwise a private source field is only reachable
//! through a declared getter named after it (exact name, then UpperCamel),
//! and private destination fields are left untouched.

use crate::config::MapperConfig;
use crate::dynamic::{DynamicValue, FieldDescriptor, StructDescriptor, TypeDescriptor};
use crate::profile::{Correspondence, MemberSource};
use convert_case::{Case, Casing};
use std::borrow::Cow;
use std::sync::Arc;

/// A source member value and its declared type.
pub(crate) struct SourceMember<'a> {
    pub value: Cow<'a, DynamicValue>,
    pub type_desc: Arc<TypeDescriptor>,
}

/// Read the source side of a correspondence from a struct value.
pub(crate) fn read_source<'a>(
    layout: &StructDescriptor,
    value: &'a DynamicValue,
    corr: &Correspondence,
    config: &MapperConfig,
) -> Option<SourceMember<'a>> {
    match corr.via {
        MemberSource::Method => invoke_getter(layout, value, &corr.source),
        MemberSource::Field => {
            let field = layout.field(&corr.source)?;
            if field.is_public() || config.map_unexported_fields {
                let member = value.get_field(&field.name)?;
                return Some(SourceMember {
                    value: Cow::Borrowed(member),
                    type_desc: field.type_desc(),
                });
            }
            getter_fallback(layout, value, field)
        }
    }
}

fn getter_fallback<'a>(
    layout: &StructDescriptor,
    value: &'a DynamicValue,
    field: &FieldDescriptor,
) -> Option<SourceMember<'a>> {
    let member = invoke_getter(layout, value, &field.name)
        .or_else(|| invoke_getter(layout, value, &field.name.to_case(Case::Pascal)));
    if member.is_none() {
        log::trace!(
            "[access] private field '{}' has no getter, skipped",
            field.name
        );
    }
    member
}

fn invoke_getter<'a>(
    layout: &StructDescriptor,
    value: &'a DynamicValue,
    name: &str,
) -> Option<SourceMember<'a>> {
    let method = layout.method(name)?;
    let result = method.invoke(value)?;
    Some(SourceMember {
        value: Cow::Owned(result),
        type_desc: method.returns.resolve(),
    })
}

/// Mutable slot for a destination field, created at its zero value if absent.
///
/// Returns `None` when the field is private and the config forbids writing it.
pub(crate) fn destination_slot<'a>(
    value: &'a mut DynamicValue,
    field: &FieldDescriptor,
    config: &MapperConfig,
) -> Option<&'a mut DynamicValue> {
    if !field.is_public() && !config.map_unexported_fields {
        log::trace!("[access] private destination field '{}' skipped", field.name);
        return None;
    }
    match value {
        DynamicValue::Struct(fields) => Some(
            fields
                .entry(field.name.clone())
                .or_insert_with(|| DynamicValue::zero(&field.type_desc())),
        ),
        _ => None,
    }
}

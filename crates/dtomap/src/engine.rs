// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value transfer engine.
//!
//! Recursively copies a source value into a destination slot, dispatching
//! on structural kind. Transfer is best-effort: kind mismatches, missing
//! members, lossy scalar conversions and the depth limit all leave the
//! destination untouched instead of failing.

use crate::access::{destination_slot, read_source};
use crate::config::MapperConfig;
use crate::dynamic::{DynamicData, DynamicValue, StructuralKind, TypeDescriptor, TypeKind};
use crate::profile::Profile;
use crate::registry::{MappingEntry, MappingKey, RegistrySnapshot};
use std::sync::Arc;

/// One mapping call's view of the registry and config.
pub(crate) struct TransferEngine {
    snapshot: RegistrySnapshot,
    config: MapperConfig,
}

impl TransferEngine {
    pub(crate) fn new(snapshot: RegistrySnapshot, config: MapperConfig) -> Self {
        Self { snapshot, config }
    }

    /// Copy `src` (of type `src_ty`) into `dst` (of type `dst_ty`).
    pub(crate) fn transfer(
        &self,
        src: &DynamicValue,
        src_ty: &Arc<TypeDescriptor>,
        dst: &mut DynamicValue,
        dst_ty: &Arc<TypeDescriptor>,
        depth: usize,
    ) {
        if depth > self.config.max_depth {
            log::warn!(
                "[engine] depth limit {} reached at {} -> {}, stopping",
                self.config.max_depth,
                src_ty.name,
                dst_ty.name
            );
            return;
        }

        // Self-describing values carry their real type.
        if let DynamicValue::Dynamic(data) = src {
            return self.transfer(data.value(), data.descriptor(), dst, dst_ty, depth);
        }
        if let DynamicValue::Dynamic(data) = dst {
            let inner_ty = data.descriptor().clone();
            return self.transfer(src, src_ty, data.value_mut(), &inner_ty, depth);
        }
        if matches!(dst_ty.kind, TypeKind::Dynamic) {
            *dst = DynamicValue::Dynamic(Box::new(DynamicData::from_value(src_ty, src.clone())));
            return;
        }

        let src_kind = src_ty.structural_kind();
        let dst_kind = dst_ty.structural_kind();
        if src_kind != dst_kind || src_kind == StructuralKind::Dynamic {
            log::trace!(
                "[engine] kind mismatch {} ({}) -> {} ({}), skipped",
                src_ty.name,
                src_kind,
                dst_ty.name,
                dst_kind
            );
            return;
        }
        if src.is_null() && src_kind != StructuralKind::Reference {
            return;
        }

        match src_kind {
            StructuralKind::Struct => self.transfer_struct(src, src_ty, dst, dst_ty, depth),
            StructuralKind::Sequence => self.transfer_sequence(src, src_ty, dst, dst_ty, depth),
            StructuralKind::Associative => self.transfer_map(src, src_ty, dst, dst_ty, depth),
            StructuralKind::Reference => self.transfer_reference(src, src_ty, dst, dst_ty, depth),
            StructuralKind::Scalar => transfer_scalar(src, dst, dst_ty),
            StructuralKind::Dynamic => {}
        }
    }

    fn transfer_struct(
        &self,
        src: &DynamicValue,
        src_ty: &Arc<TypeDescriptor>,
        dst: &mut DynamicValue,
        dst_ty: &Arc<TypeDescriptor>,
        depth: usize,
    ) {
        let key = MappingKey::new(src_ty.qualified_name(), dst_ty.qualified_name());
        match self.snapshot.get(&key) {
            Some(MappingEntry::Generated(profile)) => {
                self.apply_profile(profile, src, src_ty, dst, dst_ty, depth);
            }
            Some(MappingEntry::Custom(custom)) => match custom.apply(src) {
                Some(value) => *dst = value,
                None => log::trace!("[engine] custom transform {} declined value", key),
            },
            None if src_ty.name == dst_ty.name => *dst = src.clone(),
            None => log::trace!("[engine] no mapping registered for {}, skipped", key),
        }
    }

    fn apply_profile(
        &self,
        profile: &Profile,
        src: &DynamicValue,
        src_ty: &TypeDescriptor,
        dst: &mut DynamicValue,
        dst_ty: &TypeDescriptor,
        depth: usize,
    ) {
        let (Some(src_layout), Some(dst_layout)) = (src_ty.as_struct(), dst_ty.as_struct()) else {
            return;
        };

        for corr in &profile.correspondences {
            let Some(member) = read_source(src_layout, src, corr, &self.config) else {
                continue;
            };
            let Some(field) = dst_layout.field(&corr.destination) else {
                continue;
            };
            let field_ty = field.type_desc();
            if let Some(slot) = destination_slot(dst, field, &self.config) {
                self.transfer(&member.value, &member.type_desc, slot, &field_ty, depth + 1);
            }
        }
    }

    fn transfer_sequence(
        &self,
        src: &DynamicValue,
        src_ty: &TypeDescriptor,
        dst: &mut DynamicValue,
        dst_ty: &TypeDescriptor,
        depth: usize,
    ) {
        let (Some(items), Some(src_elem), Some(dst_elem)) =
            (src.as_sequence(), src_ty.element_type(), dst_ty.element_type())
        else {
            return;
        };

        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let mut slot = DynamicValue::zero(&dst_elem);
            self.transfer(item, &src_elem, &mut slot, &dst_elem, depth + 1);
            out.push(slot);
        }
        *dst = DynamicValue::Sequence(out);
    }

    fn transfer_map(
        &self,
        src: &DynamicValue,
        src_ty: &TypeDescriptor,
        dst: &mut DynamicValue,
        dst_ty: &TypeDescriptor,
        depth: usize,
    ) {
        let (Some(entries), TypeKind::Map(src_map), TypeKind::Map(dst_map)) =
            (src.as_map(), &src_ty.kind, &dst_ty.kind)
        else {
            return;
        };
        let (src_key, src_val) = (src_map.key_type.resolve(), src_map.value_type.resolve());
        let (dst_key, dst_val) = (dst_map.key_type.resolve(), dst_map.value_type.resolve());

        let mut out = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let mut key_slot = DynamicValue::zero(&dst_key);
            let mut value_slot = DynamicValue::zero(&dst_val);
            self.transfer(key, &src_key, &mut key_slot, &dst_key, depth + 1);
            self.transfer(value, &src_val, &mut value_slot, &dst_val, depth + 1);
            out.push((key_slot, value_slot));
        }
        *dst = DynamicValue::Map(out);
    }

    fn transfer_reference(
        &self,
        src: &DynamicValue,
        src_ty: &TypeDescriptor,
        dst: &mut DynamicValue,
        dst_ty: &TypeDescriptor,
        depth: usize,
    ) {
        let (Some(src_target), Some(dst_target)) = (src_ty.target_type(), dst_ty.target_type())
        else {
            return;
        };

        match src {
            DynamicValue::Null => *dst = DynamicValue::Null,
            DynamicValue::Ref(inner) => {
                let mut target = DynamicValue::zero(&dst_target);
                self.transfer(inner, &src_target, &mut target, &dst_target, depth + 1);
                *dst = DynamicValue::Ref(Box::new(target));
            }
            _ => {}
        }
    }
}

fn transfer_scalar(src: &DynamicValue, dst: &mut DynamicValue, dst_ty: &TypeDescriptor) {
    let TypeKind::Primitive(target) = dst_ty.kind else {
        return;
    };
    match src.coerce(target) {
        Some(value) => *dst = value,
        None => log::trace!(
            "[engine] cannot convert {:?} to {} without loss, skipped",
            src.primitive_kind(),
            target.type_name()
        ),
    }
}

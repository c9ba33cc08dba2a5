// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic value types.

use crate::dynamic::{DynamicData, PrimitiveKind, TypeDescriptor, TypeKind};
use std::collections::BTreeMap;

/// A dynamic value that can hold any mappable type.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Primitives
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Char(char),
    String(String),

    // Composites
    Struct(BTreeMap<String, DynamicValue>),
    Sequence(Vec<DynamicValue>),
    /// Associative container entries in iteration order.
    Map(Vec<(DynamicValue, DynamicValue)>),
    /// Populated reference.
    Ref(Box<DynamicValue>),
    /// Self-describing value.
    Dynamic(Box<DynamicData>),

    // Special
    Null,
}

impl DynamicValue {
    /// Zero value of a type: default primitives, structs with zeroed
    /// fields, empty containers and null references.
    pub fn zero(desc: &TypeDescriptor) -> Self {
        match &desc.kind {
            TypeKind::Primitive(kind) => Self::zero_primitive(*kind),
            TypeKind::Struct(s) => Self::Struct(
                s.fields
                    .iter()
                    .map(|f| (f.name.clone(), Self::zero(&f.type_desc())))
                    .collect(),
            ),
            TypeKind::Sequence(_) => Self::Sequence(Vec::new()),
            TypeKind::Map(_) => Self::Map(Vec::new()),
            TypeKind::Reference(_) | TypeKind::Dynamic => Self::Null,
        }
    }

    fn zero_primitive(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Bool => Self::Bool(false),
            PrimitiveKind::U8 => Self::U8(0),
            PrimitiveKind::U16 => Self::U16(0),
            PrimitiveKind::U32 => Self::U32(0),
            PrimitiveKind::U64 => Self::U64(0),
            PrimitiveKind::I8 => Self::I8(0),
            PrimitiveKind::I16 => Self::I16(0),
            PrimitiveKind::I32 => Self::I32(0),
            PrimitiveKind::I64 => Self::I64(0),
            PrimitiveKind::F32 => Self::F32(0.0),
            PrimitiveKind::F64 => Self::F64(0.0),
            PrimitiveKind::Char => Self::Char('\0'),
            PrimitiveKind::String => Self::String(String::new()),
        }
    }

    /// Primitive kind of a scalar value.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        let kind = match self {
            Self::Bool(_) => PrimitiveKind::Bool,
            Self::U8(_) => PrimitiveKind::U8,
            Self::U16(_) => PrimitiveKind::U16,
            Self::U32(_) => PrimitiveKind::U32,
            Self::U64(_) => PrimitiveKind::U64,
            Self::I8(_) => PrimitiveKind::I8,
            Self::I16(_) => PrimitiveKind::I16,
            Self::I32(_) => PrimitiveKind::I32,
            Self::I64(_) => PrimitiveKind::I64,
            Self::F32(_) => PrimitiveKind::F32,
            Self::F64(_) => PrimitiveKind::F64,
            Self::Char(_) => PrimitiveKind::Char,
            Self::String(_) => PrimitiveKind::String,
            _ => return None,
        };
        Some(kind)
    }

    /// Convert a scalar to another primitive kind without losing information.
    ///
    /// Returns `None` when the value does not fit the target or the kinds
    /// are unrelated (e.g. bool to string).
    pub fn coerce(&self, target: PrimitiveKind) -> Option<Self> {
        if self.primitive_kind() == Some(target) {
            return Some(self.clone());
        }
        if let Some(int) = self.as_integer() {
            return Self::from_integer(int, target);
        }
        match (self, target) {
            (Self::F32(v), PrimitiveKind::F64) => Some(Self::F64(f64::from(*v))),
            (Self::F64(v), PrimitiveKind::F32) => {
                #[allow(clippy::cast_possible_truncation)]
                let narrowed = *v as f32;
                (f64::from(narrowed) == *v).then_some(Self::F32(narrowed))
            }
            (Self::F32(_) | Self::F64(_), _) => {
                let v = self.as_f64()?;
                if v.fract() != 0.0 || v.abs() > MAX_EXACT_F64 {
                    return None;
                }
                #[allow(clippy::cast_possible_truncation)]
                let int = v as i128;
                Self::from_integer(int, target)
            }
            (Self::Char(c), PrimitiveKind::String) => Some(Self::String(c.to_string())),
            (Self::Char(c), _) => Self::from_integer(i128::from(u32::from(*c)), target),
            (Self::String(s), PrimitiveKind::Char) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Self::Char(c)),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    fn as_integer(&self) -> Option<i128> {
        match self {
            Self::U8(v) => Some(i128::from(*v)),
            Self::U16(v) => Some(i128::from(*v)),
            Self::U32(v) => Some(i128::from(*v)),
            Self::U64(v) => Some(i128::from(*v)),
            Self::I8(v) => Some(i128::from(*v)),
            Self::I16(v) => Some(i128::from(*v)),
            Self::I32(v) => Some(i128::from(*v)),
            Self::I64(v) => Some(i128::from(*v)),
            _ => None,
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_integer(v: i128, target: PrimitiveKind) -> Option<Self> {
        match target {
            PrimitiveKind::U8 => u8::try_from(v).ok().map(Self::U8),
            PrimitiveKind::U16 => u16::try_from(v).ok().map(Self::U16),
            PrimitiveKind::U32 => u32::try_from(v).ok().map(Self::U32),
            PrimitiveKind::U64 => u64::try_from(v).ok().map(Self::U64),
            PrimitiveKind::I8 => i8::try_from(v).ok().map(Self::I8),
            PrimitiveKind::I16 => i16::try_from(v).ok().map(Self::I16),
            PrimitiveKind::I32 => i32::try_from(v).ok().map(Self::I32),
            PrimitiveKind::I64 => i64::try_from(v).ok().map(Self::I64),
            PrimitiveKind::F32 => (v.abs() <= MAX_EXACT_F32).then_some(Self::F32(v as f32)),
            PrimitiveKind::F64 => (v.abs() <= MAX_EXACT_F64 as i128).then_some(Self::F64(v as f64)),
            PrimitiveKind::Char => u32::try_from(v)
                .ok()
                .and_then(char::from_u32)
                .map(Self::Char),
            PrimitiveKind::Bool | PrimitiveKind::String => None,
        }
    }

    /// Check if value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get as bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u32.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Self::U32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as u64.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i32.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::I32(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::I64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as f64 (widening f32).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::F32(v) => Some(f64::from(*v)),
            Self::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Try to get as string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as sequence.
    pub fn as_sequence(&self) -> Option<&[DynamicValue]> {
        match self {
            Self::Sequence(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get map entries.
    pub fn as_map(&self) -> Option<&[(DynamicValue, DynamicValue)]> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    /// Target of a populated reference.
    pub fn as_ref_target(&self) -> Option<&DynamicValue> {
        match self {
            Self::Ref(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get struct field.
    pub fn get_field(&self, name: &str) -> Option<&DynamicValue> {
        match self {
            Self::Struct(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Try to get mutable struct field.
    pub fn get_field_mut(&mut self, name: &str) -> Option<&mut DynamicValue> {
        match self {
            Self::Struct(fields) => fields.get_mut(name),
            _ => None,
        }
    }

    /// Set struct field.
    pub fn set_field(&mut self, name: impl Into<String>, value: DynamicValue) -> bool {
        match self {
            Self::Struct(fields) => {
                fields.insert(name.into(), value);
                true
            }
            _ => false,
        }
    }
}

const MAX_EXACT_F32: i128 = 1 << 24;
const MAX_EXACT_F64: f64 = 9_007_199_254_740_992.0;

// Conversion traits
macro_rules! impl_from_primitive {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for DynamicValue {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

impl_from_primitive!(
    bool => Bool,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => String,
);

impl From<&str> for DynamicValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<DynamicData> for DynamicValue {
    fn from(v: DynamicData) -> Self {
        Self::Dynamic(Box::new(v))
    }
}

impl<T: Into<DynamicValue>> From<Vec<T>> for DynamicValue {
    fn from(v: Vec<T>) -> Self {
        Self::Sequence(v.into_iter().map(Into::into).collect())
    }
}

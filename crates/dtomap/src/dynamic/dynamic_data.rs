// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! DynamicData container for runtime data manipulation.

use crate::dynamic::{DynamicValue, TypeDescriptor};
use crate::Mappable;
use std::fmt;
use std::sync::Arc;

/// Errors for DynamicData operations and value conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicDataError {
    FieldNotFound(String),
    TypeMismatch { expected: String, got: String },
    InvalidOperation(String),
    IndexOutOfBounds { index: usize, length: usize },
}

impl DynamicDataError {
    /// Build a type mismatch error from the expected type and the value found.
    pub fn mismatch(expected: impl Into<String>, got: &DynamicValue) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            got: value_kind(got).to_string(),
        }
    }
}

fn value_kind(value: &DynamicValue) -> &'static str {
    if let Some(kind) = value.primitive_kind() {
        return kind.type_name();
    }
    match value {
        DynamicValue::Struct(_) => "struct",
        DynamicValue::Sequence(_) => "sequence",
        DynamicValue::Map(_) => "map",
        DynamicValue::Ref(_) => "reference",
        DynamicValue::Dynamic(_) => "dynamic",
        _ => "null",
    }
}

impl fmt::Display for DynamicDataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound(name) => write!(f, "Field not found: {}", name),
            Self::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)
            }
            Self::InvalidOperation(msg) => write!(f, "Invalid operation for type: {}", msg),
            Self::IndexOutOfBounds { index, length } => {
                write!(f, "Index out of bounds: {} >= {}", index, length)
            }
        }
    }
}

impl std::error::Error for DynamicDataError {}

/// Self-describing value: a descriptor and the value it describes.
#[derive(Debug, Clone)]
pub struct DynamicData {
    descriptor: Arc<TypeDescriptor>,
    value: DynamicValue,
}

impl PartialEq for DynamicData {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor.name == other.descriptor.name && self.value == other.value
    }
}

impl DynamicData {
    /// Create new DynamicData holding the zero value of the type.
    pub fn new(descriptor: &Arc<TypeDescriptor>) -> Self {
        Self {
            descriptor: descriptor.clone(),
            value: DynamicValue::zero(descriptor),
        }
    }

    /// Wrap an existing value.
    pub fn from_value(descriptor: &Arc<TypeDescriptor>, value: DynamicValue) -> Self {
        Self {
            descriptor: descriptor.clone(),
            value,
        }
    }

    /// Capture a typed value.
    pub fn of<T: Mappable>(value: &T) -> Self {
        Self {
            descriptor: T::type_descriptor(),
            value: value.to_dynamic(),
        }
    }

    /// Convert back to a typed value.
    pub fn to_typed<T: Mappable>(&self) -> Result<T, DynamicDataError> {
        T::from_dynamic(&self.value)
    }

    /// Get the type descriptor.
    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    /// Get the qualified type name.
    pub fn type_name(&self) -> String {
        self.descriptor.qualified_name()
    }

    /// Get the underlying value.
    pub fn value(&self) -> &DynamicValue {
        &self.value
    }

    /// Get mutable reference to value.
    pub fn value_mut(&mut self) -> &mut DynamicValue {
        &mut self.value
    }

    /// Into inner value.
    pub fn into_value(self) -> DynamicValue {
        self.value
    }

    /// Get a typed field value by name.
    pub fn get<T: Mappable>(&self, name: &str) -> Result<T, DynamicDataError> {
        T::from_dynamic(self.get_field(name)?)
    }

    /// Set a field value by name.
    pub fn set<T: Mappable>(&mut self, name: &str, value: T) -> Result<(), DynamicDataError> {
        self.set_field(name, value.to_dynamic())
    }

    /// Set a raw field value by name.
    pub fn set_field(&mut self, name: &str, value: DynamicValue) -> Result<(), DynamicDataError> {
        if self.descriptor.field(name).is_none() {
            return Err(DynamicDataError::FieldNotFound(name.to_string()));
        }

        match &mut self.value {
            DynamicValue::Struct(fields) => {
                fields.insert(name.to_string(), value);
                Ok(())
            }
            _ => Err(DynamicDataError::InvalidOperation(
                "set requires struct type".into(),
            )),
        }
    }

    /// Get field by name.
    pub fn get_field(&self, name: &str) -> Result<&DynamicValue, DynamicDataError> {
        if self.descriptor.field(name).is_none() {
            return Err(DynamicDataError::FieldNotFound(name.to_string()));
        }

        match &self.value {
            DynamicValue::Struct(fields) => fields
                .get(name)
                .ok_or_else(|| DynamicDataError::FieldNotFound(name.to_string())),
            _ => Err(DynamicDataError::InvalidOperation(
                "get_field requires struct type".into(),
            )),
        }
    }

    /// Get sequence element by index.
    pub fn get_element(&self, index: usize) -> Result<&DynamicValue, DynamicDataError> {
        match &self.value {
            DynamicValue::Sequence(seq) => seq.get(index).ok_or(DynamicDataError::IndexOutOfBounds {
                index,
                length: seq.len(),
            }),
            _ => Err(DynamicDataError::InvalidOperation(
                "get_element requires sequence type".into(),
            )),
        }
    }

    /// Set sequence element by index.
    pub fn set_element(
        &mut self,
        index: usize,
        value: DynamicValue,
    ) -> Result<(), DynamicDataError> {
        match &mut self.value {
            DynamicValue::Sequence(seq) => {
                let length = seq.len();
                let slot = seq
                    .get_mut(index)
                    .ok_or(DynamicDataError::IndexOutOfBounds { index, length })?;
                *slot = value;
                Ok(())
            }
            _ => Err(DynamicDataError::InvalidOperation(
                "set_element requires sequence type".into(),
            )),
        }
    }

    /// Append to a sequence.
    pub fn push(&mut self, value: DynamicValue) -> Result<(), DynamicDataError> {
        match &mut self.value {
            DynamicValue::Sequence(seq) => {
                seq.push(value);
                Ok(())
            }
            _ => Err(DynamicDataError::InvalidOperation(
                "push requires sequence type".into(),
            )),
        }
    }

    /// Sequence length.
    pub fn len(&self) -> Result<usize, DynamicDataError> {
        match &self.value {
            DynamicValue::Sequence(seq) => Ok(seq.len()),
            DynamicValue::Map(entries) => Ok(entries.len()),
            _ => Err(DynamicDataError::InvalidOperation(
                "len requires sequence or map type".into(),
            )),
        }
    }

    /// Check if a sequence or map is empty.
    pub fn is_empty(&self) -> Result<bool, DynamicDataError> {
        self.len().map(|n| n == 0)
    }
}

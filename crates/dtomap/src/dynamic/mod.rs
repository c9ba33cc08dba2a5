// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamic Types
//!
//! Runtime description of a value's structural shape, and a type-erased
//! value graph the transfer engine walks.
//!
//! # Features
//!
//! - **TypeDescriptor**: qualified name plus kind (primitive, struct, sequence, map, reference)
//! - **DynamicValue**: in-memory value graph
//! - **DynamicData**: self-describing value with field access
//! - **Builder API**: fluent interface for describing structs at runtime
//!
//! # Example
//!
//! ```rust
//! use dtomap::dynamic::{DynamicData, PrimitiveKind, TypeDescriptorBuilder};
//! use std::sync::Arc;
//!
//! let descriptor = Arc::new(TypeDescriptorBuilder::new("app", "SensorReading")
//!     .field("sensor_id", PrimitiveKind::U32)
//!     .field("temperature", PrimitiveKind::F64)
//!     .build());
//!
//! let mut data = DynamicData::new(&descriptor);
//! data.set("sensor_id", 42u32).unwrap();
//! data.set("temperature", 23.5f64).unwrap();
//!
//! let temp: f64 = data.get("temperature").unwrap();
//! assert_eq!(temp, 23.5);
//! ```

mod builder;
mod dynamic_data;
mod type_descriptor;
mod value;

pub use builder::TypeDescriptorBuilder;
pub use dynamic_data::{DynamicData, DynamicDataError};
pub use type_descriptor::{
    FieldDescriptor, Getter, MapDescriptor, MethodDescriptor, PrimitiveKind, StructDescriptor,
    StructuralKind, TypeDescriptor, TypeKind, TypeName, TypeRef, Visibility,
};
pub use value::DynamicValue;

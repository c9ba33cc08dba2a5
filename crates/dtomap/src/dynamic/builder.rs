// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builder API for struct TypeDescriptors.
//!
//! Derived types get their descriptor from `#[derive(Mappable)]`; the
//! builder covers types described at runtime (configuration-driven DTOs,
//! tests, bridges).

use crate::dynamic::{
    DynamicValue, FieldDescriptor, MethodDescriptor, PrimitiveKind, StructDescriptor,
    TypeDescriptor, TypeKind, TypeName,
};
use std::sync::Arc;

/// Builder for creating struct TypeDescriptor instances.
#[derive(Debug)]
pub struct TypeDescriptorBuilder {
    name: TypeName,
    fields: Vec<FieldDescriptor>,
    methods: Vec<MethodDescriptor>,
}

impl TypeDescriptorBuilder {
    /// Create a new builder for a struct type.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: TypeName::new(namespace, name),
            fields: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Add a primitive field.
    pub fn field(self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::primitive(kind)))
    }

    /// Add a string field.
    pub fn string_field(self, name: impl Into<String>) -> Self {
        self.field(name, PrimitiveKind::String)
    }

    /// Add a primitive field with an alias tag.
    pub fn alias_field(
        mut self,
        name: impl Into<String>,
        kind: PrimitiveKind,
        alias: impl Into<String>,
    ) -> Self {
        let type_desc = Arc::new(TypeDescriptor::primitive(kind));
        self.fields
            .push(FieldDescriptor::new(name, type_desc).with_alias(alias));
        self
    }

    /// Add a private primitive field.
    pub fn private_field(mut self, name: impl Into<String>, kind: PrimitiveKind) -> Self {
        let type_desc = Arc::new(TypeDescriptor::primitive(kind));
        self.fields
            .push(FieldDescriptor::new(name, type_desc).private());
        self
    }

    /// Add a field with a type descriptor.
    pub fn field_with_type(
        mut self,
        name: impl Into<String>,
        type_desc: Arc<TypeDescriptor>,
    ) -> Self {
        self.fields.push(FieldDescriptor::new(name, type_desc));
        self
    }

    /// Add a fully specified field.
    pub fn field_descriptor(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a nested struct field.
    pub fn nested_field(self, name: impl Into<String>, nested: Arc<TypeDescriptor>) -> Self {
        self.field_with_type(name, nested)
    }

    /// Add a sequence field.
    pub fn sequence_field(self, name: impl Into<String>, element: Arc<TypeDescriptor>) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::sequence(element)))
    }

    /// Add an associative container field.
    pub fn map_field(
        self,
        name: impl Into<String>,
        key: Arc<TypeDescriptor>,
        value: Arc<TypeDescriptor>,
    ) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::map("HashMap", key, value)))
    }

    /// Add a nullable reference field.
    pub fn reference_field(self, name: impl Into<String>, target: Arc<TypeDescriptor>) -> Self {
        self.field_with_type(name, Arc::new(TypeDescriptor::reference(target)))
    }

    /// Declare a zero-argument getter.
    pub fn method<F>(
        mut self,
        name: impl Into<String>,
        returns: Arc<TypeDescriptor>,
        getter: F,
    ) -> Self
    where
        F: Fn(&DynamicValue) -> Option<DynamicValue> + Send + Sync + 'static,
    {
        self.methods
            .push(MethodDescriptor::new(name, returns, Arc::new(getter)));
        self
    }

    /// Build the TypeDescriptor.
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(
            self.name,
            TypeKind::Struct(StructDescriptor {
                fields: self.fields,
                methods: self.methods,
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamic::{StructuralKind, Visibility};

    #[test]
    fn test_struct_builder() {
        let desc = TypeDescriptorBuilder::new("app::model", "User")
            .string_field("name")
            .alias_field("id", PrimitiveKind::U64, "identifier")
            .private_field("password", PrimitiveKind::String)
            .build();

        assert_eq!(desc.qualified_name(), "app::model::User");
        let fields = desc.fields().expect("struct");
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[1].alias.as_deref(), Some("identifier"));
        assert_eq!(fields[2].visibility, Visibility::Private);
    }

    #[test]
    fn test_nested_and_containers() {
        let address = Arc::new(
            TypeDescriptorBuilder::new("app", "Address")
                .string_field("city")
                .build(),
        );
        let u32_type = Arc::new(TypeDescriptor::primitive(PrimitiveKind::U32));

        let desc = TypeDescriptorBuilder::new("app", "User")
            .nested_field("home", address.clone())
            .sequence_field("scores", u32_type.clone())
            .map_field("tags", u32_type.clone(), u32_type)
            .reference_field("work", address)
            .build();

        let kind_of = |name: &str| desc.field(name).map(|f| f.type_desc().structural_kind());
        assert_eq!(kind_of("home"), Some(StructuralKind::Struct));
        assert_eq!(kind_of("scores"), Some(StructuralKind::Sequence));
        assert_eq!(kind_of("tags"), Some(StructuralKind::Associative));
        assert_eq!(kind_of("work"), Some(StructuralKind::Reference));
    }

    #[test]
    fn test_method_getter() {
        let string_type = Arc::new(TypeDescriptor::primitive(PrimitiveKind::String));
        let desc = TypeDescriptorBuilder::new("app", "User")
            .string_field("first")
            .string_field("last")
            .method("full_name", string_type, |v| {
                let first = v.get_field("first")?.as_str()?;
                let last = v.get_field("last")?.as_str()?;
                Some(format!("{} {}", first, last).into())
            })
            .build();

        let mut value = DynamicValue::zero(&desc);
        value.set_field("first", "Ada".into());
        value.set_field("last", "Lovelace".into());

        let method = desc.method("full_name").expect("method");
        assert_eq!(method.invoke(&value), Some("Ada Lovelace".into()));
    }
}

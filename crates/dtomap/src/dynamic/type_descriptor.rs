// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.

use crate::dynamic::DynamicValue;
use std::fmt;
use std::sync::Arc;

/// Primitive type kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Char,
    String,
}

impl PrimitiveKind {
    /// Canonical type name used in descriptors and registry keys.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Char => "char",
            Self::String => "String",
        }
    }

    /// Whether this is an integer or floating point kind.
    pub fn is_numeric(self) -> bool {
        !matches!(self, Self::Bool | Self::Char | Self::String)
    }
}

/// Closed set of structural kinds the transfer engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StructuralKind {
    Scalar,
    Struct,
    Sequence,
    Associative,
    Reference,
    /// Self-describing value; unwrapped before dispatch.
    Dynamic,
}

impl fmt::Display for StructuralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Scalar => "scalar",
            Self::Struct => "struct",
            Self::Sequence => "sequence",
            Self::Associative => "associative",
            Self::Reference => "reference",
            Self::Dynamic => "dynamic",
        };
        f.write_str(name)
    }
}

/// Qualified type identity: namespace plus short name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeName {
    /// Namespace (module path for derived types, empty for built-ins).
    pub namespace: String,
    /// Short type name.
    pub name: String,
}

impl TypeName {
    /// Create a qualified name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Name without a namespace (built-in and composite types).
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new("", name)
    }

    /// `namespace::name`, or just `name` when the namespace is empty.
    pub fn qualified(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}::{}", self.namespace, self.name)
        }
    }
}

/// Link to another type descriptor.
///
/// `Deferred` is resolved on demand so recursive types can reference
/// themselves without building an infinite descriptor.
#[derive(Clone)]
pub enum TypeRef {
    Resolved(Arc<TypeDescriptor>),
    Deferred(fn() -> Arc<TypeDescriptor>),
}

impl TypeRef {
    /// Get the referenced descriptor.
    pub fn resolve(&self) -> Arc<TypeDescriptor> {
        match self {
            Self::Resolved(desc) => desc.clone(),
            Self::Deferred(f) => f(),
        }
    }
}

impl From<Arc<TypeDescriptor>> for TypeRef {
    fn from(desc: Arc<TypeDescriptor>) -> Self {
        Self::Resolved(desc)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved(desc) => write!(f, "TypeRef({})", desc.name),
            Self::Deferred(_) => f.write_str("TypeRef(<deferred>)"),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Resolved(a), Self::Resolved(b)) => a.name == b.name,
            _ => self.resolve().name == other.resolve().name,
        }
    }
}

/// Type kind enumeration.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// Primitive type.
    Primitive(PrimitiveKind),
    /// Struct with named fields and getter methods.
    Struct(StructDescriptor),
    /// Sequence (dynamic length).
    Sequence(TypeRef),
    /// Associative container.
    Map(MapDescriptor),
    /// Nullable reference to a single target.
    Reference(TypeRef),
    /// Self-describing value carried as `DynamicData`.
    Dynamic,
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Qualified type name.
    pub name: TypeName,
    /// Type kind.
    pub kind: TypeKind,
}

impl TypeDescriptor {
    /// Create a new type descriptor.
    pub fn new(name: TypeName, kind: TypeKind) -> Self {
        Self { name, kind }
    }

    /// Create a primitive type descriptor.
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(TypeName::bare(kind.type_name()), TypeKind::Primitive(kind))
    }

    /// Create a struct type descriptor.
    pub fn struct_type(name: TypeName, fields: Vec<FieldDescriptor>) -> Self {
        Self::new(
            name,
            TypeKind::Struct(StructDescriptor {
                fields,
                methods: Vec::new(),
            }),
        )
    }

    /// Create a sequence descriptor named `Vec<element>`.
    pub fn sequence(element: Arc<TypeDescriptor>) -> Self {
        let name = TypeName::bare(format!("Vec<{}>", element.name));
        Self::new(name, TypeKind::Sequence(TypeRef::Resolved(element)))
    }

    /// Create an associative container descriptor.
    pub fn map(container: &str, key: Arc<TypeDescriptor>, value: Arc<TypeDescriptor>) -> Self {
        let name = TypeName::bare(format!("{}<{}, {}>", container, key.name, value.name));
        Self::new(
            name,
            TypeKind::Map(MapDescriptor {
                key_type: key.into(),
                value_type: value.into(),
            }),
        )
    }

    /// Create a reference descriptor named `&target`.
    pub fn reference(target: Arc<TypeDescriptor>) -> Self {
        let name = TypeName::bare(format!("&{}", target.name));
        Self::new(name, TypeKind::Reference(TypeRef::Resolved(target)))
    }

    /// Descriptor for self-describing values.
    pub fn dynamic() -> Self {
        Self::new(TypeName::bare("DynamicData"), TypeKind::Dynamic)
    }

    /// Fully qualified name, used as identity everywhere.
    pub fn qualified_name(&self) -> String {
        self.name.qualified()
    }

    /// Project onto the structural kind.
    pub fn structural_kind(&self) -> StructuralKind {
        match &self.kind {
            TypeKind::Primitive(_) => StructuralKind::Scalar,
            TypeKind::Struct(_) => StructuralKind::Struct,
            TypeKind::Sequence(_) => StructuralKind::Sequence,
            TypeKind::Map(_) => StructuralKind::Associative,
            TypeKind::Reference(_) => StructuralKind::Reference,
            TypeKind::Dynamic => StructuralKind::Dynamic,
        }
    }

    /// Check if this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        matches!(self.kind, TypeKind::Primitive(_))
    }

    /// Check if this is a struct type.
    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    /// Check if this is a reference type.
    pub fn is_reference(&self) -> bool {
        matches!(self.kind, TypeKind::Reference(_))
    }

    /// Check if this is a sequence type.
    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, TypeKind::Sequence(_))
    }

    /// Struct layout if this is a struct.
    pub fn as_struct(&self) -> Option<&StructDescriptor> {
        match &self.kind {
            TypeKind::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Get fields if this is a struct.
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        self.as_struct().map(|s| s.fields.as_slice())
    }

    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.as_struct()?.field(name)
    }

    /// Get field index by name.
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields()?.iter().position(|f| f.name == name)
    }

    /// Get declared getter method by name.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.as_struct()?.method(name)
    }

    /// Element type for sequences.
    pub fn element_type(&self) -> Option<Arc<TypeDescriptor>> {
        match &self.kind {
            TypeKind::Sequence(elem) => Some(elem.resolve()),
            _ => None,
        }
    }

    /// Target type for references.
    pub fn target_type(&self) -> Option<Arc<TypeDescriptor>> {
        match &self.kind {
            TypeKind::Reference(target) => Some(target.resolve()),
            _ => None,
        }
    }
}

/// Fields and methods of a struct, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructDescriptor {
    pub fields: Vec<FieldDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl StructDescriptor {
    /// Get field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get field whose alias tag equals `alias`.
    pub fn field_by_alias(&self, alias: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.alias.as_deref() == Some(alias))
    }

    /// Get method by name.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Field visibility, mirrored from the declaring type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

/// Field descriptor for struct members.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Alias tag used for correspondence when names differ.
    pub alias: Option<String>,
    /// Whether the field is reachable without the access shim.
    pub visibility: Visibility,
    /// Field type.
    pub type_ref: TypeRef,
}

impl FieldDescriptor {
    /// Create a new public field descriptor.
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            visibility: Visibility::Public,
            type_ref: type_ref.into(),
        }
    }

    /// Set alias tag. Empty tags are treated as absent.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.alias = (!alias.is_empty()).then_some(alias);
        self
    }

    /// Mark as private.
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    /// Check if the field is public.
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Resolve the field type.
    pub fn type_desc(&self) -> Arc<TypeDescriptor> {
        self.type_ref.resolve()
    }
}

/// Zero-argument accessor invoked on a struct's dynamic value.
pub type Getter = Arc<dyn Fn(&DynamicValue) -> Option<DynamicValue> + Send + Sync>;

/// Declared getter method.
#[derive(Clone)]
pub struct MethodDescriptor {
    /// Method name.
    pub name: String,
    /// Return type.
    pub returns: TypeRef,
    getter: Getter,
}

impl MethodDescriptor {
    /// Create a method descriptor.
    pub fn new(name: impl Into<String>, returns: impl Into<TypeRef>, getter: Getter) -> Self {
        Self {
            name: name.into(),
            returns: returns.into(),
            getter,
        }
    }

    /// Invoke the getter on a struct value.
    pub fn invoke(&self, receiver: &DynamicValue) -> Option<DynamicValue> {
        (self.getter)(receiver)
    }
}

impl fmt::Debug for MethodDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDescriptor")
            .field("name", &self.name)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

impl PartialEq for MethodDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.returns == other.returns
    }
}

/// Associative container descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDescriptor {
    pub key_type: TypeRef,
    pub value_type: TypeRef,
}

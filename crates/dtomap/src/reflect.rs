// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! `Mappable`: the accessor/mutator contract a type opts into.
//!
//! A mappable type describes its own shape (`type_descriptor`) and converts
//! to and from the dynamic value graph. Structs get it from
//! `#[derive(Mappable)]`; built-in scalars and containers are covered here.
//!
//! | Rust type                      | Structural kind |
//! |--------------------------------|-----------------|
//! | integers, floats, bool, char, `String` | scalar  |
//! | `Vec<T>`                       | sequence        |
//! | `HashMap<K, V>`, `BTreeMap<K, V>` | associative  |
//! | `Option<T>`                    | reference       |
//! | `Box<T>`                       | same as `T`     |
//! | `DynamicData`                  | dynamic         |

use crate::dynamic::{
    DynamicData, DynamicDataError, DynamicValue, MapDescriptor, PrimitiveKind, TypeDescriptor,
    TypeKind, TypeName, TypeRef,
};
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, OnceLock};

/// Types the mapper can introspect and rebuild.
pub trait Mappable: Sized {
    /// Qualified name of the type. Must not build the descriptor.
    fn type_name() -> TypeName;

    /// Runtime description of the type.
    fn type_descriptor() -> Arc<TypeDescriptor>;

    /// Convert into the dynamic value graph.
    fn to_dynamic(&self) -> DynamicValue;

    /// Rebuild from the dynamic value graph.
    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError>;
}

/// Qualified name of `T`, the identity used by registries and catalogs.
pub fn type_name_of<T: Mappable>() -> String {
    T::type_name().qualified()
}

/// Return type of a declared getter, resolved lazily.
#[doc(hidden)]
pub fn method_return_type<T, R: Mappable>(_method: fn(&T) -> R) -> TypeRef {
    TypeRef::Deferred(R::type_descriptor)
}

macro_rules! impl_mappable_primitive {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Mappable for $ty {
                fn type_name() -> TypeName {
                    TypeName::bare(PrimitiveKind::$kind.type_name())
                }

                fn type_descriptor() -> Arc<TypeDescriptor> {
                    static DESC: OnceLock<Arc<TypeDescriptor>> = OnceLock::new();
                    DESC.get_or_init(|| Arc::new(TypeDescriptor::primitive(PrimitiveKind::$kind)))
                        .clone()
                }

                fn to_dynamic(&self) -> DynamicValue {
                    DynamicValue::$kind(self.clone())
                }

                fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
                    match value {
                        DynamicValue::$kind(v) => Ok(v.clone()),
                        other => Err(DynamicDataError::mismatch(
                            PrimitiveKind::$kind.type_name(),
                            other,
                        )),
                    }
                }
            }
        )*
    };
}

impl_mappable_primitive!(
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

// Pointer-sized integers travel as their 64-bit counterparts.
macro_rules! impl_mappable_pointer_sized {
    ($($ty:ty => $wide:ty, $kind:ident, $name:literal),* $(,)?) => {
        $(
            impl Mappable for $ty {
                fn type_name() -> TypeName {
                    TypeName::bare($name)
                }

                fn type_descriptor() -> Arc<TypeDescriptor> {
                    static DESC: OnceLock<Arc<TypeDescriptor>> = OnceLock::new();
                    DESC.get_or_init(|| {
                        Arc::new(TypeDescriptor::new(
                            TypeName::bare($name),
                            TypeKind::Primitive(PrimitiveKind::$kind),
                        ))
                    })
                    .clone()
                }

                fn to_dynamic(&self) -> DynamicValue {
                    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
                    let wide = *self as $wide;
                    DynamicValue::$kind(wide)
                }

                fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
                    match value {
                        DynamicValue::$kind(v) => <$ty>::try_from(*v).map_err(|_| {
                            DynamicDataError::InvalidOperation(format!(
                                "{} does not fit in {}",
                                v, $name
                            ))
                        }),
                        other => Err(DynamicDataError::mismatch($name, other)),
                    }
                }
            }
        )*
    };
}

impl_mappable_pointer_sized!(
    usize => u64, U64, "usize",
    isize => i64, I64, "isize",
);

impl<T: Mappable> Mappable for Vec<T> {
    fn type_name() -> TypeName {
        TypeName::bare(format!("Vec<{}>", T::type_name()))
    }

    fn type_descriptor() -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::new(
            Self::type_name(),
            TypeKind::Sequence(TypeRef::Deferred(T::type_descriptor)),
        ))
    }

    fn to_dynamic(&self) -> DynamicValue {
        DynamicValue::Sequence(self.iter().map(Mappable::to_dynamic).collect())
    }

    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
        match value {
            DynamicValue::Sequence(items) => items.iter().map(T::from_dynamic).collect(),
            other => Err(DynamicDataError::mismatch(
                Self::type_name().qualified(),
                other,
            )),
        }
    }
}

fn map_descriptor<K: Mappable, V: Mappable>(name: TypeName) -> Arc<TypeDescriptor> {
    Arc::new(TypeDescriptor::new(
        name,
        TypeKind::Map(MapDescriptor {
            key_type: TypeRef::Deferred(K::type_descriptor),
            value_type: TypeRef::Deferred(V::type_descriptor),
        }),
    ))
}

fn map_entries<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> DynamicValue
where
    K: Mappable + 'a,
    V: Mappable + 'a,
{
    DynamicValue::Map(
        entries
            .map(|(k, v)| (k.to_dynamic(), v.to_dynamic()))
            .collect(),
    )
}

fn collect_entries<K, V, C>(value: &DynamicValue, name: TypeName) -> Result<C, DynamicDataError>
where
    K: Mappable,
    V: Mappable,
    C: FromIterator<(K, V)>,
{
    match value {
        DynamicValue::Map(entries) => entries
            .iter()
            .map(|(k, v)| Ok((K::from_dynamic(k)?, V::from_dynamic(v)?)))
            .collect(),
        other => Err(DynamicDataError::mismatch(name.qualified(), other)),
    }
}

impl<K, V, S> Mappable for HashMap<K, V, S>
where
    K: Mappable + Eq + Hash,
    V: Mappable,
    S: BuildHasher + Default,
{
    fn type_name() -> TypeName {
        TypeName::bare(format!("HashMap<{}, {}>", K::type_name(), V::type_name()))
    }

    fn type_descriptor() -> Arc<TypeDescriptor> {
        map_descriptor::<K, V>(Self::type_name())
    }

    fn to_dynamic(&self) -> DynamicValue {
        map_entries(self.iter())
    }

    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
        collect_entries(value, Self::type_name())
    }
}

impl<K, V> Mappable for BTreeMap<K, V>
where
    K: Mappable + Ord,
    V: Mappable,
{
    fn type_name() -> TypeName {
        TypeName::bare(format!("BTreeMap<{}, {}>", K::type_name(), V::type_name()))
    }

    fn type_descriptor() -> Arc<TypeDescriptor> {
        map_descriptor::<K, V>(Self::type_name())
    }

    fn to_dynamic(&self) -> DynamicValue {
        map_entries(self.iter())
    }

    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
        collect_entries(value, Self::type_name())
    }
}

/// `Option<T>` is the nullable reference to `T`.
impl<T: Mappable> Mappable for Option<T> {
    fn type_name() -> TypeName {
        TypeName::bare(format!("&{}", T::type_name()))
    }

    fn type_descriptor() -> Arc<TypeDescriptor> {
        Arc::new(TypeDescriptor::new(
            Self::type_name(),
            TypeKind::Reference(TypeRef::Deferred(T::type_descriptor)),
        ))
    }

    fn to_dynamic(&self) -> DynamicValue {
        match self {
            Some(v) => DynamicValue::Ref(Box::new(v.to_dynamic())),
            None => DynamicValue::Null,
        }
    }

    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
        match value {
            DynamicValue::Null => Ok(None),
            DynamicValue::Ref(target) => T::from_dynamic(target).map(Some),
            other => T::from_dynamic(other).map(Some),
        }
    }
}

impl<T: Mappable> Mappable for Box<T> {
    fn type_name() -> TypeName {
        T::type_name()
    }

    fn type_descriptor() -> Arc<TypeDescriptor> {
        T::type_descriptor()
    }

    fn to_dynamic(&self) -> DynamicValue {
        (**self).to_dynamic()
    }

    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
        T::from_dynamic(value).map(Box::new)
    }
}

impl Mappable for DynamicData {
    fn type_name() -> TypeName {
        TypeName::bare("DynamicData")
    }

    fn type_descriptor() -> Arc<TypeDescriptor> {
        static DESC: OnceLock<Arc<TypeDescriptor>> = OnceLock::new();
        DESC.get_or_init(|| Arc::new(TypeDescriptor::dynamic())).clone()
    }

    fn to_dynamic(&self) -> DynamicValue {
        DynamicValue::Dynamic(Box::new(self.clone()))
    }

    fn from_dynamic(value: &DynamicValue) -> Result<Self, DynamicDataError> {
        match value {
            DynamicValue::Dynamic(data) => Ok((**data).clone()),
            other => Err(DynamicDataError::mismatch("DynamicData", other)),
        }
    }
}

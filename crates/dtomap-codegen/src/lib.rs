// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr};

/// Struct-level `#[mapper(...)]` options.
#[derive(Default)]
struct TypeAttrs {
    namespace: Option<String>,
    name: Option<String>,
    methods: Vec<syn::Ident>,
}

/// Field-level `#[mapper(...)]` options.
#[derive(Default)]
struct FieldAttrs {
    alias: Option<String>,
    skip: bool,
}

/// `#[derive(Mappable)]` macro: generates the `TypeDescriptor` and dynamic
/// value conversion for a struct with named fields.
///
/// Struct attributes:
/// - `#[mapper(namespace = "app::model")]` (default: `module_path!()`)
/// - `#[mapper(name = "User")]` (default: the struct name)
/// - `#[mapper(methods(full_name, display_name))]`: zero-argument `&self`
///   getters exposed to the mapper; return types must be `Mappable`
///
/// Field attributes:
/// - `#[mapper(alias = "identifier")]`: alias tag used for correspondence
/// - `#[mapper(skip)]`: not described, rebuilt with `Default::default()`
///
/// Declared getters run on a copy of the struct rebuilt from its dynamic
/// value. Skipped fields hold `Default::default()` in that copy, so a getter
/// that reads a skipped field sees the default, not the live value.
///
/// Fields without `pub` are described as private.
///
/// Example:
/// ```ignore
/// use dtomap::Mappable;
///
/// #[derive(Mappable)]
/// #[mapper(methods(full_name))]
/// pub struct Person {
///     pub first: String,
///     pub last: String,
///     #[mapper(alias = "identifier")]
///     pub id: u64,
///     password_hash: String,
/// }
///
/// impl Person {
///     pub fn full_name(&self) -> String {
///         format!("{} {}", self.first, self.last)
///     }
/// }
/// ```
#[proc_macro_derive(Mappable, attributes(mapper))]
pub fn derive_mappable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

#[allow(clippy::too_many_lines)]
fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Mappable cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(f) => &f.named,
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Unit structs have no fields to map; use a struct with named fields",
                ))
            }
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Only named fields are supported",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Only structs are supported",
            ))
        }
    };

    let type_attrs = parse_type_attrs(&input.attrs)?;
    let short_name = type_attrs.name.unwrap_or_else(|| ident.to_string());
    let namespace = match &type_attrs.namespace {
        Some(ns) => quote! { #ns },
        None => quote! { ::core::module_path!() },
    };

    let mut descriptors = Vec::new();
    let mut to_entries = Vec::new();
    let mut from_fields = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "Field must have a name"));
        };
        let field_ty = &field.ty;
        let attrs = parse_field_attrs(&field.attrs)?;

        if attrs.skip {
            from_fields.push(quote! {
                #field_ident: ::core::default::Default::default()
            });
            continue;
        }

        let field_name = field_ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name).to_string();

        let alias = match &attrs.alias {
            Some(a) => quote! { ::core::option::Option::Some(::std::string::String::from(#a)) },
            None => quote! { ::core::option::Option::None },
        };
        let visibility = match &field.vis {
            syn::Visibility::Inherited => quote! { ::dtomap::dynamic::Visibility::Private },
            _ => quote! { ::dtomap::dynamic::Visibility::Public },
        };

        descriptors.push(quote! {
            ::dtomap::dynamic::FieldDescriptor {
                name: ::std::string::String::from(#field_name),
                alias: #alias,
                visibility: #visibility,
                type_ref: ::dtomap::dynamic::TypeRef::Deferred(
                    <#field_ty as ::dtomap::Mappable>::type_descriptor,
                ),
            }
        });

        to_entries.push(quote! {
            fields.insert(
                ::std::string::String::from(#field_name),
                ::dtomap::Mappable::to_dynamic(&self.#field_ident),
            );
        });

        from_fields.push(quote! {
            #field_ident: match fields.get(#field_name) {
                ::core::option::Option::Some(v) => {
                    <#field_ty as ::dtomap::Mappable>::from_dynamic(v)?
                }
                ::core::option::Option::None => {
                    return ::core::result::Result::Err(
                        ::dtomap::dynamic::DynamicDataError::FieldNotFound(
                            ::std::string::String::from(#field_name),
                        ),
                    )
                }
            }
        });
    }

    let methods = type_attrs.methods.iter().map(|method| {
        let method_name = method.to_string();
        quote! {
            ::dtomap::dynamic::MethodDescriptor::new(
                #method_name,
                ::dtomap::__private::method_return_type::<#ident, _>(#ident::#method),
                ::std::sync::Arc::new(|value: &::dtomap::dynamic::DynamicValue| {
                    let this = <#ident as ::dtomap::Mappable>::from_dynamic(value).ok()?;
                    let out = #ident::#method(&this);
                    ::core::option::Option::Some(::dtomap::Mappable::to_dynamic(&out))
                }),
            )
        }
    });

    let expanded = quote! {
        impl ::dtomap::Mappable for #ident {
            fn type_name() -> ::dtomap::dynamic::TypeName {
                ::dtomap::dynamic::TypeName::new(#namespace, #short_name)
            }

            fn type_descriptor() -> ::std::sync::Arc<::dtomap::dynamic::TypeDescriptor> {
                static DESC: ::std::sync::OnceLock<
                    ::std::sync::Arc<::dtomap::dynamic::TypeDescriptor>,
                > = ::std::sync::OnceLock::new();
                DESC.get_or_init(|| {
                    ::std::sync::Arc::new(::dtomap::dynamic::TypeDescriptor::new(
                        <Self as ::dtomap::Mappable>::type_name(),
                        ::dtomap::dynamic::TypeKind::Struct(::dtomap::dynamic::StructDescriptor {
                            fields: ::std::vec![#(#descriptors),*],
                            methods: ::std::vec![#(#methods),*],
                        }),
                    ))
                })
                .clone()
            }

            #[allow(unused_mut)]
            fn to_dynamic(&self) -> ::dtomap::dynamic::DynamicValue {
                let mut fields = ::std::collections::BTreeMap::new();
                #(#to_entries)*
                ::dtomap::dynamic::DynamicValue::Struct(fields)
            }

            #[allow(unused_variables)]
            fn from_dynamic(
                value: &::dtomap::dynamic::DynamicValue,
            ) -> ::core::result::Result<Self, ::dtomap::dynamic::DynamicDataError> {
                match value {
                    ::dtomap::dynamic::DynamicValue::Struct(fields) => {
                        ::core::result::Result::Ok(Self {
                            #(#from_fields),*
                        })
                    }
                    ::dtomap::dynamic::DynamicValue::Dynamic(data) => {
                        <Self as ::dtomap::Mappable>::from_dynamic(data.value())
                    }
                    other => ::core::result::Result::Err(
                        ::dtomap::dynamic::DynamicDataError::mismatch(
                            <Self as ::dtomap::Mappable>::type_name().qualified(),
                            other,
                        ),
                    ),
                }
            }
        }
    };

    Ok(expanded)
}

fn parse_type_attrs(attrs: &[syn::Attribute]) -> syn::Result<TypeAttrs> {
    let mut out = TypeAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("mapper")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("namespace") {
                let lit: LitStr = meta.value()?.parse()?;
                out.namespace = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("name") {
                let lit: LitStr = meta.value()?.parse()?;
                out.name = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("methods") {
                meta.parse_nested_meta(|method| {
                    let ident = method
                        .path
                        .get_ident()
                        .cloned()
                        .ok_or_else(|| method.error("expected a method name"))?;
                    out.methods.push(ident);
                    Ok(())
                })
            } else {
                Err(meta.error(
                    "unsupported mapper attribute (expected namespace, name or methods)",
                ))
            }
        })?;
    }
    Ok(out)
}

fn parse_field_attrs(attrs: &[syn::Attribute]) -> syn::Result<FieldAttrs> {
    let mut out = FieldAttrs::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("mapper")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("alias") {
                let lit: LitStr = meta.value()?.parse()?;
                let alias = lit.value();
                if !alias.is_empty() {
                    out.alias = Some(alias);
                }
                Ok(())
            } else if meta.path.is_ident("skip") {
                out.skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported mapper field attribute (expected alias or skip)"))
            }
        })?;
    }
    Ok(out)
}

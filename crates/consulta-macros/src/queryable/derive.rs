//! Implementation of the `#[derive(Queryable)]` macro.
//!
//! Emits one `FieldAccessors` entry per annotated field plus a
//! `SCREAMING_SNAKE_CASE` constant holding the field's query name.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, GenericArgument, PathArguments, Result, Type};

use super::attrs::{parse_query_attrs, FieldKind};

/// Main implementation of the Queryable derive macro.
pub fn queryable_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Queryable can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Queryable can only be derived for structs",
            ))
        }
    };

    let mut constants: Vec<TokenStream> = Vec::new();
    let mut accessors: Vec<TokenStream> = Vec::new();
    let mut searchable: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_query_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let Some(kind) = attrs.kind else {
            continue;
        };

        let query_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if seen.contains(&query_name) {
            return Err(Error::new(
                field.span(),
                format!("duplicate query field name '{}'", query_name),
            ));
        }
        seen.push(query_name.clone());

        let const_name = format_ident!("{}", to_screaming_snake_case(&query_name));
        constants.push(quote! {
            /// Query field name.
            pub const #const_name: &'static str = #query_name;
        });

        if attrs.searchable {
            searchable.push(query_name.clone());
        }

        let convert = convert_tokens(kind);
        let body = if option_inner(&field.ty).is_some() {
            quote! {
                match &record.#field_name {
                    ::core::option::Option::Some(value) => #convert,
                    ::core::option::Option::None => ::consulta_query::Value::None,
                }
            }
        } else {
            quote! {{
                let value = &record.#field_name;
                #convert
            }}
        };

        accessors.push(quote! {
            .field(#query_name, |record| #body)
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::consulta_query::Queryable for #struct_name #ty_generics #where_clause {
            fn field_accessors() -> ::consulta_query::FieldAccessors<Self> {
                ::consulta_query::FieldAccessors::<Self>::new()
                    #(#accessors)*
            }

            fn searchable_fields() -> &'static [&'static str] {
                &[#(#searchable),*]
            }
        }
    };

    Ok(expanded)
}

/// Conversion from `value: &FieldType` to an engine value.
fn convert_tokens(kind: FieldKind) -> TokenStream {
    match kind {
        FieldKind::Text => quote! {
            ::consulta_query::Value::text(::core::convert::AsRef::<str>::as_ref(value))
        },
        FieldKind::Number => quote! {
            ::consulta_query::Value::Number(::consulta_query::Number::from(*value))
        },
        FieldKind::Timestamp => quote! {
            ::consulta_query::Value::Timestamp(::consulta_query::ToTimestamp::to_timestamp(value))
        },
        FieldKind::Boolean => quote! {
            ::consulta_query::Value::Bool(*value)
        },
        FieldKind::Tags => quote! {
            ::consulta_query::Value::tags(
                value.iter().map(|tag| ::core::convert::AsRef::<str>::as_ref(tag))
            )
        },
    }
}

/// Returns the `T` of an `Option<T>` field type.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }
    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == ' ' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("price"), "PRICE");
        assert_eq!(to_screaming_snake_case("next_available"), "NEXT_AVAILABLE");
        assert_eq!(to_screaming_snake_case("reviewCount"), "REVIEW_COUNT");
        assert_eq!(to_screaming_snake_case("in-person"), "IN_PERSON");
    }

    #[test]
    fn detects_option_fields() {
        let ty: Type = syn::parse_quote!(Option<String>);
        assert!(option_inner(&ty).is_some());
        let ty: Type = syn::parse_quote!(std::option::Option<u32>);
        assert!(option_inner(&ty).is_some());
        let ty: Type = syn::parse_quote!(Vec<String>);
        assert!(option_inner(&ty).is_none());
    }

    #[test]
    fn generates_constants_and_searchable_list() {
        let input: DeriveInput = syn::parse_quote! {
            struct Payment {
                #[query(text, searchable)]
                concept: String,
                #[query(number, rename = "total")]
                amount: f64,
                #[query(skip)]
                internal: u64,
                note: String,
            }
        };
        let tokens = queryable_derive_impl(input).unwrap().to_string();
        assert!(tokens.contains("CONCEPT"));
        assert!(tokens.contains("TOTAL"));
        assert!(!tokens.contains("INTERNAL"));
        assert!(!tokens.contains("NOTE"));
        assert!(tokens.contains("searchable_fields"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let input: DeriveInput = syn::parse_quote! {
            struct Dup {
                #[query(text)]
                name: String,
                #[query(text, rename = "name")]
                alias: String,
            }
        };
        let err = queryable_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("duplicate query field name 'name'"));
    }

    #[test]
    fn rejects_enums() {
        let input: DeriveInput = syn::parse_quote! {
            enum Status { Upcoming, Completed }
        };
        assert!(queryable_derive_impl(input).is_err());
    }
}

// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Implementation of `#[derive(QueryValue)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    ext::IdentExt, parse_quote, spanned::Spanned, Data, DataEnum, DeriveInput, Error, Fields,
    FieldsNamed, Generics, Result,
};

use crate::attrs::{parse_query_attrs, ContainerAttr, FieldAttr, VariantAttr};

pub fn query_value_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let container: ContainerAttr = parse_query_attrs(&input.attrs)?;

    let (query_value, is_zero) = if container.url_query {
        url_query_body()
    } else {
        match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => (struct_body(named)?, quote!(false)),
                _ => {
                    return Err(Error::new(
                        input.span(),
                        "QueryValue can only be derived for structs with named fields",
                    ))
                }
            },
            Data::Enum(data) => (enum_body(data, &container)?, quote!(false)),
            Data::Union(_) => {
                return Err(Error::new(
                    input.span(),
                    "QueryValue cannot be derived for unions",
                ))
            }
        }
    };

    let name = &input.ident;
    let generics = if container.url_query {
        input.generics.clone()
    } else {
        bound_type_params(&input.generics)
    };
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::lithic::query::QueryValue for #name #ty_generics #where_clause {
            fn query_value(&self, _format: ::lithic::query::Format) -> ::lithic::query::Value {
                #query_value
            }

            fn is_zero(&self) -> bool {
                #is_zero
            }
        }
    })
}

/// Require `QueryValue` of every type parameter, since fields are classified through it.
fn bound_type_params(generics: &Generics) -> Generics {
    let mut bounded = generics.clone();
    let where_clause = bounded.make_where_clause();
    for param in generics.type_params() {
        let ident = &param.ident;
        where_clause
            .predicates
            .push(parse_quote!(#ident: ::lithic::query::QueryValue));
    }
    bounded
}

/// The field table: one `NamedField` per member, in declaration order.
fn struct_body(fields: &FieldsNamed) -> Result<TokenStream> {
    let mut pushes = Vec::with_capacity(fields.named.len());

    for field in &fields.named {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
        let attr: FieldAttr = parse_query_attrs(&field.attrs)?;
        let key = attr.rename.unwrap_or_else(|| ident.unraw().to_string());

        if attr.skip || attr.path_param {
            pushes.push(quote! {
                fields.push(::lithic::query::NamedField::excluded(#key));
            });
            continue;
        }

        let format = attr.format.tokens();
        let push = quote! {
            fields.push(::lithic::query::NamedField::new(
                #key,
                ::lithic::query::QueryValue::query_value(&self.#ident, #format),
            ));
        };
        if attr.omit_default {
            pushes.push(quote! {
                if !::lithic::query::QueryValue::is_zero(&self.#ident) {
                    #push
                }
            });
        } else {
            pushes.push(push);
        }
    }

    let count = pushes.len();
    Ok(quote! {
        let mut fields = ::std::vec::Vec::with_capacity(#count);
        #(#pushes)*
        ::lithic::query::Value::Struct(fields)
    })
}

/// Unit enums encode as their (possibly renamed) variant name.
fn enum_body(data: &DataEnum, container: &ContainerAttr) -> Result<TokenStream> {
    let mut arms = Vec::with_capacity(data.variants.len());

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.span(),
                "QueryValue can only be derived for enums with unit variants",
            ));
        }
        let attr: VariantAttr = parse_query_attrs(&variant.attrs)?;
        let ident = &variant.ident;
        let name = match (attr.rename, container.rename_all) {
            (Some(rename), _) => rename,
            (None, Some(rule)) => rule.apply(&ident.unraw().to_string()),
            (None, None) => ident.unraw().to_string(),
        };
        arms.push(quote! {
            Self::#ident => ::lithic::query::Value::Scalar(::std::string::String::from(#name)),
        });
    }

    if arms.is_empty() {
        return Ok(quote!(::lithic::query::Value::Absent));
    }

    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}

/// Types with their own `UrlQuery` implementation are spliced, not decomposed.
fn url_query_body() -> (TokenStream, TokenStream) {
    (
        quote! {
            ::lithic::query::Value::Encoded(::lithic::query::UrlQuery::url_query(self))
        },
        quote! {
            ::lithic::query::UrlQuery::url_query(self).is_empty()
        },
    )
}

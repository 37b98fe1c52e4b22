// Copyright (c) 2023 Lithic (lithic.com)
// This file is part of the Lithic Rust client.

// This program is free software: you can redistribute it and/or modify it under the terms of the GNU General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// This program is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
// You should have received a copy of the GNU General Public License along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Parsing of `#[query(...)]` attributes.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, LitStr, Meta, MetaNameValue, Result, Token,
};

/// Value of `#[query(format = "...")]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatHint {
    #[default]
    Default,
    Date,
    DateTime,
    Binary,
}

impl FormatHint {
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "date" => Ok(FormatHint::Date),
            "date-time" => Ok(FormatHint::DateTime),
            "binary" | "byte" => Ok(FormatHint::Binary),
            other => Err(Error::new(
                span,
                format!(
                    "unknown query format: '{}'. Expected one of: date, date-time, binary",
                    other
                ),
            )),
        }
    }

    pub fn tokens(self) -> TokenStream {
        match self {
            FormatHint::Default => quote!(::lithic::query::Format::Default),
            FormatHint::Date => quote!(::lithic::query::Format::Date),
            FormatHint::DateTime => quote!(::lithic::query::Format::DateTime),
            FormatHint::Binary => quote!(::lithic::query::Format::Binary),
        }
    }
}

/// Value of `#[query(rename_all = "...")]` on enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    ScreamingSnakeCase,
    SnakeCase,
    Lowercase,
    Uppercase,
}

impl RenameRule {
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnakeCase),
            "snake_case" => Ok(RenameRule::SnakeCase),
            "lowercase" => Ok(RenameRule::Lowercase),
            "UPPERCASE" => Ok(RenameRule::Uppercase),
            other => Err(Error::new(
                span,
                format!(
                    "unknown rename rule: '{}'. Expected one of: SCREAMING_SNAKE_CASE, snake_case, lowercase, UPPERCASE",
                    other
                ),
            )),
        }
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            RenameRule::ScreamingSnakeCase => to_snake_case(name).to_ascii_uppercase(),
            RenameRule::SnakeCase => to_snake_case(name),
            RenameRule::Lowercase => name.to_ascii_lowercase(),
            RenameRule::Uppercase => name.to_ascii_uppercase(),
        }
    }
}

/// Field-level attributes.
#[derive(Debug, Clone, Default)]
pub struct FieldAttr {
    pub rename: Option<String>,
    pub skip: bool,
    pub path_param: bool,
    pub omit_default: bool,
    pub format: FormatHint,
}

impl QueryAttrs for FieldAttr {
    fn apply(&mut self, meta: &Meta) -> Result<()> {
        match meta {
            Meta::Path(p) if p.is_ident("skip") => self.skip = true,
            Meta::Path(p) if p.is_ident("path_param") => self.path_param = true,
            Meta::Path(p) if p.is_ident("omit_default") => self.omit_default = true,
            Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                ensure_unset(self.rename.is_none(), nv, "rename")?;
                self.rename = Some(string_value(nv, "rename")?.value());
            }
            Meta::NameValue(nv) if nv.path.is_ident("format") => {
                ensure_unset(self.format == FormatHint::Default, nv, "format")?;
                let s = string_value(nv, "format")?;
                self.format = FormatHint::from_str(&s.value(), s.span())?;
            }
            _ => {
                return Err(Error::new(
                    meta.span(),
                    "unknown query attribute. Expected: rename = \"...\", format = \"...\", skip, path_param, or omit_default",
                ))
            }
        }
        Ok(())
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();
        fold_metas(&mut attr, input)?;
        Ok(attr)
    }
}

/// Container-level attributes.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    pub rename_all: Option<RenameRule>,
    pub url_query: bool,
}

impl QueryAttrs for ContainerAttr {
    fn apply(&mut self, meta: &Meta) -> Result<()> {
        match meta {
            Meta::Path(p) if p.is_ident("url_query") => self.url_query = true,
            Meta::NameValue(nv) if nv.path.is_ident("rename_all") => {
                ensure_unset(self.rename_all.is_none(), nv, "rename_all")?;
                let s = string_value(nv, "rename_all")?;
                self.rename_all = Some(RenameRule::from_str(&s.value(), s.span())?);
            }
            _ => {
                return Err(Error::new(
                    meta.span(),
                    "unknown query attribute. Expected: rename_all = \"...\" or url_query",
                ))
            }
        }
        Ok(())
    }
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();
        fold_metas(&mut attr, input)?;
        Ok(attr)
    }
}

/// Variant-level attributes.
#[derive(Debug, Clone, Default)]
pub struct VariantAttr {
    pub rename: Option<String>,
}

impl QueryAttrs for VariantAttr {
    fn apply(&mut self, meta: &Meta) -> Result<()> {
        match meta {
            Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                ensure_unset(self.rename.is_none(), nv, "rename")?;
                self.rename = Some(string_value(nv, "rename")?.value());
            }
            _ => {
                return Err(Error::new(
                    meta.span(),
                    "unknown query attribute. Expected: rename = \"...\"",
                ))
            }
        }
        Ok(())
    }
}

impl Parse for VariantAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = VariantAttr::default();
        fold_metas(&mut attr, input)?;
        Ok(attr)
    }
}

/// A set of options that `#[query(...)]` items are folded into, one item at a time.
pub trait QueryAttrs: Default {
    fn apply(&mut self, meta: &Meta) -> Result<()>;
}

fn fold_metas<T: QueryAttrs>(attr: &mut T, input: ParseStream) -> Result<()> {
    let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;
    for meta in &content {
        attr.apply(meta)?;
    }
    Ok(())
}

fn ensure_unset(unset: bool, nv: &MetaNameValue, name: &str) -> Result<()> {
    if unset {
        Ok(())
    } else {
        Err(Error::new(
            nv.span(),
            format!("duplicate query attribute `{}`", name),
        ))
    }
}

fn string_value(nv: &MetaNameValue, name: &str) -> Result<LitStr> {
    match &nv.value {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", name),
        )),
    }
}

/// Fold every `#[query(...)]` attribute in `attrs` into one set of options.
pub fn parse_query_attrs<T: QueryAttrs>(attrs: &[Attribute]) -> Result<T> {
    let mut parsed = T::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("query")) {
        let content = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
        for meta in &content {
            parsed.apply(meta)?;
        }
    }
    Ok(parsed)
}

/// Convert a CamelCase identifier to snake_case.
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
            prev_was_lower = false;
        } else {
            result.push(c);
            prev_was_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }

    result
}

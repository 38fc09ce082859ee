//! Field attribute parsing for the Record derive macro.
//!
//! Handles `#[orm(...)]` and the `rename` key of `#[serde(...)]`.

use syn::punctuated::Punctuated;
use syn::{Result, Token};

/// Parsed `#[orm(...)]` field attribute.
#[derive(Debug, Default, PartialEq)]
pub(super) struct FieldAttr {
    pub is_id: bool,
    pub skip: bool,
    pub column: Option<String>,
}

impl FieldAttr {
    fn merge(&mut self, other: FieldAttr) {
        self.is_id |= other.is_id;
        self.skip |= other.skip;
        if other.column.is_some() {
            self.column = other.column;
        }
    }
}

impl syn::parse::Parse for FieldAttr {
    fn parse(input: syn::parse::ParseStream) -> Result<Self> {
        let mut attr = FieldAttr::default();

        while !input.is_empty() {
            let ident: syn::Ident = input.parse()?;
            if ident == "id" {
                attr.is_id = true;
            } else if ident == "skip" {
                attr.skip = true;
            } else if ident == "column" {
                let _: Token![=] = input.parse()?;
                let value: syn::LitStr = input.parse()?;
                attr.column = Some(value.value());
            } else {
                return Err(syn::Error::new_spanned(
                    &ident,
                    "unknown orm attribute; expected `id`, `skip` or `column = \"...\"`",
                ));
            }

            if input.is_empty() {
                break;
            }
            let _: Token![,] = input.parse()?;
        }

        Ok(attr)
    }
}

/// All `#[orm(...)]` attributes on a field, merged.
pub(super) fn orm_attr(field: &syn::Field) -> Result<FieldAttr> {
    let mut merged = FieldAttr::default();
    for attr in &field.attrs {
        if attr.path().is_ident("orm") {
            merged.merge(attr.parse_args::<FieldAttr>()?);
        }
    }
    Ok(merged)
}

/// `#[serde(rename = "...")]`, if present.
///
/// Other serde keys are ignored, as is any serde attribute this parser does
/// not understand; serde reports those itself.
pub(super) fn serde_rename(field: &syn::Field) -> Option<String> {
    field
        .attrs
        .iter()
        .filter(|attr| attr.path().is_ident("serde"))
        .filter_map(|attr| {
            attr.parse_args_with(Punctuated::<syn::Meta, Token![,]>::parse_terminated)
                .ok()
        })
        .flatten()
        .find_map(|meta| match meta {
            syn::Meta::NameValue(nv) if nv.path.is_ident("rename") => match nv.value {
                syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit),
                    ..
                }) => Some(lit.value()),
                _ => None,
            },
            _ => None,
        })
}

//! Record derive macro implementation

mod attrs;

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Result};

/// One field after name resolution.
struct ResolvedField {
    ident: syn::Ident,
    ty: syn::Type,
    column: String,
    identity: bool,
    skip: bool,
}

/// Column name precedence: `#[orm(column)]`, `#[serde(rename)]`, then the
/// lower-cased field name. Empty names fall through; `-` means skip.
fn resolve_field(field: &syn::Field) -> Result<ResolvedField> {
    let Some(ident) = field.ident.clone() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let attr = attrs::orm_attr(field)?;

    let mut skip = attr.skip;
    let explicit = attr.column.filter(|c| !c.is_empty());
    if explicit.as_deref() == Some("-") {
        skip = true;
    }
    let column = explicit
        .filter(|c| c != "-")
        .or_else(|| attrs::serde_rename(field).filter(|c| !c.is_empty()))
        .unwrap_or_else(|| {
            let name = ident.to_string();
            name.strip_prefix("r#").unwrap_or(&name).to_lowercase()
        });

    Ok(ResolvedField {
        ident,
        ty: field.ty.clone(),
        column,
        identity: attr.is_id,
        skip,
    })
}

fn resolve_fields(input: &DeriveInput) -> Result<Vec<ResolvedField>> {
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut resolved: Vec<ResolvedField> = fields.iter().map(resolve_field).collect::<Result<_>>()?;

    let marked: Vec<usize> = resolved
        .iter()
        .enumerate()
        .filter(|(_, f)| f.identity)
        .map(|(i, _)| i)
        .collect();
    match marked.as_slice() {
        [] => {
            if let Some(f) = resolved.iter_mut().find(|f| !f.skip && f.column == "id") {
                f.identity = true;
            }
        }
        [single] => {
            if resolved[*single].skip {
                return Err(syn::Error::new_spanned(
                    &resolved[*single].ident,
                    "the identity field cannot be skipped",
                ));
            }
        }
        [_, second, ..] => {
            return Err(syn::Error::new_spanned(
                &resolved[*second].ident,
                "only one field can be marked #[orm(id)]",
            ));
        }
    }

    Ok(resolved)
}

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let fields = resolve_fields(&input)?;

    let defs = fields.iter().map(|f| {
        let field_name = f.ident.to_string();
        let field_name = field_name.strip_prefix("r#").unwrap_or(&field_name);
        let column = &f.column;
        let identity = f.identity;
        let skip = f.skip;
        quote! {
            fluentql::FieldDef {
                field: #field_name,
                column: #column,
                identity: #identity,
                skip: #skip,
            }
        }
    });

    let bound: Vec<(usize, &ResolvedField)> =
        fields.iter().enumerate().filter(|(_, f)| !f.skip).collect();

    let read_arms = bound.iter().map(|(idx, f)| {
        let ident = &f.ident;
        quote! {
            #idx => ::core::option::Option::Some(fluentql::ToValue::to_value(&self.#ident)),
        }
    });

    let write_arms = bound.iter().map(|(idx, f)| {
        let ident = &f.ident;
        let ty = &f.ty;
        quote! {
            #idx => {
                self.#ident = <#ty as fluentql::FromValue>::from_value(value)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let set_identity = match fields.iter().find(|f| f.identity) {
        Some(f) => {
            let ident = &f.ident;
            let ty = &f.ty;
            quote! {
                match <#ty as fluentql::FromValue>::from_value(fluentql::Value::UInt(id)) {
                    ::core::result::Result::Ok(v) => {
                        self.#ident = v;
                        true
                    }
                    ::core::result::Result::Err(_) => false,
                }
            }
        }
        None => quote! {
            let _ = id;
            false
        },
    };

    Ok(quote! {
        impl #impl_generics fluentql::Record for #name #ty_generics #where_clause {
            const FIELDS: &'static [fluentql::FieldDef] = &[#(#defs),*];

            fn read_field(&self, idx: usize) -> ::core::option::Option<fluentql::Value> {
                match idx {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn write_field(
                &mut self,
                idx: usize,
                value: fluentql::Value,
            ) -> ::core::result::Result<(), ::std::string::String> {
                match idx {
                    #(#write_arms)*
                    _ => {
                        let _ = value;
                        ::core::result::Result::Err(::std::format!("field {} is not writable", idx))
                    }
                }
            }

            fn set_identity(&mut self, id: u64) -> bool {
                #set_identity
            }
        }
    })
}

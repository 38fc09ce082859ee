//! Derive macros for fluentql
//!
//! Provides `#[derive(Record)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod record;

/// Derive the `Record` trait for a struct.
///
/// # Example
///
/// ```ignore
/// use fluentql::Record;
///
/// #[derive(Default, Record, serde::Serialize)]
/// struct User {
///     id: u64,
///     #[orm(column = "user_name")]
///     name: String,
///     #[serde(rename = "mail")]
///     email: Option<String>,
///     #[orm(skip)]
///     cached_score: f64,
/// }
/// ```
///
/// # Attributes
///
/// - `#[orm(column = "name")]` - Map field to a different column name
///   (`"-"` behaves like `skip`)
/// - `#[orm(skip)]` - Never bind or scan this field
/// - `#[orm(id)]` - Server-generated key: left out of writes, receives the
///   inserted id from `run_assign`. Defaults to the field named `id`.
///
/// Without `column`, `#[serde(rename = "...")]` is used (on types that also
/// derive serde), then the field name lower-cased.
#[proc_macro_derive(Record, attributes(orm))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

//! Derive macro for the rowmap model layer
//!
//! This crate provides `#[derive(Model)]`, which implements `rowmap::Model`
//! for a struct with named fields. It is re-exported from the `rowmap`
//! crate, so users typically don't need to depend on this crate directly.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod model;

/// Derive macro for mapping a struct to a table.
///
/// Fields become columns in declaration order. Wrap a field in
/// `PrimaryKey<T>` to mark the identity column and in `Option<T>` to make it
/// nullable.
///
/// # Attributes
///
/// - `#[model(table = "name")]` on the struct - Use this table instead of the derived name
/// - `#[model(default)]` on a field - Fall back to `Default::default()` when no value is supplied
///
/// # Example
///
/// ```ignore
/// use rowmap::{Model, PrimaryKey};
///
/// #[derive(Model)]
/// #[model(table = "people")]
/// pub struct Person {
///     pub id: PrimaryKey<i64>,
///     pub name: String,
///     pub email: Option<String>,
///     #[model(default)]
///     pub visits: u32,
/// }
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::derive_model_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

//! Model derive macro implementation

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Attribute, Data, DeriveInput, Error, Field, Fields, Ident, Result};

/// Parsed `#[model(...)]` configuration of one field
struct FieldConfig {
    ident: Ident,
    column_name: String,
    /// Whether a missing value falls back to `Default::default()`
    default: bool,
    ty: syn::Type,
}

fn unknown_attribute(path: &syn::Path) -> String {
    format!(
        "unknown model attribute `{}`",
        path.get_ident().map(|i| i.to_string()).unwrap_or_default()
    )
}

fn parse_table(attrs: &[Attribute]) -> Result<Option<String>> {
    let mut table = None;
    for attr in attrs {
        if attr.path().is_ident("model") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("table") {
                    let lit: syn::LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(Error::new(lit.span(), "table name must not be empty"));
                    }
                    table = Some(lit.value());
                    Ok(())
                } else {
                    Err(meta.error(unknown_attribute(&meta.path)))
                }
            })?;
        }
    }
    Ok(table)
}

fn parse_field_config(field: &Field) -> Result<FieldConfig> {
    let ident = field
        .ident
        .clone()
        .ok_or_else(|| Error::new(field.span(), "tuple structs are not supported"))?;

    let mut default = false;
    for attr in &field.attrs {
        if attr.path().is_ident("model") {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    default = true;
                    Ok(())
                } else {
                    Err(meta.error(unknown_attribute(&meta.path)))
                }
            })?;
        }
    }

    // raw identifiers (`r#type`) map to their bare column name
    let column_name = ident.to_string().trim_start_matches("r#").to_string();

    Ok(FieldConfig {
        ident,
        column_name,
        default,
        ty: field.ty.clone(),
    })
}

pub fn derive_model_impl(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.to_string();

    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "generic models are not supported",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => return Err(Error::new(input.span(), "only named fields are supported")),
        },
        _ => return Err(Error::new(input.span(), "only structs are supported")),
    };

    if fields.is_empty() {
        return Err(Error::new(
            input.span(),
            "a model must declare at least one field",
        ));
    }

    let table = match parse_table(&input.attrs)? {
        Some(table) => quote! { ::std::option::Option::Some(#table) },
        None => quote! { ::std::option::Option::None },
    };

    let field_configs: Vec<FieldConfig> = fields
        .iter()
        .map(parse_field_config)
        .collect::<Result<Vec<_>>>()?;

    let field_defs: Vec<TokenStream> = field_configs
        .iter()
        .map(|config| {
            let column_name = &config.column_name;
            let ty = &config.ty;
            let has_default = config.default;
            quote! {
                rowmap::FieldDef {
                    name: #column_name,
                    kind: <#ty as rowmap::Column>::KIND,
                    nullable: <#ty as rowmap::Column>::NULLABLE,
                    primary_key: <#ty as rowmap::Column>::PRIMARY_KEY,
                    has_default: #has_default,
                }
            }
        })
        .collect();

    let to_values: Vec<TokenStream> = field_configs
        .iter()
        .map(|config| {
            let field_ident = &config.ident;
            quote! { rowmap::ToValue::to_value(&self.#field_ident) }
        })
        .collect();

    let row_extractions: Vec<TokenStream> = field_configs
        .iter()
        .map(|config| {
            let field_ident = &config.ident;
            let column_name = &config.column_name;
            let ty = &config.ty;
            quote! {
                #field_ident: rowmap::Row::get::<#ty>(row, #column_name)?
            }
        })
        .collect();

    let value_extractions: Vec<TokenStream> = field_configs
        .iter()
        .map(|config| {
            let field_ident = &config.ident;
            let column_name = &config.column_name;
            let ty = &config.ty;
            if config.default {
                quote! {
                    #field_ident: values.take_or_default::<#ty>(#column_name)?
                }
            } else {
                quote! {
                    #field_ident: values.take_field::<#ty>(#type_name, #column_name)?
                }
            }
        })
        .collect();

    let expanded = quote! {
        impl rowmap::Model for #name {
            fn schema() -> &'static rowmap::ModelSchema {
                static FIELDS: &[rowmap::FieldDef] = &[#(#field_defs),*];
                static SCHEMA: rowmap::ModelSchema = rowmap::ModelSchema {
                    type_name: #type_name,
                    table: #table,
                    fields: FIELDS,
                };
                &SCHEMA
            }

            fn to_values(&self) -> ::std::vec::Vec<rowmap::Value> {
                ::std::vec![#(#to_values),*]
            }

            fn from_row(row: &rowmap::Row) -> rowmap::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #(#row_extractions),*
                })
            }

            fn from_validated(mut values: rowmap::FieldValues) -> rowmap::Result<Self> {
                ::std::result::Result::Ok(Self {
                    #(#value_extractions),*
                })
            }
        }
    };

    Ok(expanded)
}

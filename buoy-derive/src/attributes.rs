//! Attribute parsing utilities

use syn::{Field, LitStr};

/// Options read from a field's `#[model(...)]` attributes
#[derive(Debug, Default)]
pub struct FieldOptions {
    pub property: Option<String>,
    pub skip: bool,
}

/// Parse every `#[model(...)]` attribute on a field
///
/// Unknown keys and an empty property name are compile errors.
pub fn parse_field_options(field: &Field) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();
    for attr in &field.attrs {
        if !attr.path().is_ident("model") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("property") {
                let lit: LitStr = meta.value()?.parse()?;
                if lit.value().trim().is_empty() {
                    return Err(syn::Error::new_spanned(&lit, "property name must not be empty"));
                }
                options.property = Some(lit.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                options.skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `property = \"...\"` or `skip`"))
            }
        })?;
    }
    Ok(options)
}

//! Parsing of `#[asciitree(...)]` field attributes.

use syn::{Attribute, Error, Result};

/// Role words accepted inside `#[asciitree(...)]`.
const ROLES: &[&str] = &["label", "properties", "children", "roots"];

/// Parsed attributes of one field.
#[derive(Debug, Default, PartialEq)]
pub struct TreeAttrs {
    /// Roles in the order they were written.
    pub roles: Vec<String>,
    /// Whether the field's roles are promoted into the outer record.
    pub embed: bool,
}

impl TreeAttrs {
    /// The roles as a comma-separated tag string.
    pub fn tags(&self) -> String {
        self.roles.join(",")
    }

    /// Whether the field takes part in the tree at all.
    pub fn is_used(&self) -> bool {
        self.embed || !self.roles.is_empty()
    }
}

/// Collects every `#[asciitree(...)]` attribute of a field.
pub fn parse_tree_attrs(attrs: &[Attribute]) -> Result<TreeAttrs> {
    let mut result = TreeAttrs::default();

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("asciitree")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("embed") {
                result.embed = true;
                return Ok(());
            }

            let word = meta
                .path
                .get_ident()
                .map(ToString::to_string)
                .filter(|word| ROLES.contains(&word.as_str()))
                .ok_or_else(|| {
                    meta.error(
                        "unknown asciitree attribute, expected one of: \
                         label, properties, children, roots, embed",
                    )
                })?;

            if result.roles.contains(&word) {
                return Err(meta.error(format!("duplicate asciitree role `{word}`")));
            }
            result.roles.push(word);
            Ok(())
        })?;
    }

    Ok(result)
}

/// Fails on lifetime parameters, which cannot be described by a `TypeId`.
pub fn reject_lifetimes(generics: &syn::Generics) -> Result<()> {
    match generics.lifetimes().next() {
        Some(lifetime) => Err(Error::new_spanned(
            lifetime,
            "AsciiTree cannot be derived for types with lifetime parameters",
        )),
        None => Ok(()),
    }
}

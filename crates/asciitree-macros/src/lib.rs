//! Derive macro for asciitree records.
//!
//! `#[derive(AsciiTree)]` describes a struct to the asciitree renderer: it
//! generates the static shape (member names and role tags), member access
//! by index, and the reflection entry point.
//!
//! # Example
//!
//! ```rust,ignore
//! use asciitree::AsciiTree;
//!
//! #[derive(AsciiTree)]
//! struct Common {
//!     #[asciitree(label)]
//!     name: String,
//! }
//!
//! #[derive(AsciiTree)]
//! struct Package {
//!     #[asciitree(embed)]
//!     common: Common,
//!     #[asciitree(properties)]
//!     facts: Vec<String>,
//!     #[asciitree(children)]
//!     dependencies: Vec<Package>,
//! }
//! ```
//!
//! This crate is re-exported by `asciitree` under its `derive` feature; the
//! generated code refers to `::asciitree` paths.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod record;

/// Derives `Shaped`, `Record`, and `Reflect` for a struct with named fields.
///
/// # Field Attributes
///
/// - `#[asciitree(label)]`: the node label, usually a `String`
/// - `#[asciitree(properties)]`: the node properties, usually a `Vec<String>`
/// - `#[asciitree(children)]`: the child nodes, any sequence of records or
///   mappings
/// - `#[asciitree(roots)]`: the top-level nodes when the struct is rendered
///   as a roots container
/// - `#[asciitree(embed)]`: a member that is itself a derived record; its
///   roles are promoted unless defined directly
///
/// Roles can be combined, as in `#[asciitree(label, roots)]`.
///
/// # Compile-Time Errors
///
/// - Enums, unions, and tuple structs
/// - Lifetime parameters
/// - Unknown words inside `#[asciitree(...)]`
/// - The same role twice on one field
#[proc_macro_derive(AsciiTree, attributes(asciitree))]
pub fn asciitree_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::asciitree_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

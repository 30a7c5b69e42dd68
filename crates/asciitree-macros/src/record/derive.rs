//! Implementation of the `#[derive(AsciiTree)]` macro.
//!
//! Generates three impls for the annotated struct:
//!
//! - `Shaped`: a constant `Shape` listing every field with its role tags
//! - `Record`: field access by declaration index, for tagged and embedded
//!   fields only
//! - `Reflect`: exposes the struct as a record value

use proc_macro2::{TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::{parse_quote, spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_tree_attrs, reject_lifetimes, TreeAttrs};

/// A field as seen by the generated code.
struct FieldInfo {
    ident: syn::Ident,
    ty: syn::Type,
    attrs: TreeAttrs,
}

/// Main implementation of the AsciiTree derive macro.
pub fn asciitree_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Only structs with named fields carry role attributes
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            Fields::Unit => {
                return Err(Error::new(
                    input.span(),
                    "AsciiTree needs named fields to tag; a unit struct has none",
                ))
            }
            Fields::Unnamed(_) => {
                return Err(Error::new(
                    input.span(),
                    "AsciiTree can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "AsciiTree can only be derived for structs",
            ))
        }
    };
    reject_lifetimes(&input.generics)?;

    // Collect every field, tagged or not, in declaration order
    let infos = fields
        .iter()
        .map(|field| {
            let ident = field
                .ident
                .clone()
                .ok_or_else(|| Error::new(field.span(), "expected named field"))?;
            Ok(FieldInfo {
                ident,
                ty: field.ty.clone(),
                attrs: parse_tree_attrs(&field.attrs)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let field_defs = infos.iter().map(field_def);

    // Generate match arms for tagged and embedded fields only
    let field_arms = infos
        .iter()
        .enumerate()
        .filter(|(_, info)| info.attrs.is_used())
        .map(|(index, info)| {
            let ident = &info.ident;
            quote! {
                #index => ::asciitree::Reflect::reflect(&self.#ident),
            }
        });

    // Bound type parameters only; member types stay unbounded
    let mut generics = input.generics.clone();
    let params: Vec<syn::Ident> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let mut reflected = Vec::new();
    let mut embedded = Vec::new();
    for info in infos.iter().filter(|info| info.attrs.is_used()) {
        let mentioned = mentioned_params(&info.ty, &params);
        if info.attrs.embed && !mentioned.is_empty() {
            embedded.push(info.ty.clone());
        }
        for param in mentioned {
            if !reflected.contains(&param) {
                reflected.push(param);
            }
        }
    }
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
        if reflected.contains(&param.ident) {
            param.bounds.push(parse_quote!(::asciitree::Reflect));
        }
    }
    if !embedded.is_empty() {
        let where_clause = generics.make_where_clause();
        for ty in &embedded {
            where_clause
                .predicates
                .push(parse_quote!(#ty: ::asciitree::Shaped));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    let type_name = struct_name.to_string();

    // Generate the impl blocks
    let expanded = quote! {
        impl #impl_generics ::asciitree::Shaped for #struct_name #ty_generics #where_clause {
            const SHAPE: &'static ::asciitree::Shape = &::asciitree::Shape {
                type_id: ::core::any::TypeId::of::<Self>,
                type_name: #type_name,
                fields: &[#(#field_defs),*],
            };
        }

        impl #impl_generics ::asciitree::Record for #struct_name #ty_generics #where_clause {
            fn shape(&self) -> &'static ::asciitree::Shape {
                <Self as ::asciitree::Shaped>::SHAPE
            }

            fn field(&self, index: usize) -> ::asciitree::Value<'_> {
                match index {
                    #(#field_arms)*
                    _ => ::asciitree::Value::Absent,
                }
            }
        }

        impl #impl_generics ::asciitree::Reflect for #struct_name #ty_generics #where_clause {
            fn reflect(&self) -> ::asciitree::Value<'_> {
                ::asciitree::Value::Record(self)
            }
        }
    };

    Ok(expanded)
}

/// Builds the `FieldDef` literal of one field.
fn field_def(info: &FieldInfo) -> TokenStream {
    let name = info.ident.to_string();
    let tags = info.attrs.tags();
    let embed = if info.attrs.embed {
        let ty = &info.ty;
        quote! { ::core::option::Option::Some(<#ty as ::asciitree::Shaped>::SHAPE) }
    } else {
        quote! { ::core::option::Option::None }
    };
    quote! {
        ::asciitree::FieldDef {
            name: #name,
            tags: #tags,
            embed: #embed,
        }
    }
}

/// Returns the type parameters that occur anywhere in `ty`.
fn mentioned_params(ty: &syn::Type, params: &[syn::Ident]) -> Vec<syn::Ident> {
    fn walk(tokens: TokenStream, params: &[syn::Ident], found: &mut Vec<syn::Ident>) {
        for token in tokens {
            match token {
                TokenTree::Ident(ident) => {
                    if params.contains(&ident) && !found.contains(&ident) {
                        found.push(ident);
                    }
                }
                TokenTree::Group(group) => walk(group.stream(), params, found),
                _ => {}
            }
        }
    }

    let mut found = Vec::new();
    walk(ty.to_token_stream(), params, &mut found);
    found
}

mod attrs;
mod derive;

pub use derive::asciitree_derive_impl;

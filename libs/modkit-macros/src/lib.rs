//! Procedural macros for modkit.

mod domain_model;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Marks a struct or enum as a domain model, validating at macro-expansion
/// time that none of its fields reference infrastructure types (database
/// drivers, HTTP frameworks, transport clients).
#[proc_macro_attribute]
pub fn domain_model(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    TokenStream::from(domain_model::expand_domain_model(&input))
}

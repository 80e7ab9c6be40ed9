mod derive;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

use crate::derive::expand_bit;

/// Implement `xpad_bit_mask::Bitable` for a fieldless enum.
///
/// A variant with an explicit discriminant (`Start = 12`) occupies that bit;
/// a variant without one occupies its declaration index.
#[proc_macro_derive(Bit)]
pub fn derive_bit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_bit(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Expr, ExprLit, Fields, Lit};

pub(crate) fn expand_bit(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "Bit can be derived only for enums",
        ));
    };

    // Explicit integer discriminants pick the bit, otherwise the declaration index does.
    let mut arms = Vec::with_capacity(data.variants.len());
    for (i, variant) in data.variants.iter().enumerate() {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Bit supports only fieldless enum variants",
            ));
        }
        let position = match &variant.discriminant {
            None => i as u64,
            Some((
                _,
                Expr::Lit(ExprLit {
                    lit: Lit::Int(lit), ..
                }),
            )) => match lit.base10_parse::<u64>() {
                Ok(value) if value < 64 => value,
                _ => {
                    return Err(syn::Error::new_spanned(
                        lit,
                        "Bit discriminants must be in 0..64",
                    ));
                }
            },
            Some((_, expr)) => {
                return Err(syn::Error::new_spanned(
                    expr,
                    "Bit discriminants must be integer literals",
                ));
            }
        };
        let ident = &variant.ident;
        arms.push(quote! { #name::#ident => #position });
    }

    Ok(quote! {
        impl ::xpad_bit_mask::Bitable for #name {
            #[inline]
            fn bit(&self) -> u64 {
                1u64 << ::xpad_bit_mask::Bitable::index(self)
            }

            #[inline]
            fn index(&self) -> u32 {
                let position: u64 = match self { #( #arms, )* };
                position as u32
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::expand_bit;
    use syn::parse_quote;

    fn error_of(input: syn::DeriveInput) -> String {
        expand_bit(&input).unwrap_err().to_string()
    }

    #[test]
    fn rejects_structs() {
        let message = error_of(parse_quote! {
            struct Pad { up: bool }
        });
        assert_eq!(message, "Bit can be derived only for enums");
    }

    #[test]
    fn rejects_variants_with_fields() {
        let message = error_of(parse_quote! {
            enum Pad { Up, Stick(i16) }
        });
        assert_eq!(message, "Bit supports only fieldless enum variants");
    }

    #[test]
    fn rejects_out_of_range_discriminants() {
        let message = error_of(parse_quote! {
            enum Pad { Up = 64 }
        });
        assert_eq!(message, "Bit discriminants must be in 0..64");
    }

    #[test]
    fn rejects_computed_discriminants() {
        let message = error_of(parse_quote! {
            enum Pad { Up = 1 + 1 }
        });
        assert_eq!(message, "Bit discriminants must be integer literals");
    }

    #[test]
    fn expands_to_bitable_impl() {
        let tokens = expand_bit(&parse_quote! {
            enum Pad { Up = 3, Down }
        })
        .unwrap()
        .to_string();
        assert!(tokens.contains("Bitable for Pad"));
        assert!(tokens.contains("3u64"));
        assert!(tokens.contains("1u64"));
    }
}

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Expr, ExprLit, Fields, Lit};

const MAX_BITS: u64 = 64;

pub(crate) fn handle_derive_bit(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let Data::Enum(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            name,
            "Bit can be derived only for enums",
        ));
    };

    let mut positions = Vec::with_capacity(data.variants.len());
    let mut next: u64 = 0;
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Bit supports only fieldless enum variants",
            ));
        }
        let position = match &variant.discriminant {
            Some((_, expr)) => discriminant(expr)?,
            None => next,
        };
        if position >= MAX_BITS {
            return Err(syn::Error::new_spanned(
                variant,
                format!("bit position {position} does not fit into 64 bits"),
            ));
        }
        positions.push((&variant.ident, position));
        next = position + 1;
    }

    let bit_arms = positions
        .iter()
        .map(|(v, pos)| quote! { #name::#v => 1u64 << #pos });
    let index_arms = positions.iter().map(|(v, pos)| {
        let idx = *pos as u32;
        quote! { #name::#v => #idx }
    });
    let all = positions.iter().map(|(v, _)| quote! { #name::#v });

    Ok(quote! {
        impl ::x360ctrl_bit_mask::Bitable for #name {
            const ALL: &'static [Self] = &[ #( #all, )* ];

            #[inline]
            fn bit(&self) -> u64 {
                match self { #( #bit_arms, )* }
            }

            #[inline]
            fn index(&self) -> u32 {
                match self { #( #index_arms, )* }
            }
        }
    })
}

fn discriminant(expr: &Expr) -> syn::Result<u64> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Int(int), ..
        }) => int.base10_parse::<u64>(),
        _ => Err(syn::Error::new_spanned(
            expr,
            "Bit requires integer literal discriminants",
        )),
    }
}

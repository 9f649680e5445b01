mod derive;

use proc_macro::TokenStream;

use crate::derive::handle_derive_bit;

/// Implements `x360ctrl_bit_mask::Bitable` for a fieldless enum.
///
/// A variant with an explicit integer discriminant uses it as its bit
/// position; the others follow the previous variant.
#[proc_macro_derive(Bit)]
pub fn derive_bit(input: TokenStream) -> TokenStream {
    handle_derive_bit(input)
}

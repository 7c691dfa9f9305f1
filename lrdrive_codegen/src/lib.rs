extern crate proc_macro;

use proc_macro::TokenStream;

use syn::{DeriveInput, parse_macro_input};

use crate::symbols::{generate_enumerable_code, generate_terminal_code, SymbolEnum};

mod symbols;

/// Derives `lrdrive_util::Enumerable` for a field-less enum, indexing the variants in
/// declaration order.
#[proc_macro_derive(Enumerable)]
pub fn derive_enumerable(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let code = match SymbolEnum::from_input(&input) {
        Ok(symbols) => generate_enumerable_code(&symbols),
        Err(errors) => errors,
    };
    code.into()
}

/// Derives `lrdrive_runtime::Terminal`, the variants marked with `#[eof]` and `#[error_token]`
/// become the end of input marker and the error pseudo-token.
#[proc_macro_derive(Terminal, attributes(eof, error_token))]
pub fn derive_terminal(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);

    let code = match SymbolEnum::from_input(&input).and_then(|x| generate_terminal_code(&x)) {
        Ok(code) => code,
        Err(errors) => errors,
    };
    code.into()
}

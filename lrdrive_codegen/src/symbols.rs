use proc_macro2::{Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::{Data, DeriveInput, Fields, Ident};

pub struct SymbolEnum<'a> {
    pub name: &'a Ident,
    pub variants: Vec<SymbolVariant<'a>>,
}

pub struct SymbolVariant<'a> {
    pub name: &'a Ident,
    pub eof: bool,
    pub error: bool,
}

fn compile_error(span: Span, msg: &str) -> TokenStream {
    quote_spanned! {
        span => compile_error!(#msg);
    }
}

impl<'a> SymbolEnum<'a> {
    pub fn from_input(input: &'a DeriveInput) -> Result<Self, TokenStream> {
        let data = match &input.data {
            Data::Enum(x) => x,
            _ => return Err(compile_error(input.ident.span(), "Symbols can only be derived for enums")),
        };

        let mut errors = Vec::new();
        let mut variants = Vec::new();

        for variant in data.variants.iter() {
            match variant.fields {
                Fields::Unit => {},
                _ => {
                    errors.push(compile_error(variant.ident.span(), "Symbol variants cannot carry fields"));
                    continue;
                }
            }
            variants.push(SymbolVariant {
                name: &variant.ident,
                eof: variant.attrs.iter().any(|x| x.path.is_ident("eof")),
                error: variant.attrs.iter().any(|x| x.path.is_ident("error_token")),
            });
        }

        if variants.is_empty() && errors.is_empty() {
            errors.push(compile_error(input.ident.span(), "Symbol enums need at least one variant"));
        }

        if errors.is_empty() {
            Ok(SymbolEnum {
                name: &input.ident,
                variants,
            })
        } else {
            Err(quote!(#(#errors)*))
        }
    }

    fn find_marked(&self, marker: &str, pred: impl Fn(&SymbolVariant) -> bool) -> Result<&'a Ident, TokenStream> {
        let marked: Vec<&SymbolVariant> = self.variants.iter()
            .filter(|x| pred(x))
            .collect();

        match marked.as_slice() {
            [one] => Ok(one.name),
            [] => Err(compile_error(self.name.span(), &format!("Missing #[{}] variant", marker))),
            [_, second, ..] => Err(compile_error(second.name.span(), &format!("Duplicated #[{}] variant", marker))),
        }
    }
}

pub fn generate_enumerable_code(symbols: &SymbolEnum) -> TokenStream {
    let enum_name = symbols.name;
    let token_names: Vec<&Ident> = symbols.variants.iter().map(|x| x.name).collect();

    let enum_index_defs = token_names.iter()
        .enumerate()
        .map(|(index, name)| {
            quote! {
                #enum_name::#name => #index,
            }
        });
    let type_count = token_names.len();

    quote! {
        impl ::lrdrive_util::Enumerable for #enum_name {
            type Iterator = ::core::iter::Cloned<::core::slice::Iter<'static, Self>>;

            fn index(&self) -> usize {
                match self {
                    #(#enum_index_defs)*
                }
            }

            fn enumerate() -> Self::Iterator {
                static TYPES: [#enum_name; #type_count] = [#(#enum_name::#token_names), *];
                TYPES.iter().cloned()
            }
        }
    }
}

pub fn generate_terminal_code(symbols: &SymbolEnum) -> Result<TokenStream, TokenStream> {
    let enum_name = symbols.name;
    let eof = symbols.find_marked("eof", |x| x.eof);
    let error = symbols.find_marked("error_token", |x| x.error);

    let (eof, error) = match (eof, error) {
        (Ok(eof), Ok(error)) => (eof, error),
        (eof, error) => {
            let errors = eof.err().into_iter().chain(error.err());
            return Err(quote!(#(#errors)*))
        }
    };

    if eof == error {
        return Err(compile_error(eof.span(), "The eof and error_token markers need different variants"));
    }

    Ok(quote! {
        impl ::lrdrive_runtime::Terminal for #enum_name {
            fn eof() -> Self {
                #enum_name::#eof
            }

            fn error() -> Self {
                #enum_name::#error
            }
        }
    })
}

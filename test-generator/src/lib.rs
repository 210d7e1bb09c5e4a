use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use std::ffi::OsStr;
use syn::{parse_macro_input, spanned::Spanned};

fn error(span: proc_macro2::Span, message: &str) -> TokenStream {
    TokenStream::from(syn::Error::new(span, message).into_compile_error())
}

/// Generates one test for every `.modus` file found (recursively) in the given directory. Each
/// test calls the annotated function with the path of its file, relative to the workspace root.
#[proc_macro_attribute]
pub fn from_dir(args: TokenStream, input: TokenStream) -> TokenStream {
    let original_input = input.clone();

    let args = parse_macro_input!(args as syn::AttributeArgs);
    let [dir] = args.as_slice() else {
        return error(proc_macro2::Span::call_site(), "expected exactly one argument");
    };
    let syn::NestedMeta::Lit(syn::Lit::Str(dir)) = dir else {
        return error(dir.span(), "first macro argument must be string literal");
    };

    let func = parse_macro_input!(input as syn::ItemFn);
    if func.sig.inputs.len() != 1 {
        return error(func.span(), "function must have exactly one argument");
    }
    let func_ident = func.sig.ident;

    let mut streams: Vec<TokenStream> = Vec::new();
    streams.push(original_input);

    // Cargo invokes the compiler from the workspace root, so `dir` is relative to it
    for entry in walkdir::WalkDir::new(dir.value()).sort_by_file_name() {
        let Ok(entry) = entry else { continue };

        if entry.file_type().is_file() && entry.path().extension() == Some(OsStr::new("modus")) {
            let Some(path) = entry.path().to_str() else { continue };
            let new_name = format!(
                "{}_{}",
                func_ident,
                path.replace(|c: char| !c.is_ascii_alphanumeric() && c != '_', "_")
            );
            let new_ident = syn::Ident::new(&new_name, func_ident.span());
            let arg = Literal::string(path);
            streams.push(
                quote! {
                    #[test]
                    #[allow(warnings)]
                    fn #new_ident() {
                        #func_ident(#arg)
                    }
                }
                .into(),
            );
        }
    }

    TokenStream::from_iter(streams)
}

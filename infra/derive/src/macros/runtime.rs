use proc_macro2::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::punctuated::Punctuated;
use syn::{Error, Expr, ItemFn, Lit, Meta, ReturnType, Token, Type};

/// Expands the `#[dhub_runtime::main]` attribute macro.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "The #[dhub_runtime::main] attribute can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "The #[dhub_runtime::main] attribute requires a Result return type",
        )
        .to_compile_error();
    }

    let name = &input.sig.ident;
    let body = &input.block;
    let vis = &input.vis;
    let attrs = &input.attrs;
    let output = &input.sig.output;

    let runtime_call = match parse_args(args) {
        Ok(call) => call,
        Err(err) => return err,
    };

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = #runtime_call;
            let rt = ::dhub_runtime::build_runtime_with_config(&config)?;
            rt.block_on(async { #body })
        }
    }
}

/// Accepts an optional profile ident followed by an optional `thread_name = "..."`.
fn parse_args(args: TokenStream) -> Result<TokenStream, TokenStream> {
    let metas = Punctuated::<Meta, Token![,]>::parse_terminated
        .parse2(args)
        .map_err(|err| err.to_compile_error())?;

    let mut profile = quote! { ::dhub_runtime::RuntimeConfig::default() };
    let mut thread_name = None;

    for meta in metas {
        match meta {
            Meta::Path(path) => {
                let Some(ident) = path.get_ident() else {
                    return Err(Error::new_spanned(path, "Expected a runtime profile name")
                        .to_compile_error());
                };
                profile = profile_call(ident)?;
            },
            Meta::NameValue(nv) if nv.path.is_ident("thread_name") => {
                let Expr::Lit(expr) = &nv.value else {
                    return Err(Error::new_spanned(&nv.value, "thread_name must be a string")
                        .to_compile_error());
                };
                let Lit::Str(lit) = &expr.lit else {
                    return Err(Error::new_spanned(&nv.value, "thread_name must be a string")
                        .to_compile_error());
                };
                thread_name = Some(lit.clone());
            },
            other => {
                return Err(Error::new_spanned(
                    other,
                    "Unsupported argument; expected a profile or thread_name = \"...\"",
                )
                .to_compile_error());
            },
        }
    }

    Ok(match thread_name {
        Some(name) => quote! { #profile.with_thread_name(#name) },
        None => profile,
    })
}

fn profile_call(ident: &syn::Ident) -> Result<TokenStream, TokenStream> {
    match ident.to_string().as_str() {
        "high_performance" => Ok(quote! { ::dhub_runtime::RuntimeConfig::high_performance() }),
        "memory_efficient" => Ok(quote! { ::dhub_runtime::RuntimeConfig::memory_efficient() }),
        "default" => Ok(quote! { ::dhub_runtime::RuntimeConfig::default() }),
        _ => Err(Error::new_spanned(
            ident,
            "Unknown runtime profile. Use: high_performance, memory_efficient, or default",
        )
        .to_compile_error()),
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}

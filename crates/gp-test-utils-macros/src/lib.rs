// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Attribute macros wrapping tests in a [`gp_test_utils::TestLoggerGuard`].
//!
//! The wrapped body sees a `logger: &mut TestLogger` binding. A test that
//! returns normally (or `Ok`) finalizes its log as a success; a panic or an
//! `Err` return records the failure and prints the log location.

use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{parse_macro_input, spanned::Spanned, ItemFn, ReturnType, Type};

/// Synchronous test with a dedicated log file.
///
/// ```rust,ignore
/// #[gp_test_utils::logged_test]
/// fn parses_page() {
///     logger.log("parsing").unwrap();
/// }
/// ```
#[proc_macro_attribute]
pub fn logged_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(Span::call_site(), "#[logged_test] takes no arguments")
            .to_compile_error()
            .into();
    }

    let input = parse_macro_input!(item as ItemFn);
    if let Some(async_token) = &input.sig.asyncness {
        return syn::Error::new(
            async_token.span(),
            "use #[logged_tokio_test] for async tests",
        )
        .to_compile_error()
        .into();
    }

    expand(input, quote! { #[::core::prelude::v1::test] }, false)
}

/// Tokio test with a dedicated log file.
///
/// Arguments are forwarded to `#[tokio::test(..)]`.
#[proc_macro_attribute]
pub fn logged_tokio_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = TokenStream2::from(attr);
    let input = parse_macro_input!(item as ItemFn);

    if input.sig.asyncness.is_none() {
        return syn::Error::new(
            input.sig.ident.span(),
            "#[logged_tokio_test] requires an async fn",
        )
        .to_compile_error()
        .into();
    }

    let harness = if args.is_empty() {
        quote! { #[::tokio::test] }
    } else {
        quote! { #[::tokio::test( #args )] }
    };
    expand(input, harness, true)
}

fn expand(mut input: ItemFn, harness: TokenStream2, is_async: bool) -> TokenStream {
    input.attrs.retain(|attr| !is_logged_attr(attr));

    let ident = &input.sig.ident;
    if !input.sig.inputs.is_empty() {
        return syn::Error::new(ident.span(), "logged tests cannot take parameters")
            .to_compile_error()
            .into();
    }

    let name = ident.to_string();
    let vis = &input.vis;
    let generics = &input.sig.generics;
    let output = &input.sig.output;
    let block = &input.block;
    let attrs = &input.attrs;
    let asyncness = if is_async { quote! { async } } else { quote! {} };
    let finish = finish_tokens(output);

    quote! {
        #harness
        #(#attrs)*
        #vis #asyncness fn #ident #generics () #output {
            let mut __guard = ::gp_test_utils::TestLoggerGuard::new(#name)
                .expect("failed to create TestLogger");
            let mut logger = __guard.logger();
            let _ = &mut logger;

            let __result = { #block };
            drop(logger);
            #finish
        }
    }
    .into()
}

fn finish_tokens(output: &ReturnType) -> TokenStream2 {
    let returns_result = match output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => Some(is_result(ty)),
    };

    match returns_result {
        Some(true) => quote! {
            match __result {
                ::std::result::Result::Ok(value) => {
                    if let Err(e) = __guard.finish_success() {
                        panic!("failed to finalize TestLogger: {}", e);
                    }
                    ::std::result::Result::Ok(value)
                }
                ::std::result::Result::Err(err) => {
                    let message = format!("{}", err);
                    if let Err(e) = __guard.finish_failure(&message) {
                        eprintln!("failed to finalize TestLogger: {}", e);
                    }
                    ::std::result::Result::Err(err)
                }
            }
        },
        Some(false) => quote! {
            if let Err(e) = __guard.finish_success() {
                panic!("failed to finalize TestLogger: {}", e);
            }
            __result
        },
        None => quote! {
            let _ = __result;
            if let Err(e) = __guard.finish_success() {
                panic!("failed to finalize TestLogger: {}", e);
            }
        },
    }
}

fn is_result(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path.path.segments.last().is_some_and(|s| s.ident == "Result"),
        _ => false,
    }
}

fn is_logged_attr(attr: &syn::Attribute) -> bool {
    attr.path()
        .segments
        .last()
        .is_some_and(|s| s.ident == "logged_test" || s.ident == "logged_tokio_test")
}

// (c) Meta Platforms, Inc. and affiliates.
//
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Implementation of the `#[pending_until_fixed]` attribute.
//!
//! ```ignore
//! #[pending_until_fixed("RCRM-3943")]
//! fn known_bug() { .. }
//!
//! // expands to
//! fn known_bug() {
//!     ::pending_until_fixed::run_pending("RCRM-3943", move || -> () { .. })
//! }
//! ```

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, ItemFn, LitStr, ReturnType, Type,
};

/// Argument of the attribute: the issue reference.
struct PendingArgs {
    issue: LitStr,
}

impl Parse for PendingArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        if input.is_empty() {
            return Err(syn::Error::new(
                input.span(),
                "pending_until_fixed requires an issue reference: #[pending_until_fixed(\"ISSUE-1\")]",
            ));
        }

        let issue: LitStr = input.parse().map_err(|e| {
            syn::Error::new(
                e.span(),
                "expected a string literal: #[pending_until_fixed(\"ISSUE-1\")]",
            )
        })?;

        if issue.value().trim().is_empty() {
            return Err(syn::Error::new(
                issue.span(),
                "pending_until_fixed issue reference must not be empty",
            ));
        }

        if !input.is_empty() {
            return Err(syn::Error::new(
                input.span(),
                "unexpected tokens after the issue reference",
            ));
        }

        Ok(Self { issue })
    }
}

pub fn pending_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as PendingArgs);
    let func = parse_macro_input!(item as ItemFn);

    TokenStream::from(generate_pending(&args, &func))
}

fn generate_pending(args: &PendingArgs, func: &ItemFn) -> TokenStream2 {
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = func;
    let issue = &args.issue;

    // the unit type is spelled out so bodies like `todo!()` don't fall back to `!`
    let body = match (&sig.asyncness, returned_type(&sig.output)) {
        (None, None) => quote! {
            ::pending_until_fixed::run_pending(#issue, move || -> () #block)
        },
        (None, Some(ty)) => quote! {
            ::pending_until_fixed::run_pending(#issue, move || -> #ty #block);
            ::core::result::Result::Ok(())
        },
        (Some(_), None) => quote! {
            ::pending_until_fixed::run_pending_async(#issue, async move {
                let __pending_ret: () = (async move #block).await;
                __pending_ret
            })
            .await
        },
        (Some(_), Some(ty)) => quote! {
            ::pending_until_fixed::run_pending_async(#issue, async move {
                let __pending_ret: #ty = (async move #block).await;
                __pending_ret
            })
            .await;
            ::core::result::Result::Ok(())
        },
    };

    quote! {
        #(#attrs)*
        #vis #sig {
            #body
        }
    }
}

/// The declared return type, or `None` when the function returns `()`.
fn returned_type(output: &ReturnType) -> Option<&Type> {
    match output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => match ty.as_ref() {
            Type::Tuple(tuple) if tuple.elems.is_empty() => None,
            ty => Some(ty),
        },
    }
}

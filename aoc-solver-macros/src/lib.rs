//! Procedural macros for the aoc-solver library

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, Lit, parse_macro_input};

/// Derive macro for automatically registering solutions with the plugin system
///
/// Generates an `inventory::submit!` of an `aoc_solver::SolutionPlugin` so the
/// solution is picked up by `SolutionRegistryBuilder::register_all_plugins`.
///
/// # Attributes
///
/// - `day`: Required. The day number (1-25)
/// - `tags`: Optional. Array of string literals for filtering (e.g., ["easy", "grid"])
///
/// # Requirements
///
/// The type must be a unit struct implementing `Solution`. If the trait is not
/// implemented you get a compile-time error naming `MustImplementSolution`.
///
/// # Example
///
/// ```ignore
/// use aoc_solver::AutoRegisterSolution;
///
/// #[derive(AutoRegisterSolution)]
/// #[aoc(day = 4, tags = ["easy", "parsing"])]
/// pub struct Day04;
///
/// impl Solution for Day04 {
///     // ...
/// }
/// ```
#[proc_macro_derive(AutoRegisterSolution, attributes(aoc))]
pub fn derive_auto_register_solution(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    let aoc_attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("aoc"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                name,
                "AutoRegisterSolution derive macro requires #[aoc(day = N)] attribute",
            )
        })?;

    let mut day: Option<u8> = None;
    let mut tags: Vec<String> = Vec::new();

    aoc_attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("day") {
            let value: Lit = meta.value()?.parse()?;
            match value {
                Lit::Int(lit_int) => day = Some(lit_int.base10_parse()?),
                other => return Err(syn::Error::new_spanned(other, "day must be an integer")),
            }
        } else if meta.path.is_ident("tags") {
            // tags = ["a", "b"]
            let _ = meta.value()?;
            let content;
            syn::bracketed!(content in meta.input);
            while !content.is_empty() {
                let lit: Lit = content.parse()?;
                if let Lit::Str(lit_str) = lit {
                    tags.push(lit_str.value());
                }
                if content.peek(syn::Token![,]) {
                    let _: syn::Token![,] = content.parse()?;
                }
            }
        } else {
            return Err(meta.error("unsupported aoc attribute, expected `day` or `tags`"));
        }
        Ok(())
    })?;

    let day = day.ok_or_else(|| syn::Error::new_spanned(aoc_attr, "missing required `day`"))?;
    if !(1..=25).contains(&day) {
        return Err(syn::Error::new_spanned(aoc_attr, "day must be between 1 and 25"));
    }

    let tag_strs = tags.iter().map(|s| s.as_str());

    Ok(quote! {
        const _: () = {
            trait MustImplementSolution: ::aoc_solver::Solution {}
            impl MustImplementSolution for #name {}
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolutionPlugin {
                day: #day,
                solution: &#name,
                tags: &[#(#tag_strs),*],
            }
        }
    })
}

/// Derive an `AocParser` that hands the tokenized lines through unchanged
///
/// For solutions that work directly on `Vec<String>`.
///
/// ```ignore
/// #[derive(PassthroughParser)]
/// pub struct Day06;
/// // <Day06 as AocParser>::Parsed == Vec<String>
/// ```
#[proc_macro_derive(PassthroughParser)]
pub fn derive_passthrough_parser(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    quote! {
        impl #impl_generics ::aoc_solver::AocParser for #name #ty_generics #where_clause {
            type Parsed = ::std::vec::Vec<::std::string::String>;

            fn parse(
                lines: ::std::vec::Vec<::std::string::String>,
            ) -> ::std::result::Result<Self::Parsed, ::aoc_solver::ParseError> {
                ::std::result::Result::Ok(lines)
            }
        }
    }
    .into()
}

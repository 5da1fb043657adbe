//! Proc macros for yoshiki: the `style!` declaration literal.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `yoshiki`.

use proc_macro::TokenStream;

mod style_macro;

/// Build a `yoshiki::style::declaration::Style` from a JSON-like literal.
///
/// # Syntax
///
/// - `key: expr` sets a property; the expression goes through `Into<StyleValue>`
/// - `key: { xs: expr, md: expr }` sets a breakpoint map (tier keys only)
/// - `hover`, `focus`, `press`, `fover` and `self` take a nested block
/// - any other `key: { ... }` block styles the child target `key`
/// - string keys (`"--accent": ...`) are used verbatim
///
/// Mixing tier keys with property keys, duplicate tiers and empty blocks are
/// compile errors pointing at the offending key.
///
/// # Example
///
/// ```ignore
/// let card = style! {
///     padding: 10,
///     backgroundColor: { xs: "green", md: "red" },
///     hover: {
///         color: "blue",
///         title: { textDecoration: "underline" },
///     },
/// };
/// ```
#[proc_macro]
pub fn style(input: TokenStream) -> TokenStream {
    style_macro::style_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

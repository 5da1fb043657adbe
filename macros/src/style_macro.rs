//! `style!` macro: build a `Style` declaration from a JSON-like literal.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{braced, token, Error, Expr, Ident, LitStr, Result, Token};

/// Keys that open an interaction state bucket.
const STATES: &[&str] = &["hover", "focus", "press", "fover"];

/// Breakpoint tier names.
const TIERS: &[&str] = &["xs", "sm", "md", "lg", "xl"];

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// A declaration key: an identifier (`backgroundColor`, `self`) or a string
/// literal (`"--accent"`).
#[derive(Debug, Clone)]
pub(crate) struct Key {
    pub name: String,
    pub span: Span,
}

/// The value side of an entry.
pub(crate) enum Value {
    Expr(Box<Expr>),
    Block(Block),
}

/// A `{ ... }` block of entries.
pub(crate) struct Block {
    pub entries: Vec<Entry>,
    pub span: Span,
}

/// `key: value`
pub(crate) struct Entry {
    pub key: Key,
    pub value: Value,
}

struct StyleInput {
    entries: Vec<Entry>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for Key {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            return Ok(Key {
                name: lit.value(),
                span: lit.span(),
            });
        }
        let ident = Ident::parse_any(input)?;
        Ok(Key {
            name: ident.unraw().to_string(),
            span: ident.span(),
        })
    }
}

impl Parse for Entry {
    fn parse(input: ParseStream) -> Result<Self> {
        let key: Key = input.parse()?;
        input.parse::<Token![:]>()?;
        let value = if input.peek(token::Brace) {
            let content;
            let brace = braced!(content in input);
            Value::Block(Block {
                entries: parse_entries(&content)?,
                span: brace.span.join(),
            })
        } else {
            Value::Expr(Box::new(input.parse()?))
        };
        Ok(Entry { key, value })
    }
}

fn parse_entries(input: ParseStream) -> Result<Vec<Entry>> {
    let entries = Punctuated::<Entry, Token![,]>::parse_terminated(input)?;
    Ok(entries.into_iter().collect())
}

impl Parse for StyleInput {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(StyleInput {
            entries: parse_entries(input)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Classify a block: `true` for a breakpoint map, `false` for a declaration.
fn is_breakpoints(block: &Block) -> Result<bool> {
    if block.entries.is_empty() {
        return Err(Error::new(block.span, "empty block"));
    }
    let tiers = block
        .entries
        .iter()
        .filter(|entry| TIERS.contains(&entry.key.name.as_str()))
        .count();
    if tiers == 0 {
        return Ok(false);
    }
    if tiers == block.entries.len() {
        return Ok(true);
    }
    let stray = block
        .entries
        .iter()
        .find(|entry| !TIERS.contains(&entry.key.name.as_str()))
        .map_or(block.span, |entry| entry.key.span);
    Err(Error::new(
        stray,
        "a breakpoint block may only contain the tiers xs, sm, md, lg and xl",
    ))
}

fn breakpoints_tokens(block: &Block) -> Result<TokenStream> {
    let mut seen: Vec<&str> = Vec::new();
    let mut calls = Vec::new();
    for entry in &block.entries {
        let tier = entry.key.name.as_str();
        if seen.contains(&tier) {
            return Err(Error::new(entry.key.span, format!("duplicate breakpoint `{tier}`")));
        }
        seen.push(tier);
        let Value::Expr(expr) = &entry.value else {
            return Err(Error::new(
                entry.key.span,
                format!("breakpoint `{tier}` expects a value, not a block"),
            ));
        };
        let method = Ident::new(tier, entry.key.span);
        calls.push(quote! { .#method(#expr) });
    }
    Ok(quote! { ::yoshiki::style::value::Breakpoints::new() #(#calls)* })
}

fn style_tokens(entries: &[Entry]) -> Result<TokenStream> {
    let mut calls = Vec::new();
    for entry in entries {
        let name = entry.key.name.as_str();
        let nested = STATES.contains(&name) || name == "self";
        let call = match &entry.value {
            Value::Expr(_) if nested => {
                return Err(Error::new(entry.key.span, format!("`{name}` expects a block")));
            }
            Value::Expr(expr) => quote! { .set(#name, #expr) },
            Value::Block(block) if nested => {
                let inner = style_tokens(&block.entries)?;
                let method = if name == "self" {
                    Ident::new("self_style", entry.key.span)
                } else {
                    Ident::new(name, entry.key.span)
                };
                quote! { .#method(#inner) }
            }
            Value::Block(block) if is_breakpoints(block)? => {
                let map = breakpoints_tokens(block)?;
                quote! { .set(#name, #map) }
            }
            Value::Block(block) => {
                let inner = style_tokens(&block.entries)?;
                quote! { .child(#name, #inner) }
            }
        };
        calls.push(call);
    }
    Ok(quote! { ::yoshiki::style::declaration::Style::new() #(#calls)* })
}

/// Entry point called from `lib.rs`.
pub(crate) fn style_impl(input: TokenStream) -> Result<TokenStream> {
    let input: StyleInput = syn::parse2(input)?;
    style_tokens(&input.entries)
}

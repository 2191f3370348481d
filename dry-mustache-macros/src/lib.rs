//! Compile-time checked Mustache templates
//!
//! Each macro runs the template through `dry-mustache-parser` while the
//! crate compiles. A malformed template is a compile error pointing at the
//! macro input; a valid one expands to its source text.
//!
//! - `dry_mustache_str!("...")`: an inline template
//! - `dry_mustache_file!("path")`: one template file, relative to the crate root
//! - `dry_mustache_directory!("dir")`: a `pub const` for every `.mustache` file

use dry_mustache_parser::parse;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use std::fs;
use std::path::{Path, PathBuf};
use syn::{LitStr, parse_macro_input};
use walkdir::WalkDir;

const EXTENSION: &str = "mustache";

fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() && i > 0 {
            result.push('_');
        }
        match c {
            '-' | '.' | ' ' => result.push('_'),
            c => result.extend(c.to_uppercase()),
        }
    }
    result
}

/// Checks `content`, reporting a failure against `span`
fn check(content: &str, span: proc_macro2::Span, origin: &str) -> syn::Result<()> {
    parse(content)
        .map(|_| ())
        .map_err(|err| syn::Error::new(span, format!("invalid template {}: {}", origin, err)))
}

fn resolve(lit: &LitStr) -> syn::Result<PathBuf> {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|_| syn::Error::new(lit.span(), "CARGO_MANIFEST_DIR not set"))?;
    let path = Path::new(&manifest_dir).join(lit.value());
    if !path.exists() {
        return Err(syn::Error::new(
            lit.span(),
            format!("Path not found: {:?}", path),
        ));
    }
    Ok(path)
}

fn generate_code_for_file(path: &Path, span: proc_macro2::Span) -> syn::Result<proc_macro2::TokenStream> {
    let path_str = path.to_string_lossy();
    let content = fs::read_to_string(path)
        .map_err(|err| syn::Error::new(span, format!("Failed to read {}: {}", path_str, err)))?;
    check(&content, span, &path_str)?;
    Ok(quote! {
        {
            // ensure the compiler is aware the output is linked to the source so that any changes
            // to the template file will trigger a recompilation
            const _: &[u8] = include_bytes!(#path_str);
            #content
        }
    })
}

fn expand_str(lit: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    check(&lit.value(), lit.span(), "literal")?;
    Ok(quote! { #lit })
}

fn expand_file(lit: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let path = resolve(lit)?;
    generate_code_for_file(&path, lit.span())
}

fn expand_directory(lit: &LitStr) -> syn::Result<proc_macro2::TokenStream> {
    let root_path = resolve(lit)?;
    let mut consts = Vec::new();
    for entry in WalkDir::new(&root_path).sort_by_file_name() {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
            let stem = path.file_stem().map(|stem| stem.to_string_lossy()).unwrap_or_default();
            let name = format_ident!("{}", to_screaming_snake_case(&stem));
            let body = generate_code_for_file(path, lit.span())?;
            consts.push(quote! {
                pub const #name: &str = #body;
            });
        }
    }
    Ok(quote! { #(#consts)* })
}

#[proc_macro]
pub fn dry_mustache_str(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    expand_str(&lit)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro]
pub fn dry_mustache_file(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    expand_file(&lit)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[proc_macro]
pub fn dry_mustache_directory(input: TokenStream) -> TokenStream {
    let lit = parse_macro_input!(input as LitStr);
    expand_directory(&lit)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_names() {
        assert_eq!(to_screaming_snake_case("button"), "BUTTON");
        assert_eq!(to_screaming_snake_case("todo-list"), "TODO_LIST");
        assert_eq!(to_screaming_snake_case("userCard"), "USER_CARD");
    }

    #[test]
    fn check_reports_parse_errors() {
        let span = proc_macro2::Span::call_site();
        assert!(check("Hello {{name}}", span, "literal").is_ok());
        let err = check("{{#a}}", span, "literal").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid template literal: unclosed section \"a\" at offset 6"
        );
    }
}

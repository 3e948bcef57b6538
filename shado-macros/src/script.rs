// #[script] expansion: strips #[show_in_editor(...)] from the struct's fields
// and submits a ScriptRegistration (name, constructor, editor fields).

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::punctuated::Punctuated;
use syn::{parse2, Expr, Fields, ItemStruct, LitStr, Meta, Token};

// ---------------------------------------------------------------------------
// Attribute parsing
// ---------------------------------------------------------------------------

/// Parsed #[script(...)] attributes.
struct ScriptArgs {
    name: Option<String>,
}

fn parse_script_args(attr: TokenStream) -> syn::Result<ScriptArgs> {
    let mut args = ScriptArgs { name: None };
    if attr.is_empty() {
        return Ok(args);
    }
    let metas = syn::parse::Parser::parse2(Punctuated::<Meta, Token![,]>::parse_terminated, attr)?;
    for meta in &metas {
        match meta {
            Meta::NameValue(nv) if nv.path.is_ident("name") => {
                args.name = Some(string_value(&nv.value, "name = \"Game.Player\"")?);
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unknown #[script] argument; the only option is `name = \"...\"`",
                ));
            }
        }
    }
    Ok(args)
}

/// Specifiers parsed from #[show_in_editor(...)].
#[derive(Default)]
struct EditorArgs {
    display_name: Option<String>,
    read_only: bool,
}

fn parse_editor_args(attr: &syn::Attribute) -> syn::Result<EditorArgs> {
    let mut args = EditorArgs::default();
    // Bare #[show_in_editor] → defaults
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(args);
    }
    let nested = attr.parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)?;
    for meta in &nested {
        match meta {
            Meta::Path(p) if p.is_ident("read_only") => args.read_only = true,
            Meta::NameValue(nv) if nv.path.is_ident("display_name") => {
                args.display_name = Some(string_value(&nv.value, "display_name = \"Speed\"")?);
            }
            other => {
                return Err(syn::Error::new_spanned(
                    other,
                    "unknown #[show_in_editor] option; expected `display_name = \"...\"` or `read_only`",
                ));
            }
        }
    }
    Ok(args)
}

fn string_value(expr: &Expr, example: &str) -> syn::Result<String> {
    if let Expr::Lit(syn::ExprLit { lit: syn::Lit::Str(s), .. }) = expr {
        Ok(s.value())
    } else {
        Err(syn::Error::new_spanned(expr, format!("expected a string literal, e.g. {example}")))
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

pub fn expand_script(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let args = parse_script_args(attr)?;
    let mut input: ItemStruct = parse2(item)?;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "#[script] structs cannot be generic: the host creates them by class name",
        ));
    }

    let struct_name = input.ident.clone();
    let class_name = args.name.unwrap_or_else(|| struct_name.to_string());
    let class_name_lit = LitStr::new(&class_name, struct_name.span());

    // Collect editor fields and strip their attributes.
    let mut field_entries: Vec<TokenStream> = Vec::new();
    match &mut input.fields {
        Fields::Named(fields) => {
            for field in fields.named.iter_mut() {
                let Some(pos) = field.attrs.iter().position(|a| a.path().is_ident("show_in_editor")) else {
                    continue;
                };
                let attr = field.attrs.remove(pos);
                let eargs = parse_editor_args(&attr)?;
                let ident = field.ident.as_ref().map(|i| i.to_string()).unwrap_or_default();
                let display = eargs.display_name.unwrap_or_else(|| ident.clone());
                let read_only = eargs.read_only;
                let ty = &field.ty;
                field_entries.push(quote! {
                    ::shado::runtime::EditorField {
                        name: #ident,
                        display_name: #display,
                        kind: <#ty as ::shado::runtime::EditorValue>::KIND,
                        read_only: #read_only,
                    }
                });
            }
        }
        Fields::Unit => {}
        Fields::Unnamed(_) => {
            return Err(syn::Error::new_spanned(
                &input,
                "#[script] requires a struct with named fields (or a unit struct).\n\n\
                 Example:\n\
                 \x20   #[script]\n\
                 \x20   #[derive(Default)]\n\
                 \x20   pub struct Player {\n\
                 \x20       #[show_in_editor]\n\
                 \x20       speed: f32,\n\
                 \x20   }",
            ));
        }
    }

    let snake = to_snake_case(&struct_name.to_string());
    let fields_name = format_ident!("__SHADO_FIELDS_{}", snake.to_uppercase());
    let construct_fn = format_ident!("__shado_construct_{}", snake);

    Ok(quote! {
        #input

        #[doc(hidden)]
        static #fields_name: &[::shado::runtime::EditorField] = &[#(#field_entries),*];

        #[doc(hidden)]
        fn #construct_fn() -> ::std::boxed::Box<dyn ::shado::runtime::Script> {
            ::std::boxed::Box::new(<#struct_name as ::std::default::Default>::default())
        }

        ::shado::__inventory::submit! {
            ::shado::runtime::ScriptRegistration {
                name: #class_name_lit,
                construct: #construct_fn,
                fields: #fields_name,
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_names() {
        assert_eq!(to_snake_case("Player"), "player");
        assert_eq!(to_snake_case("EnemySpawner"), "enemy_spawner");
    }

    #[test]
    fn strips_editor_attributes() {
        let out = expand_script(
            quote! {},
            quote! {
                #[derive(Default)]
                pub struct Player {
                    #[show_in_editor(display_name = "Move speed", read_only)]
                    speed: f32,
                    hidden: i32,
                }
            },
        )
        .unwrap()
        .to_string();
        assert!(!out.contains("show_in_editor"));
        assert!(out.contains("\"Move speed\""));
        assert!(out.contains("__SHADO_FIELDS_PLAYER"));
        assert!(out.contains("ScriptRegistration"));
        assert!(!out.contains("\"hidden\""));
    }

    #[test]
    fn name_override() {
        let out = expand_script(quote! { name = "Game.Player" }, quote! { struct Player; }).unwrap().to_string();
        assert!(out.contains("\"Game.Player\""));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(expand_script(quote! {}, quote! { struct Pair(i32, i32); }).is_err());
        assert!(expand_script(quote! {}, quote! { struct Boxed<T> { t: T } }).is_err());
        assert!(expand_script(quote! { parent = Actor }, quote! { struct P; }).is_err());
        assert!(
            expand_script(quote! {}, quote! { struct P { #[show_in_editor(colour)] x: f32 } }).is_err()
        );
    }
}

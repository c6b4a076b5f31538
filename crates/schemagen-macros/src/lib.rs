//! Procedural macros for the schemagen toolchain.
//!
//! This crate provides:
//! - `#[derive(Describe)]` - Emits a compile-time type descriptor for a struct
//!   and optionally registers it in the global schema registry

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{
    parse_macro_input, parse_quote, Attribute, Data, DeriveInput, Fields, GenericParam, LitStr,
    Token,
};

/// Parses container attributes: `#[schema(export)]` and serde's `rename_all`.
#[derive(Default)]
struct ContainerAttrs {
    export: bool,
    rename_all: Option<RenameRule>,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = ContainerAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("export") {
                        parsed.export = true;
                        Ok(())
                    } else {
                        Err(meta.error("unsupported schema attribute, expected `export`"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename_all") && meta.input.peek(Token![=]) {
                        let lit: LitStr = meta.value()?.parse()?;
                        parsed.rename_all = Some(RenameRule::parse(&lit)?);
                        Ok(())
                    } else {
                        skip_value(&meta)
                    }
                })?;
            }
        }

        Ok(parsed)
    }
}

/// Parses field attributes.
///
/// `#[schema(...)]` takes precedence; serde attributes are translated into
/// the annotation mini-language when no explicit tag is given.
#[derive(Default)]
struct FieldAttrs {
    tag: Option<String>,
    embed: bool,
    skip: bool,
    serde_rename: Option<String>,
    serde_skip: bool,
    serde_flatten: bool,
    serde_optional: bool,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = FieldAttrs::default();

        for attr in attrs {
            if attr.path().is_ident("schema") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("tag") {
                        let lit: LitStr = meta.value()?.parse()?;
                        parsed.tag = Some(lit.value());
                    } else if meta.path.is_ident("embed") {
                        parsed.embed = true;
                    } else if meta.path.is_ident("skip") {
                        parsed.skip = true;
                    } else {
                        return Err(
                            meta.error("unsupported schema attribute, expected `tag`, `embed` or `skip`")
                        );
                    }
                    Ok(())
                })?;
            } else if attr.path().is_ident("serde") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") {
                        if meta.input.peek(Token![=]) {
                            let lit: LitStr = meta.value()?.parse()?;
                            parsed.serde_rename = Some(lit.value());
                        } else {
                            meta.parse_nested_meta(|inner| {
                                if inner.path.is_ident("serialize") {
                                    let lit: LitStr = inner.value()?.parse()?;
                                    parsed.serde_rename = Some(lit.value());
                                    Ok(())
                                } else {
                                    skip_value(&inner)
                                }
                            })?;
                        }
                        return Ok(());
                    }

                    if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                        parsed.serde_skip = true;
                    } else if meta.path.is_ident("flatten") {
                        parsed.serde_flatten = true;
                    } else if meta.path.is_ident("default")
                        || meta.path.is_ident("skip_serializing_if")
                    {
                        parsed.serde_optional = true;
                    }
                    skip_value(&meta)
                })?;
            }
        }

        Ok(parsed)
    }

    /// The raw annotation handed to the generator.
    fn tag(&self, declared: &str, rename_all: Option<RenameRule>) -> String {
        if self.skip {
            return "-".to_string();
        }
        if let Some(tag) = &self.tag {
            return tag.clone();
        }
        if self.serde_skip {
            return "-".to_string();
        }

        let mut tag = match (&self.serde_rename, rename_all) {
            (Some(name), _) => name.clone(),
            (None, Some(rule)) => rule.apply(declared),
            (None, None) => String::new(),
        };
        if self.serde_optional {
            tag.push_str(",omitempty");
        }
        tag
    }

    fn embedded(&self) -> bool {
        self.embed || self.serde_flatten
    }
}

/// Consume the value of an attribute entry we do not interpret.
fn skip_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(Token![=]) {
        meta.value()?.parse::<syn::Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|inner| skip_value(&inner))?;
    }
    Ok(())
}

/// serde's `rename_all` casing rules, applied to snake_case field names.
#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        let rule = match lit.value().as_str() {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            other => {
                return Err(syn::Error::new(
                    lit.span(),
                    format!("unknown rename rule `{other}`"),
                ))
            }
        };
        Ok(rule)
    }

    fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.replace('_', "-").to_ascii_uppercase(),
            Self::Pascal | Self::Camel => {
                let mut out = String::with_capacity(field.len());
                let mut upper = matches!(self, Self::Pascal);
                for c in field.chars() {
                    if c == '_' {
                        upper = true;
                    } else if upper {
                        out.push(c.to_ascii_uppercase());
                        upper = false;
                    } else {
                        out.push(c);
                    }
                }
                out
            }
        }
    }
}

/// Derives `schemagen::core::Describe` for a struct with named fields.
///
/// Each field becomes a record field whose annotation comes from its
/// attributes:
/// - `#[schema(tag = "name,omitempty,minLength:1")]` - Raw annotation, used verbatim
/// - `#[schema(embed)]` - Flatten the field's own fields into this record
/// - `#[schema(skip)]` - Leave the field out (same as tag `"-"`)
///
/// Without an explicit tag, serde attributes are honoured: `rename`,
/// `rename_all`, `skip`/`skip_serializing`, `flatten`, and
/// `default`/`skip_serializing_if` (which make the field optional).
///
/// `#[schema(export)]` on the struct registers it in
/// `schemagen::core::registry::SCHEMA_REGISTRY`.
///
/// # Example
/// ```ignore
/// #[derive(Describe)]
/// #[schema(export)]
/// struct Login {
///     #[schema(tag = "user,minLength:1")]
///     user: String,
///     #[serde(default)]
///     remember: bool,
/// }
/// ```
#[proc_macro_derive(Describe, attributes(schema))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_describe(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_describe(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let container = ContainerAttrs::parse(&input.attrs)?;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input.ident,
                    "Describe can only be derived for structs with named fields",
                ))
            }
        },
        Data::Enum(data) => {
            return Err(syn::Error::new(
                data.enum_token.span,
                "Describe cannot be derived for enums",
            ))
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "Describe cannot be derived for unions",
            ))
        }
    };

    let field_infos = fields
        .iter()
        .map(|field| {
            let attrs = FieldAttrs::parse(&field.attrs)?;
            let name = field
                .ident
                .as_ref()
                .map(|ident| ident.unraw().to_string())
                .unwrap_or_default();
            let tag = attrs.tag(&name, container.rename_all);
            let embedded = attrs.embedded();
            let ty = &field.ty;

            Ok(quote! {
                ::schemagen::core::FieldInfo::new(
                    #name,
                    #tag,
                    #embedded,
                    <#ty as ::schemagen::core::Describe>::type_info,
                )
            })
        })
        .collect::<syn::Result<Vec<_>>>()?;

    let ident = &input.ident;
    let mut generics = input.generics.clone();
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::schemagen::core::Describe));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let registration = if container.export {
        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "#[schema(export)] requires a type without generic parameters",
            ));
        }

        let name = ident.unraw().to_string();
        let registration_name =
            format_ident!("__SCHEMAGEN_REGISTRATION_{}", name.to_uppercase());
        quote! {
            #[::schemagen::core::linkme::distributed_slice(::schemagen::core::registry::SCHEMA_REGISTRY)]
            #[linkme(crate = ::schemagen::core::linkme)]
            static #registration_name: ::schemagen::core::registry::SchemaRegistration =
                ::schemagen::core::registry::SchemaRegistration::new(
                    #name,
                    <#ident as ::schemagen::core::Describe>::type_info,
                );
        }
    } else {
        quote! {}
    };

    Ok(quote! {
        impl #impl_generics ::schemagen::core::Describe for #ident #ty_generics #where_clause {
            fn type_info() -> ::schemagen::core::TypeInfo {
                ::schemagen::core::TypeInfo::record(
                    ::core::any::type_name::<Self>(),
                    ::std::vec![#(#field_infos),*],
                )
            }
        }

        #registration
    })
}

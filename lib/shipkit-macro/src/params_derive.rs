//! `#[derive(Params)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Fields, parse2};

/// Struct-level options parsed from `#[params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamsStructOptions {
    /// Rename all fields using the given case convention.
    rename_all: Option<RenameRule>,
}

/// Case conversion rules for `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::enum_variant_names)]
enum RenameRule {
    /// `lowercase`
    LowerCase,
    /// `UPPERCASE`
    UpperCase,
    /// `camelCase`
    CamelCase,
    /// `PascalCase`
    PascalCase,
    /// `snake_case`
    SnakeCase,
    /// `SCREAMING_SNAKE_CASE`
    ScreamingSnakeCase,
    /// `kebab-case`
    KebabCase,
}

impl RenameRule {
    /// Parse a rename rule from a string.
    fn parse(s: &str) -> Option<Self> {
        match s {
            "lowercase" => Some(Self::LowerCase),
            "UPPERCASE" => Some(Self::UpperCase),
            "camelCase" => Some(Self::CamelCase),
            "PascalCase" => Some(Self::PascalCase),
            "snake_case" => Some(Self::SnakeCase),
            "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
            "kebab-case" => Some(Self::KebabCase),
            _ => None,
        }
    }

    /// Apply the rename rule to a `snake_case` field name.
    fn apply(self, name: &str) -> String {
        match self {
            Self::LowerCase => name.replace('_', "").to_lowercase(),
            Self::UpperCase => name.replace('_', "").to_uppercase(),
            Self::CamelCase => to_camel_case(name),
            Self::PascalCase => to_pascal_case(name),
            Self::SnakeCase => name.to_string(),
            Self::ScreamingSnakeCase => name.to_uppercase(),
            Self::KebabCase => name.replace('_', "-"),
        }
    }
}

/// Convert an identifier to `snake_case`.
///
/// Already snake-cased names are returned unchanged.
fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_lower = false;
    for c in s.chars() {
        if c.is_uppercase() {
            if prev_lower {
                result.push('_');
            }
            result.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            result.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    result
}

/// Convert a `snake_case` string to `camelCase`.
fn to_camel_case(s: &str) -> String {
    let mut result = String::new();
    let mut capitalize_next = false;
    for c in s.chars() {
        if c == '_' {
            capitalize_next = !result.is_empty();
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

/// Convert a `snake_case` string to `PascalCase`.
fn to_pascal_case(s: &str) -> String {
    let camel = to_camel_case(s);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Field options parsed from `#[params(...)]` attributes.
#[derive(Debug, Clone, Default)]
struct ParamsFieldOptions {
    /// Omit the field entirely.
    skip: bool,
    /// Inline the nested object's entries into the parent.
    flatten: bool,
    /// Explicit wire name.
    rename: Option<String>,
}

/// Expand the `#[derive(Params)]` macro.
pub fn expand_params_derive(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = parse2(input)?;
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let struct_options = parse_struct_options(&input.attrs)?;

    let fields = match &input.data {
        syn::Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Params derive only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Params derive only supports structs",
            ));
        }
    };

    let mut inserts = Vec::with_capacity(fields.len());

    for field in fields {
        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;

        if options.skip {
            continue;
        }

        if options.flatten {
            if options.rename.is_some() {
                return Err(syn::Error::new_spanned(
                    field,
                    "`flatten` and `rename` cannot be combined",
                ));
            }
            inserts.push(quote! {
                params.merge(::shipkit::ToParams::to_params(&self.#field_name));
            });
            continue;
        }

        let key = wire_name(field_name, &options, &struct_options);
        inserts.push(quote! {
            params.insert(#key, &self.#field_name);
        });
    }

    let capacity = inserts.len();

    Ok(quote! {
        impl #impl_generics ::shipkit::ToParams for #name #ty_generics #where_clause {
            fn to_params(&self) -> ::shipkit::Params {
                let mut params = ::shipkit::Params::with_capacity(#capacity);
                #(#inserts)*
                params
            }
        }

        impl #impl_generics ::shipkit::ToParamValue for #name #ty_generics #where_clause {
            fn to_param_value(&self) -> ::shipkit::ParamValue {
                ::shipkit::ParamValue::Map(::shipkit::ToParams::to_params(self))
            }
        }

        impl #impl_generics ::shipkit::ParamListItem for #name #ty_generics #where_clause {
            fn list_value(items: &[Self]) -> ::shipkit::ParamValue {
                ::shipkit::ParamValue::ObjectList(
                    items.iter().map(::shipkit::ToParams::to_params).collect(),
                )
            }
        }
    })
}

/// Wire name of a field: explicit rename, then `rename_all`, then the snake-cased identifier.
fn wire_name(
    field_name: &syn::Ident,
    options: &ParamsFieldOptions,
    struct_options: &ParamsStructOptions,
) -> String {
    if let Some(rename) = &options.rename {
        return rename.clone();
    }
    let snake = to_snake_case(&field_name.unraw().to_string());
    match struct_options.rename_all {
        Some(rule) => rule.apply(&snake),
        None => snake,
    }
}

/// Parse struct-level options from `#[params(...)]` attributes.
fn parse_struct_options(attrs: &[syn::Attribute]) -> syn::Result<ParamsStructOptions> {
    let mut options = ParamsStructOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: syn::LitStr = meta.value()?.parse()?;
                let rule = RenameRule::parse(&value.value()).ok_or_else(|| {
                    syn::Error::new_spanned(
                        &value,
                        format!(
                            "unknown rename_all value: \"{}\". Expected one of: \
                             lowercase, UPPERCASE, camelCase, PascalCase, \
                             snake_case, SCREAMING_SNAKE_CASE, kebab-case",
                            value.value()
                        ),
                    )
                })?;
                options.rename_all = Some(rule);
                Ok(())
            } else {
                Err(meta.error("unknown params attribute, expected `rename_all`"))
            }
        })?;
    }

    Ok(options)
}

/// Parse field options from `#[params(...)]` attributes.
fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<ParamsFieldOptions> {
    let mut options = ParamsFieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("params") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("flatten") {
                options.flatten = true;
            } else if meta.path.is_ident("rename") {
                let value: syn::LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else {
                return Err(meta.error(
                    "unknown params attribute, expected one of `skip`, `flatten`, `rename`",
                ));
            }
            Ok(())
        })?;
    }

    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_conversion() {
        assert_eq!(to_snake_case("street1"), "street1");
        assert_eq!(to_snake_case("created_at"), "created_at");
        assert_eq!(to_snake_case("hsTariffNumber"), "hs_tariff_number");
        assert_eq!(to_snake_case("OriginCountry"), "origin_country");
    }

    #[test]
    fn rename_rules() {
        assert_eq!(RenameRule::parse("camelCase"), Some(RenameRule::CamelCase));
        assert_eq!(RenameRule::parse("bogus"), None);

        assert_eq!(RenameRule::CamelCase.apply("customs_info"), "customsInfo");
        assert_eq!(RenameRule::PascalCase.apply("customs_info"), "CustomsInfo");
        assert_eq!(RenameRule::KebabCase.apply("customs_info"), "customs-info");
        assert_eq!(RenameRule::ScreamingSnakeCase.apply("customs_info"), "CUSTOMS_INFO");
        assert_eq!(RenameRule::LowerCase.apply("customs_info"), "customsinfo");
        assert_eq!(RenameRule::SnakeCase.apply("customs_info"), "customs_info");
    }

    #[test]
    fn raw_identifiers_are_unraw() {
        let input: DeriveInput = syn::parse_quote! {
            struct Item {
                r#type: String,
            }
        };
        let output = expand_params_derive(quote!(#input)).expect("expand").to_string();

        assert!(output.contains("\"type\""), "unexpected output: {output}");
        assert!(!output.contains("r#type\""), "unexpected output: {output}");
    }

    #[test]
    fn skip_and_rename_and_flatten() {
        let input: DeriveInput = syn::parse_quote! {
            struct Shipment {
                #[params(flatten)]
                meta: ObjectMeta,
                #[params(rename = "to_address")]
                to: Address,
                #[params(skip)]
                rates: Vec<Rate>,
            }
        };
        let output = expand_params_derive(quote!(#input)).expect("expand").to_string();

        assert!(output.contains("params . merge"), "unexpected output: {output}");
        assert!(output.contains("\"to_address\""), "unexpected output: {output}");
        assert!(!output.contains("rates"), "unexpected output: {output}");
    }

    #[test]
    fn rejects_enums_and_tuple_structs() {
        let input: DeriveInput = syn::parse_quote! {
            enum Carrier { Usps, Ups }
        };
        assert!(expand_params_derive(quote!(#input)).is_err());

        let input: DeriveInput = syn::parse_quote! {
            struct Weight(f64);
        };
        assert!(expand_params_derive(quote!(#input)).is_err());
    }

    #[test]
    fn rejects_unknown_attributes() {
        let input: DeriveInput = syn::parse_quote! {
            struct Parcel {
                #[params(skip_none)]
                weight: f64,
            }
        };
        assert!(expand_params_derive(quote!(#input)).is_err());

        let input: DeriveInput = syn::parse_quote! {
            #[params(rename_all = "Train-Case")]
            struct Parcel {
                weight: f64,
            }
        };
        assert!(expand_params_derive(quote!(#input)).is_err());
    }
}

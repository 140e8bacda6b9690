use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashSet;
use syn::spanned::Spanned;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Ident, LitInt, LitStr, Path};

// 可用的预设，与 ledgerly_validator::presets 中的函数同名
const PRESETS: &[&str] = &[
    "email",
    "phone",
    "optional_phone",
    "pincode",
    "amount",
    "percentage",
];

// 解析后的 #[rule(...)]
#[derive(Default)]
struct FieldRule {
    name: Option<String>,
    skip: bool,
    preset: Option<Ident>,
    required: Option<bool>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    pattern: Option<LitStr>,
    custom: Option<Path>,
}

impl FieldRule {
    fn has_rule(&self) -> bool {
        self.preset.is_some()
            || self.required.is_some()
            || self.min_length.is_some()
            || self.max_length.is_some()
            || self.pattern.is_some()
            || self.custom.is_some()
    }
}

// snake_case 字段名转 camelCase 表单字段名：first_name -> firstName
fn to_camel_case(s: &str) -> String {
    let s = s.strip_prefix("r#").unwrap_or(s);
    let mut result = String::with_capacity(s.len());
    let mut upper_next = false;

    for ch in s.chars() {
        if ch == '_' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            result.push(ch);
        }
    }

    result
}

fn parse_field_rule(field: &syn::Field) -> syn::Result<FieldRule> {
    let mut rule = FieldRule::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("rule") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let ident = meta
                .path
                .get_ident()
                .cloned()
                .ok_or_else(|| meta.error("expected a rule name"))?;

            match ident.to_string().as_str() {
                "skip" => rule.skip = true,
                "required" => rule.required = Some(true),
                "optional" => rule.required = Some(false),
                "name" => {
                    let lit: LitStr = meta.value()?.parse()?;
                    rule.name = Some(lit.value());
                }
                "min_length" => {
                    let lit: LitInt = meta.value()?.parse()?;
                    rule.min_length = Some(lit.base10_parse()?);
                }
                "max_length" => {
                    let lit: LitInt = meta.value()?.parse()?;
                    rule.max_length = Some(lit.base10_parse()?);
                }
                "pattern" => {
                    // 正则在展开时检查，生成的代码不会遇到非法正则
                    let lit: LitStr = meta.value()?.parse()?;
                    if let Err(e) = regex::Regex::new(&lit.value()) {
                        return Err(syn::Error::new(lit.span(), format!("invalid pattern: {}", e)));
                    }
                    rule.pattern = Some(lit);
                }
                "custom" => {
                    rule.custom = Some(meta.value()?.parse()?);
                }
                name if PRESETS.contains(&name) => {
                    if let Some(existing) = &rule.preset {
                        return Err(meta.error(format!(
                            "only one preset per field, `{}` already given",
                            existing
                        )));
                    }
                    rule.preset = Some(ident);
                }
                other => {
                    return Err(meta.error(format!(
                        "unknown rule `{}`, expected one of: required, optional, skip, name, \
                         min_length, max_length, pattern, custom, {}",
                        other,
                        PRESETS.join(", ")
                    )));
                }
            }

            Ok(())
        })?;
    }

    if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
        if min > max {
            return Err(syn::Error::new(
                field.span(),
                format!("min_length ({}) is greater than max_length ({})", min, max),
            ));
        }
    }

    Ok(rule)
}

fn rule_tokens(rule: &FieldRule) -> TokenStream2 {
    let base = match &rule.preset {
        Some(preset) => quote! { ::ledgerly_validator::presets::#preset() },
        None => quote! { ::ledgerly_validator::Rule::new() },
    };

    let mut setters = Vec::new();

    if let Some(required) = rule.required {
        setters.push(quote! { rule.required = #required; });
    }
    if let Some(min) = rule.min_length {
        setters.push(quote! { rule.min_length = ::core::option::Option::Some(#min); });
    }
    if let Some(max) = rule.max_length {
        setters.push(quote! { rule.max_length = ::core::option::Option::Some(#max); });
    }
    if let Some(pattern) = &rule.pattern {
        setters.push(quote! {
            rule.pattern = ::core::option::Option::Some(
                ::ledgerly_validator::regex::Regex::new(#pattern)
                    .expect("pattern checked by #[derive(FormModel)]")
            );
        });
    }
    if let Some(custom) = &rule.custom {
        setters.push(quote! {
            rule.custom = ::core::option::Option::Some(#custom as ::ledgerly_validator::CustomCheck);
        });
    }

    quote! {
        {
            #[allow(unused_mut)]
            let mut rule = #base;
            #(#setters)*
            rule
        }
    }
}

fn parse_form_name(input: &DeriveInput) -> syn::Result<Option<LitStr>> {
    let mut name = None;

    for attr in &input.attrs {
        if !attr.path().is_ident("form") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                name = Some(meta.value()?.parse::<LitStr>()?);
                Ok(())
            } else {
                Err(meta.error("expected `name = \"...\"`"))
            }
        })?;
    }

    Ok(name)
}

fn expand_form_model(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new(
                    input.span(),
                    "FormModel can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                input.span(),
                "FormModel can only be derived for structs",
            ))
        }
    };

    let mut rule_inserts = Vec::new();
    let mut value_inserts = Vec::new();
    let mut seen = HashSet::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let rule = parse_field_rule(field)?;
        if rule.skip {
            continue;
        }

        let field_name = rule
            .name
            .clone()
            .unwrap_or_else(|| to_camel_case(&ident.to_string()));
        if !seen.insert(field_name.clone()) {
            return Err(syn::Error::new(
                ident.span(),
                format!("form field name `{}` is used by more than one field", field_name),
            ));
        }

        value_inserts.push(quote! {
            values.insert(
                ::std::string::String::from(#field_name),
                ::ledgerly_validator::FieldValue::from(::std::clone::Clone::clone(&self.#ident)),
            );
        });

        if rule.has_rule() {
            let rule = rule_tokens(&rule);
            rule_inserts.push(quote! {
                rules.insert(#field_name, #rule);
            });
        }
    }

    let registration = match parse_form_name(&input)? {
        Some(form_name) => {
            if !input.generics.params.is_empty() {
                return Err(syn::Error::new(
                    form_name.span(),
                    "#[form(name)] is not supported on generic structs",
                ));
            }
            quote! {
                ::ledgerly_validator::inventory::submit! {
                    ::ledgerly_validator::FormRegistration {
                        name: #form_name,
                        rules: <#name as ::ledgerly_validator::FormModel>::rule_set,
                    }
                }
            }
        }
        None => quote! {},
    };

    Ok(quote! {
        impl #impl_generics ::ledgerly_validator::FormModel for #name #ty_generics #where_clause {
            fn rule_set() -> ::ledgerly_validator::RuleSet {
                #[allow(unused_mut)]
                let mut rules = ::ledgerly_validator::RuleSet::new();
                #(#rule_inserts)*
                rules
            }

            fn values(&self) -> ::ledgerly_validator::ValueBag {
                #[allow(unused_mut)]
                let mut values = ::ledgerly_validator::ValueBag::new();
                #(#value_inserts)*
                values
            }
        }

        impl #impl_generics ::ledgerly_validator::Validate for #name #ty_generics #where_clause {
            fn validate(&self) -> ::ledgerly_validator::ValidationResult<()> {
                let mut session = <Self as ::ledgerly_validator::FormModel>::session();
                session.check(&::ledgerly_validator::FormModel::values(self))
            }
        }

        #registration
    })
}

/// 派生 `FormModel` 与 `Validate`
///
/// ```rust,ignore
/// #[derive(FormModel)]
/// #[form(name = "client")]
/// pub struct ClientForm {
///     #[rule(required, max_length = 60)]
///     pub first_name: String,
///     #[rule(email)]
///     pub email: String,
///     #[rule(pincode)]
///     pub pincode: String,
///     #[rule(pattern = "^[A-Z]{5}[0-9]{4}[A-Z]$", name = "panNumber")]
///     pub pan: Option<String>,
/// }
/// ```
#[proc_macro_derive(FormModel, attributes(rule, form))]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_form_model(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

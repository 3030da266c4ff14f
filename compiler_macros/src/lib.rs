use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr, parse_macro_input};

/// Derive an inherent `name()` method and a `Display` impl for an enum.
///
/// The name of each variant is its identifier unless overridden with
/// `#[kind(rename = "...")]`. `Display` writes the same text, so diagnostics
/// can interpolate the value directly.
///
/// For unit variants, the match arm uses `Type::Variant`.
/// For tuple variants, it uses `Type::Variant(..)`.
/// For struct variants, it uses `Type::Variant { .. }`.
///
/// When every variant is a unit variant, an associated
/// `VARIANTS: &'static [Self]` constant lists them in declaration order.
///
/// # Example
///
/// ```rust
/// # use compiler_macros::EnumKindName;
/// #[derive(Debug, PartialEq, EnumKindName)]
/// enum DataType {
///     #[kind(rename = "int")]
///     Int,
///     Float,
/// }
/// assert_eq!(DataType::Int.name(), "int");
/// assert_eq!(DataType::Float.to_string(), "Float");
/// assert_eq!(DataType::VARIANTS, &[DataType::Int, DataType::Float]);
/// ```
#[proc_macro_derive(EnumKindName, attributes(kind))]
pub fn derive_enum_kind_name(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) =
        input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(
            &input,
            "EnumKindName can only be derived for enums",
        )
        .to_compile_error()
        .into();
    };

    let mut arms = Vec::with_capacity(data_enum.variants.len());
    for v in &data_enum.variants {
        let v_ident = &v.ident;
        let v_name = match rename_of(&v.attrs) {
            Ok(Some(renamed)) => renamed,
            Ok(None) => v_ident.to_string(),
            Err(err) => return err.to_compile_error().into(),
        };
        arms.push(match &v.fields {
            Fields::Unit => quote! { #name::#v_ident => #v_name },
            Fields::Unnamed(_) => quote! { #name::#v_ident(..) => #v_name },
            Fields::Named(_) => quote! { #name::#v_ident { .. } => #v_name },
        });
    }

    let all_unit = data_enum
        .variants
        .iter()
        .all(|v| matches!(v.fields, Fields::Unit));
    let variants = if all_unit {
        let idents = data_enum.variants.iter().map(|v| &v.ident);
        quote! {
            /// Every variant, in declaration order.
            pub const VARIANTS: &'static [Self] = &[ #( #name::#idents, )* ];
        }
    } else {
        quote! {}
    };

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            /// Return the enum variant name.
            pub fn name(&self) -> &'static str {
                match self {
                    #( #arms, )*
                }
            }

            #variants
        }

        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };

    TokenStream::from(expanded)
}

/// Read `#[kind(rename = "...")]` from a variant's attributes.
fn rename_of(attrs: &[syn::Attribute]) -> syn::Result<Option<String>> {
    let mut renamed = None;
    for attr in attrs.iter().filter(|a| a.path().is_ident("kind")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                renamed = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported kind attribute, expected `rename`"))
            }
        })?;
    }
    Ok(renamed)
}

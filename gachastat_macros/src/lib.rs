use proc_macro::TokenStream;
use quote::quote;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, parse_macro_input, spanned::Spanned};

/// Variant attributes: `#[focus]` and `#[label("<text>")]`.
///
/// Variants are ordered exactly as declared; that order becomes
/// `Categorical::ALL` and drives cumulative sampling.
#[proc_macro_derive(Categorical, attributes(focus, label))]
pub fn derive_categorical(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let enum_ident = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new(
            input.ident.span(),
            "Categorical can only be derived for enums",
        )
        .to_compile_error()
        .into();
    };

    if data_enum.variants.is_empty() {
        return syn::Error::new(input.ident.span(), "Categorical needs at least one variant")
            .to_compile_error()
            .into();
    }

    let mut idents = Vec::new();
    let mut ordinals = Vec::new();
    let mut focus_arms = Vec::new();
    let mut labels = Vec::new();

    for (ordinal, variant) in data_enum.variants.iter().enumerate() {
        match &variant.fields {
            Fields::Unit => {}
            _ => {
                return syn::Error::new(
                    variant.span(),
                    "Categorical only supports fieldless variants",
                )
                .to_compile_error()
                .into();
            }
        }

        let mut focus = false;
        let mut label: Option<LitStr> = None;
        for Attribute { meta, .. } in &variant.attrs {
            if meta.path().is_ident("focus") {
                if !matches!(meta, syn::Meta::Path(_)) {
                    return syn::Error::new(meta.span(), "use a bare #[focus]")
                        .to_compile_error()
                        .into();
                }
                focus = true;
            } else if meta.path().is_ident("label") {
                let syn::Meta::List(list) = meta else {
                    return syn::Error::new(meta.span(), "use #[label(\"<text>\")]")
                        .to_compile_error()
                        .into();
                };
                match syn::parse2::<LitStr>(list.tokens.clone()) {
                    Ok(lit) => label = Some(lit),
                    Err(e) => {
                        return syn::Error::new(list.span(), format!("invalid label: {e}"))
                            .to_compile_error()
                            .into();
                    }
                }
            }
        }

        let ident = &variant.ident;
        let label = label.unwrap_or_else(|| LitStr::new(&ident.to_string(), ident.span()));

        idents.push(ident);
        ordinals.push(ordinal);
        focus_arms.push(focus);
        labels.push(label);
    }

    let count = idents.len();

    let expanded = quote! {
        impl gachastat::Categorical for #enum_ident {
            const ALL: &'static [Self] = &[
                #(Self::#idents),*
            ];
            const COUNT: usize = #count;

            #[inline]
            fn ordinal(self) -> usize {
                match self {
                    #(Self::#idents => #ordinals,)*
                }
            }

            #[inline]
            fn is_focus(self) -> bool {
                match self {
                    #(Self::#idents => #focus_arms,)*
                }
            }

            fn label(self) -> &'static str {
                match self {
                    #(Self::#idents => #labels,)*
                }
            }
        }
    };

    expanded.into()
}

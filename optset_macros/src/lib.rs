use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Ident, LitStr, Result, parse_macro_input};

/// Largest number of flags a single domain can hold.
const MAX_FLAGS: usize = 64;

struct FlagVariant {
    ident: Ident,
    name: String,
}

impl FlagVariant {
    fn from_variant(variant: &syn::Variant) -> Result<Self> {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "Flag variants can't carry fields",
            ));
        }

        if let Some((_, discriminant)) = &variant.discriminant {
            return Err(syn::Error::new_spanned(
                discriminant,
                "Flag variants can't have explicit discriminants, the bit is the declaration order",
            ));
        }

        let mut name = variant.ident.to_string();

        for attr in variant.attrs.iter().filter(|attr| attr.path().is_ident("flag")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    name = lit.value();
                    Ok(())
                } else {
                    Err(meta.error("unsupported flag attribute, expected `name`"))
                }
            })?;
        }

        Ok(Self {
            ident: variant.ident.clone(),
            name,
        })
    }
}

struct FlagEnum {
    ident: Ident,
    variants: Vec<FlagVariant>,
}

impl FlagEnum {
    fn from_derive_input(input: &DeriveInput) -> Result<Self> {
        let data = match &input.data {
            Data::Enum(data) => data,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Flag can only be derived for enums",
                ));
            }
        };

        if !input.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &input.generics,
                "Flag can't be derived for generic enums",
            ));
        }

        if data.variants.is_empty() {
            return Err(syn::Error::new_spanned(
                input,
                "Flag domain must declare at least one variant",
            ));
        }

        if data.variants.len() > MAX_FLAGS {
            return Err(syn::Error::new_spanned(
                input,
                format!(
                    "Flag domain declares {} variants, at most {MAX_FLAGS} fit in the mask",
                    data.variants.len()
                ),
            ));
        }

        let variants = data
            .variants
            .iter()
            .map(FlagVariant::from_variant)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            ident: input.ident.clone(),
            variants,
        })
    }

    fn expand(&self) -> TokenStream {
        let ident = &self.ident;
        let idents = self.variants.iter().map(|v| &v.ident).collect::<Vec<_>>();
        let names = self.variants.iter().map(|v| &v.name);
        let ordinals = (0..self.variants.len() as u32).collect::<Vec<_>>();

        quote! {
            impl ::optset::Flag for #ident {
                const FLAGS: &'static [Self] = &[#(Self::#idents),*];

                #[inline]
                fn ordinal(self) -> u32 {
                    match self {
                        #(Self::#idents => #ordinals,)*
                    }
                }

                #[inline]
                fn name(self) -> &'static str {
                    match self {
                        #(Self::#idents => #names,)*
                    }
                }
            }

            impl ::core::ops::BitOr for #ident {
                type Output = ::optset::FlagSet<Self>;

                #[inline]
                fn bitor(self, rhs: Self) -> Self::Output {
                    ::optset::FlagSet::from_flags(&[self, rhs])
                }
            }

            impl ::core::ops::BitOr<::optset::FlagSet<Self>> for #ident {
                type Output = ::optset::FlagSet<Self>;

                #[inline]
                fn bitor(self, rhs: ::optset::FlagSet<Self>) -> Self::Output {
                    rhs.or(&[self])
                }
            }
        }
    }
}

/// Derives `optset::Flag` for a fieldless enum.
///
/// Each variant gets the bit of its declaration index, so the first variant is
/// `1`, the second `2`, and so on. Variants can be renamed for display with
/// `#[flag(name = "...")]`.
///
/// Also implements `|` between two variants, producing a `FlagSet`.
#[proc_macro_derive(Flag, attributes(flag))]
pub fn derive_flag(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match FlagEnum::from_derive_input(&input) {
        Ok(flags) => flags.expand().into(),
        Err(err) => err.to_compile_error().into(),
    }
}

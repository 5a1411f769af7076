//! Macro `#[define_variant]` for defining closed variant types.
//!
//! See [`tagvar` crate](https://docs.rs/tagvar).

use std::collections::HashSet;

use convert_case::{Case, Casing};
use proc_macro2::{Literal, Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{parse_quote, Data, DeriveInput, Fields, GenericParam, Ident, Type, Visibility};

/// Macro for defining variant types.
///
/// Annotate an enum whose variants each wrap exactly one unnamed field. The field types are
/// the alternatives, and their declaration order gives their indices.
///
/// # Examples
///
/// ```
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// #[derive(Clone, Debug, PartialEq)]
/// pub enum Scalar {
///     Int(i32),
///     Float(f64),
///     Char(char),
/// }
///
/// # fn main() {
/// let mut v = Scalar::from('c');
/// *v.get_mut::<char>().unwrap() = 'l';
/// assert_eq!(v.get::<char>(), Ok(&'l'));
/// assert_eq!(v.get_at::<{ scalar::CHAR }>(), Ok(&'l'));
/// assert!(v.get::<i32>().is_err());
///
/// v.assign(-981i32);
/// assert_eq!(v.get_at::<0>(), Ok(&-981));
///
/// // Copying only works between variants of the same type.
/// let w = v.clone();
/// assert_eq!(w, v);
/// # }
/// ```
///
/// Generic variants work too, as long as no two alternatives can turn out to be the same
/// type:
///
/// ```
/// use tagvar::prelude::*;
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum OneOrMany<T> {
///     One(T),
///     Many(Vec<T>),
/// }
///
/// # fn main() {
/// let v: OneOrMany<u8> = OneOrMany::from(vec![1, 2]);
/// assert_eq!(v.get_at::<1>().map(|m| m.len()), Ok(2));
/// let w: OneOrMany<u8> = <OneOrMany<u8> as Holds<u8>>::wrap(3);
/// assert_eq!(w.get::<u8>(), Ok(&3));
/// # }
/// ```
///
/// # Rules
///
/// The macro reports a compile error when:
///
/// * the item is not an enum, or has no variants
/// * a variant has named fields, no field, more than one field, or an explicit discriminant
/// * an alternative is written as an array, a slice, a reference, `()` or `!`
/// * the same alternative type is listed twice
///
/// These checks see each alternative only as it is written in the enum. A type alias for an
/// array, or a type parameter later instantiated with a reference or `()`, is accepted. Two
/// alternatives that only become the same type after substitution are still rejected, by
/// the conflicting [`Holds`](https://docs.rs/tagvar/latest/tagvar/trait.Holds.html) impls.
///
/// ```compile_fail
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum Bytes {
///     Fixed([u8; 4]),
///     Count(usize),
/// }
/// ```
///
/// ```compile_fail
/// use tagvar_macro::define_variant;
///
/// #[define_variant]
/// enum Twice {
///     A(u32),
///     B(u32),
/// }
/// ```
///
/// # Generated API
///
/// See crate [`tagvar_example`](https://docs.rs/tagvar_example) for an example of the
/// generated code.
///
/// For an enum `MyType`, the following is generated:
///
/// * The enum itself, unchanged.
/// * A module `my_type` (the snake-case version of the enum name), containing one
///   `usize` constant per alternative, named after the enum variant in upper snake case,
///   holding that alternative's index.
/// * Trait implementations for `MyType`:
///   * `tagvar::Variant`
///   * `tagvar::Holds<T>` for every alternative `T`
///   * `tagvar::At<N>` for every index `N`
///   * `From<T>` for every alternative `T`, except bare type parameters of the enum
///   * `tagvar::DynVariant`, where all alternatives are `'static`
#[proc_macro_attribute]
pub fn define_variant(
    attrs: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let attrs: proc_macro2::TokenStream = attrs.into();
    let item: proc_macro2::TokenStream = item.into();
    match define_variant_impl(attrs, item.clone()) {
        Ok(x) => x,
        Err(Error(msg, span)) => {
            let error = quote_spanned!(span =>
                ::core::compile_error!(#msg);
            );
            quote!(
                #item
                #error
            )
        }
    }
    .into()
}

struct Error(&'static str, Span);

fn define_variant_impl(ty_attrs: TokenStream, d: TokenStream) -> Result<TokenStream, Error> {
    if let Some(tt) = ty_attrs.into_iter().next() {
        return Err(Error("define_variant takes no arguments", tt.span()));
    }
    let d: DeriveInput = match syn::parse2(d) {
        Ok(d) => d,
        Err(e) => {
            return Err(Error(
                "define_variant could not parse this as an enum",
                e.span(),
            ))
        }
    };
    let variants = if let Data::Enum(e) = &d.data {
        &e.variants
    } else {
        return Err(Error("define_variant requires an enum", d.ident.span()));
    };
    if variants.is_empty() {
        return Err(Error(
            "define_variant requires at least one alternative",
            d.ident.span(),
        ));
    }

    let (tyvis, tyvis_inner) = SimpleVisibility::try_parse(&d.vis)?;
    let tyname = &d.ident;
    let tyname_str = tyname.to_string();

    let mut mod_str = tyname_str.to_case(Case::Snake);
    if syn::parse_str::<Ident>(&mod_str).is_err() {
        // Keywords such as `crate` or `super`.
        mod_str.push('_');
    }
    let mut mod_name = format_ident!("{}", mod_str);
    mod_name.set_span(Span::call_site());
    let mod_doc = format!("Alternative indices of `{}`.", tyname_str);

    let type_params: Vec<&Ident> = d
        .generics
        .params
        .iter()
        .filter_map(|p| match p {
            GenericParam::Type(t) => Some(&t.ident),
            _ => None,
        })
        .collect();

    let mut alts = Alternatives::new();
    for v in variants {
        alts.push(v, &type_params)?;
    }
    let Alternatives {
        ident: alt_ident,
        ty: alt_ty,
        name: alt_name,
        index: alt_index,
        index_const: alt_index_const,
        index_doc: alt_index_doc,
        from_ty,
        from_ident,
        ..
    } = &alts;

    let (generics_impl, generics_apply, generics_where) = d.generics.split_for_impl();
    let mut dyn_where = generics_where.cloned().unwrap_or_else(|| syn::WhereClause {
        where_token: Default::default(),
        predicates: Punctuated::new(),
    });
    for ty in alt_ty {
        dyn_where.predicates.push(parse_quote!(#ty: 'static));
    }

    Ok(quote! {
        #d

        #[doc = #mod_doc]
        #[allow(dead_code)]
        #tyvis mod #mod_name {
            #(
                #[doc = #alt_index_doc]
                #tyvis_inner const #alt_index_const: usize = #alt_index;
            )*
        }

        impl #generics_impl ::tagvar::Variant for #tyname #generics_apply #generics_where {
            const NAME: &'static str = #tyname_str;

            const ALTERNATIVES: &'static [&'static str] = &[ #( #alt_name ),* ];

            const MAX_SIZE: usize = ::tagvar::macro_support::array_max(
                &[
                    #(
                        ::core::mem::size_of::<#alt_ty>(),
                    )*
                ]
            );

            const MAX_ALIGN: usize = ::tagvar::macro_support::array_max(
                &[
                    #(
                        ::core::mem::align_of::<#alt_ty>(),
                    )*
                ]
            );

            #[inline]
            fn index(&self) -> usize {
                match self {
                    #(
                        Self::#alt_ident(_) => #alt_index,
                    )*
                }
            }
        }

        #(
            impl #generics_impl ::tagvar::Holds<#alt_ty> for #tyname #generics_apply #generics_where {
                const INDEX: usize = #alt_index;

                #[inline]
                fn wrap(value: #alt_ty) -> Self {
                    Self::#alt_ident(value)
                }

                #[inline]
                #[allow(unreachable_patterns)]
                fn peek(&self) -> ::core::option::Option<&#alt_ty> {
                    match self {
                        Self::#alt_ident(value) => ::core::option::Option::Some(value),
                        _ => ::core::option::Option::None,
                    }
                }

                #[inline]
                #[allow(unreachable_patterns)]
                fn peek_mut(&mut self) -> ::core::option::Option<&mut #alt_ty> {
                    match self {
                        Self::#alt_ident(value) => ::core::option::Option::Some(value),
                        _ => ::core::option::Option::None,
                    }
                }

                #[inline]
                #[allow(unreachable_patterns)]
                fn unwrap_into(self) -> ::core::result::Result<#alt_ty, Self> {
                    match self {
                        Self::#alt_ident(value) => ::core::result::Result::Ok(value),
                        other => ::core::result::Result::Err(other),
                    }
                }
            }

            impl #generics_impl ::tagvar::At<#alt_index> for #tyname #generics_apply #generics_where {
                type Output = #alt_ty;

                #[inline]
                fn peek_at(&self) -> ::core::option::Option<&#alt_ty> {
                    <Self as ::tagvar::Holds<#alt_ty>>::peek(self)
                }

                #[inline]
                fn peek_at_mut(&mut self) -> ::core::option::Option<&mut #alt_ty> {
                    <Self as ::tagvar::Holds<#alt_ty>>::peek_mut(self)
                }
            }
        )*

        #(
            impl #generics_impl ::core::convert::From<#from_ty> for #tyname #generics_apply #generics_where {
                #[inline]
                fn from(value: #from_ty) -> Self {
                    Self::#from_ident(value)
                }
            }
        )*

        impl #generics_impl ::tagvar::DynVariant for #tyname #generics_apply #dyn_where {
            fn take_from_any(slot: &mut dyn ::core::any::Any) -> ::core::option::Option<Self> {
                #(
                    if let ::core::option::Option::Some(value) =
                        slot.downcast_mut::<::core::option::Option<#alt_ty>>()
                    {
                        return value.take().map(Self::#alt_ident);
                    }
                )*
                ::core::option::Option::None
            }

            fn from_any_box(
                value: ::tagvar::macro_support::Box<dyn ::core::any::Any>,
            ) -> ::core::result::Result<Self, ::tagvar::macro_support::Box<dyn ::core::any::Any>> {
                #(
                    let value = match value.downcast::<#alt_ty>() {
                        ::core::result::Result::Ok(value) => {
                            return ::core::result::Result::Ok(Self::#alt_ident(*value))
                        }
                        ::core::result::Result::Err(value) => value,
                    };
                )*
                ::core::result::Result::Err(value)
            }
        }
    })
}

#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq)]
enum SimpleVisibility {
    Private = 0,
    Super = 1,
    SuperSuper = 2,
    Crate = 3,
    Public = 4,
}

impl quote::ToTokens for SimpleVisibility {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            SimpleVisibility::Private => {}
            SimpleVisibility::Super => tokens.extend(quote!(pub(super))),
            SimpleVisibility::SuperSuper => tokens.extend(quote!(pub(in super::super))),
            SimpleVisibility::Crate => tokens.extend(quote!(pub(crate))),
            SimpleVisibility::Public => tokens.extend(quote!(pub)),
        }
    }
}

impl SimpleVisibility {
    fn bad_visibility(span: Span) -> Error {
        Error(
            "Visibility must be one of: (none), pub, pub(crate), pub(self), pub(super)",
            span,
        )
    }

    fn try_parse(v: &Visibility) -> Result<(SimpleVisibility, SimpleVisibility), Error> {
        Ok(match v {
            Visibility::Public(_) => (SimpleVisibility::Public, SimpleVisibility::Public),
            Visibility::Crate(_) => (SimpleVisibility::Crate, SimpleVisibility::Crate),
            Visibility::Restricted(r) => {
                if r.path.is_ident("crate") {
                    (SimpleVisibility::Crate, SimpleVisibility::Crate)
                } else if r.path.is_ident("super") {
                    (SimpleVisibility::Super, SimpleVisibility::SuperSuper)
                } else if r.path.is_ident("self") {
                    (SimpleVisibility::Private, SimpleVisibility::Super)
                } else {
                    return Err(Self::bad_visibility(v.span()));
                }
            }
            Visibility::Inherited => (SimpleVisibility::Private, SimpleVisibility::Super),
        })
    }
}

/// All alternatives, in declaration order.
struct Alternatives {
    /// Name of the enum variant wrapping the alternative.
    ident: Vec<Ident>,
    /// Type of the alternative.
    ty: Vec<Type>,
    /// Printable name of the alternative type.
    name: Vec<String>,
    /// Index of the alternative, as an unsuffixed literal.
    index: Vec<Literal>,
    /// Name of the index constant in the companion module.
    index_const: Vec<Ident>,
    /// Documentation of the index constant.
    index_doc: Vec<String>,
    /// Alternative types that get a `From` impl.
    from_ty: Vec<Type>,
    /// Enum variants matching `from_ty`.
    from_ident: Vec<Ident>,
    /// Printable names seen so far, for duplicate detection.
    seen: HashSet<String>,
}

impl Alternatives {
    fn new() -> Self {
        Alternatives {
            ident: Vec::new(),
            ty: Vec::new(),
            name: Vec::new(),
            index: Vec::new(),
            index_const: Vec::new(),
            index_doc: Vec::new(),
            from_ty: Vec::new(),
            from_ident: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn push(&mut self, v: &syn::Variant, type_params: &[&Ident]) -> Result<(), Error> {
        if let Some((_, discriminant)) = &v.discriminant {
            return Err(Error(
                "define_variant does not allow explicit discriminants",
                discriminant.span(),
            ));
        }
        let field = match &v.fields {
            Fields::Unnamed(u) if u.unnamed.len() == 1 => &u.unnamed[0],
            Fields::Named(n) => {
                return Err(Error(
                    "Each alternative must wrap exactly one unnamed field, not named fields",
                    n.span(),
                ))
            }
            _ => {
                return Err(Error(
                    "Each alternative must wrap exactly one unnamed field",
                    v.span(),
                ))
            }
        };
        let ty = &field.ty;
        check_alternative(ty)?;

        let name = type_name(ty);
        let index = self.ident.len();
        if !self.seen.insert(name.clone()) {
            return Err(Error(
                "Each alternative type may appear only once",
                ty.span(),
            ));
        }

        let ident = v.ident.clone();
        let mut index_const = format_ident!(
            "{}",
            ident.to_string().to_case(Case::UpperSnake)
        );
        index_const.set_span(ident.span());

        if !is_type_param(ty, type_params) {
            self.from_ty.push(ty.clone());
            self.from_ident.push(ident.clone());
        }
        self.index_doc
            .push(format!("Index of the `{}` alternative (`{}`).", ident, name));
        self.ident.push(ident);
        self.ty.push(ty.clone());
        self.name.push(name);
        self.index.push(Literal::usize_unsuffixed(index));
        self.index_const.push(index_const);
        Ok(())
    }
}

/// Rejects types that cannot be an alternative.
fn check_alternative(ty: &Type) -> Result<(), Error> {
    match ty {
        Type::Array(_) => Err(Error("An alternative cannot be an array", ty.span())),
        Type::Slice(_) => Err(Error("An alternative cannot be a slice", ty.span())),
        Type::Reference(_) => Err(Error("An alternative cannot be a reference", ty.span())),
        Type::Never(_) => Err(Error("An alternative cannot be the never type `!`", ty.span())),
        Type::Tuple(t) if t.elems.is_empty() => {
            Err(Error("An alternative cannot be the unit type `()`", ty.span()))
        }
        Type::Paren(p) => check_alternative(&p.elem),
        Type::Group(g) => check_alternative(&g.elem),
        _ => Ok(()),
    }
}

/// True if `ty` is exactly one of the enum's own type parameters.
fn is_type_param(ty: &Type, type_params: &[&Ident]) -> bool {
    match ty {
        Type::Path(p) if p.qself.is_none() => match p.path.get_ident() {
            Some(ident) => type_params.iter().any(|t| *t == ident),
            None => false,
        },
        Type::Paren(p) => is_type_param(&p.elem, type_params),
        Type::Group(g) => is_type_param(&g.elem, type_params),
        _ => false,
    }
}

/// Printable form of a type, with the token spacing of `quote` tidied up.
fn type_name(ty: &Type) -> String {
    let mut s = quote!(#ty).to_string();
    for (from, to) in [
        (" < ", "<"),
        ("< ", "<"),
        (" <", "<"),
        (" >", ">"),
        (" ,", ","),
        (" :: ", "::"),
        (":: ", "::"),
        (" ::", "::"),
        ("& ", "&"),
        ("( ", "("),
        (" )", ")"),
        (" (", "("),
        (" ;", ";"),
    ] {
        s = s.replace(from, to);
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names_are_tidy() {
        let ty: Type = parse_quote!(std::collections::HashMap<String, Vec<u8>>);
        assert_eq!(type_name(&ty), "std::collections::HashMap<String, Vec<u8>>");
        let ty: Type = parse_quote!((f32, f32));
        assert_eq!(type_name(&ty), "(f32, f32)");
        let ty: Type = parse_quote!(Box<dyn Fn(u8) -> u8>);
        assert_eq!(type_name(&ty), "Box<dyn Fn(u8) -> u8>");
        let ty: Type = parse_quote!(Probe<'a>);
        assert_eq!(type_name(&ty), "Probe<'a>");
    }

    #[test]
    fn invalid_alternatives() {
        let bad: [Type; 6] = [
            parse_quote!([u8; 4]),
            parse_quote!([u8]),
            parse_quote!(&'static str),
            parse_quote!(&mut u32),
            parse_quote!(()),
            parse_quote!(!),
        ];
        for ty in &bad {
            assert!(check_alternative(ty).is_err(), "{}", type_name(ty));
        }
        let good: [Type; 4] = [
            parse_quote!(u8),
            parse_quote!((u8,)),
            parse_quote!(*const u8),
            parse_quote!(Box<[u8]>),
        ];
        for ty in &good {
            assert!(check_alternative(ty).is_ok(), "{}", type_name(ty));
        }
    }

    #[test]
    fn alternatives_are_checked_as_written() {
        // An alias or a type parameter may stand for anything.
        let ty: Type = parse_quote!(Bytes);
        assert!(check_alternative(&ty).is_ok());
        let ty: Type = parse_quote!(T);
        assert!(check_alternative(&ty).is_ok());
        let ty: Type = parse_quote!(([u8; 4]));
        assert!(check_alternative(&ty).is_err());
    }

    #[test]
    fn type_params_are_recognized() {
        let t = format_ident!("T");
        let params = [&t];
        assert!(is_type_param(&parse_quote!(T), &params));
        assert!(!is_type_param(&parse_quote!(Vec<T>), &params));
        assert!(!is_type_param(&parse_quote!(U), &params));
    }

    fn expand(item: TokenStream) -> Result<String, &'static str> {
        define_variant_impl(TokenStream::new(), item)
            .map(|t| t.to_string())
            .map_err(|Error(msg, _)| msg)
    }

    #[test]
    fn duplicate_alternatives_are_rejected() {
        let err = expand(quote! {
            enum E { A(u8), B(u8) }
        });
        assert_eq!(err, Err("Each alternative type may appear only once"));
    }

    #[test]
    fn non_enums_are_rejected() {
        assert_eq!(
            expand(quote! { struct S(u8); }),
            Err("define_variant requires an enum")
        );
        assert_eq!(
            expand(quote! { enum E {} }),
            Err("define_variant requires at least one alternative")
        );
        assert_eq!(
            expand(quote! { enum E { A(u8, u16) } }),
            Err("Each alternative must wrap exactly one unnamed field")
        );
        assert_eq!(
            expand(quote! { enum E { A } }),
            Err("Each alternative must wrap exactly one unnamed field")
        );
    }

    #[test]
    fn arguments_are_rejected() {
        let err = define_variant_impl(quote!(foo), quote! { enum E { A(u8) } });
        assert!(matches!(err, Err(Error("define_variant takes no arguments", _))));
    }

    #[test]
    fn companion_module_is_snake_case() {
        let out = expand(quote! {
            pub enum MyScalar { SmallInt(i8), Char(char) }
        })
        .unwrap_or_default();
        assert!(out.contains("pub mod my_scalar"));
        assert!(out.contains("\"Alternative indices of `MyScalar`.\""));
        assert!(out.contains("const SMALL_INT : usize = 0"));
        assert!(out.contains("const CHAR : usize = 1"));
    }

    #[test]
    fn keyword_module_names_are_escaped() {
        let out = expand(quote! {
            pub(crate) enum Crate { A(u8) }
        })
        .unwrap_or_default();
        assert!(out.contains("pub (crate) mod crate_"));
    }

    #[test]
    fn no_from_for_bare_type_parameters() {
        let out = expand(quote! {
            enum W<T> { One(T), Many(Vec<T>) }
        })
        .unwrap_or_default();
        assert_eq!(out.matches(":: core :: convert :: From").count(), 1);
    }
}

use artefactor::{AnnotationNode, ClassNode, CompilationUnit, Host, MemberValue};
use darling::ast::NestedMeta;
use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, ToTokens};
use syn::{Expr, ExprLit, Ident, ImplItem, ItemStruct, ItemTrait, Lit, Meta};

/// Host backed by `syn` items.
pub struct SynHost;

impl Host for SynHost {
    type Annotation = SynAnnotation;
    type Class = SynClass;
    type Unit = SynUnit;
}

/// Arguments of one `#[artefact(...)]` occurrence.
pub struct SynAnnotation {
    type_name: String,
    members: Vec<(String, MemberValue)>,
    tokens: TokenStream2,
}

impl SynAnnotation {
    /// Parse `("Type")`, `(value = "Type")` or any other member list.
    ///
    /// A positional argument is stored as the `value` member. Supplying a
    /// member twice is an error.
    pub fn parse(type_name: &str, tokens: TokenStream2) -> syn::Result<Self> {
        let mut members = Vec::new();
        for meta in NestedMeta::parse_meta_list(tokens.clone())? {
            let span = meta.to_token_stream();
            let member = match meta {
                NestedMeta::Lit(Lit::Str(lit)) => ("value".to_string(), MemberValue::Literal(lit.value())),
                NestedMeta::Lit(lit) => ("value".to_string(), expression(&lit)),
                NestedMeta::Meta(Meta::NameValue(pair)) => {
                    let name = pair.path.to_token_stream().to_string();
                    let value = match &pair.value {
                        Expr::Lit(ExprLit {
                            lit: Lit::Str(lit), ..
                        }) => MemberValue::Literal(lit.value()),
                        other => expression(other),
                    };
                    (name, value)
                }
                NestedMeta::Meta(other) => ("value".to_string(), expression(&other)),
            };
            if members.iter().any(|(name, _)| *name == member.0) {
                return Err(syn::Error::new_spanned(
                    span,
                    format!("duplicate `{}` member", member.0),
                ));
            }
            members.push(member);
        }
        Ok(Self {
            type_name: type_name.to_string(),
            members,
            tokens,
        })
    }

    /// The raw argument tokens, used to place errors.
    pub fn tokens(&self) -> &TokenStream2 {
        &self.tokens
    }
}

fn expression(tokens: &impl ToTokens) -> MemberValue {
    MemberValue::Expression(tokens.to_token_stream().to_string())
}

impl AnnotationNode for SynAnnotation {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn member(&self, name: &str) -> Option<MemberValue> {
        self.members
            .iter()
            .find(|(member, _)| member == name)
            .map(|(_, value)| value.clone())
    }
}

pub enum ClassItem {
    Struct(ItemStruct),
    Interface(ItemTrait),
}

/// A struct (or trait) plus the inherent items injectors generated for it.
pub struct SynClass {
    item: ClassItem,
    name: String,
    generated: Vec<ImplItem>,
}

impl SynClass {
    pub fn new(item: ClassItem) -> Self {
        let name = match &item {
            ClassItem::Struct(item) => item.ident.to_string(),
            ClassItem::Interface(item) => item.ident.to_string(),
        };
        Self {
            item,
            name,
            generated: Vec::new(),
        }
    }

    pub fn ident(&self) -> &Ident {
        match &self.item {
            ClassItem::Struct(item) => &item.ident,
            ClassItem::Interface(item) => &item.ident,
        }
    }

    pub fn item_struct_mut(&mut self) -> Option<&mut ItemStruct> {
        match &mut self.item {
            ClassItem::Struct(item) => Some(item),
            ClassItem::Interface(_) => None,
        }
    }

    /// Append an item to the generated inherent `impl` block.
    pub fn push_item(&mut self, item: ImplItem) {
        self.generated.push(item);
    }

    pub fn generated(&self) -> &[ImplItem] {
        &self.generated
    }
}

impl ClassNode for SynClass {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_interface(&self) -> bool {
        matches!(self.item, ClassItem::Interface(_))
    }
}

impl ToTokens for SynClass {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        match &self.item {
            ClassItem::Interface(item) => item.to_tokens(tokens),
            ClassItem::Struct(item) => {
                item.to_tokens(tokens);
                if self.generated.is_empty() {
                    return;
                }
                let ident = &item.ident;
                let generated = &self.generated;
                let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
                tokens.extend(quote! {
                    impl #impl_generics #ident #ty_generics #where_clause {
                        #(#generated)*
                    }
                });
            }
        }
    }
}

/// One macro expansion.
pub struct SynUnit {
    name: String,
}

impl SynUnit {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl CompilationUnit for SynUnit {
    fn name(&self) -> &str {
        &self.name
    }
}

use crate::host::{ClassItem, SynAnnotation, SynClass, SynHost, SynUnit};
use crate::injectors::default_registry;
use artefactor::ast::DeclarationKind;
use artefactor::{
    ArtefactTypeTransform, AstNode, InjectionError, MemorySink, Rejection, TransformConfig,
};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::ToTokens;
use std::sync::Arc;
use syn::Item;

pub fn artefact_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    TokenStream::from(expand(attr.into(), item.into()))
}

pub(crate) fn expand(attr: TokenStream2, item: TokenStream2) -> TokenStream2 {
    let config = TransformConfig::default();
    let annotation = match SynAnnotation::parse(&config.marker, attr) {
        Ok(annotation) => annotation,
        Err(err) => return with_error(item, err),
    };
    let item: Item = match syn::parse2(item.clone()) {
        Ok(item) => item,
        Err(err) => return with_error(item, err),
    };
    // Nothing subscribes to `tracing` during expansion; keep diagnostics for the error.
    let sink = Arc::new(MemorySink::new());
    let transform = match default_registry() {
        Ok(registry) => ArtefactTypeTransform::new(Arc::new(registry))
            .with_config(config)
            .with_sink(sink.clone()),
        Err(err) => {
            return with_error(
                item.to_token_stream(),
                syn::Error::new_spanned(annotation.tokens(), err.to_string()),
            )
        }
    };

    let mut class = match item {
        Item::Struct(item) => SynClass::new(ClassItem::Struct(item)),
        Item::Trait(item) => SynClass::new(ClassItem::Interface(item)),
        other => {
            let kind = declaration_kind(&other);
            let mut unit = SynUnit::new(kind.to_string());
            let mut nodes = [
                AstNode::<SynHost>::Annotation(&annotation),
                AstNode::Declaration(kind),
            ];
            // Only classes are artefacts; anything else passes through.
            return match transform.visit(&mut nodes, &mut unit) {
                Ok(_) => other.to_token_stream(),
                Err(err) => with_error(
                    other.to_token_stream(),
                    syn::Error::new_spanned(annotation.tokens(), err.to_string()),
                ),
            };
        }
    };

    let mut unit = SynUnit::new(format!("#[artefact] {}", class.ident()));
    let mut nodes = [
        AstNode::<SynHost>::Annotation(&annotation),
        AstNode::Class(&mut class),
    ];
    match transform.visit(&mut nodes, &mut unit) {
        Ok(_) => class.to_token_stream(),
        Err(err) => {
            let error = match &err {
                InjectionError::Rejected {
                    reason: Rejection::MissingArtefactType,
                    ..
                } if !annotation.tokens().is_empty() => {
                    syn::Error::new_spanned(annotation.tokens(), err.to_string())
                }
                _ => syn::Error::new_spanned(class.ident(), failure_message(&err, &sink)),
            };
            with_error(class.to_token_stream(), error)
        }
    }
}

/// Injector failures carry the recorded diagnostic; other errors speak for themselves.
fn failure_message(err: &InjectionError, sink: &MemorySink) -> String {
    match (err, sink.records().last()) {
        (InjectionError::InjectorFailed { .. }, Some(diagnostic)) => format!(
            "{} (injector `{}` #{} for {}, caused by: {})",
            diagnostic.message,
            diagnostic.injector,
            diagnostic.index,
            diagnostic.artefact_type,
            diagnostic.cause
        ),
        _ => err.to_string(),
    }
}

/// Keep the item so one error does not cascade into unresolved names.
fn with_error(item: TokenStream2, err: syn::Error) -> TokenStream2 {
    let mut tokens = item;
    tokens.extend(err.to_compile_error());
    tokens
}

fn declaration_kind(item: &Item) -> DeclarationKind {
    match item {
        Item::Fn(_) => DeclarationKind::Method,
        Item::Const(_) | Item::Static(_) => DeclarationKind::Field,
        Item::Mod(_) => DeclarationKind::Package,
        Item::Enum(_) | Item::Union(_) | Item::Type(_) => DeclarationKind::Type,
        _ => DeclarationKind::Other,
    }
}

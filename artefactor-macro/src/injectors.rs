//! Injectors shipped with the `#[artefact]` attribute.

use crate::host::{SynClass, SynHost, SynUnit};
use artefactor::{ClassInjector, InjectorRegistry};
use quote::format_ident;
use syn::{parse_quote, Fields};

/// Every artefact gets a `log_target()` naming its tracing target.
pub struct LoggingInjector;

impl ClassInjector<SynHost> for LoggingInjector {
    fn inject(&self, _unit: &mut SynUnit, class: &mut SynClass) -> anyhow::Result<()> {
        let name = class.ident().to_string();
        class.push_item(parse_quote! {
            pub fn log_target() -> &'static str {
                concat!(module_path!(), "::", #name)
            }
        });
        Ok(())
    }
}

/// `controller_name()` and `base_path()` derived from the logical name,
/// e.g. `BookController` -> `book`, `/book`.
pub struct ControllerInjector;

impl ClassInjector<SynHost> for ControllerInjector {
    fn inject(&self, _unit: &mut SynUnit, class: &mut SynClass) -> anyhow::Result<()> {
        let name = property_name(&logical_name(&class.ident().to_string(), "Controller"));
        let base_path = format!("/{}", name);
        class.push_item(parse_quote! {
            pub fn controller_name() -> &'static str { #name }
        });
        class.push_item(parse_quote! {
            pub fn base_path() -> &'static str { #base_path }
        });
        Ok(())
    }
}

/// `service_name()`, the bean-style property name of the service.
pub struct ServiceInjector;

impl ClassInjector<SynHost> for ServiceInjector {
    fn inject(&self, _unit: &mut SynUnit, class: &mut SynClass) -> anyhow::Result<()> {
        let name = property_name(&class.ident().to_string());
        class.push_item(parse_quote! {
            pub fn service_name() -> &'static str { #name }
        });
        Ok(())
    }
}

/// Adds the persistent `id` and `version` fields.
pub struct DomainInjector;

impl ClassInjector<SynHost> for DomainInjector {
    fn inject(&self, _unit: &mut SynUnit, class: &mut SynClass) -> anyhow::Result<()> {
        let ident = class.ident().clone();
        let item = class
            .item_struct_mut()
            .ok_or_else(|| anyhow::anyhow!("{} is not a struct", ident))?;
        let fields = match &mut item.fields {
            Fields::Named(fields) => fields,
            _ => anyhow::bail!("domain class {} must have named fields", ident),
        };

        for name in ["id", "version"] {
            let field = format_ident!("{}", name);
            if fields.named.iter().any(|f| f.ident.as_ref() == Some(&field)) {
                anyhow::bail!("domain class {} already declares a `{}` field", ident, name);
            }
            fields.named.push(parse_quote!(pub #field: ::core::option::Option<i64>));
        }
        Ok(())
    }
}

/// Registry used by `#[artefact]`, in execution order.
pub fn default_registry() -> artefactor::Result<InjectorRegistry<SynHost>> {
    InjectorRegistry::builder()
        .universal("logging", LoggingInjector)
        .scoped("controller", ["Controller"], ControllerInjector)
        .scoped("service", ["Service"], ServiceInjector)
        .scoped("domain", ["Domain"], DomainInjector)
        .build()
}

/// `BookController` -> `Book`; names without the suffix are kept.
fn logical_name(name: &str, suffix: &str) -> String {
    match name.strip_suffix(suffix) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name.to_string(),
    }
}

/// `BookService` -> `bookService`, `URLMapper` stays `URLMapper`.
fn property_name(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(_), Some(second)) if second.is_uppercase() => name.to_string(),
        (Some(first), _) => first.to_lowercase().chain(name.chars().skip(1)).collect(),
        (None, _) => String::new(),
    }
}

use proc_macro::TokenStream;

mod artefact;
mod host;
mod injectors;

/// Attribute macro that turns a struct into a framework artefact
///
/// The argument names the artefact type. Every built-in injector that supports
/// that type adds its items to the struct:
///
/// | injector     | artefact types | adds                                |
/// |--------------|----------------|-------------------------------------|
/// | `logging`    | all            | `log_target()`                      |
/// | `controller` | `Controller`   | `controller_name()`, `base_path()`  |
/// | `service`    | `Service`      | `service_name()`                    |
/// | `domain`     | `Domain`       | `id` and `version` fields           |
///
/// Traits cannot be artefacts, and the artefact type must be a string literal.
///
/// # Example
/// ```
/// use artefactor_macro::artefact;
///
/// #[artefact("Controller")]
/// pub struct BookController;
///
/// assert_eq!(BookController::base_path(), "/book");
/// ```
#[proc_macro_attribute]
pub fn artefact(attr: TokenStream, item: TokenStream) -> TokenStream {
    artefact::artefact_attribute(attr, item)
}

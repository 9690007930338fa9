mod model;
pub use model::ModelDefinitionValidator;

mod properties;
pub use properties::PropertiesDefinitionValidator;

mod relations;
pub use relations::RelationsDefinitionValidator;

/// Treats an empty string option as absent.
fn present(option: &Option<String>) -> Option<&str> {
    option.as_deref().filter(|value| !value.is_empty())
}

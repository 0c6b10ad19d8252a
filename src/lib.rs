//! Translate a loaded source class graph into an API type model for typed
//! client bindings.
//!
//! Pipeline: [`source::SourceModel`] → [`translate::TypeTranslator`] →
//! [`model::ApiDefinition`].
pub mod env;
pub mod error;
pub mod model;
pub mod path_de;
pub mod settings;
pub mod source;
pub mod translate;

pub use error::TranslationError;
pub use model::{ApiDefinition, ApiType, ApiTypeName};
pub use settings::TranslationSettings;
pub use source::{SourceModel, SourceType};
pub use translate::{TranslationContext, TypeTranslator, translate_roots};

//! Output model: everything a translation run discovers, keyed by display name.
//!
//! Populated only by the translator; read-only for everyone downstream.
pub mod api_type;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

pub use api_type::{ApiType, ApiTypeName, ClassType, Primitive};

// ————————————————————————————————————————————————————————————————————————————
// DEFINITIONS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ApiType,
    /// Source member the property came from, e.g. `foo.Person#getName`.
    pub source: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClassDefinition {
    pub name: ApiTypeName,
    pub variables: Vec<String>,
    properties: IndexMap<String, PropertyDefinition>,
    /// Distinct instantiations seen during the run.
    instantiations: IndexSet<ClassType>,
}

impl ClassDefinition {
    pub fn new(name: ApiTypeName, variables: Vec<String>) -> Self {
        Self { name, variables, properties: IndexMap::new(), instantiations: IndexSet::new() }
    }

    /// First writer wins. Returns false if the name was already taken.
    pub(crate) fn add_property(&mut self, property: PropertyDefinition) -> bool {
        debug_assert!(property.ty.is_normalized(), "nested nullable in {}.{}", self.name, property.name);
        if self.properties.contains_key(&property.name) {
            return false;
        }
        self.properties.insert(property.name.clone(), property);
        true
    }

    pub(crate) fn add_instantiation(&mut self, class: ClassType) {
        self.instantiations.insert(class);
    }

    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.get(name)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties.keys().map(String::as_str).collect()
    }

    pub fn instantiations(&self) -> impl Iterator<Item = &ClassType> {
        self.instantiations.iter()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnumDefinition {
    pub name: ApiTypeName,
    pub constants: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DiscriminatedUnionDefinition {
    pub name: ApiTypeName,
    pub discriminator: String,
    /// Discriminator value → concrete subtype reference.
    pub types: IndexMap<String, ClassType>,
}

impl DiscriminatedUnionDefinition {
    pub const DEFAULT_DISCRIMINATOR: &'static str = "type";
}

// ————————————————————————————————————————————————————————————————————————————
// API DEFINITION
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, Default, Serialize)]
pub struct ApiDefinition {
    classes: IndexMap<ApiTypeName, ClassDefinition>,
    enums: IndexMap<ApiTypeName, EnumDefinition>,
    unions: IndexMap<ApiTypeName, DiscriminatedUnionDefinition>,
    black_boxes: IndexSet<ApiTypeName>,
    type_aliases: IndexMap<ApiTypeName, ApiType>,
}

impl ApiDefinition {
    pub fn new() -> Self { Self::default() }

    /// Any kind of definition registered under `name`.
    pub fn contains_type(&self, name: &ApiTypeName) -> bool {
        self.classes.contains_key(name)
            || self.enums.contains_key(name)
            || self.unions.contains_key(name)
            || self.type_aliases.contains_key(name)
    }

    pub(crate) fn add_class_definition(&mut self, definition: ClassDefinition) {
        self.classes.entry(definition.name.clone()).or_insert(definition);
    }

    pub(crate) fn class_definition_mut(&mut self, name: &ApiTypeName) -> Option<&mut ClassDefinition> {
        self.classes.get_mut(name)
    }

    pub(crate) fn add_enum_definition(&mut self, definition: EnumDefinition) {
        self.enums.entry(definition.name.clone()).or_insert(definition);
    }

    pub(crate) fn add_discriminated_union(&mut self, definition: DiscriminatedUnionDefinition) {
        self.unions.entry(definition.name.clone()).or_insert(definition);
    }

    pub(crate) fn add_black_box(&mut self, name: ApiTypeName) {
        self.black_boxes.insert(name);
    }

    pub(crate) fn add_type_alias(&mut self, name: ApiTypeName, ty: ApiType) {
        debug_assert!(ty.is_normalized(), "nested nullable in alias {name}: {ty}");
        self.type_aliases.entry(name).or_insert(ty);
    }

    /// Overwrite a placeholder alias once its target is known.
    pub(crate) fn replace_type_alias(&mut self, name: ApiTypeName, ty: ApiType) {
        debug_assert!(ty.is_normalized(), "nested nullable in alias {name}: {ty}");
        self.type_aliases.insert(name, ty);
    }

    pub fn class_definitions(&self) -> impl Iterator<Item = &ClassDefinition> { self.classes.values() }
    pub fn class_definition(&self, name: &str) -> Option<&ClassDefinition> {
        self.classes.get(&ApiTypeName::new(name))
    }
    pub fn class_definition_count(&self) -> usize { self.classes.len() }

    pub fn enum_definitions(&self) -> impl Iterator<Item = &EnumDefinition> { self.enums.values() }
    pub fn enum_definition(&self, name: &str) -> Option<&EnumDefinition> {
        self.enums.get(&ApiTypeName::new(name))
    }

    pub fn discriminated_unions(&self) -> impl Iterator<Item = &DiscriminatedUnionDefinition> {
        self.unions.values()
    }
    pub fn discriminated_union(&self, name: &str) -> Option<&DiscriminatedUnionDefinition> {
        self.unions.get(&ApiTypeName::new(name))
    }

    pub fn black_boxes(&self) -> impl Iterator<Item = &ApiTypeName> { self.black_boxes.iter() }
    pub fn type_aliases(&self) -> &IndexMap<ApiTypeName, ApiType> { &self.type_aliases }
}

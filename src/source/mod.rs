//! Source type model: the already-loaded class graph the translator reads.
//!
//! Nothing here parses class files. Producers (a bytecode reader, a JSON
//! dump, a test fixture) hand over fully materialized classes.
pub mod annotations;

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// Source type expression, as written in a field, method or supertype.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Raw class or primitive by qualified name; `void` included.
    Basic(String),
    Parameterized { base: Box<SourceType>, arguments: Vec<SourceType> },
    Array(Box<SourceType>),
    Variable(String),
    Wildcard {
        #[serde(default)]
        upper_bound: Option<Box<SourceType>>,
        #[serde(default)]
        lower_bound: Option<Box<SourceType>>,
    },
    /// `Outer<..>.Inner<..>`
    Inner { outer: Box<SourceType>, name: String, #[serde(default)] arguments: Vec<SourceType> },
}

impl SourceType {
    pub fn basic(name: impl Into<String>) -> Self { SourceType::Basic(name.into()) }

    pub fn void() -> Self { SourceType::basic("void") }

    pub fn variable(name: impl Into<String>) -> Self { SourceType::Variable(name.into()) }

    pub fn array(element: SourceType) -> Self { SourceType::Array(Box::new(element)) }

    pub fn parameterized(base: impl Into<String>, arguments: Vec<SourceType>) -> Self {
        SourceType::Parameterized { base: Box::new(SourceType::basic(base)), arguments }
    }

    pub fn wildcard() -> Self { SourceType::Wildcard { upper_bound: None, lower_bound: None } }

    pub fn is_void(&self) -> bool { matches!(self, SourceType::Basic(name) if name == "void") }

    /// Qualified name of the class this expression is rooted at, if any.
    pub fn non_generic_class_name(&self) -> Option<&str> {
        match self {
            SourceType::Basic(name) => Some(name),
            SourceType::Parameterized { base, .. } => base.non_generic_class_name(),
            _ => None,
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, xs: &[SourceType]) -> fmt::Result {
            for (i, x) in xs.iter().enumerate() {
                if i > 0 { f.write_str(", ")?; }
                write!(f, "{x}")?;
            }
            Ok(())
        }
        match self {
            SourceType::Basic(name) => f.write_str(name),
            SourceType::Parameterized { base, arguments } => {
                write!(f, "{base}<")?;
                list(f, arguments)?;
                f.write_str(">")
            }
            SourceType::Array(element) => write!(f, "{element}[]"),
            SourceType::Variable(name) => f.write_str(name),
            SourceType::Wildcard { upper_bound: Some(b), .. } => write!(f, "? extends {b}"),
            SourceType::Wildcard { lower_bound: Some(b), .. } => write!(f, "? super {b}"),
            SourceType::Wildcard { .. } => f.write_str("?"),
            SourceType::Inner { outer, name, arguments } if arguments.is_empty() => write!(f, "{outer}.{name}"),
            SourceType::Inner { outer, name, arguments } => {
                write!(f, "{outer}.{name}<")?;
                list(f, arguments)?;
                f.write_str(">")
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// ANNOTATIONS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationValue {
    String(String),
    Bool(bool),
    Int(i64),
    /// Class literal, by qualified name.
    Class(String),
    Enum { type_name: String, constant: String },
    Annotation(Annotation),
    Array(Vec<AnnotationValue>),
}

impl From<&str> for AnnotationValue {
    fn from(s: &str) -> Self { AnnotationValue::String(s.to_owned()) }
}

impl From<bool> for AnnotationValue {
    fn from(b: bool) -> Self { AnnotationValue::Bool(b) }
}

impl From<Annotation> for AnnotationValue {
    fn from(a: Annotation) -> Self { AnnotationValue::Annotation(a) }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub name: String,
    #[serde(default)]
    pub attributes: IndexMap<String, AnnotationValue>,
}

impl Annotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), attributes: IndexMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<AnnotationValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn simple_name(&self) -> &str { simple_name(&self.name) }

    pub fn attribute(&self, key: &str) -> Option<&AnnotationValue> { self.attributes.get(key) }

    /// Array attributes flattened; a scalar counts as a one-element array.
    pub fn attribute_values(&self, key: &str) -> Vec<&AnnotationValue> {
        match self.attributes.get(key) {
            None => Vec::new(),
            Some(AnnotationValue::Array(xs)) => xs.iter().collect(),
            Some(x) => vec![x],
        }
    }

    pub fn string_attribute(&self, key: &str) -> Option<&str> {
        match self.attribute(key)? {
            AnnotationValue::String(s) => Some(s),
            AnnotationValue::Array(xs) if xs.len() == 1 => match &xs[0] {
                AnnotationValue::String(s) => Some(s),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn bool_attribute(&self, key: &str) -> Option<bool> {
        match self.attribute(key)? {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Anything that can carry annotations: classes, fields, methods, parameters.
pub trait AnnotatedElement {
    fn annotations(&self) -> &[Annotation];

    fn find_annotation(&self, name: &str) -> Option<&Annotation> {
        self.annotations().iter().find(|a| a.name == name)
    }

    fn has_annotation(&self, name: &str) -> bool { self.find_annotation(name).is_some() }

    /// Any `@Nullable`, whatever package it comes from.
    fn has_nullable_annotation(&self) -> bool {
        self.annotations().iter().any(|a| a.simple_name() == "Nullable")
    }
}

/// Context element for root translations, where no member is involved.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unannotated;

impl AnnotatedElement for Unannotated {
    fn annotations(&self) -> &[Annotation] { &[] }
}

// ————————————————————————————————————————————————————————————————————————————
// MEMBERS
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: SourceType,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_transient: bool,
    #[serde(default)]
    pub is_enum_constant: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl SourceField {
    pub fn new(name: impl Into<String>, ty: SourceType) -> Self {
        Self {
            name: name.into(),
            ty,
            visibility: Visibility::Public,
            is_static: false,
            is_transient: false,
            is_enum_constant: false,
            annotations: Vec::new(),
        }
    }

    pub fn private(mut self) -> Self { self.visibility = Visibility::Private; self }
    pub fn static_(mut self) -> Self { self.is_static = true; self }
    pub fn transient(mut self) -> Self { self.is_transient = true; self }
    pub fn enum_constant(mut self) -> Self { self.is_enum_constant = true; self.is_static = true; self }
    pub fn annotated(mut self, annotation: Annotation) -> Self { self.annotations.push(annotation); self }

    pub fn is_public(&self) -> bool { self.visibility == Visibility::Public }
}

impl AnnotatedElement for SourceField {
    fn annotations(&self) -> &[Annotation] { &self.annotations }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceParameter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: SourceType,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl AnnotatedElement for SourceParameter {
    fn annotations(&self) -> &[Annotation] { &self.annotations }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceMethod {
    pub name: String,
    pub return_type: SourceType,
    #[serde(default)]
    pub parameters: Vec<SourceParameter>,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl SourceMethod {
    pub fn new(name: impl Into<String>, return_type: SourceType) -> Self {
        Self {
            name: name.into(),
            return_type,
            parameters: Vec::new(),
            visibility: Visibility::Public,
            is_static: false,
            annotations: Vec::new(),
        }
    }

    pub fn private(mut self) -> Self { self.visibility = Visibility::Private; self }
    pub fn static_(mut self) -> Self { self.is_static = true; self }
    pub fn annotated(mut self, annotation: Annotation) -> Self { self.annotations.push(annotation); self }

    pub fn parameter(mut self, name: impl Into<String>, ty: SourceType) -> Self {
        self.parameters.push(SourceParameter { name: Some(name.into()), ty, annotations: Vec::new() });
        self
    }

    pub fn is_public(&self) -> bool { self.visibility == Visibility::Public }

    /// Public, non-static, no parameters, non-void, named like an accessor.
    pub fn is_getter(&self) -> bool {
        self.is_public()
            && !self.is_static
            && self.parameters.is_empty()
            && !self.return_type.is_void()
            && self.getter_property_name().is_some()
    }

    /// `getFoo` → `foo`, `isFoo` → `foo` (boolean only), `getURL` → `URL`.
    pub fn getter_property_name(&self) -> Option<String> {
        let rest = if let Some(rest) = self.name.strip_prefix("get") {
            rest
        } else if let Some(rest) = self.name.strip_prefix("is") {
            if self.return_type != SourceType::basic("boolean") {
                return None;
            }
            rest
        } else {
            return None;
        };
        if rest.is_empty() { None } else { Some(decapitalize(rest)) }
    }
}

impl AnnotatedElement for SourceMethod {
    fn annotations(&self) -> &[Annotation] { &self.annotations }
}

// ————————————————————————————————————————————————————————————————————————————
// CLASSES
// ————————————————————————————————————————————————————————————————————————————

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

/// Language-specific metadata for classes using construction-based serialization.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassMetadata {
    #[serde(default)]
    pub is_sealed: bool,
    #[serde(default)]
    pub is_value_class: bool,
    /// Qualified names, declaration order.
    #[serde(default)]
    pub sealed_subclasses: Vec<String>,
    #[serde(default)]
    pub properties: Vec<MetadataProperty>,
}

impl ClassMetadata {
    pub fn property(&self, name: &str) -> Option<&MetadataProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetadataProperty {
    pub name: String,
    /// Constructor parameter default or property initializer present.
    #[serde(default)]
    pub has_default: bool,
    /// Declared with a nullable type.
    #[serde(default)]
    pub nullable: bool,
}

impl MetadataProperty {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), has_default: false, nullable: false }
    }
    pub fn with_default(mut self) -> Self { self.has_default = true; self }
    pub fn nullable(mut self) -> Self { self.nullable = true; self }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SourceClass {
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default)]
    pub super_class: Option<SourceType>,
    #[serde(default)]
    pub interfaces: Vec<SourceType>,
    #[serde(default)]
    pub type_parameters: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
    #[serde(default)]
    pub fields: Vec<SourceField>,
    #[serde(default)]
    pub methods: Vec<SourceMethod>,
    #[serde(default)]
    pub metadata: Option<ClassMetadata>,
}

impl SourceClass {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ClassKind::Class,
            super_class: Some(SourceType::basic(OBJECT)),
            interfaces: Vec::new(),
            type_parameters: Vec::new(),
            annotations: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            metadata: None,
        }
    }

    pub fn kind(mut self, kind: ClassKind) -> Self {
        if kind == ClassKind::Interface { self.super_class = None; }
        self.kind = kind;
        self
    }
    pub fn extends(mut self, super_class: SourceType) -> Self { self.super_class = Some(super_class); self }
    pub fn implements(mut self, interface: SourceType) -> Self { self.interfaces.push(interface); self }
    pub fn type_parameter(mut self, name: impl Into<String>) -> Self { self.type_parameters.push(name.into()); self }
    pub fn annotated(mut self, annotation: Annotation) -> Self { self.annotations.push(annotation); self }
    pub fn field(mut self, field: SourceField) -> Self { self.fields.push(field); self }
    pub fn method(mut self, method: SourceMethod) -> Self { self.methods.push(method); self }
    pub fn metadata(mut self, metadata: ClassMetadata) -> Self { self.metadata = Some(metadata); self }

    pub fn basic_type(&self) -> SourceType { SourceType::basic(self.name.clone()) }

    pub fn simple_name(&self) -> &str { simple_name(&self.name) }

    pub fn is_enum(&self) -> bool { self.kind == ClassKind::Enum }

    /// Superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &SourceType> {
        self.super_class.iter().chain(self.interfaces.iter())
    }

    pub fn public_instance_fields(&self) -> impl Iterator<Item = &SourceField> {
        self.fields.iter().filter(|f| f.is_public() && !f.is_static)
    }

    pub fn instance_fields(&self) -> impl Iterator<Item = &SourceField> {
        self.fields.iter().filter(|f| !f.is_static)
    }

    pub fn getters(&self) -> impl Iterator<Item = &SourceMethod> {
        self.methods.iter().filter(|m| m.is_getter())
    }

    /// Enum constants in declaration order; empty for non-enums.
    pub fn enum_constants(&self) -> Vec<String> {
        if !self.is_enum() {
            return Vec::new();
        }
        self.fields.iter().filter(|f| f.is_enum_constant).map(|f| f.name.clone()).collect()
    }

    pub fn find_field(&self, name: &str) -> Option<&SourceField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

impl AnnotatedElement for SourceClass {
    fn annotations(&self) -> &[Annotation] { &self.annotations }
}

// ————————————————————————————————————————————————————————————————————————————
// MODEL
// ————————————————————————————————————————————————————————————————————————————

pub const OBJECT: &str = "java.lang.Object";
pub const STRING: &str = "java.lang.String";

/// Container shapes the classification oracle knows about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Sequence,
    Map,
    Optional,
}

static SEQUENCE_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "java.util.Collection",
    "java.util.List",
    "java.util.Set",
    "java.util.SortedSet",
    "java.util.NavigableSet",
    "java.util.Queue",
    "java.util.Deque",
    "java.util.ArrayList",
    "java.util.LinkedList",
    "java.util.HashSet",
    "java.util.LinkedHashSet",
    "java.util.TreeSet",
    "java.util.ArrayDeque",
    "java.util.EnumSet",
]));

static MAP_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "java.util.Map",
    "java.util.SortedMap",
    "java.util.NavigableMap",
    "java.util.HashMap",
    "java.util.LinkedHashMap",
    "java.util.TreeMap",
    "java.util.EnumMap",
    "java.util.concurrent.ConcurrentMap",
    "java.util.concurrent.ConcurrentHashMap",
]));

static OPTIONAL_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from(["java.util.Optional"]));

static INTEGRAL_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "byte", "short", "int", "long",
    "java.lang.Byte", "java.lang.Short", "java.lang.Integer", "java.lang.Long",
    "java.math.BigInteger",
]));

static FLOATING_TYPES: Lazy<HashSet<&'static str>> = Lazy::new(|| HashSet::from([
    "float", "double",
    "java.lang.Float", "java.lang.Double", "java.lang.Number",
    "java.math.BigDecimal",
]));

impl ContainerKind {
    fn well_known(self) -> &'static HashSet<&'static str> {
        match self {
            ContainerKind::Sequence => &SEQUENCE_TYPES,
            ContainerKind::Map => &MAP_TYPES,
            ContainerKind::Optional => &OPTIONAL_TYPES,
        }
    }
}

#[derive(Deserialize)]
struct ModelFile {
    classes: Vec<SourceClass>,
}

impl From<ModelFile> for SourceModel {
    fn from(file: ModelFile) -> Self {
        let mut model = SourceModel::new();
        for class in file.classes { model.add_class(class); }
        model
    }
}

/// All classes reachable for one translation run.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(from = "ModelFile")]
pub struct SourceModel {
    classes: IndexMap<String, SourceClass>,
}

impl SourceModel {
    pub fn new() -> Self { Self::default() }

    pub fn add_class(&mut self, class: SourceClass) {
        self.classes.insert(class.name.clone(), class);
    }

    pub fn with_class(mut self, class: SourceClass) -> Self {
        self.add_class(class);
        self
    }

    pub fn find_class(&self, name: &str) -> Option<&SourceClass> { self.classes.get(name) }

    pub fn classes(&self) -> impl Iterator<Item = &SourceClass> { self.classes.values() }

    pub fn len(&self) -> usize { self.classes.len() }

    pub fn is_empty(&self) -> bool { self.classes.is_empty() }

    /// Direct subtypes (by superclass or interface), model order.
    pub fn subclasses_of<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SourceClass> + 'a {
        self.classes.values().filter(move |c| {
            c.supertypes().any(|t| t.non_generic_class_name() == Some(name))
        })
    }

    /// Is `name` a well-known container of `kind`, or does any supertype
    /// reachable through the model make it one?
    pub fn is_assignable_to(&self, name: &str, kind: ContainerKind) -> bool {
        let known = kind.well_known();
        let mut seen = HashSet::new();
        let mut pending = vec![name];
        while let Some(current) = pending.pop() {
            if !seen.insert(current) {
                continue;
            }
            if known.contains(current) {
                return true;
            }
            if let Some(class) = self.find_class(current) {
                pending.extend(class.supertypes().filter_map(SourceType::non_generic_class_name));
            }
        }
        false
    }

    pub fn is_integral(&self, name: &str) -> bool { INTEGRAL_TYPES.contains(name) }

    pub fn is_floating(&self, name: &str) -> bool { FLOATING_TYPES.contains(name) }

    pub fn is_boolean(&self, name: &str) -> bool { name == "boolean" || name == "java.lang.Boolean" }

    pub fn is_string(&self, name: &str) -> bool { name == STRING }
}

// ------------------------------- Utilities -------------------------------- //

/// Segment after the last `.` or `$`.
pub fn simple_name(qualified: &str) -> &str {
    qualified.rsplit(['.', '$']).next().unwrap_or(qualified)
}

/// Bean-style: `Foo` → `foo`, but `URL` stays `URL`.
pub fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(a), Some(b)) if a.is_uppercase() && b.is_uppercase() => name.to_owned(),
        (Some(a), _) => a.to_lowercase().chain(name[a.len_utf8()..].chars()).collect(),
        (None, _) => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn getter_naming_convention() {
        let get = SourceMethod::new("getName", SourceType::basic(STRING));
        assert!(get.is_getter());
        assert_eq!(get.getter_property_name().as_deref(), Some("name"));

        let is = SourceMethod::new("isActive", SourceType::basic("boolean"));
        assert_eq!(is.getter_property_name().as_deref(), Some("active"));

        let boxed_is = SourceMethod::new("isActive", SourceType::basic("java.lang.Boolean"));
        assert!(!boxed_is.is_getter());

        assert!(!SourceMethod::new("get", SourceType::basic(STRING)).is_getter());
        assert!(!SourceMethod::new("getNothing", SourceType::void()).is_getter());
        assert!(!SourceMethod::new("getFoo", SourceType::basic(STRING)).parameter("x", SourceType::basic("int")).is_getter());
        assert!(!SourceMethod::new("getFoo", SourceType::basic(STRING)).static_().is_getter());
        assert!(!SourceMethod::new("getFoo", SourceType::basic(STRING)).private().is_getter());
    }

    #[test]
    fn decapitalize_follows_bean_rules() {
        assert_eq!(decapitalize("Foo"), "foo");
        assert_eq!(decapitalize("URL"), "URL");
        assert_eq!(decapitalize("X"), "x");
        assert_eq!(decapitalize(""), "");
    }

    #[test]
    fn simple_names() {
        assert_eq!(simple_name("foo.bar.Baz"), "Baz");
        assert_eq!(simple_name("foo.Outer$Inner"), "Inner");
        assert_eq!(simple_name("Plain"), "Plain");
    }

    #[test]
    fn assignability_walks_the_model() {
        let model = SourceModel::new()
            .with_class(SourceClass::new("foo.MyList").extends(SourceType::parameterized("java.util.ArrayList", vec![SourceType::basic(STRING)])))
            .with_class(SourceClass::new("foo.Cyclic").extends(SourceType::basic("foo.Cyclic")));

        assert!(model.is_assignable_to("java.util.List", ContainerKind::Sequence));
        assert!(model.is_assignable_to("foo.MyList", ContainerKind::Sequence));
        assert!(!model.is_assignable_to("foo.MyList", ContainerKind::Map));
        assert!(!model.is_assignable_to("foo.Cyclic", ContainerKind::Optional));
        assert!(model.is_assignable_to("java.util.HashMap", ContainerKind::Map));
    }

    #[test]
    fn subclasses_by_superclass_or_interface() {
        let model = SourceModel::new()
            .with_class(SourceClass::new("foo.Vehicle").kind(ClassKind::Interface))
            .with_class(SourceClass::new("foo.Car").implements(SourceType::basic("foo.Vehicle")))
            .with_class(SourceClass::new("foo.Truck").extends(SourceType::basic("foo.Vehicle")))
            .with_class(SourceClass::new("foo.Other"));
        let names: Vec<_> = model.subclasses_of("foo.Vehicle").map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["foo.Car", "foo.Truck"]);
    }

    #[test]
    fn annotation_attributes() {
        let a = Annotation::new(annotations::JSON_IGNORE_PROPERTIES)
            .with("value", AnnotationValue::Array(vec!["a".into(), "b".into()]))
            .with("single", "x");
        assert_eq!(a.attribute_values("value").len(), 2);
        assert_eq!(a.attribute_values("single").len(), 1);
        assert_eq!(a.string_attribute("single"), Some("x"));
        assert!(a.attribute_values("missing").is_empty());
        assert_eq!(a.simple_name(), "JsonIgnoreProperties");
    }

    #[test]
    fn nullable_annotation_from_any_package() {
        let field = SourceField::new("x", SourceType::basic(STRING))
            .annotated(Annotation::new("org.jetbrains.annotations.Nullable"));
        assert!(field.has_nullable_annotation());
        assert!(!Unannotated.has_nullable_annotation());
    }

    #[test]
    fn model_deserializes_from_json() {
        let model: SourceModel = serde_json::from_value(serde_json::json!({
            "classes": [{
                "name": "foo.Person",
                "type_parameters": ["T"],
                "fields": [
                    { "name": "name", "type": { "basic": "java.lang.String" } },
                    { "name": "tags", "type": { "parameterized": {
                        "base": { "basic": "java.util.List" },
                        "arguments": [{ "variable": "T" }]
                    } } }
                ]
            }]
        })).unwrap();
        let person = model.find_class("foo.Person").unwrap();
        assert_eq!(person.fields.len(), 2);
        assert_eq!(person.fields[1].ty.to_string(), "java.util.List<T>");
        assert_eq!(person.super_class, None);
    }
}

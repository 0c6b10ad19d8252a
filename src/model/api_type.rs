//! Target type algebra: the closed set of shapes a translated type can take.
use std::fmt;
use serde::Serialize;

// ------------------------------- Names ----------------------------------- //

/// Display name of a translated type, unique within one translation run.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ApiTypeName(pub String);

impl ApiTypeName {
    pub fn new(name: impl Into<String>) -> Self { Self(name.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ApiTypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ------------------------------- Types ----------------------------------- //

/// Primitive singletons. Two `Integer`s are the same value, there is no
/// payload to compare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    Any,
    String,
    Boolean,
    Integer,
    Float,
    Void,
}

/// Reference to a named, possibly generic, declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ClassType {
    pub name: ApiTypeName,
    pub arguments: Vec<ApiType>,
}

impl ClassType {
    pub fn new(name: ApiTypeName, arguments: Vec<ApiType>) -> Self {
        Self { name, arguments }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum ApiType {
    Primitive(Primitive),
    Array(Box<ApiType>),
    /// String-keyed; only the value type is modeled.
    Dictionary(Box<ApiType>),
    /// Never directly inside another `Nullable`. Build through
    /// [`ApiType::nullable`]; the output model checks this in debug builds.
    Nullable(Box<ApiType>),
    Class(ClassType),
    BlackBox(ApiTypeName),
    Variable(String),
}

impl ApiType {
    pub const ANY: ApiType = ApiType::Primitive(Primitive::Any);
    pub const STRING: ApiType = ApiType::Primitive(Primitive::String);
    pub const BOOLEAN: ApiType = ApiType::Primitive(Primitive::Boolean);
    pub const INTEGER: ApiType = ApiType::Primitive(Primitive::Integer);
    pub const FLOAT: ApiType = ApiType::Primitive(Primitive::Float);
    pub const VOID: ApiType = ApiType::Primitive(Primitive::Void);

    pub fn array(element: ApiType) -> Self { ApiType::Array(Box::new(element)) }

    pub fn dictionary(value: ApiType) -> Self { ApiType::Dictionary(Box::new(value)) }

    pub fn class(name: ApiTypeName, arguments: Vec<ApiType>) -> Self {
        ApiType::Class(ClassType::new(name, arguments))
    }

    /// Wrap in `Nullable` unless already nullable.
    pub fn nullable(self) -> Self {
        match self {
            ApiType::Nullable(_) => self,
            other => ApiType::Nullable(Box::new(other)),
        }
    }

    pub fn is_nullable(&self) -> bool { matches!(self, ApiType::Nullable(_)) }

    /// No `Nullable(Nullable(_))` anywhere in the tree.
    pub fn is_normalized(&self) -> bool {
        match self {
            ApiType::Nullable(inner) => !inner.is_nullable() && inner.is_normalized(),
            ApiType::Array(inner) | ApiType::Dictionary(inner) => inner.is_normalized(),
            ApiType::Class(class) => class.arguments.iter().all(ApiType::is_normalized),
            ApiType::Primitive(_) | ApiType::BlackBox(_) | ApiType::Variable(_) => true,
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiType::Primitive(p) => write!(f, "{p:?}"),
            ApiType::Array(element) => write!(f, "{element}[]"),
            ApiType::Dictionary(value) => write!(f, "Dictionary<{value}>"),
            ApiType::Nullable(inner) => write!(f, "{inner} | null"),
            ApiType::Class(class) if class.arguments.is_empty() => write!(f, "{}", class.name),
            ApiType::Class(class) => {
                write!(f, "{}<", class.name)?;
                for (i, arg) in class.arguments.iter().enumerate() {
                    if i > 0 { f.write_str(", ")?; }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            ApiType::BlackBox(name) => write!(f, "{name}"),
            ApiType::Variable(name) => f.write_str(name),
        }
    }
}

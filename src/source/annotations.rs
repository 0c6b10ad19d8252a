//! Annotation names recognized by the property and union rules.

// ---- jackson ----
pub const JSON_IGNORE: &str = "com.fasterxml.jackson.annotation.JsonIgnore";
pub const JSON_IGNORE_PROPERTIES: &str = "com.fasterxml.jackson.annotation.JsonIgnoreProperties";
pub const JSON_IGNORE_TYPE: &str = "com.fasterxml.jackson.annotation.JsonIgnoreType";
pub const JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";
pub const JSON_UNWRAPPED: &str = "com.fasterxml.jackson.annotation.JsonUnwrapped";
pub const JSON_VALUE: &str = "com.fasterxml.jackson.annotation.JsonValue";
pub const JSON_TYPE_INFO: &str = "com.fasterxml.jackson.annotation.JsonTypeInfo";
pub const JSON_SUB_TYPES: &str = "com.fasterxml.jackson.annotation.JsonSubTypes";
pub const JSON_TYPE_NAME: &str = "com.fasterxml.jackson.annotation.JsonTypeName";

/// `JsonTypeInfo.Id.NAME`, the only id strategy that yields a union.
pub const JSON_TYPE_INFO_ID: &str = "com.fasterxml.jackson.annotation.JsonTypeInfo$Id";

// ---- transience, any convention ----
pub const JAVA_BEANS_TRANSIENT: &str = "java.beans.Transient";
pub const SPRING_DATA_TRANSIENT: &str = "org.springframework.data.annotation.Transient";
pub const JAVAX_PERSISTENCE_TRANSIENT: &str = "javax.persistence.Transient";
pub const JAKARTA_PERSISTENCE_TRANSIENT: &str = "jakarta.persistence.Transient";

pub const PERSISTENCE_TRANSIENTS: &[&str] = &[
    JAVA_BEANS_TRANSIENT,
    SPRING_DATA_TRANSIENT,
    JAVAX_PERSISTENCE_TRANSIENT,
    JAKARTA_PERSISTENCE_TRANSIENT,
];

// ---- kotlinx.serialization ----
pub const SERIALIZABLE: &str = "kotlinx.serialization.Serializable";
pub const SERIAL_TRANSIENT: &str = "kotlinx.serialization.Transient";
pub const SERIAL_NAME: &str = "kotlinx.serialization.SerialName";
pub const SERIAL_REQUIRED: &str = "kotlinx.serialization.Required";
pub const JSON_CLASS_DISCRIMINATOR: &str = "kotlinx.serialization.json.JsonClassDiscriminator";

//! Property rules for classes serialized through their declared fields
//! (construction-based serialization with compile-time defaults).
use tracing::trace;

use super::{TypeTranslator, TranslationContext};
use crate::env::TypeEnvironment;
use crate::error::Result;
use crate::model::PropertyDefinition;
use crate::source::annotations::{SERIAL_NAME, SERIAL_REQUIRED, SERIAL_TRANSIENT};
use crate::source::{AnnotatedElement, SourceClass, SourceType};

/// The single wrapped field of a value class.
pub(super) fn value_member_type(class: &SourceClass) -> Option<&SourceType> {
    if !class.metadata.as_ref()?.is_value_class {
        return None;
    }
    let mut fields = class.instance_fields();
    match (fields.next(), fields.next()) {
        (Some(only), None) => Some(&only.ty),
        _ => None,
    }
}

/// Declared fields, own class first, then each superclass.
///
/// A field with a default may be omitted on the wire, so it becomes nullable
/// unless marked required.
pub(super) fn properties<'a>(
    tr: &TypeTranslator<'a>,
    cx: &mut TranslationContext,
    class: &'a SourceClass,
    env: &TypeEnvironment,
) -> Result<Vec<PropertyDefinition>> {
    let mut out = Vec::new();
    for level in tr.hierarchy(class, env.clone(), false) {
        let metadata = level.class.metadata.as_ref();
        for field in level.class.instance_fields() {
            let meta = metadata.and_then(|m| m.property(&field.name));
            // with metadata present, fields it does not list are not properties
            if metadata.is_some_and(|m| !m.properties.is_empty()) && meta.is_none() {
                trace!("{}: `{}` is not a property", level.class.name, field.name);
                continue;
            }
            if field.is_transient || field.has_annotation(SERIAL_TRANSIENT) {
                trace!("{}: `{}` is transient", level.class.name, field.name);
                continue;
            }

            let name = field.find_annotation(SERIAL_NAME)
                .and_then(|a| a.string_attribute("value"))
                .unwrap_or(field.name.as_str());

            let mut ty = tr.translate_type(cx, &field.ty, field, &level.env)?;
            let nullable = meta.is_some_and(|m| m.nullable);
            let defaulted = meta.is_some_and(|m| m.has_default) && !field.has_annotation(SERIAL_REQUIRED);
            if nullable || defaulted {
                ty = ty.nullable();
            }
            trace!("{}: `{name}` accepted as {ty}", level.class.name);
            out.push(PropertyDefinition {
                name: name.to_owned(),
                ty,
                source: format!("{}#{}", level.class.name, field.name),
            });
        }
    }
    Ok(out)
}

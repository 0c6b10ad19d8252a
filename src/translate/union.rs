//! Discriminated union detection for both serialization conventions.
use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::warn;

use super::{TypeTranslator, TranslationContext};
use crate::error::Result;
use crate::model::{ApiTypeName, ClassType, DiscriminatedUnionDefinition};
use crate::source::annotations::{
    JSON_CLASS_DISCRIMINATOR, JSON_SUB_TYPES, JSON_TYPE_INFO, JSON_TYPE_INFO_ID, JSON_TYPE_NAME, SERIAL_NAME,
};
use crate::source::{AnnotatedElement, AnnotationValue, SourceClass, SourceModel, simple_name};

/// Discriminator field plus `(value, qualified subtype)` pairs.
pub(super) struct UnionShape<'a> {
    discriminator: String,
    subtypes: Vec<(String, &'a str)>,
}

/// `@JsonTypeInfo(use = NAME)` base, with subtypes from `@JsonSubTypes` or,
/// failing that, every direct subclass in the model.
pub(super) fn jackson_union<'a>(model: &'a SourceModel, class: &'a SourceClass) -> Option<UnionShape<'a>> {
    let info = class.find_annotation(JSON_TYPE_INFO)?;
    let by_name = match info.attribute("use") {
        None => true,
        Some(AnnotationValue::Enum { type_name, constant }) => type_name == JSON_TYPE_INFO_ID && constant == "NAME",
        Some(AnnotationValue::String(id)) => id == "NAME",
        Some(_) => false,
    };
    if !by_name {
        return None;
    }

    let discriminator = info.string_attribute("property")
        .filter(|p| !p.is_empty())
        .unwrap_or(DiscriminatedUnionDefinition::DEFAULT_DISCRIMINATOR)
        .to_owned();

    let mut subtypes = Vec::new();
    if let Some(listed) = class.find_annotation(JSON_SUB_TYPES) {
        for entry in listed.attribute_values("value") {
            let AnnotationValue::Annotation(entry) = entry else { continue };
            let Some(AnnotationValue::Class(subtype)) = entry.attribute("value") else { continue };
            let value = match entry.string_attribute("name").filter(|n| !n.is_empty()) {
                Some(name) => name.to_owned(),
                None => declared_name(model, subtype, JSON_TYPE_NAME),
            };
            subtypes.push((value, subtype.as_str()));
        }
    } else {
        for subtype in model.subclasses_of(&class.name) {
            subtypes.push((declared_name(model, &subtype.name, JSON_TYPE_NAME), subtype.name.as_str()));
        }
    }
    Some(UnionShape { discriminator, subtypes })
}

/// Sealed `@Serializable` base; subtypes from the sealed-subclass list.
pub(super) fn serialization_union<'a>(model: &'a SourceModel, class: &'a SourceClass) -> Option<UnionShape<'a>> {
    let metadata = class.metadata.as_ref()?;
    if !metadata.is_sealed {
        return None;
    }

    let discriminator = class.find_annotation(JSON_CLASS_DISCRIMINATOR)
        .and_then(|a| a.string_attribute("discriminator"))
        .filter(|d| !d.is_empty())
        .unwrap_or(DiscriminatedUnionDefinition::DEFAULT_DISCRIMINATOR)
        .to_owned();

    let subtypes = if metadata.sealed_subclasses.is_empty() {
        model.subclasses_of(&class.name)
            .map(|c| (declared_name(model, &c.name, SERIAL_NAME), c.name.as_str()))
            .collect()
    } else {
        metadata.sealed_subclasses.iter()
            .map(|name| (declared_name(model, name, SERIAL_NAME), name.as_str()))
            .collect()
    };
    Some(UnionShape { discriminator, subtypes })
}

/// Subtype's own declared name, else its unqualified name.
fn declared_name(model: &SourceModel, qualified: &str, annotation: &str) -> String {
    model.find_class(qualified)
        .and_then(|c| c.find_annotation(annotation))
        .and_then(|a| a.string_attribute("value"))
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| simple_name(qualified).to_owned())
}

/// Subtypes become bare references; they are named (and so collision
/// checked) but never registered or inspected.
pub(super) fn build(
    tr: &TypeTranslator<'_>,
    cx: &mut TranslationContext,
    name: ApiTypeName,
    shape: UnionShape<'_>,
) -> Result<DiscriminatedUnionDefinition> {
    let mut kept: IndexMap<String, (&str, ClassType)> = IndexMap::new();
    for (value, subtype) in shape.subtypes {
        let subtype_name = tr.class_name_for_type(cx, subtype)?;
        match kept.entry(value) {
            // first subtype declared for a value wins
            Entry::Occupied(existing) => warn!(
                "{name}: discriminator `{}` is declared by both {} and {subtype}; dropping {subtype}",
                existing.key(),
                existing.get().0,
            ),
            Entry::Vacant(slot) => {
                slot.insert((subtype, ClassType::new(subtype_name, Vec::new())));
            }
        }
    }
    let types = kept.into_iter().map(|(value, (_, class))| (value, class)).collect();
    Ok(DiscriminatedUnionDefinition { name, discriminator: shape.discriminator, types })
}

//! Property rules for classes serialized through fields and getters.
use std::collections::HashMap;

use indexmap::IndexMap;
use tracing::trace;

use super::{Level, TypeTranslator, TranslationContext};
use crate::env::TypeEnvironment;
use crate::error::Result;
use crate::model::PropertyDefinition;
use crate::source::annotations::{
    JSON_IGNORE, JSON_IGNORE_PROPERTIES, JSON_IGNORE_TYPE, JSON_PROPERTY, JSON_UNWRAPPED, JSON_VALUE,
    PERSISTENCE_TRANSIENTS,
};
use crate::source::{AnnotatedElement, Annotation, AnnotationValue, SourceClass, SourceField, SourceMethod, SourceType};

/// Type of the member marked `@JsonValue`, if the class serializes as one value.
pub(super) fn value_member_type(class: &SourceClass) -> Option<&SourceType> {
    let enabled = |a: &Annotation| a.bool_attribute("value") != Some(false);
    if let Some(method) = class.methods.iter().find(|m| m.find_annotation(JSON_VALUE).is_some_and(enabled)) {
        return Some(&method.return_type);
    }
    class.fields.iter()
        .find(|f| f.find_annotation(JSON_VALUE).is_some_and(enabled))
        .map(|f| &f.ty)
}

// ------------------------------ Candidates ------------------------------- //

enum Member<'a> {
    Getter(&'a SourceMethod),
    Field(&'a SourceField),
}

struct Candidate<'a> {
    member: Member<'a>,
    /// index into the hierarchy levels
    level: usize,
    /// same-named field next to a getter; its annotations count too
    companion: Option<&'a SourceField>,
}

impl<'a> Candidate<'a> {
    fn ty(&self) -> &'a SourceType {
        match self.member {
            Member::Getter(m) => &m.return_type,
            Member::Field(f) => &f.ty,
        }
    }

    fn member_name(&self) -> &'a str {
        match self.member {
            Member::Getter(m) => &m.name,
            Member::Field(f) => &f.name,
        }
    }

    fn annotations(&self) -> impl Iterator<Item = &'a Annotation> + '_ {
        let own: &'a [Annotation] = match self.member {
            Member::Getter(m) => &m.annotations,
            Member::Field(f) => &f.annotations,
        };
        own.iter().chain(self.companion.into_iter().flat_map(|f| f.annotations.iter()))
    }

    fn find(&self, name: &str) -> Option<&'a Annotation> {
        self.annotations().find(|a| a.name == name)
    }

    fn is_nullable(&self) -> bool {
        self.annotations().any(|a| a.simple_name() == "Nullable")
    }

    fn is_transient(&self) -> bool {
        let modifier = match self.member {
            Member::Field(f) => f.is_transient,
            Member::Getter(_) => self.companion.is_some_and(|f| f.is_transient),
        };
        modifier || self.annotations().any(|a| PERSISTENCE_TRANSIENTS.contains(&a.name.as_str()))
    }
}

/// Getters and public fields by logical name, most derived first. A getter
/// displaces a field of the same name wherever either was declared.
fn candidates<'a>(levels: &[Level<'a>]) -> IndexMap<String, Candidate<'a>> {
    let mut out: IndexMap<String, Candidate<'a>> = IndexMap::new();
    for (i, level) in levels.iter().enumerate() {
        let class = level.class;
        for getter in class.getters() {
            let Some(name) = getter.getter_property_name() else { continue };
            let candidate = Candidate { member: Member::Getter(getter), level: i, companion: class.find_field(&name) };
            match out.get_mut(&name) {
                Some(existing) if matches!(existing.member, Member::Field(_)) => *existing = candidate,
                Some(_) => {}
                None => { out.insert(name, candidate); }
            }
        }
        for field in class.public_instance_fields() {
            if !out.contains_key(&field.name) {
                out.insert(field.name.clone(), Candidate { member: Member::Field(field), level: i, companion: None });
            }
        }
    }
    out
}

/// Final ignore state per logical name. Levels are replayed base first, so
/// the most derived `@JsonIgnore` / `@JsonIgnore(false)` decides.
fn ignore_decisions(levels: &[Level<'_>]) -> HashMap<String, bool> {
    let mut ignored = HashMap::new();
    for level in levels.iter().rev() {
        let class = level.class;
        if let Some(listed) = class.find_annotation(JSON_IGNORE_PROPERTIES) {
            for value in listed.attribute_values("value") {
                if let AnnotationValue::String(name) = value {
                    ignored.insert(name.clone(), true);
                }
            }
        }
        for field in &class.fields {
            if let Some(a) = field.find_annotation(JSON_IGNORE) {
                ignored.insert(field.name.clone(), a.bool_attribute("value").unwrap_or(true));
            }
        }
        for method in &class.methods {
            if let (Some(a), Some(name)) = (method.find_annotation(JSON_IGNORE), method.getter_property_name()) {
                ignored.insert(name, a.bool_attribute("value").unwrap_or(true));
            }
        }
    }
    ignored
}

// ------------------------------ Extraction ------------------------------- //

pub(super) fn properties<'a>(
    tr: &TypeTranslator<'a>,
    cx: &mut TranslationContext,
    class: &'a SourceClass,
    env: &TypeEnvironment,
    unwrapping: &mut Vec<String>,
) -> Result<Vec<PropertyDefinition>> {
    let levels = tr.hierarchy(class, env.clone(), true);
    let ignored = ignore_decisions(&levels);
    let mut out = Vec::new();

    for (name, candidate) in candidates(&levels) {
        let level = &levels[candidate.level];
        if ignored.get(&name).copied().unwrap_or(false) {
            trace!("{}: `{name}` is ignored", class.name);
            continue;
        }
        if candidate.is_transient() {
            trace!("{}: `{name}` is transient", class.name);
            continue;
        }
        if is_ignored_type(tr, candidate.ty()) {
            trace!("{}: `{name}` has an ignored type", class.name);
            continue;
        }

        let unwrapped = candidate.find(JSON_UNWRAPPED).filter(|a| a.bool_attribute("enabled") != Some(false));
        if let Some(unwrapped) = unwrapped {
            if let Some(inner) = unwrap(tr, cx, candidate.ty(), &level.env, unwrapping)? {
                let prefix = unwrapped.string_attribute("prefix").unwrap_or("");
                let suffix = unwrapped.string_attribute("suffix").unwrap_or("");
                trace!("{}: unwrapping `{name}` into {} properties", class.name, inner.len());
                out.extend(inner.into_iter().map(|mut p| {
                    p.name = format!("{prefix}{}{suffix}", p.name);
                    p
                }));
                continue;
            }
        }

        let renamed = candidate.find(JSON_PROPERTY)
            .and_then(|a| a.string_attribute("value"))
            .filter(|s| !s.is_empty());
        let mut ty = tr.translate(cx, candidate.ty(), &level.env)?;
        if candidate.is_nullable() {
            ty = ty.nullable();
        }
        trace!("{}: `{name}` accepted as {ty}", class.name);
        out.push(PropertyDefinition {
            name: renamed.unwrap_or(name.as_str()).to_owned(),
            ty,
            source: format!("{}#{}", level.class.name, candidate.member_name()),
        });
    }
    Ok(out)
}

fn is_ignored_type(tr: &TypeTranslator<'_>, ty: &SourceType) -> bool {
    ty.non_generic_class_name()
        .and_then(|name| tr.model.find_class(name))
        .is_some_and(|class| class.has_annotation(JSON_IGNORE_TYPE))
}

/// Properties of the member's own type, or `None` when it cannot be inlined
/// (unknown class, or already being unwrapped further up).
fn unwrap<'a>(
    tr: &TypeTranslator<'a>,
    cx: &mut TranslationContext,
    ty: &SourceType,
    env: &TypeEnvironment,
    unwrapping: &mut Vec<String>,
) -> Result<Option<Vec<PropertyDefinition>>> {
    let Some(name) = ty.non_generic_class_name() else { return Ok(None) };
    let Some(class) = tr.model.find_class(name) else { return Ok(None) };
    if unwrapping.iter().any(|n| n.as_str() == name) {
        trace!("not unwrapping {name} inside itself");
        return Ok(None);
    }
    let arguments: &[SourceType] = match ty {
        SourceType::Parameterized { arguments, .. } => arguments,
        _ => &[],
    };
    let inner_env = env.bind_arguments(&class.type_parameters, arguments);

    unwrapping.push(name.to_owned());
    let result = properties(tr, cx, class, &inner_env, unwrapping);
    unwrapping.pop();
    result.map(Some)
}

//! Source type → API type translation.
//!
//! Depth-first over the class graph. Every discovered class, enum, union,
//! alias and black box lands in the run's [`ApiDefinition`]; a class is
//! registered before its members are inspected, so cycles end at the cache.
mod reflection;
mod serialization;
mod union;


use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::env::{Binding, TypeEnvironment};
use crate::error::{Result, TranslationError};
use crate::model::{ApiDefinition, ApiType, ApiTypeName, ClassDefinition, ClassType, EnumDefinition};
use crate::settings::TranslationSettings;
use crate::source::annotations::SERIALIZABLE;
use crate::source::{AnnotatedElement, ContainerKind, OBJECT, SourceClass, SourceModel, SourceType};

const OPTIONAL_INT: &str = "java.util.OptionalInt";
const OPTIONAL_LONG: &str = "java.util.OptionalLong";
const OPTIONAL_DOUBLE: &str = "java.util.OptionalDouble";

// ————————————————————————————————————————————————————————————————————————————
// CONTEXT
// ————————————————————————————————————————————————————————————————————————————

/// Mutable state of one translation run. Never share between runs.
#[derive(Debug, Default)]
pub struct TranslationContext {
    api: ApiDefinition,
    /// display name → qualified source name that claimed it
    translated_names: HashMap<String, String>,
}

impl TranslationContext {
    pub fn new() -> Self { Self::default() }

    pub fn api(&self) -> &ApiDefinition { &self.api }

    pub fn into_api(self) -> ApiDefinition { self.api }
}

// ————————————————————————————————————————————————————————————————————————————
// TRANSLATOR
// ————————————————————————————————————————————————————————————————————————————

/// How a class serializes, which decides the property rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Style {
    /// fields + getters
    Reflection,
    /// declared fields + constructor defaults
    Construction,
}

impl Style {
    fn of(class: &SourceClass) -> Self {
        if class.has_annotation(SERIALIZABLE) { Style::Construction } else { Style::Reflection }
    }
}

/// One class in a hierarchy walk, with the environment its members are read in.
pub(crate) struct Level<'a> {
    pub class: &'a SourceClass,
    pub env: TypeEnvironment,
}

pub struct TypeTranslator<'a> {
    settings: &'a TranslationSettings,
    model: &'a SourceModel,
}

impl<'a> TypeTranslator<'a> {
    pub fn new(settings: &'a TranslationSettings, model: &'a SourceModel) -> Self {
        Self { settings, model }
    }

    /// Translate a member's type, honoring the member's own `@Nullable`.
    pub fn translate_type(
        &self,
        cx: &mut TranslationContext,
        ty: &SourceType,
        element: &dyn AnnotatedElement,
        env: &TypeEnvironment,
    ) -> Result<ApiType> {
        let translated = self.translate(cx, ty, env)?;
        Ok(if element.has_nullable_annotation() { translated.nullable() } else { translated })
    }

    pub fn translate(&self, cx: &mut TranslationContext, ty: &SourceType, env: &TypeEnvironment) -> Result<ApiType> {
        match ty {
            SourceType::Basic(name) => self.translate_basic(cx, name, &[]),
            SourceType::Parameterized { base, arguments } => self.translate_parameterized(cx, base, arguments, env),
            SourceType::Array(element) => Ok(ApiType::array(self.translate(cx, element, env)?)),
            SourceType::Variable(name) => match env.lookup(name) {
                Some((Binding::Resolved(resolved), _)) => Ok(resolved.clone()),
                Some((Binding::Source(bound), read_in)) => self.translate(cx, bound, read_in),
                None => Ok(ApiType::ANY),
            },
            SourceType::Wildcard { lower_bound, .. } => match lower_bound {
                Some(bound) => self.translate(cx, bound, env),
                None => Ok(ApiType::ANY),
            },
            SourceType::Inner { .. } => Err(TranslationError::UnsupportedType { description: ty.to_string() }),
        }
    }

    fn translate_basic(&self, cx: &mut TranslationContext, name: &str, arguments: &[ApiType]) -> Result<ApiType> {
        let model = self.model;
        let ty = if model.is_assignable_to(name, ContainerKind::Sequence) {
            ApiType::array(ApiType::ANY)
        } else if model.is_assignable_to(name, ContainerKind::Map) {
            ApiType::dictionary(ApiType::ANY)
        } else if model.is_string(name) {
            ApiType::STRING
        } else if model.is_integral(name) {
            ApiType::INTEGER
        } else if model.is_floating(name) {
            ApiType::FLOAT
        } else if model.is_boolean(name) {
            ApiType::BOOLEAN
        } else if name == OPTIONAL_INT || name == OPTIONAL_LONG {
            ApiType::INTEGER.nullable()
        } else if name == OPTIONAL_DOUBLE {
            ApiType::FLOAT.nullable()
        } else if name == OBJECT {
            ApiType::ANY
        } else if name == "void" {
            ApiType::VOID
        } else {
            return self.translate_class(cx, name, arguments);
        };
        Ok(ty)
    }

    fn translate_parameterized(
        &self,
        cx: &mut TranslationContext,
        base: &SourceType,
        arguments: &[SourceType],
        env: &TypeEnvironment,
    ) -> Result<ApiType> {
        // arguments are read in the caller's environment
        let mut args = arguments.iter()
            .map(|arg| self.translate(cx, arg, env))
            .collect::<Result<Vec<_>>>()?;

        let Some(base_name) = base.non_generic_class_name() else {
            return self.translate(cx, base, env);
        };

        let model = self.model;
        if model.is_assignable_to(base_name, ContainerKind::Sequence) && args.len() == 1 {
            return Ok(ApiType::array(args.remove(0)));
        }
        if model.is_assignable_to(base_name, ContainerKind::Map) && args.len() == 2 && args[0] == ApiType::STRING {
            return Ok(ApiType::dictionary(args.remove(1)));
        }
        if model.is_assignable_to(base_name, ContainerKind::Optional) && args.len() == 1 {
            return Ok(args.remove(0).nullable());
        }
        self.translate_basic(cx, base_name, &args)
    }

    /// Resolve a named class. `arguments` are already translated in the
    /// caller's environment; the class's own definition never sees them.
    fn translate_class(&self, cx: &mut TranslationContext, name: &str, arguments: &[ApiType]) -> Result<ApiType> {
        let type_name = self.class_name_for_type(cx, name)?;

        if self.settings.is_imported(type_name.as_str()) {
            return Ok(ApiType::BlackBox(type_name));
        }

        if self.settings.is_black_box_class(name) {
            debug!("translating {name} as black box");
            cx.api.add_black_box(type_name.clone());
            return Ok(ApiType::BlackBox(type_name));
        }

        let Some(class) = self.model.find_class(name) else {
            debug!("class {name} is not in the model, leaving {type_name} unresolved");
            return Ok(ApiType::class(type_name, Vec::new()));
        };

        if class.is_enum() {
            if !cx.api.contains_type(&type_name) {
                debug!("registering enum {type_name}");
                cx.api.add_enum_definition(EnumDefinition { name: type_name.clone(), constants: class.enum_constants() });
            }
            return Ok(ApiType::class(type_name, Vec::new()));
        }

        // one argument per declared variable; raw use fills in Any
        let arguments: Vec<ApiType> = (0..class.type_parameters.len())
            .map(|i| arguments.get(i).cloned().unwrap_or(ApiType::ANY))
            .collect();

        let style = Style::of(class);

        let wrapped = match style {
            Style::Reflection => reflection::value_member_type(class),
            Style::Construction => serialization::value_member_type(class),
        };
        if let Some(wrapped) = wrapped {
            if !cx.api.contains_type(&type_name) {
                // placeholder first: a wrapped type that refers back ends here
                cx.api.add_type_alias(type_name.clone(), ApiType::ANY);
                let aliased = self.translate(cx, wrapped, &self.own_environment(class))?;
                debug!("registering {type_name} as alias of {aliased}");
                cx.api.replace_type_alias(type_name.clone(), aliased);
            }
            return Ok(ApiType::BlackBox(type_name));
        }

        let shape = match style {
            Style::Reflection => union::jackson_union(self.model, class),
            Style::Construction => union::serialization_union(self.model, class),
        };
        if let Some(shape) = shape {
            if !cx.api.contains_type(&type_name) {
                let definition = union::build(self, cx, type_name.clone(), shape)?;
                debug!("registering discriminated union {type_name} with {} subtypes", definition.types.len());
                cx.api.add_discriminated_union(definition);
            }
            return Ok(ApiType::class(type_name, Vec::new()));
        }

        if !cx.api.contains_type(&type_name) {
            debug!("registering class {type_name}");
            cx.api.add_class_definition(ClassDefinition::new(type_name.clone(), class.type_parameters.clone()));

            let own = self.own_environment(class);
            let properties = match style {
                Style::Reflection => reflection::properties(self, cx, class, &own, &mut Vec::new())?,
                Style::Construction => serialization::properties(self, cx, class, &own)?,
            };
            if let Some(definition) = cx.api.class_definition_mut(&type_name) {
                for property in properties {
                    definition.add_property(property);
                }
            }
        }

        let instantiation = ClassType::new(type_name, arguments);
        if let Some(definition) = cx.api.class_definition_mut(&instantiation.name) {
            definition.add_instantiation(instantiation.clone());
        }
        Ok(ApiType::Class(instantiation))
    }

    /// Claim the display name for `qualified`, failing if another source type
    /// already owns it.
    pub fn class_name_for_type(&self, cx: &mut TranslationContext, qualified: &str) -> Result<ApiTypeName> {
        let display = self.settings.name_translator.translate_class_name(qualified);
        match cx.translated_names.entry(display.clone()) {
            Entry::Occupied(existing) if existing.get() != qualified => {
                return Err(TranslationError::DuplicateClassName {
                    name: display,
                    first: existing.get().clone(),
                    second: qualified.to_owned(),
                });
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(qualified.to_owned());
            }
        }
        Ok(ApiTypeName(display))
    }

    /// Environment a class's own definition is discovered in: its variables
    /// stay variables.
    fn own_environment(&self, class: &SourceClass) -> TypeEnvironment {
        TypeEnvironment::empty().extend(
            class.type_parameters.iter()
                .map(|v| (v.clone(), Binding::Resolved(ApiType::Variable(v.clone())))),
        )
    }

    /// `class` and every ancestor found in the model, most derived first.
    /// Each ancestor's variables are bound to the arguments its subtype gave.
    pub(crate) fn hierarchy(&self, class: &'a SourceClass, env: TypeEnvironment, with_interfaces: bool) -> Vec<Level<'a>> {
        let mut out = Vec::new();
        let mut seen = Vec::new();
        self.walk_hierarchy(class, env, with_interfaces, &mut seen, &mut out);
        out
    }

    fn walk_hierarchy(
        &self,
        class: &'a SourceClass,
        env: TypeEnvironment,
        with_interfaces: bool,
        seen: &mut Vec<&'a str>,
        out: &mut Vec<Level<'a>>,
    ) {
        if seen.contains(&class.name.as_str()) {
            return;
        }
        seen.push(&class.name);

        let supertypes: Vec<&SourceType> = if with_interfaces {
            class.supertypes().collect()
        } else {
            class.super_class.iter().collect()
        };
        out.push(Level { class, env: env.clone() });

        for supertype in supertypes {
            let Some(name) = supertype.non_generic_class_name() else { continue };
            if name == OBJECT {
                continue;
            }
            let Some(parent) = self.model.find_class(name) else { continue };
            let arguments: &[SourceType] = match supertype {
                SourceType::Parameterized { arguments, .. } => arguments,
                _ => &[],
            };
            let parent_env = env.bind_arguments(&parent.type_parameters, arguments);
            self.walk_hierarchy(parent, parent_env, with_interfaces, seen, out);
        }
    }
}

// ------------------------------- Front API -------------------------------- //

/// One complete run: translate every root in a fresh context.
pub fn translate_roots(
    settings: &TranslationSettings,
    model: &SourceModel,
    roots: &[SourceType],
) -> Result<ApiDefinition> {
    let translator = TypeTranslator::new(settings, model);
    let mut cx = TranslationContext::new();
    let env = TypeEnvironment::empty();
    for root in roots {
        translator.translate(&mut cx, root, &env)?;
    }
    Ok(cx.into_api())
}

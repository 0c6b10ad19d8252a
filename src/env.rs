//! Generic environment: chained, immutable frames of type-variable bindings.
//!
//! Extending never mutates a frame, so any number of environments can share
//! a parent while the translator recurses.
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::model::ApiType;
use crate::source::SourceType;

#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// Source expression, read in the environment the binding frame extends.
    Source(SourceType),
    /// Already translated; used as-is.
    Resolved(ApiType),
}

#[derive(Debug)]
struct Frame {
    bindings: IndexMap<String, Binding>,
    parent: TypeEnvironment,
}

#[derive(Clone, Debug, Default)]
pub struct TypeEnvironment {
    top: Option<Rc<Frame>>,
}

impl TypeEnvironment {
    pub fn empty() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.top.is_none() }

    /// New frame on top of `self`.
    pub fn extend<I>(&self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (String, Binding)>,
    {
        let bindings: IndexMap<_, _> = bindings.into_iter().collect();
        if bindings.is_empty() {
            return self.clone();
        }
        Self { top: Some(Rc::new(Frame { bindings, parent: self.clone() })) }
    }

    /// Bind `variables` positionally to `arguments`. Variables without an
    /// argument (raw use) bind to `Any` so they never leak into outer frames;
    /// surplus arguments are dropped.
    pub fn bind_arguments(&self, variables: &[String], arguments: &[SourceType]) -> Self {
        self.extend(variables.iter().enumerate().map(|(i, name)| {
            let binding = match arguments.get(i) {
                Some(arg) => Binding::Source(arg.clone()),
                None => Binding::Resolved(ApiType::ANY),
            };
            (name.clone(), binding)
        }))
    }

    /// Innermost binding for `name`, plus the environment it must be read in.
    ///
    /// A source binding is always read in the parent of the frame that holds
    /// it, so `T ↦ T` refers to the outer `T` and the walk only ever moves
    /// outward.
    pub fn lookup(&self, name: &str) -> Option<(&Binding, &TypeEnvironment)> {
        let mut current = self.top.as_deref();
        while let Some(frame) = current {
            if let Some(binding) = frame.bindings.get(name) {
                return Some((binding, &frame.parent));
            }
            current = frame.parent.top.as_deref();
        }
        None
    }
}

impl fmt::Display for TypeEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut current = self.top.as_deref();
        let mut first = true;
        while let Some(frame) = current {
            if !first { f.write_str(" | ")?; }
            first = false;
            for (i, (name, binding)) in frame.bindings.iter().enumerate() {
                if i > 0 { f.write_str(", ")?; }
                match binding {
                    Binding::Source(ty) => write!(f, "{name}={ty}")?,
                    Binding::Resolved(ty) => write!(f, "{name}:={ty}")?,
                }
            }
            current = frame.parent.top.as_deref();
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_is_none() {
        assert!(TypeEnvironment::empty().lookup("T").is_none());
    }

    #[test]
    fn inner_frame_shadows_outer() {
        let outer = TypeEnvironment::empty().bind_arguments(&["T".into()], &[SourceType::basic("a.A")]);
        let inner = outer.bind_arguments(&["T".into()], &[SourceType::variable("T")]);

        let (binding, read_in) = inner.lookup("T").unwrap();
        assert_eq!(binding, &Binding::Source(SourceType::variable("T")));

        // the self-named binding resolves against the outer frame
        let (binding, read_in) = read_in.lookup("T").unwrap();
        assert_eq!(binding, &Binding::Source(SourceType::basic("a.A")));
        assert!(read_in.is_empty());
    }

    #[test]
    fn extending_does_not_touch_the_parent() {
        let base = TypeEnvironment::empty().extend([("T".to_string(), Binding::Resolved(ApiType::STRING))]);
        let child = base.extend([("S".to_string(), Binding::Resolved(ApiType::INTEGER))]);
        assert!(base.lookup("S").is_none());
        assert!(child.lookup("T").is_some());
    }

    #[test]
    fn positional_binding_tolerates_arity_mismatch() {
        let env = TypeEnvironment::empty().bind_arguments(
            &["K".into(), "V".into()],
            &[SourceType::basic("java.lang.String")],
        );
        assert!(matches!(env.lookup("K"), Some((Binding::Source(_), _))));
        assert!(matches!(env.lookup("V"), Some((Binding::Resolved(ty), _)) if *ty == ApiType::ANY));
    }

    #[test]
    fn empty_extension_reuses_frame() {
        let env = TypeEnvironment::empty().extend(Vec::new());
        assert!(env.is_empty());
    }
}

//! The metadata seam between the resolver and the host object model.
//!
//! The resolver never inspects classes directly. Everything it needs comes
//! through four synchronous, read-only lookups:
//!
//! | Lookup | Meaning |
//! |--------|---------|
//! | `declared_params` | ordered parameters a definition is generic over |
//! | `ancestry` | ordered steps from a class up to its roots |
//! | `parametrization` | origin and arguments, if the class is `Origin[args]` |
//! | `class_of` | runtime class of an instance |
//!
//! `ClassRegistry` implements this for hosts that register their classes in
//! process; a host with its own reflection tables can implement it directly.

use crate::def::{ClassKind, ClassRegistry};
use crate::error::RevealResult;
use crate::types::{ClassId, InstanceId, Subject, TypeArgList, TypeParamId, TypeParamList};
use std::sync::Arc;

pub trait AncestryProvider: Send + Sync {
    /// Parameters declared by `class`, in declaration order.
    ///
    /// Parametrizations and non-generic classes declare none.
    fn declared_params(&self, class: ClassId) -> RevealResult<TypeParamList>;

    /// Ancestry chain of `class`, starting with `class` itself.
    ///
    /// Every generic definition whose parameters can be bound must appear,
    /// and every parametrization that binds them must appear before the
    /// definitions further from `class`. The resolver treats earlier
    /// bindings as closer to the subject.
    fn ancestry(&self, class: ClassId) -> RevealResult<Arc<[ClassId]>>;

    /// `Some((origin, args))` if `class` is a parametrization.
    fn parametrization(&self, class: ClassId) -> RevealResult<Option<(ClassId, TypeArgList)>>;

    /// Runtime class of `instance`.
    fn class_of(&self, instance: InstanceId) -> RevealResult<ClassId>;

    /// Display name of a parameter, used for name-based lookups and
    /// diagnostics only.
    fn type_param_name(&self, _param: TypeParamId) -> Option<Arc<str>> {
        None
    }
}

impl AncestryProvider for ClassRegistry {
    fn declared_params(&self, class: ClassId) -> RevealResult<TypeParamList> {
        Ok(self.info(class)?.type_params().iter().copied().collect())
    }

    fn ancestry(&self, class: ClassId) -> RevealResult<Arc<[ClassId]>> {
        self.ancestry_chain(class)
    }

    fn parametrization(&self, class: ClassId) -> RevealResult<Option<(ClassId, TypeArgList)>> {
        match &self.info(class)?.kind {
            ClassKind::Parametrization { origin, args } => Ok(Some((*origin, args.clone()))),
            ClassKind::Definition { .. } => Ok(None),
        }
    }

    fn class_of(&self, instance: InstanceId) -> RevealResult<ClassId> {
        self.instance_class(instance)
    }

    fn type_param_name(&self, param: TypeParamId) -> Option<Arc<str>> {
        ClassRegistry::type_param_name(self, param)
    }
}

/// Resolves a subject to a class, following an instance to its runtime
/// class.
pub(crate) fn subject_class(db: &dyn AncestryProvider, subject: Subject) -> RevealResult<ClassId> {
    match subject {
        Subject::Class(class) => Ok(class),
        Subject::Instance(instance) => db.class_of(instance),
    }
}

#[cfg(test)]
#[path = "../tests/provider_tests.rs"]
mod tests;

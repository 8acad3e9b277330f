//! Errors reported by the registry and the resolver.

use crate::types::{ClassId, InstanceId, TypeParamId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
    /// The parameter is not declared by any generic definition in the
    /// subject's ancestry.
    #[error("type parameter {param} is not declared anywhere in the ancestry of {class}")]
    ParameterNotFound { param: TypeParamId, class: ClassId },

    #[error("no type parameter named `{name}` in the ancestry of {class}")]
    ParameterNameNotFound { name: String, class: ClassId },

    #[error("{count} distinct type parameters named `{name}` in the ancestry of {class}")]
    AmbiguousParameterName {
        name: String,
        class: ClassId,
        count: usize,
    },

    #[error("position {index} is out of range: {class} has {count} type parameters in its ancestry")]
    ParameterIndexOutOfRange {
        index: usize,
        class: ClassId,
        count: usize,
    },

    /// Bindings for `param` kept pointing at other parameters for more steps
    /// than the lineage has levels.
    #[error("substitution of {param} did not reach a fixed point within {limit} steps")]
    SubstitutionDepthExceeded { param: TypeParamId, limit: usize },

    #[error("unknown class {0}")]
    UnknownClass(ClassId),

    #[error("unknown instance {0}")]
    UnknownInstance(InstanceId),

    #[error("unknown type parameter {0}")]
    UnknownTypeParam(TypeParamId),

    #[error("type parameter {param} is declared more than once by `{class}`")]
    DuplicateTypeParam { param: TypeParamId, class: String },

    #[error("`{class}` expects {expected} type arguments, got {found}")]
    ArityMismatch {
        class: String,
        expected: usize,
        found: usize,
    },

    #[error("`{0}` is not generic")]
    NotGeneric(String),

    #[error("`{0}` is already a parametrization")]
    NotADefinition(String),

    /// A base of a definition passes through a parameter the definition does
    /// not declare itself.
    #[error("base `{base}` of `{class}` uses type parameter {param} that `{class}` does not declare")]
    UnboundBaseParameter {
        class: String,
        base: String,
        param: TypeParamId,
    },

    #[error("cannot create a consistent method resolution order for `{0}`")]
    InconsistentHierarchy(String),
}

pub type RevealResult<T> = Result<T, RevealError>;

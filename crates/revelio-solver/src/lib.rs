//! Type-parameter resolution over generic inheritance graphs.
//!
//! Generic parameters are erased once a class is subclassed or
//! parametrized; this crate recovers, for a given class or instance, the
//! concrete type that was substituted for a parameter somewhere up its
//! ancestry.
//!
//! - [`ClassRegistry`]: in-process host metadata (definitions,
//!   parametrizations, instances)
//! - [`AncestryProvider`]: the lookup seam the resolver runs on
//! - [`TypeVarRevealer`] and the `reveal_*` functions: the resolver
mod def;
mod error;
pub mod inheritance;
mod provider;
mod query_trace;
mod reveal;
pub mod substitution;
mod types;

pub use def::{ClassInfo, ClassKind, ClassRegistry, TypeParamInfo};
pub use error::{RevealError, RevealResult};
pub use provider::AncestryProvider;
pub use reveal::{
    TypeVarMap, TypeVarRevealer, get_origin, is_type_var_instantiated, resolve_type_arg,
    reveal_type_var, reveal_type_var_at, reveal_type_var_named, reveal_type_vars,
};
pub use substitution::TypeSubstitution;
pub use types::{
    ClassId, ConcreteType, InstanceId, OpaqueId, Resolution, Subject, TypeArg, TypeArgList,
    TypeParamId, TypeParamList,
};

//! revelio: recover the concrete types bound to generic type parameters.
//!
//! Generic parameters are erased once a class is subclassed or
//! parametrized. Given a class or an instance, and a parameter declared
//! anywhere in its generic ancestry, revelio returns the concrete type that
//! was substituted for it:
//!
//! ```
//! use revelio::{ClassRegistry, Resolution, reveal_type_var};
//!
//! # fn main() -> Result<(), revelio::RevealError> {
//! let db = ClassRegistry::new();
//! let k = db.new_type_param("K");
//! let v = db.new_type_param("V");
//! let v2 = db.new_type_param("V2");
//! let int = db.define_class("int", [])?;
//! let str_ = db.define_class("str", [])?;
//!
//! let pair = db.define_generic("Pair", [k, v], [])?;
//! let int_pair = db.define_generic("IntPair", [v2], [db.parametrize(pair, [int.into(), v2.into()])?])?;
//! let int_pair_str = db.parametrize(int_pair, [str_.into()])?;
//!
//! assert_eq!(reveal_type_var(&db, int_pair_str, k)?, Resolution::from(int));
//! assert_eq!(reveal_type_var(&db, int_pair_str, v)?, Resolution::from(str_));
//! assert_eq!(reveal_type_var(&db, int_pair, v)?, Resolution::Unresolved);
//! # Ok(())
//! # }
//! ```
//!
//! The resolver only depends on the [`AncestryProvider`] trait; hosts with
//! their own reflection tables can implement it instead of registering
//! classes in a [`ClassRegistry`].

// Tracing configuration for hosts embedding the resolver
pub mod tracing_config;

pub use revelio_common::limits;
pub use revelio_solver::inheritance;
pub use revelio_solver::{
    AncestryProvider, ClassId, ClassInfo, ClassKind, ClassRegistry, ConcreteType, InstanceId,
    OpaqueId, Resolution, RevealError, RevealResult, Subject, TypeArg, TypeArgList, TypeParamId,
    TypeParamInfo, TypeParamList, TypeSubstitution, TypeVarMap, TypeVarRevealer, get_origin,
    is_type_var_instantiated, resolve_type_arg, reveal_type_var, reveal_type_var_at,
    reveal_type_var_named, reveal_type_vars,
};

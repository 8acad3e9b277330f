//! Parameter bindings collected along an ancestry chain, and their
//! composition.
//!
//! Each parametrization step contributes one binding per declared parameter
//! of its origin. A binding either names a concrete type or forwards to a
//! parameter of a more-derived definition:
//!
//! ```text
//! class Pair(Generic[K, V])
//! class IntPair(Pair[int, V2])
//!
//! IntPair[str]      V2 -> str
//! Pair[int, V2]     K  -> int,  V -> V2
//! ```
//!
//! Resolving `V` follows `V -> V2 -> str`.
//!
//! A forward recorded at step `i` is only followed through bindings from
//! steps closer than `i`. Placeholder tokens may be shared by unrelated
//! definitions, and an unscoped composition of
//!
//! ```text
//! class Base(Generic[U])
//! class A(Base[T])        Base[T]:  U -> T   (step 1)
//! class B(A[U])           A[U]:     T -> U   (step 0)
//! ```
//!
//! would loop between `T` and `U`.

use crate::error::{RevealError, RevealResult};
use crate::types::{Resolution, TypeArg, TypeParamId};
use indexmap::IndexMap;
use revelio_common::limits::MAX_SUBSTITUTION_DEPTH;
use rustc_hash::FxBuildHasher;
use tracing::debug;

#[derive(Clone, Copy, Debug)]
struct Binding {
    arg: TypeArg,
    /// Index of the `bind_level` call that recorded it.
    step: usize,
}

/// Insertion-ordered parameter bindings; the first binding recorded for a
/// parameter wins.
#[derive(Clone, Debug, Default)]
pub struct TypeSubstitution {
    bindings: IndexMap<TypeParamId, Binding, FxBuildHasher>,
    steps: usize,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bindings of one parametrization: `params[i] -> args[i]`.
    ///
    /// Returns `None` if the lengths differ.
    pub fn from_args(params: &[TypeParamId], args: &[TypeArg]) -> Option<Self> {
        let mut subst = Self::new();
        subst.bind_level(params, args).then_some(subst)
    }

    /// Record the bindings of the next ancestry step, closest step first.
    ///
    /// A parameter bound to itself is a pass-through and records nothing. A
    /// parameter already bound by a closer step keeps its binding. Returns
    /// `false` (and records nothing) if `params` and `args` differ in length.
    pub fn bind_level(&mut self, params: &[TypeParamId], args: &[TypeArg]) -> bool {
        if params.len() != args.len() {
            return false;
        }
        let step = self.steps;
        self.steps += 1;
        for (&param, &arg) in params.iter().zip(args) {
            if arg == TypeArg::Param(param) {
                continue;
            }
            match self.bindings.get(&param) {
                None => {
                    self.bindings.insert(param, Binding { arg, step });
                }
                Some(existing) => {
                    if let (TypeArg::Concrete(kept), TypeArg::Concrete(ignored)) =
                        (existing.arg, arg)
                    {
                        if kept != ignored {
                            debug!(
                                param = %param,
                                ?kept,
                                ?ignored,
                                "conflicting bindings on separate inheritance paths; closest wins"
                            );
                        }
                    }
                }
            }
        }
        true
    }

    /// Direct binding of `param`, without following indirections.
    pub fn get(&self, param: TypeParamId) -> Option<TypeArg> {
        self.bindings.get(&param).map(|binding| binding.arg)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Follow bindings from `param` until a concrete type or a free
    /// parameter is reached.
    ///
    /// Each forward moves to a strictly closer step, so a walk never takes
    /// more hops than there are steps. `levels` is the depth of the chain
    /// the bindings came from; more hops than that (or than
    /// `MAX_SUBSTITUTION_DEPTH`) means `levels` understated the chain.
    pub fn resolve(&self, param: TypeParamId, levels: usize) -> RevealResult<Resolution> {
        let limit = levels.max(MAX_SUBSTITUTION_DEPTH);
        let mut current = param;
        let mut horizon = usize::MAX;
        for _ in 0..=limit {
            let Some(binding) = self
                .bindings
                .get(&current)
                .filter(|binding| binding.step < horizon)
            else {
                return Ok(Resolution::Unresolved);
            };
            match binding.arg {
                TypeArg::Concrete(concrete) => return Ok(Resolution::Concrete(concrete)),
                TypeArg::Param(next) => {
                    current = next;
                    horizon = binding.step;
                }
            }
        }
        Err(RevealError::SubstitutionDepthExceeded { param, limit })
    }

    /// Resolve an argument: concrete arguments are returned unchanged.
    pub fn resolve_arg(&self, arg: TypeArg, levels: usize) -> RevealResult<Resolution> {
        match arg {
            TypeArg::Concrete(concrete) => Ok(Resolution::Concrete(concrete)),
            TypeArg::Param(param) => self.resolve(param, levels),
        }
    }
}

#[cfg(test)]
#[path = "../tests/substitution_tests.rs"]
mod tests;

//! Type-parameter resolution.
//!
//! Given a subject (a class or an instance) and a type parameter declared
//! somewhere in its generic ancestry, recover the concrete type that was
//! substituted for the parameter:
//!
//! ```text
//! class Pair(Generic[K, V])
//! class IntPair(Pair[int, V2])
//!
//! reveal_type_var(IntPair[str], K)  == int
//! reveal_type_var(IntPair[str], V)  == str      (through V2)
//! reveal_type_var(IntPair, V)       == Unresolved
//! reveal_type_var(IntPair[str], X)  -> ParameterNotFound
//! ```
//!
//! Every query walks the ancestry once, records one binding per
//! parametrized step (closest step first), and composes the bindings. No
//! state is kept between queries.

use crate::error::{RevealError, RevealResult};
use crate::provider::{AncestryProvider, subject_class};
use crate::query_trace;
use crate::substitution::TypeSubstitution;
use crate::types::{ClassId, Resolution, Subject, TypeArg, TypeParamId};
use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use tracing::debug;

/// Every parameter of a subject's lineage with its resolution, in ancestry
/// order.
pub type TypeVarMap = IndexMap<TypeParamId, Resolution, FxBuildHasher>;

/// Everything collected from one walk of a subject's ancestry.
struct Lineage {
    class: ClassId,
    /// Parameters declared by any definition in the chain.
    declared: IndexSet<TypeParamId, FxBuildHasher>,
    subst: TypeSubstitution,
    levels: usize,
}

impl Lineage {
    fn resolve(&self, param: TypeParamId) -> RevealResult<Resolution> {
        if !self.declared.contains(&param) {
            debug!(param = %param, class = %self.class, "type parameter not in lineage");
            return Err(RevealError::ParameterNotFound {
                param,
                class: self.class,
            });
        }
        self.subst.resolve(param, self.levels)
    }
}

/// Resolves type parameters against subjects described by an
/// [`AncestryProvider`].
///
/// This is a pure computation over the provider's metadata; it can be shared
/// between threads freely.
#[derive(Clone, Copy)]
pub struct TypeVarRevealer<'a> {
    db: &'a dyn AncestryProvider,
}

impl<'a> TypeVarRevealer<'a> {
    pub fn new(db: &'a dyn AncestryProvider) -> Self {
        Self { db }
    }

    /// Concrete type bound to `param` for `subject`, or
    /// [`Resolution::Unresolved`] if the lineage never fixes it.
    ///
    /// Fails with [`RevealError::ParameterNotFound`] if no definition in the
    /// subject's ancestry declares `param`.
    pub fn resolve_one(
        &self,
        subject: impl Into<Subject>,
        param: TypeParamId,
    ) -> RevealResult<Resolution> {
        self.query(
            "reveal_type_var",
            subject.into(),
            Some(param),
            |lineage| lineage.resolve(param),
            |resolution: &Resolution| (outcome(*resolution), 1),
        )
    }

    /// Every parameter declared by every generic definition in the subject's
    /// ancestry, each resolved independently.
    pub fn resolve_all(&self, subject: impl Into<Subject>) -> RevealResult<TypeVarMap> {
        self.query(
            "reveal_type_vars",
            subject.into(),
            None,
            |lineage| {
                lineage
                    .declared
                    .iter()
                    .map(|&param| Ok((param, lineage.subst.resolve(param, lineage.levels)?)))
                    .collect::<RevealResult<TypeVarMap>>()
            },
            |map: &TypeVarMap| ("mapping", map.len()),
        )
    }

    /// Whether `param` resolves to a concrete type for `subject`.
    pub fn is_instantiated(
        &self,
        subject: impl Into<Subject>,
        param: TypeParamId,
    ) -> RevealResult<bool> {
        self.resolve_one(subject, param).map(Resolution::is_concrete)
    }

    /// Resolve a type argument in the context of `subject`.
    ///
    /// Concrete arguments are returned unchanged without consulting the
    /// subject; parameters resolve as in [`resolve_one`](Self::resolve_one).
    pub fn resolve_type_arg(
        &self,
        subject: impl Into<Subject>,
        arg: TypeArg,
    ) -> RevealResult<Resolution> {
        match arg {
            TypeArg::Concrete(concrete) => Ok(Resolution::Concrete(concrete)),
            TypeArg::Param(param) => self.resolve_one(subject, param),
        }
    }

    /// Resolve the parameter named `name` in the subject's lineage.
    ///
    /// Lets a definition refer to a parameter of an ancestor it did not
    /// create, as long as exactly one parameter in the lineage carries that
    /// name.
    pub fn resolve_named(
        &self,
        subject: impl Into<Subject>,
        name: &str,
    ) -> RevealResult<Resolution> {
        self.query(
            "reveal_type_var_named",
            subject.into(),
            None,
            |lineage| {
                let mut matches = lineage.declared.iter().copied().filter(|&param| {
                    self.db
                        .type_param_name(param)
                        .is_some_and(|candidate| &*candidate == name)
                });
                let Some(param) = matches.next() else {
                    return Err(RevealError::ParameterNameNotFound {
                        name: name.to_string(),
                        class: lineage.class,
                    });
                };
                let others = matches.count();
                if others > 0 {
                    return Err(RevealError::AmbiguousParameterName {
                        name: name.to_string(),
                        class: lineage.class,
                        count: others + 1,
                    });
                }
                lineage.resolve(param)
            },
            |resolution: &Resolution| (outcome(*resolution), 1),
        )
    }

    /// Resolve the parameter at position `index` of the subject's lineage,
    /// in the order [`resolve_all`](Self::resolve_all) reports them.
    pub fn resolve_at(
        &self,
        subject: impl Into<Subject>,
        index: usize,
    ) -> RevealResult<Resolution> {
        self.query(
            "reveal_type_var_at",
            subject.into(),
            None,
            |lineage| {
                let Some(&param) = lineage.declared.get_index(index) else {
                    return Err(RevealError::ParameterIndexOutOfRange {
                        index,
                        class: lineage.class,
                        count: lineage.declared.len(),
                    });
                };
                lineage.resolve(param)
            },
            |resolution: &Resolution| (outcome(*resolution), 1),
        )
    }

    /// The generic definition behind a parametrization; `None` for a class
    /// that is not a parametrization.
    pub fn origin_of(&self, class: ClassId) -> RevealResult<Option<ClassId>> {
        Ok(self.db.parametrization(class)?.map(|(origin, _)| origin))
    }

    fn lineage(&self, class: ClassId) -> RevealResult<Lineage> {
        let chain = self.db.ancestry(class)?;
        let mut lineage = Lineage {
            class,
            declared: IndexSet::default(),
            subst: TypeSubstitution::new(),
            levels: chain.len(),
        };

        for &step in chain.iter() {
            lineage.declared.extend(self.db.declared_params(step)?);

            let Some((origin, args)) = self.db.parametrization(step)? else {
                continue;
            };
            let params = self.db.declared_params(origin)?;
            if !lineage.subst.bind_level(&params, &args) {
                return Err(RevealError::ArityMismatch {
                    class: origin.to_string(),
                    expected: params.len(),
                    found: args.len(),
                });
            }
            lineage.declared.extend(params);
        }

        Ok(lineage)
    }

    fn query<T>(
        &self,
        op: &'static str,
        subject: Subject,
        param: Option<TypeParamId>,
        run: impl FnOnce(&Lineage) -> RevealResult<T>,
        summarize: impl FnOnce(&T) -> (&'static str, usize),
    ) -> RevealResult<T> {
        let query_id = query_trace::enabled().then(query_trace::next_query_id);
        if let Some(query_id) = query_id {
            query_trace::query_start(query_id, op, subject, param);
        }

        let result = self.run_query(subject, run);

        if let Some(query_id) = query_id {
            match &result {
                Ok((value, levels)) => {
                    let (outcome, count) = summarize(value);
                    query_trace::query_end(query_id, op, outcome, count, *levels);
                }
                Err(_) => query_trace::query_end(query_id, op, "error", 0, 0),
            }
        }
        result.map(|(value, _)| value)
    }

    /// Walk the subject's lineage and run `run` over it, returning the
    /// result with the number of levels walked.
    fn run_query<T>(
        &self,
        subject: Subject,
        run: impl FnOnce(&Lineage) -> RevealResult<T>,
    ) -> RevealResult<(T, usize)> {
        let class = subject_class(self.db, subject)?;
        let lineage = self.lineage(class)?;
        Ok((run(&lineage)?, lineage.levels))
    }
}

const fn outcome(resolution: Resolution) -> &'static str {
    match resolution {
        Resolution::Concrete(_) => "concrete",
        Resolution::Unresolved => "unresolved",
    }
}

// =============================================================================
// Free-function API
// =============================================================================

/// Concrete type bound to `param` for `subject`. See
/// [`TypeVarRevealer::resolve_one`].
pub fn reveal_type_var(
    db: &dyn AncestryProvider,
    subject: impl Into<Subject>,
    param: TypeParamId,
) -> RevealResult<Resolution> {
    TypeVarRevealer::new(db).resolve_one(subject, param)
}

/// All parameters of the subject's lineage. See
/// [`TypeVarRevealer::resolve_all`].
pub fn reveal_type_vars(
    db: &dyn AncestryProvider,
    subject: impl Into<Subject>,
) -> RevealResult<TypeVarMap> {
    TypeVarRevealer::new(db).resolve_all(subject)
}

pub fn is_type_var_instantiated(
    db: &dyn AncestryProvider,
    subject: impl Into<Subject>,
    param: TypeParamId,
) -> RevealResult<bool> {
    TypeVarRevealer::new(db).is_instantiated(subject, param)
}

pub fn reveal_type_var_named(
    db: &dyn AncestryProvider,
    subject: impl Into<Subject>,
    name: &str,
) -> RevealResult<Resolution> {
    TypeVarRevealer::new(db).resolve_named(subject, name)
}

/// Parameter at position `index` of the subject's lineage. See
/// [`TypeVarRevealer::resolve_at`].
pub fn reveal_type_var_at(
    db: &dyn AncestryProvider,
    subject: impl Into<Subject>,
    index: usize,
) -> RevealResult<Resolution> {
    TypeVarRevealer::new(db).resolve_at(subject, index)
}

pub fn resolve_type_arg(
    db: &dyn AncestryProvider,
    subject: impl Into<Subject>,
    arg: TypeArg,
) -> RevealResult<Resolution> {
    TypeVarRevealer::new(db).resolve_type_arg(subject, arg)
}

pub fn get_origin(db: &dyn AncestryProvider, class: ClassId) -> RevealResult<Option<ClassId>> {
    TypeVarRevealer::new(db).origin_of(class)
}

#[cfg(test)]
#[path = "../tests/reveal_tests.rs"]
mod tests;

//! Class definitions and storage for the resolver.
//!
//! `ClassRegistry` is the in-process host metadata: it records generic
//! definitions with their declared type parameters and bases,
//! parametrizations of those definitions, runtime instances, and opaque
//! non-class arguments. It implements [`AncestryProvider`], so everything the
//! resolver needs can be answered from it.
//!
//! Classes are immutable once registered and bases must be registered before
//! the classes that derive from them, so the inheritance graph is acyclic by
//! construction.
//!
//! [`AncestryProvider`]: crate::provider::AncestryProvider

use crate::error::{RevealError, RevealResult};
use crate::inheritance::{c3_linearize, is_derived_from};
use crate::types::{
    ClassId, ConcreteType, InstanceId, OpaqueId, TypeArg, TypeArgList, TypeParamId,
    TypeParamList,
};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use tracing::trace;

/// Global counter for assigning unique instance IDs to `ClassRegistry` instances.
static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

// =============================================================================
// ClassInfo
// =============================================================================

/// Declared type parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParamInfo {
    /// Display name; not used for identity.
    pub name: Arc<str>,
}

#[derive(Clone, Debug)]
pub enum ClassKind {
    /// A class statement: generic over `type_params` (possibly none).
    Definition {
        type_params: TypeParamList,
        /// Direct bases as written, parametrized or not.
        bases: SmallVec<[ClassId; 2]>,
        /// C3 linearization over erased bases, starting with this class.
        order: Arc<[ClassId]>,
    },
    /// `origin[args...]`
    Parametrization { origin: ClassId, args: TypeArgList },
}

#[derive(Clone, Debug)]
pub struct ClassInfo {
    /// Display name. Parametrizations render as `Origin[Arg, ...]`.
    pub name: Arc<str>,
    pub kind: ClassKind,
}

impl ClassInfo {
    pub const fn is_parametrization(&self) -> bool {
        matches!(self.kind, ClassKind::Parametrization { .. })
    }

    /// Parameters declared by a definition; empty for parametrizations.
    pub fn type_params(&self) -> &[TypeParamId] {
        match &self.kind {
            ClassKind::Definition { type_params, .. } => type_params.as_slice(),
            ClassKind::Parametrization { .. } => &[],
        }
    }
}

// =============================================================================
// ClassRegistry
// =============================================================================

/// Thread-safe storage for classes, type parameters and instances.
///
/// Uses `DashMap` so registration and resolution can run from many threads.
///
/// ```ignore
/// let registry = ClassRegistry::new();
/// let k = registry.new_type_param("K");
/// let v = registry.new_type_param("V");
/// let pair = registry.define_generic("Pair", [k, v], [])?;
/// let int = registry.define_class("int", [])?;
/// let str_ = registry.define_class("str", [])?;
///
/// let pair_int_str = registry.parametrize(pair, [int.into(), str_.into()])?;
/// ```
pub struct ClassRegistry {
    /// Unique instance ID for debugging (tracks which registry a trace line belongs to)
    registry_id: u64,

    classes: DashMap<ClassId, Arc<ClassInfo>>,
    type_params: DashMap<TypeParamId, TypeParamInfo>,
    instances: DashMap<InstanceId, ClassId>,
    opaques: DashMap<OpaqueId, Arc<str>>,

    /// `(origin, args)` -> parametrization, so `Pair[int, str]` is one class.
    parametrizations: DashMap<(ClassId, TypeArgList), ClassId>,

    /// Ancestry chains, computed on first use.
    ancestry_cache: DashMap<ClassId, Arc<[ClassId]>>,

    next_class: AtomicU32,
    next_type_param: AtomicU32,
    next_instance: AtomicU32,
    next_opaque: AtomicU32,
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    pub fn new() -> Self {
        let registry_id = NEXT_REGISTRY_ID.fetch_add(1, Ordering::SeqCst);
        trace!(registry_id, "ClassRegistry::new");
        Self {
            registry_id,
            classes: DashMap::new(),
            type_params: DashMap::new(),
            instances: DashMap::new(),
            opaques: DashMap::new(),
            parametrizations: DashMap::new(),
            ancestry_cache: DashMap::new(),
            next_class: AtomicU32::new(1),
            next_type_param: AtomicU32::new(1),
            next_instance: AtomicU32::new(1),
            next_opaque: AtomicU32::new(1),
        }
    }

    // -------------------------------------------------------------------------
    // Registration
    // -------------------------------------------------------------------------

    /// Allocate a fresh type parameter. Every call returns a distinct token,
    /// even for a name that is already in use.
    pub fn new_type_param(&self, name: &str) -> TypeParamId {
        let id = TypeParamId(self.next_type_param.fetch_add(1, Ordering::SeqCst));
        trace!(registry_id = self.registry_id, param = %id, name, "ClassRegistry::new_type_param");
        self.type_params
            .insert(id, TypeParamInfo { name: Arc::from(name) });
        id
    }

    /// Register an opaque, non-class type argument such as a literal value.
    pub fn opaque(&self, label: &str) -> OpaqueId {
        let id = OpaqueId(self.next_opaque.fetch_add(1, Ordering::SeqCst));
        self.opaques.insert(id, Arc::from(label));
        id
    }

    /// Register a non-generic class.
    pub fn define_class(
        &self,
        name: &str,
        bases: impl IntoIterator<Item = ClassId>,
    ) -> RevealResult<ClassId> {
        self.define_generic(name, std::iter::empty(), bases)
    }

    /// Register a class generic over `type_params`, deriving from `bases` in
    /// declaration order.
    ///
    /// Any type parameter passed through by a parametrized base must be one
    /// of `type_params`.
    pub fn define_generic(
        &self,
        name: &str,
        type_params: impl IntoIterator<Item = TypeParamId>,
        bases: impl IntoIterator<Item = ClassId>,
    ) -> RevealResult<ClassId> {
        let type_params: TypeParamList = type_params.into_iter().collect();
        let bases: SmallVec<[ClassId; 2]> = bases.into_iter().collect();

        let mut declared = FxHashSet::default();
        for &param in &type_params {
            if !self.type_params.contains_key(&param) {
                return Err(RevealError::UnknownTypeParam(param));
            }
            if !declared.insert(param) {
                return Err(RevealError::DuplicateTypeParam {
                    param,
                    class: name.to_string(),
                });
            }
        }

        let mut erased = SmallVec::<[ClassId; 2]>::with_capacity(bases.len());
        let mut base_orders = Vec::with_capacity(bases.len());
        for &base in &bases {
            let info = self.info(base)?;
            let origin = match &info.kind {
                ClassKind::Definition { .. } => base,
                ClassKind::Parametrization { origin, args } => {
                    if let Some(param) = args
                        .iter()
                        .filter_map(|arg| arg.as_param())
                        .find(|param| !declared.contains(param))
                    {
                        return Err(RevealError::UnboundBaseParameter {
                            class: name.to_string(),
                            base: info.name.to_string(),
                            param,
                        });
                    }
                    *origin
                }
            };
            erased.push(origin);
            base_orders.push(self.linearization(origin)?);
        }

        let id = ClassId(self.next_class.fetch_add(1, Ordering::SeqCst));
        let orders: Vec<&[ClassId]> = base_orders.iter().map(|order| &order[..]).collect();
        let order = c3_linearize(id, &erased, &orders)
            .ok_or_else(|| RevealError::InconsistentHierarchy(name.to_string()))?;

        trace!(
            registry_id = self.registry_id,
            class = %id,
            name,
            params = type_params.len(),
            bases = bases.len(),
            "ClassRegistry::define_generic"
        );
        self.classes.insert(
            id,
            Arc::new(ClassInfo {
                name: Arc::from(name),
                kind: ClassKind::Definition {
                    type_params,
                    bases,
                    order: Arc::from(order),
                },
            }),
        );
        Ok(id)
    }

    /// Apply a generic definition to type arguments: `origin[args...]`.
    ///
    /// Parametrizations are interned; the same origin and arguments always
    /// produce the same class.
    pub fn parametrize(
        &self,
        origin: ClassId,
        args: impl IntoIterator<Item = TypeArg>,
    ) -> RevealResult<ClassId> {
        let args: TypeArgList = args.into_iter().collect();
        let info = self.info(origin)?;
        let expected = match &info.kind {
            ClassKind::Parametrization { .. } => {
                return Err(RevealError::NotADefinition(info.name.to_string()));
            }
            ClassKind::Definition { type_params, .. } => type_params.len(),
        };
        if expected == 0 {
            return Err(RevealError::NotGeneric(info.name.to_string()));
        }
        if expected != args.len() {
            return Err(RevealError::ArityMismatch {
                class: info.name.to_string(),
                expected,
                found: args.len(),
            });
        }
        for arg in &args {
            self.check_arg(*arg)?;
        }

        match self.parametrizations.entry((origin, args.clone())) {
            Entry::Occupied(entry) => Ok(*entry.get()),
            Entry::Vacant(entry) => {
                let id = ClassId(self.next_class.fetch_add(1, Ordering::SeqCst));
                let name = self.render_parametrization(&info.name, &args);
                trace!(
                    registry_id = self.registry_id,
                    class = %id,
                    origin = %origin,
                    name = %name,
                    "ClassRegistry::parametrize"
                );
                self.classes.insert(
                    id,
                    Arc::new(ClassInfo {
                        name,
                        kind: ClassKind::Parametrization { origin, args },
                    }),
                );
                entry.insert(id);
                Ok(id)
            }
        }
    }

    /// Record a runtime object of `class`.
    pub fn instantiate(&self, class: ClassId) -> RevealResult<InstanceId> {
        self.info(class)?;
        let id = InstanceId(self.next_instance.fetch_add(1, Ordering::SeqCst));
        trace!(registry_id = self.registry_id, instance = %id, class = %class, "ClassRegistry::instantiate");
        self.instances.insert(id, class);
        Ok(id)
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    pub fn get(&self, class: ClassId) -> Option<Arc<ClassInfo>> {
        self.classes.get(&class).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, class: ClassId) -> bool {
        self.classes.contains_key(&class)
    }

    pub fn class_name(&self, class: ClassId) -> Option<Arc<str>> {
        self.classes.get(&class).map(|r| Arc::clone(&r.name))
    }

    pub fn type_param_name(&self, param: TypeParamId) -> Option<Arc<str>> {
        self.type_params.get(&param).map(|r| Arc::clone(&r.name))
    }

    pub fn opaque_label(&self, opaque: OpaqueId) -> Option<Arc<str>> {
        self.opaques.get(&opaque).map(|r| Arc::clone(r.value()))
    }

    /// The generic definition behind a parametrization, `None` for a
    /// definition.
    pub fn origin_of(&self, class: ClassId) -> RevealResult<Option<ClassId>> {
        match &self.info(class)?.kind {
            ClassKind::Parametrization { origin, .. } => Ok(Some(*origin)),
            ClassKind::Definition { .. } => Ok(None),
        }
    }

    /// Runtime class of an instance.
    pub fn instance_class(&self, instance: InstanceId) -> RevealResult<ClassId> {
        self.instances
            .get(&instance)
            .map(|r| *r.value())
            .ok_or(RevealError::UnknownInstance(instance))
    }

    /// Whether `class` (or the definition behind it) has `ancestor` in its
    /// resolution order. Parametrizations are compared by their origin.
    pub fn is_subclass(&self, class: ClassId, ancestor: ClassId) -> RevealResult<bool> {
        let ancestor = self.origin_of(ancestor)?.unwrap_or(ancestor);
        Ok(is_derived_from(&self.linearization(class)?, ancestor))
    }

    /// Number of registered classes, parametrizations included.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub(crate) fn info(&self, class: ClassId) -> RevealResult<Arc<ClassInfo>> {
        self.get(class).ok_or(RevealError::UnknownClass(class))
    }

    /// C3 order of the definition behind `class`.
    pub(crate) fn linearization(&self, class: ClassId) -> RevealResult<Arc<[ClassId]>> {
        match &self.info(class)?.kind {
            ClassKind::Definition { order, .. } => Ok(Arc::clone(order)),
            ClassKind::Parametrization { origin, .. } => self.linearization(*origin),
        }
    }

    /// Ancestry chain of `class`: the class itself, then every definition in
    /// its linearization, each followed by its parametrized direct bases.
    pub(crate) fn ancestry_chain(&self, class: ClassId) -> RevealResult<Arc<[ClassId]>> {
        if let Some(cached) = self.ancestry_cache.get(&class) {
            return Ok(Arc::clone(cached.value()));
        }

        let info = self.info(class)?;
        let mut chain = Vec::new();
        let definition = match &info.kind {
            ClassKind::Parametrization { origin, .. } => {
                chain.push(class);
                *origin
            }
            ClassKind::Definition { .. } => class,
        };

        for &step in self.linearization(definition)?.iter() {
            chain.push(step);
            if let ClassKind::Definition { bases, .. } = &self.info(step)?.kind {
                for &base in bases {
                    if self.info(base)?.is_parametrization() {
                        chain.push(base);
                    }
                }
            }
        }

        let chain: Arc<[ClassId]> = Arc::from(chain);
        self.ancestry_cache.insert(class, Arc::clone(&chain));
        Ok(chain)
    }

    fn check_arg(&self, arg: TypeArg) -> RevealResult<()> {
        match arg {
            TypeArg::Param(param) if !self.type_params.contains_key(&param) => {
                Err(RevealError::UnknownTypeParam(param))
            }
            TypeArg::Concrete(ConcreteType::Class(class)) => {
                self.info(class).map(|_| ())
            }
            _ => Ok(()),
        }
    }

    fn render_parametrization(&self, origin: &str, args: &[TypeArg]) -> Arc<str> {
        let rendered: Vec<String> = args
            .iter()
            .map(|arg| {
                let name = match *arg {
                    TypeArg::Concrete(ConcreteType::Class(class)) => self.class_name(class),
                    TypeArg::Concrete(ConcreteType::Opaque(opaque)) => self.opaque_label(opaque),
                    TypeArg::Param(param) => self.type_param_name(param),
                };
                name.map_or_else(|| "?".to_string(), |name| name.to_string())
            })
            .collect();
        Arc::from(format!("{origin}[{}]", rendered.join(", ")))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;

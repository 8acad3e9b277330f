//! Identifiers and value types shared by the registry and the resolver.

use revelio_common::limits::INLINE_TYPE_ARGS;
use smallvec::SmallVec;
use std::fmt;

// =============================================================================
// Identifiers
// =============================================================================

/// Identity token for a declared type parameter.
///
/// Tokens are allocated by a registry and never interned by name: two
/// parameters that share a display name are still distinct unless they are
/// the same token.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub(crate) u32);

/// A class known to an ancestry provider: either a generic (or plain)
/// definition, or a parametrization of a definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) u32);

/// A runtime object whose class is recorded by the provider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(pub(crate) u32);

/// Handle to a non-class type argument (a literal, a structured union...)
/// that is carried through resolution without being inspected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OpaqueId(pub(crate) u32);

macro_rules! raw_id {
    ($($ty:ident => $prefix:literal),* $(,)?) => {
        $(
            impl $ty {
                /// Raw index, stable for the lifetime of the owning registry.
                pub const fn as_u32(self) -> u32 {
                    self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, concat!($prefix, "#{}"), self.0)
                }
            }
        )*
    };
}

raw_id! {
    TypeParamId => "param",
    ClassId => "class",
    InstanceId => "instance",
    OpaqueId => "opaque",
}

// =============================================================================
// Type arguments and resolutions
// =============================================================================

/// A type that needs no further substitution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    /// A class, possibly itself a parametrization such as `List[int]`.
    Class(ClassId),
    /// A non-class argument surfaced as-is.
    Opaque(OpaqueId),
}

/// One argument of a parametrization.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArg {
    Concrete(ConcreteType),
    /// A parameter of the enclosing definition, passed through unresolved.
    Param(TypeParamId),
}

impl TypeArg {
    pub const fn class(class: ClassId) -> Self {
        Self::Concrete(ConcreteType::Class(class))
    }

    pub const fn opaque(opaque: OpaqueId) -> Self {
        Self::Concrete(ConcreteType::Opaque(opaque))
    }

    pub const fn as_param(self) -> Option<TypeParamId> {
        match self {
            Self::Param(param) => Some(param),
            Self::Concrete(_) => None,
        }
    }
}

impl From<ClassId> for TypeArg {
    fn from(class: ClassId) -> Self {
        Self::class(class)
    }
}

impl From<TypeParamId> for TypeArg {
    fn from(param: TypeParamId) -> Self {
        Self::Param(param)
    }
}

impl From<OpaqueId> for TypeArg {
    fn from(opaque: OpaqueId) -> Self {
        Self::opaque(opaque)
    }
}

impl From<ConcreteType> for TypeArg {
    fn from(concrete: ConcreteType) -> Self {
        Self::Concrete(concrete)
    }
}

/// Outcome of resolving a parameter that belongs to a subject's lineage.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolution {
    Concrete(ConcreteType),
    /// The parameter is part of the lineage but no concrete type was ever
    /// substituted for it.
    Unresolved,
}

impl Resolution {
    pub const fn is_concrete(self) -> bool {
        matches!(self, Self::Concrete(_))
    }

    pub const fn concrete(self) -> Option<ConcreteType> {
        match self {
            Self::Concrete(concrete) => Some(concrete),
            Self::Unresolved => None,
        }
    }

    /// The resolved class, if the resolution is a class rather than an
    /// opaque argument.
    pub const fn class(self) -> Option<ClassId> {
        match self {
            Self::Concrete(ConcreteType::Class(class)) => Some(class),
            _ => None,
        }
    }
}

impl From<ClassId> for Resolution {
    fn from(class: ClassId) -> Self {
        Self::Concrete(ConcreteType::Class(class))
    }
}

// =============================================================================
// Subject
// =============================================================================

/// What a query is asked about: a class or an instance of one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    Class(ClassId),
    Instance(InstanceId),
}

impl From<ClassId> for Subject {
    fn from(class: ClassId) -> Self {
        Self::Class(class)
    }
}

impl From<InstanceId> for Subject {
    fn from(instance: InstanceId) -> Self {
        Self::Instance(instance)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => class.fmt(f),
            Self::Instance(instance) => instance.fmt(f),
        }
    }
}

pub type TypeArgList = SmallVec<[TypeArg; INLINE_TYPE_ARGS]>;
pub type TypeParamList = SmallVec<[TypeParamId; INLINE_TYPE_ARGS]>;

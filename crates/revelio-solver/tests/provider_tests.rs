use super::*;
use crate::error::RevealError;
use crate::reveal::{reveal_type_var, reveal_type_vars};
use crate::types::{Resolution, TypeArg};
use rustc_hash::FxHashMap;

/// A host that keeps its own reflection tables instead of using
/// `ClassRegistry`.
#[derive(Default)]
struct TableProvider {
    params: FxHashMap<ClassId, TypeParamList>,
    chains: FxHashMap<ClassId, Arc<[ClassId]>>,
    applied: FxHashMap<ClassId, (ClassId, TypeArgList)>,
}

impl AncestryProvider for TableProvider {
    fn declared_params(&self, class: ClassId) -> RevealResult<TypeParamList> {
        Ok(self.params.get(&class).cloned().unwrap_or_default())
    }

    fn ancestry(&self, class: ClassId) -> RevealResult<Arc<[ClassId]>> {
        self.chains
            .get(&class)
            .cloned()
            .ok_or(RevealError::UnknownClass(class))
    }

    fn parametrization(&self, class: ClassId) -> RevealResult<Option<(ClassId, TypeArgList)>> {
        Ok(self.applied.get(&class).cloned())
    }

    fn class_of(&self, instance: InstanceId) -> RevealResult<ClassId> {
        Err(RevealError::UnknownInstance(instance))
    }
}

#[test]
fn test_custom_provider_resolves() {
    // Box(Generic[T]); Box[Int]
    let (int, boxed, box_int) = (ClassId(1), ClassId(2), ClassId(3));
    let t = TypeParamId(1);

    let mut db = TableProvider::default();
    db.params.insert(boxed, smallvec::smallvec![t]);
    db.chains.insert(box_int, Arc::from(vec![box_int, boxed]));
    db.applied
        .insert(box_int, (boxed, smallvec::smallvec![TypeArg::class(int)]));

    assert_eq!(reveal_type_var(&db, box_int, t), Ok(Resolution::from(int)));
    assert_eq!(db.type_param_name(t), None);
}

#[test]
fn test_custom_provider_arity_mismatch() {
    let (int, boxed, box_int) = (ClassId(1), ClassId(2), ClassId(3));
    let t = TypeParamId(1);

    let mut db = TableProvider::default();
    db.params.insert(boxed, smallvec::smallvec![t]);
    db.chains.insert(box_int, Arc::from(vec![box_int, boxed]));
    db.applied.insert(
        box_int,
        (
            boxed,
            smallvec::smallvec![TypeArg::class(int), TypeArg::class(int)],
        ),
    );

    assert!(matches!(
        reveal_type_vars(&db, box_int),
        Err(RevealError::ArityMismatch {
            expected: 1,
            found: 2,
            ..
        })
    ));
}

#[test]
fn test_reused_placeholders_stay_unresolved() {
    // Base(Generic[U]); A(Generic[T]) extends Base[T]; B(Generic[U]) extends A[U].
    // U is shared by Base and B.
    let (base, a, a_u, b, base_t, int, b_int) = (
        ClassId(1),
        ClassId(2),
        ClassId(3),
        ClassId(4),
        ClassId(5),
        ClassId(6),
        ClassId(7),
    );
    let (t, u) = (TypeParamId(1), TypeParamId(2));

    let mut db = TableProvider::default();
    db.params.insert(base, smallvec::smallvec![u]);
    db.params.insert(a, smallvec::smallvec![t]);
    db.params.insert(b, smallvec::smallvec![u]);
    db.applied
        .insert(a_u, (a, smallvec::smallvec![TypeArg::Param(u)]));
    db.applied
        .insert(base_t, (base, smallvec::smallvec![TypeArg::Param(t)]));
    db.applied
        .insert(b_int, (b, smallvec::smallvec![TypeArg::class(int)]));
    db.chains
        .insert(b, Arc::from(vec![b, a_u, a, base_t, base]));
    db.chains
        .insert(b_int, Arc::from(vec![b_int, b, a_u, a, base_t, base]));

    assert_eq!(reveal_type_var(&db, b, t), Ok(Resolution::Unresolved));
    assert_eq!(reveal_type_var(&db, b, u), Ok(Resolution::Unresolved));
    let vars = reveal_type_vars(&db, b).unwrap();
    assert_eq!(vars.len(), 2);
    assert!(vars.values().all(|&r| r == Resolution::Unresolved));

    assert_eq!(reveal_type_var(&db, b_int, t), Ok(Resolution::from(int)));
    assert_eq!(reveal_type_var(&db, b_int, u), Ok(Resolution::from(int)));
}

#[test]
fn test_instance_lookup_goes_through_provider() {
    let db = TableProvider::default();
    assert_eq!(
        reveal_type_var(&db, InstanceId(1), TypeParamId(1)),
        Err(RevealError::UnknownInstance(InstanceId(1)))
    );
}

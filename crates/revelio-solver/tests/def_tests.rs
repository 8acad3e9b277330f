use super::*;
use crate::provider::AncestryProvider;

#[test]
fn test_type_params_are_identity_tokens() {
    let db = ClassRegistry::new();
    let first = db.new_type_param("T");
    let second = db.new_type_param("T");

    assert_ne!(first, second);
    assert_eq!(db.type_param_name(first).as_deref(), Some("T"));
    assert_eq!(db.type_param_name(second).as_deref(), Some("T"));
}

#[test]
fn test_define_and_lookup() {
    let db = ClassRegistry::new();
    assert!(db.is_empty());

    let k = db.new_type_param("K");
    let v = db.new_type_param("V");
    let pair = db.define_generic("Pair", [k, v], []).expect("Pair registers");

    assert!(db.contains(pair));
    assert_eq!(db.len(), 1);

    let info = db.get(pair).expect("definition exists");
    assert_eq!(&*info.name, "Pair");
    assert!(!info.is_parametrization());
    assert_eq!(info.type_params(), &[k, v]);
}

#[test]
fn test_parametrizations_are_interned() {
    let db = ClassRegistry::new();
    let t = db.new_type_param("T");
    let int = db.define_class("int", []).unwrap();
    let str_ = db.define_class("str", []).unwrap();
    let boxed = db.define_generic("Box", [t], []).unwrap();

    let box_int = db.parametrize(boxed, [int.into()]).unwrap();
    let again = db.parametrize(boxed, [int.into()]).unwrap();
    let box_str = db.parametrize(boxed, [str_.into()]).unwrap();

    assert_eq!(box_int, again);
    assert_ne!(box_int, box_str);
    assert_eq!(db.class_name(box_int).as_deref(), Some("Box[int]"));
    assert_eq!(db.origin_of(box_int).unwrap(), Some(boxed));
    assert_eq!(db.origin_of(boxed).unwrap(), None);
}

#[test]
fn test_parametrize_arity_mismatch() {
    let db = ClassRegistry::new();
    let k = db.new_type_param("K");
    let v = db.new_type_param("V");
    let int = db.define_class("int", []).unwrap();
    let pair = db.define_generic("Pair", [k, v], []).unwrap();

    let err = db.parametrize(pair, [int.into()]).unwrap_err();
    assert_eq!(
        err,
        RevealError::ArityMismatch {
            class: "Pair".to_string(),
            expected: 2,
            found: 1,
        }
    );
}

#[test]
fn test_parametrize_rejects_non_generic_and_parametrized() {
    let db = ClassRegistry::new();
    let t = db.new_type_param("T");
    let int = db.define_class("int", []).unwrap();
    let boxed = db.define_generic("Box", [t], []).unwrap();
    let box_int = db.parametrize(boxed, [int.into()]).unwrap();

    assert_eq!(
        db.parametrize(int, [int.into()]).unwrap_err(),
        RevealError::NotGeneric("int".to_string())
    );
    assert_eq!(
        db.parametrize(box_int, [int.into()]).unwrap_err(),
        RevealError::NotADefinition("Box[int]".to_string())
    );
}

#[test]
fn test_parametrize_rejects_unknown_arguments() {
    let db = ClassRegistry::new();
    let t = db.new_type_param("T");
    let boxed = db.define_generic("Box", [t], []).unwrap();

    let stray_id = TypeParamId(100);

    assert_eq!(
        db.parametrize(boxed, [TypeArg::Param(stray_id)]).unwrap_err(),
        RevealError::UnknownTypeParam(stray_id)
    );
    assert_eq!(
        db.parametrize(boxed, [TypeArg::class(ClassId(77))]).unwrap_err(),
        RevealError::UnknownClass(ClassId(77))
    );
}

#[test]
fn test_define_rejects_duplicate_and_unknown_params() {
    let db = ClassRegistry::new();
    let t = db.new_type_param("T");

    assert!(matches!(
        db.define_generic("Twice", [t, t], []),
        Err(RevealError::DuplicateTypeParam { .. })
    ));
    assert_eq!(
        db.define_generic("Unknown", [TypeParamId(42)], []).unwrap_err(),
        RevealError::UnknownTypeParam(TypeParamId(42))
    );
}

#[test]
fn test_define_rejects_unbound_base_parameter() {
    let db = ClassRegistry::new();
    let t = db.new_type_param("T");
    let u = db.new_type_param("U");
    let boxed = db.define_generic("Box", [t], []).unwrap();
    let box_u = db.parametrize(boxed, [u.into()]).unwrap();

    let err = db.define_class("Leaky", [box_u]).unwrap_err();
    assert_eq!(
        err,
        RevealError::UnboundBaseParameter {
            class: "Leaky".to_string(),
            base: "Box[U]".to_string(),
            param: u,
        }
    );
    assert!(db.define_generic("Sealed", [u], [box_u]).is_ok());
}

#[test]
fn test_define_rejects_inconsistent_hierarchy() {
    let db = ClassRegistry::new();
    let a = db.define_class("A", []).unwrap();
    let b = db.define_class("B", [a]).unwrap();

    assert_eq!(
        db.define_class("Bad", [a, b]).unwrap_err(),
        RevealError::InconsistentHierarchy("Bad".to_string())
    );
    assert_eq!(
        db.define_class("Twice", [a, a]).unwrap_err(),
        RevealError::InconsistentHierarchy("Twice".to_string())
    );
}

#[test]
fn test_is_subclass() {
    let db = ClassRegistry::new();
    let t = db.new_type_param("T");
    let int = db.define_class("int", []).unwrap();
    let boxed = db.define_generic("Box", [t], []).unwrap();
    let box_int = db.parametrize(boxed, [int.into()]).unwrap();
    let int_box = db.define_class("IntBox", [box_int]).unwrap();

    assert!(db.is_subclass(int_box, boxed).unwrap());
    assert!(db.is_subclass(int_box, box_int).unwrap());
    assert!(db.is_subclass(box_int, boxed).unwrap());
    assert!(!db.is_subclass(boxed, int_box).unwrap());
    assert!(!db.is_subclass(int_box, int).unwrap());
}

#[test]
fn test_instances_record_their_class() {
    let db = ClassRegistry::new();
    let int = db.define_class("int", []).unwrap();
    let obj = db.instantiate(int).unwrap();

    assert_eq!(db.instance_class(obj).unwrap(), int);
    assert_eq!(
        db.instantiate(ClassId(99)).unwrap_err(),
        RevealError::UnknownClass(ClassId(99))
    );
}

#[test]
fn test_ancestry_chain_interleaves_parametrized_bases() {
    let db = ClassRegistry::new();
    let k = db.new_type_param("K");
    let v = db.new_type_param("V");
    let v2 = db.new_type_param("V2");
    let int = db.define_class("int", []).unwrap();
    let str_ = db.define_class("str", []).unwrap();

    let pair = db.define_generic("Pair", [k, v], []).unwrap();
    let pair_int_v2 = db.parametrize(pair, [int.into(), v2.into()]).unwrap();
    let int_pair = db.define_generic("IntPair", [v2], [pair_int_v2]).unwrap();
    let int_pair_str = db.parametrize(int_pair, [str_.into()]).unwrap();

    let chain = db.ancestry(int_pair_str).unwrap();
    assert_eq!(&*chain, &[int_pair_str, int_pair, pair_int_v2, pair]);

    // Second lookup comes from the cache and is identical.
    let cached = db.ancestry(int_pair_str).unwrap();
    assert!(std::sync::Arc::ptr_eq(&chain, &cached));

    assert_eq!(
        db.parametrization(int_pair_str).unwrap(),
        Some((int_pair, smallvec::smallvec![TypeArg::class(str_)]))
    );
    assert!(db.declared_params(int_pair_str).unwrap().is_empty());
    assert_eq!(db.declared_params(int_pair).unwrap().as_slice(), &[v2]);
}

#[test]
fn test_concurrent_registration() {
    use rayon::prelude::*;

    let db = ClassRegistry::new();
    let t = db.new_type_param("T");
    let boxed = db.define_generic("Box", [t], []).unwrap();

    let leaves: Vec<ClassId> = (0..64)
        .into_par_iter()
        .map(|i| {
            let arg = db.define_class(&format!("Arg{i}"), []).unwrap();
            let base = db.parametrize(boxed, [arg.into()]).unwrap();
            db.define_class(&format!("Leaf{i}"), [base]).unwrap()
        })
        .collect();

    // Box, 64 arguments, 64 parametrizations, 64 leaves.
    assert_eq!(db.len(), 1 + 3 * 64);
    for (i, leaf) in leaves.into_iter().enumerate() {
        assert!(db.is_subclass(leaf, boxed).unwrap());
        assert_eq!(db.class_name(leaf).as_deref(), Some(format!("Leaf{i}").as_str()));
    }
}

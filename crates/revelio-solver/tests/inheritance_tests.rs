use super::*;

fn c(id: u32) -> ClassId {
    ClassId(id)
}

#[test]
fn test_root_class() {
    let order = c3_linearize(c(1), &[], &[]).expect("root linearizes");
    assert_eq!(order, vec![c(1)]);
}

#[test]
fn test_transitive_inheritance() {
    // A <- B <- C
    let a = vec![c(1)];
    let b = c3_linearize(c(2), &[c(1)], &[&a]).expect("B linearizes");
    let order = c3_linearize(c(3), &[c(2)], &[&b]).expect("C linearizes");

    assert_eq!(order, vec![c(3), c(2), c(1)]);
    assert!(is_derived_from(&order, c(1))); // Transitive
    assert!(!is_derived_from(&a, c(3)));
}

#[test]
fn test_diamond_inheritance() {
    // Diamond: A is top, B and C extend A, D extends both B and C
    let a = vec![c(1)];
    let b = c3_linearize(c(2), &[c(1)], &[&a]).expect("B linearizes");
    let cc = c3_linearize(c(3), &[c(1)], &[&a]).expect("C linearizes");
    let order = c3_linearize(c(4), &[c(2), c(3)], &[&b, &cc]).expect("D linearizes");

    // A appears once, after both of its subclasses.
    assert_eq!(order, vec![c(4), c(2), c(3), c(1)]);
}

#[test]
fn test_multiple_inheritance_keeps_base_order() {
    let a = vec![c(1)];
    let b = vec![c(2)];

    let order = c3_linearize(c(3), &[c(1), c(2)], &[&a, &b]).expect("linearizes");
    assert_eq!(order, vec![c(3), c(1), c(2)]);

    let order = c3_linearize(c(4), &[c(2), c(1)], &[&b, &a]).expect("linearizes");
    assert_eq!(order, vec![c(4), c(2), c(1)]);
}

#[test]
fn test_duplicate_base_is_inconsistent() {
    let a = vec![c(1)];
    assert_eq!(c3_linearize(c(2), &[c(1), c(1)], &[&a, &a]), None);
}

#[test]
fn test_conflicting_orders_are_inconsistent() {
    // X(A, B) and Y(B, A); Z(X, Y) has no consistent order.
    let a = vec![c(1)];
    let b = vec![c(2)];
    let x = c3_linearize(c(3), &[c(1), c(2)], &[&a, &b]).expect("X linearizes");
    let y = c3_linearize(c(4), &[c(2), c(1)], &[&b, &a]).expect("Y linearizes");

    assert_eq!(c3_linearize(c(5), &[c(3), c(4)], &[&x, &y]), None);
}

#[test]
fn test_base_listed_before_its_subclass_is_inconsistent() {
    // class B(A); class C(A, B) -> A must follow B, but is listed first.
    let a = vec![c(1)];
    let b = c3_linearize(c(2), &[c(1)], &[&a]).expect("B linearizes");
    assert_eq!(c3_linearize(c(3), &[c(1), c(2)], &[&a, &b]), None);
}

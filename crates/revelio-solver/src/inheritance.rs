//! Method resolution order for generic definitions.
//!
//! Parametrized bases are erased to their origin definition before
//! linearization, so `class IntPair(Pair[int, V])` linearizes as
//! `IntPair, Pair`. The bindings carried by the parametrized bases are
//! re-attached by the registry when it builds the ancestry chain.
//!
//! The order is the C3 linearization: a class precedes its bases, bases keep
//! their declaration order, and every base's own order is preserved. A
//! hierarchy for which no such order exists is rejected at registration.

use crate::types::ClassId;
use revelio_common::limits::MAX_LINEARIZATION_LEN;

/// Computes the C3 linearization of `class` given its erased direct bases and
/// the (already computed) linearization of each base.
///
/// Returns `None` when the bases admit no consistent order, e.g. when the same
/// base is listed twice or two bases order shared ancestors differently.
pub fn c3_linearize(
    class: ClassId,
    bases: &[ClassId],
    base_orders: &[&[ClassId]],
) -> Option<Vec<ClassId>> {
    let mut sequences: Vec<&[ClassId]> = base_orders.to_vec();
    sequences.push(bases);

    let mut order = vec![class];
    loop {
        sequences.retain(|seq| !seq.is_empty());
        if sequences.is_empty() {
            return Some(order);
        }
        if order.len() > MAX_LINEARIZATION_LEN {
            return None;
        }

        // A head is eligible if it appears in no other sequence's tail.
        let candidate = sequences
            .iter()
            .map(|seq| seq[0])
            .find(|head| !sequences.iter().any(|seq| seq[1..].contains(head)))?;

        order.push(candidate);
        for seq in &mut sequences {
            if seq[0] == candidate {
                *seq = &seq[1..];
            }
        }
    }
}

/// Returns `true` if `class` lists `ancestor` anywhere in `order`
/// (its linearization), including itself.
pub fn is_derived_from(order: &[ClassId], ancestor: ClassId) -> bool {
    order.contains(&ancestor)
}

#[cfg(test)]
#[path = "../tests/inheritance_tests.rs"]
mod tests;

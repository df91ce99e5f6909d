use crate::ring::Ring;
use log::warn;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Chains open rings at shared endpoints until no further merge is
/// possible and returns the resulting rings.
///
/// Already-closed input rings pass through in input order. Open rings are
/// grown by walking an endpoint index (node id to ring slot), merging in
/// whichever of the four endpoint pairings applies, until the ring closes
/// or no candidate is left. A ring that cannot be closed is returned open
/// and logged; callers decide whether that fails the relation. Disjoint
/// members legitimately produce several closed rings.
pub fn merge_rings(rings: Vec<Ring>) -> Vec<Ring> {
    let mut result = Vec::with_capacity(rings.len());
    let mut open: Vec<Option<Ring>> = Vec::new();
    for ring in rings {
        if ring.is_closed() {
            result.push(ring);
        } else {
            open.push(Some(ring));
        }
    }

    // Endpoint index over the open rings. Entries go stale as rings are
    // consumed; consumed slots are None and get skipped on lookup.
    let mut endpoints: HashMap<i64, SmallVec<[usize; 2]>> = HashMap::new();
    for (slot, ring) in open.iter().enumerate() {
        if let Some(ring) = ring {
            endpoints.entry(ring.first()).or_default().push(slot);
            endpoints.entry(ring.last()).or_default().push(slot);
        }
    }

    for start in 0..open.len() {
        let Some(mut current) = open[start].take() else {
            continue;
        };
        while !current.is_closed() {
            let Some(slot) = find_partner(&endpoints, &open, &current) else {
                warn!(
                    "ring stays open: endpoints {} and {} have no counterpart",
                    current.first(),
                    current.last()
                );
                break;
            };
            let Some(other) = open[slot].take() else {
                break;
            };
            match current.shared_endpoint(&other) {
                Some(joint) => current.splice(other, joint),
                None => {
                    open[slot] = Some(other);
                    break;
                }
            }
        }
        result.push(current);
    }
    result
}

/// Finds the lowest open slot sharing an endpoint with `current`,
/// trying its trailing end first.
fn find_partner(
    endpoints: &HashMap<i64, SmallVec<[usize; 2]>>,
    open: &[Option<Ring>],
    current: &Ring,
) -> Option<usize> {
    for node in [current.last(), current.first()] {
        let Some(slots) = endpoints.get(&node) else {
            continue;
        };
        let candidate = slots
            .iter()
            .copied()
            .filter(|&slot| {
                open[slot]
                    .as_ref()
                    .is_some_and(|other| current.shared_endpoint(other).is_some())
            })
            .min();
        if candidate.is_some() {
            return candidate;
        }
    }
    None
}

#[cfg(test)]
#[path = "assembler_tests.rs"]
mod tests;

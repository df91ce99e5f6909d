use crate::ring::Ring;
use geo::bounding_rect::BoundingRect;
use rstar::{RTree, RTreeObject, AABB};

/// Rings below this area are treated as degenerate: they contribute
/// nothing and never act as containers.
pub(crate) const AREA_EPS: f64 = 1e-9;

// Wrapper to index ring bounding boxes in the rstar tree
struct IndexedRing {
    aabb: AABB<[f64; 2]>,
    idx: usize,
}

impl RTreeObject for IndexedRing {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.aabb
    }
}

/// Flat containment classification of a ring set.
///
/// `depth[i]` counts the rings containing ring i; rings at even depth are
/// top-level polygons, rings at odd depth are holes. `parent[i]` is the
/// minimal-area container, `children[i]` the rings whose parent is i.
/// Degenerate rings have `active[i] == false` and take no part.
pub(crate) struct Nesting {
    pub depth: Vec<usize>,
    pub parent: Vec<Option<usize>>,
    pub children: Vec<Vec<usize>>,
    pub active: Vec<bool>,
}

impl Nesting {
    pub fn is_top_level(&self, idx: usize) -> bool {
        self.active[idx] && self.depth[idx] % 2 == 0
    }
}

/// Computes containment depths for a set of closed rings with built
/// geometry. The `contains` predicate supplies the geometric test; this
/// function adds the deterministic ordering on top: a ring only counts as
/// a container of a strictly smaller one (index tie-break for equal
/// areas), so identical or mutually-overlapping boundaries resolve the
/// same way every run instead of producing a cycle.
pub(crate) fn resolve<F>(rings: &[Ring], contains: F) -> Nesting
where
    F: Fn(&Ring, &Ring) -> bool,
{
    let n = rings.len();
    let mut depth = vec![0usize; n];
    let mut parent: Vec<Option<usize>> = vec![None; n];
    let active: Vec<bool> = rings
        .iter()
        .map(|ring| ring.area().map(|a| a > AREA_EPS).unwrap_or(false))
        .collect();

    let mut indexed = Vec::with_capacity(n);
    for (idx, ring) in rings.iter().enumerate() {
        if !active[idx] {
            continue;
        }
        if let Some(aabb) = ring_aabb(ring) {
            indexed.push(IndexedRing { aabb, idx });
        }
    }
    let tree = RTree::bulk_load(indexed);

    for b in 0..n {
        if !active[b] {
            continue;
        }
        let Some(b_aabb) = ring_aabb(&rings[b]) else {
            continue;
        };

        let mut best: Option<(f64, usize)> = None;
        for candidate in tree.locate_in_envelope_intersecting(&b_aabb) {
            let a = candidate.idx;
            if a == b || !outranks(rings, a, b) {
                continue;
            }
            if contains(&rings[a], &rings[b]) {
                depth[b] += 1;
                let area = ring_area(rings, a);
                let better = match best {
                    None => true,
                    Some((best_area, best_idx)) => {
                        area < best_area - AREA_EPS
                            || ((area - best_area).abs() <= AREA_EPS && a < best_idx)
                    }
                };
                if better {
                    best = Some((area, a));
                }
            }
        }
        parent[b] = best.map(|(_, idx)| idx);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (b, p) in parent.iter().enumerate() {
        if let Some(p) = p {
            children[*p].push(b);
        }
    }

    Nesting {
        depth,
        parent,
        children,
        active,
    }
}

/// Deterministic containment ordering: a may contain b only when a is
/// strictly larger, or equal-area with the lower ring index.
fn outranks(rings: &[Ring], a: usize, b: usize) -> bool {
    let area_a = ring_area(rings, a);
    let area_b = ring_area(rings, b);
    area_a > area_b + AREA_EPS || ((area_a - area_b).abs() <= AREA_EPS && a < b)
}

fn ring_area(rings: &[Ring], idx: usize) -> f64 {
    rings[idx].area().unwrap_or(0.0)
}

fn ring_aabb(ring: &Ring) -> Option<AABB<[f64; 2]>> {
    let bbox = ring.polygon().ok()?.bounding_rect()?;
    Some(AABB::from_corners(
        [bbox.min().x, bbox.min().y],
        [bbox.max().x, bbox.max().y],
    ))
}

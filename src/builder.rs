use crate::assembler::merge_rings;
use crate::element::{Fragment, Relation};
use crate::error::{BuildError, Result};
use crate::nesting::{resolve, Nesting};
use crate::ring::Ring;
use geo::algorithm::contains::Contains;
use geo::algorithm::interior_point::InteriorPoint;
use geo::algorithm::winding_order::Winding;
use geo::BooleanOps;
use geo_types::{Geometry, MultiPolygon, Polygon};
use log::debug;
use std::cmp::Ordering;

/// Builds a relation's polygon geometry from its member fragments.
///
/// The two implementations agree on `inserted` flags and total area for
/// well-formed input; they differ in how containment is derived and how
/// the final geometry is composed, which matters for tolerance against
/// slightly invalid rings. Role hints on the members are never consulted:
/// containment depth decides what is a polygon and what is a hole.
pub trait RelationBuilder {
    /// Wraps each fragment in a ring and chains them into closed rings.
    /// Fails when any ring cannot be closed.
    fn build_rings(&self, fragments: Vec<Fragment>) -> Result<Vec<Ring>> {
        let mut rings = Vec::with_capacity(fragments.len());
        for fragment in fragments {
            if fragment.node_refs.is_empty() {
                return Err(BuildError::EmptyFragment);
            }
            rings.push(Ring::new(fragment));
        }
        let mut rings = merge_rings(rings);
        for ring in &rings {
            if !ring.is_closed() {
                return Err(BuildError::UnclosedRing {
                    first: ring.first(),
                    last: ring.last(),
                });
            }
        }
        for ring in &mut rings {
            ring.ensure_geometry()?;
        }
        Ok(rings)
    }

    /// Resolves ring nesting, sets each ring's `inserted` flag and assigns
    /// the relation's polygon or multipolygon. Zero top-level rings yield
    /// an empty multipolygon, not an error.
    fn build_relation_geometry(&self, relation: &mut Relation, rings: &mut [Ring]) -> Result<()>;
}

/// Strategy driven by boolean set operations: even-depth rings are
/// unioned into the result in descending-area order, each with its
/// immediate children subtracted first.
pub struct UnionRelationBuilder;

/// Strategy driven by explicit containment tests: the parent/child tree
/// is built from interior-point checks and each even-depth ring becomes a
/// polygon whose holes are its immediate children's boundaries.
pub struct ContainsRelationBuilder;

impl RelationBuilder for UnionRelationBuilder {
    fn build_relation_geometry(&self, relation: &mut Relation, rings: &mut [Ring]) -> Result<()> {
        prepare(rings)?;
        let nesting = resolve(rings, polygon_contains);

        let mut result: Option<MultiPolygon<f64>> = None;
        for idx in descending_area(rings) {
            if !nesting.is_top_level(idx) {
                continue;
            }
            let mut part = MultiPolygon(vec![rings[idx].polygon()?.clone()]);
            for &child in &nesting.children[idx] {
                if !nesting.active[child] {
                    continue;
                }
                part = part.difference(&MultiPolygon(vec![rings[child].polygon()?.clone()]));
            }
            result = Some(match result {
                None => part,
                Some(acc) => acc.union(&part),
            });
            rings[idx].inserted = true;
        }

        let polygons = result.map(|mp| mp.0).unwrap_or_default();
        assign_geometry(relation, polygons, &nesting);
        Ok(())
    }
}

impl RelationBuilder for ContainsRelationBuilder {
    fn build_relation_geometry(&self, relation: &mut Relation, rings: &mut [Ring]) -> Result<()> {
        prepare(rings)?;
        let nesting = resolve(rings, point_contains);

        let mut polygons = Vec::new();
        for idx in descending_area(rings) {
            if !nesting.is_top_level(idx) {
                continue;
            }
            let mut exterior = rings[idx].polygon()?.exterior().clone();
            exterior.make_ccw_winding();
            let mut interiors = Vec::new();
            for &child in &nesting.children[idx] {
                if !nesting.active[child] {
                    continue;
                }
                let mut hole = rings[child].polygon()?.exterior().clone();
                hole.make_cw_winding();
                interiors.push(hole);
            }
            polygons.push(Polygon::new(exterior, interiors));
            rings[idx].inserted = true;
        }

        assign_geometry(relation, polygons, &nesting);
        Ok(())
    }
}

fn prepare(rings: &mut [Ring]) -> Result<()> {
    for ring in rings.iter_mut() {
        if !ring.is_closed() {
            return Err(BuildError::RingNotClosed);
        }
        ring.ensure_geometry()?;
        ring.inserted = false;
    }
    Ok(())
}

fn descending_area(rings: &[Ring]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rings.len()).collect();
    order.sort_by(|&a, &b| {
        let area_a = rings[a].area().unwrap_or(0.0);
        let area_b = rings[b].area().unwrap_or(0.0);
        area_b
            .partial_cmp(&area_a)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    order
}

fn assign_geometry(relation: &mut Relation, mut polygons: Vec<Polygon<f64>>, nesting: &Nesting) {
    debug!(
        "relation {}: {} top-level polygon(s) from {} ring(s)",
        relation.id,
        polygons.len(),
        nesting.depth.len()
    );
    relation.geom = Some(if polygons.len() == 1 {
        Geometry::Polygon(polygons.remove(0))
    } else {
        Geometry::MultiPolygon(MultiPolygon(polygons))
    });
}

/// Boolean-geometry containment: full polygon-in-polygon test.
fn polygon_contains(a: &Ring, b: &Ring) -> bool {
    match (a.polygon(), b.polygon()) {
        (Ok(pa), Ok(pb)) => pa.contains(pb),
        _ => false,
    }
}

/// Point-based containment: an interior representative point of b tested
/// against a's polygon. Tolerates rings that touch a's boundary.
fn point_contains(a: &Ring, b: &Ring) -> bool {
    match (a.polygon(), b.polygon()) {
        (Ok(pa), Ok(pb)) => pb
            .interior_point()
            .map(|point| pa.contains(&point))
            .unwrap_or(false),
        _ => false,
    }
}

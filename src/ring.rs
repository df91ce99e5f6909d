use crate::element::{Fragment, Tags};
use crate::error::{BuildError, Result};
use geo::Area;
use geo_types::{Coord, LineString, Polygon};

/// Which endpoints two open rings share. Determines how `splice`
/// orients the pieces before concatenating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Joint {
    EndStart,
    EndEnd,
    StartStart,
    StartEnd,
}

/// A (possibly still open) loop built from one or more fragments.
///
/// `refs` and `coords` run in a single consistent direction around the
/// loop; fragments joined against that direction were reversed during the
/// merge. The polygon and area are built lazily once the ring is closed.
#[derive(Clone, Debug)]
pub struct Ring {
    pub fragments: Vec<Fragment>,
    pub refs: Vec<i64>,
    pub coords: Vec<Coord<f64>>,
    pub tags: Tags,
    /// Set by the geometry builder: true when this ring contributes an
    /// independent top-level polygon, false when it is consumed as a hole.
    pub inserted: bool,
    geom: Option<(Polygon<f64>, f64)>,
}

impl Ring {
    pub fn new(fragment: Fragment) -> Self {
        debug_assert!(!fragment.node_refs.is_empty());
        Self {
            refs: fragment.node_refs.clone(),
            coords: fragment.coords.clone(),
            tags: fragment.tags.clone(),
            fragments: vec![fragment],
            inserted: false,
            geom: None,
        }
    }

    pub fn first(&self) -> i64 {
        self.refs[0]
    }

    pub fn last(&self) -> i64 {
        self.refs[self.refs.len() - 1]
    }

    pub fn is_closed(&self) -> bool {
        self.refs.len() > 1 && self.first() == self.last()
    }

    pub(crate) fn shared_endpoint(&self, other: &Ring) -> Option<Joint> {
        if self.last() == other.first() {
            Some(Joint::EndStart)
        } else if self.last() == other.last() {
            Some(Joint::EndEnd)
        } else if self.first() == other.first() {
            Some(Joint::StartStart)
        } else if self.first() == other.last() {
            Some(Joint::StartEnd)
        } else {
            None
        }
    }

    /// Merges `other` into this ring. Fails when the two rings have no
    /// endpoint in common.
    pub fn merge(mut self, other: Ring) -> Result<Ring> {
        let joint = self
            .shared_endpoint(&other)
            .ok_or(BuildError::DisjointRings)?;
        self.splice(other, joint);
        Ok(self)
    }

    /// Concatenates `other` onto this ring, reversing either piece as the
    /// joint requires so the merged sequence stays a single continuous
    /// path. The shared node is kept once.
    pub(crate) fn splice(&mut self, mut other: Ring, joint: Joint) {
        match joint {
            Joint::EndStart => {}
            Joint::EndEnd => other.reverse(),
            Joint::StartStart => self.reverse(),
            Joint::StartEnd => {
                self.reverse();
                other.reverse();
            }
        }
        self.refs.extend_from_slice(&other.refs[1..]);
        self.coords.extend_from_slice(&other.coords[1..]);
        // tag collision: the later-merged fragment wins
        self.tags.extend(other.tags);
        self.fragments.extend(other.fragments);
        self.geom = None;
    }

    fn reverse(&mut self) {
        self.refs.reverse();
        self.coords.reverse();
        self.fragments.reverse();
    }

    /// Builds the polygon and area from the closed refs' coordinates.
    /// Errors when the ring is not closed.
    pub fn ensure_geometry(&mut self) -> Result<()> {
        if self.geom.is_some() {
            return Ok(());
        }
        if !self.is_closed() {
            return Err(BuildError::RingNotClosed);
        }
        let polygon = Polygon::new(LineString::new(self.coords.clone()), vec![]);
        let area = polygon.unsigned_area();
        self.geom = Some((polygon, area));
        Ok(())
    }

    pub fn polygon(&self) -> Result<&Polygon<f64>> {
        self.geom
            .as_ref()
            .map(|(polygon, _)| polygon)
            .ok_or(BuildError::RingNotClosed)
    }

    pub fn area(&self) -> Result<f64> {
        self.geom
            .as_ref()
            .map(|(_, area)| *area)
            .ok_or(BuildError::RingNotClosed)
    }
}

#[cfg(test)]
#[path = "ring_tests.rs"]
mod tests;

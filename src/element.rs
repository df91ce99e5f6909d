use geo_types::{Coord, Geometry};
use std::collections::HashMap;

pub type Tags = HashMap<String, String>;

/// Role hint carried by a relation member. Advisory only: the nesting
/// resolver classifies rings by geometric containment depth and never
/// consults this.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Outer,
    Inner,
    Other,
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "outer" => Role::Outer,
            "inner" => Role::Inner,
            _ => Role::Other,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberKind {
    Node,
    Way,
    Relation,
}

#[derive(Clone, Debug)]
pub struct Member {
    pub id: i64,
    pub kind: MemberKind,
    pub role: Role,
}

impl Member {
    pub fn way(id: i64, role: Role) -> Self {
        Self {
            id,
            kind: MemberKind::Way,
            role,
        }
    }
}

/// A line fragment: an ordered run of node references with resolved
/// coordinates. Directionless in the sense that either endpoint may act
/// as the start when rings are chained. `coords` is parallel to
/// `node_refs`, same length, same order.
#[derive(Clone, Debug)]
pub struct Fragment {
    pub id: i64,
    pub tags: Tags,
    pub node_refs: Vec<i64>,
    pub coords: Vec<Coord<f64>>,
}

impl Fragment {
    pub fn new(id: i64, tags: Tags, node_refs: Vec<i64>, coords: Vec<Coord<f64>>) -> Self {
        debug_assert_eq!(node_refs.len(), coords.len());
        Self {
            id,
            tags,
            node_refs,
            coords,
        }
    }

    /// True when the fragment already forms a loop on its own.
    pub fn is_closed(&self) -> bool {
        self.node_refs.len() > 1 && self.node_refs.first() == self.node_refs.last()
    }
}

/// A relation whose members reference the fragments to assemble. After a
/// successful build `geom` holds the resolved polygon or multipolygon;
/// it stays `None` when assembly fails.
#[derive(Clone, Debug)]
pub struct Relation {
    pub id: i64,
    pub tags: Tags,
    pub members: Vec<Member>,
    pub geom: Option<Geometry<f64>>,
}

impl Relation {
    pub fn new(id: i64, tags: Tags, members: Vec<Member>) -> Self {
        Self {
            id,
            tags,
            members,
            geom: None,
        }
    }
}

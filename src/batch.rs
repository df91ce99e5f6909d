use crate::builder::RelationBuilder;
use crate::element::{Fragment, Relation};
use log::warn;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds geometry for a batch of independent relations.
///
/// Each relation is a self-contained computation over its own fragments,
/// so the batch runs in parallel when the `parallel` feature is enabled.
/// A relation that fails to assemble is logged and returned with its
/// `geom` unset; siblings are unaffected.
pub fn build_relations<B>(builder: &B, batch: Vec<(Relation, Vec<Fragment>)>) -> Vec<Relation>
where
    B: RelationBuilder + Sync,
{
    let build_one = |(mut relation, fragments): (Relation, Vec<Fragment>)| -> Relation {
        match builder.build_rings(fragments) {
            Ok(mut rings) => {
                if let Err(err) = builder.build_relation_geometry(&mut relation, &mut rings) {
                    warn!("relation {}: geometry build failed: {}", relation.id, err);
                }
            }
            Err(err) => {
                warn!("relation {}: ring assembly failed: {}", relation.id, err);
            }
        }
        relation
    };

    #[cfg(feature = "parallel")]
    {
        batch.into_par_iter().map(build_one).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        batch.into_iter().map(build_one).collect()
    }
}

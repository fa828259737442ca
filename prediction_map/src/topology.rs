//! How lanes relate to each other. Every relation is a directed edge stored on the reference
//! lane; nothing is inferred from edges stored the other way around.

use crate::{Lane, LaneID};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    Identical,
    Successor,
    Predecessor,
    LeftNeighbor,
    RightNeighbor,
}

impl Relation {
    /// Does `candidate` relate this way to `reference`, according to `reference`'s edges?
    pub fn holds(self, candidate: &LaneID, reference: &Lane) -> bool {
        match self {
            Relation::Identical => *candidate == reference.id,
            Relation::Successor => reference.successors.contains(candidate),
            Relation::Predecessor => reference.predecessors.contains(candidate),
            Relation::LeftNeighbor => reference.left_neighbors.contains(candidate),
            Relation::RightNeighbor => reference.right_neighbors.contains(candidate),
        }
    }
}

/// True if the candidate relates to any of the reference lanes.
///
/// With no reference lanes, there's no context to rule anything out, so this is always true --
/// even for a missing candidate. With some reference lanes, a missing candidate never relates.
pub fn is_related(relation: Relation, candidate: Option<&Lane>, references: &[&Lane]) -> bool {
    if references.is_empty() {
        return true;
    }
    let candidate = match candidate {
        Some(lane) => lane,
        None => return false,
    };
    references
        .iter()
        .any(|reference| relation.holds(&candidate.id, reference))
}

//! Annotation builders and generation pruning.
//!
//! Builders compose the geometry helpers into named artifact sets without
//! touching the scene; [`insert_all`] places them. Every artifact's name and
//! metadata come from the same [`ArtifactId`](crate::naming::ArtifactId), so
//! the two can never disagree.

mod hole;
mod marker;
mod ranging;
pub mod regroup;
mod section;

pub use hole::{build_hole, size_label_position, HoleAnnotation};
pub use marker::{build_endpoint_markers, EndpointMarkers};
pub use ranging::{build_ranging, RangingAnnotation};
pub use regroup::{remove_empty_groups, retain_latest_generation};
pub use section::{build_cross_section, CrossSection};

use crate::scene::{NodeId, SceneNode, SceneRepository};

/// Insert `nodes` under `parent` in order and return their ids.
pub fn insert_all<S, I>(
    scene: &mut S,
    parent: Option<NodeId>,
    nodes: I,
) -> Vec<NodeId>
where
    S: SceneRepository + ?Sized,
    I: IntoIterator<Item = SceneNode>,
{
    nodes.into_iter().map(|n| scene.add(parent, n)).collect()
}

//! adgraph models how advertisement records that share attributes get linked
//! into one graph, and how that linkage snowballs into false positives at scale.
//!
//! It is the data side of an animated explainer: every stage is a pure function
//! and the renderer only ever sees read-only [`Snapshot`]s.
//!
//! # Pipeline overview
//!
//! 1. **Build**: `Record -> RecordGraph` (a star around the record's title)
//! 2. **Layout**: `RecordGraph + centers -> ClusterLayout` (circles around each center)
//! 3. **Match**: `[RecordGraph] + AttributeKind -> MatchSet` (exact value equality)
//! 4. **Merge**: `[RecordGraph] + MatchSet -> MergedGraph` (matched nodes collapse)
//!
//! [`Pipeline::run`] chains the four and snapshots each stage; [`tween`]
//! interpolates between successive snapshots.
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod graph;
mod layout;
mod matching;
mod merge;
mod scenario;
mod snapshot;

pub use animation::ease::Ease;
pub use animation::tween::{tween, tween_frames};
pub use foundation::core::{MemberRef, NodeId, NodeKey, NodeLeaf, Point, Vec2, centroid};
pub use foundation::error::{AdGraphError, AdGraphResult};
pub use graph::record::{AttributeKind, AttributeNode, Edge, Field, GraphView, Record, RecordGraph};
pub use layout::star::{
    ClusterLayout, StarLayout, layout_clusters, layout_star, positions_of, ring_centers,
    row_centers,
};
pub use matching::matcher::{MatchGroup, MatchSet, find_matches};
pub use merge::components::{Component, connected_components};
pub use merge::merger::{MergeInput, MergedGraph, Provenance, merge};
pub use scenario::ad_linkage::{SHARED_PHONE, ad_linkage};
pub use scenario::giant_component::{GiantComponentConfig, giant_component};
pub use scenario::model::{Scenario, ScenarioConfig};
pub use scenario::stolen_image::{STATE_LABEL, STOLEN_IMAGE, StolenImageConfig, stolen_image};
pub use snapshot::model::{Snapshot, SnapshotNode, Stage};
pub use snapshot::pipeline::{Pipeline, PipelineConfig, PipelineRun};

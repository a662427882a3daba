//! Layered topology graph: construction, weighting, tracing, interaction.

pub mod build;
pub mod component;
pub mod filter;
pub mod layout;
pub mod render;
pub mod snapshot;
pub mod surface;
pub mod trace;
pub mod types;
pub mod view;
pub mod weights;

pub use component::TopologyCanvas;
pub use filter::{DashboardFilter, FilterSelection};
pub use snapshot::{Snapshot, SnapshotError, fetch_snapshot};
pub use types::{GraphLink, GraphNode, TopologyGraph};

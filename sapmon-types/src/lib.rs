//! # sapmon-types
//!
//! Core types shared by the sapmon crates: the monitoring snapshot read from
//! `sapcontrol`, and the flat metric records produced from it.
//!
//! ## Design Goals
//!
//! - **No serialization framework required**: enable the `serde` feature when needed
//! - **Closed result set**: a snapshot is either a process list or an alert tree
//! - **Arena-backed alert tree**: nodes are addressed by id, parents by parent id
//! - **Deterministic records**: tags and fields are kept in sorted maps
//!
//! ## Features
//!
//! - `serde`: JSON (and other formats) via serde
//!
//! ## Example
//!
//! ```rust
//! use sapmon_types::{AlertNode, AlertTree, HealthState};
//!
//! let tree = AlertTree::new(vec![
//!     AlertNode::new(0, None, "SAP", HealthState::Green),
//!     AlertNode::new(1, Some(0), "Host", HealthState::Green),
//!     AlertNode::new(2, Some(1), "CPU", HealthState::Yellow).with_description("95 %"),
//! ])
//! .unwrap();
//!
//! let leaves = tree.leaves_under(0);
//! assert_eq!(leaves.len(), 1);
//! assert_eq!(leaves[0].name, "CPU");
//! ```

mod alert;
mod health;
mod metric;
mod process;
mod snapshot;

pub use alert::*;
pub use health::*;
pub use metric::*;
pub use process::*;
pub use snapshot::*;

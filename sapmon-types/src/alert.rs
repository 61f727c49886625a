//! CCMS alert tree.
//!
//! The tree is stored as an arena: nodes live in a flat vector in the order
//! sapcontrol reported them, and every node points at its parent by id.
//! Child lists are derived once at construction so walking down from a
//! configured root and walking up to the tree root are both index lookups.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::HealthState;

/// A single node of a `GetAlertTree` result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlertNode {
    pub id: i64,

    /// Id of the parent node. `None` for the tree root and for nodes whose
    /// parent could not be read.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent_id: Option<i64>,

    pub name: String,

    /// Current alert state of this node (sapcontrol's `ActualValue`).
    pub health_state: HealthState,

    /// Free-form value text, e.g. `95 %` or `Running`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,

    /// When the value was last reported.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub time: Option<DateTime<Utc>>,
}

impl AlertNode {
    pub fn new(
        id: i64,
        parent_id: Option<i64>,
        name: impl Into<String>,
        health_state: HealthState,
    ) -> Self {
        Self {
            id,
            parent_id,
            name: name.into(),
            health_state,
            description: String::new(),
            time: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

/// Returned by [`AlertTree::new`] when two nodes share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("duplicate alert node id {0}")]
pub struct DuplicateNodeId(pub i64);

/// Arena of alert nodes addressed by id.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "Vec<AlertNode>", into = "Vec<AlertNode>")
)]
pub struct AlertTree {
    nodes: Vec<AlertNode>,
    index: HashMap<i64, usize>,
    children: HashMap<i64, Vec<i64>>,
}

impl AlertTree {
    /// Build a tree from nodes in sapcontrol order.
    ///
    /// Children are listed in the order they appear in `nodes`.
    pub fn new(nodes: Vec<AlertNode>) -> Result<Self, DuplicateNodeId> {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut children: HashMap<i64, Vec<i64>> = HashMap::new();

        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id, pos).is_some() {
                return Err(DuplicateNodeId(node.id));
            }
            if let Some(parent) = node.parent_id {
                children.entry(parent).or_default().push(node.id);
            }
        }

        Ok(Self {
            nodes,
            index,
            children,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: i64) -> Option<&AlertNode> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    /// Iterate over all nodes in sapcontrol order.
    pub fn iter(&self) -> impl Iterator<Item = &AlertNode> {
        self.nodes.iter()
    }

    /// Ids of the direct children of `id`, in sapcontrol order.
    pub fn children(&self, id: i64) -> &[i64] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Nodes from the absolute tree root down to `id`, inclusive.
    ///
    /// Returns `None` when `id` is unknown, when an ancestor is missing from
    /// the arena, or when the parent chain loops.
    pub fn path_to_root(&self, id: i64) -> Option<Vec<&AlertNode>> {
        let mut path = Vec::new();
        let mut current = self.get(id)?;

        loop {
            path.push(current);
            if path.len() > self.nodes.len() {
                return None;
            }
            match current.parent_id {
                Some(parent) => current = self.get(parent)?,
                None => break,
            }
        }

        path.reverse();
        Some(path)
    }

    /// Terminal nodes beneath `root_id`, in pre-order discovery order.
    ///
    /// A root without children is its own leaf. An unknown root yields no
    /// nodes.
    pub fn leaves_under(&self, root_id: i64) -> Vec<&AlertNode> {
        let mut leaves = Vec::new();
        if !self.contains(root_id) {
            return leaves;
        }

        let mut visited = HashSet::new();
        let mut stack = vec![root_id];

        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let Some(node) = self.get(id) else {
                continue;
            };

            let children = self.children(id);
            if children.is_empty() {
                leaves.push(node);
            } else {
                stack.extend(children.iter().rev().copied());
            }
        }

        leaves
    }
}

impl TryFrom<Vec<AlertNode>> for AlertTree {
    type Error = DuplicateNodeId;

    fn try_from(nodes: Vec<AlertNode>) -> Result<Self, Self::Error> {
        AlertTree::new(nodes)
    }
}

impl From<AlertTree> for Vec<AlertNode> {
    fn from(tree: AlertTree) -> Self {
        tree.nodes
    }
}

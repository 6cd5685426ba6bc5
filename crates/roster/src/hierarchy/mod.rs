//! Reporting-forest construction over flat employee/position snapshots.
//!
//! # Arena model
//!
//! Records are placed in a petgraph `DiGraph` whose node weights are indexes
//! into the input slice, with a `HashMap<Id, NodeIndex>` for lookups. Edges
//! point **parent -> subordinate**. Subordinate lists are computed once at
//! build time, in input order, so `subordinates_of` never rescans the
//! collection.
//!
//! # Roots
//!
//! A record is a root when its parent reference is `None` or names an id that
//! is not in the snapshot. Dangling references are not errors.
//!
//! # Corrupt input
//!
//! The data service does not enforce acyclicity, so a snapshot may already
//! contain a loop of parent references. Members of such a loop (and anything
//! below them) are unreachable from every root; they are reported by
//! [`Hierarchy::detached`] and [`Hierarchy::cycles`] rather than silently
//! dropped.

mod guard;
mod tree;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::domain::HierarchyNode;
use crate::view::ExpansionState;

pub use guard::{check_manager_assignment, check_parent_assignment};
pub use tree::OrgTreeNode;

/// Summary of one reporting forest, as shown by `roster org check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructureReport {
    /// Collection name for display.
    pub kind: String,
    /// Number of distinct records.
    pub records: usize,
    /// Root ids in input order.
    pub roots: Vec<String>,
    /// `(id, missing parent id)` for parent references that point outside
    /// the snapshot.
    pub dangling: Vec<(String, String)>,
    /// Pre-existing loops.
    pub cycles: Vec<Vec<String>>,
}

/// A built reporting forest borrowing its records from a snapshot.
pub struct Hierarchy<'a, T: HierarchyNode> {
    /// Records in input order, duplicates removed. Node weight `i` refers to `records[i]`.
    records: Vec<&'a T>,
    graph: DiGraph<usize, ()>,
    node_map: HashMap<T::Id, NodeIndex>,
    roots: Vec<NodeIndex>,
    /// Memoized direct subordinates per node, in input order.
    children: Vec<Vec<NodeIndex>>,
}

impl<'a, T: HierarchyNode> Hierarchy<'a, T> {
    /// Build the forest from a snapshot.
    ///
    /// If an id occurs more than once, the first record wins and the rest are
    /// ignored.
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut unique = Vec::new();
        let mut graph = DiGraph::new();
        let mut node_map = HashMap::new();

        for record in records {
            if node_map.contains_key(record.node_id()) {
                tracing::warn!(
                    id = %record.node_id(),
                    "Duplicate id in snapshot, keeping first record"
                );
                continue;
            }
            let node = graph.add_node(unique.len());
            node_map.insert(record.node_id().clone(), node);
            unique.push(record);
        }

        let mut roots = Vec::new();
        let mut children = vec![Vec::new(); unique.len()];

        for (index, record) in unique.iter().enumerate() {
            let node = NodeIndex::new(index);
            match record.parent_id().and_then(|p| node_map.get(p)) {
                Some(&parent) => {
                    graph.add_edge(parent, node, ());
                    children[parent.index()].push(node);
                }
                None => roots.push(node),
            }
        }

        tracing::debug!(
            records = unique.len(),
            roots = roots.len(),
            "Built reporting hierarchy"
        );

        Self {
            records: unique,
            graph,
            node_map,
            roots,
            children,
        }
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot was empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in input order.
    pub fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.records.iter().copied()
    }

    /// Whether `id` is part of the snapshot.
    pub fn contains(&self, id: &T::Id) -> bool {
        self.node_map.contains_key(id)
    }

    /// Look up a record by id.
    pub fn get(&self, id: &T::Id) -> Option<&'a T> {
        self.node_map.get(id).map(|&node| self.record(node))
    }

    /// Root records in input order.
    pub fn roots(&self) -> Vec<&'a T> {
        self.roots.iter().map(|&node| self.record(node)).collect()
    }

    /// Root identifiers in input order.
    pub fn root_ids(&self) -> Vec<&'a T::Id> {
        self.roots
            .iter()
            .map(|&node| self.record(node).node_id())
            .collect()
    }

    /// Direct subordinates of `id`, in input order. Unknown ids have none.
    pub fn subordinates_of(&self, id: &T::Id) -> Vec<&'a T> {
        self.node_map
            .get(id)
            .map(|&node| {
                self.children[node.index()]
                    .iter()
                    .map(|&child| self.record(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The resolved parent of `id` (`None` for roots and unknown ids).
    pub fn parent_of(&self, id: &T::Id) -> Option<&'a T> {
        let record = self.get(id)?;
        record.parent_id().and_then(|parent| self.get(parent))
    }

    /// Every record below `id`, depth-first in input order, each once.
    pub fn descendants_of(&self, id: &T::Id) -> Vec<&'a T> {
        let Some(&start) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut stack: Vec<NodeIndex> = self.children[start.index()]
            .iter()
            .rev()
            .copied()
            .collect();

        while let Some(node) = stack.pop() {
            if !visited.insert(node) {
                continue;
            }
            result.push(self.record(node));
            stack.extend(self.children[node.index()].iter().rev().copied());
        }

        result
    }

    /// The chain of resolved parents above `id`, nearest first.
    ///
    /// Stops at a root, or at the first repeated record if the snapshot
    /// already contains a loop.
    pub fn ancestors_of(&self, id: &T::Id) -> Vec<&'a T> {
        let Some(&start) = self.node_map.get(id) else {
            return Vec::new();
        };

        let mut result = Vec::new();
        let mut visited = HashSet::from([start]);
        let mut current = self.record(start);

        while let Some(&parent) = current.parent_id().and_then(|p| self.node_map.get(p)) {
            if !visited.insert(parent) {
                break;
            }
            current = self.record(parent);
            result.push(current);
        }

        result
    }

    /// Distance from `id` to its root (roots are at depth 0).
    pub fn depth_of(&self, id: &T::Id) -> Option<usize> {
        self.contains(id).then(|| self.ancestors_of(id).len())
    }

    /// Records not reachable from any root.
    ///
    /// Empty for every well-formed snapshot.
    pub fn detached(&self) -> Vec<&'a T> {
        let mut reachable = HashSet::new();
        for &root in &self.roots {
            let mut dfs = Dfs::new(&self.graph, root);
            while let Some(node) = dfs.next(&self.graph) {
                reachable.insert(node);
            }
        }

        self.graph
            .node_indices()
            .filter(|node| !reachable.contains(node))
            .map(|node| self.record(node))
            .collect()
    }

    /// Pre-existing parent-reference loops, each listed in input order.
    pub fn cycles(&self) -> Vec<Vec<&'a T::Id>> {
        let mut cycles: Vec<Vec<&'a T::Id>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || self.graph.find_edge(component[0], component[0]).is_some()
            })
            .map(|mut component| {
                component.sort_by_key(|node| node.index());
                component
                    .into_iter()
                    .map(|node| self.record(node).node_id())
                    .collect()
            })
            .collect();

        cycles.sort_by_key(|cycle| self.node_map.get(cycle[0]).map(|n| n.index()));
        cycles
    }

    /// Roots, dangling references and loops in one report.
    pub fn structure_report(&self, kind: &str) -> StructureReport {
        let dangling = self
            .records
            .iter()
            .filter_map(|record| {
                let parent = record.parent_id()?;
                (!self.contains(parent))
                    .then(|| (record.node_id().to_string(), parent.to_string()))
            })
            .collect();

        StructureReport {
            kind: kind.to_string(),
            records: self.len(),
            roots: self.root_ids().iter().map(ToString::to_string).collect(),
            dangling,
            cycles: self
                .cycles()
                .into_iter()
                .map(|cycle| cycle.iter().map(ToString::to_string).collect())
                .collect(),
        }
    }

    /// Project the whole forest into renderable tree nodes.
    ///
    /// With an expansion state, collapsed nodes keep their place but carry no
    /// children; their hidden direct-report count is recorded instead.
    pub fn to_tree(&self, expansion: Option<&ExpansionState<T::Id>>) -> Vec<OrgTreeNode> {
        self.roots
            .iter()
            .map(|&root| self.project(root, expansion, &mut HashSet::new()))
            .collect()
    }

    /// Project the subtree under `id` (inclusive). `None` for unknown ids.
    pub fn subtree(
        &self,
        id: &T::Id,
        expansion: Option<&ExpansionState<T::Id>>,
    ) -> Option<OrgTreeNode> {
        let &node = self.node_map.get(id)?;
        Some(self.project(node, expansion, &mut HashSet::new()))
    }

    fn project(
        &self,
        node: NodeIndex,
        expansion: Option<&ExpansionState<T::Id>>,
        path: &mut HashSet<NodeIndex>,
    ) -> OrgTreeNode {
        let record = self.record(node);
        let direct = &self.children[node.index()];
        let expanded = expansion.is_none_or(|state| state.is_expanded(record.node_id()));

        path.insert(node);
        let mut children = Vec::new();
        if expanded {
            for &child in direct {
                if !path.contains(&child) {
                    children.push(self.project(child, expansion, path));
                }
            }
        }
        path.remove(&node);

        OrgTreeNode {
            id: record.node_id().to_string(),
            label: record.label().to_string(),
            subtitle: record.subtitle(),
            hidden_reports: if expanded { 0 } else { direct.len() },
            children,
        }
    }

    fn record(&self, node: NodeIndex) -> &'a T {
        self.records[self.graph[node]]
    }
}

//! Per-node expand/collapse flags.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::domain::HierarchyNode;
use crate::hierarchy::Hierarchy;

/// Expanded/collapsed flag per node id. Unknown ids are collapsed.
#[derive(Debug, Clone, Default)]
pub struct ExpansionState<Id> {
    flags: HashMap<Id, bool>,
}

impl<Id> ExpansionState<Id>
where
    Id: Clone + Eq + Hash + Ord,
{
    /// A state with every node collapsed.
    pub fn new() -> Self {
        Self {
            flags: HashMap::new(),
        }
    }

    /// Whether `id` is expanded.
    pub fn is_expanded(&self, id: &Id) -> bool {
        self.flags.get(id).copied().unwrap_or(false)
    }

    /// Expanded ids in ascending order.
    pub fn expanded_ids(&self) -> Vec<&Id> {
        let mut ids: Vec<&Id> = self
            .flags
            .iter()
            .filter_map(|(id, &expanded)| expanded.then_some(id))
            .collect();
        ids.sort();
        ids
    }

    /// Expand a single node. Its descendants keep their own flags.
    pub fn expand(&mut self, id: &Id) {
        self.flags.insert(id.clone(), true);
    }

    /// Collapse `id` and everything below it, so re-expanding shows only the
    /// direct reports.
    pub fn collapse<T>(&mut self, id: &Id, hierarchy: &Hierarchy<'_, T>)
    where
        T: HierarchyNode<Id = Id>,
    {
        self.flags.insert(id.clone(), false);
        for descendant in hierarchy.descendants_of(id) {
            self.flags.insert(descendant.node_id().clone(), false);
        }
    }

    /// Flip `id`: expand if collapsed, otherwise collapse it and its subtree.
    pub fn toggle<T>(&mut self, id: &Id, hierarchy: &Hierarchy<'_, T>)
    where
        T: HierarchyNode<Id = Id>,
    {
        if self.is_expanded(id) {
            self.collapse(id, hierarchy);
        } else {
            self.expand(id);
        }
    }

    /// Expand every node in the hierarchy.
    pub fn expand_all<T>(&mut self, hierarchy: &Hierarchy<'_, T>)
    where
        T: HierarchyNode<Id = Id>,
    {
        for record in hierarchy.iter() {
            self.flags.insert(record.node_id().clone(), true);
        }
    }

    /// Collapse every node.
    pub fn collapse_all(&mut self) {
        self.flags.clear();
    }

    /// Expand exactly the nodes above `depth`, so `depth` levels are visible
    /// below the roots. Depth 0 shows only the roots.
    pub fn expand_to_depth<T>(&mut self, hierarchy: &Hierarchy<'_, T>, depth: usize)
    where
        T: HierarchyNode<Id = Id>,
    {
        self.flags.clear();
        for record in hierarchy.iter() {
            let id = record.node_id();
            let expanded = hierarchy.depth_of(id).is_some_and(|d| d < depth);
            self.flags.insert(id.clone(), expanded);
        }
    }

    /// Like [`expand_to_depth`](Self::expand_to_depth), counting levels from
    /// `root` instead of from the forest roots. Nodes outside the subtree are
    /// collapsed.
    pub fn expand_subtree_to_depth<T>(
        &mut self,
        root: &Id,
        hierarchy: &Hierarchy<'_, T>,
        depth: usize,
    ) where
        T: HierarchyNode<Id = Id>,
    {
        self.flags.clear();
        let Some(base) = hierarchy.depth_of(root) else {
            return;
        };
        if depth > 0 {
            self.flags.insert(root.clone(), true);
        }
        for record in hierarchy.descendants_of(root) {
            let id = record.node_id();
            let relative = hierarchy.depth_of(id).map_or(usize::MAX, |d| d.saturating_sub(base));
            self.flags.insert(id.clone(), relative < depth);
        }
    }

    /// Ids currently on screen: roots, then the subordinates of every
    /// expanded visible node, in display order.
    pub fn visible_ids<T>(&self, hierarchy: &Hierarchy<'_, T>) -> Vec<Id>
    where
        T: HierarchyNode<Id = Id>,
    {
        let mut visible = Vec::new();
        let mut stack: Vec<&T> = hierarchy.roots().into_iter().rev().collect();
        let mut seen = HashSet::new();

        while let Some(record) = stack.pop() {
            let id = record.node_id();
            if !seen.insert(id.clone()) {
                continue;
            }
            visible.push(id.clone());
            if self.is_expanded(id) {
                stack.extend(hierarchy.subordinates_of(id).into_iter().rev());
            }
        }

        visible
    }
}

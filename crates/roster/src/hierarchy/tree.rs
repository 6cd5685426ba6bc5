//! Renderable projection of a reporting forest.

use serde::Serialize;

/// One node of a projected org tree, with its visible children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgTreeNode {
    /// Record identifier.
    pub id: String,
    /// Primary text (name or title).
    pub label: String,
    /// Secondary text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Direct reports hidden because this node is collapsed.
    #[serde(skip_serializing_if = "is_zero")]
    pub hidden_reports: usize,
    /// Visible direct reports.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<OrgTreeNode>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_zero(n: &usize) -> bool {
    *n == 0
}

impl OrgTreeNode {
    /// Number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(id: &str) -> OrgTreeNode {
        OrgTreeNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            subtitle: None,
            hidden_reports: 0,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_count_includes_every_descendant() {
        let mut mid = leaf("b");
        mid.children.push(leaf("c"));
        let mut root = leaf("a");
        root.children = vec![mid, leaf("d")];

        assert_eq!(root.count(), 4);
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let json = serde_json::to_value(leaf("a")).unwrap();
        assert_eq!(json, serde_json::json!({"id": "a", "label": "A"}));
    }
}

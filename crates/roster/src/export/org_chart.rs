//! Org chart as an indented text tree.
//!
//! ```text
//! Dana Ruiz (CEO) [acme-0a1b]
//! ├─ Lee Park (CTO, Engineering) [acme-2c3d]
//! │  └─ Sam Ode (Engineer, Engineering) [acme-4e5f]
//! └─ Kim Vo (CFO, Finance) [acme-6a7b] (+2 hidden)
//! ```

use serde_json::Value;

use crate::hierarchy::OrgTreeNode;

/// Branch glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connectors {
    /// Non-last child.
    pub branch: &'static str,
    /// Last child.
    pub corner: &'static str,
    /// Continuation under a non-last ancestor.
    pub pipe: &'static str,
    /// Continuation under a last ancestor.
    pub space: &'static str,
}

impl Connectors {
    /// Box-drawing connectors.
    pub const UNICODE: Self = Self {
        branch: "├─ ",
        corner: "└─ ",
        pipe: "│  ",
        space: "   ",
    };

    /// ASCII-only connectors.
    pub const ASCII: Self = Self {
        branch: "|- ",
        corner: "`- ",
        pipe: "|  ",
        space: "   ",
    };

    /// Pick the set for the terminal.
    pub fn for_ascii(use_ascii: bool) -> Self {
        if use_ascii { Self::ASCII } else { Self::UNICODE }
    }
}

/// Render a forest. Roots are unprefixed; an empty forest renders as an
/// empty string.
pub fn render_org_chart(roots: &[OrgTreeNode], connectors: Connectors) -> String {
    let mut lines = Vec::new();
    walk_org_chart(roots, connectors, |prefix, node| {
        lines.push(format!("{prefix}{}", node_line(node)));
    });
    lines.join("\n")
}

/// Visit every node depth-first, in sibling order, together with the
/// connector prefix drawn before it. Roots get an empty prefix.
pub fn walk_org_chart<F>(roots: &[OrgTreeNode], connectors: Connectors, mut visit: F)
where
    F: FnMut(&str, &OrgTreeNode),
{
    for root in roots {
        visit("", root);
        walk_children(&root.children, &mut Vec::new(), connectors, &mut visit);
    }
}

/// `prefix_segments` records, per ancestor level, whether more siblings
/// follow, which decides between a `│` continuation and blank space.
fn walk_children<F>(
    children: &[OrgTreeNode],
    prefix_segments: &mut Vec<bool>,
    connectors: Connectors,
    visit: &mut F,
) where
    F: FnMut(&str, &OrgTreeNode),
{
    for (i, child) in children.iter().enumerate() {
        let is_last = i + 1 == children.len();

        let mut prefix: String = prefix_segments
            .iter()
            .map(|&has_more| if has_more { connectors.pipe } else { connectors.space })
            .collect();
        prefix.push_str(if is_last { connectors.corner } else { connectors.branch });
        visit(&prefix, child);

        prefix_segments.push(!is_last);
        walk_children(&child.children, prefix_segments, connectors, visit);
        prefix_segments.pop();
    }
}

fn node_line(node: &OrgTreeNode) -> String {
    let mut line = node.label.clone();
    if let Some(subtitle) = &node.subtitle {
        line.push_str(&format!(" ({subtitle})"));
    }
    line.push_str(&format!(" [{}]", node.id));
    if node.hidden_reports > 0 {
        line.push_str(&format!(" (+{} hidden)", node.hidden_reports));
    }
    line
}

/// The forest as a JSON array.
pub fn org_chart_json(roots: &[OrgTreeNode]) -> Value {
    serde_json::to_value(roots).unwrap_or_else(|_| Value::Array(Vec::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, children: Vec<OrgTreeNode>) -> OrgTreeNode {
        OrgTreeNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            subtitle: None,
            hidden_reports: 0,
            children,
        }
    }

    fn sample() -> Vec<OrgTreeNode> {
        let mut cfo = node("cfo", Vec::new());
        cfo.hidden_reports = 2;
        cfo.subtitle = Some("Finance".to_string());
        vec![node(
            "ceo",
            vec![node("cto", vec![node("dev", Vec::new())]), cfo],
        )]
    }

    #[test]
    fn test_unicode_rendering() {
        let expected = "\
CEO [ceo]
├─ CTO [cto]
│  └─ DEV [dev]
└─ CFO (Finance) [cfo] (+2 hidden)";
        assert_eq!(render_org_chart(&sample(), Connectors::UNICODE), expected);
    }

    #[test]
    fn test_ascii_rendering() {
        let text = render_org_chart(&sample(), Connectors::ASCII);
        assert!(text.contains("|- CTO [cto]"));
        assert!(text.contains("|  `- DEV [dev]"));
        assert!(text.is_ascii());
    }

    #[test]
    fn test_multiple_roots_and_empty_forest() {
        let roots = vec![node("a", Vec::new()), node("b", Vec::new())];
        assert_eq!(render_org_chart(&roots, Connectors::UNICODE), "A [a]\nB [b]");
        assert_eq!(render_org_chart(&[], Connectors::UNICODE), "");
    }

    #[test]
    fn test_walk_visits_depth_first_with_prefixes() {
        let mut visited = Vec::new();
        walk_org_chart(&sample(), Connectors::ASCII, |prefix, node| {
            visited.push(format!("{prefix}{}", node.id));
        });
        assert_eq!(visited, ["ceo", "|- cto", "|  `- dev", "`- cfo"]);
    }

    #[test]
    fn test_json_shape() {
        let json = org_chart_json(&sample());
        assert_eq!(json[0]["children"][1]["hidden_reports"], 2);
        assert_eq!(json[0]["children"][0]["children"][0]["id"], "dev");
    }
}

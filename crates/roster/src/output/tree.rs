//! Org chart rendering for `roster org tree`.

use std::io::{self, Write};

use colored::Colorize;

use super::color::{bold, colorize_id, dimmed, warning};
use super::{OutputConfig, OutputMode};
use crate::export::{org_chart_json, walk_org_chart, Connectors};
use crate::hierarchy::{OrgTreeNode, StructureReport};

/// Print a forest to stdout.
///
/// ```text
/// Dana Ruiz  CEO  acme-0a1b
/// ├─ Lee Park  CTO, Engineering  acme-2c3d
/// │  └─ Sam Ode  Engineer, Engineering  acme-4e5f
/// └─ Kim Vo  CFO, Finance  acme-6a7b (+2 hidden)
/// ```
pub fn print_org_tree(roots: &[OrgTreeNode], mode: OutputMode) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let config = OutputConfig::from_env();

    match mode {
        OutputMode::Text => write_org_tree(&mut handle, roots, &config),
        OutputMode::Json => {
            let output = serde_json::to_string_pretty(&org_chart_json(roots))
                .map_err(io::Error::other)?;
            writeln!(handle, "{output}")
        }
    }
}

/// Write the colored text form of a forest.
pub fn write_org_tree<W: Write>(
    w: &mut W,
    roots: &[OrgTreeNode],
    config: &OutputConfig,
) -> io::Result<()> {
    if roots.is_empty() {
        return writeln!(w, "No records to chart.");
    }

    let mut lines = Vec::new();
    walk_org_chart(roots, Connectors::for_ascii(config.use_ascii), |prefix, node| {
        let mut line = if prefix.is_empty() {
            String::new()
        } else {
            dimmed(prefix, config)
        };
        line.push_str(&format_node(node, config));
        lines.push(line);
    });

    for line in lines {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

fn format_node(node: &OrgTreeNode, config: &OutputConfig) -> String {
    let mut line = bold(&node.label, config);
    if let Some(subtitle) = &node.subtitle {
        line.push_str("  ");
        line.push_str(&dimmed(subtitle, config));
    }
    line.push_str("  ");
    line.push_str(&colorize_id(&node.id, config));
    if node.hidden_reports > 0 {
        let hidden = format!(" (+{} hidden)", node.hidden_reports);
        line.push_str(&if config.use_colors {
            hidden.italic().to_string()
        } else {
            hidden
        });
    }
    line
}

/// Print the roots, dangling references and loops found by `org check`.
pub fn write_structure_report<W: Write>(
    w: &mut W,
    report: &StructureReport,
    config: &OutputConfig,
) -> io::Result<()> {
    writeln!(
        w,
        "{} {} record(s), {} root(s)",
        bold(&report.kind, config),
        report.records,
        report.roots.len()
    )?;
    for root in &report.roots {
        writeln!(w, "  {} {}", dimmed("root:", config), colorize_id(root, config))?;
    }
    for (id, missing) in &report.dangling {
        writeln!(
            w,
            "  {} {} refers to missing {}",
            warning("dangling:", config),
            colorize_id(id, config),
            colorize_id(missing, config)
        )?;
    }
    for cycle in &report.cycles {
        writeln!(
            w,
            "  {} {}",
            warning("loop:", config),
            cycle.join(" -> ")
        )?;
    }
    if report.dangling.is_empty() && report.cycles.is_empty() {
        writeln!(w, "  no problems found")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> OutputConfig {
        OutputConfig::new(false, false)
    }

    fn node(id: &str, children: Vec<OrgTreeNode>) -> OrgTreeNode {
        OrgTreeNode {
            id: id.to_string(),
            label: id.to_uppercase(),
            subtitle: None,
            hidden_reports: 0,
            children,
        }
    }

    #[test]
    fn test_text_tree() {
        let roots = vec![node(
            "a",
            vec![node("b", vec![node("c", vec![])]), node("d", vec![])],
        )];
        let mut out = Vec::new();
        write_org_tree(&mut out, &roots, &plain()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "A  a\n├─ B  b\n│  └─ C  c\n└─ D  d\n");
    }

    #[test]
    fn test_empty_forest_message() {
        let mut out = Vec::new();
        write_org_tree(&mut out, &[], &plain()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No records to chart.\n");
    }

    #[test]
    fn test_structure_report_lists_problems() {
        let report = StructureReport {
            kind: "Employees".to_string(),
            records: 3,
            roots: vec!["a".to_string()],
            dangling: vec![("b".to_string(), "gone".to_string())],
            cycles: vec![vec!["x".to_string(), "y".to_string()]],
        };
        let mut out = Vec::new();
        write_structure_report(&mut out, &report, &plain()).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("dangling: b refers to missing gone"));
        assert!(text.contains("loop: x -> y"));
    }
}

//! Graph export for visualisation tools (JSON node/edge lists, DOT, Mermaid).

use std::fmt::Write as _;

use itertools::Itertools;
use serde::Serialize;

use super::filter::{SkillStatus, classify};
use super::graph::SkillGraph;
use super::state::ProfileState;

/// Output format for [`GraphExport::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Dot,
    Mermaid,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "dot" | "graphviz" => Ok(Self::Dot),
            "mermaid" => Ok(Self::Mermaid),
            other => Err(format!("unknown export format '{other}' (expected json, dot, mermaid)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportNode {
    pub id: String,
    pub label: String,
    pub category: String,
    pub proficiency: u8,
    pub status: SkillStatus,
    pub is_aspirational: bool,
    pub level: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub required_proficiency: u8,
    pub satisfied: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Snapshot of nodes and edges with derived status, ready for a renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl GraphExport {
    #[must_use]
    pub fn build(state: &ProfileState, learned_threshold: u8) -> Self {
        let graph = SkillGraph::new(state);
        let levels = graph.dependency_levels();

        let nodes = state
            .nodes()
            .map(|node| ExportNode {
                id: node.id().to_string(),
                label: node.name().to_string(),
                category: node.category().to_string(),
                proficiency: node.proficiency().unwrap_or(0),
                status: classify(&graph, node, learned_threshold),
                is_aspirational: node.is_aspirational(),
                level: levels.get(node.id()).copied().unwrap_or(0),
            })
            .collect();

        let edges = state
            .skill_dependencies
            .iter()
            .map(|dep| ExportEdge {
                id: format!("{}-{}", dep.from_skill_id, dep.to_skill_id),
                source: dep.from_skill_id.clone(),
                target: dep.to_skill_id.clone(),
                required_proficiency: dep.threshold(),
                satisfied: graph.is_satisfied(dep),
                description: dep.description.clone().unwrap_or_default(),
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn render(&self, format: ExportFormat) -> crate::Result<String> {
        match format {
            ExportFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            ExportFormat::Dot => Ok(self.to_dot()),
            ExportFormat::Mermaid => Ok(self.to_mermaid()),
        }
    }

    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph skills {\n    rankdir=LR;\n");
        for node in &self.nodes {
            let _ = writeln!(
                out,
                "    \"{}\" [label=\"{}\", status=\"{}\"{}];",
                escape_dot(&node.id),
                escape_dot(&node.label),
                node.status,
                if node.is_aspirational { ", style=dashed" } else { "" }
            );
        }
        for edge in &self.edges {
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                escape_dot(&edge.source),
                escape_dot(&edge.target),
                edge.required_proficiency
            );
        }
        out.push('}');
        out
    }

    #[must_use]
    pub fn to_mermaid(&self) -> String {
        let node_lines = self.nodes.iter().map(|node| {
            format!(
                "    {}[\"{}\"]:::{}",
                mermaid_id(&node.id),
                node.label.replace('"', "'"),
                node.status
            )
        });
        let edge_lines = self.edges.iter().map(|edge| {
            format!(
                "    {} -->|{}| {}",
                mermaid_id(&edge.source),
                edge.required_proficiency,
                mermaid_id(&edge.target)
            )
        });
        format!(
            "graph LR\n{}",
            node_lines.chain(edge_lines).join("\n")
        )
    }
}

fn escape_dot(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

fn mermaid_id(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::StateBuilder;

    fn sample() -> ProfileState {
        StateBuilder::new()
            .skill("html", 8)
            .skill("css", 2)
            .aspirational("rest-apis")
            .edge_with("html", "css", 6)
            .edge("css", "rest-apis")
            .build()
    }

    #[test]
    fn test_build_export() {
        let export = GraphExport::build(&sample(), 5);
        assert_eq!(export.nodes.len(), 3);
        assert_eq!(export.edges.len(), 2);

        let html = &export.nodes[0];
        assert_eq!(html.status, SkillStatus::Learned);
        assert_eq!(html.level, 0);
        assert_eq!(export.nodes[1].level, 1);
        assert!(export.nodes[2].is_aspirational);

        assert_eq!(export.edges[0].id, "html-css");
        assert!(export.edges[0].satisfied);
        assert_eq!(export.edges[1].required_proficiency, 1);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = GraphExport::build(&sample(), 5)
            .render(ExportFormat::Json)
            .unwrap();
        assert!(json.contains("\"isAspirational\": true"));
        assert!(json.contains("\"requiredProficiency\": 6"));
    }

    #[test]
    fn test_dot_output() {
        let dot = GraphExport::build(&sample(), 5).to_dot();
        assert!(dot.starts_with("digraph skills {"));
        assert!(dot.contains("\"html\" -> \"css\" [label=\"6\"];"));
        assert!(dot.contains("style=dashed"));
        assert!(dot.ends_with('}'));
    }

    #[test]
    fn test_mermaid_output() {
        let mermaid = GraphExport::build(&sample(), 5).to_mermaid();
        assert!(mermaid.starts_with("graph LR\n"));
        assert!(mermaid.contains("rest_apis[\"REST-APIS\"]:::aspirational"));
        assert!(mermaid.contains("css -->|1| rest_apis"));
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("DOT".parse::<ExportFormat>().unwrap(), ExportFormat::Dot);
        assert!("svg".parse::<ExportFormat>().is_err());
    }
}

use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::core::filter::SkillStatus;
use crate::core::skill::SkillNode;
use crate::error::{Result, SgError, StructuredError};

pub fn emit_json<T: Serialize>(value: &T) -> Result<()> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| SgError::Storage(format!("serialize output: {err}")))?;
    println!("{payload}");
    Ok(())
}

/// Print `err` the way the active output mode expects.
pub fn emit_error(err: &SgError, json: bool) {
    if json {
        let structured = StructuredError::from_sg_error(err);
        match serde_json::to_string_pretty(&serde_json::json!({ "error": structured })) {
            Ok(payload) => println!("{payload}"),
            Err(_) => println!("{{\"error\": {{\"message\": \"{err}\"}}}}"),
        }
    } else {
        eprintln!("{} {err}", "Error:".red().bold());
        let suggestion = err.suggestion();
        if !suggestion.is_empty() {
            eprintln!("{} {suggestion}", "Hint:".dimmed());
        }
    }
}

pub struct HumanLayout {
    lines: Vec<String>,
    key_width: usize,
}

impl Default for HumanLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanLayout {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            key_width: 14,
        }
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        self.lines.push(text.bold().to_string());
        self.lines.push(String::new());
        self
    }

    pub fn section(&mut self, text: &str) -> &mut Self {
        self.lines.push(text.bold().to_string());
        self.lines.push("-".repeat(text.len().max(3)));
        self
    }

    pub fn kv(&mut self, key: &str, value: &str) -> &mut Self {
        self.lines.push(format!(
            "{:width$} {value}",
            key.dimmed(),
            width = self.key_width
        ));
        self
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.lines.push(format!("- {text}"));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn push_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    #[must_use]
    pub fn build(self) -> String {
        self.lines.join("\n")
    }
}

pub fn emit_human(layout: HumanLayout) {
    println!("{}", layout.build());
}

/// Colored status label.
#[must_use]
pub fn status_label(status: SkillStatus) -> ColoredString {
    match status {
        SkillStatus::Learned => status.as_str().green(),
        SkillStatus::Available => status.as_str().cyan(),
        SkillStatus::Blocked => status.as_str().red(),
        SkillStatus::Aspirational => status.as_str().magenta(),
    }
}

/// One-line summary of a node: `name (id) [category]`.
#[must_use]
pub fn node_line(node: SkillNode<'_>) -> String {
    match node.proficiency() {
        Some(p) => format!("{} ({}) [{}] {p}/10", node.name().bold(), node.id(), node.category()),
        None => format!("{} ({}) [{}]", node.name().bold(), node.id(), node.category()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_layout_builds_lines() {
        colored::control::set_override(false);
        let mut layout = HumanLayout::new();
        layout.title("Skill").kv("Id", "rust").bullet("one").blank();
        let text = layout.build();
        assert!(text.starts_with("Skill\n\n"));
        assert!(text.contains("Id             rust"));
        assert!(text.contains("- one"));
    }
}

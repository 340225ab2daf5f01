//! Property-based tests for safety - engine queries never panic on inconsistent state.

use proptest::prelude::*;

use skillgraph::core::export::{ExportFormat, GraphExport};
use skillgraph::core::graph::SkillGraph;
use skillgraph::pool::{parse_pool_csv, parse_pool_json};
use skillgraph::test_utils::fixtures::StateBuilder;

fn arb_id() -> impl Strategy<Value = String> {
    prop_oneof![Just("a"), Just("b"), Just("c"), Just("d"), Just("ghost")].prop_map(String::from)
}

proptest! {
    /// Edges may be cyclic and may dangle; every query must still terminate.
    #[test]
    fn queries_are_total(
        edges in prop::collection::vec((arb_id(), arb_id()), 0..16),
        query_id in arb_id(),
    ) {
        let mut builder = StateBuilder::new().skills(&["a", "b"], 3).aspirational("c");
        for (from, to) in &edges {
            builder = builder.edge(from, to);
        }
        let state = builder.build();
        let graph = SkillGraph::new(&state);

        let _ = graph.would_create_cycle(&query_id, "a");
        let _ = graph.learning_path(&query_id);
        let _ = graph.dependency_levels();
        let _ = graph.dependency_level(&query_id);
        let _ = graph.critical_skills(5);
        let _ = graph.prerequisite_candidates(&query_id);
        let _ = graph.dependent_candidates(&query_id);
        let _ = graph.unmet_requirements(&query_id);
        let stats = graph.stats(5);
        prop_assert_eq!(stats.available + stats.blocked, 2);

        for format in [ExportFormat::Json, ExportFormat::Dot, ExportFormat::Mermaid] {
            prop_assert!(GraphExport::build(&state, 5).render(format).is_ok());
        }
    }

    #[test]
    fn pool_parser_never_panics(text in ".{0,200}") {
        let _ = parse_pool_json(&text);
    }

    #[test]
    fn csv_rows_keep_their_order(names in prop::collection::vec("[A-Za-z][A-Za-z ]{0,12}", 1..8)) {
        let mut text = String::from("name,proficiency\n");
        for name in &names {
            text.push_str(&format!("{name},3x\n"));
        }
        let items = parse_pool_csv(&text).unwrap();
        prop_assert_eq!(items.len(), names.len());
        for (item, name) in items.iter().zip(&names) {
            prop_assert_eq!(&item.name, name.trim());
            prop_assert_eq!(item.proficiency, Some(3));
        }
    }

    #[test]
    fn pool_entries_always_get_a_slug(names in prop::collection::vec(".{0,20}", 0..6)) {
        let entries: Vec<serde_json::Value> = names
            .iter()
            .map(|n| serde_json::json!({ "name": n, "proficiency": 3 }))
            .collect();
        let items = parse_pool_json(&serde_json::to_string(&entries).unwrap()).unwrap();
        for item in items {
            let id = item.id.unwrap();
            prop_assert!(!id.is_empty());
            prop_assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        }
    }
}

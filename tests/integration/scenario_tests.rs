use skillgraph::SgError;
use skillgraph::core::skill::SkillUpdate;
use skillgraph::core::{ExportFormat, GraphExport, SkillFilter, SkillStatus};
use skillgraph::store::DependencyUpdate;

use super::fixture::{StoreFixture, pairs};

#[test]
fn test_cycle_rejection_leaves_edges_unchanged() {
    let mut fx = StoreFixture::new()
        .with_skills(&[("A", 1), ("B", 1), ("C", 1)])
        .with_edges(&[("A", "B"), ("B", "C")]);

    assert!(fx.store.graph().would_create_cycle("C", "A"));
    let err = fx
        .store
        .add_skill_dependency("C", "A", None, None)
        .unwrap_err();
    assert!(matches!(err, SgError::CircularDependency { ref from, ref to } if from == "C" && to == "A"));
    assert_eq!(fx.edges(), pairs(&[("A", "B"), ("B", "C")]));
}

#[test]
fn test_duplicate_edge_added_once() {
    let mut fx = StoreFixture::new().with_skills(&[("A", 1), ("B", 1)]);
    assert!(fx.store.add_skill_dependency("A", "B", None, None).unwrap());
    assert!(!fx.store.add_skill_dependency("A", "B", None, None).unwrap());
    assert_eq!(fx.edges(), pairs(&[("A", "B")]));
}

#[test]
fn test_cascade_delete_removes_every_edge() {
    let mut fx = StoreFixture::new()
        .with_skills(&[("A", 1), ("B", 1), ("C", 1)])
        .with_edges(&[("A", "B"), ("B", "C")]);

    assert!(fx.store.remove_skill("B"));
    assert!(fx.store.graph().dependencies_touching("B").is_empty());
    assert!(fx.edges().is_empty());
}

#[test]
fn test_learning_path_places_prerequisites_first() {
    let fx = StoreFixture::new()
        .with_skills(&[("A", 1), ("B", 1), ("C", 1)])
        .with_edges(&[("A", "C"), ("B", "C")]);

    let path: Vec<&str> = fx
        .store
        .graph()
        .learning_path("C")
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(path.len(), 3);
    assert_eq!(path.last(), Some(&"C"));
    assert!(path.contains(&"A"));
    assert!(path.contains(&"B"));
}

#[test]
fn test_proficiency_threshold_controls_availability() {
    let mut fx = StoreFixture::new().with_skills(&[("A", 5), ("B", 0)]);
    fx.store
        .add_skill_dependency("A", "B", Some(6), None)
        .unwrap();

    let blocked: Vec<String> = fx.store.graph().blocked_skills().iter().map(|s| s.id.clone()).collect();
    assert_eq!(blocked, vec!["B"]);

    fx.store.update_skill("A", SkillUpdate::proficiency(6));
    let graph = fx.store.graph();
    assert!(graph.blocked_skills().is_empty());
    assert_eq!(graph.available_skills().len(), 2);
}

#[test]
fn test_critical_ranking_order() {
    let fx = StoreFixture::new()
        .with_skills(&[("A", 1), ("B", 1), ("C", 1), ("D", 1)])
        .with_skills(&[("x1", 1), ("x2", 1), ("x3", 1), ("x4", 1), ("x5", 1)])
        .with_edges(&[
            ("A", "x1"),
            ("A", "x2"),
            ("A", "x3"),
            ("B", "x1"),
            ("C", "x1"),
            ("C", "x2"),
            ("C", "x3"),
            ("C", "x4"),
            ("C", "x5"),
        ]);

    let ranked: Vec<(&str, usize)> = fx
        .store
        .graph()
        .critical_skills(4)
        .iter()
        .map(|c| (c.skill.id.as_str(), c.dependents))
        .collect();
    assert_eq!(ranked, vec![("C", 5), ("A", 3), ("B", 1), ("D", 0)]);
}

#[test]
fn test_converted_skill_is_not_gated_by_old_edges() {
    let mut fx = StoreFixture::new()
        .with_skills(&[("html", 2)])
        .with_aspirational("vue")
        .with_edges(&[("html", "vue")]);
    fx.store
        .update_skill_dependency("html", "vue", DependencyUpdate {
            required_proficiency: Some(6),
            description: None,
        });

    // aspirational nodes are never reported as available or blocked
    assert!(fx.store.graph().blocked_skills().is_empty());
    assert_eq!(fx.store.graph().available_skills().len(), 1);

    let new_id = fx.store.convert_aspirational_to_skill("vue", 1).unwrap();
    assert_ne!(new_id, "vue");
    assert_eq!(fx.edges(), pairs(&[("html", "vue")]));

    let graph = fx.store.graph();
    assert_eq!(graph.available_skills().len(), 2);
    assert_eq!(graph.dependency_level(&new_id), 0);
    assert_eq!(graph.learning_path(&new_id).len(), 1);
}

#[test]
fn test_filter_and_export_over_store_state() {
    let fx = StoreFixture::new()
        .with_skills(&[("html", 8), ("css", 0), ("react", 0)])
        .with_aspirational("rust")
        .with_edges(&[("html", "css"), ("css", "react")]);

    let state = fx.store.state();
    let blocked = SkillFilter::new().status(SkillStatus::Blocked).apply(state);
    assert_eq!(blocked.len(), 1);
    assert_eq!(blocked[0].id(), "react");

    let mermaid = GraphExport::build(state, 5)
        .render(ExportFormat::Mermaid)
        .unwrap();
    assert!(mermaid.contains("html -->|1| css"));
    assert!(mermaid.contains(":::aspirational"));
}

#[test]
fn test_every_mutation_writes_through() {
    let mut fx = StoreFixture::new().with_skills(&[("A", 1), ("B", 1)]);
    let before = fx.backend.save_count();

    fx.store.add_skill_dependency("A", "B", None, None).unwrap();
    fx.store.update_skill("A", SkillUpdate::proficiency(4));
    fx.store.remove_skill_dependency("A", "B");
    assert_eq!(fx.backend.save_count(), before + 3);

    let stored = fx.backend.snapshot().unwrap();
    assert_eq!(stored.skill("A").unwrap().proficiency, 4);
    assert!(stored.skill_dependencies.is_empty());
}

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;

use skillgraph::core::skill::NewSkill;
use skillgraph::storage::MemoryStorage;
use skillgraph::store::SkillStore;

const NODES: usize = 8;

fn id(n: usize) -> String {
    format!("s{n}")
}

fn store_with(proficiencies: &[u8]) -> SkillStore {
    let mut store = SkillStore::open(MemoryStorage::new());
    for (n, proficiency) in proficiencies.iter().enumerate() {
        let _ = store.add_skill(NewSkill::new(id(n), "Test", *proficiency).with_id(id(n)));
    }
    store
}

fn arb_edges() -> impl Strategy<Value = Vec<(usize, usize, Option<u8>)>> {
    prop::collection::vec((0..NODES, 0..NODES, prop::option::of(0u8..=10)), 0..40)
}

fn arb_proficiencies() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(0u8..=10, NODES)
}

/// Kahn's algorithm: true when every node can be removed in topological order.
fn is_acyclic(edges: &[(String, String)]) -> bool {
    let mut indegree: HashMap<&str, usize> = HashMap::new();
    for (from, to) in edges {
        indegree.entry(from).or_default();
        *indegree.entry(to).or_default() += 1;
    }
    let mut ready: Vec<&str> = indegree
        .iter()
        .filter(|(_, d)| **d == 0)
        .map(|(n, _)| *n)
        .collect();
    let mut removed = 0;
    while let Some(node) = ready.pop() {
        removed += 1;
        for (from, to) in edges {
            if from == node {
                let d = indegree.get_mut(to.as_str()).unwrap();
                *d -= 1;
                if *d == 0 {
                    ready.push(to);
                }
            }
        }
    }
    removed == indegree.len()
}

fn insert_all(store: &mut SkillStore, edges: &[(usize, usize, Option<u8>)]) {
    for (from, to, required) in edges {
        let _ = store.add_skill_dependency(&id(*from), &id(*to), *required, None);
    }
}

proptest! {
    #[test]
    fn accepted_edges_never_form_a_cycle(edges in arb_edges()) {
        let mut store = store_with(&[1; NODES]);
        insert_all(&mut store, &edges);

        let stored: Vec<(String, String)> = store
            .state()
            .skill_dependencies
            .iter()
            .map(|d| (d.from_skill_id.clone(), d.to_skill_id.clone()))
            .collect();
        prop_assert!(is_acyclic(&stored));

        let unique: HashSet<_> = stored.iter().collect();
        prop_assert_eq!(unique.len(), stored.len());
    }

    #[test]
    fn rejected_edge_changes_nothing(edges in arb_edges(), from in 0..NODES, to in 0..NODES) {
        let mut store = store_with(&[1; NODES]);
        insert_all(&mut store, &edges);
        let before = store.state().clone();

        if store.graph().would_create_cycle(&id(from), &id(to)) {
            prop_assert!(store.add_skill_dependency(&id(from), &id(to), None, None).is_err());
            prop_assert_eq!(store.state(), &before);
        }
    }

    #[test]
    fn available_and_blocked_partition_skills(
        proficiencies in arb_proficiencies(),
        edges in arb_edges(),
    ) {
        let mut store = store_with(&proficiencies);
        insert_all(&mut store, &edges);
        let graph = store.graph();

        let available: HashSet<&str> = graph.available_skills().into_iter().map(|s| s.id.as_str()).collect();
        let blocked: HashSet<&str> = graph.blocked_skills().into_iter().map(|s| s.id.as_str()).collect();
        prop_assert!(available.is_disjoint(&blocked));
        prop_assert_eq!(available.len() + blocked.len(), store.state().skills.len());
    }

    #[test]
    fn learning_path_respects_edges(edges in arb_edges(), target in 0..NODES) {
        let mut store = store_with(&[1; NODES]);
        insert_all(&mut store, &edges);
        let graph = store.graph();
        let target = id(target);
        let path: Vec<&str> = graph.learning_path(&target).into_iter().map(|s| s.id.as_str()).collect();

        prop_assert_eq!(path.last().copied(), Some(target.as_str()));
        let position: HashMap<&str, usize> = path.iter().enumerate().map(|(i, s)| (*s, i)).collect();
        prop_assert_eq!(position.len(), path.len());
        for dep in &store.state().skill_dependencies {
            if let (Some(a), Some(b)) = (
                position.get(dep.from_skill_id.as_str()),
                position.get(dep.to_skill_id.as_str()),
            ) {
                prop_assert!(a < b, "{} placed after {}", dep.from_skill_id, dep.to_skill_id);
            }
        }
    }

    #[test]
    fn levels_exceed_every_prerequisite(edges in arb_edges()) {
        let mut store = store_with(&[1; NODES]);
        insert_all(&mut store, &edges);
        let levels = store.graph().dependency_levels();

        for dep in &store.state().skill_dependencies {
            prop_assert!(levels[dep.to_skill_id.as_str()] > levels[dep.from_skill_id.as_str()]);
        }
    }

    #[test]
    fn critical_ranking_sorted_and_bounded(edges in arb_edges(), limit in 0usize..12) {
        let mut store = store_with(&[1; NODES]);
        insert_all(&mut store, &edges);
        let ranked = store.graph().critical_skills(limit);

        prop_assert!(ranked.len() <= limit.min(NODES));
        prop_assert!(ranked.windows(2).all(|w| w[0].dependents >= w[1].dependents));
    }
}

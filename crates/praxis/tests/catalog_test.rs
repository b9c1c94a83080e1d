use praxis::{
    Catalog, Category, DependencyEdge, Error, PracticeNode, SEED_ROOT_ID,
    build_tree_from_catalog,
};
use rustc_hash::FxHashSet as HashSet;

#[test]
fn catalog_rejects_duplicate_practice_ids() {
    let err = Catalog::new(
        vec![PracticeNode::new("a", "A"), PracticeNode::new("a", "Again")],
        Vec::new(),
    )
    .expect_err("duplicate id");
    assert!(matches!(err, Error::DuplicatePractice { ref id } if id == "a"));
}

#[test]
fn catalog_drops_repeated_edges() {
    let catalog = Catalog::new(
        vec![PracticeNode::new("a", "A"), PracticeNode::new("b", "B")],
        vec![DependencyEdge::new("a", "b"), DependencyEdge::new("a", "b")],
    )
    .expect("valid catalog");
    assert_eq!(catalog.edge_count(), 1);
    assert_eq!(catalog.dependencies_of("a").to_vec(), vec!["b".to_string()]);
    assert!(catalog.dependencies_of("b").is_empty());
}

#[test]
fn catalog_keeps_node_load_order() {
    let catalog = Catalog::new(
        vec![
            PracticeNode::new("z", "Z"),
            PracticeNode::new("a", "A"),
            PracticeNode::new("m", "M"),
        ],
        Vec::new(),
    )
    .expect("valid catalog");
    let ids: Vec<String> = catalog.get_all_nodes().into_iter().map(|n| n.id).collect();
    assert_eq!(ids, vec!["z", "a", "m"]);
}

#[test]
fn catalog_parses_camel_case_and_snake_case_edges() {
    let json = r#"{
        "practices": [
            {"id": "a", "name": "A", "category": "tooling"},
            {"id": "b", "name": "B"}
        ],
        "dependencies": [
            {"practiceId": "a", "dependsOnId": "b"},
            {"practice_id": "b", "depends_on_id": "a"}
        ]
    }"#;
    let catalog = Catalog::from_json(json).expect("valid JSON");
    assert_eq!(catalog.node_count(), 2);
    assert_eq!(catalog.edge_count(), 2);
    let a = catalog.node("a").expect("a exists");
    assert_eq!(a.category, Category::Tooling);
    assert!(a.requirements.is_empty());
    assert_eq!(catalog.node("b").expect("b exists").category, Category::Practice);
}

#[test]
fn catalog_reports_invalid_json() {
    assert!(matches!(
        Catalog::from_json("{\"practices\": 3}"),
        Err(Error::Json(_))
    ));
}

#[test]
fn catalog_round_trips_through_its_file_form() {
    let catalog = Catalog::seed().expect("seed catalog parses");
    let text = serde_json::to_string(&catalog.to_file()).expect("serializable");
    let again = Catalog::from_json(&text).expect("re-parses");
    assert_eq!(again.get_all_nodes(), catalog.get_all_nodes());
    assert_eq!(again.get_all_edges(), catalog.get_all_edges());
}

#[test]
fn seed_catalog_has_23_practices_and_42_edges() {
    let catalog = Catalog::seed().expect("seed catalog parses");
    assert_eq!(catalog.node_count(), 23);
    assert_eq!(catalog.edge_count(), 42);
    assert!(catalog.contains(SEED_ROOT_ID));
}

#[test]
fn seed_catalog_version_control_has_six_dependents() {
    let catalog = Catalog::seed().expect("seed catalog parses");
    assert_eq!(catalog.fan_in("version-control"), 6);
    assert_eq!(
        catalog.dependents_of("version-control"),
        vec![
            "continuous-integration",
            "trunk-based-development",
            "deployment-pipeline",
            "build-automation",
            "configuration-management",
            "infrastructure-as-code",
        ]
    );
    assert_eq!(catalog.fan_in(SEED_ROOT_ID), 0);
}

#[test]
fn seed_catalog_tree_fan_out_is_stable() {
    let catalog = Catalog::seed().expect("seed catalog parses");
    let outcome = build_tree_from_catalog(&catalog, SEED_ROOT_ID, 100);
    assert!(outcome.is_clean());
    let tree = outcome.tree.expect("seed root exists");

    let root_children: Vec<&str> = tree.children.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(
        root_children,
        vec![
            "continuous-integration",
            "deployment-pipeline",
            "automated-deployment",
            "monitoring",
            "team-ownership",
        ]
    );
    assert_eq!(tree.occurrence_count(), 73);

    let mut distinct: HashSet<&str> = HashSet::default();
    let mut max_level = 0;
    tree.walk(&mut |n| {
        distinct.insert(n.id.as_str());
        max_level = max_level.max(n.level);
    });
    assert_eq!(distinct.len(), 23);
    assert_eq!(max_level, 7);
}

#[test]
fn seed_catalog_levels_have_the_expected_widths() {
    let catalog = Catalog::seed().expect("seed catalog parses");
    let tree = build_tree_from_catalog(&catalog, SEED_ROOT_ID, 100)
        .tree
        .expect("seed root exists");
    let levels = praxis::flatten_to_levels(&tree);
    let widths: Vec<usize> = levels.levels().iter().map(Vec::len).collect();
    assert_eq!(widths, vec![1, 5, 14, 21, 19, 7, 4, 2]);
}

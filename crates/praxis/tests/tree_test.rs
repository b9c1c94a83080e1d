use praxis::catalog::{EdgesByParent, NodesById};
use praxis::{
    BranchCut, Catalog, DependencyEdge, PracticeNode, TreeNode, build_tree,
    build_tree_with_collapsed,
};
use rustc_hash::FxHashSet as HashSet;

fn catalog(ids: &[&str], edges: &[(&str, &str)]) -> Catalog {
    let nodes = ids
        .iter()
        .map(|id| PracticeNode::new(*id, id.to_uppercase()))
        .collect();
    let edges = edges
        .iter()
        .map(|(p, d)| DependencyEdge::new(*p, *d))
        .collect();
    Catalog::new(nodes, edges).expect("valid catalog")
}

fn indices(c: &Catalog) -> (&NodesById, &EdgesByParent) {
    (c.nodes_by_id(), c.edges_by_parent())
}

fn child_ids(node: &TreeNode) -> Vec<&str> {
    node.children.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn build_tree_returns_none_for_an_unknown_root() {
    let c = catalog(&["a"], &[]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("missing", nodes, edges, 100);
    assert!(outcome.tree.is_none());
    assert!(!outcome.is_found());
    assert!(outcome.is_clean());
}

#[test]
fn build_tree_returns_a_single_leaf_for_a_root_without_dependencies() {
    let c = catalog(&["a"], &[]);
    let (nodes, edges) = indices(&c);
    let tree = build_tree("a", nodes, edges, 100).tree.expect("root exists");
    assert_eq!(tree.id, "a");
    assert_eq!(tree.name, "A");
    assert_eq!(tree.level, 0);
    assert!(tree.is_leaf());
    assert_eq!(tree.cut, None);
}

#[test]
fn build_tree_keeps_children_in_edge_order_and_assigns_levels() {
    let c = catalog(&["a", "b", "c", "d"], &[("a", "c"), ("a", "b"), ("c", "d")]);
    let (nodes, edges) = indices(&c);
    let tree = build_tree("a", nodes, edges, 100).tree.expect("root exists");
    assert_eq!(child_ids(&tree), vec!["c", "b"]);
    assert_eq!(tree.children[0].level, 1);
    assert_eq!(child_ids(&tree.children[0]), vec!["d"]);
    assert_eq!(tree.children[0].children[0].level, 2);
}

#[test]
fn build_tree_expands_a_diamond_once_per_parent() {
    let c = catalog(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
    );
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 100);
    assert!(outcome.is_clean());
    let tree = outcome.tree.expect("root exists");
    assert_eq!(child_ids(&tree.children[0]), vec!["d"]);
    assert_eq!(child_ids(&tree.children[1]), vec!["d"]);
    assert_eq!(tree.occurrence_count(), 5);
}

#[test]
fn build_tree_yields_one_occurrence_per_root_to_node_path() {
    // Two diamonds stacked: 2 paths to d, each continuing through two paths to g.
    let c = catalog(
        &["a", "b", "c", "d", "e", "f", "g"],
        &[
            ("a", "b"),
            ("a", "c"),
            ("b", "d"),
            ("c", "d"),
            ("d", "e"),
            ("d", "f"),
            ("e", "g"),
            ("f", "g"),
        ],
    );
    let (nodes, edges) = indices(&c);
    let tree = build_tree("a", nodes, edges, 100).tree.expect("root exists");
    let mut g_count = 0;
    tree.walk(&mut |n| {
        if n.id == "g" {
            g_count += 1;
        }
    });
    assert_eq!(g_count, 4);
    // a + b + c + 2*(d + e + f + 2*g)
    assert_eq!(tree.occurrence_count(), 3 + 2 * (3 + 2));
}

#[test]
fn build_tree_terminates_on_a_two_node_cycle_and_reports_it() {
    let c = catalog(&["a", "b"], &[("a", "b"), ("b", "a")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 100);
    assert_eq!(outcome.cycles_encountered, vec!["a".to_string()]);
    let tree = outcome.tree.expect("root exists");
    let b = &tree.children[0];
    assert_eq!(b.id, "b");
    assert_eq!(b.cut, None);
    assert_eq!(child_ids(b), vec!["a"]);
    let closing = &b.children[0];
    assert_eq!(closing.cut, Some(BranchCut::Cycle));
    assert_eq!(closing.level, 2);
    assert!(closing.is_leaf());
}

#[test]
fn build_tree_includes_the_cycle_closing_node_as_a_terminal_leaf() {
    let c = catalog(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "b")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 100);
    assert_eq!(outcome.cycles_encountered, vec!["b".to_string()]);
    let tree = outcome.tree.expect("root exists");
    let leaf = &tree.children[0].children[0].children[0];
    assert_eq!(leaf.id, "b");
    assert_eq!(leaf.cut, Some(BranchCut::Cycle));
    assert_eq!(tree.occurrence_count(), 4);
}

#[test]
fn build_tree_treats_a_self_loop_as_a_cycle() {
    let c = catalog(&["a"], &[("a", "a")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 100);
    assert_eq!(outcome.cycles_encountered, vec!["a".to_string()]);
    let tree = outcome.tree.expect("root exists");
    assert_eq!(tree.children.len(), 1);
    assert_eq!(tree.children[0].cut, Some(BranchCut::Cycle));
}

#[test]
fn build_tree_does_not_let_one_branch_block_its_sibling() {
    // `c` is visited below `b`; it must still expand fully under the sibling `c` branch.
    let c = catalog(&["a", "b", "c", "d"], &[("a", "b"), ("a", "c"), ("b", "c"), ("c", "d")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 100);
    assert!(outcome.cycles_encountered.is_empty());
    let tree = outcome.tree.expect("root exists");
    assert_eq!(child_ids(&tree.children[0].children[0]), vec!["d"]);
    assert_eq!(child_ids(&tree.children[1]), vec!["d"]);
}

#[test]
fn build_tree_truncates_at_max_depth_and_reports_it() {
    let c = catalog(&["a", "b", "c", "d"], &[("a", "b"), ("b", "c"), ("c", "d")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 1);
    assert_eq!(outcome.depth_exceeded, vec!["b".to_string()]);
    let tree = outcome.tree.expect("root exists");
    let b = &tree.children[0];
    assert_eq!(b.cut, Some(BranchCut::DepthLimit));
    assert!(b.is_leaf());
}

#[test]
fn build_tree_with_zero_max_depth_keeps_only_the_root() {
    let c = catalog(&["a", "b"], &[("a", "b")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 0);
    assert_eq!(outcome.depth_exceeded, vec!["a".to_string()]);
    assert!(outcome.tree.expect("root exists").is_leaf());
}

#[test]
fn build_tree_does_not_report_leaves_at_max_depth() {
    let c = catalog(&["a", "b"], &[("a", "b")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 1);
    assert!(outcome.is_clean());
}

#[test]
fn build_tree_bounds_a_long_cycle_free_chain_by_max_depth() {
    let ids: Vec<String> = (0..300).map(|i| format!("n{i}")).collect();
    let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
    let edge_pairs: Vec<(&str, &str)> = id_refs.windows(2).map(|w| (w[0], w[1])).collect();
    let c = catalog(&id_refs, &edge_pairs);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("n0", nodes, edges, praxis::DEFAULT_MAX_DEPTH);
    assert_eq!(outcome.depth_exceeded, vec!["n100".to_string()]);
    assert_eq!(outcome.tree.expect("root exists").occurrence_count(), 101);
}

#[test]
fn build_tree_skips_and_reports_dependencies_missing_from_the_catalog() {
    let c = catalog(&["a", "b"], &[("a", "ghost"), ("a", "b")]);
    let (nodes, edges) = indices(&c);
    let outcome = build_tree("a", nodes, edges, 100);
    assert_eq!(outcome.missing_dependencies, vec!["ghost".to_string()]);
    assert_eq!(child_ids(&outcome.tree.expect("root exists")), vec!["b"]);
}

#[test]
fn build_tree_copies_practice_fields_into_each_occurrence() {
    let mut a = PracticeNode::new("a", "Alpha");
    a.description = "first".to_string();
    a.requirements = vec!["r1".to_string()];
    a.benefits = vec!["b1".to_string(), "b2".to_string()];
    a.category = praxis::Category::Culture;
    let c = Catalog::new(vec![a.clone()], Vec::new()).expect("valid catalog");
    let tree = praxis::build_tree_from_catalog(&c, "a", 100)
        .tree
        .expect("root exists");
    assert_eq!(tree.description, a.description);
    assert_eq!(tree.requirements, a.requirements);
    assert_eq!(tree.benefits, a.benefits);
    assert_eq!(tree.category, praxis::Category::Culture);
}

#[test]
fn build_tree_with_collapsed_stops_at_every_collapsed_occurrence() {
    let c = catalog(
        &["a", "b", "c", "d"],
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
    );
    let (nodes, edges) = indices(&c);
    let collapsed: HashSet<String> = ["c".to_string(), "d".to_string()].into_iter().collect();
    let tree = build_tree_with_collapsed("a", nodes, edges, 100, &collapsed)
        .tree
        .expect("root exists");
    assert_eq!(tree.children[1].cut, Some(BranchCut::Collapsed));
    assert!(tree.children[1].is_leaf());
    assert_eq!(tree.children[0].cut, None);
    // `d` has no dependencies of its own, so there is nothing to collapse.
    assert_eq!(tree.children[0].children[0].cut, None);
    assert_eq!(tree.occurrence_count(), 4);
}

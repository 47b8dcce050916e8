//! Phase 2 tests: search state, BFS and DFS traversal (plain and filtered).

use std::collections::{HashMap, HashSet, VecDeque};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use digraph_toolkit::graph::traversal::{breadth_first, depth_first_filtered};
use digraph_toolkit::graph::{Graph, SearchState};
use digraph_toolkit::types::{Identity, Node, UNINITIALIZED};

// ==================== Helpers ====================

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ids<V>(nodes: &[&Node<V>]) -> Vec<Identity> {
    nodes.iter().map(|n| n.id()).collect()
}

/// Small DAG with shared children and a subtree below 7.
fn tree_graph() -> Graph<u8> {
    Graph::from_connections(
        17u8,
        [
            (1, 2),
            (1, 3),
            (1, 4),
            (2, 3),
            (2, 4),
            (3, 5),
            (3, 6),
            (4, 7),
            (7, 8),
            (7, 9),
            (7, 12),
            (8, 10),
            (8, 11),
        ],
    )
    .unwrap()
}

/// Longer chains with back-edges and a pair of mutually linked nodes.
fn cyclic_graph() -> Graph<u8> {
    Graph::from_connections(
        10u8,
        [
            (1, 2),
            (1, 3),
            (2, 4),
            (4, 6),
            (6, 8),
            (6, 2),
            (3, 5),
            (5, 7),
            (7, 20),
            (8, 10),
            (10, 11),
            (11, 12),
            (12, 13),
            (12, 14),
            (13, 15),
            (14, 16),
            (14, 9),
            (9, 17),
            (9, 20),
            (17, 19),
            (17, 18),
            (18, 19),
            (18, 17),
            (19, 20),
        ],
    )
    .unwrap()
}

fn random_graph(seed: u64, node_count: u32, edge_count: usize) -> Graph<u32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let edges: Vec<(u32, u32)> = (0..edge_count)
        .map(|_| (rng.gen_range(0..node_count), rng.gen_range(0..node_count)))
        .collect();
    Graph::from_connections(0u32, edges).unwrap()
}

/// Hop distance of every node reachable from `start`.
fn levels(graph: &Graph<u32>, start: Identity) -> HashMap<Identity, usize> {
    let mut depth = HashMap::new();
    let mut queue = VecDeque::new();
    depth.insert(start, 0);
    queue.push_back(start);
    while let Some(id) = queue.pop_front() {
        let d = depth[&id];
        for &h in graph.node_by_id(id).unwrap().outbound() {
            let next = graph.node(h).unwrap().id();
            if !depth.contains_key(&next) {
                depth.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    depth
}

// ==================== Search State Tests ====================

#[test]
fn test_search_state_records_once() {
    let mut state = SearchState::new();
    assert_eq!(state.min_seen(), UNINITIALIZED);
    assert_eq!(state.max_seen(), 0);

    assert!(state.test_and_record(5));
    assert!(!state.test_and_record(5));
    assert!(state.test_and_record(3));
    assert!(state.test_and_record(9));
    assert_eq!(state.min_seen(), 3);
    assert_eq!(state.max_seen(), 9);

    // Interior identities go through the scan.
    assert!(!state.test_and_record(5));
    assert!(state.test_and_record(7));
    assert!(!state.test_and_record(7));
    assert!(!state.test_and_record(3));
    assert!(!state.test_and_record(9));
    assert_eq!(state.visited_count(), 4);
    assert!(state.is_visited(7));
    assert!(!state.is_visited(8));
}

#[test]
fn test_search_state_zero_identity() {
    let mut state = SearchState::default();
    assert!(state.test_and_record(0));
    assert_eq!(state.min_seen(), 0);
    assert!(!state.test_and_record(0));
    assert!(state.test_and_record(1));
    assert!(!state.test_and_record(0));
    assert_eq!(state.pending_len(), 0);
}

// ==================== Breadth-First Tests ====================

#[test]
fn test_bfs_triangle() {
    init_logger();
    let graph = Graph::from_connections(0u8, [(1, 2), (2, 3), (3, 1)]).unwrap();
    assert_eq!(ids(&graph.run_breadth_first(1)), vec![1, 2, 3]);
    assert_eq!(ids(&graph.run_breadth_first(3)), vec![3, 1, 2]);
}

#[test]
fn test_bfs_level_order() {
    let graph = tree_graph();
    assert_eq!(
        ids(&graph.run_breadth_first(1)),
        vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 12, 10, 11]
    );
}

#[test]
fn test_bfs_with_cycles() {
    let graph = cyclic_graph();
    assert_eq!(
        ids(&graph.run_breadth_first(1)),
        vec![1, 2, 3, 4, 5, 6, 7, 8, 20, 10, 11, 12, 13, 14, 15, 16, 9, 17, 19, 18]
    );
}

#[test]
fn test_bfs_unknown_start() {
    let graph = Graph::from_connections(0u8, (1..10).map(|i| (i, i + 1))).unwrap();
    assert_eq!(graph.node_count(), 10);
    assert!(graph.run_breadth_first(99).is_empty());
    assert!(graph.run_breadth_first_filtered(99, |_, _| true).is_empty());
}

#[test]
fn test_bfs_from_handle() {
    let graph = tree_graph();
    let start = graph.handle(7).unwrap();
    assert_eq!(ids(&breadth_first(&graph, start)), vec![7, 8, 9, 12, 10, 11]);
}

#[test]
fn test_bfs_exposes_payload_and_degree() {
    let graph = tree_graph();
    let output = graph.run_breadth_first(4);
    assert_eq!(*output[0].value(), 17);
    assert_eq!(output[0].out_degree(), 1);
    assert_eq!(output[0].in_degree(), 2);
}

#[test]
fn test_bfs_filtered_by_payload_identity() {
    let graph = tree_graph();
    let output = graph.run_breadth_first_filtered(1, |_, node| node.id() % 2 == 0);
    assert_eq!(ids(&output), vec![2, 4, 6, 8, 12, 10]);
}

#[test]
fn test_bfs_filtered_root_sees_no_previous() {
    let graph = tree_graph();
    let output = graph.run_breadth_first_filtered(1, |previous, _| previous.is_none());
    assert_eq!(ids(&output), vec![1]);
}

#[test]
fn test_bfs_filtered_by_discoverer() {
    let graph = tree_graph();
    let output =
        graph.run_breadth_first_filtered(1, |previous, _| previous.map(|p| p.id()) == Some(7));
    assert_eq!(ids(&output), vec![8, 9, 12]);
}

#[test]
fn test_bfs_filter_evaluated_once_per_node() {
    let graph = cyclic_graph();
    let mut calls: Vec<(Option<Identity>, Identity)> = Vec::new();
    let output = graph.run_breadth_first_filtered(1, |previous, node| {
        calls.push((previous.map(|p| p.id()), node.id()));
        true
    });

    assert_eq!(calls.len(), output.len());
    assert_eq!(calls[0], (None, 1));
    assert!(calls.contains(&(Some(6), 8)));
    assert!(!calls.iter().any(|&(prev, _)| prev == Some(18)));
}

// ==================== Depth-First Tests ====================

#[test]
fn test_dfs_triangle() {
    init_logger();
    let graph = Graph::from_connections(0u8, [(1, 2), (2, 3), (3, 1)]).unwrap();
    assert_eq!(ids(&graph.run_depth_first(1)), vec![1, 2, 3]);
}

#[test]
fn test_dfs_pre_order() {
    let graph = tree_graph();
    assert_eq!(
        ids(&graph.run_depth_first(1)),
        vec![1, 2, 3, 5, 6, 4, 7, 8, 10, 11, 9, 12]
    );
}

#[test]
fn test_dfs_with_cycles() {
    let graph = cyclic_graph();
    assert_eq!(
        ids(&graph.run_depth_first(1)),
        vec![1, 2, 4, 6, 8, 10, 11, 12, 13, 15, 14, 16, 9, 17, 19, 20, 18, 3, 5, 7]
    );
}

#[test]
fn test_dfs_unknown_start() {
    let graph = tree_graph();
    assert!(graph.run_depth_first(99).is_empty());
    assert!(graph.run_depth_first_filtered(99, |_, _| true).is_empty());
}

#[test]
fn test_dfs_filtered_even() {
    let graph = tree_graph();
    let output = graph.run_depth_first_filtered(1, |_, node| node.id() % 2 == 0);
    assert_eq!(ids(&output), vec![2, 6, 4, 8, 10, 12]);
}

#[test]
fn test_dfs_filtered_root() {
    let graph = tree_graph();
    let output = graph.run_depth_first_filtered(1, |previous, node| {
        previous.is_some() || node.id() != 1
    });
    assert_eq!(ids(&output), vec![2, 3, 5, 6, 4, 7, 8, 10, 11, 9, 12]);
}

#[test]
fn test_dfs_filtered_evaluates_each_node_once() {
    let graph = tree_graph();
    let output =
        graph.run_depth_first_filtered(1, |previous, _| previous.map(|p| p.id()) == Some(7));
    // 10 and 11 are judged only against 8, the node they were reached from.
    assert_eq!(ids(&output), vec![8, 9, 12]);

    let mut seen: HashMap<Identity, usize> = HashMap::new();
    let start = graph.handle(1).unwrap();
    depth_first_filtered(&graph, start, |_, node| {
        *seen.entry(node.id()).or_default() += 1;
        true
    });
    assert_eq!(seen.len(), 12);
    assert!(seen.values().all(|&count| count == 1));
}

#[test]
fn test_dfs_rejected_nodes_still_expanded() {
    let graph = tree_graph();
    let output = graph.run_depth_first_filtered(1, |_, node| node.id() != 7);
    assert_eq!(ids(&output), vec![1, 2, 3, 5, 6, 4, 8, 10, 11, 9, 12]);
}

// ==================== Property Tests ====================

#[test]
fn test_traversals_visit_reachable_nodes_once() {
    for seed in 0..20 {
        let graph = random_graph(seed, 40, 90);
        let start = graph.nodes().next().unwrap().id();
        let reachable: HashSet<Identity> = levels(&graph, start).into_keys().collect();

        for output in [graph.run_breadth_first(start), graph.run_depth_first(start)] {
            let visited = ids(&output);
            let unique: HashSet<Identity> = visited.iter().copied().collect();
            assert_eq!(unique.len(), visited.len(), "seed {seed}: repeated node");
            assert_eq!(unique, reachable, "seed {seed}: reachable set differs");
        }
    }
}

#[test]
fn test_bfs_levels_never_decrease() {
    for seed in 0..20 {
        let graph = random_graph(seed, 30, 60);
        let start = graph.nodes().next().unwrap().id();
        let depth = levels(&graph, start);
        let order: Vec<usize> = graph
            .run_breadth_first(start)
            .iter()
            .map(|n| depth[&n.id()])
            .collect();
        assert!(order.windows(2).all(|w| w[0] <= w[1]), "seed {seed}");
    }
}

#[test]
fn test_dfs_subtrees_are_contiguous() {
    // Every node's DFS descendants form one contiguous run right after it.
    for seed in 0..20 {
        let graph = random_graph(seed, 30, 45);
        let start = graph.nodes().next().unwrap().id();
        let order = ids(&graph.run_depth_first(start));
        let position: HashMap<Identity, usize> =
            order.iter().enumerate().map(|(i, &id)| (id, i)).collect();

        // Rebuild the discovery parent of each node.
        let mut parent: HashMap<Identity, Identity> = HashMap::new();
        let mut seen: HashSet<Identity> = HashSet::from([start]);
        let mut stack = vec![(start, 0usize)];
        while let Some((id, next)) = stack.pop() {
            let node = graph.node_by_id(id).unwrap();
            if let Some(h) = node.neighbor_at(next) {
                stack.push((id, next + 1));
                let child = graph.node(h).unwrap().id();
                if seen.insert(child) {
                    parent.insert(child, id);
                    stack.push((child, 0));
                }
            }
        }

        for (&id, &pos) in &position {
            let mut end = pos + 1;
            while end < order.len() && is_descendant(&parent, order[end], id) {
                end += 1;
            }
            let subtree = order
                .iter()
                .filter(|&&other| is_descendant(&parent, other, id))
                .count();
            assert_eq!(end - pos - 1, subtree, "seed {seed}: subtree of {id} split");
        }
    }
}

fn is_descendant(
    parent: &HashMap<Identity, Identity>,
    mut id: Identity,
    ancestor: Identity,
) -> bool {
    while let Some(&p) = parent.get(&id) {
        if p == ancestor {
            return true;
        }
        id = p;
    }
    false
}

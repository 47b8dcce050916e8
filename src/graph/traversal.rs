//! Graph traversal algorithms (BFS and DFS, plain and filtered).
//!
//! Both walks run over an explicit queue or stack, so traversal depth is not
//! bounded by the call stack. Output order is level order for BFS and
//! pre-order with immediate descent for DFS, ties broken by adjacency order.
//!
//! Filters receive the node a candidate was discovered from (`None` for the
//! start node) and the candidate itself. A filter only decides what is
//! emitted; rejected nodes are still expanded.

use crate::types::{Node, NodeHandle};

use super::{Graph, SearchState};

/// Breadth-first traversal from `start`.
pub fn breadth_first<V>(graph: &Graph<V>, start: NodeHandle) -> Vec<&Node<V>> {
    breadth_first_filtered(graph, start, |_, _| true)
}

/// Breadth-first traversal from `start`, emitting only nodes accepted by `filter`.
///
/// The filter runs exactly once per discovered node, at discovery time.
pub fn breadth_first_filtered<'g, V, F>(
    graph: &'g Graph<V>,
    start: NodeHandle,
    mut filter: F,
) -> Vec<&'g Node<V>>
where
    F: FnMut(Option<&Node<V>>, &Node<V>) -> bool,
{
    let Some(root) = graph.node(start) else {
        return Vec::new();
    };

    let mut state = SearchState::new();
    let mut output = Vec::new();

    if state.test_and_record(root.id()) && filter(None, root) {
        output.push(root);
    }
    state.enqueue(start);

    while let Some(current) = state.dequeue() {
        let Some(node) = graph.node(current) else {
            continue;
        };
        log::trace!("bfs: expanding {}", node.id());
        for &next in node.outbound() {
            let Some(neighbor) = graph.node(next) else {
                continue;
            };
            if !state.test_and_record(neighbor.id()) {
                continue;
            }
            if filter(Some(node), neighbor) {
                output.push(neighbor);
            }
            state.enqueue(next);
        }
    }

    output
}

/// Depth-first (pre-order) traversal from `start`.
pub fn depth_first<V>(graph: &Graph<V>, start: NodeHandle) -> Vec<&Node<V>> {
    depth_first_filtered(graph, start, |_, _| true)
}

/// Depth-first traversal from `start`, emitting only nodes accepted by `filter`.
///
/// Each discovered node is evaluated once, against the node it was reached
/// from. A rejected node's subtree is still explored and filtered on its own
/// merits.
pub fn depth_first_filtered<'g, V, F>(
    graph: &'g Graph<V>,
    start: NodeHandle,
    mut filter: F,
) -> Vec<&'g Node<V>>
where
    F: FnMut(Option<&Node<V>>, &Node<V>) -> bool,
{
    let Some(root) = graph.node(start) else {
        return Vec::new();
    };

    let mut state = SearchState::new();
    let mut output = Vec::new();

    if state.test_and_record(root.id()) && filter(None, root) {
        output.push(root);
    }

    // (node, next outbound position to try)
    let mut stack: Vec<(&'g Node<V>, usize)> = vec![(root, 0)];

    while let Some(frame) = stack.last_mut() {
        let (node, position) = *frame;
        let Some(next) = node.neighbor_at(position) else {
            stack.pop();
            continue;
        };
        frame.1 += 1;

        let Some(neighbor) = graph.node(next) else {
            continue;
        };
        if !state.test_and_record(neighbor.id()) {
            continue;
        }
        log::trace!("dfs: descending {} -> {}", node.id(), neighbor.id());
        if filter(Some(node), neighbor) {
            output.push(neighbor);
        }
        stack.push((neighbor, 0));
    }

    output
}

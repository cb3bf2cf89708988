use crate::graph::{NodeId, NodeRecord};
use log::trace;

/// Post-order topological sort of every node reachable from `root`.
///
/// Each node appears exactly once, after all of its children, so the root
/// comes last. Uses an explicit work stack instead of recursion so that very
/// deep expression chains cannot overflow the call stack.
pub(crate) fn topological_sort(root: NodeId, nodes: &[NodeRecord]) -> Vec<NodeId> {
    let mut visited = vec![false; nodes.len()];
    let mut sorted = Vec::new();
    // (node, children_done)
    let mut stack = vec![(root, false)];

    while let Some((node, children_done)) = stack.pop() {
        if children_done {
            trace!("[topological_sort] Emitting node {}", node);
            sorted.push(node);
            continue;
        }
        if visited[node.0] {
            trace!("[topological_sort] Node {} already visited", node);
            continue;
        }
        visited[node.0] = true;
        stack.push((node, true));
        // Reversed so the first operand is explored first.
        for child in nodes[node.0].op.children().into_iter().rev() {
            if !visited[child.0] {
                stack.push((child, false));
            }
        }
    }

    sorted
}

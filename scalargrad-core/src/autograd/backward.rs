use crate::autograd::graph::topological_sort;
use crate::error::Result;
use crate::graph::{Diagnostic, NodeId};
use crate::value::Value;
use log::debug;

impl Value {
    /// Propagates gradients from this node to every node it depends on.
    ///
    /// The root's own gradient is **not** seeded: whatever it holds when the
    /// pass starts (0.0 if untouched) is what gets multiplied through the
    /// chain. Call [`Value::set_grad`] with `1.0` first to get d(root)/d(node).
    ///
    /// Gradients accumulate across calls. Clearing them is the caller's job
    /// ([`Graph::zero_grad`](crate::Graph::zero_grad) or
    /// [`Value::zero_grad_reachable`]). If any reachable node already holds a
    /// nonzero gradient a [`Diagnostic::StaleGradient`] is reported once; the
    /// pass proceeds regardless. Since the check includes the root, a seeded
    /// root always triggers it.
    ///
    /// # Errors
    /// Returns [`ScalarGradError::PowerDomain`](crate::ScalarGradError::PowerDomain)
    /// when a power node's local derivative is undefined (zero base with an
    /// exponent below one). Contributions applied before the failing node stay applied.
    pub fn backward(&self) -> Result<()> {
        let graph = self.graph();
        let order = self.topological_order();
        debug!(
            "backward: {} reachable nodes from root {}",
            order.len(),
            self.id()
        );

        let stale = {
            let tape = graph.tape();
            if tape.options.warn_on_stale_gradients {
                order
                    .iter()
                    .rev()
                    .map(|&id| (id, tape.grads[id.index()]))
                    .find(|&(_, grad)| grad != 0.0)
            } else {
                None
            }
        };
        if let Some((node, gradient)) = stale {
            graph.emit(Diagnostic::StaleGradient { node, gradient });
        }

        let mut tape = graph.tape_mut();
        let tape = &mut *tape;
        for &id in order.iter().rev() {
            let op = tape.nodes[id.index()].op;
            op.backward(id, &tape.nodes, &mut tape.grads)?;
        }
        debug!("backward: done");
        Ok(())
    }

    /// Reachable nodes, each exactly once, every node after all of its children.
    /// The root is last.
    pub fn topological_order(&self) -> Vec<NodeId> {
        let tape = self.graph().tape();
        topological_sort(self.id(), &tape.nodes)
    }

    /// Clears the gradient of this node and of everything it depends on.
    pub fn zero_grad_reachable(&self) {
        let order = self.topological_order();
        let mut tape = self.graph().tape_mut();
        for id in order {
            tape.grads[id.index()] = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Diagnostic, Graph, GraphOptions, RecordingSink};
    use crate::ScalarGradError;
    use approx::assert_relative_eq;

    #[test]
    fn test_backward_without_seed_yields_zero() {
        let graph = Graph::new();
        let x = graph.leaf(2.0);
        let y = graph.leaf(3.0);
        let z = &x * &y;
        z.backward().unwrap();
        assert_eq!(x.grad(), 0.0);
        assert_eq!(y.grad(), 0.0);
        assert_eq!(z.grad(), 0.0);
    }

    #[test]
    fn test_chain_rule_through_shared_subexpression() {
        let graph = Graph::new();
        let a = graph.leaf(-2.0);
        let b = graph.leaf(3.0);
        let d = &a * &b; // -6
        let e = &a + &b; // 1
        let f = &d * &e; // -6
        f.set_grad(1.0);
        f.backward().unwrap();
        // df/da = e*b + d = 3 - 6, df/db = e*a + d = -2 - 6
        assert_relative_eq!(a.grad(), -3.0);
        assert_relative_eq!(b.grad(), -8.0);
        assert_relative_eq!(d.grad(), 1.0);
        assert_relative_eq!(e.grad(), -6.0);
    }

    #[test]
    fn test_repeated_backward_accumulates() {
        let sink = RecordingSink::new();
        let graph = Graph::new().with_sink(sink.clone());
        let x = graph.leaf(4.0);
        let z = &x * 3.0;
        z.set_grad(1.0);
        z.backward().unwrap();
        z.backward().unwrap();
        assert_relative_eq!(x.grad(), 6.0);
        // Both passes see a nonzero root, so both warn once.
        assert_eq!(sink.len(), 2);
    }

    #[test]
    fn test_stale_gradient_reported_once_per_pass() {
        let sink = RecordingSink::new();
        let graph = Graph::new().with_sink(sink.clone());
        let x = graph.leaf(1.0);
        let y = graph.leaf(2.0);
        let z = &x + &y;
        x.set_grad(5.0);
        y.set_grad(7.0);
        z.backward().unwrap();
        assert_eq!(sink.len(), 1);
        match &sink.records()[0] {
            Diagnostic::StaleGradient { gradient, .. } => {
                assert!(*gradient == 5.0 || *gradient == 7.0)
            }
        }
        // Propagation still ran (with a zero root gradient nothing changes).
        assert_eq!(x.grad(), 5.0);
    }

    #[test]
    fn test_clean_pass_reports_nothing() {
        let sink = RecordingSink::new();
        let graph = Graph::new().with_sink(sink.clone());
        let x = graph.leaf(1.0);
        let z = x.exp();
        z.backward().unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_stale_scan_can_be_disabled() {
        let sink = RecordingSink::new();
        let graph = Graph::with_options(GraphOptions::default().warn_on_stale_gradients(false))
            .with_sink(sink.clone());
        let x = graph.leaf(1.0);
        let z = x.tanh();
        z.set_grad(1.0);
        z.backward().unwrap();
        assert!(sink.is_empty());
        assert_relative_eq!(x.grad(), 1.0 - 1.0_f64.tanh().powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_grad_reachable_leaves_other_nodes() {
        let graph = Graph::new();
        let x = graph.leaf(1.0);
        let unrelated = graph.leaf(2.0);
        let z = &x * 2.0;
        x.set_grad(1.0);
        z.set_grad(1.0);
        unrelated.set_grad(3.0);
        z.zero_grad_reachable();
        assert_eq!(x.grad(), 0.0);
        assert_eq!(z.grad(), 0.0);
        assert_eq!(unrelated.grad(), 3.0);
    }

    #[test]
    fn test_backward_power_domain_error() {
        let graph = Graph::new();
        let x = graph.leaf(0.0);
        let z = x.pow(0.5);
        assert_eq!(z.data(), 0.0);
        z.set_grad(1.0);
        assert!(matches!(
            z.backward(),
            Err(ScalarGradError::PowerDomain { .. })
        ));
    }

    #[test]
    fn test_rules_run_after_all_consumers() {
        // Every node's rule must see its fully accumulated gradient: check
        // the reversed order puts each node after every node that uses it.
        let graph = Graph::new();
        let x = graph.leaf(0.3);
        let y = graph.leaf(-1.2);
        let a = &x * &y;
        let b = a.tanh();
        let c = &a + &b;
        let d = (&c * &x).exp();
        let order = d.topological_order();
        let reversed: Vec<_> = order.iter().rev().copied().collect();
        for (i, id) in reversed.iter().enumerate() {
            let node = graph.value(*id).unwrap();
            for child in node.children() {
                let child_pos = reversed.iter().position(|n| *n == child.id()).unwrap();
                assert!(child_pos > i, "{} processed before its consumer {}", child.id(), id);
            }
        }
    }
}

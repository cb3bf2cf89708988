// src/value/debug.rs
use crate::value::Value;
use std::fmt;

impl Value {
    /// One-line dump of label, operator, value and gradient, e.g.
    /// `Label=v1,Op=+,data=2.30000,grad=0.00000`.
    pub fn details(&self) -> String {
        let tape = self.graph().tape();
        let node = &tape.nodes[self.id().index()];
        let precision = tape.options.display_precision;
        format!(
            "Label={},Op={},data={:.*},grad={:.*}",
            node.label.as_deref().unwrap_or(""),
            node.op.tag(),
            precision,
            node.value,
            precision,
            tape.grads[self.id().index()]
        )
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = self.graph().options().display_precision;
        match self.label() {
            Some(label) if !label.is_empty() => {
                write!(f, "Value({} => {:.*})", label, precision, self.data())
            }
            _ => write!(f, "Value({:.*})", precision, self.data()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Value(id={}, op={:?}, data={}, grad={}, label={:?})",
            self.id(),
            self.op_tag(),
            self.data(),
            self.grad(),
            self.label()
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::{Graph, GraphOptions};

    #[test]
    fn test_display_with_and_without_label() {
        let graph = Graph::new();
        let v1 = graph.leaf_labeled(2.3, "v1");
        let v2 = graph.leaf(3);
        assert_eq!(v1.to_string(), "Value(v1 => 2.30000)");
        assert_eq!(v2.to_string(), "Value(3.00000)");
    }

    #[test]
    fn test_details() {
        let graph = Graph::new();
        let a = graph.leaf_labeled(2.0, "a");
        let b = graph.leaf_labeled(-1.5, "b");
        let c = (&a + &b).with_label("c");
        c.set_grad(1.0);
        assert_eq!(c.details(), "Label=c,Op=+,data=0.50000,grad=1.00000");
        assert_eq!(a.details(), "Label=a,Op=,data=2.00000,grad=0.00000");
    }

    #[test]
    fn test_display_precision_option() {
        let graph = Graph::with_options(GraphOptions::default().display_precision(2));
        let x = graph.leaf_labeled(1.0 / 3.0, "x");
        assert_eq!(x.to_string(), "Value(x => 0.33)");
        assert_eq!(x.details(), "Label=x,Op=,data=0.33,grad=0.00");
    }
}

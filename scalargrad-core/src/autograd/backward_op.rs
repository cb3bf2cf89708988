use crate::error::{Result, ScalarGradError};
use crate::graph::{NodeId, NodeRecord};
use crate::value::OpTag;

/// Local-derivative rule recorded on every node at construction time.
///
/// Each variant carries the operand ids (and the exponent for `Pow`) needed
/// to apply the chain rule later. The rule is evaluated lazily: it reads the
/// output node's gradient at the moment [`BackwardOp::backward`] runs, after
/// the whole forward graph exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackwardOp {
    Leaf,
    Add(NodeId, NodeId),
    Mul(NodeId, NodeId),
    Pow { base: NodeId, exponent: f64 },
    Exp(NodeId),
    Tanh(NodeId),
}

impl BackwardOp {
    pub fn tag(&self) -> OpTag {
        match self {
            BackwardOp::Leaf => OpTag::Leaf,
            BackwardOp::Add(..) => OpTag::Add,
            BackwardOp::Mul(..) => OpTag::Mul,
            BackwardOp::Pow { .. } => OpTag::Pow,
            BackwardOp::Exp(_) => OpTag::Exp,
            BackwardOp::Tanh(_) => OpTag::Tanh,
        }
    }

    /// Operand ids without duplicates, in operand order.
    pub fn children(&self) -> Vec<NodeId> {
        match *self {
            BackwardOp::Leaf => vec![],
            BackwardOp::Add(a, b) | BackwardOp::Mul(a, b) if a == b => vec![a],
            BackwardOp::Add(a, b) | BackwardOp::Mul(a, b) => vec![a, b],
            BackwardOp::Pow { base, .. } => vec![base],
            BackwardOp::Exp(a) | BackwardOp::Tanh(a) => vec![a],
        }
    }

    /// Adds this node's contribution into its operands' gradients.
    ///
    /// `output` is the node this rule belongs to; its gradient must already
    /// hold the sum of every downstream contribution. A node used twice as an
    /// operand receives both contributions.
    pub(crate) fn backward(
        &self,
        output: NodeId,
        nodes: &[NodeRecord],
        grads: &mut [f64],
    ) -> Result<()> {
        let g = grads[output.0];
        match *self {
            BackwardOp::Leaf => {}
            BackwardOp::Add(a, b) => {
                grads[a.0] += g;
                grads[b.0] += g;
            }
            BackwardOp::Mul(a, b) => {
                let (a_val, b_val) = (nodes[a.0].value, nodes[b.0].value);
                grads[a.0] += b_val * g;
                grads[b.0] += a_val * g;
            }
            BackwardOp::Pow { base, exponent } => {
                let x = nodes[base.0].value;
                let local = exponent * x.powf(exponent - 1.0);
                if !local.is_finite() && x.is_finite() && exponent.is_finite() {
                    return Err(ScalarGradError::PowerDomain {
                        base: x,
                        exponent: exponent - 1.0,
                    });
                }
                grads[base.0] += local * g;
            }
            BackwardOp::Exp(a) => {
                // d/dx e^x is the forward output itself
                grads[a.0] += nodes[output.0].value * g;
            }
            BackwardOp::Tanh(a) => {
                let t = nodes[output.0].value;
                grads[a.0] += (1.0 - t * t) * g;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: f64, op: BackwardOp) -> NodeRecord {
        NodeRecord {
            value,
            op,
            label: None,
        }
    }

    #[test]
    fn test_children_dedup() {
        let a = NodeId(0);
        let b = NodeId(1);
        assert_eq!(BackwardOp::Mul(a, a).children(), vec![a]);
        assert_eq!(BackwardOp::Add(a, b).children(), vec![a, b]);
        assert!(BackwardOp::Leaf.children().is_empty());
    }

    #[test]
    fn test_mul_rule_reads_output_grad_at_call_time() -> Result<()> {
        let op = BackwardOp::Mul(NodeId(0), NodeId(1));
        let nodes = vec![
            record(3.0, BackwardOp::Leaf),
            record(-2.0, BackwardOp::Leaf),
            record(-6.0, op),
        ];
        let mut grads = vec![0.0, 0.0, 0.0];
        // Seeding after the rule was recorded is what the rule sees.
        grads[2] = 0.5;
        op.backward(NodeId(2), &nodes, &mut grads)?;
        assert_eq!(grads, vec![-1.0, 1.5, 0.5]);
        Ok(())
    }

    #[test]
    fn test_self_product_gets_both_contributions() -> Result<()> {
        let op = BackwardOp::Mul(NodeId(0), NodeId(0));
        let nodes = vec![record(3.0, BackwardOp::Leaf), record(9.0, op)];
        let mut grads = vec![0.0, 1.0];
        op.backward(NodeId(1), &nodes, &mut grads)?;
        assert_eq!(grads[0], 6.0);
        Ok(())
    }

    #[test]
    fn test_rules_accumulate_instead_of_overwrite() -> Result<()> {
        let op = BackwardOp::Add(NodeId(0), NodeId(1));
        let nodes = vec![
            record(1.0, BackwardOp::Leaf),
            record(2.0, BackwardOp::Leaf),
            record(3.0, op),
        ];
        let mut grads = vec![10.0, 20.0, 1.0];
        op.backward(NodeId(2), &nodes, &mut grads)?;
        assert_eq!(grads, vec![11.0, 21.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_pow_rule_domain_error() {
        let op = BackwardOp::Pow {
            base: NodeId(0),
            exponent: 0.5,
        };
        let nodes = vec![record(0.0, BackwardOp::Leaf), record(0.0, op)];
        let mut grads = vec![0.0, 1.0];
        assert_eq!(
            op.backward(NodeId(1), &nodes, &mut grads).unwrap_err(),
            ScalarGradError::PowerDomain {
                base: 0.0,
                exponent: -0.5
            }
        );
        assert_eq!(grads[0], 0.0);
    }
}

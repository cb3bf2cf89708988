/// Tunables for a [`Graph`](crate::Graph).
///
/// Built with the usual chained setters:
///
/// ```
/// use scalargrad_core::{Graph, GraphOptions};
///
/// let graph = Graph::with_options(
///     GraphOptions::default()
///         .warn_on_stale_gradients(false)
///         .display_precision(3),
/// );
/// assert!(graph.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    /// Scan reachable nodes for leftover gradients before each backward pass.
    pub warn_on_stale_gradients: bool,
    /// Number of fractional digits printed by `details()` and `Display`.
    pub display_precision: usize,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            warn_on_stale_gradients: true,
            display_precision: 5,
        }
    }
}

impl GraphOptions {
    pub fn warn_on_stale_gradients(mut self, enabled: bool) -> Self {
        self.warn_on_stale_gradients = enabled;
        self
    }

    pub fn display_precision(mut self, digits: usize) -> Self {
        self.display_precision = digits;
        self
    }
}

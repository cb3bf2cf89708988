use scalargrad_core::{Graph, GraphOptions};

// Helpers shared by the integration test crates.
// Added allow(dead_code) because usage across different test crates isn't detected.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A graph that does not warn when a seeded root starts a backward pass.
#[allow(dead_code)]
pub fn quiet_graph() -> Graph {
    init_logger();
    Graph::with_options(GraphOptions::default().warn_on_stale_gradients(false))
}

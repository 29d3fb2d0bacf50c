#![forbid(unsafe_code)]

//! Deterministic force-directed layout for classified keyword intent graphs.
//!
//! The pipeline is pure and allocation-local: nodes sharing an intent or a funnel stage are linked
//! ([`edges`]), placed on a seeded annulus ([`seed`]), relaxed by a fixed-iteration spring
//! embedder (`simulate`), then rescaled into `[-1, 1]` and colored by intent ([`normalize`],
//! [`legend`]).

pub mod edges;
pub mod error;
pub mod legend;
pub mod model;
pub mod normalize;
pub mod options;
pub mod seed;
mod simulate;

pub use edges::build_edges;
pub use error::{Error, Result};
pub use legend::Legend;
pub use model::{
    IntentGraphEdge, IntentGraphNode, Layout, LegendEntry, Point, PositionedIntentNode,
};
pub use options::{DEFAULT_PALETTE, LayoutOptions};
pub use seed::SeededRandom;

/// Lays out `nodes` with the default options. Total over its input; never fails.
pub fn compute_layout(nodes: &[IntentGraphNode]) -> Layout {
    run_pipeline(nodes, &LayoutOptions::default())
}

/// Lays out `nodes` with caller-supplied options, validating them first.
pub fn compute_layout_with(nodes: &[IntentGraphNode], opts: &LayoutOptions) -> Result<Layout> {
    opts.validate()?;
    Ok(run_pipeline(nodes, opts))
}

fn run_pipeline(nodes: &[IntentGraphNode], opts: &LayoutOptions) -> Layout {
    if nodes.is_empty() {
        return Layout::default();
    }

    let span = tracing::debug_span!("intent_graph_layout", nodes = nodes.len());
    let _guard = span.enter();

    let edge_set = edges::build_edge_set(nodes, opts);
    tracing::debug!(edges = edge_set.edges.len(), "built intent edges");

    let initial = seed::initial_positions(nodes.len(), opts);

    let mut sim = simulate::ForceSimulation::new(&initial, &edge_set.springs, opts);
    let stats = sim.run();
    tracing::debug!(iterations = stats.iterations, "force simulation finished");

    let positions = normalize::normalize_positions(&sim.into_positions(), opts.min_extent);
    let legend = Legend::build(nodes, &opts.palette);

    let positioned = nodes
        .iter()
        .zip(positions)
        .map(|(n, p)| PositionedIntentNode {
            node: n.clone(),
            x: p.x,
            y: p.y,
            color: legend.color_for(&n.intent).to_string(),
        })
        .collect();

    Layout {
        nodes: positioned,
        edges: edge_set.edges,
        legend: legend.entries(),
    }
}

use crate::model::{IntentGraphEdge, IntentGraphNode};
use crate::options::LayoutOptions;
use indexmap::IndexMap;

/// Spring endpoints by node index, parallel to the public edge list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Spring {
    pub a: usize,
    pub b: usize,
    pub weight: f64,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeSet {
    pub edges: Vec<IntentGraphEdge>,
    pub springs: Vec<Spring>,
}

/// Builds the edge list from two independent partitions of `nodes`: by lowercased intent,
/// then by lowercased purchase stage.
///
/// Every unordered pair inside a group of two or more nodes gets one edge. Groups are visited in
/// first-occurrence order and pairs in node order, so the output is stable for a given input.
pub fn build_edges(nodes: &[IntentGraphNode], opts: &LayoutOptions) -> Vec<IntentGraphEdge> {
    build_edge_set(nodes, opts).edges
}

pub(crate) fn build_edge_set(nodes: &[IntentGraphNode], opts: &LayoutOptions) -> EdgeSet {
    let by_intent = group_by(nodes, |n| n.intent.as_str());
    let by_stage = group_by(nodes, |n| n.purchase_stage.as_str());

    let mut out = EdgeSet::default();
    emit_group_edges(
        nodes,
        &by_intent,
        opts.intent_weight,
        "Shared intent",
        &mut out,
    );
    emit_group_edges(nodes, &by_stage, opts.stage_weight, "Funnel stage", &mut out);
    out
}

fn group_by<'a>(
    nodes: &'a [IntentGraphNode],
    key: impl Fn(&'a IntentGraphNode) -> &'a str,
) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, n) in nodes.iter().enumerate() {
        groups.entry(key(n).to_lowercase()).or_default().push(idx);
    }
    groups
}

fn emit_group_edges(
    nodes: &[IntentGraphNode],
    groups: &IndexMap<String, Vec<usize>>,
    weight: f64,
    label: &str,
    out: &mut EdgeSet,
) {
    for (key, members) in groups {
        if members.len() < 2 {
            continue;
        }
        let reason = format!("{label}: {key}");
        for (i, &a) in members.iter().enumerate() {
            for &b in &members[i + 1..] {
                out.edges.push(IntentGraphEdge {
                    source: nodes[a].id.clone(),
                    target: nodes[b].id.clone(),
                    weight,
                    reason: reason.clone(),
                });
                out.springs.push(Spring { a, b, weight });
            }
        }
    }
}

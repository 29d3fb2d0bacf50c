use intent_graph::{
    Error, IntentGraphNode, Layout, LayoutOptions, build_edges, compute_layout,
    compute_layout_with,
};
use std::collections::{BTreeSet, HashMap};

fn node(id: &str, intent: &str, stage: &str) -> IntentGraphNode {
    IntentGraphNode {
        id: id.to_string(),
        term: format!("term {id}"),
        intent: intent.to_string(),
        persona: "Bargain hunter".to_string(),
        purchase_stage: stage.to_string(),
        score: 0.5,
    }
}

fn keyword_sample() -> Vec<IntentGraphNode> {
    vec![
        node("k1", "purchase", "decision"),
        node("k2", "Purchase", "consideration"),
        node("k3", "discovery", "awareness"),
        node("k4", "comparison", "consideration"),
        node("k5", "discovery", "awareness"),
        node("k6", "support", "retention"),
        node("k7", "comparison", "decision"),
        node("k8", "purchase", "decision"),
        node("k9", "navigation", "awareness"),
        node("k10", "support", "retention"),
    ]
}

fn assert_in_bounds(layout: &Layout) {
    for n in &layout.nodes {
        assert!(
            (-1.0..=1.0).contains(&n.x) && (-1.0..=1.0).contains(&n.y),
            "node {} out of bounds: ({}, {})",
            n.node.id,
            n.x,
            n.y
        );
    }
}

#[test]
fn empty_input_yields_empty_layout() {
    let layout = compute_layout(&[]);
    assert!(layout.is_empty());
    assert!(layout.nodes.is_empty());
    assert!(layout.edges.is_empty());
    assert!(layout.legend.is_empty());
    assert_eq!(layout, Layout::default());
}

#[test]
fn coordinates_stay_within_unit_box() {
    assert_in_bounds(&compute_layout(&keyword_sample()));
    assert_in_bounds(&compute_layout(&[node("solo", "purchase", "decision")]));

    let same: Vec<_> = (0..6)
        .map(|i| node(&format!("s{i}"), "purchase", "decision"))
        .collect();
    assert_in_bounds(&compute_layout(&same));
}

#[test]
fn dense_shared_label_clique_stays_in_bounds() {
    // 40 keywords sharing one intent and one stage drive the fixed-step integrator past its
    // stability limit; every coordinate goes non-finite and the layout collapses to the center.
    let clique: Vec<_> = (0..40)
        .map(|i| node(&format!("c{i}"), "purchase", "decision"))
        .collect();
    let layout = compute_layout(&clique);

    assert_eq!(layout.nodes.len(), 40);
    assert!(!layout.is_empty());
    assert_in_bounds(&layout);
    for n in &layout.nodes {
        assert_eq!((n.x, n.y), (0.0, 0.0), "node {} not centered", n.node.id);
    }
    assert_eq!(layout.edges.len(), 2 * 40 * 39 / 2);
}

#[test]
fn nodes_are_preserved_in_input_order() {
    let input = keyword_sample();
    let layout = compute_layout(&input);
    assert_eq!(layout.nodes.len(), input.len());
    for (out, inp) in layout.nodes.iter().zip(&input) {
        assert_eq!(&out.node, inp);
    }
}

#[test]
fn edges_only_link_nodes_sharing_intent_or_stage() {
    let input = keyword_sample();
    let by_id: HashMap<&str, &IntentGraphNode> =
        input.iter().map(|n| (n.id.as_str(), n)).collect();
    let layout = compute_layout(&input);
    assert!(!layout.edges.is_empty());

    for e in &layout.edges {
        assert_ne!(e.source, e.target, "self loop: {e:?}");
        let a = by_id.get(e.source.as_str()).expect("known source");
        let b = by_id.get(e.target.as_str()).expect("known target");
        let shares_intent = a.intent.to_lowercase() == b.intent.to_lowercase();
        let shares_stage = a.purchase_stage.to_lowercase() == b.purchase_stage.to_lowercase();
        assert!(shares_intent || shares_stage, "unrelated pair: {e:?}");
        assert!(e.weight > 0.0);
    }
}

#[test]
fn mixed_case_intents_share_an_edge_but_not_a_legend_entry() {
    let layout = compute_layout(&[
        node("a", "Purchase", "awareness"),
        node("b", "purchase", "decision"),
    ]);
    assert_eq!(layout.edges.len(), 1);
    assert_eq!(layout.edges[0].reason, "Shared intent: purchase");
    assert_eq!(layout.legend.len(), 2);
    assert_ne!(layout.nodes[0].color, layout.nodes[1].color);
}

#[test]
fn legend_covers_each_distinct_intent_once() {
    let input = keyword_sample();
    let layout = compute_layout(&input);

    let expected: BTreeSet<&str> = input.iter().map(|n| n.intent.as_str()).collect();
    let listed: Vec<&str> = layout.legend.iter().map(|e| e.intent.as_str()).collect();
    let unique: BTreeSet<&str> = listed.iter().copied().collect();
    assert_eq!(listed.len(), unique.len());
    assert_eq!(unique, expected);

    let colors: HashMap<&str, &str> = layout
        .legend
        .iter()
        .map(|e| (e.intent.as_str(), e.color.as_str()))
        .collect();
    for n in &layout.nodes {
        assert_eq!(colors[n.node.intent.as_str()], n.color);
    }
}

#[test]
fn eighth_distinct_intent_reuses_first_palette_color() {
    let input: Vec<_> = (1..=8)
        .map(|i| node(&format!("n{i}"), &format!("I{i}"), &format!("stage{i}")))
        .collect();
    let layout = compute_layout(&input);
    assert_eq!(layout.legend.len(), 8);
    assert_eq!(layout.legend[0].color, layout.legend[7].color);
    assert_eq!(layout.nodes[0].color, layout.nodes[7].color);
    assert_eq!(layout.legend[0].color, intent_graph::DEFAULT_PALETTE[0]);

    let first_seven: BTreeSet<&str> = layout.legend[..7]
        .iter()
        .map(|e| e.color.as_str())
        .collect();
    assert_eq!(first_seven.len(), 7);
}

#[test]
fn shared_intent_only_yields_one_intent_edge() {
    let layout = compute_layout(&[
        node("a", "purchase", "awareness"),
        node("b", "purchase", "decision"),
    ]);
    assert_eq!(layout.edges.len(), 1);
    assert!(layout.edges[0].reason.starts_with("Shared intent:"));
    assert_eq!(layout.edges[0].weight, 1.25);
}

#[test]
fn shared_stage_only_yields_one_stage_edge() {
    let layout = compute_layout(&[
        node("a", "purchase", "decision"),
        node("b", "discovery", "decision"),
    ]);
    assert_eq!(layout.edges.len(), 1);
    assert!(layout.edges[0].reason.starts_with("Funnel stage:"));
    assert_eq!(layout.edges[0].weight, 0.8);
}

#[test]
fn fully_disjoint_nodes_have_no_edges() {
    let layout = compute_layout(&[
        node("a", "purchase", "decision"),
        node("b", "discovery", "awareness"),
        node("c", "support", "retention"),
    ]);
    assert!(layout.edges.is_empty());
    assert_eq!(layout.legend.len(), 3);
    assert_eq!(layout.nodes.len(), 3);
    assert_in_bounds(&layout);
}

#[test]
fn shared_intent_and_stage_yield_parallel_edges() {
    let layout = compute_layout(&[
        node("a", "purchase", "decision"),
        node("b", "purchase", "decision"),
    ]);
    let reasons: Vec<&str> = layout.edges.iter().map(|e| e.reason.as_str()).collect();
    assert_eq!(
        reasons,
        vec!["Shared intent: purchase", "Funnel stage: decision"]
    );
    assert!(
        layout
            .edges
            .iter()
            .all(|e| e.source == "a" && e.target == "b")
    );
}

fn coordinate_bits(layout: &Layout) -> Vec<(u64, u64, String)> {
    layout
        .nodes
        .iter()
        .map(|n| (n.x.to_bits(), n.y.to_bits(), n.color.clone()))
        .collect()
}

#[test]
fn repeated_calls_are_bit_identical() {
    let input = keyword_sample();
    let first = compute_layout(&input);
    let second = compute_layout(&input);
    assert_eq!(coordinate_bits(&first), coordinate_bits(&second));
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.legend, second.legend);
}

#[test]
fn concurrent_calls_match_sequential_result() {
    let input = keyword_sample();
    let expected = coordinate_bits(&compute_layout(&input));

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| coordinate_bits(&compute_layout(&input))))
            .collect();
        for h in handles {
            assert_eq!(h.join().expect("layout thread"), expected);
        }
    });
}

#[test]
fn equal_sized_edgeless_inputs_share_coordinates() {
    // The seed only depends on the node count.
    let a = compute_layout(&[
        node("a", "purchase", "decision"),
        node("b", "discovery", "awareness"),
        node("c", "support", "retention"),
    ]);
    let b = compute_layout(&[
        node("x", "navigation", "s1"),
        node("y", "comparison", "s2"),
        node("z", "research", "s3"),
    ]);
    let pos = |l: &Layout| -> Vec<(u64, u64)> {
        l.nodes
            .iter()
            .map(|n| (n.x.to_bits(), n.y.to_bits()))
            .collect()
    };
    assert_eq!(pos(&a), pos(&b));
}

#[test]
fn default_options_match_compute_layout() {
    let input = keyword_sample();
    let with = compute_layout_with(&input, &LayoutOptions::default()).expect("valid options");
    assert_eq!(coordinate_bits(&with), coordinate_bits(&compute_layout(&input)));
}

#[test]
fn custom_palette_and_weights_flow_through() {
    let opts = LayoutOptions {
        intent_weight: 2.0,
        palette: vec!["#000000".to_string(), "#ffffff".to_string()],
        ..LayoutOptions::default()
    };
    let input = [
        node("a", "purchase", "s1"),
        node("b", "purchase", "s2"),
        node("c", "discovery", "s3"),
        node("d", "support", "s4"),
    ];
    let layout = compute_layout_with(&input, &opts).expect("valid options");
    assert_eq!(layout.edges.len(), 1);
    assert_eq!(layout.edges[0].weight, 2.0);
    let colors: Vec<&str> = layout.legend.iter().map(|e| e.color.as_str()).collect();
    assert_eq!(colors, vec!["#000000", "#ffffff", "#000000"]);
    assert_eq!(build_edges(&input, &opts), layout.edges);
}

#[test]
fn invalid_options_are_rejected() {
    let opts = LayoutOptions {
        repulsion_strength: -1.0,
        ..LayoutOptions::default()
    };
    let err = compute_layout_with(&keyword_sample(), &opts).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidOption {
            name: "repulsionStrength",
            ..
        }
    ));
    assert!(err.to_string().contains("repulsionStrength"));
}

#[test]
fn layout_serializes_with_camel_case_fields() {
    let layout = compute_layout(&[
        node("a", "purchase", "decision"),
        node("b", "purchase", "awareness"),
    ]);
    let json = serde_json::to_value(&layout).expect("serialize layout");
    let first = &json["nodes"][0];
    assert_eq!(first["id"], "a");
    assert_eq!(first["purchaseStage"], "decision");
    assert!(first["x"].is_number());
    assert!(first["color"].is_string());
    assert_eq!(json["edges"][0]["reason"], "Shared intent: purchase");
    assert_eq!(json["legend"][0]["intent"], "purchase");
}

use serde::{Deserialize, Serialize};

/// A classified keyword, as produced by the upstream intent classifier.
///
/// `persona` and `score` ride along to the output untouched; the layout only reads `id`,
/// `intent` and `purchase_stage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentGraphNode {
    pub id: String,
    pub term: String,
    pub intent: String,
    #[serde(default)]
    pub persona: String,
    pub purchase_stage: String,
    #[serde(default)]
    pub score: f64,
}

impl IntentGraphNode {
    pub fn new(
        id: impl Into<String>,
        term: impl Into<String>,
        intent: impl Into<String>,
        purchase_stage: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            term: term.into(),
            intent: intent.into(),
            persona: String::new(),
            purchase_stage: purchase_stage.into(),
            score: 0.0,
        }
    }
}

/// An undirected relation between two nodes that share an intent or a funnel stage.
///
/// Pairs sharing both attributes get two parallel edges; they are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentGraphEdge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedIntentNode {
    #[serde(flatten)]
    pub node: IntentGraphNode,
    /// Normalized into `[-1, 1]`.
    pub x: f64,
    /// Normalized into `[-1, 1]`.
    pub y: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub intent: String,
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub nodes: Vec<PositionedIntentNode>,
    pub edges: Vec<IntentGraphEdge>,
    pub legend: Vec<LegendEntry>,
}

impl Layout {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

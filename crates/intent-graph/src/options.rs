use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PALETTE: [&str; 7] = [
    "#2563eb", "#16a34a", "#f97316", "#9333ea", "#dc2626", "#0891b2", "#ca8a04",
];

/// Tunables for every stage of the pipeline.
///
/// `Default` reproduces the reference constants; [`crate::compute_layout`] always uses it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    /// Weight of edges between nodes sharing an intent.
    pub intent_weight: f64,
    /// Weight of edges between nodes sharing a purchase stage.
    pub stage_weight: f64,

    /// The seed string is `{seed_prefix}{node_count}`.
    pub seed_prefix: String,
    pub base_radius: f64,
    pub radius_jitter: f64,

    pub base_iterations: usize,
    pub iterations_per_node: usize,
    pub max_iterations: usize,

    pub repulsion_strength: f64,
    /// Floor on squared pair distance in the repulsion pass.
    pub min_distance_sq: f64,
    /// Desired spring length is `base_spring_length / max(min_spring_weight, weight)`.
    pub base_spring_length: f64,
    pub min_spring_weight: f64,
    pub min_spring_distance: f64,
    pub spring_strength: f64,
    /// Applied to `velocity + force`, not only to the carried velocity.
    pub damping: f64,

    /// Floor on the width/height used when rescaling into `[-1, 1]`.
    pub min_extent: f64,
    pub palette: Vec<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            intent_weight: 1.25,
            stage_weight: 0.8,
            seed_prefix: "intent-graph-".to_string(),
            base_radius: 0.5,
            radius_jitter: 0.25,
            base_iterations: 120,
            iterations_per_node: 12,
            max_iterations: 300,
            repulsion_strength: 0.05,
            min_distance_sq: 0.01,
            base_spring_length: 80.0,
            min_spring_weight: 0.5,
            min_spring_distance: 0.001,
            spring_strength: 0.1,
            damping: 0.85,
            min_extent: 1.0,
            palette: DEFAULT_PALETTE.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

impl LayoutOptions {
    /// Number of simulation steps for `node_count` nodes. There is no convergence check.
    pub fn iterations_for(&self, node_count: usize) -> usize {
        self.max_iterations.min(
            self.base_iterations
                .saturating_add(self.iterations_per_node.saturating_mul(node_count)),
        )
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("intentWeight", self.intent_weight),
            ("stageWeight", self.stage_weight),
            ("baseSpringLength", self.base_spring_length),
            ("minSpringWeight", self.min_spring_weight),
            ("minSpringDistance", self.min_spring_distance),
            ("springStrength", self.spring_strength),
            ("repulsionStrength", self.repulsion_strength),
            ("minDistanceSq", self.min_distance_sq),
            ("minExtent", self.min_extent),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidOption { name, value });
            }
        }

        let non_negative = [
            ("baseRadius", self.base_radius),
            ("radiusJitter", self.radius_jitter),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidOption { name, value });
            }
        }

        if !(self.damping.is_finite() && self.damping > 0.0 && self.damping <= 1.0) {
            return Err(Error::InvalidOption {
                name: "damping",
                value: self.damping,
            });
        }

        if self.palette.is_empty() {
            return Err(Error::EmptyPalette);
        }
        Ok(())
    }
}

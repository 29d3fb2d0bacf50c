use crate::model::Point;
use crate::options::LayoutOptions;

const MODULUS: u64 = 233_280;
const MULTIPLIER: u64 = 9_301;
const INCREMENT: u64 = 49_297;

/// Small linear-congruential generator seeded from a string.
///
/// Constructed per call; never shared between layouts.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    state: u64,
}

impl SeededRandom {
    pub fn new(seed: &str) -> Self {
        // Char codes are UTF-16 code units.
        let state = seed
            .encode_utf16()
            .fold(0u64, |state, c| (state + u64::from(c) * 31) % MODULUS);
        Self { state }
    }

    /// Seed derived from the node count only; equal-sized inputs start identically.
    pub fn for_node_count(prefix: &str, node_count: usize) -> Self {
        Self::new(&format!("{prefix}{node_count}"))
    }

    /// Next value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * MULTIPLIER + INCREMENT) % MODULUS;
        self.state as f64 / MODULUS as f64
    }
}

/// Places `node_count` nodes on an annulus, one generator draw per node in input order.
pub fn initial_positions(node_count: usize, opts: &LayoutOptions) -> Vec<Point> {
    let mut rng = SeededRandom::for_node_count(&opts.seed_prefix, node_count);
    let n = node_count as f64;
    (0..node_count)
        .map(|i| {
            let angle = (i as f64 / n) * std::f64::consts::TAU;
            let radius = opts.base_radius + rng.next_f64() * opts.radius_jitter;
            Point {
                x: angle.cos() * radius,
                y: angle.sin() * radius,
            }
        })
        .collect()
}

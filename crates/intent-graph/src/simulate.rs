use crate::edges::Spring;
use crate::model::Point;
use crate::options::LayoutOptions;

#[derive(Debug, Clone, Copy, Default)]
struct SimNode {
    pos: Point,
    vx: f64,
    vy: f64,
    fx: f64,
    fy: f64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SimStats {
    pub iterations: usize,
}

/// Fixed-timestep spring embedder: all-pairs repulsion, one spring per edge, damped velocity.
///
/// There is no gravity term, so the layout may drift away from the origin; normalization
/// recenters it afterwards.
#[derive(Debug, Clone)]
pub(crate) struct ForceSimulation<'a> {
    nodes: Vec<SimNode>,
    springs: &'a [Spring],
    opts: &'a LayoutOptions,
}

impl<'a> ForceSimulation<'a> {
    pub fn new(initial: &[Point], springs: &'a [Spring], opts: &'a LayoutOptions) -> Self {
        let nodes = initial
            .iter()
            .map(|&pos| SimNode {
                pos,
                ..SimNode::default()
            })
            .collect();
        Self {
            nodes,
            springs,
            opts,
        }
    }

    pub fn run(&mut self) -> SimStats {
        if self.nodes.is_empty() {
            return SimStats::default();
        }
        let iterations = self.opts.iterations_for(self.nodes.len());
        for _ in 0..iterations {
            self.step();
        }
        SimStats { iterations }
    }

    pub fn step(&mut self) {
        for n in &mut self.nodes {
            n.fx = 0.0;
            n.fy = 0.0;
        }
        self.apply_repulsion();
        self.apply_springs();
        self.integrate();
    }

    #[cfg(test)]
    pub fn positions(&self) -> Vec<Point> {
        self.nodes.iter().map(|n| n.pos).collect()
    }

    pub fn into_positions(self) -> Vec<Point> {
        self.nodes.into_iter().map(|n| n.pos).collect()
    }

    fn apply_repulsion(&mut self) {
        let strength = self.opts.repulsion_strength;
        let min_distance_sq = self.opts.min_distance_sq;
        let len = self.nodes.len();
        for i in 0..len {
            for j in (i + 1)..len {
                let dx = self.nodes[j].pos.x - self.nodes[i].pos.x;
                let dy = self.nodes[j].pos.y - self.nodes[i].pos.y;
                let distance_sq = (dx * dx + dy * dy).max(min_distance_sq);
                let force = strength / distance_sq;
                let distance = distance_sq.sqrt();
                let fx = force * dx / distance;
                let fy = force * dy / distance;

                self.nodes[i].fx -= fx;
                self.nodes[i].fy -= fy;
                self.nodes[j].fx += fx;
                self.nodes[j].fy += fy;
            }
        }
    }

    fn apply_springs(&mut self) {
        let o = self.opts;
        for s in self.springs {
            let dx = self.nodes[s.b].pos.x - self.nodes[s.a].pos.x;
            let dy = self.nodes[s.b].pos.y - self.nodes[s.a].pos.y;
            let distance = (dx * dx + dy * dy).sqrt().max(o.min_spring_distance);
            let desired = o.base_spring_length / s.weight.max(o.min_spring_weight);
            let force = o.spring_strength * (distance - desired);
            let fx = force * dx / distance;
            let fy = force * dy / distance;

            // Positive force (stretched spring) pulls source toward target and vice versa.
            self.nodes[s.a].fx += fx;
            self.nodes[s.a].fy += fy;
            self.nodes[s.b].fx -= fx;
            self.nodes[s.b].fy -= fy;
        }
    }

    fn integrate(&mut self) {
        let damping = self.opts.damping;
        for n in &mut self.nodes {
            n.vx = (n.vx + n.fx) * damping;
            n.vy = (n.vy + n.fy) * damping;
            n.pos.x += n.vx;
            n.pos.y += n.vy;
        }
    }
}

use crate::model::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extents {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Extents {
    /// Bounding box over finite coordinates only; `None` when there are none.
    pub fn of(points: &[Point]) -> Option<Self> {
        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            if p.x.is_finite() {
                min_x = min_x.min(p.x);
                max_x = max_x.max(p.x);
            }
            if p.y.is_finite() {
                min_y = min_y.min(p.y);
                max_y = max_y.max(p.y);
            }
        }
        if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
            return None;
        }
        Some(Self {
            min_x,
            max_x,
            min_y,
            max_y,
        })
    }
}

/// One axis of the rescale: `v -> ((v - min) / extent) * 2 - 1`.
#[derive(Debug, Clone, Copy)]
struct AxisScale {
    min: f64,
    extent: f64,
    /// The raw span overflowed `f64`; operands are halved before subtracting.
    halved: bool,
}

impl AxisScale {
    fn new(min: f64, max: f64, min_extent: f64) -> Self {
        let span = max - min;
        if span.is_finite() {
            return Self {
                min,
                extent: span.max(min_extent),
                halved: false,
            };
        }
        Self {
            min: min * 0.5,
            extent: (max * 0.5 - min * 0.5).max(min_extent * 0.5),
            halved: true,
        }
    }

    fn remap(&self, v: f64) -> f64 {
        if !v.is_finite() {
            return 0.0;
        }
        let offset = if self.halved {
            v * 0.5 - self.min
        } else {
            v - self.min
        };
        (offset / self.extent) * 2.0 - 1.0
    }
}

/// Rescales `points` into `[-1, 1] x [-1, 1]`, each axis independently.
///
/// Width and height are floored at `min_extent`, so a collapsed axis maps to `-1` instead of
/// dividing by zero. Non-finite coordinates map to `0.0`; when no finite coordinate is left the
/// whole layout collapses to the center.
pub fn normalize_positions(points: &[Point], min_extent: f64) -> Vec<Point> {
    let non_finite = points
        .iter()
        .filter(|p| !(p.x.is_finite() && p.y.is_finite()))
        .count();

    let Some(ext) = Extents::of(points) else {
        if !points.is_empty() {
            tracing::warn!(
                total = points.len(),
                "simulation diverged for every node; whole layout collapsed to the center"
            );
        }
        return vec![Point::default(); points.len()];
    };
    if non_finite > 0 {
        tracing::warn!(
            non_finite,
            total = points.len(),
            "simulation produced non-finite coordinates; centering those nodes"
        );
    }

    let x_axis = AxisScale::new(ext.min_x, ext.max_x, min_extent);
    let y_axis = AxisScale::new(ext.min_y, ext.max_y, min_extent);
    tracing::debug!(
        width = x_axis.extent,
        height = y_axis.extent,
        "normalizing layout extents"
    );

    points
        .iter()
        .map(|p| Point {
            x: x_axis.remap(p.x),
            y: y_axis.remap(p.y),
        })
        .collect()
}

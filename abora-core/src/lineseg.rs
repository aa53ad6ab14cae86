use crate::transform::Transform;
use crate::types::{Colour, Point};

/// Fewest points a lineseg keeps: the anchor plus the live endpoint.
pub const MIN_POINTS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinesegId(pub u32);

/// Sizes of the visuals a lineseg is drawn with, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub marker_radius: f64,
    pub stroke_width: f64,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            marker_radius: 10.0,
            stroke_width: 10.0,
        }
    }
}

/// Line between two adjacent points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

/// A multi-point polyline drawn over the spectrogram.
///
/// Points live in pixel space; one marker is drawn per point and one segment per
/// adjacent pair. With `always_forward` set, no point may sit left of its predecessor.
#[derive(Clone, Debug)]
pub struct Lineseg {
    id: LinesegId,
    points: Vec<Point>,
    colour: Colour,
    always_forward: bool,
}

impl Lineseg {
    /// Anchor at (x, y) plus a live endpoint on top of it.
    pub fn new(id: LinesegId, x: f64, y: f64, always_forward: bool) -> Self {
        let mut seg = Self {
            id,
            points: vec![Point::new(x, y)],
            colour: Colour::Drawing,
            always_forward,
        };
        seg.add_point(x, y);
        seg
    }

    pub fn id(&self) -> LinesegId {
        self.id
    }

    pub fn colour(&self) -> Colour {
        self.colour
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn clamp_x(&self, x: f64, prev: Option<&Point>) -> f64 {
        match prev {
            Some(p) if self.always_forward && x < p.x => p.x,
            _ => x,
        }
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        let x = self.clamp_x(x, self.points.last());
        self.points.push(Point::new(x, y));
    }

    /// Drag the last point. The clamp is against the point before it.
    pub fn set_endpoint(&mut self, x: f64, y: f64) {
        let n = self.points.len();
        if n < 2 {
            return;
        }
        let x = self.clamp_x(x, self.points.get(n - 2));
        self.points[n - 1] = Point::new(x, y);
    }

    pub fn set_colour(&mut self, colour: Colour) {
        self.colour = colour;
    }

    pub fn set_selected(&mut self) {
        self.set_colour(Colour::Selected);
    }

    pub fn set_unselected(&mut self) {
        self.set_colour(Colour::Unselected);
    }

    /// Pop the last point and its segment. Refuses below [`MIN_POINTS`].
    pub fn remove_last_point(&mut self) -> bool {
        if self.points.len() <= MIN_POINTS {
            return false;
        }
        self.points.pop();
        true
    }

    /// Re-map every point so it keeps its (time, freq) when the view changes from
    /// `old` to `new`.
    pub fn set_transformation(&mut self, old: &Transform, new: &Transform) {
        for p in &mut self.points {
            *p = Transform::reproject(old, new, *p);
        }
    }

    /// `time:freq` per point, joined by `-`, in insertion order.
    pub fn to_string_form(&self, trans: &Transform) -> String {
        self.points
            .iter()
            .map(|p| {
                let (t, f) = trans.to_domain(*p);
                format!("{t}:{f}")
            })
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn markers(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment {
            from: w[0],
            to: w[1],
        })
    }

    /// Whether (x, y) falls on one of this lineseg's markers or segments.
    pub fn hit_test(&self, x: f64, y: f64, geometry: &Geometry) -> bool {
        let p = Point::new(x, y);
        let r2 = geometry.marker_radius * geometry.marker_radius;
        if self.markers().any(|m| dist_sq(m, p) <= r2) {
            return true;
        }
        let half = geometry.stroke_width / 2.0;
        self.segments()
            .any(|s| dist_sq_to_segment(p, s) <= half * half)
    }
}

fn dist_sq(a: Point, b: Point) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

fn dist_sq_to_segment(p: Point, s: Segment) -> f64 {
    let dx = s.to.x - s.from.x;
    let dy = s.to.y - s.from.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return dist_sq(p, s.from);
    }
    let t = (((p.x - s.from.x) * dx + (p.y - s.from.y) * dy) / len_sq).clamp(0.0, 1.0);
    dist_sq(p, Point::new(s.from.x + t * dx, s.from.y + t * dy))
}

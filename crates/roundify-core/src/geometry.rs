//! Corner mask geometry.
//!
//! Derives the four cut-out outlines of an overlay window from a single
//! radius. Each outline lives in its own `radius × radius` box anchored at
//! its corner of the window. Coordinates are screen-style: `x` grows to the
//! right and `y` grows downwards, so [`Sweep::Clockwise`] means visually
//! clockwise on screen.
//!
//! The painted (opaque) region of every mask is the part of its box that
//! lies outside the arc's circle, which is what makes the display corner
//! look rounded.

use std::fmt::Write as _;

/// Samples per axis when estimating how much of a pixel a mask covers.
const SUPERSAMPLE: u32 = 4;

/// A point in a corner's local coordinate frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Direction an arc travels from its start point to its end point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sweep {
    Clockwise,
    CounterClockwise,
}

/// One edge of a corner outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// A straight edge from the current point to `to`.
    Line { to: Point },
    /// An elliptical arc with equal axes (a circular arc).
    Arc {
        to: Point,
        radius: f64,
        sweep: Sweep,
        large_arc: bool,
    },
}

impl Segment {
    /// End point of the segment.
    pub fn end(&self) -> Point {
        match *self {
            Self::Line { to } | Self::Arc { to, .. } => to,
        }
    }
}

/// Which corner of the window a mask belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

/// A closed outline made of straight edges and a single arc.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerPath {
    pub start: Point,
    pub segments: Vec<Segment>,
    pub closed: bool,
}

impl CornerPath {
    /// Yields every segment together with the point it starts from.
    pub fn edges(&self) -> impl Iterator<Item = (Point, &Segment)> {
        let mut current = self.start;
        self.segments.iter().map(move |segment| {
            let from = current;
            current = segment.end();
            (from, segment)
        })
    }

    /// Centre of the circle the outline's arc lies on.
    ///
    /// Returns `None` if the outline has no arc or the arc cannot be
    /// resolved (zero-length chord, or a chord longer than the diameter).
    pub fn arc_center(&self) -> Option<Point> {
        self.edges().find_map(|(from, segment)| match *segment {
            Segment::Arc {
                to,
                radius,
                sweep,
                large_arc,
            } => arc_center(from, to, radius, sweep, large_arc),
            Segment::Line { .. } => None,
        })
    }

    /// Returns whether the local point is inside the painted region.
    pub fn covers(&self, x: f64, y: f64, radius: f64) -> bool {
        if !(0.0..=radius).contains(&x) || !(0.0..=radius).contains(&y) {
            return false;
        }
        match self.arc_center() {
            Some(center) => Point::new(x, y).distance(center) > radius,
            None => false,
        }
    }

    /// Fraction (0.0–1.0) of the unit pixel whose top-left corner is at
    /// local `(px, py)` that falls inside the painted region.
    pub fn coverage(&self, px: f64, py: f64, radius: f64) -> f64 {
        match self.arc_center() {
            Some(center) => coverage_outside(center, px, py, radius),
            None => 0.0,
        }
    }

    /// Renders the outline as SVG path data, e.g. `M 0 0 L 16 0 A 16 16 0 0 0 0 16 Z`.
    pub fn to_svg(&self) -> String {
        let mut d = format!("M {} {}", self.start.x, self.start.y);
        for segment in &self.segments {
            match *segment {
                Segment::Line { to } => {
                    let _ = write!(d, " L {} {}", to.x, to.y);
                }
                Segment::Arc {
                    to,
                    radius,
                    sweep,
                    large_arc,
                } => {
                    // SVG's positive-angle direction is clockwise on a y-down canvas.
                    let sweep_flag = u8::from(sweep == Sweep::Clockwise);
                    let _ = write!(
                        d,
                        " A {radius} {radius} 0 {} {sweep_flag} {} {}",
                        u8::from(large_arc),
                        to.x,
                        to.y
                    );
                }
            }
        }
        if self.closed {
            d.push_str(" Z");
        }
        d
    }
}

/// Supersampled share of a unit pixel that lies inside the `radius` box
/// and outside the circle around `center`.
fn coverage_outside(center: Point, px: f64, py: f64, radius: f64) -> f64 {
    let step = 1.0 / f64::from(SUPERSAMPLE);
    let mut hits = 0u32;
    for sy in 0..SUPERSAMPLE {
        for sx in 0..SUPERSAMPLE {
            let x = px + (f64::from(sx) + 0.5) * step;
            let y = py + (f64::from(sy) + 0.5) * step;
            let in_box = (0.0..=radius).contains(&x) && (0.0..=radius).contains(&y);
            if in_box && Point::new(x, y).distance(center) > radius {
                hits += 1;
            }
        }
    }
    f64::from(hits) / f64::from(SUPERSAMPLE * SUPERSAMPLE)
}

/// Resolves the centre of a circular arc from its endpoints.
///
/// Of the two circles of the given radius through both points, picks the
/// one on which travelling in `sweep` direction yields the requested arc
/// size (minor or major).
fn arc_center(from: Point, to: Point, radius: f64, sweep: Sweep, large_arc: bool) -> Option<Point> {
    let (cx, cy) = (to.x - from.x, to.y - from.y);
    let chord = cx.hypot(cy);
    if chord <= f64::EPSILON || radius <= 0.0 {
        return None;
    }
    let half = chord / 2.0;
    if half > radius * (1.0 + 1e-9) {
        return None;
    }
    let offset = (radius * radius - half * half).max(0.0).sqrt();
    let mid = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    let (nx, ny) = (-cy / chord, cx / chord);
    let candidates = [
        Point::new(mid.x + offset * nx, mid.y + offset * ny),
        Point::new(mid.x - offset * nx, mid.y - offset * ny),
    ];

    // A positive cross product means `to` lies less than half a turn
    // clockwise from `from` around the candidate centre.
    let want_positive = (sweep == Sweep::Clockwise) != large_arc;
    candidates.into_iter().find(|c| {
        let cross = (from.x - c.x) * (to.y - c.y) - (from.y - c.y) * (to.x - c.x);
        if want_positive { cross >= 0.0 } else { cross <= 0.0 }
    })
}

/// The four corner cut-outs for one radius.
#[derive(Debug, Clone, PartialEq)]
pub struct CornerMasks {
    radius: f64,
    top_left: CornerPath,
    top_right: CornerPath,
    bottom_left: CornerPath,
    bottom_right: CornerPath,
}

impl CornerMasks {
    /// Builds the four outlines for `radius`.
    ///
    /// Callers hide the overlay instead of calling this for `radius <= 0`;
    /// a non-positive radius yields outlines that cover nothing.
    pub fn generate(radius: f64) -> Self {
        let r = radius;
        let origin = Point::new(0.0, 0.0);
        let arc = |to: Point, sweep: Sweep| Segment::Arc {
            to,
            radius: r,
            sweep,
            large_arc: false,
        };
        let line = |x: f64, y: f64| Segment::Line {
            to: Point::new(x, y),
        };

        let top_left = CornerPath {
            start: origin,
            segments: vec![
                line(r, 0.0),
                arc(Point::new(0.0, r), Sweep::CounterClockwise),
            ],
            closed: true,
        };
        let top_right = CornerPath {
            start: origin,
            segments: vec![
                line(r, 0.0),
                line(r, r),
                arc(origin, Sweep::CounterClockwise),
            ],
            closed: true,
        };
        let bottom_left = CornerPath {
            start: origin,
            segments: vec![line(0.0, r), line(r, r), arc(origin, Sweep::Clockwise)],
            closed: true,
        };
        let bottom_right = CornerPath {
            start: Point::new(r, 0.0),
            segments: vec![
                line(r, r),
                line(0.0, r),
                arc(Point::new(r, 0.0), Sweep::CounterClockwise),
            ],
            closed: true,
        };

        Self {
            radius,
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn get(&self, corner: Corner) -> &CornerPath {
        match corner {
            Corner::TopLeft => &self.top_left,
            Corner::TopRight => &self.top_right,
            Corner::BottomLeft => &self.bottom_left,
            Corner::BottomRight => &self.bottom_right,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Corner, &CornerPath)> {
        Corner::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    /// Window-space position of a corner's local box for a window of the
    /// given size.
    pub fn origin(&self, corner: Corner, width: i32, height: i32) -> Point {
        let right = f64::from(width) - self.radius;
        let bottom = f64::from(height) - self.radius;
        match corner {
            Corner::TopLeft => Point::new(0.0, 0.0),
            Corner::TopRight => Point::new(right, 0.0),
            Corner::BottomLeft => Point::new(0.0, bottom),
            Corner::BottomRight => Point::new(right, bottom),
        }
    }

    /// Calls `paint(x, y, alpha)` for every window pixel a mask touches.
    ///
    /// Pixels outside the window are skipped. When the corner boxes overlap
    /// (radius above half the window size) a pixel may be visited more than
    /// once; callers keep the larger alpha.
    pub fn paint(&self, width: i32, height: i32, mut paint: impl FnMut(i32, i32, u8)) {
        if self.radius <= 0.0 || width <= 0 || height <= 0 {
            return;
        }
        for (corner, path) in self.iter() {
            let Some(center) = path.arc_center() else {
                continue;
            };
            let origin = self.origin(corner, width, height);
            let x0 = origin.x.floor().max(0.0) as i32;
            let y0 = origin.y.floor().max(0.0) as i32;
            let x1 = (origin.x + self.radius).ceil().min(f64::from(width)) as i32;
            let y1 = (origin.y + self.radius).ceil().min(f64::from(height)) as i32;
            for y in y0..y1 {
                for x in x0..x1 {
                    let local_x = f64::from(x) - origin.x;
                    let local_y = f64::from(y) - origin.y;
                    let coverage = coverage_outside(center, local_x, local_y, self.radius);
                    if coverage > 0.0 {
                        paint(x, y, (coverage * 255.0).round() as u8);
                    }
                }
            }
        }
    }
}

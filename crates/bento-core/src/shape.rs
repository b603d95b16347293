// File: crates/bento-core/src/shape.rs
// Summary: Path generators (polyline, area, annular sector) and pie layout.

use std::f32::consts::{PI, TAU};

use crate::scene::PathCmd;
use crate::types::Point;

/// Straight-segment polyline through `points`.
pub fn line_path(points: &[Point]) -> Vec<PathCmd> {
    let mut cmds = Vec::with_capacity(points.len());
    for (i, p) in points.iter().enumerate() {
        cmds.push(if i == 0 { PathCmd::MoveTo(*p) } else { PathCmd::LineTo(*p) });
    }
    cmds
}

/// Closed region between the polyline and the horizontal line `y = baseline`.
pub fn area_path(points: &[Point], baseline: f32) -> Vec<PathCmd> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else { return Vec::new(); };
    let mut cmds = Vec::with_capacity(points.len() + 3);
    cmds.push(PathCmd::MoveTo(Point::new(first.x, baseline)));
    cmds.extend(points.iter().map(|p| PathCmd::LineTo(*p)));
    cmds.push(PathCmd::LineTo(Point::new(last.x, baseline)));
    cmds.push(PathCmd::Close);
    cmds
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// One slice produced by [`pie`]. Angles are radians, 0 at 12 o'clock,
/// increasing clockwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieArc {
    /// Index into the input slice.
    pub index: usize,
    pub value: f64,
    pub start_angle: f32,
    pub end_angle: f32,
}

impl PieArc {
    pub fn sweep(&self) -> f32 { self.end_angle - self.start_angle }
    pub fn mid_angle(&self) -> f32 { (self.start_angle + self.end_angle) / 2.0 }

    pub fn contains_angle(&self, a: f32) -> bool {
        a >= self.start_angle && a < self.end_angle
    }
}

/// Pie layout over `values`: arcs are laid out by descending value (ties keep
/// input order) and returned in input order. Negative and non-finite values
/// count as 0; an all-zero input gives zero-width arcs.
pub fn pie(values: &[f64]) -> Vec<PieArc> {
    let clean: Vec<f64> = values.iter().map(|v| if v.is_finite() { v.max(0.0) } else { 0.0 }).collect();
    let total: f64 = clean.iter().sum();
    let k = if total > 0.0 { TAU as f64 / total } else { 0.0 };

    let mut order: Vec<usize> = (0..clean.len()).collect();
    order.sort_by(|&a, &b| clean[b].total_cmp(&clean[a]));

    let mut arcs = vec![PieArc { index: 0, value: 0.0, start_angle: 0.0, end_angle: 0.0 }; clean.len()];
    let mut angle = 0.0f64;
    for i in order {
        let end = angle + clean[i] * k;
        arcs[i] = PieArc { index: i, value: clean[i], start_angle: angle as f32, end_angle: end as f32 };
        angle = end;
    }
    arcs
}

/// Point at `angle` (0 = up, clockwise) and `radius` around `center`.
pub fn polar(center: Point, radius: f32, angle: f32) -> Point {
    Point::new(center.x + radius * angle.sin(), center.y - radius * angle.cos())
}

/// Angle (0 = up, clockwise, in `[0, 2pi)`) of `p` seen from `center`.
pub fn angle_of(center: Point, p: Point) -> f32 {
    let a = (p.x - center.x).atan2(center.y - p.y);
    if a < 0.0 { a + TAU } else { a }
}

/// Annular sector between `inner` and `outer` radii with rounded corners.
///
/// The corner radius shrinks to fit thin rings and narrow slices; an `inner`
/// of 0 gives a pie wedge.
pub fn arc_path(center: Point, inner: f32, outer: f32, start: f32, end: f32, corner: f32) -> Vec<PathCmd> {
    let sweep = end - start;
    if sweep <= 0.0 || outer <= 0.0 {
        return Vec::new();
    }
    if sweep >= TAU - 1e-4 {
        return ring_path(center, inner, outer);
    }
    let inner = inner.clamp(0.0, outer);
    let mut cr = corner.max(0.0).min((outer - inner) / 2.0);

    // angular offsets of the corner tangent points on each circle
    let offsets = |cr: f32| -> (f32, f32) {
        let o = if outer - cr > cr { (cr / (outer - cr)).asin() } else { PI / 2.0 };
        let i = if inner > 0.0 { (cr / (inner + cr)).asin() } else { 0.0 };
        (o, i)
    };
    let (mut d_out, mut d_in) = offsets(cr);
    if cr > 0.0 && (2.0 * d_out > sweep || 2.0 * d_in > sweep) {
        // narrow slice: scale the corner down until both arcs keep some length
        let fit = (outer * (sweep / 2.0).sin()).min(if inner > 0.0 { inner * (sweep / 2.0).sin() } else { f32::MAX });
        cr = cr.min(fit / 2.0);
        let o = offsets(cr);
        d_out = o.0;
        d_in = o.1;
        if 2.0 * d_out > sweep || 2.0 * d_in > sweep {
            cr = 0.0;
            d_out = 0.0;
            d_in = 0.0;
        }
    }

    let mut cmds = Vec::with_capacity(12);
    let radial = |angle: f32, r: f32| polar(center, r, angle);

    if cr == 0.0 {
        cmds.push(PathCmd::MoveTo(radial(start, outer)));
        cmds.push(PathCmd::ArcTo { radius: outer, large_arc: sweep > PI, sweep: true, to: radial(end, outer) });
        if inner > 0.0 {
            cmds.push(PathCmd::LineTo(radial(end, inner)));
            cmds.push(PathCmd::ArcTo { radius: inner, large_arc: sweep > PI, sweep: false, to: radial(start, inner) });
        } else {
            cmds.push(PathCmd::LineTo(center));
        }
        cmds.push(PathCmd::Close);
        return cmds;
    }

    let out_edge = ((outer - cr).powi(2) - cr * cr).max(0.0).sqrt();
    let in_edge = ((inner + cr).powi(2) - cr * cr).max(0.0).sqrt();
    let outer_sweep = sweep - 2.0 * d_out;
    let inner_sweep = sweep - 2.0 * d_in;

    cmds.push(PathCmd::MoveTo(radial(start + d_out, outer)));
    cmds.push(PathCmd::ArcTo { radius: outer, large_arc: outer_sweep > PI, sweep: true, to: radial(end - d_out, outer) });
    cmds.push(PathCmd::ArcTo { radius: cr, large_arc: false, sweep: true, to: radial(end, out_edge) });
    if inner > 0.0 {
        cmds.push(PathCmd::LineTo(radial(end, in_edge)));
        cmds.push(PathCmd::ArcTo { radius: cr, large_arc: false, sweep: true, to: radial(end - d_in, inner) });
        cmds.push(PathCmd::ArcTo { radius: inner, large_arc: inner_sweep > PI, sweep: false, to: radial(start + d_in, inner) });
        cmds.push(PathCmd::ArcTo { radius: cr, large_arc: false, sweep: true, to: radial(start, in_edge) });
    } else {
        cmds.push(PathCmd::LineTo(center));
    }
    cmds.push(PathCmd::LineTo(radial(start, out_edge)));
    cmds.push(PathCmd::ArcTo { radius: cr, large_arc: false, sweep: true, to: radial(start + d_out, outer) });
    cmds.push(PathCmd::Close);
    cmds
}

/// Full ring (or disc when `inner` is 0) as two half arcs per circle.
fn ring_path(center: Point, inner: f32, outer: f32) -> Vec<PathCmd> {
    let mut cmds = vec![
        PathCmd::MoveTo(polar(center, outer, 0.0)),
        PathCmd::ArcTo { radius: outer, large_arc: false, sweep: true, to: polar(center, outer, PI) },
        PathCmd::ArcTo { radius: outer, large_arc: false, sweep: true, to: polar(center, outer, 0.0) },
        PathCmd::Close,
    ];
    if inner > 0.0 {
        cmds.extend([
            PathCmd::MoveTo(polar(center, inner, 0.0)),
            PathCmd::ArcTo { radius: inner, large_arc: false, sweep: false, to: polar(center, inner, PI) },
            PathCmd::ArcTo { radius: inner, large_arc: false, sweep: false, to: polar(center, inner, 0.0) },
            PathCmd::Close,
        ]);
    }
    cmds
}

//! SVG path data for annular arcs and ribbons.

use super::fmt;
use std::f64::consts::{PI, TAU};

const EPSILON: f64 = 1e-12;

/// Angles run clockwise from 12 o'clock with y increasing downwards.
pub(crate) fn polar_xy(radius: f64, angle: f64) -> (f64, f64) {
    let x = radius * angle.sin();
    let y = -radius * angle.cos();
    (x, y)
}

fn large_arc(span: f64) -> u8 {
    if span > PI { 1 } else { 0 }
}

/// Ring segment between `inner` and `outer` from `start` to `end`.
pub(crate) fn annular_arc(inner: f64, outer: f64, start: f64, end: f64) -> String {
    let span = (end - start).abs();
    if span >= TAU - EPSILON {
        // A single SVG arc cannot close on its start point; draw two half circles per ring.
        let o = fmt(outer);
        let mut d = format!("M0,-{o}A{o},{o},0,1,1,0,{o}A{o},{o},0,1,1,0,-{o}");
        if inner > EPSILON {
            let i = fmt(inner);
            d.push_str(&format!("M0,-{i}A{i},{i},0,1,0,0,{i}A{i},{i},0,1,0,0,-{i}"));
        }
        d.push('Z');
        return d;
    }

    let large = large_arc(span);
    let (x0, y0) = polar_xy(outer, start);
    let (x1, y1) = polar_xy(outer, end);
    let mut d = format!(
        "M{},{}A{o},{o},0,{large},1,{},{}",
        fmt(x0),
        fmt(y0),
        fmt(x1),
        fmt(y1),
        o = fmt(outer),
    );
    if inner > EPSILON {
        let (x2, y2) = polar_xy(inner, end);
        let (x3, y3) = polar_xy(inner, start);
        d.push_str(&format!(
            "L{},{}A{i},{i},0,{large},0,{},{}Z",
            fmt(x2),
            fmt(y2),
            fmt(x3),
            fmt(y3),
            i = fmt(inner),
        ));
    } else {
        d.push_str("L0,0Z");
    }
    d
}

fn arc_to(d: &mut String, radius: f64, start: f64, end: f64) {
    let span = end - start;
    if span.abs() <= EPSILON {
        return;
    }
    let (x, y) = polar_xy(radius, end);
    d.push_str(&format!(
        "A{r},{r},0,{},1,{},{}",
        large_arc(span),
        fmt(x),
        fmt(y),
        r = fmt(radius),
    ));
}

/// Ribbon between two sub-spans of the circle at `radius`, bent through the center.
pub(crate) fn ribbon(
    radius: f64,
    source_start: f64,
    source_end: f64,
    target_start: f64,
    target_end: f64,
) -> String {
    let (sx0, sy0) = polar_xy(radius, source_start);
    let mut d = format!("M{},{}", fmt(sx0), fmt(sy0));
    arc_to(&mut d, radius, source_start, source_end);
    if source_start != target_start || source_end != target_end {
        let (tx0, ty0) = polar_xy(radius, target_start);
        d.push_str(&format!("Q0,0,{},{}", fmt(tx0), fmt(ty0)));
        arc_to(&mut d, radius, target_start, target_end);
    }
    d.push_str(&format!("Q0,0,{},{}Z", fmt(sx0), fmt(sy0)));
    d
}

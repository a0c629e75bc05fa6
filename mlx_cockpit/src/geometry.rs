//! Polar gauge geometry: point conversion, arc paths, tick ring and needle layout.
//!
//! Angles are in degrees, measured clockwise from twelve o'clock. Coordinates use a
//! y-down plane (SVG convention); painters with a y-up plane flip on their side.

use std::fmt;

/// Start of the gauge sweep (below-left).
pub const SWEEP_START: f64 = 150.0;
/// End of the gauge sweep (below-right, past the top).
pub const SWEEP_END: f64 = 390.0;
/// Number of tick intervals; ticks are placed at indices `0..=TICK_COUNT`.
pub const TICK_COUNT: u32 = 8;

const TRACK_INSET: f64 = 10.0;
const MAJOR_TICK_LEN: f64 = 8.0;
const MINOR_TICK_LEN: f64 = 5.0;
const LABEL_INSET: f64 = 16.0;
const NEEDLE_TIP_INSET: f64 = 12.0;
const NEEDLE_BASE_RADIUS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

pub fn polar_to_cartesian(cx: f64, cy: f64, r: f64, deg: f64) -> Point {
    let rad = (deg - 90.0).to_radians();
    Point {
        x: cx + r * rad.cos(),
        y: cy + r * rad.sin(),
    }
}

/// A single circular arc, drawn from the end angle back to the start angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcPath {
    pub from: Point,
    pub to: Point,
    pub radius: f64,
    pub large_arc: bool,
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "M {} {} A {r} {r} 0 {} 0 {} {}",
            self.from.x,
            self.from.y,
            u8::from(self.large_arc),
            self.to.x,
            self.to.y,
            r = self.radius,
        )
    }
}

/// Arc from `end_angle` to `start_angle`, sweeping in the decreasing-angle direction.
///
/// Value arcs and track arcs share the same start point so they nest without gaps.
pub fn describe_arc(cx: f64, cy: f64, r: f64, start_angle: f64, end_angle: f64) -> ArcPath {
    ArcPath {
        from: polar_to_cartesian(cx, cy, r, end_angle),
        to: polar_to_cartesian(cx, cy, r, start_angle),
        radius: r,
        large_arc: end_angle - start_angle > 180.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickLabel {
    pub at: Point,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub index: u32,
    pub angle: f64,
    pub outer: Point,
    pub inner: Point,
    pub major: bool,
    pub label: Option<TickLabel>,
}

/// Needle triangle: tip near the rim, two base points either side of the pivot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Needle {
    pub tip: Point,
    pub base_left: Point,
    pub base_right: Point,
}

impl Needle {
    pub fn points(&self) -> [Point; 3] {
        [self.tip, self.base_left, self.base_right]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GaugeLayout {
    pub size: f64,
    pub center: Point,
    pub radius: f64,
    pub value_angle: f64,
    pub ticks: Vec<Tick>,
    pub needle: Needle,
}

impl GaugeLayout {
    pub fn track(&self) -> ArcPath {
        describe_arc(self.center.x, self.center.y, self.radius, SWEEP_START, SWEEP_END)
    }

    /// Coloured value arc; `None` when the needle rests at the start of the sweep.
    pub fn value_arc(&self) -> Option<ArcPath> {
        (self.value_angle > SWEEP_START).then(|| {
            describe_arc(
                self.center.x,
                self.center.y,
                self.radius,
                SWEEP_START,
                self.value_angle,
            )
        })
    }
}

/// Map `value` onto the sweep after clamping it to `[0, max]`.
///
/// A non-positive `max` pins the needle at the start of the sweep.
pub fn value_angle(value: f64, max: f64) -> f64 {
    if !(max > 0.0) {
        return SWEEP_START;
    }
    // f64::max drops NaN, so a NaN value lands on 0.
    let clamped = value.max(0.0).min(max);
    SWEEP_START + (clamped / max) * (SWEEP_END - SWEEP_START)
}

pub fn layout_gauge(value: f64, max: f64, size: f64) -> GaugeLayout {
    let c = size / 2.0;
    let r = c - TRACK_INSET;
    let total = SWEEP_END - SWEEP_START;
    let angle = value_angle(value, max);

    let ticks = (0..=TICK_COUNT)
        .map(|i| {
            let frac = f64::from(i) / f64::from(TICK_COUNT);
            let tick_angle = SWEEP_START + frac * total;
            let major = i % 2 == 0;
            let len = if major { MAJOR_TICK_LEN } else { MINOR_TICK_LEN };
            Tick {
                index: i,
                angle: tick_angle,
                outer: polar_to_cartesian(c, c, r, tick_angle),
                inner: polar_to_cartesian(c, c, r - len, tick_angle),
                major,
                label: major.then(|| TickLabel {
                    at: polar_to_cartesian(c, c, r - LABEL_INSET, tick_angle),
                    value: (frac * max).round() as i64,
                }),
            }
        })
        .collect();

    let needle = Needle {
        tip: polar_to_cartesian(c, c, r - NEEDLE_TIP_INSET, angle),
        base_left: polar_to_cartesian(c, c, NEEDLE_BASE_RADIUS, angle - 90.0),
        base_right: polar_to_cartesian(c, c, NEEDLE_BASE_RADIUS, angle + 90.0),
    };

    GaugeLayout {
        size,
        center: Point { x: c, y: c },
        radius: r,
        value_angle: angle,
        ticks,
        needle,
    }
}

/// Throughput gauge ceiling: at least 20, always a step of headroom above `v`.
pub fn throughput_ceiling(v: f64) -> f64 {
    let v = v.max(0.0);
    f64::max(20.0, (v / 10.0).ceil() * 10.0 + 10.0)
}

/// Latency gauge ceiling: at least 5 seconds, two seconds of headroom above `v`.
pub fn latency_ceiling(v: f64) -> f64 {
    let v = v.max(0.0);
    f64::max(5.0, v.ceil() + 2.0)
}

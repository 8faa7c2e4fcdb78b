//! Interpolation helpers:
//! - lerp_f32 (linear segments)
//! - cubic_bezier (bezier segments with handles at thirds)
//! - auto_tangent (automatic handle slopes)

/// Linear interpolation of scalars.
#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic Bezier basis function
#[inline]
pub fn cubic_bezier(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    u * u * u * p0 + 3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t * p3
}

/// Bezier segment between `(t0, v0)` and `(t1, v1)` with outgoing slope `m0` and
/// incoming slope `m1`. Handles sit at one third of the segment width, which keeps
/// the time axis linear in the curve parameter, so `frac` is used directly.
#[inline]
pub fn bezier_segment(v0: f32, v1: f32, m0: f32, m1: f32, width: f32, frac: f32) -> f32 {
    let third = width / 3.0;
    cubic_bezier(v0, v0 + m0 * third, v1 - m1 * third, v1, frac.clamp(0.0, 1.0))
}

/// Automatic slope at `key` given its neighbours as `(time, value)` pairs.
/// End keys are flat. With `clamped`, local extremes are flat too.
pub fn auto_tangent(
    prev: Option<(f32, f32)>,
    key: (f32, f32),
    next: Option<(f32, f32)>,
    clamped: bool,
) -> f32 {
    let (Some(p), Some(n)) = (prev, next) else {
        return 0.0;
    };
    if clamped {
        let peak = key.1 >= p.1 && key.1 >= n.1;
        let valley = key.1 <= p.1 && key.1 <= n.1;
        if peak || valley {
            return 0.0;
        }
    }
    let dt = n.0 - p.0;
    if dt <= 0.0 {
        return 0.0;
    }
    (n.1 - p.1) / dt
}

/// `(t, slope * t + intercept + noise(i))` for `t = t0 + i * dt`.
pub fn line(
    t0: f64,
    dt: f64,
    n: usize,
    slope: f64,
    intercept: f64,
    noise: impl Fn(usize) -> f64,
) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let t = t0 + i as f64 * dt;
            (t, slope * t + intercept + noise(i))
        })
        .collect()
}

/// Deterministic bounded noise in `[-amplitude, amplitude]`.
pub fn wobble(amplitude: f64) -> impl Fn(usize) -> f64 {
    move |i| amplitude * (2.3 * i as f64).sin()
}

pub fn clean(_: usize) -> f64 {
    0.0
}

/// Continuous polyline through `knot` with slope `before` up to the knot
/// time and `after` from then on, sampled at integer times `0..n`.
pub fn kinked(n: usize, knot: (f64, f64), before: f64, after: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            let slope = if t <= knot.0 { before } else { after };
            (t, knot.1 + slope * (t - knot.0))
        })
        .collect()
}

/// Height `s * (period - s)` of a body that jumps off the ground (height 0)
/// every `period`, `s` being the time since the last jump. Each jump lands
/// exactly when the next one starts. Sampled at `t = i + phase`.
pub fn jumps(n: usize, period: f64, phase: f64) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let t = i as f64 + phase;
            let s = t % period;
            (t, s * (period - s))
        })
        .collect()
}

// File: crates/progress-core/src/grid.rs
// Summary: Tick layout helpers ("nice" 1/2/5 x 10^n steps).

/// Step for roughly `count` intervals over `[start, stop]`, rounded to 1, 2, 5 or 10 x 10^n.
pub fn nice_step(start: f64, stop: f64, count: usize) -> f64 {
    let span = (stop - start).abs();
    if span == 0.0 || count == 0 || !span.is_finite() {
        return 0.0;
    }
    let raw = span / count as f64;
    let power = raw.log10().floor();
    let base = 10f64.powf(power);
    let error = raw / base;
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    factor * base
}

/// Ascending tick values within `[min(start, stop), max(start, stop)]`.
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if start <= stop { (start, stop) } else { (stop, start) };
    let step = nice_step(lo, hi, count);
    if step == 0.0 {
        return if lo.is_finite() { vec![lo] } else { Vec::new() };
    }
    // sub-unit steps divide by the inverse to keep values like 0.6 exact
    let inv = (1.0 / step).round();
    let fractional = step < 1.0;
    let (first, last) = if fractional {
        ((lo * inv).ceil(), (hi * inv).floor())
    } else {
        ((lo / step).ceil(), (hi / step).floor())
    };
    let to_value = |i: f64| if fractional { i / inv } else { i * step };
    let n = (last - first).max(-1.0) as i64 + 1;
    (0..n).map(|k| to_value(first + k as f64)).collect()
}

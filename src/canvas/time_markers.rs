use abora_core::Transform;
use web_sys::CanvasRenderingContext2d;

// ── Tick spacing ──────────────────────────────────────────────────────────

/// 1-2-5 progression of time tick intervals in seconds, from 1 ms to 10 min.
const TIME_INTERVALS: &[f64] = &[
    0.001, 0.002, 0.005,
    0.01, 0.02, 0.05,
    0.1, 0.2, 0.5,
    1.0, 2.0, 5.0,
    10.0, 30.0, 60.0,
    120.0, 300.0, 600.0,
];

/// Frequency tick intervals in Hz.
const FREQ_INTERVALS: &[f64] = &[
    10.0, 20.0, 50.0,
    100.0, 200.0, 500.0,
    1_000.0, 2_000.0, 5_000.0,
    10_000.0, 20_000.0, 50_000.0,
];

/// Upper bound on ticks drawn along one edge.
const MAX_TICKS: usize = 64;

/// Multiples of `interval` within `[lo, hi]`, at most [`MAX_TICKS`] of them.
fn tick_positions(lo: f64, hi: f64, interval: f64) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite() && interval > 0.0) {
        return Vec::new();
    }
    let first = (lo / interval).ceil() * interval;
    (0..MAX_TICKS)
        .map(|i| first + i as f64 * interval)
        .take_while(|&v| v <= hi)
        .collect()
}

/// Smallest interval that keeps ticks at least `min_px` apart, given `units_per_px`.
fn pick_interval(intervals: &[f64], units_per_px: f64, min_px: f64) -> f64 {
    let wanted = units_per_px.abs() * min_px;
    intervals
        .iter()
        .copied()
        .find(|&i| i >= wanted)
        .unwrap_or(intervals[intervals.len() - 1])
}

fn format_time_label(seconds: f64, interval: f64) -> String {
    if interval < 0.01 {
        format!("{:.1}ms", seconds * 1000.0)
    } else if interval < 1.0 {
        format!("{:.0}ms", seconds * 1000.0)
    } else if interval < 60.0 {
        format!("{:.0}s", seconds)
    } else {
        let mins = (seconds / 60.0).floor() as u32;
        let secs = (seconds % 60.0).round() as u32;
        if secs == 0 {
            format!("{}m", mins)
        } else {
            format!("{}m{:02}s", mins, secs)
        }
    }
}

fn format_freq_label(hz: f64, interval: f64) -> String {
    if interval >= 1_000.0 {
        format!("{:.0} kHz", hz / 1000.0)
    } else if interval >= 100.0 {
        format!("{:.1} kHz", hz / 1000.0)
    } else {
        format!("{:.0} Hz", hz)
    }
}

// ── Drawing ───────────────────────────────────────────────────────────────

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64) {
    if let Ok(metrics) = ctx.measure_text(label) {
        let tw = metrics.width();
        ctx.set_fill_style_str("rgba(0,0,0,0.6)");
        ctx.fill_rect(x - 1.0, y - 11.0, tw + 2.0, 12.0);
    }
    ctx.set_fill_style_str("rgba(255,255,255,0.7)");
    let _ = ctx.fill_text(label, x, y);
}

/// Time ticks along the bottom edge.
pub fn draw_time_markers(ctx: &CanvasRenderingContext2d, trans: &Transform, width: f64, height: f64) {
    if width <= 0.0 || trans.x_mul <= 0.0 {
        return;
    }
    let interval = pick_interval(TIME_INTERVALS, trans.x_mul, 100.0);
    let start = trans.time_at(0.0);
    let end = trans.time_at(width);

    ctx.set_font("10px sans-serif");
    ctx.set_text_baseline("alphabetic");
    ctx.set_stroke_style_str("rgba(255,255,255,0.35)");
    ctx.set_line_width(1.0);

    for t in tick_positions(start, end, interval) {
        let x = trans.x_for_time(t);
        ctx.begin_path();
        ctx.move_to(x, height - 12.0);
        ctx.line_to(x, height);
        ctx.stroke();

        let label = format_time_label(t, interval);
        draw_label(ctx, &label, x + 3.0, height - 14.0);
    }
}

/// Frequency ticks along the left edge.
pub fn draw_freq_markers(ctx: &CanvasRenderingContext2d, trans: &Transform, width: f64, height: f64) {
    if height <= 0.0 || trans.y_mul == 0.0 {
        return;
    }
    let interval = pick_interval(FREQ_INTERVALS, trans.y_mul, 40.0);
    let top = trans.freq_at(0.0);
    let bottom = trans.freq_at(height);
    let (lo, hi) = if top < bottom { (top, bottom) } else { (bottom, top) };

    ctx.set_font("10px sans-serif");
    ctx.set_stroke_style_str("rgba(255,255,255,0.35)");
    ctx.set_line_width(1.0);

    for f in tick_positions(lo, hi, interval) {
        let y = trans.y_for_freq(f);
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(12.0_f64.min(width), y);
        ctx.stroke();

        let label = format_freq_label(f, interval);
        draw_label(ctx, &label, 14.0, y + 4.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_keeps_ticks_apart() {
        // 100 columns per second: 100 px is one second.
        assert_eq!(pick_interval(TIME_INTERVALS, 0.01, 100.0), 1.0);
        assert_eq!(pick_interval(TIME_INTERVALS, 0.0012, 100.0), 0.2);
        // Falls back to the coarsest interval.
        assert_eq!(pick_interval(TIME_INTERVALS, 100.0, 100.0), 600.0);
        // Sign of the scale does not matter.
        assert_eq!(pick_interval(FREQ_INTERVALS, -10.0, 40.0), 500.0);
    }

    #[test]
    fn ticks_are_multiples_within_range() {
        assert_eq!(tick_positions(0.5, 3.2, 1.0), vec![1.0, 2.0, 3.0]);
        assert_eq!(tick_positions(2.0, 2.0, 1.0), vec![2.0]);
        assert!(tick_positions(3.0, 1.0, 1.0).is_empty());
        assert!(tick_positions(f64::NAN, 1.0, 1.0).is_empty());
    }

    #[test]
    fn huge_frequency_range_is_capped() {
        // 1e12 Hz over 500 rows: the coarsest interval still yields millions of ticks.
        let trans = Transform {
            x_add: 0.0,
            x_mul: 0.01,
            y_add: 1e12,
            y_mul: -1e12 / 500.0,
        };
        let interval = pick_interval(FREQ_INTERVALS, trans.y_mul, 40.0);
        assert_eq!(interval, 50_000.0);
        let ticks = tick_positions(trans.freq_at(500.0), trans.freq_at(0.0), interval);
        assert_eq!(ticks.len(), MAX_TICKS);
        assert_eq!(ticks[MAX_TICKS - 1], (MAX_TICKS - 1) as f64 * interval);
    }

    #[test]
    fn labels() {
        assert_eq!(format_time_label(0.005, 0.005), "5.0ms");
        assert_eq!(format_time_label(0.25, 0.05), "250ms");
        assert_eq!(format_time_label(4.0, 1.0), "4s");
        assert_eq!(format_time_label(150.0, 60.0), "2m30s");
        assert_eq!(format_time_label(120.0, 120.0), "2m");

        assert_eq!(format_freq_label(3000.0, 1000.0), "3 kHz");
        assert_eq!(format_freq_label(1500.0, 500.0), "1.5 kHz");
        assert_eq!(format_freq_label(40.0, 20.0), "40 Hz");
    }
}

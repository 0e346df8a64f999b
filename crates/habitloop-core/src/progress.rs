//! Proportional progress bar rendering.
//!
//! Today's completion count is rendered against a capacity denominator as a
//! fixed number of segments. Counts above capacity clamp the bar at 100%;
//! the raw count itself is reported unclamped by the caller.

/// Number of segments in a rendered bar.
pub const SEGMENT_COUNT: usize = 10;

/// Default capacity denominator (completions that fill the bar).
pub const DEFAULT_CAPACITY: usize = 5;

/// Number of filled segments: `floor(count / capacity * SEGMENT_COUNT)`,
/// clamped to `SEGMENT_COUNT`. A zero capacity renders a full bar.
pub fn filled_segments(count: usize, capacity: usize) -> usize {
    if capacity == 0 {
        return SEGMENT_COUNT;
    }
    (count * SEGMENT_COUNT / capacity).min(SEGMENT_COUNT)
}

/// Render a bar like `██████░░░░`.
pub fn render_bar(count: usize, capacity: usize) -> String {
    let filled = filled_segments(count, capacity);
    let mut bar = String::with_capacity(SEGMENT_COUNT * '█'.len_utf8());
    for i in 0..SEGMENT_COUNT {
        bar.push(if i < filled { '█' } else { '░' });
    }
    bar
}

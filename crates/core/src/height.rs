/// Map a utilisation percentage to a bar height in `[0, display_height]`.
///
/// `<= 0` (and NaN) gives 0, `>= 100` gives the full height, everything in
/// between scales linearly with round-half-up.
#[must_use]
pub fn value_to_height(value: f32, display_height: u8) -> u8 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= 100.0 {
        return display_height;
    }

    let scaled = value / 100.0 * f32::from(display_height);
    // Truncation after +0.5 is round-half-up for non-negative input.
    ((scaled + 0.5) as u8).min(display_height)
}

//! Conversions from raw sensor integers to floating point values.

/// Magnitude of the thumbstick range.
pub const MAX_ANALOG_VALUE: i32 = 32768;
/// Full trigger travel.
pub const MAX_TRIGGER_VALUE: i32 = 255;

/// Maps a signed thumbstick value to `[0.0, 1.0)` with the center at `0.5`.
#[inline]
pub fn thumb(raw: i16) -> f64 {
    f64::from(raw) / f64::from(2 * MAX_ANALOG_VALUE) + 0.5
}

/// Maps a trigger value to `[0.0, 1.0]`.
#[inline]
pub fn trigger(raw: u8) -> f64 {
    f64::from(raw) / f64::from(MAX_TRIGGER_VALUE)
}

/// Scales `current` by the width of the `[min, max]` range.
///
/// `min` is only used for the width, it is not subtracted from `current`:
/// `normalization(15, 10, 20)` is `1.5`, not `0.5`.
#[inline]
pub fn normalization(current: i32, min: i32, max: i32) -> f64 {
    f64::from(current) / f64::from(max - min)
}

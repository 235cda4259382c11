/// Relative weight of each hour of the day, lunch and dinner peaking.
pub const HOUR_WEIGHTS: [u32; 24] = [
    2, 2, 2, 2, 3, 4, 6, 7, 8, 9, 10, 10, 9, 8, 7, 7, 7, 9, 10, 10, 9, 6, 4, 3,
];

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

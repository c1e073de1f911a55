/*
Segbar - by David Petnick
*/

/// Fraction (0..=1) of Segment `index` Filled When Bar Holds `amount`
/// Each Segment Represents Exactly One `unit` of Capacity
#[inline]
pub fn fill_fraction(amount: f32, index: usize, unit: f32) -> f32 {
    ((amount - index as f32 * unit) / unit).clamp(0.0, 1.0)
}

/// Fill Fraction for Every Segment in `0..count`
pub fn fills(amount: f32, count: usize, unit: f32) -> impl Iterator<Item = f32> {
    (0..count).map(move |i| fill_fraction(amount, i, unit))
}

/// `num / den` rounded to nearest, halves away from zero. `den` must be non-zero.
pub(crate) fn div_round_u32(num: u32, den: u32) -> u32 {
    (num + den / 2) / den
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

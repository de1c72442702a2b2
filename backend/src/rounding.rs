use rug::{Integer, Rational};
use std::cmp::Ordering;

/// Returns `num / den` rounded to the nearest integer, ties to even.
///
/// # Panics
///
/// Panics if `den` is zero.
pub fn div_round_half_even(num: &Integer, den: &Integer) -> Integer {
    assert!(den.cmp0() != Ordering::Equal, "invalid argument den: division by zero");

    // Normalizes to a positive divisor so that the floor remainder lies in [0, den).
    let (num, den): (Integer, Integer) = if den.is_negative() {
        (Integer::from(-num), Integer::from(-den))
    } else {
        (num.clone(), den.clone())
    };

    let (mut q, r): (Integer, Integer) = num.div_rem_floor(den.clone());
    let twice_r: Integer = r << 1u32;
    match twice_r.cmp(&den) {
        Ordering::Greater => q += 1,
        Ordering::Equal if q.is_odd() => q += 1,
        _ => {}
    }
    q
}

/// Rounds an exact rational to the nearest integer, ties to even.
pub fn round_half_even(value: &Rational) -> Integer {
    div_round_half_even(value.numer(), value.denom())
}

/// Rounds `value` to `digits` decimal places, ties to even, and returns the
/// closest `f64`.
pub fn round_to_decimals(value: &Rational, digits: u32) -> f64 {
    let pow10: Integer = Integer::from(Integer::u_pow_u(10, digits));
    let scaled: Integer = round_half_even(&Rational::from(value * &Rational::from(&pow10)));
    Rational::from((scaled, pow10)).to_f64()
}

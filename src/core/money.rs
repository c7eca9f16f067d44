//! Tolerance-based comparisons for monetary amounts.
//!
//! Balances are plain `f64` values, so equal-split arithmetic leaves floating
//! point residue on the order of fractions of a cent. Every sign check in the
//! crate goes through the three predicates here instead of comparing against
//! zero directly, and amounts surfaced to members are rounded with [`round2`].

/// One minor currency unit. Magnitudes at or below this count as zero.
pub const EPSILON: f64 = 0.01;

/// True when `x` is a credit beyond tolerance.
pub fn is_positive(x: f64) -> bool {
    x > EPSILON
}

/// True when `x` is a debt beyond tolerance.
pub fn is_negative(x: f64) -> bool {
    x < -EPSILON
}

/// True when `x` is within one minor unit of zero.
pub fn is_zero(x: f64) -> bool {
    x.abs() <= EPSILON
}

/// Round to two decimal places, half away from zero.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_are_mutually_exclusive() {
        for x in [-5.0, -EPSILON - 1e-9, -EPSILON, -1e-9, 0.0, 1e-9, EPSILON, EPSILON + 1e-9, 5.0]
        {
            let hits =
                [is_positive(x), is_negative(x), is_zero(x)].iter().filter(|&&p| p).count();
            assert_eq!(hits, 1, "exactly one predicate must hold for {x}");
        }
    }

    #[test]
    fn float_residue_counts_as_settled() {
        // What remains after summing thirds of 10.00 back together.
        let residue = 10.0 - (10.0 / 3.0) * 3.0;
        assert!(is_zero(residue));
        assert!(!is_positive(residue));
        assert!(!is_negative(residue));
    }

    #[test]
    fn values_exactly_at_epsilon_are_settled() {
        assert!(is_zero(EPSILON));
        assert!(is_zero(-EPSILON));
        assert!(!is_positive(EPSILON));
        assert!(!is_negative(-EPSILON));
    }

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(-10.006), -10.01);
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(29.999999999), 30.0);
    }
}

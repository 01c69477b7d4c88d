// Numeric helpers shared between the engine and report consumers.

/// Rounds half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Rounding used for price-scale outputs.
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Rounding used for MACD components.
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.23456), 1.23);
        assert_eq!(round2(-0.126), -0.13);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(-0.00004), -0.0);
    }
}

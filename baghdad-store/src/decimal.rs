use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};

/// Rounds to two places, the scale of every NUMERIC column in the schema.
pub fn from_f64(value: f64) -> BigDecimal {
    BigDecimal::from_str(&format!("{value:.2}")).unwrap_or_default()
}

pub fn to_f64(value: &BigDecimal) -> Option<f64> {
    value.to_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(from_f64(4.256), BigDecimal::from_str("4.26").unwrap());
        assert_eq!(from_f64(1.0), BigDecimal::from_str("1.00").unwrap());
        assert_eq!(from_f64(0.0), BigDecimal::from(0));
    }

    #[test]
    fn converts_back_to_float() {
        let value = BigDecimal::from_str("12.34").unwrap();
        assert_eq!(to_f64(&value), Some(12.34));
    }
}

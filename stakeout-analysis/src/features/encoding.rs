//! Cyclical and contextual encodings for temporal fields.

use std::f64::consts::TAU;

/// Sin/cos encoding of a cyclical value with the given period.
pub fn cyclical_encode(value: f64, period: f64) -> (f64, f64) {
    let angle = TAU * value / period;
    (angle.sin(), angle.cos())
}

/// Saturday or Sunday.
pub fn is_weekend(day_of_week: u8) -> bool {
    day_of_week >= 5
}

/// Morning (7-9) or evening (16-18) rush.
pub fn is_rush_hour(hour: u8) -> bool {
    matches!(hour, 7..=9 | 16..=18)
}

/// Night hours, wrapping midnight (22:00-04:59).
pub fn is_night(hour: u8) -> bool {
    hour >= 22 || hour <= 4
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cyclical_encoding_wraps() {
        let (sin0, cos0) = cyclical_encode(0.0, 24.0);
        let (sin24, cos24) = cyclical_encode(24.0, 24.0);
        assert!((sin0 - sin24).abs() < 1e-9);
        assert!((cos0 - cos24).abs() < 1e-9);

        // Opposite phase at half period.
        let (_, cos12) = cyclical_encode(12.0, 24.0);
        assert!((cos12 + 1.0).abs() < 1e-9);
    }

    #[test]
    fn contextual_flags() {
        assert!(is_weekend(5));
        assert!(is_weekend(6));
        assert!(!is_weekend(4));

        assert!(is_rush_hour(8));
        assert!(is_rush_hour(17));
        assert!(!is_rush_hour(12));

        assert!(is_night(23));
        assert!(is_night(2));
        assert!(is_night(4));
        assert!(!is_night(5));
        assert!(!is_night(21));
    }
}

//! Input guards run before anything reaches the ledger.

use crate::data::raw_to_u8;

/// True iff every coordinate is below `world_size`. Lower bound and
/// integrality are left to [`valid_uint8`]; callers combine both.
pub fn validate_coords(x: f64, y: f64, z: f64, world_size: u16) -> bool {
    let limit = f64::from(world_size);
    x < limit && y < limit && z < limit
}

/// True iff every value is an integer in `0..=255`, i.e. encodes as a `uint8`.
pub fn valid_uint8(values: &[f64]) -> bool {
    values.iter().all(|&v| raw_to_u8(v).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coords_at_or_beyond_world_size_are_invalid() {
        assert!(validate_coords(0.0, 0.0, 0.0, 256));
        assert!(validate_coords(255.0, 255.0, 255.0, 256));
        assert!(!validate_coords(256.0, 0.0, 0.0, 256));
        assert!(!validate_coords(0.0, 64.0, 0.0, 64));
        assert!(!validate_coords(0.0, 0.0, 300.0, 256));
    }

    #[test]
    fn coords_check_is_upper_bound_only() {
        assert!(validate_coords(-1.0, 0.5, 0.0, 256));
    }

    #[test]
    fn every_byte_value_is_valid() {
        for v in 0..=255u8 {
            assert!(valid_uint8(&[f64::from(v)]), "{v}");
        }
    }

    #[test]
    fn out_of_range_and_fractional_values_are_invalid() {
        assert!(!valid_uint8(&[-1.0]));
        assert!(!valid_uint8(&[256.0]));
        assert!(!valid_uint8(&[0.5]));
        assert!(!valid_uint8(&[f64::INFINITY]));
        assert!(!valid_uint8(&[1.0, 2.0, 2.5]));
    }

    #[test]
    fn empty_input_is_valid() {
        assert!(valid_uint8(&[]));
    }
}

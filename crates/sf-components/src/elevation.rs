//! Static head offset between the sprinkler array and the supply connection.

use crate::common::check_finite;
use crate::error::ComponentResult;
use sf_core::units::{Length, Pressure, constants::static_head_per_m, in_m};

/// Pressure offset for a height difference.
///
/// Positive height: the array sits above the supply and the supply must push
/// the water up. Negative height: the array sits below and gains pressure.
pub fn static_offset(height: Length) -> ComponentResult<Pressure> {
    let h = in_m(height);
    check_finite(h, "installation height")?;
    Ok(static_head_per_m() * h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sf_core::units::{in_bar, m};

    #[test]
    fn rise_and_fall() {
        assert_relative_eq!(in_bar(static_offset(m(12.0)).unwrap()), 1.2, epsilon = 1e-12);
        assert_relative_eq!(in_bar(static_offset(m(-3.0)).unwrap()), -0.3, epsilon = 1e-12);
        assert_eq!(in_bar(static_offset(m(0.0)).unwrap()), 0.0);
    }

    #[test]
    fn non_finite_height() {
        assert!(static_offset(m(f64::INFINITY)).is_err());
    }
}

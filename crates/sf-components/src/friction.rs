//! Hazen-Williams friction loss.
//!
//! p = 6.05e5 · Q^1.85 / (C^1.85 · d^4.87)
//!
//! with p in bar per metre, Q in L/min and d (internal diameter) in mm.

use crate::common::{EPSILON_FLOW_LPM, check_finite};
use crate::error::ComponentResult;
use crate::tables::CFactor;
use sf_core::units::{Length, Pressure, VolumeRate, bar, in_lpm, in_m, in_mm};

/// Metric constant for bar / (L/min) / mm.
pub const HAZEN_WILLIAMS_CONSTANT: f64 = 6.05e5;
pub const FLOW_EXPONENT: f64 = 1.85;
pub const DIAMETER_EXPONENT: f64 = 4.87;

/// Pressure gradient in bar per metre of equivalent pipe.
///
/// No flow or no bore means no loss, never an error.
pub fn gradient_bar_per_m(
    flow: VolumeRate,
    diameter: Length,
    c_factor: CFactor,
) -> ComponentResult<f64> {
    let q = in_lpm(flow);
    let d = in_mm(diameter);
    check_finite(q, "flow")?;
    check_finite(d, "diameter")?;

    if q <= EPSILON_FLOW_LPM || d <= 0.0 {
        return Ok(0.0);
    }

    let gradient = HAZEN_WILLIAMS_CONSTANT * q.powf(FLOW_EXPONENT)
        / (c_factor.value().powf(FLOW_EXPONENT) * d.powf(DIAMETER_EXPONENT));
    check_finite(gradient, "friction gradient")?;
    Ok(gradient)
}

/// Total friction loss over an equivalent length.
pub fn pressure_drop(
    flow: VolumeRate,
    diameter: Length,
    c_factor: CFactor,
    equivalent_length: Length,
) -> ComponentResult<Pressure> {
    let length = in_m(equivalent_length);
    check_finite(length, "equivalent length")?;
    if length <= 0.0 {
        return Ok(bar(0.0));
    }
    let drop = gradient_bar_per_m(flow, diameter, c_factor)? * length;
    check_finite(drop, "pressure drop")?;
    Ok(bar(drop))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sf_core::units::{in_bar, lpm, m, mm};

    #[test]
    fn zero_flow_or_length_is_zero_loss() {
        assert_eq!(
            gradient_bar_per_m(lpm(0.0), mm(27.3), CFactor::C120).unwrap(),
            0.0
        );
        let drop = pressure_drop(lpm(100.0), mm(27.3), CFactor::C120, m(0.0)).unwrap();
        assert_eq!(in_bar(drop), 0.0);
    }

    #[test]
    fn zero_diameter_is_zero_loss() {
        assert_eq!(
            gradient_bar_per_m(lpm(100.0), mm(0.0), CFactor::C120).unwrap(),
            0.0
        );
    }

    #[test]
    fn known_gradient() {
        // 56.57 L/min through 27.3 mm, C=120
        let q = 80.0 * 0.5_f64.sqrt();
        let expected = 6.05e5 * q.powf(1.85) / (120.0_f64.powf(1.85) * 27.3_f64.powf(4.87));
        let got = gradient_bar_per_m(lpm(q), mm(27.3), CFactor::C120).unwrap();
        assert_relative_eq!(got, expected, max_relative = 1e-9);
        assert!(got > 0.01 && got < 0.05, "gradient {got}");
    }

    #[test]
    fn rougher_pipe_loses_more() {
        let smooth = gradient_bar_per_m(lpm(200.0), mm(42.5), CFactor::C140).unwrap();
        let rough = gradient_bar_per_m(lpm(200.0), mm(42.5), CFactor::C100).unwrap();
        assert!(rough > smooth);
    }

    #[test]
    fn non_finite_flow_is_rejected() {
        let err = gradient_bar_per_m(lpm(f64::NAN), mm(27.3), CFactor::C120).unwrap_err();
        assert!(err.to_string().contains("flow"));
    }
}

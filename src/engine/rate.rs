use crate::{Error, RateCoefficients, Result};

/// Evaluate the REACLIB rate fit at `t9` (temperature in GK).
///
/// ```text
/// rate = exp(a0 + a1/T9 + a2·T9^(-1/3) + a3·T9^(1/3) + a4·T9 + a5·T9^(5/3) + a6·ln T9)
/// ```
///
/// The fit is undefined for `t9 <= 0` (and for NaN); those return
/// [`Error::NumericDomain`].
pub fn evaluate_rate(coeffs: &RateCoefficients, t9: f64) -> Result<f64> {
    if t9.is_nan() || t9 <= 0.0 {
        return Err(Error::NumericDomain { t9 });
    }

    let t9_third = t9.cbrt();
    let exponent = coeffs[0]
        + coeffs[1] / t9
        + coeffs[2] / t9_third
        + coeffs[3] * t9_third
        + coeffs[4] * t9
        + coeffs[5] * t9.powf(5.0 / 3.0)
        + coeffs[6] * t9.ln();

    Ok(exponent.exp())
}

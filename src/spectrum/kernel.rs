use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BroadenError;

// ---------------------------------------------------------------------------
// LineShape – the broadening kernel
// ---------------------------------------------------------------------------

/// Kernel used to broaden each discrete line. Both variants peak at exactly
/// `1.0` on their centre, so a line's height in the profile equals its
/// intensity when it does not overlap with neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    /// `exp(-(x-c)² / (2·w²))`, `w` is σ.
    Gaussian,
    /// `w² / ((x-c)² + w²)`, `w` is γ (half width at half maximum).
    #[default]
    Lorentzian,
}

impl LineShape {
    pub const ALL: [LineShape; 2] = [LineShape::Gaussian, LineShape::Lorentzian];

    /// Kernel value at `x` for a line centred on `center`.
    #[inline]
    pub fn evaluate(self, x: f64, center: f64, width: f64) -> f64 {
        let d = x - center;
        match self {
            LineShape::Gaussian => (-(d * d) / (2.0 * width * width)).exp(),
            LineShape::Lorentzian => {
                let w2 = width * width;
                w2 / (d * d + w2)
            }
        }
    }
}

impl fmt::Display for LineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineShape::Gaussian => write!(f, "gaussian"),
            LineShape::Lorentzian => write!(f, "lorentzian"),
        }
    }
}

impl FromStr for LineShape {
    type Err = BroadenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" => Ok(LineShape::Gaussian),
            "lorentzian" => Ok(LineShape::Lorentzian),
            other => Err(BroadenError::invalid(format!(
                "unknown line shape '{other}', expected gaussian or lorentzian"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn kernels_are_one_at_center() {
        for shape in LineShape::ALL {
            assert_eq!(shape.evaluate(1234.5, 1234.5, 7.0), 1.0);
        }
    }

    #[test]
    fn kernels_are_symmetric() {
        for shape in LineShape::ALL {
            let left = shape.evaluate(990.0, 1000.0, 4.0);
            let right = shape.evaluate(1010.0, 1000.0, 4.0);
            assert_relative_eq!(left, right, epsilon = 1e-15);
        }
    }

    #[test]
    fn lorentzian_is_half_at_one_width() {
        assert_relative_eq!(LineShape::Lorentzian.evaluate(5.0, 0.0, 5.0), 0.5);
    }

    #[test]
    fn gaussian_at_three_sigma() {
        assert_relative_eq!(
            LineShape::Gaussian.evaluate(30.0, 0.0, 10.0),
            (-4.5f64).exp(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Gaussian".parse::<LineShape>().unwrap(), LineShape::Gaussian);
        assert_eq!(" lorentzian ".parse::<LineShape>().unwrap(), LineShape::Lorentzian);
        assert!(matches!(
            "voigt".parse::<LineShape>(),
            Err(BroadenError::InvalidArgument(_))
        ));
        assert_eq!(LineShape::Gaussian.to_string(), "gaussian");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&LineShape::Lorentzian).unwrap();
        assert_eq!(json, "\"lorentzian\"");
        let back: LineShape = serde_json::from_str("\"gaussian\"").unwrap();
        assert_eq!(back, LineShape::Gaussian);
    }
}

use serde::{Deserialize, Serialize};

use super::kernel::LineShape;
use crate::error::BroadenError;

/// Number of `width` units added on each side of the peak range.
pub const PEAK_MARGIN: f64 = 3.0;

/// Number of grid intervals used when the caller does not choose one.
pub const DEFAULT_RESOLUTION: usize = 500;

// ---------------------------------------------------------------------------
// Input / output types
// ---------------------------------------------------------------------------

/// One discrete peak, e.g. a vibrational mode with its IR intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralLine {
    /// Wavenumber (cm⁻¹). Negative values are imaginary modes.
    pub frequency: f64,
    /// Peak weight. Not clamped: negative intensities give negative lobes.
    pub intensity: f64,
}

impl SpectralLine {
    pub fn new(frequency: f64, intensity: f64) -> Self {
        Self {
            frequency,
            intensity,
        }
    }
}

/// One point of a broadened curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfileSample {
    pub x: f64,
    pub y: f64,
}

// ---------------------------------------------------------------------------
// Broadening
// ---------------------------------------------------------------------------

/// Superpose one `shape` kernel per line on a regular grid of
/// `resolution + 1` points spanning the peak range padded by
/// [`PEAK_MARGIN`]`·width` on both sides.
///
/// Contributions are summed in the order of `lines`, so identical input
/// always produces a bit-identical profile.
///
/// Besides bad arguments, input whose grid overflows, whose width is
/// below the precision of the frequencies, or whose profile sum overflows
/// is rejected rather than returned as NaN / infinity.
pub fn broaden(
    lines: &[SpectralLine],
    width: f64,
    shape: LineShape,
    resolution: usize,
) -> Result<Vec<ProfileSample>, BroadenError> {
    if lines.is_empty() {
        return Err(BroadenError::invalid("peak list is empty"));
    }
    if !width.is_finite() || width <= 0.0 {
        return Err(BroadenError::invalid(format!(
            "width must be a positive finite number, got {width}"
        )));
    }
    if resolution < 1 {
        return Err(BroadenError::invalid("resolution must be at least 1"));
    }
    if let Some((i, line)) = lines
        .iter()
        .enumerate()
        .find(|(_, l)| !l.frequency.is_finite() || !l.intensity.is_finite())
    {
        return Err(BroadenError::invalid(format!(
            "line {i} is not finite (frequency {}, intensity {})",
            line.frequency, line.intensity
        )));
    }

    let (lo, hi) = lines.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), l| {
        (lo.min(l.frequency), hi.max(l.frequency))
    });
    let x_min = lo - PEAK_MARGIN * width;
    let x_max = hi + PEAK_MARGIN * width;
    let step = (x_max - x_min) / resolution as f64;

    // A finite grid whose step clears the rounding of x_min + i·step.
    let magnitude = x_min.abs().max(x_max.abs());
    if !x_min.is_finite()
        || !x_max.is_finite()
        || !step.is_finite()
        || step <= 4.0 * f64::EPSILON * magnitude
    {
        return Err(BroadenError::invalid(format!(
            "cannot build a grid over [{x_min}, {x_max}] with {resolution} intervals"
        )));
    }

    let mut samples = Vec::with_capacity(resolution + 1);
    for i in 0..=resolution {
        let x = if i == resolution {
            x_max
        } else {
            x_min + i as f64 * step
        };
        let y: f64 = lines
            .iter()
            .map(|l| l.intensity * shape.evaluate(x, l.frequency, width))
            .sum();
        if !y.is_finite() {
            return Err(BroadenError::invalid(format!(
                "profile overflows at x = {x}"
            )));
        }
        samples.push(ProfileSample { x, y });
    }

    Ok(samples)
}

/// [`broaden`] with [`DEFAULT_RESOLUTION`].
pub fn broaden_default(
    lines: &[SpectralLine],
    width: f64,
    shape: LineShape,
) -> Result<Vec<ProfileSample>, BroadenError> {
    broaden(lines, width, shape, DEFAULT_RESOLUTION)
}

// ---------------------------------------------------------------------------
// BroadeningParams – the three user-facing knobs
// ---------------------------------------------------------------------------

/// Width, shape and grid size as chosen in the viewer or a config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadeningParams {
    /// σ (Gaussian) or γ (Lorentzian), in cm⁻¹.
    pub width: f64,
    pub shape: LineShape,
    pub resolution: usize,
}

impl Default for BroadeningParams {
    fn default() -> Self {
        Self {
            width: 10.0,
            shape: LineShape::default(),
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl BroadeningParams {
    pub fn apply(&self, lines: &[SpectralLine]) -> Result<Vec<ProfileSample>, BroadenError> {
        broaden(lines, self.width, self.shape, self.resolution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn line(frequency: f64, intensity: f64) -> SpectralLine {
        SpectralLine::new(frequency, intensity)
    }

    #[test]
    fn single_gaussian_on_coarse_grid() {
        let out = broaden(&[line(1000.0, 1.0)], 10.0, LineShape::Gaussian, 4).unwrap();
        let xs: Vec<f64> = out.iter().map(|s| s.x).collect();
        assert_eq!(xs, vec![970.0, 985.0, 1000.0, 1015.0, 1030.0]);
        assert_eq!(out[2].y, 1.0);
        assert_relative_eq!(out[0].y, (-4.5f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(out[4].y, (-4.5f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(out[0].y, 0.011108996538242306, epsilon = 1e-12);
    }

    #[test]
    fn rejects_empty_lines() {
        let err = broaden(&[], 1.0, LineShape::Gaussian, 10).unwrap_err();
        assert!(matches!(err, BroadenError::InvalidArgument(_)));
    }

    #[test]
    fn rejects_bad_width() {
        for width in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let res = broaden(&[line(0.0, 1.0)], width, LineShape::Gaussian, 10);
            assert!(
                matches!(res, Err(BroadenError::InvalidArgument(_))),
                "width {width} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_width_that_overflows_the_domain() {
        let res = broaden(&[line(1000.0, 1.0)], 1e308, LineShape::Gaussian, 4);
        assert!(matches!(res, Err(BroadenError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_frequency_span_that_overflows() {
        let res = broaden(
            &[line(-1e308, 1.0), line(1e308, 1.0)],
            1.0,
            LineShape::Lorentzian,
            4,
        );
        assert!(matches!(res, Err(BroadenError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_width_below_frequency_precision() {
        let res = broaden(&[line(1e6, 1.0)], 1e-12, LineShape::Gaussian, 500);
        assert!(matches!(res, Err(BroadenError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_intensity_sum_that_overflows() {
        let res = broaden(
            &[line(0.0, 1e308), line(0.0, 1e308)],
            1.0,
            LineShape::Gaussian,
            2,
        );
        assert!(matches!(res, Err(BroadenError::InvalidArgument(_))));
    }

    #[test]
    fn narrow_width_keeps_grid_increasing() {
        let out = broaden(&[line(1e6, 1.0)], 1e-6, LineShape::Gaussian, 500).unwrap();
        assert!(out.windows(2).all(|w| w[1].x > w[0].x));
        assert!(out.iter().all(|s| s.x.is_finite() && s.y.is_finite()));
    }

    #[test]
    fn rejects_zero_resolution() {
        let res = broaden(&[line(0.0, 1.0)], 1.0, LineShape::Gaussian, 0);
        assert!(matches!(res, Err(BroadenError::InvalidArgument(_))));
    }

    #[test]
    fn rejects_nan_line() {
        let res = broaden(
            &[line(100.0, 1.0), line(f64::NAN, 1.0)],
            1.0,
            LineShape::Lorentzian,
            10,
        );
        assert!(matches!(res, Err(BroadenError::InvalidArgument(_))));
    }

    #[test]
    fn resolution_one_gives_two_endpoints() {
        let out = broaden(&[line(50.0, 2.0)], 1.0, LineShape::Lorentzian, 1).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].x, 47.0);
        assert_eq!(out[1].x, 53.0);
        assert_relative_eq!(out[0].y, 2.0 * 1.0 / (9.0 + 1.0));
    }

    #[test]
    fn negative_intensity_is_not_clamped() {
        let out = broaden(&[line(0.0, -1.0)], 1.0, LineShape::Gaussian, 2).unwrap();
        assert_eq!(out[1].y, -1.0);
        assert!(out.iter().all(|s| s.y < 0.0));
    }

    #[test]
    fn default_resolution_and_params() {
        let lines = [line(1600.0, 0.3), line(3000.0, 1.0)];
        assert_eq!(
            broaden_default(&lines, 5.0, LineShape::Gaussian).unwrap().len(),
            DEFAULT_RESOLUTION + 1
        );
        let params = BroadeningParams::default();
        assert_eq!(params.apply(&lines).unwrap().len(), params.resolution + 1);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let lines = [line(1712.3, 0.8), line(1100.0, 0.1), line(2950.7, 0.45)];
        let a = broaden(&lines, 12.0, LineShape::Lorentzian, 300).unwrap();
        let b = broaden(&lines, 12.0, LineShape::Lorentzian, 300).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn params_deserialize_with_defaults() {
        let p: BroadeningParams = serde_json::from_str(r#"{ "shape": "gaussian" }"#).unwrap();
        assert_eq!(p.shape, LineShape::Gaussian);
        assert_eq!(p.width, 10.0);
        assert_eq!(p.resolution, DEFAULT_RESOLUTION);
    }
}

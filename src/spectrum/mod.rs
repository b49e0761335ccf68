/// Spectral core: kernels, broadening, and profile post-processing.
///
/// Data flow:
/// ```text
///  Vec<SpectralLine>  +  width / shape / resolution
///        │
///        ▼
///   ┌──────────┐
///   │ broaden   │  Σ intensity · kernel(x, frequency, width) on a regular grid
///   └──────────┘
///        │
///        ▼
///   Vec<ProfileSample>  →  peaks (maxima, scaling)  →  plot / export
/// ```

pub mod broaden;
pub mod kernel;
pub mod peaks;

pub use broaden::{
    broaden, broaden_default, BroadeningParams, ProfileSample, SpectralLine, DEFAULT_RESOLUTION,
    PEAK_MARGIN,
};
pub use kernel::LineShape;

//! Vibrational spectrum tooling: turn discrete (frequency, intensity) peak
//! lists from vibrational-analysis jobs into continuous broadened curves.
//!
//! The [`spectrum`] module is the pure numeric core; [`data`] loads job
//! results and exports profiles; [`config`] holds the viewer settings.

pub mod config;
pub mod data;
pub mod error;
pub mod spectrum;

pub use error::BroadenError;
pub use spectrum::{
    broaden, broaden_default, BroadeningParams, LineShape, ProfileSample, SpectralLine,
    DEFAULT_RESOLUTION, PEAK_MARGIN,
};

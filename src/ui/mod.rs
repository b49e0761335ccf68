pub mod modes;
pub mod panels;
pub mod plot;

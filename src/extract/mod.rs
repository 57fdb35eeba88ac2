// Extraction module
// Skyline reduction of polyphonic input and statistical part filtering

pub mod part_filter;
pub mod skyline;

pub use part_filter::{filter_and_extract, filter_and_extract_with_settings};
pub use skyline::{skyline, skyline_with_settings};

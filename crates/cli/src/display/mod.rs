pub mod formatter;

pub use formatter::{format_config_sources, format_entries, format_places, location_label};

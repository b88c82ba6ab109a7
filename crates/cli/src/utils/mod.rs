pub mod file;
pub mod parser;
pub mod prompt;

pub use file::{collect_files, write_back};
pub use parser::{Position, parse_location, parse_position};
pub use prompt::{FixedChoice, StdinChooser};

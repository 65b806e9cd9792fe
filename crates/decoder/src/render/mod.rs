/// Detokenized line rendering.
///
/// - `printf.rs`: a small printf renderer covering the conversions firmware
///   format strings actually use
/// - `line.rs`: placeholder inference over the format text, parameter-word
///   splitting, and the fixed-width line prefix
pub mod line;
pub mod printf;

pub use line::{format_line, format_message};
pub use printf::{Arg, FormatError};

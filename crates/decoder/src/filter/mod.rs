/// Pass filtering over rendered lines.
pub mod engine;

pub use engine::{FilterError, PassFilter};

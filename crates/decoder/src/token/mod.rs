/// Token definition tables.
///
/// Firmware builds emit a comma-delimited table mapping numeric trace tokens
/// to their source location, severity, subsystem, and printf-style format
/// string. This module loads one or more of those tables into an immutable
/// [`TokenTable`]:
///
/// - `model.rs`: the table and record types, key composition
/// - `load.rs`: file reading, quote-aware row splitting, row classification
///
/// A table is built once per load and replaced wholesale on reload; records
/// are never mutated in place.
pub mod load;
pub mod model;

pub use load::{load_tables, LoadError};
pub use model::{token_key, TokenRecord, TokenTable};

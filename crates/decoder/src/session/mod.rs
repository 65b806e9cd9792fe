/// Session bookkeeping.
///
/// One [`Session`] lives for the whole run: sequence numbering, per-severity
/// counters, the filtered-line count, and the timing anchors behind the
/// elapsed-time band column. A reload resets only the timing anchors; the
/// cumulative statistics survive.
///
/// - `state.rs`: counters, sequencing, reset semantics
/// - `banding.rs`: the `+HH:MM:SS` band column state machine
pub mod banding;
pub mod state;

pub use state::Session;

// Tokenized trace decoding for the tracetail monitor.

// Core protocol machinery
pub mod frame;
pub mod token;

// Rendering and session bookkeeping
pub mod filter;
pub mod render;
pub mod session;

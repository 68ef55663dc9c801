//! Board lookup
//!
//! Maps a board's human-readable name (e.g. "八卦") to its index URL on the
//! site. The table is built once at startup and never mutated.

mod registry;

pub use registry::{Board, BoardRegistry, BUILTIN_BOARDS, DEFAULT_DOMAIN};

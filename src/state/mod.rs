//! State module for tracking the page walk
//!
//! - `TraversalState`: where the walk is (fetching, classifying, continuing, stopped)

mod traversal_state;

pub use traversal_state::TraversalState;

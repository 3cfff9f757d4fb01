//! Cache component tests.




/// Set classification, policy selector, and bimodal throttle.
pub mod dueling;


/// Tag-store adapter entry points.
pub mod tag_store;

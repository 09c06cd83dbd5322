//! Common utilities for integration tests

pub mod test_helpers;

// Re-export commonly used items; each test crate uses only some of them
#[allow(unused_imports)]
pub use test_helpers::{
    assert_columns_close,
    relative_error,
    textbook_miscibility_series,
    two_acid_titration_series,
};

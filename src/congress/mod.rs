//! Congress.gov API client module.
//!
//! - [`CongressApiClient`] - Trait defining the bill operations
//! - [`HttpCongressClient`] - Real HTTP implementation using reqwest
//! - [`mock::MockCongressClient`] - Mock for unit tests (behind `test-utils` feature)

mod client;
mod types;

pub use client::{CongressApiClient, CongressApiError, HttpCongressClient};
pub use types::{BillMetadata, TextVersion};

#[cfg(any(test, feature = "test-utils"))]
pub use client::mock;

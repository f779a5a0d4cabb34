//! # Registry Test Utilities
//!
//! Shared test utilities for the registry service.
//!
//! This crate provides:
//! - Server test harness (`TestRegistryServer` for E2E tests)
//! - Pools that point at nothing (`unreachable_pool`) for tests that must not
//!   need PostgreSQL
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<()> {
//!     let server = TestRegistryServer::builder().fault_mode(true).spawn().await?;
//!
//!     let response = reqwest::get(format!("{}/health", server.url())).await?;
//!
//!     assert_eq!(response.status(), 200);
//!     Ok(())
//! }
//! ```

pub mod server_harness;

// Re-export commonly used items
pub use server_harness::*;

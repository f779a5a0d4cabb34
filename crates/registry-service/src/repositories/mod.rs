//! Repository layer for the registry service.
//!
//! Database access for the user registry. Writes go to the primary pool,
//! reads to the replica pool; callers pick the pool.

pub mod users;

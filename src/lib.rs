//! sievekit: a fixed-capacity in-memory cache with SIEVE eviction.
//!
//! The cache lives in [`policy::sieve`]; [`ds`] holds the arena and
//! index-linked list it is built from.

pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;

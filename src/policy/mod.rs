pub mod sieve;

//! Example demonstrating the SIEVE cache policy.
//!
//! SIEVE keeps entries in insertion order and marks them "visited" on access.
//! A hand sweeps from the oldest entry toward the newest, clearing visited
//! marks and evicting the first unmarked entry it finds.
//!
//! Run with: cargo run --example basic_sieve

use sievekit::policy::sieve::SieveCache;

fn main() {
    println!("=== SIEVE Cache Example ===\n");

    let mut cache: SieveCache<&str, String> = SieveCache::new(3);
    println!("Created SIEVE cache: capacity={}\n", cache.capacity());

    for key in ["a", "b", "c"] {
        cache.insert(key, format!("value-{}", key));
    }
    println!("Inserted a, b, c");

    // Visiting "a" gives it a second chance.
    if let Some(value) = cache.get(&"a") {
        println!("hit a: {}", value);
    }

    cache.insert("d", "value-d".to_string());
    println!("\nInserted d (cache was full):");
    println!("  contains a? {} (visited, spared)", cache.contains(&"a"));
    println!("  contains b? {} (oldest unvisited, evicted)", cache.contains(&"b"));

    // peek reads without marking, so "c" stays the next victim.
    println!("\npeek c: {:?}", cache.peek(&"c"));
    if let Some((key, _)) = cache.peek_victim() {
        println!("next victim: {}", key);
    }

    cache.insert("e", "value-e".to_string());
    println!("\nInserted e:");
    println!("  contains c? {}", cache.contains(&"c"));

    let order: Vec<_> = cache.keys().copied().collect();
    println!("  order (newest first): {:?}", order);
    println!("  len: {}", cache.len());
}

// Expected output:
// === SIEVE Cache Example ===
//
// Created SIEVE cache: capacity=3
//
// Inserted a, b, c
// hit a: value-a
//
// Inserted d (cache was full):
//   contains a? true (visited, spared)
//   contains b? false (oldest unvisited, evicted)
//
// peek c: Some("value-c")
// next victim: c
//
// Inserted e:
//   contains c? false
//   order (newest first): ["e", "d", "a"]
//   len: 3

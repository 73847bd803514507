//! In-memory record lookup for rowcast.
//!
//! Small reference tables that fit in memory do not need a database behind
//! the relational widgets. [`InMemoryLookup`] keeps records per kind and
//! answers queries by scanning them.

mod in_memory;

pub use in_memory::InMemoryLookup;

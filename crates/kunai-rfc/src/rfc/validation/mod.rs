//! Validation logic for RFC compliance.
//!
//! Parsing already enforces every range it reads. These validators cover
//! rules assembled in code through the public fields and builders.

pub mod recur;

pub use recur::validate_rule;

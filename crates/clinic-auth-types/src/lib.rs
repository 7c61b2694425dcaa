//! Auth types shared across clinic crates.
//!
//! Provides JWT issuing and validation, bearer-header parsing, and the
//! `Principal` extractor.

pub mod identity;
pub mod token;

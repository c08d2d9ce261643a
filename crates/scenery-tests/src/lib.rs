//! Integration test crate for Scenery.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the scenery crates to verify they work together.

#[cfg(test)]
mod lifecycle;

#[cfg(test)]
mod persistence;

#[cfg(test)]
mod panel;

//! # unique-check — CLI Library
//!
//! Argument types and handlers for the `unique-check` binary, kept in a
//! library so they can be tested without spawning a process.

pub mod check;

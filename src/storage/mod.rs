//! Durable storage for the companion.
//! The basic idea is:
//!  - There is a directory with the application state.
//!  - The companion lives in a single JSON record, loaded once at startup and overwritten
//!    after every recomputation.
//!  - Reads and writes take an advisory file lock so a stray second process can't interleave
//!    a partial write.

pub mod state_store;

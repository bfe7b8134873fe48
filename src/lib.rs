//! Terminal companion fed by your GitHub contribution calendar. Contributions grow it through
//! stages, consecutive days build a streak, and going quiet for a week makes it regress.
//!

pub mod character;
pub mod cli;
pub mod config;
pub mod github;
pub mod storage;
pub mod utils;

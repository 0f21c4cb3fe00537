//! jwx: a small dispatcher that maps commands onto npm and npx, plus the
//! cross-platform process spawning it runs on.

include!(concat!(env!("OUT_DIR"), "/translations.rs"));

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod system;

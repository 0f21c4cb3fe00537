// src/cli/handlers/mod.rs

// One module per action the dispatcher can take.

pub mod help;
pub mod run;

// src/cli/handlers/mod.rs

// One module per CLI action, plus shared plumbing in `commons`.

pub mod commons;
pub mod exec;
pub mod lint;
pub mod package;
pub mod template;

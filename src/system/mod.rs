//! # System Interaction Layer
//!
//! The boundary between the configuration core and the operating system:
//! spawning the helm process, capturing its output and mapping process-level
//! failure into structured errors.

pub mod invoker;

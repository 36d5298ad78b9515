//! Shared helpers.

pub mod codegen;
pub mod device;

//! Code shared between the client and its front ends

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
mod macros;
pub mod req_args;
pub mod site;
pub mod user;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;

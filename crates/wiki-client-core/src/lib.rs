//! Stores the functionality for talking to a wiki that is shared between front
//! ends
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;

pub use client::{Client, ClientSettings, UiCallBack};

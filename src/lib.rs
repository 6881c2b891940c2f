// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)] // no_std unless testing or on a host

pub mod client;
pub mod common;
pub mod sensor;

// Re-export key types for convenience
pub use client::Sps30;
pub use common::{Command, Config, DeviceStatus, FrameError, Sps30Error};

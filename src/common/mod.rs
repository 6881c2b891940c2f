// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod checksum;
pub mod command;
pub mod config;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod response;
pub mod status;
pub mod stuffing;
pub mod timing;
pub mod types;

#[cfg(feature = "std")]
pub mod std_interface;

// --- Re-export key types/traits/functions for easier access ---

// From checksum.rs
pub use checksum::{calculate_checksum, verify_checksum};

// From command.rs
pub use command::{Command, DeviceInfoType};

// From config.rs
pub use config::{Config, Parity, SerialConfig};

// From error.rs
pub use error::{ErrorKind, FrameError, Sps30Error};

// From frame.rs
pub use frame::{assemble_frame, Frame, StuffedFrame};

// From hal_traits.rs
pub use hal_traits::{Sps30Instant, Sps30Serial, Sps30Timer};

// From response.rs
pub use response::{decode_response, Payload, Response};

// From status.rs
pub use status::DeviceStatus;

// From stuffing.rs
pub use stuffing::{stuff, unstuff};

// From types.rs
pub use types::{DeviceInfoString, MeasuredValues};

// Host adapter (std only)
#[cfg(feature = "std")]
pub use std_interface::{StdInstant, StdInterface};

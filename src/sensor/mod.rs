// src/sensor/mod.rs

// Device side of the protocol: decode requests, build responses.
// Used to emulate an SPS30 (tests, bench setups) or to implement an SHDLC slave.

pub mod formatter; // Response fields -> stuffed MISO frame
pub mod handler; // CommandHandler trait and a simulated device
pub mod parser; // Stuffed MOSI frame -> Request

// --- Public Re-exports ---
pub use formatter::assemble_response;
pub use handler::{respond, CommandHandler, Mode, SimulatedSps30};
pub use parser::{parse_request, Request};

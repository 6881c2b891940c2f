// src/client/sync_client/transaction.rs

use super::io_helpers::FrameBuffer;
use super::Sps30;
use crate::common::{
    command::Command,
    error::Sps30Error,
    frame::{assemble_frame, DEVICE_ADDRESS},
    hal_traits::{Sps30Serial, Sps30Timer},
    response::{Payload, Response},
};
use core::fmt::Debug;

impl<IF> Sps30<IF>
where
    IF: Sps30Serial + Sps30Timer,
    IF::Error: Debug,
{
    pub(super) fn execute(&mut self, command: Command) -> Result<Payload, Sps30Error<IF::Error>> {
        let payload = command.payload();
        log::debug!("sending {}, {} payload byte(s)", command, payload.as_bytes().len());
        self.execute_raw(command.code(), payload.as_bytes())
    }

    /// Sends an arbitrary command and returns the payload of its response.
    ///
    /// Useful for commands the typed API does not cover. The response must echo
    /// `command` and carry a zero state byte.
    pub fn execute_raw(&mut self, command: u8, payload: &[u8]) -> Result<Payload, Sps30Error<IF::Error>> {
        let request = assemble_frame(command, payload)?;
        log::trace!("TX {:02X?}", request.as_bytes());

        self.send_frame_bytes(request.as_bytes())?;

        let mut buffer = FrameBuffer::new();
        self.read_frame(&mut buffer)?;
        log::trace!("RX {:02X?}", buffer.as_slice());

        let response = Response::parse(&buffer)?;
        self.last_status = Some(response.state);

        if response.address != DEVICE_ADDRESS {
            return Err(Sps30Error::UnexpectedAddress(response.address));
        }
        if response.command != command {
            return Err(Sps30Error::UnexpectedCommand {
                expected: command,
                received: response.command,
            });
        }
        if !response.state.is_ok() {
            log::warn!(
                "command {:#04x} rejected: {} ({:#04x})",
                command,
                response.state,
                response.state.code()
            );
            return Err(Sps30Error::Device(response.state));
        }

        log::debug!(
            "response to {:#04x}: state {}, {} byte(s)",
            command,
            response.state,
            response.payload.len()
        );
        Ok(response.payload)
    }
}

//! Stream reassembly and RTU framing for Modbus-style serial protocols.
//!
//! This is the framing layer between a transport and a message codec. Bytes
//! pushed in by the transport accumulate in a [`StreamProcessor`], which
//! emits one frame at a time once a complete, checksum-valid frame is
//! buffered. RTU frames carry no length field:
//! - 1 byte device id (unit address)
//! - function code + data, length inferred from the function code
//! - 2 byte CRC-16, low byte first
//!
//! Garbage before, inside or after a frame is skipped one byte at a time
//! until the stream resynchronizes.

pub mod buffer;
pub mod codec;
pub mod crc;
pub mod error;
pub mod filter;
pub mod framer;
pub mod processor;
pub mod reader;
pub mod rtu;
pub mod writer;

#[cfg(test)]
mod testing;

pub use buffer::{Correlation, FrameBuffer};
pub use codec::{Frame, FrameConfig, FrameLength, LengthHint, MessageCodec, DEFAULT_MAX_PDU};
pub use error::{FrameError, Result};
pub use filter::DeviceFilter;
pub use framer::{DecodedFrame, Framer};
pub use processor::StreamProcessor;
pub use reader::FrameReader;
pub use rtu::{RtuFramer, MAX_ADU_SIZE, MIN_SIZE};
pub use writer::FrameWriter;

//! Modbus RTU stream framing.
//!
//! modframe reassembles frames from a byte stream that arrives in arbitrary
//! pieces, validates them with CRC-16, resynchronizes after line noise, and
//! hands complete PDUs to a message codec.
//!
//! # Crate Structure
//!
//! - [`frame`]: checksum, RTU framer, stream processor and blocking adapters
//! - [`pdu`]: length table and raw PDU codec for standard function codes (behind `pdu` feature)

/// Re-export frame types.
pub mod frame {
    pub use modframe_frame::*;
}

/// Re-export PDU codec types (requires `pdu` feature).
#[cfg(feature = "pdu")]
pub mod pdu {
    pub use modframe_pdu::*;
}

//! Standard Modbus PDU handling for modframe.
//!
//! Supplies the length knowledge RTU framing needs (how long a PDU with a
//! given function code is) and a codec producing raw [`Pdu`] messages.
//! Message semantics (register layouts, coil packing) are left to callers.

pub mod codec;
pub mod function;
pub mod length;

pub use codec::{Pdu, PduCodec, Role};
pub use function::{function_name, EXCEPTION_BIT, MAX_PDU_SIZE};
pub use length::{request_length, response_length};

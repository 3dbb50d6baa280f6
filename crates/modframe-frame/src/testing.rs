//! Small codec used by the unit tests.

use bytes::{BufMut, BytesMut};

use crate::codec::{FrameLength, LengthHint, MessageCodec};
use crate::crc;
use crate::framer::{DecodedFrame, Framer};

/// Function code whose PDUs pass the checksum but never decode.
pub const UNDECODABLE: u8 = 0x41;

/// Function code whose length hint exceeds any serial ADU.
pub const OVERSIZED: u8 = 0x42;

/// Knows 0x03 (byte count), 0x06 (fixed), their exceptions and the two test codes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestCodec;

impl FrameLength for TestCodec {
    fn frame_length_hint(&self, function_code: u8, available: &[u8]) -> LengthHint {
        match function_code {
            0x03 => match available.first() {
                Some(&count) => LengthHint::Known(2 + usize::from(count)),
                None => LengthHint::NeedMore,
            },
            0x06 => LengthHint::Known(5),
            0x83 | 0x86 => LengthHint::Known(2),
            UNDECODABLE => LengthHint::Known(3),
            OVERSIZED => LengthHint::Known(300),
            _ => LengthHint::Invalid,
        }
    }
}

impl MessageCodec for TestCodec {
    type Message = Vec<u8>;

    fn decode(&self, pdu: &[u8]) -> Option<Vec<u8>> {
        if pdu.first() == Some(&UNDECODABLE) {
            return None;
        }
        Some(pdu.to_vec())
    }

    fn encode(&self, message: &Vec<u8>, dst: &mut BytesMut) {
        dst.put_slice(message);
    }
}

/// Build an RTU frame without going through a framer.
pub fn rtu_frame(device_id: u8, pdu: &[u8]) -> Vec<u8> {
    let mut wire = vec![device_id];
    wire.extend_from_slice(pdu);
    let checksum = crc::compute(&wire);
    wire.extend_from_slice(&checksum.to_be_bytes());
    wire
}

/// Length-prefixed framing that carries a transaction id:
/// `[tid hi][tid lo][device id][pdu len][pdu]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedFramer;

impl Framer for TaggedFramer {
    fn min_size(&self) -> usize {
        4
    }

    fn specific_decode<'a>(&self, src: &'a [u8]) -> DecodedFrame<'a> {
        let total = 4 + usize::from(src[3]);
        if src.len() < total {
            return DecodedFrame::need_more();
        }
        DecodedFrame {
            consumed: total,
            device_id: src[2],
            transaction_id: u16::from_be_bytes([src[0], src[1]]),
            payload: &src[4..total],
        }
    }

    fn encode(&self, pdu: &[u8], device_id: u8, transaction_id: u16, dst: &mut BytesMut) {
        dst.put_u16(transaction_id);
        dst.put_u8(device_id);
        dst.put_u8(pdu.len() as u8);
        dst.put_slice(pdu);
    }
}

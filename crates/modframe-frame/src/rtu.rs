use bytes::{BufMut, BytesMut};

use crate::codec::{FrameLength, LengthHint};
use crate::crc;
use crate::framer::{DecodedFrame, Framer};

/// Smallest admissible frame: address + function code + 1 data byte + CRC (2).
pub const MIN_SIZE: usize = 5;

/// Largest serial ADU: address + 253 byte PDU + CRC (2).
pub const MAX_ADU_SIZE: usize = 256;

const ADDRESS_SIZE: usize = 1;
const CRC_SIZE: usize = 2;

/// RTU framing: `[device id][function code + data][crc lo][crc hi]`.
///
/// There is no length field. The frame length is inferred from the function
/// code through a [`FrameLength`] capability and confirmed by the trailing
/// checksum. A candidate that fails either check is abandoned and the search
/// restarts one byte further on. A candidate whose length is plausible but
/// not yet buffered holds the scan until the rest arrives, so bytes inside a
/// frame's data are never taken for a frame of their own.
///
/// No inter-frame silence detection is performed; completion is decided from
/// content only.
#[derive(Debug, Clone)]
pub struct RtuFramer<L> {
    lengths: L,
}

enum Candidate {
    Frame(usize),
    Incomplete,
    Reject,
}

impl<L: FrameLength> RtuFramer<L> {
    /// Create a framer using `lengths` for boundary detection.
    pub fn new(lengths: L) -> Self {
        Self { lengths }
    }

    /// The length capability used for boundary detection.
    pub fn lengths(&self) -> &L {
        &self.lengths
    }

    /// Examine a frame starting at `src[0]`. `src` holds at least `MIN_SIZE` bytes.
    fn candidate(&self, src: &[u8]) -> Candidate {
        let function_code = src[ADDRESS_SIZE];
        let pdu_len = match self
            .lengths
            .frame_length_hint(function_code, &src[ADDRESS_SIZE + 1..])
        {
            LengthHint::Known(len) => len,
            LengthHint::NeedMore => return Candidate::Incomplete,
            LengthHint::Invalid => return Candidate::Reject,
        };

        let total = pdu_len.saturating_add(ADDRESS_SIZE + CRC_SIZE);
        if !(MIN_SIZE..=MAX_ADU_SIZE).contains(&total) {
            return Candidate::Reject;
        }
        if src.len() < total {
            return Candidate::Incomplete;
        }

        let body = total - CRC_SIZE;
        let received = u16::from_be_bytes([src[body], src[body + 1]]);
        if crc::verify(&src[..body], received) {
            Candidate::Frame(total)
        } else {
            tracing::trace!(
                function_code,
                expected = crc::compute(&src[..body]),
                received,
                "frame check failed"
            );
            Candidate::Reject
        }
    }
}

fn frame_at(src: &[u8], start: usize, len: usize) -> DecodedFrame<'_> {
    DecodedFrame {
        consumed: start + len,
        device_id: src[start],
        transaction_id: 0,
        payload: &src[start + ADDRESS_SIZE..start + len - CRC_SIZE],
    }
}

impl<L: FrameLength> Framer for RtuFramer<L> {
    fn min_size(&self) -> usize {
        MIN_SIZE
    }

    fn specific_decode<'a>(&self, src: &'a [u8]) -> DecodedFrame<'a> {
        let mut start = 0usize;
        while src.len() - start >= MIN_SIZE {
            match self.candidate(&src[start..]) {
                Candidate::Frame(len) => {
                    if start > 0 {
                        tracing::debug!(skipped = start, "resynchronized on frame");
                    }
                    return frame_at(src, start, len);
                }
                Candidate::Incomplete => {
                    if start > 0 {
                        tracing::debug!(skipped = start, "frame not ready, dropping garbage");
                    }
                    return DecodedFrame::skip(start);
                }
                Candidate::Reject => start += 1,
            }
        }
        if start > 0 {
            tracing::debug!(skipped = start, "hunting, waiting for more data");
        }
        DecodedFrame::skip(start)
    }

    fn encode(&self, pdu: &[u8], device_id: u8, _transaction_id: u16, dst: &mut BytesMut) {
        let start = dst.len();
        dst.reserve(ADDRESS_SIZE + pdu.len() + CRC_SIZE);
        dst.put_u8(device_id);
        dst.put_slice(pdu);
        let checksum = crc::compute(&dst[start..]);
        dst.put_u16(checksum);
    }
}

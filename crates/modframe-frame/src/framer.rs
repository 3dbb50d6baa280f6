use bytes::BytesMut;

/// Result of one decode attempt over the stream buffer.
///
/// - `consumed == 0`, empty payload: need more bytes.
/// - `consumed > 0`, empty payload: drop that many leading bytes (resync).
/// - `consumed > 0`, non-empty payload: exactly one frame was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedFrame<'a> {
    /// Bytes to drop from the front of the buffer.
    pub consumed: usize,
    /// Device id carried by the frame.
    pub device_id: u8,
    /// Transaction id carried by the frame.
    pub transaction_id: u16,
    /// Function code and data, without framing bytes.
    pub payload: &'a [u8],
}

impl<'a> DecodedFrame<'a> {
    /// Not enough bytes buffered, nothing to drop.
    pub const fn need_more() -> Self {
        Self::skip(0)
    }

    /// Drop `consumed` leading bytes without producing a frame.
    pub const fn skip(consumed: usize) -> Self {
        Self {
            consumed,
            device_id: 0,
            transaction_id: 0,
            payload: &[],
        }
    }

    /// Returns true if a frame payload was produced.
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}

/// A wire-format variant.
///
/// Implementations must be free of side effects: decoding an unchanged buffer
/// twice gives the same result.
pub trait Framer {
    /// Smallest buffer length worth handing to [`Framer::specific_decode`].
    fn min_size(&self) -> usize;

    /// Variant-specific boundary detection.
    fn specific_decode<'a>(&self, src: &'a [u8]) -> DecodedFrame<'a>;

    /// Append the wire bytes for `pdu` to `dst`.
    fn encode(&self, pdu: &[u8], device_id: u8, transaction_id: u16, dst: &mut BytesMut);

    /// Decode with the minimum-size gate applied.
    fn decode<'a>(&self, src: &'a [u8]) -> DecodedFrame<'a> {
        if src.len() < self.min_size() {
            tracing::trace!(buffered = src.len(), "short frame, waiting for more data");
            return DecodedFrame::need_more();
        }
        self.specific_decode(src)
    }
}

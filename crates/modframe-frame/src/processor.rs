use bytes::{Bytes, BytesMut};

use crate::buffer::{Correlation, FrameBuffer};
use crate::codec::{Frame, FrameConfig, MessageCodec};
use crate::error::{FrameError, Result};
use crate::filter::DeviceFilter;
use crate::framer::Framer;
use crate::rtu::RtuFramer;

/// Turns pushed transport bytes into dispatched messages for one connection.
///
/// Each call to [`StreamProcessor::process_incoming`] runs to completion:
/// every complete frame in the buffer is decoded and handed to the handler
/// in arrival order before the call returns. Incomplete trailing bytes stay
/// buffered for the next call.
#[derive(Debug)]
pub struct StreamProcessor<F, C> {
    framer: F,
    codec: C,
    buffer: FrameBuffer,
}

impl<F: Framer, C: MessageCodec> StreamProcessor<F, C> {
    /// Create a processor with default configuration.
    pub fn new(framer: F, codec: C) -> Self {
        Self::with_config(framer, codec, &FrameConfig::default())
    }

    /// Create a processor with explicit configuration.
    pub fn with_config(framer: F, codec: C, config: &FrameConfig) -> Self {
        Self {
            framer,
            codec,
            buffer: FrameBuffer::with_capacity(config.initial_buffer_capacity),
        }
    }

    /// Try to recognize one frame at the front of the buffer.
    ///
    /// Returns the number of leading bytes to drop and the frame payload, if
    /// any. Correlation ids are taken from the frame, or reset to 0 when no
    /// frame was produced. The buffer itself is not advanced.
    pub fn decode(&mut self) -> (usize, Option<Bytes>) {
        let decoded = self.framer.decode(self.buffer.as_slice());
        let consumed = decoded.consumed;
        if !decoded.has_payload() {
            self.buffer.reset_correlation();
            return (consumed, None);
        }

        let payload = Bytes::copy_from_slice(decoded.payload);
        let (device_id, transaction_id) = (decoded.device_id, decoded.transaction_id);
        self.buffer.set_correlation(device_id, transaction_id);
        (consumed, Some(payload))
    }

    /// Append `data` and dispatch every complete frame to `handler`.
    ///
    /// Frames from devices rejected by `filter` are dropped together with
    /// everything buffered after them. When `expected_transaction_id` is a
    /// non-zero id, frames carrying a different non-zero id are dropped the
    /// same way.
    ///
    /// Returns [`FrameError::UndecodableFrame`] when a checksum-valid frame
    /// cannot be interpreted by the codec. The buffer is cleared first.
    pub fn process_incoming<H>(
        &mut self,
        data: &[u8],
        filter: &DeviceFilter,
        expected_transaction_id: Option<u16>,
        mut handler: H,
    ) -> Result<()>
    where
        H: FnMut(Frame<C::Message>),
    {
        tracing::trace!(received = data.len(), "processing incoming bytes");
        self.buffer.append(data);

        while !self.buffer.is_empty() {
            let (consumed, payload) = self.decode();
            if consumed > 0 {
                self.buffer.advance(consumed);
            }
            let Some(pdu) = payload else {
                return Ok(());
            };

            let Correlation {
                device_id,
                transaction_id,
            } = self.buffer.correlation();

            if !filter.accepts(device_id) {
                tracing::debug!(device_id, "frame for another device, ignoring");
                self.buffer.clear();
                continue;
            }

            let Some(message) = self.codec.decode(&pdu) else {
                self.buffer.clear();
                return Err(FrameError::UndecodableFrame {
                    device_id,
                    function_code: pdu[0],
                });
            };

            if let Some(expected) = expected_transaction_id {
                if expected != 0 && transaction_id != 0 && expected != transaction_id {
                    tracing::debug!(
                        expected,
                        received = transaction_id,
                        "stale transaction, dropping frame"
                    );
                    self.buffer.clear();
                    continue;
                }
            }

            handler(Frame::new(device_id, transaction_id, message));
        }

        Ok(())
    }

    /// Encode a message and wrap it in the framer's wire format.
    pub fn encode_message(&self, frame: &Frame<C::Message>, dst: &mut BytesMut) {
        let mut pdu = BytesMut::new();
        self.codec.encode(&frame.message, &mut pdu);
        self.framer
            .encode(&pdu, frame.device_id, frame.transaction_id, dst);
    }

    /// Drop buffered bytes and correlation state (connection re-initialization).
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Number of bytes waiting for a complete frame.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Correlation ids of the last decode attempt.
    pub fn correlation(&self) -> Correlation {
        self.buffer.correlation()
    }

    /// The framer in use.
    pub fn framer(&self) -> &F {
        &self.framer
    }

    /// The message codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }
}

impl<C: MessageCodec + Clone> StreamProcessor<RtuFramer<C>, C> {
    /// RTU processor using `codec` for both length inference and decoding.
    pub fn rtu(codec: C) -> Self {
        Self::new(RtuFramer::new(codec.clone()), codec)
    }
}

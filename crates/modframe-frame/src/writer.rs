use std::io::{ErrorKind, Write};

use bytes::BytesMut;

use crate::codec::{Frame, FrameConfig, MessageCodec};
use crate::error::{FrameError, Result};
use crate::framer::Framer;
use crate::rtu::{RtuFramer, MAX_ADU_SIZE};

/// Writes complete frames to any `Write` stream.
pub struct FrameWriter<T, F, C> {
    inner: T,
    framer: F,
    codec: C,
    buf: BytesMut,
    pdu: BytesMut,
    config: FrameConfig,
}

impl<T: Write, F: Framer, C: MessageCodec> FrameWriter<T, F, C> {
    /// Create a new frame writer with default configuration.
    pub fn new(inner: T, framer: F, codec: C) -> Self {
        Self::with_config(inner, framer, codec, FrameConfig::default())
    }

    /// Create a new frame writer with explicit configuration.
    pub fn with_config(inner: T, framer: F, codec: C, config: FrameConfig) -> Self {
        Self {
            inner,
            framer,
            codec,
            buf: BytesMut::with_capacity(MAX_ADU_SIZE),
            pdu: BytesMut::with_capacity(MAX_ADU_SIZE),
            config,
        }
    }

    /// Encode a message and write it as one frame (blocking).
    pub fn write_frame(&mut self, frame: &Frame<C::Message>) -> Result<()> {
        let mut pdu = std::mem::take(&mut self.pdu);
        pdu.clear();
        self.codec.encode(&frame.message, &mut pdu);
        let result = self.send_pdu(frame.device_id, frame.transaction_id, &pdu);
        self.pdu = pdu;
        result
    }

    /// Frame and send raw PDU bytes (function code + data).
    pub fn send_pdu(&mut self, device_id: u8, transaction_id: u16, pdu: &[u8]) -> Result<()> {
        if pdu.len() > self.config.max_pdu_size {
            return Err(FrameError::PduTooLarge {
                size: pdu.len(),
                max: self.config.max_pdu_size,
            });
        }

        self.buf.clear();
        self.framer
            .encode(pdu, device_id, transaction_id, &mut self.buf);
        tracing::trace!(device_id, len = self.buf.len(), "sending frame");

        let mut offset = 0usize;
        while offset < self.buf.len() {
            match self.inner.write(&self.buf[offset..]) {
                Ok(0) => return Err(FrameError::ConnectionClosed),
                Ok(n) => offset += n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }

        self.flush()
    }

    /// Flush the underlying stream.
    pub fn flush(&mut self) -> Result<()> {
        loop {
            match self.inner.flush() {
                Ok(()) => return Ok(()),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the writer and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum PDU size for subsequent frames.
    pub fn set_max_pdu_size(&mut self, max_pdu_size: usize) {
        self.config.max_pdu_size = max_pdu_size;
    }

    /// Current frame writer configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl<T: Write, C: MessageCodec + Clone> FrameWriter<T, RtuFramer<C>, C> {
    /// RTU writer using `codec` to encode messages.
    pub fn rtu(inner: T, codec: C) -> Self {
        Self::new(inner, RtuFramer::new(codec.clone()), codec)
    }
}

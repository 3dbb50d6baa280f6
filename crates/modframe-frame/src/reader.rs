use std::collections::VecDeque;
use std::io::{ErrorKind, Read};

use crate::codec::{Frame, FrameConfig, MessageCodec};
use crate::error::{FrameError, Result};
use crate::filter::DeviceFilter;
use crate::framer::Framer;
use crate::processor::StreamProcessor;
use crate::rtu::RtuFramer;

/// Reads complete frames from any `Read` stream.
///
/// Handles partial reads internally. Frames that arrive together in one read
/// are queued and returned by subsequent calls.
pub struct FrameReader<T, F, C: MessageCodec> {
    inner: T,
    processor: StreamProcessor<F, C>,
    pending: VecDeque<Frame<C::Message>>,
    deferred: Option<FrameError>,
    chunk: Vec<u8>,
    filter: DeviceFilter,
    expected_transaction_id: Option<u16>,
    config: FrameConfig,
}

impl<T: Read, F: Framer, C: MessageCodec> FrameReader<T, F, C> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T, framer: F, codec: C) -> Self {
        Self::with_config(inner, framer, codec, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, framer: F, codec: C, config: FrameConfig) -> Self {
        Self {
            inner,
            processor: StreamProcessor::with_config(framer, codec, &config),
            pending: VecDeque::new(),
            deferred: None,
            chunk: vec![0u8; config.read_chunk_size.max(1)],
            filter: DeviceFilter::Any,
            expected_transaction_id: None,
            config,
        }
    }

    /// Read the next complete frame (blocking).
    ///
    /// Returns `Err(FrameError::ConnectionClosed)` when EOF is reached.
    /// A decode error is reported after the frames that arrived before it.
    pub fn read_frame(&mut self) -> Result<Frame<C::Message>> {
        loop {
            if let Some(frame) = self.pending.pop_front() {
                return Ok(frame);
            }
            if let Some(err) = self.deferred.take() {
                return Err(err);
            }

            let read = match self.inner.read(&mut self.chunk) {
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            };

            if read == 0 {
                return Err(FrameError::ConnectionClosed);
            }

            let pending = &mut self.pending;
            if let Err(err) = self.processor.process_incoming(
                &self.chunk[..read],
                &self.filter,
                self.expected_transaction_id,
                |frame| pending.push_back(frame),
            ) {
                self.deferred = Some(err);
            }
        }
    }

    /// Only return frames from these devices.
    pub fn set_filter(&mut self, filter: impl Into<DeviceFilter>) {
        self.filter = filter.into();
    }

    /// Drop frames whose transaction id differs from `transaction_id`.
    pub fn set_expected_transaction_id(&mut self, transaction_id: Option<u16>) {
        self.expected_transaction_id = transaction_id;
    }

    /// Discard buffered bytes, queued frames and any pending error.
    pub fn reset(&mut self) {
        self.processor.reset();
        self.pending.clear();
        self.deferred = None;
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// The stream processor holding partially received bytes.
    pub fn processor(&self) -> &StreamProcessor<F, C> {
        &self.processor
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl<T: Read, C: MessageCodec + Clone> FrameReader<T, RtuFramer<C>, C> {
    /// RTU reader using `codec` for length inference and decoding.
    pub fn rtu(inner: T, codec: C) -> Self {
        Self::new(inner, RtuFramer::new(codec.clone()), codec)
    }
}

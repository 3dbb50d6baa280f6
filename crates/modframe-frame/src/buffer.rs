use bytes::{Buf, BytesMut};

/// Correlation ids of the most recently recognized frame.
///
/// Both are 0 when unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Correlation {
    pub device_id: u8,
    pub transaction_id: u16,
}

/// Accumulating stream buffer plus per-frame correlation state.
///
/// Consumed bytes are dropped by moving the start cursor of the underlying
/// `BytesMut`, so trimming the front never copies the remainder.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buf: BytesMut,
    correlation: Correlation,
}

impl FrameBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            correlation: Correlation::default(),
        }
    }

    /// Append bytes received from the transport.
    pub fn append(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Drop the first `n` bytes.
    pub fn advance(&mut self, n: usize) {
        self.buf.advance(n.min(self.buf.len()));
    }

    /// Drop every buffered byte.
    pub fn discard_all(&mut self) {
        self.buf.clear();
    }

    /// Set both correlation ids to 0.
    pub fn reset_correlation(&mut self) {
        self.correlation = Correlation::default();
    }

    /// Discard all bytes and reset correlation.
    pub fn clear(&mut self) {
        self.discard_all();
        self.reset_correlation();
    }

    /// Stamp the ids of the frame just decoded.
    pub fn set_correlation(&mut self, device_id: u8, transaction_id: u16) {
        self.correlation = Correlation {
            device_id,
            transaction_id,
        };
    }

    /// Ids of the last decoded frame, or zeros.
    pub fn correlation(&self) -> Correlation {
        self.correlation
    }

    /// Bytes not yet consumed.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Number of buffered bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes are buffered.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

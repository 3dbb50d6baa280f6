use bytes::BytesMut;

/// Default maximum PDU size: 253 bytes (256 byte serial ADU minus address and CRC).
pub const DEFAULT_MAX_PDU: usize = 253;

/// Default number of bytes pulled from a stream per read.
pub const DEFAULT_READ_CHUNK: usize = 256;

/// Default initial capacity of the stream buffer.
pub const DEFAULT_BUFFER_CAPACITY: usize = 512;

/// Outcome of asking a codec how long a PDU is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthHint {
    /// The PDU (function code included) is exactly this many bytes.
    Known(usize),
    /// More bytes are needed before the length can be told.
    NeedMore,
    /// The function code is unknown or the layout is impossible.
    Invalid,
}

/// Length inference for framings without a length field.
pub trait FrameLength {
    /// Infer the PDU length from its function code and the data bytes
    /// buffered after it so far.
    fn frame_length_hint(&self, function_code: u8, available: &[u8]) -> LengthHint;
}

/// Converts PDU bytes (function code + data) to and from typed messages.
pub trait MessageCodec: FrameLength {
    type Message;

    /// Interpret a checksum-valid PDU. `None` means the payload is unparseable.
    fn decode(&self, pdu: &[u8]) -> Option<Self::Message>;

    /// Append the PDU bytes for `message` to `dst`.
    fn encode(&self, message: &Self::Message, dst: &mut BytesMut);
}

/// A decoded message stamped with the correlation ids of its frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<M> {
    /// Device id (unit address) the frame carried. 0 means broadcast.
    pub device_id: u8,
    /// Transaction id of the frame. Always 0 for RTU.
    pub transaction_id: u16,
    /// The decoded message.
    pub message: M,
}

impl<M> Frame<M> {
    /// Create a new frame.
    pub fn new(device_id: u8, transaction_id: u16, message: M) -> Self {
        Self {
            device_id,
            transaction_id,
            message,
        }
    }
}

/// Configuration for stream framing.
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum PDU size accepted for sending. Default: 253 bytes.
    pub max_pdu_size: usize,
    /// Bytes requested from the stream per read. Default: 256.
    pub read_chunk_size: usize,
    /// Initial capacity of the stream buffer. Default: 512.
    pub initial_buffer_capacity: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_pdu_size: DEFAULT_MAX_PDU,
            read_chunk_size: DEFAULT_READ_CHUNK,
            initial_buffer_capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// A frame passed its checksum but the message codec could not interpret it.
    ///
    /// The stream buffer has already been cleared when this is returned.
    #[error("unable to decode frame from device {device_id} (function code 0x{function_code:02X})")]
    UndecodableFrame { device_id: u8, function_code: u8 },

    /// The PDU exceeds the configured maximum size.
    #[error("pdu too large ({size} bytes, max {max})")]
    PduTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The connection was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

/// Result type for framing operations.
pub type Result<T> = std::result::Result<T, FrameError>;

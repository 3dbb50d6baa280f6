use bytes::{BufMut, Bytes, BytesMut};
use modframe_frame::{FrameLength, LengthHint, MessageCodec};

use crate::function::{EXCEPTION_BIT, MAX_PDU_SIZE};
use crate::length::{request_length, response_length};

/// Which side of the conversation is decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Sends requests, decodes responses.
    Client,
    /// Decodes requests, sends responses.
    Server,
}

/// A raw PDU: function code plus uninterpreted data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pdu {
    pub function_code: u8,
    pub data: Bytes,
}

impl Pdu {
    /// Create a new PDU.
    pub fn new(function_code: u8, data: impl Into<Bytes>) -> Self {
        Self {
            function_code,
            data: data.into(),
        }
    }

    /// Returns true if this is an exception response.
    pub fn is_exception(&self) -> bool {
        self.function_code & EXCEPTION_BIT != 0
    }

    /// Exception code carried by an exception response.
    pub fn exception_code(&self) -> Option<u8> {
        if self.is_exception() {
            self.data.first().copied()
        } else {
            None
        }
    }
}

/// Codec for standard function codes producing raw [`Pdu`] messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PduCodec {
    role: Role,
}

impl PduCodec {
    /// Codec decoding the messages `role` receives.
    pub fn new(role: Role) -> Self {
        Self { role }
    }

    /// Codec for a client: decodes responses.
    pub fn client() -> Self {
        Self::new(Role::Client)
    }

    /// Codec for a server: decodes requests.
    pub fn server() -> Self {
        Self::new(Role::Server)
    }

    /// Which side this codec decodes for.
    pub fn role(&self) -> Role {
        self.role
    }
}

impl FrameLength for PduCodec {
    fn frame_length_hint(&self, function_code: u8, available: &[u8]) -> LengthHint {
        match self.role {
            Role::Client => response_length(function_code, available),
            Role::Server => request_length(function_code, available),
        }
    }
}

impl MessageCodec for PduCodec {
    type Message = Pdu;

    fn decode(&self, pdu: &[u8]) -> Option<Pdu> {
        let (&function_code, data) = pdu.split_first()?;
        if pdu.len() > MAX_PDU_SIZE {
            return None;
        }
        match self.frame_length_hint(function_code, data) {
            LengthHint::Known(len) if len == pdu.len() => {
                Some(Pdu::new(function_code, Bytes::copy_from_slice(data)))
            }
            hint => {
                tracing::debug!(function_code, len = pdu.len(), ?hint, "pdu length mismatch");
                None
            }
        }
    }

    fn encode(&self, message: &Pdu, dst: &mut BytesMut) {
        dst.reserve(1 + message.data.len());
        dst.put_u8(message.function_code);
        dst.put_slice(&message.data);
    }
}

#[cfg(test)]
mod tests {
    use modframe_frame::{DeviceFilter, Frame, StreamProcessor};

    use super::*;

    #[test]
    fn decode_response() {
        let codec = PduCodec::client();
        let pdu = codec.decode(&[0x03, 0x04, 0x00, 0x0A, 0x01, 0x02]).unwrap();
        assert_eq!(pdu.function_code, 0x03);
        assert_eq!(pdu.data.as_ref(), &[0x04, 0x00, 0x0A, 0x01, 0x02]);
        assert!(!pdu.is_exception());
        assert_eq!(pdu.exception_code(), None);
    }

    #[test]
    fn decode_exception_response() {
        let pdu = PduCodec::client().decode(&[0x83, 0x02]).unwrap();
        assert!(pdu.is_exception());
        assert_eq!(pdu.exception_code(), Some(0x02));
    }

    #[test]
    fn decode_rejects_length_mismatch() {
        let codec = PduCodec::client();
        assert!(codec.decode(&[0x03, 0x04, 0x00]).is_none());
        assert!(codec.decode(&[0x06, 0x00, 0x01, 0x00, 0x03, 0xFF]).is_none());
        assert!(codec.decode(&[]).is_none());
        assert!(codec.decode(&[0x2B, 0x0E, 0x01]).is_none());
    }

    #[test]
    fn role_selects_table() {
        // A client never receives a bare write multiple request.
        let request = [0x10, 0x00, 0x01, 0x00, 0x01, 0x02, 0x00, 0x0A];
        assert!(PduCodec::server().decode(&request).is_some());
        assert!(PduCodec::client().decode(&request).is_none());
    }

    #[test]
    fn encode_writes_function_code_and_data() {
        let mut dst = BytesMut::new();
        PduCodec::server().encode(&Pdu::new(0x06, vec![0x00, 0x01, 0x00, 0x03]), &mut dst);
        assert_eq!(dst.as_ref(), &[0x06, 0x00, 0x01, 0x00, 0x03]);
    }

    fn rtu(device_id: u8, pdu: &[u8]) -> Vec<u8> {
        let mut wire = vec![device_id];
        wire.extend_from_slice(pdu);
        let crc = modframe_frame::crc::compute(&wire);
        wire.extend_from_slice(&crc.to_be_bytes());
        wire
    }

    #[test]
    fn client_reads_response_stream() {
        let mut processor = StreamProcessor::rtu(PduCodec::client());
        let mut stream = rtu(0x11, &[0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64]);
        assert_eq!(&stream[9..], &[0xC8, 0xBA]);
        stream.extend(rtu(0x12, &[0x83, 0x02]));

        let mut frames: Vec<Frame<Pdu>> = Vec::new();
        processor
            .process_incoming(&stream, &DeviceFilter::Any, None, |f| frames.push(f))
            .unwrap();

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].device_id, 0x11);
        assert_eq!(frames[0].message.data.len(), 7);
        assert_eq!(frames[1].device_id, 0x12);
        assert_eq!(frames[1].message.exception_code(), Some(0x02));
        assert_eq!(processor.buffered(), 0);
    }

    #[test]
    fn server_reads_request_split_across_reads() {
        let mut processor = StreamProcessor::rtu(PduCodec::server());
        let mut wire = BytesMut::new();
        let request = Pdu::new(0x10, vec![0x00, 0x01, 0x00, 0x02, 0x04, 0x00, 0x0A, 0x01, 0x02]);
        processor.encode_message(&Frame::new(0x01, 0, request.clone()), &mut wire);

        let mut frames = Vec::new();
        for chunk in wire.chunks(3) {
            processor
                .process_incoming(chunk, &DeviceFilter::from(1u8), None, |f| frames.push(f))
                .unwrap();
        }

        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].message, request);
    }
}

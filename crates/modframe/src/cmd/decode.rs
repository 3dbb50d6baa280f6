use std::fs;
use std::num::NonZeroUsize;

use modframe_frame::{DeviceFilter, Frame, FrameError, StreamProcessor};
use modframe_pdu::{Pdu, PduCodec, Role};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, parse_hex, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frames, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let input = read_input(&args)?;
    let filter = DeviceFilter::from(args.devices.clone().unwrap_or_default());
    // Empty input still needs a non-zero chunk length.
    let chunk_size = args
        .chunk_size
        .map_or(input.len(), NonZeroUsize::get)
        .max(1);

    let decoded = decode_stream(&input, &filter, args.role.into(), chunk_size)?;
    tracing::info!(
        frames = decoded.frames.len(),
        undecodable = decoded.undecodable,
        trailing = decoded.trailing,
        "decode finished"
    );
    if decoded.trailing > 0 {
        tracing::warn!(bytes = decoded.trailing, "incomplete frame at end of input");
    }

    print_frames(&decoded.frames, format);

    if decoded.undecodable > 0 {
        return Ok(DATA_INVALID);
    }
    Ok(SUCCESS)
}

fn read_input(args: &DecodeArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex("invalid hex input", hex);
    }
    let Some(path) = &args.file else {
        return Ok(Vec::new());
    };

    let context = format!("failed reading {}", path.display());
    let contents = fs::read(path).map_err(|err| io_error(&context, err))?;
    if args.binary {
        return Ok(contents);
    }
    parse_hex(
        &format!("invalid hex in {}", path.display()),
        &String::from_utf8_lossy(&contents),
    )
}

#[derive(Debug, Default)]
struct Decoded {
    frames: Vec<Frame<Pdu>>,
    undecodable: usize,
    trailing: usize,
}

fn decode_stream(
    input: &[u8],
    filter: &DeviceFilter,
    role: Role,
    chunk_size: usize,
) -> CliResult<Decoded> {
    let mut processor = StreamProcessor::rtu(PduCodec::new(role));
    let mut decoded = Decoded::default();

    for chunk in input.chunks(chunk_size) {
        let frames = &mut decoded.frames;
        match processor.process_incoming(chunk, filter, None, |frame| frames.push(frame)) {
            Ok(()) => {}
            Err(FrameError::UndecodableFrame {
                device_id,
                function_code,
            }) => {
                tracing::warn!(device_id, function_code, "checksum-valid frame could not be decoded");
                decoded.undecodable += 1;
            }
            Err(err) => return Err(frame_error("decode failed", err)),
        }
    }

    decoded.trailing = processor.buffered();
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> Vec<u8> {
        let mut wire = Vec::new();
        // Noise, then a response from device 1 and an exception from device 2.
        wire.extend([0xFF, 0x00]);
        wire.extend(parse_hex("", "01 03 02 00 2A 39 9B").unwrap());
        wire.extend(rtu(2, &[0x83, 0x02]));
        wire
    }

    fn rtu(device_id: u8, pdu: &[u8]) -> Vec<u8> {
        let mut wire = vec![device_id];
        wire.extend_from_slice(pdu);
        let crc = modframe_frame::crc::compute(&wire);
        wire.extend_from_slice(&crc.to_be_bytes());
        wire
    }

    #[test]
    fn decodes_every_chunk_size() {
        let wire = capture();
        for chunk_size in 1..=wire.len() {
            let decoded = decode_stream(&wire, &DeviceFilter::Any, Role::Client, chunk_size)
                .unwrap();
            assert_eq!(decoded.frames.len(), 2, "chunk size {chunk_size}");
            assert_eq!(decoded.frames[0].message.data.as_ref(), &[0x02, 0x00, 0x2A]);
            assert_eq!(decoded.frames[1].message.exception_code(), Some(0x02));
            assert_eq!(decoded.trailing, 0);
        }
    }

    #[test]
    fn filter_limits_devices() {
        let wire = capture();
        let filter = DeviceFilter::from(vec![2]);
        let decoded = decode_stream(&wire, &filter, Role::Client, 1).unwrap();

        assert_eq!(decoded.frames.len(), 1);
        assert_eq!(decoded.frames[0].device_id, 2);
    }

    #[test]
    fn unknown_function_skipped_and_partial_frame_kept() {
        let mut wire = rtu(1, &[0x2B, 0x0E, 0x01]);
        wire.extend(rtu(1, &[0x06, 0x00, 0x01, 0x00, 0x03]));
        wire.extend([0x01, 0x06, 0x00]);

        let decoded = decode_stream(&wire, &DeviceFilter::Any, Role::Server, 6).unwrap();

        assert_eq!(decoded.undecodable, 0);
        assert_eq!(decoded.frames.len(), 1);
        assert_eq!(decoded.trailing, 3);
    }
}

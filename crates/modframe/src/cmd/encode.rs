use bytes::BytesMut;
use modframe_frame::{Framer, RtuFramer};
use modframe_pdu::{PduCodec, MAX_PDU_SIZE};

use crate::cmd::EncodeArgs;
use crate::exit::{parse_hex, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_fields, print_raw, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let pdu = parse_hex("invalid pdu hex", &args.pdu)?;
    let adu = encode_adu(args.device, &pdu)?;
    tracing::debug!(device_id = args.device, len = adu.len(), "encoded frame");

    match format {
        OutputFormat::Raw => print_raw(&adu),
        other => print_fields(
            &[
                ("device_id", args.device.to_string()),
                ("length", adu.len().to_string()),
                ("adu", hex::encode_upper(&adu)),
            ],
            other,
        ),
    }
    Ok(SUCCESS)
}

fn encode_adu(device_id: u8, pdu: &[u8]) -> CliResult<BytesMut> {
    if pdu.is_empty() {
        return Err(CliError::new(DATA_INVALID, "pdu must contain a function code"));
    }
    if pdu.len() > MAX_PDU_SIZE {
        return Err(CliError::new(
            DATA_INVALID,
            format!("pdu too large ({} bytes, max {MAX_PDU_SIZE})", pdu.len()),
        ));
    }

    let mut adu = BytesMut::new();
    RtuFramer::new(PduCodec::client()).encode(pdu, device_id, 0, &mut adu);
    Ok(adu)
}

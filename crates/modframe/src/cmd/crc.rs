use modframe_frame::crc;

use crate::cmd::CrcArgs;
use crate::exit::{parse_hex, CliResult, SUCCESS};
use crate::output::{print_fields, OutputFormat};

pub fn run(args: CrcArgs, format: OutputFormat) -> CliResult<i32> {
    let data = parse_hex("invalid hex input", &args.hex)?;
    print_fields(&checksum_fields(&data), format);
    Ok(SUCCESS)
}

fn checksum_fields(data: &[u8]) -> Vec<(&'static str, String)> {
    let value = crc::compute(data);
    vec![
        ("length", data.len().to_string()),
        ("crc", format!("0x{value:04X}")),
        ("wire", hex::encode_upper(value.to_be_bytes())),
    ]
}

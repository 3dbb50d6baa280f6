use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use modframe_frame::Frame;
use modframe_pdu::{function_name, Pdu};
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct FrameOutput {
    pub device_id: u8,
    pub transaction_id: u16,
    pub function_code: u8,
    pub function_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception_code: Option<u8>,
    pub data: String,
}

impl From<&Frame<Pdu>> for FrameOutput {
    fn from(frame: &Frame<Pdu>) -> Self {
        Self {
            device_id: frame.device_id,
            transaction_id: frame.transaction_id,
            function_code: frame.message.function_code,
            function_name: function_name(frame.message.function_code),
            exception_code: frame.message.exception_code(),
            data: hex::encode_upper(&frame.message.data),
        }
    }
}

/// Print decoded frames. Table output collects all rows into one table.
pub fn print_frames(frames: &[Frame<Pdu>], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            for frame in frames {
                print_json(&FrameOutput::from(frame));
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DEVICE", "FUNCTION", "EXCEPTION", "DATA"]);
            for frame in frames {
                let out = FrameOutput::from(frame);
                table.add_row(vec![
                    out.device_id.to_string(),
                    format!("0x{:02X} {}", out.function_code, out.function_name),
                    out.exception_code
                        .map(|code| format!("0x{code:02X}"))
                        .unwrap_or_default(),
                    out.data,
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for frame in frames {
                let out = FrameOutput::from(frame);
                println!(
                    "device={} fc=0x{:02X} ({}) data={}",
                    out.device_id, out.function_code, out.function_name, out.data
                );
            }
        }
        OutputFormat::Raw => {
            let mut pdu = Vec::new();
            for frame in frames {
                pdu.push(frame.message.function_code);
                pdu.extend_from_slice(&frame.message.data);
            }
            print_raw(&pdu);
        }
    }
}

/// Print a list of labelled values.
pub fn print_fields(fields: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let map: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|(key, value)| (key.to_string(), serde_json::Value::from(value.as_str())))
                .collect();
            print_json(&map);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(fields.iter().map(|(key, _)| key.to_uppercase()))
                .add_row(fields.iter().map(|(_, value)| value.clone()));
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            println!("{}", line.join(" "));
        }
        OutputFormat::Raw => {
            if let Some((_, value)) = fields.last() {
                println!("{value}");
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
    );
}

//! Public function codes.
//!
//! Maximum PDU size is 253 bytes: the 256 byte serial ADU minus the address
//! byte and the 2 byte CRC.

/// Maximum PDU size per the serial line ADU limit.
pub const MAX_PDU_SIZE: usize = 253;

/// Set on the function code of an exception response.
pub const EXCEPTION_BIT: u8 = 0x80;

pub const READ_COILS: u8 = 0x01;
pub const READ_DISCRETE_INPUTS: u8 = 0x02;
pub const READ_HOLDING_REGISTERS: u8 = 0x03;
pub const READ_INPUT_REGISTERS: u8 = 0x04;
pub const WRITE_SINGLE_COIL: u8 = 0x05;
pub const WRITE_SINGLE_REGISTER: u8 = 0x06;
pub const READ_EXCEPTION_STATUS: u8 = 0x07;
pub const DIAGNOSTICS: u8 = 0x08;
pub const GET_COMM_EVENT_COUNTER: u8 = 0x0B;
pub const GET_COMM_EVENT_LOG: u8 = 0x0C;
pub const WRITE_MULTIPLE_COILS: u8 = 0x0F;
pub const WRITE_MULTIPLE_REGISTERS: u8 = 0x10;
pub const REPORT_SERVER_ID: u8 = 0x11;
pub const READ_FILE_RECORD: u8 = 0x14;
pub const WRITE_FILE_RECORD: u8 = 0x15;
pub const MASK_WRITE_REGISTER: u8 = 0x16;
pub const READ_WRITE_MULTIPLE_REGISTERS: u8 = 0x17;
pub const READ_FIFO_QUEUE: u8 = 0x18;

/// Human-readable name for a function code, exception bit ignored.
pub fn function_name(function_code: u8) -> &'static str {
    match function_code & !EXCEPTION_BIT {
        READ_COILS => "READ_COILS",
        READ_DISCRETE_INPUTS => "READ_DISCRETE_INPUTS",
        READ_HOLDING_REGISTERS => "READ_HOLDING_REGISTERS",
        READ_INPUT_REGISTERS => "READ_INPUT_REGISTERS",
        WRITE_SINGLE_COIL => "WRITE_SINGLE_COIL",
        WRITE_SINGLE_REGISTER => "WRITE_SINGLE_REGISTER",
        READ_EXCEPTION_STATUS => "READ_EXCEPTION_STATUS",
        DIAGNOSTICS => "DIAGNOSTICS",
        GET_COMM_EVENT_COUNTER => "GET_COMM_EVENT_COUNTER",
        GET_COMM_EVENT_LOG => "GET_COMM_EVENT_LOG",
        WRITE_MULTIPLE_COILS => "WRITE_MULTIPLE_COILS",
        WRITE_MULTIPLE_REGISTERS => "WRITE_MULTIPLE_REGISTERS",
        REPORT_SERVER_ID => "REPORT_SERVER_ID",
        READ_FILE_RECORD => "READ_FILE_RECORD",
        WRITE_FILE_RECORD => "WRITE_FILE_RECORD",
        MASK_WRITE_REGISTER => "MASK_WRITE_REGISTER",
        READ_WRITE_MULTIPLE_REGISTERS => "READ_WRITE_MULTIPLE_REGISTERS",
        READ_FIFO_QUEUE => "READ_FIFO_QUEUE",
        _ => "UNKNOWN",
    }
}

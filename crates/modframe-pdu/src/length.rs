//! PDU length inference per function code.
//!
//! Lengths count the function code byte. `available` is whatever data has
//! been buffered after the function code so far.

use modframe_frame::LengthHint;

use crate::function::*;

/// Length of a byte-counted PDU: `fixed` bytes plus the count stored at `index`.
fn counted(available: &[u8], index: usize, fixed: usize) -> LengthHint {
    match available.get(index) {
        Some(&count) => LengthHint::Known(fixed + usize::from(count)),
        None => LengthHint::NeedMore,
    }
}

/// Length of a request PDU sent by a client.
///
/// Requests made of a bare function code (read exception status, comm event
/// counter/log, report server id) form frames shorter than the RTU minimum
/// and are reported as invalid.
pub fn request_length(function_code: u8, available: &[u8]) -> LengthHint {
    match function_code {
        READ_COILS
        | READ_DISCRETE_INPUTS
        | READ_HOLDING_REGISTERS
        | READ_INPUT_REGISTERS
        | WRITE_SINGLE_COIL
        | WRITE_SINGLE_REGISTER
        | DIAGNOSTICS => LengthHint::Known(5),
        // address(2) + quantity(2) + byte count
        WRITE_MULTIPLE_COILS | WRITE_MULTIPLE_REGISTERS => counted(available, 4, 6),
        READ_FILE_RECORD | WRITE_FILE_RECORD => counted(available, 0, 2),
        MASK_WRITE_REGISTER => LengthHint::Known(7),
        // read address/quantity + write address/quantity + byte count
        READ_WRITE_MULTIPLE_REGISTERS => counted(available, 8, 10),
        READ_FIFO_QUEUE => LengthHint::Known(3),
        _ => LengthHint::Invalid,
    }
}

/// Length of a response PDU sent by a server.
pub fn response_length(function_code: u8, available: &[u8]) -> LengthHint {
    if function_code & EXCEPTION_BIT != 0 {
        return match response_length(function_code & !EXCEPTION_BIT, &[]) {
            LengthHint::Invalid => LengthHint::Invalid,
            LengthHint::Known(_) | LengthHint::NeedMore => LengthHint::Known(2),
        };
    }

    match function_code {
        READ_COILS
        | READ_DISCRETE_INPUTS
        | READ_HOLDING_REGISTERS
        | READ_INPUT_REGISTERS
        | GET_COMM_EVENT_LOG
        | REPORT_SERVER_ID
        | READ_FILE_RECORD
        | WRITE_FILE_RECORD
        | READ_WRITE_MULTIPLE_REGISTERS => counted(available, 0, 2),
        WRITE_SINGLE_COIL
        | WRITE_SINGLE_REGISTER
        | DIAGNOSTICS
        | GET_COMM_EVENT_COUNTER
        | WRITE_MULTIPLE_COILS
        | WRITE_MULTIPLE_REGISTERS => LengthHint::Known(5),
        READ_EXCEPTION_STATUS => LengthHint::Known(2),
        MASK_WRITE_REGISTER => LengthHint::Known(7),
        // two byte count
        READ_FIFO_QUEUE => match available.get(..2) {
            Some(count) => {
                LengthHint::Known(3 + usize::from(u16::from_be_bytes([count[0], count[1]])))
            }
            None => LengthHint::NeedMore,
        },
        _ => LengthHint::Invalid,
    }
}

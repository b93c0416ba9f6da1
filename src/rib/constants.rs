//! RIB wire constants.
//!
//! Binary opcodes follow the RenderMan Interface Specification 3.2,
//! Appendix C (binary encoding). Opcodes with a size suffix are "base"
//! codes: the byte written is `base + (n - 1)` for an `n`-byte payload.

/// Spaces of indentation per nesting level in ASCII RIB.
pub const INDENT_STEP: usize = 4;

/// Significant digits for ASCII floats; 9 round-trips any IEEE single.
pub const FLOAT_PRECISION: usize = 9;

/// Integer with 1-4 big-endian payload bytes (`0200`-`0203`).
pub const OP_INT: u8 = 0o200;

/// String of 0-15 bytes, length folded into the opcode (`0220`-`0237`).
pub const OP_SHORT_STRING: u8 = 0o220;

/// String with a 1-4 byte big-endian length prefix (`0240`-`0243`).
pub const OP_LONG_STRING: u8 = 0o240;

/// IEEE single, 4 bytes big-endian.
pub const OP_FLOAT: u8 = 0o244;

/// Request by previously defined code, followed by the code byte.
pub const OP_USE_REQUEST: u8 = 0o246;

/// Float array with a 1-4 byte big-endian element count (`0310`-`0313`).
pub const OP_FLOAT_ARRAY: u8 = 0o310;

/// Define a request code: code byte, then the request name as a string.
pub const OP_DEFINE_REQUEST: u8 = 0o314;

/// Opens a generic array.
pub const OP_ARRAY_BEGIN: u8 = b'[';

/// Closes a generic array.
pub const OP_ARRAY_END: u8 = b']';

/// Longest string that fits the short string encoding.
pub const SHORT_STRING_MAX_LEN: usize = 15;

/// Number of distinct request codes one binary stream can define.
pub const MAX_REQUEST_CODES: usize = 256;

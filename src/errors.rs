use crate::registers::Word;
use thiserror::Error;

/// Errors raised while constructing a program.
///
/// Execution itself has no recoverable failures: a validated program can only
/// read and write registers that exist. Anything that bypasses validation is a
/// caller bug and aborts on the out-of-bounds register access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MachineError {
    /// Opcode number outside the sixteen defined opcodes.
    #[error("unknown opcode number {0}")]
    UnknownOpcode(u8),
    /// An operand names a register the bank does not have.
    #[error(
        "instruction {position}: operand {operand} names register {index} but the bank has {register_count} registers"
    )]
    OperandOutOfRange {
        /// Position of the offending instruction within the program.
        position: usize,
        /// Which operand slot (`a`, `b`, or `c`) is out of range.
        operand: char,
        /// The register index the operand carries.
        index: Word,
        /// Size of the register bank the program was validated against.
        register_count: usize,
    },
    /// The designated instruction-pointer register does not exist in the bank.
    #[error("instruction pointer register {index} out of range for {register_count} registers")]
    IpRegisterOutOfRange {
        /// The nominated instruction-pointer register index.
        index: usize,
        /// Size of the register bank the program was validated against.
        register_count: usize,
    },
}

//! Register-based machine interpreter with an instruction-pointer-bound register.
//!
//! The machine executes programs made of sixteen fixed opcodes over a small
//! bank of signed integer registers. Programs are built once by the caller
//! (instructions pre-bound to their operands) and executed to halt.
//!
//! # Architecture
//!
//! - **Registers**: a runtime-sized bank of [`Word`]s (`i64`), zero-initialized,
//!   addressed only by index
//! - **Instruction format**: one opcode plus three bound operands `a`, `b`, `c`;
//!   `c` is always the destination register, `a`/`b` are register indices or
//!   immediates per opcode variant
//! - **Execution model**: before each step the current instruction pointer is
//!   written into a designated register; after the step it is read back and
//!   incremented. Writing to that register is how programs jump.
//! - **Halting**: the run loop terminates when the instruction pointer leaves
//!   `[0, program length)`. There is no halt opcode.
//!
//! # Modules
//!
//! - [`errors`]: program-construction error type
//! - [`isa`]: opcode set definition and numeric opcode mappings
//! - [`machine`]: the run-to-halt loop and early-stop predicate support
//! - [`program`]: bound instructions and validated programs
//! - [`registers`]: the mutable register bank

pub mod errors;
pub mod isa;
#[cfg(test)]
mod isa_static_check;
pub mod machine;
pub mod program;
pub mod registers;

pub use errors::MachineError;
pub use isa::{Opcode, OperandKind};
pub use machine::Machine;
pub use program::{Instruction, Program};
pub use registers::{Registers, Word};

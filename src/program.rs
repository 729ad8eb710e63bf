//! Bound instructions and validated programs.
//!
//! An [`Instruction`] carries its opcode and the three operands it was bound
//! to when the program was built; a [`Program`] is the immutable instruction
//! sequence plus the designated instruction-pointer register. Programs are
//! caller-constructed data, so [`Program::new`] checks the only failure class
//! the machine has — operand or instruction-pointer register indices outside
//! the bank — and everything after that is infallible.

use crate::errors::MachineError;
use crate::isa::{Opcode, OperandKind};
use crate::registers::{Registers, Word};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An opcode pre-bound to its three operands.
///
/// `c` is always a destination register index. Whether `a` and `b` are
/// register indices or immediates depends on the opcode; see
/// [`Opcode::operand_kinds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// The opcode to execute.
    pub opcode: Opcode,
    /// First operand (register index or immediate per opcode).
    pub a: Word,
    /// Second operand (register index or immediate per opcode).
    pub b: Word,
    /// Destination register index.
    pub c: Word,
}

impl Instruction {
    /// Binds an opcode to its operands.
    pub const fn new(opcode: Opcode, a: Word, b: Word, c: Word) -> Self {
        Self { opcode, a, b, c }
    }

    /// Executes this instruction against a register bank.
    ///
    /// Writes exactly register `c` and touches nothing else. Arithmetic wraps
    /// on overflow. Comparison opcodes write `1` or `0`.
    ///
    /// # Panics
    ///
    /// Panics if an operand interpreted as a register index is outside the
    /// bank (see [`Registers`] on the fail-fast contract).
    pub fn apply(&self, r: &mut Registers) {
        let Self { opcode, a, b, c } = *self;
        r[c as usize] = match opcode {
            Opcode::Addr => r[a as usize].wrapping_add(r[b as usize]),
            Opcode::Addi => r[a as usize].wrapping_add(b),
            Opcode::Mulr => r[a as usize].wrapping_mul(r[b as usize]),
            Opcode::Muli => r[a as usize].wrapping_mul(b),
            Opcode::Banr => r[a as usize] & r[b as usize],
            Opcode::Bani => r[a as usize] & b,
            Opcode::Borr => r[a as usize] | r[b as usize],
            Opcode::Bori => r[a as usize] | b,
            Opcode::Setr => r[a as usize],
            Opcode::Seti => a,
            Opcode::Gtir => (a > r[b as usize]) as Word,
            Opcode::Gtri => (r[a as usize] > b) as Word,
            Opcode::Gtrr => (r[a as usize] > r[b as usize]) as Word,
            Opcode::Eqir => (a == r[b as usize]) as Word,
            Opcode::Eqri => (r[a as usize] == b) as Word,
            Opcode::Eqrr => (r[a as usize] == r[b as usize]) as Word,
        };
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.opcode, self.a, self.b, self.c)
    }
}

/// An ordered, immutable sequence of bound instructions.
///
/// Carries the instruction-pointer register index (the register that mirrors
/// the program counter during execution, see [`crate::machine::Machine`]) and
/// the register count the program was validated against. A program never
/// mutates, so one instance can back any number of runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    /// The instructions, executed by index.
    pub instructions: Vec<Instruction>,
    /// Index of the register that mirrors the program counter.
    pub ip_register: usize,
    /// Size of the register bank this program was validated against.
    pub register_count: usize,
}

impl Program {
    /// Builds a program, rejecting register references outside the bank.
    ///
    /// Every destination operand, every operand an opcode interprets as a
    /// register index, and the instruction-pointer register itself must fall
    /// inside `[0, register_count)`. Immediate and ignored operands are not
    /// constrained.
    pub fn new(
        instructions: Vec<Instruction>,
        ip_register: usize,
        register_count: usize,
    ) -> Result<Self, MachineError> {
        let program = Self {
            instructions,
            ip_register,
            register_count,
        };
        program.validate()?;
        Ok(program)
    }

    /// Re-checks the construction invariants on an existing program.
    pub fn validate(&self) -> Result<(), MachineError> {
        if self.ip_register >= self.register_count {
            return Err(MachineError::IpRegisterOutOfRange {
                index: self.ip_register,
                register_count: self.register_count,
            });
        }
        for (position, instruction) in self.instructions.iter().enumerate() {
            let (a_kind, b_kind) = instruction.opcode.operand_kinds();
            self.check_operand(position, 'c', instruction.c)?;
            if a_kind == OperandKind::Register {
                self.check_operand(position, 'a', instruction.a)?;
            }
            if b_kind == OperandKind::Register {
                self.check_operand(position, 'b', instruction.b)?;
            }
        }
        Ok(())
    }

    /// Returns the number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns `true` if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    fn check_operand(&self, position: usize, operand: char, index: Word) -> Result<(), MachineError> {
        if index < 0 || index as usize >= self.register_count {
            return Err(MachineError::OperandOutOfRange {
                position,
                operand,
                index,
                register_count: self.register_count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instr(opcode: Opcode, a: Word, b: Word, c: Word) -> Instruction {
        Instruction::new(opcode, a, b, c)
    }

    #[test]
    fn accepts_register_operands_inside_the_bank() {
        let program = Program::new(
            vec![
                instr(Opcode::Addr, 0, 1, 2),
                instr(Opcode::Seti, 99, 0, 0),
            ],
            2,
            3,
        );
        assert!(program.is_ok());
    }

    #[test]
    fn immediates_are_not_range_checked() {
        // seti's `a` and addi's `b` are immediates and may carry any value.
        let program = Program::new(
            vec![
                instr(Opcode::Seti, 7_586_220, 4, 0),
                instr(Opcode::Addi, 0, -16, 1),
                instr(Opcode::Bani, 0, 16_777_215, 1),
            ],
            1,
            2,
        );
        assert!(program.is_ok());
    }

    #[test]
    fn rejects_destination_outside_the_bank() {
        let err = Program::new(vec![instr(Opcode::Seti, 0, 0, 4)], 0, 4).unwrap_err();
        assert_eq!(
            err,
            MachineError::OperandOutOfRange {
                position: 0,
                operand: 'c',
                index: 4,
                register_count: 4,
            }
        );
    }

    #[test]
    fn rejects_register_operand_outside_the_bank() {
        let err = Program::new(vec![instr(Opcode::Addr, 1, 6, 0)], 0, 3).unwrap_err();
        assert_eq!(
            err,
            MachineError::OperandOutOfRange {
                position: 0,
                operand: 'b',
                index: 6,
                register_count: 3,
            }
        );
    }

    #[test]
    fn rejects_negative_register_operand() {
        let err = Program::new(vec![instr(Opcode::Setr, -1, 0, 0)], 0, 3).unwrap_err();
        assert!(matches!(
            err,
            MachineError::OperandOutOfRange { operand: 'a', index: -1, .. }
        ));
    }

    #[test]
    fn rejects_ip_register_outside_the_bank() {
        let err = Program::new(vec![], 6, 6).unwrap_err();
        assert_eq!(
            err,
            MachineError::IpRegisterOutOfRange {
                index: 6,
                register_count: 6,
            }
        );
    }

    #[test]
    fn error_display_names_the_offender() {
        let err = Program::new(vec![instr(Opcode::Mulr, 0, 5, 1)], 0, 4).unwrap_err();
        assert_eq!(
            err.to_string(),
            "instruction 0: operand b names register 5 but the bank has 4 registers"
        );
    }

    #[test]
    fn instruction_display_uses_mnemonic_notation() {
        let i = instr(Opcode::Addi, 4, 16, 4);
        assert_eq!(i.to_string(), "addi 4 16 4");
        let i = instr(Opcode::Seti, -1, 0, 2);
        assert_eq!(i.to_string(), "seti -1 0 2");
    }
}

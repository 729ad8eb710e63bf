//! The run-to-halt loop.
//!
//! A [`Machine`] owns a register bank, the scalar instruction pointer, and a
//! counter of executed steps. The loop fetches the instruction at the current
//! pointer, executes it, and advances, halting when the pointer leaves the
//! program. The pointer is mirrored into the program's designated register
//! before each step and read back afterwards; that aliasing is the machine's
//! only branching mechanism and is part of the contract, not an
//! implementation detail.

use crate::program::Program;
use crate::registers::{Registers, Word};
use log::{debug, trace};

/// A register machine mid-run: bank, instruction pointer, step counter.
///
/// One machine instance is used with a single register count throughout its
/// life. The bank is owned exclusively by the machine for the duration of a
/// run; programs are read-only and may back many machines at once.
#[derive(Debug, Clone)]
pub struct Machine {
    /// The register bank mutated by executed instructions.
    registers: Registers,
    /// Scalar instruction pointer. May leave `[0, program length)`; that is
    /// the halt condition, not an error.
    ip: Word,
    /// Number of instructions executed so far, plus any credit from
    /// [`Machine::add_steps`].
    steps: u64,
}

impl Machine {
    /// Creates a machine with a fresh zero-initialized bank of
    /// `register_count` registers, pointer at 0.
    pub fn new(register_count: usize) -> Self {
        Self::with_registers(Registers::new(register_count))
    }

    /// Creates a machine over a caller-seeded bank, pointer at 0.
    pub fn with_registers(registers: Registers) -> Self {
        Self {
            registers,
            ip: 0,
            steps: 0,
        }
    }

    /// Returns the register bank.
    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    /// Returns the register bank for seeding or mid-run adjustment.
    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    /// Consumes the machine, returning the final bank contents.
    pub fn into_registers(self) -> Registers {
        self.registers
    }

    /// Returns the current instruction pointer.
    pub fn ip(&self) -> Word {
        self.ip
    }

    /// Sets the instruction pointer for the next run.
    pub fn set_ip(&mut self, ip: Word) {
        self.ip = ip;
    }

    /// Returns the number of steps executed (plus any credited steps).
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Credits `extra` steps to the counter.
    ///
    /// For callers that stop a run, replace a costly instruction sequence
    /// with its closed form, and resume: crediting the elided step count
    /// keeps the counter meaningful for step-based stop predicates. The
    /// machine itself never elides anything.
    pub fn add_steps(&mut self, extra: u64) {
        self.steps += extra;
    }

    /// Runs the program until the instruction pointer leaves it.
    ///
    /// Each step writes the pointer into the program's instruction-pointer
    /// register, executes the instruction at the pointer, reads the register
    /// back, and increments. The bank is mutated in place; inspect it through
    /// [`Machine::registers`] after the run. A program that never steers its
    /// pointer out of range does not return.
    pub fn run(&mut self, program: &Program) {
        self.run_until(program, |_, _, _| false);
    }

    /// Runs the program until halt or until `stop` returns `true`.
    ///
    /// The predicate receives the bank, the pointer, and the step counter at
    /// the top of each iteration, before that step's pointer write-back. A
    /// stopped machine is left exactly as the run left it (stopping is pure
    /// observation) and can be resumed with another `run` call.
    pub fn run_until<F>(&mut self, program: &Program, mut stop: F)
    where
        F: FnMut(&Registers, Word, u64) -> bool,
    {
        let len = program.instructions.len() as Word;
        while self.ip >= 0 && self.ip < len {
            if stop(&self.registers, self.ip, self.steps) {
                debug!(
                    "stopped at ip {} after {} steps, registers {}",
                    self.ip, self.steps, self.registers
                );
                return;
            }
            self.registers[program.ip_register] = self.ip;
            let instruction = &program.instructions[self.ip as usize];
            trace!("{:>4}: {}", self.ip, instruction);
            instruction.apply(&mut self.registers);
            self.ip = self.registers[program.ip_register].wrapping_add(1);
            self.steps += 1;
        }
        debug!(
            "halted at ip {} after {} steps, registers {}",
            self.ip, self.steps, self.registers
        );
    }
}

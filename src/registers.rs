//! The mutable register bank.

use std::fmt;
use std::ops::{Index, IndexMut};

/// Value stored in a register. All machine arithmetic is over this type.
pub type Word = i64;

/// Fixed-length bank of signed integer registers.
///
/// The bank's length is chosen once at construction and never changes;
/// registers are addressed only by index. A fresh bank is zero-initialized;
/// callers seed individual registers through [`IndexMut`] when a run needs a
/// non-zero starting state.
///
/// # Panics
///
/// Indexing panics on an out-of-range register index. Programs are validated
/// against the bank size at construction, so a panic here means the caller
/// built an inconsistent program/bank pair, which is a bug rather than a
/// runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Registers {
    regs: Vec<Word>,
}

impl Registers {
    /// Creates a zero-initialized bank of `count` registers.
    pub fn new(count: usize) -> Self {
        Self {
            regs: vec![0; count],
        }
    }

    /// Creates a bank holding exactly the given values.
    pub fn from_values(values: impl Into<Vec<Word>>) -> Self {
        Self {
            regs: values.into(),
        }
    }

    /// Returns the number of registers in the bank.
    pub fn len(&self) -> usize {
        self.regs.len()
    }

    /// Returns `true` if the bank has no registers.
    pub fn is_empty(&self) -> bool {
        self.regs.is_empty()
    }

    /// Returns the registers as a slice, in index order.
    pub fn as_slice(&self) -> &[Word] {
        &self.regs
    }
}

impl Index<usize> for Registers {
    type Output = Word;

    fn index(&self, index: usize) -> &Word {
        &self.regs[index]
    }
}

impl IndexMut<usize> for Registers {
    fn index_mut(&mut self, index: usize) -> &mut Word {
        &mut self.regs[index]
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, reg) in self.regs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{reg}")?;
        }
        write!(f, "]")
    }
}

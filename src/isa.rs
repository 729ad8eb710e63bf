//! Opcode set definition.
//!
//! The [`for_each_opcode!`](crate::for_each_opcode) macro holds the canonical
//! opcode table and invokes a callback macro for code generation, so multiple
//! modules can generate opcode-related code without duplicating the table.
//!
//! This module generates:
//! - The [`Opcode`] enum with its fixed 0..16 numbering
//! - `TryFrom<u8>` for mapping opcode numbers
//! - [`Opcode::mnemonic`] and the operand-kind table driving program validation
//!
//! Every opcode takes three operands `a b c`. `c` is always a destination
//! register index; the table records how `a` and `b` are interpreted
//! (`Reg` = register index, `Imm` = immediate, `Ignored` = unused).

use crate::errors::MachineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Invokes a callback macro with the complete opcode table.
///
/// This macro enables code generation for opcodes in multiple modules
/// without duplicating the table.
#[macro_export]
macro_rules! for_each_opcode {
    ($callback:ident) => {
        $callback! {
            // =========================
            // Arithmetic
            // =========================
            /// addr a b c ; r[c] = r[a] + r[b]
            Addr = 0, "addr" => [a: Reg, b: Reg],
            /// addi a b c ; r[c] = r[a] + b
            Addi = 1, "addi" => [a: Reg, b: Imm],
            /// mulr a b c ; r[c] = r[a] * r[b]
            Mulr = 2, "mulr" => [a: Reg, b: Reg],
            /// muli a b c ; r[c] = r[a] * b
            Muli = 3, "muli" => [a: Reg, b: Imm],
            // =========================
            // Bitwise
            // =========================
            /// banr a b c ; r[c] = r[a] & r[b]
            Banr = 4, "banr" => [a: Reg, b: Reg],
            /// bani a b c ; r[c] = r[a] & b
            Bani = 5, "bani" => [a: Reg, b: Imm],
            /// borr a b c ; r[c] = r[a] | r[b]
            Borr = 6, "borr" => [a: Reg, b: Reg],
            /// bori a b c ; r[c] = r[a] | b
            Bori = 7, "bori" => [a: Reg, b: Imm],
            // =========================
            // Assignment
            // =========================
            /// setr a _ c ; r[c] = r[a]
            Setr = 8, "setr" => [a: Reg, b: Ignored],
            /// seti a _ c ; r[c] = a
            Seti = 9, "seti" => [a: Imm, b: Ignored],
            // =========================
            // Greater-than
            // =========================
            /// gtir a b c ; r[c] = 1 if a > r[b] else 0
            Gtir = 10, "gtir" => [a: Imm, b: Reg],
            /// gtri a b c ; r[c] = 1 if r[a] > b else 0
            Gtri = 11, "gtri" => [a: Reg, b: Imm],
            /// gtrr a b c ; r[c] = 1 if r[a] > r[b] else 0
            Gtrr = 12, "gtrr" => [a: Reg, b: Reg],
            // =========================
            // Equality
            // =========================
            /// eqir a b c ; r[c] = 1 if a == r[b] else 0
            Eqir = 13, "eqir" => [a: Imm, b: Reg],
            /// eqri a b c ; r[c] = 1 if r[a] == b else 0
            Eqri = 14, "eqri" => [a: Reg, b: Imm],
            /// eqrr a b c ; r[c] = 1 if r[a] == r[b] else 0
            Eqrr = 15, "eqrr" => [a: Reg, b: Reg],
        }
    };
}

/// How an operand slot is interpreted by an opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// The operand is a register index and is read from the bank.
    Register,
    /// The operand is used as an immediate value.
    Immediate,
    /// The operand is not consulted at all.
    Ignored,
}

#[macro_export]
#[doc(hidden)]
macro_rules! define_opcodes {
    (
        $(
            $(#[$doc:meta])*
            $name:ident = $number:literal, $mnemonic:literal => [ a: $akind:ident, b: $bkind:ident ]
        ),* $(,)?
    ) => {
        /// One of the sixteen machine opcodes.
        ///
        /// The discriminants are the fixed opcode numbering used when programs
        /// arrive as numeric `opcode a b c` quadruples.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        #[repr(u8)]
        pub enum Opcode {
            $(
                $(#[$doc])*
                $name = $number,
            )*
        }

        impl TryFrom<u8> for Opcode {
            type Error = MachineError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                match value {
                    $( $number => Ok(Opcode::$name), )*
                    _ => Err(MachineError::UnknownOpcode(value)),
                }
            }
        }

        impl Opcode {
            /// All sixteen opcodes, in opcode-number order.
            pub const ALL: [Opcode; 16] = [ $( Opcode::$name, )* ];

            /// Returns the lowercase mnemonic for this opcode.
            pub const fn mnemonic(&self) -> &'static str {
                match self {
                    $( Opcode::$name => $mnemonic, )*
                }
            }

            /// Returns how the `a` and `b` operand slots are interpreted.
            ///
            /// The `c` slot is always a destination register index.
            pub const fn operand_kinds(&self) -> (OperandKind, OperandKind) {
                match self {
                    $(
                        Opcode::$name => (
                            define_opcodes!(@kind $akind),
                            define_opcodes!(@kind $bkind),
                        ),
                    )*
                }
            }
        }
    };

    // ---------- operand kinds ----------
    (@kind Reg) => { OperandKind::Register };
    (@kind Imm) => { OperandKind::Immediate };
    (@kind Ignored) => { OperandKind::Ignored };
}

for_each_opcode!(define_opcodes);

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opcode_try_from_invalid() {
        assert!(matches!(
            Opcode::try_from(16),
            Err(MachineError::UnknownOpcode(16))
        ));
        assert!(matches!(
            Opcode::try_from(0xFF),
            Err(MachineError::UnknownOpcode(0xFF))
        ));
    }

    #[test]
    fn opcode_numbering_is_dense() {
        for (number, op) in Opcode::ALL.iter().enumerate() {
            assert_eq!(*op as u8, number as u8);
            assert_eq!(Opcode::try_from(number as u8).unwrap(), *op);
        }
    }

    #[test]
    fn mnemonics() {
        assert_eq!(Opcode::Addr.mnemonic(), "addr");
        assert_eq!(Opcode::Seti.mnemonic(), "seti");
        assert_eq!(Opcode::Gtir.mnemonic(), "gtir");
        assert_eq!(Opcode::Eqrr.mnemonic(), "eqrr");
        assert_eq!(format!("{}", Opcode::Bani), "bani");
    }

    #[test]
    fn operand_kinds() {
        assert_eq!(
            Opcode::Addr.operand_kinds(),
            (OperandKind::Register, OperandKind::Register)
        );
        assert_eq!(
            Opcode::Addi.operand_kinds(),
            (OperandKind::Register, OperandKind::Immediate)
        );
        assert_eq!(
            Opcode::Seti.operand_kinds(),
            (OperandKind::Immediate, OperandKind::Ignored)
        );
        assert_eq!(
            Opcode::Gtir.operand_kinds(),
            (OperandKind::Immediate, OperandKind::Register)
        );
    }
}

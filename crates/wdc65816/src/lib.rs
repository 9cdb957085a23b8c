//! Static architecture metadata for the WDC 65C816, the CPU used in the
//! Super Nintendo (SNES).
//!
//! This crate describes the instruction set: opcodes, mnemonics, addressing
//! modes, the status register, and base cycle counts. It deliberately does
//! not execute anything — there is no `Cpu`, no memory bus, no `dispatch`.
//! Consumers that need to decode and analyze a byte stream build on top of
//! this table; consumers that need to run 65C816 code are out of scope here.

pub mod cycles;
pub mod opcodes;
pub mod status;

pub use cycles::BASE_CYCLES;
pub use opcodes::{AddressingMode, Mnemonic, Opcode, SNES_OPCODES};
pub use status::ProcessorMode;

//! Static disassembler core for SNES/Super Famicom cartridge ROMs targeting
//! the WDC 65C816.
//!
//! Given raw cartridge bytes, [`analyze`] classifies the cartridge layout,
//! recursively decodes reachable code from the reset/NMI/IRQ vectors, and
//! returns the full instruction stream, basic blocks, functions, and
//! cross-reference/symbol tables. The crate does not touch the filesystem
//! except through the optional [`Rom::from_file`] convenience constructor;
//! everything else operates on an in-memory byte slice.

pub mod addr;
pub mod analysis;
pub mod cache;
pub mod cycles;
pub mod decode;
pub mod error;
pub mod header;
pub mod registers;
pub mod rom;

pub use addr::{AddrPc, AddrSnes, RegionKind};
pub use analysis::{analyze, AnalysisOptions, AnalysisResult, BasicBlock, Function, Symbol, SymbolKind, SymbolSource};
pub use decode::{DecodedInstruction, FlowType};
pub use error::{AnalysisError, Diagnostic};
pub use header::{CartridgeInfo, Coprocessor, Mapper, RegionCode, Speed};
pub use rom::Rom;

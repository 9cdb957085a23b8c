//! Error taxonomy, one `thiserror` enum per subsystem, following the same
//! split the ROM-parsing code this crate is grounded on uses (a dedicated
//! error enum per concern rather than one catch-all).

use thiserror::Error;

use crate::addr::{AddrPc, AddrSnes};

#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM is empty")]
    Empty,
    #[error("ROM size {0} bytes is not a multiple of 1024 bytes (after copier header removal)")]
    InvalidSize(usize),
    #[error("address {0} is outside the ROM image")]
    OutOfRange(AddrPc),
}

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("PC address {0} is not valid for LoROM")]
    InvalidPcLoRom(AddrPc),
    #[error("PC address {0} is not valid for HiROM")]
    InvalidPcHiRom(AddrPc),
    #[error("SNES address {0} is not valid for LoROM")]
    InvalidSnesLoRom(AddrSnes),
    #[error("SNES address {0} is not valid for HiROM")]
    InvalidSnesHiRom(AddrSnes),
    #[error("SNES address {0} is unmapped (WRAM, hardware register, or open bus)")]
    Unmapped(AddrSnes),
}

#[derive(Debug, Error)]
pub enum HeaderError {
    #[error("no header candidate scored above the classification threshold (best: {best_score} at {best_location:?})")]
    ClassificationFailed { best_score: i32, best_location: AddrPc },
    #[error("checksum mismatch: checksum ${checksum:04X} ^ complement ${complement:04X} != 0xFFFF")]
    ChecksumMismatch { checksum: u16, complement: u16 },
    #[error("could not read header field: {0}")]
    FieldRead(&'static str),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("decode requested at unmapped address {0}")]
    AtUnmappedAddress(AddrSnes),
    #[error("instruction at {address} needs {needed} operand bytes but only {available} are available")]
    TruncatedOperand { address: AddrSnes, needed: usize, available: usize },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Rom(#[from] RomError),
    #[error(transparent)]
    Header(#[from] HeaderError),
    #[error("unreadable input: {0}")]
    UnreadableInput(String),
}

/// Recoverable anomalies that do not abort analysis but are recorded on
/// `AnalysisResult::diagnostics` and logged once each.
#[derive(Debug, Error, Clone)]
pub enum Diagnostic {
    #[error("copier header presence is ambiguous; assumed {assumed_present}")]
    CopierHeaderAmbiguous { assumed_present: bool },
    #[error("checksum mismatch: ${checksum:04X} ^ ${complement:04X} != 0xFFFF")]
    ChecksumMismatch { checksum: u16, complement: u16 },
    #[error("decode at unmapped address {address}")]
    DecodeAtUnmappedAddress { address: AddrSnes },
    #[error("truncated operand at {address}")]
    TruncatedOperand { address: AddrSnes },
    #[error("unknown opcode ${opcode:02X} at {address}, emitted as raw byte")]
    UnknownOpcode { address: AddrSnes, opcode: u8 },
    #[error("processor mode conflict at {address}, re-decoded conservatively")]
    ModeConflict { address: AddrSnes },
    #[error("code overlap at {address}, kept the earlier decoding")]
    CodeOverlap { address: AddrSnes },
    #[error("symbol conflict at {address} for name {name:?}, suppressed the later entry")]
    SymbolConflict { address: AddrSnes, name: String },
    #[error("instruction limit of {limit} exceeded, analysis stopped early")]
    InstructionLimitExceeded { limit: usize },
    #[error("jump/call to unmapped target {target} from {from}")]
    UnmappedTarget { from: AddrSnes, target: AddrSnes },
}

//! Cartridge header scoring and the resulting `CartridgeInfo` (C2/C3).

use std::fmt;

use nom::{
    multi::many1,
    number::complete::{le_u16, le_u8},
};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::{addr::{AddrPc, AddrSnes}, error::{Diagnostic, HeaderError}, rom::Rom};

pub const HEADER_SIZE: usize = 64;
const TITLE_LEN: usize = 21;

#[rustfmt::skip]
mod offsets {
    pub const TITLE: usize = 0x00;
    pub const MAP_MODE: usize = 0x15;
    pub const CART_TYPE: usize = 0x16;
    pub const ROM_SIZE: usize = 0x17;
    pub const SRAM_SIZE: usize = 0x18;
    pub const REGION_CODE: usize = 0x19;
    pub const DEVELOPER_ID: usize = 0x1A;
    pub const VERSION: usize = 0x1B;
    pub const COMPLEMENT: usize = 0x1C;
    pub const CHECKSUM: usize = 0x1E;
    pub const RESET_VECTOR: usize = 0x3C;
    pub const NMI_VECTOR: usize = 0x3A;
    pub const IRQ_VECTOR: usize = 0x3E;
    pub const COP_VECTOR: usize = 0x34;
    pub const BRK_VECTOR: usize = 0x3E;
    pub const ABORT_VECTOR: usize = 0x38;
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Mapper {
    LoRom,
    HiRom,
    ExHiRom,
    ExLoRom,
}

impl fmt::Display for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Mapper::LoRom => "LoROM",
            Mapper::HiRom => "HiROM",
            Mapper::ExHiRom => "ExHiROM",
            Mapper::ExLoRom => "ExLoROM",
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Speed {
    Slow,
    Fast,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Coprocessor {
    None,
    Sa1,
    SuperFx,
    Dsp,
    SRtc,
    Sdd1,
    Spc7110,
    Cx4,
    St01x,
    Msu1,
    Bsx,
    Other,
}

#[derive(Copy, Clone, Debug, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize)]
#[repr(u8)]
pub enum RegionCode {
    Japan = 0x00,
    NorthAmerica = 0x01,
    Europe = 0x02,
    Sweden = 0x03,
    Finland = 0x04,
    Denmark = 0x05,
    France = 0x06,
    Netherlands = 0x07,
    Spain = 0x08,
    Germany = 0x09,
    Italy = 0x0A,
    China = 0x0B,
    Indonesia = 0x0C,
    Korea = 0x0D,
    Global = 0x0E,
    Canada = 0x0F,
    Brazil = 0x10,
    Australia = 0x11,
    Other1 = 0x12,
    Other2 = 0x13,
    Other3 = 0x14,
}

/// Immutable cartridge metadata produced once per ROM by `classify_cartridge`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CartridgeInfo {
    pub mapper: Mapper,
    pub speed: Speed,
    pub coprocessor: Coprocessor,
    pub title: String,
    pub rom_size: u32,
    pub sram_size: u32,
    pub region_code: Option<RegionCode>,
    pub developer_id: u8,
    pub version: u8,
    pub checksum: u16,
    pub checksum_complement: u16,
    pub reset_vector: AddrSnes,
    pub nmi_vector: AddrSnes,
    pub irq_vector: AddrSnes,
    pub cop_vector: AddrSnes,
    pub brk_vector: AddrSnes,
    pub abort_vector: AddrSnes,
}

impl CartridgeInfo {
    pub fn checksum_valid(&self) -> bool {
        self.checksum ^ self.checksum_complement == 0xFFFF
    }
}

struct Candidate {
    mapper: Mapper,
    location: AddrPc,
}

fn candidates(rom_len: usize) -> Vec<Candidate> {
    let mut out = vec![
        Candidate { mapper: Mapper::HiRom, location: AddrPc(0xFFC0) },
        Candidate { mapper: Mapper::LoRom, location: AddrPc(0x7FC0) },
    ];
    if rom_len >= 0x41_0000 {
        out.push(Candidate { mapper: Mapper::ExHiRom, location: AddrPc(0x40FFC0) });
        out.push(Candidate { mapper: Mapper::ExLoRom, location: AddrPc(0x407FC0) });
    }
    out.retain(|c| c.location.0 + HEADER_SIZE <= rom_len);
    out
}

fn read_u8(rom: &Rom, at: AddrPc) -> Result<u8, HeaderError> {
    le_u8::<_, nom::error::Error<&[u8]>>(rom.bytes().get(at.0..).unwrap_or(&[]))
        .map(|(_, v)| v)
        .map_err(|_| HeaderError::FieldRead("u8"))
}

fn read_u16(rom: &Rom, at: AddrPc) -> Result<u16, HeaderError> {
    le_u16::<_, nom::error::Error<&[u8]>>(rom.bytes().get(at.0..).unwrap_or(&[]))
        .map(|(_, v)| v)
        .map_err(|_| HeaderError::FieldRead("u16"))
}

fn read_title(rom: &Rom, at: AddrPc) -> Result<Vec<u8>, HeaderError> {
    many1(le_u8::<_, nom::error::Error<&[u8]>>)(rom.bytes().get(at.0..at.0 + TITLE_LEN).unwrap_or(&[]))
        .map(|(_, v)| v)
        .map_err(|_| HeaderError::FieldRead("title"))
}

/// Weighted score for one header candidate location, per the scoring
/// rubric: +8 map-mode nibble consistency, +4 checksum invariant, +3
/// printable title, +2 plausible ROM-size byte, +2 reset vector lands in
/// mapped ROM, -4 per run of >=4 filler bytes in the title.
fn score_candidate(rom: &Rom, candidate: &Candidate) -> i32 {
    let mut score = 0i32;
    let base = candidate.location;

    let title = read_title(rom, base + offsets::TITLE).unwrap_or_default();
    let map_mode = read_u8(rom, base + offsets::MAP_MODE).unwrap_or(0);
    let rom_size_byte = read_u8(rom, base + offsets::ROM_SIZE).unwrap_or(0);
    let complement = read_u16(rom, base + offsets::COMPLEMENT).unwrap_or(0);
    let checksum = read_u16(rom, base + offsets::CHECKSUM).unwrap_or(0);

    let expected_nibble = match candidate.mapper {
        Mapper::LoRom => 0x0,
        Mapper::HiRom => 0x1,
        Mapper::ExLoRom => 0x2,
        Mapper::ExHiRom => 0x5,
    };
    if (map_mode & 0x0F) == expected_nibble {
        score += 8;
    }
    if checksum ^ complement == 0xFFFF {
        score += 4;
    }
    if !title.is_empty() && title.iter().all(|&b| (0x20..=0x7E).contains(&b)) {
        score += 3;
    }
    let declared_size_kb = if rom_size_byte > 0 { 1u32 << rom_size_byte } else { 0 };
    if declared_size_kb as usize * 1024 >= rom.len().next_power_of_two() {
        score += 2;
    }
    let reset_offset = base + offsets::RESET_VECTOR;
    if let Ok(lo) = read_u8(rom, reset_offset) {
        if let Ok(hi) = read_u8(rom, reset_offset + 1) {
            let reset = AddrSnes::new(base_bank(candidate.mapper) as usize | ((hi as usize) << 8) | lo as usize);
            if candidate.mapper.linear_offset(reset).is_some() {
                score += 2;
            }
        }
    }

    let mut run = 0;
    for &b in &title {
        if b == 0x00 || b == 0xFF {
            run += 1;
            if run == 4 {
                score -= 4;
            }
        } else {
            run = 0;
        }
    }

    score
}

fn base_bank(mapper: Mapper) -> usize {
    match mapper {
        Mapper::LoRom | Mapper::ExLoRom => 0x00_0000,
        Mapper::HiRom | Mapper::ExHiRom => 0xC0_0000,
    }
}

/// Picks the best-scoring header candidate and builds a `CartridgeInfo`
/// from it. Emits a `CartridgeClassificationFailed`-shaped error when no
/// candidate clears the minimum threshold; otherwise returns the info plus
/// any non-fatal diagnostics (e.g. a checksum mismatch).
pub fn classify_cartridge(rom: &Rom) -> Result<(CartridgeInfo, Vec<Diagnostic>), HeaderError> {
    const THRESHOLD: i32 = 10;

    let mut scored: Vec<(i32, &Candidate)> = Vec::new();
    let candidates = candidates(rom.len());
    for candidate in &candidates {
        scored.push((score_candidate(rom, candidate), candidate));
    }

    // Tie-break order: HiROM > LoROM > ExHiROM > ExLoROM.
    let rank = |m: Mapper| match m {
        Mapper::HiRom => 0,
        Mapper::LoRom => 1,
        Mapper::ExHiRom => 2,
        Mapper::ExLoRom => 3,
    };
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(rank(a.1.mapper).cmp(&rank(b.1.mapper))));

    let (best_score, best) = scored.first().copied().ok_or(HeaderError::ClassificationFailed {
        best_score: 0,
        best_location: AddrPc(0),
    })?;

    if best_score < THRESHOLD {
        return Err(HeaderError::ClassificationFailed { best_score, best_location: best.location });
    }

    log::info!("cartridge classified as {} (score {})", best.mapper, best_score);

    let base = best.location;
    let mut diagnostics = Vec::new();

    let title_bytes = read_title(rom, base + offsets::TITLE)?;
    let title = String::from_utf8_lossy(&title_bytes).trim_end().to_string();
    let map_mode = read_u8(rom, base + offsets::MAP_MODE)?;
    let speed = if map_mode & 0x10 != 0 { Speed::Fast } else { Speed::Slow };
    let cart_type = read_u8(rom, base + offsets::CART_TYPE)?;
    let coprocessor = classify_coprocessor(cart_type);
    let rom_size_byte = read_u8(rom, base + offsets::ROM_SIZE)?;
    let sram_size_byte = read_u8(rom, base + offsets::SRAM_SIZE)?;
    let region_code = RegionCode::try_from(read_u8(rom, base + offsets::REGION_CODE)?).ok();
    let developer_id = read_u8(rom, base + offsets::DEVELOPER_ID)?;
    let version = read_u8(rom, base + offsets::VERSION)?;
    let checksum = read_u16(rom, base + offsets::CHECKSUM)?;
    let checksum_complement = read_u16(rom, base + offsets::COMPLEMENT)?;

    if checksum ^ checksum_complement != 0xFFFF {
        log::warn!("checksum mismatch: ${checksum:04X} ^ ${checksum_complement:04X} != 0xFFFF");
        diagnostics.push(Diagnostic::ChecksumMismatch { checksum, complement: checksum_complement });
    }

    let bank = base_bank(best.mapper) as usize;
    let read_vector = |offset: usize| -> Result<AddrSnes, HeaderError> {
        let raw = read_u16(rom, base + offset)? as usize;
        Ok(AddrSnes::new(bank | raw))
    };

    let info = CartridgeInfo {
        mapper: best.mapper,
        speed,
        coprocessor,
        title,
        rom_size: if rom_size_byte > 0 { 1024 << rom_size_byte } else { 0 },
        sram_size: if sram_size_byte > 0 { 1024 << sram_size_byte } else { 0 },
        region_code,
        developer_id,
        version,
        checksum,
        checksum_complement,
        reset_vector: read_vector(offsets::RESET_VECTOR)?,
        nmi_vector: read_vector(offsets::NMI_VECTOR)?,
        irq_vector: read_vector(offsets::IRQ_VECTOR)?,
        cop_vector: read_vector(offsets::COP_VECTOR)?,
        brk_vector: read_vector(offsets::BRK_VECTOR)?,
        abort_vector: read_vector(offsets::ABORT_VECTOR)?,
    };

    Ok((info, diagnostics))
}

/// Maps the cartridge-type byte to a coprocessor tag. Mirrors the family
/// groupings real SNES cartridges use; exact low-nibble memory combinations
/// (RAM/SRAM presence) are not distinguished here since they do not affect
/// disassembly.
fn classify_coprocessor(cart_type: u8) -> Coprocessor {
    match cart_type & 0xF0 {
        0x00 => Coprocessor::None,
        0x10 => Coprocessor::SuperFx,
        0x30 => Coprocessor::Sa1,
        0x40 => Coprocessor::Sdd1,
        0x50 => Coprocessor::SRtc,
        0x20 => Coprocessor::Dsp,
        0xE0 | 0xF0 => match cart_type {
            0xF5 => Coprocessor::Spc7110,
            0xF6 => Coprocessor::St01x,
            0xF9 => Coprocessor::Cx4,
            0xFD => Coprocessor::Msu1,
            0xFE => Coprocessor::Bsx,
            _ => Coprocessor::Other,
        },
        _ => Coprocessor::Other,
    }
}

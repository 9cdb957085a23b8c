//! Address types and the mapper that translates between 24-bit CPU
//! addresses and linear ROM offsets, for each of the four cartridge
//! layouts.

use std::{convert::TryFrom, fmt, ops::{Add, Sub}};

use crate::{error::AddressError, header::Mapper};

/// A linear offset into the (post copier-header-stripping) ROM image.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct AddrPc(pub usize);

/// A 24-bit CPU address, decomposed as `bank:8 | offset:16`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, serde::Serialize, serde::Deserialize)]
pub struct AddrSnes(pub usize);

impl AddrPc {
    pub const fn new(offset: usize) -> Self { Self(offset) }
}

impl AddrSnes {
    pub const fn new(addr: usize) -> Self { Self(addr & 0xFFFFFF) }

    #[must_use]
    pub fn bank(self) -> u8 { (self.0 >> 16) as u8 }

    #[must_use]
    pub fn offset(self) -> u16 { (self.0 & 0xFFFF) as u16 }

    #[must_use]
    pub fn with_bank(self, bank: u8) -> Self { Self(((bank as usize) << 16) | (self.0 & 0xFFFF)) }

    #[must_use]
    pub fn with_offset(self, offset: u16) -> Self { Self((self.0 & 0xFF0000) | offset as usize) }

    /// Wrapping add within the 16-bit offset of the current bank — the way
    /// the CPU's program counter wraps at the end of a bank.
    #[must_use]
    pub fn wrapping_add_offset(self, delta: i32) -> Self {
        let new_offset = (self.offset() as i32).wrapping_add(delta) as u16;
        self.with_offset(new_offset)
    }
}

impl Add<usize> for AddrSnes {
    type Output = AddrSnes;
    fn add(self, rhs: usize) -> AddrSnes { AddrSnes::new(self.0 + rhs) }
}

impl Sub<usize> for AddrSnes {
    type Output = AddrSnes;
    fn sub(self, rhs: usize) -> AddrSnes { AddrSnes::new(self.0.wrapping_sub(rhs)) }
}

impl Add<usize> for AddrPc {
    type Output = AddrPc;
    fn add(self, rhs: usize) -> AddrPc { AddrPc(self.0 + rhs) }
}

impl fmt::Display for AddrPc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "0x{:06x}", self.0) }
}

impl fmt::Debug for AddrPc {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "AddrPc(0x{:06x})", self.0) }
}

impl fmt::Display for AddrSnes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "${:02X}:{:04X}", self.bank(), self.offset())
    }
}

impl fmt::Debug for AddrSnes {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "AddrSnes({})", self) }
}

/// The coarse kind of memory a CPU address refers to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RegionKind {
    Rom,
    Wram,
    Sram,
    HardwareRegister,
    OpenBus,
}

impl Mapper {
    /// `classify` answers what kind of memory a CPU address falls in,
    /// independent of whether it maps to ROM.
    pub fn classify(&self, addr: AddrSnes) -> RegionKind {
        let bank = addr.bank();
        let offset = addr.offset();
        if bank == 0x7E || bank == 0x7F {
            return RegionKind::Wram;
        }
        let bank_lo = bank & 0x7F;
        if (0x00..=0x3F).contains(&bank_lo) {
            if offset < 0x2000 {
                return RegionKind::Wram;
            }
            if offset < 0x6000 {
                return RegionKind::HardwareRegister;
            }
            if offset < 0x8000 {
                return RegionKind::Sram;
            }
        }
        match self.linear_offset(addr) {
            Some(_) => RegionKind::Rom,
            None => RegionKind::OpenBus,
        }
    }

    /// Translates a CPU address to a linear offset into the ROM image,
    /// returning `None` for addresses with no ROM backing under this
    /// mapper (WRAM, hardware registers, SRAM windows, open bus).
    pub fn linear_offset(&self, addr: AddrSnes) -> Option<usize> {
        let bank = addr.bank();
        let offset = addr.offset();
        match self {
            Mapper::LoRom | Mapper::ExLoRom => {
                let bank_lo = bank & 0x7F;
                if offset < 0x8000 {
                    return None;
                }
                if bank_lo > 0x7D {
                    return None;
                }
                Some((bank_lo as usize) * 0x8000 + (offset as usize - 0x8000))
            }
            Mapper::HiRom | Mapper::ExHiRom => {
                // $40-$7D and $C0-$FF expose the whole 64 KiB bank as ROM.
                // $00-$3F and $80-$BF mirror the same data but only above
                // $8000; the low half of those banks is WRAM/registers/SRAM.
                let bank_lo = bank & 0x3F;
                let full_access_bank = (0x40..=0x7D).contains(&bank) || bank >= 0xC0;
                let mirror_bank = (0x00..=0x3F).contains(&bank) || (0x80..=0xBF).contains(&bank);
                if !full_access_bank && !mirror_bank {
                    return None;
                }
                if mirror_bank && offset < 0x8000 {
                    return None;
                }
                Some((bank_lo as usize) * 0x10000 + offset as usize)
            }
        }
    }

    /// Inverse of `linear_offset`: the canonical CPU address for a linear
    /// ROM offset under this mapper (the lowest-numbered mirror).
    pub fn cpu_address(&self, offset: AddrPc) -> Result<AddrSnes, AddressError> {
        match self {
            Mapper::LoRom | Mapper::ExLoRom => {
                let bank = (offset.0 / 0x8000) as u8;
                let within = (offset.0 % 0x8000) as u16;
                if bank > 0x7D {
                    return Err(AddressError::InvalidPcLoRom(offset));
                }
                Ok(AddrSnes::new(((bank as usize) << 16) | (within as usize + 0x8000)))
            }
            Mapper::HiRom | Mapper::ExHiRom => {
                let bank = (offset.0 / 0x10000) as u8;
                let within = (offset.0 % 0x10000) as u16;
                if bank > 0x3F {
                    return Err(AddressError::InvalidPcHiRom(offset));
                }
                Ok(AddrSnes::new((((bank | 0xC0) as usize) << 16) | within as usize))
            }
        }
    }
}

impl TryFrom<(AddrSnes, &Mapper)> for AddrPc {
    type Error = AddressError;

    fn try_from((addr, mapper): (AddrSnes, &Mapper)) -> Result<Self, Self::Error> {
        mapper.linear_offset(addr).map(AddrPc).ok_or(AddressError::Unmapped(addr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lorom_round_trips_within_its_mirror_class() {
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x008000);
        let offset = mapper.linear_offset(addr).unwrap();
        assert_eq!(offset, 0);
        let back = mapper.cpu_address(AddrPc(offset)).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn hirom_mirror_maps_to_same_linear_offset() {
        let mapper = Mapper::HiRom;
        let mirror_low = AddrSnes::new(0x008000);
        let mirror_high = AddrSnes::new(0x808000);
        assert_eq!(mapper.linear_offset(mirror_low), mapper.linear_offset(mirror_high));
        assert_eq!(mapper.linear_offset(mirror_low), Some(0x8000));
    }

    #[test]
    fn hirom_low_bank_reset_vector_is_mapped() {
        // PBR=$00 at reset is the common case on real HiROM carts.
        let mapper = Mapper::HiRom;
        assert_eq!(mapper.linear_offset(AddrSnes::new(0x00C000)), Some(0xC000));
        assert_eq!(mapper.classify(AddrSnes::new(0x00C000)), RegionKind::Rom);
        assert_eq!(mapper.linear_offset(AddrSnes::new(0x001000)), None);
    }

    #[test]
    fn exhirom_low_bank_upper_half_is_mapped() {
        let mapper = Mapper::ExHiRom;
        assert_eq!(mapper.linear_offset(AddrSnes::new(0x00C000)), Some(0xC000));
        assert_eq!(mapper.linear_offset(AddrSnes::new(0x001000)), None);
    }

    #[test]
    fn wram_is_never_mapped() {
        let mapper = Mapper::LoRom;
        assert_eq!(mapper.linear_offset(AddrSnes::new(0x7E0000)), None);
        assert_eq!(mapper.classify(AddrSnes::new(0x7E0000)), RegionKind::Wram);
    }
}

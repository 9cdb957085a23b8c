//! ROM ingestion: owns the raw bytes and strips a copier header if present.

use crate::{addr::AddrPc, error::RomError};

pub const COPIER_HEADER_SIZE: usize = 0x200;

/// The raw bytes of a cartridge image, with any SMC/SFC copier header
/// already removed.
pub struct Rom(Vec<u8>);

impl Rom {
    /// Builds a `Rom` from raw bytes exactly as read from a file or a
    /// network transfer. A 512-byte copier header is detected and stripped
    /// when `len % 1024 == 512`.
    pub fn new(mut data: Vec<u8>) -> Result<Self, RomError> {
        if data.is_empty() {
            return Err(RomError::Empty);
        }
        match data.len() % 0x400 {
            0 => Ok(Self(data)),
            modulo if modulo == COPIER_HEADER_SIZE => {
                log::info!("stripping {}-byte copier header", COPIER_HEADER_SIZE);
                Ok(Self(data.split_off(COPIER_HEADER_SIZE)))
            }
            _ => Err(RomError::InvalidSize(data.len())),
        }
    }

    /// Convenience constructor mirroring the project's existing ROM loader;
    /// performs no analysis of its own.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let data = std::fs::read(path)?;
        Ok(Self::new(data)?)
    }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn bytes(&self) -> &[u8] { &self.0 }

    /// Reads `len` bytes starting at the given linear offset.
    pub fn read(&self, at: AddrPc, len: usize) -> Result<&[u8], RomError> {
        self.0.get(at.0..at.0 + len).ok_or(RomError::OutOfRange(at))
    }

    pub fn get(&self, at: AddrPc) -> Result<u8, RomError> {
        self.0.get(at.0).copied().ok_or(RomError::OutOfRange(at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_rom() {
        assert!(matches!(Rom::new(vec![]), Err(RomError::Empty)));
    }

    #[test]
    fn strips_copier_header() {
        let mut data = vec![0xAA; COPIER_HEADER_SIZE];
        data.extend(vec![0; 0x8000]);
        let rom = Rom::new(data).unwrap();
        assert_eq!(rom.len(), 0x8000);
    }

    #[test]
    fn accepts_bare_power_of_two_size() {
        let rom = Rom::new(vec![0; 0x8000]).unwrap();
        assert_eq!(rom.len(), 0x8000);
    }

    #[test]
    fn rejects_size_matching_neither_rule() {
        assert!(matches!(Rom::new(vec![0; 100]), Err(RomError::InvalidSize(100))));
    }
}

//! Hardware register names (C11 support): maps the handful of well-known
//! memory-mapped I/O addresses to the names used in SNES developer
//! documentation, for annotating operands that touch them. Mirrored across
//! banks $00-$3F/$80-$BF, so lookups are keyed on the 16-bit offset alone.

/// Looks up the canonical name for a hardware register offset, if `offset`
/// falls in one of the known PPU/APU/CPU/DMA register windows. Addresses
/// inside a window with no assigned name (reserved PPU registers, unused DMA
/// channel bytes) return `None` rather than a made-up label.
pub fn register_name(offset: u16) -> Option<&'static str> {
    match offset {
        0x2100 => Some("INIDISP"),
        0x2101 => Some("OBSEL"),
        0x2102 => Some("OAMADDL"),
        0x2103 => Some("OAMADDH"),
        0x2104 => Some("OAMDATA"),
        0x2105 => Some("BGMODE"),
        0x2106 => Some("MOSAIC"),
        0x2107..=0x210A => Some("BGnSC"),
        0x210B | 0x210C => Some("BGnNBA"),
        0x210D..=0x2114 => Some("BGnHOFS/BGnVOFS"),
        0x2115 => Some("VMAIN"),
        0x2116 => Some("VMADDL"),
        0x2117 => Some("VMADDH"),
        0x2118 => Some("VMDATAL"),
        0x2119 => Some("VMDATAH"),
        0x211A => Some("M7SEL"),
        0x211B..=0x2120 => Some("M7A-M7Y"),
        0x2121 => Some("CGADD"),
        0x2122 => Some("CGDATA"),
        0x2123..=0x2125 => Some("WnSEL"),
        0x2126..=0x2129 => Some("WHn/WBLOGIC"),
        0x212A | 0x212B => Some("WBGLOG/WOBJLOG"),
        0x212C..=0x212F => Some("TM/TS/TMW/TSW"),
        0x2130 => Some("CGWSEL"),
        0x2131 => Some("CGADSUB"),
        0x2132 => Some("COLDATA"),
        0x2133 => Some("SETINI"),
        0x2134..=0x2136 => Some("MPY"),
        0x2137 => Some("SLHV"),
        0x2138 => Some("OAMDATAREAD"),
        0x2139 => Some("VMDATALREAD"),
        0x213A => Some("VMDATAHREAD"),
        0x213B => Some("CGDATAREAD"),
        0x213C | 0x213D => Some("OPHCT/OPVCT"),
        0x213E => Some("STAT77"),
        0x213F => Some("STAT78"),
        0x2140..=0x2143 => Some("APUIO"),
        0x2180 => Some("WMDATA"),
        0x2181..=0x2183 => Some("WMADD"),
        0x4016 => Some("JOYSER0"),
        0x4017 => Some("JOYSER1"),
        0x4200 => Some("NMITIMEN"),
        0x4201 => Some("WRIO"),
        0x4202 => Some("WRMPYA"),
        0x4203 => Some("WRMPYB"),
        0x4204..=0x4206 => Some("WRDIV"),
        0x4207..=0x420A => Some("HTIME/VTIME"),
        0x420B => Some("MDMAEN"),
        0x420C => Some("HDMAEN"),
        0x420D => Some("MEMSEL"),
        0x4210 => Some("RDNMI"),
        0x4211 => Some("TIMEUP"),
        0x4212 => Some("HVBJOY"),
        0x4213 => Some("RDIO"),
        0x4214..=0x4217 => Some("RDDIV/RDMPY"),
        0x4218..=0x421F => Some("JOYnL/JOYnH"),
        0x4300..=0x437F => Some("DMAn"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_registers() {
        assert_eq!(register_name(0x2100), Some("INIDISP"));
        assert_eq!(register_name(0x4200), Some("NMITIMEN"));
        assert_eq!(register_name(0x4301), Some("DMAn"));
    }

    #[test]
    fn offsets_outside_known_ranges_return_none() {
        assert_eq!(register_name(0x217F), None);
        assert_eq!(register_name(0x5000), None);
    }
}

//! End-to-end scenarios exercising the public `analyze`/`decode` API against
//! concrete byte sequences, rather than the individual module unit tests.

use sfc_disasm::{analyze, decode::decode, header::Mapper, AddrSnes, AnalysisOptions, FlowType, Speed};
use wdc65816::{Mnemonic, ProcessorMode};

fn lorom_header(data: &mut [u8], reset: u16) {
    let header = 0x7FC0;
    data[header..header + 21].copy_from_slice(b"TEST ROM             ");
    data[header + 0x15] = 0x20; // LoROM, slow
    data[header + 0x17] = 7;
    let checksum: u16 = 0xBEEF;
    let complement = !checksum;
    data[header + 0x1C..header + 0x1E].copy_from_slice(&complement.to_le_bytes());
    data[header + 0x1E..header + 0x20].copy_from_slice(&checksum.to_le_bytes());
    data[header + 0x3C..header + 0x3E].copy_from_slice(&reset.to_le_bytes());
}

fn hirom_header(data: &mut [u8], reset: u16) {
    let header = 0xFFC0;
    data[header..header + 21].copy_from_slice(b"TEST ROM HIROM       ");
    data[header + 0x15] = 0x21; // HiROM, slow
    data[header + 0x17] = 10; // 1MB declared, matches the 1MB image exactly
    let checksum: u16 = 0xCAFE;
    let complement = !checksum;
    data[header + 0x1C..header + 0x1E].copy_from_slice(&complement.to_le_bytes());
    data[header + 0x1E..header + 0x20].copy_from_slice(&checksum.to_le_bytes());
    data[header + 0x3C..header + 0x3E].copy_from_slice(&reset.to_le_bytes());
}

/// S1. Minimal LoROM: SEI, CLC, XCE, RTL at the reset vector.
#[test]
fn s1_minimal_lorom_sei_clc_xce_rtl() {
    let mut data = vec![0u8; 0x8000];
    lorom_header(&mut data, 0x8000);
    data[0..4].copy_from_slice(&[0x78, 0x18, 0xFB, 0x6B]); // SEI CLC XCE RTL

    let result = analyze(&data, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

    assert_eq!(result.cartridge.mapper, Mapper::LoRom);
    let mnemonics: Vec<Mnemonic> = (0..4usize)
        .map(|i| result.instructions[&AddrSnes::new(0x008000 + i)].mnemonic)
        .collect();
    assert_eq!(mnemonics, vec![Mnemonic::SEI, Mnemonic::CLC, Mnemonic::XCE, Mnemonic::RTL]);

    let xce = &result.instructions[&AddrSnes::new(0x008002)];
    assert!(!xce.mode_after.emulation());

    let rtl = &result.instructions[&AddrSnes::new(0x008003)];
    assert_eq!(rtl.flow_type, FlowType::Return);

    assert!(result.functions.iter().any(|f| f.entry == AddrSnes::new(0x008000)));
    assert!(result.symbols.iter().any(|s| s.name == "reset"));
}

/// S3. A BRA over two NOPs: the NOPs are never reached and stay undecoded.
#[test]
fn s3_branch_skips_unreachable_bytes() {
    let mut data = vec![0u8; 0x8000];
    lorom_header(&mut data, 0x8000);
    data[0..5].copy_from_slice(&[0x80, 0x02, 0xEA, 0xEA, 0xEA]); // BRA $8004; NOP; NOP; NOP

    let result = analyze(&data, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

    let bra = &result.instructions[&AddrSnes::new(0x008000)];
    assert_eq!(bra.flow_type, FlowType::Branch(AddrSnes::new(0x008004)));

    assert!(!result.instructions.contains_key(&AddrSnes::new(0x008002)));
    assert!(!result.instructions.contains_key(&AddrSnes::new(0x008003)));
    assert!(result.instructions.contains_key(&AddrSnes::new(0x008004)));
}

/// S4. HiROM: the reset vector's bank mirror decodes from linear offset
/// 0x8000, the same ROM byte regardless of which HiROM bank mirror is used
/// as the canonical representative.
#[test]
fn s4_hirom_mirror_decodes_from_linear_offset() {
    let mut data = vec![0u8; 0x10_0000]; // 1 MiB
    hirom_header(&mut data, 0x8000);
    data[0x8000] = 0xEA; // NOP at the reset target

    let result = analyze(&data, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

    assert_eq!(result.cartridge.mapper, Mapper::HiRom);
    assert_eq!(Mapper::HiRom.linear_offset(result.cartridge.reset_vector), Some(0x8000));
    let decoded = result.instructions.get(&result.cartridge.reset_vector).expect("reset target decoded");
    assert_eq!(decoded.mnemonic, Mnemonic::NOP);
}

/// S5. JML to WRAM: decoded but not followed, and recorded as unmapped.
#[test]
fn s5_unmapped_jump_target_is_not_followed() {
    let mut data = vec![0u8; 0x8000];
    lorom_header(&mut data, 0x8000);
    data[0..4].copy_from_slice(&[0x5C, 0x00, 0x00, 0x7E]); // JML $7E0000

    let result = analyze(&data, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

    let jml = &result.instructions[&AddrSnes::new(0x008000)];
    assert_eq!(jml.flow_type, FlowType::Jump(AddrSnes::new(0x7E0000)));
    assert!(!result.instructions.contains_key(&AddrSnes::new(0x7E0000)));
    assert!(result
        .xrefs
        .from(AddrSnes::new(0x008000))
        .next()
        .is_none());
    assert_eq!(result.instructions.len(), 1);
}

/// S6. MVN's ROM-order bytes are destination-first; both banks are kept.
#[test]
fn s6_mvn_byte_order_via_decode() {
    let mut data = vec![0u8; 0x8000];
    data[0..3].copy_from_slice(&[0x54, 0x7F, 0x00]);
    let rom = sfc_disasm::Rom::new(data).unwrap();
    let decoded = decode(&rom, &Mapper::LoRom, AddrSnes::new(0x008000), ProcessorMode::default(), Speed::Slow).unwrap();
    assert_eq!(decoded.mnemonic, Mnemonic::MVN);
    assert_eq!(decoded.block_move_dest_bank, Some(0x7F));
    assert_eq!(decoded.block_move_src_bank, Some(0x00));
}

//! Instruction decoding (C7): turns one CPU address plus a processor mode
//! into a fully-formed `DecodedInstruction`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use wdc65816::{AddressingMode, Mnemonic, Opcode, ProcessorMode, SNES_OPCODES};

use crate::{
    addr::{AddrPc, AddrSnes, RegionKind},
    cycles::estimate_cycles_for_rom,
    error::DecodeError,
    header::{Mapper, Speed},
    registers,
    rom::Rom,
};

/// How a decoded instruction affects control flow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowType {
    Sequential,
    Branch(AddrSnes),
    ConditionalBranch(AddrSnes),
    Jump(AddrSnes),
    JumpIndirect,
    Call(AddrSnes),
    CallIndirect,
    Return,
    Interrupt,
    Halt,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecodedInstruction {
    pub address: AddrSnes,
    pub opcode: u8,
    pub mnemonic: Mnemonic,
    pub addressing_mode: AddressingMode,
    pub operand_bytes: SmallVec<[u8; 3]>,
    pub total_bytes: u8,
    pub resolved_operand: Option<AddrSnes>,
    pub mode_before: ProcessorMode,
    pub mode_after: ProcessorMode,
    pub cycles: u32,
    pub flow_type: FlowType,
    pub comment: Option<String>,
    /// `MVN`/`MVP` only: the two operand bytes, labeled. The ROM encodes
    /// destination-first; CA65-style assembler syntax prints them
    /// source-first, so both orderings are kept rather than just the bytes.
    pub block_move_dest_bank: Option<u8>,
    pub block_move_src_bank: Option<u8>,
}

/// Resolves a flag-dependent immediate placeholder to a concrete width, in
/// bytes, using the given mode. `REP`/`SEP`/`COP`/`BRK`/`WDM` are always
/// one byte and never reach this function (their table entries use
/// `Constant8`/`Immediate8` directly).
fn immediate_operand_len(mnemonic: Mnemonic, mode: ProcessorMode) -> usize {
    if mnemonic.is_accumulator_affine() {
        mode.accumulator_immediate_bytes()
    } else {
        mode.index_immediate_bytes()
    }
}

fn operand_len(op: Opcode, mode: ProcessorMode) -> usize {
    if op.mode.is_flag_dependent() {
        immediate_operand_len(op.mnemonic, mode)
    } else {
        op.mode.operands_size()
    }
}

fn sign_extend_8(byte: u8) -> i32 { byte as i8 as i32 }
fn sign_extend_16(word: u16) -> i32 { word as i16 as i32 }

/// True for addressing modes whose resolved operand is a genuine memory
/// address read or written by the instruction itself, as opposed to a
/// branch/jump target already tracked by `FlowType` (`Relative8`/`Relative16`)
/// or a pointer fetched for an indirect jump (`AddressIndirect` and kin).
pub(crate) fn is_memory_operand(mode: AddressingMode) -> bool {
    matches!(
        mode,
        AddressingMode::Address | AddressingMode::AddressXIndex | AddressingMode::AddressYIndex | AddressingMode::Long | AddressingMode::LongXIndex
    )
}

/// Decodes one instruction at `address` under `mode`, at the cartridge's
/// declared `speed`. Does not itself advance any worklist; the flow
/// analyzer (C9) drives repeated calls.
pub fn decode(rom: &Rom, mapper: &Mapper, address: AddrSnes, mode: ProcessorMode, speed: Speed) -> Result<DecodedInstruction, DecodeError> {
    let opcode_offset = mapper.linear_offset(address).ok_or(DecodeError::AtUnmappedAddress(address))?;
    let opcode_byte = rom.get(AddrPc(opcode_offset)).map_err(|_| DecodeError::AtUnmappedAddress(address))?;
    let op = SNES_OPCODES[opcode_byte as usize];

    let needed = operand_len(op, mode);
    let operand_bytes: SmallVec<[u8; 3]> = (0..needed)
        .map(|i| rom.get(AddrPc(opcode_offset + 1 + i)))
        .collect::<Result<_, _>>()
        .map_err(|_| DecodeError::TruncatedOperand {
            address,
            needed,
            available: rom.len().saturating_sub(opcode_offset + 1),
        })?;

    let total_bytes = 1 + needed;
    let next_address = address.wrapping_add_offset(total_bytes as i32);

    let resolved_operand = resolve_operand(op.mode, address, next_address, &operand_bytes);
    let mode_after = apply_mode_effect(op.mnemonic, mode, &operand_bytes);
    let flow_type = classify_flow(op.mnemonic, op.mode, resolved_operand, next_address);
    let cycles = estimate_cycles_for_rom(opcode_byte, op, mode, &operand_bytes, address, speed);

    // ROM byte order for MVN/MVP is destination-first, source-second.
    let (block_move_dest_bank, block_move_src_bank) = if op.mode == AddressingMode::BlockMove {
        (Some(operand_bytes[0]), Some(operand_bytes[1]))
    } else {
        (None, None)
    };

    let is_data_operand = is_memory_operand(op.mode) && !matches!(op.mnemonic, Mnemonic::JMP | Mnemonic::JML | Mnemonic::JSR | Mnemonic::JSL);
    let comment = resolved_operand.filter(|_| is_data_operand).and_then(|target| {
        if mapper.classify(target) == RegionKind::HardwareRegister {
            registers::register_name(target.offset()).map(str::to_string)
        } else {
            None
        }
    });

    Ok(DecodedInstruction {
        address,
        opcode: opcode_byte,
        mnemonic: op.mnemonic,
        addressing_mode: op.mode,
        operand_bytes,
        total_bytes: total_bytes as u8,
        resolved_operand,
        mode_before: mode,
        mode_after,
        cycles,
        flow_type,
        comment,
        block_move_dest_bank,
        block_move_src_bank,
    })
}

fn resolve_operand(
    mode: AddressingMode,
    address: AddrSnes,
    next_address: AddrSnes,
    bytes: &[u8],
) -> Option<AddrSnes> {
    use AddressingMode::*;
    match mode {
        Relative8 => Some(next_address.wrapping_add_offset(sign_extend_8(bytes[0]))),
        Relative16 => {
            let disp = u16::from_le_bytes([bytes[0], bytes[1]]);
            Some(next_address.wrapping_add_offset(sign_extend_16(disp)))
        }
        Address | AddressXIndex | AddressYIndex | AddressIndirect | AddressXIndexIndirect | AddressLongIndirect => {
            let offset = u16::from_le_bytes([bytes[0], bytes[1]]);
            Some(address.with_offset(offset))
        }
        Long | LongXIndex => {
            let addr = bytes[0] as usize | (bytes[1] as usize) << 8 | (bytes[2] as usize) << 16;
            Some(AddrSnes::new(addr))
        }
        _ => None,
    }
}

/// Applies the status-register effect of flag-manipulating instructions.
/// `PLP` pulls the status byte from the stack and `WAI` resumes under
/// whatever mode an interrupt handler leaves behind; neither is statically
/// knowable, so both fall through under the same safe assumption used for
/// `ModeConflict` resolution, 8-bit `M` and `X`. `RTI`/`RTS`/`RTL` leave the
/// mode as-is here; their callers resume under whatever mode reached the
/// call site, tracked by the flow analyzer rather than this function.
fn apply_mode_effect(mnemonic: Mnemonic, mode: ProcessorMode, operand: &[u8]) -> ProcessorMode {
    use Mnemonic::*;
    match mnemonic {
        REP => mode.with_rep(operand[0]),
        SEP => mode.with_sep(operand[0]),
        XCE => mode.with_xce(),
        // Both pull an unknowable mode into scope: PLP off the stack, WAI
        // off whatever interrupt handler resumes it. Fall through
        // conservatively rather than assume the mode held steady.
        PLP | WAI => mode.conservative(),
        CLC => mode.with_carry(false),
        SEC => mode.with_carry(true),
        CLD => mode.with_decimal(false),
        SED => mode.with_decimal(true),
        CLI => mode.with_irq_disabled(false),
        SEI => mode.with_irq_disabled(true),
        CLV => mode.with_overflow(false),
        _ => mode,
    }
}

fn classify_flow(
    mnemonic: Mnemonic,
    addressing_mode: AddressingMode,
    resolved: Option<AddrSnes>,
    next_address: AddrSnes,
) -> FlowType {
    use Mnemonic::*;
    match mnemonic {
        BRA | BRL => resolved.map(FlowType::Branch).unwrap_or(FlowType::JumpIndirect),
        BCC | BCS | BEQ | BNE | BMI | BPL | BVC | BVS => {
            resolved.map(FlowType::ConditionalBranch).unwrap_or(FlowType::ConditionalBranch(next_address))
        }
        JMP | JML => match addressing_mode {
            AddressingMode::AddressIndirect | AddressingMode::AddressXIndexIndirect | AddressingMode::AddressLongIndirect => {
                FlowType::JumpIndirect
            }
            _ => resolved.map(FlowType::Jump).unwrap_or(FlowType::JumpIndirect),
        },
        JSR | JSL => match addressing_mode {
            AddressingMode::AddressXIndexIndirect => FlowType::CallIndirect,
            _ => resolved.map(FlowType::Call).unwrap_or(FlowType::CallIndirect),
        },
        RTS | RTL | RTI => FlowType::Return,
        BRK | COP => FlowType::Interrupt,
        STP => FlowType::Halt,
        WAI => FlowType::Sequential,
        _ => FlowType::Sequential,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lorom_with(bytes: &[u8]) -> Rom {
        let mut data = vec![0u8; 0x8000];
        data[0..bytes.len()].copy_from_slice(bytes);
        Rom::new(data).unwrap()
    }

    #[test]
    fn decodes_sep_and_updates_mode() {
        let rom = lorom_with(&[0xE2, 0x30]); // SEP #$30
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x008000);
        let decoded = decode(&rom, &mapper, addr, ProcessorMode::default(), Speed::Slow).unwrap();
        assert_eq!(decoded.mnemonic, Mnemonic::SEP);
        assert_eq!(decoded.total_bytes, 2);
        assert!(decoded.mode_after.accumulator_is_8bit());
        assert!(decoded.mode_after.index_is_8bit());
    }

    #[test]
    fn decodes_absolute_jmp_as_jump() {
        let rom = lorom_with(&[0x4C, 0x00, 0x80]); // JMP $8000
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x008000);
        let decoded = decode(&rom, &mapper, addr, ProcessorMode::default(), Speed::Slow).unwrap();
        assert_eq!(decoded.flow_type, FlowType::Jump(AddrSnes::new(0x008000)));
    }

    #[test]
    fn plp_forces_conservative_8bit_mode() {
        let rom = lorom_with(&[0x28]); // PLP
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x008000);
        let native = ProcessorMode::new(0x00, false);
        let decoded = decode(&rom, &mapper, addr, native, Speed::Slow).unwrap();
        assert!(decoded.mode_after.accumulator_is_8bit());
        assert!(decoded.mode_after.index_is_8bit());
    }

    #[test]
    fn mvn_preserves_both_bank_orderings() {
        let rom = lorom_with(&[0x54, 0x7F, 0x00]); // MVN dest=$7F, src=$00 (ROM order)
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x008000);
        let decoded = decode(&rom, &mapper, addr, ProcessorMode::default(), Speed::Slow).unwrap();
        assert_eq!(decoded.mnemonic, Mnemonic::MVN);
        assert_eq!(decoded.block_move_dest_bank, Some(0x7F));
        assert_eq!(decoded.block_move_src_bank, Some(0x00));
    }

    #[test]
    fn names_hardware_register_operand() {
        let rom = lorom_with(&[0x8D, 0x00, 0x21]); // STA $2100 (INIDISP)
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x008000);
        let decoded = decode(&rom, &mapper, addr, ProcessorMode::default(), Speed::Slow).unwrap();
        assert_eq!(decoded.comment.as_deref(), Some("INIDISP"));
    }

    #[test]
    fn truncated_operand_is_reported() {
        // JMP (3 bytes) placed so only 1 of its 2 operand bytes fits in the ROM.
        let mut data = vec![0u8; 1024];
        data[1022] = 0x4C;
        data[1023] = 0x00;
        let rom = Rom::new(data).unwrap();
        let mapper = Mapper::LoRom;
        let addr = AddrSnes::new(0x0083FE);
        assert!(matches!(
            decode(&rom, &mapper, addr, ProcessorMode::default(), Speed::Slow),
            Err(DecodeError::TruncatedOperand { .. })
        ));
    }
}

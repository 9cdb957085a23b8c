//! Flow analysis (C9), cross-reference index (C10), and symbol table (C11).
//!
//! The analyzer drives a FIFO worklist of `(address, mode)` pairs seeded
//! from the cartridge's vectors and any user-supplied entry points,
//! repeatedly decoding one instruction at a time and following its flow
//! edges — the same recursive-descent shape as the project's own
//! `RomAssemblyWalker`, generalized away from a single game's data layout.

mod xref;

pub use xref::{Edge, EdgeKind, CrossReferenceIndex};

use std::collections::{BTreeMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};
use wdc65816::{AddressingMode, Mnemonic, ProcessorMode};

use crate::{
    addr::{AddrSnes, RegionKind},
    decode::{decode, is_memory_operand, DecodedInstruction, FlowType},
    error::{AnalysisError, Diagnostic},
    header::{classify_cartridge, CartridgeInfo, Mapper},
    registers,
    rom::Rom,
};

#[derive(Clone, Debug)]
pub struct AnalysisOptions {
    pub entry_points: Vec<AddrSnes>,
    pub follow_nmi: bool,
    pub follow_irq: bool,
    pub instruction_limit: usize,
    pub user_symbols: Vec<(AddrSnes, String)>,
    /// Restricts decoding to `[start_address, end_address]` inclusive when
    /// set; a worklist address outside this range is dropped silently
    /// rather than decoded.
    pub start_address: Option<AddrSnes>,
    pub end_address: Option<AddrSnes>,
    /// When `false`, `DecodedInstruction::cycles` is reported as `0` rather
    /// than estimated, for callers that don't need cycle counts and want to
    /// skip the extra arithmetic.
    pub enable_cycle_calc: bool,
    /// When `false`, skips the `CodeOverlap` validation pass over emitted
    /// instruction extents.
    pub enable_validation: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            follow_nmi: true,
            follow_irq: true,
            instruction_limit: 2_000_000,
            user_symbols: Vec::new(),
            start_address: None,
            end_address: None,
            enable_cycle_calc: true,
            enable_validation: true,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum SymbolKind {
    Code,
    Data,
    Vector,
    Register,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SymbolSource {
    Auto,
    External,
    User,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Symbol {
    pub address: AddrSnes,
    pub name: String,
    pub kind: SymbolKind,
    pub source: SymbolSource,
}

#[derive(Default)]
pub struct SymbolTable {
    by_address: BTreeMap<AddrSnes, Symbol>,
    names_seen: HashSet<String>,
}

impl SymbolTable {
    /// Inserts or overrides a symbol following the precedence User >
    /// External > Auto. A user name that collides with a different
    /// user-named address produces a `SymbolConflict` diagnostic and is
    /// suppressed.
    pub fn insert(&mut self, symbol: Symbol, diagnostics: &mut Vec<Diagnostic>) {
        if symbol.source == SymbolSource::User {
            if self.names_seen.contains(&symbol.name) && !matches!(self.by_address.get(&symbol.address), Some(s) if s.name == symbol.name) {
                diagnostics.push(Diagnostic::SymbolConflict { address: symbol.address, name: symbol.name.clone() });
                return;
            }
            self.names_seen.insert(symbol.name.clone());
        }
        match self.by_address.get(&symbol.address) {
            Some(existing) if existing.source > symbol.source => {}
            _ => {
                self.by_address.insert(symbol.address, symbol);
            }
        }
    }

    pub fn get(&self, address: AddrSnes) -> Option<&Symbol> { self.by_address.get(&address) }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> { self.by_address.values() }
}

fn auto_label(kind: SymbolKind, address: AddrSnes) -> String {
    let tag = match kind {
        SymbolKind::Code => "loc",
        SymbolKind::Data => "byte",
        SymbolKind::Vector => "vec",
        SymbolKind::Register => "reg",
    };
    format!("{tag}_{:02X}{:04X}", address.bank(), address.offset())
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BasicBlock {
    pub start: AddrSnes,
    pub end: AddrSnes,
    pub instructions: Vec<AddrSnes>,
}

#[derive(Clone, Debug)]
pub struct Function {
    pub entry: AddrSnes,
    pub blocks: Vec<AddrSnes>,
    pub exits: Vec<AddrSnes>,
    pub callers: Vec<AddrSnes>,
    pub callees: Vec<AddrSnes>,
    pub mode_at_entry: Option<ProcessorMode>,
}

pub struct AnalysisResult {
    pub cartridge: CartridgeInfo,
    pub instructions: BTreeMap<AddrSnes, DecodedInstruction>,
    pub basic_blocks: Vec<BasicBlock>,
    pub functions: Vec<Function>,
    pub xrefs: CrossReferenceIndex,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Copy, Clone)]
struct WorkItem {
    address: AddrSnes,
    mode: ProcessorMode,
}

/// Top-level entry point: classifies the cartridge, then runs the
/// recursive-descent flow analysis from the reset vector (and optionally
/// NMI/IRQ and user entry points), returning the full analysis snapshot.
pub fn analyze(rom_bytes: &[u8], options: &AnalysisOptions) -> Result<AnalysisResult, AnalysisError> {
    let rom = Rom::new(rom_bytes.to_vec())?;
    let (cartridge, mut diagnostics) = classify_cartridge(&rom)?;
    let mapper = cartridge.mapper;

    let mut instructions: BTreeMap<AddrSnes, DecodedInstruction> = BTreeMap::new();
    let mut modes_seen: BTreeMap<AddrSnes, ProcessorMode> = BTreeMap::new();
    // Byte length of every emitted instruction, keyed by its start address;
    // used to detect a later decode landing inside an earlier instruction's
    // bytes (e.g. a jump into the middle of a previously-decoded opcode).
    let mut emitted_extents: BTreeMap<AddrSnes, usize> = BTreeMap::new();
    let mut xrefs = CrossReferenceIndex::default();
    let mut symbols = SymbolTable::default();
    let mut queue: VecDeque<WorkItem> = VecDeque::new();
    let mut call_targets: HashSet<AddrSnes> = HashSet::new();
    // Every vector-targeted or user-requested entry address is a function
    // entry in its own right, independent of whether a JSR/JSL ever calls it.
    let mut entry_addresses: HashSet<AddrSnes> = HashSet::new();
    let mut branch_targets: HashSet<AddrSnes> = HashSet::new();
    let mut data_targets: BTreeMap<AddrSnes, DataWidth> = BTreeMap::new();

    let reset_mode = ProcessorMode::RESET;
    queue.push_back(WorkItem { address: cartridge.reset_vector, mode: reset_mode });
    entry_addresses.insert(cartridge.reset_vector);
    symbols.insert(
        Symbol { address: cartridge.reset_vector, name: "reset".into(), kind: SymbolKind::Vector, source: SymbolSource::Auto },
        &mut diagnostics,
    );

    if options.follow_nmi && mapper.linear_offset(cartridge.nmi_vector).is_some() {
        queue.push_back(WorkItem { address: cartridge.nmi_vector, mode: reset_mode });
        entry_addresses.insert(cartridge.nmi_vector);
        symbols.insert(
            Symbol { address: cartridge.nmi_vector, name: "nmi".into(), kind: SymbolKind::Vector, source: SymbolSource::Auto },
            &mut diagnostics,
        );
    }
    if options.follow_irq && mapper.linear_offset(cartridge.irq_vector).is_some() {
        queue.push_back(WorkItem { address: cartridge.irq_vector, mode: reset_mode });
        entry_addresses.insert(cartridge.irq_vector);
        symbols.insert(
            Symbol { address: cartridge.irq_vector, name: "irq".into(), kind: SymbolKind::Vector, source: SymbolSource::Auto },
            &mut diagnostics,
        );
    }
    for &entry in &options.entry_points {
        queue.push_back(WorkItem { address: entry, mode: reset_mode });
        entry_addresses.insert(entry);
    }
    for (address, name) in &options.user_symbols {
        symbols.insert(
            Symbol { address: *address, name: name.clone(), kind: SymbolKind::Code, source: SymbolSource::User },
            &mut diagnostics,
        );
    }

    let mut decoded_count = 0usize;

    while let Some(item) = queue.pop_front() {
        if decoded_count >= options.instruction_limit {
            diagnostics.push(Diagnostic::InstructionLimitExceeded { limit: options.instruction_limit });
            break;
        }

        if options.start_address.is_some_and(|start| item.address < start) || options.end_address.is_some_and(|end| item.address > end) {
            continue;
        }

        let mut mode = item.mode;
        if let Some(&prior_mode) = modes_seen.get(&item.address) {
            if prior_mode == mode {
                continue;
            }
            diagnostics.push(Diagnostic::ModeConflict { address: item.address });
            let conservative = prior_mode.conservative();
            if prior_mode == conservative {
                // Already as conservative as this address gets; keep the earlier decoding.
                continue;
            }
            mode = conservative;
            instructions.remove(&item.address);
        }
        modes_seen.insert(item.address, mode);

        let mut decoded = match decode(&rom, &mapper, item.address, mode, cartridge.speed) {
            Ok(d) => d,
            Err(crate::error::DecodeError::AtUnmappedAddress(addr)) => {
                diagnostics.push(Diagnostic::DecodeAtUnmappedAddress { address: addr });
                continue;
            }
            Err(crate::error::DecodeError::TruncatedOperand { address, .. }) => {
                diagnostics.push(Diagnostic::TruncatedOperand { address });
                continue;
            }
        };
        decoded_count += 1;
        if !options.enable_cycle_calc {
            decoded.cycles = 0;
        }

        if let Some(existing) = instructions.get(&item.address) {
            if existing.total_bytes != decoded.total_bytes {
                diagnostics.push(Diagnostic::CodeOverlap { address: item.address });
            }
            continue;
        }

        if options.enable_validation {
            if let Some(overlap) = emitted_extents
                .range(..=item.address)
                .next_back()
                .filter(|&(&start, &len)| item.address.0 < start.0 + len && item.address != start)
            {
                diagnostics.push(Diagnostic::CodeOverlap { address: *overlap.0 });
            }
        }
        emitted_extents.insert(item.address, decoded.total_bytes as usize);

        if let Some(target) = decoded.resolved_operand {
            if let Some(kind) = operand_edge_kind(decoded.mnemonic, decoded.addressing_mode) {
                xrefs.record(Edge { source: item.address, target, kind });
                if matches!(kind, EdgeKind::DataRead | EdgeKind::DataWrite) {
                    let width = data_width(decoded.mnemonic, decoded.addressing_mode, decoded.mode_before);
                    data_targets.entry(target).and_modify(|w| *w = (*w).max(width)).or_insert(width);
                }
            }
        }

        let next = item.address.wrapping_add_offset(decoded.total_bytes as i32);
        match decoded.flow_type {
            FlowType::Sequential => queue.push_back(WorkItem { address: next, mode: decoded.mode_after }),
            FlowType::Branch(target) => {
                branch_targets.insert(target);
                enqueue_target(&mut queue, &mapper, target, decoded.mode_after, item.address, EdgeKind::CodeBranch, &mut xrefs, &mut diagnostics);
            }
            FlowType::ConditionalBranch(target) => {
                branch_targets.insert(target);
                enqueue_target(&mut queue, &mapper, target, decoded.mode_after, item.address, EdgeKind::CodeBranch, &mut xrefs, &mut diagnostics);
                queue.push_back(WorkItem { address: next, mode: decoded.mode_after });
            }
            FlowType::Jump(target) => {
                branch_targets.insert(target);
                enqueue_target(&mut queue, &mapper, target, decoded.mode_after, item.address, EdgeKind::CodeExecute, &mut xrefs, &mut diagnostics);
            }
            FlowType::JumpIndirect => {}
            FlowType::Call(target) => {
                call_targets.insert(target);
                enqueue_target(&mut queue, &mapper, target, decoded.mode_after, item.address, EdgeKind::CodeCall, &mut xrefs, &mut diagnostics);
                queue.push_back(WorkItem { address: next, mode: decoded.mode_after });
            }
            FlowType::CallIndirect => {
                queue.push_back(WorkItem { address: next, mode: decoded.mode_after });
            }
            FlowType::Interrupt => {
                let vector = match decoded.mnemonic {
                    Mnemonic::BRK => cartridge.brk_vector,
                    Mnemonic::COP => cartridge.cop_vector,
                    _ => unreachable!("only BRK/COP classify as FlowType::Interrupt"),
                };
                call_targets.insert(vector);
                enqueue_target(&mut queue, &mapper, vector, decoded.mode_after, item.address, EdgeKind::CodeCall, &mut xrefs, &mut diagnostics);
                queue.push_back(WorkItem { address: next, mode: decoded.mode_after });
            }
            FlowType::Return | FlowType::Halt => {}
        }

        instructions.insert(item.address, decoded);
    }

    for &target in &call_targets {
        symbols.insert(
            Symbol { address: target, name: auto_label(SymbolKind::Code, target).replacen("loc", "sub", 1), kind: SymbolKind::Code, source: SymbolSource::Auto },
            &mut diagnostics,
        );
    }
    for &target in &branch_targets {
        if call_targets.contains(&target) || entry_addresses.contains(&target) {
            continue;
        }
        symbols.insert(
            Symbol { address: target, name: auto_label(SymbolKind::Code, target), kind: SymbolKind::Code, source: SymbolSource::Auto },
            &mut diagnostics,
        );
    }
    for (&target, &width) in &data_targets {
        if mapper.classify(target) == RegionKind::HardwareRegister {
            let name = registers::register_name(target.offset()).map(str::to_string).unwrap_or_else(|| auto_label(SymbolKind::Register, target));
            symbols.insert(Symbol { address: target, name, kind: SymbolKind::Register, source: SymbolSource::Auto }, &mut diagnostics);
            continue;
        }
        let name = match width {
            DataWidth::Byte => auto_label(SymbolKind::Data, target),
            DataWidth::Word => auto_label(SymbolKind::Data, target).replacen("byte", "word", 1),
            DataWidth::Table => auto_label(SymbolKind::Data, target).replacen("byte", "tbl", 1),
        };
        symbols.insert(Symbol { address: target, name, kind: SymbolKind::Data, source: SymbolSource::Auto }, &mut diagnostics);
    }

    let basic_blocks = partition_basic_blocks(&instructions);
    let functions = detect_functions(&basic_blocks, &call_targets, &entry_addresses, &instructions);

    Ok(AnalysisResult { cartridge, instructions, basic_blocks, functions, xrefs, symbols, diagnostics })
}

/// Coarse shape of a data operand, used to pick between `byte_`/`word_`/
/// `tbl_` auto-labels. Ordered so `max` picks the most specific label seen
/// across every instruction that touches a given address.
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
enum DataWidth {
    Byte,
    Word,
    Table,
}

/// X/Y-indexed addressing always implies an array walk regardless of
/// element width; otherwise the width follows the accumulator/index flag
/// that governs this mnemonic's operand size under `proc_mode`.
fn data_width(mnemonic: Mnemonic, mode: AddressingMode, proc_mode: ProcessorMode) -> DataWidth {
    if matches!(mode, AddressingMode::AddressXIndex | AddressingMode::AddressYIndex | AddressingMode::LongXIndex) {
        return DataWidth::Table;
    }
    use Mnemonic::*;
    let is_8bit = match mnemonic {
        LDX | LDY | STX | STY | CPX | CPY => proc_mode.index_is_8bit(),
        _ => proc_mode.accumulator_is_8bit(),
    };
    if is_8bit { DataWidth::Byte } else { DataWidth::Word }
}

/// Classifies a resolved operand address for cross-reference purposes.
/// Branch/jump/call targets are already tracked as flow edges by the
/// worklist match above, so only genuine data operands (`LDA $1234`) and
/// the pointer fetched by an indirect jump (`JMP ($1234)`) are reported
/// here; `None` means "no xref beyond the flow edge already recorded".
fn operand_edge_kind(mnemonic: Mnemonic, mode: AddressingMode) -> Option<EdgeKind> {
    use AddressingMode::*;
    if is_memory_operand(mode) {
        if matches!(mnemonic, Mnemonic::JMP | Mnemonic::JML | Mnemonic::JSR | Mnemonic::JSL) {
            return None;
        }
        return Some(data_edge_kind(mnemonic));
    }
    if matches!(mode, AddressIndirect | AddressXIndexIndirect | AddressLongIndirect) {
        return Some(EdgeKind::CodeRead);
    }
    None
}

/// Stores and read-modify-write instructions write their operand; anything
/// else that reaches here (loads, compares, arithmetic with a memory
/// source) only reads it.
fn data_edge_kind(mnemonic: Mnemonic) -> EdgeKind {
    use Mnemonic::*;
    match mnemonic {
        STA | STX | STY | STZ | ASL | LSR | ROL | ROR | INC | DEC | TRB | TSB => EdgeKind::DataWrite,
        _ => EdgeKind::DataRead,
    }
}

fn enqueue_target(
    queue: &mut VecDeque<WorkItem>,
    mapper: &Mapper,
    target: AddrSnes,
    mode: ProcessorMode,
    source: AddrSnes,
    kind: EdgeKind,
    xrefs: &mut CrossReferenceIndex,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if mapper.linear_offset(target).is_none() {
        diagnostics.push(Diagnostic::UnmappedTarget { from: source, target });
        return;
    }
    xrefs.record(Edge { source, target, kind });
    queue.push_back(WorkItem { address: target, mode });
}

/// Sorts decoded addresses and splits them into maximal runs that do not
/// cross a recorded flow boundary.
fn partition_basic_blocks(instructions: &BTreeMap<AddrSnes, DecodedInstruction>) -> Vec<BasicBlock> {
    let mut blocks = Vec::new();
    let mut current: Vec<AddrSnes> = Vec::new();

    let addrs: Vec<AddrSnes> = instructions.keys().copied().collect();
    for (i, &addr) in addrs.iter().enumerate() {
        let instr = &instructions[&addr];
        current.push(addr);
        let ends_block = !matches!(instr.flow_type, FlowType::Sequential)
            || addrs.get(i + 1).map(|&n| n != addr.wrapping_add_offset(instr.total_bytes as i32)).unwrap_or(true);
        if ends_block {
            if let (Some(&start), Some(&end)) = (current.first(), current.last()) {
                blocks.push(BasicBlock { start, end, instructions: std::mem::take(&mut current) });
            }
        }
    }
    if !current.is_empty() {
        let start = current[0];
        let end = *current.last().unwrap();
        blocks.push(BasicBlock { start, end, instructions: current });
    }
    blocks
}

fn detect_functions(
    blocks: &[BasicBlock],
    call_targets: &HashSet<AddrSnes>,
    entry_addresses: &HashSet<AddrSnes>,
    instructions: &BTreeMap<AddrSnes, DecodedInstruction>,
) -> Vec<Function> {
    let mut functions = Vec::new();
    for block in blocks {
        if call_targets.contains(&block.start) || entry_addresses.contains(&block.start) {
            let exits = block
                .instructions
                .iter()
                .copied()
                .filter(|a| matches!(instructions[a].flow_type, FlowType::Return))
                .collect();
            functions.push(Function {
                entry: block.start,
                blocks: vec![block.start],
                exits,
                callers: Vec::new(),
                callees: Vec::new(),
                mode_at_entry: instructions.get(&block.start).map(|d| d.mode_before),
            });
        }
    }
    functions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_lorom_with_code(code: &[u8]) -> Vec<u8> {
        let mut data = vec![0u8; 0x8000];
        let header = 0x7FC0;
        data[header..header + 21].copy_from_slice(b"TEST                 ");
        data[header + 0x15] = 0x20;
        data[header + 0x17] = 7;
        let checksum: u16 = 0xBEEF;
        let complement = !checksum;
        data[header + 0x1C..header + 0x1E].copy_from_slice(&complement.to_le_bytes());
        data[header + 0x1E..header + 0x20].copy_from_slice(&checksum.to_le_bytes());
        data[header + 0x3C] = 0x00;
        data[header + 0x3D] = 0x80;
        data[0..code.len()].copy_from_slice(code);
        data
    }

    #[test]
    fn analyzes_a_trivial_infinite_loop() {
        let rom = minimal_lorom_with_code(&[0x80, 0xFE]); // BRA -2 (self-loop)
        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();
        assert!(result.instructions.contains_key(&AddrSnes::new(0x008000)));
        assert_eq!(result.instructions.len(), 1);
    }

    #[test]
    fn halts_at_stp() {
        let rom = minimal_lorom_with_code(&[0xDB]); // STP
        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();
        assert_eq!(result.instructions.len(), 1);
    }

    #[test]
    fn brk_is_followed_as_a_call_to_its_vector() {
        let mut rom = minimal_lorom_with_code(&[0x00, 0x00]); // BRK #$00
        let header = 0x7FC0;
        rom[header + 0x3E..header + 0x40].copy_from_slice(&0x8010u16.to_le_bytes()); // brk/irq vector
        rom[0x10] = 0xEA; // NOP at the handler

        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

        let handler = AddrSnes::new(0x008010);
        let decoded = result.instructions.get(&handler).expect("brk handler decoded");
        assert_eq!(decoded.mnemonic, Mnemonic::NOP);

        let edge = result.xrefs.from(AddrSnes::new(0x008000)).find(|e| e.target == handler);
        assert!(matches!(edge, Some(e) if e.kind == EdgeKind::CodeCall));

        assert!(result.functions.iter().any(|f| f.entry == handler));
    }

    #[test]
    fn records_data_write_xref_and_byte_label() {
        // STA $1000 (absolute); the reset vector's mode is already 8-bit
        // accumulator (emulation mode), so the operand is byte-width.
        let rom = minimal_lorom_with_code(&[0x8D, 0x00, 0x10]);
        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

        let sta = AddrSnes::new(0x008000);
        let target = AddrSnes::new(0x001000);
        let edge = result.xrefs.from(sta).find(|e| e.target == target);
        assert!(matches!(edge, Some(e) if e.kind == EdgeKind::DataWrite));

        let symbol = result.symbols.get(target).expect("data target labeled");
        assert_eq!(symbol.name, "byte_001000");
    }

    #[test]
    fn indexed_data_operand_gets_table_label() {
        // LDA $1000,X: absolute indexed, so the target is labeled as a table
        // regardless of accumulator width.
        let rom = minimal_lorom_with_code(&[0xBD, 0x00, 0x10]);
        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

        let target = AddrSnes::new(0x001000);
        let symbol = result.symbols.get(target).expect("table target labeled");
        assert_eq!(symbol.name, "tbl_001000");
    }

    #[test]
    fn mmio_operand_gets_canonical_register_name() {
        let rom = minimal_lorom_with_code(&[0x8D, 0x00, 0x21]); // STA $2100 (INIDISP)
        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

        let target = AddrSnes::new(0x002100);
        let symbol = result.symbols.get(target).expect("register target labeled");
        assert_eq!(symbol.name, "INIDISP");
        assert_eq!(symbol.kind, SymbolKind::Register);
    }

    #[test]
    fn branch_target_gets_loc_label() {
        // BRA $8004; NOP; NOP; NOP
        let rom = minimal_lorom_with_code(&[0x80, 0x02, 0xEA, 0xEA, 0xEA]);
        let result = analyze(&rom, &AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() }).unwrap();

        let target = AddrSnes::new(0x008004);
        let symbol = result.symbols.get(target).expect("branch target labeled");
        assert_eq!(symbol.name, "loc_008004");
        assert_eq!(symbol.kind, SymbolKind::Code);
    }

    #[test]
    fn end_address_bounds_the_decoded_range() {
        // NOP; NOP; NOP, but the range stops before the third NOP.
        let rom = minimal_lorom_with_code(&[0xEA, 0xEA, 0xEA]);
        let options = AnalysisOptions {
            follow_nmi: false,
            follow_irq: false,
            end_address: Some(AddrSnes::new(0x008001)),
            ..Default::default()
        };
        let result = analyze(&rom, &options).unwrap();

        assert!(result.instructions.contains_key(&AddrSnes::new(0x008000)));
        assert!(result.instructions.contains_key(&AddrSnes::new(0x008001)));
        assert!(!result.instructions.contains_key(&AddrSnes::new(0x008002)));
    }

    #[test]
    fn disabling_cycle_calc_zeroes_reported_cycles() {
        let rom = minimal_lorom_with_code(&[0xEA]); // NOP
        let options = AnalysisOptions { follow_nmi: false, follow_irq: false, enable_cycle_calc: false, ..Default::default() };
        let result = analyze(&rom, &options).unwrap();

        let nop = &result.instructions[&AddrSnes::new(0x008000)];
        assert_eq!(nop.cycles, 0);
    }

    // $8000: LDA #$00 (2 bytes: A9 00), falls through to $8002.
    // $8002: BRA $8001 (2 bytes: 80 FD), jumping backward into the LDA's own
    // operand byte. Re-decoding from $8001 reads that operand byte (0x00) as
    // a BRK opcode consuming the BRA's opcode byte as its own operand,
    // producing an instruction whose range overlaps the LDA emitted at
    // $8000 despite starting at a different address.
    fn rom_with_branch_into_prior_operand() -> Vec<u8> { minimal_lorom_with_code(&[0xA9, 0x00, 0x80, 0xFD]) }

    #[test]
    fn overlapping_jump_target_is_flagged() {
        let rom = rom_with_branch_into_prior_operand();
        let options = AnalysisOptions { follow_nmi: false, follow_irq: false, ..Default::default() };
        let result = analyze(&rom, &options).unwrap();

        assert!(result.diagnostics.iter().any(|d| matches!(d, Diagnostic::CodeOverlap { address } if *address == AddrSnes::new(0x008000))));
    }

    #[test]
    fn disabling_validation_suppresses_overlap_diagnostic() {
        let rom = rom_with_branch_into_prior_operand();
        let options = AnalysisOptions { follow_nmi: false, follow_irq: false, enable_validation: false, ..Default::default() };
        let result = analyze(&rom, &options).unwrap();

        assert!(!result.diagnostics.iter().any(|d| matches!(d, Diagnostic::CodeOverlap { .. })));
    }
}

//! Cross-reference index (C10): append-only `source -> target` edges,
//! indexed both ways so callers can ask "who calls this" and "what does
//! this call" without re-scanning the instruction stream.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::addr::AddrSnes;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub enum EdgeKind {
    CodeRead,
    CodeWrite,
    CodeExecute,
    CodeCall,
    CodeBranch,
    DataRead,
    DataWrite,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Edge {
    pub source: AddrSnes,
    pub target: AddrSnes,
    pub kind: EdgeKind,
}

#[derive(Default)]
pub struct CrossReferenceIndex {
    from: BTreeMap<AddrSnes, BTreeSet<Edge>>,
    to: BTreeMap<AddrSnes, BTreeSet<Edge>>,
}

impl CrossReferenceIndex {
    pub fn record(&mut self, edge: Edge) {
        self.from.entry(edge.source).or_default().insert(edge);
        self.to.entry(edge.target).or_default().insert(edge);
    }

    pub fn from(&self, address: AddrSnes) -> impl Iterator<Item = &Edge> { self.from.get(&address).into_iter().flatten() }

    pub fn to(&self, address: AddrSnes) -> impl Iterator<Item = &Edge> { self.to.get(&address).into_iter().flatten() }

    pub fn edge_count(&self) -> usize { self.from.values().map(BTreeSet::len).sum() }
}

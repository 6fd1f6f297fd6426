use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use sumac_ir::{AccessKind, Function, Location};

use crate::{FunctionSummary, PathNode};

sumac_ir::identifier! {
    /// Handle of a [`FunctionInfo`] in the analysis arena.
    pub struct FunctionInfoId
}

/// Records a flow of a caller's argument to a called function: the callee's
/// summary for `callee_argument_index` is a lower bound on the caller's
/// summary for `caller_argument_index`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArgumentFlow {
    pub caller_argument_index: usize,
    pub callee_argument_index: usize,
    pub callee: FunctionInfoId,
}

/// A direct access found while scanning a function body, keyed by the
/// canonical identity of its projection path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccessRecord {
    pub argument: usize,
    pub path: PathNode,
    pub kind: AccessKind,
    pub location: Location,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InfoState {
    /// Not summarized yet, or reset by invalidation.
    Absent,
    /// Scanned and propagated to a fixpoint.
    Computed,
}

/// The summary and argument flows the analysis keeps for one function.
#[derive(Clone, Debug)]
pub struct FunctionInfo {
    function: Function,
    summary: FunctionSummary,
    flows: SmallVec<[ArgumentFlow; 8]>,
    /// Functions with at least one flow into this one.
    callers: FxHashSet<FunctionInfoId>,
    accesses: Vec<AccessRecord>,
    state: InfoState,
}

impl FunctionInfo {
    pub(crate) fn new(function: Function, argument_count: usize) -> Self {
        Self {
            function,
            summary: FunctionSummary::new(argument_count),
            flows: SmallVec::new(),
            callers: FxHashSet::default(),
            accesses: Vec::new(),
            state: InfoState::Absent,
        }
    }

    pub fn function(&self) -> Function {
        self.function
    }

    pub fn summary(&self) -> &FunctionSummary {
        &self.summary
    }

    pub(crate) fn summary_mut(&mut self) -> &mut FunctionSummary {
        &mut self.summary
    }

    pub fn argument_flows(&self) -> &[ArgumentFlow] {
        &self.flows
    }

    pub fn callers(&self) -> impl Iterator<Item = FunctionInfoId> + '_ {
        self.callers.iter().copied()
    }

    pub fn local_accesses(&self) -> &[AccessRecord] {
        &self.accesses
    }

    pub fn state(&self) -> InfoState {
        self.state
    }

    pub fn is_computed(&self) -> bool {
        self.state == InfoState::Computed
    }

    pub(crate) fn mark_computed(&mut self) {
        self.state = InfoState::Computed;
    }

    /// Request a rescan without forgetting the recorded flows.
    pub(crate) fn mark_absent(&mut self) {
        self.state = InfoState::Absent;
    }

    /// Record an outgoing flow. The caller must also register itself with
    /// the callee through [`FunctionInfo::add_caller`].
    pub(crate) fn push_flow(&mut self, flow: ArgumentFlow) {
        assert!(
            flow.caller_argument_index < self.summary.argument_count(),
            "caller argument index {} out of range for {:?} with {} arguments",
            flow.caller_argument_index,
            self.function,
            self.summary.argument_count()
        );
        if !self.flows.contains(&flow) {
            self.flows.push(flow);
        }
    }

    pub(crate) fn add_caller(&mut self, caller: FunctionInfoId) {
        self.callers.insert(caller);
    }

    pub(crate) fn remove_caller(&mut self, caller: FunctionInfoId) {
        self.callers.remove(&caller);
    }

    pub(crate) fn push_access(&mut self, record: AccessRecord) {
        self.accesses.push(record);
    }

    /// Drop everything learned from the body and return the flows that were
    /// recorded, so the callees can forget this caller. Callers are kept:
    /// they still hold flows into this function.
    pub(crate) fn reset(&mut self, argument_count: usize) -> SmallVec<[ArgumentFlow; 8]> {
        self.summary = FunctionSummary::new(argument_count);
        self.accesses.clear();
        self.state = InfoState::Absent;
        std::mem::take(&mut self.flows)
    }
}

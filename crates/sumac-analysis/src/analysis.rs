use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use sumac_ir::{Arena, Function, UseClassifier};
use tracing::debug;

use crate::{
    AccessRecord, AnalysisConfig, ArgumentFlow, FunctionInfo, FunctionInfoId, FunctionSummary,
    PathNode, PathTrie,
};

/// How much of a function changed since it was last summarized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InvalidationKind {
    /// Only metadata changed; the body is the same.
    Nothing,
    Instructions,
    Calls,
    FunctionBody,
    Everything,
}

impl InvalidationKind {
    /// Whether functions that flow arguments into the changed function may
    /// now hold stale summaries.
    pub fn touches_body(self) -> bool {
        self != InvalidationKind::Nothing
    }
}

/// Counters describing the work the analysis has performed so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AnalysisStats {
    /// Calls to `recompute`.
    pub recomputations: usize,
    /// Function bodies scanned by the call-graph builder.
    pub functions_scanned: usize,
    /// Full propagation passes over a recomputed set.
    pub propagation_passes: usize,
    /// Merges along argument flows that strengthened a caller summary.
    pub summary_changes: usize,
}

/// Interprocedural analysis summarizing the formal accesses every function
/// begins on its address-type arguments.
///
/// Summaries are computed lazily on request, cached, and iterated to a
/// fixpoint across (mutually) recursive calls. The analysis is not
/// internally synchronized: every mutating query takes `&mut self`.
#[derive(Debug, Default)]
pub struct AccessSummaryAnalysis {
    pub(crate) infos: Arena<FunctionInfoId, FunctionInfo>,
    pub(crate) function_infos: FxHashMap<Function, FunctionInfoId>,
    /// Shared between all functions so that equal paths compare equal
    /// across unrelated call sites.
    pub(crate) sub_path_trie: PathTrie,
    pub(crate) config: AnalysisConfig,
    pub(crate) stats: AnalysisStats,
}

impl AccessSummaryAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn stats(&self) -> AnalysisStats {
        self.stats
    }

    /// Returns a summary of the accesses performed by `function`, computing
    /// it and everything it calls if no valid summary is cached.
    ///
    /// Panics if `function` is not declared by `classifier`.
    pub fn get_or_create_summary<C>(&mut self, classifier: &C, function: Function) -> &FunctionSummary
    where
        C: UseClassifier + ?Sized,
    {
        if classifier.decl(function).is_none() {
            panic!("cannot summarize {function:?}: it is not declared");
        }
        let info = self.function_info(classifier, function);
        if !self.infos[info].is_computed() {
            self.recompute(classifier, info);
        }
        self.infos[info].summary()
    }

    /// The cached summary of `function`, without computing anything.
    pub fn summary(&self, function: Function) -> Option<&FunctionSummary> {
        self.function_infos
            .get(&function)
            .map(|&info| &*self.infos[info])
            .filter(|info| info.is_computed())
            .map(FunctionInfo::summary)
    }

    /// The analysis state kept for `function`, if any.
    pub fn info(&self, function: Function) -> Option<&FunctionInfo> {
        self.function_infos.get(&function).map(|&info| &*self.infos[info])
    }

    /// The direct accesses found in the body of `function` when it was last
    /// scanned, with their projection paths interned in the sub-path trie.
    pub fn local_accesses(&self, function: Function) -> &[AccessRecord] {
        self.info(function)
            .map(FunctionInfo::local_accesses)
            .unwrap_or_default()
    }

    pub fn sub_path_trie_root(&self) -> PathNode {
        self.sub_path_trie.root()
    }

    pub fn path_trie(&self) -> &PathTrie {
        &self.sub_path_trie
    }

    pub fn path_trie_mut(&mut self) -> &mut PathTrie {
        &mut self.sub_path_trie
    }

    /// Forget every summary and path identity.
    pub fn invalidate_all(&mut self) {
        debug!(functions = self.function_infos.len(), "invalidating all access summaries");
        self.infos.clear();
        self.function_infos.clear();
        self.sub_path_trie = PathTrie::new();
    }

    /// Mark the summary of `function` stale. When the body changed, every
    /// function whose summary was derived from it through argument flows is
    /// marked stale as well. Summaries are recomputed on the next request.
    pub fn invalidate(&mut self, function: Function, kind: InvalidationKind) {
        let Some(&root) = self.function_infos.get(&function) else {
            return;
        };

        if !kind.touches_body() {
            // flows stay attached so later body changes below still reach
            // the callers of this function
            self.infos[root].mark_absent();
            debug!(?function, ?kind, "invalidated access summary");
            return;
        }

        let mut worklist = vec![root];
        let mut visited = FxHashSet::default();
        while let Some(info) = worklist.pop() {
            if !visited.insert(info) {
                continue;
            }
            worklist.extend(self.infos[info].callers());
            self.reset_info(info);
        }
        debug!(?function, ?kind, invalidated = visited.len(), "invalidated access summaries");
    }

    /// New functions are discovered lazily; nothing to do.
    pub fn notify_add_function(&mut self, _function: Function) {}

    pub fn notify_delete_function(&mut self, function: Function) {
        self.invalidate(function, InvalidationKind::Everything);
    }

    /// Returns the analysis information for `function`, allocating it on
    /// first request.
    pub(crate) fn function_info<C>(&mut self, classifier: &C, function: Function) -> FunctionInfoId
    where
        C: UseClassifier + ?Sized,
    {
        if let Some(&info) = self.function_infos.get(&function) {
            return info;
        }
        let argument_count = classifier
            .decl(function)
            .map(|decl| decl.argument_count())
            .unwrap_or_else(|| panic!("no declaration for {function:?}"));
        let info = self.infos.alloc(FunctionInfo::new(function, argument_count));
        self.function_infos.insert(function, info);
        info
    }

    /// Record a flow of an argument of `caller` into a callee.
    pub(crate) fn record_flow(&mut self, caller: FunctionInfoId, flow: ArgumentFlow) {
        let callee_count = self.infos[flow.callee].summary().argument_count();
        assert!(
            flow.callee_argument_index < callee_count,
            "callee argument index {} out of range for {:?} with {} arguments",
            flow.callee_argument_index,
            self.infos[flow.callee].function(),
            callee_count
        );
        self.infos[flow.callee].add_caller(caller);
        self.infos[caller].push_flow(flow);
    }

    /// Clear what was learned from the body of `info` and resize its summary
    /// to `argument_count`.
    pub(crate) fn reset_info_with_count(&mut self, info: FunctionInfoId, argument_count: usize) {
        let flows = self.infos[info].reset(argument_count);
        self.detach_flows(info, &flows);
    }

    fn reset_info(&mut self, info: FunctionInfoId) {
        let argument_count = self.infos[info].summary().argument_count();
        self.reset_info_with_count(info, argument_count);
    }

    fn detach_flows(&mut self, caller: FunctionInfoId, flows: &SmallVec<[ArgumentFlow; 8]>) {
        for flow in flows {
            self.infos[flow.callee].remove_caller(caller);
        }
    }
}

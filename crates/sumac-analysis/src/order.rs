use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use sumac_ir::Arena;

use crate::{FunctionInfo, FunctionInfoId};

/// The set of functions summarized by one recomputation, and the order in
/// which summaries are propagated through them.
#[derive(Debug, Default)]
pub(crate) struct FunctionOrder {
    scheduled: FxHashSet<FunctionInfoId>,
    /// Functions in discovery order.
    discovered: Vec<FunctionInfoId>,
    /// Scheduled functions whose bodies are not scanned yet.
    pending: Vec<FunctionInfoId>,
}

impl FunctionOrder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Schedule `info` for scanning. Returns `false` if it already was.
    pub(crate) fn prepare_for_visiting(&mut self, info: FunctionInfoId) -> bool {
        if !self.scheduled.insert(info) {
            return false;
        }
        self.discovered.push(info);
        self.pending.push(info);
        true
    }

    pub(crate) fn next_to_visit(&mut self) -> Option<FunctionInfoId> {
        self.pending.pop()
    }

    pub(crate) fn len(&self) -> usize {
        self.discovered.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = FunctionInfoId> + '_ {
        self.discovered.iter().copied()
    }

    /// Group the scheduled functions into strongly connected components of
    /// the argument-flow graph, callees' components before their callers'.
    ///
    /// Flows into functions outside the order (already computed) do not
    /// contribute edges: those summaries are final.
    pub(crate) fn bottom_up(
        &self,
        infos: &Arena<FunctionInfoId, FunctionInfo>,
    ) -> Vec<Vec<FunctionInfoId>> {
        let mut graph: DiGraph<FunctionInfoId, ()> = DiGraph::new();
        let nodes: FxHashMap<FunctionInfoId, NodeIndex> = self
            .discovered
            .iter()
            .map(|&info| (info, graph.add_node(info)))
            .collect();

        for &caller in &self.discovered {
            for flow in infos[caller].argument_flows() {
                if let Some(&callee) = nodes.get(&flow.callee) {
                    graph.update_edge(nodes[&caller], callee, ());
                }
            }
        }

        // tarjan_scc yields components in reverse topological order, which
        // for caller -> callee edges puts callees first.
        tarjan_scc(&graph)
            .into_iter()
            .map(|component| {
                let mut members: Vec<FunctionInfoId> =
                    component.into_iter().map(|idx| graph[idx]).collect();
                members.sort();
                members
            })
            .collect()
    }
}

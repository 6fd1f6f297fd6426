use sumac_ir::UseClassifier;
use tracing::debug;

use crate::order::FunctionOrder;
use crate::{AccessSummaryAnalysis, ArgumentFlow, FunctionInfoId};

// -- Fixpoint engine --------------------------------------------------------

impl AccessSummaryAnalysis {
    /// Summarize `initial` and every function it reaches through argument
    /// flows that has no valid summary, then iterate propagation from
    /// callees to callers until no summary changes.
    ///
    /// Summaries only ever strengthen and each argument can strengthen at
    /// most twice, so the number of passes is bounded by twice the number of
    /// arguments in the recomputed set, plus the final unchanged pass.
    pub(crate) fn recompute<C>(&mut self, classifier: &C, initial: FunctionInfoId)
    where
        C: UseClassifier + ?Sized,
    {
        self.stats.recomputations += 1;

        // 1. Summarize local accesses and build the call graph.
        let mut order = FunctionOrder::new();
        order.prepare_for_visiting(initial);
        while let Some(info) = order.next_to_visit() {
            self.process_function(classifier, info, &mut order);
        }

        // 2. Propagate bottom-up until a fixpoint is reached.
        let components = order.bottom_up(&self.infos);
        let pass_bound = 2 * order
            .iter()
            .map(|info| self.infos[info].summary().argument_count())
            .sum::<usize>()
            + 1;

        let mut passes = 0;
        loop {
            passes += 1;
            debug_assert!(
                passes <= pass_bound,
                "access summary propagation did not converge within {pass_bound} passes"
            );

            let mut changed = false;
            for &caller in components.iter().flatten() {
                for index in 0..self.infos[caller].argument_flows().len() {
                    let flow = self.infos[caller].argument_flows()[index];
                    changed |= self.propagate_from_callee_to_caller(caller, flow);
                }
            }
            if !changed {
                break;
            }
        }
        self.stats.propagation_passes += passes;

        for info in order.iter() {
            self.infos[info].mark_computed();
        }
        debug!(
            functions = order.len(),
            components = components.len(),
            passes,
            "access summaries reached a fixpoint"
        );
    }

    /// Propagate the access summary from the argument of a called function
    /// to the caller. Returns `true` if the caller's summary changed.
    pub(crate) fn propagate_from_callee_to_caller(
        &mut self,
        caller: FunctionInfoId,
        flow: ArgumentFlow,
    ) -> bool {
        let callee_summary = *self.infos[flow.callee]
            .summary()
            .access_for_argument(flow.callee_argument_index);
        let changed = self.infos[caller]
            .summary_mut()
            .access_for_argument_mut(flow.caller_argument_index)
            .merge_with(&callee_summary);
        if changed {
            self.stats.summary_changes += 1;
        }
        changed
    }
}

use sumac_ir::{AccessKind, ArgumentUse, Function, Location, UseClassifier};
use tracing::{debug, trace};

use crate::order::FunctionOrder;
use crate::{AccessRecord, AccessSummaryAnalysis, ArgumentFlow, FunctionInfoId};

// -- Call-graph builder -----------------------------------------------------

impl AccessSummaryAnalysis {
    /// Summarize the local accesses of `info` and record its argument flows,
    /// scheduling every callee that still needs a summary.
    pub(crate) fn process_function<C>(
        &mut self,
        classifier: &C,
        info: FunctionInfoId,
        order: &mut FunctionOrder,
    ) where
        C: UseClassifier + ?Sized,
    {
        let function = self.infos[info].function();
        let Some(decl) = classifier.decl(function) else {
            // deleted since it was scheduled; nothing left to summarize
            let argument_count = self.infos[info].summary().argument_count();
            self.reset_info_with_count(info, argument_count);
            return;
        };

        self.reset_info_with_count(info, decl.argument_count());
        self.stats.functions_scanned += 1;
        debug!(function = decl.name(), "summarizing function");

        for (index, argument) in decl.arguments().iter().enumerate() {
            if argument.is_address() || self.config.summarize_value_arguments {
                self.process_argument(classifier, info, function, index, order);
            }
        }
    }

    /// Summarize how the function uses the argument at `argument`.
    fn process_argument<C>(
        &mut self,
        classifier: &C,
        info: FunctionInfoId,
        function: Function,
        argument: usize,
        order: &mut FunctionOrder,
    ) where
        C: UseClassifier + ?Sized,
    {
        for argument_use in classifier.argument_uses(function, argument) {
            match argument_use {
                ArgumentUse::Access {
                    kind,
                    path,
                    location,
                } => {
                    let path = self.sub_path_trie.intern_path(&path);
                    let info = &mut self.infos[info];
                    info.push_access(AccessRecord {
                        argument,
                        path,
                        kind,
                        location,
                    });
                    info.summary_mut()
                        .access_for_argument_mut(argument)
                        .merge_with_access(kind, location);
                }
                ArgumentUse::Capture {
                    callee, parameter, ..
                } => {
                    self.process_partial_apply(classifier, info, argument, callee, parameter, order);
                }
                ArgumentUse::Call {
                    callee,
                    argument: callee_argument,
                    ..
                } => {
                    self.process_full_apply(
                        classifier,
                        info,
                        argument,
                        callee,
                        callee_argument,
                        order,
                    );
                }
                ArgumentUse::OpaqueCall { location } => {
                    self.process_opaque_call(info, argument, location);
                }
            }
        }
    }

    /// Summarize a closure capturing the caller's argument. Any access the
    /// closure makes to the captured parameter is an access of the caller,
    /// whether or not the closure is invoked locally.
    fn process_partial_apply<C>(
        &mut self,
        classifier: &C,
        caller: FunctionInfoId,
        caller_argument_index: usize,
        callee: Function,
        parameter: usize,
        order: &mut FunctionOrder,
    ) where
        C: UseClassifier + ?Sized,
    {
        trace!(?callee, caller_argument_index, parameter, "argument captured by closure");
        self.process_call(
            classifier,
            caller,
            caller_argument_index,
            callee,
            parameter,
            order,
        );
    }

    /// Summarize a direct `apply` or `try_apply` passing the caller's argument.
    fn process_full_apply<C>(
        &mut self,
        classifier: &C,
        caller: FunctionInfoId,
        caller_argument_index: usize,
        callee: Function,
        callee_argument_index: usize,
        order: &mut FunctionOrder,
    ) where
        C: UseClassifier + ?Sized,
    {
        trace!(?callee, caller_argument_index, callee_argument_index, "argument passed to call");
        self.process_call(
            classifier,
            caller,
            caller_argument_index,
            callee,
            callee_argument_index,
            order,
        );
    }

    /// Record the flow of an argument from the caller to the callee so that
    /// the interprocedural analysis can iterate to a fixpoint.
    fn process_call<C>(
        &mut self,
        classifier: &C,
        caller: FunctionInfoId,
        caller_argument_index: usize,
        callee: Function,
        callee_argument_index: usize,
        order: &mut FunctionOrder,
    ) where
        C: UseClassifier + ?Sized,
    {
        let callee = self.function_info(classifier, callee);
        let flow = ArgumentFlow {
            caller_argument_index,
            callee_argument_index,
            callee,
        };
        self.record_flow(caller, flow);

        if !self.infos[callee].is_computed() {
            order.prepare_for_visiting(callee);
        }
        self.propagate_from_callee_to_caller(caller, flow);
    }

    /// There is no body to wait on: assume the configured worst case.
    fn process_opaque_call(
        &mut self,
        caller: FunctionInfoId,
        caller_argument_index: usize,
        location: Location,
    ) {
        let kind: AccessKind = self.config.opaque_call_kind;
        trace!(caller_argument_index, %location, %kind, "argument escapes into opaque call");
        self.infos[caller]
            .summary_mut()
            .access_for_argument_mut(caller_argument_index)
            .merge_with_access(kind, location);
    }
}

//! Dual-cursor comparison of two node streams.
//!
//! The engine pulls one node from each [`NodeSource`] per step and compares
//! them. Minor differences are recorded and scanning continues; the first
//! major difference is recorded and ends the scan. Two encodings of an empty
//! element (`<a/>` and `<a></a>`) are treated as the same node by reading the
//! extra end tag on the side that has one.

use once_cell::unsync::OnceCell;
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::diff::catalog::DifferenceType;
use crate::diff::difference::Difference;
use crate::diff::result::DiffResult;
use crate::source::{NodeKind, NodeSource};

/// Errors returned by [`DiffEngine::compare`].
#[derive(Debug, Error, PartialEq)]
pub enum CompareError<E> {
    /// A source failed to produce its next node.
    #[error(transparent)]
    Source(#[from] E),
    /// An earlier call failed part-way through the scan. The cursors are no
    /// longer aligned, so the engine refuses to scan again.
    #[error("an earlier comparison on this engine failed")]
    Poisoned,
}

/// Whether the scan may go on after a comparison step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Continue,
    Halt,
}

/// Compares a control source against a test source.
///
/// The result is computed on the first call to [`compare`](Self::compare)
/// and returned unchanged afterwards. The cache is not synchronized, so an
/// engine is meant for one comparison on one thread.
pub struct DiffEngine<S: NodeSource> {
    control: S,
    test: S,
    result: OnceCell<DiffResult>,
    poisoned: bool,
}

impl<S: NodeSource> DiffEngine<S> {
    pub fn new(control: S, test: S) -> Self {
        Self {
            control,
            test,
            result: OnceCell::new(),
            poisoned: false,
        }
    }

    /// Run the comparison, or return the result of the earlier run.
    ///
    /// A source error is returned as [`CompareError::Source`] and leaves the
    /// engine without a result. Every later call returns
    /// [`CompareError::Poisoned`].
    pub fn compare(&mut self) -> Result<&DiffResult, CompareError<S::Error>> {
        let Self {
            control,
            test,
            result,
            poisoned,
        } = self;
        if *poisoned {
            return Err(CompareError::Poisoned);
        }
        result.get_or_try_init(|| run(control, test)).map_err(|error| {
            warn!("source failed during comparison, engine poisoned");
            *poisoned = true;
            CompareError::Source(error)
        })
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Result of an earlier [`compare`](Self::compare), if one completed.
    pub fn result(&self) -> Option<&DiffResult> {
        self.result.get()
    }

    pub fn into_result(self) -> Option<DiffResult> {
        self.result.into_inner()
    }
}

fn run<S: NodeSource>(control: &mut S, test: &mut S) -> Result<DiffResult, S::Error> {
    let mut result = DiffResult::new();

    if control.handle() == test.handle() {
        debug!(
            handle = control.handle().id(),
            "control and test share one source, skipping scan"
        );
        return Ok(result);
    }

    Scan {
        control,
        test,
        result: &mut result,
        step: 0,
    }
    .run()?;

    debug!(
        equal = result.is_equal(),
        differences = result.differences().len(),
        "comparison finished"
    );
    Ok(result)
}

struct Scan<'a, S> {
    control: &'a mut S,
    test: &'a mut S,
    result: &'a mut DiffResult,
    step: usize,
}

impl<S: NodeSource> Scan<'_, S> {
    fn run(&mut self) -> Result<(), S::Error> {
        loop {
            self.step += 1;
            let control_read = self.control.advance()?;
            let test_read = self.test.advance()?;

            if !control_read {
                trace!(step = self.step, "control exhausted");
                return Ok(());
            }
            if !test_read {
                record(
                    self.result,
                    Difference::new(DifferenceType::ChildNodelistLength),
                );
                return Ok(());
            }

            trace!(
                step = self.step,
                control = %self.control.current_kind(),
                test = %self.test.current_kind(),
                "comparing nodes"
            );
            if self.compare_nodes() == Outcome::Halt {
                return Ok(());
            }
            if self.balance_empty_elements()? == Outcome::Halt {
                return Ok(());
            }
        }
    }

    fn compare_nodes(&mut self) -> Outcome {
        let control_kind = self.control.current_kind();
        let test_kind = self.test.current_kind();

        if control_kind != test_kind {
            return record(
                self.result,
                Difference::with_node_kinds(DifferenceType::NodeType, control_kind, test_kind),
            );
        }

        match control_kind {
            NodeKind::Element => self.compare_elements(),
            NodeKind::Text => {
                if self.control.current_value() == self.test.current_value() {
                    Outcome::Continue
                } else {
                    record(self.result, Difference::new(DifferenceType::TextValue))
                }
            }
            _ => Outcome::Continue,
        }
    }

    fn compare_elements(&mut self) -> Outcome {
        if self.control.current_name() != self.test.current_name() {
            return record(self.result, Difference::new(DifferenceType::ElementTagName));
        }

        let count = self.control.attribute_count();
        if count != self.test.attribute_count() {
            return record(
                self.result,
                Difference::new(DifferenceType::ElementNumAttributes),
            );
        }

        for position in 0..count {
            if self.compare_attribute_at(position) == Outcome::Halt {
                return Outcome::Halt;
            }
        }
        Outcome::Continue
    }

    // Positions advance in lockstep on both sides; a name mismatch only
    // redirects the value lookup for this one position.
    fn compare_attribute_at(&mut self, position: usize) -> Outcome {
        let (Some((control_name, control_value)), Some((test_name, test_value))) = (
            self.control.attribute_at(position),
            self.test.attribute_at(position),
        ) else {
            // A source that lists fewer attributes than it counted.
            return record(
                self.result,
                Difference::new(DifferenceType::ElementNumAttributes),
            );
        };

        let mut effective_value = test_value;
        if control_name != test_name {
            if record(self.result, Difference::new(DifferenceType::AttrSequence)) == Outcome::Halt
            {
                return Outcome::Halt;
            }
            match self.test.attribute_by_name(control_name) {
                Some(value) => effective_value = value,
                None => {
                    return record(
                        self.result,
                        Difference::new(DifferenceType::AttrNameNotFound),
                    )
                }
            }
        }

        if control_value != effective_value {
            return record(self.result, Difference::new(DifferenceType::AttrValue));
        }
        Outcome::Continue
    }

    fn balance_empty_elements(&mut self) -> Result<Outcome, S::Error> {
        if self.control.current_kind() != NodeKind::Element {
            return Ok(Outcome::Continue);
        }

        match (self.control.is_self_closing(), self.test.is_self_closing()) {
            (true, false) => expect_end_element(self.test, self.result),
            (false, true) => expect_end_element(self.control, self.result),
            _ => Ok(Outcome::Continue),
        }
    }
}

fn expect_end_element<S: NodeSource>(
    source: &mut S,
    result: &mut DiffResult,
) -> Result<Outcome, S::Error> {
    if source.advance()? && source.current_kind() == NodeKind::EndElement {
        return Ok(Outcome::Continue);
    }
    Ok(record(
        result,
        Difference::new(DifferenceType::ChildNodelistLength),
    ))
}

fn record(result: &mut DiffResult, difference: Difference) -> Outcome {
    let outcome = if difference.is_major() {
        Outcome::Halt
    } else {
        Outcome::Continue
    };
    debug!(
        kind = ?difference.kind(),
        severity = ?difference.severity(),
        "difference found: {difference}"
    );
    result.record_difference(difference);
    if outcome == Outcome::Halt {
        debug!("major difference, halting scan");
    }
    outcome
}

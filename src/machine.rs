//! This module defines the `NfaMachine` struct, which drives interactive execution of
//! an automaton over a working sequence. It owns the run state, both backtracking
//! chains (branch frames and undo frames), and the notification channel, and it
//! implements manual play, automatic depth-first exploration, and rollback.

use crate::automaton::Automaton;
use crate::notifier::{Notifier, Observer};
use crate::resolver::{resolve, Criterion};
use crate::types::{
    in_alphabet, BranchFrame, Event, NfaMachineError, Status, UndoFrame, MAX_RUN_STEPS,
};

/// An interactive run of an automaton over a working sequence.
///
/// The machine makes exactly one committed transition per step request. In
/// automatic play, ties are broken by declaration order and dead ends are
/// resolved by depth-first backtracking over saved branch frames; in manual
/// play, ties suspend the run until a destination is chosen and dead ends are
/// refused with a notification. Every committed transition also pushes an undo
/// frame, so manual rewinding works regardless of how a step was made.
pub struct NfaMachine {
    automaton: Automaton,
    sequence: Vec<char>,
    cursor: usize,
    node: String,
    status: Status,
    branches: Vec<BranchFrame>,
    undo: Vec<UndoFrame>,
    pending: Vec<usize>,
    notifier: Notifier,
    step_count: usize,
}

impl NfaMachine {
    /// Creates a machine for `automaton` with an empty working sequence.
    pub fn new(automaton: Automaton) -> Self {
        let node = automaton.init().to_string();
        Self {
            automaton,
            sequence: Vec::new(),
            cursor: 0,
            node,
            status: Status::Running,
            branches: Vec::new(),
            undo: Vec::new(),
            pending: Vec::new(),
            notifier: Notifier::new(),
            step_count: 0,
        }
    }

    /// Creates a machine and sets its working sequence in one go.
    ///
    /// # Arguments
    ///
    /// * `automaton` - The automaton to run.
    /// * `sequence` - The working sequence; every symbol must be alphanumeric.
    ///
    /// # Returns
    ///
    /// * `Ok(NfaMachine)` ready at cursor 0 in the start node.
    /// * `Err(NfaMachineError::InvalidSymbol)` if the sequence leaves the alphabet.
    pub fn with_sequence(automaton: Automaton, sequence: &str) -> Result<Self, NfaMachineError> {
        let mut machine = Self::new(automaton);
        machine.set_working_sequence(sequence)?;
        Ok(machine)
    }

    /// Registers an observer for run events. Registration order is delivery order.
    pub fn register_observer(&mut self, observer: Box<dyn Observer>) {
        self.notifier.register(observer);
    }

    /// Returns the automaton this machine runs.
    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// Returns the working sequence.
    pub fn sequence(&self) -> &[char] {
        &self.sequence
    }

    /// Returns the index of the next symbol to consume.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns the id of the current node.
    pub fn node(&self) -> &str {
        &self.node
    }

    /// Returns the current run status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns `true` once the run has terminated.
    pub fn is_done(&self) -> bool {
        matches!(self.status, Status::Accepted | Status::Rejected)
    }

    /// Returns the number of transitions committed since the last reset.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// Returns the saved branch frames, bottom of the chain first.
    pub fn branch_frames(&self) -> &[BranchFrame] {
        &self.branches
    }

    /// Returns the undo history, oldest frame first.
    pub fn undo_frames(&self) -> &[UndoFrame] {
        &self.undo
    }

    /// Returns the destinations announced by a pending choice, in declaration
    /// order. Empty unless the status is `AwaitingChoice`.
    pub fn pending_choices(&self) -> Vec<String> {
        self.pending
            .iter()
            .map(|&index| self.automaton.transitions()[index].to.clone())
            .collect()
    }

    /// Rewinds the run to cursor 0 in the start node.
    ///
    /// Both frame chains, any pending choice, and the step counter are cleared
    /// atomically with the state change, so no stale frame can be popped later.
    /// Observers see the restored position. Always succeeds.
    pub fn reset(&mut self) {
        self.branches.clear();
        self.undo.clear();
        self.pending.clear();
        self.status = Status::Running;
        self.step_count = 0;

        let init = self.automaton.init().to_string();
        self.restore(0, init);
    }

    /// Replaces the working sequence and resets the run.
    ///
    /// # Arguments
    ///
    /// * `sequence` - The new working sequence.
    ///
    /// # Returns
    ///
    /// * `Ok(())` after the sequence is replaced and the run reset.
    /// * `Err(NfaMachineError::InvalidSymbol)` naming the first symbol outside
    ///   the alphabet; the sequence and the run state are left untouched.
    pub fn set_working_sequence(&mut self, sequence: &str) -> Result<(), NfaMachineError> {
        if let Some(invalid) = sequence.chars().find(|&symbol| !in_alphabet(symbol)) {
            self.notifier.emit(&Event::FlashInvalid);
            return Err(NfaMachineError::InvalidSymbol(invalid));
        }

        self.sequence = sequence.chars().collect();
        self.reset();

        Ok(())
    }

    /// Appends one symbol to the working sequence and resets the run.
    pub fn append_symbol(&mut self, symbol: char) -> Result<(), NfaMachineError> {
        if !in_alphabet(symbol) {
            self.notifier.emit(&Event::FlashInvalid);
            return Err(NfaMachineError::InvalidSymbol(symbol));
        }

        self.sequence.push(symbol);
        self.reset();

        Ok(())
    }

    /// Executes one automatic-mode action.
    ///
    /// At most one transition is committed per call. A pending manual choice is
    /// abandoned when automatic play resumes. Dead ends and non-accepting
    /// exhaustion both fall back to the branch chain; an empty chain terminates
    /// the run as `Rejected`. No-op once the run has terminated.
    ///
    /// # Returns
    ///
    /// * The status after the action.
    pub fn step(&mut self) -> Status {
        if self.is_done() {
            return self.status;
        }

        self.pending.clear();
        self.status = Status::Running;

        // At the end of the sequence the resolver is never consulted; the only
        // question left is acceptance.
        if self.cursor >= self.sequence.len() {
            if self.automaton.is_accepting(&self.node) {
                self.accept();
            } else {
                self.backtrack();
            }
            return self.status;
        }

        let symbol = self.sequence[self.cursor];
        let candidates = resolve(&self.automaton, &self.node, &Criterion::Symbol(symbol), symbol);

        match candidates.len() {
            0 => self.backtrack(),
            1 => self.commit(candidates[0]),
            _ => {
                self.push_branch(&candidates);
                self.commit(candidates[0]);
            }
        }

        self.status
    }

    /// Runs automatic steps until the run terminates, bounded by `MAX_RUN_STEPS`.
    ///
    /// An exploration that outgrows the bound is left `Running`; a later call
    /// picks up where the last one stopped.
    pub fn run(&mut self) -> Status {
        for _ in 0..MAX_RUN_STEPS {
            if self.is_done() {
                break;
            }
            self.step();
        }

        self.status
    }

    /// Executes one manual-mode action matching the typed `symbol`.
    ///
    /// A unique match commits (undo frame only); several matches suspend the
    /// run as `AwaitingChoice`; none refuse the input with `FLASH_INVALID` and
    /// leave the state untouched. Manual play never backtracks. No-op once the
    /// run has terminated, while a choice is pending, or when the sequence is
    /// already fully consumed.
    pub fn feed(&mut self, symbol: char) -> Status {
        self.manual(Criterion::Symbol(symbol))
    }

    /// Executes one manual-mode action toward the destination node `target`.
    ///
    /// Same rules as [`feed`](Self::feed), with the candidate set restricted to
    /// transitions entering `target`.
    pub fn advance_to(&mut self, target: &str) -> Status {
        self.manual(Criterion::Target(target.to_string()))
    }

    /// Commits one of the destinations announced by a pending choice.
    ///
    /// The earliest pending candidate (declaration order) entering `target` is
    /// committed exactly like a unique manual match; the nondeterminism was
    /// resolved by the caller, so no branch frame is created.
    ///
    /// # Arguments
    ///
    /// * `target` - One of the destinations delivered with `MULTIPLE_CHOICES`.
    ///
    /// # Returns
    ///
    /// * `Ok(status)` after the commit (`Running`, or `Accepted` on eager acceptance).
    /// * `Err(NfaMachineError::NoPendingChoice)` if no choice is pending.
    /// * `Err(NfaMachineError::InvalidChoice)` if `target` was not announced;
    ///   the pending choice stays open.
    pub fn resolve_choice(&mut self, target: &str) -> Result<Status, NfaMachineError> {
        if self.status != Status::AwaitingChoice {
            return Err(NfaMachineError::NoPendingChoice);
        }

        let index = self
            .pending
            .iter()
            .copied()
            .find(|&index| self.automaton.transitions()[index].to == target);

        let index = match index {
            Some(index) => index,
            None => return Err(NfaMachineError::InvalidChoice(target.to_string())),
        };

        self.pending.clear();
        self.status = Status::Running;
        self.commit(index);

        Ok(self.status)
    }

    /// Rewinds one committed step, if there is one.
    ///
    /// Pops the top undo frame and restores its saved cursor and node. Undo
    /// never searches and is independent of the branch chain. A successful
    /// rewind reopens the run: the status returns to `Running` and any pending
    /// choice is dropped. With an empty history this is a no-op.
    pub fn back(&mut self) -> Status {
        let frame = match self.undo.pop() {
            Some(frame) => frame,
            None => return self.status,
        };

        self.pending.clear();
        self.status = Status::Running;
        self.restore(frame.cursor, frame.node);

        self.status
    }

    /// Resolves a manual request and applies the matching controller rule.
    fn manual(&mut self, criterion: Criterion) -> Status {
        if self.is_done() || self.status == Status::AwaitingChoice {
            return self.status;
        }

        if self.cursor >= self.sequence.len() {
            return self.status;
        }

        let at = self.sequence[self.cursor];
        let candidates = resolve(&self.automaton, &self.node, &criterion, at);

        match candidates.len() {
            0 => self.notifier.emit(&Event::FlashInvalid),
            1 => self.commit(candidates[0]),
            _ => {
                self.pending = candidates;
                self.status = Status::AwaitingChoice;
                self.notifier.emit(&Event::MultipleChoices {
                    candidates: self.pending_choices(),
                });
            }
        }

        self.status
    }

    /// Saves a branch point for the untried candidates.
    fn push_branch(&mut self, candidates: &[usize]) {
        let parent = self.branches.len().checked_sub(1);
        self.branches.push(BranchFrame {
            cursor: self.cursor,
            node: self.node.clone(),
            alternatives: candidates[1..].to_vec(),
            next_alternative: 0,
            parent,
        });
    }

    /// Commits the transition at `index`: undo frame, cursor advance, node
    /// change, notifications, and the eager acceptance check.
    fn commit(&mut self, index: usize) {
        let parent = self.undo.len().checked_sub(1);
        self.undo.push(UndoFrame {
            cursor: self.cursor,
            node: self.node.clone(),
            parent,
        });

        let target = self.automaton.transitions()[index].to.clone();
        self.cursor += 1;
        self.node = target;
        self.step_count += 1;

        self.notifier.emit(&Event::PointerAt { index: self.cursor });
        self.notifier.emit(&Event::SelectNode {
            node: self.node.clone(),
        });

        if self.cursor >= self.sequence.len() && self.automaton.is_accepting(&self.node) {
            self.accept();
        }
    }

    /// Takes the next untried alternative off the branch chain and commits it.
    ///
    /// Frames found exhausted are discarded and popping continues upward; with
    /// the chain empty the run terminates as `Rejected`.
    fn backtrack(&mut self) {
        while let Some(frame) = self.branches.last_mut() {
            match frame.take() {
                Some(index) => {
                    let cursor = frame.cursor;
                    let node = frame.node.clone();
                    self.restore(cursor, node);
                    self.commit(index);
                    return;
                }
                None => {
                    self.branches.pop();
                }
            }
        }

        self.status = Status::Rejected;
        self.notifier.emit(&Event::Done { accepted: false });
    }

    /// Moves the run to `cursor`/`node` and notifies observers of the position.
    fn restore(&mut self, cursor: usize, node: String) {
        self.cursor = cursor;
        self.node = node;

        self.notifier.emit(&Event::PointerAt { index: self.cursor });
        self.notifier.emit(&Event::SelectNode {
            node: self.node.clone(),
        });
    }

    /// Terminates the run as `Accepted`.
    fn accept(&mut self) {
        self.status = Status::Accepted;
        self.notifier.emit(&Event::Done { accepted: true });
    }
}

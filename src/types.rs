//! This module defines the core data structures and types used throughout the NFA
//! simulator, including automaton definitions, run status, notification events,
//! backtracking frames, and error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Rule;

/// The maximum allowed size for an automaton definition in bytes.
pub const MAX_DEFINITION_SIZE: usize = 65536; // 64KB
/// The maximum number of automatic steps `run` executes before giving up.
pub const MAX_RUN_STEPS: usize = 10000;

/// Returns `true` if `symbol` belongs to the input alphabet (ASCII letters and digits).
pub fn in_alphabet(symbol: char) -> bool {
    symbol.is_ascii_alphanumeric()
}

/// The raw, loosely validated description of an automaton.
///
/// A definition is what parsers and deserializers produce; it becomes usable only
/// once [`crate::Automaton::new`] has validated it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Definition {
    /// The display name of the automaton.
    #[serde(default)]
    pub name: String,
    /// The declared nodes, in declaration order.
    pub nodes: Vec<Node>,
    /// The declared transitions, in declaration order. This order is the
    /// tie-break for automatic exploration.
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// The id of the start node.
    pub init: String,
    /// The ids of the accepting nodes.
    #[serde(default)]
    pub accepting: Vec<String>,
}

/// A single node of an automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// The unique id of the node.
    pub id: String,
    /// The display name. Empty means "use the id".
    #[serde(default)]
    pub name: String,
}

/// A labeled directed edge between two nodes.
///
/// Several transitions may share the same `(from, symbol)` pair; that is what
/// makes an automaton nondeterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// The id of the source node.
    pub from: String,
    /// The id of the destination node.
    pub to: String,
    /// The input symbol consumed by this transition.
    pub symbol: char,
}

/// The status of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// The run can take further steps.
    #[default]
    Running,
    /// A manual step matched several transitions; the run is blocked until one
    /// destination is chosen or automatic play resumes.
    AwaitingChoice,
    /// The sequence was consumed in an accepting node. Terminal.
    Accepted,
    /// No reachable accepting path exists in the explored space. Terminal.
    Rejected,
}

/// A notification delivered to observers after every committed state change.
///
/// The serialized form is tagged with the event name, e.g.
/// `{"ev":"POINTER_AT","index":3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "ev", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Event {
    /// The cursor moved to `index`.
    PointerAt { index: usize },
    /// The run entered `node`.
    SelectNode { node: String },
    /// A manual action was refused (dead end or invalid input symbol).
    FlashInvalid,
    /// A manual step matched several transitions; `candidates` lists their
    /// destinations in declaration order.
    MultipleChoices { candidates: Vec<String> },
    /// The run terminated.
    Done { accepted: bool },
}

/// A saved branch point with its untried alternatives.
///
/// Pushed during automatic play whenever more than one transition matches.
/// `alternatives` holds the candidate transition indices that were not
/// committed, still in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchFrame {
    /// The cursor before the branching transition was committed.
    pub cursor: usize,
    /// The node before the branching transition was committed.
    pub node: String,
    /// The untried candidate transition indices, in declaration order.
    pub alternatives: Vec<usize>,
    /// Index into `alternatives` of the next candidate to try.
    pub next_alternative: usize,
    /// Index of the frame beneath this one in the branch chain.
    pub parent: Option<usize>,
}

impl BranchFrame {
    /// Returns `true` once every alternative has been handed out.
    pub fn exhausted(&self) -> bool {
        self.next_alternative >= self.alternatives.len()
    }

    /// Hands out the next untried alternative, advancing the frame's index.
    pub fn take(&mut self) -> Option<usize> {
        let index = self.alternatives.get(self.next_alternative).copied();
        if index.is_some() {
            self.next_alternative += 1;
        }
        index
    }
}

/// One step of rewindable history.
///
/// Pushed on every committed transition, manual or automatic, so the full
/// linear history can be walked back one step at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoFrame {
    /// The cursor before the transition was committed.
    pub cursor: usize,
    /// The node before the transition was committed.
    pub node: String,
    /// Index of the frame beneath this one in the undo chain.
    pub parent: Option<usize>,
}

/// Represents various errors that can occur while building or driving an automaton.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NfaMachineError {
    /// Indicates a definition whose ids do not resolve (or is otherwise unusable).
    #[error("Malformed automaton: {0}")]
    MalformedAutomaton(String),
    /// Indicates an input symbol outside the `{A-Z, a-z, 0-9}` alphabet.
    #[error("Symbol {0:?} is outside the input alphabet")]
    InvalidSymbol(char),
    /// Indicates a `resolve_choice` call while no choice was pending.
    #[error("No choice is pending")]
    NoPendingChoice,
    /// Indicates a `resolve_choice` call naming a node that was not announced.
    #[error("Node '{0}' is not among the announced candidates")]
    InvalidChoice(String),
    /// Indicates an error during the parsing of an automaton definition.
    #[error("Definition parsing error: {0}")]
    ParseError(#[from] Box<pest::error::Error<Rule>>),
    /// Indicates a catalog lookup that matched no machine.
    #[error("Machine not found: {0}")]
    MachineNotFound(String),
    /// Indicates an error related to file system operations, such as reading definition files.
    #[error("File error: {0}")]
    FileError(String),
}

//! This crate provides the core logic for an interactive NFA simulator.
//! It includes modules for parsing automaton definitions, driving runs manually
//! or through automatic backtracking exploration, notifying observers of every
//! state change, analyzing automatons, and managing a collection of predefined
//! machines.

pub mod analyzer;
pub mod automaton;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod machines;
pub mod notifier;
pub mod parser;
pub mod resolver;
pub mod types;

/// Re-exports the `Rule` enum from the parser module, used by the `pest` grammar.
pub use crate::parser::Rule;
/// Re-exports the analysis functions and their result types from the analyzer module.
pub use analyzer::{inspect, validate, Advisory, AnalysisError};
/// Re-exports the `Automaton` struct from the automaton module.
pub use automaton::Automaton;
/// Re-exports the encoding functions from the encoder module.
pub use encoder::{decode, encode};
/// Re-exports the `AutomatonLoader` struct from the loader module.
pub use loader::AutomatonLoader;
/// Re-exports the `NfaMachine` struct from the machine module.
pub use machine::NfaMachine;
/// Re-exports `MachineInfo`, `MachineManager`, and `MACHINES` from the machines module.
pub use machines::{MachineInfo, MachineManager, MACHINES};
/// Re-exports the observer plumbing from the notifier module.
pub use notifier::{Notifier, Observer, Recorder};
/// Re-exports the `parse` function from the parser module.
pub use parser::parse;
/// Re-exports the transition resolver from the resolver module.
pub use resolver::{resolve, Criterion};
/// Re-exports various types related to automaton definition and execution from the types module.
pub use types::{
    BranchFrame, Definition, Event, NfaMachineError, Node, Status, Transition, UndoFrame,
    MAX_DEFINITION_SIZE, MAX_RUN_STEPS,
};

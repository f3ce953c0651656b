use crate::automaton::Automaton;
use crate::types::NfaMachineError;

use std::sync::RwLock;

// Default embedded machines
const MACHINE_TEXTS: [&str; 6] = [
    include_str!("../machines/ends-in-01.nfa"),
    include_str!("../machines/ends-in-1.nfa"),
    include_str!("../machines/even-ones.nfa"),
    include_str!("../machines/contains-101.nfa"),
    include_str!("../machines/multiple-of-3.nfa"),
    include_str!("../machines/ab-or-abc.nfa"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<Automaton>> = RwLock::new(Vec::new());
}

pub struct MachineManager;

impl MachineManager {
    /// Initialize the MachineManager with the embedded machine definitions
    pub fn load() -> Result<(), NfaMachineError> {
        // Load embedded machines first
        let mut machines = Vec::new();

        for machine_text in MACHINE_TEXTS {
            if let Ok(automaton) = crate::parser::parse(machine_text) {
                machines.push(automaton);
            } else {
                eprintln!("Failed to parse machine");
            }
        }

        // Store the loaded machines
        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        } else {
            return Err(NfaMachineError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available machines
    pub fn get_machine_count() -> usize {
        // Initialize with default machines if not already initialized
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn get_machine_by_index(index: usize) -> Result<Automaton, NfaMachineError> {
        // Initialize with default machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| NfaMachineError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                NfaMachineError::MachineNotFound(format!("index {} out of range", index))
            })
    }

    /// Get a machine by its name
    pub fn get_machine_by_name(name: &str) -> Result<Automaton, NfaMachineError> {
        // Initialize with default machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| NfaMachineError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|automaton| automaton.name() == name)
            .cloned()
            .ok_or_else(|| NfaMachineError::MachineNotFound(format!("'{}'", name)))
    }

    /// List all machine names
    pub fn list_machine_names() -> Vec<String> {
        // Initialize with default machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .map(|automaton| automaton.name().to_string())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a machine by its index
    pub fn get_machine_info(index: usize) -> Result<MachineInfo, NfaMachineError> {
        let automaton = Self::get_machine_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: automaton.name().to_string(),
            init: automaton.init().to_string(),
            node_count: automaton.nodes().len(),
            transition_count: automaton.transitions().len(),
            deterministic: automaton.is_deterministic(),
        })
    }

    /// Search for machines by name
    pub fn search_machines(query: &str) -> Vec<usize> {
        // Initialize with default machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .enumerate()
                    .filter(|(_, automaton)| {
                        automaton
                            .name()
                            .to_lowercase()
                            .contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original text of a machine by its index
    pub fn get_machine_text_by_index(index: usize) -> Result<&'static str, NfaMachineError> {
        // Initialize with default machines if not already initialized
        let _ = Self::load();

        MACHINE_TEXTS.get(index).cloned().ok_or_else(|| {
            NfaMachineError::MachineNotFound(format!("text index {} out of range", index))
        })
    }
}

#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub init: String,
    pub node_count: usize,
    pub transition_count: usize,
    pub deterministic: bool,
}

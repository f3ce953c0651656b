//! This module provides the `AutomatonLoader` struct, responsible for loading automaton
//! definitions from various sources, including files and strings.

use crate::automaton::Automaton;
use crate::parser::parse;
use crate::types::{Definition, NfaMachineError, MAX_DEFINITION_SIZE};
use std::fs;
use std::path::{Path, PathBuf};

/// `AutomatonLoader` is a utility struct for loading automaton definitions.
/// It provides methods to load definitions from individual files, from string
/// content, and to discover and load all definition files within a specified
/// directory. Files ending in `.nfa` hold the sectioned text format; files
/// ending in `.json` hold a serialized [`Definition`].
pub struct AutomatonLoader;

impl AutomatonLoader {
    /// Loads a single automaton from the specified file path.
    ///
    /// The file format is picked by extension: `.json` files are deserialized,
    /// anything else is parsed as the text format. Files larger than
    /// `MAX_DEFINITION_SIZE` bytes are refused before any parsing happens.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the definition file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if the file is successfully read and parsed.
    /// * `Err(NfaMachineError::FileError)` if the file cannot be read or is too large.
    /// * `Err(NfaMachineError::ParseError)` if the content is not a valid definition.
    /// * `Err(NfaMachineError::MalformedAutomaton)` if the definition fails validation.
    pub fn load_automaton(path: &Path) -> Result<Automaton, NfaMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            NfaMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        if content.len() > MAX_DEFINITION_SIZE {
            return Err(NfaMachineError::FileError(format!(
                "Definition file {} exceeds {} bytes",
                path.display(),
                MAX_DEFINITION_SIZE
            )));
        }

        if path.extension().is_some_and(|ext| ext == "json") {
            let definition: Definition = serde_json::from_str(&content).map_err(|e| {
                NfaMachineError::MalformedAutomaton(format!("Invalid JSON definition: {e}"))
            })?;
            return Automaton::new(definition);
        }

        parse(&content)
    }

    /// Loads a single automaton from the provided string content.
    ///
    /// This is useful for parsing definitions that are not stored in files,
    /// e.g., from user input. The content is always treated as the text format.
    ///
    /// # Arguments
    ///
    /// * `content` - A string slice containing the automaton definition.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if the content is successfully parsed and validated.
    /// * `Err(NfaMachineError::ParseError)` if the content is not a valid definition.
    pub fn load_automaton_from_string(content: &str) -> Result<Automaton, NfaMachineError> {
        parse(content)
    }

    /// Loads all automaton definition files (`.nfa` or `.json`) from a given directory.
    ///
    /// It iterates through the directory, attempts to load each definition file,
    /// and collects the results. Directories and files with other extensions are
    /// skipped.
    ///
    /// # Arguments
    ///
    /// * `directory` - A reference to the `Path` of the directory to scan.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Automaton), NfaMachineError>>` - A vector where each
    ///   element is a `Result` indicating whether an automaton was successfully
    ///   loaded (containing its path and the `Automaton` itself) or if an error
    ///   occurred during loading (containing an `NfaMachineError`).
    pub fn load_automatons(
        directory: &Path,
    ) -> Vec<Result<(PathBuf, Automaton), NfaMachineError>> {
        if !directory.exists() {
            return vec![Err(NfaMachineError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(NfaMachineError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(NfaMachineError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and files in other formats
                if path.is_dir()
                    || path
                        .extension()
                        .is_none_or(|ext| ext != "nfa" && ext != "json")
                {
                    return None;
                }

                match Self::load_automaton(&path) {
                    Ok(automaton) => Some(Ok((path, automaton))),
                    Err(e) => Some(Err(NfaMachineError::FileError(format!(
                        "Failed to load automaton from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

//! This module provides encoding functionality for converting automatons into a
//! compact single-line string format suitable for sharing and embedding.

use crate::automaton::Automaton;
use crate::types::{Definition, Node, Transition};

/// Encodes an automaton into a single-line string.
///
/// Format: `name:init:accepting:nodes:transitions`
/// - name: The display name of the automaton.
/// - init: The id of the start node.
/// - accepting: Comma-separated accepting node ids.
/// - nodes: Comma-separated node entries in format `id` or `id=display`.
/// - transitions: Pipe-separated transitions in format `from,symbol,to`,
///   kept in declaration order.
///
/// The separators `:`, `,`, `|` and `=` are reserved: ids and display names
/// containing one are not escaped, and such automatons do not survive a
/// round trip.
///
/// # Arguments
///
/// * `automaton` - The automaton to encode.
///
/// # Returns
///
/// * `String` - The encoded automaton string.
pub fn encode(automaton: &Automaton) -> String {
    let nodes_section = encode_nodes(automaton);
    let transitions_section = encode_transitions(automaton);

    format!(
        "{}:{}:{}:{}:{}",
        automaton.name(),
        automaton.init(),
        automaton.accepting().join(","),
        nodes_section,
        transitions_section
    )
}

/// Encodes the nodes section as comma-separated entries.
///
/// A node whose display name equals its id is written as the bare id.
fn encode_nodes(automaton: &Automaton) -> String {
    automaton
        .nodes()
        .iter()
        .map(|node| {
            if node.name == node.id {
                node.id.clone()
            } else {
                format!("{}={}", node.id, node.name)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Encodes the transitions section as pipe-separated entries.
fn encode_transitions(automaton: &Automaton) -> String {
    automaton
        .transitions()
        .iter()
        .map(|transition| format!("{},{},{}", transition.from, transition.symbol, transition.to))
        .collect::<Vec<_>>()
        .join("|")
}

/// Decodes an encoded automaton string back into an `Automaton`.
///
/// The rebuilt definition goes through the usual validation, so a decoded
/// automaton is as trustworthy as a parsed one.
///
/// # Arguments
///
/// * `encoded` - The encoded automaton string in `name:init:accepting:nodes:transitions` format.
///
/// # Returns
///
/// * `Result<Automaton, String>` - The decoded automaton or an error message.
pub fn decode(encoded: &str) -> Result<Automaton, String> {
    let parts: Vec<&str> = encoded.split(':').collect();
    if parts.len() != 5 {
        return Err("Invalid encoding format: expected 5 sections separated by :".to_string());
    }

    let name = parts[0];
    let init = parts[1];
    let accepting_section = parts[2];
    let nodes_section = parts[3];
    let transitions_section = parts[4];

    let nodes = decode_nodes(nodes_section);
    let transitions = decode_transitions(transitions_section)?;

    let accepting = if accepting_section.is_empty() {
        Vec::new()
    } else {
        accepting_section.split(',').map(String::from).collect()
    };

    let definition = Definition {
        name: name.to_string(),
        nodes,
        transitions,
        init: init.to_string(),
        accepting,
    };

    Automaton::new(definition).map_err(|e| e.to_string())
}

/// Decodes the nodes section into node entries.
fn decode_nodes(nodes_section: &str) -> Vec<Node> {
    if nodes_section.is_empty() {
        return Vec::new();
    }

    nodes_section
        .split(',')
        .map(|entry| match entry.split_once('=') {
            Some((id, name)) => Node {
                id: id.to_string(),
                name: name.to_string(),
            },
            None => Node {
                id: entry.to_string(),
                name: String::new(),
            },
        })
        .collect()
}

/// Decodes the transitions section into transition entries.
fn decode_transitions(transitions_section: &str) -> Result<Vec<Transition>, String> {
    let mut transitions = Vec::new();

    if transitions_section.is_empty() {
        return Ok(transitions);
    }

    for entry in transitions_section.split('|') {
        let parts: Vec<&str> = entry.split(',').collect();
        if parts.len() != 3 {
            return Err(format!("Invalid transition format: {}", entry));
        }

        transitions.push(Transition {
            from: parts[0].to_string(),
            symbol: parts[1].chars().next().unwrap_or(' '),
            to: parts[2].to_string(),
        });
    }

    Ok(transitions)
}

//! This module provides the parser for automaton definitions, utilizing the `pest` crate.
//! It defines the grammar for `.nfa` files and functions to parse the input into a
//! validated `Automaton`.

use crate::{
    automaton::Automaton,
    types::{Definition, NfaMachineError, Node, Transition},
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::Pair,
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the automaton grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct AutomatonParser;

/// Parses the given input string into a validated `Automaton`.
///
/// This is the main entry point for parsing automaton definitions. It trims the
/// input, parses it using the `AutomatonParser`, and then processes the resulting
/// parse tree into a `Definition`. The definition is validated before being
/// returned, so a successful parse always yields a usable automaton.
///
/// # Arguments
///
/// * `input` - A string slice containing the automaton definition.
///
/// # Returns
///
/// * `Ok(Automaton)` if the input is successfully parsed and validated.
/// * `Err(NfaMachineError::ParseError)` if there are any syntax errors.
/// * `Err(NfaMachineError::MalformedAutomaton)` if a section is missing or the
///   definition fails validation.
pub fn parse(input: &str) -> Result<Automaton, NfaMachineError> {
    let root = AutomatonParser::parse(Rule::automaton, input.trim())
        .map_err(|e| NfaMachineError::ParseError(e.into()))? //
        .next()
        .unwrap();

    let definition = parse_definition(root)?;

    Automaton::new(definition)
}

/// Parses the top-level structure of an automaton from a `Pair<Rule::automaton>`.
///
/// This function extracts the name, nodes, start node, accepting nodes, and
/// transitions, and performs uniqueness and presence checks on the sections.
fn parse_definition(pair: Pair<Rule>) -> Result<Definition, NfaMachineError> {
    let mut name: Option<String> = None;
    let mut nodes: Option<Vec<Node>> = None;
    let mut transitions: Option<Vec<Transition>> = None;
    let mut init: Option<String> = None;
    let mut accepting: Option<Vec<String>> = None;
    let mut seen = HashSet::new();

    // Parse top-level sections
    for p in pair.into_inner() {
        let span = p.as_span();
        let rule = p.as_rule();

        check_unique_rule(rule, span, &mut seen)?;

        match rule {
            Rule::name => name = Some(parse_text(p)),
            Rule::init => init = Some(parse_text(p)),
            Rule::accepting => accepting = Some(parse_accepting(p)),
            Rule::nodes => nodes = Some(parse_nodes(p)),
            Rule::transitions => transitions = Some(parse_transitions(p)),
            _ => {} // Skip other rules
        }
    }

    // Handle mandatory checks
    let name = check_required_rule(name, "name")?;
    let nodes = check_required_rule(nodes, "nodes")?;
    let transitions = check_required_rule(transitions, "transitions")?;

    // The first declared node is the start node when no init section names one.
    let init = init
        .or_else(|| nodes.first().map(|node| node.id.clone()))
        .unwrap_or_default();

    Ok(Definition {
        name,
        nodes,
        transitions,
        init,
        accepting: accepting.unwrap_or_default(),
    })
}

/// Parses the node declarations from a `Pair<Rule::nodes>`.
///
/// Each declaration is an id with an optional display name after a colon. A
/// missing display name is left empty here and filled in during validation.
fn parse_nodes(pair: Pair<Rule>) -> Vec<Node> {
    let mut nodes = Vec::new();

    // Rule: nodes > [node_decl > ident ~ text?]
    for decl in pair.into_inner() {
        if decl.as_rule() != Rule::node_decl {
            continue;
        }

        let mut pairs = decl.into_inner();
        let id = pairs.next().unwrap().as_str().to_string();
        let name = pairs
            .next()
            .map(|p| p.as_str().trim().to_string())
            .unwrap_or_default();

        nodes.push(Node { id, name });
    }

    nodes
}

/// Parses the transition declarations from a `Pair<Rule::transitions>`.
///
/// Declaration order is preserved; it is the tie-break order for automatic
/// exploration.
fn parse_transitions(pair: Pair<Rule>) -> Vec<Transition> {
    let mut transitions = Vec::new();

    // Rule: transitions > [transition_decl > ident ~ symbol ~ ident]
    for decl in pair.into_inner() {
        if decl.as_rule() != Rule::transition_decl {
            continue;
        }

        let mut pairs = decl.into_inner();
        let from = pairs.next().unwrap().as_str().to_string();
        let symbol = parse_symbol(pairs.next().unwrap().as_str());
        let to = pairs.next().unwrap().as_str().to_string();

        transitions.push(Transition { from, to, symbol });
    }

    transitions
}

/// Parses the accepting node ids from a `Pair<Rule::accepting>`.
fn parse_accepting(pair: Pair<Rule>) -> Vec<String> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::ident)
        .map(|p| p.as_str().to_string())
        .collect()
}

/// Parses a single character symbol from a string.
fn parse_symbol(input: &str) -> char {
    input.chars().next().unwrap_or(' ')
}

/// Extracts the trimmed inner text content from a `Pair`.
fn parse_text(pair: Pair<Rule>) -> String {
    pair.into_inner().next().unwrap().as_str().trim().into()
}

/// Creates an `NfaMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> NfaMachineError {
    NfaMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Checks if a given section has already been declared, ensuring uniqueness.
fn check_unique_rule(
    rule: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), NfaMachineError> {
    if !matches!(
        rule,
        Rule::name | Rule::nodes | Rule::init | Rule::accepting | Rule::transitions
    ) {
        return Ok(());
    };

    if seen.contains(&rule) {
        return Err(parse_error(
            &format!("Duplicate \"{rule:?}:\" declaration"),
            span,
        ));
    }

    seen.insert(rule);

    Ok(())
}

/// Checks if a required section is present, returning an `Err` if it's missing.
fn check_required_rule<T>(value: Option<T>, name: &str) -> Result<T, NfaMachineError> {
    value.ok_or_else(|| NfaMachineError::MalformedAutomaton(format!("Missing '{name}' section")))
}

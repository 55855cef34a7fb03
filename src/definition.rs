//! This module defines the raw machine descriptions as they arrive from JSON:
//! one struct per machine class plus a kind-tagged union over the three.
//!
//! Descriptions are plain data. They are checked by the [`validator`] and
//! turned into runnable machines by [`Dfa::new`], [`Pda::new`], and
//! [`Dtm::new`]; until then nothing about them is assumed to be consistent.
//!
//! [`validator`]: crate::validator
//! [`Dfa::new`]: crate::Dfa::new
//! [`Pda::new`]: crate::Pda::new
//! [`Dtm::new`]: crate::Dtm::new

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::{Direction, MachineKind, State, Symbol, DEFAULT_BLANK_SYMBOL};

/// A machine description of any class, tagged by `"kind"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Definition {
    Dfa(DfaDefinition),
    Pda(PdaDefinition),
    Dtm(DtmDefinition),
}

impl Definition {
    /// The class of the described machine.
    pub fn kind(&self) -> MachineKind {
        match self {
            Definition::Dfa(_) => MachineKind::Dfa,
            Definition::Pda(_) => MachineKind::Pda,
            Definition::Dtm(_) => MachineKind::Dtm,
        }
    }

    /// The description's name; may be empty for anonymous descriptions.
    pub fn name(&self) -> &str {
        match self {
            Definition::Dfa(def) => &def.name,
            Definition::Pda(def) => &def.name,
            Definition::Dtm(def) => &def.name,
        }
    }
}

/// Describes a deterministic finite automaton.
///
/// The transition table maps each source state to the rules leaving it. A
/// rule list (rather than a symbol-keyed map) is used on purpose: duplicate
/// (state, symbol) keys survive deserialization, so validation can reject
/// them by name instead of letting the parser silently keep one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DfaDefinition {
    /// Display name of the machine.
    #[serde(default)]
    pub name: String,
    /// The full set of states.
    pub states: Vec<State>,
    /// The input alphabet.
    pub input_alphabet: Vec<Symbol>,
    /// Transition rules, keyed by source state. The table may be partial:
    /// a missing (state, symbol) entry rejects the input at run time.
    pub transitions: HashMap<State, Vec<DfaRule>>,
    /// The state the machine starts in.
    pub initial_state: State,
    /// The accepting states.
    pub final_states: Vec<State>,
}

impl DfaDefinition {
    /// Total number of transition rules in the table.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }
}

/// A single finite-automaton transition: consume `symbol`, move to
/// `next_state`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaRule {
    /// The input symbol consumed by this rule.
    pub symbol: Symbol,
    /// The state the machine transitions to.
    pub next_state: State,
}

/// Describes a deterministic pushdown automaton.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdaDefinition {
    /// Display name of the machine.
    #[serde(default)]
    pub name: String,
    /// The full set of states.
    pub states: Vec<State>,
    /// The input alphabet.
    pub input_alphabet: Vec<Symbol>,
    /// The stack alphabet; may overlap the input alphabet.
    pub stack_alphabet: Vec<Symbol>,
    /// Transition rules, keyed by source state.
    pub transitions: HashMap<State, Vec<PdaRule>>,
    /// The state the machine starts in.
    pub initial_state: State,
    /// The symbol the stack holds before the first step.
    pub initial_stack_symbol: Symbol,
    /// The accepting states. May be empty for empty-stack acceptance.
    #[serde(default)]
    pub final_states: Vec<State>,
    /// Acceptance mode name; parsed and checked during validation so an
    /// unknown mode is reported as a definition error, not a parse failure.
    #[serde(default = "default_acceptance_mode")]
    pub acceptance_mode: String,
}

impl PdaDefinition {
    /// Total number of transition rules in the table.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }
}

fn default_acceptance_mode() -> String {
    "final-state".to_string()
}

/// A single pushdown transition.
///
/// The rule applies when the machine is in the source state, `stack_top` is
/// on top of the stack, and, for consuming rules, `input` is the next input
/// symbol. Applying it removes the top when `pop` is set, then pushes `push`
/// in listed order: the first element ends up deepest, the last on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdaRule {
    /// The input symbol consumed, or absent for a spontaneous (ε) rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Symbol>,
    /// The symbol that must be on top of the stack.
    pub stack_top: Symbol,
    /// Whether the matched top is removed before pushing. Defaults to the
    /// classic pop-and-replace discipline.
    #[serde(default = "default_pop")]
    pub pop: bool,
    /// Symbols pushed after the optional pop, deepest first; empty for a
    /// bare pop or a pure state change.
    #[serde(default)]
    pub push: Vec<Symbol>,
    /// The state the machine transitions to.
    pub next_state: State,
}

fn default_pop() -> bool {
    true
}

impl PdaRule {
    /// The consumed input symbol, or `None` for a spontaneous rule. An
    /// explicit empty string is treated the same as an absent field.
    pub fn input_symbol(&self) -> Option<&Symbol> {
        self.input.as_ref().filter(|symbol| !symbol.is_empty())
    }

    /// Whether this rule consumes no input.
    pub fn is_spontaneous(&self) -> bool {
        self.input_symbol().is_none()
    }
}

/// Describes a deterministic Turing machine with a single, unbounded tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtmDefinition {
    /// Display name of the machine.
    #[serde(default)]
    pub name: String,
    /// The full set of states.
    pub states: Vec<State>,
    /// The input alphabet.
    pub input_alphabet: Vec<Symbol>,
    /// The tape alphabet. When omitted it is derived as the input alphabet
    /// plus the blank symbol.
    #[serde(default)]
    pub tape_alphabet: Vec<Symbol>,
    /// Transition rules, keyed by source state.
    pub transitions: HashMap<State, Vec<DtmRule>>,
    /// The state the machine starts in.
    pub initial_state: State,
    /// The symbol filling unwritten tape cells.
    #[serde(default = "default_blank_symbol")]
    pub blank_symbol: Symbol,
    /// The accepting states.
    pub final_states: Vec<State>,
}

impl DtmDefinition {
    /// Total number of transition rules in the table.
    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(Vec::len).sum()
    }

    /// The tape alphabet actually in force: the declared one, or the input
    /// alphabet extended with the blank symbol when none was declared.
    pub fn effective_tape_alphabet(&self) -> Vec<Symbol> {
        if !self.tape_alphabet.is_empty() {
            return self.tape_alphabet.clone();
        }
        let mut symbols = self.input_alphabet.clone();
        if !symbols.contains(&self.blank_symbol) {
            symbols.push(self.blank_symbol.clone());
        }
        symbols
    }
}

fn default_blank_symbol() -> Symbol {
    DEFAULT_BLANK_SYMBOL.to_string()
}

/// A single Turing machine transition: on `read` under the head, write
/// `write`, move the head, and change state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtmRule {
    /// The tape symbol that must be under the head.
    pub read: Symbol,
    /// The tape symbol written over it.
    pub write: Symbol,
    /// Where the head moves afterwards.
    pub direction: Direction,
    /// The state the machine transitions to.
    pub next_state: State,
}

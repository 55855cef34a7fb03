//! This module defines the core data structures and types used throughout the automata
//! engine, including alphabets, verdicts, acceptance modes, directions, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The default blank symbol used on Turing machine tapes.
pub const DEFAULT_BLANK_SYMBOL: &str = "_";
/// The default number of steps a Turing machine may take before the run is
/// judged non-halting.
pub const DEFAULT_DTM_MAX_STEPS: usize = 10000;
/// Base step allowance for a pushdown run, independent of input length.
pub const PDA_STEP_BASE: usize = 1000;
/// Additional steps granted to a pushdown run per input symbol.
pub const PDA_STEP_FACTOR: usize = 100;

/// A machine state, referenced by name.
pub type State = String;
/// A symbol from one of a machine's alphabets. Symbols may span several
/// characters; input strings are tokenized against the declared alphabet.
pub type Symbol = String;

/// The default step bound for a pushdown run over `input_len` symbols.
///
/// The bound is an engineering safeguard against spontaneous-transition
/// loops, not part of pushdown semantics; callers can override it.
pub fn default_pda_step_limit(input_len: usize) -> usize {
    PDA_STEP_BASE + PDA_STEP_FACTOR * input_len
}

/// An ordered set of distinct, non-empty symbols.
///
/// Declaration order is preserved (it drives graph export and error
/// messages); membership checks and tokenization treat it as a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: Vec<Symbol>,
}

impl Alphabet {
    /// Builds an alphabet from declared symbols, rejecting empty and
    /// duplicate entries. `name` identifies the alphabet in errors
    /// (`"input"`, `"stack"`, `"tape"`).
    pub fn new(name: &'static str, symbols: &[Symbol]) -> Result<Self, DefinitionError> {
        let mut seen: Vec<&str> = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            if symbol.is_empty() {
                return Err(DefinitionError::EmptySymbol { alphabet: name });
            }
            if seen.contains(&symbol.as_str()) {
                return Err(DefinitionError::DuplicateSymbol {
                    alphabet: name,
                    symbol: symbol.clone(),
                });
            }
            seen.push(symbol);
        }
        Ok(Self {
            symbols: symbols.to_vec(),
        })
    }

    /// Returns `true` if `symbol` is a member of this alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|s| s == symbol)
    }

    /// The declared symbols, in declaration order.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Splits `input` into a sequence of alphabet symbols.
    ///
    /// At each position the longest declared symbol that prefixes the rest
    /// of the input wins; for single-character alphabets this degenerates to
    /// plain character splitting. The returned slices borrow from the
    /// alphabet, not from `input`.
    pub fn tokenize<'a>(&'a self, input: &str) -> Result<Vec<&'a str>, InputError> {
        let mut tokens = Vec::new();
        let mut rest = input;
        let mut offset = 0;
        while !rest.is_empty() {
            let matched = self
                .symbols
                .iter()
                .filter(|symbol| rest.starts_with(symbol.as_str()))
                .max_by_key(|symbol| symbol.len());
            match matched {
                Some(symbol) => {
                    tokens.push(symbol.as_str());
                    offset += symbol.len();
                    rest = &rest[symbol.len()..];
                }
                None => {
                    return Err(InputError::SymbolNotInAlphabet {
                        offset,
                        fragment: rest.chars().take(8).collect(),
                    });
                }
            }
        }
        Ok(tokens)
    }
}

/// The class of a machine description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineKind {
    Dfa,
    Pda,
    Dtm,
}

impl fmt::Display for MachineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MachineKind::Dfa => "DFA",
            MachineKind::Pda => "PDA",
            MachineKind::Dtm => "DTM",
        };
        f.write_str(name)
    }
}

/// The outcome of running a machine over an input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// The machine halted and the input belongs to its language.
    Accepted,
    /// The machine halted without accepting the input.
    Rejected,
    /// The step bound was exhausted before the machine halted. Says nothing
    /// about whether it ever would.
    NonHalting,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verdict::Accepted => "accepted",
            Verdict::Rejected => "rejected",
            Verdict::NonHalting => "non-halting",
        };
        f.write_str(name)
    }
}

/// The outcome of a single execution step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A rule applied and the machine continues.
    Continue,
    /// No rule applies in the current configuration.
    Halted,
}

/// How a pushdown automaton decides acceptance once its input is consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AcceptanceMode {
    /// Accept when the machine rests in a final state.
    #[default]
    FinalState,
    /// Accept when the stack has been emptied.
    EmptyStack,
    /// Accept only when both conditions hold at once.
    FinalStateAndEmptyStack,
}

impl FromStr for AcceptanceMode {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "final-state" => Ok(AcceptanceMode::FinalState),
            "empty-stack" => Ok(AcceptanceMode::EmptyStack),
            // "both" is the name some descriptions use for the combined mode.
            "final-state-and-empty-stack" | "both" => Ok(AcceptanceMode::FinalStateAndEmptyStack),
            other => Err(DefinitionError::InvalidAcceptanceMode(other.to_string())),
        }
    }
}

impl fmt::Display for AcceptanceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AcceptanceMode::FinalState => "final-state",
            AcceptanceMode::EmptyStack => "empty-stack",
            AcceptanceMode::FinalStateAndEmptyStack => "final-state-and-empty-stack",
        };
        f.write_str(name)
    }
}

/// Represents the possible directions a Turing machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Move the head one position to the left.
    #[serde(alias = "L")]
    Left,
    /// Move the head one position to the right.
    #[serde(alias = "R")]
    Right,
    /// Keep the head in the same position.
    #[serde(alias = "S")]
    Stay,
}

impl Direction {
    /// Single-letter form used in transition labels.
    pub fn letter(&self) -> &'static str {
        match self {
            Direction::Left => "L",
            Direction::Right => "R",
            Direction::Stay => "S",
        }
    }
}

/// Represents violations of the construction rules for a machine
/// description. Each variant names the offending state, symbol, or key.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    /// A state name appears more than once in the state set.
    #[error("duplicate state {0:?} in the state set")]
    DuplicateState(State),
    /// A state name is the empty string.
    #[error("state names must be non-empty")]
    EmptyState,
    /// A symbol appears more than once in one alphabet.
    #[error("duplicate symbol {symbol:?} in the {alphabet} alphabet")]
    DuplicateSymbol {
        alphabet: &'static str,
        symbol: Symbol,
    },
    /// An alphabet declares the empty string as a symbol.
    #[error("empty symbol in the {alphabet} alphabet")]
    EmptySymbol { alphabet: &'static str },
    /// The initial state is not a member of the state set.
    #[error("initial state {0:?} is not in the state set")]
    UnknownInitialState(State),
    /// A final state is not a member of the state set.
    #[error("final state {0:?} is not in the state set")]
    UnknownFinalState(State),
    /// A transition table key refers to a state outside the state set.
    #[error("transition source state {0:?} is not in the state set")]
    UnknownSourceState(State),
    /// A transition targets a state outside the state set.
    #[error("transition from {state:?} targets unknown state {next_state:?}")]
    UnknownNextState { state: State, next_state: State },
    /// A transition reads, pops, pushes, or writes a symbol outside the
    /// named alphabet.
    #[error("transition from {state:?} uses symbol {symbol:?} outside the {alphabet} alphabet")]
    UnknownTransitionSymbol {
        state: State,
        symbol: Symbol,
        alphabet: &'static str,
    },
    /// The initial stack symbol is not in the stack alphabet.
    #[error("initial stack symbol {0:?} is not in the stack alphabet")]
    UnknownInitialStackSymbol(Symbol),
    /// The blank symbol is not in the tape alphabet.
    #[error("blank symbol {0:?} is not in the tape alphabet")]
    UnknownBlankSymbol(Symbol),
    /// The blank symbol was declared as an input symbol.
    #[error("blank symbol {0:?} must not be part of the input alphabet")]
    BlankInInputAlphabet(Symbol),
    /// An input symbol is missing from the tape alphabet.
    #[error("input symbol {0:?} is missing from the tape alphabet")]
    InputSymbolNotOnTape(Symbol),
    /// The acceptance mode string is not one of the recognized modes.
    #[error("unknown acceptance mode {0:?}")]
    InvalidAcceptanceMode(String),
    /// Two transitions share the same (state, symbol) key.
    #[error("duplicate transition for state {state:?} on symbol {symbol:?}")]
    DuplicateTransition { state: State, symbol: Symbol },
    /// Two pushdown transitions share the same (state, input, stack top) key.
    #[error("duplicate transition for state {state:?} reading {input} with stack top {stack_top:?}")]
    DuplicatePdaTransition {
        state: State,
        input: String,
        stack_top: Symbol,
    },
    /// A spontaneous transition and a consuming transition share the same
    /// (state, stack top) pair, so the machine would have a choice.
    #[error("state {state:?} with stack top {stack_top:?} mixes a spontaneous rule with reading rules")]
    EpsilonConflict { state: State, stack_top: Symbol },
}

/// Represents a failure to tokenize an input string against a machine's
/// input alphabet. Distinct from rejection: the string is not even a
/// sequence of input symbols.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    /// No declared symbol matches the input at the given byte offset.
    #[error("input does not match any alphabet symbol at byte {offset} (near {fragment:?})")]
    SymbolNotInAlphabet { offset: usize, fragment: String },
}

/// Represents the errors that can occur while loading and running machines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AutomatonError {
    /// The description is structurally sound but violates a construction rule.
    #[error("definition error: {0}")]
    Definition(#[from] DefinitionError),
    /// The input string is not a sequence of input-alphabet symbols.
    #[error("input error: {0}")]
    Input(#[from] InputError),
    /// The description text is not well-formed.
    #[error("malformed definition: {0}")]
    Malformed(String),
    /// A file system failure while reading definition files.
    #[error("file error: {0}")]
    File(String),
    /// A catalog lookup that matched nothing.
    #[error("machine not found: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for AutomatonError {
    fn from(err: serde_json::Error) -> Self {
        AutomatonError::Malformed(err.to_string())
    }
}

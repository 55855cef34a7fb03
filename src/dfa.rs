//! This module defines the `Dfa` struct, a validated deterministic finite
//! automaton, and `DfaExecution`, a single run of one over an input string.
//! A finite automaton holds no auxiliary storage, so a run is a single pass
//! over the tokenized input.

use std::collections::HashSet;

use crate::definition::{DfaDefinition, DfaRule};
use crate::graph::{self, GraphView};
use crate::types::{Alphabet, DefinitionError, InputError, State, Step, Verdict};
use crate::validator;

/// A validated deterministic finite automaton.
///
/// Construction checks the description once; afterwards the machine is
/// immutable and any number of inputs can be run against it.
#[derive(Debug, Clone)]
pub struct Dfa {
    definition: DfaDefinition,
    input_alphabet: Alphabet,
    final_states: HashSet<State>,
}

impl Dfa {
    /// Builds a machine from a description, validating it first.
    ///
    /// # Arguments
    ///
    /// * `definition` - The description to validate and wrap.
    ///
    /// # Returns
    ///
    /// * `Ok(Dfa)` if the description satisfies every construction rule.
    /// * `Err(DefinitionError)` naming the first violation otherwise.
    pub fn new(definition: DfaDefinition) -> Result<Self, DefinitionError> {
        validator::validate_dfa(&definition)?;
        let input_alphabet = Alphabet::new("input", &definition.input_alphabet)?;
        let final_states = definition.final_states.iter().cloned().collect();
        Ok(Self {
            definition,
            input_alphabet,
            final_states,
        })
    }

    /// Runs the machine over `input` and returns the verdict.
    ///
    /// One symbol is consumed per step. The transition table may be partial:
    /// a missing (state, symbol) entry rejects immediately. A finite
    /// automaton always halts, so the verdict is never
    /// [`Verdict::NonHalting`].
    pub fn run(&self, input: &str) -> Result<Verdict, InputError> {
        let mut execution = self.execution(input)?;
        Ok(execution.run())
    }

    /// Starts a resumable execution over `input`.
    pub fn execution(&self, input: &str) -> Result<DfaExecution<'_>, InputError> {
        let tokens = self.input_alphabet.tokenize(input)?;
        Ok(DfaExecution::new(self, tokens))
    }

    /// Finds the rule for the given state and symbol, if the table has one.
    fn rule(&self, state: &str, symbol: &str) -> Option<&DfaRule> {
        self.definition
            .transitions
            .get(state)?
            .iter()
            .find(|rule| rule.symbol == symbol)
    }

    /// The validated description this machine was built from.
    pub fn definition(&self) -> &DfaDefinition {
        &self.definition
    }

    /// The machine's display name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The machine's states and transitions as a renderable graph.
    pub fn graph(&self) -> GraphView {
        graph::dfa_graph(&self.definition)
    }
}

/// A single run of a [`Dfa`] over one input string.
///
/// The execution borrows the machine: the current state and the remaining
/// input are `&str`s pointing into the machine's definition. Every step
/// consumes one symbol, so the run takes at most as many steps as the input
/// has symbols and no step bound is needed.
#[derive(Debug)]
pub struct DfaExecution<'m> {
    machine: &'m Dfa,
    tokens: Vec<&'m str>,
    cursor: usize,
    state: &'m str,
    step_count: usize,
}

impl<'m> DfaExecution<'m> {
    fn new(machine: &'m Dfa, tokens: Vec<&'m str>) -> Self {
        Self {
            machine,
            tokens,
            cursor: 0,
            state: machine.definition.initial_state.as_str(),
            step_count: 0,
        }
    }

    /// Executes a single step: consume the next input symbol and follow the
    /// matching table entry.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule applied.
    /// * `Step::Halted` if the input is exhausted or the table has no entry.
    pub fn step(&mut self) -> Step {
        let machine = self.machine;
        let Some(&symbol) = self.tokens.get(self.cursor) else {
            return Step::Halted;
        };
        let Some(rule) = machine.rule(self.state, symbol) else {
            return Step::Halted;
        };

        self.cursor += 1;
        self.state = rule.next_state.as_str();
        self.step_count += 1;

        Step::Continue
    }

    /// Runs until the machine halts and returns the verdict.
    pub fn run(&mut self) -> Verdict {
        while let Step::Continue = self.step() {}

        if self.is_accepting() {
            Verdict::Accepted
        } else {
            Verdict::Rejected
        }
    }

    /// Whether the input is fully consumed and the machine sits on a final
    /// state.
    pub fn is_accepting(&self) -> bool {
        self.cursor == self.tokens.len() && self.machine.final_states.contains(self.state)
    }

    /// Whether no further step is possible in the current configuration.
    pub fn is_halted(&self) -> bool {
        match self.tokens.get(self.cursor) {
            Some(&symbol) => self.machine.rule(self.state, symbol).is_none(),
            None => true,
        }
    }

    /// Returns the current state of the execution.
    pub fn state(&self) -> &str {
        self.state
    }

    /// The input symbols not yet consumed.
    pub fn remaining_input(&self) -> &[&'m str] {
        &self.tokens[self.cursor..]
    }

    /// Returns the total number of steps executed so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DfaRule;
    use std::collections::HashMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn table(rules: &[(&str, &str, &str)]) -> HashMap<State, Vec<DfaRule>> {
        let mut table: HashMap<State, Vec<DfaRule>> = HashMap::new();
        for (state, symbol, next_state) in rules {
            table.entry(state.to_string()).or_default().push(DfaRule {
                symbol: symbol.to_string(),
                next_state: next_state.to_string(),
            });
        }
        table
    }

    /// Accepts strings over {a, b} with an even number of 'a's.
    fn even_as() -> Dfa {
        Dfa::new(DfaDefinition {
            name: "even-as".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["a", "b"]),
            transitions: table(&[
                ("q0", "a", "q1"),
                ("q0", "b", "q0"),
                ("q1", "a", "q0"),
                ("q1", "b", "q1"),
            ]),
            initial_state: "q0".to_string(),
            final_states: strings(&["q0"]),
        })
        .unwrap()
    }

    #[test]
    fn test_accepts_even_number_of_as() {
        let machine = even_as();

        assert_eq!(machine.run("").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("aa").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("abab").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("bbb").unwrap(), Verdict::Accepted);
    }

    #[test]
    fn test_rejects_odd_number_of_as() {
        let machine = even_as();

        assert_eq!(machine.run("a").unwrap(), Verdict::Rejected);
        assert_eq!(machine.run("aaa").unwrap(), Verdict::Rejected);
        assert_eq!(machine.run("aba").unwrap(), Verdict::Rejected);
        assert_eq!(machine.run("baaa").unwrap(), Verdict::Rejected);
    }

    #[test]
    fn test_runs_are_independent() {
        let machine = even_as();

        // The machine is immutable; earlier runs must not leak into later ones.
        assert_eq!(machine.run("a").unwrap(), Verdict::Rejected);
        assert_eq!(machine.run("").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("a").unwrap(), Verdict::Rejected);
    }

    #[test]
    fn test_missing_entry_rejects() {
        // Only (q0, a) is defined; everything else falls off the table.
        let machine = Dfa::new(DfaDefinition {
            name: "one-a".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["a", "b"]),
            transitions: table(&[("q0", "a", "q1")]),
            initial_state: "q0".to_string(),
            final_states: strings(&["q1"]),
        })
        .unwrap();

        assert_eq!(machine.run("a").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("b").unwrap(), Verdict::Rejected);
        assert_eq!(machine.run("ab").unwrap(), Verdict::Rejected);
        assert_eq!(machine.run("aa").unwrap(), Verdict::Rejected);
    }

    #[test]
    fn test_unknown_input_symbol_is_an_error_not_a_rejection() {
        let machine = even_as();

        let err = machine.run("abxa").unwrap_err();
        assert_eq!(
            err,
            InputError::SymbolNotInAlphabet {
                offset: 2,
                fragment: "xa".to_string(),
            }
        );
    }

    #[test]
    fn test_multi_character_symbols() {
        // Alphabet {ab, b}: "abb" tokenizes as [ab, b], never [a, ...].
        let machine = Dfa::new(DfaDefinition {
            name: "pairs".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["ab", "b"]),
            transitions: table(&[("q0", "ab", "q1"), ("q1", "b", "q1")]),
            initial_state: "q0".to_string(),
            final_states: strings(&["q1"]),
        })
        .unwrap();

        assert_eq!(machine.run("abb").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("abbb").unwrap(), Verdict::Accepted);
        assert_eq!(machine.run("b").unwrap(), Verdict::Rejected);
    }

    #[test]
    fn test_step_by_step_exposes_configurations() {
        let machine = even_as();
        let mut execution = machine.execution("ab").unwrap();

        assert_eq!(execution.state(), "q0");
        assert_eq!(execution.remaining_input(), &["a", "b"]);

        assert_eq!(execution.step(), Step::Continue);
        assert_eq!(execution.state(), "q1");
        assert_eq!(execution.remaining_input(), &["b"]);
        assert!(!execution.is_accepting());

        assert_eq!(execution.step(), Step::Continue);
        assert_eq!(execution.state(), "q1");
        assert!(execution.is_halted());
        assert!(!execution.is_accepting());

        assert_eq!(execution.step(), Step::Halted);
        assert_eq!(execution.step_count(), 2);
    }

    #[test]
    fn test_halts_mid_input_on_a_missing_entry() {
        let machine = Dfa::new(DfaDefinition {
            name: "one-a".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["a", "b"]),
            transitions: table(&[("q0", "a", "q1")]),
            initial_state: "q0".to_string(),
            final_states: strings(&["q1"]),
        })
        .unwrap();

        let mut execution = machine.execution("ab").unwrap();
        assert_eq!(execution.step(), Step::Continue);
        assert_eq!(execution.step(), Step::Halted);

        // Halted with input left over: q1 is final but "b" was never read.
        assert_eq!(execution.remaining_input(), &["b"]);
        assert!(!execution.is_accepting());
        assert_eq!(execution.run(), Verdict::Rejected);
    }

    #[test]
    fn test_invalid_definition_is_refused() {
        let result = Dfa::new(DfaDefinition {
            name: String::new(),
            states: strings(&["q0"]),
            input_alphabet: strings(&["a"]),
            transitions: table(&[("q0", "a", "q9")]),
            initial_state: "q0".to_string(),
            final_states: vec![],
        });

        assert_eq!(
            result.unwrap_err(),
            DefinitionError::UnknownNextState {
                state: "q0".to_string(),
                next_state: "q9".to_string(),
            }
        );
    }
}

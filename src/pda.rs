//! This module defines the `Pda` struct, a validated deterministic pushdown
//! automaton, and `PdaExecution`, a single run of one over an input string.
//! It handles spontaneous transitions, stack operations, and the three
//! acceptance modes.

use std::collections::HashSet;

use crate::definition::{PdaDefinition, PdaRule};
use crate::graph::{self, GraphView};
use crate::types::{
    default_pda_step_limit, AcceptanceMode, Alphabet, DefinitionError, InputError, State, Step,
    Verdict,
};
use crate::validator;

/// A validated deterministic pushdown automaton.
///
/// Construction checks the description once; afterwards the machine is
/// immutable. Runs happen in a separate [`PdaExecution`] that borrows the
/// machine, so one machine can serve any number of runs.
#[derive(Debug, Clone)]
pub struct Pda {
    definition: PdaDefinition,
    input_alphabet: Alphabet,
    mode: AcceptanceMode,
    final_states: HashSet<State>,
}

impl Pda {
    /// Builds a machine from a description, validating it first.
    ///
    /// # Arguments
    ///
    /// * `definition` - The description to validate and wrap.
    ///
    /// # Returns
    ///
    /// * `Ok(Pda)` if the description satisfies every construction rule.
    /// * `Err(DefinitionError)` naming the first violation otherwise.
    pub fn new(definition: PdaDefinition) -> Result<Self, DefinitionError> {
        validator::validate_pda(&definition)?;
        let input_alphabet = Alphabet::new("input", &definition.input_alphabet)?;
        let mode: AcceptanceMode = definition.acceptance_mode.parse()?;
        let final_states = definition.final_states.iter().cloned().collect();
        // Echoes of the definition carry the canonical mode name, not an alias.
        let mut definition = definition;
        definition.acceptance_mode = mode.to_string();
        Ok(Self {
            definition,
            input_alphabet,
            mode,
            final_states,
        })
    }

    /// Runs the machine over `input` with the default step bound for that
    /// input length (see [`default_pda_step_limit`]).
    pub fn run(&self, input: &str) -> Result<Verdict, InputError> {
        let mut execution = self.execution(input)?;
        Ok(execution.run())
    }

    /// Runs the machine over `input` with an explicit step bound.
    pub fn run_with_limit(&self, input: &str, max_steps: usize) -> Result<Verdict, InputError> {
        let mut execution = self.execution_with_limit(input, max_steps)?;
        Ok(execution.run())
    }

    /// Starts a resumable execution with the default step bound.
    pub fn execution(&self, input: &str) -> Result<PdaExecution<'_>, InputError> {
        let tokens = self.input_alphabet.tokenize(input)?;
        let max_steps = default_pda_step_limit(tokens.len());
        Ok(PdaExecution::new(self, tokens, max_steps))
    }

    /// Starts a resumable execution with an explicit step bound.
    pub fn execution_with_limit(
        &self,
        input: &str,
        max_steps: usize,
    ) -> Result<PdaExecution<'_>, InputError> {
        let tokens = self.input_alphabet.tokenize(input)?;
        Ok(PdaExecution::new(self, tokens, max_steps))
    }

    /// The acceptance mode this machine was declared with.
    pub fn acceptance_mode(&self) -> AcceptanceMode {
        self.mode
    }

    /// The validated description this machine was built from.
    pub fn definition(&self) -> &PdaDefinition {
        &self.definition
    }

    /// The machine's display name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The machine's states and transitions as a renderable graph.
    pub fn graph(&self) -> GraphView {
        graph::pda_graph(&self.definition)
    }

    /// Finds the rule for the given state, input symbol, and stack top.
    /// Spontaneous rules are looked up with `input = None`.
    fn rule(&self, state: &str, input: Option<&str>, stack_top: &str) -> Option<&PdaRule> {
        self.definition.transitions.get(state)?.iter().find(|rule| {
            rule.stack_top == stack_top && rule.input_symbol().map(String::as_str) == input
        })
    }
}

/// A single run of a [`Pda`] over one input string.
///
/// The execution borrows the machine: the current state, the stack symbols,
/// and the remaining input are all `&str`s pointing into the machine's
/// definition, so stepping allocates only when the stack grows. Determinism
/// means at most one rule applies per configuration, with spontaneous rules
/// taking priority.
#[derive(Debug)]
pub struct PdaExecution<'m> {
    machine: &'m Pda,
    tokens: Vec<&'m str>,
    cursor: usize,
    state: &'m str,
    stack: Vec<&'m str>,
    step_count: usize,
    max_steps: usize,
}

impl<'m> PdaExecution<'m> {
    fn new(machine: &'m Pda, tokens: Vec<&'m str>, max_steps: usize) -> Self {
        Self {
            machine,
            tokens,
            cursor: 0,
            state: machine.definition.initial_state.as_str(),
            stack: vec![machine.definition.initial_stack_symbol.as_str()],
            step_count: 0,
            max_steps,
        }
    }

    /// Executes a single step.
    ///
    /// The spontaneous rule for the current state and stack top applies
    /// first; otherwise the rule consuming the next input symbol does.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule applied.
    /// * `Step::Halted` if the stack is empty or no rule applies.
    pub fn step(&mut self) -> Step {
        let machine = self.machine;
        let Some(&top) = self.stack.last() else {
            return Step::Halted;
        };

        if let Some(rule) = machine.rule(self.state, None, top) {
            self.apply(rule);
            return Step::Continue;
        }

        if let Some(&symbol) = self.tokens.get(self.cursor) {
            if let Some(rule) = machine.rule(self.state, Some(symbol), top) {
                self.cursor += 1;
                self.apply(rule);
                return Step::Continue;
            }
        }

        Step::Halted
    }

    /// Removes the matched top when the rule pops, pushes the rule's symbols
    /// (first listed ends deepest, last on top), and moves to the next state.
    fn apply(&mut self, rule: &'m PdaRule) {
        if rule.pop {
            let popped = self.stack.pop();
            debug_assert!(popped.is_some(), "a rule matched on an empty stack");
        }

        for symbol in &rule.push {
            self.stack.push(symbol.as_str());
        }

        self.state = rule.next_state.as_str();
        self.step_count += 1;
    }

    /// Runs until the machine halts or the step bound is exhausted.
    ///
    /// A halted machine accepts or rejects by configuration; running out of
    /// steps yields [`Verdict::NonHalting`].
    pub fn run(&mut self) -> Verdict {
        while self.step_count < self.max_steps {
            if let Step::Halted = self.step() {
                return if self.is_accepting() {
                    Verdict::Accepted
                } else {
                    Verdict::Rejected
                };
            }
        }

        Verdict::NonHalting
    }

    /// Whether the current configuration satisfies the acceptance condition:
    /// the input is fully consumed and the machine's mode predicate holds.
    pub fn is_accepting(&self) -> bool {
        if self.cursor < self.tokens.len() {
            return false;
        }
        let on_final = self.machine.final_states.contains(self.state);
        match self.machine.mode {
            AcceptanceMode::FinalState => on_final,
            AcceptanceMode::EmptyStack => self.stack.is_empty(),
            AcceptanceMode::FinalStateAndEmptyStack => on_final && self.stack.is_empty(),
        }
    }

    /// Whether no further rule applies in the current configuration.
    pub fn is_halted(&self) -> bool {
        let Some(&top) = self.stack.last() else {
            return true;
        };
        if self.machine.rule(self.state, None, top).is_some() {
            return false;
        }
        match self.tokens.get(self.cursor) {
            Some(&symbol) => self.machine.rule(self.state, Some(symbol), top).is_none(),
            None => true,
        }
    }

    /// Returns the current state of the execution.
    pub fn state(&self) -> &str {
        self.state
    }

    /// The stack contents, bottom first; the last element is the top.
    pub fn stack(&self) -> &[&'m str] {
        &self.stack
    }

    /// The input symbols not yet consumed.
    pub fn remaining_input(&self) -> &[&'m str] {
        &self.tokens[self.cursor..]
    }

    /// Returns the total number of steps executed so far.
    pub fn step_count(&self) -> usize {
        self.step_count
    }

    /// The step bound this execution runs under.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }
}

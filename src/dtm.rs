//! This module defines the `Dtm` struct, a validated deterministic Turing
//! machine, and `DtmExecution`, a single run of one over an input string.
//! It handles tape growth in both directions, head movement, and the
//! halt-by-stuck acceptance rule.

use std::collections::HashSet;

use crate::definition::{DtmDefinition, DtmRule};
use crate::graph::{self, GraphView};
use crate::types::{
    Alphabet, DefinitionError, Direction, InputError, State, Step, Verdict, DEFAULT_DTM_MAX_STEPS,
};
use crate::validator;

/// A validated deterministic Turing machine with a single, unbounded tape.
///
/// Construction checks the description once; afterwards the machine is
/// immutable. Runs happen in a separate [`DtmExecution`] that borrows the
/// machine.
#[derive(Debug, Clone)]
pub struct Dtm {
    definition: DtmDefinition,
    input_alphabet: Alphabet,
    final_states: HashSet<State>,
}

impl Dtm {
    /// Builds a machine from a description, validating it first.
    ///
    /// # Arguments
    ///
    /// * `definition` - The description to validate and wrap.
    ///
    /// # Returns
    ///
    /// * `Ok(Dtm)` if the description satisfies every construction rule.
    /// * `Err(DefinitionError)` naming the first violation otherwise.
    pub fn new(definition: DtmDefinition) -> Result<Self, DefinitionError> {
        validator::validate_dtm(&definition)?;
        let input_alphabet = Alphabet::new("input", &definition.input_alphabet)?;
        let final_states = definition.final_states.iter().cloned().collect();
        // Echoes of the definition carry the derived tape alphabet.
        let mut definition = definition;
        definition.tape_alphabet = definition.effective_tape_alphabet();
        Ok(Self {
            definition,
            input_alphabet,
            final_states,
        })
    }

    /// Runs the machine over `input` with the default step bound
    /// ([`DEFAULT_DTM_MAX_STEPS`]).
    pub fn run(&self, input: &str) -> Result<Verdict, InputError> {
        self.run_with_limit(input, DEFAULT_DTM_MAX_STEPS)
    }

    /// Runs the machine over `input` with an explicit step bound.
    pub fn run_with_limit(&self, input: &str, max_steps: usize) -> Result<Verdict, InputError> {
        let mut execution = self.execution_with_limit(input, max_steps)?;
        Ok(execution.run())
    }

    /// Starts a resumable execution with the default step bound.
    pub fn execution(&self, input: &str) -> Result<DtmExecution<'_>, InputError> {
        self.execution_with_limit(input, DEFAULT_DTM_MAX_STEPS)
    }

    /// Starts a resumable execution with an explicit step bound.
    pub fn execution_with_limit(
        &self,
        input: &str,
        max_steps: usize,
    ) -> Result<DtmExecution<'_>, InputError> {
        let tokens = self.input_alphabet.tokenize(input)?;
        Ok(DtmExecution::new(self, tokens, max_steps))
    }

    /// The symbol filling unwritten tape cells.
    pub fn blank(&self) -> &str {
        &self.definition.blank_symbol
    }

    /// The validated description this machine was built from.
    pub fn definition(&self) -> &DtmDefinition {
        &self.definition
    }

    /// The machine's display name.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    /// The machine's states and transitions as a renderable graph.
    pub fn graph(&self) -> GraphView {
        graph::dtm_graph(&self.definition)
    }

    /// Finds the rule for the given state and read symbol, if one exists.
    fn rule(&self, state: &str, read: &str) -> Option<&DtmRule> {
        self.definition
            .transitions
            .get(state)?
            .iter()
            .find(|rule| rule.read == read)
    }
}

/// A single run of a [`Dtm`] over one input string.
///
/// The tape starts as the tokenized input (a single blank for the empty
/// string) and grows on demand: stepping left past the edge inserts a blank
/// at the front, moving right extends the back. Cells are `&str`s pointing
/// into the machine's definition, so stepping allocates only on growth.
#[derive(Debug)]
pub struct DtmExecution<'m> {
    machine: &'m Dtm,
    state: &'m str,
    tape: Vec<&'m str>,
    head: usize,
    step_count: usize,
    max_steps: usize,
}

impl<'m> DtmExecution<'m> {
    fn new(machine: &'m Dtm, tokens: Vec<&'m str>, max_steps: usize) -> Self {
        let mut tape = tokens;
        if tape.is_empty() {
            tape.push(machine.blank());
        }
        Self {
            machine,
            state: machine.definition.initial_state.as_str(),
            tape,
            head: 0,
            step_count: 0,
            max_steps,
        }
    }

    /// Executes a single step: read the cell under the head, apply the
    /// matching rule (write, move, change state), or halt if none matches.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a rule applied.
    /// * `Step::Halted` if the machine is stuck.
    pub fn step(&mut self) -> Step {
        let machine = self.machine;

        // Make sure the cell under the head exists before reading it.
        if self.head >= self.tape.len() {
            self.tape.resize(self.head + 1, machine.blank());
        }

        let Some(rule) = machine.rule(self.state, self.tape[self.head]) else {
            return Step::Halted;
        };

        self.tape[self.head] = rule.write.as_str();
        self.state = rule.next_state.as_str();

        match rule.direction {
            Direction::Left => {
                if self.head == 0 {
                    // Extend the tape to the left; the head stays on the
                    // fresh blank.
                    self.tape.insert(0, machine.blank());
                } else {
                    self.head -= 1;
                }
            }
            Direction::Right => {
                self.head += 1;
                if self.head >= self.tape.len() {
                    self.tape.push(machine.blank());
                }
            }
            Direction::Stay => {}
        }

        self.step_count += 1;

        Step::Continue
    }

    /// Runs until the machine halts or the step bound is exhausted.
    ///
    /// A stuck machine accepts exactly when it halted in a final state;
    /// running out of steps yields [`Verdict::NonHalting`].
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

    /// Whether the current state is a final state. Only meaningful once the
    /// machine has halted; a final state with an applicable rule keeps
    /// running.
    pub fn is_accepting(&self) -> bool {
        self.machine.final_states.contains(self.state)
    }

    /// Whether no rule matches the current state and cell.
    pub fn is_halted(&self) -> bool {
        self.machine.rule(self.state, self.current_symbol()).is_none()
    }

    /// Returns the current state of the execution.
    pub fn state(&self) -> &str {
        self.state
    }

    /// The tape contents written so far.
    pub fn tape(&self) -> &[&'m str] {
        &self.tape
    }

    /// The current head position, as an index into [`tape`](Self::tape).
    pub fn head(&self) -> usize {
        self.head
    }

    /// The symbol under the head; a blank if the head sits past the end.
    pub fn current_symbol(&self) -> &'m str {
        if self.head < self.tape.len() {
            self.tape[self.head]
        } else {
            self.machine.blank()
        }
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

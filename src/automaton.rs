//! This module defines the `Automaton` enum, a uniform surface over the
//! three machine classes. Callers that don't care which class a description
//! belongs to can build, run, and export through it alone.

use crate::definition::Definition;
use crate::dfa::Dfa;
use crate::dtm::Dtm;
use crate::graph::GraphView;
use crate::pda::Pda;
use crate::types::{DefinitionError, InputError, MachineKind, Verdict};

/// A validated machine of any class.
#[derive(Debug, Clone)]
pub enum Automaton {
    Dfa(Dfa),
    Pda(Pda),
    Dtm(Dtm),
}

impl Automaton {
    /// Builds and validates a machine from a description of any class.
    pub fn new(definition: Definition) -> Result<Self, DefinitionError> {
        match definition {
            Definition::Dfa(def) => Ok(Automaton::Dfa(Dfa::new(def)?)),
            Definition::Pda(def) => Ok(Automaton::Pda(Pda::new(def)?)),
            Definition::Dtm(def) => Ok(Automaton::Dtm(Dtm::new(def)?)),
        }
    }

    /// The machine's class.
    pub fn kind(&self) -> MachineKind {
        match self {
            Automaton::Dfa(_) => MachineKind::Dfa,
            Automaton::Pda(_) => MachineKind::Pda,
            Automaton::Dtm(_) => MachineKind::Dtm,
        }
    }

    /// The machine's display name.
    pub fn name(&self) -> &str {
        match self {
            Automaton::Dfa(machine) => machine.name(),
            Automaton::Pda(machine) => machine.name(),
            Automaton::Dtm(machine) => machine.name(),
        }
    }

    /// Runs the machine over `input` with its class's default step bound.
    pub fn run(&self, input: &str) -> Result<Verdict, InputError> {
        match self {
            Automaton::Dfa(machine) => machine.run(input),
            Automaton::Pda(machine) => machine.run(input),
            Automaton::Dtm(machine) => machine.run(input),
        }
    }

    /// Runs the machine over `input` with an explicit step bound.
    ///
    /// A finite automaton takes exactly one step per input symbol, so the
    /// bound only affects the pushdown and Turing classes.
    pub fn run_with_limit(&self, input: &str, max_steps: usize) -> Result<Verdict, InputError> {
        match self {
            Automaton::Dfa(machine) => machine.run(input),
            Automaton::Pda(machine) => machine.run_with_limit(input, max_steps),
            Automaton::Dtm(machine) => machine.run_with_limit(input, max_steps),
        }
    }

    /// The machine's states and transitions as a renderable graph.
    pub fn graph(&self) -> GraphView {
        match self {
            Automaton::Dfa(machine) => machine.graph(),
            Automaton::Pda(machine) => machine.graph(),
            Automaton::Dtm(machine) => machine.graph(),
        }
    }

    /// A copy of the validated description this machine was built from.
    pub fn definition(&self) -> Definition {
        match self {
            Automaton::Dfa(machine) => Definition::Dfa(machine.definition().clone()),
            Automaton::Pda(machine) => Definition::Pda(machine.definition().clone()),
            Automaton::Dtm(machine) => Definition::Dtm(machine.definition().clone()),
        }
    }

    /// Number of declared states.
    pub fn state_count(&self) -> usize {
        match self {
            Automaton::Dfa(machine) => machine.definition().states.len(),
            Automaton::Pda(machine) => machine.definition().states.len(),
            Automaton::Dtm(machine) => machine.definition().states.len(),
        }
    }

    /// Number of transition rules.
    pub fn transition_count(&self) -> usize {
        match self {
            Automaton::Dfa(machine) => machine.definition().transition_count(),
            Automaton::Pda(machine) => machine.definition().transition_count(),
            Automaton::Dtm(machine) => machine.definition().transition_count(),
        }
    }
}

impl From<Dfa> for Automaton {
    fn from(machine: Dfa) -> Self {
        Automaton::Dfa(machine)
    }
}

impl From<Pda> for Automaton {
    fn from(machine: Pda) -> Self {
        Automaton::Pda(machine)
    }
}

impl From<Dtm> for Automaton {
    fn from(machine: Dtm) -> Self {
        Automaton::Dtm(machine)
    }
}

//! This crate provides the core logic for a deterministic automata engine.
//! It includes modules for describing finite automata, pushdown automata, and
//! Turing machines, validating their descriptions, running them over input
//! strings, and managing a collection of predefined machines.

pub mod automaton;
pub mod catalog;
pub mod definition;
pub mod dfa;
pub mod dtm;
pub mod graph;
pub mod loader;
pub mod pda;
pub mod types;
pub mod validator;

/// Re-exports the `Automaton` enum from the automaton module.
pub use automaton::Automaton;
/// Re-exports `MachineInfo`, `Catalog`, and `MACHINES` from the catalog module.
pub use catalog::{Catalog, MachineInfo, MACHINES};
/// Re-exports the machine description types from the definition module.
pub use definition::{Definition, DfaDefinition, DtmDefinition, PdaDefinition};
/// Re-exports the `Dfa` struct and its execution type from the dfa module.
pub use dfa::{Dfa, DfaExecution};
/// Re-exports the `Dtm` struct and its execution type from the dtm module.
pub use dtm::{Dtm, DtmExecution};
/// Re-exports the renderable graph types from the graph module.
pub use graph::{GraphEdge, GraphState, GraphView};
/// Re-exports the `MachineLoader` struct from the loader module.
pub use loader::MachineLoader;
/// Re-exports the `Pda` struct and its execution type from the pda module.
pub use pda::{Pda, PdaExecution};
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    AcceptanceMode, AutomatonError, DefinitionError, Direction, InputError, MachineKind, Step,
    Verdict,
};
/// Re-exports the `validate` function from the validator module.
pub use validator::validate;

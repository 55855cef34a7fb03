//! This module checks machine descriptions against the construction rules before
//! any machine is built: declared sets are well-formed, every referenced state and
//! symbol is declared, and the transition table is deterministic.
//!
//! Checks run in a fixed order and the first violation wins, so a description
//! with several problems reports the most fundamental one.

use std::collections::{HashMap, HashSet};

use crate::definition::{Definition, DfaDefinition, DtmDefinition, PdaDefinition};
use crate::types::{AcceptanceMode, Alphabet, DefinitionError, State, Symbol};

/// Validates a description of any machine class.
///
/// # Arguments
///
/// * `definition` - A reference to the `Definition` to be checked.
///
/// # Returns
///
/// * `Ok(())` if the description satisfies every construction rule.
/// * `Err(DefinitionError)` naming the first offending state, symbol, or key.
pub fn validate(definition: &Definition) -> Result<(), DefinitionError> {
    match definition {
        Definition::Dfa(def) => validate_dfa(def),
        Definition::Pda(def) => validate_pda(def),
        Definition::Dtm(def) => validate_dtm(def),
    }
}

/// Validates a finite-automaton description: well-formed state and symbol
/// sets, declared states and symbols everywhere they are referenced, and at
/// most one rule per (state, symbol) key. The table may be partial.
pub fn validate_dfa(definition: &DfaDefinition) -> Result<(), DefinitionError> {
    [
        check_dfa_sets,
        check_dfa_states,
        check_dfa_symbols,
        check_dfa_determinism,
    ]
    .iter()
    .filter_map(|check| check(definition).err())
    .next()
    .map_or(Ok(()), Err)
}

/// Validates a pushdown description. On top of the set and membership rules
/// this enforces the two determinism conditions: at most one rule per
/// (state, input, stack top) key, and no state/stack-top pair that carries
/// both a spontaneous rule and consuming rules.
pub fn validate_pda(definition: &PdaDefinition) -> Result<(), DefinitionError> {
    [
        check_pda_sets,
        check_pda_mode,
        check_pda_states,
        check_pda_symbols,
        check_pda_determinism,
    ]
    .iter()
    .filter_map(|check| check(definition).err())
    .next()
    .map_or(Ok(()), Err)
}

/// Validates a Turing machine description: well-formed sets, a blank symbol
/// that lives on the tape but not in the input alphabet, input symbols
/// covered by the tape alphabet, and at most one rule per (state, read) key.
pub fn validate_dtm(definition: &DtmDefinition) -> Result<(), DefinitionError> {
    [
        check_dtm_sets,
        check_dtm_blank,
        check_dtm_states,
        check_dtm_symbols,
        check_dtm_determinism,
    ]
    .iter()
    .filter_map(|check| check(definition).err())
    .next()
    .map_or(Ok(()), Err)
}

/// Checks that state names are non-empty and pairwise distinct.
fn check_state_set(states: &[State]) -> Result<(), DefinitionError> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(states.len());
    for state in states {
        if state.is_empty() {
            return Err(DefinitionError::EmptyState);
        }
        if !seen.insert(state) {
            return Err(DefinitionError::DuplicateState(state.clone()));
        }
    }
    Ok(())
}

fn contains_state(states: &[State], state: &str) -> bool {
    states.iter().any(|s| s == state)
}

/// Checks the initial state and every final state against the state set.
fn check_initial_and_finals(
    states: &[State],
    initial_state: &State,
    final_states: &[State],
) -> Result<(), DefinitionError> {
    if !contains_state(states, initial_state) {
        return Err(DefinitionError::UnknownInitialState(initial_state.clone()));
    }
    final_states
        .iter()
        .find(|state| !contains_state(states, state))
        .map(|state| DefinitionError::UnknownFinalState(state.clone()))
        .map_or(Ok(()), Err)
}

/// Returns the transition table entries sorted by source state, so the first
/// reported violation does not depend on hash order.
fn sorted_rules<R>(table: &HashMap<State, Vec<R>>) -> Vec<(&State, &Vec<R>)> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by_key(|(state, _)| state.as_str());
    entries
}

fn describe_input(input: Option<&Symbol>) -> String {
    match input {
        Some(symbol) => format!("{:?}", symbol),
        None => "ε".to_string(),
    }
}

fn check_dfa_sets(definition: &DfaDefinition) -> Result<(), DefinitionError> {
    check_state_set(&definition.states)?;
    Alphabet::new("input", &definition.input_alphabet)?;
    Ok(())
}

fn check_dfa_states(definition: &DfaDefinition) -> Result<(), DefinitionError> {
    check_initial_and_finals(
        &definition.states,
        &definition.initial_state,
        &definition.final_states,
    )?;
    for (state, rules) in sorted_rules(&definition.transitions) {
        if !contains_state(&definition.states, state) {
            return Err(DefinitionError::UnknownSourceState(state.clone()));
        }
        for rule in rules {
            if !contains_state(&definition.states, &rule.next_state) {
                return Err(DefinitionError::UnknownNextState {
                    state: state.clone(),
                    next_state: rule.next_state.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_dfa_symbols(definition: &DfaDefinition) -> Result<(), DefinitionError> {
    for (state, rules) in sorted_rules(&definition.transitions) {
        for rule in rules {
            if !definition.input_alphabet.contains(&rule.symbol) {
                return Err(DefinitionError::UnknownTransitionSymbol {
                    state: state.clone(),
                    symbol: rule.symbol.clone(),
                    alphabet: "input",
                });
            }
        }
    }
    Ok(())
}

fn check_dfa_determinism(definition: &DfaDefinition) -> Result<(), DefinitionError> {
    for (state, rules) in sorted_rules(&definition.transitions) {
        let mut seen: HashSet<&str> = HashSet::with_capacity(rules.len());
        for rule in rules {
            if !seen.insert(&rule.symbol) {
                return Err(DefinitionError::DuplicateTransition {
                    state: state.clone(),
                    symbol: rule.symbol.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_pda_sets(definition: &PdaDefinition) -> Result<(), DefinitionError> {
    check_state_set(&definition.states)?;
    Alphabet::new("input", &definition.input_alphabet)?;
    Alphabet::new("stack", &definition.stack_alphabet)?;
    Ok(())
}

fn check_pda_mode(definition: &PdaDefinition) -> Result<(), DefinitionError> {
    definition
        .acceptance_mode
        .parse::<AcceptanceMode>()
        .map(|_| ())
}

fn check_pda_states(definition: &PdaDefinition) -> Result<(), DefinitionError> {
    check_initial_and_finals(
        &definition.states,
        &definition.initial_state,
        &definition.final_states,
    )?;
    for (state, rules) in sorted_rules(&definition.transitions) {
        if !contains_state(&definition.states, state) {
            return Err(DefinitionError::UnknownSourceState(state.clone()));
        }
        for rule in rules {
            if !contains_state(&definition.states, &rule.next_state) {
                return Err(DefinitionError::UnknownNextState {
                    state: state.clone(),
                    next_state: rule.next_state.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_pda_symbols(definition: &PdaDefinition) -> Result<(), DefinitionError> {
    if !definition
        .stack_alphabet
        .contains(&definition.initial_stack_symbol)
    {
        return Err(DefinitionError::UnknownInitialStackSymbol(
            definition.initial_stack_symbol.clone(),
        ));
    }
    for (state, rules) in sorted_rules(&definition.transitions) {
        for rule in rules {
            if let Some(symbol) = rule.input_symbol() {
                if !definition.input_alphabet.contains(symbol) {
                    return Err(DefinitionError::UnknownTransitionSymbol {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        alphabet: "input",
                    });
                }
            }
            if !definition.stack_alphabet.contains(&rule.stack_top) {
                return Err(DefinitionError::UnknownTransitionSymbol {
                    state: state.clone(),
                    symbol: rule.stack_top.clone(),
                    alphabet: "stack",
                });
            }
            for symbol in &rule.push {
                if !definition.stack_alphabet.contains(symbol) {
                    return Err(DefinitionError::UnknownTransitionSymbol {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        alphabet: "stack",
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_pda_determinism(definition: &PdaDefinition) -> Result<(), DefinitionError> {
    for (state, rules) in sorted_rules(&definition.transitions) {
        let mut seen: HashSet<(Option<&str>, &str)> = HashSet::with_capacity(rules.len());
        let mut spontaneous_tops: HashSet<&str> = HashSet::new();
        let mut consuming_tops: HashSet<&str> = HashSet::new();
        for rule in rules {
            let input = rule.input_symbol().map(String::as_str);
            let top = rule.stack_top.as_str();
            if !seen.insert((input, top)) {
                return Err(DefinitionError::DuplicatePdaTransition {
                    state: state.clone(),
                    input: describe_input(rule.input_symbol()),
                    stack_top: rule.stack_top.clone(),
                });
            }
            match input {
                None => spontaneous_tops.insert(top),
                Some(_) => consuming_tops.insert(top),
            };
        }
        // Sorted so the reported pair is stable when several tops conflict.
        if let Some(top) = spontaneous_tops.intersection(&consuming_tops).min() {
            return Err(DefinitionError::EpsilonConflict {
                state: state.clone(),
                stack_top: (*top).to_string(),
            });
        }
    }
    Ok(())
}

fn check_dtm_sets(definition: &DtmDefinition) -> Result<(), DefinitionError> {
    check_state_set(&definition.states)?;
    Alphabet::new("input", &definition.input_alphabet)?;
    Alphabet::new("tape", &definition.effective_tape_alphabet())?;
    Ok(())
}

fn check_dtm_blank(definition: &DtmDefinition) -> Result<(), DefinitionError> {
    let tape = definition.effective_tape_alphabet();
    if !tape.contains(&definition.blank_symbol) {
        return Err(DefinitionError::UnknownBlankSymbol(
            definition.blank_symbol.clone(),
        ));
    }
    if definition.input_alphabet.contains(&definition.blank_symbol) {
        return Err(DefinitionError::BlankInInputAlphabet(
            definition.blank_symbol.clone(),
        ));
    }
    definition
        .input_alphabet
        .iter()
        .find(|symbol| !tape.contains(symbol))
        .map(|symbol| DefinitionError::InputSymbolNotOnTape(symbol.clone()))
        .map_or(Ok(()), Err)
}

fn check_dtm_states(definition: &DtmDefinition) -> Result<(), DefinitionError> {
    check_initial_and_finals(
        &definition.states,
        &definition.initial_state,
        &definition.final_states,
    )?;
    for (state, rules) in sorted_rules(&definition.transitions) {
        if !contains_state(&definition.states, state) {
            return Err(DefinitionError::UnknownSourceState(state.clone()));
        }
        for rule in rules {
            if !contains_state(&definition.states, &rule.next_state) {
                return Err(DefinitionError::UnknownNextState {
                    state: state.clone(),
                    next_state: rule.next_state.clone(),
                });
            }
        }
    }
    Ok(())
}

fn check_dtm_symbols(definition: &DtmDefinition) -> Result<(), DefinitionError> {
    let tape = definition.effective_tape_alphabet();
    for (state, rules) in sorted_rules(&definition.transitions) {
        for rule in rules {
            for symbol in [&rule.read, &rule.write] {
                if !tape.contains(symbol) {
                    return Err(DefinitionError::UnknownTransitionSymbol {
                        state: state.clone(),
                        symbol: symbol.clone(),
                        alphabet: "tape",
                    });
                }
            }
        }
    }
    Ok(())
}

fn check_dtm_determinism(definition: &DtmDefinition) -> Result<(), DefinitionError> {
    for (state, rules) in sorted_rules(&definition.transitions) {
        let mut seen: HashSet<&str> = HashSet::with_capacity(rules.len());
        for rule in rules {
            if !seen.insert(&rule.read) {
                return Err(DefinitionError::DuplicateTransition {
                    state: state.clone(),
                    symbol: rule.read.clone(),
                });
            }
        }
    }
    Ok(())
}

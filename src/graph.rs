//! This module defines the renderable view of a machine's structure: its
//! states with initial/final markers and its labeled transition edges.
//! Rendering itself (DOT, Cytoscape, SVG) is left to consumers; the view is
//! plain serializable data.

use serde::{Deserialize, Serialize};

use crate::definition::{DfaDefinition, DtmDefinition, PdaDefinition, PdaRule};
use crate::types::{MachineKind, State};

/// A machine's states and transitions in renderable form.
///
/// States and edges appear in declaration order, so the same definition
/// always exports the same view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphView {
    /// The machine's display name.
    pub name: String,
    /// The machine's class.
    pub kind: MachineKind,
    /// One entry per declared state.
    pub states: Vec<GraphState>,
    /// One entry per transition rule.
    pub edges: Vec<GraphEdge>,
}

/// A node of the graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphState {
    /// The state's name.
    pub id: State,
    /// Whether this is the machine's initial state.
    #[serde(rename = "initial")]
    pub is_initial: bool,
    /// Whether this state is accepting.
    #[serde(rename = "final")]
    pub is_final: bool,
}

/// A directed, labeled edge of the graph view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// The source state.
    pub source: State,
    /// The target state.
    pub target: State,
    /// Human-readable transition label in the machine class's notation.
    pub label: String,
}

pub(crate) fn dfa_graph(definition: &DfaDefinition) -> GraphView {
    let states = graph_states(
        &definition.states,
        &definition.initial_state,
        &definition.final_states,
    );
    let mut edges = Vec::with_capacity(definition.transition_count());
    for state in &definition.states {
        if let Some(rules) = definition.transitions.get(state) {
            for rule in rules {
                edges.push(GraphEdge {
                    source: state.clone(),
                    target: rule.next_state.clone(),
                    label: rule.symbol.clone(),
                });
            }
        }
    }
    GraphView {
        name: definition.name.clone(),
        kind: MachineKind::Dfa,
        states,
        edges,
    }
}

pub(crate) fn pda_graph(definition: &PdaDefinition) -> GraphView {
    let states = graph_states(
        &definition.states,
        &definition.initial_state,
        &definition.final_states,
    );
    let mut edges = Vec::with_capacity(definition.transition_count());
    for state in &definition.states {
        if let Some(rules) = definition.transitions.get(state) {
            for rule in rules {
                edges.push(GraphEdge {
                    source: state.clone(),
                    target: rule.next_state.clone(),
                    label: format_pda_label(rule),
                });
            }
        }
    }
    GraphView {
        name: definition.name.clone(),
        kind: MachineKind::Pda,
        states,
        edges,
    }
}

pub(crate) fn dtm_graph(definition: &DtmDefinition) -> GraphView {
    let states = graph_states(
        &definition.states,
        &definition.initial_state,
        &definition.final_states,
    );
    let mut edges = Vec::with_capacity(definition.transition_count());
    for state in &definition.states {
        if let Some(rules) = definition.transitions.get(state) {
            for rule in rules {
                edges.push(GraphEdge {
                    source: state.clone(),
                    target: rule.next_state.clone(),
                    label: format!("{} -> {}, {}", rule.read, rule.write, rule.direction.letter()),
                });
            }
        }
    }
    GraphView {
        name: definition.name.clone(),
        kind: MachineKind::Dtm,
        states,
        edges,
    }
}

fn graph_states(states: &[State], initial_state: &State, final_states: &[State]) -> Vec<GraphState> {
    states
        .iter()
        .map(|state| GraphState {
            id: state.clone(),
            is_initial: state == initial_state,
            is_final: final_states.contains(state),
        })
        .collect()
}

/// Formats a pushdown rule as `input, top/replacement`, with ε standing in
/// for a spontaneous read and for an empty replacement. The replacement
/// lists what occupies the matched position afterwards, deepest first; a
/// rule that keeps its top shows the top beneath the pushed symbols.
fn format_pda_label(rule: &PdaRule) -> String {
    let input = match rule.input_symbol() {
        Some(symbol) => symbol.as_str(),
        None => "ε",
    };
    let pushed = rule.push.concat();
    let replacement = if rule.pop {
        if pushed.is_empty() {
            "ε".to_string()
        } else {
            pushed
        }
    } else {
        format!("{}{}", rule.stack_top, pushed)
    };
    format!("{}, {}/{}", input, rule.stack_top, replacement)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{DfaRule, DtmRule};
    use crate::types::Direction;
    use std::collections::HashMap;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    fn sample_dfa() -> DfaDefinition {
        let mut transitions: HashMap<State, Vec<DfaRule>> = HashMap::new();
        transitions.insert(
            "q0".to_string(),
            vec![
                DfaRule {
                    symbol: "a".to_string(),
                    next_state: "q1".to_string(),
                },
                DfaRule {
                    symbol: "b".to_string(),
                    next_state: "q0".to_string(),
                },
            ],
        );
        transitions.insert(
            "q1".to_string(),
            vec![DfaRule {
                symbol: "a".to_string(),
                next_state: "q0".to_string(),
            }],
        );
        DfaDefinition {
            name: "sample".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["a", "b"]),
            transitions,
            initial_state: "q0".to_string(),
            final_states: strings(&["q1"]),
        }
    }

    #[test]
    fn test_states_carry_initial_and_final_markers() {
        let view = dfa_graph(&sample_dfa());

        assert_eq!(view.kind, MachineKind::Dfa);
        assert_eq!(
            view.states,
            vec![
                GraphState {
                    id: "q0".to_string(),
                    is_initial: true,
                    is_final: false,
                },
                GraphState {
                    id: "q1".to_string(),
                    is_initial: false,
                    is_final: true,
                },
            ]
        );
    }

    #[test]
    fn test_edges_follow_declaration_order() {
        let view = dfa_graph(&sample_dfa());

        let labels: Vec<(&str, &str, &str)> = view
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("q0", "q1", "a"), ("q0", "q0", "b"), ("q1", "q0", "a")]
        );
    }

    #[test]
    fn test_view_preserves_the_definition_as_sets() {
        use std::collections::HashSet;

        let definition = sample_dfa();
        let view = dfa_graph(&definition);

        let ids: HashSet<&str> = view.states.iter().map(|state| state.id.as_str()).collect();
        let declared: HashSet<&str> = definition.states.iter().map(String::as_str).collect();
        assert_eq!(ids, declared);

        let initials: Vec<&str> = view
            .states
            .iter()
            .filter(|state| state.is_initial)
            .map(|state| state.id.as_str())
            .collect();
        assert_eq!(initials, vec![definition.initial_state.as_str()]);

        let finals: HashSet<&str> = view
            .states
            .iter()
            .filter(|state| state.is_final)
            .map(|state| state.id.as_str())
            .collect();
        let declared_finals: HashSet<&str> =
            definition.final_states.iter().map(String::as_str).collect();
        assert_eq!(finals, declared_finals);

        let edges: HashSet<(&str, &str, &str)> = view
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.label.as_str(), edge.target.as_str()))
            .collect();
        let mut declared_edges: HashSet<(&str, &str, &str)> = HashSet::new();
        for (state, rules) in &definition.transitions {
            for rule in rules {
                declared_edges.insert((state, rule.symbol.as_str(), rule.next_state.as_str()));
            }
        }
        assert_eq!(edges, declared_edges);
    }

    #[test]
    fn test_pda_labels() {
        let consuming = PdaRule {
            input: Some("(".to_string()),
            stack_top: "Z".to_string(),
            pop: true,
            push: strings(&["Z", "P"]),
            next_state: "q0".to_string(),
        };
        let spontaneous = PdaRule {
            input: None,
            stack_top: "Z".to_string(),
            pop: true,
            push: vec![],
            next_state: "q1".to_string(),
        };
        let keeping = PdaRule {
            input: Some("(".to_string()),
            stack_top: "Z".to_string(),
            pop: false,
            push: strings(&["P"]),
            next_state: "q0".to_string(),
        };

        assert_eq!(format_pda_label(&consuming), "(, Z/ZP");
        assert_eq!(format_pda_label(&spontaneous), "ε, Z/ε");
        assert_eq!(format_pda_label(&keeping), "(, Z/ZP");
    }

    #[test]
    fn test_pda_graph_labels_edges() {
        let mut transitions: HashMap<State, Vec<PdaRule>> = HashMap::new();
        transitions.insert(
            "q0".to_string(),
            vec![
                PdaRule {
                    input: Some("(".to_string()),
                    stack_top: "Z".to_string(),
                    pop: false,
                    push: strings(&["P"]),
                    next_state: "q0".to_string(),
                },
                PdaRule {
                    input: Some(")".to_string()),
                    stack_top: "P".to_string(),
                    pop: true,
                    push: vec![],
                    next_state: "q1".to_string(),
                },
            ],
        );
        transitions.insert(
            "q1".to_string(),
            vec![PdaRule {
                input: None,
                stack_top: "Z".to_string(),
                pop: true,
                push: vec![],
                next_state: "q1".to_string(),
            }],
        );
        let definition = PdaDefinition {
            name: "parens".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["(", ")"]),
            stack_alphabet: strings(&["Z", "P"]),
            transitions,
            initial_state: "q0".to_string(),
            initial_stack_symbol: "Z".to_string(),
            final_states: vec![],
            acceptance_mode: "empty-stack".to_string(),
        };

        let view = pda_graph(&definition);

        assert_eq!(view.kind, MachineKind::Pda);
        let labels: Vec<(&str, &str, &str)> = view
            .edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str(), edge.label.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("q0", "q0", "(, Z/ZP"),
                ("q0", "q1", "), P/ε"),
                ("q1", "q1", "ε, Z/ε"),
            ]
        );
    }

    #[test]
    fn test_dtm_labels() {
        let mut transitions: HashMap<State, Vec<DtmRule>> = HashMap::new();
        transitions.insert(
            "q0".to_string(),
            vec![DtmRule {
                read: "0".to_string(),
                write: "X".to_string(),
                direction: Direction::Right,
                next_state: "q1".to_string(),
            }],
        );
        let definition = DtmDefinition {
            name: "strike".to_string(),
            states: strings(&["q0", "q1"]),
            input_alphabet: strings(&["0"]),
            tape_alphabet: strings(&["0", "X", "_"]),
            transitions,
            initial_state: "q0".to_string(),
            blank_symbol: "_".to_string(),
            final_states: strings(&["q1"]),
        };

        let view = dtm_graph(&definition);
        assert_eq!(view.edges[0].label, "0 -> X, R");
    }

    #[test]
    fn test_view_round_trips_through_json() {
        let view = dfa_graph(&sample_dfa());

        let text = serde_json::to_string(&view).unwrap();
        assert!(text.contains("\"initial\":true"));
        assert!(text.contains("\"final\":true"));

        let back: GraphView = serde_json::from_str(&text).unwrap();
        assert_eq!(back, view);
    }
}

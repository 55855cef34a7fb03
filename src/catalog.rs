use crate::automaton::Automaton;
use crate::loader::MachineLoader;
use crate::types::{AutomatonError, MachineKind};

use std::sync::RwLock;

// Default embedded machines
const MACHINE_TEXTS: [&str; 5] = [
    include_str!("../machines/even-as.json"),
    include_str!("../machines/nested-parens.json"),
    include_str!("../machines/marked-palindrome.json"),
    include_str!("../machines/zero-n-one-n.json"),
    include_str!("../machines/binary-complement.json"),
];

lazy_static::lazy_static! {
    pub static ref MACHINES: RwLock<Vec<Automaton>> = RwLock::new(Vec::new());
}

pub struct Catalog;

impl Catalog {
    /// Initialize the catalog with the embedded machines
    pub fn load() -> Result<(), AutomatonError> {
        let mut machines = Vec::new();

        for text in MACHINE_TEXTS {
            if let Ok(machine) = MachineLoader::load_machine_from_str(text) {
                machines.push(machine);
            } else {
                eprintln!("Failed to load embedded machine");
            }
        }

        if let Ok(mut write_guard) = MACHINES.write() {
            *write_guard = machines;
        } else {
            return Err(AutomatonError::File(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available machines
    pub fn machine_count() -> usize {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES.read().map(|machines| machines.len()).unwrap_or(0)
    }

    /// Get a machine by its index
    pub fn machine_by_index(index: usize) -> Result<Automaton, AutomatonError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| AutomatonError::File("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| AutomatonError::NotFound(format!("index {} out of range", index)))
    }

    /// Get a machine by its name
    pub fn machine_by_name(name: &str) -> Result<Automaton, AutomatonError> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map_err(|_| AutomatonError::File("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|machine| machine.name() == name)
            .cloned()
            .ok_or_else(|| AutomatonError::NotFound(name.to_string()))
    }

    /// List all machine names
    pub fn list_machine_names() -> Vec<String> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .map(|machine| machine.name().to_string())
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a machine by its index
    pub fn machine_info(index: usize) -> Result<MachineInfo, AutomatonError> {
        let machine = Self::machine_by_index(index)?;

        Ok(MachineInfo {
            index,
            name: machine.name().to_string(),
            kind: machine.kind(),
            state_count: machine.state_count(),
            transition_count: machine.transition_count(),
        })
    }

    /// Search for machines by name
    pub fn search_machines(query: &str) -> Vec<usize> {
        // Initialize with the embedded machines if not already initialized
        let _ = Self::load();

        MACHINES
            .read()
            .map(|machines| {
                machines
                    .iter()
                    .enumerate()
                    .filter(|(_, machine)| {
                        machine.name().to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original definition text of a machine by its index
    pub fn machine_text_by_index(index: usize) -> Result<&'static str, AutomatonError> {
        MACHINE_TEXTS
            .get(index)
            .cloned()
            .ok_or_else(|| AutomatonError::NotFound(format!("index {} out of range", index)))
    }
}

#[derive(Debug, Clone)]
pub struct MachineInfo {
    pub index: usize,
    pub name: String,
    pub kind: MachineKind,
    pub state_count: usize,
    pub transition_count: usize,
}

//! This module provides the `MachineLoader` struct, responsible for loading
//! machine definitions from various sources, including files and strings.

use crate::automaton::Automaton;
use crate::definition::Definition;
use crate::types::AutomatonError;
use std::fs;
use std::path::{Path, PathBuf};

/// `MachineLoader` is a utility struct for loading machine definitions.
/// It provides methods to build machines from individual files, from string
/// content, and to discover and load all `.json` files within a directory.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads and validates a single machine from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.json` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Automaton)` if the file holds a well-formed, valid description.
    /// * `Err(AutomatonError::File)` if the file cannot be read.
    /// * `Err(AutomatonError::Malformed)` if the text is not a description.
    /// * `Err(AutomatonError::Definition)` if a construction rule is violated.
    pub fn load_machine(path: &Path) -> Result<Automaton, AutomatonError> {
        let content = fs::read_to_string(path).map_err(|e| {
            AutomatonError::File(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        Self::load_machine_from_str(&content)
    }

    /// Loads and validates a single machine from JSON text.
    ///
    /// This is the entry point for descriptions that are not stored in
    /// files, e.g. request bodies or editor buffers.
    pub fn load_machine_from_str(content: &str) -> Result<Automaton, AutomatonError> {
        let definition: Definition = serde_json::from_str(content)?;
        Ok(Automaton::new(definition)?)
    }

    /// Loads all machine definition files (`.json` extension) from a given
    /// directory.
    ///
    /// It iterates through the directory, attempts to load each `.json`
    /// file, and collects the results. Directories and files with other
    /// extensions are skipped.
    ///
    /// # Arguments
    ///
    /// * `directory` - A reference to the `Path` of the directory to scan.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Automaton), AutomatonError>>` - one entry per
    ///   candidate file, carrying either the loaded machine with its path or
    ///   the error that file produced.
    pub fn load_machines(directory: &Path) -> Vec<Result<(PathBuf, Automaton), AutomatonError>> {
        if !directory.exists() {
            return vec![Err(AutomatonError::File(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(AutomatonError::File(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(AutomatonError::File(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.json files.
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "json") {
                    return None;
                }

                match Self::load_machine(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(AutomatonError::File(format!(
                        "Failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MachineKind, Verdict};
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    const ONE_A: &str = r#"{
        "kind": "dfa",
        "name": "one-a",
        "states": ["q0", "q1"],
        "input_alphabet": ["a"],
        "transitions": {
            "q0": [{"symbol": "a", "next_state": "q1"}]
        },
        "initial_state": "q0",
        "final_states": ["q1"]
    }"#;

    #[test]
    fn test_load_valid_machine() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("one-a.json");

        let mut file = File::create(&file_path).unwrap();
        file.write_all(ONE_A.as_bytes()).unwrap();

        let machine = MachineLoader::load_machine(&file_path).unwrap();
        assert_eq!(machine.kind(), MachineKind::Dfa);
        assert_eq!(machine.name(), "one-a");
        assert_eq!(machine.run("a").unwrap(), Verdict::Accepted);
    }

    #[test]
    fn test_malformed_text_is_not_a_definition_error() {
        let result = MachineLoader::load_machine_from_str("not json at all");

        match result {
            Err(AutomatonError::Malformed(_)) => {}
            other => panic!("expected a Malformed error, got {:?}", other),
        }
    }

    #[test]
    fn test_construction_violation_is_a_definition_error() {
        let text = ONE_A.replace("\"initial_state\": \"q0\"", "\"initial_state\": \"qX\"");

        let result = MachineLoader::load_machine_from_str(&text);
        match result {
            Err(AutomatonError::Definition(_)) => {}
            other => panic!("expected a Definition error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_is_a_file_error() {
        let dir = tempdir().unwrap();
        let result = MachineLoader::load_machine(&dir.path().join("absent.json"));

        match result {
            Err(AutomatonError::File(_)) => {}
            other => panic!("expected a File error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_machines_from_directory() {
        let dir = tempdir().unwrap();

        let valid_path = dir.path().join("valid.json");
        let mut valid_file = File::create(&valid_path).unwrap();
        valid_file.write_all(ONE_A.as_bytes()).unwrap();

        let invalid_path = dir.path().join("invalid.json");
        let mut invalid_file = File::create(&invalid_path).unwrap();
        invalid_file.write_all(b"{\"kind\": \"dfa\"}").unwrap();

        // A file with another extension must be ignored.
        let ignored_path = dir.path().join("notes.txt");
        let mut ignored_file = File::create(&ignored_path).unwrap();
        ignored_file.write_all(b"not a machine").unwrap();

        let results = MachineLoader::load_machines(dir.path());
        assert_eq!(results.len(), 2);

        let successes = results.iter().filter(|result| result.is_ok()).count();
        let failures = results.iter().filter(|result| result.is_err()).count();
        assert_eq!(successes, 1);
        assert_eq!(failures, 1);
    }

    #[test]
    fn test_missing_directory_reports_one_error() {
        let dir = tempdir().unwrap();
        let results = MachineLoader::load_machines(&dir.path().join("nowhere"));

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }
}

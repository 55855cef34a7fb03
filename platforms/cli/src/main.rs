use clap::Parser;
use std::path::Path;
use std::process;

use automat::catalog::Catalog;
use automat::loader::MachineLoader;
use automat::types::{AutomatonError, Step, Verdict};
use automat::Automaton;

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine definition file to run
    #[clap(short, long)]
    file: Option<String>,

    /// The name of an embedded machine to run
    #[clap(short, long, conflicts_with = "file")]
    machine: Option<String>,

    /// List the embedded machines and exit
    #[clap(short, long)]
    list: bool,

    /// An input string to test; repeat for several inputs
    #[clap(short, long)]
    input: Vec<String>,

    /// Print each step of the execution
    #[clap(short, long)]
    trace: bool,

    /// Print the machine's graph view as JSON and exit
    #[clap(short, long)]
    graph: bool,

    /// Print the machine's normalized definition as JSON and exit
    #[clap(short, long)]
    echo: bool,

    /// Override the step bound for pushdown and Turing machine runs
    #[clap(long)]
    max_steps: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AutomatonError> {
    if cli.list {
        return list_machines();
    }

    let machine = resolve_machine(cli)?;

    if cli.graph {
        println!("{}", serde_json::to_string_pretty(&machine.graph())?);
        return Ok(());
    }

    if cli.echo {
        println!("{}", serde_json::to_string_pretty(&machine.definition())?);
        return Ok(());
    }

    // No input given still tests the empty string.
    let inputs = if cli.input.is_empty() {
        vec![String::new()]
    } else {
        cli.input.clone()
    };

    for input in &inputs {
        let verdict = if cli.trace {
            trace(&machine, input, cli.max_steps)?
        } else {
            match cli.max_steps {
                Some(limit) => machine.run_with_limit(input, limit)?,
                None => machine.run(input)?,
            }
        };

        println!("{:?}: {}", input, verdict);
    }
    Ok(())
}

/// Picks the machine named on the command line, from a file or the catalog.
fn resolve_machine(cli: &Cli) -> Result<Automaton, AutomatonError> {
    match (&cli.file, &cli.machine) {
        (Some(path), _) => MachineLoader::load_machine(Path::new(path)),
        (None, Some(name)) => Catalog::machine_by_name(name),
        (None, None) => Err(AutomatonError::NotFound(
            "pass --file or --machine to pick one".to_string(),
        )),
    }
}

fn list_machines() -> Result<(), AutomatonError> {
    for index in 0..Catalog::machine_count() {
        let info = Catalog::machine_info(index)?;
        println!(
            "{:2}  {:<20} {}  {} states, {} transitions",
            info.index, info.name, info.kind, info.state_count, info.transition_count
        );
    }
    Ok(())
}

/// Runs the machine step by step, printing each configuration.
fn trace(
    machine: &Automaton,
    input: &str,
    max_steps: Option<usize>,
) -> Result<Verdict, AutomatonError> {
    match machine {
        Automaton::Dfa(dfa) => {
            let mut execution = dfa.execution(input)?;

            let print_state = |execution: &automat::DfaExecution| {
                println!(
                    "Step: {}, State: {}, Remaining: {:?}",
                    execution.step_count(),
                    execution.state(),
                    execution.remaining_input()
                );
            };

            print_state(&execution);
            while let Step::Continue = execution.step() {
                print_state(&execution);
            }

            println!("\nMachine halted.");
            Ok(execution.run())
        }
        Automaton::Pda(pda) => {
            let mut execution = match max_steps {
                Some(limit) => pda.execution_with_limit(input, limit)?,
                None => pda.execution(input)?,
            };

            let print_state = |execution: &automat::PdaExecution| {
                println!(
                    "Step: {}, State: {}, Stack: {:?}, Remaining: {:?}",
                    execution.step_count(),
                    execution.state(),
                    execution.stack(),
                    execution.remaining_input()
                );
            };

            print_state(&execution);
            let verdict = loop {
                if execution.step_count() >= execution.max_steps() {
                    println!("\nStep limit reached.");
                    break Verdict::NonHalting;
                }
                match execution.step() {
                    Step::Continue => print_state(&execution),
                    Step::Halted => {
                        println!("\nMachine halted.");
                        break if execution.is_accepting() {
                            Verdict::Accepted
                        } else {
                            Verdict::Rejected
                        };
                    }
                }
            };
            Ok(verdict)
        }
        Automaton::Dtm(dtm) => {
            let mut execution = match max_steps {
                Some(limit) => dtm.execution_with_limit(input, limit)?,
                None => dtm.execution(input)?,
            };

            let print_state = |execution: &automat::DtmExecution| {
                println!(
                    "Step: {}, State: {}, Tape: {}, Head: {}",
                    execution.step_count(),
                    execution.state(),
                    execution.tape().concat(),
                    execution.head()
                );
            };

            print_state(&execution);
            let verdict = loop {
                if execution.step_count() >= execution.max_steps() {
                    println!("\nStep limit reached.");
                    break Verdict::NonHalting;
                }
                match execution.step() {
                    Step::Continue => print_state(&execution),
                    Step::Halted => {
                        println!("\nMachine halted.");
                        break if execution.is_accepting() {
                            Verdict::Accepted
                        } else {
                            Verdict::Rejected
                        };
                    }
                }
            };
            Ok(verdict)
        }
    }
}

//! Virtual machine runner CLI.
//!
//! Loads a program file and executes it on a fresh machine instance.
//!
//! # Usage
//! ```text
//! micro8 <program-file> [OPTIONS]
//! ```
//!
//! # Arguments
//! - `program-file`: Program source, one base-2 byte literal per line
//!   (`#` starts a comment)
//!
//! # Options
//! - `-t, --trace`: Print the machine state to stderr before each step
//!
//! # Exit status
//! - `0`: the program halted cleanly (HLT)
//! - `1`: usage error, or the machine stopped on an execution error
//! - `2`: the program file could not be loaded

use micro8::machine::cpu::{Cpu, Step};
use micro8::machine::errors::MachineError;
use micro8::machine::loader;
use micro8::{error, info};
use std::env;
use std::io;
use std::process;

const USAGE: &str = "\
micro8 - an 8-bit von Neumann virtual machine

USAGE:
    {program} <program-file> [OPTIONS]

ARGS:
    <program-file>    Program source, one base-2 byte literal per line

OPTIONS:
    -t, --trace       Print the machine state to stderr before each step
    -h, --help        Print this help message

EXAMPLES:
    {program} demos/print8.m8
    {program} demos/mult.m8 --trace
";

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        process::exit(if args.len() < 2 { 1 } else { 0 });
    }

    let program_path = &args[1];
    let mut trace = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--trace" | "-t" => {
                trace = true;
                i += 1;
            }
            other => {
                error!("Unexpected argument: {}\n", other);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
    }

    let program = match loader::load_file(program_path) {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to load '{}': {}", program_path, e);
            process::exit(2);
        }
    };

    let mut cpu = Cpu::new();
    if let Err(e) = cpu.load(&program) {
        error!("Failed to load '{}': {}", program_path, e);
        process::exit(2);
    }
    info!("Loaded {} bytes from '{}'", program.len(), program_path);

    let mut stdout = io::stdout();
    let result = if trace {
        run_traced(&mut cpu, &mut stdout)
    } else {
        cpu.run(&mut stdout)
    };

    if let Err(e) = result {
        println!("{}", e);
        process::exit(1);
    }
}

/// Runs the machine, printing a trace line to stderr before each step.
fn run_traced<W: io::Write>(cpu: &mut Cpu, out: &mut W) -> Result<(), MachineError> {
    loop {
        eprintln!("{}", cpu.trace());
        if let Step::Halted = cpu.step(out)? {
            return Ok(());
        }
    }
}

/// Prints usage information to stderr.
fn print_usage(program: &str) {
    eprintln!("{}", USAGE.replace("{program}", program));
}

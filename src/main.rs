use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::*;
use diadoku::{viz, AssignmentLog, Solver, Topology};
use std::{fs, path::PathBuf, process::ExitCode};

/// The example grid the solver was originally written around.
const DEMO_GRID: &str =
    "2.............62....1....7...6..8...3...9...7...6..4...4....8....52.............3";

#[derive(Parser, Debug)]
#[command(name = "diadoku", version, about = "Diagonal Sudoku solver with assignment replay")]
struct Cli {
    /// Puzzle as an 81-char string (1-9, '.' for blanks); whitespace is ignored
    puzzle: Option<String>,

    /// Read the puzzle from a file instead. If neither is given, reads stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Solve the built-in demo grid
    #[arg(long)]
    demo: bool,

    /// Replay every singleton assignment after solving
    #[arg(long)]
    visualize: bool,

    /// Write replay frames into this directory
    #[arg(long)]
    frame_dir: Option<PathBuf>,

    /// Pause for Enter after each replay frame
    #[arg(long)]
    step: bool,

    /// Colored replay output
    #[arg(long)]
    color: bool,

    /// Maximum replay frames to show (0 = all)
    #[arg(long, default_value_t = 0)]
    max_frames: usize,

    /// Largest naked tuple the propagator checks (2 = twins only)
    #[arg(long, default_value_t = 2)]
    max_tuple: usize,
}

fn read_puzzle(cli: &Cli) -> Result<String> {
    let raw = if cli.demo {
        DEMO_GRID.to_string()
    } else if let Some(p) = &cli.puzzle {
        p.clone()
    } else if let Some(path) = &cli.input {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
    } else {
        use std::io::Read;
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    };
    let filtered: String = raw.chars().filter(|ch| !ch.is_whitespace()).collect();
    if filtered.is_empty() {
        bail!("no puzzle given (pass a grid string, --input, or --demo)");
    }
    Ok(filtered)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let puzzle = read_puzzle(&cli)?;

    let wants_replay = cli.visualize || cli.frame_dir.is_some();
    let mut log = if wants_replay {
        AssignmentLog::new()
    } else {
        AssignmentLog::disabled()
    };

    let solver = Solver::with_max_tuple(Topology::shared(), cli.max_tuple);
    let solved = solver.solve(&puzzle, &mut log).context("solve puzzle")?;

    let code = match &solved {
        Some(grid) => {
            println!("{}", grid.to_pretty_string());
            ExitCode::SUCCESS
        }
        None => {
            println!("No solution exists for this grid.");
            ExitCode::FAILURE
        }
    };

    if wants_replay {
        let opts = viz::ReplayOptions {
            frame_dir: cli.frame_dir.clone(),
            color: cli.color,
            step: cli.step,
            max_frames: cli.max_frames,
        };
        // replay problems are a notice, never a solver failure
        if let Err(e) = viz::replay(&log, &opts) {
            let notice = format!("Could not replay the assignments ({e}). Not a problem, the solution above stands.");
            if cli.color {
                println!("{}", notice.yellow());
            } else {
                println!("{notice}");
            }
        }
    }

    Ok(code)
}

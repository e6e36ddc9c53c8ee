//! Snake Cube Solver
//!
//! Folds the 46-segment snake cube (or any chain given on the command line)
//! into a 4x4x4 cube, prints the fold sequence, and can show the folded
//! snake in an interactive 3D viewer.

mod visualization;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use snake::{chain, grid, persistence, progress, Progress, Solution};

/// Solves a snake cube puzzle and visualizes the folding.
#[derive(Parser)]
#[command(name = "snake")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Segment lengths, comma separated, last segment placed first.
    /// Defaults to the 46-segment snake cube.
    // fully qualified so clap parses one list instead of repeated values
    #[arg(long, global = true, value_parser = parse_chain)]
    chain: Option<::std::vec::Vec<u32>>,

    /// Accepted moves between progress lines.
    #[arg(long, global = true, default_value_t = progress::DEFAULT_INTERVAL,
          value_parser = clap::value_parser!(u64).range(1..))]
    progress_interval: u64,

    /// File the solution is saved to and loaded from.
    #[arg(long, global = true, default_value = persistence::SOLUTION_TXT)]
    output: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Solve the puzzle, print the moves and save them to disk.
    Solve,
    /// Display the saved solution in an interactive 3D viewer.
    Display,
    /// Print the folded cells as JavaScript for the website.
    ExportJs,
}

fn parse_chain(text: &str) -> Result<Vec<u32>, chain::ChainError> {
    chain::parse(text)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve) | None => run_solver(&cli)?,
        Some(Command::Display) => run_display(&cli)?,
        Some(Command::ExportJs) => run_export_js(&cli)?,
    }

    Ok(())
}

/// Solves the configured chain and saves any solution, reporting progress
/// to `progress`.
fn solve_and_save<W: Write>(
    cli: &Cli,
    progress: &mut Progress<W>,
) -> anyhow::Result<Option<Solution>> {
    let chain = cli.chain.as_deref().unwrap_or(chain::CANONICAL);
    let solution = snake::solve(chain, progress).context("invalid chain")?;

    match &solution {
        Some(solution) => {
            log::debug!("folded cube:\n{}", grid::format_cube(solution));
            if let Err(e) = persistence::save(&cli.output, solution) {
                log::warn!("failed to save solution to {}: {}", cli.output.display(), e);
            } else {
                log::info!("wrote {}", cli.output.display());
            }
        }
        None => log::info!("search space exhausted without a folding"),
    }

    Ok(solution)
}

/// Solves the configured chain and prints progress and the outcome.
fn run_solver(cli: &Cli) -> anyhow::Result<()> {
    let mut progress = Progress::stdout(cli.progress_interval);
    let solution = solve_and_save(cli, &mut progress)?;
    print!("{}", grid::format_outcome(solution.as_ref()));
    Ok(())
}

/// Loads and verifies the saved solution.
fn load_verified(cli: &Cli) -> anyhow::Result<Solution> {
    let solution = persistence::load(&cli.output).with_context(|| {
        format!(
            "could not read {}; run 'snake solve' first",
            cli.output.display()
        )
    })?;
    solution
        .verify()
        .with_context(|| format!("{} does not fold into the cube", cli.output.display()))?;
    Ok(solution)
}

/// Displays the saved solution.
fn run_display(cli: &Cli) -> anyhow::Result<()> {
    let solution = load_verified(cli)?;
    println!("Loaded {} moves", solution.moves().len());
    println!("Controls: Left/Right fold, Up/Down explode, R reset");
    visualization::display(solution);
    Ok(())
}

/// Picks the folding to export: the saved one when it verifies and matches
/// `--chain`, otherwise a fresh solve that reports progress to `progress`.
fn export_solution<W: Write>(cli: &Cli, progress: &mut Progress<W>) -> anyhow::Result<Solution> {
    match load_verified(cli) {
        Ok(solution)
            if cli
                .chain
                .as_deref()
                .map_or(true, |chain| chain == solution.chain()) =>
        {
            return Ok(solution);
        }
        Ok(_) => log::info!(
            "{} holds a different chain; solving instead",
            cli.output.display()
        ),
        Err(e) => log::info!("{:#}; solving instead", e),
    }

    match solve_and_save(cli, progress)? {
        Some(solution) => Ok(solution),
        None => bail!("the chain has no folding to export"),
    }
}

/// Exports the folded cells, in chain order, as a JavaScript array.
///
/// Standard output carries only the array; progress goes to standard error.
fn run_export_js(cli: &Cli) -> anyhow::Result<()> {
    let mut progress = Progress::new(cli.progress_interval, io::stderr());
    let solution = export_solution(cli, &mut progress)?;
    println!("{}", export_js(&solution));
    Ok(())
}

fn export_js(solution: &Solution) -> String {
    let cells: Vec<String> = solution
        .segment_cells()
        .into_iter()
        .map(|(segment, [x, y, z])| format!("[{},{},{},{}]", segment, x, y, z))
        .collect();
    format!("const SNAKE = [{}];", cells.join(", "))
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;
    use snake::{Axis, Move, Sign};

    fn canonical_text() -> String {
        chain::CANONICAL
            .iter()
            .map(|length| length.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    fn temp_output(name: &str) -> PathBuf {
        env::temp_dir().join(format!("snake-{}-{}.txt", name, process::id()))
    }

    /// A verified folding of a chain other than the canonical one: a 4x4
    /// serpentine per z layer, joined by single z steps.
    fn serpentine() -> Solution {
        let mut placed = Vec::new();
        let mut moves = Vec::new();
        for layer in 0..4 {
            let up = if layer % 2 == 0 { Sign::Plus } else { Sign::Minus };
            for row in 0..4 {
                let along = if row % 2 == 0 { Sign::Plus } else { Sign::Minus };
                placed.push(4);
                moves.push(Move::new(Axis::X, along));
                if row < 3 {
                    placed.push(2);
                    moves.push(Move::new(Axis::Y, up));
                }
            }
            if layer < 3 {
                placed.push(2);
                moves.push(Move::new(Axis::Z, Sign::Plus));
            }
        }
        placed.reverse();
        Solution::new(placed, moves)
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["snake"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.chain.is_none());
        assert_eq!(cli.progress_interval, 100_000);
        assert_eq!(cli.output, PathBuf::from("solution.txt"));
    }

    #[test]
    fn test_cli_accepts_chain_override() {
        let text = canonical_text();
        let cli = Cli::try_parse_from(["snake", "solve", "--chain", text.as_str()]).unwrap();
        assert_eq!(cli.chain.as_deref(), Some(chain::CANONICAL));
    }

    #[test]
    fn test_cli_rejects_malformed_chain() {
        assert!(Cli::try_parse_from(["snake", "--chain", "2,2,2"]).is_err());
        assert!(Cli::try_parse_from(["snake", "--chain", "2,x"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_interval() {
        assert!(Cli::try_parse_from(["snake", "--progress-interval", "0"]).is_err());
    }

    #[test]
    fn test_export_js() {
        let solution = Solution::new(
            vec![2, 3],
            vec![
                Move::new(Axis::X, Sign::Plus),
                Move::new(Axis::Y, Sign::Plus),
            ],
        );
        assert_eq!(
            export_js(&solution),
            "const SNAKE = [[0,0,0,0], [0,1,0,0], [0,2,0,0], [1,2,1,0]];"
        );
    }

    #[test]
    fn test_export_uses_matching_saved_solution() {
        let output = temp_output("export-saved");
        let saved = serpentine();
        assert_eq!(saved.verify(), Ok(()));
        persistence::save(&output, &saved).unwrap();

        let cli = Cli::try_parse_from([
            "snake".into(),
            "export-js".into(),
            "--output".into(),
            output.clone().into_os_string(),
        ])
        .unwrap();
        let mut progress = Progress::new(1, Vec::new());
        let exported = export_solution(&cli, &mut progress);
        let _ = fs::remove_file(&output);

        assert_eq!(exported.unwrap(), saved);
        assert_eq!(progress.positions(), 0);
    }

    #[test]
    fn test_export_resolves_when_saved_chain_differs() {
        let output = temp_output("export-stale");
        persistence::save(&output, &serpentine()).unwrap();

        let text = canonical_text();
        let cli = Cli::try_parse_from([
            "snake".into(),
            "export-js".into(),
            "--chain".into(),
            text.into(),
            "--output".into(),
            output.clone().into_os_string(),
        ])
        .unwrap();
        let mut progress = Progress::new(progress::DEFAULT_INTERVAL, io::sink());
        let exported = export_solution(&cli, &mut progress);
        let resaved = persistence::load(&output);
        let _ = fs::remove_file(&output);

        let exported = exported.unwrap();
        assert_eq!(exported.chain(), chain::CANONICAL);
        assert_eq!(exported.verify(), Ok(()));
        assert!(progress.positions() > 0);
        assert_eq!(resaved.unwrap(), exported);
    }

    #[test]
    fn test_export_solve_writes_only_progress_to_its_sink() {
        let output = temp_output("export-missing");
        let _ = fs::remove_file(&output);

        let cli = Cli::try_parse_from([
            "snake".into(),
            "export-js".into(),
            "--output".into(),
            output.clone().into_os_string(),
        ])
        .unwrap();
        let mut progress = Progress::new(progress::DEFAULT_INTERVAL, Vec::new());
        let exported = export_solution(&cli, &mut progress);
        let _ = fs::remove_file(&output);

        assert_eq!(exported.unwrap().chain(), chain::CANONICAL);
        let report = String::from_utf8(progress.into_inner()).unwrap();
        assert!(!report.is_empty());
        assert!(report.lines().all(|line| line.starts_with("positions seen: ")));
    }
}

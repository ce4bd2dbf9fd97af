//! League standings CLI
//!
//! Command-line tool for maintaining a league table stored in a flat
//! comma-delimited file: record match results, rank, search, and
//! export standings.

use clap::{Parser, Subcommand, ValueEnum};
use league_core::{
    commit_load, load_standings, save_standings, suggest, ConfirmLoad, MatchOutcome, SortKey,
    Standings, Team,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "league-cli")]
#[command(about = "League standings tracker", long_about = None)]
#[command(version)]
struct Cli {
    /// Standings file to operate on
    #[arg(short, long, default_value = "league.csv", global = true)]
    file: PathBuf,

    /// Accept files with invalid lines without prompting
    #[arg(long, global = true)]
    force: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty standings file
    Init,

    /// Show the full standings table
    Show,

    /// Show the top teams of the current ranking
    Top {
        /// How many teams to show
        #[arg(default_value_t = 3)]
        count: usize,
    },

    /// Record a match result
    Record {
        /// Match outcome
        #[arg(value_enum)]
        outcome: OutcomeArg,

        /// Winner for a win, first team for a draw
        first: String,

        /// Loser for a win, second team for a draw
        second: String,
    },

    /// Add a new team with an empty tally
    Add {
        /// Team name (English letters and spaces only)
        name: String,
    },

    /// Delete a team matched by name or part of a name
    Delete {
        /// Name or substring to match (case-insensitive)
        query: String,

        /// Delete without asking for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Search teams by substring
    Search {
        /// Substring to match (case-insensitive)
        query: String,
    },

    /// Re-sort the table and persist the new order
    Sort {
        /// Sort key
        #[arg(value_enum, default_value = "points")]
        key: SortArg,
    },

    /// Export the standings to a file
    Export {
        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Parse the standings file and report every problem found
    Check,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutcomeArg {
    /// First team beat the second
    Win,
    /// The match was drawn
    Draw,
}

impl From<OutcomeArg> for MatchOutcome {
    fn from(arg: OutcomeArg) -> Self {
        match arg {
            OutcomeArg::Win => MatchOutcome::Win,
            OutcomeArg::Draw => MatchOutcome::Draw,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    /// By points, descending
    Points,
    /// By wins, descending
    Wins,
    /// By name, ascending
    Name,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Points => SortKey::Points,
            SortArg::Wins => SortKey::Wins,
            SortArg::Name => SortKey::Name,
        }
    }
}

/// Interactive y/n prompt on stdin
struct StdinConfirm;

impl ConfirmLoad for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{} (y/n): ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y")
    }
}

/// Non-interactive oracle that accepts everything (`--force`)
struct AutoConfirm;

impl ConfirmLoad for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> league_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => cmd_init(&cli.file),
        Commands::Show => cmd_show(&cli.file, cli.force),
        Commands::Top { count } => cmd_top(&cli.file, cli.force, count),
        Commands::Record {
            outcome,
            first,
            second,
        } => cmd_record(&cli.file, cli.force, outcome, &first, &second),
        Commands::Add { name } => cmd_add(&cli.file, cli.force, &name),
        Commands::Delete { query, yes } => cmd_delete(&cli.file, cli.force, &query, yes),
        Commands::Search { query } => cmd_search(&cli.file, cli.force, &query),
        Commands::Sort { key } => cmd_sort(&cli.file, cli.force, key),
        Commands::Export { format, output } => cmd_export(&cli.file, cli.force, &format, &output),
        Commands::Check => cmd_check(&cli.file),
    }
}

/// Load the standings file, surfacing line diagnostics and asking
/// before committing a degraded load. Declining aborts the command.
fn load_table(file: &Path, force: bool) -> league_core::Result<Standings> {
    let report = load_standings(file)?;

    if !report.is_clean() {
        eprintln!("Problems found in {}:", file.display());
        for err in &report.errors {
            eprintln!("  {}", err);
        }
    }

    let mut standings = Standings::new();
    let adopted = if force {
        commit_load(&mut standings, report, &mut AutoConfirm)
    } else {
        commit_load(&mut standings, report, &mut StdinConfirm)
    };

    if !adopted {
        println!("Load cancelled.");
        std::process::exit(1);
    }

    Ok(standings)
}

fn print_table_header() {
    println!(
        "{:<20} {:>3} {:>5} {:>4} {:>5} {:>6} {:>6}",
        "Name", "Pos", "Games", "Wins", "Draws", "Losses", "Points"
    );
    println!("{}", "-".repeat(55));
}

fn print_team(team: &Team) {
    // names are ASCII by the charset rule, so byte truncation is safe
    let name = if team.name().len() > 20 {
        &team.name()[..20]
    } else {
        team.name()
    };
    println!(
        "{:<20} {:>3} {:>5} {:>4} {:>5} {:>6} {:>6}",
        name,
        team.position(),
        team.games(),
        team.wins(),
        team.draws(),
        team.losses(),
        team.points()
    );
}

fn cmd_init(file: &Path) -> league_core::Result<()> {
    if file.exists() {
        eprintln!("{} already exists", file.display());
        std::process::exit(1);
    }
    save_standings(file, &[])?;
    println!("Created empty standings file {}", file.display());
    Ok(())
}

fn cmd_show(file: &Path, force: bool) -> league_core::Result<()> {
    let standings = load_table(file, force)?;

    if standings.is_empty() {
        println!("The table is empty.");
        return Ok(());
    }

    print_table_header();
    for team in standings.teams() {
        print_team(team);
    }

    Ok(())
}

fn cmd_top(file: &Path, force: bool, count: usize) -> league_core::Result<()> {
    let standings = load_table(file, force)?;

    if standings.is_empty() {
        println!("The table is empty.");
        return Ok(());
    }

    println!("Top {} teams:", count.min(standings.len()));
    print_table_header();
    for team in standings.top_n(count) {
        print_team(team);
    }

    Ok(())
}

fn cmd_record(
    file: &Path,
    force: bool,
    outcome: OutcomeArg,
    first: &str,
    second: &str,
) -> league_core::Result<()> {
    let mut standings = load_table(file, force)?;

    // resolve both names before mutating anything; on a miss, offer
    // close matches so a typo does not become a new team
    for (name, already_chosen) in [(first, None), (second, Some(first))] {
        if standings.find_by_exact_name(name).is_none() {
            eprintln!("Team '{}' not found.", name);
            let hints = suggest(standings.teams(), name, already_chosen);
            if hints.is_empty() {
                eprintln!("Use 'league-cli add' to create a new team first.");
            } else {
                eprintln!("Did you mean: {}?", hints.join(", "));
            }
            std::process::exit(1);
        }
    }

    standings.apply_result(outcome.into(), first, second)?;
    save_standings(file, standings.teams())?;

    match outcome {
        OutcomeArg::Win => println!("Recorded: {} beat {}.", first, second),
        OutcomeArg::Draw => println!("Recorded: {} drew with {}.", first, second),
    }

    Ok(())
}

fn cmd_add(file: &Path, force: bool, name: &str) -> league_core::Result<()> {
    let mut standings = load_table(file, force)?;

    let similar = suggest(standings.teams(), name, None);
    if !similar.is_empty() {
        eprintln!("Similar teams already exist: {}", similar.join(", "));
    }

    standings.add_team(name)?;
    save_standings(file, standings.teams())?;
    println!("Added team '{}'.", name);

    Ok(())
}

fn cmd_delete(file: &Path, force: bool, query: &str, yes: bool) -> league_core::Result<()> {
    let mut standings = load_table(file, force)?;

    let matches: Vec<String> = standings
        .resolve_team(query)
        .into_iter()
        .map(|t| t.name().to_string())
        .collect();

    match matches.len() {
        0 => {
            eprintln!("No team matching '{}' found.", query);
            std::process::exit(1);
        }
        1 => {}
        n => {
            eprintln!("'{}' matches {} teams:", query, n);
            for name in &matches {
                eprintln!("  {}", name);
            }
            eprintln!("Use a more specific name.");
            std::process::exit(1);
        }
    }

    let name = &matches[0];
    if !yes {
        let prompt = format!("Delete team '{}'?", name);
        if !StdinConfirm.confirm(&prompt) {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }

    standings.delete(name)?;
    save_standings(file, standings.teams())?;
    println!("Deleted team '{}'.", name);

    Ok(())
}

fn cmd_search(file: &Path, force: bool, query: &str) -> league_core::Result<()> {
    let standings = load_table(file, force)?;
    let matches = standings.find_by_substring(query);

    if matches.is_empty() {
        println!("No team matching '{}' found.", query);
        return Ok(());
    }

    print_table_header();
    for team in matches {
        print_team(team);
    }

    Ok(())
}

fn cmd_sort(file: &Path, force: bool, key: SortArg) -> league_core::Result<()> {
    let mut standings = load_table(file, force)?;

    standings.rank(key.into());
    save_standings(file, standings.teams())?;

    print_table_header();
    for team in standings.teams() {
        print_team(team);
    }

    Ok(())
}

fn cmd_export(
    file: &Path,
    force: bool,
    format: &str,
    output: &Path,
) -> league_core::Result<()> {
    let standings = load_table(file, force)?;

    match format.to_lowercase().as_str() {
        "csv" => {
            save_standings(output, standings.teams())?;
        }
        "json" => {
            let out = File::create(output)?;
            let mut writer = BufWriter::new(out);
            let json = serde_json::to_string_pretty(standings.teams())?;
            writeln!(writer, "{}", json)?;
        }
        _ => {
            eprintln!("Unknown format: {}. Supported formats: csv, json", format);
            std::process::exit(1);
        }
    }

    println!(
        "Exported {} team(s) to {}",
        standings.len(),
        output.display()
    );

    Ok(())
}

fn cmd_check(file: &Path) -> league_core::Result<()> {
    let report = load_standings(file)?;

    println!(
        "{}: {} valid team(s), {} problem(s)",
        file.display(),
        report.teams.len(),
        report.errors.len()
    );

    for err in &report.errors {
        println!("  {}", err);
    }

    if !report.is_clean() {
        std::process::exit(1);
    }

    Ok(())
}

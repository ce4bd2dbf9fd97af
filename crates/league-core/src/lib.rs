//! league-core: Core library for maintaining a league standings table
//!
//! This library provides functionality to:
//! - Track teams and their win/draw/loss tallies with derived points
//! - Apply match results and recompute rankings deterministically
//! - Suggest existing team names for fuzzy operator input
//! - Persist the table to a flat comma-delimited file with per-line
//!   validation diagnostics and a confirmed degraded-load path

pub mod codec;
pub mod error;
pub mod matcher;
pub mod standings;
pub mod team;

pub use codec::{
    commit_load, load_standings, parse_standings_str, save_standings, serialize_standings,
    write_standings, ConfirmLoad, LoadReport,
};
pub use error::{Error, LineError, LineErrorKind, Result};
pub use matcher::suggest;
pub use standings::{MatchOutcome, SortKey, Standings};
pub use team::{is_valid_name, Team};

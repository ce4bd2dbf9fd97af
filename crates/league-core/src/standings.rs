//! The standings engine: the owned, ranked collection of teams

use crate::error::{Error, Result};
use crate::team::{is_valid_name, Team};
use serde::{Deserialize, Serialize};

/// How a finished match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// First team won, second team lost
    Win,
    /// Both teams drew
    Draw,
}

/// Comparators for the ranking pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// By points, descending (the default)
    #[default]
    Points,
    /// By wins, descending
    Wins,
    /// By name, ascending
    Name,
}

/// The authoritative ordered collection of teams
///
/// Order is ranking order, not insertion order. All mutation goes
/// through this type; collaborators only read it or hand back a
/// replacement collection for [`Standings::adopt`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standings {
    teams: Vec<Team>,
}

impl Standings {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from teams, ranking by the default comparator
    pub fn from_teams(teams: Vec<Team>) -> Self {
        let mut standings = Self { teams };
        standings.rank(SortKey::Points);
        standings
    }

    /// Read-only view of the teams in current ranking order
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Replace the whole collection with a freshly loaded one and
    /// finish with a default ranking pass
    pub fn adopt(&mut self, teams: Vec<Team>) {
        self.teams = teams;
        self.rank(SortKey::Points);
    }

    /// Add a new team with an empty tally, then re-rank
    pub fn add_team(&mut self, name: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(Error::InvalidName(name.to_string()));
        }
        if self.find_by_exact_name(name).is_some() {
            return Err(Error::DuplicateTeam(name.to_string()));
        }
        self.teams.push(Team::new(name));
        self.rank(SortKey::Points);
        Ok(())
    }

    /// Apply a match result and re-rank
    ///
    /// For [`MatchOutcome::Win`], `first` is the winner and `second`
    /// the loser; for [`MatchOutcome::Draw`] both teams draw. Fails
    /// without mutating anything if either name is unknown.
    pub fn apply_result(&mut self, outcome: MatchOutcome, first: &str, second: &str) -> Result<()> {
        let a = self.index_of(first)?;
        let b = self.index_of(second)?;

        match outcome {
            MatchOutcome::Win => {
                self.teams[a].add_win();
                self.teams[b].add_loss();
            }
            MatchOutcome::Draw => {
                self.teams[a].add_draw();
                self.teams[b].add_draw();
            }
        }

        self.rank(SortKey::Points);
        Ok(())
    }

    /// Reorder the table by the given comparator and reassign positions
    ///
    /// The sort is stable, so teams that compare equal keep their
    /// relative order. Positions are always 1..N afterwards.
    pub fn rank(&mut self, key: SortKey) {
        match key {
            SortKey::Points => self.teams.sort_by(|a, b| b.points().cmp(&a.points())),
            SortKey::Wins => self.teams.sort_by(|a, b| b.wins().cmp(&a.wins())),
            SortKey::Name => self.teams.sort_by(|a, b| a.name().cmp(b.name())),
        }

        for (i, team) in self.teams.iter_mut().enumerate() {
            team.set_position(i as u32 + 1);
        }
    }

    /// Remove a team by exact name and re-rank the remainder
    pub fn delete(&mut self, name: &str) -> Result<Team> {
        let idx = self.index_of(name)?;
        let removed = self.teams.remove(idx);
        self.rank(SortKey::Points);
        Ok(removed)
    }

    /// The first `min(n, len)` teams of the current ranking
    pub fn top_n(&self, n: usize) -> &[Team] {
        &self.teams[..n.min(self.teams.len())]
    }

    /// Case-sensitive exact lookup
    pub fn find_by_exact_name(&self, name: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.name() == name)
    }

    /// Resolve operator input to candidate teams for destructive
    /// actions
    ///
    /// A unique exact name match (case-insensitive) wins outright, so
    /// a team whose name is a prefix of another's stays selectable;
    /// otherwise all case-insensitive substring matches are returned
    /// for the caller to disambiguate.
    pub fn resolve_team(&self, query: &str) -> Vec<&Team> {
        let exact: Vec<&Team> = self
            .teams
            .iter()
            .filter(|t| t.name().eq_ignore_ascii_case(query))
            .collect();
        if exact.len() == 1 {
            return exact;
        }
        self.find_by_substring(query)
    }

    /// Case-insensitive substring search
    pub fn find_by_substring(&self, query: &str) -> Vec<&Team> {
        let query = query.to_lowercase();
        self.teams
            .iter()
            .filter(|t| t.name().to_lowercase().contains(&query))
            .collect()
    }

    fn index_of(&self, name: &str) -> Result<usize> {
        self.teams
            .iter()
            .position(|t| t.name() == name)
            .ok_or_else(|| Error::TeamNotFound(name.to_string()))
    }
}

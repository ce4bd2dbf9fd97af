//! Core team record for the standings table

use serde::{Deserialize, Serialize};

/// A league participant with a name and match tally
///
/// Tallies only ever grow, via the `add_*` methods, which keep
/// `games == wins + draws + losses`. Points are derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    /// Team name, unique within a standings table
    name: String,
    /// 1-based rank, assigned by the ranking pass
    position: u32,
    /// Games played
    games: u32,
    wins: u32,
    draws: u32,
    losses: u32,
}

impl Team {
    /// Create a new team with an empty tally
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: 0,
            games: 0,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    /// Rebuild a team from stored tallies
    ///
    /// Equivalent to replaying `wins` wins, then `draws` draws, then
    /// `losses` losses. Fails when the total game count does not fit
    /// in the counter, so a file cannot smuggle in a wrapped tally.
    pub fn from_tallies(
        name: impl Into<String>,
        wins: u32,
        draws: u32,
        losses: u32,
    ) -> Result<Self, String> {
        let games = wins
            .checked_add(draws)
            .and_then(|g| g.checked_add(losses))
            .ok_or_else(|| format!("game count overflows: {}+{}+{}", wins, draws, losses))?;
        Ok(Self {
            name: name.into(),
            position: 0,
            games,
            wins,
            draws,
            losses,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn games(&self) -> u32 {
        self.games
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Current points: 3 per win, 1 per draw. Recomputed on every call.
    pub fn points(&self) -> u32 {
        self.wins * 3 + self.draws
    }

    /// Record a win (increments wins and games together)
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.games += 1;
    }

    /// Record a draw (increments draws and games together)
    pub fn add_draw(&mut self) {
        self.draws += 1;
        self.games += 1;
    }

    /// Record a loss (increments losses and games together)
    pub fn add_loss(&mut self) {
        self.losses += 1;
        self.games += 1;
    }

    /// Only the ranking pass assigns positions
    pub(crate) fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    /// Structural validation used on load
    ///
    /// The tally-consistency check cannot fail for teams built through
    /// the `add_*` methods; it stays as a guard for future format
    /// changes.
    pub fn validate(&self) -> Result<(), String> {
        if self.games != self.wins + self.draws + self.losses {
            return Err(format!(
                "game count mismatch: games={}, wins+draws+losses={}",
                self.games,
                self.wins + self.draws + self.losses
            ));
        }
        if self.name.is_empty() {
            return Err("empty team name".to_string());
        }
        if !is_valid_name(&self.name) {
            return Err(format!("invalid characters in team name '{}'", self.name));
        }
        Ok(())
    }
}

/// Collection membership is by name
impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Team {}

/// Check that a name uses only English letters and spaces, with at
/// least one letter
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().any(|b| b.is_ascii_alphabetic())
        && name.bytes().all(|b| b.is_ascii_alphabetic() || b == b' ')
}

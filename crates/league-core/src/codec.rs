//! Flat-file codec for the standings table
//!
//! One team per line, five comma-separated fields:
//! `name,games,wins,draws,losses`. No header, no quoting. The `games`
//! field is written for format compatibility but ignored on read;
//! `games` is rederived from the wins/draws/losses tallies.
//!
//! Parse failures are line-scoped diagnostics collected into a
//! [`LoadReport`], never raised individually. Committing a report with
//! diagnostics requires explicit confirmation through [`ConfirmLoad`].

use crate::error::{Error, LineError, LineErrorKind, Result};
use crate::standings::Standings;
use crate::team::Team;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Outcome of parsing a standings file
///
/// `teams` holds the successfully parsed subset in file order; ranking
/// happens when the report is adopted. `errors` holds every line
/// diagnostic, in file order.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub teams: Vec<Team>,
    pub errors: Vec<LineError>,
}

impl LoadReport {
    /// True when every line parsed and validated
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Confirmation oracle for the degraded-load path
///
/// Abstracts the blocking y/n prompt away from the core so that
/// nothing here performs console I/O.
pub trait ConfirmLoad {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Parse standings text into a report
///
/// Each line is handled independently: split on commas (exactly five
/// fields), parse the three tally fields as non-negative integers,
/// rebuild the team from them (equivalent to replaying wins, draws,
/// then losses in order), validate the result, and reject names
/// already seen in this load. The first occurrence of a duplicated
/// name wins. A tally sum that overflows the game counter is a line
/// diagnostic, not an accepted team.
pub fn parse_standings_str(content: &str) -> LoadReport {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(content.as_bytes());

    let mut report = LoadReport::default();

    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map_or(0, |p| p.line());
                report.errors.push(LineError {
                    line,
                    kind: LineErrorKind::Validation {
                        reason: e.to_string(),
                    },
                });
                continue;
            }
        };
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 5 {
            report.errors.push(LineError {
                line,
                kind: LineErrorKind::FieldCount {
                    found: record.len(),
                },
            });
            continue;
        }

        // record[1] is the stored games count; never trusted, always
        // rederived by the replay below
        let tallies: std::result::Result<Vec<u32>, LineErrorKind> = [
            ("wins", &record[2]),
            ("draws", &record[3]),
            ("losses", &record[4]),
        ]
        .into_iter()
        .map(|(field, value)| parse_tally(value, field))
        .collect();

        let tallies = match tallies {
            Ok(t) => t,
            Err(kind) => {
                report.errors.push(LineError { line, kind });
                continue;
            }
        };

        let team = match Team::from_tallies(&record[0], tallies[0], tallies[1], tallies[2]) {
            Ok(team) => team,
            Err(reason) => {
                report.errors.push(LineError {
                    line,
                    kind: LineErrorKind::Validation { reason },
                });
                continue;
            }
        };

        if let Err(reason) = team.validate() {
            report.errors.push(LineError {
                line,
                kind: LineErrorKind::Validation { reason },
            });
            continue;
        }

        if report.teams.iter().any(|t| t.name() == team.name()) {
            report.errors.push(LineError {
                line,
                kind: LineErrorKind::DuplicateName {
                    name: team.name().to_string(),
                },
            });
            continue;
        }

        report.teams.push(team);
    }

    report
}

fn parse_tally(value: &str, field: &'static str) -> std::result::Result<u32, LineErrorKind> {
    value.parse::<u32>().map_err(|_| LineErrorKind::NumericParse {
        field,
        value: value.to_string(),
    })
}

/// Read and parse a standings file
pub fn load_standings<P: AsRef<Path>>(path: P) -> Result<LoadReport> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(parse_standings_str(&content))
}

/// Write teams to any sink, one line per team in collection order
pub fn write_standings<W: io::Write>(sink: W, teams: &[Team]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(sink);

    for team in teams {
        writer.write_record(&[
            team.name().to_string(),
            team.games().to_string(),
            team.wins().to_string(),
            team.draws().to_string(),
            team.losses().to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Serialize teams to standings text (useful for testing)
pub fn serialize_standings(teams: &[Team]) -> Result<String> {
    let mut buf = Vec::new();
    write_standings(&mut buf, teams)?;
    String::from_utf8(buf)
        .map_err(|e| Error::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Overwrite the standings file with the current collection
pub fn save_standings<P: AsRef<Path>>(path: P, teams: &[Team]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    write_standings(&mut writer, teams)?;
    writer.flush()?;
    Ok(())
}

/// Adopt a parsed report into the engine
///
/// Clean reports are adopted directly. Degraded reports ask the
/// oracle whether to proceed with only the valid subset; declining
/// leaves the engine's current collection untouched. Returns whether
/// the report was adopted. Adoption finishes with a default ranking
/// pass.
pub fn commit_load(
    standings: &mut Standings,
    report: LoadReport,
    confirm: &mut dyn ConfirmLoad,
) -> bool {
    if !report.is_clean() {
        let prompt = format!(
            "The file contains {} invalid line(s). Load the valid entries anyway?",
            report.errors.len()
        );
        if !confirm.confirm(&prompt) {
            return false;
        }
    }

    standings.adopt(report.teams);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standings::{MatchOutcome, SortKey};

    struct Always(bool);

    impl ConfirmLoad for Always {
        fn confirm(&mut self, _prompt: &str) -> bool {
            self.0
        }
    }

    #[test]
    fn test_parse_valid_lines() {
        let text = "Arsenal,3,2,1,0\nChelsea,3,1,1,1\n";
        let report = parse_standings_str(text);

        assert!(report.is_clean());
        assert_eq!(report.teams.len(), 2);

        let arsenal = &report.teams[0];
        assert_eq!(arsenal.name(), "Arsenal");
        assert_eq!(arsenal.games(), 3);
        assert_eq!(arsenal.wins(), 2);
        assert_eq!(arsenal.draws(), 1);
        assert_eq!(arsenal.losses(), 0);
        assert_eq!(arsenal.points(), 7);
    }

    #[test]
    fn test_parse_empty_input() {
        let report = parse_standings_str("");
        assert!(report.is_clean());
        assert!(report.teams.is_empty());
    }

    #[test]
    fn test_stored_games_field_is_ignored() {
        // games says 99; the replayed tallies win
        let report = parse_standings_str("Arsenal,99,1,1,0\n");
        assert!(report.is_clean());
        assert_eq!(report.teams[0].games(), 2);
    }

    #[test]
    fn test_field_count_error() {
        let text = "Arsenal,3,2,1,0\nChelsea,3,1,1\n";
        let report = parse_standings_str(text);

        assert_eq!(report.teams.len(), 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 2);
        assert_eq!(
            report.errors[0].kind,
            LineErrorKind::FieldCount { found: 4 }
        );
    }

    #[test]
    fn test_numeric_parse_error() {
        let text = "Arsenal,1,1,0,0\nChelsea,3,x,1,1\nLeeds,1,0,1,0\n";
        let report = parse_standings_str(text);

        assert_eq!(report.teams.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 2);
        assert_eq!(
            report.errors[0].kind,
            LineErrorKind::NumericParse {
                field: "wins",
                value: "x".to_string()
            }
        );
    }

    #[test]
    fn test_negative_tally_is_a_numeric_error() {
        let report = parse_standings_str("Arsenal,1,-1,0,0\n");
        assert!(matches!(
            report.errors[0].kind,
            LineErrorKind::NumericParse { field: "wins", .. }
        ));
    }

    #[test]
    fn test_out_of_range_tally_is_a_numeric_error() {
        // does not fit in the tally counter
        let report = parse_standings_str("Arsenal,0,99999999999,0,0\n");
        assert!(report.teams.is_empty());
        assert!(matches!(
            report.errors[0].kind,
            LineErrorKind::NumericParse { field: "wins", .. }
        ));
    }

    #[test]
    fn test_tally_sum_overflow_is_a_line_error() {
        // each field fits, the game count does not
        let report = parse_standings_str("Arsenal,0,4294967290,10,0\nChelsea,1,1,0,0\n");

        assert_eq!(report.teams.len(), 1);
        assert_eq!(report.teams[0].name(), "Chelsea");
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 1);
        assert!(matches!(
            report.errors[0].kind,
            LineErrorKind::Validation { .. }
        ));
    }

    #[test]
    fn test_large_tallies_are_accepted() {
        let report = parse_standings_str("Arsenal,4000000000,4000000000,0,0\n");
        assert!(report.is_clean());
        assert_eq!(report.teams[0].wins(), 4_000_000_000);
        assert_eq!(report.teams[0].games(), 4_000_000_000);
    }

    #[test]
    fn test_validation_error_on_bad_name() {
        let text = "Arsenal FC1,1,1,0,0\n,1,1,0,0\n";
        let report = parse_standings_str(text);

        assert!(report.teams.is_empty());
        assert_eq!(report.errors.len(), 2);
        assert!(matches!(
            report.errors[0].kind,
            LineErrorKind::Validation { .. }
        ));
        assert!(matches!(
            report.errors[1].kind,
            LineErrorKind::Validation { .. }
        ));
    }

    #[test]
    fn test_duplicate_name_first_occurrence_wins() {
        let text = "Arsenal,1,1,0,0\nChelsea,1,0,1,0\nArsenal,2,1,1,0\n";
        let report = parse_standings_str(text);

        assert_eq!(report.teams.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 3);
        assert_eq!(
            report.errors[0].kind,
            LineErrorKind::DuplicateName {
                name: "Arsenal".to_string()
            }
        );
        // the first occurrence was kept
        assert_eq!(report.teams[0].wins(), 1);
        assert_eq!(report.teams[0].games(), 1);
    }

    #[test]
    fn test_serialize_writes_no_header_and_no_points() {
        let report = parse_standings_str("Arsenal,2,1,1,0\nChelsea,1,0,0,1\n");
        let text = serialize_standings(&report.teams).unwrap();
        assert_eq!(text, "Arsenal,2,1,1,0\nChelsea,1,0,0,1\n");
    }

    #[test]
    fn test_round_trip() {
        let mut standings = Standings::new();
        for name in ["Arsenal", "Chelsea", "Leeds"] {
            standings.add_team(name).unwrap();
        }
        standings
            .apply_result(MatchOutcome::Win, "Leeds", "Arsenal")
            .unwrap();
        standings
            .apply_result(MatchOutcome::Draw, "Chelsea", "Arsenal")
            .unwrap();

        let text = serialize_standings(standings.teams()).unwrap();
        let report = parse_standings_str(&text);
        assert!(report.is_clean());

        let reloaded = Standings::from_teams(report.teams);
        assert_eq!(reloaded.len(), standings.len());
        for (a, b) in reloaded.teams().iter().zip(standings.teams()) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.games(), b.games());
            assert_eq!(a.wins(), b.wins());
            assert_eq!(a.draws(), b.draws());
            assert_eq!(a.losses(), b.losses());
            assert_eq!(a.position(), b.position());
        }
    }

    #[test]
    fn test_commit_clean_load_ranks() {
        let mut standings = Standings::new();
        let report = parse_standings_str("Chelsea,1,0,0,1\nArsenal,1,1,0,0\n");

        assert!(commit_load(&mut standings, report, &mut Always(false)));
        // ranked by points: Arsenal first despite file order
        assert_eq!(standings.teams()[0].name(), "Arsenal");
        assert_eq!(standings.teams()[0].position(), 1);
        assert_eq!(standings.teams()[1].position(), 2);
    }

    #[test]
    fn test_commit_degraded_load_declined_keeps_prior_state() {
        let mut standings = Standings::new();
        standings.add_team("Everton").unwrap();

        let report = parse_standings_str("Arsenal,1,1,0,0\nChelsea,3,x,1,1\n");
        assert!(!report.is_clean());

        assert!(!commit_load(&mut standings, report, &mut Always(false)));
        assert_eq!(standings.len(), 1);
        assert_eq!(standings.teams()[0].name(), "Everton");
    }

    #[test]
    fn test_commit_degraded_load_accepted_takes_valid_subset() {
        let mut standings = Standings::new();
        standings.add_team("Everton").unwrap();

        let report = parse_standings_str("Arsenal,1,1,0,0\nChelsea,3,x,1,1\n");
        assert!(commit_load(&mut standings, report, &mut Always(true)));

        assert_eq!(standings.len(), 1);
        assert_eq!(standings.teams()[0].name(), "Arsenal");
        assert_eq!(standings.teams()[0].position(), 1);
    }

    #[test]
    fn test_rank_after_name_sort_then_reload_is_deterministic() {
        let report = parse_standings_str("Chelsea,0,0,0,0\nArsenal,0,0,0,0\n");
        let mut standings = Standings::from_teams(report.teams);
        standings.rank(SortKey::Name);
        assert_eq!(standings.teams()[0].name(), "Arsenal");

        // saving after a name sort persists that order
        let text = serialize_standings(standings.teams()).unwrap();
        assert!(text.starts_with("Arsenal"));
    }

    #[test]
    fn test_load_missing_file_is_an_io_error() {
        let err = load_standings("definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}

mod screen;
pub(crate) use self::screen::LeaderboardScreen;
use crate::consts;
use serde::{de::Deserializer, Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The top scores, highest first
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub(crate) struct Leaderboard(Vec<LeaderboardEntry>);

impl Leaderboard {
    pub(crate) fn entries(&self) -> &[LeaderboardEntry] {
        &self.0
    }

    pub(crate) fn top_score(&self) -> Option<u32> {
        self.0.first().map(|e| e.score)
    }

    /// Is the entry at the top of the board exactly `name` with `score`?
    pub(crate) fn is_leader(&self, name: &str, score: u32) -> bool {
        self.0.first().is_some_and(|e| e.name == name && e.score == score)
    }

    /// Add an entry, keeping the board sorted and no longer than
    /// [`LEADERBOARD_SIZE`][consts::LEADERBOARD_SIZE].  Among equal scores,
    /// older entries rank higher.
    pub(crate) fn insert(&mut self, entry: LeaderboardEntry) {
        self.0.push(entry);
        self.normalize();
    }

    fn normalize(&mut self) {
        self.0.sort_by(|a, b| b.score.cmp(&a.score));
        self.0.truncate(consts::LEADERBOARD_SIZE);
    }
}

impl FromIterator<LeaderboardEntry> for Leaderboard {
    fn from_iter<I: IntoIterator<Item = LeaderboardEntry>>(iter: I) -> Leaderboard {
        let mut board = Leaderboard(iter.into_iter().collect());
        board.normalize();
        board
    }
}

impl<'de> Deserialize<'de> for Leaderboard {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RawLeaderboard::deserialize(deserializer).map(|raw| match raw {
            RawLeaderboard::Entries(entries) => entries.into_iter().collect(),
            RawLeaderboard::Legacy(score) => Leaderboard(vec![LeaderboardEntry {
                name: String::from(consts::DEFAULT_NAME),
                score: legacy_score(score),
            }]),
        })
    }
}

/// The on-disk forms of a leaderboard: a list of entries, or a bare high
/// score from before names were recorded
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
enum RawLeaderboard {
    Entries(Vec<LeaderboardEntry>),
    Legacy(f64),
}

/// Convert a bare legacy high score, which may have been written as a float,
/// to a score.  Fractions are dropped and out-of-range values saturate.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn legacy_score(score: f64) -> u32 {
    // `as` maps NaN to 0 and saturates at both ends
    score.trunc() as u32
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct LeaderboardEntry {
    pub(crate) name: String,
    pub(crate) score: u32,
}

/// Access to the leaderboard file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct LeaderboardStore {
    /// `None` if no location for the file could be determined
    path: Option<PathBuf>,
}

impl LeaderboardStore {
    pub(crate) fn new(path: Option<PathBuf>) -> LeaderboardStore {
        LeaderboardStore { path }
    }

    /// Return the default leaderboard file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("neonsnake").join("leaderboard.json"))
    }

    pub(crate) fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Read the leaderboard from disk.  A missing, unreadable, or malformed
    /// file is treated as an empty leaderboard.
    pub(crate) fn load(&self) -> Leaderboard {
        match self.try_load() {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(error = ?e, "Could not load leaderboard; starting with an empty one");
                Leaderboard::default()
            }
        }
    }

    /// Add `name` with `score` to the leaderboard on disk and return the
    /// updated leaderboard.  If writing fails, the updated leaderboard is
    /// still returned, along with the error.
    pub(crate) fn save(&self, name: &str, score: u32) -> (Leaderboard, Option<SaveError>) {
        let mut board = self.load();
        board.insert(LeaderboardEntry {
            name: name.to_owned(),
            score,
        });
        match self.write(&board) {
            Ok(()) => {
                tracing::info!(name, score, "Saved score to leaderboard");
                (board, None)
            }
            Err(e) => {
                tracing::warn!(error = ?e, "Could not save leaderboard");
                (board, Some(e))
            }
        }
    }

    fn try_load(&self) -> Result<Leaderboard, LoadError> {
        let path = self.path.as_deref().ok_or_else(LoadError::no_path)?;
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Leaderboard::default())
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    fn write(&self, board: &Leaderboard) -> Result<(), SaveError> {
        let path = self.path.as_deref().ok_or_else(SaveError::no_path)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(board).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save leaderboard to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn no_path() -> Self {
        SaveError(SaveErrorSource::NoPath)
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize leaderboard")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write leaderboard file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read leaderboard from disk")]
struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read leaderboard file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize leaderboard")]
    Deserialize(#[source] serde_json::Error),
}

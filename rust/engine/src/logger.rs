use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{Episode, Game, GameStatus};
use crate::player::{PlayerStatus, Role};
use crate::policy::{Action, Observation};

/// One gambler decision inside an [`EpisodeRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecisionRecord {
    pub observation: Observation,
    pub action: Action,
}

/// Final state of one seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    pub role: Role,
    pub cards: Vec<Card>,
    pub points: u8,
    pub status: PlayerStatus,
}

/// Complete record of an episode: final hands, outcome and every gambler's
/// trajectory. Serialized to JSONL for offline learning and inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Unique identifier for this episode (format: YYYYMMDD-NNNNNN)
    pub episode_id: String,
    /// Seed of the table's deck, when known
    pub seed: Option<u64>,
    /// 0 for an infinite deck
    pub decks: u32,
    pub status: GameStatus,
    /// One reward per gambler
    pub rewards: Vec<f64>,
    /// Seats in turn order, dealer last
    pub seats: Vec<SeatRecord>,
    /// One list of decisions per gambler
    pub trajectories: Vec<Vec<DecisionRecord>>,
    /// Timestamp when the episode was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

impl EpisodeRecord {
    /// Capture `game`'s table right after it produced `episode`.
    pub fn from_game(episode_id: String, seed: Option<u64>, game: &Game, episode: &Episode) -> Self {
        let table = game.table();
        Self {
            episode_id,
            seed,
            decks: table.decks(),
            status: episode.status,
            rewards: episode.rewards.clone(),
            seats: table
                .players()
                .iter()
                .map(|p| SeatRecord {
                    role: p.role(),
                    cards: p.hand().plain_cards(),
                    points: p.points(),
                    status: p.status(),
                })
                .collect(),
            trajectories: episode
                .trajectories
                .iter()
                .map(|t| {
                    t.iter()
                        .map(|&(observation, action)| DecisionRecord {
                            observation,
                            action,
                        })
                        .collect()
                })
                .collect(),
            ts: None,
        }
    }
}

pub fn format_episode_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

pub struct EpisodeLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl EpisodeLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    pub fn with_seq_for_test(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_episode_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &EpisodeRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        if let Some(w) = &mut self.writer {
            w.flush()?;
        }
        Ok(())
    }
}

impl Drop for EpisodeLogger {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

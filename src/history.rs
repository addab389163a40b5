use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::board::Board;
use crate::difficulty::Difficulty;
use crate::game::{MoveListener, MoveSignal};

type HmacSha256 = Hmac<Sha256>;

const SECRET_KEY: &[u8] = b"klondike_rs_save_key_no_peeking";
const HMAC_SIZE: usize = 32;

/// Default number of undo steps kept.
pub const DEFAULT_UNDO_DEPTH: usize = 64;

// ---------------------------------------------------------------------------
// Undo
// ---------------------------------------------------------------------------

/// Bounded stack of board snapshots, filled from `PreMove` notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoHistory {
    snapshots: Vec<Board>,
    depth: usize,
}

impl Default for UndoHistory {
    fn default() -> Self {
        Self::new(DEFAULT_UNDO_DEPTH)
    }
}

impl UndoHistory {
    pub fn new(depth: usize) -> Self {
        UndoHistory {
            snapshots: Vec::new(),
            depth,
        }
    }

    pub fn from_snapshots(mut snapshots: Vec<Board>, depth: usize) -> Self {
        let excess = snapshots.len().saturating_sub(depth);
        snapshots.drain(..excess);
        UndoHistory { snapshots, depth }
    }

    pub fn push(&mut self, board: Board) {
        if self.depth == 0 {
            return;
        }
        self.snapshots.push(board);
        // Drop the oldest snapshot once the cap is exceeded.
        if self.snapshots.len() > self.depth {
            self.snapshots.remove(0);
        }
    }

    /// The most recent snapshot, removed from the history.
    pub fn pop(&mut self) -> Option<Board> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[Board] {
        &self.snapshots
    }
}

impl MoveListener for UndoHistory {
    fn on_move(&mut self, signal: MoveSignal, board: &Board) {
        if signal == MoveSignal::PreMove {
            self.push(board.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// Save file
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no data directory available on this system")]
    NoDataDir,
    #[error("save file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("save file could not be encoded or decoded: {0}")]
    Codec(#[from] bincode::Error),
    #[error("save file is truncated")]
    Truncated,
    #[error("save file signature mismatch")]
    BadSignature,
    #[error("save file does not hold a complete deck")]
    InvalidBoard,
}

/// Everything needed to resume a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedGame {
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    pub board: Board,
    pub undo: Vec<Board>,
}

impl SavedGame {
    /// Load from the default save location.
    pub fn load() -> Result<Self, SaveError> {
        Self::load_from(&Self::file_path()?)
    }

    /// Save to the default save location.
    pub fn save(&self) -> Result<(), SaveError> {
        self.save_to(&Self::file_path()?)
    }

    /// Read and verify a signed save file.
    pub fn load_from(path: &Path) -> Result<Self, SaveError> {
        let mut data = Vec::new();
        File::open(path)?.read_to_end(&mut data)?;

        if data.len() < HMAC_SIZE {
            return Err(SaveError::Truncated);
        }
        let (payload, signature) = data.split_at(data.len() - HMAC_SIZE);

        let mut mac = new_mac();
        mac.update(payload);
        mac.verify_slice(signature)
            .map_err(|_| SaveError::BadSignature)?;

        Ok(bincode::deserialize(payload)?)
    }

    /// Write the save atomically: temp file, fsync, rename.
    pub fn save_to(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let mut data = bincode::serialize(self)?;
        let mut mac = new_mac();
        mac.update(&data);
        data.extend_from_slice(&mac.finalize().into_bytes());

        let mut temp_path = path.to_path_buf();
        temp_path.set_extension("tmp");

        let result = File::create(&temp_path).and_then(|mut file| {
            file.write_all(&data)?;
            file.sync_all()
        });
        if let Err(e) = result {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Check that the board and every undo snapshot hold each card once.
    pub fn validate(&self) -> Result<(), SaveError> {
        if self.board.holds_full_deck() && self.undo.iter().all(Board::holds_full_deck) {
            Ok(())
        } else {
            Err(SaveError::InvalidBoard)
        }
    }

    /// Path to the save file (`save.dat` in the per-user data directory).
    pub fn file_path() -> Result<PathBuf, SaveError> {
        let proj_dirs = ProjectDirs::from("com", "klondike-rs", "klondike-rs")
            .ok_or(SaveError::NoDataDir)?;
        Ok(proj_dirs.data_dir().join("save.dat"))
    }
}

fn new_mac() -> HmacSha256 {
    HmacSha256::new_from_slice(SECRET_KEY).expect("HMAC accepts keys of any length")
}

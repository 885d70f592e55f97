//! Snapshot persistence seam.
//!
//! The whole `Game` record is serde-serializable; a snapshot is its JSON
//! encoding. The engine only consumes the `SnapshotStore` trait; real
//! storage lives with the caller. An in-memory store is provided for tests
//! and single-process use.

use std::collections::HashMap;

use super::game::Game;

/// Encode a game into its snapshot form.
pub fn encode(game: &Game) -> Result<String, serde_json::Error> {
    serde_json::to_string(game)
}

/// Decode a snapshot back into a game.
pub fn decode(snapshot: &str) -> Result<Game, serde_json::Error> {
    serde_json::from_str(snapshot)
}

/// Synchronous save/load of game snapshots keyed by game id.
pub trait SnapshotStore {
    type Error: std::error::Error;

    fn save(&mut self, game: &Game) -> Result<(), Self::Error>;
    fn load(&self, game_id: &str) -> Result<Option<Game>, Self::Error>;
}

/// Keeps snapshots in a map. Useful for tests and single-process servers.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    type Error = serde_json::Error;

    fn save(&mut self, game: &Game) -> Result<(), Self::Error> {
        let encoded = encode(game)?;
        self.snapshots.insert(game.game_id.clone(), encoded);
        Ok(())
    }

    fn load(&self, game_id: &str) -> Result<Option<Game>, Self::Error> {
        self.snapshots
            .get(game_id)
            .map(|s| decode(s))
            .transpose()
    }
}

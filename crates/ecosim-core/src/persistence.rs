//! Save/Load of the whole engine state.
//!
//! Uses bincode. The random number generator is not saved; a loaded engine
//! keeps drawing from its own generator.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::error::{EngineError, EngineResult};
use crate::lobby::Lobby;

/// Version number for save file format (increment when format changes)
pub const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the engine state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    pub version: u32,
    /// Logical clock, advanced once per mutating operation
    pub clock: u64,
    /// Next numeric suffix for generated ids
    pub next_id: u64,
    pub lobbies: Vec<Lobby>,
}

pub fn save_engine<W: Write>(
    writer: W,
    clock: u64,
    next_id: u64,
    lobbies: &[Lobby],
) -> EngineResult<()> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        clock,
        next_id,
        lobbies: lobbies.to_vec(),
    };
    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

pub fn load_engine<R: Read>(reader: R) -> EngineResult<SaveData> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(EngineError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    Ok(save_data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_round_trip() {
        let mut buffer = Vec::new();
        save_engine(&mut buffer, 7, 3, &[]).unwrap();
        let loaded = load_engine(buffer.as_slice()).unwrap();
        assert_eq!(loaded.clock, 7);
        assert_eq!(loaded.next_id, 3);
        assert!(loaded.lobbies.is_empty());
    }

    #[test]
    fn test_version_mismatch() {
        let data = SaveData {
            version: SAVE_VERSION + 1,
            clock: 0,
            next_id: 0,
            lobbies: Vec::new(),
        };
        let buffer = bincode::serialize(&data).unwrap();
        match load_engine(buffer.as_slice()) {
            Err(EngineError::VersionMismatch { expected, found }) => {
                assert_eq!(expected, SAVE_VERSION);
                assert_eq!(found, SAVE_VERSION + 1);
            }
            other => panic!("expected version mismatch, got {:?}", other.map(|d| d.version)),
        }
    }

    #[test]
    fn test_truncated_input() {
        let mut buffer = Vec::new();
        save_engine(&mut buffer, 1, 1, &[]).unwrap();
        buffer.truncate(3);
        assert!(matches!(load_engine(buffer.as_slice()), Err(EngineError::Bincode(_))));
    }
}

//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (staged intent for the frame loop)
//! - Storage (LocalStorage on web, in-memory on native)

pub mod input;
pub mod storage;

pub use input::{Direction, InputState};
pub use storage::{MemoryStore, ScoreStore, StorageError};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorageStore;

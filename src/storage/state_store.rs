use std::{io::ErrorKind, path::PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::{debug, warn};

use crate::character::state::CharacterState;

/// Interface for abstracting persistence of the companion state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StateStore: Sync + Send + 'static {
    /// Last saved state, [None] when nothing was persisted yet.
    async fn load(&self) -> Result<Option<CharacterState>>;

    async fn save(&self, state: &CharacterState) -> Result<()>;
}

const STATE_FILE_NAME: &str = "character.json";

/// The main realization of [StateStore]: one JSON record in the application state directory.
pub struct JsonStateStore {
    state_path: PathBuf,
}

impl JsonStateStore {
    pub fn new(state_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&state_dir)?;

        Ok(Self {
            state_path: state_dir.join(STATE_FILE_NAME),
        })
    }

    async fn read_record(mut file: File) -> Result<String> {
        file.lock_shared()?;
        let mut contents = String::new();
        let result = file.read_to_string(&mut contents).await;
        file.unlock_async().await?;
        result?;
        Ok(contents)
    }

    async fn overwrite_record(file: &mut File, state: &CharacterState) -> Result<()> {
        let mut buffer = serde_json::to_vec(state)?;
        buffer.push(b'\n');

        file.set_len(0).await?;
        file.write_all(&buffer).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl StateStore for JsonStateStore {
    async fn load(&self) -> Result<Option<CharacterState>> {
        debug!("Loading companion state from {:?}", self.state_path);
        let file = match File::open(&self.state_path).await {
            Ok(v) => v,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let contents = Self::read_record(file).await?;

        match serde_json::from_str::<CharacterState>(&contents) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                // Might happen after a shutdown cutting off a write. Start over instead of
                // refusing to load.
                warn!(
                    "Stored companion state in {:?} was corrupted: {e}",
                    self.state_path
                );
                Ok(None)
            }
        }
    }

    async fn save(&self, state: &CharacterState) -> Result<()> {
        let mut file = File::options()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.state_path)
            .await?;

        // Semi-safe acquire-release for a file
        file.lock_exclusive()?;
        let result = Self::overwrite_record(&mut file, state).await;
        file.unlock_async().await?;
        result
    }
}

use crate::codec;
use crate::error::AppError;
use crate::model::TaskList;
use std::path::{Path, PathBuf};

const SAVE_FILE_NAME: &str = "tasks.txt";
const SAVE_PATH_ENV_VAR: &str = "TASKBOT_SAVE_PATH";

/// Default save-file location: the `TASKBOT_SAVE_PATH` environment
/// variable when set, otherwise a per-user config directory.
pub fn save_path() -> Result<PathBuf, AppError> {
    if let Ok(path) = std::env::var(SAVE_PATH_ENV_VAR)
        && !path.trim().is_empty()
    {
        return Ok(PathBuf::from(path));
    }

    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::io("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("taskbot").join(SAVE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::io("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("taskbot")
            .join(SAVE_FILE_NAME))
    }
}

/// Reads and decodes the save file. A missing file is not an error
/// here; `None` lets the caller start a fresh list and create the file.
pub fn load_list(path: &Path) -> Result<Option<TaskList>, AppError> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .map_err(|err| AppError::io(format!("{}: {}", path.display(), err)))?;
    let list = codec::deserialize(&content)
        .map_err(|err| AppError::corrupt_data(format!("{}: {}", path.display(), err.message())))?;

    Ok(Some(list))
}

/// Encodes and writes the whole list, creating parent directories as
/// needed. The file is user-private on Unix.
pub fn save_list(path: &Path, list: &TaskList) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| AppError::io(err.to_string()))?;
    }

    let content = codec::serialize(list)?;
    std::fs::write(path, content).map_err(|err| AppError::io(err.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| AppError::io(err.to_string()))?;
    }

    Ok(())
}

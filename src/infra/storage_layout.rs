use std::{env, path::PathBuf};

use crate::infra::error::AppError;

const APP_DIR_NAME: &str = "domain-finder";
const CACHE_FILE_NAME: &str = "domain-cache.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageLayout {
    pub data_dir: PathBuf,
}

impl StorageLayout {
    pub fn resolve() -> Result<Self, AppError> {
        let data_base = env::var_os("XDG_DATA_HOME")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::data_dir)
            .ok_or_else(|| AppError::StoragePathResolution {
                details: "unable to resolve data base directory (XDG_DATA_HOME/HOME)".into(),
            })?;

        Ok(Self {
            data_dir: data_base.join(APP_DIR_NAME),
        })
    }

    pub fn cache_file(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_NAME)
    }
}

use std::path::PathBuf;

use crate::db::DbPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub upload_dir: PathBuf,
}

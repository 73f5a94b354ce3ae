use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};
use vitrin_application::{AdminUserRecord, AdminUserRepository};
use vitrin_core::{AppError, AppResult};
use vitrin_domain::Username;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredAdminUser {
    username: String,
    display_name: String,
    password_hash: String,
}

impl StoredAdminUser {
    fn into_record(self) -> AppResult<AdminUserRecord> {
        Ok(AdminUserRecord {
            username: Username::new(&self.username)?,
            display_name: self.display_name,
            password_hash: self.password_hash,
        })
    }
}

/// Admin account repository backed by a JSON file.
///
/// The file holds an array of `{username, display_name, password_hash}`
/// objects. Accounts are loaded once; password updates rewrite the whole file
/// through a temporary sibling and a rename so readers never see a partial
/// write.
pub struct FileAdminUserRepository {
    path: PathBuf,
    users: RwLock<Vec<AdminUserRecord>>,
}

impl FileAdminUserRepository {
    /// Loads accounts from `path`. A missing file yields an empty repository.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let users = match tokio::fs::read(&path).await {
            Ok(contents) => parse_users(&contents, &path)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "admin users file not found, admin login is disabled");
                Vec::new()
            }
            Err(error) => {
                return Err(AppError::Internal(format!(
                    "failed to read admin users file '{}': {error}",
                    path.display()
                )));
            }
        };

        info!(path = %path.display(), accounts = users.len(), "loaded admin accounts");

        Ok(Self {
            path,
            users: RwLock::new(users),
        })
    }

    async fn persist(&self, users: &[AdminUserRecord]) -> AppResult<()> {
        let stored = users
            .iter()
            .map(|user| StoredAdminUser {
                username: user.username.as_str().to_owned(),
                display_name: user.display_name.clone(),
                password_hash: user.password_hash.clone(),
            })
            .collect::<Vec<_>>();
        let mut contents = serde_json::to_vec_pretty(&stored).map_err(|error| {
            AppError::Internal(format!("failed to serialize admin users: {error}"))
        })?;
        contents.push(b'\n');

        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &contents).await.map_err(|error| {
            AppError::Internal(format!(
                "failed to write '{}': {error}",
                temp_path.display()
            ))
        })?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to replace admin users file '{}': {error}",
                    self.path.display()
                ))
            })
    }
}

fn parse_users(contents: &[u8], path: &Path) -> AppResult<Vec<AdminUserRecord>> {
    let stored: Vec<StoredAdminUser> = serde_json::from_slice(contents).map_err(|error| {
        AppError::Validation(format!(
            "admin users file '{}' is invalid: {error}",
            path.display()
        ))
    })?;

    let mut users: Vec<AdminUserRecord> = Vec::with_capacity(stored.len());
    for entry in stored {
        let record = entry.into_record()?;
        if users.iter().any(|user| user.username == record.username) {
            return Err(AppError::Conflict(format!(
                "admin user '{}' is defined more than once",
                record.username.as_str()
            )));
        }
        users.push(record);
    }

    Ok(users)
}

#[async_trait]
impl AdminUserRepository for FileAdminUserRepository {
    async fn find_by_username(&self, username: &Username) -> AppResult<Option<AdminUserRecord>> {
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|user| user.username == *username)
            .cloned())
    }

    async fn update_password(&self, username: &Username, password_hash: &str) -> AppResult<()> {
        let mut users = self.users.write().await;
        let mut updated = users.clone();
        let user = updated
            .iter_mut()
            .find(|user| user.username == *username)
            .ok_or_else(|| AppError::NotFound("admin account not found".to_owned()))?;
        user.password_hash = password_hash.to_owned();

        self.persist(&updated).await?;
        *users = updated;
        Ok(())
    }
}

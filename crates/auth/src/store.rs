use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

/// Key under which a profile's password is stored.
pub fn password_key(profile: &str) -> String {
    format!("{profile}:password")
}

/// Passwords kept in a JSON file readable only by the owner.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `~/.atlassian-rest/credentials`.
    pub fn open_default() -> Result<Self> {
        let home = dirs::home_dir().context("Cannot determine home directory")?;
        Ok(Self::new(home.join(".atlassian-rest").join("credentials")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_secret(&self, account: &str, secret: &str) -> Result<()> {
        let mut creds = self.read_all()?;
        creds.insert(account.to_string(), secret.to_string());
        self.write_all(&creds)
    }

    pub fn get_secret(&self, account: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(account))
    }

    pub fn delete_secret(&self, account: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut creds = self.read_all()?;
        if creds.remove(account).is_some() {
            self.write_all(&creds)?;
        }
        Ok(())
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Unable to read credentials file {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Malformed credentials file {}", self.path.display()))
    }

    fn write_all(&self, creds: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let file = options
            .open(&self.path)
            .with_context(|| format!("Unable to write credentials file {}", self.path.display()))?;
        serde_json::to_writer_pretty(file, creds)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("nested").join("credentials"))
    }

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert_eq!(store.get_secret("work:password").unwrap(), None);
        assert!(store.delete_secret("work:password").is_ok());
    }

    #[test]
    fn test_set_get_delete() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        store.set_secret(&password_key("work"), "pw1").unwrap();
        store.set_secret(&password_key("home"), "pw2").unwrap();
        assert_eq!(
            store.get_secret("work:password").unwrap().as_deref(),
            Some("pw1")
        );

        store.delete_secret("work:password").unwrap();
        assert_eq!(store.get_secret("work:password").unwrap(), None);
        assert_eq!(
            store.get_secret("home:password").unwrap().as_deref(),
            Some("pw2")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.set_secret("a", "b").unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "not json").unwrap();

        let err = store.get_secret("a").unwrap_err();
        assert!(err.to_string().contains("Malformed credentials file"));
    }
}

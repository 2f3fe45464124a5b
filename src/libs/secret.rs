//! Encrypted single-value file storage.
//!
//! Values are encrypted with AES-256-CBC (PKCS#7 padding) and stored base64
//! encoded. The key and IV are embedded at build time, see `build.rs`; set
//! `SESSION_KEY` / `SESSION_IV` when building for distribution.

use super::data_storage::DataStorage;
use super::metadata::{APP_METADATA_SESSION_IV, APP_METADATA_SESSION_KEY};
use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

#[derive(Clone, Debug)]
pub struct Secret {
    secret_file_path: PathBuf,
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl Secret {
    /// Secret stored as `file_name` in the application data directory.
    pub fn new(file_name: &str) -> Result<Self> {
        let secret_file_path = DataStorage::new().get_path(file_name)?;
        Ok(Self::at(secret_file_path))
    }

    pub fn at(secret_file_path: PathBuf) -> Self {
        Self {
            secret_file_path,
            key: APP_METADATA_SESSION_KEY.to_vec(),
            iv: APP_METADATA_SESSION_IV.to_vec(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.secret_file_path
    }

    pub fn write(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let encoded = BASE64_STANDARD.encode(cipher.encrypt_vec(value.as_bytes()));

        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = open_private(&self.secret_file_path)?;
        restrict_permissions(&self.secret_file_path)?;
        file.write_all(encoded.as_bytes())?;

        Ok(())
    }

    /// Reads and decrypts the value; `None` when nothing is stored.
    pub fn read(&self) -> Result<Option<String>> {
        let encoded = match fs::read_to_string(&self.secret_file_path) {
            Ok(encoded) => encoded,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let plaintext = cipher.decrypt_vec(&ciphertext)?;

        Ok(Some(String::from_utf8(plaintext)?))
    }

    /// Deletes the stored value. Returns `false` when there was none.
    pub fn remove(&self) -> Result<bool> {
        match fs::remove_file(&self.secret_file_path) {
            Ok(()) => Ok(true),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(false),
            Err(error) => Err(error.into()),
        }
    }
}

/// Opens `path` for writing. A new file is created owner-only from the start.
#[cfg(unix)]
fn open_private(path: &Path) -> Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    Ok(OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)?)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> Result<File> {
    Ok(OpenOptions::new().write(true).create(true).truncate(true).open(path)?)
}

/// Tightens a file that already existed with looser permissions.
#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_is_not_plaintext_and_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let secret = Secret::at(dir.path().join(".token"));

        secret.write("eyJhbGciOi.secret").unwrap();

        let on_disk = fs::read_to_string(secret.path()).unwrap();
        assert!(!on_disk.contains("secret"));
        assert_eq!(secret.read().unwrap().as_deref(), Some("eyJhbGciOi.secret"));
    }

    #[test]
    fn missing_file_reads_as_none_and_removes_as_false() {
        let dir = tempfile::tempdir().unwrap();
        let secret = Secret::at(dir.path().join(".absent"));

        assert_eq!(secret.read().unwrap(), None);
        assert!(!secret.remove().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn stored_file_is_owner_only_even_when_it_existed_before() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let fresh = Secret::at(dir.path().join(".fresh"));
        fresh.write("token").unwrap();
        assert_eq!(fs::metadata(fresh.path()).unwrap().permissions().mode() & 0o777, 0o600);

        let existing = Secret::at(dir.path().join(".existing"));
        fs::write(existing.path(), "old").unwrap();
        fs::set_permissions(existing.path(), fs::Permissions::from_mode(0o644)).unwrap();
        existing.write("token").unwrap();
        assert_eq!(fs::metadata(existing.path()).unwrap().permissions().mode() & 0o777, 0o600);
        assert_eq!(existing.read().unwrap().as_deref(), Some("token"));
    }

    #[test]
    fn corrupted_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let secret = Secret::at(dir.path().join(".broken"));
        fs::write(secret.path(), "not base64 at all!").unwrap();

        assert!(secret.read().is_err());
    }
}

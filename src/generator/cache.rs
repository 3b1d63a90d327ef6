use std::fs;
use std::path::PathBuf;

use tracing::{debug, warn};

pub struct DiskCache {
    base_dir: PathBuf,
}

impl DiskCache {
    pub fn new(subdir: &str) -> Option<Self> {
        let base = dirs::data_dir()?.join("kare").join(subdir);
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Option<Self> {
        fs::create_dir_all(&base_dir).ok()?;
        Some(Self { base_dir })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let path = self.base_dir.join(Self::sanitize_key(key));
        fs::read_to_string(path).ok()
    }

    pub fn put(&self, key: &str, content: &str) -> bool {
        let path = self.base_dir.join(Self::sanitize_key(key));
        match fs::write(&path, content) {
            Ok(()) => {
                debug!(path = %path.display(), "cached download");
                true
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "failed to write cache entry");
                false
            }
        }
    }

    fn sanitize_key(key: &str) -> String {
        key.chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

#[cfg(feature = "network")]
pub fn fetch_url(url: &str) -> Option<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .ok()?;
    let response = match client.get(url).send() {
        Ok(response) => response,
        Err(err) => {
            warn!(url, %err, "download failed");
            return None;
        }
    };
    if response.status().is_success() {
        response.text().ok()
    } else {
        warn!(url, status = %response.status(), "download rejected");
        None
    }
}

#[cfg(not(feature = "network"))]
pub fn fetch_url(_url: &str) -> Option<String> {
    None
}

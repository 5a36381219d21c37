use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Clone)]
pub struct HtmlCache {
    dir: PathBuf,
}

impl HtmlCache {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, url: &str) -> PathBuf {
        let key = format!("{:x}", Sha256::digest(url.as_bytes()));
        self.dir.join(format!("{}.html", key))
    }

    pub async fn get(&self, url: &str) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.path_for(url)).await {
            Ok(html) => Ok(Some(html)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn put(&self, url: &str, html: &str) -> Result<()> {
        tokio::fs::write(self.path_for(url), html).await?;
        Ok(())
    }
}

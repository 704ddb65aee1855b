//! Live preview on disk, opened by the user's browser.
//!
//! Each render writes the composed page to `document.html` and a fresh stamp
//! to `stamp.js`. The browser opens `index.html`, a small host page that shows
//! the document in an `<iframe sandbox="allow-scripts">` and reloads it when the
//! stamp changes. The previewed script runs in the browser's opaque sandbox
//! origin, never inside this application, and cannot reach its token store.

use camino::{Utf8Path, Utf8PathBuf};
use codepad_persistence::atomic_write;
use directories::ProjectDirs;
use std::process::Stdio;
use thiserror::Error;

const QUALIFIER: &str = "com";
const ORG: &str = "codepad";
const APP: &str = "codepad";
const PREVIEW_DIR: &str = "preview";
pub const HOST_FILE: &str = "index.html";
pub const DOCUMENT_FILE: &str = "document.html";
const STAMP_FILE: &str = "stamp.js";
const STAMP_POLL_MS: u32 = 500;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("could not determine the platform cache directory")]
    NoCacheDir,
    #[error("invalid preview path: {0}")]
    InvalidPath(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn host_page() -> String {
    format!(
        r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<title>Codepad preview</title>
<style>html,body{{margin:0;height:100%}}iframe{{display:block;border:0;width:100%;height:100%}}</style>
</head>
<body>
<iframe id="preview" sandbox="allow-scripts" src="{DOCUMENT_FILE}"></iframe>
<script>
(function () {{
  var frame = document.getElementById("preview");
  var seen = null;
  window.codepadStamp = function (stamp) {{
    if (seen !== null && stamp !== seen) {{
      frame.src = "{DOCUMENT_FILE}?v=" + encodeURIComponent(stamp);
    }}
    seen = stamp;
  }};
  setInterval(function () {{
    var tag = document.createElement("script");
    tag.src = "{STAMP_FILE}?t=" + Date.now();
    tag.onload = tag.onerror = function () {{ tag.remove(); }};
    document.head.appendChild(tag);
  }}, {STAMP_POLL_MS});
}})();
</script>
</body>
</html>
"#
    )
}

#[derive(Debug, Clone)]
pub struct PreviewFile {
    dir: Utf8PathBuf,
}

impl PreviewFile {
    /// The per-user `preview` directory under the platform cache dir.
    pub fn in_cache_dir() -> Result<Self, PreviewError> {
        let dirs = ProjectDirs::from(QUALIFIER, ORG, APP).ok_or(PreviewError::NoCacheDir)?;
        let cache = Utf8PathBuf::from_path_buf(dirs.cache_dir().to_path_buf())
            .map_err(|p| PreviewError::InvalidPath(p.to_string_lossy().into_owned()))?;
        Ok(Self::in_dir(cache.join(PREVIEW_DIR)))
    }

    pub fn in_dir(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Host page the browser opens.
    pub fn path(&self) -> Utf8PathBuf {
        self.dir.join(HOST_FILE)
    }

    /// The composed document itself, byte-identical to an export.
    pub fn document_path(&self) -> Utf8PathBuf {
        self.dir.join(DOCUMENT_FILE)
    }

    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    pub fn exists(&self) -> bool {
        self.document_path().exists()
    }

    /// Replace the document, then bump the stamp so open host pages reload.
    pub fn write(&self, html: &[u8]) -> Result<(), PreviewError> {
        std::fs::create_dir_all(&self.dir)?;
        atomic_write(self.document_path().as_std_path(), html)?;

        let host = self.path();
        if !host.exists() {
            atomic_write(host.as_std_path(), host_page().as_bytes())?;
        }

        let stamp = format!("codepadStamp(\"{}\");\n", uuid::Uuid::new_v4());
        atomic_write(self.dir.join(STAMP_FILE).as_std_path(), stamp.as_bytes())?;
        Ok(())
    }

    /// Remove the preview directory. A missing directory is not an error.
    pub fn remove(&self) -> Result<(), PreviewError> {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// `file://` URL of the host page, percent-encoded.
    pub fn url(&self) -> Result<String, PreviewError> {
        let path = std::path::absolute(self.path().as_std_path())?;
        reqwest::Url::from_file_path(&path)
            .map(String::from)
            .map_err(|()| PreviewError::InvalidPath(path.display().to_string()))
    }
}

/// Hand a URL to the desktop's default handler.
pub fn open_url(url: &str) -> Result<(), PreviewError> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

//! # Teto Ext File
//!
//! A [`PageRenderer`] that serves pages saved to disk instead of loading them
//! in a browser. Useful for offline runs, reproducing a past day's table, and
//! tests.
//!
//! Two layouts are supported:
//! - a single saved page, served for every URL;
//! - a directory of pages named after the URL's date token
//!   (`14ago2026.html`), or after the URL's last path segment.
//!
//! Saved pages must be the rendered DOM (what a browser's "save page" or
//! `--dump-dom` produces), since no script runs here.

#![warn(missing_docs)]
#![warn(clippy::all)]

use std::path::{Path, PathBuf};

use teto_html::{Document, ElementPath};
use teto_traits::{PageRenderer, RenderError, RenderedFragment};

/// Extensions tried for directory lookups, in order.
const PAGE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Where saved pages come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// One page for every URL.
    File(PathBuf),
    /// Pages keyed by date token or file name.
    Directory(PathBuf),
}

/// Renderer backed by saved pages.
#[derive(Debug, Clone)]
pub struct FileRenderer {
    source: PageSource,
}

impl FileRenderer {
    /// Serves `path` for every URL.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            source: PageSource::File(path.as_ref().to_path_buf()),
        }
    }

    /// Serves pages from `dir`.
    pub fn from_directory(dir: impl AsRef<Path>) -> Self {
        Self {
            source: PageSource::Directory(dir.as_ref().to_path_buf()),
        }
    }

    /// File or directory, whichever `path` is.
    ///
    /// # Errors
    ///
    /// `RenderError::Io` when `path` does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)
            .map_err(|e| RenderError::Io(format!("{}: {e}", path.display())))?;
        Ok(if metadata.is_dir() {
            Self::from_directory(path)
        } else {
            Self::from_file(path)
        })
    }

    /// The configured source.
    pub fn source(&self) -> &PageSource {
        &self.source
    }

    /// Path of the saved page for `url`.
    ///
    /// # Errors
    ///
    /// `RenderError::Navigation` when a directory has no page for `url`.
    pub fn page_for(&self, url: &str) -> Result<PathBuf, RenderError> {
        match &self.source {
            PageSource::File(path) => Ok(path.clone()),
            PageSource::Directory(dir) => candidates(dir, url)
                .into_iter()
                .find(|p| p.is_file())
                .ok_or_else(|| {
                    RenderError::Navigation(format!("no saved page for {url} in {}", dir.display()))
                }),
        }
    }
}

impl PageRenderer for FileRenderer {
    fn name(&self) -> &'static str {
        "file"
    }

    fn render_and_locate(
        &self,
        url: &str,
        element_path: &str,
    ) -> Result<RenderedFragment, RenderError> {
        let path = ElementPath::parse(element_path)
            .map_err(|e| RenderError::invalid_path(e.path, e.reason))?;
        let page = self.page_for(url)?;
        tracing::debug!(%url, page = %page.display(), "Serving saved page");

        let html = std::fs::read_to_string(&page)
            .map_err(|e| RenderError::Io(format!("{}: {e}", page.display())))?;
        let document = Document::parse(&html);
        let element = document
            .locate(&path)
            .ok_or_else(|| RenderError::element_not_found(element_path))?;
        Ok(RenderedFragment::new(url, element_path, element.outer_html()))
    }
}

/// Exact file name first, then `<stem>.html`/`.htm` for the date token and
/// the URL's file stem.
fn candidates(dir: &Path, url: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut stems = Vec::new();
    if let Some(token) = find_date_token(url) {
        stems.push(token);
    }
    let segment = url
        .split(['?', '#'])
        .next()
        .and_then(|u| u.rsplit('/').next())
        .filter(|s| !s.is_empty());
    if let Some(segment) = segment {
        paths.push(dir.join(segment));
        stems.push(segment.rsplit_once('.').map_or(segment, |(stem, _)| stem));
    }
    for stem in stems {
        for ext in PAGE_EXTENSIONS {
            paths.push(dir.join(format!("{stem}.{ext}")));
        }
    }
    paths
}

/// First `ddmmmyyyy` run in `url` (two digits, three lowercase letters, four
/// digits), e.g. `14ago2026`.
pub fn find_date_token(url: &str) -> Option<&str> {
    const LEN: usize = 9;
    let bytes = url.as_bytes();
    (0..bytes.len().saturating_sub(LEN - 1)).find_map(|start| {
        let window = &bytes[start..start + LEN];
        let shaped = window[..2].iter().all(u8::is_ascii_digit)
            && window[2..5].iter().all(u8::is_ascii_lowercase)
            && window[5..].iter().all(u8::is_ascii_digit);
        let bounded = start == 0 || !bytes[start - 1].is_ascii_digit();
        (shaped && bounded).then(|| &url[start..start + LEN])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str =
        "https://www.anbima.com.br/informacoes/merc-sec/resultados/msec_14ago2026_ntn-b.asp";

    #[test]
    fn test_find_date_token() {
        assert_eq!(find_date_token(URL), Some("14ago2026"));
        assert_eq!(find_date_token("https://example.com/03jan2025.html"), Some("03jan2025"));
        assert_eq!(find_date_token("https://example.com/page"), None);
        assert_eq!(find_date_token("123ago2026"), None);
        assert_eq!(find_date_token(""), None);
    }

    #[test]
    fn test_directory_candidates() {
        let paths = candidates(Path::new("/pages"), URL);
        assert_eq!(paths[0], Path::new("/pages/msec_14ago2026_ntn-b.asp"));
        assert_eq!(paths[1], Path::new("/pages/14ago2026.html"));
        assert!(paths.contains(&PathBuf::from("/pages/msec_14ago2026_ntn-b.html")));
    }
}

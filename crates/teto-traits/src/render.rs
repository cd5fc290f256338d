//! Page rendering collaborator.
//!
//! The published table is filled in by client-side script, so a plain HTTP
//! body is not enough: a renderer loads the page, lets it run, and hands back
//! the outer HTML of one element addressed by an absolute path such as
//! `/html/body/table/tbody/tr/td/div/table[2]`.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Outer HTML of the element located in a rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedFragment {
    /// URL that was rendered.
    pub url: String,
    /// Element path that was located.
    pub element_path: String,
    /// Serialized outer HTML of the located element.
    pub html: String,
}

impl RenderedFragment {
    /// Creates a fragment.
    pub fn new(
        url: impl Into<String>,
        element_path: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            element_path: element_path.into(),
            html: html.into(),
        }
    }
}

/// Renders a page and returns the element at a path.
///
/// One call is one scoped acquisition of whatever the implementation needs
/// (a browser process, a file handle). Implementations release it before
/// returning, on success and on every error path, and must fail with
/// [`RenderError::Timeout`] or [`RenderError::ElementNotFound`] rather than
/// block forever when the element never appears.
pub trait PageRenderer {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Renders `url` and returns the outer HTML of the element at `element_path`.
    fn render_and_locate(
        &self,
        url: &str,
        element_path: &str,
    ) -> Result<RenderedFragment, RenderError>;
}

impl<R: PageRenderer + ?Sized> PageRenderer for &R {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn render_and_locate(
        &self,
        url: &str,
        element_path: &str,
    ) -> Result<RenderedFragment, RenderError> {
        (**self).render_and_locate(url, element_path)
    }
}

impl<R: PageRenderer + ?Sized> PageRenderer for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn render_and_locate(
        &self,
        url: &str,
        element_path: &str,
    ) -> Result<RenderedFragment, RenderError> {
        (**self).render_and_locate(url, element_path)
    }
}

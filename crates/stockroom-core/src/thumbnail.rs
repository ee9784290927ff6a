//! Thumbnail swapper — points the current-image pane at a picked thumbnail.
//!
//! Paths are joined as text with a single `/`. Nothing is escaped or checked
//! against the filesystem; a bad path just yields a source that cannot load.

use crate::config::GalleryConfig;

/// `{base}/{relative}`.
pub fn resolve_image_path(base: &str, relative: &str) -> String {
    format!("{base}/{relative}")
}

/// Source state of the current-image element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSwapper {
    base_path: String,
    selector: String,
    current: Option<String>,
}

impl ImageSwapper {
    pub fn new(config: &GalleryConfig) -> Self {
        Self::with_base(&config.base_path, &config.current_image)
    }

    pub fn with_base(base_path: impl Into<String>, selector: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            selector: selector.into(),
            current: None,
        }
    }

    /// Assign `{base_path}/{relative}` as the current source and return it.
    pub fn pick(&mut self, relative: &str) -> &str {
        let source = resolve_image_path(&self.base_path, relative);
        tracing::debug!(selector = %self.selector, %source, "thumbnail picked");
        self.current.insert(source)
    }

    pub fn current_source(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Identifier of the element whose source is swapped.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_against_default_base() {
        let mut swapper = ImageSwapper::new(&GalleryConfig::default());
        assert_eq!(swapper.current_source(), None);
        assert_eq!(swapper.pick("cats/cat1.png"), "../../static/images/cats/cat1.png");
        assert_eq!(
            swapper.current_source(),
            Some("../../static/images/cats/cat1.png")
        );
        assert_eq!(swapper.selector(), ".current-image");
    }

    #[test]
    fn later_pick_replaces_source() {
        let mut swapper = ImageSwapper::with_base("/img", "#hero");
        swapper.pick("a.png");
        swapper.pick("b.png");
        assert_eq!(swapper.current_source(), Some("/img/b.png"));
    }

    #[test]
    fn no_escaping_or_validation() {
        assert_eq!(resolve_image_path("base", "my pic?.png"), "base/my pic?.png");
        assert_eq!(resolve_image_path("base", ""), "base/");
        assert_eq!(resolve_image_path("base", "../x"), "base/../x");
    }
}

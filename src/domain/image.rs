//! Gallery image model.
//!
//! A [`GalleryItem`] is one search hit as the rest of the plugin sees it,
//! independent of the wire format the gateway decodes it from. A
//! [`ResultPage`] is the batch returned by a single fetch.

use serde::{Deserialize, Serialize};

/// One image in the gallery.
///
/// # Fields
///
/// - `id`: upstream identifier, used only for display
/// - `thumbnail_url`: medium-size rendition shown in the grid
/// - `caption`: comma-separated tags, used as the card caption
/// - `full_url`: full-resolution rendition opened by the viewer
/// - `width` / `height`: full-resolution pixel dimensions (0 when unknown)
/// - `author`: uploader name (empty when unknown)
/// - `likes`: upstream like count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: u64,
    pub thumbnail_url: String,
    pub caption: String,
    pub full_url: String,
    pub width: u32,
    pub height: u32,
    pub author: String,
    pub likes: u64,
}

impl GalleryItem {
    /// Creates an item with just the three references every hit carries.
    ///
    /// # Examples
    ///
    /// ```
    /// use galleria::domain::GalleryItem;
    ///
    /// let item = GalleryItem::new(7, "thumb.jpg", "cat, kitten", "full.jpg");
    /// assert_eq!(item.caption, "cat, kitten");
    /// assert_eq!(item.dimensions(), None);
    /// ```
    #[must_use]
    pub fn new(
        id: u64,
        thumbnail_url: impl Into<String>,
        caption: impl Into<String>,
        full_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            thumbnail_url: thumbnail_url.into(),
            caption: caption.into(),
            full_url: full_url.into(),
            width: 0,
            height: 0,
            author: String::new(),
            likes: 0,
        }
    }

    /// Returns `"WIDTHxHEIGHT"` when both dimensions are known.
    #[must_use]
    pub fn dimensions(&self) -> Option<String> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(format!("{}x{}", self.width, self.height))
        }
    }
}

/// The items returned by one fetch plus the total the API reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    /// Items in the order the API returned them.
    pub items: Vec<GalleryItem>,

    /// Number of hits reachable through pagination for this query.
    pub total_hits: u64,
}

impl ResultPage {
    #[must_use]
    pub const fn new(items: Vec<GalleryItem>, total_hits: u64) -> Self {
        Self { items, total_hits }
    }

    /// A page reporting zero hits.
    #[must_use]
    pub const fn empty() -> Self {
        Self::new(Vec::new(), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_require_both_sides() {
        let mut item = GalleryItem::new(1, "t", "c", "f");
        item.width = 1920;
        assert_eq!(item.dimensions(), None);
        item.height = 1280;
        assert_eq!(item.dimensions().as_deref(), Some("1920x1280"));
    }
}

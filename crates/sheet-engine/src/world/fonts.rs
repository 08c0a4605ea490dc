//! Font loading and caching
//!
//! Fonts come from the `typst-assets` bundle and are loaded once into
//! a process-wide cache shared by every compilation.

use std::sync::OnceLock;

use typst::foundations::Bytes;
use typst::text::{Font, FontBook};

/// Global font cache singleton
static FONT_CACHE: OnceLock<FontCache> = OnceLock::new();

/// Get the global font cache, initializing it if necessary
pub fn global_font_cache() -> &'static FontCache {
    FONT_CACHE.get_or_init(FontCache::new)
}

/// A cache of fonts available for compilation
#[derive(Debug)]
pub struct FontCache {
    /// The font book containing metadata about available fonts
    book: FontBook,
    /// The actual font data
    fonts: Vec<Font>,
}

impl FontCache {
    /// Create a new cache from the embedded font bundle
    pub fn new() -> Self {
        let mut book = FontBook::new();
        let mut fonts = Vec::new();

        for data in typst_assets::fonts() {
            let buffer = Bytes::from_static(data);
            for font in Font::iter(buffer) {
                book.push(font.info().clone());
                fonts.push(font);
            }
        }

        tracing::info!("font cache initialized with {} fonts", fonts.len());

        Self { book, fonts }
    }

    /// Get the font book
    pub fn book(&self) -> &FontBook {
        &self.book
    }

    /// Get a font by index
    pub fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    /// Get the number of fonts
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

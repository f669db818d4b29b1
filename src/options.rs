//! Generation options.

/// Default cap on uploaded template size (20 MiB).
pub const DEFAULT_MAX_TEMPLATE_BYTES: usize = 20 * 1024 * 1024;

/// How the composer styles text in placeholders that the layout leaves unformatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackStyling {
    /// Emit no run formatting; everything inherits from layout and master
    Inherit,
    /// Apply the theme's major/minor typeface to title/body runs
    #[default]
    ThemeFonts,
}

/// Options controlling template inspection and slide composition.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Templates larger than this are rejected before parsing
    pub max_template_bytes: usize,

    /// Maximum bullet paragraphs per slide; excess bullets are dropped
    pub max_bullets: usize,

    /// Maximum characters per bullet; longer bullets are truncated
    pub max_bullet_chars: usize,

    /// Maximum characters per title
    pub max_title_chars: usize,

    /// Maximum distinct images collected from the template for reuse
    pub image_pool_limit: usize,

    /// Styling applied to placeholders without explicit formatting
    pub fallback_styling: FallbackStyling,

    /// Title font size (hundredths of a point) used when the layout's title
    /// is larger than [`GenerateOptions::TITLE_CLAMP_THRESHOLD`]
    pub max_title_font_size: u32,

    /// Keep slides already present in the template ahead of the new ones
    pub keep_existing_slides: bool,
}

impl GenerateOptions {
    /// Layout title sizes above 48 pt are clamped.
    pub const TITLE_CLAMP_THRESHOLD: u32 = 4800;

    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template size cap in bytes.
    pub fn with_max_template_bytes(mut self, bytes: usize) -> Self {
        self.max_template_bytes = bytes;
        self
    }

    /// Set the bullet count cap.
    pub fn with_max_bullets(mut self, count: usize) -> Self {
        self.max_bullets = count;
        self
    }

    /// Set the per-bullet character cap.
    pub fn with_max_bullet_chars(mut self, chars: usize) -> Self {
        self.max_bullet_chars = chars.max(1);
        self
    }

    /// Set the title character cap.
    pub fn with_max_title_chars(mut self, chars: usize) -> Self {
        self.max_title_chars = chars.max(1);
        self
    }

    /// Set how many distinct template images may be reused.
    pub fn with_image_pool_limit(mut self, limit: usize) -> Self {
        self.image_pool_limit = limit;
        self
    }

    /// Set the fallback styling policy.
    pub fn with_fallback_styling(mut self, styling: FallbackStyling) -> Self {
        self.fallback_styling = styling;
        self
    }

    /// Set the clamped title size in points.
    pub fn with_max_title_font_pt(mut self, points: u32) -> Self {
        self.max_title_font_size = points * 100;
        self
    }

    /// Keep the template's own slides.
    pub fn with_keep_existing_slides(mut self, keep: bool) -> Self {
        self.keep_existing_slides = keep;
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            max_template_bytes: DEFAULT_MAX_TEMPLATE_BYTES,
            max_bullets: 8,
            max_bullet_chars: 200,
            max_title_chars: 120,
            image_pool_limit: 8,
            fallback_styling: FallbackStyling::ThemeFonts,
            max_title_font_size: 4000,
            keep_existing_slides: false,
        }
    }
}

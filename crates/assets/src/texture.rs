use crate::image_data::TextureChannel;

/// Texel filtering for magnification and minification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    Nearest,
    #[default]
    Linear,
}

/// Addressing outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Wrap {
    #[default]
    Repeat,
    ClampToEdge,
}

/// Sampling parameters of a 2D texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TextureDesc {
    pub channel: TextureChannel,
    pub mag_filter: Filter,
    pub min_filter: Filter,
    pub wrap: Wrap,
}

impl TextureDesc {
    pub fn new(channel: TextureChannel) -> Self {
        Self {
            channel,
            ..Self::default()
        }
    }

    pub fn with_filters(mut self, mag: Filter, min: Filter) -> Self {
        self.mag_filter = mag;
        self.min_filter = min;
        self
    }

    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }
}

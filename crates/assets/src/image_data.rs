use crate::error::AssetError;
use std::path::Path;

/// How the GPU should interpret the channels of an image.
///
/// Pixel data is always stored as RGBA8; the channel only selects between
/// linear and sRGB sampling and records whether alpha is meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextureChannel {
    Rgb,
    Rgba,
    Srgb,
    #[default]
    Srgba,
}

impl TextureChannel {
    pub fn is_srgb(self) -> bool {
        matches!(self, Self::Srgb | Self::Srgba)
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba | Self::Srgba)
    }
}

/// A decoded RGBA8 image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Decode a `.png`/`.jpg` file into RGBA8.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let decoded = image::open(path).map_err(|source| match source {
            image::ImageError::IoError(source) => AssetError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => AssetError::Image {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let rgba = decoded.to_rgba8();
        tracing::debug!(path = %path.display(), width = rgba.width(), height = rgba.height(), "image decoded");
        Ok(Self {
            width: rgba.width(),
            height: rgba.height(),
            pixels: rgba.into_raw(),
        })
    }

    /// A `width` x `height` image filled with one RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_decodes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let img = ImageData::open(&path).unwrap();
        assert_eq!((img.width, img.height), (4, 2));
        assert_eq!(img.pixels.len(), 4 * 2 * 4);
        assert_eq!(&img.pixels[..4], &[10, 20, 30, 255]);
        assert_eq!(img.bytes_per_row(), 16);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ImageData::open("does/not/exist.png").unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }

    #[test]
    fn garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.png");
        std::fs::write(&path, b"not a png").unwrap();
        let err = ImageData::open(&path).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
    }

    #[test]
    fn solid_fills_every_pixel() {
        let img = ImageData::solid(3, 3, [1, 2, 3, 4]);
        assert!(img.is_square());
        assert_eq!(img.pixels.len(), 36);
        assert!(img.pixels.chunks(4).all(|p| p == [1, 2, 3, 4]));
    }

    #[test]
    fn channel_flags() {
        assert!(TextureChannel::Srgba.is_srgb());
        assert!(!TextureChannel::Rgb.is_srgb());
        assert!(TextureChannel::Rgba.has_alpha());
        assert!(!TextureChannel::Srgb.has_alpha());
    }
}

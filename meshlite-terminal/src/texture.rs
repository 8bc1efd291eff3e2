/// Texture decoding through the `image` crate
use std::path::Path;

use meshlite_core::{GpuBackend, TextureHandle, TextureImage};

/// Decode an image file into tightly packed RGB or RGBA bytes
pub fn decode_texture(path: &Path) -> Result<TextureImage, image::ImageError> {
    let img = image::open(path)?;
    let (width, height) = (img.width(), img.height());

    let (channels, pixels) = if img.color().has_alpha() {
        (4, img.to_rgba8().into_raw())
    } else {
        (3, img.to_rgb8().into_raw())
    };

    Ok(TextureImage {
        width,
        height,
        channels,
        pixels,
    })
}

/// Decode and upload a texture.
///
/// A texture that fails to load is reported and replaced by
/// [`TextureHandle::NONE`]; rendering carries on untextured.
pub fn load_texture<B: GpuBackend>(backend: &mut B, path: impl AsRef<Path>) -> TextureHandle {
    let path = path.as_ref();
    match decode_texture(path) {
        Ok(image) => {
            log::debug!(
                "Loaded texture {} ({}x{}, {} channels)",
                path.display(),
                image.width,
                image.height,
                image.channels
            );
            backend.create_texture(&image)
        }
        Err(e) => {
            log::error!("Failed to load texture {}: {}", path.display(), e);
            TextureHandle::NONE
        }
    }
}

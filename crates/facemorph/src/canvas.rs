use facemorph_image::{Image, ImageSize};

use crate::error::MorphError;
use crate::render::TrianglePatch;

/// The output image of a morph, accumulated one triangle at a time.
///
/// Writes go through `&mut self`, so a triangle is composited completely
/// before the next one touches the canvas.
#[derive(Clone, Debug)]
pub struct Canvas<const C: usize> {
    image: Image<f32, C>,
}

impl<const C: usize> Canvas<C> {
    /// A zero initialized canvas.
    pub fn new(size: ImageSize) -> Result<Self, MorphError> {
        Ok(Self {
            image: Image::from_size_val(size, 0.0)?,
        })
    }

    /// Size of the canvas in pixels.
    pub fn size(&self) -> ImageSize {
        self.image.size()
    }

    /// Blend a patch into the canvas.
    ///
    /// Within the patch rectangle every pixel becomes
    /// `mask * patch + (1 - mask) * canvas`: pixels inside the triangle are
    /// overwritten and the rest of the rectangle is kept as is.
    pub fn composite(&mut self, patch: &TrianglePatch<C>) {
        let rect = patch.rect.clip_to(self.size());
        if rect.is_empty() {
            return;
        }

        let (ox, oy) = (rect.x as usize, rect.y as usize);
        // offset of the visible part inside the patch
        let dx = (rect.x - patch.rect.x) as usize;
        let dy = (rect.y - patch.rect.y) as usize;

        for y in 0..rect.height {
            for x in 0..rect.width {
                let (px, py) = (x + dx, y + dy);
                let m = patch.mask.pixel(px, py)[0];
                if m == 0.0 {
                    continue;
                }

                let src = patch.pixels.pixel(px, py);
                let dst = self.image.pixel_mut(ox + x, oy + y);
                for (d, &s) in dst.iter_mut().zip(src) {
                    *d = m * s + (1.0 - m) * *d;
                }
            }
        }
    }

    /// Consume the canvas and return the accumulated image.
    pub fn into_image(self) -> Image<f32, C> {
        self.image
    }
}

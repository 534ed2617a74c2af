use facemorph_image::{Image, ImageError, ImageSize};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

/// An axis aligned rectangle with integer coordinates.
///
/// The origin may be negative so that rectangles computed from geometry
/// lying partly outside an image can be represented before clipping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Rect {
    /// x-coordinate of the top-left corner.
    pub x: i64,
    /// y-coordinate of the top-left corner.
    pub y: i64,
    /// Width of the rectangle in pixels.
    pub width: usize,
    /// Height of the rectangle in pixels.
    pub height: usize,
}

impl Rect {
    /// The tightest integer rectangle covering all the given points.
    ///
    /// Follows OpenCV `boundingRect` for real valued points: the origin is the
    /// floor of the minimum and the far edge includes the floor of the maximum.
    /// Returns an empty rectangle for an empty point list.
    ///
    /// # Examples
    ///
    /// ```
    /// use facemorph_imgproc::crop::Rect;
    ///
    /// let r = Rect::bounding(&[(1.5, 2.0), (4.2, 3.9), (2.0, 7.0)]);
    /// assert_eq!(r, Rect { x: 1, y: 2, width: 4, height: 6 });
    /// ```
    pub fn bounding(points: &[(f32, f32)]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let (mut min_x, mut min_y) = (f32::INFINITY, f32::INFINITY);
        let (mut max_x, mut max_y) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
        for &(x, y) in points {
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }

        let x = to_coord(min_x);
        let y = to_coord(min_y);
        let width = extent(x, to_coord(max_x));
        let height = extent(y, to_coord(max_y));

        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Intersection of the rectangle with the extent of an image of the given size.
    pub fn clip_to(&self, size: ImageSize) -> Self {
        let x0 = self.x.clamp(0, size.width as i64);
        let y0 = self.y.clamp(0, size.height as i64);
        let x1 = self.x_end().clamp(0, size.width as i64);
        let y1 = self.y_end().clamp(0, size.height as i64);

        Self {
            x: x0,
            y: y0,
            width: (x1 - x0).max(0) as usize,
            height: (y1 - y0).max(0) as usize,
        }
    }

    /// Returns true if the point lies in the half open region `[x, x + w) x [y, y + h)`.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x as f32
            && y >= self.y as f32
            && x < self.x_end() as f32
            && y < self.y_end() as f32
    }

    /// One past the last column, saturating.
    fn x_end(&self) -> i64 {
        self.x
            .saturating_add(i64::try_from(self.width).unwrap_or(i64::MAX))
    }

    /// One past the last row, saturating.
    fn y_end(&self) -> i64 {
        self.y
            .saturating_add(i64::try_from(self.height).unwrap_or(i64::MAX))
    }

    /// Returns true if the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The size of the rectangle as an image size.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width,
            height: self.height,
        }
    }
}

/// Largest magnitude of a rectangle coordinate, so that `x + width` fits in `i64`.
const COORD_LIMIT: f32 = (1u64 << 61) as f32;

/// Floor of a real coordinate, clamped to `[-COORD_LIMIT, COORD_LIMIT]`.
fn to_coord(v: f32) -> i64 {
    v.floor().clamp(-COORD_LIMIT, COORD_LIMIT) as i64
}

/// Number of integer positions in `[lo, hi]`, zero if `hi < lo`.
fn extent(lo: i64, hi: i64) -> usize {
    usize::try_from(hi.saturating_sub(lo).saturating_add(1)).unwrap_or(0)
}

/// Crop an image to a specified region.
///
/// The size of the region is given by the size of `dst`.
///
/// # Arguments
///
/// * `src` - The source image to crop.
/// * `dst` - The destination image to store the cropped image.
/// * `x` - The x-coordinate of the top-left corner of the region to crop.
/// * `y` - The y-coordinate of the top-left corner of the region to crop.
///
/// # Errors
///
/// Returns an error if the region does not fit inside `src`.
///
/// # Examples
///
/// ```rust
/// use facemorph_image::{Image, ImageSize};
/// use facemorph_imgproc::crop::crop_image;
///
/// let image = Image::<_, 1>::new(ImageSize { width: 4, height: 4 }, vec![
///     0u8, 1, 2, 3,
///     4u8, 5, 6, 7,
///     8u8, 9, 10, 11,
///     12u8, 13, 14, 15
/// ]).unwrap();
///
/// let mut cropped = Image::<_, 1>::from_size_val(ImageSize { width: 2, height: 2 }, 0u8).unwrap();
///
/// crop_image(&image, &mut cropped, 1, 1).unwrap();
///
/// assert_eq!(cropped.as_slice(), &[5u8, 6, 9, 10]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let dst_cols = dst.cols();

    if x + dst_cols > src.cols() || y + dst.rows() > src.rows() {
        return Err(ImageError::PixelIndexOutOfBounds(
            x + dst_cols,
            y + dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    if dst.size().is_empty() {
        return Ok(());
    }

    let src_cols = src.cols();
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(dst_cols * C)
        .enumerate()
        .for_each(|(i, dst_row)| {
            // get the slice at the top left corner
            let offset = (y + i) * src_cols * C + x * C;
            dst_row.copy_from_slice(&src_data[offset..offset + dst_cols * C]);
        });

    Ok(())
}

/// Crop the region covered by `rect` into a newly allocated image.
///
/// The rectangle must already be clipped to the source extent.
pub fn crop_rect<T, const C: usize>(src: &Image<T, C>, rect: &Rect) -> Result<Image<T, C>, ImageError>
where
    T: Copy + Default + Send + Sync,
{
    let mut dst = Image::from_size_val(rect.size(), T::default())?;
    crop_image(src, &mut dst, rect.x.max(0) as usize, rect.y.max(0) as usize)?;
    Ok(dst)
}

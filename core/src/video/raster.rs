use crate::error::RasterError;

/// Nominal scan width including overscan, in pixels.
pub const DEFAULT_WIDTH: u32 = 800;

/// Nominal scan height including overscan, in lines.
pub const DEFAULT_HEIGHT: u32 = 525;

/// Geometry of the target raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::Empty { width, height });
        }
        // RGBA byte length must fit in usize as well as the pixel count.
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(RasterError::TooLarge { width, height })?;
        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel count of one frame.
    pub fn capacity(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Raster {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const WHITE: Pixel = Pixel::opaque(0xFF, 0xFF, 0xFF);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

/// Fixed-capacity frame in raster-scan order.
///
/// Starts filled with opaque white so unwritten regions are visible.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    raster: Raster,
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    pub fn new(raster: Raster) -> Self {
        Self {
            raster,
            pixels: vec![Pixel::WHITE; raster.capacity()],
        }
    }

    pub fn raster(&self) -> Raster {
        self.raster
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.raster.width || y >= self.raster.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.raster.width as usize + x as usize)
            .copied()
    }

    /// Store `pixel` at raster index `index`. Out-of-range writes are dropped.
    pub(crate) fn set(&mut self, index: usize, pixel: Pixel) {
        if let Some(slot) = self.pixels.get_mut(index) {
            *slot = pixel;
        }
    }

    /// Serialize into row-major RGBA bytes, 4 per pixel.
    ///
    /// `out` must hold at least `capacity * 4` bytes; any excess is untouched.
    pub fn write_rgba(&self, out: &mut [u8]) {
        for (dst, p) in out.chunks_exact_mut(4).zip(&self.pixels) {
            dst.copy_from_slice(&[p.r, p.g, p.b, p.a]);
        }
    }

    /// Freshly allocated RGBA copy of the frame.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.pixels.len() * 4];
        self.write_rgba(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_raster_is_nominal_scan() {
        let raster = Raster::default();
        assert_eq!(raster.capacity(), 800 * 525);
    }

    #[test]
    fn test_empty_raster_rejected() {
        assert_eq!(
            Raster::new(0, 10),
            Err(RasterError::Empty {
                width: 0,
                height: 10
            })
        );
    }

    #[test]
    fn test_new_buffer_is_opaque_white() {
        let fb = FrameBuffer::new(Raster::new(3, 2).unwrap());
        assert!(fb.pixels().iter().all(|p| *p == Pixel::WHITE));
        assert_eq!(fb.pixel(3, 0), None);
    }

    #[test]
    fn test_write_rgba_is_row_major() {
        let mut fb = FrameBuffer::new(Raster::new(2, 2).unwrap());
        fb.set(1, Pixel::opaque(1, 2, 3));
        fb.set(2, Pixel::opaque(4, 5, 6));
        fb.set(99, Pixel::opaque(7, 7, 7));

        let bytes = fb.to_rgba();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[4..8], &[1, 2, 3, 0xFF]);
        assert_eq!(&bytes[8..12], &[4, 5, 6, 0xFF]);
        assert_eq!(fb.pixel(0, 1), Some(Pixel::opaque(4, 5, 6)));
    }
}

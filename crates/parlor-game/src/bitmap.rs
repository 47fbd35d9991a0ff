/// Raw pixel data for an image owned by game state (dynamic sprites, room
/// backgrounds, drawing surfaces). The engine's renderer converts these to
/// textures; here they are just bytes with a declared geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapData {
    pub width: i32,
    pub height: i32,
    /// Bits per pixel; one of 8, 16 or 32.
    pub color_depth: i32,
    pub pixels: Vec<u8>,
}

impl BitmapData {
    /// Allocates a zero-filled bitmap of the given geometry.
    pub fn new(width: i32, height: i32, color_depth: i32) -> Self {
        let bpp = Self::bytes_per_pixel(color_depth).unwrap_or(0);
        let len = width.max(0) as usize * height.max(0) as usize * bpp;
        Self {
            width,
            height,
            color_depth,
            pixels: vec![0; len],
        }
    }

    pub fn bytes_per_pixel(color_depth: i32) -> Option<usize> {
        match color_depth {
            8 => Some(1),
            16 => Some(2),
            32 => Some(4),
            _ => None,
        }
    }

    /// Pixel byte count implied by the declared geometry, if the depth is
    /// one the engine supports.
    pub fn expected_len(&self) -> Option<u64> {
        let bpp = Self::bytes_per_pixel(self.color_depth)?;
        if self.width < 0 || self.height < 0 {
            return None;
        }
        Some(self.width as u64 * self.height as u64 * bpp as u64)
    }
}

impl Default for BitmapData {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            color_depth: 32,
            pixels: Vec::new(),
        }
    }
}

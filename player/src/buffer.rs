//! Owned pixel storage for decoded frames.
//!
//! The buffer is sized once per open to the post-fit working dimensions and
//! is exclusively owned by the player; decoders write into it, the sink reads
//! from it, nothing else touches it.

/// An ARGB8888 pixel buffer (BGRA byte order, stride = width * 4).
#[derive(Debug)]
pub struct FrameBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    /// Allocate a zeroed buffer for the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * Self::BYTES_PER_PIXEL;
        Self {
            data: vec![0; size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.width as usize * Self::BYTES_PER_PIXEL
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Fill the whole buffer with one color.
    pub fn fill_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        let color = [b, g, r, a]; // ARGB8888 in native byte order
        for chunk in self.data.chunks_exact_mut(Self::BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&color);
        }
    }
}

/// Parse a hex tint string (e.g., "#FF5733" or "80FF5733") to packed ARGB.
///
/// Six digits are treated as fully opaque. Returns `None` for anything that
/// is not 6 or 8 hex digits.
pub fn parse_tint(tint: &str) -> Option<u32> {
    let tint = tint.trim_start_matches('#');

    let (alpha, rgb) = match tint.len() {
        6 => (0xFF, tint),
        8 => (u8::from_str_radix(&tint[0..2], 16).ok()?, &tint[2..]),
        _ => return None,
    };

    let r = u8::from_str_radix(&rgb[0..2], 16).ok()?;
    let g = u8::from_str_radix(&rgb[2..4], 16).ok()?;
    let b = u8::from_str_radix(&rgb[4..6], 16).ok()?;

    Some(u32::from_be_bytes([alpha, r, g, b]))
}

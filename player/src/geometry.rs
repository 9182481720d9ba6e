//! Aspect-fit geometry for placing decoded video inside a host rectangle.
//!
//! The fit is computed once per open: the media is rescaled when it overflows
//! the region on either axis or underflows it on both axes, then centered
//! axis-by-axis. The working dimensions returned here also size the frame
//! buffer and sink, so scaling happens once at open time rather than on every
//! draw.

/// Intrinsic decoded frame size, fixed for the lifetime of an open stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaGeometry {
    pub width: u32,
    pub height: u32,
}

/// A target rectangle supplied by the host, possibly overscan-adjusted.
///
/// Valid regions satisfy `right > left` and `bottom > top`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Region {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Result of [`compute_fit`]: where to draw, and at what working size.
///
/// `dest` is centered within the input region and never exceeds it. `width`
/// and `height` are the post-fit media dimensions that the frame buffer and
/// sink are allocated at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fit {
    pub dest: Region,
    pub width: u32,
    pub height: u32,
}

/// Fit `source` into `region` preserving aspect ratio.
///
/// The media is rescaled by `min(region_w/w, region_h/h)` when it is larger
/// than the region on either axis, or smaller than the region on both axes;
/// otherwise it is shown at native size. Each axis whose working dimension is
/// smaller than the region gets symmetric centering insets.
///
/// A source with a zero dimension yields an identity fit (the caller is
/// expected to reject zero-area streams before getting here).
pub fn compute_fit(source: MediaGeometry, region: Region) -> Fit {
    let screen_w = region.width();
    let screen_h = region.height();

    let mut media_w = source.width as i32;
    let mut media_h = source.height as i32;

    if media_w > 0
        && media_h > 0
        && ((media_w > screen_w || media_h > screen_h)
            || (media_w < screen_w && media_h < screen_h))
    {
        let scale_w = screen_w as f64 / media_w as f64;
        let scale_h = screen_h as f64 / media_h as f64;
        let scale = scale_w.min(scale_h);

        media_w = (media_w as f64 * scale) as i32;
        media_h = (media_h as f64 * scale) as i32;
    }

    // Symmetric insets on every axis the media does not fill. The inset is
    // zero on an axis where the working dimension matches the region.
    let inset_x = (screen_w - media_w).max(0) / 2;
    let inset_y = (screen_h - media_h).max(0) / 2;

    Fit {
        dest: Region::new(
            region.left + inset_x,
            region.top + inset_y,
            region.right - inset_x,
            region.bottom - inset_y,
        ),
        width: media_w.max(0) as u32,
        height: media_h.max(0) as u32,
    }
}

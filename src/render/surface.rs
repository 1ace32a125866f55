// src/render/surface.rs
//! Offscreen pixel surface the strategies draw into.
//!
//! Wraps an RGBA image buffer with the small set of primitives the
//! visualizations need. Colors carry their own alpha; drawing blends
//! source-over. The surface is never hard-cleared between frames while
//! running: each frame starts with a partial [`fade`](Surface::fade)
//! toward the background so trails accumulate.

use image::{DynamicImage, Rgba, RgbaImage};

/// Background color the fade converges to (dark slate).
pub const BACKGROUND: Rgba<u8> = Rgba([15, 23, 42, 255]);

/// Fixed-size 2D drawing target owned by the render loop.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    frame: RgbaImage,
}

impl Surface {
    /// Create a surface filled with the background color.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "surface dimensions must be positive");
        Self {
            frame: RgbaImage::from_pixel(width, height, BACKGROUND),
        }
    }

    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// The rendered frame, for display.
    pub fn image(&self) -> &RgbaImage {
        &self.frame
    }

    /// Owned copy of the frame as a `DynamicImage`.
    pub fn to_dynamic(&self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.frame.clone())
    }

    /// Pixel accessor; coordinates must be in range.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.frame.get_pixel(x, y)
    }

    /// Hard reset to the background color.
    pub fn clear(&mut self) {
        for px in self.frame.pixels_mut() {
            *px = BACKGROUND;
        }
    }

    /// Blend every pixel toward the background by `alpha` (0..1). This
    /// is the per-frame "clear" that leaves a decaying trail.
    pub fn fade(&mut self, alpha: f32) {
        let a = alpha.clamp(0.0, 1.0);
        if a == 0.0 {
            return;
        }
        for px in self.frame.pixels_mut() {
            for c in 0..3 {
                let faded = lerp_channel(px[c], BACKGROUND[c], a);
                // u8 rounding stalls the last few steps of the decay;
                // force at least one step toward the background.
                px[c] = if faded == px[c] && px[c] != BACKGROUND[c] {
                    if px[c] > BACKGROUND[c] { px[c] - 1 } else { px[c] + 1 }
                } else {
                    faded
                };
            }
            px[3] = 255;
        }
    }

    /// Fill an axis-aligned rectangle. Fractional bounds are rounded to
    /// pixel edges; the rectangle is clipped to the surface.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgba<u8>) {
        let (x0, x1) = span(x, w);
        let (y0, y1) = span(y, h);
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.plot(xx, yy, color);
            }
        }
    }

    /// Fill a rectangle with a vertical gradient running from `bottom`
    /// at the lower edge to `top` at the upper edge.
    pub fn fill_rect_vgradient(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        bottom: Rgba<u8>,
        top: Rgba<u8>,
    ) {
        let (x0, x1) = span(x, w);
        let (y0, y1) = span(y, h);
        let rows = (y1 - y0).max(1);
        for yy in y0..y1 {
            // Row 0 of the gradient is the bottom edge
            let t = if rows > 1 {
                (y1 - 1 - yy) as f32 / (rows - 1) as f32
            } else {
                0.0
            };
            let color = lerp_color(bottom, top, t);
            for xx in x0..x1 {
                self.plot(xx, yy, color);
            }
        }
    }

    /// Draw a straight line segment between two points.
    pub fn draw_line(&mut self, x0: f32, y0: f32, x1: f32, y1: f32, color: Rgba<u8>) {
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.plot(
                (x0 + dx * t).round() as i64,
                (y0 + dy * t).round() as i64,
                color,
            );
        }
    }

    /// Stroke a polyline through the given points. Fewer than two
    /// points draw nothing.
    pub fn stroke_polyline(&mut self, points: &[(f32, f32)], color: Rgba<u8>) {
        for pair in points.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            self.draw_line(x0, y0, x1, y1, color);
        }
    }

    /// Fill a circle centered at (`cx`, `cy`).
    pub fn fill_circle(&mut self, cx: f32, cy: f32, r: f32, color: Rgba<u8>) {
        if r <= 0.0 {
            return;
        }
        let x0 = (cx - r).floor() as i64;
        let x1 = (cx + r).ceil() as i64;
        let y0 = (cy - r).floor() as i64;
        let y1 = (cy + r).ceil() as i64;
        let r2 = r * r;
        for yy in y0..=y1 {
            for xx in x0..=x1 {
                let dx = xx as f32 - cx;
                let dy = yy as f32 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.plot(xx, yy, color);
                }
            }
        }
    }

    /// Bounds-checked source-over plot using the color's alpha.
    fn plot(&mut self, x: i64, y: i64, color: Rgba<u8>) {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if color[3] == 255 {
            self.frame.put_pixel(x, y, color);
            return;
        }
        let a = color[3] as f32 / 255.0;
        let dst = *self.frame.get_pixel(x, y);
        let mut out = Rgba([0, 0, 0, 255]);
        for c in 0..3 {
            out[c] = lerp_channel(dst[c], color[c], a);
        }
        self.frame.put_pixel(x, y, out);
    }
}

/// Round a fractional extent to a pixel span.
fn span(start: f32, len: f32) -> (i64, i64) {
    let a = start.round() as i64;
    let b = (start + len.max(0.0)).round() as i64;
    (a, b)
}

fn lerp_channel(from: u8, to: u8, t: f32) -> u8 {
    (from as f32 + (to as f32 - from as f32) * t).round() as u8
}

fn lerp_color(from: Rgba<u8>, to: Rgba<u8>, t: f32) -> Rgba<u8> {
    let mut out = Rgba([0, 0, 0, 255]);
    for c in 0..4 {
        out[c] = lerp_channel(from[c], to[c], t);
    }
    out
}

/// Convert an HSL color (hue in degrees, saturation/lightness in 0..1)
/// to an opaque RGBA pixel.
pub fn hsl(h: f32, s: f32, l: f32) -> Rgba<u8> {
    let h = h.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    Rgba([
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_background() {
        let surface = Surface::new(8, 4);
        assert_eq!(surface.pixel(0, 0), BACKGROUND);
        assert_eq!(surface.pixel(7, 3), BACKGROUND);
    }

    #[test]
    #[should_panic]
    fn zero_dimensions_are_rejected() {
        let _ = Surface::new(0, 4);
    }

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut surface = Surface::new(4, 4);
        surface.fill_rect(-2.0, -2.0, 10.0, 10.0, Rgba([255, 0, 0, 255]));
        for y in 0..4 {
            for x in 0..4 {
                assert_eq!(surface.pixel(x, y), Rgba([255, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn fade_moves_pixels_toward_background() {
        let mut surface = Surface::new(2, 2);
        surface.fill_rect(0.0, 0.0, 2.0, 2.0, Rgba([255, 255, 255, 255]));
        surface.fade(0.1);
        let px = surface.pixel(0, 0);
        assert!(px[0] < 255 && px[0] > BACKGROUND[0]);
        // Repeated fades converge on the background exactly
        for _ in 0..200 {
            surface.fade(0.1);
        }
        assert_eq!(surface.pixel(0, 0), BACKGROUND);
    }

    #[test]
    fn translucent_plot_blends() {
        let mut surface = Surface::new(1, 1);
        surface.clear();
        surface.fill_rect(0.0, 0.0, 1.0, 1.0, Rgba([255, 255, 255, 26]));
        let px = surface.pixel(0, 0);
        assert!(px[0] > BACKGROUND[0] && px[0] < 60);
    }

    #[test]
    fn vgradient_endpoints_match() {
        let mut surface = Surface::new(1, 10);
        let bottom = Rgba([10, 20, 30, 255]);
        let top = Rgba([200, 210, 220, 255]);
        surface.fill_rect_vgradient(0.0, 0.0, 1.0, 10.0, bottom, top);
        assert_eq!(surface.pixel(0, 9), bottom);
        assert_eq!(surface.pixel(0, 0), top);
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(hsl(0.0, 1.0, 0.5), Rgba([255, 0, 0, 255]));
        assert_eq!(hsl(120.0, 1.0, 0.5), Rgba([0, 255, 0, 255]));
        assert_eq!(hsl(240.0, 1.0, 0.5), Rgba([0, 0, 255, 255]));
        assert_eq!(hsl(360.0, 1.0, 0.5), Rgba([255, 0, 0, 255]));
    }
}

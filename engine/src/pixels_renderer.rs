use crate::graphics::{CpuRenderer, Renderer2d};
use crate::surface::SurfaceSize;

use pixels::Pixels;

/// Windowed renderer built on `pixels`.
///
/// The RGBA buffer keeps a fixed logical size; `pixels` scales it onto whatever size the window
/// surface currently has, so game coordinates never change when the window is resized.
pub struct PixelsRenderer2d {
    pixels: Pixels,
    buffer_size: SurfaceSize,
}

impl PixelsRenderer2d {
    pub fn new(mut pixels: Pixels, buffer_size: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(buffer_size.width, buffer_size.height)?;
        Ok(Self {
            pixels,
            buffer_size,
        })
    }

    /// Follows a window resize; the logical buffer is untouched.
    pub fn resize_surface(&mut self, window: SurfaceSize) -> Result<(), pixels::Error> {
        if window.is_empty() {
            return Ok(());
        }
        self.pixels.resize_surface(window.width, window.height)?;
        Ok(())
    }

    /// Maps a physical window position into buffer coordinates, clamping outside points to
    /// the nearest edge pixel.
    pub fn window_to_buffer(&self, x: f64, y: f64) -> (u32, u32) {
        let (bx, by) = match self.pixels.window_pos_to_pixel((x as f32, y as f32)) {
            Ok(pos) => pos,
            Err(outside) => self.pixels.clamp_pixel_pos(outside),
        };
        (bx as u32, by as u32)
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let size = self.buffer_size;
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), size);
        cpu.begin_frame(size);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}

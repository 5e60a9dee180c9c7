use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator, TextureValueError, UpdateTextureError};
use sdl2::video::{Window, WindowBuildError, WindowContext};
use sdl2::IntegerOrSdlError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VideoError {
    #[error("SDL initialisation failed: {0}")]
    Init(String),
    #[error("cannot create window: {0}")]
    Window(#[from] WindowBuildError),
    #[error("cannot create renderer: {0}")]
    Canvas(#[from] IntegerOrSdlError),
    #[error("cannot create texture: {0}")]
    Texture(#[from] TextureValueError),
    #[error("cannot upload frame: {0}")]
    Update(#[from] UpdateTextureError),
    #[error("render failed: {0}")]
    Render(String),
    #[error("window of {width}x{height} scaled by {scale} is too large")]
    TooLarge { width: u32, height: u32, scale: u32 },
}

/// Window size for a `width` x `height` raster at an integer scale.
pub fn window_size(width: u32, height: u32, scale: u32) -> Result<(u32, u32), VideoError> {
    let fits = |n: u32| n.checked_mul(scale).filter(|&v| v <= i32::MAX as u32);
    match (fits(width), fits(height)) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => Err(VideoError::TooLarge {
            width,
            height,
            scale,
        }),
    }
}

pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

impl Video {
    /// Create an SDL window and renderer for the given raster, scaled by an
    /// integer factor.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        width: u32,
        height: u32,
        scale: u32,
    ) -> Result<Self, VideoError> {
        let (window_width, window_height) = window_size(width, height, scale)?;
        let window = sdl_video
            .window(title, window_width, window_height)
            .position_centered()
            .build()?;

        let canvas = window.into_canvas().accelerated().build()?;
        let texture_creator = canvas.texture_creator();

        // Fail at start-up rather than on the first frame.
        texture_creator.create_texture_streaming(PixelFormatEnum::RGBA32, width, height)?;

        Ok(Self {
            canvas,
            texture_creator,
            width,
            height,
        })
    }

    /// Upload an RGBA framebuffer to the texture and present it.
    pub fn present(&mut self, framebuffer: &[u8]) -> Result<(), VideoError> {
        let mut texture = self.texture_creator.create_texture_streaming(
            PixelFormatEnum::RGBA32,
            self.width,
            self.height,
        )?;

        texture.update(None, framebuffer, (self.width * 4) as usize)?;

        self.canvas.clear();
        self.canvas
            .copy(&texture, None, None)
            .map_err(VideoError::Render)?;
        self.canvas.present();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) {
        if let Err(e) = self.canvas.window_mut().set_title(title) {
            log::warn!("cannot set window title: {e}");
        }
    }
}

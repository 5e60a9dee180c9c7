use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use rastersync_core::prelude::*;
use sdl2::EventPump;
use sdl2::event::Event;

use crate::capture;
use crate::config::Config;
use crate::input::KeyMap;
use crate::video::{Video, VideoError};

/// How long a paused session sleeps between control samples.
const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(16);

/// SDL window and keyboard acting as the session's host.
pub struct SdlHost {
    // Keeps the SDL library initialised for as long as the host lives.
    _sdl_context: sdl2::Sdl,
    video: Video,
    event_pump: EventPump,
    key_map: KeyMap,
    model: String,
    raster: Raster,
    /// RGBA copy of the last presented frame.
    rgba: Vec<u8>,
    capture_key: EdgeDetector,
    capture_dir: PathBuf,
    captures: u32,
    failure: Option<VideoError>,
}

impl SdlHost {
    pub fn new(config: &Config, model: &str) -> anyhow::Result<Self> {
        let raster = Raster::new(config.width, config.height)?;
        let key_map = KeyMap::from_bindings(&config.keys)?;

        let sdl_context = sdl2::init().map_err(VideoError::Init)?;
        let sdl_video = sdl_context.video().map_err(VideoError::Init)?;
        let video = Video::new(
            &sdl_video,
            &format!("rastersync - {model}"),
            raster.width(),
            raster.height(),
            config.scale,
        )?;
        let event_pump = sdl_context.event_pump().map_err(VideoError::Init)?;

        Ok(Self {
            _sdl_context: sdl_context,
            video,
            event_pump,
            key_map,
            model: model.to_string(),
            raster,
            rgba: vec![0; raster.capacity() * 4],
            capture_key: EdgeDetector::new(),
            capture_dir: config.capture_dir.clone(),
            captures: 0,
            failure: None,
        })
    }

    fn capture(&mut self) {
        match capture::save_png(
            &self.rgba,
            self.raster.width(),
            self.raster.height(),
            &self.capture_dir,
            self.captures,
        ) {
            Ok(path) => {
                log::info!("captured frame to {}", path.display());
                self.captures += 1;
            }
            Err(e) => log::warn!("frame capture failed: {e}"),
        }
    }

    /// A presentation error that ended the run, if any.
    pub fn take_failure(&mut self) -> Option<VideoError> {
        self.failure.take()
    }
}

impl Host for SdlHost {
    fn present(&mut self, frame: &FrameBuffer) {
        frame.write_rgba(&mut self.rgba);
        if let Err(e) = self.video.present(&self.rgba) {
            log::error!("{e}");
            self.failure.get_or_insert(e);
        }
    }

    fn poll_controls(&mut self) -> Controls {
        let keyboard = self.event_pump.keyboard_state();
        let controls = self
            .key_map
            .controls(|sc| keyboard.is_scancode_pressed(sc));
        if self.capture_key.rising(controls.capture) {
            self.capture();
        }
        controls
    }

    fn poll_quit_event(&mut self) -> bool {
        let mut quit = self.failure.is_some();
        for event in self.event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                quit = true;
            }
        }
        quit
    }

    fn idle(&mut self) {
        std::thread::sleep(PAUSE_POLL_INTERVAL);
    }

    fn calibrated(&mut self, calibration: &Calibration) {
        let title = format!(
            "rastersync - {} ({} cycle{}/pixel)",
            self.model,
            calibration.pixel_clock_divisor,
            if calibration.pixel_clock_divisor == 1 { "" } else { "s" },
        );
        self.video.set_title(&title);
    }
}

/// Open the window and drive `port` until the user quits.
pub fn run(port: Box<dyn SignalPort>, config: &Config, model: &str) -> anyhow::Result<RunSummary> {
    let mut host = SdlHost::new(config, model).context("failed to open the display")?;
    let mut session = Session::with_raster(port, config.width, config.height, config.debug_overlay)?;

    let summary = session.run(&mut host);
    if let Some(e) = host.take_failure() {
        return Err(e).context("display failed while running");
    }
    Ok(summary)
}

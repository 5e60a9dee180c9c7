//! Frame assembly from per-pixel output samples.
//!
//! One sample arrives per logical pixel. Visible samples are written in scan
//! order; vertical sync rewinds the cursor. A frame boundary fires when vsync
//! is asserted while pixels have been written, or when the cursor has run past
//! the end of the buffer (missing or malformed vsync).
//!
//! The `cursor > 0` half of the boundary rule is load-bearing: vsync is held
//! for many pixels, and without it every one of them would fire a boundary.
//! Once the first vsync sample has flushed the frame the cursor is 0 and the
//! rest of the pulse is quietly discarded.

use log::debug;

use crate::signal::OutputSample;
use crate::video::raster::{FrameBuffer, Pixel, Raster};

/// Overlay colour for samples taken during vertical blank.
pub const VBLANK_TINT: Pixel = Pixel::opaque(0x40, 0x00, 0x40);

/// Overlay colour for samples with the auxiliary vsync indicator set.
pub const VSYNC_AUX_TINT: Pixel = Pixel::opaque(0x00, 0x40, 0x40);

/// Why a frame boundary fired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameReady {
    /// Start of a vsync pulse after at least one pixel was written.
    Vsync { pixels: usize },
    /// A visible sample arrived with the buffer already full.
    Overrun,
}

#[derive(Debug)]
pub struct FrameAssembler {
    buffer: FrameBuffer,
    cursor: usize,
    /// Set when a visible sample found `cursor == capacity`. This is the
    /// "cursor exceeded capacity" condition; the cursor itself never leaves
    /// `[0, capacity]`.
    overrun: bool,
    /// Boundary reported by `step` and not yet acknowledged.
    pending: bool,
    debug_overlay: bool,
}

impl FrameAssembler {
    pub fn new(raster: Raster, debug_overlay: bool) -> Self {
        Self {
            buffer: FrameBuffer::new(raster),
            cursor: 0,
            overrun: false,
            pending: false,
            debug_overlay,
        }
    }

    /// Consume one sample.
    ///
    /// Returns `Some` when a frame boundary fires. The sample that triggers a
    /// boundary is never written, so the buffer still holds the completed
    /// frame; the caller presents it and then calls [`finish_frame`].
    ///
    /// [`finish_frame`]: FrameAssembler::finish_frame
    pub fn step(&mut self, sample: &OutputSample) -> Option<FrameReady> {
        if self.pending {
            // Boundary never acknowledged: acknowledge it now rather than
            // writing into a frame that was handed out.
            self.finish_frame();
        }

        if self.overrun {
            debug!("frame overrun at {} pixels without vsync", self.cursor);
            self.pending = true;
            return Some(FrameReady::Overrun);
        }
        if sample.vsync && self.cursor > 0 {
            self.pending = true;
            return Some(FrameReady::Vsync {
                pixels: self.cursor,
            });
        }

        if sample.vsync {
            // Non-visible phase: nothing to write, cursor already at 0.
            self.cursor = 0;
        } else if self.cursor < self.buffer.raster().capacity() {
            let pixel = self.colour(sample);
            self.buffer.set(self.cursor, pixel);
            self.cursor += 1;
        } else {
            self.overrun = true;
        }
        None
    }

    /// Acknowledge a boundary: rewind the cursor and drop the overrun state.
    pub fn finish_frame(&mut self) {
        self.cursor = 0;
        self.overrun = false;
        self.pending = false;
    }

    /// Cold-start state: cursor 0, no overrun. Pixel contents are kept, the
    /// next frame overwrites them.
    pub fn reset(&mut self) {
        self.finish_frame();
    }

    fn colour(&self, sample: &OutputSample) -> Pixel {
        if self.debug_overlay {
            if sample.vblank {
                return VBLANK_TINT;
            }
            if sample.vsync_aux {
                return VSYNC_AUX_TINT;
            }
        }
        Pixel::opaque(sample.r, sample.g, sample.b)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_overrun(&self) -> bool {
        self.overrun
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.buffer
    }

    pub fn raster(&self) -> Raster {
        self.buffer.raster()
    }
}

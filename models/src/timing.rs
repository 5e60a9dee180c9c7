/// Video timing in pixels (horizontal) and lines (vertical).
///
/// Each axis runs active → front porch → sync → back porch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub h_active: u16,
    pub h_fp: u16,
    pub h_sync: u16,
    pub h_bp: u16, // h_active + h_fp + h_sync + h_bp = Htot

    pub v_active: u16,
    pub v_fp: u16,
    pub v_sync: u16,
    pub v_bp: u16, // v_active + v_fp + v_sync + v_bp = Vtot
}

/// 640x480 @ 60 Hz, 800x525 total.
pub const VGA_640X480: Timing = Timing {
    h_active: 640,
    h_fp: 16,
    h_sync: 96,
    h_bp: 48,
    v_active: 480,
    v_fp: 10,
    v_sync: 2,
    v_bp: 33,
};

impl Timing {
    pub fn htot(&self) -> u16 {
        self.h_active + self.h_fp + self.h_sync + self.h_bp
    }

    pub fn vtot(&self) -> u16 {
        self.v_active + self.v_fp + self.v_sync + self.v_bp
    }
}

/// Where the beam is relative to the timing regions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Beam {
    pub x: u16,
    pub y: u16,
    pub hsync: bool,
    pub vsync: bool,
    pub hblank: bool,
    pub vblank: bool,
    /// Inside the vertical back porch.
    pub v_back_porch: bool,
}

impl Beam {
    pub fn visible(&self) -> bool {
        !self.hblank && !self.vblank
    }
}

/// Free-running raster position counter.
#[derive(Debug)]
pub struct ScanCounter {
    pub t: Timing,
    pub x: u16, // 0..Htot-1
    pub y: u16, // 0..Vtot-1
}

impl ScanCounter {
    pub fn new(t: Timing) -> Self {
        Self { t, x: 0, y: 0 }
    }

    pub fn reset(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    /// Decode the current position into sync and blank levels.
    pub fn beam(&self) -> Beam {
        let hsync_start = self.t.h_active + self.t.h_fp;
        let vsync_start = self.t.v_active + self.t.v_fp;
        let vsync_end = vsync_start + self.t.v_sync;
        Beam {
            x: self.x,
            y: self.y,
            hsync: self.x >= hsync_start && self.x < hsync_start + self.t.h_sync,
            vsync: self.y >= vsync_start && self.y < vsync_end,
            hblank: self.x >= self.t.h_active,
            vblank: self.y >= self.t.v_active,
            v_back_porch: self.y >= vsync_end,
        }
    }

    /// Advance by one pixel. Returns true when a new frame starts.
    pub fn tick(&mut self) -> bool {
        self.x += 1;
        if self.x == self.t.htot() {
            self.x = 0;
            self.y += 1;
            if self.y == self.t.vtot() {
                self.y = 0;
                return true;
            }
        }
        false
    }
}

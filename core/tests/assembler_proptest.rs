use proptest::prelude::*;
use rastersync_core::signal::OutputSample;
use rastersync_core::video::{FrameAssembler, FrameReady, Raster};

fn sample(vsync: bool, shade: u8) -> OutputSample {
    OutputSample {
        vsync,
        ..OutputSample::rgb(shade, shade, shade)
    }
}

proptest! {
    #[test]
    fn cursor_stays_within_capacity(
        width in 1u32..6,
        height in 1u32..6,
        samples in prop::collection::vec((prop::bool::weighted(0.1), any::<u8>()), 0..400),
    ) {
        let raster = Raster::new(width, height).unwrap();
        let capacity = raster.capacity();
        let mut asm = FrameAssembler::new(raster, false);

        for (vsync, shade) in samples {
            let cursor_before = asm.cursor();
            let overrun_before = asm.is_overrun();
            let ready = asm.step(&sample(vsync, shade));

            let expected = (vsync && cursor_before > 0) || overrun_before;
            prop_assert_eq!(ready.is_some(), expected);
            if let Some(FrameReady::Vsync { pixels }) = ready {
                prop_assert_eq!(pixels, cursor_before);
            }
            if ready.is_some() {
                asm.finish_frame();
                prop_assert_eq!(asm.cursor(), 0);
            }
            prop_assert!(asm.cursor() <= capacity);
        }
    }

    #[test]
    fn one_boundary_per_vsync_pulse(
        frames in prop::collection::vec((1usize..30, 1usize..10), 1..20),
    ) {
        // Each frame: `visible` pixel samples followed by a `pulse`-sample vsync.
        let raster = Raster::new(8, 4).unwrap();
        let mut asm = FrameAssembler::new(raster, false);
        let mut boundaries = 0;
        let mut pulses = 0;

        for (visible, pulse) in frames {
            let visible = visible.min(raster.capacity());
            for _ in 0..visible {
                prop_assert!(asm.step(&sample(false, 1)).is_none());
            }
            pulses += 1;
            for _ in 0..pulse {
                if asm.step(&sample(true, 0)).is_some() {
                    boundaries += 1;
                    asm.finish_frame();
                }
            }
        }
        prop_assert_eq!(boundaries, pulses);
    }
}

//! PNG snapshots of presented frames.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("png encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
}

/// `frame-NNNNNN.png` inside `dir`.
pub fn capture_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("frame-{index:06}.png"))
}

/// Write an RGBA frame as a PNG and return where it went.
pub fn save_png(rgba: &[u8], width: u32, height: u32, dir: &Path, index: u32) -> Result<PathBuf, CaptureError> {
    let path = capture_path(dir, index);
    let file = File::create(&path).map_err(|source| CaptureError::Io {
        path: path.clone(),
        source,
    })?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_zero_padded() {
        let path = capture_path(Path::new("shots"), 42);
        assert_eq!(path, Path::new("shots").join("frame-000042.png"));
    }

    #[test]
    fn writes_decodable_png() {
        let dir = std::env::temp_dir().join("rastersync_capture_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let rgba: Vec<u8> = (0..2 * 3).flat_map(|i| [i as u8, 0x10, 0x20, 0xFF]).collect();
        let path = save_png(&rgba, 2, 3, &dir, 0).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (2, 3));
        assert_eq!(&buf[..info.buffer_size()], &rgba[..]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_io_error() {
        let parent = std::env::temp_dir().join("rastersync_capture_missing");
        let _ = std::fs::remove_dir_all(&parent);
        let dir = parent.join("nested");
        assert!(matches!(
            save_png(&[0; 4], 1, 1, &dir, 1),
            Err(CaptureError::Io { .. })
        ));
    }
}

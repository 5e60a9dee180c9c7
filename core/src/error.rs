use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("raster dimensions must be non-zero (got {width}x{height})")]
    Empty { width: u32, height: u32 },
    #[error("raster {width}x{height} is too large to address")]
    TooLarge { width: u32, height: u32 },
}

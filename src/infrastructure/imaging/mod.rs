// Image stages of the avatar pipeline: validation, cropping,
// rasterization, and compression. Pure compute, no network I/O.
pub mod compressor;
pub mod cropper;
pub mod rasterizer;
pub mod signature;

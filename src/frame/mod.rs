/// Packed pixel formats and the frame buffer exchanged with the host pipeline.
pub mod video;

use crate::foundation::error::HypnoticResult;
use crate::frame::video::VideoFrame;

/// Consumer of output frames, in arrival order.
pub trait FrameSink: Send {
    /// Push one output frame.
    fn push_frame(&mut self, frame: VideoFrame) -> HypnoticResult<()>;
    /// Called once after the last frame of a stream.
    fn end(&mut self) -> HypnoticResult<()> {
        Ok(())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Vec<VideoFrame>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured frames.
    pub fn frames(&self) -> &[VideoFrame] {
        &self.frames
    }

    /// Take ownership of the captured frames.
    pub fn into_frames(self) -> Vec<VideoFrame> {
        self.frames
    }

    /// Whether [`FrameSink::end`] was called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(&mut self, frame: VideoFrame) -> HypnoticResult<()> {
        self.frames.push(frame);
        Ok(())
    }

    fn end(&mut self) -> HypnoticResult<()> {
        self.ended = true;
        Ok(())
    }
}

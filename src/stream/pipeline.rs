use crate::effects::hypnotic::HypnoticElement;
use crate::foundation::error::HypnoticResult;
use crate::frame::video::VideoFrame;
use crate::stream::sink::FrameSink;

/// A one-frame-in, one-frame-out stage.
pub trait FrameFilter {
    /// Transform one frame without touching the input.
    fn process(&self, frame: &VideoFrame) -> HypnoticResult<VideoFrame>;
}

impl FrameFilter for HypnoticElement {
    fn process(&self, frame: &VideoFrame) -> HypnoticResult<VideoFrame> {
        HypnoticElement::process(self, frame)
    }
}

/// Outcome counters for [`run_stream`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Frames pulled from the source.
    pub frames_in: u64,
    /// Frames pushed to the sink.
    pub frames_out: u64,
    /// Frames the filter failed on; they are dropped and the stream continues.
    pub frames_failed: u64,
}

/// Drive `frames` through `filter` into `sink`, preserving order.
///
/// A filter failure only loses that frame. Sink failures stop the stream and are returned.
pub fn run_stream<I, F, S>(frames: I, filter: &F, sink: &mut S) -> HypnoticResult<StreamStats>
where
    I: IntoIterator<Item = VideoFrame>,
    F: FrameFilter + ?Sized,
    S: FrameSink + ?Sized,
{
    let mut stats = StreamStats::default();
    for frame in frames {
        stats.frames_in += 1;
        match filter.process(&frame) {
            Ok(out) => {
                sink.push_frame(out)?;
                stats.frames_out += 1;
            }
            Err(err) => {
                stats.frames_failed += 1;
                tracing::warn!(
                    %err,
                    pts = frame.timestamp().pts,
                    "dropping frame after processing failure"
                );
            }
        }
    }
    sink.end()?;
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/stream/pipeline.rs"]
mod tests;

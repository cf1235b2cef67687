use std::io::{ErrorKind, Read, Write};

use postcard::accumulator::{CobsAccumulator, FeedResult};

use super::Frame;
use crate::errors::InstructorError;
use crate::sync::channel::StateChannel;
use crate::sync::shutdown::ShutdownSignal;
use crate::types::checklist::ChecklistItem;

const ID: &str = "pipe";

/// Largest encoded frame the reading side accepts
pub const FRAME_BUFFER_SIZE: usize = 512;

/// Writes COBS framed [`Frame`]s to the pipe.
pub struct FrameWriter<W: Write> {
    writer: W,
}

impl<W: Write> FrameWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn send(&mut self, frame: &Frame) -> Result<(), InstructorError> {
        let bytes = postcard::to_stdvec_cobs(frame)?;
        self.writer.write_all(&bytes)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Move frames from `reader` into `channel` until the stream ends or a
/// [`Frame::Close`] arrives. Either way `shutdown` is set before returning.
///
/// Frames which fail to decode are logged and skipped.
pub fn pump<R: Read, const N: usize>(
    mut reader: R,
    channel: &StateChannel<ChecklistItem, N>,
    shutdown: &ShutdownSignal,
) -> Result<(), InstructorError> {
    let result = pump_frames(&mut reader, channel);
    shutdown.set();
    result
}

fn pump_frames<R: Read, const N: usize>(
    reader: &mut R,
    channel: &StateChannel<ChecklistItem, N>,
) -> Result<(), InstructorError> {
    let mut accumulator = CobsAccumulator::<FRAME_BUFFER_SIZE>::new();
    let mut buffer = [0u8; 64];

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => {
                debug!("{}: End of stream", ID);
                return Ok(());
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        let mut window = &buffer[..n];
        while !window.is_empty() {
            window = match accumulator.feed::<Frame>(window) {
                FeedResult::Consumed => break,
                FeedResult::OverFull(remaining) => {
                    warn!("{}: Frame exceeds {} bytes, skipped", ID, FRAME_BUFFER_SIZE);
                    remaining
                }
                FeedResult::DeserError(remaining) => {
                    warn!("{}: Undecodable frame skipped", ID);
                    remaining
                }
                FeedResult::Success {
                    data: Frame::Check(item),
                    remaining,
                } => {
                    trace!("{}: Received <{}> = {}", ID, item.name, item.state);
                    if let Some(dropped) = channel.send(item) {
                        warn!("{}: Channel full, dropped update for <{}>", ID, dropped.name);
                    }
                    remaining
                }
                FeedResult::Success {
                    data: Frame::Close, ..
                } => {
                    debug!("{}: Close frame received", ID);
                    return Ok(());
                }
            };
        }
    }
}

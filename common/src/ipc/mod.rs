//! The one-way pipe from the main process to the checklist UI process.
//!
//! Every frame is a `postcard` encoded [`Frame`], COBS framed so that the
//! reading side can resynchronize on the `0x00` terminator.

use serde::{Deserialize, Serialize};

use crate::types::checklist::ChecklistItem;

mod codec;
mod process;

pub use codec::{pump, FrameWriter, FRAME_BUFFER_SIZE};
pub use process::InstructorUi;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Frame {
    /// Set the state of every visible checkbox with this label
    Check(ChecklistItem),
    /// The main process is shutting down
    Close,
}

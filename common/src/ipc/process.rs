use std::process::{Child, ChildStdin, Command, Stdio};
use std::time::{Duration, Instant};

use super::{Frame, FrameWriter};
use crate::consts::UI_ROLE_FLAG;
use crate::errors::InstructorError;
use crate::types::checklist::ChecklistItem;

const ID: &str = "instructor ui";

/// Handle to the checklist UI child process, and the write end of the
/// pipe feeding it.
pub struct InstructorUi {
    child: Child,
    writer: Option<FrameWriter<ChildStdin>>,
    close_timeout: Duration,
}

impl InstructorUi {
    /// Start the UI by re-executing the current binary in the UI role.
    pub fn spawn(title: &str, close_timeout: Duration) -> Result<Self, InstructorError> {
        let mut command = Command::new(std::env::current_exe()?);
        command.arg(UI_ROLE_FLAG).arg(title);
        Self::spawn_command(command, close_timeout)
    }

    /// Start the UI from an arbitrary command. Only the standard streams
    /// are passed on, with stdin replaced by the pipe.
    pub fn spawn_command(mut command: Command, close_timeout: Duration) -> Result<Self, InstructorError> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()?;

        let writer = child.stdin.take().map(FrameWriter::new);
        info!("{}: Started with pid {}", ID, child.id());

        Ok(Self {
            child,
            writer,
            close_timeout,
        })
    }

    pub fn is_alive(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(None) => self.writer.is_some(),
            Ok(Some(status)) => {
                debug!("{}: Exited with {}", ID, status);
                false
            }
            Err(e) => {
                warn!("{}: Unable to query process state: {}", ID, e);
                false
            }
        }
    }

    /// Push a single state update down the pipe.
    pub fn set_check(&mut self, item: ChecklistItem) -> Result<(), InstructorError> {
        let writer = self.writer.as_mut().ok_or(InstructorError::UiGone)?;
        writer.send(&Frame::Check(item))
    }

    /// Ask the UI to exit, and wait a bounded time for it to do so before
    /// killing it.
    pub fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.send(&Frame::Close) {
                debug!("{}: Close frame not delivered: {}", ID, e);
            }
        }

        let deadline = Instant::now() + self.close_timeout;
        loop {
            match self.child.try_wait() {
                Ok(Some(_)) => return,
                Ok(None) if Instant::now() < deadline => {
                    std::thread::sleep(Duration::from_millis(10));
                }
                Ok(None) => break,
                Err(e) => {
                    warn!("{}: Unable to query process state: {}", ID, e);
                    break;
                }
            }
        }

        warn!("{}: Did not exit within {:?}, killing it", ID, self.close_timeout);
        if let Err(e) = self.child.kill() {
            warn!("{}: Unable to kill process: {}", ID, e);
        }
        _ = self.child.wait();
    }
}

impl Drop for InstructorUi {
    fn drop(&mut self) {
        self.close();
    }
}

//! The checklist UI process: a panel fed from the pipe on stdin, drawn to
//! stdout, and driven by an operator shell on the controlling terminal.

use core::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use embedded_cli::cli::CliBuilder;

use crate::config::InstructorConfig;
use crate::consts::STATE_CHANNEL_CAPACITY;
use crate::errors::InstructorError;
use crate::ipc;
use crate::sync::channel::StateChannel;
use crate::sync::shutdown::ShutdownSignal;
use crate::sync::ticker::Ticker;
use crate::types::checklist::ChecklistItem;

pub mod panel;
pub mod render;
pub mod shell;

use panel::Panel;
use shell::{Reply, ShellOutput, CMD_PROMPT};

const ID: &str = "ui";

const OPERATOR_TTY: &str = "/dev/tty";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The shutdown signal was set, the ticker should stop
    Shutdown,
    /// Pending updates were applied, `changed` widgets changed state
    Running { changed: usize },
}

/// One timer tick: check for shutdown, then apply everything pending to
/// the visible tab.
pub fn tick<const N: usize>(
    panel: &mut Panel,
    shutdown: &ShutdownSignal,
    poll: Duration,
    channel: &StateChannel<ChecklistItem, N>,
) -> TickOutcome {
    if shutdown.wait(poll) {
        return TickOutcome::Shutdown;
    }

    let changed = channel
        .receiver()
        .drain()
        .map(|item| panel.apply(&item))
        .sum();

    TickOutcome::Running { changed }
}

/// Run the checklist UI until the main process closes the pipe or the
/// operator quits.
pub fn run(config: &InstructorConfig, title: &str) -> Result<(), InstructorError> {
    info!("{}: Starting checklist <{}>", ID, title);

    let mut panel = Panel::new(&config.tabs)?;
    let channel = Arc::new(StateChannel::<ChecklistItem, STATE_CHANNEL_CAPACITY>::new());
    let shutdown = ShutdownSignal::new();

    spawn_pipe_reader(channel.clone(), shutdown.clone())?;
    let mut keys = spawn_key_reader();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    redraw(&panel, title, &mut out, &[])?;

    let output = RefCell::new(Vec::new());
    let mut command_buffer = [0u8; 64];
    let mut history_buffer = [0u8; 128];
    let mut cli = CliBuilder::default()
        .writer(ShellOutput::new(&output))
        .command_buffer(command_buffer.as_mut_slice())
        .history_buffer(history_buffer.as_mut_slice())
        .prompt(CMD_PROMPT)
        .build()?;

    let mut ticker = Ticker::every(config.tick_period());
    loop {
        let remaining = ticker.remaining(Instant::now());
        if remaining.is_zero() {
            ticker.advance(Instant::now());
            match tick(&mut panel, &shutdown, config.shutdown_poll(), &*channel) {
                TickOutcome::Shutdown => break,
                TickOutcome::Running { changed: 0 } => {}
                TickOutcome::Running { .. } => redraw(&panel, title, &mut out, &[])?,
            }
            continue;
        }

        let Some(rx) = &keys else {
            std::thread::sleep(remaining);
            continue;
        };

        let byte = match rx.recv_timeout(remaining) {
            Ok(byte) => byte,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("{}: Operator input closed, continuing display only", ID);
                keys = None;
                continue;
            }
        };

        let mut parsed = None;
        shell::feed(&mut cli, byte, &mut parsed)?;

        if shell::normalize_key(byte) != b'\r' {
            continue;
        }

        // The terminal already echoed the line, so the CLI output is only
        // worth showing when it did not yield a command (help, errors).
        let echo = output.take();
        match parsed {
            Some(command) => {
                debug!("{}: Operator command {:?}", ID, command);
                match shell::execute(&mut panel, command) {
                    Reply::Quit => {
                        info!("{}: Closed by the operator", ID);
                        break;
                    }
                    Reply::Redraw => redraw(&panel, title, &mut out, &[])?,
                    Reply::Note(note) => redraw(&panel, title, &mut out, note.as_bytes())?,
                }
            }
            None => redraw(&panel, title, &mut out, &echo)?,
        }
    }

    if panel.is_complete() {
        info!("{}: Checklist was completed", ID);
    }
    info!("{}: Checklist closed", ID);
    Ok(())
}

fn redraw(panel: &Panel, title: &str, out: &mut impl Write, note: &[u8]) -> std::io::Result<()> {
    render::render(panel, title, out)?;
    if !note.is_empty() {
        out.write_all(b"\r\n")?;
        out.write_all(note)?;
    }
    out.write_all(b"\r\n")?;
    out.write_all(CMD_PROMPT.as_bytes())?;
    out.flush()
}

fn spawn_pipe_reader(
    channel: Arc<StateChannel<ChecklistItem, STATE_CHANNEL_CAPACITY>>,
    shutdown: ShutdownSignal,
) -> Result<(), InstructorError> {
    std::thread::Builder::new()
        .name("pipe-reader".into())
        .spawn(move || {
            if let Err(e) = ipc::pump(std::io::stdin().lock(), &*channel, &shutdown) {
                error!("{}: Reading the pipe failed: {}", ID, e);
            }
        })?;
    Ok(())
}

/// Feed bytes from the controlling terminal into a queue. Without a
/// terminal the panel is display only.
fn spawn_key_reader() -> Option<Receiver<u8>> {
    let tty = match File::open(OPERATOR_TTY) {
        Ok(tty) => tty,
        Err(e) => {
            warn!("{}: No operator terminal ({}), running display only", ID, e);
            return None;
        }
    };

    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("operator-input".into())
        .spawn(move || {
            for byte in BufReader::new(tty).bytes() {
                match byte {
                    Ok(byte) if tx.send(byte).is_ok() => {}
                    Ok(_) => break,
                    Err(e) => {
                        warn!("{}: Reading the terminal failed: {}", ID, e);
                        break;
                    }
                }
            }
        });

    match spawned {
        Ok(_) => Some(rx),
        Err(e) => {
            warn!("{}: Unable to start operator input: {}", ID, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::checklist::default_tabs;

    #[test]
    fn test_tick_drains_all_pending() {
        let mut panel = Panel::new(&default_tabs()).unwrap();
        panel.select(2).unwrap();

        let channel = StateChannel::<ChecklistItem, 16>::new();
        channel.send(ChecklistItem::new("Pixhawk Booted", true));
        channel.send(ChecklistItem::new("Servo Power", true));
        channel.send(ChecklistItem::new("Altitude > 30 m", true));

        let shutdown = ShutdownSignal::new();
        let outcome = tick(&mut panel, &shutdown, Duration::from_millis(1), &channel);

        assert_eq!(TickOutcome::Running { changed: 2 }, outcome);
        assert!(channel.is_empty());
        assert_eq!(Some(true), panel.checked(2, "Servo Power"));
        assert_eq!(Some(false), panel.checked(4, "Altitude > 30 m"));
    }

    #[test]
    fn test_tick_stops_on_shutdown() {
        let mut panel = Panel::new(&default_tabs()).unwrap();
        let channel = StateChannel::<ChecklistItem, 16>::new();
        channel.send(ChecklistItem::new("GNSS FIX", true));

        let shutdown = ShutdownSignal::new();
        shutdown.set();

        assert_eq!(
            TickOutcome::Shutdown,
            tick(&mut panel, &shutdown, Duration::from_millis(1), &channel)
        );
        assert_eq!(Some(false), panel.checked(0, "GNSS FIX"));
    }

    #[test]
    fn test_updates_keep_flowing_under_a_dialog() {
        let mut panel = Panel::new(&default_tabs()).unwrap();
        panel.advance().unwrap();
        assert!(panel.dialog().is_some());

        let channel = StateChannel::<ChecklistItem, 16>::new();
        channel.send(ChecklistItem::new("GNSS FIX", true));
        tick(&mut panel, &ShutdownSignal::new(), Duration::from_millis(1), &channel);

        assert_eq!(Some(true), panel.checked(0, "GNSS FIX"));
    }
}

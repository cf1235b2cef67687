use core::cell::RefCell;

use embedded_cli::buffer::Buffer;
use embedded_cli::cli::Cli;
use embedded_cli::Command;
use embedded_io::{ErrorKind, ErrorType, Write};

use super::panel::{ButtonOutcome, Panel};

pub const CMD_PROMPT: &str = "> ";

/// Operator commands, typed on the controlling terminal.
#[derive(Command, Debug, PartialEq)]
pub enum OperatorCommand {
    /// Redraw the checklist
    Show,

    /// Switch to another tab
    Tab {
        /// Index of the tab
        index: u8,
    },

    /// Tick or untick an operator checkbox
    Toggle {
        /// Index of the checkbox on the visible tab
        index: u8,
    },

    /// Move a slider
    Slide {
        /// Index of the slider on the visible tab
        index: u8,
        value: i32,
    },

    /// Press a button
    Press {
        /// Index of the button on the visible tab
        index: u8,
    },

    /// Close the open dialog
    Dismiss,

    /// Close the checklist
    Quit,
}

/// What the UI loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Redraw,
    /// Redraw, then show this line below the panel
    Note(String),
    Quit,
}

pub fn execute(panel: &mut Panel, command: OperatorCommand) -> Reply {
    let result = match command {
        OperatorCommand::Show => Ok(Reply::Redraw),
        OperatorCommand::Tab { index } => panel.select(index).map(|_| Reply::Redraw),
        OperatorCommand::Toggle { index } => panel.toggle(index).map(|_| Reply::Redraw),
        OperatorCommand::Slide { index, value } => panel.slide(index, value).map(|_| Reply::Redraw),
        OperatorCommand::Press { index } => panel.press(index).map(|outcome| {
            if let ButtonOutcome::Advanced(tab) = outcome {
                info!("ui: Advanced to tab {}", tab);
            }
            Reply::Redraw
        }),
        OperatorCommand::Dismiss => Ok(match panel.dismiss() {
            Some(_) => Reply::Redraw,
            None => Reply::Note("No dialog is open".into()),
        }),
        OperatorCommand::Quit => Ok(Reply::Quit),
    };

    result.unwrap_or_else(|error| Reply::Note(error.to_string()))
}

/// Collects what the CLI writes (echo, help text, errors) so the UI loop
/// can decide whether to show it once a line is complete.
pub struct ShellOutput<'a> {
    buffer: &'a RefCell<Vec<u8>>,
}

impl<'a> ShellOutput<'a> {
    pub fn new(buffer: &'a RefCell<Vec<u8>>) -> Self {
        Self { buffer }
    }
}

impl ErrorType for ShellOutput<'_> {
    type Error = ErrorKind;
}

impl Write for ShellOutput<'_> {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.buffer.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Push one key into the CLI. Once a line completes into a command, it is
/// stored in `parsed`.
pub fn feed<W, CB, HB>(
    cli: &mut Cli<W, ErrorKind, CB, HB>,
    byte: u8,
    parsed: &mut Option<OperatorCommand>,
) -> Result<(), ErrorKind>
where
    W: Write<Error = ErrorKind>,
    CB: Buffer,
    HB: Buffer,
{
    cli.process_byte::<OperatorCommand, _>(
        normalize_key(byte),
        &mut OperatorCommand::processor(|_, command| {
            *parsed = Some(command);
            Ok(())
        }),
    )
}

/// Cooked terminals deliver `\n`, the CLI finishes a line on `\r`.
pub fn normalize_key(byte: u8) -> u8 {
    match byte {
        b'\n' => b'\r',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use embedded_cli::cli::CliBuilder;

    use super::*;
    use crate::types::checklist::{default_tabs, ChecklistItem};

    fn parse(line: &str) -> Option<OperatorCommand> {
        let output = RefCell::new(Vec::new());
        let mut command_buffer = [0u8; 64];
        let mut history_buffer = [0u8; 64];
        let mut cli = CliBuilder::default()
            .writer(ShellOutput::new(&output))
            .command_buffer(command_buffer.as_mut_slice())
            .history_buffer(history_buffer.as_mut_slice())
            .prompt(CMD_PROMPT)
            .build()
            .unwrap();

        let mut parsed = None;
        for byte in line.bytes().chain([b'\n']) {
            feed(&mut cli, byte, &mut parsed).unwrap();
        }
        parsed
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Some(OperatorCommand::Show), parse("show"));
        assert_eq!(Some(OperatorCommand::Tab { index: 2 }), parse("tab 2"));
        assert_eq!(
            Some(OperatorCommand::Slide { index: 6, value: 420 }),
            parse("slide 6 420")
        );
        assert_eq!(Some(OperatorCommand::Quit), parse("quit"));
        assert_eq!(None, parse("launch"));
    }

    #[test]
    fn test_feed_waits_for_line_end() {
        let output = RefCell::new(Vec::new());
        let mut command_buffer = [0u8; 64];
        let mut history_buffer = [0u8; 64];
        let mut cli = CliBuilder::default()
            .writer(ShellOutput::new(&output))
            .command_buffer(command_buffer.as_mut_slice())
            .history_buffer(history_buffer.as_mut_slice())
            .prompt(CMD_PROMPT)
            .build()
            .unwrap();

        let mut parsed = None;
        for byte in b"press 5".iter().copied() {
            feed(&mut cli, byte, &mut parsed).unwrap();
            assert_eq!(None, parsed);
        }

        feed(&mut cli, b'\n', &mut parsed).unwrap();
        assert_eq!(Some(OperatorCommand::Press { index: 5 }), parsed);
    }

    #[test]
    fn test_execute_walks_the_panel() {
        let mut panel = Panel::new(&default_tabs()).unwrap();

        assert_eq!(Reply::Redraw, execute(&mut panel, OperatorCommand::Tab { index: 1 }));
        assert_eq!(
            Reply::Redraw,
            execute(&mut panel, OperatorCommand::Press { index: 5 })
        );
        assert!(panel.dialog().is_some());

        // Only dismissing works while the dialog is open
        assert_eq!(
            Reply::Note("Dismiss the open dialog first".into()),
            execute(&mut panel, OperatorCommand::Toggle { index: 0 })
        );
        assert_eq!(Reply::Redraw, execute(&mut panel, OperatorCommand::Dismiss));
        assert_eq!(
            Reply::Note("No dialog is open".into()),
            execute(&mut panel, OperatorCommand::Dismiss)
        );

        for index in 0..5 {
            execute(&mut panel, OperatorCommand::Toggle { index });
        }
        execute(&mut panel, OperatorCommand::Press { index: 5 });
        assert_eq!(2, panel.active());
    }

    #[test]
    fn test_auto_items_are_read_only() {
        let mut panel = Panel::new(&default_tabs()).unwrap();
        panel.apply(&ChecklistItem::new("GNSS FIX", true));

        assert_eq!(
            Reply::Note("<GNSS FIX> is ticked automatically".into()),
            execute(&mut panel, OperatorCommand::Toggle { index: 1 })
        );
        assert_eq!(Some(true), panel.checked(0, "GNSS FIX"));
    }
}

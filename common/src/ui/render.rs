use std::io::Write;

use super::panel::{Panel, Widget};
use crate::types::checklist::{ButtonAction, TickMode};

pub const CLEAR_SCREEN: &[u8] = b"\x1B[2J\x1B[H";

/// Draw the whole panel: title, tab bar, the visible tab and any dialog.
pub fn render(panel: &Panel, title: &str, out: &mut impl Write) -> std::io::Result<()> {
    out.write_all(CLEAR_SCREEN)?;
    writeln!(out, "== {} ==\r", title)?;

    for (idx, tab) in panel.tabs().iter().enumerate() {
        if idx == panel.active() {
            write!(out, "\x1B[7m {}: {} \x1B[0m ", idx, tab.title)?;
        } else {
            write!(out, " {}: {}  ", idx, tab.title)?;
        }
    }
    writeln!(out, "\r\n\r")?;

    for (idx, widget) in panel.active_tab().widgets.iter().enumerate() {
        match widget {
            Widget::Check {
                label,
                mode,
                checked,
            } => {
                let mark = if *checked { 'x' } else { ' ' };
                let auto = if *mode == TickMode::Auto { " (auto)" } else { "" };
                writeln!(out, "{:>3} [{}] {}{}\r", idx, mark, label, auto)?;
            }
            Widget::Button { label, action } => {
                let hint = match action {
                    ButtonAction::Advance => "next tab",
                    ButtonAction::Complete => "finish",
                };
                writeln!(out, "{:>3} <{}> ({})\r", idx, label, hint)?;
            }
            Widget::Slider {
                label,
                value,
                min,
                max,
            } => {
                writeln!(out, "{:>3} {} {} [{}..{}]\r", idx, label, value, min, max)?;
            }
        }
    }

    if let Some(dialog) = panel.dialog() {
        writeln!(out, "\r\n+-- {} --\r", dialog.title())?;
        writeln!(out, "| {}\r", dialog.message())?;
        writeln!(out, "+-- type `dismiss` to close\r")?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::checklist::{default_tabs, ChecklistItem};

    fn rendered(panel: &Panel) -> String {
        let mut out = Vec::new();
        render(panel, "Instructor", &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_shows_visible_tab_only() {
        let mut panel = Panel::new(&default_tabs()).unwrap();
        panel.select(2).unwrap();
        panel.apply(&ChecklistItem::new("Pixhawk Booted", true));

        let text = rendered(&panel);
        assert!(text.contains("== Instructor =="));
        assert!(text.contains("[x] Pixhawk Booted (auto)"));
        assert!(text.contains("[ ] Odroid Booted\r"));
        assert!(text.contains("<Ready for Engine start> (next tab)"));
        assert!(!text.contains("Close final hatches"));
    }

    #[test]
    fn test_shows_dialog() {
        let mut panel = Panel::new(&default_tabs()).unwrap();
        panel.select(1).unwrap();
        panel.advance().unwrap();

        let text = rendered(&panel);
        assert!(text.contains("+-- Error --"));
        assert!(text.contains("| Not all items checked"));
    }
}

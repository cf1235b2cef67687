use crate::errors::{ConfigError, PanelError};
use crate::types::checklist::{ButtonAction, ChecklistItem, TabDefinition, TickMode, WidgetDefinition};

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Check {
        label: String,
        mode: TickMode,
        checked: bool,
    },
    Button {
        label: String,
        action: ButtonAction,
    },
    Slider {
        label: String,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl From<&WidgetDefinition> for Widget {
    fn from(definition: &WidgetDefinition) -> Self {
        match definition.clone() {
            WidgetDefinition::Check { label, mode } => Widget::Check {
                label,
                mode,
                checked: false,
            },
            WidgetDefinition::Button { label, action } => Widget::Button { label, action },
            WidgetDefinition::Slider {
                label,
                value,
                min,
                max,
            } => Widget::Slider {
                label,
                value: value.clamp(min, max.max(min)),
                min,
                max: max.max(min),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub title: String,
    pub widgets: Vec<Widget>,
}

impl Tab {
    fn checkboxes(&self) -> impl Iterator<Item = (&str, bool)> {
        self.widgets.iter().filter_map(|widget| match widget {
            Widget::Check { label, checked, .. } => Some((label.as_str(), *checked)),
            _ => None,
        })
    }

    pub fn all_checked(&self) -> bool {
        self.checkboxes().all(|(_, checked)| checked)
    }
}

/// Modal dialogs. While one is open, the operator can only dismiss it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialog {
    Incomplete,
    Complete,
}

impl Dialog {
    pub fn title(&self) -> &'static str {
        match self {
            Dialog::Incomplete => "Error",
            Dialog::Complete => "Done",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Dialog::Incomplete => "Not all items checked",
            Dialog::Complete => "Checklist Complete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonOutcome {
    /// Moved on to the tab with this index
    Advanced(usize),
    /// Some box is unchecked, the warning dialog is shown
    Blocked,
    /// The final tab was validated, the completion dialog is shown
    Completed,
}

/// The widget state of the checklist UI. Only the panel itself mutates it.
#[derive(Debug, Clone)]
pub struct Panel {
    tabs: Vec<Tab>,
    active: usize,
    dialog: Option<Dialog>,
    completed: bool,
}

impl Panel {
    pub fn new(definitions: &[TabDefinition]) -> Result<Self, ConfigError> {
        if definitions.is_empty() {
            return Err(ConfigError::NoTabs);
        }

        let tabs = definitions
            .iter()
            .map(|definition| Tab {
                title: definition.title.clone(),
                widgets: definition.widgets.iter().map(Widget::from).collect(),
            })
            .collect();

        Ok(Self {
            tabs,
            active: 0,
            dialog: None,
            completed: false,
        })
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn active_tab(&self) -> &Tab {
        &self.tabs[self.active]
    }

    pub fn dialog(&self) -> Option<Dialog> {
        self.dialog
    }

    /// True once the final tab has been validated.
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Checked state of `label` on tab `tab`, if it is there.
    pub fn checked(&self, tab: usize, label: &str) -> Option<bool> {
        self.tabs
            .get(tab)?
            .checkboxes()
            .find(|(l, _)| *l == label)
            .map(|(_, checked)| checked)
    }

    /// Set every checkbox on the visible tab whose label matches the item.
    /// Checkboxes on other tabs are left alone. Returns how many widgets
    /// changed state.
    pub fn apply(&mut self, item: &ChecklistItem) -> usize {
        let mut changed = 0;
        for widget in self.tabs[self.active].widgets.iter_mut() {
            if let Widget::Check { label, checked, .. } = widget {
                if *label == item.name && *checked != item.state {
                    *checked = item.state;
                    changed += 1;
                }
            }
        }
        changed
    }

    fn ensure_no_dialog(&self) -> Result<(), PanelError> {
        match self.dialog {
            Some(_) => Err(PanelError::DialogOpen),
            None => Ok(()),
        }
    }

    fn widget_mut(&mut self, index: u8) -> Result<&mut Widget, PanelError> {
        self.ensure_no_dialog()?;
        self.tabs[self.active]
            .widgets
            .get_mut(index as usize)
            .ok_or(PanelError::NoSuchWidget(index))
    }

    pub fn select(&mut self, index: u8) -> Result<(), PanelError> {
        self.ensure_no_dialog()?;
        if index as usize >= self.tabs.len() {
            return Err(PanelError::NoSuchTab(index));
        }
        self.active = index as usize;
        Ok(())
    }

    /// Flip an operator-tickable checkbox, returning its new state.
    pub fn toggle(&mut self, index: u8) -> Result<bool, PanelError> {
        match self.widget_mut(index)? {
            Widget::Check {
                mode: TickMode::Manual,
                checked,
                ..
            } => {
                *checked = !*checked;
                Ok(*checked)
            }
            Widget::Check { label, .. } => Err(PanelError::ReadOnly(label.clone())),
            _ => Err(PanelError::WrongWidget(index)),
        }
    }

    /// Move a slider, clamped to its range. Returns the value it ended at.
    pub fn slide(&mut self, index: u8, value: i32) -> Result<i32, PanelError> {
        match self.widget_mut(index)? {
            Widget::Slider {
                value: current,
                min,
                max,
                ..
            } => {
                *current = value.clamp(*min, *max);
                Ok(*current)
            }
            _ => Err(PanelError::WrongWidget(index)),
        }
    }

    pub fn press(&mut self, index: u8) -> Result<ButtonOutcome, PanelError> {
        match self.widget_mut(index)? {
            Widget::Button { action, .. } => {
                let action = *action;
                Ok(self.run_action(action))
            }
            _ => Err(PanelError::WrongWidget(index)),
        }
    }

    /// Validate the visible tab, then move on to the next one. On the last
    /// tab this behaves like completing the checklist.
    pub fn advance(&mut self) -> Result<ButtonOutcome, PanelError> {
        self.ensure_no_dialog()?;
        Ok(self.run_action(ButtonAction::Advance))
    }

    pub fn complete(&mut self) -> Result<ButtonOutcome, PanelError> {
        self.ensure_no_dialog()?;
        Ok(self.run_action(ButtonAction::Complete))
    }

    fn run_action(&mut self, action: ButtonAction) -> ButtonOutcome {
        if !self.active_tab().all_checked() {
            self.dialog = Some(Dialog::Incomplete);
            return ButtonOutcome::Blocked;
        }

        let next = self.active + 1;
        match action {
            ButtonAction::Advance if next < self.tabs.len() => {
                self.active = next;
                ButtonOutcome::Advanced(next)
            }
            _ => {
                self.completed = true;
                self.dialog = Some(Dialog::Complete);
                ButtonOutcome::Completed
            }
        }
    }

    /// Close the open dialog, if any.
    pub fn dismiss(&mut self) -> Option<Dialog> {
        self.dialog.take()
    }
}

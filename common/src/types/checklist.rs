use serde::{Deserialize, Serialize};

/// A single named checklist state, as transferred from the telemetry
/// classifier to the checklist UI. The state is sent as `0` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub state: bool,
}

impl ChecklistItem {
    pub fn new(name: impl Into<String>, state: bool) -> Self {
        Self {
            name: name.into(),
            state,
        }
    }
}

/// Whether a checkbox is driven by telemetry or ticked by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickMode {
    /// Read-only, (un)checked by incoming telemetry
    Auto,
    /// Interactive, (un)checked by the operator
    Manual,
}

/// What happens when a button on a tab is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    /// Check that all boxes are ticked, then move on to the next tab
    Advance,
    /// Check that all boxes are ticked, then report the checklist as done
    Complete,
}

/// Static description of a widget, used when building the panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum WidgetDefinition {
    Check {
        label: String,
        mode: TickMode,
    },
    Button {
        label: String,
        action: ButtonAction,
    },
    Slider {
        #[serde(default)]
        label: String,
        value: i32,
        min: i32,
        max: i32,
    },
}

impl WidgetDefinition {
    pub fn auto(label: &str) -> Self {
        Self::Check {
            label: label.into(),
            mode: TickMode::Auto,
        }
    }

    pub fn manual(label: &str) -> Self {
        Self::Check {
            label: label.into(),
            mode: TickMode::Manual,
        }
    }

    pub fn button(label: &str, action: ButtonAction) -> Self {
        Self::Button {
            label: label.into(),
            action,
        }
    }

    pub fn slider(label: &str, value: i32, min: i32, max: i32) -> Self {
        Self::Slider {
            label: label.into(),
            value,
            min,
            max,
        }
    }
}

/// A named page of widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabDefinition {
    pub title: String,
    #[serde(default)]
    pub widgets: Vec<WidgetDefinition>,
}

impl TabDefinition {
    /// Iterate over the checklist entries of this tab, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, TickMode)> {
        self.widgets.iter().filter_map(|widget| match widget {
            WidgetDefinition::Check { label, mode } => Some((label.as_str(), *mode)),
            _ => None,
        })
    }
}

/// The checklists shown when no other definition is configured.
pub fn default_tabs() -> Vec<TabDefinition> {
    use ButtonAction::{Advance, Complete};
    use WidgetDefinition as W;

    vec![
        TabDefinition {
            title: "Common (Copter/Plane) Failures".into(),
            widgets: vec![W::slider("Voltage", 200, 150, 500), W::auto("GNSS FIX")],
        },
        TabDefinition {
            title: "1. During Assembly".into(),
            widgets: vec![
                W::manual("Confirm batteries charged"),
                W::manual("No physical damage to airframe"),
                W::manual("All electronics present and connected"),
                W::manual("Bottle loaded"),
                W::manual("Ground station operational"),
                W::button("Close final hatches", Advance),
                W::slider("", 200, 150, 500),
            ],
        },
        TabDefinition {
            title: "2. Before Engine Start".into(),
            widgets: vec![
                W::manual("Avionics Power ON"),
                W::auto("Pixhawk Booted"),
                W::manual("Odroid Booted"),
                W::manual("Cameras calibrated and capturing"),
                W::auto("GNSS FIX"),
                W::manual("Airspeed check"),
                W::manual("Barometer check"),
                W::manual("Compass check"),
                W::auto("Flight mode MANUAL"),
                W::auto("Avionics Power"),
                W::auto("Servo Power"),
                W::auto("IMU Check"),
                W::manual("Aircraft Params Loaded"),
                W::auto("Waypoints Loaded"),
                W::manual("Servo and clevis check"),
                W::manual("Geofence loaded"),
                W::manual("Ignition circuit and battery check"),
                W::manual("Check stabilisation in FBWA mode"),
                W::button("Ready for Engine start", Advance),
            ],
        },
        TabDefinition {
            title: "3. Before Takeoff".into(),
            widgets: vec![
                W::auto("Compass active"),
                W::manual("Control surfaces free and correct"),
                W::manual("Runway clear"),
                W::button("Ready for Takeoff", Advance),
            ],
        },
        TabDefinition {
            title: "4. Before Cruise".into(),
            widgets: vec![
                W::auto("Altitude > 30 m"),
                W::auto("Airspeed > 10 m/s"),
                W::button("Checklist done", Complete),
            ],
        },
    ]
}

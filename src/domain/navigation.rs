// Dashboard panels
use super::error::StationError;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    #[default]
    Home,
    Sensors,
    Settings,
}

impl Panel {
    pub const ALL: [Panel; 3] = [Panel::Home, Panel::Sensors, Panel::Settings];

    pub fn id(&self) -> &'static str {
        match self {
            Panel::Home => "home",
            Panel::Sensors => "sensors",
            Panel::Settings => "settings",
        }
    }

    pub fn nav_key(&self) -> String {
        format!("nav.{}", self.id())
    }

    pub fn title_key(&self) -> String {
        format!("page.{}", self.id())
    }
}

impl FromStr for Panel {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Panel::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| StationError::UnknownPanel(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationEntry {
    pub id: Panel,
    pub label: String,
    pub title: String,
    pub active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_keys() {
        assert_eq!(Panel::Sensors.nav_key(), "nav.sensors");
        assert_eq!(Panel::Settings.title_key(), "page.settings");
        assert_eq!("home".parse::<Panel>(), Ok(Panel::Home));
        assert_eq!(
            "launchpad".parse::<Panel>(),
            Err(StationError::UnknownPanel("launchpad".to_string()))
        );
    }
}

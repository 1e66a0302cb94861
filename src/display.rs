//! Everything the user sees. [Surface] is the logical state of the screen
//! and the only thing the app writes to; a [View] decides how that state is
//! actually drawn and where user input comes from.

pub mod terminal;

use crate::{
    state::Theme,
    weather::{code, CurrentWeather},
};
use chrono::Local;
use rand::Rng;

/// A front-end: owns a [Surface], draws it, and produces user input
pub trait View {
    /// Current contents of the search box
    fn input_value(&self) -> String;

    /// The display state to render into
    fn surface(&mut self) -> &mut Surface;

    /// Draw the surface as it currently stands
    fn present(&mut self) -> anyhow::Result<()> {
        Ok(())
    }

    /// Block until the user does something. `None` means there will be no
    /// more input.
    fn next_event(&mut self) -> anyhow::Result<Option<UiEvent>>;
}

/// A user action
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// Search for a city. `None` searches for whatever is in the input box,
    /// `Some` is a history chip re-running its city.
    Search(Option<String>),
    ToggleTheme,
    SetTheme(Theme),
    Quit,
}

/// Logical display state. The weather and error panels are never shown at
/// the same time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surface {
    pub theme: Theme,
    /// A search is in flight
    pub loading: bool,
    pub weather: Option<WeatherReport>,
    pub error: Option<String>,
    /// City names, in display order
    pub history: Vec<String>,
}

impl Surface {
    /// Clear both panels before a new search
    pub fn show_loading(&mut self) {
        self.loading = true;
        self.weather = None;
        self.error = None;
    }

    pub fn show_weather(&mut self, report: WeatherReport) {
        self.loading = false;
        self.error = None;
        self.weather = Some(report);
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.weather = None;
        self.error = Some(message.into());
    }

    pub fn hide_error(&mut self) {
        self.error = None;
    }

    /// Replace the history chips
    pub fn render_history(&mut self, entries: &[String]) {
        self.history = entries.to_vec();
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The action attached to a history chip. `index` is 0-based.
    pub fn history_action(&self, index: usize) -> Option<UiEvent> {
        self.history
            .get(index)
            .map(|city| UiEvent::Search(Some(city.clone())))
    }
}

/// Weather for a city, formatted for display
#[derive(Clone, Debug, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    /// Degrees Celsius, no unit
    pub temperature: String,
    /// Includes the unit
    pub wind_speed: String,
    pub condition: &'static str,
    /// Simulated, see [placeholder_humidity]
    pub humidity: String,
    /// Local time the report was built
    pub updated: String,
}

impl WeatherReport {
    pub fn new(city: &str, weather: &CurrentWeather) -> Self {
        Self {
            city: city.to_owned(),
            temperature: weather.temperature.to_string(),
            wind_speed: format!("{} km/h", weather.wind_speed),
            condition: code::describe(weather.weather_code),
            humidity: format!("{}%", placeholder_humidity()),
            updated: Local::now().format("%H:%M").to_string(),
        }
    }
}

/// Current conditions from the API don't include humidity. This is a random
/// stand-in in [40, 80) and is *not* a measurement.
pub fn placeholder_humidity() -> u8 {
    rand::thread_rng().gen_range(40..80)
}

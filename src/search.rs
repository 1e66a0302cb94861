//! The app itself: turns user actions into lookups, and lookups into
//! display and history updates

use crate::{
    display::{UiEvent, View, WeatherReport},
    geocode::{GeoResult, Geocoder},
    state::{HistoryStore, Theme, ThemeStore},
    storage::Storage,
    weather::{CurrentWeather, WeatherSource},
};
use log::{debug, error, info, warn};
use std::ops::ControlFlow;

/// How a single search ended
#[derive(Clone, Debug, PartialEq)]
pub enum SearchOutcome {
    /// Nothing to search for
    Ignored,
    NotFound,
    /// Weather is on screen, for the resolved city name
    Found(String),
    /// Some request failed. The cause has been logged.
    Failed,
}

pub struct App<G, W, S> {
    geocoder: G,
    weather: W,
    history: HistoryStore<S>,
    theme: ThemeStore<S>,
}

impl<G: Geocoder, W: WeatherSource, S: Storage + Clone> App<G, W, S> {
    pub const NOT_FOUND: &'static str = "City not found";
    pub const FETCH_FAILED: &'static str =
        "Failed to fetch weather data. Please try again.";

    /// Load history and theme from storage
    pub fn new(geocoder: G, weather: W, storage: S) -> Self {
        Self {
            geocoder,
            weather,
            history: HistoryStore::load(storage.clone()),
            theme: ThemeStore::load(storage),
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme.get()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.all()
    }

    /// Put the persisted state on screen
    pub fn start(&self, view: &mut impl View) {
        let surface = view.surface();
        surface.apply_theme(self.theme.get());
        surface.render_history(&self.history.all());
    }

    /// Handle user input until the user quits or input runs out
    pub fn run(&mut self, view: &mut impl View) -> anyhow::Result<()> {
        self.start(view);
        view.present()?;
        while let Some(event) = view.next_event()? {
            if self.handle(view, event).is_break() {
                break;
            }
            view.present()?;
        }
        info!("Input closed, shutting down");
        Ok(())
    }

    /// Apply a single user action
    pub fn handle(
        &mut self,
        view: &mut impl View,
        event: UiEvent,
    ) -> ControlFlow<()> {
        debug!("Handling {event:?}");
        match event {
            UiEvent::Search(city) => {
                self.search(view, city.as_deref());
            }
            UiEvent::ToggleTheme => self.toggle_theme(view),
            UiEvent::SetTheme(theme) => self.set_theme(view, theme),
            UiEvent::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    /// Look up and show the weather for a city. An explicit city (from a
    /// history chip) wins, otherwise the input box is used. A blank search
    /// does nothing at all.
    ///
    /// Failures are shown to the user as one generic message; the cause only
    /// goes to the log. History only changes when weather is shown.
    pub fn search(
        &mut self,
        view: &mut impl View,
        city: Option<&str>,
    ) -> SearchOutcome {
        let term = match city.filter(|city| !city.is_empty()) {
            Some(city) => city.to_owned(),
            None => view.input_value().trim().to_owned(),
        };
        if term.is_empty() {
            debug!("Ignoring empty search");
            return SearchOutcome::Ignored;
        }

        view.surface().show_loading();
        if let Err(err) = view.present() {
            error!("Error drawing loading state: {err:?}");
        }

        match self.lookup(&term) {
            Ok(Some((place, weather))) => {
                view.surface()
                    .show_weather(WeatherReport::new(&place.name, &weather));
                self.remember(view, &place.name);
                view.surface().hide_error();
                SearchOutcome::Found(place.name)
            }
            Ok(None) => {
                info!("No match for `{term}`");
                view.surface().show_error(Self::NOT_FOUND);
                SearchOutcome::NotFound
            }
            Err(err) => {
                error!("Error fetching weather for `{term}`: {err:?}");
                view.surface().show_error(Self::FETCH_FAILED);
                SearchOutcome::Failed
            }
        }
    }

    pub fn toggle_theme(&mut self, view: &mut impl View) {
        self.set_theme(view, self.theme.get().toggled());
    }

    /// Switch theme on screen and persist it. A failed write is only logged.
    pub fn set_theme(&mut self, view: &mut impl View, theme: Theme) {
        if let Err(err) = self.theme.set(theme) {
            error!("Error saving theme: {err:?}");
        }
        view.surface().apply_theme(theme);
    }

    /// Geocode, then fetch weather for the match
    fn lookup(
        &self,
        term: &str,
    ) -> anyhow::Result<Option<(GeoResult, CurrentWeather)>> {
        let Some(place) = self.geocoder.resolve(term)? else {
            return Ok(None);
        };
        let weather = self
            .weather
            .fetch_current(place.latitude, place.longitude)?;
        Ok(Some((place, weather)))
    }

    /// Add a city to history and refresh the chips if anything changed
    fn remember(&mut self, view: &mut impl View, city: &str) {
        match self.history.add(city) {
            Ok(false) => {}
            Ok(true) => view.surface().render_history(&self.history.all()),
            // The in-memory history was still updated
            Err(err) => {
                warn!("{err:?}");
                view.surface().render_history(&self.history.all());
            }
        }
    }
}

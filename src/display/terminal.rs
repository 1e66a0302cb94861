//! Line-based terminal front-end. Each line of input is either a city to
//! search for or a `:command`. The whole surface is redrawn after anything
//! changes, in the colors of the active theme when the output is a color
//! terminal.

use crate::{
    display::{Surface, UiEvent, View},
    palette::{Color, Palettes},
    state::Theme,
};
use anyhow::Context;
use itertools::Itertools;
use log::trace;
use owo_colors::OwoColorize;
use std::{
    fmt::Display,
    io::{BufRead, Write},
};

const HELP: &str = "\
Type a city name and press Enter to look up its weather.
  :1 .. :5       search again for a recent city
  :theme         toggle light/dark theme
  :light, :dark  pick a theme
  :help          show this message
  :q             quit";

pub struct TerminalDisplay<R, W> {
    input: R,
    output: W,
    palettes: Palettes,
    /// Write color escapes. Off for pipes and files
    color: bool,
    surface: Surface,
    /// Contents of the search box, i.e. the last line that wasn't a command
    input_value: String,
    /// The surface as of the last draw. `None` until something is drawn
    drawn: Option<Surface>,
}

/// What a line of input turned into
#[derive(Debug, PartialEq)]
enum Line {
    Event(UiEvent),
    /// Something to tell the user that doesn't involve the app
    Note(String),
}

impl<R: BufRead, W: Write> TerminalDisplay<R, W> {
    pub fn new(input: R, output: W, palettes: Palettes, color: bool) -> Self {
        Self {
            input,
            output,
            palettes,
            color,
            surface: Surface::default(),
            input_value: String::new(),
            drawn: None,
        }
    }

    /// If the surface has changed since the last draw, write it out. Return
    /// whether anything was written.
    pub fn draw(&mut self) -> anyhow::Result<bool> {
        if self.drawn.as_ref() == Some(&self.surface) {
            return Ok(false);
        }
        trace!("Surface changed, redrawing: {:?}", self.surface);
        let frame = self.render();
        writeln!(self.output, "{frame}")
            .and_then(|()| self.output.flush())
            .context("Error writing to terminal")?;
        self.drawn = Some(self.surface.clone());
        Ok(true)
    }

    /// Color some text, if color is enabled
    fn paint(&self, color: Color, text: impl Display) -> String {
        if self.color {
            text.truecolor(color.red, color.green, color.blue).to_string()
        } else {
            text.to_string()
        }
    }

    /// Format the full surface as text
    fn render(&self) -> String {
        let surface = &self.surface;
        let palette = self.palettes.get(surface.theme);
        let mut lines = vec![format!(
            "{} {}",
            self.paint(palette.accent, "weathervane"),
            self.paint(palette.muted, format!("({} theme)", surface.theme)),
        )];

        if surface.loading {
            lines.push(self.paint(palette.muted, "Searching..."));
        }

        if let Some(report) = &surface.weather {
            lines.push(format!(
                "{} {}",
                self.paint(palette.accent, &report.city),
                self.paint(
                    palette.muted,
                    format!("(updated {})", report.updated)
                ),
            ));
            let rows = [
                ("Temperature", format!("{}°C", report.temperature)),
                ("Wind", report.wind_speed.clone()),
                ("Condition", report.condition.to_owned()),
                ("Humidity", format!("{} (simulated)", report.humidity)),
            ];
            for (label, value) in rows {
                lines.push(format!(
                    "  {} {}",
                    self.paint(palette.muted, format!("{label:<12}")),
                    self.paint(palette.text, value),
                ));
            }
        }

        if let Some(error) = &surface.error {
            lines.push(self.paint(palette.error, error));
        }

        if !surface.history.is_empty() {
            let chips = surface
                .history
                .iter()
                .enumerate()
                .map(|(i, city)| format!("[{}] {city}", i + 1))
                .join("  ");
            lines
                .push(self.paint(palette.muted, format!("Recent: {chips}")));
        }

        lines.join("\n")
    }

    /// Interpret one line of input
    fn parse_line(&mut self, line: &str) -> Line {
        let Some(command) = line.trim().strip_prefix(':') else {
            // Anything else is typed into the search box, then Enter
            self.input_value = line.to_owned();
            return Line::Event(UiEvent::Search(None));
        };

        match command.trim() {
            "q" | "quit" => Line::Event(UiEvent::Quit),
            "theme" => Line::Event(UiEvent::ToggleTheme),
            "light" => Line::Event(UiEvent::SetTheme(Theme::Light)),
            "dark" => Line::Event(UiEvent::SetTheme(Theme::Dark)),
            "help" | "?" => Line::Note(HELP.to_owned()),
            other => match other.parse::<usize>() {
                Ok(number) => number
                    .checked_sub(1)
                    .and_then(|index| self.surface.history_action(index))
                    .map(Line::Event)
                    .unwrap_or_else(|| {
                        Line::Note(format!("No recent search #{number}"))
                    }),
                Err(_) => Line::Note(format!(
                    "Unknown command `:{other}`, try :help"
                )),
            },
        }
    }

    fn note(&mut self, message: &str) -> anyhow::Result<()> {
        let muted = self.palettes.get(self.surface.theme).muted;
        let message = self.paint(muted, message);
        writeln!(self.output, "{message}").context("Error writing to terminal")
    }
}

impl<R: BufRead, W: Write> View for TerminalDisplay<R, W> {
    fn input_value(&self) -> String {
        self.input_value.clone()
    }

    fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.draw()?;
        Ok(())
    }

    fn next_event(&mut self) -> anyhow::Result<Option<UiEvent>> {
        loop {
            write!(self.output, "> ")
                .and_then(|()| self.output.flush())
                .context("Error writing to terminal")?;
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .context("Error reading from terminal")?;
            if read == 0 {
                return Ok(None);
            }

            let line = line.trim_end_matches(&['\r', '\n'][..]);
            match self.parse_line(line) {
                Line::Event(event) => return Ok(Some(event)),
                Line::Note(message) => self.note(&message)?,
            }
        }
    }
}

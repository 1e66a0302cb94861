use crate::display::{Surface, UiEvent, View};
use std::collections::VecDeque;

/// Scripted front-end, to drive the app without a terminal
#[derive(Debug, Default)]
pub struct MockDisplay {
    pub surface: Surface,
    /// Contents of the search box
    pub input: String,
    /// Number of times the surface was presented
    pub presented: usize,
    /// The surface as of the most recent present
    pub last_presented: Option<Surface>,
    script: VecDeque<Step>,
}

#[derive(Debug)]
enum Step {
    /// Type text into the search box, then press Enter
    Enter(String),
    Event(UiEvent),
}

impl MockDisplay {
    pub fn enter(mut self, text: &str) -> Self {
        self.script.push_back(Step::Enter(text.to_owned()));
        self
    }

    pub fn then(mut self, event: UiEvent) -> Self {
        self.script.push_back(Step::Event(event));
        self
    }

    /// Number of scripted steps not consumed yet
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl View for MockDisplay {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn surface(&mut self) -> &mut Surface {
        &mut self.surface
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.presented += 1;
        self.last_presented = Some(self.surface.clone());
        Ok(())
    }

    fn next_event(&mut self) -> anyhow::Result<Option<UiEvent>> {
        Ok(self.script.pop_front().map(|step| match step {
            Step::Enter(text) => {
                self.input = text;
                UiEvent::Search(None)
            }
            Step::Event(event) => event,
        }))
    }
}

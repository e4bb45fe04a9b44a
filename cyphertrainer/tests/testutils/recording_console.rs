//! Console that records what commands report

use cyphertrainer::ConsoleLogger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Error(String),
    Failure(String),
    Success(String),
    Information(String),
}

#[derive(Debug, Default)]
pub struct RecordingConsole {
    pub lines: Vec<Line>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn errors(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.lines.iter().any(|line| match line {
            Line::Error(m) | Line::Failure(m) | Line::Success(m) | Line::Information(m) => {
                m.contains(text)
            }
        })
    }
}

impl ConsoleLogger for RecordingConsole {
    fn error(&mut self, message: &str) {
        self.lines.push(Line::Error(message.to_string()));
    }

    fn failure(&mut self, message: &str) {
        self.lines.push(Line::Failure(message.to_string()));
    }

    fn success(&mut self, message: &str) {
        self.lines.push(Line::Success(message.to_string()));
    }

    fn information(&mut self, message: &str) {
        self.lines.push(Line::Information(message.to_string()));
    }
}

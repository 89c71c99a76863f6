use crate::ics;
use crate::model::ResolvedEvent;

/// Calendrier en construction : ajout seul, ordre d'insertion conservé.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Calendar {
    events: Vec<ResolvedEvent>,
}

impl Calendar {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: ResolvedEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[ResolvedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Document iCalendar (CRLF, lignes pliées).
    pub fn to_ics(&self) -> String {
        ics::render(&self.events)
    }

    pub fn from_ics(input: &str) -> Result<Self, ics::IcsError> {
        Ok(Self {
            events: ics::parse(input)?,
        })
    }
}

impl FromIterator<ResolvedEvent> for Calendar {
    fn from_iter<I: IntoIterator<Item = ResolvedEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

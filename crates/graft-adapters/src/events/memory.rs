use std::sync::{Arc, Mutex};

use graft_core::{application::ports::EventSink, domain::Event};

/// Collects events for later inspection. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryEvents {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events().iter().map(ToString::to_string).collect()
    }
}

impl EventSink for MemoryEvents {
    fn send(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_across_clones() {
        let sink = MemoryEvents::new();
        let other = sink.clone();
        sink.send(Event::start("one"));
        other.send(Event::finish("two").with_icon("✔"));

        assert_eq!(sink.messages(), vec!["one", "✔ two"]);
        assert!(sink.events()[0].in_progress());
    }
}

//! Input collaborator. The loop drains a finite queue of key events per
//! frame and feeds them through the responder chain.

use gamestate_traits::Key;
use std::collections::VecDeque;

pub trait InputSource {
    /// The next queued key, or None when the frame's input is drained.
    fn next_key(&mut self) -> Option<Key>;
}

/// A plain FIFO of key events. Tests and scripted runs push into it; an
/// interactive front-end would feed it from its event pump.
#[derive(Debug, Default)]
pub struct QueueInput {
    queue: VecDeque<Key>,
}

impl QueueInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: Key) {
        self.queue.push_back(key);
    }
}

impl InputSource for QueueInput {
    fn next_key(&mut self) -> Option<Key> {
        self.queue.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_push_order() {
        let mut input = QueueInput::new();
        input.push(Key::Escape);
        input.push(Key::Enter);
        assert_eq!(input.next_key(), Some(Key::Escape));
        assert_eq!(input.next_key(), Some(Key::Enter));
        assert_eq!(input.next_key(), None);
    }
}

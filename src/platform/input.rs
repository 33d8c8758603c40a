//! Keyboard/window input queue
//!
//! The windowing layer pushes raw events in as they arrive; the loop driver
//! pops them once per simulation step and samples held keys.

use std::collections::{HashSet, VecDeque};

/// Keys the game distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Escape,
    /// Anything else (still counts as "any key")
    Other,
}

/// Discrete input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    WindowClosed,
    KeyPressed(Key),
}

/// Pending events plus the set of keys currently held
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
    held: HashSet<Key>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down. OS auto-repeat updates held state but queues nothing,
    /// so holding a paddle key through the end of a match doesn't restart it.
    pub fn key_down(&mut self, key: Key, repeat: bool) {
        self.held.insert(key);
        if !repeat {
            self.events.push_back(InputEvent::KeyPressed(key));
        }
    }

    pub fn key_up(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Window close was requested
    pub fn close(&mut self) {
        self.events.push_back(InputEvent::WindowClosed);
    }

    /// Forget held keys (focus lost; releases won't be delivered)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn pop(&mut self) -> Option<InputEvent> {
        self.events.pop_front()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_pop_in_order() {
        let mut queue = InputQueue::new();
        queue.key_down(Key::Other, false);
        queue.close();
        assert_eq!(queue.pop(), Some(InputEvent::KeyPressed(Key::Other)));
        assert_eq!(queue.pop(), Some(InputEvent::WindowClosed));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_held_keys() {
        let mut queue = InputQueue::new();
        queue.key_down(Key::Up, false);
        assert!(queue.is_held(Key::Up));
        assert!(!queue.is_held(Key::Down));
        queue.key_up(Key::Up);
        assert!(!queue.is_held(Key::Up));
    }

    #[test]
    fn test_repeats_do_not_queue() {
        let mut queue = InputQueue::new();
        queue.key_down(Key::Down, false);
        queue.key_down(Key::Down, true);
        queue.key_down(Key::Down, true);
        assert_eq!(queue.pop(), Some(InputEvent::KeyPressed(Key::Down)));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_held(Key::Down));
    }

    #[test]
    fn test_release_all() {
        let mut queue = InputQueue::new();
        queue.key_down(Key::Up, false);
        queue.key_down(Key::Down, false);
        queue.release_all();
        assert!(!queue.is_held(Key::Up));
        assert!(!queue.is_held(Key::Down));
    }
}

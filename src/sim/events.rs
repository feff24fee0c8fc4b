//! Named game events and a synchronous publish/subscribe register
//!
//! Handlers run in registration order and each one completes before the
//! next is invoked. The bus is generic over the context handlers mutate,
//! so listeners receive the session's entities by reference instead of
//! reaching for shared globals.

use std::collections::HashMap;

/// Event tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyUp,
    KeyDown,
    /// Pause / resume toggle
    KeySpace,
    /// Restart
    KeyEnter,
    BallHit,
    GameWin,
    GameLose,
}

/// Side of the ball that touched something
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitDirection {
    Up,
    Down,
    Left,
    Right,
}

impl HitDirection {
    /// Left/right hits reverse dx, up/down hits reverse dy
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, HitDirection::Left | HitDirection::Right)
    }
}

/// What the ball hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Wall,
    Human,
    Enemy,
}

/// A transient game event with its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    KeyUp,
    KeyDown,
    KeySpace,
    KeyEnter,
    BallHit {
        direction: HitDirection,
        target: HitTarget,
    },
    GameWin,
    GameLose,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::KeyUp => EventKind::KeyUp,
            Event::KeyDown => EventKind::KeyDown,
            Event::KeySpace => EventKind::KeySpace,
            Event::KeyEnter => EventKind::KeyEnter,
            Event::BallHit { .. } => EventKind::BallHit,
            Event::GameWin => EventKind::GameWin,
            Event::GameLose => EventKind::GameLose,
        }
    }
}

/// Listener callback; receives the shared context and the event
pub type Handler<C> = Box<dyn FnMut(&mut C, &Event)>;

/// Ordered listener lists keyed by event kind
pub struct EventBus<C> {
    listeners: HashMap<EventKind, Vec<Handler<C>>>,
}

impl<C> Default for EventBus<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for EventBus<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<_, _> = self.listeners.iter().map(|(k, v)| (*k, v.len())).collect();
        f.debug_struct("EventBus").field("listeners", &counts).finish()
    }
}

impl<C> EventBus<C> {
    pub fn new() -> Self {
        Self {
            listeners: HashMap::new(),
        }
    }

    /// Append a handler for `kind`.
    ///
    /// No uniqueness check: registering the same logic twice makes it fire
    /// twice. Callers that rebuild their listeners must `clear()` first.
    pub fn subscribe<F>(&mut self, kind: EventKind, handler: F)
    where
        F: FnMut(&mut C, &Event) + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(handler));
    }

    /// Invoke every handler registered for the event's kind, in order.
    ///
    /// Publishing a kind nobody listens to is a no-op.
    pub fn publish(&mut self, ctx: &mut C, event: &Event) {
        if let Some(handlers) = self.listeners.get_mut(&event.kind()) {
            for handler in handlers.iter_mut() {
                handler(ctx, event);
            }
        }
    }

    /// Drop every registration
    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Number of handlers registered for `kind`
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(Vec::is_empty)
    }
}

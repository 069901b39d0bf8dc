//! Event records and listener registration
//!
//! Events are small `(source, value)` pairs delivered through the device's
//! message bus. The radio relays them to peers in the same group and raises
//! [`DATAGRAM_EVENT`] on [`RADIO_EVENT_SOURCE`] whenever a datagram arrives.

use bitflags::bitflags;

/// Event source ID used by the radio
pub const RADIO_EVENT_SOURCE: i32 = 9;

/// Event value raised by the radio when a datagram is received
pub const DATAGRAM_EVENT: i32 = 1;

/// How an event record is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventMode {
    /// Create the record only; it is never merged with a queued event of the
    /// same identity and is not fired by construction
    CreateOnly = 0,
    /// Create the record and fire it on the bus immediately
    CreateAndFire = 1,
}

/// An event signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// Component that raised the event
    pub source: i32,
    /// Event value
    pub value: i32,
    /// Launch mode
    pub mode: EventMode,
}

impl Event {
    /// Creates an event that must not collapse into an existing queued one.
    pub const fn create_only(source: i32, value: i32) -> Self {
        Self {
            source,
            value,
            mode: EventMode::CreateOnly,
        }
    }
}

bitflags! {
    /// Listener delivery options
    ///
    /// Controls what the bus does when a listener is still running as a new
    /// matching event arrives.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ListenerFlags: u16 {
        /// Run the handler again even if a previous invocation is in progress
        const REENTRANT = 0x0001;
        /// Queue the event until the running handler returns
        const QUEUE_IF_BUSY = 0x0002;
        /// Drop the event if the handler is busy
        const DROP_IF_BUSY = 0x0004;
        /// Handler never blocks and may run in the caller's context
        const NONBLOCKING = 0x0008;
        /// Deliver ahead of queued events
        const URGENT = 0x0010;
        /// Run immediately in the raising context
        const IMMEDIATE = Self::NONBLOCKING.bits() | Self::URGENT.bits();
    }
}

impl Default for ListenerFlags {
    fn default() -> Self {
        Self::QUEUE_IF_BUSY
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ListenerFlags {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ListenerFlags({=u16:#x})", self.bits());
    }
}

/// The device's event-notification mechanism
///
/// Handlers are owned by the bus; delivery is driven by the host's own
/// dispatch loop.
pub trait MessageBus {
    /// Handler type accepted by the bus (a function pointer, a closure slot, ...)
    type Handler;

    /// Registers `handler` for events matching `source` and `value`.
    fn listen(&mut self, source: i32, value: i32, handler: Self::Handler, flags: ListenerFlags);
}

//! Radio driver capability surface
//!
//! [`RadioDriver`] is the contract the radio layer imposes on the underlying
//! hardware driver. The driver owns modulation, timing and its receive queue;
//! this crate only borrows it per call.
//!
//! Setter values are forwarded exactly as the caller passed them. Range
//! checking, clamping or rejection is the driver's business.

use crate::{Datagram, Event};

/// Black-box radio driver
pub trait RadioDriver {
    /// Failure reported by [`enable`](RadioDriver::enable)
    type Error;

    /// Turns the radio on. Must be idempotent: enabling an already running
    /// radio reports success.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Joins a group; only datagrams sent to the same group are received.
    fn set_group(&mut self, id: i32);

    /// Sets the transmitter output power level.
    fn set_transmit_power(&mut self, level: i32);

    /// Tunes transmit and receive to the given band.
    fn set_frequency_band(&mut self, band: i32);

    /// Queues `payload` for transmission. Returns before the datagram is on air.
    fn send(&mut self, payload: &[u8]);

    /// Takes the next received datagram, or `None` if the queue is empty.
    /// Never blocks.
    fn recv(&mut self) -> Option<Datagram>;

    /// Hands an event to the radio's event service, which notifies local
    /// listeners and may forward it to peers in the same group.
    fn event_received(&mut self, event: Event);
}

impl<T: RadioDriver + ?Sized> RadioDriver for &mut T {
    type Error = T::Error;

    fn enable(&mut self) -> Result<(), Self::Error> {
        T::enable(self)
    }

    fn set_group(&mut self, id: i32) {
        T::set_group(self, id)
    }

    fn set_transmit_power(&mut self, level: i32) {
        T::set_transmit_power(self, level)
    }

    fn set_frequency_band(&mut self, band: i32) {
        T::set_frequency_band(self, band)
    }

    fn send(&mut self, payload: &[u8]) {
        T::send(self, payload)
    }

    fn recv(&mut self) -> Option<Datagram> {
        T::recv(self)
    }

    fn event_received(&mut self, event: Event) {
        T::event_received(self, event)
    }
}

//! Radio Handle
//!
//! This module provides [`Radio<D>`], the entry point to the radio layer. It wraps a
//! [`RadioDriver`] and provides methods for:
//! - Enabling the radio and applying its default configuration exactly once
//! - Receiving datagrams as RSSI-framed packets
//! - Sending caller frames with the RSSI trailer stripped
//! - Changing group, transmit power and frequency band
//! - Relaying events to nearby devices
//!
//! Every operation enables the radio first. A driver that refuses to enable is a
//! hardware fault reported as [`Error::RadioUnavailable`]; everything else ("no
//! packet", "buffer too short") is a silent no-op.
//!
//! # Example
//! ```no_run
//! use microradio::{Radio, RadioConfig, RadioDriver};
//!
//! fn poll<D: RadioDriver>(driver: D) -> Result<(), microradio::Error<D::Error>> {
//!     let mut radio = Radio::new(driver, RadioConfig::from_identity(b"my-program"));
//!
//!     if let Some(packet) = radio.read_raw_packet()? {
//!         radio.send_raw_packet(packet.as_bytes())?;
//!     }
//!
//!     Ok(())
//! }
//! ```

use crate::event::{ListenerFlags, MessageBus, DATAGRAM_EVENT, RADIO_EVENT_SOURCE};
use crate::packet::outbound_len;
use crate::{Error, Event, FramedPacket, RadioConfig, RadioDriver, FRAME_SIZE, MAX_PACKET_SIZE};

/// Lifecycle of the radio
///
/// Configuration is applied on the `Uninitialized -> Ready` transition and never again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    /// The driver has never been enabled successfully
    Uninitialized,
    /// Enabled and configured
    Ready,
}

/// Main interface to the radio.
///
/// Owns the driver handle and the lifecycle state. All operations take `&mut self`;
/// the layer assumes a single cooperative context and takes no locks.
pub struct Radio<D> {
    driver: D,
    config: RadioConfig,
    state: Lifecycle,
}

impl<D> Radio<D> {
    /// Creates a new Radio wrapping `driver`.
    ///
    /// The driver is not touched until the first operation.
    ///
    /// # Arguments
    /// * `driver` - The underlying radio driver
    /// * `config` - Configuration applied on first enable
    pub fn new(driver: D, config: RadioConfig) -> Self {
        Self {
            driver,
            config,
            state: Lifecycle::Uninitialized,
        }
    }

    /// Releases the underlying driver.
    pub fn release(self) -> D {
        self.driver
    }

    /// Current lifecycle state
    pub fn lifecycle(&self) -> Lifecycle {
        self.state
    }

    /// Whether the default configuration has been applied
    pub fn is_ready(&self) -> bool {
        self.state == Lifecycle::Ready
    }

    /// Configuration applied on first enable
    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

impl<D> Radio<D>
where
    D: RadioDriver,
{
    /// Enables the radio, configuring it on the first success.
    ///
    /// The driver's enable primitive is invoked on every call; group and transmit
    /// power are only set on the transition out of [`Lifecycle::Uninitialized`].
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable. This is fatal: halt
    ///   with [`Error::panic_code`].
    pub fn ensure_enabled(&mut self) -> Result<(), Error<D::Error>> {
        if let Err(cause) = self.driver.enable() {
            #[cfg(feature = "defmt")]
            defmt::error!("radio enable failed, panic code {}", crate::RADIO_PANIC_CODE);
            return Err(Error::RadioUnavailable(cause));
        }

        if self.state == Lifecycle::Uninitialized {
            self.driver.set_group(i32::from(self.config.group));
            self.driver.set_transmit_power(self.config.transmit_power);
            self.state = Lifecycle::Ready;

            #[cfg(feature = "defmt")]
            defmt::info!(
                "radio ready: group {}, power {}",
                self.config.group,
                self.config.transmit_power
            );
        }

        Ok(())
    }

    /// Raises an event on the radio's event service.
    ///
    /// Exactly one create-only record is delivered; the driver notifies local
    /// listeners and may forward it to peers in the same group.
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn raise_event(&mut self, source: i32, value: i32) -> Result<(), Error<D::Error>> {
        self.ensure_enabled()?;

        self.driver.event_received(Event::create_only(source, value));
        Ok(())
    }

    /// Takes the next datagram from the receive queue.
    ///
    /// # Returns
    /// `None` when no datagram is queued, otherwise the datagram framed with its RSSI.
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn read_raw_packet(&mut self) -> Result<Option<FramedPacket>, Error<D::Error>> {
        self.ensure_enabled()?;

        let Some(datagram) = self.driver.recv() else {
            return Ok(None);
        };

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "received {} bytes, rssi {}",
            datagram.payload.len(),
            datagram.rssi
        );

        Ok(Some(FramedPacket::from_datagram(&datagram)))
    }

    /// Takes the next datagram into a flat frame buffer.
    ///
    /// # Arguments
    /// * `buffer` - Destination; must hold at least [`FRAME_SIZE`] bytes
    ///
    /// # Returns
    /// The number of bytes written: [`FRAME_SIZE`], or `0` when nothing is queued. A
    /// buffer shorter than a frame yields `0` without consuming a datagram.
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn read_raw_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, Error<D::Error>> {
        if buffer.len() < FRAME_SIZE {
            self.ensure_enabled()?;

            #[cfg(feature = "defmt")]
            defmt::warn!("receive buffer of {} bytes cannot hold a frame", buffer.len());
            return Ok(0);
        }

        match self.read_raw_packet()? {
            Some(packet) => {
                buffer[..FRAME_SIZE].copy_from_slice(packet.as_bytes());
                Ok(FRAME_SIZE)
            }
            None => Ok(0),
        }
    }

    /// Sends a caller frame.
    ///
    /// The last four bytes are the RSSI trailer and are never transmitted; everything
    /// in front of them is. A buffer of four bytes or less sends nothing.
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn send_raw_packet(&mut self, buffer: &[u8]) -> Result<(), Error<D::Error>> {
        self.ensure_enabled()?;

        match outbound_len(buffer) {
            Some(len) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("sending {} bytes", len);

                self.driver.send(&buffer[..len]);
            }
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("dropping {}-byte frame with no payload", buffer.len());
            }
        }

        Ok(())
    }

    /// Sends the full payload region of `packet`.
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn send_packet(&mut self, packet: &FramedPacket) -> Result<(), Error<D::Error>> {
        self.send_raw_packet(packet.as_bytes())
    }

    /// Registers `handler` to run whenever a datagram is received.
    ///
    /// After registering, one receive is issued to wake the driver's queue watcher;
    /// whatever it returns is discarded.
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    #[deprecated(note = "poll with `read_raw_packet` instead")]
    pub fn on_data_received<B>(
        &mut self,
        bus: &mut B,
        handler: B::Handler,
    ) -> Result<(), Error<D::Error>>
    where
        B: MessageBus,
    {
        self.ensure_enabled()?;

        bus.listen(
            RADIO_EVENT_SOURCE,
            DATAGRAM_EVENT,
            handler,
            ListenerFlags::default(),
        );
        let _ = self.driver.recv();
        Ok(())
    }

    /// Sets the group ID. Only datagrams from the same group are received.
    ///
    /// # Arguments
    /// * `id` - Group ID, nominally in [`GROUP_RANGE`](crate::GROUP_RANGE); forwarded
    ///   unchecked
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn set_group(&mut self, id: i32) -> Result<(), Error<D::Error>> {
        self.ensure_enabled()?;

        self.driver.set_group(id);
        Ok(())
    }

    /// Sets the transmit power.
    ///
    /// # Arguments
    /// * `power` - 0 (lowest) to 7 (highest); forwarded unchecked
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn set_transmit_power(&mut self, power: i32) -> Result<(), Error<D::Error>> {
        self.ensure_enabled()?;

        self.driver.set_transmit_power(power);
        Ok(())
    }

    /// Sets the frequency band for transmit and receive.
    ///
    /// # Arguments
    /// * `band` - 0 to 83, each step 1 MHz above 2400 MHz; forwarded unchecked
    ///
    /// # Errors
    /// * `Error::RadioUnavailable` - The driver failed to enable
    pub fn set_frequency_band(&mut self, band: i32) -> Result<(), Error<D::Error>> {
        self.ensure_enabled()?;

        self.driver.set_frequency_band(band);
        Ok(())
    }
}

const _: () = assert!(FRAME_SIZE == MAX_PACKET_SIZE + 4);

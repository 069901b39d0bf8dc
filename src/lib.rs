#![cfg_attr(not(test), no_std)]
//! Packet Radio Layer
//!
//! This crate provides a minimal, type-safe layer over a short-range packet radio
//! driver. It enables the radio, configures its group, power and frequency band,
//! exchanges small datagrams and relays compact events to nearby devices.
//!
//! # Features
//! - Exactly-once default configuration on first enable
//! - Datagrams of up to [`MAX_PACKET_SIZE`] bytes
//! - Received packets framed with their signal strength (RSSI)
//! - Event relay to devices in the same group
//! - Optional `defmt` logging
//!
//! # Architecture
//! The crate is organized into several modules:
//!
//! - [`device`]: The [`Radio`] handle
//!   - Owns the driver and the lifecycle state
//!   - Provides the public send, receive, configuration and event API
//!
//! - [`packet`]: Datagram framing
//!   - [`Datagram`]: driver-native payload plus RSSI
//!   - [`FramedPacket`]: fixed-layout caller buffer
//!
//! - [`driver`]: The [`RadioDriver`] capability surface the hardware driver implements
//!
//! - [`event`]: Event records, listener flags and the [`MessageBus`] trait
//!
//! - [`config`]: Default configuration derived from the running program's identity
//!
//! # Frame Layout
//! | Bytes | Content |
//! |-------|---------|
//! | `0..MAX_PACKET_SIZE` | Payload, zero padded |
//! | `MAX_PACKET_SIZE..FRAME_SIZE` | RSSI, `i32` little-endian |
//!
//! # Error Handling
//! A driver that refuses to enable is a hardware fault. Every operation reports it
//! as [`Error::RadioUnavailable`], and the caller should halt the device with
//! [`Error::panic_code`]. An empty receive queue or a frame too short to carry a
//! payload are normal and never reported as errors.
//!
//! # Example
//! ```no_run
//! use microradio::{Radio, RadioConfig, RadioDriver};
//!
//! fn beacon<D: RadioDriver>(driver: D) -> Result<(), microradio::Error<D::Error>> {
//!     let mut radio = Radio::new(driver, RadioConfig::from_identity(b"beacon"));
//!
//!     radio.set_frequency_band(7)?;
//!     radio.send_raw_packet(&[b'h', b'i', 0, 0, 0, 0])?;
//!     radio.raise_event(3100, 1)?;
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod device;
pub mod driver;
pub mod event;
pub mod packet;

mod error;

pub use config::*;
pub use device::{Lifecycle, Radio};
pub use driver::RadioDriver;
pub use error::*;
pub use event::{Event, EventMode, ListenerFlags, MessageBus};
pub use packet::*;

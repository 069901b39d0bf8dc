use core::fmt;

/// Diagnostic code reported when the radio cannot be enabled
pub const RADIO_PANIC_CODE: u16 = 43;

/// Fatal radio error
///
/// Returned only when the driver refuses to enable. The caller harness must
/// treat it as unrecoverable: halt or reset the device, reporting
/// [`panic_code`](Error::panic_code). Expected conditions such as an empty
/// receive queue are never reported through this type.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The driver's enable primitive failed
    RadioUnavailable(E),
}

impl<E> Error<E> {
    /// Diagnostic code to halt the device with
    pub const fn panic_code(&self) -> u16 {
        match self {
            Self::RadioUnavailable(_) => RADIO_PANIC_CODE,
        }
    }

    /// The driver error that caused the failure
    pub fn into_cause(self) -> E {
        match self {
            Self::RadioUnavailable(cause) => cause,
        }
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RadioUnavailable(cause) => {
                write!(f, "radio unavailable ({cause:?}), panic code {RADIO_PANIC_CODE}")
            }
        }
    }
}

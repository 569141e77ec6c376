//! Status indicator driver.
//!
//! Maps status flags to the two physical indicators: indicator A shows the
//! physical link, indicator B the active data connection. The driver is a
//! pure function of the requested state; it never blocks and never retries
//! (a missed update is corrected on the next natural trigger).

/// Output pin driving one indicator.
///
/// # Contract
/// - `set` MUST return immediately (a register write, nothing more)
/// - polarity (active low/high) is handled below this trait
pub trait IndicatorPin {
    /// Drive the indicator: `true` = lit.
    fn set(&mut self, on: bool);
}

/// The two status indicators of the board.
///
/// Caches the last written state so repeated calls with the same state are
/// no-ops at the pin.
pub struct Indicators<A: IndicatorPin, B: IndicatorPin> {
    link: A,
    connection: B,
    link_on: Option<bool>,
    connection_on: Option<bool>,
}

impl<A: IndicatorPin, B: IndicatorPin> Indicators<A, B> {
    pub fn new(link: A, connection: B) -> Self {
        Self {
            link,
            connection,
            link_on: None,
            connection_on: None,
        }
    }

    /// Reflect the physical link state on indicator A.
    pub fn set_link(&mut self, up: bool) {
        if self.link_on != Some(up) {
            self.link.set(up);
            self.link_on = Some(up);
        }
    }

    /// Reflect the data-connection state on indicator B.
    pub fn set_connection(&mut self, connected: bool) {
        if self.connection_on != Some(connected) {
            self.connection.set(connected);
            self.connection_on = Some(connected);
        }
    }
}

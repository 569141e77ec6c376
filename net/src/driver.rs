//! MAC driver interface.

/// TX error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxError {
    /// TX queue is full, try again after completions are collected.
    QueueFull,
    /// Device not ready.
    DeviceNotReady,
    /// Frame too large.
    FrameTooLarge,
}

/// RX error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxError {
    /// Provided buffer too small for the frame.
    BufferTooSmall {
        /// Required buffer size.
        needed: usize,
    },
    /// Device error.
    DeviceError,
}

/// Ethernet MAC driver.
///
/// Higher layers (the smoltcp adapter, the stack) use only this interface;
/// register access and DMA stay inside the implementation.
pub trait EthDriver {
    /// Get the MAC address.
    fn mac_address(&self) -> [u8; 6];

    /// Check if the device can accept a TX frame.
    ///
    /// Returns true if `transmit()` will succeed.
    fn can_transmit(&self) -> bool;

    /// Transmit a complete Ethernet frame.
    ///
    /// # Contract
    /// - MUST return immediately (no completion wait)
    fn transmit(&mut self, frame: &[u8]) -> Result<(), TxError>;

    /// Receive an Ethernet frame into `buffer`.
    ///
    /// # Returns
    /// - `Ok(Some(len))`: Frame received, `len` bytes copied
    /// - `Ok(None)`: No frame available (normal)
    ///
    /// # Contract
    /// - MUST return immediately (no blocking)
    fn receive(&mut self, buffer: &mut [u8]) -> Result<Option<usize>, RxError>;

    /// Get the physical link status.
    fn link_up(&self) -> bool {
        true
    }
}

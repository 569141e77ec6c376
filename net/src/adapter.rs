//! smoltcp device adapter.
//!
//! Thin bridge from [`EthDriver`] to smoltcp's `phy::Device`. Frames are
//! staged through inline MTU-sized buffers; a failed transmit drops the
//! frame and the protocol retransmit recovers it.

use core::marker::PhantomData;

use smoltcp::phy::{Device, DeviceCapabilities, Medium, RxToken, TxToken};
use smoltcp::time::Instant;

use crate::driver::EthDriver;

/// Maximum frame size handed to the driver.
pub const MTU: usize = 1536;

/// Adapts an [`EthDriver`] to smoltcp's `Device` trait.
pub struct EthAdapter<D: EthDriver> {
    inner: D,
}

impl<D: EthDriver> EthAdapter<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    /// Get a reference to the underlying driver.
    pub fn driver(&self) -> &D {
        &self.inner
    }

    /// Get a mutable reference to the underlying driver.
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.inner
    }
}

impl<D: EthDriver> Device for EthAdapter<D> {
    type RxToken<'a> = AdapterRxToken<'a, D> where D: 'a;
    type TxToken<'a> = AdapterTxToken<'a, D> where D: 'a;

    fn capabilities(&self) -> DeviceCapabilities {
        let mut caps = DeviceCapabilities::default();
        caps.max_transmission_unit = MTU;
        caps.medium = Medium::Ethernet;
        caps
    }

    fn receive(&mut self, _timestamp: Instant) -> Option<(Self::RxToken<'_>, Self::TxToken<'_>)> {
        // Only hand out tokens when a frame is actually ready.
        let mut frame = [0u8; MTU];
        match self.inner.receive(&mut frame) {
            Ok(Some(len)) if len > 0 => {
                let device_ptr: *mut D = &mut self.inner;
                let mut token = AdapterRxToken {
                    buffer: [0u8; MTU],
                    len,
                    _p: PhantomData,
                };
                token.buffer[..len].copy_from_slice(&frame[..len]);
                Some((
                    token,
                    AdapterTxToken {
                        device: device_ptr,
                        _p: PhantomData,
                    },
                ))
            }
            _ => None,
        }
    }

    fn transmit(&mut self, _timestamp: Instant) -> Option<Self::TxToken<'_>> {
        if self.inner.can_transmit() {
            let device_ptr: *mut D = &mut self.inner;
            Some(AdapterTxToken {
                device: device_ptr,
                _p: PhantomData,
            })
        } else {
            None
        }
    }
}

pub struct AdapterRxToken<'a, D: EthDriver> {
    buffer: [u8; MTU],
    len: usize,
    _p: PhantomData<&'a mut D>,
}

impl<'a, D: EthDriver> RxToken for AdapterRxToken<'a, D> {
    fn consume<R, F>(self, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        // Frame already copied in when the token was created.
        let mut buf = self.buffer;
        f(&mut buf[..self.len])
    }
}

pub struct AdapterTxToken<'a, D: EthDriver> {
    device: *mut D,
    _p: PhantomData<&'a mut D>,
}

impl<'a, D: EthDriver> TxToken for AdapterTxToken<'a, D> {
    fn consume<R, F>(self, len: usize, f: F) -> R
    where
        F: FnOnce(&mut [u8]) -> R,
    {
        let mut buffer = [0u8; MTU];
        let result = f(&mut buffer[..len]);
        // smoltcp expects `result` regardless of TX success; a dropped
        // frame is recovered by the protocol's own retransmit.
        let _ = unsafe { (*self.device).transmit(&buffer[..len]) };
        result
    }
}

use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;

use crate::{TickCounter, TickMask};

/// Bounded busy-wait on the tick counter.
///
/// `tick_hz` is the configured tick rate; it only matters for the
/// millisecond conversions, `wait` itself deals in raw ticks.
pub struct Delay<'c, M: TickMask> {
    ticks: &'c TickCounter<M>,
    tick_hz: u32,
}

impl<'c, M: TickMask> Delay<'c, M> {
    pub fn new(ticks: &'c TickCounter<M>, tick_hz: u32) -> Self {
        Self { ticks, tick_hz }
    }

    /// Blocks until at least `n_ticks` notifications have elapsed since the
    /// call began, then returns. A request of 0 returns immediately.
    ///
    /// This is a blocking, non-cancelable busy poll: it occupies the calling
    /// context fully and never yields. Tick delivery keeps running for its
    /// whole duration; only the short copy inside each counter read is
    /// masked. Requests longer than one full counter wraparound (2^32 ticks)
    /// are outside the guaranteed-correct range.
    pub fn wait(&self, n_ticks: u32) {
        let request = self.start(n_ticks);
        while request.poll().is_err() {}
    }

    /// Snapshots the counter and returns the pending request, for callers
    /// that want to poll instead of block.
    pub fn start(&self, n_ticks: u32) -> WaitRequest<'c, M> {
        WaitRequest {
            ticks: self.ticks,
            start: self.ticks.read(),
            n_ticks,
        }
    }

    fn ms_to_ticks(&self, ms: u32) -> u32 {
        // Round partial ticks up so the wait is never short.
        ((ms as u64 * self.tick_hz as u64 + 999) / 1000) as u32
    }
}

impl<'c, M: TickMask> DelayMs<u32> for Delay<'c, M> {
    fn delay_ms(&mut self, ms: u32) {
        self.wait(self.ms_to_ticks(ms));
    }
}

impl<'c, M: TickMask> DelayMs<u16> for Delay<'c, M> {
    fn delay_ms(&mut self, ms: u16) {
        DelayMs::<u32>::delay_ms(self, ms as u32);
    }
}

impl<'c, M: TickMask> DelayMs<u8> for Delay<'c, M> {
    fn delay_ms(&mut self, ms: u8) {
        DelayMs::<u32>::delay_ms(self, ms as u32);
    }
}

/// One in-flight wait: the start snapshot plus the requested tick delta.
pub struct WaitRequest<'c, M: TickMask> {
    ticks: &'c TickCounter<M>,
    start: u32,
    n_ticks: u32,
}

impl<'c, M: TickMask> WaitRequest<'c, M> {
    /// `Ok` once the requested ticks have elapsed, `WouldBlock` before that.
    /// Elapsed time is computed wraparound-safe from the start snapshot.
    pub fn poll(&self) -> nb::Result<(), Infallible> {
        if self.ticks.elapsed_since(self.start) >= self.n_ticks {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }
}

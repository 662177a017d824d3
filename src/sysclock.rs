use cortex_m::interrupt;
use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;

use crate::Error;

// The SysTick reload register is 24 bits wide.
const MAX_RELOAD: u32 = 0x00FF_FFFF;

/// The periodic tick source, built on the SysTick core peripheral.
///
/// Once started it fires the SysTick exception every `cycles_per_tick` core
/// clock cycles for the remaining life of the process.
pub struct SysClock {
    syst: SYST,
}

impl SysClock {
    /// Programs SysTick for one tick per `cycles_per_tick` core cycles and
    /// starts it. The whole configuration sequence runs with interrupts
    /// masked, so the first tick cannot land on a half-programmed timer.
    pub fn start(mut syst: SYST, cycles_per_tick: u32) -> Result<Self, Error> {
        let reload = reload_for(cycles_per_tick)?;

        interrupt::free(|_| {
            syst.set_reload(reload);
            syst.clear_current();
            syst.set_clock_source(SystClkSource::Core);
            syst.enable_interrupt();
            syst.enable_counter();
        });

        Ok(Self { syst })
    }

    /// Releases the SysTick peripheral.
    pub fn free(self) -> SYST {
        self.syst
    }
}

fn reload_for(cycles_per_tick: u32) -> Result<u32, Error> {
    // Counting from 0 means a reload of n gives a period of n + 1 cycles.
    if cycles_per_tick == 0 || cycles_per_tick - 1 > MAX_RELOAD {
        return Err(Error::PeriodOutOfRange);
    }
    Ok(cycles_per_tick - 1)
}

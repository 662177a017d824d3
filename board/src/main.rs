//File:     ~/timebase/board/src/main.rs
//Authors:  Will Tekulve + Patrick Taliaferro
//Date:     April 2020

#![no_std]
#![no_main]

//Set the panicking behavior to halt
extern crate panic_halt;

//Mask the specific board used
use feather_m0 as hal;

use cortex_m_rt::exception;
use cortex_m_semihosting::hprintln;

use hal::clock::GenericClockController;
use hal::entry;
use hal::pac::{CorePeripherals, Peripherals};
use hal::prelude::*;

use timebase::delay::Delay;
use timebase::sysclock::SysClock;
use timebase::{Irq, TickCounter};

//Core clock rate after GCLK bring-up.
const CORE_HZ: u32 = 48_000_000;
//One tick per millisecond. Changing this changes the real-time
//meaning of a tick for every wait in the program.
const TICK_HZ: u32 = 1_000;

//The one shared tick count, written only by the SysTick handler.
static TICKS: TickCounter<Irq> = TickCounter::new(Irq);

#[entry]
fn main() -> ! {
    let mut peripherals = Peripherals::take().unwrap();
    let core = CorePeripherals::take().unwrap();

    //Clocks must be up before SysTick counts core cycles.
    let _clocks = GenericClockController::with_external_32kosc(
        peripherals.GCLK,
        &mut peripherals.PM,
        &mut peripherals.SYSCTRL,
        &mut peripherals.NVMCTRL,
    );
    let mut pins = hal::Pins::new(peripherals.PORT);
    let mut status_led = pins.d13.into_push_pull_output(&mut pins.port);

    let _sysclock = SysClock::start(core.SYST, CORE_HZ / TICK_HZ).unwrap();
    let mut delay = Delay::new(&TICKS, TICK_HZ);

    hprintln!("timebase up, {}Hz tick", TICK_HZ).ok();

    loop {
        status_led.set_high().unwrap();
        delay.delay_ms(500u16);
        status_led.set_low().unwrap();
        delay.delay_ms(500u16);
    }
}

#[exception]
fn SysTick() {
    TICKS.on_tick();
}

#![no_main]
#![no_std]

use core::fmt::Write;

use cortex_m::delay::Delay;
use cortex_m_rt::entry;
use panic_halt as _;

use hal::{
    pac,
    prelude::*,
    serial::{Config, Instance, Serial},
};
use stm32f7xx_hal as hal;

use uart_echo::{
    config,
    deque::RingBuffer,
    diag::{self, BlinkPattern},
    echo,
    flow::FlowControlledReceiver,
    hw::{BoardPins, Led, LedBar, Usart},
    serial::ByteSink,
};

#[entry]
fn main() -> ! {
    // Peripherals
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();

    // Clocks
    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze();
    let mut delay = Delay::new(cp.SYST, clocks.sysclk().raw());

    let pins = BoardPins::new(dp.GPIOB, dp.GPIOD);

    // LEDs
    let mut leds = LedBar::new(Led::new(pins.leds.green), Led::new(pins.leds.blue));
    let mut fault_led = Led::new(pins.leds.red);

    // USART3 (ST-LINK VCP)
    let usart_cfg = Config {
        baud_rate: config::BAUD_RATE.bps(),
        ..Default::default()
    };
    let serial = Serial::new(dp.USART3, (pins.usart3.tx, pins.usart3.rx), &clocks, usart_cfg);
    let (mut usart, mut rx) = Usart::split(serial);

    // Receive buffer
    let mut store = [0u8; config::RX_CAPACITY];
    let buffer = match RingBuffer::new(&mut store) {
        Ok(buffer) => buffer,
        Err(err) => {
            let pattern = BlinkPattern::new(0xF0);
            trap(&mut usart, &mut fault_led, &mut delay, err.code(), pattern)
        }
    };
    let mut receiver = match FlowControlledReceiver::new(buffer, config::receiver_config()) {
        Ok(receiver) => receiver,
        Err(err) => {
            let pattern = BlinkPattern::new(0xF0);
            trap(&mut usart, &mut fault_led, &mut delay, err.code(), pattern)
        }
    };

    let _ = write!(usart, "uart-echo ready, {} baud\r\n", config::BAUD_RATE);

    loop {
        if let Err(err) = receiver.receive(&mut rx, &mut usart) {
            let pattern = BlinkPattern::for_fault(err.fault());
            trap(&mut usart, &mut fault_led, &mut delay, err.code(), pattern);
        }

        echo::echo_staged(receiver.buffer_mut(), &mut usart, |byte| {
            leds.show(byte);
            delay.delay_ms(config::ECHO_DELAY_MS);
        });
        leds.clear();
    }
}

/// Report `code` on the serial line once, then blink `pattern` on the fault LED until reset.
fn trap<U: Instance, const P: char, const N: u8>(
    usart: &mut Usart<U>,
    led: &mut Led<P, N>,
    delay: &mut Delay,
    code: u8,
    pattern: BlinkPattern,
) -> ! {
    usart.write_all(&diag::fault_report(code));
    usart.write_str("\r\n");
    usart.flush();

    loop {
        for step in pattern.steps() {
            led.set(step.lit);
            delay.delay_ms(step.duration_ms);
        }
    }
}

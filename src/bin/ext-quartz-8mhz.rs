#![no_main]
#![no_std]

#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_abort as _;
use rtic::app;

use stm32f1xx_hal::flash::FlashExt;
use stm32f1xx_hal::gpio::GpioExt;
use stm32f1xx_hal::pac::TIM2;
use stm32f1xx_hal::timer::CounterUs;

use fugit_timer::HertzU32;
use systick_monotonic::Systick;

use stm32f1_softpwm::hw::Stm32Gpio;
use stm32f1_softpwm::*;

//-----------------------------------------------------------------------------

type Pwm = SoftPWM<Stm32Gpio, Timer<CounterUs<TIM2>>, { config::MAX_CHANNELS }>;

// PC13, светодиод bluepill, горит низким уровнем
const LED: PinId = 2 * 16 + 13;

// PA0..PA3
const FADE_PINS: [PinId; 4] = [0, 1, 2, 3];

//-----------------------------------------------------------------------------

#[app(device = stm32f1xx_hal::pac, peripherals = true, dispatchers = [RTCALARM])]
mod app {
    use super::*;

    #[shared]
    struct Shared {
        pwm: Pwm,
    }

    #[local]
    struct Local {
        step: usize,
    }

    #[monotonic(binds = SysTick, default = true)]
    type MonoTimer = Systick<{ config::SYSTICK_RATE_HZ }>;

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        use stm32f1xx_hal::prelude::_fugit_RateExtU32;
        use stm32f1xx_hal::prelude::_stm32_hal_rcc_RccExt;
        use stm32f1xx_hal::prelude::_stm32f4xx_hal_timer_TimerExt;

        let mut flash = ctx.device.FLASH.constrain();

        // only to enable port clocks, pins are driven through registers
        let _gpioa = ctx.device.GPIOA.split();
        let _gpioc = ctx.device.GPIOC.split();

        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc
            .cfgr
            .use_hse(config::MCU_XTAL_HZ.Hz())
            .sysclk(config::SYSCLK_HZ.Hz())
            .freeze(&mut flash.acr);

        let mono = Systick::new(ctx.core.SYST, clocks.sysclk().to_Hz());

        //---------------------------------------------------------------------

        let mut timer = ctx.device.TIM2.counter_us(&clocks);
        timer.listen(stm32f1xx_hal::timer::Event::Update);

        ctx.device
            .DBGMCU
            .cr
            .modify(|_, w| w.dbg_tim2_stop().set_bit());

        let mut pwm = Pwm::new(
            Stm32Gpio::new(),
            Timer::new(timer, HertzU32::from_raw(config::TICK_RATE_HZ)),
        );
        pwm.begin(Polarity::Normal);

        let _ = pwm.set(LED, 0, false);
        let _ = pwm.set_polarity(LED, Polarity::Inverted);
        for pin in FADE_PINS {
            let _ = pwm.set(pin, 0, false);
        }
        let _ = pwm.set_fade(
            Target::All,
            FadeTime::from_ticks(500),
            FadeTime::from_ticks(1500),
        );

        demo::spawn().unwrap();

        //---------------------------------------------------------------------

        (Shared { pwm }, Local { step: 0 }, init::Monotonics(mono))
    }

    //-------------------------------------------------------------------------

    #[idle()]
    fn idle(_ctx: idle::Context) -> ! {
        loop {
            cortex_m::asm::wfi();
        }
    }

    //-------------------------------------------------------------------------

    #[task(binds = TIM2, shared = [pwm], priority = 3)]
    fn tim2(mut ctx: tim2::Context) {
        ctx.shared.pwm.lock(|pwm| pwm.on_tick());
        unsafe { (*TIM2::ptr()).sr.modify(|_, w| w.uif().clear_bit()) };
    }

    #[task(shared = [pwm], local = [step])]
    fn demo(mut ctx: demo::Context) {
        use systick_monotonic::*;

        let step = *ctx.local.step;
        ctx.shared.pwm.lock(|pwm| {
            // бегущая волна яркости по FADE_PINS
            for (i, pin) in FADE_PINS.iter().enumerate() {
                let level = (step + i) % FADE_PINS.len();
                let percent = level * 100 / (FADE_PINS.len() - 1);
                let _ = pwm.set_percent(*pin, percent as u8, false);
            }

            let led = if step % 2 == 0 { u8::MAX } else { 16 };
            let _ = pwm.set(LED, led, true);
        });
        *ctx.local.step = step.wrapping_add(1);

        demo::spawn_after(config::DEMO_STEP_MS.millis()).unwrap();
    }
}

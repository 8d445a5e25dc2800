pub const MCU_XTAL_HZ: u32 = 8_000_000;
pub const SYSCLK_HZ: u32 = 32_000_000;

//-----------------------------------------------------------------------------

pub const SYSTICK_RATE_HZ: u32 = 1_000;

//-----------------------------------------------------------------------------

/// Размер пула каналов
pub const MAX_CHANNELS: usize = 20;

/// Частота полного цикла ШИМ (~16 мс), ниже 30 Гц начинает мерцать
pub const SOFTPWM_FREQ_HZ: u32 = 60;

/// Разрешение скважности 8 бит
pub const TICKS_PER_CYCLE: u32 = 256;

pub const TICK_RATE_HZ: u32 = SOFTPWM_FREQ_HZ * TICKS_PER_CYCLE;

//-----------------------------------------------------------------------------

pub const DEMO_STEP_MS: u64 = 2_000;

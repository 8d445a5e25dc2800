use fugit_timer::HertzU32;

use crate::config::TICKS_PER_CYCLE;

/// Fade duration in milliseconds.
pub type FadeTime = fugit_timer::Duration<u32, 1, 1_000>;

/// Per-cycle step that covers the full 0..=255 range in `duration`.
///
/// Zero duration gives 0 (jump to target). Any other duration gives at least 1,
/// so very slow fades still move.
pub fn fade_rate(duration: FadeTime, tick_rate: HertzU32) -> u8 {
    let ms = duration.ticks() as u64;
    if ms == 0 {
        return 0;
    }

    let tick_hz = tick_rate.raw().max(1) as u64;
    let cycle_us = TICKS_PER_CYCLE as u64 * 1_000_000 / tick_hz;
    let rate = u8::MAX as u64 * cycle_us / (ms * 1_000);

    rate.clamp(1, u8::MAX as u64) as u8
}

/// Next value driven by a channel moving from `current` toward `target`.
pub fn step(current: u8, target: u8, fade_up: u8, fade_down: u8) -> u8 {
    if target > current {
        if fade_up == 0 {
            target
        } else {
            current.saturating_add(fade_up).min(target)
        }
    } else if target < current {
        if fade_down == 0 {
            target
        } else {
            current.saturating_sub(fade_down).max(target)
        }
    } else {
        current
    }
}

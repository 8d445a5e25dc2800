use super::fade;
use super::io::PortIo;
use super::pool::List;
use super::SoftPWM;

impl<IO: PortIo, T, const N: usize> SoftPWM<IO, T, N> {
    /// Timer interrupt body. One call is one tick, 256 ticks make a cycle.
    ///
    /// At the start of a cycle every channel takes its next (faded) value and
    /// turns on unless that value is 0. On later ticks a channel turns off when
    /// the counter reaches its value. Channels at 0 or 255 never switch mid-cycle.
    pub fn on_tick(&mut self) {
        self.phase = self.phase.wrapping_add(1);
        let phase = self.phase;
        let io = &mut self.io;

        if phase == 0 {
            self.pool.for_each_mut(List::Active, |ch| {
                ch.current = fade::step(ch.current, ch.target, ch.fade_up, ch.fade_down);
                if let Some(port) = ch.port {
                    io.write_port(port, ch.mask, ch.polarity.level(ch.current != 0));
                }
            });
            return;
        }

        self.pool.for_each_mut(List::Active, |ch| {
            if ch.current == 0 || ch.current == u8::MAX || ch.current != phase {
                return;
            }
            if let Some(port) = ch.port {
                io.write_port(port, ch.mask, ch.polarity.idle_level());
            }
        });
    }
}

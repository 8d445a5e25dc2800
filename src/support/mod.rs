mod timer_interface;
pub use timer_interface::Timer;

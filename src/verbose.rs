use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// `println!` that only prints when `--verbose` was given.
#[macro_export]
macro_rules! verbose_println {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!("  [verbose] {}", format_args!($($arg)*));
        }
    };
}

// log.rs - Console output
//
// Browser console on wasm32, stderr everywhere else.

/// Log a formatted line to the host console.
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => {
        $crate::log::info(&format!($($t)*))
    };
}

/// Log a formatted warning to the host console.
#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => {
        $crate::log::warn(&format!($($t)*))
    };
}

pub fn info(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("{msg}");
}

pub fn warn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&msg.into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("warning: {msg}");
}

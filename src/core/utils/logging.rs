//! Console logging macros
//!
//! On wasm32 these go straight to the browser console through web-sys.
//! Native builds (tests, tools) print to stderr in debug and stay silent
//! in release so the hot loop never pays for formatting.

#[macro_export]
macro_rules! console_log {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
        #[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
        {
            eprintln!("[inkspread] {}", format!($($arg)*));
        }
    }};
}

#[macro_export]
macro_rules! console_warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
        #[cfg(all(not(target_arch = "wasm32"), debug_assertions))]
        {
            eprintln!("[inkspread] warning: {}", format!($($arg)*));
        }
    }};
}

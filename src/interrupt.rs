use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

/// Set once the user has pressed Ctrl+C.
pub static INTERRUPTED: AtomicBool = AtomicBool::new(false);

extern "C" fn on_sigint(_signal: libc::c_int) {
    INTERRUPTED.store(true, Ordering::SeqCst);
}

/// Catch SIGINT so the current child can finish and the report still prints.
///
/// Children share the terminal's process group, so they receive the signal
/// themselves and decide how to wind down.
pub fn install() -> io::Result<()> {
    let handler = on_sigint as extern "C" fn(libc::c_int) as libc::sighandler_t;
    // SAFETY: the handler only stores to an atomic, which is async-signal-safe
    let previous = unsafe { libc::signal(libc::SIGINT, handler) };
    if previous == libc::SIG_ERR {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigint_sets_flag() {
        install().unwrap();
        // SAFETY: the handler installed above replaces the default action
        unsafe {
            libc::raise(libc::SIGINT);
        }
        assert!(INTERRUPTED.load(Ordering::SeqCst));
    }
}

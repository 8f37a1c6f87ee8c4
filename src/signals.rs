use std::io;
use std::sync::mpsc::Sender;

use melange::kernel::services::ports::HotkeyAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessSignal {
    SigInt,
    SigTerm,
    /// SIGUSR1 stands in for the global hotkey when running headless.
    Hotkey(HotkeyAction),
}

/// Forwards SIGINT/SIGTERM/SIGUSR1 to the GUI loop.
#[cfg(unix)]
pub fn install(tx: Sender<ProcessSignal>) -> io::Result<Option<std::thread::JoinHandle<()>>> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM, SIGUSR1};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGUSR1])?;
    let handle = std::thread::Builder::new()
        .name("melange-signals".to_string())
        .spawn(move || {
            for sig in signals.forever() {
                let signal = match sig {
                    SIGINT => ProcessSignal::SigInt,
                    SIGTERM => ProcessSignal::SigTerm,
                    SIGUSR1 => ProcessSignal::Hotkey(HotkeyAction::ToggleOverlay),
                    _ => continue,
                };
                if tx.send(signal).is_err() {
                    break;
                }
            }
        })?;
    Ok(Some(handle))
}

#[cfg(not(unix))]
pub fn install(_tx: Sender<ProcessSignal>) -> io::Result<Option<std::thread::JoinHandle<()>>> {
    Ok(None)
}

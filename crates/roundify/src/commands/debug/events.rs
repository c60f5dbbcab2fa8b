use roundify_core::Config;

/// Watches foreground changes in real time. Press Ctrl+C to stop.
#[cfg(windows)]
pub fn execute(config: &Config) {
    use std::sync::mpsc;

    use roundify_windows::event_loop::{self, CHANNEL_CAPACITY, LoopMsg};

    println!("Watching foreground changes (press Ctrl+C to stop)...\n");

    let registry = config.registry();
    let (tx, rx) = mpsc::sync_channel(CHANNEL_CAPACITY);

    let shutdown_tx = tx.clone();
    if let Err(e) = roundify_windows::ctrl_c::set_handler(move || {
        let _ = shutdown_tx.send(LoopMsg::Shutdown);
    }) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let event_loop = match event_loop::start(tx) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    while let Ok(LoopMsg::Foreground(change)) = rx.recv() {
        let verdict = if registry.should_reinforce(&change) {
            "reinforce"
        } else {
            "ignored"
        };
        println!("{change} -> {verdict}");
    }

    event_loop.stop();
}

#[cfg(not(windows))]
pub fn execute(_config: &Config) {
    super::super::unsupported("Event watching");
}

pub mod debug;
pub mod run;

/// Reports that a command needs the Windows platform layer and exits 1.
#[cfg(not(windows))]
pub fn unsupported(what: &str) -> ! {
    eprintln!("Error: {what} is only available on Windows");
    std::process::exit(1);
}

/// Lists every detected display.
#[cfg(windows)]
pub fn execute() {
    roundify_windows::dpi::enable_dpi_awareness();

    let monitors = match roundify_windows::enumerate_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    for (i, monitor) in monitors.iter().enumerate() {
        let primary = if monitor.primary { " (primary)" } else { "" };
        println!(
            "#{i}{primary}: {} | work area {}",
            monitor.bounds, monitor.work_area
        );
    }
    println!("\n{} displays found", monitors.len());
}

#[cfg(not(windows))]
pub fn execute() {
    super::super::unsupported("Display enumeration");
}

use roundify_core::CornerMasks;

/// Prints each corner outline as SVG path data with its arc centre.
pub fn execute(radius: f64) {
    if radius <= 0.0 {
        println!("Radius {radius} hides the overlays; no masks are painted.");
        return;
    }

    let masks = CornerMasks::generate(radius);
    println!("Corner masks for radius {radius}:\n");
    for (corner, path) in masks.iter() {
        let center = path
            .arc_center()
            .map(|c| format!("({}, {})", display_coord(c.x), display_coord(c.y)))
            .unwrap_or_else(|| "unresolved".to_string());
        println!("{:<13} {}", corner.name(), path.to_svg());
        println!("{:<13} arc centre {center}", "");
    }
}

/// Rounds to three decimals; `+ 0.0` turns `-0.0` into `0`.
fn display_coord(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0 + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_noise_is_hidden() {
        assert_eq!(display_coord(7.999999999999999).to_string(), "8");
        assert_eq!(display_coord(-0.0000000000000004440892098500626).to_string(), "0");
        assert_eq!(display_coord(12.3456).to_string(), "12.346");
    }
}

//! tree_app — interactive entry point.

use std::io::{self, Write};

use tree_app::app::{run, AppConfig};

fn main() {
    env_logger::init();

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Holiday Tree — Gesture-Controlled Particles           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "tracker")]
    println!("  Mode: external hand tracker  (set TREE_TRACKER_CMD to override)");
    #[cfg(not(feature = "tracker"))]
    println!("  Mode: keyboard simulation  (use --features tracker for a real hand)");
    println!();

    let cfg = if std::env::args().any(|a| a == "--quick") {
        println!("  Quick-start: 150 ornaments, no photos\n");
        AppConfig::default()
    } else {
        configure_interactively()
    };

    println!();
    println!("  Opening visualizer window…");
    println!();

    if let Err(e) = run(cfg) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn configure_interactively() -> AppConfig {
    let ornament_count: usize = {
        let n = read_line("  Ornament count (default 150): ")
            .trim()
            .parse()
            .unwrap_or(150);
        n.min(5000)
    };

    let preload: usize = read_line("  Photos to preload (default 0): ")
        .trim()
        .parse()
        .unwrap_or(0)
        .min(64);
    let photos = (0..preload)
        .map(|i| format!("photo://preload-{}", i + 1))
        .collect();

    AppConfig {
        ornament_count,
        photos,
    }
}

fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf
}

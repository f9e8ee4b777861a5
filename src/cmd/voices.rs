//! Voice listing (`dialer voices`).

use console::style;
use dialer::Voice;

pub fn cmd_voices() {
    println!();
    println!("Available voices");
    println!("================");
    println!();
    for voice in Voice::ALL {
        let marker = if voice == Voice::default() {
            style(" (default)").dim().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<8} {}{}",
            style(voice.id().to_lowercase()).cyan(),
            voice.label(),
            marker
        );
    }
    println!();
}

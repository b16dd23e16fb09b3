use crate::config::Config;
use serde::Serialize;
use std::path::Path;

pub const EXIT_MISMATCH: i32 = 1;
pub const EXIT_USAGE: i32 = 2;

pub fn load_config_or_exit(path: &str) -> Config {
    Config::load(Path::new(path)).unwrap_or_else(|err| {
        eprintln!("error: {err}");
        std::process::exit(EXIT_USAGE);
    })
}

pub fn print_json_or_exit<T: Serialize>(payload: &T, label: &str) {
    let rendered = serde_json::to_string_pretty(payload).unwrap_or_else(|err| {
        eprintln!("error: failed to render {label} JSON: {err}");
        std::process::exit(EXIT_USAGE);
    });
    println!("{rendered}");
}

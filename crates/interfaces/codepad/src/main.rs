#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    if let Err(err) = codepad_ui::run() {
        eprintln!("Codepad failed: {err}");
        std::process::exit(1);
    }
}

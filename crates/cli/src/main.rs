fn main() {
    if let Err(e) = mgcbsync_cli::run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

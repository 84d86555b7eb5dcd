fn main() {
    if let Err(err) = sigami::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

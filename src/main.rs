fn main() {
    if let Err(err) = order_managed::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn main() {
    if let Err(err) = column_aliases::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

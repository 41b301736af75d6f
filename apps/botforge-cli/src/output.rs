pub fn print_banner() {
    println!("botforge {}", env!("CARGO_PKG_VERSION"));
}

pub fn engine_name() -> &'static str {
    "botforge"
}

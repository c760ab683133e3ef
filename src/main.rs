fn main() {
    window_filter::cli::run();
}

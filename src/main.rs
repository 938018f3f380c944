fn main() {
    pvdb2json::cli::run();
}

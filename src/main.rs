fn main() {
    winup::run_cli();
}

fn main() {
    gravity_sim::app::run();
}

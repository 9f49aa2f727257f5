fn main() {
    video_poker::cli::run();
}

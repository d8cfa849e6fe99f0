fn main() {
    #[cfg(feature = "cli")]
    seqdiff::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("seqdiff: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(2);
    }
}

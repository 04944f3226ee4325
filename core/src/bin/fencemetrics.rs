fn main() -> anyhow::Result<()> {
    fencemetrics_core::cli::run()
}

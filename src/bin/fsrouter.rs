fn main() -> anyhow::Result<()> {
    fsrouter::cli::run_cli()
}

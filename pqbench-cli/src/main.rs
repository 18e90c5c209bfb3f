//! `pqbench`: benchmark every algorithm the configured provider offers

fn main() -> anyhow::Result<()> {
    pqbench_cli::run()
}

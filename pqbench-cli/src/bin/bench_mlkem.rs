//! `bench-mlkem`: ML-KEM-512/768/1024 keygen, encaps and decaps

fn main() -> anyhow::Result<()> {
    pqbench_cli::run_family(pqbench_core::Family::KeyEncapsulation)
}

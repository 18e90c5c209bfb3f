//! `bench-mldsa`: ML-DSA-44/65/87 keygen, sign and verify

fn main() -> anyhow::Result<()> {
    pqbench_cli::run_family(pqbench_core::Family::Signature)
}

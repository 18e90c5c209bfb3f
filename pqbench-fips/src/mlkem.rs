//! ML-KEM (FIPS 203) descriptors

use crate::bytes::{fixed, write_into};
use fips203::traits::{Decaps, Encaps, KeyGen, SerDes};
use fips203::{ml_kem_512, ml_kem_768, ml_kem_1024};
use pqbench_core::{AlgorithmDescriptor, KemOperations, KemSizes};

/// ML-KEM shared secret length, identical for every parameter set
pub const SHARED_SECRET_LEN: usize = 32;

macro_rules! ml_kem_descriptor {
    ($module:ident, $name:literal, $variant:literal) => {
        AlgorithmDescriptor::key_encapsulation(
            $name,
            $variant,
            KemSizes {
                public_key: $module::EK_LEN,
                secret_key: $module::DK_LEN,
                ciphertext: $module::CT_LEN,
                shared_secret: SHARED_SECRET_LEN,
            },
            KemOperations::new(
                |pk_out, sk_out| {
                    let (ek, dk) = $module::KG::try_keygen()?;
                    write_into("public key", pk_out, &ek.into_bytes())?;
                    write_into("secret key", sk_out, &dk.into_bytes())
                },
                |pk, ct_out, ss_out| {
                    let ek = $module::EncapsKey::try_from_bytes(fixed("public key", pk)?)?;
                    let (ssk, ct) = ek.try_encaps()?;
                    write_into("ciphertext", ct_out, &ct.into_bytes())?;
                    write_into("shared secret", ss_out, &ssk.into_bytes())
                },
                |ct, sk, ss_out| {
                    let dk = $module::DecapsKey::try_from_bytes(fixed("secret key", sk)?)?;
                    let ct = $module::CipherText::try_from_bytes(fixed("ciphertext", ct)?)?;
                    let ssk = dk.try_decaps(&ct)?;
                    write_into("shared secret", ss_out, &ssk.into_bytes())
                },
            ),
        )
    };
}

/// Descriptor for an ML-KEM parameter set by provider name
pub(crate) fn descriptor(name: &str) -> Option<AlgorithmDescriptor> {
    match name {
        "mlkem512" => Some(ml_kem_descriptor!(ml_kem_512, "mlkem512", "512")),
        "mlkem768" => Some(ml_kem_descriptor!(ml_kem_768, "mlkem768", "768")),
        "mlkem1024" => Some(ml_kem_descriptor!(ml_kem_1024, "mlkem1024", "1024")),
        _ => None,
    }
}

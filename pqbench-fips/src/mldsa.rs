//! ML-DSA (FIPS 204) descriptors
//!
//! Signatures use an empty context string.

use crate::bytes::{fixed, write_into};
use fips204::traits::{SerDes, Signer, Verifier};
use fips204::{ml_dsa_44, ml_dsa_65, ml_dsa_87};
use pqbench_core::{AlgorithmDescriptor, PrimitiveError, SignatureOperations, SignatureSizes};

const CONTEXT: &[u8] = &[];

macro_rules! ml_dsa_descriptor {
    ($module:ident, $name:literal, $variant:literal, $pk:literal, $sk:literal, $sig:literal) => {
        AlgorithmDescriptor::signature(
            $name,
            $variant,
            SignatureSizes {
                public_key: $pk,
                secret_key: $sk,
                signature: $sig,
            },
            SignatureOperations::new(
                |pk_out, sk_out| {
                    let (pk, sk) = $module::try_keygen()?;
                    write_into("public key", pk_out, &pk.into_bytes())?;
                    write_into("secret key", sk_out, &sk.into_bytes())
                },
                |message, sk, sig_out| {
                    let sk = $module::PrivateKey::try_from_bytes(fixed::<$sk>("secret key", sk)?)?;
                    let sig = sk.try_sign(message, CONTEXT)?;
                    write_into("signature", sig_out, &sig)?;
                    Ok(sig.len())
                },
                |message, sig, pk| {
                    let pk = $module::PublicKey::try_from_bytes(fixed::<$pk>("public key", pk)?)?;
                    let sig = fixed::<$sig>("signature", sig)?;
                    if pk.verify(message, &sig, CONTEXT) {
                        Ok(())
                    } else {
                        Err(PrimitiveError::new("signature rejected"))
                    }
                },
            ),
        )
    };
}

/// Descriptor for an ML-DSA parameter set by provider name
pub(crate) fn descriptor(name: &str) -> Option<AlgorithmDescriptor> {
    match name {
        "mldsa44" => Some(ml_dsa_descriptor!(ml_dsa_44, "mldsa44", "44", 1312, 2560, 2420)),
        "mldsa65" => Some(ml_dsa_descriptor!(ml_dsa_65, "mldsa65", "65", 1952, 4032, 3309)),
        "mldsa87" => Some(ml_dsa_descriptor!(ml_dsa_87, "mldsa87", "87", 2592, 4896, 4627)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pqbench_core::Scheme;

    fn sign_and_verify(name: &str, message: &[u8], tamper: bool) -> bool {
        let descriptor = descriptor(name).unwrap();
        let Scheme::Signature { sizes, operations } = descriptor.scheme() else {
            panic!("{name} is not a signature scheme");
        };
        let mut pk = vec![0u8; sizes.public_key];
        let mut sk = vec![0u8; sizes.secret_key];
        let mut sig = vec![0u8; sizes.signature];

        (operations.keygen.as_ref().unwrap())(&mut pk[..], &mut sk[..]).unwrap();
        let len = (operations.sign.as_ref().unwrap())(message, &sk[..], &mut sig[..]).unwrap();
        assert_eq!(len, sizes.signature);
        if tamper {
            sig[0] ^= 0xff;
        }
        (operations.verify.as_ref().unwrap())(message, &sig[..len], &pk[..]).is_ok()
    }

    #[test]
    fn test_sign_then_verify() {
        assert!(sign_and_verify("mldsa44", b"Test message for signing", false));
    }

    #[test]
    fn test_tampered_signature_rejected() {
        assert!(!sign_and_verify("mldsa44", b"Test message for signing", true));
    }

    #[test]
    fn test_sizes_match_fips_204() {
        for (name, pk, sk, sig) in [
            ("mldsa44", 1312, 2560, 2420),
            ("mldsa65", 1952, 4032, 3309),
            ("mldsa87", 2592, 4896, 4627),
        ] {
            let descriptor = descriptor(name).unwrap();
            let Scheme::Signature { sizes, .. } = descriptor.scheme() else {
                panic!("{name} is not a signature scheme");
            };
            assert_eq!(
                (sizes.public_key, sizes.secret_key, sizes.signature),
                (pk, sk, sig)
            );
        }
    }
}

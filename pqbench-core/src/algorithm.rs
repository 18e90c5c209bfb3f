//! Algorithm Descriptors
//!
//! An [`AlgorithmDescriptor`] describes one primitive instance produced by a
//! provider: its name, variant, buffer sizes and operation entry points. The
//! family is a closed enum, so a KEM can only ever carry KEM operations and
//! KEM sizes, and likewise for signatures.

use crate::error::{BenchError, PrimitiveError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Result of a primitive call
pub type PrimitiveResult<T = ()> = Result<T, PrimitiveError>;

/// `keygen(public_key_out, secret_key_out)`
pub type KeygenFn = Box<dyn Fn(&mut [u8], &mut [u8]) -> PrimitiveResult>;
/// `encapsulate(public_key, ciphertext_out, shared_secret_out)`
pub type EncapsulateFn = Box<dyn Fn(&[u8], &mut [u8], &mut [u8]) -> PrimitiveResult>;
/// `decapsulate(ciphertext, secret_key, shared_secret_out)`
pub type DecapsulateFn = Box<dyn Fn(&[u8], &[u8], &mut [u8]) -> PrimitiveResult>;
/// `sign(message, secret_key, signature_out) -> signature length`
pub type SignFn = Box<dyn Fn(&[u8], &[u8], &mut [u8]) -> PrimitiveResult<usize>>;
/// `verify(message, signature, public_key)`
pub type VerifyFn = Box<dyn Fn(&[u8], &[u8], &[u8]) -> PrimitiveResult>;

// ─── Family and operations ───────────────────────────────────────────────────

/// Algorithm family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Family {
    /// Key encapsulation mechanism
    KeyEncapsulation,
    /// Digital signature scheme
    Signature,
}

impl Family {
    /// Operations benchmarked for this family, in run order
    pub fn operations(self) -> &'static [Operation] {
        match self {
            Family::KeyEncapsulation => &[
                Operation::Keygen,
                Operation::Encapsulate,
                Operation::Decapsulate,
            ],
            Family::Signature => &[Operation::Keygen, Operation::Sign, Operation::Verify],
        }
    }

    /// "KEM" or "Signature"
    pub fn as_str(self) -> &'static str {
        match self {
            Family::KeyEncapsulation => "KEM",
            Family::Signature => "Signature",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A benchmarked operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Key pair generation
    Keygen,
    /// KEM encapsulation
    #[serde(rename = "encaps")]
    Encapsulate,
    /// KEM decapsulation
    #[serde(rename = "decaps")]
    Decapsulate,
    /// Signature generation
    Sign,
    /// Signature verification
    Verify,
}

impl Operation {
    /// Name used in reports: keygen, encaps, decaps, sign, verify
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Keygen => "keygen",
            Operation::Encapsulate => "encaps",
            Operation::Decapsulate => "decaps",
            Operation::Sign => "sign",
            Operation::Verify => "verify",
        }
    }

    /// Capitalized label for log lines
    pub fn title(self) -> &'static str {
        match self {
            Operation::Keygen => "Keygen",
            Operation::Encapsulate => "Encaps",
            Operation::Decapsulate => "Decaps",
            Operation::Sign => "Sign",
            Operation::Verify => "Verify",
        }
    }

    /// Whether `family` exposes this operation
    pub fn belongs_to(self, family: Family) -> bool {
        family.operations().contains(&self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keygen" => Ok(Operation::Keygen),
            "encaps" | "encapsulate" => Ok(Operation::Encapsulate),
            "decaps" | "decapsulate" => Ok(Operation::Decapsulate),
            "sign" => Ok(Operation::Sign),
            "verify" => Ok(Operation::Verify),
            other => Err(BenchError::InvalidConfiguration(format!(
                "unknown operation: {}",
                other
            ))),
        }
    }
}

// ─── Sizes and entry points ──────────────────────────────────────────────────

/// Buffer sizes of a KEM, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KemSizes {
    /// Encapsulation key
    pub public_key: usize,
    /// Decapsulation key
    pub secret_key: usize,
    /// Ciphertext
    pub ciphertext: usize,
    /// Shared secret
    pub shared_secret: usize,
}

/// Buffer sizes of a signature scheme, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSizes {
    /// Verification key
    pub public_key: usize,
    /// Signing key
    pub secret_key: usize,
    /// Maximum signature length
    pub signature: usize,
}

/// KEM entry points. A `None` entry is a missing capability.
#[derive(Default)]
pub struct KemOperations {
    /// Key pair generation
    pub keygen: Option<KeygenFn>,
    /// Encapsulation
    pub encapsulate: Option<EncapsulateFn>,
    /// Decapsulation
    pub decapsulate: Option<DecapsulateFn>,
}

impl KemOperations {
    /// All three entry points present
    pub fn new(
        keygen: impl Fn(&mut [u8], &mut [u8]) -> PrimitiveResult + 'static,
        encapsulate: impl Fn(&[u8], &mut [u8], &mut [u8]) -> PrimitiveResult + 'static,
        decapsulate: impl Fn(&[u8], &[u8], &mut [u8]) -> PrimitiveResult + 'static,
    ) -> Self {
        Self {
            keygen: Some(Box::new(keygen)),
            encapsulate: Some(Box::new(encapsulate)),
            decapsulate: Some(Box::new(decapsulate)),
        }
    }
}

/// Signature entry points. A `None` entry is a missing capability.
#[derive(Default)]
pub struct SignatureOperations {
    /// Key pair generation
    pub keygen: Option<KeygenFn>,
    /// Signing
    pub sign: Option<SignFn>,
    /// Verification
    pub verify: Option<VerifyFn>,
}

impl SignatureOperations {
    /// All three entry points present
    pub fn new(
        keygen: impl Fn(&mut [u8], &mut [u8]) -> PrimitiveResult + 'static,
        sign: impl Fn(&[u8], &[u8], &mut [u8]) -> PrimitiveResult<usize> + 'static,
        verify: impl Fn(&[u8], &[u8], &[u8]) -> PrimitiveResult + 'static,
    ) -> Self {
        Self {
            keygen: Some(Box::new(keygen)),
            sign: Some(Box::new(sign)),
            verify: Some(Box::new(verify)),
        }
    }
}

/// Family-tagged sizes and entry points
pub enum Scheme {
    /// Key encapsulation mechanism
    KeyEncapsulation {
        /// Buffer sizes
        sizes: KemSizes,
        /// Entry points
        operations: KemOperations,
    },
    /// Signature scheme
    Signature {
        /// Buffer sizes
        sizes: SignatureSizes,
        /// Entry points
        operations: SignatureOperations,
    },
}

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// One concrete primitive instance handed out by a provider
pub struct AlgorithmDescriptor {
    name: String,
    variant: String,
    scheme: Scheme,
}

impl fmt::Debug for AlgorithmDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmDescriptor")
            .field("name", &self.name)
            .field("variant", &self.variant)
            .field("family", &self.family())
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

impl AlgorithmDescriptor {
    /// Build a descriptor
    pub fn new(name: impl Into<String>, variant: impl Into<String>, scheme: Scheme) -> Self {
        Self {
            name: name.into(),
            variant: variant.into(),
            scheme,
        }
    }

    /// Build a KEM descriptor
    pub fn key_encapsulation(
        name: impl Into<String>,
        variant: impl Into<String>,
        sizes: KemSizes,
        operations: KemOperations,
    ) -> Self {
        Self::new(name, variant, Scheme::KeyEncapsulation { sizes, operations })
    }

    /// Build a signature descriptor
    pub fn signature(
        name: impl Into<String>,
        variant: impl Into<String>,
        sizes: SignatureSizes,
        operations: SignatureOperations,
    ) -> Self {
        Self::new(name, variant, Scheme::Signature { sizes, operations })
    }

    /// Provider-facing name, e.g. `mlkem768`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variant label, e.g. `768`
    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Family tag
    pub fn family(&self) -> Family {
        match self.scheme {
            Scheme::KeyEncapsulation { .. } => Family::KeyEncapsulation,
            Scheme::Signature { .. } => Family::Signature,
        }
    }

    /// Sizes and entry points
    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    /// Human-readable name, e.g. `ML-KEM-768`
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }

    /// Public key length in bytes
    pub fn public_key_len(&self) -> usize {
        match &self.scheme {
            Scheme::KeyEncapsulation { sizes, .. } => sizes.public_key,
            Scheme::Signature { sizes, .. } => sizes.public_key,
        }
    }

    /// Secret key length in bytes
    pub fn secret_key_len(&self) -> usize {
        match &self.scheme {
            Scheme::KeyEncapsulation { sizes, .. } => sizes.secret_key,
            Scheme::Signature { sizes, .. } => sizes.secret_key,
        }
    }

    /// Operations with an entry point present
    pub fn capabilities(&self) -> Vec<Operation> {
        let present = match &self.scheme {
            Scheme::KeyEncapsulation { operations, .. } => [
                (Operation::Keygen, operations.keygen.is_some()),
                (Operation::Encapsulate, operations.encapsulate.is_some()),
                (Operation::Decapsulate, operations.decapsulate.is_some()),
            ],
            Scheme::Signature { operations, .. } => [
                (Operation::Keygen, operations.keygen.is_some()),
                (Operation::Sign, operations.sign.is_some()),
                (Operation::Verify, operations.verify.is_some()),
            ],
        };
        present
            .into_iter()
            .filter_map(|(op, ok)| ok.then_some(op))
            .collect()
    }

    /// Check the family contract: every required entry point present and
    /// every buffer size strictly positive.
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.name.is_empty() {
            return Err(self.invalid("descriptor has no name"));
        }

        let capabilities = self.capabilities();
        if let Some(missing) = self
            .family()
            .operations()
            .iter()
            .find(|op| !capabilities.contains(op))
        {
            return Err(self.invalid(format!("missing required operation '{}'", missing)));
        }

        let lengths: Vec<(&str, usize)> = match &self.scheme {
            Scheme::KeyEncapsulation { sizes, .. } => vec![
                ("public key", sizes.public_key),
                ("secret key", sizes.secret_key),
                ("ciphertext", sizes.ciphertext),
                ("shared secret", sizes.shared_secret),
            ],
            Scheme::Signature { sizes, .. } => vec![
                ("public key", sizes.public_key),
                ("secret key", sizes.secret_key),
                ("signature", sizes.signature),
            ],
        };
        if let Some((role, _)) = lengths.iter().find(|(_, len)| *len == 0) {
            return Err(self.invalid(format!("{} length must be positive", role)));
        }

        Ok(())
    }

    fn invalid(&self, reason: impl Into<String>) -> BenchError {
        BenchError::InvalidAlgorithm {
            algorithm: self.name.clone(),
            reason: reason.into(),
        }
    }
}

/// Map provider names to standard names: `mlkem512` becomes `ML-KEM-512`,
/// `mldsa65` becomes `ML-DSA-65`. Other names pass through unchanged.
pub fn display_name(name: &str) -> String {
    if let Some(level) = name.strip_prefix("mlkem") {
        format!("ML-KEM-{}", level)
    } else if let Some(level) = name.strip_prefix("mldsa") {
        format!("ML-DSA-{}", level)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kem_sizes() -> KemSizes {
        KemSizes {
            public_key: 800,
            secret_key: 1632,
            ciphertext: 768,
            shared_secret: 32,
        }
    }

    fn noop_kem() -> KemOperations {
        KemOperations::new(|_, _| Ok(()), |_, _, _| Ok(()), |_, _, _| Ok(()))
    }

    fn noop_signature() -> SignatureOperations {
        SignatureOperations::new(|_, _| Ok(()), |_, _, sig| Ok(sig.len()), |_, _, _| Ok(()))
    }

    #[test]
    fn test_valid_kem() {
        let desc = AlgorithmDescriptor::key_encapsulation("mlkem512", "512", kem_sizes(), noop_kem());
        assert!(desc.validate().is_ok());
        assert_eq!(desc.family(), Family::KeyEncapsulation);
        assert_eq!(
            desc.capabilities(),
            vec![Operation::Keygen, Operation::Encapsulate, Operation::Decapsulate]
        );
        assert_eq!(desc.display_name(), "ML-KEM-512");
    }

    #[test]
    fn test_kem_missing_decapsulate() {
        let operations = KemOperations {
            decapsulate: None,
            ..noop_kem()
        };
        let desc = AlgorithmDescriptor::key_encapsulation("mlkem512", "512", kem_sizes(), operations);

        let err = desc.validate().unwrap_err();
        assert!(matches!(err, BenchError::InvalidAlgorithm { .. }));
        assert!(err.to_string().contains("decaps"));
    }

    #[test]
    fn test_kem_zero_length() {
        let sizes = KemSizes {
            shared_secret: 0,
            ..kem_sizes()
        };
        let desc = AlgorithmDescriptor::key_encapsulation("mlkem512", "512", sizes, noop_kem());
        let err = desc.validate().unwrap_err();
        assert!(err.to_string().contains("shared secret"));
    }

    #[test]
    fn test_signature_missing_sign() {
        let sizes = SignatureSizes {
            public_key: 1312,
            secret_key: 2560,
            signature: 2420,
        };
        let operations = SignatureOperations {
            sign: None,
            ..noop_signature()
        };
        let desc = AlgorithmDescriptor::signature("mldsa44", "44", sizes, operations);
        assert!(matches!(
            desc.validate(),
            Err(BenchError::InvalidAlgorithm { .. })
        ));
        assert_eq!(desc.capabilities(), vec![Operation::Keygen, Operation::Verify]);
    }

    #[test]
    fn test_empty_name_rejected() {
        let desc = AlgorithmDescriptor::key_encapsulation("", "512", kem_sizes(), noop_kem());
        assert!(desc.validate().is_err());
    }

    #[test]
    fn test_family_operation_order() {
        let kem: Vec<&str> = Family::KeyEncapsulation
            .operations()
            .iter()
            .map(|op| op.as_str())
            .collect();
        let sig: Vec<&str> = Family::Signature
            .operations()
            .iter()
            .map(|op| op.as_str())
            .collect();
        assert_eq!(kem, vec!["keygen", "encaps", "decaps"]);
        assert_eq!(sig, vec!["keygen", "sign", "verify"]);
    }

    #[test]
    fn test_operation_parse() {
        assert_eq!("encaps".parse::<Operation>().unwrap(), Operation::Encapsulate);
        assert_eq!("Verify".parse::<Operation>().unwrap(), Operation::Verify);
        assert!(matches!(
            "hash".parse::<Operation>(),
            Err(BenchError::InvalidConfiguration(_))
        ));
        assert!(Operation::Keygen.belongs_to(Family::Signature));
        assert!(!Operation::Sign.belongs_to(Family::KeyEncapsulation));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(display_name("mldsa87"), "ML-DSA-87");
        assert_eq!(display_name("mlkem1024"), "ML-KEM-1024");
        assert_eq!(display_name("custom"), "custom");
    }
}

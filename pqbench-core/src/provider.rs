//! Providers, Sessions and the Registry
//!
//! A [`Provider`] creates and destroys [`AlgorithmDescriptor`]s inside a
//! session. [`Session`] and [`AlgorithmHandle`] tie those lifecycles to scope:
//! a session is finalized exactly once when dropped, a handle destroys its
//! descriptor exactly once when dropped, and a handle cannot outlive the
//! session it came from.

use crate::algorithm::AlgorithmDescriptor;
use crate::error::BenchError;
use std::any::Any;
use std::fmt;
use std::ops::Deref;
use tracing::debug;

/// Opaque per-session provider state
pub type SessionState = Box<dyn Any>;

/// Source of algorithm implementations
pub trait Provider {
    /// Provider name, unique within a registry
    fn name(&self) -> &str;

    /// Provider version string
    fn version(&self) -> &str;

    /// Open a session. Fails with [`BenchError::ProviderInitFailed`].
    fn initialize(&self) -> Result<SessionState, BenchError>;

    /// Release session state
    fn finalize(&self, state: SessionState) {
        drop(state);
    }

    /// Instantiate an algorithm by name. Fails with [`BenchError::AlgorithmNotFound`].
    fn create_algorithm(
        &self,
        state: &SessionState,
        name: &str,
    ) -> Result<AlgorithmDescriptor, BenchError>;

    /// Tear down a descriptor produced by [`Provider::create_algorithm`]
    fn destroy_algorithm(&self, state: &SessionState, algorithm: AlgorithmDescriptor) {
        let _ = state;
        drop(algorithm);
    }

    /// Algorithm names this provider offers, in a stable order
    fn list_algorithms(&self, state: &SessionState) -> Vec<String>;

    /// Cheap support check. `None` means the provider has no such check and
    /// callers must probe by creating the algorithm.
    fn supports_algorithm(&self, state: &SessionState, name: &str) -> Option<bool> {
        let _ = (state, name);
        None
    }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// An open provider session, finalized on drop
pub struct Session<'p> {
    provider: &'p dyn Provider,
    state: Option<SessionState>,
}

impl<'p> Session<'p> {
    /// Initialize `provider` and open a session
    pub fn open(provider: &'p dyn Provider) -> Result<Self, BenchError> {
        let state = provider.initialize()?;
        debug!(
            provider = provider.name(),
            version = provider.version(),
            "Provider session opened"
        );
        Ok(Self {
            provider,
            state: Some(state),
        })
    }

    /// Provider backing this session
    pub fn provider(&self) -> &'p dyn Provider {
        self.provider
    }

    fn state(&self) -> &SessionState {
        self.state
            .as_ref()
            .expect("session state is present until drop")
    }

    /// Instantiate an algorithm; destroyed when the handle drops
    pub fn create_algorithm(&self, name: &str) -> Result<AlgorithmHandle<'_>, BenchError> {
        let descriptor = self.provider.create_algorithm(self.state(), name)?;
        Ok(AlgorithmHandle {
            session: self,
            descriptor: Some(descriptor),
        })
    }

    /// Algorithm names offered in this session
    pub fn list_algorithms(&self) -> Vec<String> {
        self.provider.list_algorithms(self.state())
    }

    /// Whether `name` can be created in this session.
    ///
    /// Falls back to a create-and-destroy probe when the provider has no
    /// support check of its own.
    pub fn supports(&self, name: &str) -> bool {
        match self.provider.supports_algorithm(self.state(), name) {
            Some(supported) => supported,
            None => {
                debug!(algorithm = name, "Probing support by instantiation");
                self.create_algorithm(name).is_ok()
            }
        }
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.provider.finalize(state);
        }
        debug!(provider = self.provider.name(), "Provider session finalized");
    }
}

// ─── AlgorithmHandle ─────────────────────────────────────────────────────────

/// A descriptor on loan from a session, destroyed on drop
pub struct AlgorithmHandle<'s> {
    session: &'s Session<'s>,
    descriptor: Option<AlgorithmDescriptor>,
}

impl AlgorithmHandle<'_> {
    /// Borrow the descriptor
    pub fn descriptor(&self) -> &AlgorithmDescriptor {
        self.descriptor
            .as_ref()
            .expect("descriptor is present until drop")
    }
}

impl Deref for AlgorithmHandle<'_> {
    type Target = AlgorithmDescriptor;

    fn deref(&self) -> &AlgorithmDescriptor {
        self.descriptor()
    }
}

impl fmt::Debug for AlgorithmHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.descriptor(), f)
    }
}

impl Drop for AlgorithmHandle<'_> {
    fn drop(&mut self) {
        if let Some(descriptor) = self.descriptor.take() {
            self.session
                .provider
                .destroy_algorithm(self.session.state(), descriptor);
        }
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Explicit set of available providers
#[derive(Default)]
pub struct ProviderRegistry {
    providers: Vec<Box<dyn Provider>>,
}

impl ProviderRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider. Registering a name that is already present is a
    /// no-op that keeps the existing provider.
    pub fn register(&mut self, provider: Box<dyn Provider>) -> Result<(), BenchError> {
        if provider.name().is_empty() || provider.version().is_empty() {
            return Err(BenchError::InvalidConfiguration(
                "provider must declare a name and a version".to_string(),
            ));
        }
        if self.find(provider.name()).is_some() {
            debug!(provider = provider.name(), "Provider already registered");
            return Ok(());
        }
        debug!(
            provider = provider.name(),
            version = provider.version(),
            "Registered provider"
        );
        self.providers.push(provider);
        Ok(())
    }

    /// Remove and return the provider named `name`
    pub fn unregister(&mut self, name: &str) -> Option<Box<dyn Provider>> {
        let index = self.providers.iter().position(|p| p.name() == name)?;
        Some(self.providers.remove(index))
    }

    /// Look up a provider by name
    pub fn find(&self, name: &str) -> Option<&dyn Provider> {
        self.providers
            .iter()
            .find(|p| p.name() == name)
            .map(|p| p.as_ref())
    }

    /// Registered providers in registration order
    pub fn iter(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    /// Registered provider names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

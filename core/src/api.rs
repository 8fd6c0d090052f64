use std::fmt::Debug;

/// SigningCredential is the trait implemented by the credential a signer holds.
///
/// Credentials are checked once when a signer is built; a signer never holds
/// a credential for which `is_valid` returns false.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

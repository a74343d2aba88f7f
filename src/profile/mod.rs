//! Certificate profiles.
//!
//! A profile describes a class of certificates that can be issued: whether
//! they are certificate authorities, which key usages they get, and which
//! extensions they may carry. The latter is decided by the validators the
//! profile places into its [`ValidatorRegistry`].
//!
//! There are two kinds of profiles. The leaf profile is used for ordinary
//! service certificates. The CA profile is used when a certificate
//! authority issues a certificate to another certificate authority, such
//! as when one SCM certifies the others of an HA deployment. Both kinds are
//! represented by the same type [`Profile`], created via
//! [`Profile::new_leaf`] and [`Profile::new_ca`], respectively.
//!
//! The profiles of an issuance context should share a single registry.
//! Since registrations never replace an existing validator, whichever
//! profile registers an identifier first determines its validator for
//! everyone.

pub mod ca;
pub mod leaf;

use bcder::{ConstOid, Oid};
use bytes::Bytes;
use crate::error::ParseError;
use crate::ext::GeneralName;
use crate::extension::Extension;
use crate::keyusage::KeyUsage;
use crate::registry::{Validator, ValidatorRegistry};


//------------ ProfileKind ---------------------------------------------------

/// The kind of certificates issued under a profile.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde", derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProfileKind {
    /// End-entity certificates.
    Leaf,

    /// Certificate authority certificates.
    Ca,
}


//------------ ProfileConfig -------------------------------------------------

/// Options for creating a profile.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde", derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(default, rename_all = "kebab-case"))]
pub struct ProfileConfig {
    /// Register the permissive validators for the CRL related and the
    /// name constraints extensions.
    ///
    /// This only has an effect for CA profiles. Because the registry is
    /// shared, once installed these validators apply to all profiles
    /// using the same registry.
    pub crl_placeholders: bool,
}


//------------ Profile -------------------------------------------------------

/// A certificate profile.
///
/// Values are immutable and cheap to clone. All clones share the same
/// registry.
#[derive(Clone, Debug)]
pub struct Profile {
    kind: ProfileKind,
    registry: ValidatorRegistry,
    config: ProfileConfig,
}

impl Profile {
    /// Creates a profile of the given kind.
    pub fn with_config(
        kind: ProfileKind,
        registry: ValidatorRegistry,
        config: ProfileConfig
    ) -> Self {
        Profile { kind, registry, config }
    }

    /// Creates a leaf profile with the default configuration.
    pub fn new_leaf(registry: ValidatorRegistry) -> Self {
        Self::with_config(ProfileKind::Leaf, registry, Default::default())
    }

    /// Creates a CA profile with the default configuration.
    pub fn new_ca(registry: ValidatorRegistry) -> Self {
        Self::with_config(ProfileKind::Ca, registry, Default::default())
    }

    pub fn kind(&self) -> ProfileKind {
        self.kind
    }

    pub fn config(&self) -> ProfileConfig {
        self.config
    }

    /// Returns whether certificates issued under the profile are CAs.
    pub fn is_ca(&self) -> bool {
        matches!(self.kind, ProfileKind::Ca)
    }

    /// Returns the key usage for certificates issued under the profile.
    pub fn key_usage(&self) -> KeyUsage {
        match self.kind {
            ProfileKind::Leaf => leaf::KEY_USAGE,
            ProfileKind::Ca => ca::KEY_USAGE,
        }
    }

    /// Returns the key purposes permitted in the Extended Key Usage.
    pub fn extended_key_usage(&self) -> &'static [ConstOid] {
        leaf::EXTENDED_KEY_USAGE
    }

    /// Returns whether a general name kind is permitted in the subject
    /// alternative name.
    pub fn is_supported_general_name(&self, name: &GeneralName) -> bool {
        !matches!(*name, GeneralName::Other(_))
    }

    /// Returns the validator registry of the profile.
    ///
    /// Makes sure the profile’s own validators are registered first. Since
    /// registration never replaces existing validators, this can be called
    /// any number of times.
    pub fn extension_validators(&self) -> &ValidatorRegistry {
        leaf::register(&self.registry);
        if self.is_ca() {
            ca::register(&self.registry, self.config);
        }
        &self.registry
    }

    /// Returns whether there is a validator for the extension.
    pub fn is_supported_extension<T: AsRef<[u8]>>(
        &self, oid: &Oid<T>
    ) -> bool {
        self.extension_validators().contains(oid)
    }

    /// Returns the identifiers of all supported extensions.
    pub fn supported_extensions(&self) -> Vec<Oid<Bytes>> {
        self.extension_validators().oids()
    }

    /// Checks a single extension.
    ///
    /// Returns `Ok(false)` both when there is no validator for the
    /// extension and when the validator rejects it.
    pub fn validate_extension(
        &self, ext: &Extension
    ) -> Result<bool, ParseError> {
        match self.extension_validators().lookup(ext.oid()) {
            Some(validator) => validator.validate(ext, self),
            None => Ok(false)
        }
    }
}


//------------ Helpers -------------------------------------------------------

/// The signature of the validator functions defined by the profiles.
pub(crate) type ValidateFn = fn(&Extension, &Profile) -> Result<bool, ParseError>;

/// Registers a validator function unless the identifier is already bound.
///
/// This avoids creating a new validator if there already is one.
pub(crate) fn install(
    registry: &ValidatorRegistry,
    oid: &ConstOid,
    name: &'static str,
    op: ValidateFn,
) {
    if !registry.contains(oid) {
        registry.register_if_absent(oid, Validator::new(name, op));
    }
}


//============ Tests =========================================================

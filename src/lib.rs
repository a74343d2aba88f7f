//! Extension policies for certificate issuance.
//!
//! Before a certificate authority signs a certificate, it has to decide
//! whether the X.509 extensions requested for it are acceptable. This
//! crate makes that decision pluggable: a [`Profile`] describes a class of
//! certificates and populates a shared [`ValidatorRegistry`] with one
//! [`Validator`] per extension identifier it understands. The function
//! [`check_extensions`] then runs every requested extension through the
//! registry and refuses anything unknown or disallowed.
//!
//! Two profiles are provided. The leaf profile covers ordinary service
//! certificates. The CA profile additionally accepts the Basic Constraints
//! extension for certificates issued to subordinate certificate
//! authorities.
//!
//! Extensions are handled in their DER encoding, using the types in
//! [`extension`]. The payloads of the extensions that validators look at
//! are decoded by the types in [`ext`] and [`keyusage`].
//!
//! [`check_extensions`]: issue::check_extensions

pub use self::error::{IssuanceError, ParseError, PolicyRejection};
pub use self::extension::{Extension, Extensions};
pub use self::keyusage::KeyUsage;
pub use self::profile::{Profile, ProfileConfig, ProfileKind};
pub use self::registry::{Validator, ValidatorRegistry};

pub mod error;
pub mod ext;
pub mod extension;
pub mod issue;
pub mod keyusage;
pub mod oid;
pub mod profile;
pub mod registry;

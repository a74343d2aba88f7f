//! Checking the extensions of a certificate before it is issued.
//!
//! Before a certificate authority signs a certificate, every extension the
//! requester asked for has to be accepted by the profile the certificate
//! is issued under. An extension is acceptable if the profile’s registry
//! has a validator for it and that validator returns `true`. Everything
//! else, including extensions nobody knows about, is refused.

use bytes::Bytes;
use log::{debug, warn};
use crate::error::{IssuanceError, ParseError, PolicyRejection};
use crate::extension::{Extension, Extensions};
use crate::profile::Profile;


//------------ check_extensions ----------------------------------------------

/// Checks that all extensions are acceptable under `profile`.
///
/// Extensions are checked in order and checking stops at the first one
/// that is not accepted.
pub fn check_extensions<'a>(
    profile: &Profile,
    extensions: impl IntoIterator<Item = &'a Extension>
) -> Result<(), IssuanceError> {
    let registry = profile.extension_validators();
    for ext in extensions {
        let validator = match registry.lookup(ext.oid()) {
            Some(validator) => validator,
            None => {
                warn!("Refusing unsupported extension {}", ext.oid());
                return Err(
                    PolicyRejection::unsupported(ext.oid().clone()).into()
                )
            }
        };
        match validator.validate(ext, profile) {
            Ok(true) => {
                debug!(
                    "Extension {} accepted by validator '{}'",
                    ext.oid(), validator.name()
                );
            }
            Ok(false) => {
                warn!(
                    "Extension {} refused by validator '{}'",
                    ext.oid(), validator.name()
                );
                return Err(
                    PolicyRejection::disallowed(ext.oid().clone()).into()
                )
            }
            Err(err) => {
                warn!("{}", err);
                return Err(err.into())
            }
        }
    }
    Ok(())
}


//------------ check_der_extensions ------------------------------------------

/// Decodes a DER encoded sequence of extensions and checks them.
///
/// Returns the decoded extensions if all of them are acceptable.
pub fn check_der_extensions(
    profile: &Profile, der: Bytes
) -> Result<Extensions, IssuanceError> {
    let extensions = Extensions::decode(der).map_err(|err| {
        let err = ParseError::extensions(err);
        warn!("{}", err);
        err
    })?;
    check_extensions(profile, &extensions)?;
    Ok(extensions)
}


//============ Tests =========================================================

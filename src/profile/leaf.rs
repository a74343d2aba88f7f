//! The leaf profile.
//!
//! These are the rules for ordinary service certificates. The CA profile
//! builds on them, so everything registered here is also available to CA
//! profiles sharing the registry.

use bcder::ConstOid;
use crate::error::ParseError;
use crate::ext::{ExtendedKeyUsage, GeneralName, SubjectAltName};
use crate::extension::Extension;
use crate::keyusage::KeyUsage;
use crate::oid;
use crate::registry::ValidatorRegistry;
use super::{install, Profile};


//------------ Constants -----------------------------------------------------

/// The key usage of leaf certificates.
pub const KEY_USAGE: KeyUsage = KeyUsage::DIGITAL_SIGNATURE
    .union(KeyUsage::KEY_ENCIPHERMENT)
    .union(KeyUsage::DATA_ENCIPHERMENT)
    .union(KeyUsage::KEY_AGREEMENT);

/// The key purposes that may appear in an Extended Key Usage extension.
pub static EXTENDED_KEY_USAGE: &[ConstOid] = &[
    oid::KP_SERVER_AUTH, oid::KP_CLIENT_AUTH
];


//------------ Registration --------------------------------------------------

/// Registers the validators of the leaf profile.
pub(crate) fn register(registry: &ValidatorRegistry) {
    install(registry, &oid::CE_KEY_USAGE, "key-usage", validate_key_usage);
    install(
        registry, &oid::CE_SUBJECT_ALT_NAME, "subject-alt-name",
        validate_subject_alt_name
    );
    install(
        registry, &oid::CE_AUTHORITY_KEY_IDENTIFIER,
        "authority-key-identifier", validate_authority_key_identifier
    );
    install(
        registry, &oid::CE_EXTENDED_KEY_USAGE, "extended-key-usage",
        validate_extended_key_usage
    );
    install(registry, &oid::PE_LOGOTYPE, "logotype", validate_logotype);
}


//------------ Validators ----------------------------------------------------

/// Accepts a Key Usage extension that asks for no more than the profile.
pub fn validate_key_usage(
    ext: &Extension, profile: &Profile
) -> Result<bool, ParseError> {
    Ok(KeyUsage::from_extension(ext)?.is_subset_of(profile.key_usage()))
}

/// Accepts an Extended Key Usage with only permitted key purposes.
pub fn validate_extended_key_usage(
    ext: &Extension, profile: &Profile
) -> Result<bool, ParseError> {
    let permitted = profile.extended_key_usage();
    Ok(ExtendedKeyUsage::from_extension(ext)?.purposes().iter().all(
        |purpose| permitted.iter().any(|item| purpose == item)
    ))
}

/// Accepts a Subject Alternative Name with well-formed supported names.
///
/// DNS names must be host names. IP addresses must be either four or
/// sixteen octets long.
pub fn validate_subject_alt_name(
    ext: &Extension, profile: &Profile
) -> Result<bool, ParseError> {
    Ok(SubjectAltName::from_extension(ext)?.names().iter().all(|name| {
        profile.is_supported_general_name(name) && match *name {
            GeneralName::DnsName(ref name) => is_host_name(name),
            GeneralName::IpAddress(ref addr) => {
                addr.len() == 4 || addr.len() == 16
            }
            GeneralName::Other(_) => false,
        }
    }))
}

/// Accepts any Authority Key Identifier.
pub fn validate_authority_key_identifier(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}

/// Accepts any logotype.
pub fn validate_logotype(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}


//------------ Helpers -------------------------------------------------------

/// Returns whether `name` is a syntactically valid host name.
///
/// A single trailing dot is allowed. Wildcards are not.
fn is_host_name(name: &[u8]) -> bool {
    let name = name.strip_suffix(b".").unwrap_or(name);
    if name.is_empty() || name.len() > 253 {
        return false
    }
    name.split(|&ch| ch == b'.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.first() != Some(&b'-')
            && label.last() != Some(&b'-')
            && label.iter().all(|ch| ch.is_ascii_alphanumeric() || *ch == b'-')
    })
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use bytes::Bytes;
    use super::*;
    use crate::extension::const_oid;

    fn leaf() -> Profile {
        Profile::new_leaf(ValidatorRegistry::new())
    }

    fn san(names: Vec<GeneralName>) -> Extension {
        SubjectAltName::new(names).unwrap().to_extension(false)
    }

    #[test]
    fn key_usage() {
        let profile = leaf();
        assert!(validate_key_usage(
            &KEY_USAGE.to_extension(true), &profile
        ).unwrap());
        assert!(validate_key_usage(
            &KeyUsage::DIGITAL_SIGNATURE.to_extension(true), &profile
        ).unwrap());
        assert!(!validate_key_usage(
            &(KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_CERT_SIGN)
                .to_extension(true),
            &profile
        ).unwrap());
        assert!(validate_key_usage(
            &Extension::from_const(
                &oid::CE_KEY_USAGE, true, Bytes::from_static(b"\x05\x00")
            ),
            &profile
        ).is_err());
    }

    #[test]
    fn extended_key_usage() {
        let profile = leaf();
        let eku = ExtendedKeyUsage::new(vec![
            const_oid(&oid::KP_SERVER_AUTH), const_oid(&oid::KP_CLIENT_AUTH)
        ]);
        assert!(validate_extended_key_usage(
            &eku.to_extension(false), &profile
        ).unwrap());

        for purpose in vec![
            const_oid(&oid::KP_CODE_SIGNING),
            const_oid(&oid::KP_EMAIL_PROTECTION),
        ] {
            let eku = ExtendedKeyUsage::new(vec![
                const_oid(&oid::KP_SERVER_AUTH), purpose
            ]);
            assert!(!validate_extended_key_usage(
                &eku.to_extension(false), &profile
            ).unwrap());
        }
    }

    #[test]
    fn subject_alt_name() {
        let profile = leaf();
        assert!(validate_subject_alt_name(&san(vec![
            GeneralName::DnsName(Bytes::from_static(b"scm1.example.com")),
            GeneralName::IpAddress(Bytes::from_static(b"\x0a\x00\x00\x01")),
        ]), &profile).unwrap());
        assert!(validate_subject_alt_name(&san(vec![
            GeneralName::IpAddress(Bytes::from(vec![0u8; 16])),
        ]), &profile).unwrap());
        assert!(!validate_subject_alt_name(&san(vec![
            GeneralName::IpAddress(Bytes::from_static(b"\x0a\x00\x00")),
        ]), &profile).unwrap());
        assert!(!validate_subject_alt_name(&san(vec![
            GeneralName::DnsName(Bytes::from_static(b"*.example.com")),
        ]), &profile).unwrap());
    }

    #[test]
    fn host_names() {
        assert!(is_host_name(b"localhost"));
        assert!(is_host_name(b"scm-1.example.com."));
        assert!(!is_host_name(b""));
        assert!(!is_host_name(b"."));
        assert!(!is_host_name(b"-scm.example.com"));
        assert!(!is_host_name(b"scm..example.com"));
        assert!(!is_host_name(b"scm_1.example.com"));
        assert!(!is_host_name(&[b'a'; 64]));
    }

    #[test]
    fn opaque_extensions() {
        let profile = leaf();
        let ext = Extension::from_const(
            &oid::CE_AUTHORITY_KEY_IDENTIFIER, false,
            Bytes::from_static(b"\x30\x00")
        );
        assert!(validate_authority_key_identifier(&ext, &profile).unwrap());
        let ext = Extension::from_const(
            &oid::PE_LOGOTYPE, false, Bytes::from_static(b"junk")
        );
        assert!(validate_logotype(&ext, &profile).unwrap());
    }
}

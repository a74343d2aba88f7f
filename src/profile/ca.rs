//! The CA profile.
//!
//! This profile is used when a certificate authority certifies another
//! certificate authority. On top of the leaf rules it permits the Basic
//! Constraints extension, but only if it marks the subject as a CA.
//!
//! The validators for the CRL related extensions and for Name Constraints
//! accept anything. They are only registered if the profile was created
//! with [`ProfileConfig::crl_placeholders`] set.

use log::debug;
use crate::error::ParseError;
use crate::ext::BasicConstraints;
use crate::extension::Extension;
use crate::keyusage::KeyUsage;
use crate::oid;
use crate::registry::ValidatorRegistry;
use super::{install, Profile, ProfileConfig};


//------------ Constants -----------------------------------------------------

/// The key usage of CA certificates.
///
/// Note that neither `nonRepudiation` nor `encipherOnly` and
/// `decipherOnly` are included.
pub const KEY_USAGE: KeyUsage = KeyUsage::DIGITAL_SIGNATURE
    .union(KeyUsage::KEY_ENCIPHERMENT)
    .union(KeyUsage::DATA_ENCIPHERMENT)
    .union(KeyUsage::KEY_AGREEMENT)
    .union(KeyUsage::CRL_SIGN)
    .union(KeyUsage::KEY_CERT_SIGN);


//------------ Registration --------------------------------------------------

/// Registers the validators of the CA profile.
///
/// The leaf validators are expected to have been registered already.
pub(crate) fn register(registry: &ValidatorRegistry, config: ProfileConfig) {
    install(
        registry, &oid::CE_BASIC_CONSTRAINTS, "basic-constraints",
        validate_basic_constraints
    );
    if !config.crl_placeholders {
        return
    }
    if !registry.contains(&oid::CE_CRL_NUMBER) {
        debug!("Installing permissive CRL and name constraints validators");
    }
    install(
        registry, &oid::CE_CRL_NUMBER, "crl-number", validate_crl_number
    );
    install(
        registry, &oid::CE_CRL_REASONS, "crl-reason", validate_crl_reason
    );
    install(
        registry, &oid::CE_DELTA_CRL_INDICATOR, "delta-crl-indicator",
        validate_delta_crl_indicator
    );
    install(
        registry, &oid::CE_NAME_CONSTRAINTS, "name-constraints",
        validate_name_constraints
    );
    install(
        registry, &oid::CE_CRL_DISTRIBUTION_POINTS,
        "crl-distribution-points", validate_crl_distribution_points
    );
}


//------------ Validators ----------------------------------------------------

/// Accepts a Basic Constraints extension iff both it and the profile say CA.
///
/// The payload is always decoded first, so a malformed extension is an
/// error even if the profile isn’t a CA profile. The path length
/// constraint is ignored.
pub fn validate_basic_constraints(
    ext: &Extension, profile: &Profile
) -> Result<bool, ParseError> {
    let constraints = BasicConstraints::from_extension(ext)?;
    Ok(constraints.is_ca() && profile.is_ca())
}

/// Accepts any CRL Number.
pub fn validate_crl_number(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}

/// Accepts any CRL Reason.
pub fn validate_crl_reason(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}

/// Accepts any Delta CRL Indicator.
pub fn validate_delta_crl_indicator(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}

/// Accepts any Name Constraints.
pub fn validate_name_constraints(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}

/// Accepts any CRL Distribution Points.
pub fn validate_crl_distribution_points(
    _ext: &Extension, _profile: &Profile
) -> Result<bool, ParseError> {
    Ok(true)
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use bcder::ConstOid;
    use bytes::Bytes;
    use super::*;
    use crate::extension::const_oid;
    use crate::profile::{ProfileKind, ValidateFn};

    static PLACEHOLDERS: [(ConstOid, ValidateFn); 5] = [
        (oid::CE_CRL_NUMBER, validate_crl_number),
        (oid::CE_CRL_REASONS, validate_crl_reason),
        (oid::CE_DELTA_CRL_INDICATOR, validate_delta_crl_indicator),
        (oid::CE_NAME_CONSTRAINTS, validate_name_constraints),
        (oid::CE_CRL_DISTRIBUTION_POINTS, validate_crl_distribution_points),
    ];

    #[test]
    fn basic_constraints_truth_table() {
        let registry = ValidatorRegistry::new();
        let ca = Profile::new_ca(registry.clone());
        let leaf = Profile::new_leaf(registry);
        let ca_ext = BasicConstraints::new(true, Some(0)).to_extension(true);
        let ee_ext = BasicConstraints::new(false, None).to_extension(true);

        assert!(validate_basic_constraints(&ca_ext, &ca).unwrap());
        assert!(!validate_basic_constraints(&ca_ext, &leaf).unwrap());
        assert!(!validate_basic_constraints(&ee_ext, &ca).unwrap());
        assert!(!validate_basic_constraints(&ee_ext, &leaf).unwrap());
    }

    #[test]
    fn malformed_basic_constraints() {
        let ca = Profile::new_ca(ValidatorRegistry::new());
        let leaf = Profile::new_leaf(ValidatorRegistry::new());

        // An INTEGER instead of a SEQUENCE.
        let ext = Extension::from_const(
            &oid::CE_BASIC_CONSTRAINTS, true,
            Bytes::from_static(b"\x02\x01\x00")
        );
        let err = validate_basic_constraints(&ext, &ca).unwrap_err();
        assert_eq!(err.oid().unwrap(), &oid::CE_BASIC_CONSTRAINTS);
        assert!(!err.is_missing_value());
        assert!(validate_basic_constraints(&ext, &leaf).is_err());

        let ext = Extension::without_value(
            const_oid(&oid::CE_BASIC_CONSTRAINTS), true
        );
        assert!(
            validate_basic_constraints(&ext, &ca).unwrap_err()
                .is_missing_value()
        );
    }

    #[test]
    fn placeholders_accept_everything() {
        let ca = Profile::new_ca(ValidatorRegistry::new());
        let leaf = Profile::new_leaf(ValidatorRegistry::new());
        for (oid, op) in PLACEHOLDERS.iter() {
            let oid = const_oid(oid);
            let exts = [
                Extension::new(
                    oid.clone(), false, Bytes::from_static(b"\x02\x01\x05")
                ),
                Extension::new(oid.clone(), true, Bytes::new()),
                Extension::new(oid.clone(), false, Bytes::from_static(b"\xff")),
                Extension::without_value(oid, true),
            ];
            for ext in exts.iter() {
                assert!(op(ext, &ca).unwrap());
                assert!(op(ext, &leaf).unwrap());
            }
        }
    }

    #[test]
    fn key_usage() {
        let ca = Profile::new_ca(ValidatorRegistry::new());
        let usage = ca.key_usage();
        assert_eq!(usage, KEY_USAGE);
        assert!(usage.contains(KeyUsage::DIGITAL_SIGNATURE));
        assert!(usage.contains(KeyUsage::KEY_ENCIPHERMENT));
        assert!(usage.contains(KeyUsage::DATA_ENCIPHERMENT));
        assert!(usage.contains(KeyUsage::KEY_AGREEMENT));
        assert!(usage.contains(KeyUsage::CRL_SIGN));
        assert!(usage.contains(KeyUsage::KEY_CERT_SIGN));
        assert!(!usage.contains(KeyUsage::NON_REPUDIATION));
        assert!(!usage.contains(KeyUsage::ENCIPHER_ONLY));
        assert!(!usage.contains(KeyUsage::DECIPHER_ONLY));
        assert_eq!(usage.bits(), 0x007D);

        // Asking twice gives the same answer.
        assert_eq!(ca.key_usage(), ca.key_usage());
    }

    #[test]
    fn registration_is_idempotent() {
        let registry = ValidatorRegistry::new();
        let first = Profile::new_ca(registry.clone());
        let before = first.extension_validators()
            .lookup(&oid::CE_BASIC_CONSTRAINTS).unwrap();
        let len = registry.len();

        let second = Profile::new_ca(registry.clone());
        let after = second.extension_validators()
            .lookup(&oid::CE_BASIC_CONSTRAINTS).unwrap();
        assert!(before.ptr_eq(&after));
        assert_eq!(registry.len(), len);

        // A leaf profile on the same registry sees the CA validator.
        let leaf = Profile::new_leaf(registry.clone());
        assert!(leaf.is_supported_extension(&oid::CE_BASIC_CONSTRAINTS));
        assert_eq!(registry.len(), len);
    }

    #[test]
    fn existing_validator_is_kept() {
        let registry = ValidatorRegistry::new();
        registry.register_if_absent(
            &oid::CE_BASIC_CONSTRAINTS,
            crate::registry::Validator::new("reject", |_, _| Ok(false))
        );
        let ca = Profile::new_ca(registry);
        let ext = BasicConstraints::new(true, None).to_extension(true);
        assert!(!ca.validate_extension(&ext).unwrap());
        assert_eq!(
            ca.extension_validators()
                .lookup(&oid::CE_BASIC_CONSTRAINTS).unwrap().name(),
            "reject"
        );
    }

    #[test]
    fn placeholder_registration() {
        let ca = Profile::new_ca(ValidatorRegistry::new());
        for (oid, _) in PLACEHOLDERS.iter() {
            assert!(!ca.is_supported_extension(oid));
        }

        let registry = ValidatorRegistry::new();
        let ca = Profile::with_config(
            ProfileKind::Ca, registry.clone(),
            ProfileConfig { crl_placeholders: true }
        );
        for (oid, _) in PLACEHOLDERS.iter() {
            assert!(ca.is_supported_extension(oid));
        }
        assert_eq!(ca.supported_extensions().len(), 11);

        // Leaf profiles never install them but see them once installed.
        let leaf = Profile::with_config(
            ProfileKind::Leaf, ValidatorRegistry::new(),
            ProfileConfig { crl_placeholders: true }
        );
        assert!(!leaf.is_supported_extension(&oid::CE_CRL_NUMBER));
        let leaf = Profile::new_leaf(registry);
        assert!(leaf.is_supported_extension(&oid::CE_CRL_NUMBER));
    }
}

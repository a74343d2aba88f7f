//! The object identifiers used in this crate.
//!
//! This module collects all the object indentifiers used at various places
//! in this crate in one central place. They are public so you can refer to
//! them should that ever become necessary.

use bcder::{ConstOid, Oid};


//------------ Certificate Extensions ----------------------------------------

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-subjectKeyIdentifier`
pub const CE_SUBJECT_KEY_IDENTIFIER: ConstOid = Oid(&[85, 29, 14]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-keyUsage`
pub const CE_KEY_USAGE: ConstOid = Oid(&[85, 29, 15]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-subjectAltName`
pub const CE_SUBJECT_ALT_NAME: ConstOid = Oid(&[85, 29, 17]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-basicConstraints`
pub const CE_BASIC_CONSTRAINTS: ConstOid = Oid(&[85, 29, 19]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-cRLNumber`
pub const CE_CRL_NUMBER: ConstOid = Oid(&[85, 29, 20]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-cRLReasons`
pub const CE_CRL_REASONS: ConstOid = Oid(&[85, 29, 21]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-deltaCRLIndicator`
pub const CE_DELTA_CRL_INDICATOR: ConstOid = Oid(&[85, 29, 27]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-nameConstraints`
pub const CE_NAME_CONSTRAINTS: ConstOid = Oid(&[85, 29, 30]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280)
/// `id-ce-cRLDistributionPoints`
pub const CE_CRL_DISTRIBUTION_POINTS: ConstOid = Oid(&[85, 29, 31]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280)
/// `id-ce-authorityKeyIdentifier`
pub const CE_AUTHORITY_KEY_IDENTIFIER: ConstOid = Oid(&[85, 29, 35]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-ce-extKeyUsage`
pub const CE_EXTENDED_KEY_USAGE: ConstOid = Oid(&[85, 29, 37]);

/// [RFC 3709](https://tools.ietf.org/html/rfc3709) `id-pe-logotype`
pub const PE_LOGOTYPE: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 1, 12]);


//------------ Key Purposes --------------------------------------------------

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-kp-serverAuth`
pub const KP_SERVER_AUTH: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 1]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-kp-clientAuth`
pub const KP_CLIENT_AUTH: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 2]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-kp-codeSigning`
pub const KP_CODE_SIGNING: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 3]);

/// [RFC 5280](https://tools.ietf.org/html/rfc5280) `id-kp-emailProtection`
pub const KP_EMAIL_PROTECTION: ConstOid = Oid(&[43, 6, 1, 5, 5, 7, 3, 4]);


//============ Tests =========================================================

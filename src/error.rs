//! Error handling for extension validation and issuance checks.
//!
//! There are two different classes of failure. A [`ParseError`] means the
//! payload of an extension could not be decoded into what its validator
//! expects. A [`PolicyRejection`] means that everything was well formed but
//! the active profile does not accept the extension. The issuance check
//! reports either as an [`IssuanceError`].

use std::{error, fmt};
use std::convert::Infallible;
use bcder::Oid;
use bcder::decode::DecodeError;
use bytes::Bytes;


//------------ ParseError ----------------------------------------------------

/// The payload of an extension could not be decoded.
#[derive(Debug)]
pub struct ParseError {
    /// The extension that failed.
    ///
    /// This is `None` if the list of extensions itself was malformed.
    oid: Option<Oid<Bytes>>,
    kind: ParseErrorKind,
}

#[derive(Debug)]
enum ParseErrorKind {
    Decoding(DecodeError<Infallible>),
    MissingValue,
}

impl ParseError {
    /// Creates an error from a failed decoding attempt.
    pub fn decoding(oid: Oid<Bytes>, err: DecodeError<Infallible>) -> Self {
        ParseError { oid: Some(oid), kind: ParseErrorKind::Decoding(err) }
    }

    /// Creates an error for a malformed sequence of extensions.
    pub fn extensions(err: DecodeError<Infallible>) -> Self {
        ParseError { oid: None, kind: ParseErrorKind::Decoding(err) }
    }

    /// Creates an error for an extension that carries no value at all.
    pub fn missing_value(oid: Oid<Bytes>) -> Self {
        ParseError { oid: Some(oid), kind: ParseErrorKind::MissingValue }
    }

    /// Returns the identifier of the extension that failed to parse.
    pub fn oid(&self) -> Option<&Oid<Bytes>> {
        self.oid.as_ref()
    }

    /// Returns whether the extension value was absent.
    pub fn is_missing_value(&self) -> bool {
        matches!(self.kind, ParseErrorKind::MissingValue)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.oid.as_ref(), &self.kind) {
            (Some(oid), ParseErrorKind::Decoding(inner)) => {
                write!(f, "malformed extension {}: {}", oid, inner)
            }
            (None, ParseErrorKind::Decoding(inner)) => {
                write!(f, "malformed extensions: {}", inner)
            }
            (Some(oid), ParseErrorKind::MissingValue) => {
                write!(f, "missing value in extension {}", oid)
            }
            (None, ParseErrorKind::MissingValue) => {
                f.write_str("missing extension value")
            }
        }
    }
}

impl error::Error for ParseError { }


//------------ PolicyRejection -----------------------------------------------

/// An extension was not accepted by the active profile.
#[derive(Clone, Debug)]
pub struct PolicyRejection {
    oid: Oid<Bytes>,
    reason: RejectReason,
}

/// The reason an extension was rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RejectReason {
    /// There is no validator for the extension in the profile.
    Unsupported,

    /// The validator for the extension returned `false`.
    Disallowed,
}

impl PolicyRejection {
    pub fn unsupported(oid: Oid<Bytes>) -> Self {
        PolicyRejection { oid, reason: RejectReason::Unsupported }
    }

    pub fn disallowed(oid: Oid<Bytes>) -> Self {
        PolicyRejection { oid, reason: RejectReason::Disallowed }
    }

    pub fn oid(&self) -> &Oid<Bytes> {
        &self.oid
    }

    pub fn reason(&self) -> RejectReason {
        self.reason
    }
}

impl fmt::Display for PolicyRejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.reason {
            RejectReason::Unsupported => {
                write!(f, "unsupported extension {}", self.oid)
            }
            RejectReason::Disallowed => {
                write!(f, "extension {} not permitted by profile", self.oid)
            }
        }
    }
}

impl error::Error for PolicyRejection { }


//------------ IssuanceError -------------------------------------------------

/// The extensions of a candidate certificate were not accepted.
#[derive(Debug)]
pub enum IssuanceError {
    /// An extension could not be decoded.
    Malformed(ParseError),

    /// An extension was rejected by the profile.
    Rejected(PolicyRejection),
}

impl IssuanceError {
    /// Returns whether this is a plain policy rejection.
    pub fn is_rejection(&self) -> bool {
        matches!(*self, IssuanceError::Rejected(_))
    }

    /// Returns the identifier of the offending extension if known.
    pub fn oid(&self) -> Option<&Oid<Bytes>> {
        match *self {
            IssuanceError::Malformed(ref err) => err.oid(),
            IssuanceError::Rejected(ref err) => Some(err.oid()),
        }
    }
}

impl From<ParseError> for IssuanceError {
    fn from(err: ParseError) -> IssuanceError {
        IssuanceError::Malformed(err)
    }
}

impl From<PolicyRejection> for IssuanceError {
    fn from(err: PolicyRejection) -> IssuanceError {
        IssuanceError::Rejected(err)
    }
}

impl fmt::Display for IssuanceError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            IssuanceError::Malformed(ref inner) => inner.fmt(f),
            IssuanceError::Rejected(ref inner) => inner.fmt(f),
        }
    }
}

impl error::Error for IssuanceError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            IssuanceError::Malformed(ref inner) => Some(inner),
            IssuanceError::Rejected(ref inner) => Some(inner),
        }
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::oid;

    fn basic_constraints() -> Oid<Bytes> {
        Oid(Bytes::from_static(oid::CE_BASIC_CONSTRAINTS.0))
    }

    #[test]
    fn display() {
        assert_eq!(
            ParseError::missing_value(basic_constraints()).to_string(),
            "missing value in extension 2.5.29.19"
        );
        assert_eq!(
            PolicyRejection::unsupported(basic_constraints()).to_string(),
            "unsupported extension 2.5.29.19"
        );
        assert_eq!(
            IssuanceError::from(
                PolicyRejection::disallowed(basic_constraints())
            ).to_string(),
            "extension 2.5.29.19 not permitted by profile"
        );
    }

    #[test]
    fn classification() {
        let err = IssuanceError::from(
            ParseError::missing_value(basic_constraints())
        );
        assert!(!err.is_rejection());
        assert_eq!(err.oid().unwrap(), &oid::CE_BASIC_CONSTRAINTS);

        let err = IssuanceError::from(
            PolicyRejection::unsupported(basic_constraints())
        );
        assert!(err.is_rejection());
    }
}

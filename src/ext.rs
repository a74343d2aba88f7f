//! Typed payloads of the extensions the profiles look into.
//!
//! Each type can be decoded from the DER content of an extension value and
//! encoded again so that extensions can be produced for requests and tests.

use bcder::{decode, encode};
use bcder::{Ia5String, Mode, OctetString, Oid, Tag};
use bcder::decode::{DecodeError, IntoSource, Source};
use bcder::encode::PrimitiveContent;
use bytes::Bytes;
use crate::error::ParseError;
use crate::extension::Extension;
use crate::oid;


//------------ BasicConstraints ----------------------------------------------

/// The Basic Constraints extension.
///
/// ```text
/// BasicConstraints        ::= SEQUENCE {
///     cA                      BOOLEAN DEFAULT FALSE,
///     pathLenConstraint       INTEGER (0..MAX) OPTIONAL
/// }
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BasicConstraints {
    ca: bool,
    path_len: Option<u64>,
}

impl BasicConstraints {
    pub fn new(ca: bool, path_len: Option<u64>) -> Self {
        BasicConstraints { ca, path_len }
    }

    /// Returns whether the subject is a certificate authority.
    pub fn is_ca(self) -> bool {
        self.ca
    }

    pub fn path_len(self) -> Option<u64> {
        self.path_len
    }

    /// Decodes the payload of a Basic Constraints extension.
    pub fn from_extension(ext: &Extension) -> Result<Self, ParseError> {
        ext.decode_value(Self::take_from)
    }

    pub fn decode<S: IntoSource>(
        source: S
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            Ok(BasicConstraints {
                ca: cons.take_opt_bool()?.unwrap_or(false),
                path_len: cons.take_opt_u64()?,
            })
        })
    }

    /// Returns a value encoder.
    ///
    /// A false cA is left out since it is the default.
    pub fn encode(self) -> impl encode::Values {
        encode::sequence((
            if self.ca { Some(true.encode()) } else { None },
            self.path_len.map(|len| len.encode()),
        ))
    }

    /// Returns a Basic Constraints extension carrying this value.
    pub fn to_extension(self, critical: bool) -> Extension {
        Extension::from_values(
            &oid::CE_BASIC_CONSTRAINTS, critical, self.encode()
        )
    }
}


//------------ ExtendedKeyUsage ----------------------------------------------

/// The Extended Key Usage extension.
///
/// ```text
/// ExtKeyUsageSyntax ::= SEQUENCE SIZE (1..MAX) OF KeyPurposeId
/// KeyPurposeId ::= OBJECT IDENTIFIER
/// ```
#[derive(Clone, Debug)]
pub struct ExtendedKeyUsage {
    purposes: Vec<Oid<Bytes>>,
}

impl ExtendedKeyUsage {
    /// Creates a value from a list of key purposes.
    pub fn new(purposes: Vec<Oid<Bytes>>) -> Self {
        ExtendedKeyUsage { purposes }
    }

    pub fn purposes(&self) -> &[Oid<Bytes>] {
        &self.purposes
    }

    pub fn from_extension(ext: &Extension) -> Result<Self, ParseError> {
        ext.decode_value(Self::take_from)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let mut purposes = Vec::new();
            while let Some(oid) = Oid::take_opt_from(cons)? {
                purposes.push(oid);
            }
            if purposes.is_empty() {
                Err(cons.content_err("empty Extended Key Usage extension"))
            }
            else {
                Ok(ExtendedKeyUsage { purposes })
            }
        })
    }

    pub fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence(
            encode::iter(self.purposes.iter().map(|oid| oid.encode_ref()))
        )
    }

    pub fn to_extension(&self, critical: bool) -> Extension {
        Extension::from_values(
            &oid::CE_EXTENDED_KEY_USAGE, critical, self.encode_ref()
        )
    }
}


//------------ SubjectAltName ------------------------------------------------

/// The Subject Alternative Name extension.
///
/// ```text
/// SubjectAltName ::= GeneralNames
///
/// GeneralNames ::= SEQUENCE SIZE (1..MAX) OF GeneralName
/// ```
#[derive(Clone, Debug)]
pub struct SubjectAltName {
    names: Vec<GeneralName>,
}

impl SubjectAltName {
    /// Creates a value from a list of names.
    ///
    /// Returns `None` if the list is empty or contains names other than
    /// DNS names and IP addresses since those can’t be encoded.
    pub fn new(names: Vec<GeneralName>) -> Option<Self> {
        if names.is_empty() || names.iter().any(|name| {
            matches!(*name, GeneralName::Other(_))
        }) {
            None
        }
        else {
            Some(SubjectAltName { names })
        }
    }

    pub fn names(&self) -> &[GeneralName] {
        &self.names
    }

    pub fn from_extension(ext: &Extension) -> Result<Self, ParseError> {
        ext.decode_value(Self::take_from)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let mut names = Vec::new();
            while let Some(name) = GeneralName::take_opt_from(cons)? {
                names.push(name);
            }
            if names.is_empty() {
                Err(cons.content_err("empty Subject Alternative Name"))
            }
            else {
                Ok(SubjectAltName { names })
            }
        })
    }

    /// Returns a value encoder.
    ///
    /// Names of kinds we only skip over when decoding can’t be encoded
    /// and are left out. Such values only result from decoding.
    pub fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence(
            encode::iter(self.names.iter().map(|name| name.encode()))
        )
    }

    pub fn to_extension(&self, critical: bool) -> Extension {
        Extension::from_values(
            &oid::CE_SUBJECT_ALT_NAME, critical, self.encode_ref()
        )
    }
}


//------------ GeneralName ---------------------------------------------------

/// A single general name.
///
/// ```text
/// GeneralName ::= CHOICE {
///      otherName                       [0]     OtherName,
///      rfc822Name                      [1]     IA5String,
///      dNSName                         [2]     IA5String,
///      x400Address                     [3]     ORAddress,
///      directoryName                   [4]     Name,
///      ediPartyName                    [5]     EDIPartyName,
///      uniformResourceIdentifier       [6]     IA5String,
///      iPAddress                       [7]     OCTET STRING,
///      registeredID                    [8]     OBJECT IDENTIFIER }
/// ```
///
/// Only DNS names and IP addresses are kept, everything else is skipped
/// and remembered by its tag only.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GeneralName {
    /// A `dNSName`. The content hasn’t been checked for being a host name.
    DnsName(Bytes),

    /// An `iPAddress`. The content hasn’t been checked for its length.
    IpAddress(Bytes),

    /// Any other kind of name.
    Other(Tag),
}

impl GeneralName {
    /// Returns the tag of a `dNSName`.
    pub fn dns_name_tag() -> Tag {
        Tag::ctx(2)
    }

    /// Returns the tag of an `iPAddress`.
    pub fn ip_address_tag() -> Tag {
        Tag::ctx(7)
    }

    /// Returns the context tag of the name.
    pub fn tag(&self) -> Tag {
        match *self {
            GeneralName::DnsName(_) => Self::dns_name_tag(),
            GeneralName::IpAddress(_) => Self::ip_address_tag(),
            GeneralName::Other(tag) => tag,
        }
    }

    pub fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        cons.take_opt_value(|tag, content| {
            if tag == Self::dns_name_tag() {
                Ia5String::from_content(content).map(|name| {
                    GeneralName::DnsName(name.into_bytes())
                })
            }
            else if tag == Self::ip_address_tag() {
                OctetString::from_content(content).map(|addr| {
                    GeneralName::IpAddress(addr.into_bytes())
                })
            }
            else {
                match *content {
                    decode::Content::Primitive(ref mut inner) => {
                        inner.skip_all()?
                    }
                    decode::Content::Constructed(ref mut inner) => {
                        inner.skip_all()?
                    }
                }
                Ok(GeneralName::Other(tag))
            }
        })
    }

    /// Returns a value encoder for DNS names and IP addresses.
    fn encode(&self) -> Option<impl encode::Values> {
        match *self {
            GeneralName::DnsName(ref name) => {
                Some(
                    OctetString::new(name.clone())
                        .encode_as(Self::dns_name_tag())
                )
            }
            GeneralName::IpAddress(ref addr) => {
                Some(
                    OctetString::new(addr.clone())
                        .encode_as(Self::ip_address_tag())
                )
            }
            GeneralName::Other(_) => None
        }
    }
}


//============ Tests =========================================================

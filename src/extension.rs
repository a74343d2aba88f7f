//! Certificate extensions.
//!
//! An extension is described in [RFC 5280] as
//!
//! ```text
//! Extension  ::=  SEQUENCE  {
//!      extnID      OBJECT IDENTIFIER,
//!      critical    BOOLEAN DEFAULT FALSE,
//!      extnValue   OCTET STRING
//!                  -- contains the DER encoding of an ASN.1 value
//!                  -- corresponding to the extension type identified
//!                  -- by extnID
//!      }
//! ```
//!
//! The types here only split an extension into its identifier, the
//! critical flag, and the raw payload. Decoding the payload is left to
//! whoever knows what to expect, which usually is the validator registered
//! for the identifier.
//!
//! [RFC 5280]: https://tools.ietf.org/html/rfc5280

use std::{ops, slice};
use std::convert::Infallible;
use bcder::{decode, encode};
use bcder::{Mode, OctetString, Oid};
use bcder::decode::{DecodeError, IntoSource, Source};
use bcder::encode::{PrimitiveContent, Values};
use bytes::Bytes;
use crate::error::ParseError;


//------------ Extension -----------------------------------------------------

/// A single certificate extension.
#[derive(Clone, Debug)]
pub struct Extension {
    /// The identifier of the extension.
    oid: Oid<Bytes>,

    /// Whether the extension was marked critical.
    critical: bool,

    /// The content of the extnValue octet string.
    ///
    /// This is `None` if the extension was created without a value. Such
    /// values never result from decoding.
    value: Option<Bytes>,
}

impl Extension {
    /// Creates a new extension from its components.
    pub fn new(oid: Oid<Bytes>, critical: bool, value: Bytes) -> Self {
        Extension { oid, critical, value: Some(value) }
    }

    /// Creates an extension that has no value at all.
    pub fn without_value(oid: Oid<Bytes>, critical: bool) -> Self {
        Extension { oid, critical, value: None }
    }

    /// Creates a new extension with a constant identifier.
    pub fn from_const<T: AsRef<[u8]>>(
        oid: &'static Oid<T>, critical: bool, value: Bytes
    ) -> Self {
        Self::new(const_oid(oid), critical, value)
    }

    /// Creates a new extension from a value encoder for its payload.
    pub fn from_values<T: AsRef<[u8]>>(
        oid: &'static Oid<T>, critical: bool, values: impl encode::Values
    ) -> Self {
        Self::from_const(
            oid, critical, values.to_captured(Mode::Der).into_bytes()
        )
    }

    pub fn oid(&self) -> &Oid<Bytes> {
        &self.oid
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    /// Returns the raw DER payload if there is one.
    pub fn value(&self) -> Option<&Bytes> {
        self.value.as_ref()
    }

    /// Decodes the payload.
    ///
    /// The closure receives the DER content of the extension value and has
    /// to consume all of it. A missing value or any decoding error results
    /// in a [`ParseError`] for this extension.
    pub fn decode_value<F, T>(&self, op: F) -> Result<T, ParseError>
    where
        F: FnOnce(
            &mut decode::Constructed<<Bytes as IntoSource>::Source>
        ) -> Result<T, DecodeError<Infallible>>
    {
        let value = match self.value {
            Some(ref value) => value.clone(),
            None => return Err(ParseError::missing_value(self.oid.clone()))
        };
        Mode::Der.decode(value, op).map_err(|err| {
            ParseError::decoding(self.oid.clone(), err)
        })
    }
}

/// # Decoding and Encoding
///
impl Extension {
    pub fn decode<S: IntoSource>(
        source: S
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(Self::from_constructed)
    }

    pub fn take_opt_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Option<Self>, DecodeError<S::Error>> {
        cons.take_opt_sequence(Self::from_constructed)
    }

    fn from_constructed<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let oid = Oid::take_from(cons)?;
        let critical = cons.take_opt_bool()?.unwrap_or(false);
        let value = OctetString::take_from(cons)?;
        Ok(Extension {
            oid, critical, value: Some(value.into_bytes())
        })
    }

    /// Returns a value encoder for a reference to the extension.
    ///
    /// An extension without a value is encoded with an empty extnValue.
    pub fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence((
            self.oid.encode_ref(),
            if self.critical {
                Some(self.critical.encode())
            }
            else {
                None
            },
            OctetString::new(
                self.value.clone().unwrap_or_default()
            ).encode()
        ))
    }
}


//------------ Extensions ----------------------------------------------------

/// The extensions of a certificate or certification request.
///
/// ```text
/// Extensions  ::=  SEQUENCE SIZE (1..MAX) OF Extension
/// ```
///
/// Each identifier may appear only once.
#[derive(Clone, Debug, Default)]
pub struct Extensions(Vec<Extension>);

impl Extensions {
    /// Creates a list from extensions, refusing duplicate identifiers.
    ///
    /// Returns the first duplicate extension as the error.
    pub fn from_vec(exts: Vec<Extension>) -> Result<Self, Extension> {
        for (idx, ext) in exts.iter().enumerate() {
            if exts[..idx].iter().any(|other| other.oid == ext.oid) {
                return Err(ext.clone())
            }
        }
        Ok(Extensions(exts))
    }

    /// Returns the extension with the given identifier if present.
    pub fn get<T: AsRef<[u8]>>(&self, oid: &Oid<T>) -> Option<&Extension> {
        self.0.iter().find(|ext| &ext.oid == oid)
    }

    pub fn iter(&self) -> slice::Iter<'_, Extension> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Extension> {
        self.0
    }
}

/// # Decoding and Encoding
///
impl Extensions {
    pub fn decode<S: IntoSource>(
        source: S
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        cons.take_sequence(|cons| {
            let mut res: Vec<Extension> = Vec::new();
            while let Some(ext) = Extension::take_opt_from(cons)? {
                if res.iter().any(|other| other.oid == ext.oid) {
                    return Err(cons.content_err("duplicate extension"))
                }
                res.push(ext);
            }
            if res.is_empty() {
                return Err(cons.content_err("empty extensions"))
            }
            Ok(Extensions(res))
        })
    }

    pub fn encode_ref(&self) -> impl encode::Values + '_ {
        encode::sequence(
            encode::iter(self.0.iter().map(|ext| ext.encode_ref()))
        )
    }

    pub fn to_bytes(&self) -> Bytes {
        self.encode_ref().to_captured(Mode::Der).into_bytes()
    }
}


//--- Deref and IntoIterator

impl ops::Deref for Extensions {
    type Target = [Extension];

    fn deref(&self) -> &[Extension] {
        self.0.as_ref()
    }
}

impl<'a> IntoIterator for &'a Extensions {
    type Item = &'a Extension;
    type IntoIter = slice::Iter<'a, Extension>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}


//------------ Helpers -------------------------------------------------------

/// Converts a constant object identifier into an owned one.
pub(crate) fn const_oid<T: AsRef<[u8]>>(oid: &'static Oid<T>) -> Oid<Bytes> {
    Oid(Bytes::copy_from_slice(oid.0.as_ref()))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::oid;

    fn raw(values: impl encode::Values) -> Bytes {
        values.to_captured(Mode::Der).into_bytes()
    }

    #[test]
    fn decode_extension() {
        // basicConstraints, critical, cA TRUE.
        let der = raw(encode::sequence((
            oid::CE_BASIC_CONSTRAINTS.encode(),
            true.encode(),
            OctetString::new(raw(encode::sequence(true.encode()))).encode()
        )));
        let ext = Extension::decode(der).unwrap();
        assert_eq!(ext.oid(), &oid::CE_BASIC_CONSTRAINTS);
        assert!(ext.is_critical());
        assert_eq!(
            ext.value().unwrap().as_ref(), b"\x30\x03\x01\x01\xff"
        );

        // Criticality defaults to false.
        let der = raw(encode::sequence((
            oid::CE_CRL_NUMBER.encode(),
            OctetString::new(Bytes::from_static(b"\x02\x01\x05")).encode()
        )));
        let ext = Extension::decode(der).unwrap();
        assert!(!ext.is_critical());
    }

    #[test]
    fn encode_round_trip() {
        let ext = Extension::from_const(
            &oid::CE_NAME_CONSTRAINTS, true,
            Bytes::from_static(b"\x30\x00")
        );
        let decoded = Extension::decode(
            ext.encode_ref().to_captured(Mode::Der).into_bytes()
        ).unwrap();
        assert_eq!(decoded.oid(), ext.oid());
        assert_eq!(decoded.is_critical(), ext.is_critical());
        assert_eq!(decoded.value(), ext.value());
    }

    #[test]
    fn decode_extensions() {
        let exts = Extensions::from_vec(vec![
            Extension::from_const(
                &oid::CE_CRL_NUMBER, false, Bytes::from_static(b"\x02\x01\x05")
            ),
            Extension::from_const(
                &oid::CE_BASIC_CONSTRAINTS, true,
                Bytes::from_static(b"\x30\x03\x01\x01\xff")
            ),
        ]).unwrap();
        let decoded = Extensions::decode(exts.to_bytes()).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(decoded.get(&oid::CE_BASIC_CONSTRAINTS).is_some());
        assert!(decoded.get(&oid::CE_KEY_USAGE).is_none());
    }

    #[test]
    fn reject_duplicates() {
        let ext = Extension::from_const(
            &oid::CE_CRL_NUMBER, false, Bytes::from_static(b"\x02\x01\x05")
        );
        assert!(
            Extensions::from_vec(vec![ext.clone(), ext.clone()]).is_err()
        );

        let der = raw(encode::sequence((
            ext.encode_ref(), ext.encode_ref()
        )));
        assert!(Extensions::decode(der).is_err());
    }

    #[test]
    fn reject_empty() {
        assert!(Extensions::decode(b"\x30\x00".as_ref()).is_err());
    }

    #[test]
    fn decode_value() {
        let ext = Extension::from_const(
            &oid::CE_BASIC_CONSTRAINTS, true,
            Bytes::from_static(b"\x30\x03\x01\x01\xff")
        );
        let ca = ext.decode_value(|cons| {
            cons.take_sequence(|cons| cons.take_bool())
        }).unwrap();
        assert!(ca);

        let err = Extension::without_value(
            const_oid(&oid::CE_BASIC_CONSTRAINTS), true
        ).decode_value(|cons| cons.take_bool()).unwrap_err();
        assert!(err.is_missing_value());

        let err = ext.decode_value(|cons| cons.take_bool()).unwrap_err();
        assert!(!err.is_missing_value());
    }
}

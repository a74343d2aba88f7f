//! The Key Usage extension.
//!
//! ```text
//! KeyUsage ::= BIT STRING {
//!      digitalSignature        (0),
//!      nonRepudiation          (1),
//!      keyEncipherment         (2),
//!      dataEncipherment        (3),
//!      keyAgreement            (4),
//!      keyCertSign             (5),
//!      cRLSign                 (6),
//!      encipherOnly            (7),
//!      decipherOnly            (8) }
//! ```

use std::{fmt, ops};
use bcder::{decode, encode};
use bcder::{BitString, Mode};
use bcder::decode::{DecodeError, IntoSource, Source};
use bcder::encode::PrimitiveContent;
use bytes::Bytes;
use crate::error::ParseError;
use crate::extension::Extension;
use crate::oid;


//------------ KeyUsage ------------------------------------------------------

/// The names of the bits in bit order.
static NAMES: [&str; 9] = [
    "digitalSignature", "nonRepudiation", "keyEncipherment",
    "dataEncipherment", "keyAgreement", "keyCertSign", "cRLSign",
    "encipherOnly", "decipherOnly",
];

/// A set of key usage flags.
///
/// Bit _n_ of the named bit list in RFC 5280 is kept as `1 << n`, so the
/// value fits into a `u16` with room to spare.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
#[cfg_attr(
    feature = "serde", derive(serde::Serialize, serde::Deserialize)
)]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KeyUsage(u16);

impl KeyUsage {
    pub const DIGITAL_SIGNATURE: KeyUsage = KeyUsage(1 << 0);
    pub const NON_REPUDIATION: KeyUsage = KeyUsage(1 << 1);
    pub const KEY_ENCIPHERMENT: KeyUsage = KeyUsage(1 << 2);
    pub const DATA_ENCIPHERMENT: KeyUsage = KeyUsage(1 << 3);
    pub const KEY_AGREEMENT: KeyUsage = KeyUsage(1 << 4);
    pub const KEY_CERT_SIGN: KeyUsage = KeyUsage(1 << 5);
    pub const CRL_SIGN: KeyUsage = KeyUsage(1 << 6);
    pub const ENCIPHER_ONLY: KeyUsage = KeyUsage(1 << 7);
    pub const DECIPHER_ONLY: KeyUsage = KeyUsage(1 << 8);

    /// The number of named bits.
    const BIT_COUNT: usize = 9;

    /// Returns an empty set.
    pub const fn empty() -> Self {
        KeyUsage(0)
    }

    /// Creates a value from the raw bits.
    ///
    /// Bits beyond `decipherOnly` are dropped.
    pub const fn from_bits(bits: u16) -> Self {
        KeyUsage(bits & ((1 << Self::BIT_COUNT) - 1))
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Returns the union of two sets.
    pub const fn union(self, other: KeyUsage) -> Self {
        KeyUsage(self.0 | other.0)
    }

    /// Returns whether bit `idx` of the named bit list is set.
    pub fn bit(self, idx: usize) -> bool {
        idx < Self::BIT_COUNT && self.0 & (1 << idx) != 0
    }

    /// Returns whether all flags in `other` are set in `self`.
    pub fn contains(self, other: KeyUsage) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns whether all flags set in `self` are also set in `other`.
    pub fn is_subset_of(self, other: KeyUsage) -> bool {
        other.contains(self)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns an iterator over the names of the set flags.
    pub fn names(self) -> impl Iterator<Item = &'static str> {
        NAMES.iter().enumerate().filter_map(move |(idx, name)| {
            if self.bit(idx) { Some(*name) } else { None }
        })
    }
}

/// # Decoding and Encoding
///
impl KeyUsage {
    /// Decodes the value of a Key Usage extension.
    pub fn from_extension(ext: &Extension) -> Result<Self, ParseError> {
        ext.decode_value(Self::take_from)
    }

    pub fn decode<S: IntoSource>(
        source: S
    ) -> Result<Self, DecodeError<<S::Source as Source>::Error>> {
        Mode::Der.decode(source, Self::take_from)
    }

    /// Takes the key usage BIT STRING from the beginning of a value.
    ///
    /// Unknown trailing bits are ignored. A value without any of the named
    /// bits set is rejected since RFC 5280 requires at least one.
    pub fn take_from<S: decode::Source>(
        cons: &mut decode::Constructed<S>
    ) -> Result<Self, DecodeError<S::Error>> {
        let bits = BitString::take_from(cons)?;
        let mut res = 0u16;
        for idx in 0..Self::BIT_COUNT {
            if bits.bit(idx) {
                res |= 1 << idx
            }
        }
        if res == 0 {
            return Err(cons.content_err("empty Key Usage extension"))
        }
        Ok(KeyUsage(res))
    }

    /// Returns a value encoder for the key usage.
    ///
    /// Trailing zero bits are dropped as required by DER.
    pub fn encode(self) -> impl encode::Values {
        let mut octets = [0u8; 2];
        let mut highest = None;
        for idx in 0..Self::BIT_COUNT {
            if self.bit(idx) {
                octets[idx >> 3] |= 0x80 >> (idx & 7);
                highest = Some(idx);
            }
        }
        let bits = match highest {
            Some(idx) => {
                BitString::new(
                    7 - (idx & 7) as u8,
                    Bytes::copy_from_slice(&octets[..(idx >> 3) + 1])
                )
            }
            None => BitString::new(0, Bytes::new()),
        };
        bits.encode()
    }

    /// Returns a Key Usage extension carrying this value.
    pub fn to_extension(self, critical: bool) -> Extension {
        Extension::from_values(
            &oid::CE_KEY_USAGE, critical, self.encode()
        )
    }
}


//--- BitOr and BitOrAssign

impl ops::BitOr for KeyUsage {
    type Output = KeyUsage;

    fn bitor(self, rhs: KeyUsage) -> KeyUsage {
        self.union(rhs)
    }
}

impl ops::BitOrAssign for KeyUsage {
    fn bitor_assign(&mut self, rhs: KeyUsage) {
        self.0 |= rhs.0
    }
}


//--- Debug and Display

impl fmt::Display for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for name in self.names() {
            if first {
                first = false;
            }
            else {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        if first {
            f.write_str("(none)")?;
        }
        Ok(())
    }
}

impl fmt::Debug for KeyUsage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "KeyUsage({})", self)
    }
}


//============ Tests =========================================================

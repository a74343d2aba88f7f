//! Extension validators and the registry that maps identifiers to them.
//!
//! A [`Validator`] decides whether a single kind of extension is acceptable
//! for a profile. The [`ValidatorRegistry`] maps extension identifiers to
//! validators. It is shared between all the profiles of an issuance
//! context: cloning the registry yields another handle to the same map.
//!
//! Entries are only ever added. Registering an identifier a second time is
//! a no-op, so the first registration wins and stays for as long as the
//! registry lives.

use std::{fmt, sync::Arc};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};
use bcder::Oid;
use bytes::Bytes;
use log::debug;
use crate::error::ParseError;
use crate::extension::Extension;
use crate::profile::Profile;


//------------ Validator -----------------------------------------------------

/// The function type of a validator.
pub type ValidatorFn = dyn Fn(&Extension, &Profile) -> Result<bool, ParseError>
    + Send + Sync;

/// A validator for one kind of extension.
///
/// A validator is a pure function of the extension and the profile the
/// certificate is issued under. It returns `Ok(true)` if the extension is
/// acceptable, `Ok(false)` if it isn’t, and an error if the extension’s
/// value can’t be decoded.
///
/// Values are cheap to clone. Clones compare equal via [`ptr_eq`].
///
/// [`ptr_eq`]: #method.ptr_eq
#[derive(Clone)]
pub struct Validator {
    name: &'static str,
    op: Arc<ValidatorFn>,
}

impl Validator {
    /// Creates a new validator from a name and a function.
    ///
    /// The name is only used for diagnostics.
    pub fn new<F>(name: &'static str, op: F) -> Self
    where
        F: Fn(&Extension, &Profile) -> Result<bool, ParseError>
            + Send + Sync + 'static
    {
        Validator { name, op: Arc::new(op) }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Applies the validator to an extension.
    pub fn validate(
        &self, ext: &Extension, profile: &Profile
    ) -> Result<bool, ParseError> {
        (self.op)(ext, profile)
    }

    /// Returns whether both values refer to the same validator.
    pub fn ptr_eq(&self, other: &Validator) -> bool {
        Arc::ptr_eq(&self.op, &other.op)
    }
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}


//------------ ValidatorRegistry ---------------------------------------------

/// A shared map from extension identifiers to validators.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    /// The validators keyed by the content octets of the identifier.
    ///
    /// The map is append-only, so a lock poisoned by a panicking thread
    /// still guards a consistent map and is simply recovered.
    validators: Arc<RwLock<HashMap<Bytes, (Oid<Bytes>, Validator)>>>,
}

impl ValidatorRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Installs a validator unless the identifier is already bound.
    ///
    /// Returns `true` if `validator` was installed by this call and `false`
    /// if there already was a validator for `oid`, in which case the
    /// registry stays unchanged. The check and the insertion happen under
    /// the same lock, so of several concurrent first registrations exactly
    /// one wins.
    pub fn register_if_absent<T: AsRef<[u8]>>(
        &self, oid: &Oid<T>, validator: Validator
    ) -> bool {
        let key = oid.0.as_ref();
        if self.read().contains_key(key) {
            return false
        }
        let mut validators = self.validators.write().unwrap_or_else(
            PoisonError::into_inner
        );
        if validators.contains_key(key) {
            return false
        }
        let oid = Oid(Bytes::copy_from_slice(key));
        debug!("Registering validator '{}' for {}", validator.name, oid);
        validators.insert(oid.0.clone(), (oid, validator));
        true
    }

    /// Returns the validator bound to `oid` if there is one.
    pub fn lookup<T: AsRef<[u8]>>(&self, oid: &Oid<T>) -> Option<Validator> {
        self.read().get(oid.0.as_ref()).map(|item| item.1.clone())
    }

    /// Returns whether there is a validator bound to `oid`.
    pub fn contains<T: AsRef<[u8]>>(&self, oid: &Oid<T>) -> bool {
        self.read().contains_key(oid.0.as_ref())
    }

    /// Returns the number of bound identifiers.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Returns all bound identifiers in the order of their encoding.
    pub fn oids(&self) -> Vec<Oid<Bytes>> {
        let mut res: Vec<_> = self.read().values().map(|item| {
            item.0.clone()
        }).collect();
        res.sort_by(|left, right| left.0.cmp(&right.0));
        res
    }

    /// Returns whether both values are handles to the same registry.
    pub fn ptr_eq(&self, other: &ValidatorRegistry) -> bool {
        Arc::ptr_eq(&self.validators, &other.validators)
    }

    fn read(
        &self
    ) -> RwLockReadGuard<'_, HashMap<Bytes, (Oid<Bytes>, Validator)>> {
        self.validators.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let validators = self.read();
        let mut list = f.debug_map();
        for (oid, validator) in validators.values() {
            list.entry(&format_args!("{}", oid), validator);
        }
        list.finish()
    }
}


//============ Tests =========================================================

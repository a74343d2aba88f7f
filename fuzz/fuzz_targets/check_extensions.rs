#![no_main]

use bytes::Bytes;
use certprofile::{Profile, ProfileConfig, ProfileKind, ValidatorRegistry};
use certprofile::issue::check_der_extensions;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let (which, data) = match data.split_first() {
        Some((first, data)) => (*first, data),
        None => return,
    };

    let kind = if which & 1 == 0 { ProfileKind::Leaf } else { ProfileKind::Ca };
    let config = ProfileConfig { crl_placeholders: which & 2 != 0 };
    let profile = Profile::with_config(
        kind, ValidatorRegistry::new(), config
    );
    let _ = check_der_extensions(&profile, Bytes::copy_from_slice(data));
});

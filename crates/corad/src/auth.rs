//! Two-factor authentication gate
//!
//! Phone number first, then the last 4 characters of the NRIC. Both steps
//! mutate the session record; the derived `is_authenticated` unlocks
//! account-scoped lookups. The gate is deliberately strict about ordering:
//! the NRIC step is meaningless until a directory record is bound to the
//! session via the phone step.

use cora_common::{normalize_mobile, CustomerDirectory};
use tracing::{info, warn};

use crate::session::SessionRecord;

/// Outcome of the phone verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhoneOutcome {
    Verified,
    /// Input did not normalize to a valid local mobile
    InvalidFormat,
    /// Valid format but no matching account
    UnknownNumber,
}

/// Outcome of the NRIC verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NricOutcome {
    Verified,
    /// Phone step not done yet - ordering violation
    PhoneNotVerified,
    /// Input was not exactly 4 characters; does not count as a guess
    InvalidFormat,
    /// Wrong guess, gate still open
    Mismatch { attempts_remaining: u32 },
    /// Wrong guess exhausted the attempt budget; phone binding dropped,
    /// caller restarts from step 1
    GateReset,
}

/// Step 1: verify the caller's phone number against the directory.
///
/// Success binds the canonical mobile to the session and clears the NRIC
/// attempt counter. Re-verifying with a different number rebinds the session
/// and drops the second factor - the claimed identity changed.
pub fn verify_phone(
    record: &mut SessionRecord,
    directory: &CustomerDirectory,
    raw_mobile: &str,
) -> PhoneOutcome {
    let Some(normalized) = normalize_mobile(raw_mobile) else {
        return PhoneOutcome::InvalidFormat;
    };

    let Some(account) = directory.find_by_mobile(&normalized) else {
        warn!("[AUTH] Phone verification failed: no account for that number");
        return PhoneOutcome::UnknownNumber;
    };

    let rebound = record
        .customer_mobile
        .as_deref()
        .is_some_and(|bound| bound != normalized);
    if rebound {
        info!("[AUTH] Session rebound to a different number, NRIC factor dropped");
        record.nric_verified = false;
    }

    record.phone_verified = true;
    record.customer_mobile = Some(normalized);
    record.customer_name = Some(account.name.clone());
    record.failed_nric_attempts = 0;
    PhoneOutcome::Verified
}

/// Step 2: verify the last 4 characters of the NRIC.
///
/// Comparison is case-insensitive against the bound directory record. After
/// `max_attempts` consecutive wrong guesses the gate resets and the phone
/// step must be redone.
pub fn verify_nric(
    record: &mut SessionRecord,
    directory: &CustomerDirectory,
    nric_last4: &str,
    max_attempts: u32,
) -> NricOutcome {
    if !record.phone_verified {
        return NricOutcome::PhoneNotVerified;
    }

    let guess = nric_last4.trim();
    if guess.chars().count() != 4 {
        return NricOutcome::InvalidFormat;
    }

    // A bound mobile without a directory record means the directory changed
    // under us; treat it as an open gate rather than a panic path.
    let Some(account) = record
        .customer_mobile
        .as_deref()
        .and_then(|mobile| directory.find_by_mobile(mobile))
    else {
        warn!("[AUTH] Bound mobile has no directory record, resetting gate");
        reset_gate(record);
        return NricOutcome::PhoneNotVerified;
    };

    if account.nric_last4().eq_ignore_ascii_case(guess) {
        record.nric_verified = true;
        record.failed_nric_attempts = 0;
        info!("[AUTH] Session fully authenticated");
        return NricOutcome::Verified;
    }

    record.failed_nric_attempts += 1;
    if record.failed_nric_attempts >= max_attempts {
        warn!(
            "[AUTH] NRIC attempt budget exhausted ({} guesses), gate reset",
            record.failed_nric_attempts
        );
        reset_gate(record);
        return NricOutcome::GateReset;
    }

    NricOutcome::Mismatch {
        attempts_remaining: max_attempts - record.failed_nric_attempts,
    }
}

fn reset_gate(record: &mut SessionRecord) {
    record.phone_verified = false;
    record.nric_verified = false;
    record.customer_mobile = None;
    record.customer_name = None;
    record.failed_nric_attempts = 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use std::time::Duration;

    const MAX_ATTEMPTS: u32 = 3;

    fn fresh_record() -> SessionRecord {
        let mut store = SessionStore::new(Duration::from_secs(1800));
        let id = store.create();
        store.snapshot(&id).unwrap()
    }

    #[test]
    fn test_happy_path_two_steps() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();

        assert_eq!(verify_phone(&mut record, &dir, "+65 9123 4567"), PhoneOutcome::Verified);
        assert!(record.phone_verified);
        assert!(!record.is_authenticated());
        assert_eq!(record.customer_mobile.as_deref(), Some("91234567"));
        assert_eq!(record.customer_name.as_deref(), Some("Tan Wei Ming"));

        assert_eq!(
            verify_nric(&mut record, &dir, "567d", MAX_ATTEMPTS),
            NricOutcome::Verified
        );
        assert!(record.is_authenticated());
    }

    #[test]
    fn test_nric_before_phone_is_rejected() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();

        assert_eq!(
            verify_nric(&mut record, &dir, "567D", MAX_ATTEMPTS),
            NricOutcome::PhoneNotVerified
        );
        assert!(!record.is_authenticated());
    }

    #[test]
    fn test_unknown_number_leaves_record_unchanged() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();

        assert_eq!(
            verify_phone(&mut record, &dir, "99999999"),
            PhoneOutcome::UnknownNumber
        );
        assert!(!record.phone_verified);
        assert!(record.customer_mobile.is_none());
    }

    #[test]
    fn test_invalid_mobile_format() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();
        assert_eq!(
            verify_phone(&mut record, &dir, "not-a-number"),
            PhoneOutcome::InvalidFormat
        );
    }

    #[test]
    fn test_wrong_nric_counts_down_then_resets_gate() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();
        verify_phone(&mut record, &dir, "91234567");

        assert_eq!(
            verify_nric(&mut record, &dir, "0000", MAX_ATTEMPTS),
            NricOutcome::Mismatch { attempts_remaining: 2 }
        );
        assert_eq!(
            verify_nric(&mut record, &dir, "1111", MAX_ATTEMPTS),
            NricOutcome::Mismatch { attempts_remaining: 1 }
        );
        assert_eq!(
            verify_nric(&mut record, &dir, "2222", MAX_ATTEMPTS),
            NricOutcome::GateReset
        );

        // Back to square one: phone must be redone first
        assert!(!record.phone_verified);
        assert!(record.customer_mobile.is_none());
        assert!(record.customer_name.is_none());
        assert_eq!(
            verify_nric(&mut record, &dir, "567D", MAX_ATTEMPTS),
            NricOutcome::PhoneNotVerified
        );
    }

    #[test]
    fn test_bad_length_guess_is_not_an_attempt() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();
        verify_phone(&mut record, &dir, "91234567");

        assert_eq!(
            verify_nric(&mut record, &dir, "56", MAX_ATTEMPTS),
            NricOutcome::InvalidFormat
        );
        assert_eq!(
            verify_nric(&mut record, &dir, "567DX", MAX_ATTEMPTS),
            NricOutcome::InvalidFormat
        );
        assert_eq!(record.failed_nric_attempts, 0);
    }

    #[test]
    fn test_successful_guess_clears_attempt_counter() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();
        verify_phone(&mut record, &dir, "91234567");

        verify_nric(&mut record, &dir, "0000", MAX_ATTEMPTS);
        assert_eq!(record.failed_nric_attempts, 1);

        assert_eq!(
            verify_nric(&mut record, &dir, "567D", MAX_ATTEMPTS),
            NricOutcome::Verified
        );
        assert_eq!(record.failed_nric_attempts, 0);
    }

    #[test]
    fn test_rebinding_to_new_number_drops_second_factor() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();

        verify_phone(&mut record, &dir, "91234567");
        verify_nric(&mut record, &dir, "567D", MAX_ATTEMPTS);
        assert!(record.is_authenticated());

        // Same caller claims a different identity mid-session
        assert_eq!(verify_phone(&mut record, &dir, "98765432"), PhoneOutcome::Verified);
        assert!(record.phone_verified);
        assert!(!record.nric_verified, "NRIC factor must not survive a rebind");
        assert!(!record.is_authenticated());
        assert_eq!(record.customer_mobile.as_deref(), Some("98765432"));
        assert_eq!(record.customer_name.as_deref(), Some("Nurul Huda"));
    }

    #[test]
    fn test_reverifying_same_number_keeps_second_factor() {
        let dir = CustomerDirectory::sample();
        let mut record = fresh_record();

        verify_phone(&mut record, &dir, "91234567");
        verify_nric(&mut record, &dir, "567D", MAX_ATTEMPTS);

        // Re-stating the same number is idempotent
        assert_eq!(verify_phone(&mut record, &dir, "+6591234567"), PhoneOutcome::Verified);
        assert!(record.is_authenticated());
    }
}

//! Signature-based change detection
//!
//! Two independent fingerprints are tracked: the *data* signature covers
//! inputs whose change requires a remote refetch, the *display* signature
//! covers inputs that only affect local column/label rendering. The two are
//! never conflated; the controller checks the data signature first so a
//! data-relevant change always wins over a simultaneous display-only change.

mod inputs;

pub use inputs::*;

use crate::memo::Memo;

/// A canonical, key-order-stable serialization of a named input subset.
///
/// Signatures are compared by value equality against the signature last
/// *applied* by the controller; the value itself is never inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature(String);

impl Signature {
    /// Builds a signature from ordered key/value pairs.
    ///
    /// Keys are emitted in the order given, which each input type keeps
    /// fixed, so equal subsets always serialize identically.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        let mut out = String::new();
        for (key, value) in pairs {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            // Unit separator keeps adjacent pairs from bleeding into each other.
            out.push('\u{1f}');
        }
        Self(out)
    }

    /// Returns the serialized form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An input subset that can serialize itself into a [`Signature`].
pub trait Fingerprint {
    /// Computes the canonical signature of this input subset.
    fn fingerprint(&self) -> Signature;
}

/// Memoized signature computation over one input subset.
///
/// The recorded input values are compared field-by-field (`PartialEq`) on
/// each call; the signature is recomputed only when some field differs, and
/// returned untouched otherwise.
#[derive(Debug, Default)]
pub struct SignatureTracker<I> {
    memo: Memo<I, Signature>,
}

impl<I: Fingerprint + PartialEq> SignatureTracker<I> {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self { memo: Memo::new() }
    }

    /// Returns the signature for `inputs`, recomputing only on change.
    pub fn current(&mut self, inputs: I) -> &Signature {
        self.memo.get_or_compute(inputs, Fingerprint::fingerprint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Probe {
        a: String,
        b: u32,
    }

    impl Fingerprint for Probe {
        fn fingerprint(&self) -> Signature {
            Signature::from_pairs(&[("a", &self.a), ("b", &self.b.to_string())])
        }
    }

    #[test]
    fn test_stable_for_equal_inputs() {
        let mut tracker = SignatureTracker::new();
        let first = tracker
            .current(Probe {
                a: "x".to_string(),
                b: 1,
            })
            .clone();
        let second = tracker
            .current(Probe {
                a: "x".to_string(),
                b: 1,
            })
            .clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_changes_when_any_field_changes() {
        let mut tracker = SignatureTracker::new();
        let first = tracker
            .current(Probe {
                a: "x".to_string(),
                b: 1,
            })
            .clone();
        let second = tracker
            .current(Probe {
                a: "x".to_string(),
                b: 2,
            })
            .clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_adjacent_pairs_do_not_collide() {
        let one = Signature::from_pairs(&[("a", "xy"), ("b", "z")]);
        let two = Signature::from_pairs(&[("a", "x"), ("b", "yz")]);
        assert_ne!(one, two);
    }
}

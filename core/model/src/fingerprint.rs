//! FILENAME: core/model/src/fingerprint.rs
//! PURPOSE: Content fingerprints used as memoization keys.
//! CONTEXT: A derived value (classified keys, column model, ranked rows) is
//! reused while the fingerprint of its inputs is unchanged.

use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

pub type Fingerprint = u64;

/// Hashes any `Hash` input. Combine several inputs by passing a tuple.
pub fn fingerprint<T: Hash + ?Sized>(value: &T) -> Fingerprint {
    let mut hasher = FxHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, Row, VisConfig};

    #[test]
    fn test_equal_inputs_share_fingerprint() {
        let a = Row::new().with_field("k", FieldValue::new(1.5));
        let b = Row::new().with_field("k", FieldValue::new(1.5));
        assert_eq!(fingerprint(&a), fingerprint(&b));

        let c = Row::new().with_field("k", FieldValue::new(2.5));
        assert_ne!(fingerprint(&a), fingerprint(&c));
    }

    #[test]
    fn test_tuple_inputs() {
        let rows = vec![Row::new().with_field("k", FieldValue::new("x"))];
        let config = VisConfig::from_pairs([("groupByMeasure", "true")]);
        let other = VisConfig::default();
        assert_ne!(fingerprint(&(&rows, &config)), fingerprint(&(&rows, &other)));
    }
}

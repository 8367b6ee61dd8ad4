use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Process-wide interner backing every `AssetId`.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identifier of a placed asset. Internally a `Spur` index: 4 bytes,
/// `Copy`, O(1) `Eq` and `Hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(Spur);

impl AssetId {
    /// Intern a string as an AssetId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        AssetId(INTERNER.get_or_intern(s))
    }

    /// The id for `s` if anything in this process has already interned it.
    /// Use for ids arriving from outside: an unknown string cannot name a
    /// live asset, and looking it up leaves the interner untouched.
    pub fn lookup(s: &str) -> Option<Self> {
        INTERNER.get(s).map(AssetId)
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate a fresh, process-unique ID (`asset_0`, `asset_1`, ...).
    pub fn generate() -> Self {
        Self::with_prefix("asset")
    }

    /// Generate a unique ID with the given prefix.
    pub fn with_prefix(prefix: &str) -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("{prefix}_{n}");
            // Loaded documents may already hold ids in this namespace.
            if INTERNER.get(&candidate).is_none() {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(AssetId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = AssetId::intern("hero_image");
        let b = AssetId::intern("hero_image");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "hero_image");
    }

    #[test]
    fn lookup_never_interns() {
        assert_eq!(AssetId::lookup("never_seen_before_id"), None);
        assert_eq!(AssetId::lookup("never_seen_before_id"), None);
        let known = AssetId::intern("looked_up_id");
        assert_eq!(AssetId::lookup("looked_up_id"), Some(known));
    }

    #[test]
    fn generated_ids_are_unique() {
        let a = AssetId::generate();
        let b = AssetId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("asset_"));
    }

    #[test]
    fn generated_ids_skip_already_interned_names() {
        let taken = AssetId::intern("upload_0");
        let fresh = AssetId::with_prefix("upload");
        assert_ne!(taken, fresh);
    }
}

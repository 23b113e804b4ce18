//! Project identifier generation and format checks

use uuid::{Uuid, Variant};

/// Length of a hyphenated UUID, e.g. `67e55044-10b1-426f-9247-bb680e5fe0c8`
const HYPHENATED_LEN: usize = 36;

/// Generate a fresh random identifier
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse an identifier in canonical hyphenated form.
///
/// Accepts versions 1-5 with the RFC 4122 variant, plus the nil UUID.
/// Hex digits may be upper or lower case. Braced, URN and simple
/// (unhyphenated) forms are rejected.
pub fn parse(value: &str) -> Option<Uuid> {
    if value.len() != HYPHENATED_LEN {
        return None;
    }

    let uuid = Uuid::try_parse(value).ok()?;

    if uuid.is_nil() {
        return Some(uuid);
    }

    let version_ok = matches!(uuid.get_version_num(), 1..=5);
    let variant_ok = uuid.get_variant() == Variant::RFC4122;

    (version_ok && variant_ok).then_some(uuid)
}

/// Whether `value` is a well-formed project identifier
pub fn is_valid(value: &str) -> bool {
    parse(value).is_some()
}

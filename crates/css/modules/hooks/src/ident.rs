//! Hook identifiers and the custom property names derived from them.
//!
//! Every hook owns two custom properties, its toggle pair. At rest `--<id>-0`
//! is guaranteed-invalid and `--<id>-1` is valid but empty; while the hook's
//! condition holds the two swap. A reference `var(--<id>-0, x)` therefore
//! shows `x` exactly while the hook is false, and `var(--<id>-1, x)` shows `x`
//! exactly while it is true.
//!
//! Identifiers must be stable: the same name and condition always map to the
//! same identifier, so independently compiled copies of a configuration agree
//! on the names they reference.

use crate::condition::Condition;

/// Mask keeping the hash within 31 bits so it never renders negative.
const HASH_MASK: u32 = 0x7fff_ffff;

/// Digits used for base-36 rendering.
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Which member of a hook's custom property pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// `--<id>-0`: its fallback shows while the hook is false.
    False,
    /// `--<id>-1`: its fallback shows while the hook is true.
    True,
}

impl Slot {
    const fn suffix(self) -> char {
        match self {
            Self::False => '0',
            Self::True => '1',
        }
    }

    /// Custom property name of this slot for `hook_id`.
    pub fn property(self, hook_id: &str) -> String {
        format!("--{hook_id}-{}", self.suffix())
    }
}

/// Strategy assigning an identifier to each hook.
///
/// Closures `Fn(&str) -> String` act as a strategy that only looks at the hook name.
pub trait IdStrategy {
    /// Identifier for the hook `name`, whose condition is already normalized.
    fn hook_id(&self, name: &str, condition: &Condition) -> String;
}

/// Anonymous identifiers: the hash of the condition alone.
#[derive(Clone, Copy, Debug, Default)]
pub struct HashIds;

impl IdStrategy for HashIds {
    fn hook_id(&self, _name: &str, condition: &Condition) -> String {
        condition_hash(condition)
    }
}

/// Readable identifiers: the sanitized hook name followed by the condition hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugIds;

impl IdStrategy for DebugIds {
    fn hook_id(&self, name: &str, condition: &Condition) -> String {
        format!("{}-{}", sanitize_hook_name(name), condition_hash(condition))
    }
}

impl<F> IdStrategy for F
where
    F: Fn(&str) -> String,
{
    fn hook_id(&self, name: &str, _condition: &Condition) -> String {
        self(name)
    }
}

/// Hash of a condition's canonical JSON form.
pub fn condition_hash(condition: &Condition) -> String {
    string_hash(&condition.to_json_string())
}

/// 31-bit shift-and-subtract string hash rendered in base 36.
///
/// For each UTF-16 code unit `u`: `h = ((h << 5) - h + u) & 0x7fffffff`,
/// starting from zero, with wrapping 32-bit arithmetic.
pub fn string_hash(text: &str) -> String {
    let hash = text.encode_utf16().fold(0_u32, |hash, unit| {
        (hash << 5_u32)
            .wrapping_sub(hash)
            .wrapping_add(u32::from(unit))
            & HASH_MASK
    });
    to_base36(hash)
}

fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        let digit = BASE36_DIGITS
            .get((value % 36) as usize)
            .copied()
            .unwrap_or(b'0');
        digits.push(char::from(digit));
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Replace every UTF-16 code unit outside `[A-Za-z0-9-]` with `_`.
///
/// Characters outside the Basic Multilingual Plane are two units and so
/// become `__`, the same unit model [`string_hash`] uses.
pub fn sanitize_hook_name(name: &str) -> String {
    name.encode_utf16()
        .map(|unit| {
            u8::try_from(unit)
                .ok()
                .filter(|byte| byte.is_ascii_alphanumeric() || *byte == b'-')
                .map_or('_', char::from)
        })
        .collect()
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Raw JVM access flags as recorded on a class, field or method.
///
/// The same bit can mean different things depending on where it appears
/// (`0x0020` is `ACC_SUPER` on a class and `ACC_SYNCHRONIZED` on a method),
/// so the constants are named after their most common meaning and the
/// predicates on each model pick the right one.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct AccessFlags(pub u16);

impl AccessFlags {
    pub const PUBLIC: AccessFlags = AccessFlags(0x0001);
    pub const PRIVATE: AccessFlags = AccessFlags(0x0002);
    pub const PROTECTED: AccessFlags = AccessFlags(0x0004);
    pub const STATIC: AccessFlags = AccessFlags(0x0008);
    pub const FINAL: AccessFlags = AccessFlags(0x0010);
    pub const SYNCHRONIZED: AccessFlags = AccessFlags(0x0020);
    pub const VOLATILE: AccessFlags = AccessFlags(0x0040);
    pub const BRIDGE: AccessFlags = AccessFlags(0x0040);
    pub const TRANSIENT: AccessFlags = AccessFlags(0x0080);
    pub const VARARGS: AccessFlags = AccessFlags(0x0080);
    pub const NATIVE: AccessFlags = AccessFlags(0x0100);
    pub const INTERFACE: AccessFlags = AccessFlags(0x0200);
    pub const ABSTRACT: AccessFlags = AccessFlags(0x0400);
    pub const STRICT: AccessFlags = AccessFlags(0x0800);
    pub const SYNTHETIC: AccessFlags = AccessFlags(0x1000);
    pub const ANNOTATION: AccessFlags = AccessFlags(0x2000);
    pub const ENUM: AccessFlags = AccessFlags(0x4000);

    pub const fn empty() -> Self {
        AccessFlags(0)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// True when any bit of `other` is set.
    pub const fn contains(self, other: AccessFlags) -> bool {
        self.0 & other.0 != 0
    }
}

impl From<u16> for AccessFlags {
    fn from(bits: u16) -> Self {
        AccessFlags(bits)
    }
}

impl BitOr for AccessFlags {
    type Output = AccessFlags;

    fn bitor(self, rhs: AccessFlags) -> AccessFlags {
        AccessFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for AccessFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

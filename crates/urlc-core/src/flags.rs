//! Merge policy flags for URL composition.
//!
//! Each [`MergeFlag`] occupies the same bit as the historical `HTTP_URL_*`
//! constants, so integer bitmasks coming from elsewhere can be imported with
//! [`MergeFlags::from_bits`].

use crate::error::UrlError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// A single composition flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeFlag {
    /// Override fields replace base fields outright.
    Replace,
    /// Join a relative override path onto the base path's directory.
    JoinPath,
    /// Deep-merge the override query into the base query.
    JoinQuery,
    StripUser,
    StripPass,
    /// Shorthand for `StripUser` + `StripPass`.
    StripAuth,
    StripPort,
    StripPath,
    StripQuery,
    StripFragment,
    /// Shorthand for every strip flag.
    StripAll,
}

impl MergeFlag {
    pub const ALL: [MergeFlag; 11] = [
        MergeFlag::Replace,
        MergeFlag::JoinPath,
        MergeFlag::JoinQuery,
        MergeFlag::StripUser,
        MergeFlag::StripPass,
        MergeFlag::StripAuth,
        MergeFlag::StripPort,
        MergeFlag::StripPath,
        MergeFlag::StripQuery,
        MergeFlag::StripFragment,
        MergeFlag::StripAll,
    ];

    /// Bit value (`Replace` = 1, `JoinPath` = 2, ... `StripAll` = 1024).
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Kebab-case name, as accepted by [`FromStr`] and the config file.
    pub const fn name(self) -> &'static str {
        match self {
            MergeFlag::Replace => "replace",
            MergeFlag::JoinPath => "join-path",
            MergeFlag::JoinQuery => "join-query",
            MergeFlag::StripUser => "strip-user",
            MergeFlag::StripPass => "strip-pass",
            MergeFlag::StripAuth => "strip-auth",
            MergeFlag::StripPort => "strip-port",
            MergeFlag::StripPath => "strip-path",
            MergeFlag::StripQuery => "strip-query",
            MergeFlag::StripFragment => "strip-fragment",
            MergeFlag::StripAll => "strip-all",
        }
    }
}

impl fmt::Display for MergeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts `join-query`, `join_query`, `JOIN_QUERY` and `URL_JOIN_QUERY`.
impl FromStr for MergeFlag {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase().replace('_', "-");
        let name = lowered.strip_prefix("url-").unwrap_or(&lowered);
        MergeFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| UrlError::UnknownFlag(s.to_string()))
    }
}

/// Set of [`MergeFlag`]s. Unknown bits survive [`MergeFlags::from_bits`] but
/// have no effect on composition.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MergeFlags(u16);

impl MergeFlags {
    pub const NONE: Self = Self(0);
    pub const REPLACE: Self = Self::of(MergeFlag::Replace);
    pub const JOIN_PATH: Self = Self::of(MergeFlag::JoinPath);
    pub const JOIN_QUERY: Self = Self::of(MergeFlag::JoinQuery);
    pub const STRIP_USER: Self = Self::of(MergeFlag::StripUser);
    pub const STRIP_PASS: Self = Self::of(MergeFlag::StripPass);
    pub const STRIP_AUTH: Self = Self::of(MergeFlag::StripAuth);
    pub const STRIP_PORT: Self = Self::of(MergeFlag::StripPort);
    pub const STRIP_PATH: Self = Self::of(MergeFlag::StripPath);
    pub const STRIP_QUERY: Self = Self::of(MergeFlag::StripQuery);
    pub const STRIP_FRAGMENT: Self = Self::of(MergeFlag::StripFragment);
    pub const STRIP_ALL: Self = Self::of(MergeFlag::StripAll);

    const AUTH_BITS: u16 = MergeFlag::StripUser.bit() | MergeFlag::StripPass.bit();
    const STRIP_BITS: u16 = Self::AUTH_BITS
        | MergeFlag::StripAuth.bit()
        | MergeFlag::StripPort.bit()
        | MergeFlag::StripPath.bit()
        | MergeFlag::StripQuery.bit()
        | MergeFlag::StripFragment.bit();

    pub const fn of(flag: MergeFlag) -> Self {
        Self(flag.bit())
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, flag: MergeFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, flag: MergeFlag) {
        self.0 |= flag.bit();
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the set with `StripAll` and `StripAuth` replaced by the
    /// individual strip flags they cover (the shorthands stay set).
    pub const fn expanded(self) -> Self {
        let mut bits = self.0;
        if self.contains(MergeFlag::StripAll) {
            bits |= Self::STRIP_BITS;
        } else if self.contains(MergeFlag::StripAuth) {
            bits |= Self::AUTH_BITS;
        }
        Self(bits)
    }

    /// Known flags contained in the set, in bit order.
    pub fn iter(self) -> impl Iterator<Item = MergeFlag> {
        MergeFlag::ALL
            .into_iter()
            .filter(move |flag| self.contains(*flag))
    }
}

impl fmt::Debug for MergeFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MergeFlags(")?;
        let mut first = true;
        for flag in self.iter() {
            if !first {
                write!(f, " | ")?;
            }
            write!(f, "{}", flag)?;
            first = false;
        }
        if first {
            write!(f, "none")?;
        }
        write!(f, ")")
    }
}

impl From<MergeFlag> for MergeFlags {
    fn from(flag: MergeFlag) -> Self {
        Self::of(flag)
    }
}

impl FromIterator<MergeFlag> for MergeFlags {
    fn from_iter<I: IntoIterator<Item = MergeFlag>>(iter: I) -> Self {
        let mut flags = MergeFlags::NONE;
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl BitOr for MergeFlags {
    type Output = MergeFlags;

    fn bitor(self, rhs: MergeFlags) -> MergeFlags {
        self.union(rhs)
    }
}

impl BitOr<MergeFlag> for MergeFlags {
    type Output = MergeFlags;

    fn bitor(self, rhs: MergeFlag) -> MergeFlags {
        self.union(MergeFlags::of(rhs))
    }
}

impl BitOr for MergeFlag {
    type Output = MergeFlags;

    fn bitor(self, rhs: MergeFlag) -> MergeFlags {
        MergeFlags::of(self).union(MergeFlags::of(rhs))
    }
}

impl BitOrAssign for MergeFlags {
    fn bitor_assign(&mut self, rhs: MergeFlags) {
        self.0 |= rhs.0;
    }
}

impl BitOrAssign<MergeFlag> for MergeFlags {
    fn bitor_assign(&mut self, rhs: MergeFlag) {
        self.insert(rhs);
    }
}

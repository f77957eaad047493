use core::fmt;
use core::ops::{BitAnd, BitOr, BitXor, Not};

/// The character could not be mapped to a [`Logic`] state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid logic character {0:?}, expected one of '0', '1', 'Z', 'U'")]
pub struct InvalidLogicChar(pub char);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumIter)]
/// A single bit of 4-valued logic.
///
/// Wires start out [`Logic::Undefined`] until something drives them.
/// [`Logic::HighZ`] is the released state of a tri-state driver; it loses
/// against any definite drive during multi-driver resolution.
pub enum Logic {
    /// Logical zero, `'0'`.
    Low,
    /// Logical one, `'1'`.
    High,
    /// High impedance, `'Z'`.
    HighZ,
    /// Unknown or conflicting, `'U'`.
    #[default]
    Undefined,
}

impl Logic {
    /// Two-input lookup over the definite states. Any operand outside
    /// `{Low, High}` forces [`Logic::Undefined`].
    fn lut2(self, rhs: Self, hh: Self, hl: Self, lh: Self, ll: Self) -> Self {
        match (self, rhs) {
            (Self::High, Self::High) => hh,
            (Self::High, Self::Low) => hl,
            (Self::Low, Self::High) => lh,
            (Self::Low, Self::Low) => ll,
            _ => Self::Undefined,
        }
    }

    /// Whether this is the definite high state.
    pub const fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// Reduce the values driven onto one wire to the committed value.
    ///
    /// Released drivers (`Z`) are ignored. A single remaining definite
    /// drive wins; two or more remaining drives short-circuit to `U`,
    /// whether they agree or not. An empty or all-`Z` set resolves to `Z`.
    pub fn resolve<I>(drives: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut result = Self::HighZ;
        for drive in drives {
            if drive == Self::HighZ {
                continue;
            }
            if result == Self::HighZ {
                result = drive;
            } else {
                return Self::Undefined;
            }
        }
        result
    }
}

impl From<bool> for Logic {
    fn from(b: bool) -> Self {
        if b {
            Self::High
        } else {
            Self::Low
        }
    }
}

impl From<Logic> for bool {
    /// Only [`Logic::High`] converts to `true`.
    fn from(l: Logic) -> Self {
        l.is_high()
    }
}

impl From<Logic> for char {
    fn from(l: Logic) -> Self {
        match l {
            Logic::Low => '0',
            Logic::High => '1',
            Logic::HighZ => 'Z',
            Logic::Undefined => 'U',
        }
    }
}

impl TryFrom<char> for Logic {
    type Error = InvalidLogicChar;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '0' => Ok(Self::Low),
            '1' => Ok(Self::High),
            'Z' | 'z' => Ok(Self::HighZ),
            'U' | 'u' => Ok(Self::Undefined),
            _ => Err(InvalidLogicChar(c)),
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

impl Not for Logic {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::High => Self::Low,
            Self::Low => Self::High,
            _ => Self::Undefined,
        }
    }
}

impl BitAnd for Logic {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.lut2(rhs, Self::High, Self::Low, Self::Low, Self::Low)
    }
}

impl BitOr for Logic {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.lut2(rhs, Self::High, Self::High, Self::High, Self::Low)
    }
}

impl BitXor for Logic {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.lut2(rhs, Self::Low, Self::High, Self::High, Self::Low)
    }
}

use std::{fmt, str};

/// The identifier of one of the three stations of the network.
///
/// The topology is fixed: [`StationId::One`] receives the external
/// arrivals and feeds either [`StationId::Two`] or [`StationId::Three`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StationId {
    One = 1,
    Two = 2,
    Three = 3,
}

impl StationId {
    /// All the stations, in the order they are always iterated in.
    pub const ALL: [Self; 3] = [Self::One, Self::Two, Self::Three];

    /// index of the station in `0..3`
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// the station's number as displayed in reports (`1`, `2` or `3`)
    #[inline(always)]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown station `{0}', expecting 1, 2 or 3")]
pub struct StationIdParseError(String);

impl str::FromStr for StationId {
    type Err = StationIdParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::One),
            "2" => Ok(Self::Two),
            "3" => Ok(Self::Three),
            other => Err(StationIdParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.number().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_numbers() {
        for (i, id) in StationId::ALL.into_iter().enumerate() {
            assert_eq!(id.index(), i);
            assert_eq!(id.number() as usize, i + 1);
        }
    }

    #[test]
    fn print() {
        assert_eq!(format!("{}", StationId::Two), "2")
    }

    #[test]
    fn parse() {
        assert_eq!("3".parse::<StationId>().unwrap(), StationId::Three);
        assert!("4".parse::<StationId>().is_err());
    }
}

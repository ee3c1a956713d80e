//! Side (Buy / Sell) for orders and book levels.

/// Order / book side.
///
/// On the wire this is tag 54 (`1` = Buy, `2` = Sell). Market-data
/// entries use MDEntryType (269) instead, where `0` = Bid and `1` = Offer;
/// both map onto this enum.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// FIX Side (54) code.
    pub fn as_fix(self) -> char {
        match self {
            Side::Buy => '1',
            Side::Sell => '2',
        }
    }

    /// Parse a FIX Side (54) value.
    pub fn from_fix(value: &str) -> Option<Self> {
        match value {
            "1" => Some(Side::Buy),
            "2" => Some(Side::Sell),
            _ => None,
        }
    }

    /// Parse a FIX MDEntryType (269) value: `0` bid, `1` offer.
    pub fn from_md_entry_type(value: &str) -> Option<Self> {
        match value {
            "0" => Some(Side::Buy),
            "1" => Some(Side::Sell),
            _ => None,
        }
    }

    /// MDEntryType (269) code for this side.
    pub fn as_md_entry_type(self) -> char {
        match self {
            Side::Buy => '0',
            Side::Sell => '1',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fix_codes() {
        assert_eq!(Side::from_fix("1"), Some(Side::Buy));
        assert_eq!(Side::from_fix("2"), Some(Side::Sell));
        assert_eq!(Side::from_fix("B"), None);
        assert_eq!(Side::Sell.as_fix(), '2');
    }

    #[test]
    fn md_entry_types() {
        assert_eq!(Side::from_md_entry_type("0"), Some(Side::Buy));
        assert_eq!(Side::from_md_entry_type("1"), Some(Side::Sell));
        assert_eq!(Side::from_md_entry_type("2"), None);
        assert_eq!(Side::Sell.as_md_entry_type(), '1');
    }
}

//! Order type (Market vs Limit), FIX OrdType (40).

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub fn as_fix(self) -> char {
        match self {
            OrderType::Market => '1',
            OrderType::Limit => '2',
        }
    }
}

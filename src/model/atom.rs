use super::types::Parity;

#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    pub position: [f64; 3],
    pub charge: i8,
    pub parity: Parity,
}

impl Atom {
    pub fn new(symbol: impl Into<String>, position: [f64; 3]) -> Self {
        Self {
            symbol: symbol.into(),
            position,
            charge: 0,
            parity: Parity::None,
        }
    }

    pub fn with_charge(mut self, charge: i8) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_parity(mut self, parity: Parity) -> Self {
        self.parity = parity;
        self
    }

    #[inline]
    pub fn is_hydrogen(&self) -> bool {
        matches!(self.symbol.as_str(), "H" | "D" | "T")
    }
}

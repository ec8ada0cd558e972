#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
    Aromatic,
    /// Query bond types 5 to 8 (single/double, single/aromatic,
    /// double/aromatic, any), kept under their own code.
    Query(u8),
}

impl BondOrder {
    /// Maps a CTfile bond type code (1 to 8) to a bond order.
    pub fn from_ctfile(code: u8) -> Option<Self> {
        match code {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            4 => Some(BondOrder::Aromatic),
            5..=8 => Some(BondOrder::Query(code)),
            _ => None,
        }
    }

    pub fn ctfile_code(&self) -> u8 {
        match self {
            BondOrder::Single => 1,
            BondOrder::Double => 2,
            BondOrder::Triple => 3,
            BondOrder::Aromatic => 4,
            BondOrder::Query(code) => *code,
        }
    }
}

/// Atom stereo parity from the `sss` column of a V2000 atom line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
    Either,
}

impl Parity {
    pub fn from_ctfile(code: u8) -> Option<Self> {
        match code {
            0 => Some(Parity::None),
            1 => Some(Parity::Odd),
            2 => Some(Parity::Even),
            3 => Some(Parity::Either),
            _ => None,
        }
    }

    pub fn ctfile_code(&self) -> u8 {
        match self {
            Parity::None => 0,
            Parity::Odd => 1,
            Parity::Even => 2,
            Parity::Either => 3,
        }
    }
}

/// Bond stereo flag from the `sss` column of a V2000 bond line.
///
/// Wedge codes (up, down, either) are kept apart from double-bond codes
/// (cis/trans unspecified), matching the CTfile meaning of the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum BondStereo {
    #[default]
    None,
    Up,
    Either,
    Down,
    CisTransEither,
}

impl BondStereo {
    pub fn from_ctfile(order: BondOrder, code: u8) -> Option<Self> {
        match (order, code) {
            (_, 0) => Some(BondStereo::None),
            (BondOrder::Double, 3) => Some(BondStereo::CisTransEither),
            (_, 1) => Some(BondStereo::Up),
            (_, 4) => Some(BondStereo::Either),
            (_, 6) => Some(BondStereo::Down),
            _ => None,
        }
    }
}

/// Converts the V2000 atom-block charge code to a formal charge.
///
/// Code 4 marks a doublet radical and carries no charge.
pub fn charge_from_ctfile(code: u8) -> Option<i8> {
    match code {
        0 | 4 => Some(0),
        1 => Some(3),
        2 => Some(2),
        3 => Some(1),
        5 => Some(-1),
        6 => Some(-2),
        7 => Some(-3),
        _ => None,
    }
}

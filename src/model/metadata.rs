use std::fmt;

/// Residues with a fixed, well-known chemistry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardResidue {
    ALA,
    ARG,
    ASN,
    ASP,
    CYS,
    GLN,
    GLU,
    GLY,
    HIS,
    ILE,
    LEU,
    LYS,
    MET,
    PHE,
    PRO,
    SER,
    THR,
    TRP,
    TYR,
    VAL,
    A,
    C,
    G,
    U,
    I,
    DA,
    DC,
    DG,
    DT,
    DI,
    HOH,
}

impl StandardResidue {
    /// Resolves a residue name, accepting common histidine and water aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        use StandardResidue::*;
        let residue = match name.trim() {
            "ALA" => ALA,
            "ARG" => ARG,
            "ASN" => ASN,
            "ASP" => ASP,
            "CYS" => CYS,
            "GLN" => GLN,
            "GLU" => GLU,
            "GLY" => GLY,
            "HIS" | "HID" | "HIE" | "HIP" => HIS,
            "ILE" => ILE,
            "LEU" => LEU,
            "LYS" => LYS,
            "MET" => MET,
            "PHE" => PHE,
            "PRO" => PRO,
            "SER" => SER,
            "THR" => THR,
            "TRP" => TRP,
            "TYR" => TYR,
            "VAL" => VAL,
            "A" => A,
            "C" => C,
            "G" => G,
            "U" => U,
            "I" => I,
            "DA" => DA,
            "DC" => DC,
            "DG" => DG,
            "DT" => DT,
            "DI" => DI,
            "HOH" | "WAT" | "DOD" => HOH,
            _ => return None,
        };
        Some(residue)
    }

    pub fn is_amino_acid(&self) -> bool {
        use StandardResidue::*;
        matches!(
            self,
            ALA | ARG
                | ASN
                | ASP
                | CYS
                | GLN
                | GLU
                | GLY
                | HIS
                | ILE
                | LEU
                | LYS
                | MET
                | PHE
                | PRO
                | SER
                | THR
                | TRP
                | TYR
                | VAL
        )
    }

    #[inline]
    pub fn is_water(&self) -> bool {
        matches!(self, StandardResidue::HOH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResidueCategory {
    Standard,
    Hetero,
    Ion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResiduePosition {
    None,
    Internal,
    NTerminal,
    CTerminal,
    FivePrime,
    ThreePrime,
}

/// Residue-level annotations carried by every atom.
///
/// Blank insertion codes and alternate locations are stored as `' '`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomResidueInfo {
    pub atom_name: String,
    pub residue_name: String,
    pub residue_id: i32,
    pub chain_id: char,
    pub insertion_code: char,
    pub alt_loc: char,
    pub standard_name: Option<StandardResidue>,
    pub category: ResidueCategory,
    pub position: ResiduePosition,
}

impl Default for AtomResidueInfo {
    fn default() -> Self {
        Self {
            atom_name: String::new(),
            residue_name: String::new(),
            residue_id: 0,
            chain_id: ' ',
            insertion_code: ' ',
            alt_loc: ' ',
            standard_name: None,
            category: ResidueCategory::Hetero,
            position: ResiduePosition::None,
        }
    }
}

impl AtomResidueInfo {
    /// Starts a builder for the mandatory identity fields.
    ///
    /// The standard residue and category are inferred from the residue name
    /// unless set explicitly.
    ///
    /// ```
    /// use elecdist::{AtomResidueInfo, ResidueCategory, StandardResidue};
    ///
    /// let info = AtomResidueInfo::builder("OD2", "ASP", 12, 'A')
    ///     .alt_loc(Some('B'))
    ///     .build();
    /// assert_eq!(info.standard_name, Some(StandardResidue::ASP));
    /// assert_eq!(info.category, ResidueCategory::Standard);
    /// assert_eq!(info.alt_loc, 'B');
    /// assert_eq!(info.insertion_code, ' ');
    /// ```
    pub fn builder(
        atom_name: impl Into<String>,
        residue_name: impl Into<String>,
        residue_id: i32,
        chain_id: char,
    ) -> AtomResidueBuilder {
        let residue_name = residue_name.into();
        let standard_name = StandardResidue::from_name(&residue_name);
        AtomResidueBuilder {
            info: Self {
                atom_name: atom_name.into(),
                residue_name,
                residue_id,
                chain_id,
                standard_name,
                category: if standard_name.is_some() {
                    ResidueCategory::Standard
                } else {
                    ResidueCategory::Hetero
                },
                ..Self::default()
            },
        }
    }

    /// Identity of the residue this atom belongs to.
    pub fn residue_key(&self) -> ResidueKey {
        ResidueKey {
            chain_id: self.chain_id,
            residue_id: self.residue_id,
            insertion_code: self.insertion_code,
            residue_name: self.residue_name.clone(),
        }
    }

    #[inline]
    pub fn has_alt_loc(&self) -> bool {
        self.alt_loc != ' '
    }
}

/// Builder returned by [`AtomResidueInfo::builder`].
#[derive(Debug, Clone)]
pub struct AtomResidueBuilder {
    info: AtomResidueInfo,
}

impl AtomResidueBuilder {
    pub fn insertion_code(mut self, code: Option<char>) -> Self {
        self.info.insertion_code = code.unwrap_or(' ');
        self
    }

    pub fn alt_loc(mut self, alt_loc: Option<char>) -> Self {
        self.info.alt_loc = alt_loc.unwrap_or(' ');
        self
    }

    pub fn standard_name(mut self, standard_name: Option<StandardResidue>) -> Self {
        self.info.standard_name = standard_name;
        self
    }

    pub fn category(mut self, category: ResidueCategory) -> Self {
        self.info.category = category;
        self
    }

    pub fn position(mut self, position: ResiduePosition) -> Self {
        self.info.position = position;
        self
    }

    pub fn build(self) -> AtomResidueInfo {
        self.info
    }
}

/// Residue identity used to group atoms: chain, sequence number, insertion code and name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResidueKey {
    pub chain_id: char,
    pub residue_id: i32,
    pub insertion_code: char,
    pub residue_name: String,
}

impl fmt::Display for ResidueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>3} {}{:>4}{}",
            self.residue_name, self.chain_id, self.residue_id, self.insertion_code
        )
    }
}

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of a node in a [`Network`](crate::network::Network).
///
/// Ids are positive integers; they are rendered as `n<id>` in Cytoscape files.
pub type NodeId = u64;

/// Kind of node in a co-expression network.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::types::NodeType;
///
/// assert_eq!(NodeType::Bait.label(), "bait node");
/// assert_eq!(NodeType::Gene.label(), "family node");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    /// A single bait gene
    Bait,
    /// A correlating gene that is not part of any gene family
    Gene,
    /// Correlating genes grouped by gene family
    Family,
}

impl NodeType {
    /// Human-readable label used in the node attribute file.
    ///
    /// Gene nodes are presented as family nodes; they are families of one.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bait => "bait node",
            Self::Gene | Self::Family => "family node",
        }
    }

    #[must_use]
    pub const fn is_bait(self) -> bool {
        matches!(self, Self::Bait)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bait => write!(f, "bait"),
            Self::Gene => write!(f, "gene"),
            Self::Family => write!(f, "family"),
        }
    }
}

/// RGB node colour.
///
/// # Examples
///
/// ```rust
/// use coexpnetviz_core::types::Colour;
///
/// let colour: Colour = "#1A2b3c".parse()?;
/// assert_eq!(colour.to_hex(), "#1a2b3c");
/// # Ok::<(), coexpnetviz_core::types::CoexpError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Colour from hue (degrees), saturation and value (both 0.0 to 1.0).
    #[must_use]
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Self {
        let hue = hue.rem_euclid(360.0);
        let chroma = value * saturation;
        let x = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let m = value - chroma;
        let (r, g, b) = match (hue / 60.0) as u32 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };
        let channel = |c: f64| ((c + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Lower-case `#rrggbb` representation.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Colour {
    type Err = CoexpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CoexpError::ParseError(format!("invalid colour {s:?}, expected #rrggbb"));
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

/// Error type for all CoExpNetViz operations.
#[derive(Debug, Error)]
pub enum CoexpError {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// Malformed input file
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Delimited text could not be read or written
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    /// Job file could not be deserialized
    #[error("Job file error: {0}")]
    JobFileError(#[from] serde_json::Error),
    /// Arguments or input data are unusable for analysis
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// A value violates a structural requirement
    #[error("Validation error: {0}")]
    ValidationError(String),
}

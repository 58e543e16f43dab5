//! Nucleotide sequences over the four-symbol DNA alphabet
//!
//! A `Sequence` can only be built through constructors that enforce the
//! alphabet, so everything downstream can index bytes without checking.

use crate::error::{GenframesError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four DNA bases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    T,
    G,
    C,
}

impl Base {
    /// Draw order used by synthesis and substitution
    pub const ALL: [Base; 4] = [Base::A, Base::T, Base::G, Base::C];

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'A' => Some(Base::A),
            b'T' => Some(Base::T),
            b'G' => Some(Base::G),
            b'C' => Some(Base::C),
            _ => None,
        }
    }

    pub fn as_byte(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::T => b'T',
            Base::G => b'G',
            Base::C => b'C',
        }
    }

    /// The three bases this one can be substituted with
    pub fn others(self) -> [Base; 3] {
        let mut out = [Base::A; 3];
        let mut i = 0;
        for b in Self::ALL {
            if b != self {
                out[i] = b;
                i += 1;
            }
        }
        out
    }
}

/// An owned DNA sequence; every symbol is A, T, G or C
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Sequence(String);

impl Sequence {
    /// Strict parse: upper-cases, then rejects empty input and anything
    /// outside the alphabet
    pub fn parse(raw: &str) -> Result<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        if upper.is_empty() {
            return Err(GenframesError::InvalidSequence("empty sequence".to_string()));
        }
        if let Some((pos, ch)) = upper
            .char_indices()
            .find(|(_, c)| !c.is_ascii() || Base::from_byte(*c as u8).is_none())
        {
            return Err(GenframesError::InvalidSequence(format!(
                "unexpected symbol {:?} at position {}",
                ch, pos
            )));
        }
        Ok(Self(upper))
    }

    /// Lenient constructor for provider text: keeps only A/T/G/C symbols.
    ///
    /// Whitespace, digits and IUPAC ambiguity codes are dropped.
    pub fn from_fasta_body(body: &str) -> Self {
        let kept = body
            .bytes()
            .map(|b| b.to_ascii_uppercase())
            .filter(|b| Base::from_byte(*b).is_some())
            .map(char::from)
            .collect();
        Self(kept)
    }

    /// Build from bases already known to be valid
    pub fn from_bases(bases: impl IntoIterator<Item = Base>) -> Self {
        Self(bases.into_iter().map(|b| char::from(b.as_byte())).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn bases(&self) -> impl Iterator<Item = Base> + '_ {
        self.0.bytes().filter_map(Base::from_byte)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Sequence {
    type Error = GenframesError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Sequence> for String {
    fn from(seq: Sequence) -> Self {
        seq.0
    }
}

//! ArtTraitMapper — genetic statistics to visual parameters
//!
//! Deterministic: the only entropy is what the sequence and its signature
//! already carry.
//!
//! - palette: GC content band
//! - geometry: leading signature digits mod 4
//! - texture: count(A) × count(T) mod 4
//! - particles: length × complexity / 50

use crate::analysis::{complexity_score, GenomicSignature, NucleotideCounts};
use crate::sequence::Sequence;
use serde::{Deserialize, Serialize};

/// GC band a palette is chosen from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    /// GC < 40
    Ocean,
    /// 40 <= GC < 50
    Earth,
    /// GC >= 50
    Intense,
}

impl Palette {
    pub fn for_gc(gc_content: f64) -> Self {
        if gc_content < 40.0 {
            Palette::Ocean
        } else if gc_content < 50.0 {
            Palette::Earth
        } else {
            Palette::Intense
        }
    }

    pub fn colors(self) -> [&'static str; 5] {
        match self {
            Palette::Ocean => ["#001219", "#005f73", "#0a9396", "#94d2bd", "#e9d8a6"],
            Palette::Earth => ["#264653", "#2a9d8f", "#e9c46a", "#f4a261", "#e76f51"],
            Palette::Intense => ["#590d22", "#800f2f", "#a4133c", "#ff4d6d", "#ffccd5"],
        }
    }

    pub fn style(self) -> ArtStyle {
        match self {
            Palette::Ocean => ArtStyle::Fluid,
            Palette::Earth => ArtStyle::Organic,
            Palette::Intense => ArtStyle::Crystalline,
        }
    }
}

/// Descriptive style that goes with a palette; not part of `ArtTraits`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtStyle {
    Fluid,
    Organic,
    Crystalline,
}

pub fn style_for_gc(gc_content: f64) -> ArtStyle {
    Palette::for_gc(gc_content).style()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryStyle {
    Helix,
    Fractal,
    Voronoi,
    ParticleCloud,
}

impl GeometryStyle {
    pub const ALL: [GeometryStyle; 4] = [
        GeometryStyle::Helix,
        GeometryStyle::Fractal,
        GeometryStyle::Voronoi,
        GeometryStyle::ParticleCloud,
    ];

    pub fn from_signature(signature: &GenomicSignature) -> Self {
        Self::ALL[signature.prefix_u32() as usize % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    Smooth,
    Rough,
    Glowing,
    Metallic,
}

impl TextureType {
    pub const ALL: [TextureType; 4] = [
        TextureType::Smooth,
        TextureType::Rough,
        TextureType::Glowing,
        TextureType::Metallic,
    ];

    pub fn from_counts(counts: &NucleotideCounts) -> Self {
        let product = counts.a as u128 * counts.t as u128;
        Self::ALL[(product % Self::ALL.len() as u128) as usize]
    }
}

/// Visual parameters for one sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtTraits {
    pub color_palette: [String; 5],
    pub geometry_style: GeometryStyle,
    /// 0..=100, two decimals
    pub complexity_score: f64,
    pub texture_type: TextureType,
    /// Always at least 1
    pub particle_count: u64,
}

/// Map a sequence and its statistics to art traits
pub fn derive_traits(seq: &Sequence, gc_content: f64, signature: &GenomicSignature) -> ArtTraits {
    let complexity = complexity_score(seq);
    let particles = (seq.len() as f64 * (complexity / 50.0)).floor() as u64;
    ArtTraits {
        color_palette: Palette::for_gc(gc_content).colors().map(String::from),
        geometry_style: GeometryStyle::from_signature(signature),
        complexity_score: (complexity * 100.0).round() / 100.0,
        texture_type: TextureType::from_counts(&NucleotideCounts::of(seq)),
        particle_count: particles.max(1),
    }
}

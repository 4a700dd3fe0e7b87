use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{DamascusError, DamascusResult};

/// A forge-weldable sheet material.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Material {
    /// Plain high-carbon steel, etches dark.
    #[serde(rename = "1084")]
    Steel1084,
    /// Nickel-bearing bandsaw steel, the usual bright layer.
    #[serde(rename = "15N20")]
    Steel15N20,
    /// Higher-carbon steel, etches darkest.
    #[serde(rename = "1095")]
    Steel1095,
    /// Oil-hardening tool steel.
    #[serde(rename = "O1")]
    O1,
    /// Water-hardening tool steel.
    #[serde(rename = "W2")]
    W2,
    /// Bearing steel.
    #[serde(rename = "52100")]
    Steel52100,
    /// Chrome-vanadium spring steel.
    #[serde(rename = "80CrV2")]
    Steel80CrV2,
    /// Spring steel.
    #[serde(rename = "5160")]
    Steel5160,
    /// Pure nickel shim, stays bright.
    #[serde(rename = "Nickel200")]
    Nickel200,
    /// Austenitic stainless, resists the etch.
    #[serde(rename = "304SS")]
    Stainless304,
}

/// Display data for one [`Material`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialInfo {
    /// Serialized identifier (e.g. `"15N20"`).
    pub id: &'static str,
    /// Human-readable name.
    pub name: &'static str,
    /// Stylized post-etch brightness; higher is lighter. Nominally in `[0, 1]`.
    pub etch: f64,
}

const CATALOG: [MaterialInfo; 10] = [
    MaterialInfo {
        id: "1084",
        name: "1084 carbon steel",
        etch: 0.22,
    },
    MaterialInfo {
        id: "15N20",
        name: "15N20 nickel steel",
        etch: 0.86,
    },
    MaterialInfo {
        id: "1095",
        name: "1095 carbon steel",
        etch: 0.16,
    },
    MaterialInfo {
        id: "O1",
        name: "O1 tool steel",
        etch: 0.3,
    },
    MaterialInfo {
        id: "W2",
        name: "W2 tool steel",
        etch: 0.2,
    },
    MaterialInfo {
        id: "52100",
        name: "52100 bearing steel",
        etch: 0.26,
    },
    MaterialInfo {
        id: "80CrV2",
        name: "80CrV2 spring steel",
        etch: 0.34,
    },
    MaterialInfo {
        id: "5160",
        name: "5160 spring steel",
        etch: 0.4,
    },
    MaterialInfo {
        id: "Nickel200",
        name: "Pure nickel (Ni200)",
        etch: 0.97,
    },
    MaterialInfo {
        id: "304SS",
        name: "304 stainless steel",
        etch: 0.9,
    },
];

impl Material {
    /// Every catalog entry, in catalog order.
    pub const ALL: [Material; 10] = [
        Material::Steel1084,
        Material::Steel15N20,
        Material::Steel1095,
        Material::O1,
        Material::W2,
        Material::Steel52100,
        Material::Steel80CrV2,
        Material::Steel5160,
        Material::Nickel200,
        Material::Stainless304,
    ];

    fn catalog_index(self) -> usize {
        match self {
            Material::Steel1084 => 0,
            Material::Steel15N20 => 1,
            Material::Steel1095 => 2,
            Material::O1 => 3,
            Material::W2 => 4,
            Material::Steel52100 => 5,
            Material::Steel80CrV2 => 6,
            Material::Steel5160 => 7,
            Material::Nickel200 => 8,
            Material::Stainless304 => 9,
        }
    }

    /// Catalog entry for this material.
    pub fn info(self) -> &'static MaterialInfo {
        &CATALOG[self.catalog_index()]
    }

    /// Serialized identifier.
    pub fn id(self) -> &'static str {
        self.info().id
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Etch coefficient clamped into `[0, 1]` and scaled to a gray byte.
    pub fn etch_byte(self) -> u8 {
        etch_to_byte(self.info().etch)
    }
}

/// Catalog lookup. Total over the closed [`Material`] set.
pub fn material_info(material: Material) -> MaterialInfo {
    *material.info()
}

pub(crate) fn etch_to_byte(etch: f64) -> u8 {
    // NaN clamps to NaN; treat it as the darkest value.
    let e = if etch.is_nan() {
        0.0
    } else {
        etch.clamp(0.0, 1.0)
    };
    (e * 255.0).round() as u8
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Material {
    type Err = DamascusError;

    fn from_str(s: &str) -> DamascusResult<Self> {
        let needle = s.trim();
        Material::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(needle))
            .ok_or_else(|| DamascusError::validation(format!("unknown material '{needle}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/material.rs"]
mod tests;

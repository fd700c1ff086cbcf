//! Cosmetic finishes.

use serde::{Deserialize, Serialize};

/// Cosmetic variant attached to a card instance when it is spawned.
///
/// Independent of rarity and fixed for the instance's lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Finish {
    Matte,
    Chroma,
    Foil,
    Inverse,
    Void,
}

impl Finish {
    pub const ALL: [Finish; 5] = [
        Finish::Matte,
        Finish::Chroma,
        Finish::Foil,
        Finish::Inverse,
        Finish::Void,
    ];

    /// Key the presentation layer uses to look up the surface material.
    #[must_use]
    pub const fn material_key(self) -> &'static str {
        match self {
            Finish::Matte => "normal",
            Finish::Chroma => "holo",
            Finish::Foil => "foil",
            Finish::Inverse => "inverse",
            Finish::Void => "void",
        }
    }
}

impl std::fmt::Display for Finish {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Finish::Matte => "Matte",
            Finish::Chroma => "Chroma",
            Finish::Foil => "Foil",
            Finish::Inverse => "Inverse",
            Finish::Void => "Void",
        };
        f.write_str(name)
    }
}

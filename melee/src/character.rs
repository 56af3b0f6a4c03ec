use std::fmt::Display;

use num_enum::TryFromPrimitive;

/// Character ids as they appear in game start blocks (the character select
/// numbering). Zelda and Sheik are distinct entries here even though they
/// share a character slot in game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum ExternalCharacter {
    CaptainFalcon = 0x00,
    DonkeyKong = 0x01,
    Fox = 0x02,
    MrGameAndWatch = 0x03,
    Kirby = 0x04,
    Bowser = 0x05,
    Link = 0x06,
    Luigi = 0x07,
    Mario = 0x08,
    Marth = 0x09,
    Mewtwo = 0x0A,
    Ness = 0x0B,
    Peach = 0x0C,
    Pikachu = 0x0D,
    IceClimbers = 0x0E,
    Jigglypuff = 0x0F,
    Samus = 0x10,
    Yoshi = 0x11,
    Zelda = 0x12,
    Sheik = 0x13,
    Falco = 0x14,
    YoungLink = 0x15,
    DrMario = 0x16,
    Roy = 0x17,
    Pichu = 0x18,
    Ganondorf = 0x19,
}

impl ExternalCharacter {
    /// The file stem that this character's assets (animation archives, icons)
    /// are stored under.
    pub fn asset_name(&self) -> &'static str {
        match *self {
            Self::CaptainFalcon => "captain_falcon",
            Self::DonkeyKong => "donkey_kong",
            Self::Fox => "fox",
            Self::MrGameAndWatch => "mr_game_and_watch",
            Self::Kirby => "kirby",
            Self::Bowser => "bowser",
            Self::Link => "link",
            Self::Luigi => "luigi",
            Self::Mario => "mario",
            Self::Marth => "marth",
            Self::Mewtwo => "mewtwo",
            Self::Ness => "ness",
            Self::Peach => "peach",
            Self::Pikachu => "pikachu",
            Self::IceClimbers => "ice_climbers",
            Self::Jigglypuff => "jigglypuff",
            Self::Samus => "samus",
            Self::Yoshi => "yoshi",
            Self::Zelda => "zelda",
            Self::Sheik => "sheik",
            Self::Falco => "falco",
            Self::YoungLink => "young_link",
            Self::DrMario => "dr_mario",
            Self::Roy => "roy",
            Self::Pichu => "pichu",
            Self::Ganondorf => "ganondorf",
        }
    }
}

impl Display for ExternalCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::CaptainFalcon => write!(f, "Captain Falcon"),
            Self::DonkeyKong => write!(f, "Donkey Kong"),
            Self::Fox => write!(f, "Fox"),
            Self::MrGameAndWatch => write!(f, "Mr. Game & Watch"),
            Self::Kirby => write!(f, "Kirby"),
            Self::Bowser => write!(f, "Bowser"),
            Self::Link => write!(f, "Link"),
            Self::Luigi => write!(f, "Luigi"),
            Self::Mario => write!(f, "Mario"),
            Self::Marth => write!(f, "Marth"),
            Self::Mewtwo => write!(f, "Mewtwo"),
            Self::Ness => write!(f, "Ness"),
            Self::Peach => write!(f, "Peach"),
            Self::Pikachu => write!(f, "Pikachu"),
            Self::IceClimbers => write!(f, "Ice Climbers"),
            Self::Jigglypuff => write!(f, "Jigglypuff"),
            Self::Samus => write!(f, "Samus"),
            Self::Yoshi => write!(f, "Yoshi"),
            Self::Zelda => write!(f, "Zelda"),
            Self::Sheik => write!(f, "Sheik"),
            Self::Falco => write!(f, "Falco"),
            Self::YoungLink => write!(f, "Young Link"),
            Self::DrMario => write!(f, "Dr. Mario"),
            Self::Roy => write!(f, "Roy"),
            Self::Pichu => write!(f, "Pichu"),
            Self::Ganondorf => write!(f, "Ganondorf"),
        }
    }
}

/// Character ids as they appear in per-frame state, which use the in-engine
/// numbering rather than the character select one. Transformations show up
/// here: a player who picked Zelda reports `Sheik` after transforming, and
/// the trailing Ice Climber reports `Nana`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum InternalCharacter {
    Mario = 0,
    Fox = 1,
    CaptainFalcon = 2,
    DonkeyKong = 3,
    Kirby = 4,
    Bowser = 5,
    Link = 6,
    Sheik = 7,
    Ness = 8,
    Peach = 9,
    Popo = 10,
    Nana = 11,
    Pikachu = 12,
    Samus = 13,
    Yoshi = 14,
    Jigglypuff = 15,
    Mewtwo = 16,
    Luigi = 17,
    Marth = 18,
    Zelda = 19,
    YoungLink = 20,
    DrMario = 21,
    Falco = 22,
    Pichu = 23,
    MrGameAndWatch = 24,
    Ganondorf = 25,
    Roy = 26,
    MasterHand = 27,
    CrazyHand = 28,
    WireframeMale = 29,
    WireframeFemale = 30,
    GigaBowser = 31,
    Sandbag = 32,
}

impl InternalCharacter {
    /// Maps back to the character select numbering, which is what asset
    /// archives are keyed by. This is how a transformed Zelda ends up pulling
    /// Sheik's animations. Non-playable entries have no mapping.
    pub fn to_external(&self) -> Option<ExternalCharacter> {
        match *self {
            Self::Mario => Some(ExternalCharacter::Mario),
            Self::Fox => Some(ExternalCharacter::Fox),
            Self::CaptainFalcon => Some(ExternalCharacter::CaptainFalcon),
            Self::DonkeyKong => Some(ExternalCharacter::DonkeyKong),
            Self::Kirby => Some(ExternalCharacter::Kirby),
            Self::Bowser => Some(ExternalCharacter::Bowser),
            Self::Link => Some(ExternalCharacter::Link),
            Self::Sheik => Some(ExternalCharacter::Sheik),
            Self::Ness => Some(ExternalCharacter::Ness),
            Self::Peach => Some(ExternalCharacter::Peach),
            Self::Popo | Self::Nana => Some(ExternalCharacter::IceClimbers),
            Self::Pikachu => Some(ExternalCharacter::Pikachu),
            Self::Samus => Some(ExternalCharacter::Samus),
            Self::Yoshi => Some(ExternalCharacter::Yoshi),
            Self::Jigglypuff => Some(ExternalCharacter::Jigglypuff),
            Self::Mewtwo => Some(ExternalCharacter::Mewtwo),
            Self::Luigi => Some(ExternalCharacter::Luigi),
            Self::Marth => Some(ExternalCharacter::Marth),
            Self::Zelda => Some(ExternalCharacter::Zelda),
            Self::YoungLink => Some(ExternalCharacter::YoungLink),
            Self::DrMario => Some(ExternalCharacter::DrMario),
            Self::Falco => Some(ExternalCharacter::Falco),
            Self::Pichu => Some(ExternalCharacter::Pichu),
            Self::MrGameAndWatch => Some(ExternalCharacter::MrGameAndWatch),
            Self::Ganondorf => Some(ExternalCharacter::Ganondorf),
            Self::Roy => Some(ExternalCharacter::Roy),
            _ => None,
        }
    }
}

impl Display for InternalCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::Popo => write!(f, "Popo"),
            Self::Nana => write!(f, "Nana"),
            Self::MasterHand => write!(f, "Master Hand"),
            Self::CrazyHand => write!(f, "Crazy Hand"),
            Self::WireframeMale => write!(f, "Male Wireframe"),
            Self::WireframeFemale => write!(f, "Female Wireframe"),
            Self::GigaBowser => write!(f, "Giga Bowser"),
            Self::Sandbag => write!(f, "Sandbag"),
            other => match other.to_external() {
                Some(external) => write!(f, "{external}"),
                None => write!(f, "Unknown character"),
            },
        }
    }
}

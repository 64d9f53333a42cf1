//! Built-in Minecraft map color table.
//!
//! Map items store one byte per pixel. Byte `b` selects base color `b / 4`
//! rendered with shade `b % 4`, where the shades scale every channel by
//! 180, 220, 255 or 135 out of 255. Base color 0 is transparent, which is
//! where the four reserved indices come from.

use super::palette::Palette;
use crate::color::Rgb;

/// Shade multipliers in index order (`index % 4`).
pub const SHADE_MULTIPLIERS: [u32; 4] = [180, 220, 255, 135];

/// Base map colors in id order. Id 0 is the transparent "none" color.
pub const BASE_COLORS: [(&str, u32); 62] = [
    ("none", 0x000000),
    ("grass", 0x7FB238),
    ("sand", 0xF7E9A3),
    ("wool", 0xC7C7C7),
    ("fire", 0xFF0000),
    ("ice", 0xA0A0FF),
    ("metal", 0xA7A7A7),
    ("plant", 0x007C00),
    ("snow", 0xFFFFFF),
    ("clay", 0xA4A8B8),
    ("dirt", 0x976D4D),
    ("stone", 0x707070),
    ("water", 0x4040FF),
    ("wood", 0x8F7748),
    ("quartz", 0xFFFCF5),
    ("color_orange", 0xD87F33),
    ("color_magenta", 0xB24CD8),
    ("color_light_blue", 0x6699D8),
    ("color_yellow", 0xE5E533),
    ("color_light_green", 0x7FCC19),
    ("color_pink", 0xF27FA5),
    ("color_gray", 0x4C4C4C),
    ("color_light_gray", 0x999999),
    ("color_cyan", 0x4C7F99),
    ("color_purple", 0x7F3FB2),
    ("color_blue", 0x334CB2),
    ("color_brown", 0x664C33),
    ("color_green", 0x667F33),
    ("color_red", 0x993333),
    ("color_black", 0x191919),
    ("gold", 0xFAEE4D),
    ("diamond", 0x5CDBD5),
    ("lapis", 0x4A80FF),
    ("emerald", 0x00D93A),
    ("podzol", 0x815631),
    ("nether", 0x700200),
    ("terracotta_white", 0xD1B1A1),
    ("terracotta_orange", 0x9F5224),
    ("terracotta_magenta", 0x95576C),
    ("terracotta_light_blue", 0x706C8A),
    ("terracotta_yellow", 0xBA8524),
    ("terracotta_light_green", 0x677535),
    ("terracotta_pink", 0xA04D4E),
    ("terracotta_gray", 0x392923),
    ("terracotta_light_gray", 0x876B62),
    ("terracotta_cyan", 0x575C5C),
    ("terracotta_purple", 0x7A4958),
    ("terracotta_blue", 0x4C3E5C),
    ("terracotta_brown", 0x4C3223),
    ("terracotta_green", 0x4C522A),
    ("terracotta_red", 0x8E3C2E),
    ("terracotta_black", 0x251610),
    ("crimson_nylium", 0xBD3031),
    ("crimson_stem", 0x943F61),
    ("crimson_hyphae", 0x5C191D),
    ("warped_nylium", 0x167E86),
    ("warped_stem", 0x3A8E8C),
    ("warped_hyphae", 0x562C3E),
    ("warped_wart_block", 0x14B485),
    ("deepslate", 0x646464),
    ("raw_iron", 0xD8AF93),
    ("glow_lichen", 0x7FA796),
];

/// The shaded Minecraft map palette.
pub struct MinecraftMapPalette;

impl MinecraftMapPalette {
    /// Total number of shaded entries.
    pub const LEN: usize = BASE_COLORS.len() * SHADE_MULTIPLIERS.len();

    /// Every shaded color in map byte order.
    pub fn colors() -> Vec<Rgb> {
        BASE_COLORS
            .iter()
            .flat_map(|&(_, base)| {
                let base = Rgb::from_packed(base);
                SHADE_MULTIPLIERS.iter().map(move |&mult| base.shade(mult))
            })
            .collect()
    }

    /// The map palette as a validated [`Palette`].
    pub fn palette() -> Palette {
        // 248 entries is always within the accepted range
        Palette::new(&Self::colors()).unwrap_or_else(|_| unreachable!())
    }

    /// Name of the base color behind a map byte, if it is in range.
    pub fn base_name(index: u8) -> Option<&'static str> {
        BASE_COLORS.get(index as usize / 4).map(|&(name, _)| name)
    }
}

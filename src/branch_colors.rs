//! Shared clan color scheme. One base hue for the whole family (pine
//! green, deliberately away from the gender reds/blues), shaded lighter
//! per generation so ancestors read darker than descendants.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl HslColor {
    pub fn to_css(self) -> String {
        format!("hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

pub const CLAN_BASE_COLOR: HslColor = HslColor { h: 145, s: 45, l: 30 };

const LIGHTNESS_STEP: u8 = 6;
const MAX_LIGHTNESS: u8 = 85;

/// CSS color for a node `generation_offset` generations below the oldest
/// one on display. Offset 0 keeps the base lightness; each later
/// generation gains 6%, capped so late generations stay readable.
pub fn branch_color(base: HslColor, generation_offset: u32) -> String {
    let raised = (base.l as u32)
        .saturating_add(generation_offset.saturating_mul(LIGHTNESS_STEP as u32));
    HslColor {
        h: base.h,
        s: base.s,
        l: raised.min(MAX_LIGHTNESS as u32) as u8,
    }
    .to_css()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_generation_keeps_base_lightness() {
        assert_eq!(branch_color(CLAN_BASE_COLOR, 0), "hsl(145, 45%, 30%)");
    }

    #[test]
    fn test_lightness_ramps_per_generation() {
        assert_eq!(branch_color(CLAN_BASE_COLOR, 1), "hsl(145, 45%, 36%)");
        assert_eq!(branch_color(CLAN_BASE_COLOR, 3), "hsl(145, 45%, 48%)");
    }

    #[test]
    fn test_lightness_is_capped() {
        assert_eq!(branch_color(CLAN_BASE_COLOR, 20), "hsl(145, 45%, 85%)");
        assert_eq!(branch_color(CLAN_BASE_COLOR, 1000), "hsl(145, 45%, 85%)");
    }
}

//! Built-in panel layouts.

use crate::buffer::FieldAddress;
use crate::control::{Control, EnumOption};
use crate::layout::Layout;
use crate::panel::Panel;
use crate::Result;

/// Buffer size of the classic layout.
pub const CLASSIC_SIZE: usize = 15;

/// Token a fresh session starts from.
pub const DEFAULT_TOKEN: &str = "IVIAAVCQKACAAAAAAAAAAAAB";

/// Cosmetic choice used when none was picked.
pub const DEFAULT_COSMETIC: &str = "Random";

#[derive(Clone, Copy)]
enum Kind {
    Binary,
    Tri,
}

// (section, key, label, byte, shift, kind)
const CLASSIC_TOGGLES: &[(&str, &str, &str, usize, u8, Kind)] = &[
    ("Gameplay", "shuffle-chests", "Shuffle Chests & Searches", 0, 6, Kind::Tri),
    ("Gameplay", "chest-locations", "Random Chest Locations", 0, 4, Kind::Tri),
    ("Gameplay", "random-growth", "Random Growth", 0, 2, Kind::Tri),
    ("Gameplay", "random-map", "Random Map", 0, 0, Kind::Tri),
    ("Gameplay", "spell-learning", "Random Spell Learning", 1, 6, Kind::Tri),
    ("Gameplay", "weapon-shops", "Random Weapon Shops", 1, 4, Kind::Tri),
    ("Gameplay", "weapon-prices", "Random Weapon Prices", 1, 2, Kind::Tri),
    ("Gameplay", "xp-requirements", "Random XP Requirements", 1, 0, Kind::Tri),
    ("Gameplay", "heal-hurt-before-more", "Heal/Hurt Before \"More\"", 2, 6, Kind::Tri),
    ("Features", "menu-wrapping", "Enable Menu Wrapping", 3, 6, Kind::Tri),
    ("Features", "death-necklace", "Enable Death Necklace", 3, 4, Kind::Tri),
    ("Features", "torches-in-battle", "Enable Torches In Battle", 3, 2, Kind::Tri),
    ("Features", "big-swamp", "Big Swamp", 3, 0, Kind::Tri),
    ("Features", "repel-in-dungeons", "Repel in Dungeons", 4, 6, Kind::Tri),
    ("Features", "permanent-repel", "Permanent Repel", 4, 4, Kind::Tri),
    ("Features", "permanent-torch", "Permanent Torch", 4, 2, Kind::Tri),
    ("Monsters", "monster-abilities", "Random Monster Abilities", 5, 6, Kind::Tri),
    ("Monsters", "monster-zones", "Random Monster Zones", 5, 4, Kind::Tri),
    ("Monsters", "monster-stats", "Random Monster Stats", 5, 2, Kind::Tri),
    ("Monsters", "monster-xp-gold", "Random Monster XP & Gold", 5, 0, Kind::Tri),
    ("Monsters", "consistent-stats", "Make Random Stats Consistent", 6, 6, Kind::Tri),
    ("Monsters", "scared-metal-slimes", "Scared Metal Slimes", 6, 4, Kind::Tri),
    ("Monsters", "scaled-metal-slime-xp", "Scaled Metal Slime XP", 6, 2, Kind::Tri),
    ("Shortcuts", "fast-text", "Fast Text", 7, 6, Kind::Tri),
    ("Shortcuts", "speed-hacks", "Speed Hacks", 7, 4, Kind::Tri),
    ("Shortcuts", "open-charlock", "Open Charlock", 7, 2, Kind::Tri),
    ("Shortcuts", "short-charlock", "Short Charlock", 7, 0, Kind::Tri),
    ("Shortcuts", "no-magic-keys", "Don't Require Magic Keys", 8, 6, Kind::Tri),
    ("Challenge", "no-hurtmore", "No Hurtmore", 9, 6, Kind::Tri),
    ("Challenge", "no-numbers", "No Numbers", 9, 4, Kind::Tri),
    ("Challenge", "invisible-hero", "Invisible Hero", 9, 2, Kind::Tri),
    ("Challenge", "invisible-npcs", "Invisible NPCs", 9, 0, Kind::Tri),
    ("Goals", "cursed-princess", "Cursed Princess", 8, 2, Kind::Tri),
    ("Goals", "threes-company", "Three's Company", 8, 0, Kind::Tri),
    ("Cosmetic", "modern-spell-names", "Modern Spell Names", 10, 6, Kind::Tri),
    ("Cosmetic", "noir-mode", "Noir Mode", 10, 4, Kind::Tri),
    ("Cosmetic", "shuffle-music", "Shuffle Music", 14, 7, Kind::Binary),
    ("Cosmetic", "disable-music", "Disable Music", 14, 6, Kind::Binary),
    ("Cosmetic", "disable-spell-flashing", "Disable Spell Flashing", 14, 5, Kind::Binary),
];

/// Controls of the classic 15-byte layout, in registration order.
///
/// The leveling speed dropdown is registered right after the shortcut
/// toggles, matching the order the sections are presented in.
pub fn classic_controls() -> Vec<Control> {
    let mut controls = Vec::with_capacity(CLASSIC_TOGGLES.len() + 1);
    for &(section, key, label, byte, shift, kind) in CLASSIC_TOGGLES {
        let address = FieldAddress::new(byte, shift);
        let control = match kind {
            Kind::Binary => Control::binary(key, label, address),
            Kind::Tri => Control::tri_state(key, label, address),
        };
        controls.push(control.in_section(section));

        if key == "no-magic-keys" {
            controls.push(
                Control::enumerated(
                    "leveling-speed",
                    "Leveling Speed",
                    FieldAddress::new(14, 0),
                    vec![
                        EnumOption::new("Normal", 0),
                        EnumOption::new("Fast", 1),
                        EnumOption::new("Very Fast", 2),
                    ],
                )
                .in_section("Shortcuts"),
            );
        }
    }
    controls
}

/// The classic layout as data.
pub fn classic_layout() -> Layout {
    Layout::from_controls(CLASSIC_SIZE, &classic_controls())
}

/// A classic panel with [`DEFAULT_TOKEN`] applied.
pub fn classic() -> Result<Panel> {
    let mut panel = Panel::new(CLASSIC_SIZE);
    panel.register_all(classic_controls())?;
    panel.apply(DEFAULT_TOKEN);
    Ok(panel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Base32;

    #[test]
    fn test_classic_registers_every_control() {
        let mut panel = Panel::new(CLASSIC_SIZE);
        panel.register_all(classic_controls()).unwrap();
        assert_eq!(panel.len(), CLASSIC_TOGGLES.len() + 1);
        assert_eq!(
            panel.sections(),
            vec![
                "Gameplay",
                "Features",
                "Monsters",
                "Shortcuts",
                "Challenge",
                "Goals",
                "Cosmetic"
            ]
        );
    }

    #[test]
    fn test_default_token_decodes() {
        assert!(Base32::check(DEFAULT_TOKEN, CLASSIC_SIZE).is_ok());
        let panel = classic().unwrap();
        assert_eq!(
            panel.buffer().as_bytes(),
            &[69, 80, 0, 84, 80, 80, 4, 0, 0, 0, 0, 0, 0, 0, 1]
        );

        let value = |key: &str| panel.control(key).unwrap().display();
        assert_eq!(value("shuffle-chests"), "on");
        assert_eq!(value("chest-locations"), "off");
        assert_eq!(value("random-growth"), "on");
        assert_eq!(value("random-map"), "on");
        assert_eq!(value("leveling-speed"), "Fast");
        assert_eq!(value("shuffle-music"), "off");
    }

    #[test]
    fn test_default_token_reencodes() {
        let mut panel = classic().unwrap();
        assert_eq!(panel.encode().as_str(), DEFAULT_TOKEN);
    }

    #[test]
    fn test_classic_layout_builds() {
        let layout = classic_layout();
        assert_eq!(layout.size, CLASSIC_SIZE);
        let panel = layout.build().unwrap();
        assert_eq!(panel.control("leveling-speed").unwrap().width(), 2);
    }
}

use journal_shared::Rgba;

/// Player colors in the host's palette order.
pub const PALETTE: [(&str, Rgba); 12] = [
    ("Red", Rgba::new(0xC5, 0x11, 0x11, 0xFF)),
    ("Blue", Rgba::new(0x13, 0x2E, 0xD1, 0xFF)),
    ("Green", Rgba::new(0x11, 0x7F, 0x2D, 0xFF)),
    ("Pink", Rgba::new(0xED, 0x54, 0xBA, 0xFF)),
    ("Orange", Rgba::new(0xEF, 0x7D, 0x0D, 0xFF)),
    ("Yellow", Rgba::new(0xF5, 0xF5, 0x57, 0xFF)),
    ("Black", Rgba::new(0x3F, 0x47, 0x4E, 0xFF)),
    ("White", Rgba::new(0xD6, 0xE0, 0xF0, 0xFF)),
    ("Purple", Rgba::new(0x6B, 0x2F, 0xBB, 0xFF)),
    ("Brown", Rgba::new(0x71, 0x49, 0x1E, 0xFF)),
    ("Cyan", Rgba::new(0x38, 0xFE, 0xDC, 0xFF)),
    ("Lime", Rgba::new(0x50, 0xEF, 0x39, 0xFF)),
];

// Wraps around past the end of the palette
pub fn palette_color(index: usize) -> (&'static str, Rgba) {
    PALETTE[index % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_first_entry() {
        let (name, color) = palette_color(0);
        assert_eq!(name, "Red");
        assert_eq!(color.to_hex(), "#C51111FF");
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(12), palette_color(0));
        assert_eq!(palette_color(13).0, "Blue");
    }

    #[test]
    fn test_palette_names_unique() {
        let mut names: Vec<&str> = PALETTE.iter().map(|(name, _)| *name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), PALETTE.len());
    }
}

// SPDX-License-Identifier: MPL-2.0
#![doc = r#"
# Design Tokens

Every color, size and shadow used to draw toasts lives here.

## Organization

- **Palette**: Base and semantic colors, including the "rich" variants
- **Opacity**: Standardized opacity levels
- **Spacing**: Spacing scale (4px grid)
- **Sizing**: Component sizes
- **Typography**: Font size scale
- **Border**: Border width scale
- **Radius**: Border radii
- **Shadow**: Shadow definitions

## Examples

```
use iced_toaster::ui::design_tokens::{palette, spacing, opacity};
use iced::Color;

let faded = Color {
    a: opacity::OVERLAY_MEDIUM,
    ..palette::GRAY_900
};
let padding = spacing::MD;
```
"#]

use iced::Color;

// ============================================================================
// Color Palette
// ============================================================================

pub mod palette {
    use iced::Color;

    // Neutrals
    pub const BLACK: Color = Color::BLACK;
    pub const WHITE: Color = Color::WHITE;
    pub const GRAY_950: Color = Color::from_rgb(0.09, 0.09, 0.09);
    pub const GRAY_900: Color = Color::from_rgb(0.1, 0.1, 0.1);
    pub const GRAY_800: Color = Color::from_rgb(0.2, 0.2, 0.2);
    pub const GRAY_400: Color = Color::from_rgb(0.4, 0.4, 0.4);
    pub const GRAY_200: Color = Color::from_rgb(0.75, 0.75, 0.75);
    pub const GRAY_100: Color = Color::from_rgb(0.93, 0.93, 0.93);
    pub const GRAY_50: Color = Color::from_rgb(0.99, 0.99, 0.99);

    // Semantic accents (icons)
    pub const ERROR_500: Color = Color::from_rgb(0.898, 0.224, 0.208);
    pub const WARNING_500: Color = Color::from_rgb(0.945, 0.651, 0.125);
    pub const SUCCESS_500: Color = Color::from_rgb(0.263, 0.702, 0.404);
    pub const INFO_500: Color = Color::from_rgb(0.392, 0.588, 1.0);

    // Rich colors: background, border, text per kind
    pub const SUCCESS_BG: Color = Color::from_rgb(0.925, 0.992, 0.953);
    pub const SUCCESS_BORDER: Color = Color::from_rgb(0.827, 0.992, 0.898);
    pub const SUCCESS_TEXT: Color = Color::from_rgb(0.0, 0.541, 0.18);

    pub const INFO_BG: Color = Color::from_rgb(0.941, 0.973, 1.0);
    pub const INFO_BORDER: Color = Color::from_rgb(0.827, 0.878, 0.992);
    pub const INFO_TEXT: Color = Color::from_rgb(0.035, 0.451, 0.863);

    pub const WARNING_BG: Color = Color::from_rgb(1.0, 0.988, 0.941);
    pub const WARNING_BORDER: Color = Color::from_rgb(0.992, 0.961, 0.827);
    pub const WARNING_TEXT: Color = Color::from_rgb(0.863, 0.463, 0.035);

    pub const ERROR_BG: Color = Color::from_rgb(1.0, 0.941, 0.941);
    pub const ERROR_BORDER: Color = Color::from_rgb(1.0, 0.878, 0.882);
    pub const ERROR_TEXT: Color = Color::from_rgb(0.902, 0.0, 0.0);

    // Rich colors on dark surfaces
    pub const SUCCESS_BG_DARK: Color = Color::from_rgb(0.0, 0.118, 0.063);
    pub const SUCCESS_BORDER_DARK: Color = Color::from_rgb(0.0, 0.231, 0.114);
    pub const SUCCESS_TEXT_DARK: Color = Color::from_rgb(0.376, 0.949, 0.647);

    pub const INFO_BG_DARK: Color = Color::from_rgb(0.0, 0.071, 0.161);
    pub const INFO_BORDER_DARK: Color = Color::from_rgb(0.0, 0.133, 0.318);
    pub const INFO_TEXT_DARK: Color = Color::from_rgb(0.533, 0.749, 0.992);

    pub const WARNING_BG_DARK: Color = Color::from_rgb(0.114, 0.063, 0.0);
    pub const WARNING_BORDER_DARK: Color = Color::from_rgb(0.200, 0.110, 0.0);
    pub const WARNING_TEXT_DARK: Color = Color::from_rgb(0.953, 0.820, 0.549);

    pub const ERROR_BG_DARK: Color = Color::from_rgb(0.176, 0.020, 0.020);
    pub const ERROR_BORDER_DARK: Color = Color::from_rgb(0.329, 0.031, 0.031);
    pub const ERROR_TEXT_DARK: Color = Color::from_rgb(1.0, 0.620, 0.620);
}

// ============================================================================
// Opacity Scale
// ============================================================================

pub mod opacity {
    pub const TRANSPARENT: f32 = 0.0;
    pub const OVERLAY_SUBTLE: f32 = 0.2;
    pub const OVERLAY_MEDIUM: f32 = 0.5;
    pub const OVERLAY_STRONG: f32 = 0.7;
    pub const OPAQUE: f32 = 1.0;

    /// Toasts hidden behind the front one in a collapsed stack.
    pub const BEHIND: f32 = 0.85;
}

// ============================================================================
// Spacing Scale
// ============================================================================

pub mod spacing {
    pub const XXS: f32 = 4.0;
    pub const XS: f32 = 8.0;
    pub const SM: f32 = 12.0;
    pub const MD: f32 = 16.0;
    pub const LG: f32 = 24.0;
}

// ============================================================================
// Component Sizing
// ============================================================================

pub mod sizing {
    pub const ICON_SM: f32 = 12.0;
    pub const ICON_MD: f32 = 16.0;

    pub const CLOSE_BUTTON: f32 = 20.0;
    pub const BUTTON_HEIGHT: f32 = 24.0;

    /// Smallest height a toast measures at, used before the first layout.
    pub const TOAST_MIN_HEIGHT: f32 = 52.0;
}

// ============================================================================
// Typography Scale
// ============================================================================

pub mod typography {
    pub const TITLE: f32 = 13.0;
    pub const BODY: f32 = 13.0;
    pub const CAPTION: f32 = 12.0;
}

// ============================================================================
// Border Widths
// ============================================================================

pub mod border {
    pub const WIDTH_SM: f32 = 1.0;
}

// ============================================================================
// Border Radius
// ============================================================================

pub mod radius {
    pub const SM: f32 = 4.0;
    pub const MD: f32 = 8.0;
    pub const FULL: f32 = 9999.0;
}

// ============================================================================
// Shadow Definitions
// ============================================================================

pub mod shadow {
    use super::palette;
    use iced::{Color, Shadow, Vector};

    pub const NONE: Shadow = Shadow {
        color: palette::BLACK,
        offset: Vector::ZERO,
        blur_radius: 0.0,
    };

    pub const TOAST: Shadow = Shadow {
        color: Color {
            a: 0.1,
            ..palette::BLACK
        },
        offset: Vector { x: 0.0, y: 4.0 },
        blur_radius: 12.0,
    };
}

/// Applies `alpha` to `color`.
#[must_use]
pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color { a: alpha, ..color }
}

// ============================================================================
// Compile-time Validation
// ============================================================================

const _: () = {
    assert!(spacing::XS > spacing::XXS);
    assert!(spacing::SM > spacing::XS);
    assert!(spacing::MD > spacing::SM);
    assert!(spacing::LG > spacing::MD);

    assert!(opacity::TRANSPARENT == 0.0);
    assert!(opacity::OPAQUE == 1.0);
    assert!(opacity::BEHIND > opacity::OVERLAY_STRONG && opacity::BEHIND < 1.0);

    assert!(sizing::ICON_MD > sizing::ICON_SM);
    assert!(sizing::CLOSE_BUTTON > sizing::ICON_SM);

    assert!(typography::TITLE >= typography::CAPTION);
    assert!(radius::MD > radius::SM);
};

//! Text placement and element bounds.
//!
//! Headline and subtitle positions are either a custom absolute position
//! or derived from the role's alignment and vertical bucket. The offsets
//! below are fixed layout constants; saved documents depend on them.

use crate::model::*;

/// Horizontal inset for left/right aligned text.
const SIDE_INSET: f32 = 50.0;
/// Headline y for the `Top` bucket.
const TOP_Y: f32 = 100.0;
/// Distance of the `Bottom` bucket headline from the bottom edge.
const BOTTOM_OFFSET: f32 = 150.0;
/// Gap between the headline baseline box and the subtitle.
const SUBTITLE_GAP: f32 = 20.0;
/// Wrap width of non-centered text when no explicit width is set.
const SIDE_TEXT_WIDTH: f32 = 600.0;
/// Horizontal margin removed from the canvas width for centered text.
const CENTER_TEXT_MARGIN: f32 = 100.0;
/// Line box height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.2;

fn aligned_x(alignment: Alignment, canvas: CanvasSize, center: f32) -> f32 {
    match alignment {
        Alignment::Left => SIDE_INSET,
        Alignment::Right => canvas.width_f() - SIDE_INSET,
        Alignment::Center => center,
    }
}

pub fn headline_position(text: &TextSettings, canvas: CanvasSize) -> Position {
    if let Some(pos) = text.headline_custom_position {
        return pos;
    }
    let x = aligned_x(text.headline_alignment, canvas, canvas.width_f() / 2.0);
    let y = match text.headline_position {
        VerticalBucket::Top => TOP_Y,
        VerticalBucket::Bottom => canvas.height_f() - BOTTOM_OFFSET,
        VerticalBucket::Middle => canvas.height_f() / 2.0,
    };
    Position::new(x, y)
}

/// Subtitle placement. Derived placement follows the headline: centered
/// subtitles share its x, and y sits one headline size plus a gap below it.
pub fn subtitle_position(text: &TextSettings, canvas: CanvasSize) -> Position {
    if let Some(pos) = text.subtitle_custom_position {
        return pos;
    }
    let headline = headline_position(text, canvas);
    let x = aligned_x(text.subtitle_alignment, canvas, headline.x);
    let y = headline.y + text.headline_size + SUBTITLE_GAP;
    Position::new(x, y)
}

pub fn text_position(text: &TextSettings, canvas: CanvasSize, role: TextRole) -> Position {
    match role {
        TextRole::Headline => headline_position(text, canvas),
        TextRole::Subtitle => subtitle_position(text, canvas),
    }
}

/// Wrap width of a text role: the transformed width if one was set,
/// otherwise the canvas width minus margins for centered text.
pub fn text_width(text: &TextSettings, canvas: CanvasSize, role: TextRole) -> f32 {
    text.wrap_width(role).unwrap_or(match text.alignment(role) {
        Alignment::Center => canvas.width_f() - CENTER_TEXT_MARGIN,
        _ => SIDE_TEXT_WIDTH,
    })
}

/// Measured box of a text role. The anchor is the left edge, centre or
/// right edge of the box depending on alignment; height is one line box.
pub fn text_bounds(text: &TextSettings, canvas: CanvasSize, role: TextRole) -> Bounds {
    let pos = text_position(text, canvas, role);
    let width = text_width(text, canvas, role);
    let offset = match text.alignment(role) {
        Alignment::Left => 0.0,
        Alignment::Center => width / 2.0,
        Alignment::Right => width,
    };
    Bounds::new(pos.x - offset, pos.y, width, text.size(role) * LINE_HEIGHT)
}

/// Centered, aspect-preserving placement of a backdrop image of the given
/// natural size, fitted entirely inside the canvas.
pub fn fit_background(image_width: f32, image_height: f32, canvas: CanvasSize) -> Bounds {
    let cw = canvas.width_f();
    let ch = canvas.height_f();
    if image_width <= 0.0 || image_height <= 0.0 {
        return Bounds::new(0.0, 0.0, cw, ch);
    }
    let image_ratio = image_width / image_height;
    let canvas_ratio = cw / ch;
    let (width, height) = if image_ratio > canvas_ratio {
        (cw, cw / image_ratio)
    } else {
        (ch * image_ratio, ch)
    };
    Bounds::new((cw - width) / 2.0, (ch - height) / 2.0, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text() -> TextSettings {
        TextSettings::default()
    }

    #[test]
    fn right_bottom_headline() {
        let mut t = text();
        t.headline_alignment = Alignment::Right;
        t.headline_position = VerticalBucket::Bottom;
        assert_eq!(
            headline_position(&t, CanvasSize::HD),
            Position::new(1230.0, 570.0)
        );
    }

    #[test]
    fn left_top_headline() {
        let mut t = text();
        t.headline_alignment = Alignment::Left;
        t.headline_position = VerticalBucket::Top;
        assert_eq!(
            headline_position(&t, CanvasSize::HD),
            Position::new(50.0, 100.0)
        );
    }

    #[test]
    fn centered_subtitle_follows_headline() {
        let t = text();
        let h = headline_position(&t, CanvasSize::HD);
        let s = subtitle_position(&t, CanvasSize::HD);
        assert_eq!(h, Position::new(640.0, 360.0));
        assert_eq!(s, Position::new(640.0, 360.0 + 48.0 + 20.0));
    }

    #[test]
    fn subtitle_follows_custom_headline() {
        let mut t = text();
        t.headline_custom_position = Some(Position::new(300.0, 200.0));
        t.subtitle_alignment = Alignment::Right;
        let s = subtitle_position(&t, CanvasSize::HD);
        assert_eq!(s, Position::new(1230.0, 268.0));
    }

    #[test]
    fn custom_position_overrides_derived() {
        let mut t = text();
        t.subtitle_custom_position = Some(Position::new(7.0, 9.0));
        assert_eq!(
            subtitle_position(&t, CanvasSize::HD),
            Position::new(7.0, 9.0)
        );
    }

    #[test]
    fn text_bounds_use_line_height() {
        let mut t = text();
        let b = text_bounds(&t, CanvasSize::HD, TextRole::Headline);
        assert_eq!(b.width, 1180.0);
        assert!((b.height - 57.6).abs() < 1e-3);

        t.subtitle_alignment = Alignment::Left;
        let b = text_bounds(&t, CanvasSize::HD, TextRole::Subtitle);
        assert_eq!(b.width, 600.0);
        assert!((b.height - 28.8).abs() < 1e-3);

        t.subtitle_width = Some(320.0);
        let b = text_bounds(&t, CanvasSize::HD, TextRole::Subtitle);
        assert_eq!(b.width, 320.0);
    }

    #[test]
    fn text_box_hangs_off_its_anchor_by_alignment() {
        let mut t = text();
        let b = text_bounds(&t, CanvasSize::HD, TextRole::Headline);
        assert_eq!((b.x, b.x + b.width), (50.0, 1230.0));

        t.headline_alignment = Alignment::Right;
        let b = text_bounds(&t, CanvasSize::HD, TextRole::Headline);
        assert_eq!((b.x, b.x + b.width), (630.0, 1230.0));

        t.headline_alignment = Alignment::Left;
        let b = text_bounds(&t, CanvasSize::HD, TextRole::Headline);
        assert_eq!((b.x, b.x + b.width), (50.0, 650.0));
    }

    #[test]
    fn background_fit_letterboxes_wide_images() {
        let b = fit_background(2560.0, 720.0, CanvasSize::HD);
        assert_eq!(b.width, 1280.0);
        assert_eq!(b.height, 360.0);
        assert_eq!(b.y, 180.0);

        let b = fit_background(360.0, 720.0, CanvasSize::HD);
        assert_eq!(b.width, 360.0);
        assert_eq!(b.x, 460.0);
    }
}

//! The header row with its select-all checkbox.
//!
//! [`CheckHeader`] paints every header section and overlays a checkbox
//! glyph on section 0. It deals purely in *sections* (physical grid
//! columns, section 0 being the reserved one) and never sees the logical
//! column offset. The owning table feeds it the current section layout
//! before painting and hit-testing, routes header-row input to it, and
//! reacts to the [`HeaderEvent`]s it reports.

use crate::buffer::Buffer;
use crate::event::MouseButton;
use crate::geometry::Rect;
use crate::style::{GridStyle, TextAttrs};
use crate::text::{char_width, truncate_to_width};

/// The aggregate on/off value shown by the header checkbox.
///
/// The header is strictly binary; a partially checked table shows `Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderState {
    #[default]
    Off,
    On,
}

impl HeaderState {
    pub fn is_on(self) -> bool {
        matches!(self, HeaderState::On)
    }

    pub fn from_checked(checked: bool) -> Self {
        if checked { HeaderState::On } else { HeaderState::Off }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            HeaderState::Off => HeaderState::On,
            HeaderState::On => HeaderState::Off,
        }
    }

    /// Aggregate a sequence of row checkbox states.
    ///
    /// Stops at the first unchecked state. Returns `None` for an empty
    /// sequence: with zero rows there is no defined aggregate and the
    /// caller leaves the header as it was.
    pub fn recompute(states: impl IntoIterator<Item = bool>) -> Option<HeaderState> {
        let mut seen_any = false;
        for checked in states {
            if !checked {
                return Some(HeaderState::Off);
            }
            seen_any = true;
        }
        seen_any.then_some(HeaderState::On)
    }
}

/// A completed click reported by [`CheckHeader::on_release`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderEvent {
    /// The select-all toggle flipped; carries the new value.
    SelectAll(bool),
    /// A press/release pair landed on the same non-checkbox section.
    SectionClicked(usize),
}

#[derive(Debug, Clone, Copy, Default)]
struct HeaderSection {
    width: u16,
    hidden: bool,
}

/// Header widget with a checkbox glyph over section 0.
#[derive(Debug, Default)]
pub struct CheckHeader {
    state: HeaderState,
    /// Mouse button currently held down somewhere on the header.
    pressed: bool,
    /// Pointer over the checkbox section and no button held.
    hover: bool,
    /// Section the current press started on, for click-cancel.
    pressed_section: Option<usize>,
    sections: Vec<HeaderSection>,
    dirty: bool,
}

impl CheckHeader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HeaderState {
        self.state
    }

    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    /// Set the checkbox value. A no-op when the value is unchanged;
    /// otherwise section 0 is marked for repaint.
    pub fn set_on(&mut self, on: bool) {
        let next = HeaderState::from_checked(on);
        if self.state != next {
            self.state = next;
            self.dirty = true;
        }
    }

    /// Replace the section layout. Called by the table whenever column
    /// widths or visibility change, before painting or hit-testing.
    pub fn set_sections(&mut self, widths_and_hidden: impl IntoIterator<Item = (u16, bool)>) {
        self.sections = widths_and_hidden
            .into_iter()
            .map(|(width, hidden)| HeaderSection { width, hidden })
            .collect();
    }

    /// Map an x offset within the header to a section index, skipping
    /// hidden sections.
    pub fn section_at(&self, x: u16) -> Option<usize> {
        let mut cursor = 0u16;
        for (index, section) in self.sections.iter().enumerate() {
            if section.hidden {
                continue;
            }
            let right = cursor.saturating_add(section.width);
            if x >= cursor && x < right {
                return Some(index);
            }
            cursor = right;
        }
        None
    }

    /// Left-button press on the header. Returns `true` when the press was
    /// claimed by the checkbox section (so it must not start a sort).
    pub fn on_press(&mut self, x: u16, button: MouseButton) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        self.pressed = true;
        self.pressed_section = self.section_at(x);
        self.dirty = true;
        self.pressed_section == Some(0)
    }

    /// Left-button release on the header.
    ///
    /// Only a press/release pair landing on the same section completes a
    /// click; anything else cancels. A completed click on section 0 flips
    /// the select-all state and reports the new value.
    pub fn on_release(&mut self, x: u16, button: MouseButton) -> Option<HeaderEvent> {
        if button != MouseButton::Left {
            return None;
        }
        self.pressed = false;
        self.dirty = true;
        let released = self.section_at(x);
        let pressed = self.pressed_section.take();
        match (pressed, released) {
            (Some(0), Some(0)) => {
                self.state = self.state.toggled();
                Some(HeaderEvent::SelectAll(self.state.is_on()))
            }
            (Some(section), Some(release)) if section == release => {
                Some(HeaderEvent::SectionClicked(section))
            }
            _ => None,
        }
    }

    /// Abort an in-flight press, e.g. when the button comes up outside
    /// the header row. Returns true if the visual state changed.
    pub fn cancel_press(&mut self) -> bool {
        self.pressed_section = None;
        if self.pressed {
            self.pressed = false;
            self.dirty = true;
            return true;
        }
        false
    }

    /// Pointer movement over the header row.
    pub fn on_mouse_move(&mut self, x: u16) {
        let hover = self.section_at(x) == Some(0);
        if self.hover != hover {
            self.hover = hover;
            self.dirty = true;
        }
    }

    /// Pointer left the header row.
    pub fn clear_hover(&mut self) {
        if self.hover {
            self.hover = false;
            self.dirty = true;
        }
    }

    /// Paint one header section into `rect`.
    ///
    /// Draws the default section content (label over the header colors),
    /// then overlays the checkbox glyph centered in section 0: reverse
    /// video while pressed, bold while hovered and not pressed.
    pub fn paint_section(
        &self,
        buf: &mut Buffer,
        rect: Rect,
        section: usize,
        label: Option<&str>,
        style: &GridStyle,
    ) {
        if rect.is_empty() {
            return;
        }
        buf.fill_rect(rect, style.header_fg, style.header_bg);
        if let Some(label) = label
            && rect.width > 1
        {
            let text = truncate_to_width(label, (rect.width - 1) as usize);
            buf.draw_text(
                rect.x + 1,
                rect.y,
                rect.width - 1,
                &text,
                style.header_fg,
                style.header_bg,
                Default::default(),
            );
        }
        if section == 0 {
            let glyph = if self.state.is_on() {
                style.checked
            } else {
                style.unchecked
            };
            let glyph_width = char_width(glyph).max(1) as u16;
            let dx = rect.width.saturating_sub(glyph_width) / 2;
            let dy = rect.height / 2;
            let mut attrs = TextAttrs::new();
            if self.pressed {
                attrs = attrs.reverse();
            } else if self.hover {
                attrs = attrs.bold();
            }
            let mut glyph_buf = [0u8; 4];
            buf.draw_text(
                rect.x + dx,
                rect.y + dy,
                glyph_width,
                glyph.encode_utf8(&mut glyph_buf),
                style.header_fg,
                style.header_bg,
                attrs,
            );
        }
    }

    /// Whether a repaint is pending; painting state changed since the
    /// last [`Self::clear_dirty`].
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_with_sections(widths: &[u16]) -> CheckHeader {
        let mut header = CheckHeader::new();
        header.set_sections(widths.iter().map(|&w| (w, false)));
        header
    }

    #[test]
    fn test_recompute_all_checked_is_on() {
        assert_eq!(
            HeaderState::recompute([true, true, true]),
            Some(HeaderState::On)
        );
    }

    #[test]
    fn test_recompute_stops_at_first_unchecked() {
        assert_eq!(
            HeaderState::recompute([true, false, true]),
            Some(HeaderState::Off)
        );
    }

    #[test]
    fn test_recompute_empty_is_undefined() {
        assert_eq!(HeaderState::recompute([]), None);
    }

    #[test]
    fn test_complete_click_on_section_zero_toggles() {
        let mut header = header_with_sections(&[3, 10, 10]);
        assert!(header.on_press(1, MouseButton::Left));
        assert_eq!(
            header.on_release(2, MouseButton::Left),
            Some(HeaderEvent::SelectAll(true))
        );
        assert!(header.is_on());

        assert!(header.on_press(0, MouseButton::Left));
        assert_eq!(
            header.on_release(0, MouseButton::Left),
            Some(HeaderEvent::SelectAll(false))
        );
        assert!(!header.is_on());
    }

    #[test]
    fn test_release_on_other_section_cancels() {
        let mut header = header_with_sections(&[3, 10, 10]);
        header.on_press(1, MouseButton::Left);
        assert_eq!(header.on_release(5, MouseButton::Left), None);
        assert!(!header.is_on(), "cancelled click must not toggle");
    }

    #[test]
    fn test_release_without_press_does_nothing() {
        let mut header = header_with_sections(&[3, 10]);
        assert_eq!(header.on_release(1, MouseButton::Left), None);
        assert!(!header.is_on());
    }

    #[test]
    fn test_data_section_click_reports_section() {
        let mut header = header_with_sections(&[3, 10, 10]);
        assert!(!header.on_press(7, MouseButton::Left));
        assert_eq!(
            header.on_release(4, MouseButton::Left),
            Some(HeaderEvent::SectionClicked(1))
        );
    }

    #[test]
    fn test_right_button_is_ignored() {
        let mut header = header_with_sections(&[3, 10]);
        assert!(!header.on_press(1, MouseButton::Right));
        assert_eq!(header.on_release(1, MouseButton::Right), None);
        assert!(!header.is_on());
    }

    #[test]
    fn test_section_at_skips_hidden_sections() {
        let mut header = CheckHeader::new();
        header.set_sections([(3, false), (10, true), (10, false)]);
        assert_eq!(header.section_at(0), Some(0));
        assert_eq!(header.section_at(2), Some(0));
        assert_eq!(header.section_at(3), Some(2), "hidden section occupies no space");
        assert_eq!(header.section_at(12), Some(2));
        assert_eq!(header.section_at(13), None);
    }

    #[test]
    fn test_set_on_unchanged_is_not_dirty() {
        let mut header = CheckHeader::new();
        header.clear_dirty();
        header.set_on(false);
        assert!(!header.is_dirty());
        header.set_on(true);
        assert!(header.is_dirty());
    }

    #[test]
    fn test_paint_draws_glyph_centered_in_section_zero() {
        let header = header_with_sections(&[5, 10]);
        let mut buf = Buffer::new(15, 1);
        let style = GridStyle::default();
        header.paint_section(&mut buf, Rect::new(0, 0, 5, 1), 0, None, &style);
        assert_eq!(buf.get(2, 0).unwrap().char, style.unchecked);
    }

    #[test]
    fn test_paint_draws_label_in_data_sections() {
        let header = header_with_sections(&[3, 10]);
        let mut buf = Buffer::new(15, 1);
        let style = GridStyle::default();
        header.paint_section(&mut buf, Rect::new(3, 0, 10, 1), 1, Some("Name"), &style);
        assert_eq!(buf.get(4, 0).unwrap().char, 'N');
        assert_eq!(buf.get(7, 0).unwrap().char, 'e');
        assert_eq!(buf.get(4, 0).unwrap().bg, style.header_bg);
    }
}

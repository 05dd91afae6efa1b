// src/app/ui/header.rs
use std::time::{Duration, Instant};

use eframe::egui as eg;

use super::BRAND_RED;
use crate::app::state::{AppState, Dropdown, Intent};
use crate::app::types::{NOTIFICATIONS, PROFILES};
use crate::app::utils::title_line;

pub const SUGGESTION_DEBOUNCE: Duration = Duration::from_millis(300);
pub const SUGGESTION_DISPLAY_LIMIT: usize = 6;

/// Transient search box state; the only view state not held by `AppState`.
#[derive(Default)]
pub struct HeaderState {
    pub input: String,
    last_edit: Option<Instant>,
    suggestions_open: bool,
    focus_requested: bool,
}

impl HeaderState {
    pub fn edited(&mut self, now: Instant) {
        self.last_edit = Some(now);
        self.suggestions_open = true;
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.last_edit = None;
        self.suggestions_open = false;
    }

    pub fn request_focus(&mut self) {
        self.focus_requested = true;
    }

    pub fn close_suggestions(&mut self) {
        self.suggestions_open = false;
    }

    /// Popup shows once typing has paused for the debounce window.
    pub fn suggestions_visible(&self, now: Instant) -> bool {
        self.suggestions_open
            && !self.input.trim().is_empty()
            && self
                .last_edit
                .is_some_and(|t| now.duration_since(t) >= SUGGESTION_DEBOUNCE)
    }

    /// Time left before the popup may appear, if it is still pending.
    pub fn debounce_remaining(&self, now: Instant) -> Option<Duration> {
        if !self.suggestions_open {
            return None;
        }
        let elapsed = now.duration_since(self.last_edit?);
        SUGGESTION_DEBOUNCE.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}

/// Where the dropdown toggles sit, so the dropdowns can anchor to them.
#[derive(Clone, Copy, Debug)]
pub struct HeaderResponse {
    pub notifications_button: eg::Rect,
    pub profile_button: eg::Rect,
}

impl HeaderResponse {
    fn unplaced() -> Self {
        Self {
            notifications_button: eg::Rect::NOTHING,
            profile_button: eg::Rect::NOTHING,
        }
    }
}

pub fn show(
    ctx: &eg::Context,
    state: &AppState,
    header: &mut HeaderState,
    out: &mut Vec<Intent>,
) -> HeaderResponse {
    let fill = if state.is_scrolled() {
        eg::Color32::from_rgb(12, 12, 12)
    } else {
        eg::Color32::from_rgb(20, 20, 20)
    };
    let now = Instant::now();
    let mut resp = HeaderResponse::unplaced();
    let mut search_rect = eg::Rect::NOTHING;

    eg::TopBottomPanel::top("header")
        .frame(
            eg::Frame::none()
                .fill(fill)
                .inner_margin(eg::Margin::symmetric(super::SIDE_PAD, 12.0)),
        )
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let logo = ui.add(
                    eg::Label::new(
                        eg::RichText::new("MARQUEE")
                            .size(26.0)
                            .strong()
                            .color(BRAND_RED),
                    )
                    .sense(eg::Sense::click()),
                );
                if logo.clicked() {
                    header.clear();
                    out.push(Intent::LogoClick);
                }

                ui.add_space(24.0);
                if ui.link("Home").clicked() {
                    header.clear();
                    out.push(Intent::LogoClick);
                }
                if ui.link("My List").clicked() {
                    header.clear();
                    out.push(Intent::LogoClick);
                    out.push(Intent::ShowMyList);
                }

                ui.with_layout(eg::Layout::right_to_left(eg::Align::Center), |ui| {
                    let avatar = PROFILES.first().map_or(BRAND_RED, |p| {
                        eg::Color32::from_rgb(p.color[0], p.color[1], p.color[2])
                    });
                    let profile = ui.add(
                        eg::Button::new(eg::RichText::new("▾").color(eg::Color32::WHITE))
                            .fill(avatar)
                            .selected(state.dropdown() == Dropdown::Profile),
                    );
                    if profile.clicked() {
                        out.push(Intent::ToggleProfile);
                    }
                    resp.profile_button = profile.rect;

                    let unread = NOTIFICATIONS.iter().filter(|n| n.unread).count();
                    let bell_label = if unread > 0 {
                        format!("🔔 {unread}")
                    } else {
                        "🔔".to_string()
                    };
                    let bell = ui.add(
                        eg::Button::new(bell_label)
                            .selected(state.dropdown() == Dropdown::Notifications),
                    );
                    if bell.clicked() {
                        out.push(Intent::ToggleNotifications);
                    }
                    resp.notifications_button = bell.rect;

                    let edit = ui.add(
                        eg::TextEdit::singleline(&mut header.input)
                            .hint_text("🔍 Titles, genres")
                            .desired_width(220.0),
                    );
                    if header.focus_requested {
                        edit.request_focus();
                        header.focus_requested = false;
                    }
                    if edit.changed() {
                        header.edited(now);
                        out.push(Intent::Search(header.input.clone()));
                    }
                    if edit.lost_focus() && ui.input(|i| i.key_pressed(eg::Key::Enter)) {
                        header.close_suggestions();
                    }
                    search_rect = edit.rect;
                });
            });
        });

    show_suggestions(ctx, state, header, search_rect, now, out);

    if let Some(wait) = header.debounce_remaining(now) {
        ctx.request_repaint_after(wait);
    }
    resp
}

fn show_suggestions(
    ctx: &eg::Context,
    state: &AppState,
    header: &mut HeaderState,
    anchor: eg::Rect,
    now: Instant,
    out: &mut Vec<Intent>,
) {
    if !header.suggestions_visible(now) || anchor == eg::Rect::NOTHING {
        return;
    }
    let suggestions = state.search_suggestions();
    if suggestions.is_empty() {
        return;
    }

    let area = eg::Area::new(eg::Id::new("search_suggestions"))
        .order(eg::Order::Foreground)
        .fixed_pos(anchor.left_bottom() + eg::vec2(0.0, 4.0))
        .show(ctx, |ui| {
            eg::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(anchor.width().max(260.0));
                for entry in suggestions.iter().take(SUGGESTION_DISPLAY_LIMIT) {
                    let item = entry.item;
                    let label = format!(
                        "{}\n{}",
                        title_line(&item.title, item.year),
                        item.genre.join(", ")
                    );
                    if ui
                        .add(eg::SelectableLabel::new(false, label))
                        .clicked()
                    {
                        header.close_suggestions();
                        out.push(Intent::SelectForDetail(item.id.clone()));
                    }
                }
                if suggestions.len() > SUGGESTION_DISPLAY_LIMIT {
                    ui.label(
                        eg::RichText::new(format!(
                            "+{} more in results",
                            suggestions.len() - SUGGESTION_DISPLAY_LIMIT
                        ))
                        .weak(),
                    );
                }
            });
        });

    let clicked_outside = ctx.input(|i| {
        i.pointer.any_click()
            && i
                .pointer
                .interact_pos()
                .is_some_and(|p| !area.response.rect.contains(p) && !anchor.contains(p))
    });
    if clicked_outside || ctx.input(|i| i.key_pressed(eg::Key::Escape)) {
        header.close_suggestions();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestions_wait_for_debounce() {
        let mut h = HeaderState::default();
        let t0 = Instant::now();
        h.input = "dra".into();
        h.edited(t0);
        assert!(!h.suggestions_visible(t0));
        assert!(h.debounce_remaining(t0).is_some());

        let later = t0 + SUGGESTION_DEBOUNCE;
        assert!(h.suggestions_visible(later));
        assert!(h.debounce_remaining(later).is_none());
    }

    #[test]
    fn blank_input_or_closed_popup_hides_suggestions() {
        let mut h = HeaderState::default();
        let t0 = Instant::now();
        h.input = "   ".into();
        h.edited(t0);
        assert!(!h.suggestions_visible(t0 + SUGGESTION_DEBOUNCE));

        h.input = "orbit".into();
        h.edited(t0);
        h.close_suggestions();
        assert!(!h.suggestions_visible(t0 + SUGGESTION_DEBOUNCE));
        assert!(h.debounce_remaining(t0).is_none());
    }

    #[test]
    fn clear_resets_everything() {
        let mut h = HeaderState::default();
        h.input = "orbit".into();
        h.edited(Instant::now());
        h.clear();
        assert!(h.input.is_empty());
        assert!(!h.suggestions_visible(Instant::now() + SUGGESTION_DEBOUNCE));
    }
}

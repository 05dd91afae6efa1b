// src/app/ui/dropdowns.rs
use chrono::Local;
use eframe::egui as eg;

use super::header::HeaderResponse;
use super::BRAND_RED;
use crate::app::state::{AppState, Dropdown, Intent};
use crate::app::types::{NOTIFICATIONS, PROFILES};
use crate::app::utils::{format_age, minutes_before_now};

const PANEL_W: f32 = 300.0;

/// Render whichever dropdown is open; a click anywhere else closes it.
pub fn show(
    ctx: &eg::Context,
    state: &AppState,
    anchors: &HeaderResponse,
    out: &mut Vec<Intent>,
) {
    let (anchor, area_rect) = match state.dropdown() {
        Dropdown::None => return,
        Dropdown::Profile => (
            anchors.profile_button,
            popup(ctx, "profile_dropdown", anchors.profile_button, |ui| {
                profile_menu(ui, out)
            }),
        ),
        Dropdown::Notifications => (
            anchors.notifications_button,
            popup(ctx, "notification_dropdown", anchors.notifications_button, |ui| {
                notification_menu(ui)
            }),
        ),
    };

    let clicked_outside = ctx.input(|i| {
        i.pointer.any_click()
            && i
                .pointer
                .interact_pos()
                .is_some_and(|p| !area_rect.contains(p) && !anchor.contains(p))
    });
    if clicked_outside {
        out.push(Intent::CloseDropdowns);
    }
}

fn popup(
    ctx: &eg::Context,
    id: &str,
    anchor: eg::Rect,
    add_contents: impl FnOnce(&mut eg::Ui),
) -> eg::Rect {
    let pos = eg::pos2(anchor.right() - PANEL_W, anchor.bottom() + 6.0);
    eg::Area::new(eg::Id::new(id))
        .order(eg::Order::Foreground)
        .fixed_pos(pos)
        .show(ctx, |ui| {
            eg::Frame::popup(ui.style())
                .fill(eg::Color32::from_rgba_unmultiplied(10, 10, 10, 240))
                .show(ui, |ui| {
                    ui.set_width(PANEL_W);
                    add_contents(ui);
                });
        })
        .response
        .rect
}

fn profile_menu(ui: &mut eg::Ui, out: &mut Vec<Intent>) {
    for profile in PROFILES {
        ui.horizontal(|ui| {
            let (rect, _) = ui.allocate_exact_size(eg::vec2(24.0, 24.0), eg::Sense::hover());
            let [r, g, b] = profile.color;
            ui.painter()
                .rect_filled(rect, 4.0, eg::Color32::from_rgb(r, g, b));
            ui.label(profile.name);
        });
    }
    ui.label(eg::RichText::new("Manage Profiles").weak());
    ui.separator();
    ui.label("Account");
    ui.label("Help Center");
    ui.separator();
    if ui
        .add(eg::Button::new("Sign out of Marquee").frame(false))
        .clicked()
    {
        out.push(Intent::SignOut);
    }
}

fn notification_menu(ui: &mut eg::Ui) {
    ui.label(eg::RichText::new("Notifications").strong());
    ui.separator();
    let now = Local::now();
    for (i, n) in NOTIFICATIONS.iter().enumerate() {
        if i > 0 {
            ui.separator();
        }
        ui.horizontal(|ui| {
            let dot = if n.unread { BRAND_RED } else { eg::Color32::TRANSPARENT };
            let (rect, _) = ui.allocate_exact_size(eg::vec2(8.0, 8.0), eg::Sense::hover());
            ui.painter().circle_filled(rect.center(), 4.0, dot);
            ui.vertical(|ui| {
                ui.label(eg::RichText::new(n.title).strong());
                ui.add(eg::Label::new(n.body).wrap());
                ui.label(
                    eg::RichText::new(format_age(minutes_before_now(n.minutes_ago), now))
                        .small()
                        .weak(),
                );
            });
        });
    }
}

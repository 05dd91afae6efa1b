// src/app/ui/mod.rs
pub mod dropdowns;
pub mod header;
pub mod hero;
pub mod rows;
pub mod search_results;

use eframe::egui as eg;

use super::gfx::{paint_cover, paint_fade, paint_placeholder, Posters};
use super::state::{Intent, LikedItem};
use super::utils::format_likes;

pub const BRAND_RED: eg::Color32 = eg::Color32::from_rgb(229, 9, 20);
pub const PAGE_BG: eg::Color32 = eg::Color32::from_rgb(20, 20, 20);
pub const SIDE_PAD: f32 = 40.0;

pub const CARD_W: f32 = 170.0;
pub const CARD_H: f32 = CARD_W * 1.5;
pub const CARD_GAP: f32 = 8.0;

pub fn apply_theme(ctx: &eg::Context) {
    let mut style = (*ctx.style()).clone();
    let text = eg::Color32::from_rgb(235, 235, 235);
    let muted = eg::Color32::from_rgb(150, 150, 150);

    style.visuals.dark_mode = true;
    style.visuals.panel_fill = PAGE_BG;
    style.visuals.window_fill = eg::Color32::from_rgb(24, 24, 24);
    style.visuals.extreme_bg_color = eg::Color32::from_rgb(12, 12, 12);
    style.visuals.faint_bg_color = eg::Color32::from_rgb(32, 32, 32);
    style.visuals.window_rounding = eg::Rounding::same(8.0);
    style.visuals.window_stroke = eg::Stroke::new(1.0, eg::Color32::from_gray(50));

    style.visuals.widgets.noninteractive.fg_stroke = eg::Stroke::new(1.0, text);
    style.visuals.widgets.inactive.bg_fill = eg::Color32::from_rgb(45, 45, 45);
    style.visuals.widgets.inactive.weak_bg_fill = eg::Color32::from_rgb(45, 45, 45);
    style.visuals.widgets.inactive.fg_stroke = eg::Stroke::new(1.0, text);
    style.visuals.widgets.inactive.rounding = eg::Rounding::same(4.0);
    style.visuals.widgets.hovered.bg_fill = eg::Color32::from_rgb(70, 70, 70);
    style.visuals.widgets.hovered.weak_bg_fill = eg::Color32::from_rgb(70, 70, 70);
    style.visuals.widgets.hovered.rounding = eg::Rounding::same(4.0);
    style.visuals.widgets.active.rounding = eg::Rounding::same(4.0);
    style.visuals.selection.bg_fill = BRAND_RED.linear_multiply(0.4);
    style.visuals.hyperlink_color = muted;

    style.spacing.item_spacing = eg::vec2(8.0, 6.0);
    style.spacing.button_padding = eg::vec2(12.0, 6.0);
    ctx.set_style(style);
}

/// Solid white "Play" button used by the hero, cards and modal.
pub fn play_button(ui: &mut eg::Ui) -> eg::Response {
    ui.add(
        eg::Button::new(
            eg::RichText::new("▶  Play")
                .size(16.0)
                .strong()
                .color(eg::Color32::BLACK),
        )
        .fill(eg::Color32::WHITE),
    )
}

pub fn my_list_label(in_list: bool) -> &'static str {
    if in_list {
        "✓  My List"
    } else {
        "+  My List"
    }
}

/// One poster card. Click opens detail; hover reveals quick actions.
pub fn card(
    ui: &mut eg::Ui,
    entry: LikedItem<'_>,
    in_list: bool,
    posters: &mut Posters,
    out: &mut Vec<Intent>,
) -> eg::Response {
    // own top-down scope so the overlay doesn't move the row's cursor
    ui.vertical(|ui| card_contents(ui, entry, in_list, posters, out))
        .inner
}

fn card_contents(
    ui: &mut eg::Ui,
    entry: LikedItem<'_>,
    in_list: bool,
    posters: &mut Posters,
    out: &mut Vec<Intent>,
) -> eg::Response {
    let item = entry.item;
    let queued = out.len();
    let (rect, resp) = ui.allocate_exact_size(eg::vec2(CARD_W, CARD_H), eg::Sense::click());
    let painter = ui.painter_at(rect);

    match posters.texture(ui.ctx(), &item.image) {
        Some(tex) => paint_cover(&painter, rect, &tex, eg::Color32::WHITE),
        None => paint_placeholder(&painter, rect, &item.title),
    }

    let hovered = ui.rect_contains_pointer(rect);
    if hovered {
        let shade = eg::Rect::from_min_max(eg::pos2(rect.left(), rect.center().y), rect.max);
        paint_fade(
            &painter,
            shade,
            eg::Color32::TRANSPARENT,
            eg::Color32::from_black_alpha(230),
        );
        painter.rect_stroke(rect, 4.0, eg::Stroke::new(2.0, eg::Color32::WHITE));

        let actions = eg::Rect::from_min_max(
            eg::pos2(rect.left() + 8.0, rect.bottom() - 64.0),
            eg::pos2(rect.right() - 8.0, rect.bottom() - 8.0),
        );
        ui.allocate_ui_at_rect(actions, |ui| {
            ui.label(eg::RichText::new(&item.title).strong().color(eg::Color32::WHITE));
            ui.horizontal(|ui| {
                ui.spacing_mut().button_padding = eg::vec2(6.0, 2.0);
                if ui.small_button("▶").on_hover_text("Play").clicked() {
                    out.push(Intent::Play(item.id.clone()));
                }
                let hint = if in_list { "Remove from My List" } else { "Add to My List" };
                if ui
                    .small_button(if in_list { "✓" } else { "+" })
                    .on_hover_text(hint)
                    .clicked()
                {
                    out.push(Intent::ToggleMyList(item.id.clone()));
                }
                if ui.small_button("ℹ").on_hover_text("More info").clicked() {
                    out.push(Intent::MoreInfo(item.id.clone()));
                }
                ui.label(
                    eg::RichText::new(format!("♥ {}", format_likes(entry.likes)))
                        .small()
                        .color(eg::Color32::from_gray(210)),
                );
            });
        });
    }

    // quick-action buttons consume their own clicks
    if resp.clicked() && out.len() == queued {
        out.push(Intent::SelectForDetail(item.id.clone()));
    }
    resp
}

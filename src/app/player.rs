// src/app/player.rs
use eframe::egui as eg;

use crate::app::gfx::{paint_cover, paint_placeholder, Posters};
use crate::app::state::{AppState, Intent};
use crate::app::utils::title_line;

/// Full-screen playback overlay. There is no stream: the backdrop stands in for
/// the video, with a link out to the trailer when one exists.
pub(crate) fn show(
    ctx: &eg::Context,
    state: &AppState,
    posters: &mut Posters,
    out: &mut Vec<Intent>,
) {
    let Some(entry) = state.playing() else {
        return;
    };
    let item = entry.item;

    let screen = ctx.screen_rect();
    eg::Area::new(eg::Id::new("player_overlay"))
        .order(eg::Order::Foreground)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            // opaque backdrop that swallows clicks meant for the page below
            let (bg, _) = ui.allocate_exact_size(screen.size(), eg::Sense::click());
            ui.painter().rect_filled(bg, 0.0, eg::Color32::BLACK);

            // 16:9 frame, letterboxed into the window
            let max_w = screen.width() - 80.0;
            let max_h = screen.height() - 160.0;
            let w = max_w.min(max_h * 16.0 / 9.0).max(160.0);
            let frame = eg::Rect::from_center_size(screen.center(), eg::vec2(w, w * 9.0 / 16.0));
            let painter = ui.painter();
            match posters.texture(ctx, &item.backdrop) {
                Some(tex) => paint_cover(painter, frame, &tex, eg::Color32::from_gray(140)),
                None => paint_placeholder(painter, frame, &item.title),
            }
            painter.circle_filled(frame.center(), 36.0, eg::Color32::from_black_alpha(160));
            painter.text(
                frame.center(),
                eg::Align2::CENTER_CENTER,
                "▶",
                eg::FontId::proportional(36.0),
                eg::Color32::WHITE,
            );

            let top_bar = eg::Rect::from_min_size(
                screen.min + eg::vec2(24.0, 20.0),
                eg::vec2(screen.width() - 48.0, 40.0),
            );
            ui.allocate_ui_at_rect(top_bar, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("← Back").clicked() {
                        out.push(Intent::ClosePlayer);
                    }
                    ui.label(
                        eg::RichText::new(title_line(&item.title, item.year))
                            .size(20.0)
                            .strong()
                            .color(eg::Color32::WHITE),
                    );
                });
            });

            let bottom = eg::Rect::from_min_size(
                eg::pos2(frame.left(), frame.bottom() + 16.0),
                eg::vec2(frame.width(), 40.0),
            );
            ui.allocate_ui_at_rect(bottom, |ui| {
                ui.horizontal(|ui| {
                    ui.label(eg::RichText::new(&item.duration).weak());
                    if let Some(url) = &item.video_url {
                        if ui.button("Open trailer").clicked() {
                            ctx.open_url(eg::OpenUrl::new_tab(url));
                        }
                    } else {
                        ui.label(eg::RichText::new("Preview not available").weak());
                    }
                });
            });
        });
}

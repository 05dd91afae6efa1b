// src/app/detail.rs
use eframe::egui as eg;

use crate::app::gfx::{paint_cover, paint_fade, paint_placeholder, Posters};
use crate::app::state::{AppState, Intent};
use crate::app::ui::{my_list_label, play_button, BRAND_RED};
use crate::app::utils::{format_likes, genre_line};

const MODAL_W: f32 = 720.0;

/// Click-catching scrim under a modal. Returns true when clicked.
pub(crate) fn scrim(ctx: &eg::Context, id: &str, order: eg::Order, alpha: u8) -> bool {
    let screen = ctx.screen_rect();
    eg::Area::new(eg::Id::new(id))
        .order(order)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let (rect, resp) = ui.allocate_exact_size(screen.size(), eg::Sense::click());
            ui.painter()
                .rect_filled(rect, 0.0, eg::Color32::from_black_alpha(alpha));
            resp.clicked()
        })
        .inner
}

pub(crate) fn show(
    ctx: &eg::Context,
    state: &AppState,
    posters: &mut Posters,
    out: &mut Vec<Intent>,
) {
    let Some(entry) = state.detailed() else {
        return;
    };
    let item = entry.item;
    let liked = state.is_liked(&item.id);
    let in_list = state.in_my_list(&item.id);

    if scrim(ctx, "detail_scrim", eg::Order::PanelResizeLine, 170) {
        out.push(Intent::CloseDetail);
    }

    eg::Window::new(item.title.as_str())
        .id(eg::Id::new("detail_modal"))
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .anchor(eg::Align2::CENTER_CENTER, [0.0, 0.0])
        .default_width(MODAL_W)
        .frame(eg::Frame::window(&ctx.style()).inner_margin(0.0))
        .show(ctx, |ui| {
            ui.set_width(MODAL_W);

            // backdrop banner
            let banner_h = MODAL_W * 9.0 / 16.0 * 0.75;
            let (rect, _) =
                ui.allocate_exact_size(eg::vec2(MODAL_W, banner_h), eg::Sense::hover());
            let painter = ui.painter_at(rect);
            match posters.texture(ctx, &item.backdrop) {
                Some(tex) => paint_cover(&painter, rect, &tex, eg::Color32::WHITE),
                None => paint_placeholder(&painter, rect, &item.title),
            }
            let fade = eg::Rect::from_min_max(
                eg::pos2(rect.left(), rect.bottom() - banner_h * 0.5),
                rect.max,
            );
            paint_fade(
                &painter,
                fade,
                eg::Color32::TRANSPARENT,
                ctx.style().visuals.window_fill,
            );
            painter.text(
                eg::pos2(rect.left() + 28.0, rect.bottom() - 24.0),
                eg::Align2::LEFT_BOTTOM,
                &item.title,
                eg::FontId::proportional(34.0),
                eg::Color32::WHITE,
            );

            let close = eg::Rect::from_center_size(
                eg::pos2(rect.right() - 24.0, rect.top() + 24.0),
                eg::vec2(32.0, 32.0),
            );
            if ui
                .put(close, eg::Button::new("✕").rounding(16.0))
                .on_hover_text("Close")
                .clicked()
            {
                out.push(Intent::CloseDetail);
            }

            eg::Frame::none()
                .inner_margin(eg::Margin::symmetric(28.0, 16.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        if play_button(ui).clicked() {
                            out.push(Intent::Play(item.id.clone()));
                        }
                        if ui.button(my_list_label(in_list)).clicked() {
                            out.push(Intent::ToggleMyList(item.id.clone()));
                        }
                        let (glyph, color) = if liked {
                            ("♥ Liked", BRAND_RED)
                        } else {
                            ("♡ Like", eg::Color32::WHITE)
                        };
                        if ui
                            .add(eg::Button::new(eg::RichText::new(glyph).color(color)))
                            .on_hover_text(if liked { "Remove like" } else { "I like this" })
                            .clicked()
                        {
                            out.push(Intent::ToggleLike(item.id.clone()));
                        }
                        ui.label(
                            eg::RichText::new(format!("{} likes", format_likes(entry.likes)))
                                .weak(),
                        );
                    });

                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.label(
                            eg::RichText::new(format!("{}% Match", item.match_score))
                                .strong()
                                .color(eg::Color32::from_rgb(70, 211, 105)),
                        );
                        ui.label(item.year.to_string());
                        ui.label(eg::RichText::new(&item.rating).monospace());
                        ui.label(&item.duration);
                    });
                    ui.add_space(6.0);
                    ui.add(eg::Label::new(eg::RichText::new(&item.description).size(15.0)).wrap());
                    ui.add_space(10.0);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(eg::RichText::new("Genres:").weak());
                        ui.label(genre_line(&item.genre));
                    });
                    if let Some(url) = &item.video_url {
                        ui.horizontal(|ui| {
                            ui.label(eg::RichText::new("Trailer:").weak());
                            ui.hyperlink_to("Watch on the web", url);
                        });
                    }
                });
        });
}

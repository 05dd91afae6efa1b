// src/app/ui/hero.rs
use eframe::egui as eg;

use super::{my_list_label, play_button, PAGE_BG, SIDE_PAD};
use crate::app::gfx::{paint_cover, paint_fade, Posters};
use crate::app::state::{AppState, Intent};
use crate::app::utils::genre_line;

pub fn show(ui: &mut eg::Ui, state: &AppState, posters: &mut Posters, out: &mut Vec<Intent>) {
    ui.vertical(|ui| billboard(ui, state, posters, out));
}

fn billboard(ui: &mut eg::Ui, state: &AppState, posters: &mut Posters, out: &mut Vec<Intent>) {
    let Some(featured) = state.featured() else {
        return;
    };
    let item = featured.item;

    let width = ui.available_width();
    let height = (width * 0.42).clamp(320.0, 560.0);
    let (rect, _) = ui.allocate_exact_size(eg::vec2(width, height), eg::Sense::hover());
    let painter = ui.painter_at(rect);

    match posters.texture(ui.ctx(), &item.backdrop) {
        Some(tex) => paint_cover(&painter, rect, &tex, eg::Color32::WHITE),
        None => {
            painter.rect_filled(rect, 0.0, eg::Color32::from_gray(30));
        }
    }

    // left-side shade for legibility, bottom fade into the rows
    let left = eg::Rect::from_min_max(rect.min, eg::pos2(rect.left() + width * 0.6, rect.bottom()));
    painter.rect_filled(left, 0.0, eg::Color32::from_black_alpha(90));
    let bottom = eg::Rect::from_min_max(
        eg::pos2(rect.left(), rect.bottom() - height * 0.3),
        rect.max,
    );
    paint_fade(&painter, bottom, eg::Color32::TRANSPARENT, PAGE_BG);

    let text_rect = eg::Rect::from_min_max(
        eg::pos2(rect.left() + SIDE_PAD, rect.top() + height * 0.28),
        eg::pos2(rect.left() + (width * 0.45).max(360.0), rect.bottom() - 24.0),
    );
    ui.allocate_ui_at_rect(text_rect, |ui| {
        ui.label(
            eg::RichText::new(&item.title)
                .size(44.0)
                .strong()
                .color(eg::Color32::WHITE),
        );
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
        ui.add(
            eg::Label::new(
                eg::RichText::new(&item.description)
                    .size(16.0)
                    .color(eg::Color32::from_gray(230)),
            )
            .wrap(),
        );
        ui.label(eg::RichText::new(genre_line(&item.genre)).weak());
        ui.add_space(12.0);
        ui.horizontal(|ui| {
            if play_button(ui).clicked() {
                out.push(Intent::Play(item.id.clone()));
            }
            if ui
                .add(eg::Button::new(eg::RichText::new("ℹ  More Info").size(16.0)))
                .clicked()
            {
                out.push(Intent::MoreInfo(item.id.clone()));
            }
            let in_list = state.in_my_list(&item.id);
            if ui
                .add(eg::Button::new(eg::RichText::new(my_list_label(in_list)).size(16.0)))
                .clicked()
            {
                out.push(Intent::ToggleMyList(item.id.clone()));
            }
        });
    });
}

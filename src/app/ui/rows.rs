// src/app/ui/rows.rs
use eframe::egui as eg;

use super::{card, CARD_GAP, CARD_H, SIDE_PAD};
use crate::app::gfx::Posters;
use crate::app::state::{AppState, Intent, RowView};

/// All browse rows, stacked. Scrolls the My List row into view on request.
pub fn show(
    ui: &mut eg::Ui,
    state: &AppState,
    posters: &mut Posters,
    scroll_to_my_list: bool,
    out: &mut Vec<Intent>,
) {
    for row in state.rows() {
        let top = ui.cursor().top();
        show_row(ui, state, &row, posters, out);
        if scroll_to_my_list && row.is_my_list() {
            let rect = eg::Rect::from_min_max(
                eg::pos2(ui.min_rect().left(), top),
                eg::pos2(ui.min_rect().right(), ui.cursor().top()),
            );
            ui.scroll_to_rect(rect, Some(eg::Align::TOP));
        }
    }
    ui.add_space(48.0);
}

fn show_row(
    ui: &mut eg::Ui,
    state: &AppState,
    row: &RowView<'_>,
    posters: &mut Posters,
    out: &mut Vec<Intent>,
) {
    if row.items.is_empty() {
        return;
    }
    ui.add_space(18.0);
    ui.horizontal(|ui| {
        ui.add_space(SIDE_PAD);
        ui.label(
            eg::RichText::new(row.title)
                .size(20.0)
                .strong()
                .color(eg::Color32::WHITE),
        );
        if row.is_my_list() {
            ui.label(eg::RichText::new(format!("{} saved", row.items.len())).weak());
        }
    });
    ui.add_space(6.0);

    eg::ScrollArea::horizontal()
        .id_source(("row", row.id))
        .auto_shrink([false, true])
        .min_scrolled_height(CARD_H)
        .scroll_bar_visibility(eg::scroll_area::ScrollBarVisibility::VisibleWhenNeeded)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = CARD_GAP;
                ui.add_space(SIDE_PAD - CARD_GAP);
                for entry in &row.items {
                    let in_list = row.is_my_list() || state.in_my_list(&entry.item.id);
                    card(ui, *entry, in_list, posters, out);
                }
                ui.add_space(SIDE_PAD);
            });
        });
}

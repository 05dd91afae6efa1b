// src/app/ui/search_results.rs
use eframe::egui as eg;

use super::{card, CARD_GAP, CARD_W, SIDE_PAD};
use crate::app::gfx::Posters;
use crate::app::state::{AppState, Intent};

pub fn show(ui: &mut eg::Ui, state: &AppState, posters: &mut Posters, out: &mut Vec<Intent>) {
    let results = state.search_results();
    let query = state.search_query().trim();

    ui.add_space(24.0);
    ui.horizontal(|ui| {
        ui.add_space(SIDE_PAD);
        ui.vertical(|ui| {
            ui.label(
                eg::RichText::new(format!("Results for \"{query}\""))
                    .size(22.0)
                    .strong()
                    .color(eg::Color32::WHITE),
            );
            let count = match results.len() {
                1 => "1 title".to_string(),
                n => format!("{n} titles"),
            };
            ui.label(eg::RichText::new(count).weak());
        });
    });
    ui.add_space(12.0);

    if results.is_empty() {
        ui.horizontal(|ui| {
            ui.add_space(SIDE_PAD);
            ui.vertical(|ui| {
                ui.label(format!("Your search for \"{query}\" did not have any matches."));
                ui.label(eg::RichText::new("Suggestions:").weak());
                ui.label(eg::RichText::new("• Try different keywords").weak());
                ui.label(eg::RichText::new("• Try a genre, like comedy or drama").weak());
            });
        });
        return;
    }

    // wrap cards into as many columns as fit
    let avail = ui.available_width() - 2.0 * SIDE_PAD;
    let cols = ((avail + CARD_GAP) / (CARD_W + CARD_GAP)).floor().max(1.0) as usize;

    for chunk in results.chunks(cols) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = CARD_GAP;
            ui.add_space(SIDE_PAD - CARD_GAP);
            for entry in chunk {
                let in_list = state.in_my_list(&entry.item.id);
                card(ui, *entry, in_list, posters, out);
            }
        });
        ui.add_space(CARD_GAP);
    }
    ui.add_space(48.0);
}

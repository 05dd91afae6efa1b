// src/app/mod.rs: eframe shell. Owns the state store, poster cache and prefetch pool.

use std::time::Duration;

use eframe::egui as eg;
use tracing::{info, warn};

pub mod cache;
pub mod catalog;
pub mod detail;
pub mod filters;
pub mod gfx;
pub mod player;
pub mod prefetch;
pub mod state;
pub mod storage;
pub mod types;
pub mod ui;
pub mod utils;

use crate::config::AppConfig;
use catalog::Catalog;
use gfx::Posters;
use prefetch::PrefetchPool;
use state::{AppState, Dropdown, Intent, ScrollRequest};
use ui::header::HeaderState;

/// Repaint cadence while artwork is still arriving.
const PREFETCH_REPAINT: Duration = Duration::from_millis(100);

pub struct MarqueeApp {
    state: AppState,
    posters: Posters,
    prefetch: Option<PrefetchPool>,
    prefetch_started: bool,
    header: HeaderState,
    config: AppConfig,
}

impl MarqueeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Self {
        ui::apply_theme(&cc.egui_ctx);

        let store = storage::open_store(&config.storage_path());
        let catalog = build_catalog(&config);
        let posters = Posters::new(cache::poster_cache_dir(&config.cache_dir()));
        info!(
            "catalog: {} titles in {} rows; artwork cache {}",
            catalog.items.len(),
            catalog.rows.len(),
            posters.dir().display()
        );

        Self {
            state: AppState::new(catalog, store),
            posters,
            prefetch: None,
            prefetch_started: false,
            header: HeaderState::default(),
            config,
        }
    }

    fn start_prefetch(&mut self) {
        self.prefetch_started = true;
        if !self.config.prefetch_enabled() {
            info!("artwork prefetch disabled");
            return;
        }
        let urls = self.state.catalog().artwork_urls();
        match PrefetchPool::start(&urls, &mut self.posters, self.config.poster_workers) {
            Ok(pool) => self.prefetch = Some(pool),
            Err(e) => warn!("artwork prefetch unavailable: {e}"),
        }
    }

    fn poll_prefetch(&mut self, ctx: &eg::Context) {
        let Some(pool) = self.prefetch.as_mut() else {
            return;
        };
        pool.poll(&mut self.posters);
        if pool.is_done() {
            self.prefetch = None;
        } else {
            ctx.request_repaint_after(PREFETCH_REPAINT);
        }
    }

    fn handle_keys(&mut self, ctx: &eg::Context, out: &mut Vec<Intent>) {
        let (escape, focus_search) = ctx.input(|i| {
            (
                i.key_pressed(eg::Key::Escape),
                i.modifiers.command && i.key_pressed(eg::Key::F),
            )
        });
        let slash = !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(eg::Key::Slash));

        if escape {
            if self.state.playing().is_some() {
                out.push(Intent::ClosePlayer);
            } else if self.state.detailed().is_some() {
                out.push(Intent::CloseDetail);
            } else if self.state.dropdown() != Dropdown::None {
                out.push(Intent::CloseDropdowns);
            }
        }
        if focus_search || slash {
            self.header.request_focus();
        }
    }
}

fn build_catalog(config: &AppConfig) -> Catalog {
    let mut catalog = Catalog::builtin();
    if let Some(id) = config.featured_id.as_deref() {
        if catalog.contains(id) {
            catalog.featured_id = id.to_string();
        } else {
            warn!("featured_id {id:?} is not in the catalog; using {:?}", catalog.featured_id);
        }
    }
    catalog
}

impl eframe::App for MarqueeApp {
    fn update(&mut self, ctx: &eg::Context, _frame: &mut eframe::Frame) {
        self.posters.begin_frame();
        if !self.prefetch_started {
            self.start_prefetch();
        }
        self.poll_prefetch(ctx);

        let mut out: Vec<Intent> = Vec::new();
        self.handle_keys(ctx, &mut out);

        let Self {
            state,
            posters,
            header,
            ..
        } = self;

        let anchors = ui::header::show(ctx, state, header, &mut out);

        let scroll_request = state.take_scroll_request();
        let browse = eg::CentralPanel::default()
            .frame(eg::Frame::none().fill(ui::PAGE_BG))
            .show(ctx, |panel| {
                eg::ScrollArea::vertical()
                    .id_source("browse")
                    .auto_shrink([false, false])
                    .show(panel, |ui| {
                        if scroll_request == Some(ScrollRequest::Top) {
                            let top = eg::Rect::from_min_size(ui.cursor().min, eg::vec2(1.0, 1.0));
                            ui.scroll_to_rect(top, Some(eg::Align::TOP));
                        }
                        if state.is_searching() {
                            ui::search_results::show(ui, state, posters, &mut out);
                        } else {
                            ui::hero::show(ui, state, posters, &mut out);
                            let to_my_list = scroll_request == Some(ScrollRequest::MyList);
                            ui::rows::show(ui, state, posters, to_my_list, &mut out);
                        }
                    })
            })
            .inner;

        let scrolled = browse.state.offset.y > 0.0;
        if scrolled != state.is_scrolled() {
            out.push(Intent::SetScrolled(scrolled));
        }

        ui::dropdowns::show(ctx, state, &anchors, &mut out);
        detail::show(ctx, state, posters, &mut out);
        player::show(ctx, state, posters, &mut out);

        if !out.is_empty() {
            for intent in out {
                state.dispatch(intent);
            }
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_featured_id_is_applied_when_known() {
        let config = AppConfig {
            featured_id: Some("orbit".into()),
            ..AppConfig::default()
        };
        let catalog = build_catalog(&config);
        assert_eq!(catalog.featured().map(|m| m.id.as_str()), Some("orbit"));
    }

    #[test]
    fn unknown_featured_id_keeps_builtin_default() {
        let config = AppConfig {
            featured_id: Some("no-such-title".into()),
            ..AppConfig::default()
        };
        let catalog = build_catalog(&config);
        assert_eq!(catalog.featured_id, Catalog::builtin().featured_id);
    }
}

// src/main.rs
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use marquee::app::MarqueeApp;
use marquee::config::load_config;

fn pick_renderer() -> eframe::Renderer {
    match env::var("MARQUEE_RENDERER").as_deref() {
        Ok("glow") => eframe::Renderer::Glow,
        Ok("wgpu") => eframe::Renderer::Wgpu,
        _ => {
            #[cfg(target_os = "windows")]
            { eframe::Renderer::Wgpu }
            #[cfg(not(target_os = "windows"))]
            { eframe::Renderer::Glow }
        }
    }
}

fn main() -> eframe::Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    #[cfg(target_os = "linux")]
    {
        info!("XDG_SESSION_TYPE={:?}", env::var_os("XDG_SESSION_TYPE"));
        info!("WAYLAND_DISPLAY={:?}", env::var_os("WAYLAND_DISPLAY"));
        info!("DISPLAY={:?}", env::var_os("DISPLAY"));
    }

    let config = load_config();
    let options = eframe::NativeOptions {
        renderer: pick_renderer(),
        multisampling: 0,
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Marquee")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    match eframe::run_native(
        "Marquee",
        options,
        Box::new(|cc| Ok(Box::new(MarqueeApp::new(cc, config)))),
    ) {
        Ok(_) => Ok(()),
        Err(e) => {
            error!("eframe failed to start: {e:?}");
            error!("Hint: try MARQUEE_RENDERER=wgpu or MARQUEE_RENDERER=glow.");
            Err(e)
        }
    }
}

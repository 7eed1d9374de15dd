//! Cart demo window.
//!
//! Reads the catalog endpoints from `.env` / the environment, then opens the
//! cart screen on `/` (cart 2). Try typing into the search box and clicking
//! "Cart" or "‹ Back" to see the leave confirmation.

use gpui::prelude::*;
use gpui::{px, size, App, Application, Bounds, TitlebarOptions, WindowBounds, WindowOptions};
use gpui_cart::{error_log, init_router, CartApp, CatalogConfig, HttpCatalog};
use std::sync::Arc;

fn main() {
    env_logger::init();

    let config = match CatalogConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error_log!("Invalid configuration: {}", err);
            return;
        }
    };
    let catalog = match HttpCatalog::new(config) {
        Ok(catalog) => Arc::new(catalog),
        Err(err) => {
            error_log!("Could not start the catalog client: {}", err);
            return;
        }
    };

    Application::new().run(move |cx: &mut App| {
        init_router(cx);

        let bounds = Bounds::centered(None, size(px(1100.), px(760.)), cx);
        let opened = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                titlebar: Some(TitlebarOptions {
                    title: Some("Cart".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            |window, cx| {
                let app = cx.new(|cx| CartApp::new(catalog, cx));
                window.focus(&app.read(cx).focus_handle());

                let view = app.clone();
                window.on_window_should_close(cx, move |_window, cx| {
                    view.update(cx, |app, cx| app.request_close(cx))
                });
                app
            },
        );
        if let Err(err) = opened {
            error_log!("Could not open the window: {}", err);
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}

//! AudioForge - GPUI Application
//!
//! A desktop utility for converting audio files between formats.

mod actions;
mod codec;
mod conversion;
mod core;
mod logging;
#[cfg(test)]
mod test_fixtures;
mod ui;

use gpui::{
    App, Application, Bounds, KeyBinding, Menu, MenuItem, WindowBounds, WindowHandle,
    WindowOptions, prelude::*, px, size,
};

use actions::{About, OpenOutputFolder, Quit};
use ui::components::{AboutBox, ConverterView};

/// Build the application menus
fn build_menus() -> Vec<Menu> {
    vec![
        Menu {
            name: "AudioForge".into(),
            items: vec![
                MenuItem::action("About AudioForge", About),
                MenuItem::separator(),
                MenuItem::action("Quit", Quit),
            ],
        },
        Menu {
            name: "File".into(),
            items: vec![MenuItem::action("Open Output Folder", OpenOutputFolder)],
        },
    ]
}

fn main() {
    logging::init_logging();

    Application::new().run(|cx: &mut App| {
        // Register action handlers
        cx.on_action(|_: &Quit, cx| cx.quit());
        cx.on_action(|_: &About, cx| {
            AboutBox::open(cx);
        });

        // Bind keyboard shortcuts
        cx.bind_keys([KeyBinding::new("cmd-q", Quit, None)]);

        // Set up the application menu
        cx.set_menus(build_menus());

        // Open the main window
        let bounds = Bounds::centered(None, size(px(700.), px(620.)), cx);

        let window_handle: WindowHandle<ConverterView> = cx
            .open_window(
                WindowOptions {
                    window_bounds: Some(WindowBounds::Windowed(bounds)),
                    window_min_size: Some(size(px(520.), px(420.))),
                    titlebar: Some(gpui::TitlebarOptions {
                        title: Some("AudioForge".into()),
                        appears_transparent: false,
                        traffic_light_position: None,
                    }),
                    ..Default::default()
                },
                |_window, cx| cx.new(ConverterView::new),
            )
            .unwrap();

        // Reveal the chosen output folder in the file manager
        cx.on_action(move |_: &OpenOutputFolder, cx| {
            let _ = window_handle.update(cx, |view, _window, _cx| {
                match &view.output_dir {
                    Some(dir) if dir.exists() => {
                        let _ = std::process::Command::new("open").arg(dir).spawn();
                    }
                    _ => log::info!("No output folder selected yet"),
                }
            });
        });

        // Quit the app when the main window is closed
        // This is appropriate for a single-window utility app
        cx.on_window_closed(|cx| {
            cx.quit();
        })
        .detach();

        cx.activate(true);
    });
}

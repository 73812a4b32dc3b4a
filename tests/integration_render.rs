use cmdpal::app::{App, AppOptions, PaletteKind};
use cmdpal::domain::view::{PaletteSettings, LIGHT_SKIN_DIM_COLOR};
use cmdpal::integrations::scene::Scene;
use cmdpal::ui::render::render;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;
use ratatui::Terminal;

fn render_commands_palette(settings: PaletteSettings) -> Buffer {
    let mut app = App::new_with_scene(
        AppOptions {
            settings,
            ..AppOptions::default()
        },
        Scene::new(),
    );
    app.open_palette(PaletteKind::Commands);
    app.palette_mut()
        .expect("palette is open")
        .set_input("scene");

    let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("test terminal");
    terminal
        .draw(|frame| {
            render(frame, &app);
        })
        .expect("draw app");
    terminal.backend().buffer().clone()
}

fn uses_color(buffer: &Buffer, color: Color) -> bool {
    buffer.content.iter().any(|cell| cell.fg == color)
}

#[test]
fn dark_skin_dims_rows_with_its_grey() {
    let buffer = render_commands_palette(PaletteSettings::default());
    assert!(uses_color(&buffer, Color::Rgb(0x8e, 0x8e, 0x8e)));
    assert!(!uses_color(&buffer, Color::Rgb(0x38, 0x38, 0x38)));
}

#[test]
fn light_skin_changes_the_rendered_palette() {
    let dark = render_commands_palette(PaletteSettings::default());
    let light = render_commands_palette(PaletteSettings {
        dim_color: LIGHT_SKIN_DIM_COLOR.to_string(),
        ..PaletteSettings::default()
    });

    assert_ne!(dark, light);
    assert!(uses_color(&light, Color::Rgb(0x38, 0x38, 0x38)));
    assert!(!uses_color(&light, Color::Rgb(0x8e, 0x8e, 0x8e)));
}

#[test]
fn unparsable_dim_color_falls_back_to_dark_gray() {
    let buffer = render_commands_palette(PaletteSettings {
        dim_color: "grey".to_string(),
        ..PaletteSettings::default()
    });
    assert!(uses_color(&buffer, Color::DarkGray));
}

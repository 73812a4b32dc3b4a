use cmdpal::app::{App, AppOptions, PaletteKind};
use cmdpal::domain::session::PaletteKey;
use cmdpal::domain::view::PaletteSettings;
use cmdpal::integrations::scene::Scene;
use cmdpal::ui::pointer_position;
use ratatui::layout::Rect;

fn small_scene() -> Scene {
    let scene = Scene::new();
    scene.spawn("Main Camera", None);
    scene.spawn("Player", None);
    scene.spawn("PlayerCamera", Some("Player".to_string()));
    scene
}

fn app_with(options: AppOptions) -> App {
    App::new_with_scene(options, small_scene())
}

fn confirm_input(app: &mut App, input: &str) {
    let palette = app.palette_mut().expect("palette is open");
    palette.set_input(input);
    palette.handle_key(PaletteKey::Return);
    app.pump_host_requests();
}

fn visible_titles(app: &App) -> Vec<String> {
    app.palette()
        .expect("palette is open")
        .visible()
        .iter()
        .map(|ranked| ranked.command.title().to_string())
        .collect()
}

#[test]
fn execution_runs_after_the_window_is_gone() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Commands);
    assert_eq!(
        app.palette().expect("palette is open").title(),
        "Command Palette.. "
    );

    confirm_input(&mut app, "create");
    assert!(app.palette().is_none());
    assert_eq!(app.pending_executions(), 1);
    assert_eq!(app.scene().len(), 3);

    app.tick();
    assert_eq!(app.pending_executions(), 0);
    assert_eq!(app.scene().len(), 4);
    assert_eq!(app.status_message, "Executed Create Empty");
    let created = app
        .scene()
        .find(app.selected_entity().expect("new entity selected"))
        .expect("entity exists");
    assert_eq!(created.name, "GameObject");
}

#[test]
fn arguments_flow_into_create_command() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Commands);
    confirm_input(&mut app, "create;Boss;Level");
    app.tick();

    let id = app.selected_entity().expect("new entity selected");
    let entity = app.scene().find(id).expect("entity exists");
    assert_eq!(entity.name, "Boss");
    assert_eq!(entity.parent.as_deref(), Some("Level"));
}

#[test]
fn argument_command_errors_surface_in_status() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Commands);
    confirm_input(&mut app, "rename");
    app.tick();

    assert_eq!(app.status_message, "Error: usage: Rename Selected;<new name>");
    assert!(app.running);
}

#[test]
fn open_palette_selects_scene_objects() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Open);
    assert_eq!(app.palette().expect("palette is open").title(), "Open.. ");
    assert_eq!(visible_titles(&app).len(), 3);

    confirm_input(&mut app, "player");
    app.tick();

    let id = app.selected_entity().expect("entity selected");
    assert_eq!(app.scene().find(id).expect("entity exists").name, "Player");
    assert_eq!(app.log().last().map(String::as_str), Some("Selected Player"));
}

#[test]
fn removed_entities_drop_out_of_an_open_palette() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Open);
    let camera = app
        .scene()
        .entities()
        .into_iter()
        .find(|e| e.name == "Main Camera")
        .expect("camera exists");
    app.scene().remove(camera.id);
    drop(camera);

    let titles = visible_titles(&app);
    assert_eq!(titles.len(), 2);
    assert!(!titles.contains(&"Main Camera".to_string()));
}

#[test]
fn play_mode_hides_project_assets() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let manifest = dir.path().join("assets.json");
    std::fs::write(
        &manifest,
        r#"{
            "prefabs": [{ "path": "Assets/Prefabs/Barrel.prefab" }],
            "scenes": ["Assets/Scenes/Cave.unity"]
        }"#,
    )
    .expect("write manifest");

    let mut editing = app_with(AppOptions {
        manifest_path: Some(manifest.clone()),
        ..AppOptions::default()
    });
    editing.open_palette(PaletteKind::Open);
    let titles = visible_titles(&editing);
    assert!(titles.contains(&"Barrel".to_string()));
    assert!(titles.contains(&"Cave".to_string()));

    confirm_input(&mut editing, "barrel");
    editing.tick();
    assert_eq!(editing.scene().len(), 4);

    editing.open_palette(PaletteKind::Open);
    confirm_input(&mut editing, "cave");
    editing.tick();
    assert_eq!(
        editing.active_scene_asset(),
        Some(std::path::Path::new("Assets/Scenes/Cave.unity"))
    );
    assert_eq!(
        editing.log().last().map(String::as_str),
        Some("Opened scene Assets/Scenes/Cave.unity")
    );

    let mut playing = app_with(AppOptions {
        manifest_path: Some(manifest),
        play_mode: true,
        ..AppOptions::default()
    });
    playing.open_palette(PaletteKind::Open);
    let titles = visible_titles(&playing);
    assert!(!titles.contains(&"Barrel".to_string()));
    assert!(!titles.contains(&"Cave".to_string()));
    assert_eq!(titles.len(), 3);
}

#[test]
fn open_command_chains_into_another_palette() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Commands);
    confirm_input(&mut app, "open..");
    assert!(app.palette().is_none());

    app.tick();
    assert_eq!(app.palette().expect("palette reopened").title(), "Open.. ");
}

#[test]
fn escape_closes_without_executing() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Commands);
    app.palette_mut()
        .expect("palette is open")
        .handle_key(PaletteKey::Escape);
    app.pump_host_requests();
    app.tick();

    assert!(app.palette().is_none());
    assert_eq!(app.pending_executions(), 0);
    assert_eq!(app.scene().len(), 3);
}

#[test]
fn toggling_debug_scores_applies_to_the_next_palette() {
    let mut app = app_with(AppOptions::default());
    app.open_palette(PaletteKind::Commands);
    confirm_input(&mut app, "toggle score");
    app.tick();
    assert!(app.settings().debug_scores);

    app.open_palette(PaletteKind::Commands);
    let rows = app.palette().expect("palette is open").rows();
    assert!(rows[0].subtitle.contains("(score: "));
}

#[test]
fn terminal_cells_map_to_palette_rows() {
    let settings = PaletteSettings::default();
    let inner = Rect::new(10, 5, 64, 9);

    assert_eq!(pointer_position(inner, 9, 6, &settings), None);
    assert_eq!(pointer_position(inner, 10, 5, &settings), Some((0.0, 15.0)));
    assert_eq!(pointer_position(inner, 10, 6, &settings), Some((0.0, 46.0)));
    assert_eq!(pointer_position(inner, 10, 8, &settings), Some((0.0, 78.0)));
    assert_eq!(pointer_position(inner, 10, 14, &settings), None);
}

//! Frostkeep Viewer - Bevy front end for the survival prototype
//!
//! Two screens: class selection, then the arena with the HUD overlay. During
//! play the camera follows the player at 1.5x zoom; the HUD and snow stay
//! pinned to the window.
//! All game state lives in `frostkeep_logic`; this binary only polls keys,
//! calls `tick` once per frame, and draws whatever the HUD bridge last saw.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use frostkeep_logic::classes::classes;
use frostkeep_logic::constants::arena;
use frostkeep_logic::controller::GameController;
use frostkeep_logic::hud::{HudBridge, HudView, LatestView, MoraleBand, TemperatureBand};
use frostkeep_logic::input::KeyState;
use frostkeep_logic::movement::Position;
use frostkeep_logic::resources::{ResourceKind, ResourceUpdate};
use rand::Rng;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Frostkeep - Arctic Survival".to_string(),
                resolution: (arena::CANVAS_WIDTH, arena::CANVAS_HEIGHT).into(),
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(bevy::diagnostic::FrameTimeDiagnosticsPlugin::default())
        .add_plugins(bevy::diagnostic::LogDiagnosticsPlugin::default())
        .insert_resource(ClearColor(Color::srgb(0.04, 0.08, 0.125)))
        .insert_non_send_resource(Session::new())
        .insert_resource(Snowfall::default())
        .init_resource::<CameraView>()
        .init_state::<Screen>()
        .add_systems(Startup, setup)
        .add_systems(OnEnter(Screen::ClassSelection), spawn_class_menu)
        .add_systems(OnExit(Screen::ClassSelection), despawn_all::<ClassMenu>)
        .add_systems(OnEnter(Screen::Playing), spawn_arena)
        .add_systems(
            Update,
            choose_class.run_if(in_state(Screen::ClassSelection)),
        )
        .add_systems(
            Update,
            (
                player_input,
                debug_hotkeys,
                sync_player,
                follow_player,
                pin_to_camera,
                render_base_marker,
                render_hud,
                update_hud_text,
            )
                .chain()
                .run_if(in_state(Screen::Playing)),
        )
        .add_systems(Update, (update_snow, render_snow).chain())
        .run();
}

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
enum Screen {
    #[default]
    ClassSelection,
    Playing,
}

/// Controller plus the HUD bridge subscribed to it. Not `Send`: the
/// controller's subscribers are plain boxed closures.
struct Session {
    controller: GameController,
    hud: HudBridge<LatestView>,
    moving: bool,
}

impl Session {
    fn new() -> Self {
        let mut controller = GameController::new();
        let hud = HudBridge::attach(&mut controller, LatestView::default());
        Self {
            controller,
            hud,
            moving: false,
        }
    }

    fn hud_view(&self) -> Option<HudView> {
        self.hud.display().view
    }
}

#[derive(Resource, Default)]
struct Snowfall {
    flakes: Vec<Flake>,
}

struct Flake {
    pos: Vec2,
    fall_speed: f32,
    drift: f32,
}

impl Flake {
    fn spawn(rng: &mut impl Rng, anywhere: bool) -> Self {
        let half_w = arena::CANVAS_WIDTH / 2.0;
        let half_h = arena::CANVAS_HEIGHT / 2.0;
        let y = if anywhere {
            rng.gen_range(-half_h..half_h)
        } else {
            half_h + 10.0
        };
        Self {
            pos: Vec2::new(rng.gen_range(-half_w..half_w), y),
            fall_speed: rng.gen_range(30.0..80.0),
            drift: rng.gen_range(-15.0..15.0),
        }
    }
}

const SNOW_FLAKES: usize = 120;
const ICE_CRYSTALS: usize = 15;
const CAMERA_ZOOM: f32 = 1.5;
const CAMERA_LERP: f32 = 0.1;

/// Where the camera looks and how many world units one screen pixel spans.
/// Screen-space layout (HUD, snow) is expressed as an offset from the
/// window center and mapped through [`CameraView::to_world`].
#[derive(Resource)]
struct CameraView {
    center: Vec2,
    scale: f32,
}

impl Default for CameraView {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl CameraView {
    fn to_world(&self, screen: Vec2) -> Vec2 {
        self.center + screen * self.scale
    }
}

// Markers
#[derive(Component)]
struct ClassMenu;

#[derive(Component)]
struct Player;

/// Entity kept at a fixed offset from the window center.
#[derive(Component)]
struct ScreenAnchor(Vec2);

#[derive(Component, Clone, Copy)]
enum HudLabel {
    Resource(ResourceKind),
    Day,
    Temperature,
    Morale,
}

/// Arena coordinates are y-down from the top-left corner; Bevy's 2D camera
/// is y-up from the window center.
fn to_world(p: Position) -> Vec2 {
    Vec2::new(
        p.x - arena::CANVAS_WIDTH / 2.0,
        arena::CANVAS_HEIGHT / 2.0 - p.y,
    )
}

fn setup(mut commands: Commands, mut snow: ResMut<Snowfall>) {
    commands.spawn(Camera2d::default());

    let mut rng = rand::thread_rng();
    snow.flakes = (0..SNOW_FLAKES)
        .map(|_| Flake::spawn(&mut rng, true))
        .collect();
}

// ── Class selection ────────────────────────────────────────────────────

const CLASS_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

fn spawn_class_menu(mut commands: Commands) {
    commands.spawn((
        Text2d::new("FROSTKEEP"),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::srgb(0.53, 0.81, 0.92)),
        Transform::from_xyz(0.0, 250.0, 100.0),
        ClassMenu,
    ));
    commands.spawn((
        Text2d::new("Arctic Survival - choose your class (1-4)"),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgba(0.8, 0.85, 0.9, 0.9)),
        Transform::from_xyz(0.0, 210.0, 100.0),
        ClassMenu,
    ));

    for (i, class) in classes().iter().enumerate() {
        let col = (i % 2) as f32;
        let row = (i / 2) as f32;
        let x = -380.0 + col * 390.0;
        let y = 160.0 - row * 200.0;

        let stats: Vec<String> = class
            .attributes
            .labelled()
            .iter()
            .map(|(label, v)| format!("{:<13}{}", label, "*".repeat(*v as usize)))
            .collect();
        let body = format!(
            "[{}] {}\n{}\n\n{}\n+ {}\n- {}",
            i + 1,
            class.name,
            class.description,
            stats.join("\n"),
            class.bonus,
            class.penalty
        );

        commands.spawn((
            Text2d::new(body),
            TextFont {
                font_size: 11.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.93, 0.97)),
            TextLayout::new_with_linebreak(bevy::text::LineBreak::WordBoundary),
            bevy::text::TextBounds::new_horizontal(360.0),
            Anchor::TopLeft,
            Transform::from_xyz(x, y, 100.0),
            ClassMenu,
        ));
    }
}

fn choose_class(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: NonSendMut<Session>,
    mut next: ResMut<NextState<Screen>>,
) {
    let picked = CLASS_KEYS
        .iter()
        .zip(classes())
        .find(|(key, _)| keyboard.just_pressed(**key));

    if let Some((_, class)) = picked {
        session.controller.set_class(class);
        info!("Starting as {}", class.name);
        next.set(Screen::Playing);
    }
}

fn despawn_all<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ── Arena ──────────────────────────────────────────────────────────────

fn spawn_arena(
    mut commands: Commands,
    mut session: NonSendMut<Session>,
    mut view: ResMut<CameraView>,
) {
    let tile = arena::TILE_SIZE;
    for tx in 0..arena::MAP_TILES_X {
        for ty in 0..arena::MAP_TILES_Y {
            let is_ice = (tx + ty) % 7 == 0;
            let color = if is_ice {
                Color::srgb(0.55, 0.75, 0.85)
            } else {
                Color::srgb(0.82, 0.86, 0.9)
            };
            // Tile origin is its top-left corner
            let center = to_world(Position::new(
                tx as f32 * tile + tile / 2.0,
                ty as f32 * tile + tile / 2.0,
            ));
            commands.spawn((
                Sprite::from_color(color, Vec2::splat(tile - 1.0)),
                Transform::from_xyz(center.x, center.y, 0.0),
            ));
        }
    }

    let mut rng = rand::thread_rng();
    for _ in 0..ICE_CRYSTALS {
        let tx = rng.gen_range(2..arena::MAP_TILES_X - 2);
        let ty = rng.gen_range(2..arena::MAP_TILES_Y - 2);
        let at = to_world(Position::new(
            tx as f32 * tile + tile / 2.0,
            ty as f32 * tile + tile / 2.0,
        ));
        commands.spawn((
            Sprite::from_color(Color::srgba(0.7, 0.9, 1.0, 0.85), Vec2::new(8.0, 14.0)),
            Transform::from_xyz(at.x, at.y, 1.0)
                .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4)),
        ));
    }

    let start = to_world(session.controller.state().position);
    commands.spawn((
        Sprite::from_color(Color::WHITE, Vec2::splat(24.0)),
        Transform::from_xyz(start.x, start.y, 10.0),
        Player,
    ));
    *view = CameraView {
        center: start,
        scale: 1.0 / CAMERA_ZOOM,
    };

    spawn_hud_text(&mut commands);

    // Scene start: publish once so the HUD has values before any input
    session.controller.emit();
}

fn player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut session: NonSendMut<Session>,
) {
    let arrows = KeyState {
        left: keyboard.pressed(KeyCode::ArrowLeft),
        right: keyboard.pressed(KeyCode::ArrowRight),
        up: keyboard.pressed(KeyCode::ArrowUp),
        down: keyboard.pressed(KeyCode::ArrowDown),
    };
    let wasd = KeyState {
        left: keyboard.pressed(KeyCode::KeyA),
        right: keyboard.pressed(KeyCode::KeyD),
        up: keyboard.pressed(KeyCode::KeyW),
        down: keyboard.pressed(KeyCode::KeyS),
    };

    let outcome = session
        .controller
        .tick((arrows | wasd).direction(), time.delta_secs());
    session.moving = outcome.is_moving();
}

/// Development keys for poking the gauges until real mechanics exist.
fn debug_hotkeys(keyboard: Res<ButtonInput<KeyCode>>, mut session: NonSendMut<Session>) {
    let state = session.controller.state().clone();

    if keyboard.just_pressed(KeyCode::KeyT) {
        session
            .controller
            .update_temperature(state.temperature - 5);
    }
    if keyboard.just_pressed(KeyCode::KeyY) {
        session
            .controller
            .update_temperature(state.temperature + 5);
    }
    if keyboard.just_pressed(KeyCode::KeyF) {
        session
            .controller
            .update_resources(ResourceUpdate::default().food(state.resources.food + 10));
    }
    if keyboard.just_pressed(KeyCode::KeyN) {
        session.controller.set_day(state.day + 1);
    }
}

fn sync_player(session: NonSend<Session>, mut query: Query<(&mut Transform, &mut Sprite), With<Player>>) {
    let pos = to_world(session.controller.state().position);
    let tint = if session.moving {
        Color::WHITE
    } else {
        Color::srgb(0.8, 0.8, 0.8)
    };
    for (mut transform, mut sprite) in &mut query {
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
        sprite.color = tint;
    }
}

fn follow_player(
    session: NonSend<Session>,
    mut view: ResMut<CameraView>,
    mut camera: Query<(&mut Transform, &mut OrthographicProjection), With<Camera2d>>,
) {
    let target = to_world(session.controller.state().position);
    view.center = view.center.lerp(target, CAMERA_LERP);
    for (mut transform, mut projection) in &mut camera {
        transform.translation.x = view.center.x;
        transform.translation.y = view.center.y;
        projection.scale = view.scale;
    }
}

fn pin_to_camera(view: Res<CameraView>, mut query: Query<(&ScreenAnchor, &mut Transform)>) {
    for (anchor, mut transform) in &mut query {
        let at = view.to_world(anchor.0);
        transform.translation.x = at.x;
        transform.translation.y = at.y;
        transform.scale = Vec3::splat(view.scale);
    }
}

fn render_base_marker(mut gizmos: Gizmos) {
    let center = to_world(Position::new(
        arena::MAP_TILES_X as f32 * arena::TILE_SIZE / 2.0,
        arena::MAP_TILES_Y as f32 * arena::TILE_SIZE / 2.0,
    ));
    gizmos.circle_2d(
        Isometry2d::from_translation(center),
        80.0,
        Color::srgba(0.3, 0.66, 0.85, 0.8),
    );
    gizmos.circle_2d(
        Isometry2d::from_translation(center),
        100.0,
        Color::srgba(0.53, 0.81, 0.92, 0.4),
    );
}

// ── Snow ───────────────────────────────────────────────────────────────

fn update_snow(time: Res<Time>, mut snow: ResMut<Snowfall>) {
    let dt = time.delta_secs();
    let floor = -arena::CANVAS_HEIGHT / 2.0 - 10.0;
    let mut rng = rand::thread_rng();
    for flake in snow.flakes.iter_mut() {
        flake.pos.y -= flake.fall_speed * dt;
        flake.pos.x += flake.drift * dt;
        if flake.pos.y < floor {
            *flake = Flake::spawn(&mut rng, false);
        }
    }
}

fn render_snow(snow: Res<Snowfall>, view: Res<CameraView>, mut gizmos: Gizmos) {
    for flake in &snow.flakes {
        gizmos.circle_2d(
            Isometry2d::from_translation(view.to_world(flake.pos)),
            1.5 * view.scale,
            Color::srgba(0.95, 0.97, 1.0, 0.6),
        );
    }
}

// ── HUD ────────────────────────────────────────────────────────────────

const HUD_LEFT: f32 = -arena::CANVAS_WIDTH / 2.0 + 12.0;
const HUD_TOP: f32 = arena::CANVAS_HEIGHT / 2.0 - 16.0;
const HUD_ROW: f32 = 18.0;
const BAR_WIDTH: f32 = 90.0;
const BAR_HEIGHT: f32 = 8.0;

fn resource_color(kind: ResourceKind) -> Color {
    match kind {
        ResourceKind::Food => Color::srgb(0.85, 0.45, 0.3),
        ResourceKind::Materials => Color::srgb(0.6, 0.45, 0.3),
        ResourceKind::Fuel => Color::srgb(0.95, 0.6, 0.15),
        ResourceKind::Water => Color::srgb(0.3, 0.6, 0.95),
    }
}

fn morale_color(band: MoraleBand) -> Color {
    match band {
        MoraleBand::Good => Color::srgb(0.3, 0.8, 0.4),
        MoraleBand::Warning => Color::srgb(0.95, 0.8, 0.3),
        MoraleBand::Danger => Color::srgb(0.9, 0.3, 0.3),
    }
}

fn temperature_color(band: TemperatureBand) -> Color {
    match band {
        TemperatureBand::Heated => Color::srgb(0.3, 0.8, 0.4),
        TemperatureBand::Cold => Color::srgb(0.55, 0.8, 0.95),
        TemperatureBand::Freezing => Color::srgb(0.9, 0.3, 0.3),
    }
}

fn spawn_hud_text(commands: &mut Commands) {
    let mut label = |text: &str, at: Vec2, anchor: Anchor, kind: Option<HudLabel>| {
        let mut entity = commands.spawn((
            Text2d::new(text),
            TextFont {
                font_size: 12.0,
                ..default()
            },
            TextColor(Color::WHITE),
            anchor,
            Transform::from_xyz(at.x, at.y, 100.0),
            ScreenAnchor(at),
        ));
        if let Some(kind) = kind {
            entity.insert(kind);
        }
    };

    for (i, kind) in ResourceKind::ALL.into_iter().enumerate() {
        let y = HUD_TOP - i as f32 * HUD_ROW;
        label(
            kind.label(),
            Vec2::new(HUD_LEFT, y),
            Anchor::CenterLeft,
            None,
        );
        label(
            "",
            Vec2::new(HUD_LEFT + 80.0 + BAR_WIDTH + 8.0, y),
            Anchor::CenterLeft,
            Some(HudLabel::Resource(kind)),
        );
    }

    label("", Vec2::new(0.0, HUD_TOP), Anchor::Center, Some(HudLabel::Day));

    let right = arena::CANVAS_WIDTH / 2.0 - 12.0;
    label(
        "",
        Vec2::new(right, HUD_TOP),
        Anchor::CenterRight,
        Some(HudLabel::Temperature),
    );
    label(
        "",
        Vec2::new(right, HUD_TOP - HUD_ROW * 2.0),
        Anchor::CenterRight,
        Some(HudLabel::Morale),
    );

    label(
        "WASD or arrow keys to move",
        Vec2::new(0.0, -arena::CANVAS_HEIGHT / 2.0 + 14.0),
        Anchor::Center,
        None,
    );
}

fn render_hud(session: NonSend<Session>, camera: Res<CameraView>, mut gizmos: Gizmos) {
    let Some(view) = session.hud_view() else {
        return;
    };

    for (i, kind) in ResourceKind::ALL.into_iter().enumerate() {
        let center = Vec2::new(
            HUD_LEFT + 80.0 + BAR_WIDTH / 2.0,
            HUD_TOP - i as f32 * HUD_ROW,
        );
        draw_bar(
            &mut gizmos,
            &camera,
            center,
            view.resource_fill(kind),
            resource_color(kind),
        );
    }

    let right = arena::CANVAS_WIDTH / 2.0 - 12.0;
    draw_bar(
        &mut gizmos,
        &camera,
        Vec2::new(right - BAR_WIDTH / 2.0, HUD_TOP - HUD_ROW * 3.0),
        view.morale_fill(),
        morale_color(view.morale_band()),
    );
}

/// `center` is in screen space.
fn draw_bar(gizmos: &mut Gizmos, camera: &CameraView, center: Vec2, fill: f32, color: Color) {
    let s = camera.scale;
    // Background
    gizmos.rect_2d(
        Isometry2d::from_translation(camera.to_world(center)),
        Vec2::new(BAR_WIDTH, BAR_HEIGHT) * s,
        Color::srgba(0.2, 0.2, 0.25, 0.8),
    );

    let fill_width = BAR_WIDTH * fill.clamp(0.0, 1.0);
    if fill_width > 0.1 {
        let left_aligned = center - Vec2::new((BAR_WIDTH - fill_width) / 2.0, 0.0);
        gizmos.rect_2d(
            Isometry2d::from_translation(camera.to_world(left_aligned)),
            Vec2::new(fill_width, BAR_HEIGHT - 1.0) * s,
            color,
        );
    }
}

fn update_hud_text(
    session: NonSend<Session>,
    mut query: Query<(&HudLabel, &mut Text2d, &mut TextColor)>,
) {
    let Some(view) = session.hud_view() else {
        return;
    };

    for (label, mut text, mut color) in &mut query {
        match *label {
            HudLabel::Resource(kind) => {
                **text = view.resources.get(kind).to_string();
            }
            HudLabel::Day => {
                **text = format!("DAY {}", view.day);
            }
            HudLabel::Temperature => {
                let band = view.temperature_band();
                **text = format!("Temperature {}° {}", view.temperature, band.label());
                color.0 = temperature_color(band);
            }
            HudLabel::Morale => {
                **text = format!("Morale {}%", view.morale);
                color.0 = morale_color(view.morale_band());
            }
        }
    }
}

use core::time::Duration;

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy::text::TextBounds;
use demo_helpers::ContainerSize;
use demo_helpers::input::just_pressed_world_position;
use demo_helpers::motion::Tween;

pub mod geometry;
pub mod layout;

use geometry::TileGeometry;
use layout::{Click, TILE_COUNT, TileGrid, TileId};

const BACKGROUND: Color = Color::srgb(0.07, 0.09, 0.15);
const TITLE_COLOR: Color = Color::srgb(0.15, 0.39, 0.92);
const SUBTITLE_COLOR: Color = Color::srgb(0.12, 0.23, 0.54);
const DETAIL_COLOR: Color = Color::srgb(0.07, 0.09, 0.15);
const FADE_DURATION: Duration = Duration::from_millis(300);

struct TileContent {
    title: &'static str,
    subtitle: &'static str,
    detail: &'static str,
    color: Color,
}

const CONTENTS: [TileContent; TILE_COUNT] = [
    TileContent {
        title: "Water",
        subtitle: "Crisp, refreshing water.",
        detail: "Cold streams run down from the glaciers, gathering into lakes so clear \
                 the stones on the bottom look close enough to touch.",
        color: Color::srgb(0.45, 0.72, 0.86),
    },
    TileContent {
        title: "Sky",
        subtitle: "Cradle of the sun.",
        detail: "A wide blue dome, streaked with cloud in the morning and burning orange \
                 when the evening comes down over the ridge.",
        color: Color::srgb(0.62, 0.80, 0.95),
    },
    TileContent {
        title: "Mountain",
        subtitle: "Beautiful, towering peaks.",
        detail: "Granite shoulders climbing above the tree line, snow holding on in the \
                 gullies well into the summer.",
        color: Color::srgb(0.58, 0.66, 0.60),
    },
];

/// Tunables of the tile grid demo.
#[derive(Resource, Debug, Clone)]
pub struct TileGridConfig {
    /// Base delay unit between dependent moves.
    pub stagger: Duration,
    /// Duration of one position or width transition.
    pub animation: Duration,
    pub block_height: f32,
    pub gap: f32,
    /// Horizontal space kept free on each side of the container.
    pub padding: f32,
}

impl Default for TileGridConfig {
    fn default() -> Self {
        Self {
            stagger: Duration::from_millis(350),
            animation: Duration::from_millis(500),
            block_height: 260.0,
            gap: 20.0,
            padding: 80.0,
        }
    }
}

impl TileGridConfig {
    pub fn geometry(&self, size: &ContainerSize) -> TileGeometry {
        TileGeometry {
            container_width: 2.0f32.mul_add(-self.padding, size.width).max(0.0),
            block_height: self.block_height,
            gap: self.gap,
        }
    }
}

/// Committed layout, replaced as a whole on every click.
#[derive(Resource, Debug, Default)]
pub struct TileGridState {
    pub grid: TileGrid,
}

/// A pointer press, in world coordinates.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TilePress(pub Vec2);

#[derive(Component)]
pub struct TileView {
    pub id: TileId,
}

#[derive(Component)]
pub struct TileMotion {
    pub x: Tween,
    pub y: Tween,
    pub width: Tween,
}

#[derive(Component)]
struct TileBackground;

#[derive(Component, Clone, Copy, PartialEq, Eq)]
enum TileLabel {
    Title,
    Detail,
}

#[derive(Component)]
struct DetailFade(Tween);

pub struct TileGridPlugin;

impl Plugin for TileGridPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileGridConfig>()
            .init_resource::<TileGridState>()
            .init_resource::<ContainerSize>()
            .add_event::<TilePress>()
            .add_systems(Startup, spawn_tiles)
            .add_systems(
                Update,
                (
                    read_pointer,
                    handle_clicks,
                    retarget_tiles,
                    animate_tiles,
                    layout_labels,
                    fade_details,
                )
                    .chain(),
            );
    }
}

pub fn run() {
    demo_helpers::get_default_app(env!("CARGO_PKG_NAME"), BACKGROUND)
        .add_plugins(TileGridPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_tiles(
    mut commands: Commands,
    config: Res<TileGridConfig>,
    size: Res<ContainerSize>,
    state: Res<TileGridState>,
) {
    let geometry = config.geometry(&size);
    let column = geometry.column_width();

    for (tile, content) in state.grid.tiles().iter().zip(&CONTENTS) {
        let x = geometry.offset_x(tile.cell.x);
        let y = geometry.offset_y(tile.cell.y);
        let width = geometry.tile_width(state.grid.is_active(tile.id));
        let visible = if state.grid.is_active(tile.id) { 1.0 } else { 0.0 };
        let top_left = geometry.to_world(x, y);

        commands
            .spawn((
                TileView { id: tile.id },
                TileMotion {
                    x: Tween::settled(x, config.animation),
                    y: Tween::settled(y, config.animation),
                    width: Tween::settled(width, config.animation),
                },
                Transform::from_xyz(top_left.x, top_left.y, tile.id as f32),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    TileBackground,
                    Sprite {
                        color: content.color,
                        custom_size: Some(Vec2::new(width, config.block_height)),
                        anchor: Anchor::TopLeft,
                        ..default()
                    },
                ));
                parent
                    .spawn((
                        TileLabel::Title,
                        Text2d::new(content.title),
                        TextFont {
                            font_size: 56.0,
                            ..default()
                        },
                        TextColor(TITLE_COLOR),
                        TextLayout::new_with_justify(JustifyText::Center),
                        TextBounds::new_horizontal(column),
                        Transform::from_xyz(column / 2.0, -config.block_height / 2.0, 0.1),
                    ))
                    .with_child((
                        Text2d::new(content.subtitle),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(SUBTITLE_COLOR),
                        Transform::from_xyz(0.0, -50.0, 0.0),
                    ));
                parent.spawn((
                    TileLabel::Detail,
                    DetailFade(Tween::settled(visible, FADE_DURATION)),
                    Text2d::new(content.detail),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(DETAIL_COLOR.with_alpha(visible)),
                    TextLayout::new_with_justify(JustifyText::Left),
                    TextBounds::new_horizontal(column - 2.0 * config.gap),
                    Transform::from_xyz(column * 1.5, -config.block_height / 2.0, 0.1),
                ));
            });
    }
}

fn read_pointer(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    window: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    mut presses: EventWriter<TilePress>,
) {
    if let Some(position) =
        just_pressed_world_position(&mouse_button_input, &touch_input, &window, &camera)
    {
        presses.send(TilePress(position));
    }
}

// Hit-tests against where the tiles are drawn right now, mid-animation included
fn handle_clicks(
    mut presses: EventReader<TilePress>,
    tiles: Query<(&TileView, &TileMotion, &Transform)>,
    config: Res<TileGridConfig>,
    size: Res<ContainerSize>,
    mut state: ResMut<TileGridState>,
) {
    let geometry = config.geometry(&size);
    for TilePress(position) in presses.read() {
        let Some(id) = tiles
            .iter()
            .find(|(_, motion, transform)| {
                geometry
                    .tile_rect(transform.translation.truncate(), motion.width.value())
                    .contains(*position)
            })
            .map(|(view, _, _)| view.id)
        else {
            continue;
        };

        click_tile(&mut state, id, config.stagger);
    }
}

/// Applies a click to the committed layout. Faults are logged and leave the layout untouched.
fn click_tile(state: &mut ResMut<TileGridState>, id: TileId, stagger: Duration) {
    match state.grid.click(id, stagger) {
        Ok(Click::Unchanged) => debug!("Tile {id} is already expanded"),
        Ok(Click::Retiled(grid)) => {
            debug!("Expanding tile {id}");
            state.grid = grid;
        }
        Err(err) => error!("Ignoring click on tile {id}: {err}"),
    }
}

fn retarget_tiles(
    state: Res<TileGridState>,
    config: Res<TileGridConfig>,
    size: Res<ContainerSize>,
    mut tiles: Query<(&TileView, &mut TileMotion, &Children)>,
    mut details: Query<&mut DetailFade>,
) {
    let relayout = state.is_changed();
    if !relayout && !size.is_changed() {
        return;
    }

    let geometry = config.geometry(&size);
    for (view, mut motion, children) in &mut tiles {
        let Some(tile) = state.grid.tile(view.id) else {
            continue;
        };
        let active = state.grid.is_active(tile.id);
        let x = geometry.offset_x(tile.cell.x);
        let y = geometry.offset_y(tile.cell.y);
        let width = geometry.tile_width(active);

        if !relayout {
            motion.x.set_target(x);
            motion.y.set_target(y);
            motion.width.set_target(width);
            continue;
        }

        motion.x.retarget(x, tile.delay);
        motion.y.retarget(y, tile.delay);
        motion.width.retarget(width, tile.expand_delay);

        let mut details = details.iter_many_mut(children.iter());
        while let Some(mut fade) = details.fetch_next() {
            let target = if active { 1.0 } else { 0.0 };
            if (fade.0.target() - target).abs() < f32::EPSILON {
                continue;
            }
            // Content shows up once the tile is done growing
            let delay = if active {
                tile.expand_delay + config.animation
            } else {
                Duration::ZERO
            };
            fade.0.retarget(target, delay);
        }
    }
}

fn animate_tiles(
    time: Res<Time>,
    config: Res<TileGridConfig>,
    size: Res<ContainerSize>,
    mut tiles: Query<(&mut TileMotion, &mut Transform, &Children)>,
    mut backgrounds: Query<&mut Sprite, With<TileBackground>>,
) {
    let geometry = config.geometry(&size);
    for (mut motion, mut transform, children) in &mut tiles {
        let x = motion.x.tick(time.delta());
        let y = motion.y.tick(time.delta());
        let width = motion.width.tick(time.delta());

        let top_left = geometry.to_world(x, y);
        transform.translation.x = top_left.x;
        transform.translation.y = top_left.y;

        let mut backgrounds = backgrounds.iter_many_mut(children.iter());
        while let Some(mut sprite) = backgrounds.fetch_next() {
            sprite.custom_size = Some(Vec2::new(width, config.block_height));
        }
    }
}

fn layout_labels(
    config: Res<TileGridConfig>,
    size: Res<ContainerSize>,
    mut labels: Query<(&TileLabel, &mut Transform, &mut TextBounds)>,
) {
    if !size.is_changed() {
        return;
    }
    let column = config.geometry(&size).column_width();
    for (label, mut transform, mut bounds) in &mut labels {
        match label {
            TileLabel::Title => {
                transform.translation.x = column / 2.0;
                *bounds = TextBounds::new_horizontal(column);
            }
            TileLabel::Detail => {
                transform.translation.x = column * 1.5;
                *bounds = TextBounds::new_horizontal(column - 2.0 * config.gap);
            }
        }
    }
}

fn fade_details(time: Res<Time>, mut details: Query<(&mut DetailFade, &mut TextColor)>) {
    for (mut fade, mut color) in &mut details {
        let alpha = fade.0.tick(time.delta());
        color.0 = DETAIL_COLOR.with_alpha(alpha.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use bevy::time::TimeUpdateStrategy;

    use super::*;
    use crate::layout::{Cell, XPos, YPos};

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, TileGridPlugin))
            .init_resource::<ButtonInput<MouseButton>>()
            .init_resource::<Touches>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)));
        app.update();
        app
    }

    fn click(app: &mut App, id: TileId) {
        let stagger = app.world().resource::<TileGridConfig>().stagger;
        let world = app.world_mut();
        let Some(Click::Retiled(grid)) = world
            .resource::<TileGridState>()
            .grid
            .click(id, stagger)
            .ok()
        else {
            panic!("click on tile {id} should retile");
        };
        world.resource_mut::<TileGridState>().grid = grid;
    }

    fn press(app: &mut App, position: Vec2) {
        app.world_mut().send_event(TilePress(position));
        app.update();
    }

    fn grid(app: &App) -> TileGrid {
        app.world().resource::<TileGridState>().grid.clone()
    }

    fn run_for(app: &mut App, seconds: u32) {
        for _ in 0..(seconds * 20) {
            app.update();
        }
    }

    fn top_left(app: &mut App, id: TileId) -> Vec2 {
        let mut tiles = app.world_mut().query::<(&TileView, &Transform)>();
        tiles
            .iter(app.world())
            .find(|(view, _)| view.id == id)
            .map(|(_, transform)| transform.translation.truncate())
            .unwrap_or_else(|| panic!("tile {id} was not spawned"))
    }

    fn width(app: &mut App, id: TileId) -> f32 {
        let mut tiles = app.world_mut().query::<(&TileView, &TileMotion)>();
        tiles
            .iter(app.world())
            .find(|(view, _)| view.id == id)
            .map(|(_, motion)| motion.width.value())
            .unwrap_or_else(|| panic!("tile {id} was not spawned"))
    }

    fn expected(app: &App, cell: Cell) -> Vec2 {
        let world = app.world();
        let geometry = world
            .resource::<TileGridConfig>()
            .geometry(world.resource::<ContainerSize>());
        geometry.to_world(geometry.offset_x(cell.x), geometry.offset_y(cell.y))
    }

    #[test]
    fn tiles_spawn_on_their_cells() {
        let mut app = app();

        for (id, cell) in [
            (0, Cell::new(XPos::Left, YPos::Top)),
            (1, Cell::new(XPos::Left, YPos::Bottom)),
            (2, Cell::new(XPos::Right, YPos::Bottom)),
        ] {
            assert_eq!(
                top_left(&mut app, id),
                expected(&app, cell),
                "tile {id} should start at {cell}"
            );
        }
    }

    #[test]
    fn tiles_glide_to_their_new_cells() {
        let mut app = app();
        click(&mut app, 2);
        run_for(&mut app, 3);

        assert_eq!(
            top_left(&mut app, 2),
            expected(&app, Cell::new(XPos::Left, YPos::Bottom)),
            "clicked tile should end in the left column"
        );
        assert_eq!(
            top_left(&mut app, 0),
            expected(&app, Cell::new(XPos::Right, YPos::Top)),
            "previous active tile should end top right"
        );
        let full = {
            let world = app.world();
            world
                .resource::<TileGridConfig>()
                .geometry(world.resource::<ContainerSize>())
                .tile_width(true)
        };
        assert_eq!(width(&mut app, 2), full, "clicked tile should be fully expanded");
    }

    #[test]
    fn clicked_tile_waits_for_the_others() {
        let mut app = app();
        let start = top_left(&mut app, 2);
        click(&mut app, 2);
        // 3 stagger units of 350ms have not passed yet
        run_for(&mut app, 1);

        assert_eq!(top_left(&mut app, 2), start, "clicked tile moved too early");
    }

    #[test]
    fn pressing_a_tile_expands_it() {
        let mut app = app();
        let inside = top_left(&mut app, 2) + Vec2::new(10.0, -10.0);

        press(&mut app, inside);
        let expanded = grid(&app);
        assert_eq!(expanded.active(), 2, "pressed tile should become active");

        // Tile 2 is still drawn where it was, waiting for its delay
        press(&mut app, inside);
        assert_eq!(grid(&app), expanded, "pressing the expanded tile changes nothing");
    }

    #[test]
    fn presses_follow_the_drawn_tiles() {
        let mut app = app();
        let gap = top_left(&mut app, 2) + Vec2::new(-5.0, -10.0);

        press(&mut app, gap);
        assert_eq!(grid(&app), TileGrid::default(), "gap between tiles is not a tile");

        let bottom_right = top_left(&mut app, 2) + Vec2::new(10.0, -10.0);
        press(&mut app, bottom_right);
        run_for(&mut app, 3);
        // Tile 2 now spans the bottom row, covering the old gap
        press(&mut app, gap);
        assert_eq!(grid(&app).active(), 2, "expanded tile covers its whole row");

        let top_right = top_left(&mut app, 0) + Vec2::new(10.0, -10.0);
        press(&mut app, top_right);
        assert_eq!(grid(&app).active(), 0, "shrunk tile is hit where it now sits");
    }

    #[test]
    fn faulty_click_keeps_the_layout() {
        let mut app = app();
        let below_grid = Vec2::new(0.0, -1000.0);
        app.world_mut().spawn((
            TileView { id: 7 },
            TileMotion {
                x: Tween::settled(0.0, Duration::ZERO),
                y: Tween::settled(0.0, Duration::ZERO),
                width: Tween::settled(100.0, Duration::ZERO),
            },
            Transform::from_translation(below_grid.extend(0.0)),
        ));

        press(&mut app, below_grid + Vec2::new(10.0, -10.0));

        assert_eq!(
            grid(&app),
            TileGrid::default(),
            "a click the layout rejects should leave it untouched"
        );
    }

    #[test]
    fn resize_rescales_without_moving_cells() {
        let mut app = app();
        app.world_mut().resource_mut::<ContainerSize>().width = 900.0;
        run_for(&mut app, 1);

        assert_eq!(
            top_left(&mut app, 2),
            expected(&app, Cell::new(XPos::Right, YPos::Bottom)),
            "tile should follow its cell after a resize"
        );
        assert_eq!(
            width(&mut app, 0),
            900.0 - 2.0 * TileGridConfig::default().padding,
            "active tile should span the narrower container"
        );
    }
}

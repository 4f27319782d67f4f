use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::sprite::Anchor;
use demo_helpers::ContainerSize;
use demo_helpers::input::held_screen_position;
use demo_helpers::motion::{Spring, SpringValue};

pub mod strip;

use strip::{Strip, tilt_target};

const BACKGROUND: Color = Color::srgb(0.37, 0.92, 0.83);
const STRING_COLOR: Color = Color::srgb(0.55, 0.45, 0.35);
const FRAME_COLOR: Color = Color::WHITE;
const CAPTION_COLOR: Color = Color::BLACK;

// Pixels scrolled per wheel line
const LINE_HEIGHT: f32 = 40.0;

struct Photo {
    caption: &'static str,
    color: Color,
}

const PHOTOS: [Photo; 3] = [
    Photo {
        caption: "Mountain",
        color: Color::srgb(0.48, 0.55, 0.50),
    },
    Photo {
        caption: "Sky",
        color: Color::srgb(0.55, 0.75, 0.95),
    },
    Photo {
        caption: "Water",
        color: Color::srgb(0.25, 0.50, 0.70),
    },
];

#[derive(Resource, Debug, Clone)]
pub struct CarouselConfig {
    pub card_count: usize,
    pub card_width: f32,
    pub photo_height: f32,
    pub gutter: f32,
    /// Distance from the top of the window to the rail the cards hang from.
    pub rail_top: f32,
    /// Length of the shortest string.
    pub string_length: f32,
    /// Cards hang up to this much lower than the shortest string, picked at random.
    pub max_drop: f32,
    pub degrees_per_pixel: f32,
    pub tilt: Spring,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            card_count: 9,
            card_width: 320.0,
            photo_height: 240.0,
            gutter: 40.0,
            rail_top: 40.0,
            string_length: 96.0,
            max_drop: 160.0,
            degrees_per_pixel: 0.2,
            tilt: Spring {
                stiffness: 150.0,
                damping: 2.0,
                mass: 2.0,
            },
        }
    }
}

#[derive(Resource, Debug)]
pub struct CardStrip(pub Strip);

/// Shared lean of every card, in degrees, clockwise.
#[derive(Resource, Debug, Default)]
pub struct CardTilt(pub SpringValue);

#[derive(Resource, Default)]
struct Drag {
    last: Option<Vec2>,
}

#[derive(Component)]
struct StripRoot;

#[derive(Component)]
struct Card;

pub struct CarouselPlugin;

impl Plugin for CarouselPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CarouselConfig>()
            .init_resource::<ContainerSize>()
            .init_resource::<CardTilt>()
            .init_resource::<Drag>()
            .add_systems(PreStartup, init_strip)
            .add_systems(Startup, spawn_cards)
            .add_systems(
                Update,
                (
                    resize_strip.run_if(resource_changed::<ContainerSize>),
                    drag_strip,
                    wheel_strip,
                    swing_cards,
                    place_strip,
                )
                    .chain(),
            );
    }
}

pub fn run() {
    demo_helpers::get_default_app(env!("CARGO_PKG_NAME"), BACKGROUND)
        .add_plugins(CarouselPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn init_strip(mut commands: Commands, config: Res<CarouselConfig>, size: Res<ContainerSize>) {
    commands.insert_resource(CardStrip(Strip::new(
        config.card_count,
        config.card_width,
        config.gutter,
        size.width,
    )));
}

fn spawn_cards(
    mut commands: Commands,
    config: Res<CarouselConfig>,
    strip: Res<CardStrip>,
    size: Res<ContainerSize>,
) {
    let frame = 8.0;
    let photo_size = Vec2::new(config.card_width - 2.0 * frame, config.photo_height);
    let frame_size = Vec2::new(config.card_width, config.photo_height + 60.0);

    commands
        .spawn((
            StripRoot,
            Transform::from_xyz(-size.width / 2.0, size.height / 2.0 - config.rail_top, 0.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            for (index, photo) in PHOTOS.iter().cycle().take(config.card_count).enumerate() {
                let hang = config.string_length + fastrand::f32() * config.max_drop;
                let center = strip.0.card_center(index, config.card_width);
                let caption_y = -hang - frame - config.photo_height - 24.0;
                parent
                    .spawn((
                        Card,
                        Transform::from_xyz(center, 0.0, 0.0),
                        Visibility::default(),
                    ))
                    .with_children(|card| {
                        card.spawn((
                            Sprite {
                                color: STRING_COLOR,
                                custom_size: Some(Vec2::new(4.0, hang + frame)),
                                anchor: Anchor::TopCenter,
                                ..default()
                            },
                            Transform::from_xyz(0.0, 0.0, -1.0),
                        ));
                        card.spawn((
                            Sprite {
                                color: FRAME_COLOR,
                                custom_size: Some(frame_size),
                                anchor: Anchor::TopCenter,
                                ..default()
                            },
                            Transform::from_xyz(0.0, -hang, 0.0),
                        ));
                        card.spawn((
                            Sprite {
                                color: photo.color,
                                custom_size: Some(photo_size),
                                anchor: Anchor::TopCenter,
                                ..default()
                            },
                            Transform::from_xyz(0.0, -hang - frame, 0.1),
                        ));
                        card.spawn((
                            Text2d::new(photo.caption),
                            TextFont {
                                font_size: 24.0,
                                ..default()
                            },
                            TextColor(CAPTION_COLOR),
                            Transform::from_xyz(0.0, caption_y, 0.1),
                        ));
                    });
            }
        });
}

fn resize_strip(mut strip: ResMut<CardStrip>, size: Res<ContainerSize>) {
    strip.0.resize(size.width);
}

fn drag_strip(
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    window: Query<&Window>,
    config: Res<CarouselConfig>,
    mut drag: ResMut<Drag>,
    mut strip: ResMut<CardStrip>,
    mut tilt: ResMut<CardTilt>,
) {
    let position = held_screen_position(&mouse_button_input, &touch_input, &window);
    let delta = match (drag.last, position) {
        (Some(last), Some(position)) => Some(position.x - last.x),
        (None, Some(_)) => Some(0.0),
        (_, None) => None,
    };
    drag.last = position;

    if let Some(delta) = delta {
        strip.0.scroll_by(delta);
    }
    tilt.0.target = tilt_target(delta, config.degrees_per_pixel);
}

fn wheel_strip(mut wheel: EventReader<MouseWheel>, mut strip: ResMut<CardStrip>) {
    for event in wheel.read() {
        let scale = match event.unit {
            MouseScrollUnit::Line => LINE_HEIGHT,
            MouseScrollUnit::Pixel => 1.0,
        };
        strip.0.scroll_by((event.x + event.y) * scale);
    }
}

fn swing_cards(
    time: Res<Time>,
    config: Res<CarouselConfig>,
    mut tilt: ResMut<CardTilt>,
    mut cards: Query<&mut Transform, With<Card>>,
) {
    tilt.0.step(&config.tilt, time.delta());
    let rotation = Quat::from_rotation_z(-tilt.0.value.to_radians());
    for mut transform in &mut cards {
        transform.rotation = rotation;
    }
}

fn place_strip(
    strip: Res<CardStrip>,
    size: Res<ContainerSize>,
    config: Res<CarouselConfig>,
    mut root: Query<&mut Transform, With<StripRoot>>,
) {
    let Ok(mut transform) = root.get_single_mut() else {
        return;
    };
    transform.translation.x = -size.width / 2.0 + strip.0.offset;
    transform.translation.y = size.height / 2.0 - config.rail_top;
}

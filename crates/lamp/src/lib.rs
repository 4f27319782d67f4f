use core::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use demo_helpers::ContainerSize;
use demo_helpers::input::pointer_world_position;

pub mod cone;

use cone::{cone_rotation, head_position, light_cone};

const BACKGROUND: Color = Color::srgb(0.94, 0.27, 0.27);
const LIGHT_COLOR: Color = Color::srgb(0.36, 0.62, 0.27);
const BASE_COLOR: Color = Color::srgb(0.38, 0.38, 0.38);
const ARM_COLOR: Color = Color::srgb(0.57, 0.57, 0.57);
const SHADE_COLOR: Color = Color::srgb(0.85, 0.85, 0.85);
const BULB_COLOR: Color = Color::srgb(0.99, 1.0, 0.70);

// Lamp body proportions, measured from the top-left corner of the lamp, y down
const BASE_CENTER: Vec2 = Vec2::new(101.5, 446.5);
const BASE_RADII: Vec2 = Vec2::new(101.5, 34.5);
const ARM_FOOT: Vec2 = Vec2::new(128.0, 438.0);
const ARM_JOINT: Vec2 = Vec2::new(205.0, 150.0);
const ARM_THICKNESS: f32 = 16.0;

#[derive(Resource, Debug, Clone)]
pub struct LampConfig {
    pub lamp_size: Vec2,
    /// Half of the cone opening, in radians.
    pub cone_half_angle: f32,
}

impl Default for LampConfig {
    fn default() -> Self {
        Self {
            lamp_size: Vec2::new(229.0, 481.0),
            cone_half_angle: 15f32.to_radians(),
        }
    }
}

impl LampConfig {
    // The lamp is centered on the origin
    fn top_left(&self) -> Vec2 {
        Vec2::new(-self.lamp_size.x / 2.0, self.lamp_size.y / 2.0)
    }

    fn lamp_point(&self, from_top_left: Vec2) -> Vec2 {
        self.top_left() + Vec2::new(from_top_left.x, -from_top_left.y)
    }

    pub fn head(&self) -> Vec2 {
        head_position(self.top_left(), self.lamp_size)
    }
}

/// Current aim of the lamp head, in radians.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct LampAim(pub f32);

#[derive(Component)]
struct Backdrop;

#[derive(Component)]
struct LightBeam;

#[derive(Component)]
struct LampHead;

pub struct LampPlugin;

impl Plugin for LampPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LampConfig>()
            .init_resource::<LampAim>()
            .init_resource::<ContainerSize>()
            .add_systems(Startup, spawn_lamp)
            .add_systems(
                Update,
                (
                    track_pointer,
                    rebuild_beam.run_if(resource_changed::<ContainerSize>),
                    aim_lamp.run_if(resource_changed::<LampAim>),
                )
                    .chain(),
            );
    }
}

pub fn run() {
    demo_helpers::get_default_app(env!("CARGO_PKG_NAME"), BACKGROUND)
        .add_plugins(LampPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_lamp(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<LampConfig>,
    size: Res<ContainerSize>,
) {
    commands.spawn((
        Backdrop,
        Sprite::from_color(BACKGROUND, Vec2::new(size.width, size.height)),
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));

    let head = config.head();
    commands.spawn((
        LightBeam,
        Mesh2d(meshes.add(Triangle2d::default())),
        MeshMaterial2d(materials.add(LIGHT_COLOR)),
        Transform::from_xyz(head.x, head.y, -5.0),
    ));

    commands.spawn((
        Mesh2d(meshes.add(Ellipse::new(BASE_RADII.x, BASE_RADII.y))),
        MeshMaterial2d(materials.add(BASE_COLOR)),
        Transform::from_translation(config.lamp_point(BASE_CENTER).extend(0.0)),
    ));

    let foot = config.lamp_point(ARM_FOOT);
    let joint = config.lamp_point(ARM_JOINT);
    let arm = joint - foot;
    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(ARM_THICKNESS, arm.length()))),
        MeshMaterial2d(materials.add(ARM_COLOR)),
        Transform::from_translation(((foot + joint) / 2.0).extend(1.0))
            .with_rotation(Quat::from_rotation_z(arm.to_angle() - FRAC_PI_2)),
    ));

    commands
        .spawn((
            LampHead,
            Transform::from_xyz(head.x, head.y, 2.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(meshes.add(Ellipse::new(100.0, 55.0))),
                MeshMaterial2d(materials.add(SHADE_COLOR)),
                Transform::from_xyz(30.0, 20.0, 0.0),
            ));
            parent.spawn((
                Mesh2d(meshes.add(Ellipse::new(14.0, 50.0))),
                MeshMaterial2d(materials.add(BULB_COLOR)),
                Transform::from_xyz(-62.0, 10.0, 0.1),
            ));
        });
}

fn track_pointer(
    touch_input: Res<Touches>,
    window: Query<&Window>,
    camera: Query<(&Camera, &GlobalTransform)>,
    config: Res<LampConfig>,
    mut aim: ResMut<LampAim>,
) {
    let Some(pointer) = pointer_world_position(&touch_input, &window, &camera) else {
        return;
    };
    let rotation = cone_rotation(config.head(), pointer);
    aim.set_if_neq(LampAim(rotation));
}

fn rebuild_beam(
    mut meshes: ResMut<Assets<Mesh>>,
    config: Res<LampConfig>,
    size: Res<ContainerSize>,
    mut beam: Query<&mut Mesh2d, With<LightBeam>>,
    mut backdrop: Query<&mut Sprite, With<Backdrop>>,
) {
    let bottom_left = Vec2::new(-size.width / 2.0, -size.height / 2.0);
    let cone = light_cone(config.head(), bottom_left, config.cone_half_angle);

    if let Ok(mut mesh) = beam.get_single_mut() {
        *mesh = Mesh2d(meshes.add(Triangle2d::new(cone.apex, cone.upper, cone.lower)));
    }
    if let Ok(mut sprite) = backdrop.get_single_mut() {
        sprite.custom_size = Some(Vec2::new(size.width, size.height));
    }
}

fn aim_lamp(
    aim: Res<LampAim>,
    mut pivots: Query<&mut Transform, Or<(With<LightBeam>, With<LampHead>)>>,
) {
    for mut transform in &mut pivots {
        transform.rotation = Quat::from_rotation_z(aim.0);
    }
}

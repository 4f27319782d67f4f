//! A pill shaped "Hello!" button. Its face would show a blurred camera feed, but
//! there is no camera capture here, so the face stays a flat grey.

use core::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::text::TextLayoutInfo;

const BACKGROUND: Color = Color::WHITE;
const FACE_COLOR: Color = Color::srgb(0.42, 0.45, 0.50);
const BORDER_COLOR: Color = Color::BLACK;
const LABEL_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.7);

#[derive(Resource, Debug, Clone)]
pub struct ShinyConfig {
    pub label: String,
    pub font_size: f32,
    /// Space between the label and the outline, per side.
    pub padding: Vec2,
    pub border: f32,
}

impl Default for ShinyConfig {
    fn default() -> Self {
        Self {
            label: "Hello!".to_owned(),
            font_size: 24.0,
            padding: Vec2::new(48.0, 16.0),
            border: 1.0,
        }
    }
}

impl ShinyConfig {
    pub fn button_size(&self, label_size: Vec2) -> Vec2 {
        label_size + 2.0 * self.padding
    }
}

/// Capsule with fully rounded ends covering `size`, lying along its own y axis.
pub fn pill(size: Vec2) -> Capsule2d {
    let radius = size.y.min(size.x) / 2.0;
    Capsule2d::new(radius, (size.x - 2.0 * radius).max(0.0))
}

/// Outer size of the button, measured from its label.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq)]
pub struct ButtonSize(pub Vec2);

#[derive(Component)]
struct ButtonLabel;

#[derive(Component, Clone, Copy)]
enum ButtonLayer {
    Border,
    Face,
}

pub struct ShinyPlugin;

impl Plugin for ShinyPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ShinyConfig>()
            .add_systems(Startup, spawn_button)
            .add_systems(Update, (fit_button, reshape_button).chain());
    }
}

pub fn run() {
    demo_helpers::get_default_app(env!("CARGO_PKG_NAME"), BACKGROUND)
        .add_plugins(ShinyPlugin)
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn spawn_button(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    config: Res<ShinyConfig>,
) {
    debug!("No camera feed, the button face stays plain");

    let size = config.button_size(Vec2::new(config.font_size * 3.0, config.font_size));
    commands
        .spawn((ButtonSize(size), Transform::default(), Visibility::default()))
        .with_children(|parent| {
            parent.spawn((
                ButtonLayer::Border,
                Mesh2d(meshes.add(pill(size + 2.0 * config.border))),
                MeshMaterial2d(materials.add(BORDER_COLOR)),
                Transform::from_xyz(0.0, 0.0, 0.0).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            ));
            parent.spawn((
                ButtonLayer::Face,
                Mesh2d(meshes.add(pill(size))),
                MeshMaterial2d(materials.add(FACE_COLOR)),
                Transform::from_xyz(0.0, 0.0, 0.1).with_rotation(Quat::from_rotation_z(FRAC_PI_2)),
            ));
            parent.spawn((
                ButtonLabel,
                Text2d::new(config.label.clone()),
                TextFont {
                    font_size: config.font_size,
                    ..default()
                },
                TextColor(LABEL_COLOR),
                TextLayoutInfo::default(),
                Transform::from_xyz(0.0, 0.0, 0.2),
            ));
        });
}

// Text is measured by the text pipeline, the outline follows once it is known
fn fit_button(
    config: Res<ShinyConfig>,
    labels: Query<(&TextLayoutInfo, &Parent), (With<ButtonLabel>, Changed<TextLayoutInfo>)>,
    mut buttons: Query<&mut ButtonSize>,
) {
    for (info, parent) in &labels {
        if info.size == Vec2::ZERO {
            continue;
        }
        if let Ok(mut size) = buttons.get_mut(parent.get()) {
            size.set_if_neq(ButtonSize(config.button_size(info.size)));
        }
    }
}

fn reshape_button(
    mut meshes: ResMut<Assets<Mesh>>,
    config: Res<ShinyConfig>,
    buttons: Query<(&ButtonSize, &Children), Changed<ButtonSize>>,
    mut layers: Query<(&ButtonLayer, &mut Mesh2d)>,
) {
    for (size, children) in &buttons {
        let mut layers = layers.iter_many_mut(children.iter());
        while let Some((layer, mut mesh)) = layers.fetch_next() {
            let shape = match layer {
                ButtonLayer::Border => pill(size.0 + 2.0 * config.border),
                ButtonLayer::Face => pill(size.0),
            };
            *mesh = Mesh2d(meshes.add(shape));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pill_has_round_ends() {
        let shape = pill(Vec2::new(200.0, 64.0));

        assert_eq!(shape.radius, 32.0, "ends are half circles of the button height");
        assert_eq!(shape.half_length, 68.0, "straight part fills the rest of the width");
    }

    #[test]
    fn narrow_pill_degrades_to_a_circle() {
        let shape = pill(Vec2::new(40.0, 64.0));

        assert_eq!(shape.radius, 20.0, "radius never exceeds half the width");
        assert_eq!(shape.half_length, 0.0, "no straight part is left");
    }

    #[test]
    fn button_grows_to_its_label() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, ShinyPlugin))
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<ColorMaterial>>();
        app.update();

        let label_size = Vec2::new(70.0, 32.0);
        let mut labels = app
            .world_mut()
            .query_filtered::<&mut TextLayoutInfo, With<ButtonLabel>>();
        for mut info in labels.iter_mut(app.world_mut()) {
            info.size = label_size;
        }
        app.update();

        let mut buttons = app.world_mut().query::<&ButtonSize>();
        let sizes: Vec<_> = buttons.iter(app.world()).copied().collect();
        assert_eq!(
            sizes,
            vec![ButtonSize(Vec2::new(166.0, 64.0))],
            "one button, padded around its label"
        );
    }
}

use core::time::Duration;

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

/// Last measured size of the primary window, in logical pixels.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ContainerSize {
    pub width: f32,
    pub height: f32,
}

impl Default for ContainerSize {
    fn default() -> Self {
        Self {
            width: crate::WINDOW_WIDTH,
            height: crate::WINDOW_HEIGHT,
        }
    }
}

/// Minimum time between two `ContainerSize` updates while the window is being resized.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ResizeThrottle(pub Duration);

impl Default for ResizeThrottle {
    fn default() -> Self {
        Self(Duration::from_millis(100))
    }
}

#[derive(Resource, Default)]
struct PendingResize {
    size: Option<Vec2>,
    cooldown: Option<Timer>,
}

pub struct ContainerSizePlugin;

impl Plugin for ContainerSizePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ContainerSize>()
            .init_resource::<ResizeThrottle>()
            .init_resource::<PendingResize>()
            .add_systems(Startup, measure_on_startup)
            .add_systems(PreUpdate, throttle_resize);
    }
}

fn measure_on_startup(
    mut size: ResMut<ContainerSize>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(window) = window.get_single() else {
        return;
    };
    size.width = window.width();
    size.height = window.height();
}

// Leading edge updates right away, the last size seen during the cooldown is applied when it ends
fn throttle_resize(
    mut events: EventReader<WindowResized>,
    mut pending: ResMut<PendingResize>,
    mut size: ResMut<ContainerSize>,
    throttle: Res<ResizeThrottle>,
    time: Res<Time>,
) {
    if let Some(event) = events.read().last() {
        pending.size = Some(Vec2::new(event.width, event.height));
    }

    if let Some(cooldown) = pending.cooldown.as_mut() {
        cooldown.tick(time.delta());
        if !cooldown.finished() {
            return;
        }
        pending.cooldown = None;
    }

    let Some(new_size) = pending.size.take() else {
        return;
    };
    let new_size = ContainerSize {
        width: new_size.x,
        height: new_size.y,
    };
    if *size != new_size {
        debug!("Container resized to {}x{}", new_size.width, new_size.height);
        *size = new_size;
    }
    pending.cooldown = Some(Timer::new(throttle.0, TimerMode::Once));
}

// wgpu refuses surfaces larger than the maximum texture size
#[cfg(target_arch = "wasm32")]
const MAX_SURFACE: Vec2 = Vec2::splat(2048.0);

#[cfg(target_arch = "wasm32")]
fn browser_viewport() -> Option<Vec2> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Vec2::new(width as f32, height as f32))
}

/// Keeps the primary window sized to the browser viewport. The resulting
/// `WindowResized` events go through the same throttle as native resizes.
#[cfg(target_arch = "wasm32")]
pub fn handle_browser_resize(mut window: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(viewport) = browser_viewport() else {
        return;
    };
    let Ok(mut window) = window.get_single_mut() else {
        return;
    };
    let target = viewport.min(MAX_SURFACE);
    let current = Vec2::new(window.resolution.width(), window.resolution.height());
    if !current.abs_diff_eq(target, f32::EPSILON) {
        window.resolution.set(target.x, target.y);
    }
}

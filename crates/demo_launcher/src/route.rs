use core::str::FromStr;

use strum::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum Demo {
    #[default]
    TileGrid,
    Lamp,
    Carousel,
    Shiny,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("No demo is served at `{0}`")]
    UnknownRoute(String),
}

impl Demo {
    /// Maps a page path (or bare demo name) to its demo. The root path serves the tile grid.
    pub fn from_route(path: &str) -> Result<Self, RouteError> {
        let name = path.trim_matches('/');
        if name.is_empty() {
            return Ok(Self::default());
        }
        Self::from_str(name)
            .ok()
            .ok_or_else(|| RouteError::UnknownRoute(path.to_owned()))
    }

    pub fn run(self) {
        match self {
            Self::TileGrid => tile_grid::run(),
            Self::Lamp => lamp::run(),
            Self::Carousel => carousel::run(),
            Self::Shiny => shiny::run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn root_serves_the_tile_grid() {
        assert_eq!(Demo::from_route("/"), Ok(Demo::TileGrid), "root route");
        assert_eq!(Demo::from_route(""), Ok(Demo::TileGrid), "empty route");
    }

    #[test]
    fn every_demo_is_reachable_by_its_route() {
        for demo in Demo::iter() {
            assert_eq!(
                Demo::from_route(&format!("/{demo}")),
                Ok(demo),
                "{demo} should round-trip through its route"
            );
        }
    }

    #[test]
    fn names_and_trailing_slashes_are_accepted() {
        assert_eq!(Demo::from_route("lamp"), Ok(Demo::Lamp), "bare name");
        assert_eq!(Demo::from_route("/shiny"), Ok(Demo::Shiny), "camera button page");
        assert_eq!(Demo::from_route("/carousel/"), Ok(Demo::Carousel), "trailing slash");
    }

    #[test]
    fn unknown_and_nested_routes_are_rejected() {
        assert_eq!(
            Demo::from_route("/camera"),
            Err(RouteError::UnknownRoute("/camera".to_owned())),
            "unknown demo"
        );
        assert_eq!(
            Demo::from_route("/lamp/settings"),
            Err(RouteError::UnknownRoute("/lamp/settings".to_owned())),
            "routes have no nesting"
        );
    }
}

use crate::app::Message;
use crate::tile_cache::{TileCache, TileState};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Size, Theme,
};
use lunarcore::map::tiles::{screen_offset, visible_tiles, TILE_SIZE};
use lunarcore::map::{MapScene, MarkerState};

/// Draws the retained map scene: moon tiles under the current marker.
pub struct MoonMap<'a> {
    scene: Option<&'a MapScene>,
    markers: Vec<MarkerState>,
    tiles: &'a TileCache,
}

impl<'a> MoonMap<'a> {
    pub fn new(scene: Option<&'a MapScene>, markers: Vec<MarkerState>, tiles: &'a TileCache) -> Self {
        Self {
            scene,
            markers,
            tiles,
        }
    }
}

impl canvas::Program<Message> for MoonMap<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), Color::from_rgb(0.02, 0.02, 0.03));

        let Some(scene) = self.scene else {
            return vec![frame.into_geometry()];
        };
        let width = bounds.width as f64;
        let height = bounds.height as f64;
        let tile_size = Size::new(TILE_SIZE as f32, TILE_SIZE as f32);

        if let Some(map_type) = scene.active_map_type() {
            for placed in visible_tiles(scene.center, scene.zoom, width, height) {
                let Some(url) = map_type.tile_url(placed.coord, scene.zoom) else {
                    continue;
                };
                let origin = Point::new(placed.left as f32, placed.top as f32);
                match self.tiles.get(&url) {
                    Some(TileState::Ready(handle)) => {
                        frame.draw_image(
                            Rectangle::new(origin, tile_size),
                            canvas::Image::new(handle.clone()),
                        );
                    }
                    Some(TileState::Failed) => {
                        frame.fill_rectangle(origin, tile_size, Color::from_rgb(0.18, 0.06, 0.06));
                    }
                    _ => {
                        frame.fill_rectangle(origin, tile_size, Color::from_rgb(0.12, 0.12, 0.14));
                        frame.stroke(
                            &Path::rectangle(origin, tile_size),
                            Stroke::default().with_color(Color::from_rgb(0.2, 0.2, 0.24)),
                        );
                    }
                }
            }
        }

        for marker in &self.markers {
            let (x, y) = screen_offset(scene.center, marker.position, scene.zoom, width, height);
            let tip = Point::new(x as f32, y as f32);
            let pin = Path::new(|builder| builder.circle(tip, 7.0));
            frame.fill(&pin, Color::from_rgb(0.95, 0.3, 0.2));
            frame.stroke(
                &pin,
                Stroke::default()
                    .with_width(2.0)
                    .with_color(Color::from_rgb(1.0, 1.0, 1.0)),
            );
        }

        vec![frame.into_geometry()]
    }
}

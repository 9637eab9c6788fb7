use crate::config::LocatorConfig;
use crate::map_canvas::MoonMap;
use crate::tile_cache::{self, TileCache};
use iced::{
    time,
    widget::{button, canvas::Canvas, column, row, scrollable, text, text_input, Column, Container},
    window, Alignment, Color, Element, Length, Size, Subscription, Task, Theme,
};
use lunarcore::collection::{FetchRequest, HttpVehicleSource};
use lunarcore::entity::{Cid, StatusColor, VehicleRecord};
use lunarcore::map::SceneProvider;
use lunarcore::{AppContext, ShellSettings};
use std::time::Duration;

pub fn application_title(_: &Locator) -> String {
    "Lunar Locator".into()
}

pub fn application_subscription(state: &Locator) -> Subscription<Message> {
    let resizes = window::resize_events().map(|(_, size)| Message::WindowResized(size));
    match state.refresh {
        Some(period) => Subscription::batch([time::every(period).map(|_| Message::Tick), resizes]),
        None => resizes,
    }
}

pub fn application_theme(_: &Locator) -> Theme {
    Theme::Dark
}

pub struct Locator {
    app: AppContext<SceneProvider>,
    client: reqwest::Client,
    tiles: TileCache,
    route_input: String,
    refresh: Option<Duration>,
    /// Window size; the map canvas always fits inside it.
    viewport: (f64, f64),
}

#[derive(Debug, Clone)]
pub enum Message {
    Tick,
    Refresh,
    VehiclesFetched(FetchRequest, Result<Vec<VehicleRecord>, String>),
    ShowDetail(Cid),
    CloseDetail,
    RouteChanged(String),
    Navigate,
    Back,
    Forward,
    TileFetched(String, Result<Vec<u8>, String>),
    WindowResized(Size),
}

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

impl Locator {
    /// `settings` were validated in `main`, so startup cannot fail here.
    pub fn boot(config: &LocatorConfig, settings: &ShellSettings) -> (Self, Task<Message>) {
        let (app, request) = AppContext::start(settings, SceneProvider::new())
            .expect("locator config validated before launch");
        let mut state = Locator {
            app,
            client: reqwest::Client::new(),
            tiles: TileCache::new(),
            route_input: settings.initial_route.clone(),
            refresh: config.refresh_secs.map(Duration::from_secs),
            viewport: (config.viewport.width as f64, config.viewport.height as f64),
        };
        let tiles = state.request_tiles();
        let fetch = state.fetch(request);
        (state, Task::batch([fetch, tiles]))
    }

    pub fn update(state: &mut Self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                let request = state.app.refresh(false);
                state.fetch(request)
            }
            Message::Refresh => {
                let request = state.app.refresh(true);
                state.fetch(request)
            }
            Message::VehiclesFetched(request, result) => {
                state.app.apply_fetch(&request, result);
                Task::none()
            }
            Message::ShowDetail(cid) => {
                if let Err(err) = state.app.show_detail(cid) {
                    log::error!("map update failed: {err}");
                }
                state.request_tiles()
            }
            Message::CloseDetail => {
                state.app.close_detail();
                Task::none()
            }
            Message::RouteChanged(value) => {
                state.route_input = value;
                Task::none()
            }
            Message::Navigate => {
                state.app.navigate(&state.route_input);
                Task::none()
            }
            Message::Back => {
                state.app.back();
                state.route_input = state.app.history().current().to_string();
                Task::none()
            }
            Message::Forward => {
                state.app.forward();
                state.route_input = state.app.history().current().to_string();
                Task::none()
            }
            Message::TileFetched(url, result) => {
                state.tiles.resolve(url, result);
                Task::none()
            }
            Message::WindowResized(size) => {
                state.viewport = (size.width as f64, size.height as f64);
                state.request_tiles()
            }
        }
    }

    pub fn view(state: &Self) -> Element<'_, Message> {
        let app = &state.app;

        let route_bar = row![
            button("<").on_press(Message::Back).padding(6),
            button(">").on_press(Message::Forward).padding(6),
            text_input("/vehicle/:id", &state.route_input)
                .on_input(Message::RouteChanged)
                .on_submit(Message::Navigate)
                .padding(6),
            button("Go").on_press(Message::Navigate).padding(6),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        let rows = if app.list().items().is_empty() {
            Column::new().push(text("No vehicles loaded").size(14))
        } else {
            app.list()
                .items()
                .iter()
                .fold(Column::new().spacing(4), |col, item| {
                    let style: ButtonStyle = if item.is_active() {
                        button::primary
                    } else {
                        button::secondary
                    };
                    col.push(
                        button(
                            row![
                                text("●").color(status_color(item.color())),
                                text(item.content().to_string()).size(14),
                            ]
                            .spacing(8),
                        )
                        .on_press(Message::ShowDetail(item.cid()))
                        .style(style)
                        .width(Length::Fill),
                    )
                })
        };

        let metrics = app.metrics();
        let status = text(format!(
            "{} vehicles | fetches ok {} / failed {} / stale {} | tiles {}",
            app.collection().len(),
            metrics.applied,
            metrics.failed,
            metrics.stale,
            state.tiles.ready_count()
        ))
        .size(12);

        let activity = app
            .activity()
            .entries()
            .rev()
            .fold(Column::new().spacing(4), |col, entry| {
                col.push(text(entry.to_string()).size(12))
            });

        let sidebar = column![
            text("Lunar Locator").size(26),
            route_bar,
            button("Reload fleet").on_press(Message::Refresh).padding(8),
            text("Vehicles").size(18),
            Container::new(scrollable(rows).height(Length::Fill)).height(Length::FillPortion(3)),
            status,
            text("Activity log").size(16),
            Container::new(scrollable(activity).height(Length::Fill)).height(Length::FillPortion(1)),
        ]
        .spacing(10)
        .padding(16)
        .width(Length::Fixed(360.0));

        let provider = app.map().provider();
        let map = Canvas::new(MoonMap::new(
            provider.scene(),
            provider.visible_markers(),
            &state.tiles,
        ))
        .width(Length::Fill)
        .height(Length::Fill);

        let mut map_column = Column::new().spacing(10).padding(16).width(Length::Fill);
        map_column = map_column.push(map);
        if app.is_showing_detail() {
            map_column = map_column.push(
                Container::new(
                    column![
                        text(app.detail().content().to_string()).size(16),
                        button("Close").on_press(Message::CloseDetail).padding(6),
                    ]
                    .spacing(8),
                )
                .padding(12)
                .width(Length::Fill),
            );
        } else {
            map_column = map_column.push(text(app.detail().content().to_string()).size(14));
        }

        Container::new(row![sidebar, map_column].spacing(20).padding(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn fetch(&mut self, request: FetchRequest) -> Task<Message> {
        let source = HttpVehicleSource::new(self.client.clone());
        Task::perform(
            async move {
                let result = source
                    .fetch(&request.url)
                    .await
                    .map_err(|err| err.to_string());
                (request, result)
            },
            |(request, result)| Message::VehiclesFetched(request, result),
        )
    }

    /// Starts downloads for every on-screen tile not yet cached.
    fn request_tiles(&mut self) -> Task<Message> {
        let provider = self.app.map().provider();
        let Some(scene) = provider.scene() else {
            return Task::none();
        };
        let (width, height) = self.viewport;
        let urls = tile_cache::visible_urls(scene, width, height);

        let tasks: Vec<Task<Message>> = urls
            .into_iter()
            .filter(|url| self.tiles.claim(url))
            .map(|url| {
                let client = self.client.clone();
                Task::perform(tile_cache::download(client, url.clone()), move |result| {
                    Message::TileFetched(url.clone(), result)
                })
            })
            .collect();
        Task::batch(tasks)
    }
}

fn status_color(color: StatusColor) -> Color {
    match color {
        StatusColor::Green => Color::from_rgb(0.3, 0.8, 0.4),
        StatusColor::Orange => Color::from_rgb(0.95, 0.6, 0.2),
        StatusColor::Red => Color::from_rgb(0.9, 0.25, 0.25),
    }
}

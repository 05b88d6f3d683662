use std::collections::HashMap;

use iced::{
    alignment, theme,
    widget::{
        button, column, container, horizontal_space, image, pick_list, row, scrollable, text,
        text_input, toggler, Column, Row,
    },
    Alignment, Application, Color, Command, Element, Length, Theme,
};
use log::warn;
use shared::{
    data::Car,
    filters::{FilterKey, FilterOption},
};

use car_finder::{
    catalog::CatalogClient, storage::FileStorage, CarFinder, FetchError, FetchRequest, RequestId,
};

const CARDS_PER_ROW: usize = 3;
const IMAGE_HEIGHT: f32 = 160.0;
const ERROR_COLOR: Color = Color::from_rgb(0.93, 0.27, 0.27);

pub struct Flags {
    pub finder: CarFinder<FileStorage>,
    pub catalog: CatalogClient,
}

pub struct CarFinderApp {
    finder: CarFinder<FileStorage>,
    catalog: CatalogClient,
    images: ImageCache,
}

enum CardImage {
    Loading,
    Loaded(image::Handle),
    Failed,
}

/// Downloaded card pictures, keyed by image URL.
#[derive(Default)]
struct ImageCache {
    images: HashMap<String, CardImage>,
}

impl ImageCache {
    /// Marks `url` as loading. Returns `false` if it was requested before.
    fn request(&mut self, url: &str) -> bool {
        if self.images.contains_key(url) {
            return false;
        }
        self.images.insert(url.to_string(), CardImage::Loading);
        true
    }

    fn finish(&mut self, url: String, result: Result<Vec<u8>, FetchError>) {
        let image = match result {
            Ok(bytes) => CardImage::Loaded(image::Handle::from_memory(bytes)),
            Err(err) => {
                warn!("Could not load the image at {url}. {err}");
                CardImage::Failed
            }
        };
        self.images.insert(url, image);
    }

    fn get(&self, url: &str) -> Option<&CardImage> {
        self.images.get(url)
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    FilterChanged(FilterKey, String),
    CarsFetched(RequestId, Result<Vec<Car>, FetchError>),
    ImageFetched(String, Result<Vec<u8>, FetchError>),
    ToggleWishlist(Car),
    SelectPage(usize),
    DarkModeToggled(bool),
}

impl CarFinderApp {
    fn fetch(&self, request: FetchRequest) -> Command<Message> {
        let catalog = self.catalog.clone();
        let FetchRequest { id, filters } = request;
        Command::perform(
            async move { catalog.fetch_cars(&filters).await },
            move |result| Message::CarsFetched(id, result),
        )
    }

    /// Starts downloads for the images on the current page that were not requested yet.
    fn load_images(&mut self) -> Command<Message> {
        let mut commands = Vec::new();
        for car in self.finder.page_cars() {
            if car.image.is_empty() || !self.images.request(&car.image) {
                continue;
            }

            let catalog = self.catalog.clone();
            let url = car.image.clone();
            commands.push(Command::perform(
                async move {
                    let result = catalog.fetch_image(&url).await;
                    (url, result)
                },
                |(url, result)| Message::ImageFetched(url, result),
            ));
        }
        Command::batch(commands)
    }

    fn filter_bar(&self) -> Element<'_, Message> {
        let filters = self.finder.filters();

        let search = text_input("Search by model or brand", &filters.search)
            .on_input(|value| Message::FilterChanged(FilterKey::Search, value))
            .padding(8)
            .width(Length::Fixed(420.0));

        let selects = FilterKey::SELECTABLE
            .into_iter()
            .fold(Row::new().spacing(10), |selects, key| {
                selects.push(
                    pick_list(key.options(), key.selected(filters), move |option: FilterOption| {
                        Message::FilterChanged(key, option.token.to_string())
                    })
                    .width(Length::Fill),
                )
            });

        column![
            row![horizontal_space(Length::Fill), search, horizontal_space(Length::Fill)],
            selects
        ]
        .spacing(16)
        .into()
    }

    fn status(&self) -> Element<'_, Message> {
        let mut status = Column::new().spacing(4).align_items(Alignment::Center);

        if self.finder.is_loading() {
            status = status.push(text("Loading cars..."));
        }
        if let Some(error) = self.finder.error() {
            status = status.push(text(error).style(theme::Text::Color(ERROR_COLOR)));
        }
        if let Some(error) = self.finder.wishlist_error() {
            status = status.push(text(error).style(theme::Text::Color(ERROR_COLOR)));
        }
        if let Some(updated) = self.finder.last_updated() {
            status = status.push(text(format!(
                "Updated {} \u{2022} {} cars \u{2022} {} in wishlist",
                updated.format("%H:%M:%S"),
                self.finder.cars().len(),
                self.finder.wishlist().len(),
            )));
        }

        status.width(Length::Fill).into()
    }

    fn card<'a>(&'a self, car: &'a Car) -> Element<'a, Message> {
        let picture: Element<'a, Message> = match self.images.get(&car.image) {
            Some(CardImage::Loaded(handle)) => image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fixed(IMAGE_HEIGHT))
                .into(),
            Some(CardImage::Loading) => image_placeholder("Loading image..."),
            Some(CardImage::Failed) | None => image_placeholder(&car.model),
        };

        let (label, style) = if self.finder.is_wishlisted(car.id) {
            ("Remove from Wishlist", theme::Button::Secondary)
        } else {
            ("Add to Wishlist", theme::Button::Primary)
        };
        let wishlist = button(
            text(label)
                .width(Length::Fill)
                .horizontal_alignment(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .style(style)
        .on_press(Message::ToggleWishlist(car.clone()));

        container(
            column![
                picture,
                text(car.title()).size(22),
                text(car.price_label()).size(16),
                text(car.details()).size(16),
                wishlist,
            ]
            .spacing(6),
        )
        .padding(12)
        .width(Length::Fill)
        .style(theme::Container::Box)
        .into()
    }

    fn grid(&self) -> Element<'_, Message> {
        self.finder
            .page_cars()
            .chunks(CARDS_PER_ROW)
            .fold(Column::new().spacing(24), |grid, cars| {
                let mut cards = Row::new().spacing(24);
                for car in cars {
                    cards = cards.push(self.card(car));
                }
                // Keep cards in a short last row the same width as the rest.
                for _ in cars.len()..CARDS_PER_ROW {
                    cards = cards.push(horizontal_space(Length::Fill));
                }
                grid.push(cards)
            })
            .into()
    }

    fn pages(&self) -> Element<'_, Message> {
        let current = self.finder.current_page();
        let buttons = (1..=self.finder.total_pages()).fold(Row::new().spacing(8), |buttons, page| {
            let style = if page == current {
                theme::Button::Primary
            } else {
                theme::Button::Secondary
            };
            buttons.push(
                button(text(page.to_string()))
                    .style(style)
                    .on_press(Message::SelectPage(page)),
            )
        });

        row![horizontal_space(Length::Fill), buttons, horizontal_space(Length::Fill)].into()
    }
}

fn image_placeholder(label: &str) -> Element<'_, Message> {
    container(text(label))
        .width(Length::Fill)
        .height(Length::Fixed(IMAGE_HEIGHT))
        .center_x()
        .center_y()
        .into()
}

impl Application for CarFinderApp {
    type Message = Message;
    type Executor = iced::executor::Default;
    type Theme = Theme;
    type Flags = Flags;

    fn new(flags: Self::Flags) -> (Self, Command<Self::Message>) {
        let mut app = CarFinderApp {
            finder: flags.finder,
            catalog: flags.catalog,
            images: ImageCache::default(),
        };
        let request = app.finder.begin_fetch();
        let command = app.fetch(request);
        (app, command)
    }

    fn title(&self) -> String {
        "Car Finder".to_string()
    }

    fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::FilterChanged(key, value) => {
                let request = self.finder.update_filter(key, value);
                self.fetch(request)
            }
            Message::CarsFetched(id, result) => {
                if self.finder.finish_fetch(id, result) {
                    self.load_images()
                } else {
                    Command::none()
                }
            }
            Message::ImageFetched(url, result) => {
                self.images.finish(url, result);
                Command::none()
            }
            Message::ToggleWishlist(car) => {
                self.finder.toggle_wishlist(&car);
                Command::none()
            }
            Message::SelectPage(page) => {
                self.finder.select_page(page);
                self.load_images()
            }
            Message::DarkModeToggled(dark_mode) => {
                self.finder.set_dark_mode(dark_mode);
                Command::none()
            }
        }
    }

    fn view(&self) -> Element<Message> {
        let header = row![
            text("Car Finder").size(32),
            horizontal_space(Length::Fill),
            toggler(
                String::from("Dark Mode"),
                self.finder.dark_mode(),
                Message::DarkModeToggled
            )
            .width(Length::Shrink),
        ]
        .align_items(Alignment::Center);

        let content = column![header, self.filter_bar(), self.status(), self.grid(), self.pages()]
            .padding(24)
            .spacing(24)
            .max_width(1280);

        scrollable(container(content).width(Length::Fill).center_x()).into()
    }

    fn theme(&self) -> Theme {
        if self.finder.dark_mode() {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

use super::messages::Message;
use super::state::{
    App, BODY_FONT_SIZE_PX, OVERLAY_PADDING_PX, SPACER_FONT_SIZE_PX, STATUS_FONT_SIZE_PX,
    SUBTITLE_FONT_SIZE_PX, TITLE_FONT_SIZE_PX,
};
use iced::alignment::Horizontal;
use iced::alignment::Vertical;
use iced::widget::{Space, column, container, image, scrollable, stack, text};
use iced::{Background, Color, ContentFit, Degrees, Element, Gradient, Length, Theme, gradient};

impl App {
    pub fn view(&self) -> Element<'_, Message> {
        let viewport = self.layout.viewport();
        let pin = self.layout.pin_offset(&self.config);
        let below = (self.layout.region_height(&self.config) - pin - viewport).max(0.0);

        // Sticky media: the layer rides inside the region while it is pinned.
        let region = column![
            Space::with_height(Length::Fixed(pin)),
            self.media_layer(viewport),
            Space::with_height(Length::Fixed(below)),
        ];

        let content = column![
            spacer("Scroll down", self.layout.lead_in_height(&self.config)),
            region,
            spacer("That's the whole reel", self.layout.tail_height(&self.config)),
        ]
        .width(Length::Fill);

        scrollable(content)
            .on_scroll(|viewport| Message::Scrolled {
                offset: viewport.absolute_offset().y,
                viewport_height: viewport.bounds().height,
            })
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn media_layer(&self, height: f32) -> Element<'_, Message> {
        let frame = self
            .media
            .sequence
            .as_ref()
            .and_then(|sequence| sequence.current_frame())
            .filter(|_| self.host.ready);

        let base: Element<'_, Message> = match frame {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .into(),
            None => self.fallback(height),
        };

        let mut layers = stack![base, self.overlay_layer(height)]
            .width(Length::Fill)
            .height(Length::Fixed(height));
        if self.config.show_status {
            layers = layers.push(self.status_layer(height));
        }
        layers.into()
    }

    /// Poster image, or a gradient placeholder when there is none.
    fn fallback(&self, height: f32) -> Element<'_, Message> {
        if let Some(poster) = &self.media.poster {
            return image(poster.clone())
                .content_fit(ContentFit::Cover)
                .width(Length::Fill)
                .height(Length::Fixed(height))
                .into();
        }

        let label = match (&self.media.error, &self.media.sequence) {
            (Some(error), _) => format!("Frames unavailable: {error}"),
            (None, Some(sequence)) => {
                format!("Loading frames {}/{}", sequence.decoded(), sequence.len())
            }
            (None, None) => "Loading frames".to_string(),
        };
        container(text(label).size(SPACER_FONT_SIZE_PX))
            .center_x(Length::Fill)
            .center_y(Length::Fixed(height))
            .style(|_theme: &Theme| container::Style {
                background: Some(Background::Gradient(Gradient::Linear(
                    gradient::Linear::new(Degrees(160.0))
                        .add_stop(0.0, Color::from_rgb8(0x1b, 0x1f, 0x3a))
                        .add_stop(1.0, Color::from_rgb8(0x05, 0x05, 0x0a)),
                ))),
                text_color: Some(Color::WHITE),
                ..container::Style::default()
            })
            .into()
    }

    fn overlay_layer(&self, height: f32) -> Element<'_, Message> {
        let frame = self.overlay_frame();
        let copy = column![
            text(&self.config.title)
                .size(TITLE_FONT_SIZE_PX * frame.title_scale)
                .color(faded(frame.title_opacity)),
            text(&self.config.subtitle)
                .size(SUBTITLE_FONT_SIZE_PX)
                .color(faded(frame.subtitle_opacity)),
            text(&self.config.body)
                .size(BODY_FONT_SIZE_PX)
                .color(faded(frame.body_opacity)),
        ]
        .spacing(12);

        container(copy)
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .padding(OVERLAY_PADDING_PX)
            .align_x(Horizontal::Left)
            .align_y(Vertical::Bottom)
            .into()
    }

    fn status_layer(&self, height: f32) -> Element<'_, Message> {
        let status = self.player.status();
        let frames = self
            .media
            .sequence
            .as_ref()
            .map(|sequence| format!("{}/{}", sequence.decoded(), sequence.len()))
            .unwrap_or_else(|| "-".to_string());
        let duration = self.player.media().duration.unwrap_or(0.0);
        let pinned = if self.layout.is_pinned(&self.config) {
            " | pinned"
        } else {
            ""
        };
        let label = format!(
            "{:?} | frames {} | {:.2}s / {:.2}s | progress {:.3}{}",
            status.activation, frames, status.position, duration, status.progress, pinned
        );

        container(text(label).size(STATUS_FONT_SIZE_PX).color(faded(0.8)))
            .width(Length::Fill)
            .height(Length::Fixed(height))
            .padding(12)
            .align_x(Horizontal::Right)
            .align_y(Vertical::Top)
            .into()
    }
}

fn spacer<'a>(label: &'a str, height: f32) -> Element<'a, Message> {
    container(text(label).size(SPACER_FONT_SIZE_PX))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .into()
}

fn faded(opacity: f32) -> Color {
    Color {
        a: opacity.clamp(0.0, 1.0),
        ..Color::WHITE
    }
}

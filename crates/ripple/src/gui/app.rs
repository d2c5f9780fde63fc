use crate::config::{self, Config};
use crate::events::{AppEvent, ControlCommand};
use crate::gui::card::{CardInit, CardMsg, CardOutput, RippleCard};
use crate::gui::theme;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;

pub struct AppModel {
    cards: Vec<Controller<RippleCard>>,
    exclusive: bool,
}

#[derive(Debug)]
pub enum AppMsg {
    CardStarted { index: usize, selected: bool },
    Control(ControlCommand),
    ConfigReload,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::Control(command) => AppMsg::Control(command),
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

impl From<CardOutput> for AppMsg {
    fn from(output: CardOutput) -> Self {
        match output {
            CardOutput::Started { index, selected } => AppMsg::CardStarted { index, selected },
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (Config, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Ripple"),
            set_default_size: (360, 420),
            add_css_class: "ripple-window",

            #[name = "cards_box"]
            gtk::Box {
                set_orientation: gtk::Orientation::Vertical,
                set_spacing: 4,
                set_margin_all: 12,
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, rx) = init;

        theme::load_css();

        let cards = config
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| {
                RippleCard::builder()
                    .launch(CardInit {
                        index,
                        config: card.clone(),
                        style: config.style.clone(),
                        timing: config.timing.clone(),
                    })
                    .forward(sender.input_sender(), AppMsg::from)
            })
            .collect();

        let model = AppModel {
            cards,
            exclusive: config.exclusive,
        };

        let widgets = view_output!();

        for card in &model.cards {
            widgets.cards_box.append(card.widget());
        }

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::CardStarted { index, selected } => {
                if selected && self.exclusive {
                    self.cards
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != index)
                        .for_each(|(_, card)| card.emit(CardMsg::Uncheck));
                }
            }
            AppMsg::Control(command) => match self.cards.get(command.card) {
                Some(card) => card.emit(CardMsg::from(command.action)),
                None => log::warn!(
                    "Ignoring '{}': only {} cards configured",
                    command,
                    self.cards.len()
                ),
            },
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    if new_config.cards.len() != self.cards.len() {
                        log::warn!("Card list changes take effect after a restart");
                    }
                    self.exclusive = new_config.exclusive;
                    for card in &self.cards {
                        card.emit(CardMsg::Restyle(
                            new_config.style.clone(),
                            new_config.timing.clone(),
                        ));
                    }
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
        }
    }
}

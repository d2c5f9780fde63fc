//! Host shell for one ripple: a drawing area under a label, wired to the
//! engine's controller, renderer, and the GTK frame clock.

use crate::config::CardConfig;
use crate::events::ControlAction;
use crate::gui::theme::{CARD_LABEL_CLASS, SELECTED_CLASS};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::RelmWidgetExt;
use relm4::prelude::*;
use ripple_engine::{
    FrameGeometry, Point, RippleController, RippleListener, RippleStyle, RippleTiming, Size,
    render,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Engine state shared by the component, the draw function, and the tick callback.
struct CardCanvas {
    controller: RippleController,
    style: RippleStyle,
    frame: FrameGeometry,
}

impl CardCanvas {
    fn resize(&mut self, size: Size) {
        self.controller.resize(size);
        self.frame = self.style.frame_for(size);
    }

    fn restyle(&mut self, style: RippleStyle, timing: RippleTiming) {
        self.frame = style.frame_for(self.controller.size());
        self.style = style;
        self.controller.set_timing(timing);
    }
}

pub struct CardInit {
    pub index: usize,
    pub config: CardConfig,
    pub style: RippleStyle,
    pub timing: RippleTiming,
}

pub struct RippleCard {
    index: usize,
    label: String,
    label_selected: bool,
    /// Keeps the label clear of the shadow blur.
    margin: i32,
    canvas: Rc<RefCell<CardCanvas>>,
    ticking: Rc<Cell<bool>>,
    drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum CardMsg {
    Press(Point),
    Check,
    Uncheck,
    Toggle,
    Restyle(RippleStyle, RippleTiming),
    Started(bool),
    Progress(bool, f64),
    Completed(bool),
}

impl From<ControlAction> for CardMsg {
    fn from(action: ControlAction) -> Self {
        match action {
            ControlAction::Check => CardMsg::Check,
            ControlAction::Uncheck => CardMsg::Uncheck,
            ControlAction::Toggle => CardMsg::Toggle,
        }
    }
}

#[derive(Debug)]
pub enum CardOutput {
    Started { index: usize, selected: bool },
}

fn margin_for(style: &RippleStyle) -> i32 {
    style.shadow_space.ceil() as i32
}

/// Forwards controller callbacks into the component's own message queue, so
/// they never run while the controller is borrowed.
fn card_listener(sender: &ComponentSender<RippleCard>) -> RippleListener {
    let (start, progress, complete) = (sender.clone(), sender.clone(), sender.clone());
    RippleListener::new()
        .on_start(move |selected| start.input(CardMsg::Started(selected)))
        .on_progress(move |selected, percent| progress.input(CardMsg::Progress(selected, percent)))
        .on_complete(move |selected| complete.input(CardMsg::Completed(selected)))
}

#[relm4::component(pub)]
impl SimpleComponent for RippleCard {
    type Init = CardInit;
    type Input = CardMsg;
    type Output = CardOutput;

    view! {
        #[root]
        gtk::Overlay {
            set_size_request: (240, 96),
            set_hexpand: true,

            add_controller = gtk::GestureClick {
                connect_pressed[sender] => move |_, _, x, y| {
                    sender.input(CardMsg::Press(Point::new(x, y)));
                }
            },

            #[name = "drawing_area"]
            #[wrap(Some)]
            set_child = &gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
            },

            add_overlay = &gtk::Label {
                add_css_class: CARD_LABEL_CLASS,
                set_can_target: false,
                #[watch]
                set_label: &model.label,
                #[watch]
                set_margin_all: model.margin,
                #[watch]
                set_class_active: (SELECTED_CLASS, model.label_selected),
            },
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let CardInit {
            index,
            config,
            style,
            timing,
        } = init;

        let mut controller = RippleController::new(Size::default(), timing);
        controller.set_listener(card_listener(&sender));

        let model = RippleCard {
            index,
            label: config.label.to_string(),
            label_selected: false,
            margin: margin_for(&style),
            canvas: Rc::new(RefCell::new(CardCanvas {
                controller,
                frame: style.frame_for(Size::default()),
                style,
            })),
            ticking: Rc::default(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let canvas = model.canvas.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let canvas = canvas.borrow();
                let visuals = canvas.controller.visuals();
                if let Err(e) = render::draw(cr, &canvas.frame, &canvas.style, visuals) {
                    log::error!("Drawing error: {}", e);
                }
            });

        let canvas = model.canvas.clone();
        widgets
            .drawing_area
            .connect_resize(move |area, width, height| {
                canvas
                    .borrow_mut()
                    .resize(Size::new(f64::from(width), f64::from(height)));
                area.queue_draw();
            });

        if config.checked {
            sender.input(CardMsg::Check);
        }

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, sender: ComponentSender<Self>) {
        match msg {
            CardMsg::Press(point) => {
                self.canvas.borrow_mut().controller.press(point);
                self.animate();
            }
            CardMsg::Check => {
                if self.canvas.borrow_mut().controller.check() {
                    self.animate();
                }
            }
            CardMsg::Uncheck => {
                if self.canvas.borrow_mut().controller.uncheck() {
                    self.animate();
                }
            }
            CardMsg::Toggle => {
                if self.canvas.borrow_mut().controller.change_state() {
                    self.animate();
                }
            }
            CardMsg::Restyle(style, timing) => {
                self.margin = margin_for(&style);
                self.canvas.borrow_mut().restyle(style, timing);
                self.drawing_area.queue_draw();
            }
            CardMsg::Started(selected) => {
                let _ = sender.output(CardOutput::Started {
                    index: self.index,
                    selected,
                });
            }
            CardMsg::Progress(selected, percent) => {
                if percent > 0.5 {
                    self.label_selected = selected;
                }
            }
            CardMsg::Completed(selected) => {
                log::debug!("card {} settled, selected={}", self.index, selected);
                self.label_selected = selected;
            }
        }
    }
}

impl RippleCard {
    /// Drives the controller from the frame clock until its run finishes.
    /// At most one tick callback is registered per card.
    fn animate(&self) {
        self.drawing_area.queue_draw();
        if self.ticking.replace(true) {
            return;
        }

        let canvas = self.canvas.clone();
        let ticking = self.ticking.clone();
        self.drawing_area.add_tick_callback(move |area, clock| {
            let now = Duration::from_micros(clock.frame_time().max(0) as u64);
            let action = canvas.borrow_mut().controller.tick(now);
            area.queue_draw();
            if action.wants_more_frames() {
                glib::ControlFlow::Continue
            } else {
                ticking.set(false);
                glib::ControlFlow::Break
            }
        });
    }
}

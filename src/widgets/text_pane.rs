use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{Box, Button, DropDown, Orientation, PolicyType, ScrolledWindow, TextView, WrapMode};

use idiom::languages;

mod imp {
    use super::*;

    pub struct TextPane {
        pub text_view: TextView,
        pub language_dropdown: DropDown,
        pub translate_button: Button,
    }

    impl Default for TextPane {
        fn default() -> Self {
            Self {
                text_view: TextView::builder()
                    .wrap_mode(WrapMode::WordChar)
                    .vexpand(true)
                    .hexpand(true)
                    .build(),
                language_dropdown: DropDown::from_strings(&languages::names()),
                translate_button: Button::with_label("Translate"),
            }
        }
    }

    #[glib::object_subclass]
    impl ObjectSubclass for TextPane {
        const NAME: &'static str = "IdiomTextPane";
        type Type = super::TextPane;
        type ParentType = Box;
    }

    impl ObjectImpl for TextPane {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }
    }

    impl WidgetImpl for TextPane {}
    impl BoxImpl for TextPane {}
}

glib::wrapper! {
    /// One of the two text boxes, with its language selector and Translate button.
    pub struct TextPane(ObjectSubclass<imp::TextPane>)
        @extends Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl TextPane {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        self.set_orientation(Orientation::Vertical);
        self.set_spacing(6);
        self.set_margin_start(8);
        self.set_margin_end(8);
        self.set_margin_top(8);
        self.set_margin_bottom(8);

        let scroller = ScrolledWindow::builder()
            .hscrollbar_policy(PolicyType::Never)
            .vscrollbar_policy(PolicyType::Automatic)
            .vexpand(true)
            .child(&imp.text_view)
            .build();
        scroller.add_css_class("frame");
        self.append(&scroller);

        let controls = Box::builder()
            .orientation(Orientation::Horizontal)
            .spacing(8)
            .build();
        imp.language_dropdown.set_hexpand(true);
        imp.language_dropdown.set_halign(gtk::Align::Start);
        controls.append(&imp.language_dropdown);
        controls.append(&imp.translate_button);
        self.append(&controls);
    }

    pub fn text_view(&self) -> &TextView {
        &self.imp().text_view
    }

    pub fn translate_button(&self) -> &Button {
        &self.imp().translate_button
    }

    pub fn language_dropdown(&self) -> &DropDown {
        &self.imp().language_dropdown
    }

    pub fn text(&self) -> String {
        let buffer = self.imp().text_view.buffer();
        buffer
            .text(&buffer.start_iter(), &buffer.end_iter(), false)
            .to_string()
    }

    pub fn set_text(&self, text: &str) {
        self.imp().text_view.buffer().set_text(text);
    }

    /// Code of the selected language, `auto` if nothing valid is selected.
    pub fn language_code(&self) -> &'static str {
        let selected = self.imp().language_dropdown.selected() as usize;
        languages::LANGUAGES
            .get(selected)
            .map(|l| l.code)
            .unwrap_or(languages::AUTO)
    }

    pub fn set_language_code(&self, code: &str) {
        match languages::index_of(code) {
            Some(index) => self.imp().language_dropdown.set_selected(index as u32),
            None => tracing::warn!(code, "unknown language code in config"),
        }
    }
}

impl Default for TextPane {
    fn default() -> Self {
        Self::new()
    }
}

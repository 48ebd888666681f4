use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct StatusBar {
        pub progress: gtk::ProgressBar,
        pub label: gtk::Label,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for StatusBar {
        const NAME: &'static str = "IdiomStatusBar";
        type Type = super::StatusBar;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for StatusBar {
        fn constructed(&self) {
            self.parent_constructed();

            let obj = self.obj();

            obj.set_orientation(gtk::Orientation::Horizontal);
            obj.set_spacing(12);
            obj.set_margin_start(8);
            obj.set_margin_end(8);
            obj.set_margin_bottom(6);

            self.progress.set_pulse_step(0.1);
            self.progress.set_valign(gtk::Align::Center);
            self.progress.set_size_request(160, -1);
            obj.append(&self.progress);

            self.label.set_halign(gtk::Align::Start);
            self.label.set_hexpand(true);
            self.label.set_ellipsize(gtk::pango::EllipsizeMode::End);
            self.label.add_css_class("dim-label");
            obj.append(&self.label);
        }
    }

    impl WidgetImpl for StatusBar {}
    impl BoxImpl for StatusBar {}
}

glib::wrapper! {
    /// Progress indicator plus the last status or error message.
    ///
    /// The bar pulses while a translation is in flight and sits empty
    /// otherwise.
    pub struct StatusBar(ObjectSubclass<imp::StatusBar>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    pub fn pulse(&self) {
        self.imp().progress.pulse();
    }

    pub fn reset_progress(&self) {
        self.imp().progress.set_fraction(0.0);
    }

    pub fn set_status_text(&self, text: &str) {
        self.imp().label.set_text(text);
    }

    pub fn status_text(&self) -> String {
        self.imp().label.text().to_string()
    }
}

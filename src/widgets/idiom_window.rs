use gtk::gio;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{ApplicationWindow, Box, Orientation, Paned};
use std::cell::{Cell, RefCell};
use std::path::Path;
use std::sync::Arc;

use idiom::config::Config;
use idiom::languages;
use idiom::services::text_file;
use idiom::services::{HttpTransport, TranslateError};
use idiom::session::{BoxFocus, BoxId, JobPoll, Orchestrator, TranslateOutcome, UiHost};

use crate::widgets::{IdiomHeaderBar, StatusBar, TextPane};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct IdiomWindow {
        pub header_bar: IdiomHeaderBar,
        pub top_pane: TextPane,
        pub bottom_pane: TextPane,
        pub status_bar: StatusBar,
        pub config: RefCell<Config>,
        pub orchestrator: RefCell<Option<Orchestrator>>,
        pub active: Cell<BoxId>,
        pub focus: Cell<BoxFocus>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for IdiomWindow {
        const NAME: &'static str = "IdiomWindow";
        type Type = super::IdiomWindow;
        type ParentType = ApplicationWindow;
    }

    impl ObjectImpl for IdiomWindow {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }
    }

    impl WidgetImpl for IdiomWindow {}
    impl WindowImpl for IdiomWindow {}
    impl ApplicationWindowImpl for IdiomWindow {}
}

glib::wrapper! {
    pub struct IdiomWindow(ObjectSubclass<imp::IdiomWindow>)
        @extends ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gio::ActionGroup, gio::ActionMap, gtk::Accessible, gtk::Buildable,
                    gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl IdiomWindow {
    pub fn new(app: &gtk::Application, config: Config) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("title", "Idiom")
            .property("default-width", 800)
            .property("default-height", 400)
            .build();

        window.apply_config(config);
        window
    }

    fn apply_config(&self, config: Config) {
        let imp = self.imp();

        imp.top_pane.set_language_code(&config.top_lang);
        imp.bottom_pane.set_language_code(&config.bottom_lang);

        match HttpTransport::new(config.timeout()) {
            Ok(transport) => {
                imp.orchestrator
                    .replace(Some(Orchestrator::new(Arc::new(transport), config.endpoint())));
            }
            Err(e) => {
                tracing::error!(error = %e, "could not create HTTP client");
                imp.status_bar.set_status_text(&e.to_string());
            }
        }

        imp.config.replace(config);

        // Connected last so setting the configured languages doesn't translate.
        self.setup_language_selectors();
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        self.set_titlebar(Some(imp.header_bar.widget()));

        let paned = Paned::builder()
            .orientation(Orientation::Vertical)
            .start_child(&imp.top_pane)
            .end_child(&imp.bottom_pane)
            .resize_start_child(true)
            .resize_end_child(true)
            .vexpand(true)
            .build();
        paned.set_wide_handle(true);

        let main_box = Box::builder().orientation(Orientation::Vertical).build();
        main_box.append(&paned);
        main_box.append(&imp.status_bar);
        self.set_child(Some(&main_box));

        self.setup_translate_buttons();
        self.setup_focus_tracking();
        self.setup_header_buttons();
        self.setup_actions();
    }

    fn setup_translate_buttons(&self) {
        for id in [BoxId::Top, BoxId::Bottom] {
            let window_weak = self.downgrade();
            self.pane(id)
                .translate_button()
                .connect_clicked(move |_| {
                    if let Some(window) = window_weak.upgrade() {
                        window.translate(id);
                    }
                });
        }
    }

    fn setup_language_selectors(&self) {
        for id in [BoxId::Top, BoxId::Bottom] {
            let window_weak = self.downgrade();
            self.pane(id)
                .language_dropdown()
                .connect_selected_notify(move |_| {
                    if let Some(window) = window_weak.upgrade() {
                        window.remember_languages();
                        window.translate(window.imp().active.get());
                    }
                });
        }
    }

    fn remember_languages(&self) {
        let imp = self.imp();
        let top = imp.top_pane.language_code();
        let bottom = imp.bottom_pane.language_code();
        {
            let mut config = imp.config.borrow_mut();
            config.top_lang = top.to_string();
            config.bottom_lang = bottom.to_string();
        }

        let Some(path) = Config::path() else {
            return;
        };
        if let Err(e) = Config::save_languages_to(&path, top, bottom) {
            tracing::warn!(error = %e, "could not save language choice");
        }
    }

    fn setup_focus_tracking(&self) {
        for id in [BoxId::Top, BoxId::Bottom] {
            let controller = gtk::EventControllerFocus::new();

            // No leave handler: the menu popover takes focus before its
            // actions run, and they still need the box the user was in.
            let window_weak = self.downgrade();
            controller.connect_enter(move |_| {
                if let Some(window) = window_weak.upgrade() {
                    let mut focus = window.imp().focus.get();
                    focus.focus_in(id);
                    window.imp().focus.set(focus);
                }
            });

            self.pane(id).text_view().add_controller(controller);
        }
    }

    fn setup_header_buttons(&self) {
        let header = &self.imp().header_bar;

        let window_weak = self.downgrade();
        header.new_button().connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.clear();
            }
        });

        let window_weak = self.downgrade();
        header.open_button().connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.show_open_dialog();
            }
        });

        let window_weak = self.downgrade();
        header.save_button().connect_clicked(move |_| {
            if let Some(window) = window_weak.upgrade() {
                window.show_save_dialog();
            }
        });
    }

    fn setup_actions(&self) {
        let cut = gio::ActionEntry::builder("cut")
            .activate(|window: &Self, _, _| window.emit_on_focused("cut-clipboard"))
            .build();
        let copy = gio::ActionEntry::builder("copy")
            .activate(|window: &Self, _, _| window.emit_on_focused("copy-clipboard"))
            .build();
        let paste = gio::ActionEntry::builder("paste")
            .activate(|window: &Self, _, _| window.emit_on_focused("paste-clipboard"))
            .build();
        let about = gio::ActionEntry::builder("about")
            .activate(|window: &Self, _, _| window.show_about())
            .build();
        let quit = gio::ActionEntry::builder("quit")
            .activate(|window: &Self, _, _| window.close())
            .build();

        self.add_action_entries([cut, copy, paste, about, quit]);
    }

    fn pane(&self, id: BoxId) -> &TextPane {
        match id {
            BoxId::Bottom => &self.imp().bottom_pane,
            _ => &self.imp().top_pane,
        }
    }

    /// Translates `active` into the other box, in the background.
    pub fn translate(&self, active: BoxId) {
        let imp = self.imp();
        if !active.is_none() {
            imp.active.set(active);
        }

        let outcome = {
            let mut orchestrator = imp.orchestrator.borrow_mut();
            match orchestrator.as_mut() {
                Some(orchestrator) => orchestrator.translate(self, active),
                None => return,
            }
        };

        if let TranslateOutcome::Started(_) = outcome {
            imp.status_bar.set_status_text("Translating...");
            self.start_polling();
        }
    }

    fn start_polling(&self) {
        let interval = self.imp().config.borrow().pulse_interval();
        let window_weak = self.downgrade();

        glib::timeout_add_local(interval, move || {
            let Some(window) = window_weak.upgrade() else {
                return glib::ControlFlow::Break;
            };
            match window.poll_translation() {
                JobPoll::Pending => glib::ControlFlow::Continue,
                JobPoll::Idle | JobPoll::Finished => glib::ControlFlow::Break,
            }
        });
    }

    fn poll_translation(&self) -> JobPoll {
        let mut orchestrator = self.imp().orchestrator.borrow_mut();
        match orchestrator.as_mut() {
            Some(orchestrator) => orchestrator.poll(self),
            None => JobPoll::Idle,
        }
    }

    /// Copies the primary selection into the top box, then translates it.
    pub fn translate_primary_selection(&self) {
        let clipboard = self.display().primary_clipboard();
        let window_weak = self.downgrade();

        clipboard.read_text_async(None::<&gio::Cancellable>, move |result| {
            let Some(window) = window_weak.upgrade() else {
                return;
            };
            match result {
                Ok(Some(text)) => {
                    window.imp().top_pane.set_text(&text);
                    window.translate(BoxId::Top);
                }
                Ok(None) => tracing::info!("primary selection is empty"),
                Err(e) => tracing::warn!(error = %e, "could not read primary selection"),
            }
        });
    }

    fn clear(&self) {
        let imp = self.imp();
        imp.top_pane.set_text("");
        imp.bottom_pane.set_text("");
        imp.status_bar.set_status_text("");
    }

    fn emit_on_focused(&self, signal: &str) {
        let focused = self.imp().focus.get().focused();
        let text_view = self.pane(focused).text_view();
        text_view.emit_by_name::<()>(signal, &[]);
        text_view.grab_focus();
    }

    fn show_open_dialog(&self) {
        let dialog = gtk::FileDialog::builder().title("Open File").build();
        let window_weak = self.downgrade();

        dialog.open(Some(self), None::<&gio::Cancellable>, move |result| {
            if let Some(window) = window_weak.upgrade() {
                window.handle_open_result(result);
            }
        });
    }

    fn handle_open_result(&self, result: Result<gio::File, glib::Error>) {
        let Some(path) = result.ok().and_then(|file| file.path()) else {
            return;
        };

        match text_file::read_text(&path) {
            Ok(text) => self.imp().top_pane.set_text(&text),
            Err(e) => self.report_status(&e.to_string()),
        }
    }

    fn show_save_dialog(&self) {
        let target = self.imp().focus.get().focused();
        let dialog = gtk::FileDialog::builder().title("Save File").build();
        let window_weak = self.downgrade();

        dialog.save(Some(self), None::<&gio::Cancellable>, move |result| {
            if let Some(window) = window_weak.upgrade()
                && let Some(path) = result.ok().and_then(|file| file.path())
            {
                window.save_box(target, &path);
            }
        });
    }

    fn save_box(&self, id: BoxId, path: &Path) {
        match text_file::write_text(path, &self.pane(id).text()) {
            Ok(()) => {
                tracing::info!(path = %path.display(), ?id, "saved box");
                self.imp()
                    .status_bar
                    .set_status_text(&format!("Saved {}", path.display()));
            }
            Err(e) => self.report_status(&e.to_string()),
        }
    }

    fn report_status(&self, message: &str) {
        tracing::warn!("{}", message);
        self.imp().status_bar.set_status_text(message);
    }

    fn show_about(&self) {
        let dialog = gtk::AboutDialog::builder()
            .transient_for(self)
            .modal(true)
            .program_name("Idiom")
            .version(env!("CARGO_PKG_VERSION"))
            .comments("A utility to translate the written word.")
            .license_type(gtk::License::Bsd)
            .build();
        dialog.present();
    }
}

impl UiHost for IdiomWindow {
    fn text(&self, id: BoxId) -> String {
        if id.is_none() {
            return String::new();
        }
        self.pane(id).text()
    }

    fn set_text(&self, id: BoxId, text: &str) {
        if !id.is_none() {
            self.pane(id).set_text(text);
        }
    }

    fn language(&self, id: BoxId) -> Option<String> {
        if id.is_none() {
            return None;
        }
        languages::request_code(self.pane(id).language_code())
    }

    fn progress_pulse(&self) {
        self.imp().status_bar.pulse();
    }

    fn progress_done(&self) {
        let imp = self.imp();
        imp.status_bar.reset_progress();
        if imp.status_bar.status_text() == "Translating..." {
            imp.status_bar.set_status_text("");
        }
    }

    fn report_error(&self, error: &TranslateError) {
        self.report_status(&error.to_string());
    }
}

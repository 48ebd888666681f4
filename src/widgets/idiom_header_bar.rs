use gtk::gio;
use gtk::glib;
use gtk::prelude::*;
use gtk::subclass::prelude::*;
use gtk::{Button, HeaderBar, MenuButton};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct IdiomHeaderBar {
        pub header_bar: HeaderBar,
        pub new_button: Button,
        pub open_button: Button,
        pub save_button: Button,
        pub menu_button: MenuButton,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for IdiomHeaderBar {
        const NAME: &'static str = "IdiomHeaderBar";
        type Type = super::IdiomHeaderBar;
        type ParentType = glib::Object;
    }

    impl ObjectImpl for IdiomHeaderBar {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_widgets();
        }
    }
}

glib::wrapper! {
    pub struct IdiomHeaderBar(ObjectSubclass<imp::IdiomHeaderBar>);
}

impl IdiomHeaderBar {
    pub fn new() -> Self {
        glib::Object::builder().build()
    }

    fn setup_widgets(&self) {
        let imp = self.imp();

        imp.header_bar
            .set_title_widget(Some(&gtk::Label::new(Some("Idiom"))));
        imp.header_bar.set_show_title_buttons(true);

        imp.new_button.set_label("New");
        imp.new_button.set_tooltip_text(Some("Clear both boxes"));
        imp.header_bar.pack_start(&imp.new_button);

        imp.open_button.set_label("Open");
        imp.open_button.set_tooltip_text(Some("Load a file into the top box"));
        imp.header_bar.pack_start(&imp.open_button);

        imp.save_button.set_label("Save");
        imp.save_button
            .set_tooltip_text(Some("Save the box you were last typing in"));
        imp.header_bar.pack_start(&imp.save_button);

        // Keep keyboard focus in the text boxes.
        for button in [&imp.new_button, &imp.open_button, &imp.save_button] {
            button.set_focus_on_click(false);
        }
        imp.menu_button.set_focus_on_click(false);

        // Actions live on the window ("win." prefix).
        let edit = gio::Menu::new();
        edit.append(Some("Cut"), Some("win.cut"));
        edit.append(Some("Copy"), Some("win.copy"));
        edit.append(Some("Paste"), Some("win.paste"));

        let app = gio::Menu::new();
        app.append(Some("About Idiom"), Some("win.about"));
        app.append(Some("Quit"), Some("win.quit"));

        let menu = gio::Menu::new();
        menu.append_section(None, &edit);
        menu.append_section(None, &app);

        imp.menu_button.set_icon_name("open-menu-symbolic");
        imp.menu_button.set_menu_model(Some(&menu));
        imp.header_bar.pack_end(&imp.menu_button);
    }

    /// Returns the HeaderBar widget to be used with set_titlebar()
    pub fn widget(&self) -> &HeaderBar {
        &self.imp().header_bar
    }

    pub fn new_button(&self) -> &Button {
        &self.imp().new_button
    }

    pub fn open_button(&self) -> &Button {
        &self.imp().open_button
    }

    pub fn save_button(&self) -> &Button {
        &self.imp().save_button
    }
}

impl Default for IdiomHeaderBar {
    fn default() -> Self {
        Self::new()
    }
}

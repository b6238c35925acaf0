use crate::route::Route;

/// Header navigation with a collapsible menu
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    menu_open: bool,
}

impl Navigation {
    pub const LINKS: [(&'static str, Route); 3] = [
        ("Home", Route::Home),
        ("Users", Route::Users),
        ("New user", Route::UserCreate),
    ];

    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub const fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    /// Following a link closes the menu
    pub const fn follow(&mut self, route: Route) -> Route {
        self.menu_open = false;
        route
    }
}

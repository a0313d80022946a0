use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::product::Product;
use crate::subscription::ProductsLoaded;

pub const PAGE_TITLE: &str = "Product List";

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum AppMode {
    #[default]
    Viewing,
    Filter,
}

/// View state for the product list page.
///
/// `products` is either empty or exactly the most recent successful fetch.
#[derive(Debug)]
pub struct App {
    pub mode: AppMode,
    pub should_quit: bool,
    pub page_title: String,

    pub filter: String,

    pub products: Vec<Product>,
    /// Index into [`App::filtered_products`].
    pub selected_index: Option<usize>,
    pub show_image: bool,

    pub loading: bool,
    pub last_error: Option<String>,
    pub status_message: Option<String>,
    pub last_loaded: Option<DateTime<Local>>,

    status_since: Option<Instant>,
    ticket: u64,
}

impl Default for App {
    fn default() -> Self {
        Self {
            mode: AppMode::Viewing,
            should_quit: false,
            page_title: PAGE_TITLE.to_string(),
            filter: String::new(),
            products: Vec::new(),
            selected_index: None,
            show_image: false,
            loading: false,
            last_error: None,
            status_message: None,
            last_loaded: None,
            status_since: None,
            ticket: 0,
        }
    }
}

impl App {
    pub fn toggle_image(&mut self) {
        self.show_image = !self.show_image;
    }

    /// Mark a fetch as in flight and return its ticket. Results carrying
    /// any earlier ticket are ignored from now on.
    pub fn begin_load(&mut self) -> u64 {
        self.ticket += 1;
        self.loading = true;
        self.last_error = None;
        self.ticket
    }

    /// Apply a finished fetch. Returns false if the result was stale.
    pub fn apply_loaded(&mut self, loaded: ProductsLoaded) -> bool {
        if loaded.ticket != self.ticket {
            debug!(
                ticket = loaded.ticket,
                current = self.ticket,
                "ignoring stale product fetch"
            );
            return false;
        }

        self.loading = false;

        match loaded.result {
            Ok(products) => {
                info!(count = products.len(), "products loaded");
                self.set_status(format!("Loaded {} product(s)", products.len()));
                self.products = products;
                self.last_loaded = Some(Local::now());
                self.last_error = None;
            }
            Err(err) => {
                warn!(error = %err, "product fetch failed");
                self.products.clear();
                self.last_error = Some(err.to_string());
            }
        }

        self.clamp_selection();
        true
    }

    pub fn filtered_products(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.matches_filter(&self.filter))
            .collect()
    }

    pub fn selected_product(&self) -> Option<&Product> {
        let index = self.selected_index?;
        self.filtered_products().get(index).copied()
    }

    pub fn input_char(&mut self, c: char) {
        self.filter.push(c);
        self.clamp_selection();
    }

    pub fn input_backspace(&mut self) {
        self.filter.pop();
        self.clamp_selection();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
        self.clamp_selection();
    }

    pub fn select_next(&mut self) {
        let len = self.filtered_products().len();
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(i) => (i + 1) % len,
            None => 0,
        });
    }

    pub fn select_previous(&mut self) {
        let len = self.filtered_products().len();
        if len == 0 {
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        });
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_since = Some(Instant::now());
    }

    /// Clear the status message once it has been shown for `max_age`.
    pub fn expire_status(&mut self, max_age: Duration) {
        if let Some(since) = self.status_since {
            if since.elapsed() >= max_age {
                self.status_message = None;
                self.status_since = None;
            }
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.filtered_products().len();
        self.selected_index = match (len, self.selected_index) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::product::sample;

    fn loaded(ticket: u64, products: Vec<Product>) -> ProductsLoaded {
        ProductsLoaded {
            ticket,
            result: Ok(products),
        }
    }

    fn failed(ticket: u64) -> ProductsLoaded {
        ProductsLoaded {
            ticket,
            result: Err(FetchError::Application {
                status: 500,
                message: "boom".to_string(),
            }),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            sample(1, "Leaf Rake"),
            sample(2, "Garden Cart"),
            sample(5, "Hammer"),
            sample(8, "Saw"),
        ]
    }

    #[test]
    fn test_app_default() {
        let app = App::default();

        assert_eq!(app.mode, AppMode::Viewing);
        assert_eq!(app.page_title, "Product List");
        assert!(!app.show_image);
        assert!(app.products.is_empty());
        assert!(app.selected_index.is_none());
        assert!(!app.loading);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_toggle_image() {
        let mut app = App::default();

        app.toggle_image();
        assert!(app.show_image);

        app.toggle_image();
        assert!(!app.show_image);
    }

    #[test]
    fn test_apply_loaded_keeps_fetch_order() {
        let mut app = App::default();
        let ticket = app.begin_load();
        assert!(app.loading);

        assert!(app.apply_loaded(loaded(ticket, catalog())));

        assert!(!app.loading);
        assert_eq!(app.products, catalog());
        assert_eq!(app.selected_index, Some(0));
        assert!(app.last_loaded.is_some());
        assert_eq!(app.status_message.as_deref(), Some("Loaded 4 product(s)"));
    }

    #[test]
    fn test_apply_loaded_replaces_wholesale() {
        let mut app = App::default();
        let first = app.begin_load();
        app.apply_loaded(loaded(first, catalog()));

        let second = app.begin_load();
        app.apply_loaded(loaded(second, vec![sample(9, "Video Game Controller")]));

        assert_eq!(app.products, vec![sample(9, "Video Game Controller")]);
    }

    #[test]
    fn test_failure_clears_products_and_records_message() {
        let mut app = App::default();
        let first = app.begin_load();
        app.apply_loaded(loaded(first, catalog()));

        let second = app.begin_load();
        assert!(app.apply_loaded(failed(second)));

        assert!(app.products.is_empty());
        assert!(app.selected_index.is_none());
        assert_eq!(
            app.last_error.as_deref(),
            Some("server returned code 500, error is boom")
        );
        assert!(!app.loading);
    }

    #[test]
    fn test_stale_result_is_ignored() {
        let mut app = App::default();
        let stale = app.begin_load();
        let current = app.begin_load();

        assert!(!app.apply_loaded(loaded(stale, catalog())));
        assert!(app.products.is_empty());
        assert!(app.loading);

        assert!(app.apply_loaded(loaded(current, vec![sample(5, "Hammer")])));
        assert_eq!(app.products.len(), 1);
    }

    #[test]
    fn test_begin_load_clears_error() {
        let mut app = App::default();
        let ticket = app.begin_load();
        app.apply_loaded(failed(ticket));
        assert!(app.last_error.is_some());

        app.begin_load();
        assert!(app.last_error.is_none());
    }

    #[test]
    fn test_filter_narrows_list() {
        let mut app = App::default();
        let ticket = app.begin_load();
        app.apply_loaded(loaded(ticket, catalog()));

        for c in "ar".chars() {
            app.input_char(c);
        }

        let names: Vec<_> = app
            .filtered_products()
            .iter()
            .map(|p| p.product_name.as_str())
            .collect();
        assert_eq!(names, vec!["Garden Cart"]);

        app.input_backspace();
        assert_eq!(app.filtered_products().len(), 4);

        app.clear_filter();
        assert!(app.filter.is_empty());
    }

    #[test]
    fn test_selection_clamped_when_filter_shrinks() {
        let mut app = App::default();
        let ticket = app.begin_load();
        app.apply_loaded(loaded(ticket, catalog()));
        app.selected_index = Some(3);

        app.input_char('h');
        // "Hammer" only
        assert_eq!(app.selected_index, Some(0));
        assert_eq!(app.selected_product().unwrap().product_name, "Hammer");

        app.input_char('z');
        assert!(app.selected_index.is_none());
        assert!(app.selected_product().is_none());
    }

    #[test]
    fn test_select_next_previous() {
        let mut app = App::default();
        let ticket = app.begin_load();
        app.apply_loaded(loaded(ticket, catalog()));

        assert_eq!(app.selected_index, Some(0));

        app.select_previous(); // Should wrap to end
        assert_eq!(app.selected_index, Some(3));

        app.select_next(); // Should wrap to beginning
        assert_eq!(app.selected_index, Some(0));

        app.select_next();
        assert_eq!(app.selected_product().unwrap().product_name, "Garden Cart");
    }

    #[test]
    fn test_select_on_empty_list() {
        let mut app = App::default();

        app.select_next();
        app.select_previous();

        assert!(app.selected_index.is_none());
    }

    #[test]
    fn test_expire_status() {
        let mut app = App::default();
        app.set_status("hello".to_string());

        app.expire_status(Duration::from_secs(60));
        assert_eq!(app.status_message.as_deref(), Some("hello"));

        app.expire_status(Duration::ZERO);
        assert!(app.status_message.is_none());
    }
}

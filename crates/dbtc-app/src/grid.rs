//! Paginated table state shared by the Sources and Models views

use chrono::{DateTime, Local};

/// Rows fetched from the backend plus selection and paging.
///
/// Selection is an absolute row index; the page is derived from it.
#[derive(Debug, Clone)]
pub struct Grid<T> {
    rows: Vec<T>,
    selected: usize,
    page_size: usize,
    /// A fetch is in flight
    pub loading: bool,
    /// Rows reflect the current project settings
    pub loaded: bool,
    pub loaded_at: Option<DateTime<Local>>,
    /// Identifies the newest fetch; results tagged with another value are stale
    generation: u64,
}

impl<T> Grid<T> {
    pub fn new(page_size: usize) -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            page_size: page_size.max(1),
            loading: false,
            loaded: false,
            loaded_at: None,
            generation: 0,
        }
    }

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&T> {
        self.rows.get(self.selected)
    }

    /// Zero-based current page
    pub fn page(&self) -> usize {
        self.selected / self.page_size
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    /// Rows on the current page
    pub fn page_rows(&self) -> &[T] {
        let start = self.page() * self.page_size;
        let end = (start + self.page_size).min(self.rows.len());
        &self.rows[start.min(end)..end]
    }

    /// Position of the selection within the current page
    pub fn selected_in_page(&self) -> usize {
        self.selected % self.page_size
    }

    /// Mark a fetch as started and return the generation its result must carry
    pub fn start_loading(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a result tagged with `generation` belongs to the newest fetch
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Replace rows after a fetch, keeping the selection where possible.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.selected = self.selected.min(self.rows.len().saturating_sub(1));
        self.loading = false;
        self.loaded = true;
        self.loaded_at = Some(Local::now());
    }

    pub fn fail_loading(&mut self) {
        self.loading = false;
    }

    /// Forget rows so the next visit fetches again. A fetch still in flight
    /// is orphaned.
    pub fn invalidate(&mut self) {
        self.generation += 1;
        self.loading = false;
        self.rows.clear();
        self.selected = 0;
        self.loaded = false;
        self.loaded_at = None;
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Move to the first row of the next page
    pub fn next_page(&mut self) {
        let next = (self.page() + 1) * self.page_size;
        if next < self.rows.len() {
            self.selected = next;
        }
    }

    /// Move to the first row of the previous page
    pub fn previous_page(&mut self) {
        self.selected = self.page().saturating_sub(1) * self.page_size;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.rows.len().saturating_sub(1);
    }

    /// Select the first row matching `pred`, returns whether one was found
    pub fn select_where(&mut self, pred: impl Fn(&T) -> bool) -> bool {
        match self.rows.iter().position(pred) {
            Some(index) => {
                self.selected = index;
                true
            }
            None => false,
        }
    }

    pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
        self.rows.iter().find(|row| pred(row))
    }
}

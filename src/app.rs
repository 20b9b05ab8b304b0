use crate::types::{AppEvent, Card};

/// Progress of the one catalog request issued on mount.
///
/// `Loading` moves to exactly one of the other two; both are final for the
/// lifetime of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    Error(String),
    Ready(Vec<Card>),
}

impl FetchState {
    pub fn is_settled(&self) -> bool {
        !matches!(self, FetchState::Loading)
    }
}

/// Card shown in the detail overlay.
///
/// The overlay is never open without a card. Closing it keeps the card
/// until the next selection replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    card: Option<Card>,
    open: bool,
}

impl Selection {
    pub fn card(&self) -> Option<&Card> {
        self.card.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The card to display, only while the overlay is open.
    pub fn open_card(&self) -> Option<&Card> {
        if self.open {
            self.card.as_ref()
        } else {
            None
        }
    }
}

/// Screen rectangle recorded by the renderer for mouse hit testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HitBox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl HitBox {
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x
            && row >= self.y
            && (col - self.x) < self.width
            && (row - self.y) < self.height
    }
}

/// The card list screen: owns the fetch state, the selection and the list cursor.
pub struct App {
    quit: bool,
    mounted: bool,
    state: FetchState,
    selection: Selection,
    cursor: usize,     // highlighted row in the Ready list
    list_offset: usize, // first visible row, kept by the renderer
    fps: u32,
    spinner_frame: usize,

    // Set by the UI layer after each draw
    list_area: Option<HitBox>,
    close_button: Option<HitBox>,
}

impl App {
    pub fn new(fps: u32) -> Self {
        Self {
            quit: false,
            mounted: true,
            state: FetchState::Loading,
            selection: Selection::default(),
            cursor: 0,
            list_offset: 0,
            fps: fps.max(1),
            spinner_frame: 0,
            list_area: None,
            close_button: None,
        }
    }

    // ----- getters -----
    pub fn fps(&self) -> u32 { self.fps }
    pub fn quit_flag(&self) -> bool { self.quit }
    pub fn is_mounted(&self) -> bool { self.mounted }
    pub fn state(&self) -> &FetchState { &self.state }
    pub fn selection(&self) -> &Selection { &self.selection }
    pub fn cursor(&self) -> usize { self.cursor }
    pub fn list_offset(&self) -> usize { self.list_offset }
    pub fn spinner_frame(&self) -> usize { self.spinner_frame }

    /// Cards in server order. Empty unless the fetch succeeded.
    pub fn records(&self) -> &[Card] {
        match &self.state {
            FetchState::Ready(cards) => cards,
            _ => &[],
        }
    }

    // ----- lifecycle -----

    pub fn on_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::CardsLoaded(cards) => self.settle(FetchState::Ready(cards)),
            AppEvent::FetchFailed(msg) => {
                let msg = if msg.trim().is_empty() {
                    "Unknown error".to_string()
                } else {
                    msg
                };
                self.settle(FetchState::Error(msg))
            }
            AppEvent::Quit => self.quit = true,
        }
    }

    fn settle(&mut self, next: FetchState) {
        if !self.mounted {
            log::debug!("[app] fetch result after teardown ignored");
            return;
        }
        if self.state.is_settled() {
            log::warn!("[app] second fetch result ignored");
            return;
        }
        match &next {
            FetchState::Ready(cards) => log::info!("[app] ready with {} cards", cards.len()),
            FetchState::Error(msg) => log::info!("[app] fetch error: {msg}"),
            FetchState::Loading => {}
        }
        self.state = next;
        self.cursor = 0;
        self.list_offset = 0;
    }

    /// Tear the screen down. Results arriving later leave the state untouched.
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.list_area = None;
        self.close_button = None;
    }

    // ----- selection -----

    pub fn select(&mut self, card: Card) {
        log::debug!("[app] select {}", card.id);
        self.selection.card = Some(card);
        self.selection.open = true;
    }

    /// Select the card at `index` in the list. Out of range or not ready: no-op.
    pub fn select_index(&mut self, index: usize) {
        let Some(card) = self.records().get(index).cloned() else {
            return;
        };
        self.cursor = index;
        self.select(card);
    }

    pub fn select_highlighted(&mut self) {
        self.select_index(self.cursor);
    }

    pub fn dismiss(&mut self) {
        self.selection.open = false;
    }

    // ----- list navigation -----

    fn last_index(&self) -> Option<usize> {
        self.records().len().checked_sub(1)
    }

    pub fn up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn down(&mut self) {
        if let Some(last) = self.last_index() {
            self.cursor = (self.cursor + 1).min(last);
        }
    }

    pub fn page_up(&mut self, page: usize) {
        self.cursor = self.cursor.saturating_sub(page);
    }

    pub fn page_down(&mut self, page: usize) {
        if let Some(last) = self.last_index() {
            self.cursor = (self.cursor + page).min(last);
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.last_index().unwrap_or(0);
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    // ----- renderer feedback -----

    pub fn tick_spinner(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
    }

    /// Record where the list was drawn and scroll so the cursor stays visible.
    /// Returns the offset to draw with.
    pub fn set_list_area(&mut self, area: HitBox) -> usize {
        let visible = area.height.max(1) as usize;
        if self.cursor < self.list_offset {
            self.list_offset = self.cursor;
        } else if self.cursor >= self.list_offset + visible {
            self.list_offset = self.cursor + 1 - visible;
        }
        self.list_area = Some(area);
        self.list_offset
    }

    pub fn clear_list_area(&mut self) {
        self.list_area = None;
    }

    pub fn set_close_button(&mut self, area: Option<HitBox>) {
        self.close_button = area;
    }

    /// List index under a screen cell, if any.
    pub fn row_at(&self, col: u16, row: u16) -> Option<usize> {
        let area = self.list_area?;
        if !area.contains(col, row) {
            return None;
        }
        let idx = self.list_offset + (row - area.y) as usize;
        (idx < self.records().len()).then_some(idx)
    }

    pub fn hits_close(&self, col: u16, row: u16) -> bool {
        self.close_button.is_some_and(|b| b.contains(col, row))
    }
}

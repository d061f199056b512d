use std::time::Instant;

use chrono::{DateTime, Local};

use crate::model::{ContentFlags, DisplaySettings, Feed, RssSettings};
use crate::notify::Notifier;
use crate::poll::Msg;

/// The five panel tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Status,
    Display,
    Content,
    Rss,
    Feeds,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::Status, Tab::Display, Tab::Content, Tab::Rss, Tab::Feeds];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Status => "Status",
            Tab::Display => "Display",
            Tab::Content => "Content",
            Tab::Rss => "RSS",
            Tab::Feeds => "Feeds",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|tab| *tab == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Which settings field a text entry edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Brightness,
    ScrollSpeed,
    ScrollDirection,
    PanelType,
    FontType,
    AnimationType,
    FetchInterval,
    MaxNewsAgeHours,
    MaxHeadlinesPerFeed,
    Timezone,
}

/// What an open text entry is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    Field(FieldId),
    /// In-place URL edit of the feed at this render-time index.
    FeedUrl { index: usize },
    /// First step of adding a feed.
    NewFeedName,
    /// Second step; carries the name entered in the first.
    NewFeedUrl { name: String },
    ManualTime,
}

impl InputTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            InputTarget::Field(FieldId::Brightness) => "Brightness",
            InputTarget::Field(FieldId::ScrollSpeed) => "Scroll speed",
            InputTarget::Field(FieldId::ScrollDirection) => "Scroll direction",
            InputTarget::Field(FieldId::PanelType) => "Panel type",
            InputTarget::Field(FieldId::FontType) => "Font type",
            InputTarget::Field(FieldId::AnimationType) => "Animation type",
            InputTarget::Field(FieldId::FetchInterval) => "Fetch interval (s)",
            InputTarget::Field(FieldId::MaxNewsAgeHours) => "Max news age (h)",
            InputTarget::Field(FieldId::MaxHeadlinesPerFeed) => "Max headlines per feed",
            InputTarget::Field(FieldId::Timezone) => "Timezone",
            InputTarget::FeedUrl { .. } => "Feed URL",
            InputTarget::NewFeedName => "Feed name",
            InputTarget::NewFeedUrl { .. } => "RSS feed URL",
            InputTarget::ManualTime => "Date/time (YYYY-MM-DDTHH:MM:SS)",
        }
    }
}

/// Pending destructive operation awaiting a y/n answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmTarget {
    RemoveFeed { index: usize },
    ResetFeeds,
}

impl ConfirmTarget {
    pub fn question(self) -> &'static str {
        match self {
            ConfirmTarget::RemoveFeed { .. } => "Are you sure you want to remove this feed?",
            ConfirmTarget::ResetFeeds => {
                "Reset all feeds to default? This will remove custom feeds."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Input { target: InputTarget, buffer: String },
    Confirm(ConfirmTarget),
}

/// Network operations the event loop executes on behalf of the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SaveDisplay(DisplaySettings),
    SaveContent(ContentFlags),
    SaveRss(RssSettings),
    SetTimezone(String),
    SetManualTime(String),
    ToggleFeed { index: usize, enabled: bool },
    EditFeedUrl { index: usize, url: String },
    AddFeed { name: String, url: String },
    RemoveFeed { index: usize },
    ResetFeeds,
    FetchNow,
}

/// Editable text buffers behind the display settings form.
///
/// Buffers stay strings until save time so the user can hold a
/// half-typed value; assembly parses the complete record at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayForm {
    pub brightness: String,
    pub scroll_speed: String,
    pub scroll_direction: String,
    pub panel_type: String,
    pub font_type: String,
    pub animation_type: String,
    pub animation_enabled: bool,
}

impl DisplayForm {
    pub fn from_settings(settings: &DisplaySettings) -> Self {
        Self {
            brightness: settings.brightness.to_string(),
            scroll_speed: settings.scroll_speed.to_string(),
            scroll_direction: settings.scroll_direction.to_string(),
            panel_type: settings.panel_type.to_string(),
            font_type: settings.font_type.to_string(),
            animation_type: settings.animation_type.to_string(),
            animation_enabled: settings.animation_enabled,
        }
    }

    /// Assemble the complete record; `None` if any field fails to parse.
    pub fn to_settings(&self) -> Option<DisplaySettings> {
        Some(DisplaySettings {
            brightness: self.brightness.trim().parse().ok()?,
            scroll_speed: self.scroll_speed.trim().parse().ok()?,
            scroll_direction: self.scroll_direction.trim().parse().ok()?,
            panel_type: self.panel_type.trim().parse().ok()?,
            font_type: self.font_type.trim().parse().ok()?,
            animation_type: self.animation_type.trim().parse().ok()?,
            animation_enabled: self.animation_enabled,
        })
    }
}

/// Editable text buffers behind the RSS settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssForm {
    pub fetch_interval: String,
    pub max_news_age_hours: String,
    pub max_headlines_per_feed: String,
    pub timezone: String,
}

impl RssForm {
    pub fn from_settings(settings: &RssSettings) -> Self {
        Self {
            fetch_interval: settings.fetch_interval.to_string(),
            max_news_age_hours: settings.max_news_age_hours.to_string(),
            max_headlines_per_feed: settings.max_headlines_per_feed.to_string(),
            timezone: settings.tz_region.clone(),
        }
    }

    pub fn to_settings(&self) -> Option<RssSettings> {
        Some(RssSettings {
            fetch_interval: self.fetch_interval.trim().parse().ok()?,
            max_news_age_hours: self.max_news_age_hours.trim().parse().ok()?,
            max_headlines_per_feed: self.max_headlines_per_feed.trim().parse().ok()?,
            tz_region: self.timezone.trim().to_string(),
        })
    }
}

pub const DISPLAY_ROWS: usize = 7;
pub const CONTENT_ROWS: usize = 5;
pub const RSS_ROWS: usize = 4;

pub struct App {
    pub tab: Tab,
    pub mode: Mode,
    pub notifier: Notifier,
    pub quit: bool,

    /// Clock region; device-formatted time, or an inline error string.
    pub time_text: String,
    pub free_memory: String,
    pub wifi: String,
    pub status_refreshed: Option<DateTime<Local>>,

    pub display: DisplayForm,
    pub content: ContentFlags,
    pub rss: RssForm,

    /// Render snapshot of the roster. Row indices bound into actions are
    /// only valid until the next mutation or re-render.
    pub feeds: Vec<Feed>,

    pub display_cursor: usize,
    pub content_cursor: usize,
    pub rss_cursor: usize,
    pub feed_cursor: usize,
}

impl App {
    pub fn new() -> Self {
        Self {
            tab: Tab::Status,
            mode: Mode::Normal,
            notifier: Notifier::new(),
            quit: false,
            time_text: "—".to_string(),
            free_memory: "—".to_string(),
            wifi: "—".to_string(),
            status_refreshed: None,
            display: DisplayForm::default(),
            content: ContentFlags::default(),
            rss: RssForm::default(),
            feeds: Vec::new(),
            display_cursor: 0,
            content_cursor: 0,
            rss_cursor: 0,
            feed_cursor: 0,
        }
    }

    // -- tab and cursor navigation -------------------------------------------

    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    pub fn prev_tab(&mut self) {
        self.tab = self.tab.prev();
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Status => 0,
            Tab::Display => DISPLAY_ROWS,
            Tab::Content => CONTENT_ROWS,
            Tab::Rss => RSS_ROWS,
            Tab::Feeds => self.feeds.len(),
        }
    }

    pub fn cursor(&self) -> usize {
        match self.tab {
            Tab::Status => 0,
            Tab::Display => self.display_cursor,
            Tab::Content => self.content_cursor,
            Tab::Rss => self.rss_cursor,
            Tab::Feeds => self.feed_cursor,
        }
    }

    fn set_cursor(&mut self, value: usize) {
        match self.tab {
            Tab::Status => {}
            Tab::Display => self.display_cursor = value,
            Tab::Content => self.content_cursor = value,
            Tab::Rss => self.rss_cursor = value,
            Tab::Feeds => self.feed_cursor = value,
        }
    }

    pub fn cursor_down(&mut self) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        self.set_cursor((self.cursor() + 1).min(rows - 1));
    }

    pub fn cursor_up(&mut self) {
        self.set_cursor(self.cursor().saturating_sub(1));
    }

    // -- text entry ----------------------------------------------------------

    fn begin_input(&mut self, target: InputTarget, buffer: String) {
        self.mode = Mode::Input { target, buffer };
    }

    pub fn push_char(&mut self, c: char) {
        if let Mode::Input { buffer, .. } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Mode::Input { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    pub fn cancel(&mut self) {
        self.mode = Mode::Normal;
    }

    fn field_value(&self, id: FieldId) -> String {
        match id {
            FieldId::Brightness => self.display.brightness.clone(),
            FieldId::ScrollSpeed => self.display.scroll_speed.clone(),
            FieldId::ScrollDirection => self.display.scroll_direction.clone(),
            FieldId::PanelType => self.display.panel_type.clone(),
            FieldId::FontType => self.display.font_type.clone(),
            FieldId::AnimationType => self.display.animation_type.clone(),
            FieldId::FetchInterval => self.rss.fetch_interval.clone(),
            FieldId::MaxNewsAgeHours => self.rss.max_news_age_hours.clone(),
            FieldId::MaxHeadlinesPerFeed => self.rss.max_headlines_per_feed.clone(),
            FieldId::Timezone => self.rss.timezone.clone(),
        }
    }

    fn set_field_value(&mut self, id: FieldId, value: String) {
        match id {
            FieldId::Brightness => self.display.brightness = value,
            FieldId::ScrollSpeed => self.display.scroll_speed = value,
            FieldId::ScrollDirection => self.display.scroll_direction = value,
            FieldId::PanelType => self.display.panel_type = value,
            FieldId::FontType => self.display.font_type = value,
            FieldId::AnimationType => self.display.animation_type = value,
            FieldId::FetchInterval => self.rss.fetch_interval = value,
            FieldId::MaxNewsAgeHours => self.rss.max_news_age_hours = value,
            FieldId::MaxHeadlinesPerFeed => self.rss.max_headlines_per_feed = value,
            FieldId::Timezone => self.rss.timezone = value,
        }
    }

    fn display_field_at(cursor: usize) -> Option<FieldId> {
        match cursor {
            0 => Some(FieldId::Brightness),
            1 => Some(FieldId::ScrollSpeed),
            2 => Some(FieldId::ScrollDirection),
            3 => Some(FieldId::PanelType),
            4 => Some(FieldId::FontType),
            5 => Some(FieldId::AnimationType),
            _ => None, // row 6 is the animation-enabled toggle
        }
    }

    fn rss_field_at(cursor: usize) -> FieldId {
        match cursor {
            0 => FieldId::FetchInterval,
            1 => FieldId::MaxNewsAgeHours,
            2 => FieldId::MaxHeadlinesPerFeed,
            _ => FieldId::Timezone,
        }
    }

    // -- activation ----------------------------------------------------------

    /// Enter on the current row: open a text entry for editable fields,
    /// flip booleans in place.
    pub fn activate(&mut self) -> Option<Action> {
        match self.tab {
            Tab::Status => None,
            Tab::Display => {
                match Self::display_field_at(self.display_cursor) {
                    Some(id) => {
                        let value = self.field_value(id);
                        self.begin_input(InputTarget::Field(id), value);
                    }
                    None => self.display.animation_enabled = !self.display.animation_enabled,
                }
                None
            }
            Tab::Content => {
                self.toggle_content_row();
                None
            }
            Tab::Rss => {
                let id = Self::rss_field_at(self.rss_cursor);
                let value = self.field_value(id);
                self.begin_input(InputTarget::Field(id), value);
                None
            }
            Tab::Feeds => {
                let index = self.feed_cursor;
                let url = self.feeds.get(index)?.url.clone();
                self.begin_input(InputTarget::FeedUrl { index }, url);
                None
            }
        }
    }

    fn toggle_content_row(&mut self) {
        let flag = match self.content_cursor {
            0 => &mut self.content.time,
            1 => &mut self.content.date,
            2 => &mut self.content.rss,
            3 => &mut self.content.quotes,
            _ => &mut self.content.facts,
        };
        *flag = !*flag;
    }

    /// Space on the current row: toggle booleans. On the feeds tab this
    /// flips the rendered row immediately and emits the mutation — the
    /// row already shows the new value, so no re-render follows.
    pub fn toggle_selected(&mut self) -> Option<Action> {
        match self.tab {
            Tab::Feeds => {
                let index = self.feed_cursor;
                let feed = self.feeds.get_mut(index)?;
                feed.enabled = !feed.enabled;
                Some(Action::ToggleFeed {
                    index,
                    enabled: feed.enabled,
                })
            }
            Tab::Content => {
                self.toggle_content_row();
                None
            }
            Tab::Display if self.display_cursor == DISPLAY_ROWS - 1 => {
                self.display.animation_enabled = !self.display.animation_enabled;
                None
            }
            _ => None,
        }
    }

    /// Save the current tab's form as one complete record.
    pub fn save_tab(&mut self, now: Instant) -> Option<Action> {
        match self.tab {
            Tab::Display => match self.display.to_settings() {
                Some(settings) => Some(Action::SaveDisplay(settings)),
                None => {
                    self.notifier.error(now, "Error updating display settings");
                    None
                }
            },
            Tab::Content => Some(Action::SaveContent(self.content.clone())),
            Tab::Rss => match self.rss.to_settings() {
                Some(settings) => Some(Action::SaveRss(settings)),
                None => {
                    self.notifier.error(now, "Error updating RSS settings");
                    None
                }
            },
            _ => None,
        }
    }

    // -- feed roster interactions --------------------------------------------

    pub fn begin_add_feed(&mut self) {
        self.begin_input(InputTarget::NewFeedName, String::new());
    }

    pub fn begin_manual_time(&mut self) {
        let prefill = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        self.begin_input(InputTarget::ManualTime, prefill);
    }

    pub fn request_remove(&mut self) {
        if !self.feeds.is_empty() {
            self.mode = Mode::Confirm(ConfirmTarget::RemoveFeed {
                index: self.feed_cursor,
            });
        }
    }

    pub fn request_reset(&mut self) {
        self.mode = Mode::Confirm(ConfirmTarget::ResetFeeds);
    }

    /// Answer an open confirmation with yes.
    pub fn confirm(&mut self) -> Option<Action> {
        let action = match self.mode {
            Mode::Confirm(ConfirmTarget::RemoveFeed { index }) => {
                Some(Action::RemoveFeed { index })
            }
            Mode::Confirm(ConfirmTarget::ResetFeeds) => Some(Action::ResetFeeds),
            _ => None,
        };
        self.mode = Mode::Normal;
        action
    }

    /// Commit an open text entry.
    ///
    /// An empty name or URL while adding a feed cancels silently; an
    /// empty manual time reports an error without any request.
    pub fn commit_input(&mut self, now: Instant) -> Option<Action> {
        let Mode::Input { target, buffer } = std::mem::replace(&mut self.mode, Mode::Normal)
        else {
            return None;
        };

        match target {
            InputTarget::Field(id) => {
                self.set_field_value(id, buffer.clone());
                // The timezone field commits straight to the device; the
                // other fields stay local until the form is saved.
                if id == FieldId::Timezone {
                    let tz = buffer.trim().to_string();
                    if tz.is_empty() {
                        return None;
                    }
                    return Some(Action::SetTimezone(tz));
                }
                None
            }
            InputTarget::FeedUrl { index } => {
                let url = buffer;
                let feed = self.feeds.get_mut(index)?;
                feed.url = url.clone();
                Some(Action::EditFeedUrl { index, url })
            }
            InputTarget::NewFeedName => {
                let name = buffer.trim().to_string();
                if name.is_empty() {
                    return None;
                }
                self.begin_input(InputTarget::NewFeedUrl { name }, String::new());
                None
            }
            InputTarget::NewFeedUrl { name } => {
                let url = buffer.trim().to_string();
                if url.is_empty() {
                    return None;
                }
                Some(Action::AddFeed { name, url })
            }
            InputTarget::ManualTime => {
                let datetime = buffer.trim().to_string();
                if datetime.is_empty() {
                    self.notifier.error(now, "Please select a date and time");
                    return None;
                }
                Some(Action::SetManualTime(datetime))
            }
        }
    }

    // -- message handling ----------------------------------------------------

    pub fn handle_msg(&mut self, msg: Msg, now: Instant) {
        match msg {
            Msg::Time(info) => {
                self.time_text = format!("{} {}", info.time, info.date);
            }
            Msg::TimeError => {
                self.time_text = "Error loading time".to_string();
            }
            Msg::Status(status) => {
                self.free_memory = status.free_memory.to_string();
                self.wifi = status.wifi;
                self.status_refreshed = Some(Local::now());
            }
            Msg::StatusError => {
                self.free_memory = "Error".to_string();
                self.wifi = "Error".to_string();
            }
            Msg::DisplayLoaded(settings) => {
                self.display = DisplayForm::from_settings(&settings);
            }
            Msg::RssLoaded(settings) => {
                self.rss = RssForm::from_settings(&settings);
            }
            Msg::Roster(feeds) => {
                self.feeds = feeds;
                if self.feed_cursor >= self.feeds.len() {
                    self.feed_cursor = self.feeds.len().saturating_sub(1);
                }
            }
            Msg::Notify(text, kind) => {
                self.notifier.notify(now, text, kind);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SystemStatus, TimeInfo};
    use crate::notify::Kind;

    fn feed(name: &str, url: &str, enabled: bool) -> Feed {
        Feed {
            name: name.to_string(),
            url: url.to_string(),
            enabled,
        }
    }

    fn app_with_feeds() -> App {
        let mut app = App::new();
        app.feeds = vec![
            feed("BBC", "http://bbc/rss", true),
            feed("Reuters", "http://reuters/rss", false),
        ];
        app.tab = Tab::Feeds;
        app
    }

    // -- construction --------------------------------------------------------

    #[test]
    fn new_app_starts_on_status_tab_in_normal_mode() {
        let app = App::new();
        assert_eq!(app.tab, Tab::Status);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.feeds.is_empty());
        assert!(!app.quit);
    }

    // -- tab navigation ------------------------------------------------------

    #[test]
    fn tabs_cycle_forward_and_back() {
        let mut app = App::new();
        for _ in 0..Tab::ALL.len() {
            app.next_tab();
        }
        assert_eq!(app.tab, Tab::Status, "full cycle returns to start");

        app.prev_tab();
        assert_eq!(app.tab, Tab::Feeds);
    }

    // -- cursor --------------------------------------------------------------

    #[test]
    fn cursor_clamps_at_bottom_of_form() {
        let mut app = App::new();
        app.tab = Tab::Rss;
        for _ in 0..10 {
            app.cursor_down();
        }
        assert_eq!(app.cursor(), RSS_ROWS - 1);
    }

    #[test]
    fn cursor_on_empty_feed_list_is_noop() {
        let mut app = App::new();
        app.tab = Tab::Feeds;
        app.cursor_down();
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn cursor_clamps_at_top() {
        let mut app = app_with_feeds();
        app.cursor_up();
        assert_eq!(app.cursor(), 0);
    }

    // -- feed toggling -------------------------------------------------------

    #[test]
    fn toggle_flips_row_in_place_and_emits_action() {
        let mut app = app_with_feeds();

        let action = app.toggle_selected();
        assert_eq!(
            action,
            Some(Action::ToggleFeed {
                index: 0,
                enabled: false
            })
        );
        assert!(!app.feeds[0].enabled, "row reflects the new value");
    }

    #[test]
    fn toggle_on_empty_roster_is_noop() {
        let mut app = App::new();
        app.tab = Tab::Feeds;
        assert_eq!(app.toggle_selected(), None);
    }

    // -- URL editing ---------------------------------------------------------

    #[test]
    fn url_edit_prefills_current_value() {
        let mut app = app_with_feeds();
        app.activate();
        assert_eq!(
            app.mode,
            Mode::Input {
                target: InputTarget::FeedUrl { index: 0 },
                buffer: "http://bbc/rss".to_string()
            }
        );
    }

    #[test]
    fn committing_url_edit_updates_row_and_emits_action() {
        let mut app = app_with_feeds();
        app.activate();
        app.push_char('x');

        let action = app.commit_input(Instant::now());
        assert_eq!(
            action,
            Some(Action::EditFeedUrl {
                index: 0,
                url: "http://bbc/rssx".to_string()
            })
        );
        assert_eq!(app.feeds[0].url, "http://bbc/rssx");
        assert_eq!(app.mode, Mode::Normal);
    }

    // -- adding a feed -------------------------------------------------------

    #[test]
    fn add_feed_collects_name_then_url() {
        let mut app = app_with_feeds();
        app.begin_add_feed();

        for c in "Tagesschau".chars() {
            app.push_char(c);
        }
        assert_eq!(app.commit_input(Instant::now()), None, "name step emits nothing");

        for c in "http://ts/rss".chars() {
            app.push_char(c);
        }
        let action = app.commit_input(Instant::now());
        assert_eq!(
            action,
            Some(Action::AddFeed {
                name: "Tagesschau".to_string(),
                url: "http://ts/rss".to_string()
            })
        );
    }

    #[test]
    fn empty_name_cancels_add_silently() {
        let mut app = app_with_feeds();
        app.begin_add_feed();

        assert_eq!(app.commit_input(Instant::now()), None);
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.notifier.current().is_none());
    }

    #[test]
    fn empty_url_cancels_add_silently() {
        let mut app = app_with_feeds();
        app.begin_add_feed();
        app.push_char('x');
        app.commit_input(Instant::now());

        assert_eq!(app.commit_input(Instant::now()), None);
        assert_eq!(app.mode, Mode::Normal);
    }

    // -- remove / reset confirmation -----------------------------------------

    #[test]
    fn remove_requires_confirmation() {
        let mut app = app_with_feeds();
        app.cursor_down();
        app.request_remove();

        assert_eq!(
            app.mode,
            Mode::Confirm(ConfirmTarget::RemoveFeed { index: 1 })
        );
        assert_eq!(app.confirm(), Some(Action::RemoveFeed { index: 1 }));
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn cancelling_confirmation_emits_nothing() {
        let mut app = app_with_feeds();
        app.request_remove();
        app.cancel();
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.confirm(), None);
    }

    #[test]
    fn remove_on_empty_roster_does_not_prompt() {
        let mut app = App::new();
        app.tab = Tab::Feeds;
        app.request_remove();
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn reset_requires_confirmation() {
        let mut app = app_with_feeds();
        app.request_reset();
        assert_eq!(app.mode, Mode::Confirm(ConfirmTarget::ResetFeeds));
        assert_eq!(app.confirm(), Some(Action::ResetFeeds));
    }

    // -- manual time ---------------------------------------------------------

    #[test]
    fn empty_manual_time_reports_error_without_action() {
        let mut app = App::new();
        app.begin_manual_time();
        if let Mode::Input { buffer, .. } = &mut app.mode {
            buffer.clear();
        }

        let now = Instant::now();
        assert_eq!(app.commit_input(now), None);
        let notice = app.notifier.current().expect("error shown");
        assert_eq!(notice.text, "Please select a date and time");
        assert_eq!(notice.kind, Kind::Error);
    }

    #[test]
    fn manual_time_commit_emits_action() {
        let mut app = App::new();
        app.begin_manual_time();
        if let Mode::Input { buffer, .. } = &mut app.mode {
            *buffer = "2026-08-06T14:30:00".to_string();
        }

        assert_eq!(
            app.commit_input(Instant::now()),
            Some(Action::SetManualTime("2026-08-06T14:30:00".to_string()))
        );
    }

    // -- timezone ------------------------------------------------------------

    #[test]
    fn timezone_commit_stores_buffer_and_emits_action() {
        let mut app = App::new();
        app.tab = Tab::Rss;
        app.rss_cursor = RSS_ROWS - 1;
        app.activate();
        if let Mode::Input { buffer, .. } = &mut app.mode {
            *buffer = "Europe/Berlin".to_string();
        }

        let action = app.commit_input(Instant::now());
        assert_eq!(action, Some(Action::SetTimezone("Europe/Berlin".to_string())));
        assert_eq!(app.rss.timezone, "Europe/Berlin");
    }

    #[test]
    fn other_rss_fields_commit_locally_only() {
        let mut app = App::new();
        app.tab = Tab::Rss;
        app.activate();
        if let Mode::Input { buffer, .. } = &mut app.mode {
            *buffer = "600".to_string();
        }

        assert_eq!(app.commit_input(Instant::now()), None);
        assert_eq!(app.rss.fetch_interval, "600");
    }

    // -- saving forms --------------------------------------------------------

    #[test]
    fn save_display_assembles_complete_record() {
        let mut app = App::new();
        app.tab = Tab::Display;
        app.display = DisplayForm {
            brightness: "128".into(),
            scroll_speed: "50".into(),
            scroll_direction: "0".into(),
            panel_type: "1".into(),
            font_type: "2".into(),
            animation_type: "0".into(),
            animation_enabled: true,
        };

        let action = app.save_tab(Instant::now());
        assert_eq!(
            action,
            Some(Action::SaveDisplay(DisplaySettings {
                brightness: 128,
                scroll_speed: 50,
                scroll_direction: 0,
                panel_type: 1,
                font_type: 2,
                animation_type: 0,
                animation_enabled: true,
            }))
        );
    }

    #[test]
    fn save_display_with_bad_number_reports_error() {
        let mut app = App::new();
        app.tab = Tab::Display;
        app.display.brightness = "bright".into();

        let now = Instant::now();
        assert_eq!(app.save_tab(now), None);
        let notice = app.notifier.current().expect("error shown");
        assert_eq!(notice.text, "Error updating display settings");
    }

    #[test]
    fn save_on_status_tab_is_noop() {
        let mut app = App::new();
        assert_eq!(app.save_tab(Instant::now()), None);
    }

    // -- message handling ----------------------------------------------------

    #[test]
    fn time_message_updates_clock_region() {
        let mut app = App::new();
        app.handle_msg(
            Msg::Time(TimeInfo {
                time: "14:30:00".into(),
                date: "2026-08-06".into(),
            }),
            Instant::now(),
        );
        assert_eq!(app.time_text, "14:30:00 2026-08-06");
    }

    #[test]
    fn time_error_degrades_to_inline_string() {
        let mut app = App::new();
        app.handle_msg(Msg::TimeError, Instant::now());
        assert_eq!(app.time_text, "Error loading time");
    }

    #[test]
    fn status_error_degrades_both_regions() {
        let mut app = App::new();
        app.handle_msg(Msg::StatusError, Instant::now());
        assert_eq!(app.free_memory, "Error");
        assert_eq!(app.wifi, "Error");
    }

    #[test]
    fn status_message_updates_regions() {
        let mut app = App::new();
        app.handle_msg(
            Msg::Status(SystemStatus {
                free_memory: 151384,
                wifi: "Connected (192.168.1.7)".into(),
            }),
            Instant::now(),
        );
        assert_eq!(app.free_memory, "151384");
        assert_eq!(app.wifi, "Connected (192.168.1.7)");
        assert!(app.status_refreshed.is_some());
    }

    #[test]
    fn roster_message_replaces_snapshot_and_clamps_cursor() {
        let mut app = app_with_feeds();
        app.cursor_down();
        assert_eq!(app.feed_cursor, 1);

        app.handle_msg(
            Msg::Roster(vec![feed("BBC", "http://bbc/rss", true)]),
            Instant::now(),
        );
        assert_eq!(app.feeds.len(), 1);
        assert_eq!(app.feed_cursor, 0);
    }

    #[test]
    fn notify_message_reaches_notifier() {
        let mut app = App::new();
        app.handle_msg(
            Msg::Notify("Feed disabled".into(), Kind::Success),
            Instant::now(),
        );
        assert_eq!(app.notifier.current().unwrap().text, "Feed disabled");
    }

    // -- form round trips ----------------------------------------------------

    #[test]
    fn display_form_round_trips_settings() {
        let settings = DisplaySettings {
            brightness: 200,
            scroll_speed: 45,
            scroll_direction: 1,
            panel_type: 0,
            font_type: 2,
            animation_type: 3,
            animation_enabled: false,
        };
        assert_eq!(
            DisplayForm::from_settings(&settings).to_settings(),
            Some(settings)
        );
    }

    #[test]
    fn rss_form_round_trips_settings() {
        let settings = RssSettings {
            fetch_interval: 900,
            max_news_age_hours: 24,
            max_headlines_per_feed: 5,
            tz_region: "Asia/Jakarta".into(),
        };
        assert_eq!(RssForm::from_settings(&settings).to_settings(), Some(settings));
    }
}

//! # Terminal Renderer
//!
//! Draws the session onto a [`RenderStream`]. The screen is split into fixed
//! regions, top to bottom:
//!
//! ```text
//! row 0        title and loading indicator
//! row 2        query line
//! rows 3..8    suggestion list
//! row 8        separator
//! rows 9..21   result area (detail card, table or error)
//! row 21       page controls
//! last row     key help
//! ```
//!
//! A view event redraws only the region it affects.

use crate::repl::events::ViewEvent;
use crate::repl::io::RenderStream;
use crate::repl::models::{CountryRecord, DetailRecord};
use crate::repl::services::{PageControl, MAX_SUGGESTIONS};
use crate::repl::utils::{fit_to_width, format_population};
use crate::repl::views::screen::{Region, ResultArea, Screen};
use anyhow::Result;
use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::Write;

// Helper macro to convert crossterm errors to anyhow errors
macro_rules! execute_term {
    ($($arg:expr),* $(,)?) => {
        execute!($($arg),*).map_err(anyhow::Error::from)
    };
}

const TITLE: &str = "countryline";
const LOADING_TEXT: &str = "Loading...";
const QUERY_PROMPT: &str = "Country: ";
const HELP_TEXT: &str =
    "Enter search  Ctrl+F list  Tab accept  Up/Down choose  PgUp/PgDn/Home/End page  Esc clear  Ctrl+C quit";

const HEADER_ROW: u16 = 0;
const QUERY_ROW: u16 = 2;
const SUGGESTION_ROW: u16 = 3;
const SEPARATOR_ROW: u16 = SUGGESTION_ROW + MAX_SUGGESTIONS as u16;
const RESULT_ROW: u16 = SEPARATOR_ROW + 1;
const RESULT_HEIGHT: u16 = 12;
const PAGE_BAR_ROW: u16 = RESULT_ROW + RESULT_HEIGHT;

const NAME_WIDTH: usize = 32;
const POPULATION_WIDTH: usize = 15;
const REGION_WIDTH: usize = 10;

/// Page numbers shown on each side of the active page before eliding
const PAGE_WINDOW_RADIUS: usize = 2;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Prepare the terminal and draw the empty screen
    fn initialize(&mut self) -> Result<()>;

    /// Redraw every region
    fn render_full(&mut self) -> Result<()>;

    /// Apply one view event and redraw the region it touches
    fn handle_view_event(&mut self, event: &ViewEvent) -> Result<()>;

    /// Restore the terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Renderer over any [`RenderStream`]
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
    screen: Screen,
    /// Column the next print starts at on the current row
    column: usize,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
            screen: Screen::new(),
            column: 0,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// What is currently on screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    fn width(&self) -> usize {
        self.terminal_size.0 as usize
    }

    fn visible(&self, row: u16) -> bool {
        row < self.terminal_size.1
    }

    /// Blank `row` and leave the cursor at its first column
    fn start_line(&mut self, row: u16) -> Result<bool> {
        if !self.visible(row) {
            return Ok(false);
        }
        self.render_stream.clear_line(row)?;
        self.move_to(0, row)?;
        Ok(true)
    }

    fn move_to(&mut self, column: usize, row: u16) -> Result<()> {
        self.render_stream.move_cursor(column as u16, row)?;
        self.column = column;
        Ok(())
    }

    /// Cut `text` to the columns left on the current row and advance past it
    fn fit_remaining(&mut self, text: &str) -> String {
        let fitted = fit_to_width(text, self.width().saturating_sub(self.column));
        self.column += fitted.chars().count();
        fitted
    }

    fn print(&mut self, text: &str) -> Result<()> {
        let fitted = self.fit_remaining(text);
        execute_term!(self.render_stream, Print(fitted))
    }

    fn print_styled(&mut self, text: &str, attribute: Attribute) -> Result<()> {
        let fitted = self.fit_remaining(text);
        execute_term!(
            self.render_stream,
            SetAttribute(attribute),
            Print(fitted),
            SetAttribute(Attribute::Reset)
        )
    }

    fn render_region(&mut self, region: Region) -> Result<()> {
        match region {
            Region::Header => self.render_header(),
            Region::Query => self.render_query(),
            Region::Suggestions => self.render_suggestions(),
            Region::Result => self.render_result(),
            Region::PageBar => self.render_page_bar(),
        }
    }

    fn render_header(&mut self) -> Result<()> {
        if !self.start_line(HEADER_ROW)? {
            return Ok(());
        }
        self.print_styled(TITLE, Attribute::Bold)?;

        if self.screen.loading {
            let column = self.width().saturating_sub(LOADING_TEXT.len());
            self.move_to(column, HEADER_ROW)?;
            let fitted = self.fit_remaining(LOADING_TEXT);
            execute_term!(
                self.render_stream,
                SetForegroundColor(Color::Yellow),
                Print(fitted),
                ResetColor
            )?;
        }
        Ok(())
    }

    fn render_query(&mut self) -> Result<()> {
        if !self.start_line(QUERY_ROW)? {
            return Ok(());
        }
        let line = format!("{QUERY_PROMPT}{}", self.screen.query);
        self.print(&line)
    }

    fn render_suggestions(&mut self) -> Result<()> {
        for slot in 0..MAX_SUGGESTIONS {
            let row = SUGGESTION_ROW + slot as u16;
            if !self.start_line(row)? {
                continue;
            }
            let Some(text) = self.screen.suggestions.get(slot).map(|s| s.text().to_string())
            else {
                continue;
            };

            if self.screen.highlighted == Some(slot) {
                self.print_styled(&format!("  > {text}"), Attribute::Reverse)?;
            } else {
                self.print(&format!("    {text}"))?;
            }
        }
        Ok(())
    }

    fn render_separator(&mut self) -> Result<()> {
        if self.start_line(SEPARATOR_ROW)? {
            let line = "─".repeat(self.width());
            self.print_styled(&line, Attribute::Dim)?;
        }
        Ok(())
    }

    fn render_result(&mut self) -> Result<()> {
        for offset in 0..RESULT_HEIGHT {
            if self.visible(RESULT_ROW + offset) {
                self.render_stream.clear_line(RESULT_ROW + offset)?;
            }
        }

        match self.screen.result.clone() {
            ResultArea::Empty => Ok(()),
            ResultArea::Detail(record) => self.render_detail(&record),
            ResultArea::Table(rows) => self.render_table(&rows),
            ResultArea::Error(message) => {
                if self.start_line(RESULT_ROW)? {
                    let fitted = self.fit_remaining(&message);
                    execute_term!(
                        self.render_stream,
                        SetForegroundColor(Color::Red),
                        Print(fitted),
                        ResetColor
                    )?;
                }
                Ok(())
            }
        }
    }

    fn render_detail(&mut self, record: &DetailRecord) -> Result<()> {
        let lines = [
            (None, record.common_name.clone()),
            (Some("Flag"), record.flag_url.clone()),
            (Some("Capital"), record.capital.clone()),
            (Some("Continent"), record.continent.clone()),
            (Some("Population"), record.population_text()),
            (Some("Currency"), record.currency.clone()),
            (Some("Common Languages"), record.languages.clone()),
        ];

        for (offset, (label, value)) in lines.iter().enumerate() {
            let row = RESULT_ROW + offset as u16;
            if !self.start_line(row)? {
                break;
            }
            match label {
                None => self.print_styled(value, Attribute::Bold)?,
                Some(label) => {
                    self.print_styled(&format!("{label}: "), Attribute::Dim)?;
                    self.print(value)?;
                }
            }
        }
        Ok(())
    }

    fn render_table(&mut self, rows: &[CountryRecord]) -> Result<()> {
        if self.start_line(RESULT_ROW)? {
            let header = table_line("Name", "Population", "Region", "Capital");
            self.print_styled(&header, Attribute::Underlined)?;
        }

        for (offset, record) in rows.iter().enumerate() {
            let row = RESULT_ROW + 1 + offset as u16;
            if row >= PAGE_BAR_ROW || !self.start_line(row)? {
                break;
            }
            let line = table_line(
                record.common_name(),
                &format_population(record.population),
                &record.region,
                record.primary_capital(),
            );
            self.print(&line)?;
        }
        Ok(())
    }

    fn render_page_bar(&mut self) -> Result<()> {
        if !self.start_line(PAGE_BAR_ROW)? || self.screen.page_controls.is_empty() {
            return Ok(());
        }

        self.print("Pages: ")?;
        let active = self.screen.active_page;
        let controls = self.screen.page_controls.clone();
        for slot in page_window(&controls, active) {
            match slot {
                Some(control) if control.page == active => {
                    self.print_styled(&format!("[{}]", control.label()), Attribute::Reverse)?;
                }
                Some(control) => self.print(&format!(" {} ", control.label()))?,
                None => self.print(" … ")?,
            }
            self.print(" ")?;
        }

        let total = controls.len();
        let noun = if total == 1 { "page" } else { "pages" };
        self.print(&format!("({total} {noun})"))
    }

    fn render_help(&mut self) -> Result<()> {
        let row = self.terminal_size.1.saturating_sub(1);
        if row > PAGE_BAR_ROW && self.start_line(row)? {
            self.print_styled(HELP_TEXT, Attribute::Dim)?;
        }
        Ok(())
    }

    /// Leave a visible cursor at the end of the query
    fn place_cursor(&mut self) -> Result<()> {
        let column = (QUERY_PROMPT.chars().count() + self.screen.query.chars().count())
            .min(self.width().saturating_sub(1));
        self.render_stream.move_cursor(column as u16, QUERY_ROW)?;
        self.render_stream.show_cursor()?;
        self.render_stream.flush().map_err(anyhow::Error::from)
    }
}

/// Controls to draw around `active`: the first, the last and those within
/// [`PAGE_WINDOW_RADIUS`] of `active`. `None` stands for a run of hidden pages.
fn page_window(controls: &[PageControl], active: usize) -> Vec<Option<PageControl>> {
    let last = controls.len();
    let mut window = Vec::new();
    let mut previous = 0;
    for control in controls {
        let page = control.page;
        if page != 1 && page != last && page.abs_diff(active) > PAGE_WINDOW_RADIUS {
            continue;
        }
        if page > previous + 1 {
            window.push(None);
        }
        window.push(Some(*control));
        previous = page;
    }
    window
}

fn table_line(name: &str, population: &str, region: &str, capital: &str) -> String {
    format!(
        "{:<name_w$} {:>pop_w$}  {:<region_w$} {}",
        fit_to_width(name, NAME_WIDTH),
        population,
        fit_to_width(region, REGION_WIDTH),
        capital,
        name_w = NAME_WIDTH,
        pop_w = POPULATION_WIDTH,
        region_w = REGION_WIDTH,
    )
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_full()
    }

    fn render_full(&mut self) -> Result<()> {
        // Hide cursor before screen refresh to avoid flickering
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;

        self.render_header()?;
        self.render_query()?;
        self.render_suggestions()?;
        self.render_separator()?;
        self.render_result()?;
        self.render_page_bar()?;
        self.render_help()?;

        self.place_cursor()
    }

    fn handle_view_event(&mut self, event: &ViewEvent) -> Result<()> {
        let region = self.screen.apply(event);
        tracing::trace!("Redrawing {:?} for {:?}", region, event);

        self.render_stream.hide_cursor()?;
        self.render_region(region)?;
        self.place_cursor()
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repl::io::{MockRenderStream, RenderCommand};
    use crate::repl::services::Suggestion;
    use serde_json::json;

    fn renderer() -> (TerminalRenderer<MockRenderStream>, MockRenderStream) {
        let stream = MockRenderStream::with_size((100, 30));
        let renderer = TerminalRenderer::with_render_stream(stream.clone()).unwrap();
        (renderer, stream)
    }

    #[test]
    fn renderer_should_take_size_from_stream() {
        let (mut renderer, _) = renderer();
        assert_eq!(renderer.terminal_size(), (100, 30));
        renderer.update_size(120, 40);
        assert_eq!(renderer.terminal_size(), (120, 40));
    }

    #[test]
    fn initialize_and_cleanup_should_toggle_terminal_modes() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();
        assert!(stream.is_raw_mode());
        assert!(stream.is_alternate_screen());
        assert!(stream.shows(TITLE));

        renderer.cleanup().unwrap();
        assert!(!stream.is_raw_mode());
        assert!(!stream.is_alternate_screen());
        assert!(stream.is_cursor_visible());
    }

    #[test]
    fn query_and_highlighted_suggestion_should_render() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();

        renderer
            .handle_view_event(&ViewEvent::QueryChanged {
                text: "nig".to_string(),
            })
            .unwrap();
        renderer
            .handle_view_event(&ViewEvent::SuggestionsChanged {
                suggestions: vec![
                    Suggestion::new(0, "Niger".to_string()),
                    Suggestion::new(1, "Nigeria".to_string()),
                ],
                highlighted: Some(1),
            })
            .unwrap();

        assert_eq!(stream.row_text(QUERY_ROW), "Country: nig");
        assert_eq!(stream.row_text(SUGGESTION_ROW), "    Niger");
        assert_eq!(stream.row_text(SUGGESTION_ROW + 1), "  > Nigeria");
        assert!(stream.has_command(&RenderCommand::MoveCursor(12, QUERY_ROW)));
    }

    #[test]
    fn table_should_format_population_and_missing_capital() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();

        let rows = vec![
            CountryRecord::new("Germany", 83240525)
                .with_region("Europe")
                .with_capital(&["Berlin"]),
            CountryRecord::new("Antarctica", 1000).with_region("Antarctic"),
        ];
        renderer
            .handle_view_event(&ViewEvent::TableChanged { rows })
            .unwrap();

        let germany = stream.row_text(RESULT_ROW + 1);
        assert!(germany.starts_with("Germany"));
        assert!(germany.contains("83,240,525"));
        assert!(germany.ends_with("Berlin"));
        assert!(stream.row_text(RESULT_ROW + 2).ends_with("N/A"));
    }

    #[test]
    fn detail_card_should_list_labelled_fields() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();

        let record = DetailRecord::from_candidate(&json!({
            "name": {"common": "Japan"},
            "capital": ["Tokyo"],
            "continents": ["Asia"],
            "population": 125836021,
            "currencies": {"JPY": {"name": "Japanese yen"}},
            "languages": {"jpn": "Japanese"},
            "flags": {"svg": "https://flagcdn.com/jp.svg"}
        }));
        renderer
            .handle_view_event(&ViewEvent::DetailReady { record })
            .unwrap();

        assert_eq!(stream.row_text(RESULT_ROW), "Japan");
        assert!(stream.shows("Capital: Tokyo"));
        assert!(stream.shows("Population: 125836021"));
        assert!(stream.shows("Currency: Japanese yen - JPY"));
        assert!(stream.shows("Common Languages: Japanese"));
    }

    #[test]
    fn error_should_replace_table_rows() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();
        renderer
            .handle_view_event(&ViewEvent::TableChanged {
                rows: vec![CountryRecord::new("Peru", 1)],
            })
            .unwrap();

        renderer
            .handle_view_event(&ViewEvent::ErrorRaised {
                message: "Please enter a valid country name.".to_string(),
            })
            .unwrap();

        assert_eq!(
            stream.row_text(RESULT_ROW),
            "Please enter a valid country name."
        );
        assert!(!stream.shows("Peru"));
    }

    #[test]
    fn page_bar_should_mark_active_page() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();
        renderer
            .handle_view_event(&ViewEvent::PageControlsChanged {
                controls: (1..=3).map(|page| PageControl { page }).collect(),
                active_page: 2,
            })
            .unwrap();

        assert_eq!(
            stream.row_text(PAGE_BAR_ROW),
            "Pages:  1  [2]  3  (3 pages)"
        );

        renderer
            .handle_view_event(&ViewEvent::PageControlsChanged {
                controls: Vec::new(),
                active_page: 1,
            })
            .unwrap();
        assert_eq!(stream.row_text(PAGE_BAR_ROW), "");
    }

    #[test]
    fn page_window_should_elide_pages_far_from_active() {
        let controls: Vec<PageControl> = (1..=25).map(|page| PageControl { page }).collect();
        let pages = |active| -> Vec<Option<usize>> {
            page_window(&controls, active)
                .iter()
                .map(|slot| slot.map(|control| control.page))
                .collect()
        };

        assert_eq!(
            pages(13),
            vec![
                Some(1),
                None,
                Some(11),
                Some(12),
                Some(13),
                Some(14),
                Some(15),
                None,
                Some(25)
            ]
        );
        assert_eq!(pages(1), vec![Some(1), Some(2), Some(3), None, Some(25)]);
        assert_eq!(
            pages(4),
            vec![
                Some(1),
                Some(2),
                Some(3),
                Some(4),
                Some(5),
                Some(6),
                None,
                Some(25)
            ]
        );
    }

    #[test]
    fn long_page_bar_should_stay_within_width() {
        let stream = MockRenderStream::with_size((40, 30));
        let mut renderer = TerminalRenderer::with_render_stream(stream.clone()).unwrap();
        renderer.initialize().unwrap();
        renderer
            .handle_view_event(&ViewEvent::PageControlsChanged {
                controls: (1..=25).map(|page| PageControl { page }).collect(),
                active_page: 13,
            })
            .unwrap();

        let bar = stream.row_text(PAGE_BAR_ROW);
        assert!(bar.starts_with("Pages:  1   …   11"));
        assert!(bar.contains("[13]"));
        assert!(bar.chars().count() <= 40);
        assert!(!stream.shows(" 16 "));

        renderer
            .handle_view_event(&ViewEvent::PageControlsChanged {
                controls: (1..=25).map(|page| PageControl { page }).collect(),
                active_page: 25,
            })
            .unwrap();
        assert!(stream.row_text(PAGE_BAR_ROW).contains("[25]"));
    }

    #[test]
    fn loading_indicator_should_toggle() {
        let (mut renderer, stream) = renderer();
        renderer.initialize().unwrap();

        renderer
            .handle_view_event(&ViewEvent::LoadingChanged { loading: true })
            .unwrap();
        assert!(stream.row_text(HEADER_ROW).ends_with(LOADING_TEXT));

        renderer
            .handle_view_event(&ViewEvent::LoadingChanged { loading: false })
            .unwrap();
        assert_eq!(stream.row_text(HEADER_ROW), TITLE);
    }
}

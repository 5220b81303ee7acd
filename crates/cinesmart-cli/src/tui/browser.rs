//! Movie browser TUI main loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use cinesmart_api::catalog::{Listing, MovieCatalog};
use cinesmart_view::{
    DebouncedSearch, DetailController, Fragment, MovieList, MovieModal, SearchConfig, load_listing,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use super::state::{BrowseAction, BrowseState};
use super::ui;

/// Redraw interval while no key is pending.
const TICK: Duration = Duration::from_millis(50);

/// Base URL of movie pages opened with `o`.
const MOVIE_PAGE_URL: &str = "https://www.themoviedb.org/movie";

/// Runs the interactive movie browser until the user quits.
///
/// The popular listing is shown first; typing replaces it with debounced
/// search results.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<C>(catalog: Arc<C>, config: SearchConfig) -> Result<()>
where
    C: MovieCatalog + Sync + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, catalog, config).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
///
/// Keys are polled without blocking so the pipeline's timers and requests
/// keep running on the same runtime between redraws.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    catalog: Arc<C>,
    config: SearchConfig,
) -> Result<()>
where
    C: MovieCatalog + Sync + 'static,
{
    let list = Arc::new(MovieList::new());
    let modal = Arc::new(MovieModal::new());
    let details =
        DetailController::new(Arc::clone(&catalog), Arc::clone(&modal), config.posters.clone());
    load_listing(catalog.as_ref(), Listing::Popular, &list, &config.posters).await;
    let mut search = DebouncedSearch::new(catalog, Arc::clone(&list), config);
    let mut state = BrowseState::new();

    loop {
        let fragments = list.snapshot();
        let modal_state = modal.state();
        state.clamp_cursor(fragments.len());
        terminal
            .draw(|frame| ui::draw(frame, &state, &fragments, &modal_state))
            .context("failed to draw TUI")?;

        if !event::poll(Duration::ZERO).context("failed to poll events")? {
            tokio::time::sleep(TICK).await;
            continue;
        }
        let Event::Key(key) = event::read().context("failed to read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let open_movie = modal_state
            .body
            .as_ref()
            .filter(|_| modal_state.visible)
            .map(|body| body.movie_id);
        match handle_key(&mut state, key.code, key.modifiers, open_movie, &fragments) {
            BrowseAction::None => {}
            BrowseAction::Quit => return Ok(()),
            BrowseAction::Input(value) => search.on_input_change(value),
            BrowseAction::Activate(movie_id) => {
                details.activate(movie_id);
            }
            BrowseAction::CloseModal => modal.close(),
            BrowseAction::OpenPage(movie_id) => open_movie_page(movie_id),
        }
    }
}

/// Maps a key press to an action.
///
/// `open_movie` is the movie shown in the modal, `None` when the modal is
/// hidden.
fn handle_key(
    state: &mut BrowseState,
    key: KeyCode,
    modifiers: KeyModifiers,
    open_movie: Option<u64>,
    fragments: &[Fragment],
) -> BrowseAction {
    if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return BrowseAction::Quit;
    }

    if let Some(movie_id) = open_movie {
        return match key {
            KeyCode::Esc | KeyCode::Char('c') => BrowseAction::CloseModal,
            KeyCode::Char('o') => BrowseAction::OpenPage(movie_id),
            _ => BrowseAction::None,
        };
    }

    match key {
        KeyCode::Esc => BrowseAction::Quit,
        KeyCode::Up => {
            state.move_up();
            BrowseAction::None
        }
        KeyCode::Down => {
            state.move_down(fragments.len());
            BrowseAction::None
        }
        KeyCode::Enter => state
            .current_movie(fragments)
            .map_or(BrowseAction::None, BrowseAction::Activate),
        KeyCode::Backspace => {
            state.input_pop();
            BrowseAction::Input(state.query.clone())
        }
        KeyCode::Char(c) => {
            state.input_push(c);
            BrowseAction::Input(state.query.clone())
        }
        _ => BrowseAction::None,
    }
}

/// Opens the movie's web page in the default browser.
fn open_movie_page(movie_id: u64) {
    let url = format!("{MOVIE_PAGE_URL}/{movie_id}");
    if let Err(err) = open::that(&url) {
        tracing::warn!(url, error = %err, "failed to open browser");
    }
}

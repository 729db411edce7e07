//! folio — portfolio/blog site elements with a data-driven card grid.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌───────────┐ spawn  ┌───────────┐  Settled   ┌───────────┐
//! │  grid/    │ ─────► │ loader.rs │ ─────────► │  page.rs  │
//! │ (state)   │        │  (tokio)  │ (channel)  │ (routing) │
//! └───────────┘        └───────────┘            └───────────┘
//!       │ GridView                                    │
//!       ▼                                             ▼
//! ┌───────────┐                               ┌───────────────┐
//! │ markup.rs │  folio render                 │ app/ui/input  │  folio preview
//! └───────────┘                               └───────────────┘
//! ```
//!
//! * **`source/`** — the `JsonSource` trait, the `Item` entry view and the
//!   HTTP/file implementation.
//! * **`loader`** — runs fetches on the tokio runtime and reports back.
//! * **`grid/`** — the data grid: attributes, load state, cards.
//! * **`elements/`** — header, hero and footer.
//! * **`markup`** — HTML fragments for every element.
//! * **`theme`** / **`keymap`** — theme preference and scoped key bindings.
//! * **`app`** / **`ui`** / **`input`** — the terminal preview.
//! * **`main`** — parses args, builds the page, and runs one of the two
//!   commands.  Everything else lives in the library crate.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::runtime::Runtime;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{info, warn};
use url::Url;

use folio_elements::app::App;
use folio_elements::config::SiteConfig;
use folio_elements::grid::GridConfig;
use folio_elements::keymap::Keymap;
use folio_elements::loader::{Loader, Settled};
use folio_elements::logging::{self, LogTarget, TracingConfig};
use folio_elements::page::Page;
use folio_elements::source::WebSource;
use folio_elements::theme::{self, ThemeStore};
use folio_elements::{input, ui};

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "folio", version, about = "Portfolio site elements and data grids")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Debug logging (RUST_LOG still wins when set)
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Load the page's grids and print each element's markup
    Render(PageArgs),
    /// Preview the page in the terminal
    Preview(PageArgs),
}

#[derive(Args)]
struct PageArgs {
    /// Site file describing header, hero, grids and footer
    #[arg(long)]
    site: Option<PathBuf>,

    /// Add a grid loading this JSON array
    #[arg(long)]
    src: Option<String>,

    #[arg(long, requires = "src")]
    heading: Option<String>,

    #[arg(long, requires = "src")]
    subheading: Option<String>,

    /// Maximum cards for the --src grid (0 shows all)
    #[arg(long, default_value_t = 0, requires = "src")]
    show: usize,

    /// Explicit "view all" link for the --src grid
    #[arg(long = "all-href", requires = "src")]
    all_href: Option<String>,

    /// Page URL relative sources resolve against [default: current directory]
    #[arg(long)]
    base: Option<Url>,
}

impl PageArgs {
    fn site_config(&self) -> Result<SiteConfig> {
        let mut site = match &self.site {
            Some(path) => SiteConfig::load_from(path)?,
            None => SiteConfig::default(),
        };

        if let Some(src) = &self.src {
            site.grids.push(GridConfig {
                src: Some(src.clone()),
                heading: self.heading.clone(),
                subheading: self.subheading.clone(),
                show: self.show,
                all_href: self.all_href.clone(),
            });
        }

        if site.is_empty() {
            bail!("Nothing to show: pass --site <file> or --src <url>");
        }
        Ok(site)
    }

    fn base_url(&self) -> Result<Url> {
        if let Some(base) = &self.base {
            return Ok(base.clone());
        }
        let cwd = std::env::current_dir()?;
        Url::from_directory_path(&cwd)
            .map_err(|()| anyhow!("Cannot use {} as a base URL", cwd.display()))
    }

    /// Build the page and the channel its fetch results arrive on.
    fn build(&self, runtime: &Runtime) -> Result<(Page, UnboundedReceiver<Settled>)> {
        let site = self.site_config()?;
        let base = self.base_url()?;
        let source = WebSource::new("web", &site.http.options())?;

        info!(%base, grids = site.grids.len(), "building page");
        let (loader, rx) = Loader::new(Arc::new(source), base, runtime.handle().clone());
        Ok((Page::new(site, &loader), rx))
    }
}

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Restore the terminal before the panic message prints.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn render(args: &PageArgs, debug: bool) -> Result<()> {
    logging::init_tracing(&TracingConfig {
        debug,
        target: LogTarget::Stderr,
    })?;

    let runtime = Runtime::new()?;
    let (mut page, mut rx) = args.build(&runtime)?;
    let keymap = Keymap::new();
    page.mount(&keymap);

    runtime.block_on(async {
        while page.pending() > 0 {
            match rx.recv().await {
                Some(settled) => page.settle(settled),
                None => break,
            }
        }
    });

    let theme = ThemeStore::open_default().get();
    println!("{}", page.to_html(theme));
    Ok(())
}

fn preview(args: &PageArgs, debug: bool) -> Result<()> {
    let log_path = logging::default_log_path();
    logging::init_tracing(&TracingConfig {
        debug,
        target: LogTarget::File(log_path),
    })?;

    let runtime = Runtime::new()?;
    let (mut page, mut rx) = args.build(&runtime)?;

    let mut store = ThemeStore::open_default();
    let theme = match store.init_from_system_preference(theme::system_prefers_dark()) {
        Ok(theme) => theme,
        Err(err) => {
            warn!(error = %err, "theme preference not saved");
            store.get()
        }
    };

    let keymap = Keymap::new();
    page.mount(&keymap);
    let mut app = App::new(page, store, theme, keymap);

    install_panic_hook();
    let mut guard = TerminalGuard::new()?;

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Commit any settled fetches.
    //   2. Render the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(settled) = rx.try_recv() {
            app.settle(settled);
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.quit {
            break;
        }
    }

    app.page.unmount();
    // `guard` is dropped here, restoring the terminal.
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Command::Render(args) => render(args, cli.debug),
        Command::Preview(args) => preview(args, cli.debug),
    }
}

//! The interactive page loop.
//!
//! Each page visit is a fresh [`SessionRuntime`]; navigating tears the
//! current one down and starts the next from persisted state.

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::Result;
use chrono::Timelike;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tokio::sync::mpsc::UnboundedReceiver;

use termfolio_application::contact_form::missing_fields;
use termfolio_application::{
    ContactFormSubmitter, RuntimeSettings, SessionHandle, SessionRuntime, SessionUpdate,
};
use termfolio_core::command::Page;
use termfolio_core::relay::ContactRequest;
use termfolio_core::session::{Event, Phase, Session};
use termfolio_core::state::{StateRepository, Theme};
use termfolio_interaction::{ContactRoute, HttpContactChannel};

use crate::helper::FolioHelper;
use crate::render::{self, Palette};
use crate::view::{Op, TranscriptView};

const PROMPT: &str = "$ ";

type FolioEditor = Editor<FolioHelper, DefaultHistory>;

enum Exit {
    Navigate(Page),
    Quit,
}

pub struct Shell {
    repository: Arc<dyn StateRepository>,
    settings: RuntimeSettings,
    relay_url: String,
    editor: FolioEditor,
}

impl Shell {
    pub fn new(
        repository: Arc<dyn StateRepository>,
        settings: RuntimeSettings,
        relay_url: String,
    ) -> Result<Self> {
        let mut editor = FolioEditor::new()?;
        editor.set_helper(Some(FolioHelper::new(settings.registry)));
        Ok(Self {
            repository,
            settings,
            relay_url,
            editor,
        })
    }

    pub async fn run(mut self, start: Page) -> Result<()> {
        let mut page = start;
        loop {
            let (handle, updates) =
                SessionRuntime::start(page, self.repository.clone(), self.settings).await;
            tracing::info!("[Shell] Page {} (session {})", page, handle.id());

            let exit = self.visit(&handle, updates).await;
            handle.shutdown().await;
            match exit? {
                Exit::Navigate(next) => page = next,
                Exit::Quit => break,
            }
        }
        println!("{}", "Goodbye!".bright_green());
        Ok(())
    }

    async fn visit(
        &mut self,
        handle: &SessionHandle,
        mut updates: UnboundedReceiver<SessionUpdate>,
    ) -> Result<Exit> {
        let mut session = match updates.recv().await {
            Some(SessionUpdate::Changed(session)) => session,
            _ => return Ok(Exit::Quit),
        };
        let mut view = TranscriptView::default();
        redraw(&session, &mut view)?;

        let submitter = match session.page {
            Page::Contact => Some(self.submitter(ContactRoute::Email)),
            Page::Chat => Some(self.submitter(ContactRoute::Chat)),
            _ => None,
        };

        loop {
            if view.close_line() {
                println!();
            }
            let line = match self.editor.readline(PROMPT) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                    continue;
                }
                Err(ReadlineError::Eof) => return Ok(Exit::Quit),
                Err(err) => return Err(err.into()),
            };
            if !line.trim().is_empty() {
                let _ = self.editor.add_history_entry(line.as_str());
            }

            let sent = match line.trim() {
                "/quit" | "/exit" => return Ok(Exit::Quit),
                "/form" => {
                    match &submitter {
                        Some(submitter) => self.run_form(submitter, &session).await?,
                        None => println!(
                            "{}",
                            "The form lives on the contact and chat pages.".bright_black()
                        ),
                    }
                    continue;
                }
                "/theme" => {
                    handle.send(Event::ThemeButtonPressed)?;
                    1
                }
                _ => {
                    view.expect_echo();
                    handle.send(Event::InputChanged(line))?;
                    handle.send(Event::Submit)?;
                    2
                }
            };

            match pump(&mut updates, &mut view, sent, (session.theme, session.points)).await? {
                Pumped::Settled(next) => session = next,
                Pumped::Navigate(page) => return Ok(Exit::Navigate(page)),
                Pumped::Closed => return Ok(Exit::Quit),
            }
        }
    }

    fn submitter(&self, route: ContactRoute) -> ContactFormSubmitter {
        let channel = HttpContactChannel::new(&self.relay_url, route);
        tracing::debug!("[Shell] Form posts to {}", channel.endpoint());
        ContactFormSubmitter::new(Arc::new(channel))
    }

    async fn run_form(&mut self, submitter: &ContactFormSubmitter, session: &Session) -> Result<()> {
        let palette = Palette::for_theme(session.theme);
        let mut form = ContactRequest::default();

        for field in ["name", "company", "project", "email"] {
            let value = loop {
                match self.editor.readline(&format!("{}: ", field)) {
                    Ok(value) if !value.trim().is_empty() => break value.trim().to_string(),
                    Ok(_) => println!("{}", palette.muted(&format!("Please fill in your {}.", field))),
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                        println!("{}", palette.muted("Form cancelled."));
                        return Ok(());
                    }
                    Err(err) => return Err(err.into()),
                }
            };
            match field {
                "name" => form.name = Some(value),
                "company" => form.company = Some(value),
                "project" => form.project = Some(value),
                _ => form.email = Some(value),
            }
        }
        debug_assert!(missing_fields(&form).is_empty());

        println!("{}", palette.muted("Sending..."));
        if let Some(message) = submitter.submit(&form).await.message() {
            println!("{}", palette.accent(message));
        }
        Ok(())
    }
}

enum Pumped {
    Settled(Session),
    Navigate(Page),
    Closed,
}

/// Prints updates until the session stops dispatching.
///
/// `sent` is the number of events just sent; their snapshots arrive first.
async fn pump(
    updates: &mut UnboundedReceiver<SessionUpdate>,
    view: &mut TranscriptView,
    sent: usize,
    mut header: (Theme, u32),
) -> Result<Pumped> {
    let mut pending = sent;

    while let Some(update) = updates.recv().await {
        match update {
            SessionUpdate::Changed(session) => {
                pending = pending.saturating_sub(1);
                // Theme and points live in the header.
                if (session.theme, session.points) != header {
                    header = (session.theme, session.points);
                    redraw(&session, view)?;
                } else {
                    apply(&session, view)?;
                }
                if pending == 0 && session.phase() != Phase::Dispatching {
                    // Effects of the last event are already queued.
                    while let Ok(update) = updates.try_recv() {
                        if let Some(done) = side_effect(update, view) {
                            return Ok(done);
                        }
                    }
                    return Ok(Pumped::Settled(session));
                }
            }
            other => {
                if let Some(done) = side_effect(other, view) {
                    return Ok(done);
                }
            }
        }
    }
    Ok(Pumped::Closed)
}

fn side_effect(update: SessionUpdate, view: &mut TranscriptView) -> Option<Pumped> {
    match update {
        SessionUpdate::Navigate(page) => Some(Pumped::Navigate(page)),
        SessionUpdate::Closed => Some(Pumped::Closed),
        SessionUpdate::OpenExternal(url) => {
            if view.close_line() {
                println!();
            }
            open_external(&url);
            None
        }
        SessionUpdate::Changed(_) => None,
    }
}

fn apply(session: &Session, view: &mut TranscriptView) -> Result<()> {
    let palette = Palette::for_theme(session.theme);
    let ops = view.diff(&session.transcript);
    if ops.contains(&Op::Redraw) {
        return redraw(session, view);
    }

    let mut out = io::stdout().lock();
    for op in ops {
        match op {
            Op::Text(text) => write!(out, "{}", palette.line(&text))?,
            Op::Break => writeln!(out)?,
            Op::Redraw => {}
        }
    }
    out.flush()?;
    Ok(())
}

fn redraw(session: &Session, view: &mut TranscriptView) -> Result<()> {
    let palette = Palette::for_theme(session.theme);
    let hour = chrono::Local::now().hour();
    let mut out = io::stdout().lock();

    write!(out, "\x1B[2J\x1B[H")?;
    for line in render::header(session, hour) {
        writeln!(out, "{}", palette.accent(&line))?;
    }
    writeln!(out, "{}", palette.muted(&render::footer()))?;
    writeln!(out)?;
    for line in render::page_body(session.page) {
        writeln!(out, "{}", line.as_str().color(palette.text))?;
    }
    writeln!(out)?;

    for (i, line) in session.transcript.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", palette.line(line))?;
    }
    out.flush()?;
    view.reset(&session.transcript);
    Ok(())
}

/// Best-effort hand-off to the platform opener.
fn open_external(url: &str) {
    println!("{}", format!("-> {}", url).bright_blue().underline());

    let opener = if cfg!(target_os = "macos") {
        std::process::Command::new("open").arg(url).status()
    } else if cfg!(target_os = "windows") {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", url])
            .status()
    } else {
        std::process::Command::new("xdg-open").arg(url).status()
    };
    match opener {
        Ok(status) if status.success() => tracing::info!("[Shell] Opened {}", url),
        Ok(status) => tracing::warn!("[Shell] Opener exited with {} for {}", status, url),
        Err(e) => tracing::warn!("[Shell] Could not open {}: {}", url, e),
    }
}

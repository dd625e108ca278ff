// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Finder event loop
//!
//! Owns the terminal, routes crossterm events and task completions into the
//! view model, and redraws when the model asks for it. The service is
//! injected, so the loop runs the same against the REST client or the mock.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use af_client_api::AddressService;
use af_domain_types::AddressRecord;
use crossbeam_channel as chan;
use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Margin, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use tracing::{debug, info};

use crate::lookup_config::LookupConfig;
use crate::terminal::{TerminalGuard, TerminalModes};
use crate::theme::Theme;
use crate::view::{Components, DefaultComponents, ErrorBoundary, FinderView, HitTestRegistry};
use crate::view_model::{LookupViewModel, MouseAction, Msg};

const TICK: Duration = Duration::from_millis(16);

/// Everything the loop needs from its host
pub struct FinderDependencies {
    pub service: Arc<dyn AddressService>,
    pub config: LookupConfig,
    pub components: Box<dyn Components + Send>,
    pub theme: Theme,
}

impl FinderDependencies {
    pub fn new(service: Arc<dyn AddressService>, config: LookupConfig) -> Self {
        Self {
            service,
            config,
            components: Box::new(DefaultComponents),
            theme: Theme::default(),
        }
    }
}

/// Run the finder until the user leaves; returns the last selected address.
pub async fn run_finder(deps: FinderDependencies) -> anyhow::Result<Option<AddressRecord>> {
    // The loop blocks on terminal events; lookups keep running on the runtime workers.
    tokio::task::spawn_blocking(move || {
        let running = Arc::new(AtomicBool::new(true));
        let _guard = TerminalGuard::enter(TerminalModes::default(), Arc::clone(&running))?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        event_loop(&mut terminal, deps, &running)
    })
    .await?
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    deps: FinderDependencies,
    running: &AtomicBool,
) -> anyhow::Result<Option<AddressRecord>> {
    let (ui_tx, ui_rx) = chan::unbounded::<Msg>();
    let (selection_tx, selection_rx) = chan::unbounded::<AddressRecord>();

    let mut vm = LookupViewModel::new(deps.config, deps.service, ui_tx).with_on_select(move |record| {
        let _ = selection_tx.send(record.clone());
    });
    let view = FinderView {
        theme: &deps.theme,
        components: deps.components.as_ref(),
    };
    let mut boundary = ErrorBoundary::new();
    let mut hit_registry: HitTestRegistry<MouseAction> = HitTestRegistry::new();
    let mut selected: Option<AddressRecord> = None;

    let (tx_ev, rx_ev) = chan::unbounded::<Event>();
    let rx_tick = chan::tick(TICK);
    thread::spawn(move || {
        while let Ok(ev) = crossterm::event::read() {
            if tx_ev.send(ev).is_err() {
                break;
            }
        }
    });

    draw(terminal, &view, &vm, &boundary, &mut hit_registry, selected.as_ref())?;

    while running.load(Ordering::SeqCst) {
        chan::select_biased! {
            recv(rx_ev) -> ev => {
                let Ok(event) = ev else { break };
                if let Some(msg) = translate_event(event, &hit_registry) {
                    let result = vm.update(msg);
                    boundary.observe(result, vm.status());
                } else {
                    terminal.autoresize()?;
                    vm.needs_redraw = true;
                }
            }
            recv(ui_rx) -> msg => {
                if let Ok(msg) = msg {
                    let result = vm.update(msg);
                    boundary.observe(result, vm.status());
                }
            }
            recv(selection_rx) -> record => {
                if let Ok(record) = record {
                    info!(id = %record.id, "host received address");
                    selected = Some(record);
                    vm.needs_redraw = true;
                }
            }
            recv(rx_tick) -> _ => {
                let result = vm.update(Msg::Tick);
                boundary.observe(result, vm.status());
            }
        }

        if vm.take_exit_request() {
            debug!("exit requested");
            break;
        }
        if vm.needs_redraw {
            draw(terminal, &view, &vm, &boundary, &mut hit_registry, selected.as_ref())?;
            vm.needs_redraw = false;
        }
    }

    Ok(selected)
}

/// Map a terminal event to a message; `None` means a resize.
fn translate_event(event: Event, hit_registry: &HitTestRegistry<MouseAction>) -> Option<Msg> {
    match event {
        Event::Key(key) => Some(Msg::Key(key)),
        Event::Paste(text) => Some(Msg::Paste(text)),
        Event::Mouse(mouse) => {
            let hit = hit_registry.hit_test(mouse.column, mouse.row);
            Some(match (mouse.kind, hit) {
                (MouseEventKind::Down(MouseButton::Left), Some(hit)) => Msg::MouseClick(hit.action),
                (MouseEventKind::Down(_), None) => Msg::PointerOutside,
                (MouseEventKind::Moved, Some(hit)) => Msg::MouseHover(hit.action),
                (MouseEventKind::ScrollUp, Some(_)) => Msg::MouseScrollUp,
                (MouseEventKind::ScrollDown, Some(_)) => Msg::MouseScrollDown,
                _ => Msg::Tick,
            })
        }
        Event::Resize(..) => None,
        Event::FocusGained | Event::FocusLost => Some(Msg::Tick),
    }
}

fn draw<B: Backend>(
    terminal: &mut Terminal<B>,
    view: &FinderView<'_>,
    vm: &LookupViewModel,
    boundary: &ErrorBoundary,
    hit_registry: &mut HitTestRegistry<MouseAction>,
    selected: Option<&AddressRecord>,
) -> io::Result<()> {
    terminal.draw(|frame| {
        hit_registry.clear();
        let screen = frame.area().inner(Margin::new(2, 1));
        let [header, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(screen);
        render_header(frame, header, view.theme);

        let mut layout = view.render_finder(frame, body, vm, hit_registry);
        // Host content starts one row under the wrapper; that row is the notice line.
        let content_top = layout.wrapper.bottom().saturating_add(1).min(body.bottom());
        let content = Rect {
            y: content_top,
            height: body.bottom() - content_top,
            ..body
        };
        render_selection_panel(frame, content, selected, view.theme);
        view.render_overlay(frame, &mut layout, vm, hit_registry);
        boundary.render(frame, body, layout.wrapper, view.theme, &mut layout.elements);
    })?;
    Ok(())
}

fn render_header(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Address finder", theme.match_style()),
        Span::styled(
            "  type to search · ↑/↓ move · Enter select · Esc close/quit",
            theme.muted_style(),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_selection_panel(frame: &mut Frame<'_>, area: Rect, selected: Option<&AddressRecord>, theme: &Theme) {
    if area.height < 3 {
        return;
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(false))
        .title(Span::styled(" Selected address ", theme.muted_style()));

    let lines: Vec<Line> = match selected {
        Some(record) => {
            let mut lines: Vec<Line> = record.lines().into_iter().map(|l| Line::from(l.to_string())).collect();
            let locality: Vec<&str> = [record.city.as_deref(), record.postal_code.as_deref()]
                .into_iter()
                .flatten()
                .collect();
            if !locality.is_empty() {
                lines.push(Line::from(locality.join(" ")));
            }
            if let Some(country) = record.country_name.as_deref() {
                lines.push(Line::from(country.to_string()));
            }
            lines.push(Line::from(Span::styled(record.id.clone(), theme.muted_style())));
            lines
        }
        None => vec![Line::from(Span::styled("Nothing selected yet", theme.muted_style()))],
    };

    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: true }), area);
}

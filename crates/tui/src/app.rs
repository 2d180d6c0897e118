use std::{cmp, io, thread, time::Duration};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{error, info};
use elimtui_core::{
    backup::write_snapshot,
    fixtures::TOTAL_MATCHDAYS,
    AppConfig, BackupEntry, BackupManager, Match, Outcome, TournamentStore,
};

const TICK_RATE: Duration = Duration::from_millis(250);
const MAX_SCORE_INPUT_LEN: usize = 7;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    success: Color,
    warning: Color,
    danger: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
            danger: Color::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Matches,
    Standings,
    Points,
    Backup,
}

impl Tab {
    const ALL: [Tab; 4] = [Tab::Matches, Tab::Standings, Tab::Points, Tab::Backup];

    fn title(&self) -> &'static str {
        match self {
            Tab::Matches => "Matches",
            Tab::Standings => "Standings",
            Tab::Points => "Points",
            Tab::Backup => "Backup",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|tab| tab == self).unwrap_or(0)
    }

    fn next(&self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn prev(&self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Modal for typing a score as `home-away`, e.g. `2-1`.
#[derive(Debug, Clone)]
struct ScorePromptModal {
    match_id: String,
    label: String,
    input: String,
    cursor: usize,
}

impl ScorePromptModal {
    fn new(match_id: String, label: String, existing: Option<(i32, i32)>) -> Self {
        let input = existing
            .map(|(home, away)| format!("{home}-{away}"))
            .unwrap_or_default();
        let cursor = input.chars().count();
        Self {
            match_id,
            label,
            input,
            cursor,
        }
    }

    fn insert(&mut self, ch: char) {
        let accepted = ch.is_ascii_digit() || (ch == '-' && !self.input.contains('-'));
        if !accepted || self.input.chars().count() >= MAX_SCORE_INPUT_LEN {
            return;
        }
        let byte_idx = char_to_byte_index(&self.input, self.cursor);
        self.input.insert(byte_idx, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let byte_idx = char_to_byte_index(&self.input, self.cursor - 1);
        self.input.remove(byte_idx);
        self.cursor -= 1;
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.input.chars().count() as isize;
        let next = (self.cursor as isize + delta).clamp(0, len);
        self.cursor = next as usize;
    }

    fn parse(&self) -> Result<(i32, i32)> {
        let (home, away) = self
            .input
            .split_once('-')
            .ok_or_else(|| anyhow::anyhow!("enter the score as home-away, e.g. 2-1"))?;
        let home: i32 = home.trim().parse().context("home goals must be a number")?;
        let away: i32 = away.trim().parse().context("away goals must be a number")?;
        Ok((home, away))
    }
}

fn char_to_byte_index(input: &str, char_idx: usize) -> usize {
    input
        .char_indices()
        .nth(char_idx)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

#[derive(Debug)]
enum AppEvent {
    Input(Event),
    Tick,
}

struct UiState {
    status: String,
    should_quit: bool,
    match_cursor: usize,
    team_cursor: usize,
    backup_cursor: usize,
    pending_reset: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            should_quit: false,
            match_cursor: 0,
            team_cursor: 0,
            backup_cursor: 0,
            pending_reset: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }
}

pub struct ElimtuiApp {
    config: AppConfig,
    store: TournamentStore,
    backups: BackupManager,
    backup_entries: Vec<BackupEntry>,
    tab: Tab,
    state: UiState,
    score_prompt: Option<ScorePromptModal>,
    theme: Theme,
}

impl ElimtuiApp {
    pub fn new(config: AppConfig, store: TournamentStore, backups: BackupManager) -> Self {
        Self {
            config,
            store,
            backups,
            backup_entries: Vec::new(),
            tab: Tab::Matches,
            state: UiState::default(),
            score_prompt: None,
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.refresh_backups();
        self.state.set_status(format!(
            "Matchday {} of {TOTAL_MATCHDAYS}",
            self.store.current_matchday()
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }

            match event_rx.recv().await {
                Some(AppEvent::Input(event)) => {
                    if let Err(err) = self.handle_input(event) {
                        self.state.set_status(format!("Error: {err}"));
                    }
                }
                Some(AppEvent::Tick) => {}
                None => break,
            }

            if self.state.should_quit {
                break;
            }
        }

        restore_terminal(&mut terminal)
    }

    fn handle_input(&mut self, event: Event) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != event::KeyEventKind::Press {
            return Ok(());
        }
        if self.score_prompt.is_some() {
            return self.handle_score_prompt_key(key);
        }

        // A pending reset confirmation is cancelled by any key except 'x'.
        if self.state.pending_reset && key.code != KeyCode::Char('x') {
            self.state.pending_reset = false;
            self.state.set_status("Reset cancelled");
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.state.should_quit = true;
                Ok(())
            }
            KeyCode::Tab => {
                self.tab = self.tab.next();
                Ok(())
            }
            KeyCode::BackTab => {
                self.tab = self.tab.prev();
                Ok(())
            }
            KeyCode::Char('1') => {
                self.tab = Tab::Matches;
                Ok(())
            }
            KeyCode::Char('2') => {
                self.tab = Tab::Standings;
                Ok(())
            }
            KeyCode::Char('3') => {
                self.tab = Tab::Points;
                Ok(())
            }
            KeyCode::Char('4') => {
                self.tab = Tab::Backup;
                Ok(())
            }
            _ => match self.tab {
                Tab::Matches => self.handle_matches_key(key),
                Tab::Standings => Ok(()),
                Tab::Points => self.handle_points_key(key),
                Tab::Backup => self.handle_backup_key(key),
            },
        }
    }

    fn handle_matches_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Left => {
                let matchday = self.store.current_matchday().saturating_sub(1).max(1);
                self.store.set_current_matchday(matchday)?;
                self.state.match_cursor = 0;
                self.state
                    .set_status(format!("Matchday {matchday} of {TOTAL_MATCHDAYS}"));
            }
            KeyCode::Right => {
                let matchday = (self.store.current_matchday() + 1).min(TOTAL_MATCHDAYS);
                self.store.set_current_matchday(matchday)?;
                self.state.match_cursor = 0;
                self.state
                    .set_status(format!("Matchday {matchday} of {TOTAL_MATCHDAYS}"));
            }
            KeyCode::Up => {
                self.state.match_cursor = self.state.match_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                let count = self.current_matchday_len();
                if count > 0 {
                    self.state.match_cursor = (self.state.match_cursor + 1).min(count - 1);
                }
            }
            KeyCode::Enter => {
                let selection = self.selected_match().map(|m| {
                    let label = format!(
                        "{} vs {}",
                        self.team_name(&m.home_team),
                        self.team_name(&m.away_team)
                    );
                    (m.id.clone(), label, m.score())
                });
                if let Some((id, label, score)) = selection {
                    self.score_prompt = Some(ScorePromptModal::new(id, label, score));
                }
            }
            KeyCode::Char('u') => {
                let selection = self.selected_match().map(|m| (m.id.clone(), m.played));
                if let Some((id, played)) = selection {
                    if played {
                        self.store.reset_match(&id)?;
                        self.after_mutation();
                        self.state.set_status(format!("Cleared result of {id}"));
                    } else {
                        self.state.set_status("Match has no result to clear");
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_points_key(&mut self, key: KeyEvent) -> Result<()> {
        let delta = match key.code {
            KeyCode::Up => {
                self.state.team_cursor = self.state.team_cursor.saturating_sub(1);
                return Ok(());
            }
            KeyCode::Down => {
                let count = self.store.teams().len();
                if count > 0 {
                    self.state.team_cursor = (self.state.team_cursor + 1).min(count - 1);
                }
                return Ok(());
            }
            KeyCode::Char('+') | KeyCode::Char('=') => 1,
            KeyCode::Char('-') | KeyCode::Char('_') => -1,
            KeyCode::PageUp => 3,
            KeyCode::PageDown => -3,
            _ => return Ok(()),
        };

        let Some(team) = self.store.teams().get(self.state.team_cursor) else {
            return Ok(());
        };
        let team_id = team.id.clone();
        let name = team.name.clone();
        self.store.adjust_points(&team_id, delta)?;
        self.after_mutation();
        let points = self
            .store
            .standings()
            .iter()
            .find(|s| s.team == team_id)
            .map(|s| s.points)
            .unwrap_or(0);
        self.state
            .set_status(format!("{name}: {delta:+} points applied, now at {points}"));
        Ok(())
    }

    fn handle_backup_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Up => {
                self.state.backup_cursor = self.state.backup_cursor.saturating_sub(1);
            }
            KeyCode::Down => {
                if !self.backup_entries.is_empty() {
                    self.state.backup_cursor =
                        (self.state.backup_cursor + 1).min(self.backup_entries.len() - 1);
                }
            }
            KeyCode::Char('e') => {
                let snapshot = self.store.snapshot();
                let path = self.backups.export(&snapshot)?;
                info!(path = %path.display(), "backup exported");
                self.refresh_backups();
                self.state
                    .set_status(format!("Exported backup to {}", path.display()));
            }
            KeyCode::Char('r') => {
                self.refresh_backups();
                self.state
                    .set_status(format!("Found {} backups", self.backup_entries.len()));
            }
            KeyCode::Enter => {
                if let Some(entry) = self.backup_entries.get(self.state.backup_cursor) {
                    let path = entry.path.clone();
                    match self.backups.import(&path) {
                        Ok(snapshot) => {
                            self.store.restore(snapshot);
                            self.after_mutation();
                            self.state.match_cursor = 0;
                            self.state
                                .set_status(format!("Restored backup {}", path.display()));
                        }
                        Err(err) => {
                            error!(?err, "backup import failed");
                            self.state.set_status(format!("Import failed: {err}"));
                        }
                    }
                }
            }
            KeyCode::Char('x') => {
                if self.state.pending_reset {
                    self.state.pending_reset = false;
                    self.store.reset();
                    self.after_mutation();
                    self.state.match_cursor = 0;
                    self.state.set_status("Campaign reset to a fresh fixture list");
                } else {
                    self.state.pending_reset = true;
                    self.state
                        .set_status("Press x again to reset the whole campaign");
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_score_prompt_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(prompt) = self.score_prompt.as_mut() else {
            return Ok(());
        };
        match key.code {
            KeyCode::Esc => {
                self.score_prompt = None;
            }
            KeyCode::Enter => match prompt.parse() {
                Ok((home, away)) => {
                    let match_id = prompt.match_id.clone();
                    self.score_prompt = None;
                    self.store.record_result(&match_id, home, away, true)?;
                    self.after_mutation();
                    self.state
                        .set_status(format!("Recorded {home}-{away} for {match_id}"));
                }
                Err(err) => {
                    self.state.set_status(format!("Invalid score: {err}"));
                }
            },
            KeyCode::Backspace => prompt.backspace(),
            KeyCode::Left => prompt.move_cursor(-1),
            KeyCode::Right => prompt.move_cursor(1),
            KeyCode::Char(ch) => prompt.insert(ch),
            _ => {}
        }
        Ok(())
    }

    fn after_mutation(&mut self) {
        if !self.config.autosave {
            return;
        }
        let snapshot = self.store.snapshot();
        let path = self.config.state_path();
        if let Err(err) = write_snapshot(&path, &snapshot) {
            error!(?err, "autosave failed");
            self.state.set_status(format!("Autosave failed: {err}"));
        }
    }

    fn refresh_backups(&mut self) {
        match self.backups.entries() {
            Ok(entries) => {
                self.backup_entries = entries;
                if self.state.backup_cursor >= self.backup_entries.len() {
                    self.state.backup_cursor = self.backup_entries.len().saturating_sub(1);
                }
            }
            Err(err) => {
                error!(?err, "failed to list backups");
                self.state.set_status(format!("Failed to list backups: {err}"));
            }
        }
    }

    fn current_matchday_len(&self) -> usize {
        self.store
            .matchday_matches(self.store.current_matchday())
            .len()
    }

    fn selected_match(&self) -> Option<&Match> {
        self.store
            .matchday_matches(self.store.current_matchday())
            .into_iter()
            .nth(self.state.match_cursor)
    }

    fn team_name(&self, team_id: &str) -> String {
        self.store
            .team(team_id)
            .map(|team| team.name.clone())
            .unwrap_or_else(|| team_id.to_string())
    }

    fn team_label(&self, team_id: &str) -> String {
        self.store
            .team(team_id)
            .map(|team| format!("{} {}", team.flag, team.name))
            .unwrap_or_else(|| team_id.to_string())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_tab_bar(frame, chunks[0]);
        match self.tab {
            Tab::Matches => self.render_matches(frame, chunks[1]),
            Tab::Standings => self.render_standings(frame, chunks[1]),
            Tab::Points => self.render_points(frame, chunks[1]),
            Tab::Backup => self.render_backup(frame, chunks[1]),
        }
        self.render_status(frame, chunks[2]);

        if let Some(prompt) = self.score_prompt.clone() {
            self.render_score_prompt(frame, &prompt);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = Vec::new();
        for tab in Tab::ALL {
            let style = if tab == self.tab {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.muted)
            };
            spans.push(Span::styled(
                format!(" {} {} ", tab.index() + 1, tab.title()),
                style,
            ));
            spans.push(Span::raw("│"));
        }
        spans.pop();

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Eliminatorias Sudamericanas"),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_matches(&self, frame: &mut Frame, area: Rect) {
        let matchday = self.store.current_matchday();
        let matches = self.store.matchday_matches(matchday);

        let mut lines = vec![
            Line::from(Span::styled(
                format!("◀  Matchday {matchday} / {TOTAL_MATCHDAYS}  ▶"),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (idx, m) in matches.iter().enumerate() {
            let marker = if idx == self.state.match_cursor {
                "▶ "
            } else {
                "  "
            };
            let score = match m.score() {
                Some((home, away)) => format!("{home} - {away}"),
                None => "– : –".to_string(),
            };
            let style = if idx == self.state.match_cursor {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else if m.played {
                Style::default().fg(self.theme.primary_fg)
            } else {
                Style::default().fg(self.theme.muted)
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{marker}{:<18} {score:^7} {}",
                    self.team_label(&m.home_team),
                    self.team_label(&m.away_team)
                ),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "←/→ matchday   ↑/↓ select   Enter score   u clear result",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Fixtures"))
            .alignment(Alignment::Left);
        frame.render_widget(paragraph, area);
    }

    fn render_standings(&self, frame: &mut Frame, area: Rect) {
        let standings = self.store.standings();

        let header = format!(
            "  {:<3}{:<18}{:>3}{:>4}{:>4}{:>4}{:>5}{:>5}{:>6}{:>5}  {}",
            "#", "Team", "P", "W", "D", "L", "GF", "GA", "Diff", "Pts", "Form"
        );
        let mut lines = vec![Line::from(Span::styled(
            header,
            Style::default().add_modifier(Modifier::BOLD),
        ))];

        for (rank, row) in standings.iter().enumerate() {
            let mut spans = vec![Span::styled(
                format!(
                    "  {:<3}{:<18}{:>3}{:>4}{:>4}{:>4}{:>5}{:>5}{:>6}{:>5}  ",
                    rank + 1,
                    self.team_label(&row.team),
                    row.played,
                    row.won,
                    row.drawn,
                    row.lost,
                    row.goals_for,
                    row.goals_against,
                    row.goal_difference,
                    row.points,
                ),
                Style::default().fg(self.theme.primary_fg),
            )];
            for outcome in &row.last_five {
                let color = match outcome {
                    Outcome::Win => self.theme.success,
                    Outcome::Draw => self.theme.warning,
                    Outcome::Loss => self.theme.danger,
                };
                spans.push(Span::styled(
                    format!("{} ", outcome.glyph()),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ));
            }
            if row.manual_adjustment != 0 {
                spans.push(Span::styled(
                    format!(" ({:+})", row.manual_adjustment),
                    Style::default().fg(self.theme.warning),
                ));
            }
            lines.push(Line::from(spans));
        }

        let played: usize = self.store.matches().iter().filter(|m| m.played).count();
        let goals: i32 = self
            .store
            .matches()
            .iter()
            .filter_map(|m| m.score())
            .map(|(home, away)| home + away)
            .sum();
        let leader = standings
            .first()
            .map(|row| self.team_name(&row.team))
            .unwrap_or_default();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "Played {played}/{}   Goals {goals}   Leader: {leader}",
                self.store.matches().len()
            ),
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Table"));
        frame.render_widget(paragraph, area);
    }

    fn render_points(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        for (idx, team) in self.store.teams().iter().enumerate() {
            let row = self.store.standings().iter().find(|s| s.team == team.id);
            let points = row.map(|s| s.points).unwrap_or(0);
            let adjustment = row.map(|s| s.manual_adjustment).unwrap_or(0);
            let marker = if idx == self.state.team_cursor {
                "▶ "
            } else {
                "  "
            };
            let suffix = if adjustment != 0 {
                format!("  (adjusted {adjustment:+})")
            } else {
                String::new()
            };
            let style = if idx == self.state.team_cursor {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{marker}{:<20}{:>4} pts{suffix}",
                    format!("{} {}", team.flag, team.name),
                    points
                ),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "↑/↓ select   +/- adjust by 1   PgUp/PgDn adjust by 3",
            Style::default().fg(self.theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            "Points never drop below zero; adjustments survive recomputes.",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Manual Adjustments"),
        );
        frame.render_widget(paragraph, area);
    }

    fn render_backup(&self, frame: &mut Frame, area: Rect) {
        let mut lines = Vec::new();
        if self.backup_entries.is_empty() {
            lines.push(Line::from(Span::styled(
                "No backups yet. Press e to export the current state.",
                Style::default().fg(self.theme.muted),
            )));
        }
        for (idx, entry) in self.backup_entries.iter().enumerate() {
            let marker = if idx == self.state.backup_cursor {
                "▶ "
            } else {
                "  "
            };
            let name = entry
                .path
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("backup");
            let style = if idx == self.state.backup_cursor {
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.theme.primary_fg)
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{marker}{name}  ({} played, matchday {}, {})",
                    entry.played,
                    entry.current_matchday,
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                ),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Backup directory: {}", self.backups.root().display()),
            Style::default().fg(self.theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            "e export   Enter import selected   r refresh   x reset campaign",
            Style::default().fg(self.theme.muted),
        )));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Backups"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let style = if self.state.pending_reset {
            Style::default().fg(self.theme.danger)
        } else {
            Style::default().fg(self.theme.primary_fg)
        };
        let primary = Line::from(Span::styled(self.state.status.clone(), style));
        let secondary = Line::from(Span::styled(
            "Tab switch view   q quit",
            Style::default().fg(self.theme.muted),
        ));
        let paragraph = Paragraph::new(vec![primary, secondary])
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_score_prompt(&self, frame: &mut Frame, prompt: &ScorePromptModal) {
        let frame_area = frame.size();
        let mut width = cmp::min(52_u16, frame_area.width.saturating_sub(4));
        width = cmp::max(width, 24_u16);
        let height = 7_u16.min(frame_area.height.saturating_sub(2)).max(5_u16);
        let x = frame_area.x + (frame_area.width.saturating_sub(width)) / 2;
        let y = frame_area.y + (frame_area.height.saturating_sub(height)) / 2;
        let area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, area);

        let input_line = Line::from(vec![
            Span::styled("> ", Style::default().fg(self.theme.accent)),
            Span::raw(prompt.input.clone()),
        ]);
        let helper = Line::from(vec![
            Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" record  "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" cancel"),
        ]);

        let paragraph = Paragraph::new(vec![
            Line::from("Score as home-away, e.g. 2-1"),
            input_line,
            Line::from(""),
            helper,
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(prompt.label.clone()),
        )
        .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, area);

        let cursor_x =
            (area.x + 2 + prompt.cursor as u16).min(area.x + area.width.saturating_sub(2));
        let cursor_y = area.y + 2;
        frame.set_cursor(cursor_x, cursor_y);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_prompt_accepts_digits_and_one_dash() {
        let mut prompt = ScorePromptModal::new("match-1".to_string(), "A vs B".to_string(), None);
        for ch in ['2', '-', '1', '-', 'x'] {
            prompt.insert(ch);
        }
        assert_eq!(prompt.input, "2-1");
        assert_eq!(prompt.parse().unwrap(), (2, 1));
    }

    #[test]
    fn score_prompt_prefills_existing_result() {
        let prompt = ScorePromptModal::new(
            "match-9".to_string(),
            "A vs B".to_string(),
            Some((0, 3)),
        );
        assert_eq!(prompt.input, "0-3");
        assert_eq!(prompt.cursor, 3);
    }

    #[test]
    fn score_prompt_rejects_incomplete_input() {
        let mut prompt = ScorePromptModal::new("match-1".to_string(), "A vs B".to_string(), None);
        prompt.insert('4');
        assert!(prompt.parse().is_err());
        prompt.insert('-');
        assert!(prompt.parse().is_err(), "missing away goals");
    }

    #[test]
    fn tabs_cycle_in_both_directions() {
        assert_eq!(Tab::Matches.next(), Tab::Standings);
        assert_eq!(Tab::Backup.next(), Tab::Matches);
        assert_eq!(Tab::Matches.prev(), Tab::Backup);
    }
}

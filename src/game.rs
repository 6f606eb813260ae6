use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::TAU;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::game_mode::GameMode;
use crate::highscores::Highscores;
use crate::target::Target;
use crate::util::{clamp_span, mean, std_dev};

pub const COUNTDOWN_SECS: u64 = 5;
pub const TARGET_RADIUS: f64 = 20.0;
pub const MAX_NAME_LEN: usize = 15;

/// Targets per burst group
pub const BURST_GROUP_SIZE: usize = 3;

const SPAWN_MARGIN: f64 = 30.0;
const BURST_CENTER_MARGIN: f64 = 150.0;
const BURST_CLAMP_MARGIN: f64 = 50.0;
const BURST_MIN_SPEED: i64 = 40;
const BURST_MAX_SPEED: i64 = 100;
const BURST_JITTER: f64 = 5.0;

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    ModeSelect,
    ConfirmClear,
    Countdown,
    Playing,
    Ended,
    NameInput,
}

/// Semantic input, already resolved from raw pointer/key events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    SelectMode(GameMode),
    ClearScores,
    ConfirmClear,
    CancelClear,
    Continue,
    /// Pointer press in arena coordinates
    Shoot { x: f64, y: f64 },
    Char(char),
    Backspace,
    Submit,
}

/// Logical playfield size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Shared geometry of the current group of three burst targets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstGroup {
    pub center: (f64, f64),
    /// Radians in `[0, 2π)`
    pub direction: f64,
    /// Spacing between consecutive targets along `direction`
    pub speed: f64,
}

/// Aggregates over a finished (or in-progress) round
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundSummary {
    pub average: f64,
    pub best: f64,
    pub slowest: f64,
    pub std_dev: f64,
}

/// One player's session: current screen, round counters and the live target
pub struct Game {
    clock: Box<dyn Clock>,
    rng: StdRng,
    arena: Arena,
    screen: Screen,
    mode: GameMode,
    max_clicks: usize,
    score: usize,
    clicks: usize,
    misses: usize,
    reaction_times: Vec<f64>,
    target: Option<Target>,
    target_spawned_at: Duration,
    burst: Option<BurstGroup>,
    countdown_started_at: Duration,
    countdown_remaining: Option<i64>,
    name_input: String,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("screen", &self.screen)
            .field("mode", &self.mode)
            .field("clicks", &self.clicks)
            .field("max_clicks", &self.max_clicks)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub fn new(arena: Arena) -> Self {
        Self::with_parts(arena, Box::new(SystemClock::new()), StdRng::from_entropy())
    }

    pub fn with_parts(arena: Arena, clock: Box<dyn Clock>, rng: StdRng) -> Self {
        Self {
            clock,
            rng,
            arena,
            screen: Screen::ModeSelect,
            mode: GameMode::Normal,
            max_clicks: GameMode::Normal.target_count(),
            score: 0,
            clicks: 0,
            misses: 0,
            reaction_times: Vec::new(),
            target: None,
            target_spawned_at: Duration::ZERO,
            burst: None,
            countdown_started_at: Duration::ZERO,
            countdown_remaining: None,
            name_input: String::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Resize the arena. A live target is pulled back inside the new bounds.
    pub fn set_arena(&mut self, arena: Arena) {
        self.arena = arena;

        if let Some(target) = self.target.as_mut() {
            let x = clamp_span(target.x, target.radius, arena.width - target.radius);
            let y = clamp_span(target.y, target.radius, arena.height - target.radius);
            if (x, y) != (target.x, target.y) {
                debug!("Moved target ({}, {}) -> ({}, {}) after resize", target.x, target.y, x, y);
                target.x = x;
                target.y = y;
            }
        }
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn clicks(&self) -> usize {
        self.clicks
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn max_clicks(&self) -> usize {
        self.max_clicks
    }

    pub fn reaction_times(&self) -> &[f64] {
        &self.reaction_times
    }

    pub fn target(&self) -> Option<&Target> {
        self.target.as_ref()
    }

    pub fn burst_group(&self) -> Option<BurstGroup> {
        self.burst
    }

    /// Whole seconds left on the countdown, while one is running
    pub fn countdown_remaining(&self) -> Option<i64> {
        self.countdown_remaining
    }

    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    /// Mean of the recorded reaction times; 0 before the first hit
    pub fn average_reaction_time(&self) -> f64 {
        mean(&self.reaction_times).unwrap_or(0.0)
    }

    pub fn summary(&self) -> Option<RoundSummary> {
        let average = mean(&self.reaction_times)?;
        let best = self.reaction_times.iter().copied().fold(f64::INFINITY, f64::min);
        let slowest = self.reaction_times.iter().copied().fold(0.0, f64::max);

        Some(RoundSummary {
            average,
            best,
            slowest,
            std_dev: std_dev(&self.reaction_times).unwrap_or(0.0),
        })
    }

    /// Apply one action. Actions that mean nothing on the current screen are
    /// dropped.
    pub fn handle(&mut self, action: Action, scores: &mut Highscores) {
        match (self.screen, action) {
            (Screen::ModeSelect, Action::SelectMode(mode)) => self.start_game(mode),
            (Screen::ModeSelect, Action::ClearScores) => self.screen = Screen::ConfirmClear,
            (Screen::ConfirmClear, Action::ConfirmClear) => {
                if let Err(e) = scores.clear(None) {
                    warn!("Failed to persist cleared highscores: {}", e);
                }
                info!("Cleared all leaderboards");
                self.screen = Screen::ModeSelect;
            }
            (Screen::ConfirmClear, Action::CancelClear) => self.screen = Screen::ModeSelect,
            (Screen::Playing, Action::Shoot { x, y }) => self.shoot(x, y),
            (Screen::Ended, Action::Continue) => {
                self.name_input = scores.last_player().to_string();
                self.screen = Screen::NameInput;
            }
            (Screen::NameInput, Action::Char(c)) => self.type_char(c),
            (Screen::NameInput, Action::Backspace) => {
                self.name_input.pop();
            }
            (Screen::NameInput, Action::Submit) => self.submit(scores),
            (screen, action) => debug!("Ignoring {:?} on {:?}", action, screen),
        }
    }

    /// Advance time-driven state; call once per frame
    pub fn update(&mut self) {
        if self.screen != Screen::Countdown {
            return;
        }

        let elapsed = self.clock.now().saturating_sub(self.countdown_started_at);
        let remaining = COUNTDOWN_SECS as i64 - elapsed.as_secs() as i64;
        self.countdown_remaining = Some(remaining);

        if remaining <= 0 {
            self.screen = Screen::Playing;
            self.generate_target();
        }
    }

    pub fn start_game(&mut self, mode: GameMode) {
        self.reset();
        self.mode = mode;
        self.max_clicks = mode.target_count();
        self.countdown_started_at = self.clock.now();
        self.countdown_remaining = Some(COUNTDOWN_SECS as i64);
        self.screen = Screen::Countdown;

        info!("Starting {} round ({} targets)", mode, self.max_clicks);
    }

    /// Replace the current target with a freshly placed one
    pub fn generate_target(&mut self) {
        let (x, y) = match self.mode {
            GameMode::Burst => self.next_burst_position(),
            GameMode::Quick | GameMode::Normal | GameMode::Extended => (
                self.randint(SPAWN_MARGIN, self.arena.width - SPAWN_MARGIN),
                self.randint(SPAWN_MARGIN, self.arena.height - SPAWN_MARGIN),
            ),
        };

        self.target = Some(Target::new(x, y, TARGET_RADIUS));
        self.target_spawned_at = self.clock.now();
    }

    fn next_burst_position(&mut self) -> (f64, f64) {
        let position = self.clicks % BURST_GROUP_SIZE;

        let group = match self.burst.filter(|_| position != 0) {
            Some(group) => group,
            None => {
                let group = BurstGroup {
                    center: (
                        self.randint(BURST_CENTER_MARGIN, self.arena.width - BURST_CENTER_MARGIN),
                        self.randint(
                            BURST_CENTER_MARGIN,
                            self.arena.height - BURST_CENTER_MARGIN,
                        ),
                    ),
                    direction: self.rng.gen_range(0.0..TAU),
                    speed: self.rng.gen_range(BURST_MIN_SPEED..=BURST_MAX_SPEED) as f64,
                };
                debug!("New burst group {}: {:?}", self.clicks / BURST_GROUP_SIZE, group);
                self.burst = Some(group);
                group
            }
        };

        let (mut x, mut y) = group.center;
        if position != 0 {
            let offset = position as f64 * group.speed;
            x += offset * group.direction.cos() + self.rng.gen_range(-BURST_JITTER..=BURST_JITTER);
            y += offset * group.direction.sin() + self.rng.gen_range(-BURST_JITTER..=BURST_JITTER);
        }

        (
            clamp_span(x, BURST_CLAMP_MARGIN, self.arena.width - BURST_CLAMP_MARGIN),
            clamp_span(y, BURST_CLAMP_MARGIN, self.arena.height - BURST_CLAMP_MARGIN),
        )
    }

    // Uniform integer in [lo, hi]; an empty range yields its midpoint
    fn randint(&mut self, lo: f64, hi: f64) -> f64 {
        let (lo, hi) = (lo.ceil() as i64, hi.floor() as i64);
        if lo > hi {
            ((lo + hi) / 2) as f64
        } else {
            self.rng.gen_range(lo..=hi) as f64
        }
    }

    fn shoot(&mut self, x: f64, y: f64) {
        let Some(target) = self.target else {
            return;
        };

        if !target.is_clicked(x, y) {
            self.misses += 1;
            return;
        }

        let reaction_time = self
            .clock
            .now()
            .saturating_sub(self.target_spawned_at)
            .as_secs_f64();
        self.score += 1;
        self.clicks += 1;
        self.reaction_times.push(reaction_time);

        if self.clicks >= self.max_clicks {
            self.target = None;
            self.screen = Screen::Ended;
            info!(
                "Round over: {} targets, average reaction time {:.3}s",
                self.clicks,
                self.average_reaction_time()
            );
        } else {
            self.generate_target();
        }
    }

    fn type_char(&mut self, c: char) {
        if self.name_input.chars().count() >= MAX_NAME_LEN {
            return;
        }
        if c.is_alphanumeric() || c == ' ' {
            self.name_input.push(c);
        }
    }

    fn submit(&mut self, scores: &mut Highscores) {
        let name = self.name_input.trim();
        if name.is_empty() {
            return;
        }

        if let Err(e) = scores.add_score(name, self.average_reaction_time(), self.mode) {
            warn!("Failed to persist highscore: {}", e);
        }
        self.screen = Screen::ModeSelect;
    }

    fn reset(&mut self) {
        self.score = 0;
        self.clicks = 0;
        self.misses = 0;
        self.reaction_times.clear();
        self.target = None;
        self.burst = None;
        self.countdown_remaining = None;
        self.screen = Screen::ModeSelect;
    }
}

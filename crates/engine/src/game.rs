//! Game state machine - owns the board and drives resolution cycles
//!
//! [`Game`] ties together the grid, the spawner, the palette RNG, scoring and the
//! phase scheduler. The host talks to it through two entry points:
//!
//! - [`Game::on_swap_gesture`]: a swap request, honored only in [`TurnState::Move`]
//! - [`Game::step`]: elapsed time, which runs due phases and eases the display
//!
//! # Cycle
//!
//! ```text
//! swap ─ settle ─ detect ─┬─ no match on either piece ─ revert ─ settle ─ Move
//!                         └─ resolve ─ gravity ─ refill ─ detect ─┬─ matches ─ resolve ...
//!                                                                 └─ none ─ Move
//! ```
//!
//! Only one cycle runs at a time: swaps are rejected while the state is `Wait`.

use log::{debug, trace};

use tui_match3_core::{
    layout, CancelToken, ConfigError, GameConfig, GameSnapshot, Grid, Layout, LayoutError,
    PaletteRng, Piece, PiecePool, PieceRef, PieceTemplate, ScoreKeeper, ScoreTicker, ScoreView,
    Spawner, TickerStatus,
};
use tui_match3_types::{Direction, Position, TurnState, DEFAULT_BLAST_RADIUS};

use crate::error::SetupError;
use crate::event::GameEvent;
use crate::resolve::plan_resolution;
use crate::scheduler::{BombReservation, Scheduler, Step, SwapRecord};

/// A match-3 session.
pub struct Game<S: Spawner = PiecePool> {
    config: GameConfig,
    grid: Grid,
    spawner: S,
    rng: PaletteRng,
    scheduler: Scheduler,
    state: TurnState,
    score: ScoreKeeper,
    ticker: ScoreTicker,
    score_view: Option<Box<dyn ScoreView>>,
    /// Grows until the host calls [`Game::drain_events`]; hosts drain after every step.
    events: Vec<GameEvent>,
    /// Re-detections that found matches in the running cycle.
    cascade: u32,
    started: bool,
}

impl Game<PiecePool> {
    /// Create a game with the pooled spawner. The board stays empty until [`Game::start`].
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_spawner(config, seed, PiecePool::new())
    }

    /// Create a game whose board is given as a text layout (see [`tui_match3_core::layout`]).
    pub fn from_layout(config: GameConfig, text: &str, seed: u64) -> Result<Self, SetupError> {
        Self::from_layout_with_spawner(config, text, seed, PiecePool::new())
    }
}

impl<S: Spawner> Game<S> {
    pub fn with_spawner(config: GameConfig, seed: u64, spawner: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.board_width, config.board_height);

        Ok(Self {
            config,
            grid,
            spawner,
            rng: PaletteRng::new(seed),
            scheduler: Scheduler::new(),
            state: TurnState::Move,
            score: ScoreKeeper::new(),
            ticker: ScoreTicker::new(CancelToken::new()),
            score_view: None,
            events: Vec::new(),
            cascade: 0,
            started: false,
        })
    }

    pub fn from_layout_with_spawner(
        config: GameConfig,
        text: &str,
        seed: u64,
        spawner: S,
    ) -> Result<Self, SetupError> {
        let radius = config
            .palette
            .bomb
            .kind
            .blast_radius()
            .unwrap_or(DEFAULT_BLAST_RADIUS);
        let layout = Layout::parse(text, radius)?;
        let mut game = Self::with_spawner(config, seed, spawner)?;
        game.load_layout(&layout)?;
        Ok(game)
    }

    /// Replace the board with `layout`. The layout must match the board size and
    /// only use kinds the palette can spawn; on error the board is left untouched.
    pub fn load_layout(&mut self, layout: &Layout) -> Result<(), LayoutError> {
        let (board_width, board_height) = (self.grid.width(), self.grid.height());
        if layout.width() != board_width as usize || layout.height() != board_height as usize {
            return Err(LayoutError::SizeMismatch {
                width: layout.width(),
                height: layout.height(),
                board_width,
                board_height,
            });
        }

        let mut placements = Vec::new();
        for (pos, kind) in layout.pieces() {
            let Some(template) = self.config.palette.template_for(&kind).copied() else {
                return Err(LayoutError::UnknownSymbol {
                    symbol: layout::symbol(&kind),
                    row: layout.height() - 1 - pos.y as usize,
                    column: pos.x as usize,
                });
            };
            placements.push((pos, template, kind));
        }

        self.scheduler.clear();
        for piece in self.grid.drain() {
            self.spawner.release(piece);
        }
        for (pos, template, kind) in placements {
            let mut piece = self.spawner.spawn(&template, pos);
            piece.set_bomb_color(kind.logical_color());
            self.place(pos, piece);
        }

        self.state = TurnState::Move;
        self.cascade = 0;
        self.started = true;
        Ok(())
    }

    /// Fill the board, avoiding immediate matches where the palette allows.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;

        let positions: Vec<Position> = self.grid.positions().collect();
        for pos in positions {
            if self.grid.get(pos).is_none() {
                self.spawn_regular(pos);
            }
        }
        debug!(
            "board filled: {}x{}, seed {}",
            self.grid.width(),
            self.grid.height(),
            self.rng.seed()
        );
    }

    /// Drop the board and the score and deal a fresh board from the same RNG stream.
    pub fn restart(&mut self) {
        self.scheduler.clear();
        for piece in self.grid.drain() {
            self.spawner.release(piece);
        }
        self.events.clear();
        self.score.reset();
        self.ticker.reset_to(0.0);
        if let Some(view) = self.score_view.as_mut() {
            view.set_score(0.0);
        }
        self.state = TurnState::Move;
        self.cascade = 0;
        self.started = false;
        self.start();
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Cycle finished and nothing scheduled.
    pub fn is_settled(&self) -> bool {
        self.state == TurnState::Move && self.scheduler.is_idle()
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn displayed_score(&self) -> f32 {
        self.ticker.displayed()
    }

    pub fn cascade(&self) -> u32 {
        self.cascade
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Receiver for the eased score.
    pub fn set_score_view(&mut self, view: Box<dyn ScoreView>) {
        self.score_view = Some(view);
    }

    /// Token that stops score easing. Cancelled automatically when the game is dropped.
    pub fn cancel_token(&self) -> CancelToken {
        self.ticker.token().clone()
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every event reported since the last drain.
    ///
    /// The queue is unbounded: a host that steps the game must drain it regularly
    /// (the terminal runner drains once per tick).
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.write_grid(&self.grid);
        out.score = self.score.total();
        out.displayed_score = self.ticker.displayed();
        out.state = self.state;
        out.cascade = self.cascade;
        out.seed = self.rng.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Swap the piece at `from` with its neighbor in `direction`.
    ///
    /// Returns false, changing nothing, while a cycle is running, when either cell is
    /// off the board, or when either cell is empty.
    pub fn on_swap_gesture(&mut self, from: Position, direction: Direction) -> bool {
        if self.state != TurnState::Move {
            trace!("swap at {from:?} ignored: game is waiting");
            return false;
        }

        let to = from.offset(direction);
        if !self.grid.contains(from) || !self.grid.contains(to) {
            return false;
        }
        let (Some(moved), Some(other)) = (
            self.grid.get(from).map(Piece::handle),
            self.grid.get(to).map(Piece::handle),
        ) else {
            return false;
        };
        if !self.grid.swap(from, to) {
            return false;
        }

        self.state = TurnState::Wait;
        self.cascade = 0;
        self.events.push(GameEvent::Swapped { from, to });
        self.scheduler.push(Step::Pause(self.config.swap_settle_ms));
        self.scheduler
            .push(Step::CheckSwap(SwapRecord { moved, other, to }));
        true
    }

    /// Start a cycle for matches already on the board (no swap involved).
    ///
    /// Returns false when the game is waiting or the board holds no match.
    pub fn resolve_board(&mut self) -> bool {
        if self.state != TurnState::Move {
            return false;
        }
        let count = self.grid.find_all_matches().len();
        if count == 0 {
            return false;
        }

        self.state = TurnState::Wait;
        self.cascade = 0;
        self.events.push(GameEvent::MatchesFound { count, cascade: 0 });
        self.scheduler.push(Step::Resolve);
        true
    }

    /// Advance by `dt_ms` milliseconds.
    ///
    /// Runs every step whose pause has elapsed, then eases piece display positions
    /// and the displayed score.
    pub fn step(&mut self, dt_ms: u32) {
        let mut budget = dt_ms;
        while let Some(step) = self.scheduler.next(&mut budget) {
            self.apply_step(step);
        }

        let dt = dt_ms as f32 / 1000.0;
        let factor = self.config.piece_speed * dt;
        for piece in self.grid.pieces_mut() {
            piece.ease(factor);
        }
        self.tick_score(self.config.score_animation_speed * dt);
    }

    /// Run everything scheduled, ignoring pauses, and snap pieces onto their cells.
    pub fn run_until_settled(&mut self) {
        while let Some(step) = self.scheduler.next_immediate() {
            self.apply_step(step);
        }
        for piece in self.grid.pieces_mut() {
            piece.snap();
        }
    }

    /// Execute one step now.
    pub fn apply_step(&mut self, step: Step) {
        trace!("step {step:?}");
        match step {
            Step::Pause(ms) => self.scheduler.push_front(Step::Pause(ms)),
            Step::CheckSwap(record) => self.check_swap(record),
            Step::Resolve => self.resolve(),
            Step::Destroy(targets) => {
                for handle in targets {
                    if self.grid.resolve(handle).is_some() {
                        self.destroy_at(handle.position);
                    }
                }
            }
            Step::Blast {
                center,
                radius,
                spare,
            } => {
                for pos in self.grid.blast_area(center, radius) {
                    if pos != center && Some(pos) != spare {
                        self.destroy_at(pos);
                    }
                }
            }
            Step::ClearBoard => {
                self.events.push(GameEvent::BoardCleared);
                let positions: Vec<Position> = self.grid.positions().collect();
                for pos in positions {
                    self.destroy_at(pos);
                }
            }
            Step::CreateBomb(reservation) => self.create_bomb(reservation),
            Step::Collapse => {
                if let Some(fall) = self.grid.collapse_step() {
                    self.events.push(GameEvent::PieceFell(fall));
                    self.scheduler.push_front(Step::Collapse);
                    self.scheduler
                        .push_front(Step::Pause(self.config.gravity_step_delay_ms));
                }
            }
            Step::Refill => {
                let Some(pos) = self.grid.empty_cells().next() else {
                    return;
                };
                if let Some(handle) = self.spawn_regular(pos) {
                    if let Some(piece) = self.grid.resolve(handle) {
                        self.events.push(GameEvent::PieceSpawned {
                            id: piece.id,
                            position: pos,
                            kind: piece.kind,
                        });
                    }
                    self.scheduler.push_front(Step::Refill);
                    self.scheduler
                        .push_front(Step::Pause(self.config.gravity_step_delay_ms));
                }
            }
            Step::Redetect => {
                let count = self.grid.find_all_matches().len();
                self.scheduler.push(Step::Pause(self.config.refill_settle_ms));
                if count > 0 {
                    self.cascade += 1;
                    debug!("cascade {}: {count} matched after refill", self.cascade);
                    self.events.push(GameEvent::MatchesFound {
                        count,
                        cascade: self.cascade,
                    });
                    self.scheduler.push(Step::Resolve);
                } else {
                    self.scheduler.push(Step::Settle);
                }
            }
            Step::Settle => {
                self.state = TurnState::Move;
                self.events.push(GameEvent::Settled {
                    cascades: self.cascade,
                });
                if self.cascade > 0 {
                    debug!("cycle settled after {} cascades", self.cascade);
                }
                self.cascade = 0;
            }
        }
    }

    fn check_swap(&mut self, record: SwapRecord) {
        let count = self.grid.find_all_matches().len();
        let from = record.moved.position;
        let moved = PieceRef {
            id: record.moved.id,
            position: record.to,
        };
        let other = PieceRef {
            id: record.other.id,
            position: from,
        };
        let is_matched = |grid: &Grid, handle| grid.resolve(handle).is_some_and(|p| p.is_matched);

        if is_matched(&self.grid, moved) || is_matched(&self.grid, other) {
            self.events.push(GameEvent::MatchesFound { count, cascade: 0 });
            self.scheduler.push(Step::Resolve);
            return;
        }

        trace!("swap {from:?} <-> {:?} made no match; reverting", record.to);
        self.grid.swap(record.to, from);
        self.grid.clear_match_flags();
        self.events.push(GameEvent::SwapReverted {
            from,
            to: record.to,
        });
        self.scheduler.push(Step::Pause(self.config.swap_settle_ms));
        self.scheduler.push(Step::Settle);
    }

    fn resolve(&mut self) {
        let plan = plan_resolution(&self.grid, &self.config);
        debug!(
            "cascade {}: resolving {} regular, {} bombs{}",
            self.cascade,
            plan.regular,
            plan.bombs,
            if plan.is_double_bomb() {
                " (double bomb)"
            } else {
                ""
            }
        );

        let config = &self.config;
        self.scheduler.extend(plan.steps);
        self.scheduler.extend([
            Step::Pause(config.gravity_start_delay_ms),
            Step::Collapse,
            Step::Pause(config.refill_settle_ms),
            Step::Refill,
            Step::Pause(config.refill_settle_ms),
            Step::Redetect,
        ]);
    }

    fn create_bomb(&mut self, reservation: BombReservation) {
        let BombReservation { at, color } = reservation;
        // The source piece makes way without scoring.
        if let Some(source) = self.grid.take(at) {
            self.spawner.release(source);
        }

        let template = self.config.palette.bomb;
        let mut bomb = self.spawner.spawn(&template, at);
        bomb.set_bomb_color(color);
        self.place(at, bomb);

        debug!("bomb created at ({}, {}) with color {color:?}", at.x, at.y);
        self.events.push(GameEvent::BombCreated {
            position: at,
            color,
        });
    }

    /// Remove the piece at `pos`, score it and hand it back to the spawner.
    fn destroy_at(&mut self, pos: Position) -> bool {
        let Some(piece) = self.grid.take(pos) else {
            return false;
        };
        let delta = self.score.award(&piece);
        self.events.push(GameEvent::PieceDestroyed {
            id: piece.id,
            position: pos,
            kind: piece.kind,
        });
        self.events.push(GameEvent::ScoreDelta(delta));
        self.spawner.release(piece);
        true
    }

    /// Uniform palette pick, resampled while it would complete a match at `pos`.
    fn pick_template(&mut self, pos: Position) -> Option<PieceTemplate> {
        let palette = &self.config.palette.regular;
        let mut index = self.rng.pick(palette.len());
        let mut retries = 0;
        while retries < self.config.spawn_retry_limit
            && self.grid.matches_at(pos, &palette.get(index)?.kind)
        {
            index = self.rng.pick(palette.len());
            retries += 1;
        }
        let template = palette.get(index).copied()?;
        if self.grid.matches_at(pos, &template.kind) {
            trace!("no match-free pick at ({}, {}); spawning anyway", pos.x, pos.y);
        }
        Some(template)
    }

    fn spawn_regular(&mut self, pos: Position) -> Option<PieceRef> {
        let template = self.pick_template(pos)?;
        let piece = self.spawner.spawn(&template, pos);
        Some(self.place(pos, piece))
    }

    /// Put a freshly spawned piece on the board, `drop_height` rows above its cell on
    /// screen. A displaced piece goes back to the spawner.
    fn place(&mut self, pos: Position, mut piece: Piece) -> PieceRef {
        piece.display.y += self.config.drop_height as f32;
        let handle = PieceRef { id: piece.id, position: pos };
        if let Some(displaced) = self.grid.set(pos, piece) {
            self.spawner.release(displaced);
        }
        handle
    }

    fn tick_score(&mut self, max_delta: f32) {
        match self.ticker.advance(self.score.total(), max_delta) {
            TickerStatus::Running(value) | TickerStatus::Finished(value) => {
                if let Some(view) = self.score_view.as_mut() {
                    view.set_score(value);
                }
            }
            TickerStatus::Idle | TickerStatus::Cancelled => {}
        }
    }
}

impl<S: Spawner> Drop for Game<S> {
    fn drop(&mut self) {
        self.ticker.token().cancel();
    }
}

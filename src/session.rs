use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::audio::{AudioEvent, AudioSink};
use crate::clock::{self, GameClock};
use crate::config::INITIAL_SNAKE_LENGTH;
use crate::food::spawn_food;
use crate::grid::{Grid, Position};
use crate::input::Direction;
use crate::score::ScoreStore;
use crate::snake::Snake;

/// Lifecycle state of one game session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum SessionStatus {
    /// Before the first start. Nothing ticks.
    Idle,
    /// The clock is armed and ticks mutate the board.
    Running,
    /// The clock is stopped; board state is frozen, not reset.
    Paused,
    /// Terminal until an explicit restart.
    Ended,
}

/// Outcome of a grid-size change request.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GridSizeChange {
    /// The new size is in effect now.
    Applied,
    /// The board is in play; the size takes effect on the next start.
    Deferred,
}

/// Read-only view of the board handed to the renderer each frame.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: Grid,
    pub snake: &'a Snake,
    pub food: Position,
    pub score: u32,
    pub direction: Direction,
    pub status: SessionStatus,
}

/// One complete game session: state machine, board, clock, and ports.
///
/// The session exclusively owns the snake, the food, the score, and the
/// tick interval; all of them are recreated by `start`. Everything runs on
/// the caller's thread, driven by `poll`.
#[derive(Debug)]
pub struct GameSession<S, A> {
    status: SessionStatus,
    grid: Grid,
    pending_grid: Option<Grid>,
    pub snake: Snake,
    pub food: Position,
    score: u32,
    high_score: u32,
    plays: u32,
    clock: GameClock,
    rng: StdRng,
    store: S,
    audio: A,
}

impl<S: ScoreStore, A: AudioSink> GameSession<S, A> {
    /// Creates an idle session on a `grid_size`-per-side board.
    pub fn new(grid_size: u16, store: S, audio: A) -> Self {
        Self::build(grid_size, StdRng::from_entropy(), store, audio)
    }

    /// Creates a deterministic session for tests and reproducible runs.
    pub fn new_with_seed(grid_size: u16, seed: u64, store: S, audio: A) -> Self {
        Self::build(grid_size, StdRng::seed_from_u64(seed), store, audio)
    }

    fn build(grid_size: u16, mut rng: StdRng, mut store: S, audio: A) -> Self {
        let high_score = store.load().unwrap_or(0);
        let grid = Grid::new(grid_size);
        let snake = starting_snake(grid);
        let food = spawn_food(&mut rng, grid, &snake);

        Self {
            status: SessionStatus::Idle,
            grid,
            pending_grid: None,
            snake,
            food,
            score: 0,
            high_score,
            plays: 0,
            clock: GameClock::new(),
            rng,
            store,
            audio,
        }
    }

    /// Begins a fresh session: Idle or Ended becomes Running.
    ///
    /// Applies any deferred grid size, zeroes the score, rebuilds the snake
    /// centered and heading right, resets the interval to base, spawns
    /// food, and arms the clock. No-op while Running or Paused.
    pub fn start(&mut self, now: Instant) {
        if matches!(self.status, SessionStatus::Running | SessionStatus::Paused) {
            return;
        }

        if let Some(grid) = self.pending_grid.take() {
            self.grid = grid;
        }

        self.score = 0;
        self.snake = starting_snake(self.grid);
        self.clock.reset();
        self.food = spawn_food(&mut self.rng, self.grid, &self.snake);
        self.clock.start(now);
        self.plays += 1;
        self.status = SessionStatus::Running;
        self.audio.play(AudioEvent::Start);
    }

    /// Freezes the board: Running becomes Paused. Idempotent no-op otherwise.
    pub fn pause(&mut self) {
        if self.status != SessionStatus::Running {
            return;
        }

        self.clock.stop();
        self.status = SessionStatus::Paused;
        self.audio.play(AudioEvent::Pause);
    }

    /// Resumes a paused session. The next tick is a full interval away;
    /// wall-clock time spent paused is not owed back.
    pub fn resume(&mut self, now: Instant) {
        if self.status != SessionStatus::Paused {
            return;
        }

        self.clock.start(now);
        self.status = SessionStatus::Running;
        self.audio.play(AudioEvent::Resume);
    }

    /// Ends the session: Running or Paused becomes Ended.
    ///
    /// Stops the clock and persists the high score best-effort through the
    /// store port. Idempotent no-op in Idle and Ended.
    pub fn end(&mut self) {
        if !matches!(self.status, SessionStatus::Running | SessionStatus::Paused) {
            return;
        }

        self.clock.stop();
        self.status = SessionStatus::Ended;
        self.persist_high_score();
        self.audio.play(AudioEvent::GameOver);
    }

    /// Ends the current session if needed, then starts a fresh one.
    pub fn restart(&mut self, now: Instant) {
        self.end();
        self.start(now);
    }

    /// Records a requested direction change. Accepted only while Running.
    pub fn buffer_direction(&mut self, direction: Direction) {
        if self.status != SessionStatus::Running {
            return;
        }

        self.snake.buffer_direction(direction);
    }

    /// Requests a board-size change.
    ///
    /// Applied immediately while Idle or Ended (the preview board is
    /// rebuilt to match); deferred to the next start while the board is in
    /// play, and the caller is told which happened.
    pub fn set_grid_size(&mut self, size: u16) -> GridSizeChange {
        let grid = Grid::new(size);
        match self.status {
            SessionStatus::Running | SessionStatus::Paused => {
                self.pending_grid = Some(grid);
                GridSizeChange::Deferred
            }
            SessionStatus::Idle | SessionStatus::Ended => {
                // A newer request supersedes any change still pending.
                self.pending_grid = None;
                self.grid = grid;
                self.snake = starting_snake(grid);
                self.food = spawn_food(&mut self.rng, grid, &self.snake);
                GridSizeChange::Applied
            }
        }
    }

    /// Drives the clock; runs one tick when due. Returns true when the
    /// board advanced.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }

        if !self.clock.poll(now) {
            return false;
        }

        self.tick(now);
        true
    }

    /// Advances the simulation by one tick. No-op unless Running.
    pub fn tick(&mut self, now: Instant) {
        if self.status != SessionStatus::Running {
            return;
        }

        let direction = self.snake.resolve_direction();
        let new_head = self.snake.next_head(direction);

        if !self.grid.in_bounds(new_head) || self.snake.occupies(new_head) {
            self.end();
            return;
        }

        if new_head == self.food {
            self.score += 1;
            self.snake.grow(new_head);
            self.food = spawn_food(&mut self.rng, self.grid, &self.snake);
            self.audio.play(AudioEvent::FoodEaten);

            if clock::is_speed_step(self.score) {
                let next = clock::stepped_interval(self.clock.interval());
                self.clock.set_interval(next, now);
            }
        } else {
            self.snake.advance(new_head);
        }
    }

    /// Returns the read-only per-frame view for the renderer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            score: self.score,
            direction: self.snake.direction(),
            status: self.status,
        }
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Returns the food eaten this session.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Returns the best score seen, including the persisted one.
    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Returns how many sessions have been started this process.
    #[must_use]
    pub fn plays(&self) -> u32 {
        self.plays
    }

    /// Returns the active board.
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Returns the current tick interval.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.clock.interval()
    }

    /// Returns the lowest interval ever active this session.
    #[must_use]
    pub fn min_interval_seen(&self) -> Duration {
        self.clock.min_interval_seen()
    }

    /// Returns the pace label for the current interval.
    #[must_use]
    pub fn speed_label(&self) -> &'static str {
        clock::speed_label(self.clock.interval())
    }

    /// Returns the audio sink for sink-specific controls such as muting.
    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    /// Returns the audio sink.
    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    fn persist_high_score(&mut self) {
        if self.score <= self.high_score {
            return;
        }

        self.high_score = self.score;
        if let Err(error) = self.store.save(self.high_score) {
            eprintln!("Failed to save high score: {error}");
        }
    }
}

/// Builds the session-start snake: three segments laid out horizontally,
/// centered on the board, heading right.
fn starting_snake(grid: Grid) -> Snake {
    let center = grid.center();
    Snake::new(
        Position {
            x: center.x - 1,
            y: center.y,
        },
        INITIAL_SNAKE_LENGTH,
        Direction::Right,
    )
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;
    use std::time::{Duration, Instant};

    use crate::audio::{AudioEvent, AudioSink};
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::score::ScoreStore;
    use crate::snake::Snake;

    use super::{GameSession, GridSizeChange, SessionStatus};

    #[derive(Debug, Default, Clone)]
    struct MemoryStore {
        stored: u32,
        fail_saves: bool,
        saves: Rc<RefCell<Vec<u32>>>,
    }

    impl ScoreStore for MemoryStore {
        fn load(&mut self) -> io::Result<u32> {
            Ok(self.stored)
        }

        fn save(&mut self, score: u32) -> io::Result<()> {
            if self.fail_saves {
                return Err(io::Error::new(io::ErrorKind::Other, "store offline"));
            }
            self.saves.borrow_mut().push(score);
            Ok(())
        }
    }

    #[derive(Debug, Default, Clone)]
    struct RecordingAudio {
        events: Rc<RefCell<Vec<AudioEvent>>>,
    }

    impl AudioSink for RecordingAudio {
        fn play(&mut self, event: AudioEvent) {
            self.events.borrow_mut().push(event);
        }
    }

    fn session_at(
        grid_size: u16,
        seed: u64,
    ) -> (GameSession<MemoryStore, RecordingAudio>, Instant) {
        let session = GameSession::new_with_seed(
            grid_size,
            seed,
            MemoryStore::default(),
            RecordingAudio::default(),
        );
        (session, Instant::now())
    }

    fn tick_n(session: &mut GameSession<MemoryStore, RecordingAudio>, now: &mut Instant, n: u32) {
        for _ in 0..n {
            *now += session.interval();
            assert!(session.poll(*now), "a tick should be due");
        }
    }

    #[test]
    fn session_starts_idle_and_ticks_only_while_running() {
        let (mut session, t0) = session_at(20, 1);

        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.poll(t0 + Duration::from_secs(5)));

        session.start(t0);
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.snake.head(), Position { x: 9, y: 10 });
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.plays(), 1);
    }

    #[test]
    fn food_on_the_path_is_eaten_on_the_third_tick() {
        // Scenario: 20x20 board, snake [(9,10),(8,10),(7,10)] heading right,
        // food at (12,10).
        let (mut session, t0) = session_at(20, 7);
        session.start(t0);
        session.food = Position { x: 12, y: 10 };

        let mut now = t0;
        tick_n(&mut session, &mut now, 3);

        assert_eq!(session.snake.head(), Position { x: 12, y: 10 });
        assert_eq!(session.score(), 1);
        assert_eq!(session.snake.len(), 4);
        assert!(!session.snake.occupies(session.food));
        assert!(
            session
                .audio()
                .events
                .borrow()
                .contains(&AudioEvent::FoodEaten)
        );
    }

    #[test]
    fn illegal_reverse_keeps_the_applied_direction() {
        let (mut session, t0) = session_at(20, 2);
        session.start(t0);
        session.food = Position { x: 0, y: 0 };

        session.buffer_direction(Direction::Left);
        let mut now = t0;
        tick_n(&mut session, &mut now, 1);

        assert_eq!(session.snake.head(), Position { x: 10, y: 10 });
        assert_eq!(session.snapshot().direction, Direction::Right);
    }

    #[test]
    fn wall_collision_ends_the_session_and_persists_the_score() {
        let (mut session, t0) = session_at(20, 3);
        let saves = session.store.saves.clone();
        session.start(t0);
        session.snake = Snake::from_segments(
            vec![
                Position { x: 0, y: 5 },
                Position { x: 1, y: 5 },
                Position { x: 2, y: 5 },
            ],
            Direction::Left,
        );
        session.food = Position { x: 0, y: 6 };
        session.buffer_direction(Direction::Down);

        // Eat at (0,6), then head for the wall.
        let mut now = t0;
        tick_n(&mut session, &mut now, 1);
        assert_eq!(session.score(), 1);

        session.buffer_direction(Direction::Left);
        session.food = Position { x: 19, y: 19 };
        now += session.interval();
        assert!(session.poll(now));

        assert_eq!(session.status(), SessionStatus::Ended);
        assert_eq!(session.high_score(), 1);
        assert_eq!(*saves.borrow(), vec![1]);

        // Ended is terminal: further polls do nothing.
        assert!(!session.poll(now + Duration::from_secs(1)));
    }

    #[test]
    fn self_collision_ends_the_session() {
        let (mut session, t0) = session_at(20, 4);
        session.start(t0);
        // Head at (5,5) moving left runs straight into the neck at (4,5).
        session.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 4, y: 6 },
                Position { x: 5, y: 6 },
                Position { x: 6, y: 6 },
            ],
            Direction::Left,
        );

        let mut now = t0;
        now += session.interval();
        assert!(session.poll(now));

        assert_eq!(session.status(), SessionStatus::Ended);
    }

    #[test]
    fn moving_into_the_current_tail_cell_is_fatal() {
        let (mut session, t0) = session_at(20, 11);
        session.start(t0);
        // 2x2 loop: head at (5,5), tail at (5,6) is the next cell down.
        session.snake = Snake::from_segments(
            vec![
                Position { x: 5, y: 5 },
                Position { x: 4, y: 5 },
                Position { x: 4, y: 6 },
                Position { x: 5, y: 6 },
            ],
            Direction::Right,
        );
        session.buffer_direction(Direction::Down);
        session.food = Position { x: 0, y: 0 };

        let mut now = t0;
        now += session.interval();
        assert!(session.poll(now));

        assert_eq!(session.status(), SessionStatus::Ended);
    }

    #[test]
    fn speed_ramps_every_third_point_down_to_the_floor() {
        let (mut session, t0) = session_at(20, 5);
        session.start(t0);
        assert_eq!(session.interval(), Duration::from_millis(140));

        let mut now = t0;
        let mut heading = Direction::Right;
        let mut fed = 0;
        // Feed the snake by always planting food directly ahead, steering
        // along the board edge so the growing body never blocks the path.
        while session.interval() > Duration::from_millis(50) {
            session.food = session.snake.head().step(heading);
            tick_n(&mut session, &mut now, 1);
            fed += 1;
            assert_eq!(session.score(), fed);

            match fed {
                3 => assert_eq!(session.interval(), Duration::from_millis(134)),
                6 => assert_eq!(session.interval(), Duration::from_millis(128)),
                _ => {}
            }

            heading = steered_heading(session.snake.head(), heading, session.grid().size());
            session.buffer_direction(heading);
        }

        assert_eq!(session.interval(), Duration::from_millis(50));
        assert_eq!(session.min_interval_seen(), Duration::from_millis(50));
        assert_eq!(session.speed_label(), "Fast");
    }

    #[test]
    fn pause_is_idempotent_and_resume_requires_paused() {
        let (mut session, t0) = session_at(20, 6);
        session.start(t0);

        session.pause();
        assert_eq!(session.status(), SessionStatus::Paused);
        session.pause();
        assert_eq!(session.status(), SessionStatus::Paused);

        // No ticks while paused, no matter how long.
        assert!(!session.poll(t0 + Duration::from_secs(60)));

        let resume_at = t0 + Duration::from_secs(60);
        session.resume(resume_at);
        assert_eq!(session.status(), SessionStatus::Running);
        // Next tick is a full interval after the resume instant.
        assert!(!session.poll(resume_at + Duration::from_millis(139)));
        assert!(session.poll(resume_at + Duration::from_millis(140)));

        // Resume outside Paused is a no-op.
        session.resume(resume_at);
        assert_eq!(session.status(), SessionStatus::Running);
    }

    #[test]
    fn buffering_is_ignored_outside_running() {
        let (mut session, t0) = session_at(20, 8);

        session.buffer_direction(Direction::Up);
        session.start(t0);
        assert_eq!(session.snapshot().direction, Direction::Right);

        session.pause();
        session.buffer_direction(Direction::Up);
        session.resume(t0);

        let mut now = t0;
        tick_n(&mut session, &mut now, 1);
        assert_eq!(session.snapshot().direction, Direction::Right);
    }

    #[test]
    fn grid_change_defers_while_in_play() {
        let (mut session, t0) = session_at(20, 9);
        session.start(t0);

        assert_eq!(session.set_grid_size(12), GridSizeChange::Deferred);
        assert_eq!(session.grid().size(), 20);

        session.pause();
        assert_eq!(session.set_grid_size(16), GridSizeChange::Deferred);
        assert_eq!(session.grid().size(), 20);

        session.end();
        session.start(t0);
        assert_eq!(session.grid().size(), 16);
        assert_eq!(session.snake.head(), Position { x: 7, y: 8 });
    }

    #[test]
    fn grid_change_applies_immediately_while_idle() {
        let (mut session, _) = session_at(20, 10);

        assert_eq!(session.set_grid_size(26), GridSizeChange::Applied);
        assert_eq!(session.grid().size(), 26);
        assert!(session.grid().in_bounds(session.food));
    }

    #[test]
    fn restart_resets_score_interval_and_board() {
        let (mut session, t0) = session_at(20, 12);
        session.start(t0);
        session.food = Position { x: 12, y: 10 };

        let mut now = t0;
        tick_n(&mut session, &mut now, 3);
        assert_eq!(session.score(), 1);

        session.restart(now);
        assert_eq!(session.status(), SessionStatus::Running);
        assert_eq!(session.score(), 0);
        assert_eq!(session.interval(), Duration::from_millis(140));
        assert_eq!(session.snake.len(), 3);
        assert_eq!(session.plays(), 2);
    }

    #[test]
    fn failing_store_does_not_interrupt_the_session() {
        let store = MemoryStore {
            stored: 0,
            fail_saves: true,
            saves: Rc::new(RefCell::new(Vec::new())),
        };
        let mut session =
            GameSession::new_with_seed(20, 13, store, RecordingAudio::default());
        let t0 = Instant::now();

        session.start(t0);
        session.food = Position { x: 12, y: 10 };
        let mut now = t0;
        tick_n(&mut session, &mut now, 3);

        session.end();
        assert_eq!(session.status(), SessionStatus::Ended);
        // In-memory display still reflects the session's best.
        assert_eq!(session.high_score(), 1);
    }

    #[test]
    fn lower_score_does_not_overwrite_the_stored_best() {
        let store = MemoryStore {
            stored: 10,
            fail_saves: false,
            saves: Rc::new(RefCell::new(Vec::new())),
        };
        let saves = store.saves.clone();
        let mut session =
            GameSession::new_with_seed(20, 14, store, RecordingAudio::default());
        let t0 = Instant::now();

        session.start(t0);
        session.food = Position { x: 12, y: 10 };
        let mut now = t0;
        tick_n(&mut session, &mut now, 3);
        session.end();

        assert_eq!(session.score(), 1);
        assert_eq!(session.high_score(), 10);
        assert!(saves.borrow().is_empty());
    }

    // Keeps the feeding loop inside the board by turning before the edge.
    fn steered_heading(head: Position, heading: Direction, size: u16) -> Direction {
        let size = i32::from(size);
        match heading {
            Direction::Right if head.x >= size - 2 => Direction::Down,
            Direction::Down if head.y >= size - 2 => Direction::Left,
            Direction::Left if head.x <= 1 => Direction::Up,
            Direction::Up if head.y <= 1 => Direction::Right,
            other => other,
        }
    }
}

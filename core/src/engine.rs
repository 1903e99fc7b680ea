use core::time::Duration;
use rand::prelude::*;
use serde::Serialize;
use smallvec::SmallVec;

use crate::*;

/// How long a mismatched pair stays face up before turning back.
pub const MISMATCH_RESET_DELAY: Duration = Duration::from_millis(1000);

/// Period of the elapsed-time counter.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

const fn as_millis(duration: Duration) -> Millis {
    duration.as_millis() as Millis
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Idle,
    Playing,
    Paused,
    Won,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won)
    }

    pub const fn name(self) -> &'static str {
        use GameStatus::*;
        match self {
            Idle => "idle",
            Playing => "playing",
            Paused => "paused",
            Won => "won",
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Counter bumped every time a session is replaced. Deferred work carries the
/// generation it was scheduled under and is dropped once that is outdated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Generation(u64);

impl Generation {
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum FlipOutcome {
    NoChange,
    Flipped,
    Matched,
    Mismatched,
    Won,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        use FlipOutcome::*;
        match self {
            NoChange => false,
            Flipped => true,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }

    pub const fn name(self) -> &'static str {
        use FlipOutcome::*;
        match self {
            NoChange => "noChange",
            Flipped => "flipped",
            Matched => "matched",
            Mismatched => "mismatched",
            Won => "won",
        }
    }
}

/// State of the game in progress, as handed to the presentation shell.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    cards: Vec<Card>,
    flipped_cards: SmallVec<[CardId; 2]>,
    matched_pairs: Vec<PairId>,
    moves: u32,
    score: u32,
    status: GameStatus,
    start_time: Option<Millis>,
    end_time: Option<Millis>,
    difficulty: Difficulty,
}

impl Session {
    fn idle(difficulty: Difficulty) -> Self {
        Self {
            cards: Vec::new(),
            flipped_cards: SmallVec::new(),
            matched_pairs: Vec::new(),
            moves: 0,
            score: 0,
            status: GameStatus::Idle,
            start_time: None,
            end_time: None,
            difficulty,
        }
    }

    fn new(difficulty: Difficulty, cards: Vec<Card>) -> Self {
        Self {
            cards,
            status: GameStatus::Playing,
            ..Self::idle(difficulty)
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    pub fn flipped_cards(&self) -> &[CardId] {
        &self.flipped_cards
    }

    pub fn matched_pairs(&self) -> &[PairId] {
        &self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn start_time(&self) -> Option<Millis> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<Millis> {
        self.end_time
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn total_pairs(&self) -> u16 {
        self.difficulty.pairs()
    }

    /// Whole seconds from the first flip to the winning flip.
    pub fn completion_secs(&self) -> Option<u32> {
        let start = self.start_time?;
        let end = self.end_time?;
        let secs = end.saturating_sub(start) / as_millis(Duration::from_secs(1));
        Some(secs.try_into().unwrap_or(u32::MAX))
    }

    fn index_of(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

/// Stats reported once a won session is finalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub difficulty: Difficulty,
    pub moves: u32,
    pub elapsed_secs: u32,
    pub score: u32,
    pub accuracy: u8,
    pub is_new_record: bool,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum DeferredAction {
    Tick,
    HideMismatch([CardId; 2]),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Deferred {
    due: Millis,
    generation: Generation,
    action: DeferredAction,
}

/// Owns the current session and applies the rules of play.
///
/// Time never advances on its own: the embedder calls [`GameEngine::run_due`]
/// whenever [`GameEngine::next_deadline`] has passed, which applies pending
/// mismatch resets and elapsed-time ticks.
pub struct GameEngine<S, C> {
    store: S,
    clock: C,
    rng: SmallRng,
    session: Session,
    generation: Generation,
    elapsed_secs: u32,
    pending: Vec<Deferred>,
}

impl<S: HighScoreStore, C: Clock> GameEngine<S, C> {
    pub fn new(store: S, clock: C, seed: u64) -> Result<Self> {
        validate_configs()?;
        Ok(Self {
            store,
            clock,
            rng: SmallRng::seed_from_u64(seed),
            session: Session::idle(Difficulty::default()),
            generation: Generation::default(),
            elapsed_secs: 0,
            pending: Vec::new(),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Seconds counted by the ticker while playing.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn high_scores(&self) -> HighScores {
        self.store.load()
    }

    pub fn start_new_game(&mut self, difficulty: Difficulty) {
        self.generation = self.generation.next();
        let seed: u64 = self.rng.random();
        let cards = RandomBoardGenerator::new(seed).generate(difficulty);

        self.session = Session::new(difficulty, cards);
        self.elapsed_secs = 0;
        log::debug!(
            "New {} game (generation {}, seed {}), {} deferred actions outstanding",
            difficulty,
            self.generation.0,
            seed,
            self.pending.len()
        );
    }

    pub fn flip_card(&mut self, card_id: CardId) -> FlipOutcome {
        if !self.session.status.is_playing() || self.session.flipped_cards.len() >= 2 {
            return FlipOutcome::NoChange;
        }

        let Some(index) = self.session.index_of(card_id) else {
            log::trace!("Ignoring flip of unknown card {}", card_id);
            return FlipOutcome::NoChange;
        };
        if !self.session.cards[index].is_face_down() {
            return FlipOutcome::NoChange;
        }

        let now = self.clock.now();
        let session = &mut self.session;
        session.cards[index].is_flipped = true;
        session.flipped_cards.push(card_id);
        session.moves = session.moves.saturating_add(1);
        log::trace!("Flipped card {} (move {})", card_id, session.moves);

        if session.start_time.is_none() {
            session.start_time = Some(now);
            self.schedule_tick(now);
        }

        if self.session.flipped_cards.len() < 2 {
            FlipOutcome::Flipped
        } else {
            self.resolve_pair(now)
        }
    }

    pub fn toggle_pause(&mut self) -> bool {
        use GameStatus::*;

        match self.session.status {
            Playing => {
                self.session.status = Paused;
                self.cancel_ticks();
                true
            }
            Paused => {
                self.session.status = Playing;
                if self.session.start_time.is_some() {
                    self.schedule_tick(self.clock.now());
                }
                true
            }
            Idle | Won => false,
        }
    }

    /// Records the score of a won session and reports its stats. Returns
    /// `None` unless the session is won.
    pub fn finalize_session(&mut self) -> Option<SessionSummary> {
        if !self.session.status.is_finished() {
            return None;
        }

        let difficulty = self.session.difficulty;
        let moves = self.session.moves;
        let score = self.session.score;
        let elapsed_secs = self.session.completion_secs()?;
        let accuracy = compute_accuracy(moves, u32::from(self.session.total_pairs()));
        let is_new_record = self.store.save(difficulty, score);

        Some(SessionSummary {
            difficulty,
            moves,
            elapsed_secs,
            score,
            accuracy,
            is_new_record,
        })
    }

    /// Earliest time a deferred action wants to run.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.iter().map(|deferred| deferred.due).min()
    }

    /// Applies every deferred action that is due, oldest first, and returns
    /// how many belonged to the current session.
    pub fn run_due(&mut self) -> usize {
        let now = self.clock.now();
        let mut applied = 0;

        while let Some(index) = self.next_due_index(now) {
            let deferred = self.pending.swap_remove(index);
            if deferred.generation != self.generation {
                log::trace!(
                    "Dropping {:?} from generation {}, current is {}",
                    deferred.action,
                    deferred.generation.0,
                    self.generation.0
                );
                continue;
            }
            self.apply(deferred);
            applied += 1;
        }

        applied
    }

    fn resolve_pair(&mut self, now: Millis) -> FlipOutcome {
        let pair = [self.session.flipped_cards[0], self.session.flipped_cards[1]];
        let indices = (self.session.index_of(pair[0]), self.session.index_of(pair[1]));

        let (first, second) = match indices {
            (Some(first), Some(second))
                if self.session.cards[first].matches(&self.session.cards[second]) =>
            {
                (first, second)
            }
            _ => {
                self.schedule(
                    now + as_millis(MISMATCH_RESET_DELAY),
                    DeferredAction::HideMismatch(pair),
                );
                return FlipOutcome::Mismatched;
            }
        };

        let session = &mut self.session;
        session.cards[first].is_matched = true;
        session.cards[second].is_matched = true;
        session.flipped_cards.clear();

        let pair_id = session.cards[first].pair_id;
        if !session.matched_pairs.contains(&pair_id) {
            session.matched_pairs.push(pair_id);
        }
        log::trace!("Matched pair {}", pair_id);

        if session.matched_pairs.len() == usize::from(session.total_pairs()) {
            self.finish(now);
            FlipOutcome::Won
        } else {
            FlipOutcome::Matched
        }
    }

    fn finish(&mut self, now: Millis) {
        self.cancel_ticks();

        let session = &mut self.session;
        session.end_time = Some(now);
        let elapsed = session.completion_secs().unwrap_or_default();
        let matched = session.matched_pairs.len().try_into().unwrap_or(u32::MAX);
        session.score = compute_score(session.difficulty, session.moves, elapsed, matched);
        session.status = GameStatus::Won;

        log::info!(
            "Won {} game in {} moves and {}s, score {}",
            session.difficulty,
            session.moves,
            elapsed,
            session.score
        );
    }

    fn apply(&mut self, deferred: Deferred) {
        match deferred.action {
            DeferredAction::Tick => {
                if self.session.status.is_playing() {
                    self.elapsed_secs = self.elapsed_secs.saturating_add(1);
                    self.schedule(deferred.due + as_millis(TICK_INTERVAL), DeferredAction::Tick);
                }
            }
            DeferredAction::HideMismatch(ids) => {
                for card in &mut self.session.cards {
                    if ids.contains(&card.id) && !card.is_matched {
                        card.is_flipped = false;
                    }
                }
                self.session.flipped_cards.retain(|id| !ids.contains(id));
            }
        }
    }

    fn schedule(&mut self, due: Millis, action: DeferredAction) {
        self.pending.push(Deferred {
            due,
            generation: self.generation,
            action,
        });
    }

    fn schedule_tick(&mut self, now: Millis) {
        self.cancel_ticks();
        self.schedule(now + as_millis(TICK_INTERVAL), DeferredAction::Tick);
    }

    fn cancel_ticks(&mut self) {
        self.pending.retain(|deferred| deferred.action != DeferredAction::Tick);
    }

    fn next_due_index(&self, now: Millis) -> Option<usize> {
        self.pending
            .iter()
            .enumerate()
            .filter(|(_, deferred)| deferred.due <= now)
            .min_by_key(|(_, deferred)| deferred.due)
            .map(|(index, _)| index)
    }
}

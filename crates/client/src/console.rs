//! Line-oriented front end driving a [`GameController`].
//!
//! Moves typed by the user are staged through a [`MovePreparer`] before they
//! reach the controller, the same way a board front end would stage clicks.
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use game_core::{
    ControllerError, GameController, GameError, GameEvent, GameStatus, GameWin, Move,
    MovePreparer, MoveProducer, PlayerId, PlayerKind, PreparationEvent, Requester, StateAccess,
    StationId, StatusChange, TicketKind,
};

use crate::command::{Command, HELP};
use crate::labels::PlayerLabels;

/// Whether the console keeps reading input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Controller(#[from] ControllerError),

    #[error("no move prepared for {0}")]
    NotPrepared(PlayerId),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub struct Console {
    controller: GameController,
    preparer: MovePreparer,
    labels: PlayerLabels,
    notices: Rc<RefCell<Vec<String>>>,
    log_events: Rc<RefCell<Vec<GameEvent>>>,
}

impl Console {
    pub fn new(mut controller: GameController) -> Self {
        let notices = Rc::new(RefCell::new(Vec::new()));
        let log_events = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&notices);
        controller.subscribe(move |change: &StatusChange| {
            let notice = match change.win {
                GameWin::None => format!("status: {}", change.status),
                win => format!("game over, winner: {win}"),
            };
            sink.borrow_mut().push(notice);
        });

        let sink = Rc::clone(&log_events);
        controller.subscribe_game_events(move |event: &GameEvent| {
            if matches!(
                event,
                GameEvent::MoveDone(_) | GameEvent::MoveUndone(_) | GameEvent::MovesCleared
            ) {
                sink.borrow_mut().push(event.clone());
            }
        });

        let mut preparer = MovePreparer::new();
        let sink = Rc::clone(&notices);
        preparer.subscribe(move |event: &PreparationEvent| {
            if let PreparationEvent::Rejected(err) = event {
                sink.borrow_mut().push(format!("rejected: {err}"));
            }
        });

        Self {
            controller,
            preparer,
            labels: PlayerLabels::new(),
            notices,
            log_events,
        }
    }

    pub fn controller(&self) -> &GameController {
        &self.controller
    }

    /// Reads commands until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W) -> anyhow::Result<()> {
        writeln!(out, "{HELP}")?;
        for line in input.lines() {
            let line = line?;
            let flow = match Command::parse(&line) {
                Ok(Some(command)) => self.execute(command, &mut out)?,
                Ok(None) => Flow::Continue,
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    Flow::Continue
                }
            };
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Runs one command and prints its outcome. Only output failures escape.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> io::Result<Flow> {
        tracing::debug!(?command, "console command");
        let result = self.apply(command, out);
        self.sync_preparer();

        for notice in self.notices.borrow_mut().drain(..) {
            writeln!(out, "{notice}")?;
        }
        match result {
            Ok(flow) => Ok(flow),
            Err(ConsoleError::Io(err)) => Err(err),
            Err(ConsoleError::Controller(err)) => {
                let severity = err.severity();
                if severity.is_user_facing() {
                    tracing::info!(code = err.error_code(), %severity, %err, "command rejected");
                } else {
                    tracing::warn!(code = err.error_code(), %severity, %err, "command failed");
                }
                writeln!(out, "error: {err}")?;
                Ok(Flow::Continue)
            }
            Err(err) => {
                writeln!(out, "error: {err}")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow, ConsoleError> {
        match command {
            Command::NewMrX => {
                let mr_x = self.controller.new_mr_x()?;
                self.labels.assign(mr_x, PlayerKind::MrX);
                writeln!(out, "seated {}", self.labels.label(mr_x))?;
            }
            Command::NewDetective => {
                let detective = self.controller.new_detective()?;
                self.labels.assign(detective, PlayerKind::Detective);
                writeln!(out, "seated {}", self.labels.label(detective))?;
            }
            Command::Remove(player) => self.controller.remove_detective(player)?,
            Command::Up(player) => self.controller.shift_up_detective(player)?,
            Command::Down(player) => self.controller.shift_down_detective(player)?,
            Command::Clear => {
                self.controller.clear_players()?;
                self.labels.clear();
            }
            Command::NewGame => self.controller.new_game()?,
            Command::Start => self.controller.start()?,
            Command::Abort => self.controller.abort()?,
            Command::Move {
                player,
                station,
                ticket,
            } => self.submit(player, &[(station, ticket)])?,
            Command::Double { player, steps } => self.submit(player, &steps)?,
            Command::Undo => self.controller.undo()?,
            Command::Redo => self.controller.redo()?,
            Command::Status => self.print_status(out)?,
            Command::Moves => self.print_moves(out)?,
            Command::Options(player) => self.print_options(player, out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Stages the steps and commits the resulting move. Outside a game the
    /// move goes straight to the controller, which refuses it.
    fn submit(
        &mut self,
        player: PlayerId,
        steps: &[(StationId, TicketKind)],
    ) -> Result<(), ConsoleError> {
        let mv = if self.controller.status() == GameStatus::InGame {
            self.prepare(player, steps)?
        } else {
            let game = self.controller.game();
            match steps {
                [(station, ticket)] => MoveProducer::single(game, player, *station, *ticket),
                [first, second] => MoveProducer::double(game, player, [*first, *second]),
                _ => return Err(ConsoleError::NotPrepared(player)),
            }
        };
        self.controller.make_move(mv)?;
        Ok(())
    }

    fn prepare(
        &mut self,
        player: PlayerId,
        steps: &[(StationId, TicketKind)],
    ) -> Result<Move, ConsoleError> {
        self.preparer.clear(player);
        if steps.len() > 1
            && !self
                .preparer
                .request_further_move(self.controller.preparation_context(), player)
        {
            return Err(ConsoleError::NotPrepared(player));
        }
        for (station, ticket) in steps {
            let ctx = self.controller.preparation_context();
            if self.preparer.select_station(ctx, player, *station).is_empty()
                || !self.preparer.select_ticket(ctx, player, *ticket)
            {
                self.preparer.clear(player);
                return Err(ConsoleError::NotPrepared(player));
            }
        }
        self.preparer
            .take_move(self.controller.game(), player)
            .ok_or(ConsoleError::NotPrepared(player))
    }

    fn sync_preparer(&mut self) {
        let events: Vec<GameEvent> = self.log_events.borrow_mut().drain(..).collect();
        for event in &events {
            self.preparer.sync(event);
        }
    }

    fn print_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let StateAccess::Full(game) = self.controller.state_for(Requester::FrontEnd) else {
            return Ok(());
        };
        writeln!(
            out,
            "{} (win: {}), round {}",
            self.controller.status(),
            self.controller.win(),
            game.current_round()
        )?;
        if let Some(current) = game.current_player() {
            writeln!(out, "current: {}", self.labels.label(current))?;
        }
        for player in game.players() {
            let station = game
                .station_of(player)
                .map_or_else(|| "-".to_string(), |s| s.to_string());
            let items = game.items(player).map(ToString::to_string).unwrap_or_default();
            writeln!(out, "  {} at {station}: {items}", self.labels.label(player))?;
        }
        Ok(())
    }

    fn print_moves<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for mv in self.controller.game().moves() {
            writeln!(out, "  round {}: {} | {mv}", mv.round(), self.labels.label(mv.player()))?;
        }
        Ok(())
    }

    fn print_options<W: Write>(&self, player: PlayerId, out: &mut W) -> io::Result<()> {
        let options = self.controller.rules().moves().possible_moves(
            self.controller.game(),
            self.controller.graph(),
            player,
        );
        if options.is_empty() {
            return writeln!(out, "{} cannot move", self.labels.label(player));
        }
        for option in options {
            writeln!(out, "  {} by {}", option.station, option.ticket)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use game_content::BoardLoader;
    use game_core::{GameConfig, Rules};

    use super::*;

    const BOARD: &str = "\
V s 1 0 0
V s 2 0 0
V s 3 0 0
V s 4 0 0
E taxi 1 2
E taxi 2 3
E taxi 3 4
E taxi 4 1
E bus 1 3
";

    fn console() -> Console {
        let graph = BoardLoader::parse(BOARD).unwrap();
        let config = GameConfig::default().with_initial_stations([StationId(1), StationId(3)]);
        let initial: BTreeSet<StationId> = config.initial_stations.clone();
        Console::new(GameController::new(graph, Rules::standard(config), initial))
    }

    fn run(console: &mut Console, script: &str) -> String {
        let mut out = Vec::new();
        console.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn seats_players_and_starts() {
        let mut console = console();

        let output = run(&mut console, "mrx\ndetective\nstart\nstatus\n");

        assert!(output.contains("seated Mr. X (#0)"));
        assert!(output.contains("seated Detective 1 (#1)"));
        assert!(output.contains("status: IN_GAME"));
        assert_eq!(console.controller().game().moves().len(), 2);
    }

    #[test]
    fn typed_moves_reach_the_controller() {
        let mut console = console();
        run(&mut console, "mrx\ndetective\nstart\n");
        let mr_x = PlayerId(0);
        let from = console.controller().game().station_of(mr_x).unwrap();
        let to = if from == StationId(1) { 2 } else { 4 };

        run(&mut console, &format!("move 0 {to} taxi\n"));

        assert_eq!(
            console.controller().game().station_of(mr_x),
            Some(StationId(to))
        );
        assert_eq!(console.controller().game().current_player(), Some(PlayerId(1)));
    }

    #[test]
    fn rejected_moves_are_reported() {
        let mut console = console();

        let output = run(&mut console, "mrx\ndetective\nstart\nmove 1 2 taxi\n");

        assert!(output.contains("rejected: player #1 cannot prepare a move now"));
        assert!(output.contains("error: no move prepared for #1"));
    }

    #[test]
    fn moves_outside_a_game_hit_the_state_machine() {
        let mut console = console();

        let output = run(&mut console, "mrx\nmove 0 2 taxi\n");

        assert!(output.contains("error: move is not valid while NOT_IN_GAME"));
    }

    #[test]
    fn quit_stops_reading() {
        let mut console = console();

        run(&mut console, "quit\nmrx\n");

        assert!(!console.controller().game().has_players());
    }
}
